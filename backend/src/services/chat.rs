//! Nutrition chat

use crate::ai::AiAssistant;
use crate::error::ApiError;
use nutrifit_shared::validation::{self, field};
use nutrifit_shared::{ChatRequest, ChatResponse, Id};
use tracing::debug;

pub struct ChatService;

impl ChatService {
    pub async fn reply(
        ai: &AiAssistant,
        user_id: Id,
        req: ChatRequest,
    ) -> Result<ChatResponse, ApiError> {
        field("message", || validation::validate_chat_message(&req.message))?;

        debug!(user_id, history = req.history.len(), "Chat message");
        let reply = ai.chat(req.message.trim(), &req.history).await?;
        Ok(ChatResponse { reply })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_blank_message_rejected_before_ai() {
        let err = ChatService::reply(
            &AiAssistant::disabled(),
            1,
            ChatRequest {
                message: "   ".to_string(),
                history: vec![],
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ai_unavailable_is_bad_gateway() {
        let err = ChatService::reply(
            &AiAssistant::disabled(),
            1,
            ChatRequest {
                message: "Is oatmeal healthy?".to_string(),
                history: vec![],
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }
}
