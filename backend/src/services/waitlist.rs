//! Waitlist signups

use crate::error::ApiError;
use crate::storage::Storage;
use nutrifit_shared::validation::{self, field};
use nutrifit_shared::WaitlistUser;
use tracing::info;

pub struct WaitlistService;

impl WaitlistService {
    /// Add an email to the waitlist; an email already on it is a conflict
    pub async fn join(storage: &dyn Storage, email: &str) -> Result<WaitlistUser, ApiError> {
        let email = email.trim();
        field("email", || validation::validate_email(email))?;

        if storage.waitlist_user_by_email(email).await?.is_some() {
            return Err(ApiError::Conflict(
                "Email is already on the waitlist".to_string(),
            ));
        }

        let entry = storage.add_waitlist_user(email).await?;
        info!(waitlist_id = entry.id, "Waitlist signup");
        Ok(entry)
    }
}
