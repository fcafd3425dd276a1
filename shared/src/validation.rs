//! Input validation functions
//!
//! Validators return `Err(message)` with a user-facing message; the backend
//! wraps it in a 400 response.

use validator::ValidateEmail;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Largest accepted chat message, in characters
pub const MAX_CHAT_MESSAGE_CHARS: usize = 4000;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    // Also require a dotted domain
    let email_regex = regex_lite::Regex::new(EMAIL_PATTERN).map_err(|e| e.to_string())?;
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate username: 3 to 50 characters, letters, digits, `_`, `-` and `.`
pub fn validate_username(username: &str) -> Result<(), String> {
    let len = username.chars().count();
    if len < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }
    if len > 50 {
        return Err("Username must be at most 50 characters".to_string());
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err("Username may only contain letters, digits, '_', '-' and '.'".to_string());
    }
    Ok(())
}

/// Validate an upload's declared content type
pub fn validate_image_content_type(content_type: Option<&str>) -> Result<(), String> {
    match content_type {
        Some(ct) if ct.trim().to_ascii_lowercase().starts_with("image/") => Ok(()),
        Some(ct) => Err(format!("Only image uploads are allowed, got '{}'", ct)),
        None => Err("Only image uploads are allowed".to_string()),
    }
}

/// Validate a chat message
pub fn validate_chat_message(message: &str) -> Result<(), String> {
    if message.trim().is_empty() {
        return Err("Message cannot be empty".to_string());
    }
    if message.chars().count() > MAX_CHAT_MESSAGE_CHARS {
        return Err(format!(
            "Message must be at most {} characters",
            MAX_CHAT_MESSAGE_CHARS
        ));
    }
    Ok(())
}

/// Validate a daily calorie target
pub fn validate_calorie_target(calories: i32) -> Result<(), String> {
    if !(800..=6000).contains(&calories) {
        return Err("Calorie target must be between 800 and 6000".to_string());
    }
    Ok(())
}

/// Human-readable label for a request field
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "username" => "Username",
        "email" => "Email",
        "password" => "Password",
        "fullName" => "Full Name",
        "dietType" => "Diet Type",
        "mealsPerDay" => "Meals per Day",
        "calorieTarget" => "Calorie Target",
        "fitnessLevel" => "Fitness Level",
        "goal" => "Goal",
        "message" => "Message",
        "image" => "Image",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Run `check` and attach `field` to its error
pub fn field<F>(field: &str, check: F) -> Result<(), ValidationError>
where
    F: FnOnce() -> Result<(), String>,
{
    check().map_err(|message| ValidationError::new(field, &message))
}
