use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Body of both `POST /api/posts` and `POST /api/posts/comment/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct TextRequest {
    // A missing `text` field is reported the same way as an empty one.
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub text: String,
}

fn not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("Text is required".into());
        return Err(error);
    }
    Ok(())
}
