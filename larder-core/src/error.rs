use thiserror::Error;

/// Input rejected before it reaches the store. `field` names the offending
/// request attribute when there is one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Option<&'static str>,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("Image must be a data URI of the form data:image/<type>;base64,<payload>")]
    NotDataUri,

    #[error("Image payload is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("Image too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Failed to read image: {0}")]
    Unreadable(String),

    #[error("Unsupported image format: {0}. Allowed: JPEG, PNG, GIF, WebP")]
    UnsupportedFormat(String),
}

impl From<ImageError> for ValidationError {
    fn from(err: ImageError) -> Self {
        ValidationError::new("image", err.to_string())
    }
}
