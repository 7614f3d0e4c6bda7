use serde_json::{json, Value};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid email or password")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "unauthorized",
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation",
            AppError::Conflict(_) => "conflict",
            AppError::Internal(_) => "internal",
        }
    }

    /// Error envelope handed to the presentation layer.
    pub fn to_body(&self) -> Value {
        let message = match self {
            AppError::Unauthorized => self.to_string(),
            AppError::NotFound(msg) | AppError::Validation(msg) | AppError::Conflict(msg) => {
                msg.clone()
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                "Internal error".into()
            }
        };

        json!({
            "error": {
                "message": message,
                "code": self.code(),
            }
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let message = fields
            .iter()
            .find_map(|(field, errs)| {
                errs.first().map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .unwrap_or_else(|| "Invalid input".into());

        AppError::Validation(message)
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_body_carries_message() {
        let body = AppError::Validation("Please rate your energy level".into()).to_body();
        assert_eq!(body["error"]["message"], "Please rate your energy level");
        assert_eq!(body["error"]["code"], "validation");
    }

    #[test]
    fn test_internal_body_is_masked() {
        let err = AppError::Internal(anyhow::anyhow!("entry map poisoned"));
        let body = err.to_body();
        assert_eq!(body["error"]["message"], "Internal error");
        assert_eq!(body["error"]["code"], "internal");
    }

    #[test]
    fn test_unauthorized_message() {
        let body = AppError::Unauthorized.to_body();
        assert_eq!(body["error"]["message"], "Invalid email or password");
    }
}
