use serde::Deserialize;
use thiserror::Error;

/// Failure of a request against the store API, classified by HTTP status.
///
/// Every variant carries the text shown to the user; the server message is
/// preferred whenever the body contains one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Không thể kết nối tới máy chủ: {0}")]
    Transport(String),

    #[error("{0}")]
    Validation(String),

    #[error("Bạn không có quyền thực hiện thao tác này")]
    Unauthorized,

    #[error("Không tìm thấy dữ liệu")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("Lỗi máy chủ ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Phản hồi từ máy chủ không hợp lệ: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Flat { message: String },
    Nested { error: NestedError },
    Text { error: String },
}

#[derive(Deserialize)]
struct NestedError {
    message: String,
}

impl ApiError {
    /// Build the error for a non-2xx response
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = Self::extract_message(body);
        match status {
            400 | 422 => {
                ApiError::Validation(message.unwrap_or_else(|| "Dữ liệu không hợp lệ".to_string()))
            }
            401 | 403 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            409 => ApiError::Conflict(message.unwrap_or_else(|| "Dữ liệu đã tồn tại".to_string())),
            _ => ApiError::Server {
                status,
                message: message.unwrap_or_else(|| "Đã xảy ra lỗi không xác định".to_string()),
            },
        }
    }

    /// Pull `message`, `error.message` or `error` out of a JSON error body
    pub fn extract_message(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        let message = match parsed {
            ErrorBody::Flat { message } => message,
            ErrorBody::Nested { error } => error.message,
            ErrorBody::Text { error } => error,
        };
        let message = message.trim().to_string();
        (!message.is_empty()).then_some(message)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation(_) => Some(400),
            ApiError::Unauthorized => Some(401),
            ApiError::NotFound => Some(404),
            ApiError::Conflict(_) => Some(409),
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    /// Errors the user can fix by editing the form
    pub fn is_user_fixable(&self) -> bool {
        matches!(self, ApiError::Validation(_) | ApiError::Conflict(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(
            ApiError::from_response(400, r#"{"message":"Tên màu đã tồn tại"}"#),
            ApiError::Validation("Tên màu đã tồn tại".to_string())
        );
        assert_eq!(ApiError::from_response(403, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_response(404, "not found"), ApiError::NotFound);
        assert_eq!(
            ApiError::from_response(409, r#"{"error":{"message":"Trùng mã"}}"#),
            ApiError::Conflict("Trùng mã".to_string())
        );
        assert_eq!(
            ApiError::from_response(500, r#"{"error":"NullPointerException"}"#),
            ApiError::Server {
                status: 500,
                message: "NullPointerException".to_string()
            }
        );
    }

    #[test]
    fn test_fallback_messages() {
        assert_eq!(
            ApiError::from_response(422, "<html></html>").to_string(),
            "Dữ liệu không hợp lệ"
        );
        assert_eq!(ApiError::extract_message(r#"{"message":"   "}"#), None);
    }

    #[test]
    fn test_user_fixable() {
        assert!(ApiError::Conflict("x".into()).is_user_fixable());
        assert!(!ApiError::NotFound.is_user_fixable());
        assert_eq!(ApiError::Transport("offline".into()).status(), None);
    }
}
