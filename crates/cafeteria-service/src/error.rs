//! Error types for the service adapters
//!
//! Every adapter call either returns a value or one of these. Adapters do
//! not retry; [`ServiceError::is_retryable`] only classifies.

/// Failure reported by a backend or sign-in adapter
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Transport failure
    #[error("network error: {0}")]
    Network(String),

    /// Requested row does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// No session, or the session may not perform the call
    #[error("unauthorized")]
    Unauthorized,

    /// The user dismissed the platform sign-in sheet
    #[error("sign-in cancelled")]
    Cancelled,

    /// Backend rejected the request
    #[error("backend error: {0}")]
    Backend(String),

    /// A row could not be encoded or decoded
    #[error("codec error: {0}")]
    Codec(String),
}

impl ServiceError {
    /// Check if error is transient
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Localized message shown inline by the feature that made the call
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "네트워크 연결을 확인해주세요.".to_string(),
            Self::NotFound(_) => "요청한 정보를 찾을 수 없습니다.".to_string(),
            Self::Unauthorized => "로그인이 필요합니다.".to_string(),
            Self::Cancelled => "로그인이 취소되었습니다.".to_string(),
            Self::Backend(_) | Self::Codec(_) => {
                "일시적인 오류가 발생했습니다. 잠시 후 다시 시도해주세요.".to_string()
            }
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Codec(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_display() {
        let err = ServiceError::Network("timeout".to_string());
        assert!(err.to_string().contains("network error"));
    }

    #[test]
    fn service_error_is_retryable() {
        assert!(ServiceError::Network("reset".to_string()).is_retryable());
        assert!(!ServiceError::Unauthorized.is_retryable());
        assert!(!ServiceError::Backend("constraint".to_string()).is_retryable());
    }

    #[test]
    fn user_message_hides_internal_detail() {
        let msg = ServiceError::Backend("duplicate key value violates unique constraint".into())
            .user_message();
        assert!(!msg.contains("constraint"));
    }

    #[test]
    fn codec_errors_convert() {
        let err: ServiceError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ServiceError::Codec(_)));
    }
}
