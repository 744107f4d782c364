use thiserror::Error;

/// Keep error bodies short enough to log and show in the status bar
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// What went wrong talking to the results feed. The board never treats
/// any of these as fatal; they surface as an "unavailable" status while
/// the last good standings stay up.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Unauthorized - admin token missing or expired")]
    Unauthorized,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl FeedError {
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let body = truncate_body(body);
        match status.as_u16() {
            401 => Self::Unauthorized,
            403 => Self::AccessDenied(body),
            404 => Self::NotFound(body),
            429 => Self::RateLimited,
            500..=599 => Self::ServerError(body),
            _ => Self::InvalidResponse(format!("Status {}: {}", status, body)),
        }
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        body.to_string()
    } else {
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..MAX_ERROR_BODY_LENGTH],
            body.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            FeedError::from_status(StatusCode::UNAUTHORIZED, ""),
            FeedError::Unauthorized
        ));
        assert!(matches!(
            FeedError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            FeedError::RateLimited
        ));
        assert!(matches!(
            FeedError::from_status(StatusCode::BAD_GATEWAY, "oops"),
            FeedError::ServerError(_)
        ));
        assert!(matches!(
            FeedError::from_status(StatusCode::IM_A_TEAPOT, ""),
            FeedError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_long_bodies_truncated() {
        let body = "x".repeat(2000);
        match FeedError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body) {
            FeedError::ServerError(msg) => {
                assert!(msg.len() < 600);
                assert!(msg.contains("truncated"));
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
