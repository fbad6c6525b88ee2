//! Error types shared by the coaching session and the one-shot operations.

use async_openai::error::OpenAIError;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// A failure reported by (or while waiting on) a text-generation or
/// transcription backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Network failure, quota exhaustion or a non-success API response.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    /// The request was rejected before or by the backend.
    #[error("invalid backend request: {0}")]
    InvalidRequest(String),
    /// The backend answered, but the answer carried no usable text.
    #[error("malformed backend output: {0}")]
    Malformed(String),
    #[error("backend did not respond within {0:?}")]
    Timeout(Duration),
}

impl From<OpenAIError> for BackendError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::ApiError(api) => Self::Unavailable(api.message),
            OpenAIError::Reqwest(e) => Self::Unavailable(e.to_string()),
            OpenAIError::JSONDeserialize(e) => Self::Malformed(e.to_string()),
            OpenAIError::InvalidArgument(msg) => Self::InvalidRequest(msg),
            other => Self::Unavailable(other.to_string()),
        }
    }
}

/// Awaits a backend future, failing with [`BackendError::Timeout`] once
/// `limit` has elapsed.
pub async fn with_deadline<T, F>(limit: Duration, fut: F) -> Result<T, BackendError>
where
    F: Future<Output = Result<T, BackendError>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| BackendError::Timeout(limit))?
}

/// The category of a session failure, as reported to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    BackendError,
    MalformedInput,
    Timeout,
    Disconnected,
    Protocol,
}

/// Everything that can end a coaching session early.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("step {step} failed: {source}")]
    Backend {
        step: usize,
        #[source]
        source: BackendError,
    },
    #[error("malformed client message: {0}")]
    MalformedInput(String),
    #[error("client disconnected")]
    Disconnected,
    #[error("no client reply within {0:?}")]
    ReplyTimeout(Duration),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("session was already started")]
    AlreadyStarted,
    #[error("session has not been started")]
    NotStarted,
}

impl SessionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SessionError::Backend {
                source: BackendError::Timeout(_),
                ..
            } => FailureKind::Timeout,
            SessionError::Backend { .. } => FailureKind::BackendError,
            SessionError::MalformedInput(_) => FailureKind::MalformedInput,
            SessionError::ReplyTimeout(_) => FailureKind::Timeout,
            SessionError::Disconnected | SessionError::Transport(_) => FailureKind::Disconnected,
            SessionError::AlreadyStarted | SessionError::NotStarted => FailureKind::Protocol,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_with_deadline_times_out() {
        let limit = Duration::from_secs(5);
        let result: Result<(), _> =
            with_deadline(limit, std::future::pending::<Result<(), BackendError>>()).await;
        assert!(matches!(result, Err(BackendError::Timeout(d)) if d == limit));
    }

    #[tokio::test]
    async fn test_with_deadline_passes_through_result() {
        let ok = with_deadline(Duration::from_secs(1), async { Ok::<_, BackendError>(7) }).await;
        assert_eq!(ok.unwrap(), 7);

        let err = with_deadline(Duration::from_secs(1), async {
            Err::<(), _>(BackendError::Malformed("empty".into()))
        })
        .await;
        assert!(matches!(err, Err(BackendError::Malformed(_))));
    }

    #[test]
    fn test_failure_kind_mapping() {
        let backend = SessionError::Backend {
            step: 3,
            source: BackendError::Unavailable("quota".into()),
        };
        assert_eq!(backend.kind(), FailureKind::BackendError);

        let slow = SessionError::Backend {
            step: 0,
            source: BackendError::Timeout(Duration::from_secs(1)),
        };
        assert_eq!(slow.kind(), FailureKind::Timeout);

        assert_eq!(
            SessionError::ReplyTimeout(Duration::from_secs(1)).kind(),
            FailureKind::Timeout
        );
        assert_eq!(
            SessionError::MalformedInput("x".into()).kind(),
            FailureKind::MalformedInput
        );
        assert_eq!(SessionError::Disconnected.kind(), FailureKind::Disconnected);
        assert_eq!(SessionError::NotStarted.kind(), FailureKind::Protocol);
    }

    #[test]
    fn test_failure_kind_serialization() {
        let json = serde_json::to_string(&FailureKind::MalformedInput).unwrap();
        assert_eq!(json, "\"malformed_input\"");
        let json = serde_json::to_string(&FailureKind::BackendError).unwrap();
        assert_eq!(json, "\"backend_error\"");
    }

    #[test]
    fn test_backend_error_display() {
        let err = SessionError::Backend {
            step: 2,
            source: BackendError::Malformed("no content".into()),
        };
        assert_eq!(
            err.to_string(),
            "step 2 failed: malformed backend output: no content"
        );
    }
}
