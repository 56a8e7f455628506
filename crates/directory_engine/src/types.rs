use directory_core::{
    ExperienceRecord, FailureKind, LoadError, Msg, RequestId, ResultPage,
};
use thiserror::Error;

/// Failure of a single API call. Never retried by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A required local parameter was missing; nothing was sent.
    #[error("{0}")]
    Validation(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    /// Non-2xx answer; `message` is the server's error payload when it sent one.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("response exceeds {max_bytes} bytes")]
    TooLarge { max_bytes: u64 },
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Validation(_) => FailureKind::Validation,
            ApiError::Transport(_) => FailureKind::Transport,
            ApiError::Timeout(_) => FailureKind::Timeout,
            ApiError::Status { status, .. } => FailureKind::HttpStatus(*status),
            ApiError::Decode(_) => FailureKind::Decode,
            ApiError::TooLarge { .. } => FailureKind::TooLarge,
        }
    }
}

impl From<ApiError> for LoadError {
    fn from(err: ApiError) -> Self {
        let kind = err.kind();
        let message = match err {
            ApiError::Validation(message)
            | ApiError::Transport(message)
            | ApiError::Timeout(message)
            | ApiError::Decode(message)
            | ApiError::Status { message, .. } => message,
            ApiError::TooLarge { max_bytes } => format!("limit is {max_bytes} bytes"),
        };
        LoadError::new(kind, message)
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("could not start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Completion of one effect, produced exactly once per executed effect.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    PageFetched {
        request: RequestId,
        result: Result<ResultPage, ApiError>,
    },
    ExperiencesFetched {
        request: RequestId,
        result: Result<Vec<ExperienceRecord>, ApiError>,
    },
}

impl EngineEvent {
    pub fn request(&self) -> RequestId {
        match self {
            EngineEvent::PageFetched { request, .. }
            | EngineEvent::ExperiencesFetched { request, .. } => *request,
        }
    }

    /// The completion message the state machine expects for this event.
    pub fn into_msg(self) -> Msg {
        match self {
            EngineEvent::PageFetched { request, result } => Msg::PageLoaded {
                request,
                result: result.map_err(LoadError::from),
            },
            EngineEvent::ExperiencesFetched { request, result } => Msg::ExperiencesLoaded {
                request,
                result: result.map_err(LoadError::from),
            },
        }
    }
}
