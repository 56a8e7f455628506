use std::fmt;

/// Failure classes the presentation layer can tell apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// A required local parameter was missing; no request was sent.
    Validation,
    /// The request could not be sent or the connection broke.
    Transport,
    Timeout,
    /// The server answered with a non-2xx status.
    HttpStatus(u16),
    /// The server answered 2xx with a body we could not read.
    Decode,
    TooLarge,
    /// The awaiting caller went away before the response arrived.
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Validation => write!(f, "invalid request"),
            FailureKind::Transport => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Decode => write!(f, "unreadable response"),
            FailureKind::TooLarge => write!(f, "response too large"),
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A failed fetch as stored on the directory state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub kind: FailureKind,
    pub message: String,
}

impl LoadError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}
