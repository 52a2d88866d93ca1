use std::fmt;

/// A surface call the platform could not carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceError {
    pub operation: &'static str,
    pub message: String,
}

impl SurfaceError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.message)
    }
}

impl std::error::Error for SurfaceError {}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(error) => write!(f, "malformed site config: {error}"),
            Self::Invalid(reason) => write!(f, "invalid site config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(error) => Some(error),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error)
    }
}

/// Failure of a single event handler. The dispatcher logs it and moves on.
#[derive(Debug)]
pub enum SiteError {
    Surface(SurfaceError),
    Config(ConfigError),
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(error) => error.fmt(f),
            Self::Config(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for SiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(error) => Some(error),
            Self::Config(error) => Some(error),
        }
    }
}

impl From<SurfaceError> for SiteError {
    fn from(error: SurfaceError) -> Self {
        Self::Surface(error)
    }
}

impl From<ConfigError> for SiteError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}
