use thiserror::Error;

pub type GenericError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum IssBotError {
    #[error("request to {0} timed out")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{url} answered with HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("geocoding failed: {0}")]
    Geocoding(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl IssBotError {
    /// Text sent back to the channel when a command fails.
    pub fn user_message(&self) -> &'static str {
        match self {
            IssBotError::Timeout(_) => {
                "Sorry, the ISS tracker is taking too long to answer. Try again in a bit."
            }
            IssBotError::Network(_) | IssBotError::HttpStatus { .. } => {
                "Sorry, I couldn't reach one of my space sources right now."
            }
            IssBotError::Geocoding(_) => "Sorry, the map service isn't cooperating right now.",
            IssBotError::Parse(_) | IssBotError::Format(_) => {
                "Sorry, I got an answer I couldn't make sense of."
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("payload is too short or cut inside a character")]
    Envelope,
    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },
    #[error("payload nests deeper than {} brackets", crate::passes::normalizer::MAX_DEPTH)]
    TooDeep,
    #[error("unexpected end of payload")]
    UnexpectedEnd,
    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),
    #[error("invalid coordinate {0:?}")]
    Coordinate(String),
    #[error("invalid JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::Json(err.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid timestamp {0:?}, expected YYYYMMDDHHmmss")]
    Timestamp(String),
    #[error("pass ends ({end}) before it begins ({begin})")]
    NegativeDuration { begin: String, end: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set.")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}
