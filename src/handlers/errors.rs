use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdeError {
    #[error("Invalid highlight pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid color '{value}': expected #rrggbb")]
    InvalidColor { value: String },

    #[error("Line {index} out of range for document with {len} lines")]
    LineOutOfRange { index: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IdeError {
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn line_out_of_range(index: usize, len: usize) -> Self {
        Self::LineOutOfRange { index, len }
    }

    pub fn invalid_color(value: impl Into<String>) -> Self {
        Self::InvalidColor {
            value: value.into(),
        }
    }
}

impl From<toml::de::Error> for IdeError {
    fn from(error: toml::de::Error) -> Self {
        Self::Config {
            message: error.to_string(),
        }
    }
}

pub type IdeResult<T> = Result<T, IdeError>;
