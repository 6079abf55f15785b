use sprig_parser::ParseError;
use thiserror::Error;

/// Common error type that can hold any sprig error
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

pub type CommonResult<T> = Result<T, CommonError>;

impl CommonError {
    /// Numeric error code for parse errors
    pub fn code(&self) -> Option<u32> {
        match self {
            CommonError::Parse(error) => Some(error.code().as_u32()),
            _ => None,
        }
    }
}

impl From<String> for CommonError {
    fn from(s: String) -> Self {
        CommonError::Generic(s)
    }
}

impl From<&str> for CommonError {
    fn from(s: &str) -> Self {
        CommonError::Generic(s.to_string())
    }
}
