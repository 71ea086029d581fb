//! Conversion outcome taxonomy.
//!
//! Every job ends in exactly one of these kinds. The numeric codes mirror the
//! engine's status codes (see [`crate::engine::codes`]); a code the taxonomy
//! does not know collapses to [`PlistError::Unknown`].

use thiserror::Error;

use crate::engine::codes::{self, RawCode};

/// Terminal result of a conversion.
///
/// `Success` is the single non-failure kind. Equality follows the numeric
/// code: each kind owns exactly one code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum PlistError {
    #[error("Operation successful")]
    Success,

    #[error("An unspecified error occurred")]
    Unknown,

    #[error("Not enough memory to handle the operation")]
    NoMemory,

    #[error("Parsing of the input format failed")]
    Parse,

    #[error("The document contains nodes not compatible with the output format")]
    Format,

    #[error("One or more of the parameters are invalid")]
    InvalidArguments,

    #[error("I/O error")]
    Io,
}

impl PlistError {
    /// Maps an engine status code onto the taxonomy.
    pub fn from_code(code: RawCode) -> Self {
        match code {
            codes::SUCCESS => Self::Success,
            codes::INVALID_ARG => Self::InvalidArguments,
            codes::FORMAT => Self::Format,
            codes::PARSE => Self::Parse,
            codes::NO_MEM => Self::NoMemory,
            codes::IO => Self::Io,
            _ => Self::Unknown,
        }
    }

    /// The engine status code for this kind.
    pub fn code(&self) -> RawCode {
        match self {
            Self::Success => codes::SUCCESS,
            Self::Unknown => codes::UNKNOWN,
            Self::NoMemory => codes::NO_MEM,
            Self::Parse => codes::PARSE,
            Self::Format => codes::FORMAT,
            Self::InvalidArguments => codes::INVALID_ARG,
            Self::Io => codes::IO,
        }
    }

    /// User-facing sentence for this kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Success => "Operation successful",
            Self::Unknown => "An unspecified error occurred",
            Self::NoMemory => "Not enough memory to handle the operation",
            Self::Parse => "Parsing of the input format failed",
            Self::Format => "The document contains nodes not compatible with the output format",
            Self::InvalidArguments => "One or more of the parameters are invalid",
            Self::Io => "I/O error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<std::io::Error> for PlistError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::OutOfMemory => Self::NoMemory,
            _ => Self::Io,
        }
    }
}
