//! Token map parsing errors

use std::fmt;

/// Errors raised while parsing a `key=value` token string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenMapError {
    /// A quoted word was never closed
    UnclosedQuote {
        /// The opening quote character
        quote: char,
    },

    /// Input ended right after a backslash
    DanglingEscape,

    /// Word is not of the form `key=value`
    MalformedPair {
        /// The offending word, after quote removal
        word: String,
    },
}

impl fmt::Display for TokenMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenMapError::UnclosedQuote { quote } => {
                write!(f, "No closing quotation for {}", quote)
            }
            TokenMapError::DanglingEscape => {
                write!(f, "No escaped character after trailing backslash")
            }
            TokenMapError::MalformedPair { word } => {
                write!(
                    f,
                    "Expected a single 'key=value' pair, found '{}'",
                    word
                )
            }
        }
    }
}

impl std::error::Error for TokenMapError {}
