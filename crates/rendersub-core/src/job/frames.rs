use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RendersubError;

/// Inclusive frame range, displayed as `start-end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRange {
    pub start: i64,
    pub end: i64,
}

impl FrameRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }
}

impl Default for FrameRange {
    fn default() -> Self {
        Self { start: 1, end: 1 }
    }
}

impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for FrameRange {
    type Err = RendersubError;

    /// Parses `N` or `N-M`; a leading `-` belongs to the start frame
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = |reason: &str| RendersubError::FieldInvalid {
            field: "frange".to_string(),
            reason: format!("'{}': {}", s, reason),
        };

        // skip the first char so "-5" is a single negative frame
        let split_at = s
            .char_indices()
            .skip(1)
            .find(|(_, c)| *c == '-')
            .map(|(i, _)| i);

        let (start, end) = match split_at {
            Some(i) => (&s[..i], &s[i + 1..]),
            None => (s, s),
        };

        let start: i64 = start
            .trim()
            .parse()
            .map_err(|_| invalid("start frame is not an integer"))?;
        let end: i64 = end
            .trim()
            .parse()
            .map_err(|_| invalid("end frame is not an integer"))?;

        if start > end {
            return Err(invalid("start frame is after end frame"));
        }

        Ok(Self { start, end })
    }
}
