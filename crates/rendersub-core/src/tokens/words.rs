//! Shell-style word splitting for token strings
//!
//! Follows POSIX shell quoting:
//!
//! - whitespace separates words
//! - `'...'` is taken literally
//! - `"..."` honours `\\`, `\"`, `\$` and `` \` `` escapes, and drops an
//!   escaped newline
//! - outside quotes a backslash escapes the next character
//!
//! Quotes may sit in the middle of a word (`key="a b"`), and `''` is an empty
//! word.

use super::error::TokenMapError;

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordState {
    /// Between words
    Between,
    /// Inside an unquoted part of a word
    Bare,
    /// Inside `'...'`
    Single,
    /// Inside `"..."`
    Double,
}

/// Characters a backslash escapes inside double quotes
const DOUBLE_QUOTE_ESCAPES: [char; 4] = ['\\', '"', '$', '`'];

pub(crate) fn split_words(input: &str) -> Result<Vec<String>, TokenMapError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut state = WordState::Between;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        state = match (state, c) {
            (WordState::Between, c) if c.is_whitespace() => WordState::Between,
            (WordState::Bare, c) if c.is_whitespace() => {
                words.push(std::mem::take(&mut current));
                WordState::Between
            }
            (WordState::Between | WordState::Bare, '\'') => WordState::Single,
            (WordState::Between | WordState::Bare, '"') => WordState::Double,
            (WordState::Between | WordState::Bare, '\\') => {
                let escaped = chars.next().ok_or(TokenMapError::DanglingEscape)?;
                current.push(escaped);
                WordState::Bare
            }
            (WordState::Between | WordState::Bare, c) => {
                current.push(c);
                WordState::Bare
            }
            (WordState::Single, '\'') => WordState::Bare,
            (WordState::Double, '"') => WordState::Bare,
            (WordState::Double, '\\') => {
                match chars.peek().copied() {
                    Some('\n') => {
                        chars.next();
                    }
                    Some(next) if DOUBLE_QUOTE_ESCAPES.contains(&next) => {
                        current.push(next);
                        chars.next();
                    }
                    _ => current.push('\\'),
                }
                WordState::Double
            }
            (WordState::Single | WordState::Double, c) => {
                current.push(c);
                state
            }
        };
    }

    match state {
        WordState::Single => Err(TokenMapError::UnclosedQuote { quote: '\'' }),
        WordState::Double => Err(TokenMapError::UnclosedQuote { quote: '"' }),
        WordState::Bare => {
            words.push(current);
            Ok(words)
        }
        WordState::Between => Ok(words),
    }
}
