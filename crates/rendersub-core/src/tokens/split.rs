//! Splitting templates into literal text and delimited pieces
//!
//! Two scanners share one iterator:
//!
//! - groups: `[` content `]`, content non-empty and free of `]`
//! - placeholders: `<` ASCII letters `>`
//!
//! Both match leftmost-first and never nest. Delimiters are ASCII, so every
//! slice boundary falls on a UTF-8 character boundary.

/// A piece of split text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Piece<'a> {
    /// Text outside any match
    Text(&'a str),
    /// Inner content of a match, delimiters stripped
    Enclosed(&'a str),
}

/// Locates the next match at or after `from`, returning `(start, end)` where
/// `end` is one past the closing delimiter
type Finder = fn(&[u8], usize) -> Option<(usize, usize)>;

/// Iterator alternating between text and enclosed pieces
///
/// Empty text pieces are skipped.
pub(crate) struct DelimitedSplit<'a> {
    text: &'a str,
    pos: usize,
    pending: Option<Piece<'a>>,
    find: Finder,
}

impl<'a> DelimitedSplit<'a> {
    fn new(text: &'a str, find: Finder) -> Self {
        Self {
            text,
            pos: 0,
            pending: None,
            find,
        }
    }
}

impl<'a> Iterator for DelimitedSplit<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Piece<'a>> {
        if let Some(piece) = self.pending.take() {
            return Some(piece);
        }

        if self.pos >= self.text.len() {
            return None;
        }

        match (self.find)(self.text.as_bytes(), self.pos) {
            Some((start, end)) => {
                let enclosed = Piece::Enclosed(&self.text[start + 1..end - 1]);
                let before = &self.text[self.pos..start];
                self.pos = end;

                if before.is_empty() {
                    Some(enclosed)
                } else {
                    self.pending = Some(enclosed);
                    Some(Piece::Text(before))
                }
            }
            None => {
                let rest = &self.text[self.pos..];
                self.pos = self.text.len();
                Some(Piece::Text(rest))
            }
        }
    }
}

/// Split a template on `[group]` spans
pub(crate) fn split_groups(template: &str) -> DelimitedSplit<'_> {
    DelimitedSplit::new(template, find_group)
}

/// Split text on `<Token>` placeholders
pub(crate) fn split_placeholders(text: &str) -> DelimitedSplit<'_> {
    DelimitedSplit::new(text, find_placeholder)
}

fn find_group(bytes: &[u8], from: usize) -> Option<(usize, usize)> {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == b'[' {
            match bytes[i + 1..].iter().position(|&b| b == b']') {
                // "[]" has no content, try the next opening bracket
                Some(0) => {}
                Some(offset) => return Some((i, i + offset + 2)),
                // No closing bracket anywhere ahead, so no later group either
                None => return None,
            }
        }
        i += 1;
    }
    None
}

fn find_placeholder(bytes: &[u8], from: usize) -> Option<(usize, usize)> {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == b'<' {
            let name_len = bytes[i + 1..]
                .iter()
                .take_while(|b| b.is_ascii_alphabetic())
                .count();
            let close = i + 1 + name_len;
            if name_len > 0 && bytes.get(close) == Some(&b'>') {
                return Some((i, close + 1));
            }
        }
        i += 1;
    }
    None
}
