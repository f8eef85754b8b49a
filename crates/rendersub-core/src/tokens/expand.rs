//! Token expansion

use super::map::{Lookup, TokenMap};
use super::split::{split_groups, split_placeholders, Piece};

/// How placeholders inside one span resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Substitution {
    /// Each placeholder resolves on its own (text outside groups)
    Independent,
    /// One unknown placeholder invalidates the whole span (group content)
    AllOrNothing,
}

/// Expander for conditional path templates
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenExpander {
    leave_unmatched: bool,
}

impl TokenExpander {
    /// Create an expander that drops unknown tokens
    pub fn new() -> Self {
        Self::default()
    }

    /// Render unknown tokens back as `<Name>` instead of dropping them
    pub fn leave_unmatched(mut self, leave: bool) -> Self {
        self.leave_unmatched = leave;
        self
    }

    /// Expand `template` against `tokens`
    pub fn expand(&self, template: &str, tokens: &TokenMap) -> String {
        let mut output = String::with_capacity(template.len());

        for piece in split_groups(template) {
            let expanded = match piece {
                Piece::Text(text) => self.substitute(text, tokens, Substitution::Independent),
                Piece::Enclosed(group) => {
                    self.substitute(group, tokens, Substitution::AllOrNothing)
                }
            };
            output.push_str(&expanded);
        }

        output
    }

    fn substitute(&self, text: &str, tokens: &TokenMap, mode: Substitution) -> String {
        let mut output = String::with_capacity(text.len());

        for piece in split_placeholders(text) {
            let name = match piece {
                Piece::Text(literal) => {
                    output.push_str(literal);
                    continue;
                }
                Piece::Enclosed(name) => name,
            };

            match tokens.lookup(name) {
                Lookup::Value(value) => output.push_str(&value.replace(':', "_")),
                Lookup::Absent => push_literal_token(&mut output, name),
                Lookup::Missing => match mode {
                    // The first unknown token replaces the whole group
                    Substitution::AllOrNothing if self.leave_unmatched => {
                        return format!("<{}>", name);
                    }
                    Substitution::AllOrNothing => return String::new(),
                    Substitution::Independent if self.leave_unmatched => {
                        push_literal_token(&mut output, name)
                    }
                    Substitution::Independent => {}
                },
            }
        }

        output
    }
}

fn push_literal_token(output: &mut String, name: &str) {
    output.push('<');
    output.push_str(name);
    output.push('>');
}

/// Convenience function to expand a template
pub fn expand(template: &str, tokens: &TokenMap, leave_unmatched: bool) -> String {
    TokenExpander::new()
        .leave_unmatched(leave_unmatched)
        .expand(template, tokens)
}
