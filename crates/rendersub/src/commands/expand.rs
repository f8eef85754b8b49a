//! Expand command - expand a path template against tokens

use crate::output::print_text;
use anyhow::Result;
use rendersub_core::RendersubError;
use rendersub_core::tokens::{TokenExpander, TokenMap};

pub fn run(
    template: &str,
    tokens: Option<&str>,
    absent: Vec<String>,
    leave_unmatched: bool,
) -> Result<()> {
    let mut map = match tokens {
        Some(tokens) => TokenMap::parse(tokens).map_err(RendersubError::from)?,
        None => TokenMap::new(),
    };
    for name in absent {
        map.insert_absent(name);
    }

    let expanded = TokenExpander::new()
        .leave_unmatched(leave_unmatched)
        .expand(template, &map);

    print_text(&expanded)?;
    Ok(())
}
