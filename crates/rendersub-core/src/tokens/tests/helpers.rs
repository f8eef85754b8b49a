//! Shared test helpers for token expansion tests

use crate::tokens::TokenMap;

/// Tokens a render layer directory is usually expanded with
pub(super) fn layer_tokens() -> TokenMap {
    TokenMap::new()
        .with("Layer", "beauty")
        .with("RenderLayer", "beauty")
        .with("Scene", "shot010")
}

/// Tokens with a pass name and a camera carrying a namespace
pub(super) fn pass_tokens() -> TokenMap {
    TokenMap::new()
        .with("RenderPass", "Diffuse")
        .with("Camera", "rig:shotCam")
        .with_absent("Version")
}

/// True when `needle` appears in `haystack` in order, not necessarily contiguous
pub(super) fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut rest = haystack.chars();
    needle.chars().all(|c| rest.any(|h| h == c))
}
