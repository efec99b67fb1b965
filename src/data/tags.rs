//! Gold tag alignment
//!
//! Tag files carry either one tag per whitespace-separated token, or the
//! WMT gap-tag convention of `2N+1` fields for `N` tokens (gap tag,
//! token tag, gap tag, ...). In the interleaved case only the token
//! positions are kept: every second field starting at index 1.

use crate::error::{QescopeError, QescopeResult};

/// Recover per-token tags from a tag line for a sentence of
/// `token_count` tokens, detecting the interleaved `2N+1` layout.
pub fn align_tags(tag_line: &str, token_count: usize) -> QescopeResult<Vec<String>> {
    let fields: Vec<&str> = tag_line.split_whitespace().collect();

    if fields.len() == 2 * token_count + 1 {
        return Ok(fields
            .iter()
            .skip(1)
            .step_by(2)
            .map(|s| s.to_string())
            .collect());
    }

    if fields.len() == token_count {
        return Ok(fields.iter().map(|s| s.to_string()).collect());
    }

    Err(QescopeError::TagMismatch {
        tags: fields.len(),
        tokens: token_count,
    })
}
