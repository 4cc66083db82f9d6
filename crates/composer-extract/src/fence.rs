//! Triple-backtick partitioning.
//!
//! A response is split on every fence marker. Odd partitions are block
//! interiors: a language line, a newline, then the body. An interior with no
//! newline, or whose body is blank, is dropped. A trailing unterminated fence
//! yields nothing.

/// The fence delimiter.
pub const FENCE: &str = "```";

/// One fenced block borrowed from the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence<'a> {
    /// Trimmed text after the opening marker, up to the first newline.
    pub language: &'a str,
    /// Everything between that newline and the closing marker.
    pub content: &'a str,
    /// Prose between the previous block (or the start of the response) and
    /// this block's opening marker.
    pub preceding: &'a str,
    /// Byte offset of the opening marker in the response.
    pub offset: usize,
}

/// All non-empty fenced blocks, in response order.
#[must_use]
pub fn fences(response: &str) -> Vec<Fence<'_>> {
    let mut blocks = Vec::new();
    let mut parts = Vec::new();
    let mut cursor = 0;
    for piece in response.split(FENCE) {
        parts.push((cursor, piece));
        cursor += piece.len() + FENCE.len();
    }

    // Interiors sit at odd indices and must be followed by a closing partition.
    let mut index = 1;
    while index + 1 < parts.len() {
        let (start, interior) = parts[index];
        let preceding = parts[index - 1].1;
        index += 2;

        let Some(newline) = interior.find('\n') else {
            tracing::debug!(offset = start, "fenced block without a language line, skipping");
            continue;
        };
        let content = &interior[newline + 1..];
        if content.trim().is_empty() {
            tracing::debug!(offset = start, "empty fenced block, skipping");
            continue;
        }

        blocks.push(Fence {
            language: interior[..newline].trim(),
            content,
            preceding,
            offset: start - FENCE.len(),
        });
    }

    blocks
}

/// Number of fence markers in the response.
#[must_use]
pub fn fence_count(response: &str) -> usize {
    response.matches(FENCE).count()
}

/// Whether the response contains at least one complete fenced block.
#[must_use]
pub fn contains_code(response: &str) -> bool {
    !fences(response).is_empty()
}
