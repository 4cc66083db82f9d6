//! # composer-extract
//!
//! Turns a raw assistant response into things the scheduler can act on:
//!
//! - **Fenced blocks**: the response is partitioned on triple-backtick fences
//!   and every non-empty block gets a best-guess target path and [`FileKind`].
//!   Three entry points keep the historical behaviors apart:
//!   [`BlockExtractor::extract_all`] (every block, generic fallback names),
//!   [`BlockExtractor::extract_first`] (first block only), and
//!   [`BlockExtractor::extract_fast`] (`File:` hints, unknown blocks skipped).
//! - **Prose dependencies**: [`DependencyScanner`] looks for files the
//!   response talks about without providing, and records them as pending
//!   table entries.
//!
//! Nothing in this crate fails: ambiguity is resolved by heuristics and the
//! worst case is an empty result.
//!
//! [`FileKind`]: composer_core::FileKind

mod blocks;
pub mod fence;
mod hints;
mod naming;
mod scanner;

pub use blocks::BlockExtractor;
pub use fence::{Fence, contains_code, fence_count};
pub use scanner::DependencyScanner;
