//! # composer-core
//!
//! Core types, path conventions, uid generation, and error types for the
//! response composer.
//!
//! This crate provides the vocabulary shared by every other composer crate:
//! - `FileKind` and `AssistantMode` enums
//! - `CodeBlock`, `DependencyEntry`, `DependencyTable`, `ProcessingOrder`
//! - `res://` path normalization helpers
//! - Scene uid generation from an injected random source
//! - A clock port so generated file names are deterministic in tests
//! - Per-file outcome and report types rendered by the CLI

pub mod clock;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod paths;
pub mod responses;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entities::{CodeBlock, DependencyEntry, DependencyTable, ProcessingOrder};
pub use enums::{AssistantMode, FileKind};
pub use errors::CoreError;
pub use responses::{ApplyReport, FileOutcome, FileReport};
