//! # composer-apply
//!
//! Writes assistant responses into a project.
//!
//! - [`Composer`] runs either pipeline over one response and returns an
//!   [`ApplyReport`] with one outcome per path
//! - [`Scheduler`] orders a dependency table, splices in placeholders for
//!   missing references, and drives the writes
//! - [`ProjectStorage`] abstracts the project directory; [`FsStorage`] is the
//!   real one, [`MemoryStorage`] and [`OverlayStorage`] back tests and dry
//!   runs
//!
//! Write failures never abort a pipeline. They are reported per path.
//!
//! [`ApplyReport`]: composer_core::ApplyReport

pub mod cycles;
pub mod error;
pub mod materializer;
pub mod pipeline;
pub mod scheduler;
pub mod storage;

pub use error::{ApplyError, StorageError};
pub use materializer::Written;
pub use pipeline::Composer;
pub use scheduler::{Scheduler, has_all_dependencies};
pub use storage::{FsStorage, MemoryStorage, OverlayStorage, ProjectStorage};
