//! Entity structs for the materialization pipeline.
//!
//! A response is turned into [`CodeBlock`]s, which (together with scanned
//! prose references) become [`DependencyEntry`] rows in a per-response
//! [`DependencyTable`]. The scheduler derives a [`ProcessingOrder`] from it.

mod code_block;
mod dependency;
mod order;

pub use code_block::CodeBlock;
pub use dependency::{DependencyEntry, DependencyTable};
pub use order::ProcessingOrder;
