//! # composer-scene
//!
//! Knowledge about the engine's text formats, independent of where the text
//! came from:
//! - **references**: which project files a scene or script document points at
//! - **upgrade**: rewriting legacy-format scene documents into the current format
//! - **placeholder**: minimal valid documents for files that were referenced
//!   but never provided
//! - **validate**: the structural check applied before a scene is written by
//!   the fast pipeline
//!
//! Everything here is a pure function of its input (plus an injected random
//! source where a uid is minted).

pub mod placeholder;
pub mod references;
pub mod upgrade;
pub mod validate;

pub use references::{references_for, scene_references, script_references};
pub use upgrade::{needs_upgrade, upgrade};
pub use validate::validate_scene;
