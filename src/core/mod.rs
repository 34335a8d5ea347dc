//! core/mod.rs
//!
//! The brain of the tool:
//! - a fixed field registry plus an accessor trait over one file's tags
//! - the pattern compiler, and its two views: matching and rendering
//! - the sanitizer that keeps generated names shell/filesystem safe
//! - id3-backed tag IO
//!
//! The CLI layer stays dumb: it compiles patterns once, then feeds each file
//! through these pieces and folds the per-file results into an exit code.

pub mod error;
pub mod extract;
pub mod fields;
pub mod render;
pub mod sanitize;
pub mod spec;
pub mod tags;

pub use error::{FileError, SpecError};
pub use fields::{Field, FieldValue, TagStore};
pub use sanitize::DangerClass;
pub use spec::CompiledSpec;
pub use tags::TagFile;
