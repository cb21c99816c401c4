//! Foundation types for the GLNomad editor.
//!
//! This crate contains the types shared by every GLNomad crate: the
//! workspace error type, the compression algorithm selector, and the editor
//! configuration loaded from TOML.

pub mod compression;
pub mod config;
pub mod error;

pub use compression::Compression;
pub use config::EditorConfig;
pub use error::{GlnError, Result};
