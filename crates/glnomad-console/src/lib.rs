//! Command console for the GLNomad editor.
//!
//! The console is a registry-based dispatch system. A line is split into
//! arguments by the [`tokenizer`], the first argument names a command, and
//! the registry dispatches `execute()` with the tokenized line and a shared
//! [`Environment`].

mod commands;
mod interpreter;
pub mod prefs;
pub mod tokenizer;

/// Register the built-in commands (echo, preferences, file codecs) into a registry.
pub use commands::register_builtins;
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command (text, table, signals).
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch and history.
pub use interpreter::CommandRegistry;
/// State shared by every command.
pub use interpreter::Environment;
/// The editor's named preferences.
pub use prefs::{PrefEntry, Preferences};
/// The tokenized form of one console line.
pub use tokenizer::{TokenizedCommand, tokenize};
