//! Error types for the GLNomad editor.

use std::io;

/// Errors produced by the GLNomad utility layer.
#[derive(Debug, thiserror::Error)]
pub enum GlnError {
    #[error("command error: {0}")]
    Command(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("codec error: {0}")]
    Codec(String),

    #[error("usage error: {0}")]
    Usage(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, GlnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_error_display() {
        let e = GlnError::Command("unknown command: foo".into());
        assert_eq!(format!("{e}"), "command error: unknown command: foo");
    }

    #[test]
    fn config_error_display() {
        let e = GlnError::Config("bad compression".into());
        assert_eq!(format!("{e}"), "config error: bad compression");
    }

    #[test]
    fn codec_error_display() {
        let e = GlnError::Codec("buffer overflow".into());
        assert_eq!(format!("{e}"), "codec error: buffer overflow");
    }

    #[test]
    fn usage_error_display() {
        let e = GlnError::Usage("strncpyz: bad count".into());
        assert_eq!(format!("{e}"), "usage error: strncpyz: bad count");
    }

    #[test]
    fn platform_error_display() {
        let e = GlnError::Platform("failed to open x".into());
        assert_eq!(format!("{e}"), "platform error: failed to open x");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: GlnError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: GlnError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(GlnError::Command("oops".into()));
        assert!(r.is_err());
    }
}
