//! GLNomad editor console entry point.
//!
//! Reads commands from stdin, one per line, and prints their output.
//! `quit` or end of input leaves. Set `RUST_LOG=debug` for codec and
//! file tracing.

mod output;
mod startup;

use std::io::{self, BufRead, Write};

use anyhow::Result;

use glnomad_console::{CommandOutput, CommandRegistry, Environment, Preferences, register_builtins};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = startup::resolve_config(&args, std::env::var(startup::CONFIG_ENV).ok())?;
    log::info!(
        "Starting GLNomad console (data: {}, compression: {})",
        config.data_dir.display(),
        config.compression
    );

    let mut prefs = Preferences::default();
    let applied = prefs.apply_overrides(&config.preferences);
    if applied > 0 {
        log::info!("Applied {applied} preference overrides from config");
    }

    let mut reg = CommandRegistry::with_history_size(config.history_size);
    register_builtins(&mut reg);

    let mut env = Environment {
        config: &config,
        prefs: &mut prefs,
    };
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_console(&reg, &mut env, stdin.lock(), &mut stdout.lock())?;

    log::info!("Console closed");
    Ok(())
}

/// Read-eval-print loop over `input`. Command failures are printed and the
/// loop continues.
fn run_console<R: BufRead, W: Write>(
    reg: &CommandRegistry,
    env: &mut Environment<'_>,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        match reg.execute(&line, env) {
            Ok(CommandOutput::Quit) => break,
            Ok(output) => output::write_output(out, &output)?,
            Err(e) => {
                log::debug!("Command failed: {e}");
                writeln!(out, "ERROR: {e}")?;
            },
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glnomad_types::EditorConfig;

    fn session(script: &str) -> String {
        let config = EditorConfig::default();
        let mut prefs = Preferences::default();
        let mut reg = CommandRegistry::new();
        register_builtins(&mut reg);
        let mut env = Environment {
            config: &config,
            prefs: &mut prefs,
        };
        let mut out = Vec::new();
        run_console(&reg, &mut env, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn echoes_and_exits_on_eof() {
        let out = session("echo hello\n");
        assert!(out.contains("hello\n"));
        assert!(out.ends_with("> \n"));
    }

    #[test]
    fn errors_do_not_stop_the_loop() {
        let out = session("nosuch\necho still here\n");
        assert!(out.contains("ERROR: command error: unknown command: nosuch"));
        assert!(out.contains("still here"));
    }

    #[test]
    fn quit_stops_reading() {
        let out = session("quit\necho unreachable\n");
        assert!(!out.contains("unreachable"));
    }

    #[test]
    fn preflist_prints_table() {
        let out = session("preflist\n");
        assert!(out.contains("textureFiltering"));
        assert!(out.contains("Bilinear"));
    }
}
