//! Built-in console commands.

use std::path::{Component, Path, PathBuf};

use glnomad_codec::{Limits, frame};
use glnomad_platform::{load_file, save_file};
use glnomad_strings::path::{default_extension, get_extension};
use glnomad_strings::{strncpyz, to_str_lossy};
use glnomad_types::Compression;
use glnomad_types::error::{GlnError, Result};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};
use crate::tokenizer::TokenizedCommand;

/// Longest data-relative path the file commands accept.
const MAX_OSPATH: usize = 256;

/// Register all built-in commands into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(EchoCmd));
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(QuitCmd));
    reg.register(Box::new(PrefListCmd));
    reg.register(Box::new(PrefCmd));
    reg.register(Box::new(CompressCmd));
    reg.register(Box::new(DecompressCmd));
    reg.register(Box::new(PackCmd));
    reg.register(Box::new(UnpackCmd));
}

fn usage_error(cmd: &dyn Command) -> GlnError {
    GlnError::Command(format!("usage: {}", cmd.usage()))
}

/// `name` resolved against the configured data directory. Absolute paths
/// and `..` components are refused so commands stay inside it.
fn data_path(env: &Environment<'_>, name: &str) -> Result<PathBuf> {
    let relative = Path::new(name);
    let confined = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if name.is_empty() || !confined {
        return Err(GlnError::Command(format!(
            "path must stay inside the data directory: {name}"
        )));
    }
    Ok(env.config.data_dir.join(relative))
}

/// Algorithm implied by a file extension, if any.
fn algorithm_for_extension(name: &str) -> Option<Compression> {
    match get_extension(name).to_ascii_lowercase().as_str() {
        "z" | "zz" | "zlib" => Some(Compression::Zlib),
        "bz2" | "bzip2" => Some(Compression::Bzip2),
        _ => None,
    }
}

fn extension_for(algorithm: Compression) -> Option<&'static str> {
    match algorithm {
        Compression::None => None,
        Compression::Zlib => Some(".z"),
        Compression::Bzip2 => Some(".bz2"),
    }
}

/// `name`, with the extension for `algorithm` appended if it has none.
fn output_name(name: &str, algorithm: Compression) -> Result<String> {
    let Some(ext) = extension_for(algorithm) else {
        return Ok(name.to_string());
    };
    if name.len() + ext.len() >= MAX_OSPATH {
        return Err(GlnError::Command(format!("path too long: {name}")));
    }
    let mut buf = [0u8; MAX_OSPATH];
    strncpyz(&mut buf, name.as_bytes(), MAX_OSPATH)?;
    default_extension(&mut buf, ext);
    Ok(to_str_lossy(&buf).into_owned())
}

/// The algorithm argument at `index`, falling back to the extension of
/// `hint`, then to the configured default.
fn pick_algorithm(
    args: &TokenizedCommand,
    index: usize,
    hint: &str,
    env: &Environment<'_>,
) -> Result<Compression> {
    let explicit = args.argv(index);
    if !explicit.is_empty() {
        return explicit
            .parse()
            .map_err(|_| GlnError::Command(format!("unknown compression: {explicit}")));
    }
    Ok(algorithm_for_extension(hint).unwrap_or(env.config.compression))
}

fn decompress_limits(env: &Environment<'_>) -> Limits {
    Limits::with_max_output(env.config.max_decompressed_size)
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

struct EchoCmd;
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Print arguments"
    }
    fn usage(&self) -> &str {
        "echo [text...]"
    }
    fn execute(&self, args: &TokenizedCommand, _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(args.args_from(1)))
    }
}

// ---------------------------------------------------------------------------
// clear / quit
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the console"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn execute(&self, _args: &TokenizedCommand, _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}

struct QuitCmd;
impl Command for QuitCmd {
    fn name(&self) -> &str {
        "quit"
    }
    fn description(&self) -> &str {
        "Leave the console"
    }
    fn usage(&self) -> &str {
        "quit"
    }
    fn execute(&self, _args: &TokenizedCommand, _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Quit)
    }
}

// ---------------------------------------------------------------------------
// preflist / pref
// ---------------------------------------------------------------------------

struct PrefListCmd;
impl Command for PrefListCmd {
    fn name(&self) -> &str {
        "preflist"
    }
    fn description(&self) -> &str {
        "List editor preferences"
    }
    fn usage(&self) -> &str {
        "preflist"
    }
    fn category(&self) -> &str {
        "config"
    }
    fn execute(&self, _args: &TokenizedCommand, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let rows = env
            .prefs
            .entries()
            .iter()
            .map(|e| vec![e.name.clone(), e.value.clone(), e.group.clone()])
            .collect();
        Ok(CommandOutput::Table {
            headers: vec!["Name".to_string(), "Value".to_string(), "Group".to_string()],
            rows,
        })
    }
}

struct PrefCmd;
impl Command for PrefCmd {
    fn name(&self) -> &str {
        "pref"
    }
    fn description(&self) -> &str {
        "Show or change a preference"
    }
    fn usage(&self) -> &str {
        "pref <name> [value]"
    }
    fn category(&self) -> &str {
        "config"
    }
    fn execute(&self, args: &TokenizedCommand, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let name = args.argv(1);
        if name.is_empty() {
            return Err(usage_error(self));
        }
        let entry = env
            .prefs
            .get(name)
            .ok_or_else(|| GlnError::Command(format!("unknown preference: {name}")))?;

        if args.argc() < 3 {
            return Ok(CommandOutput::Text(format!("{} = {}", entry.name, entry.value)));
        }

        let value = args.args_from(2);
        let canonical = entry.name.clone();
        env.prefs.set(&canonical, &value)?;
        Ok(CommandOutput::Text(format!("{canonical} = {value}")))
    }
}

// ---------------------------------------------------------------------------
// compress / decompress
// ---------------------------------------------------------------------------

struct CompressCmd;
impl Command for CompressCmd {
    fn name(&self) -> &str {
        "compress"
    }
    fn description(&self) -> &str {
        "Compress a data file"
    }
    fn usage(&self) -> &str {
        "compress <in> <out> [none|zlib|bzip2]"
    }
    fn category(&self) -> &str {
        "data"
    }
    fn execute(&self, args: &TokenizedCommand, env: &mut Environment<'_>) -> Result<CommandOutput> {
        if args.argc() < 3 {
            return Err(usage_error(self));
        }
        let algorithm = pick_algorithm(args, 3, args.argv(2), env)?;
        let out_name = output_name(args.argv(2), algorithm)?;

        let data = load_file(&data_path(env, args.argv(1))?)?;
        let packed = glnomad_codec::compress(&data, algorithm)?;
        save_file(&data_path(env, &out_name)?, &packed)?;

        Ok(CommandOutput::Text(format!(
            "{} -> {out_name}: {} to {} bytes ({algorithm})",
            args.argv(1),
            data.len(),
            packed.len()
        )))
    }
}

struct DecompressCmd;
impl Command for DecompressCmd {
    fn name(&self) -> &str {
        "decompress"
    }
    fn description(&self) -> &str {
        "Decompress a data file"
    }
    fn usage(&self) -> &str {
        "decompress <in> <out> [none|zlib|bzip2]"
    }
    fn category(&self) -> &str {
        "data"
    }
    fn execute(&self, args: &TokenizedCommand, env: &mut Environment<'_>) -> Result<CommandOutput> {
        if args.argc() < 3 {
            return Err(usage_error(self));
        }
        let algorithm = pick_algorithm(args, 3, args.argv(1), env)?;

        let data = load_file(&data_path(env, args.argv(1))?)?;
        let unpacked = glnomad_codec::decompress_with(&data, algorithm, &decompress_limits(env))?;
        save_file(&data_path(env, args.argv(2))?, &unpacked)?;

        Ok(CommandOutput::Text(format!(
            "{} -> {}: {} to {} bytes ({algorithm})",
            args.argv(1),
            args.argv(2),
            data.len(),
            unpacked.len()
        )))
    }
}

// ---------------------------------------------------------------------------
// pack / unpack
// ---------------------------------------------------------------------------

struct PackCmd;
impl Command for PackCmd {
    fn name(&self) -> &str {
        "pack"
    }
    fn description(&self) -> &str {
        "Write a data file as a self-describing compressed frame"
    }
    fn usage(&self) -> &str {
        "pack <in> <out> [none|zlib|bzip2]"
    }
    fn category(&self) -> &str {
        "data"
    }
    fn execute(&self, args: &TokenizedCommand, env: &mut Environment<'_>) -> Result<CommandOutput> {
        if args.argc() < 3 {
            return Err(usage_error(self));
        }
        let algorithm = pick_algorithm(args, 3, "", env)?;

        let data = load_file(&data_path(env, args.argv(1))?)?;
        let framed = frame::pack(&data, algorithm)?;
        save_file(&data_path(env, args.argv(2))?, &framed)?;

        Ok(CommandOutput::Text(format!(
            "{} -> {}: {} to {} bytes ({algorithm})",
            args.argv(1),
            args.argv(2),
            data.len(),
            framed.len()
        )))
    }
}

struct UnpackCmd;
impl Command for UnpackCmd {
    fn name(&self) -> &str {
        "unpack"
    }
    fn description(&self) -> &str {
        "Restore a data file written by pack"
    }
    fn usage(&self) -> &str {
        "unpack <in> <out>"
    }
    fn category(&self) -> &str {
        "data"
    }
    fn execute(&self, args: &TokenizedCommand, env: &mut Environment<'_>) -> Result<CommandOutput> {
        if args.argc() < 3 {
            return Err(usage_error(self));
        }
        let framed = load_file(&data_path(env, args.argv(1))?)?;
        let header = frame::peek_header(&framed)?;
        let data = frame::unpack_with(&framed, &decompress_limits(env))?;
        save_file(&data_path(env, args.argv(2))?, &data)?;

        Ok(CommandOutput::Text(format!(
            "{} -> {}: {} to {} bytes ({})",
            args.argv(1),
            args.argv(2),
            framed.len(),
            data.len(),
            header.algorithm
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::Preferences;
    use glnomad_types::EditorConfig;

    struct Fixture {
        _dir: tempfile::TempDir,
        config: EditorConfig,
        prefs: Preferences,
        reg: CommandRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let config = EditorConfig {
                data_dir: dir.path().to_path_buf(),
                ..EditorConfig::default()
            };
            let mut reg = CommandRegistry::new();
            register_builtins(&mut reg);
            Self {
                _dir: dir,
                config,
                prefs: Preferences::default(),
                reg,
            }
        }

        fn run(&mut self, line: &str) -> Result<CommandOutput> {
            let mut env = Environment {
                config: &self.config,
                prefs: &mut self.prefs,
            };
            self.reg.execute(line, &mut env)
        }

        fn write(&self, name: &str, data: &[u8]) {
            std::fs::write(self.config.data_dir.join(name), data).unwrap();
        }

        fn read(&self, name: &str) -> Vec<u8> {
            std::fs::read(self.config.data_dir.join(name)).unwrap()
        }
    }

    fn map_data() -> Vec<u8> {
        b"tile 0 0 stone\ntile 0 1 stone\nentity 3 3 torch\n".repeat(30)
    }

    #[test]
    fn echo_clear_quit() {
        let mut fx = Fixture::new();
        assert_eq!(
            fx.run("echo \"hello  there\" you").unwrap(),
            CommandOutput::Text("hello  there you".to_string())
        );
        assert_eq!(fx.run("clear").unwrap(), CommandOutput::Clear);
        assert_eq!(fx.run("QUIT").unwrap(), CommandOutput::Quit);
    }

    #[test]
    fn preflist_is_a_table() {
        let mut fx = Fixture::new();
        match fx.run("preflist").unwrap() {
            CommandOutput::Table { headers, rows } => {
                assert_eq!(headers, ["Name", "Value", "Group"]);
                assert_eq!(rows.len(), 7);
                assert_eq!(rows[3], ["textureFiltering", "Bilinear", "config"]);
            },
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn pref_shows_and_sets() {
        let mut fx = Fixture::new();
        assert_eq!(
            fx.run("pref movespeed").unwrap(),
            CommandOutput::Text("moveSpeed = 1.5f".to_string())
        );
        fx.run("pref moveSpeed 2.25f").unwrap();
        assert_eq!(fx.prefs.value("moveSpeed"), "2.25f");
        fx.run("pref enginePath \"/opt/GLNE engine\"").unwrap();
        assert_eq!(fx.prefs.value("enginePath"), "/opt/GLNE engine");
    }

    #[test]
    fn pref_rejects_bad_input() {
        let mut fx = Fixture::new();
        assert!(fx.run("pref").unwrap_err().to_string().contains("usage: pref"));
        assert!(fx.run("pref gravity 1").is_err());
        let err = fx.run("pref zoomSpeed fast").unwrap_err();
        assert!(err.to_string().contains("expects a number"));
        assert_eq!(fx.prefs.value("zoomSpeed"), "1.5f");
    }

    #[test]
    fn compress_then_decompress_files() {
        let mut fx = Fixture::new();
        fx.write("level.map", &map_data());

        fx.run("compress level.map level.map.bz2").unwrap();
        let packed = fx.read("level.map.bz2");
        assert_eq!(&packed[..3], b"BZh");

        fx.run("decompress level.map.bz2 restored.map").unwrap();
        assert_eq!(fx.read("restored.map"), map_data());
    }

    #[test]
    fn compress_adds_extension_for_explicit_algorithm() {
        let mut fx = Fixture::new();
        fx.write("level.map", &map_data());
        let out = fx.run("compress level.map level zlib").unwrap();
        assert!(matches!(out, CommandOutput::Text(ref t) if t.contains("level.z")));
        fx.run("decompress level.z back.map").unwrap();
        assert_eq!(fx.read("back.map"), map_data());
    }

    #[test]
    fn compress_none_copies() {
        let mut fx = Fixture::new();
        fx.write("a.bin", b"raw bytes");
        fx.run("compress a.bin b.bin none").unwrap();
        assert_eq!(fx.read("b.bin"), b"raw bytes");
    }

    #[test]
    fn configured_default_algorithm() {
        let mut fx = Fixture::new();
        fx.config.compression = Compression::Zlib;
        fx.write("level.map", &map_data());
        fx.run("compress level.map out").unwrap();
        assert_eq!(fx.read("out.z")[0], 0x78);
    }

    #[test]
    fn bad_algorithm_is_reported() {
        let mut fx = Fixture::new();
        fx.write("a.bin", b"x");
        let err = fx.run("compress a.bin b.bin lzma").unwrap_err();
        assert!(err.to_string().contains("unknown compression: lzma"));
    }

    #[test]
    fn corrupt_input_is_an_error_not_a_crash() {
        let mut fx = Fixture::new();
        fx.write("junk.z", b"this was never compressed");
        let err = fx.run("decompress junk.z out.map").unwrap_err();
        assert!(matches!(err, GlnError::Codec(ref m) if m.contains("Z_DATA_ERROR")));
    }

    #[test]
    fn decompress_respects_configured_ceiling() {
        let mut fx = Fixture::new();
        fx.config.max_decompressed_size = 256;
        fx.write("big.map", &vec![b'a'; 10_000]);
        fx.run("compress big.map big.map.z").unwrap();
        let err = fx.run("decompress big.map.z out.map").unwrap_err();
        assert!(err.to_string().contains("buffer overflow"));
    }

    #[test]
    fn pack_unpack_round_trip() {
        let mut fx = Fixture::new();
        fx.write("level.map", &map_data());
        for algo in ["none", "zlib", "bzip2"] {
            fx.run(&format!("pack level.map level.pak {algo}")).unwrap();
            let out = fx.run("unpack level.pak restored.map").unwrap();
            assert!(matches!(out, CommandOutput::Text(ref t) if t.ends_with(&format!("({algo})"))));
            assert_eq!(fx.read("restored.map"), map_data());
        }
    }

    #[test]
    fn missing_file_names_path() {
        let mut fx = Fixture::new();
        let err = fx.run("compress nothing.map out.z").unwrap_err();
        assert!(err.to_string().contains("nothing.map"));
        assert!(err.to_string().contains("read mode"));
    }

    #[test]
    fn paths_stay_inside_data_dir() {
        let mut fx = Fixture::new();
        fx.write("level.map", &map_data());
        for line in [
            "compress /etc/passwd stolen.z",
            "compress ../level.map out.z",
            "decompress level.map ../../escaped.map none",
            "pack maps/../../level.map out.pak",
            "unpack /tmp/level.pak out.map",
        ] {
            let err = fx.run(line).unwrap_err();
            assert!(err.to_string().contains("inside the data directory"), "{line}: {err}");
        }
        fx.run("compress ./level.map out none").unwrap();
        assert_eq!(fx.read("out"), map_data());
    }

    #[test]
    fn file_commands_need_two_paths() {
        let mut fx = Fixture::new();
        for cmd in ["compress", "decompress", "pack", "unpack"] {
            let err = fx.run(&format!("{cmd} only_one")).unwrap_err();
            assert!(err.to_string().contains("usage:"), "{cmd}: {err}");
        }
    }

    #[test]
    fn output_name_keeps_existing_extension() {
        assert_eq!(output_name("a.pak", Compression::Zlib).unwrap(), "a.pak");
        assert_eq!(output_name("maps/a", Compression::Bzip2).unwrap(), "maps/a.bz2");
        assert_eq!(output_name("a", Compression::None).unwrap(), "a");
        assert!(output_name(&"x".repeat(MAX_OSPATH), Compression::Zlib).is_err());
    }

    #[test]
    fn extension_picks_algorithm() {
        assert_eq!(algorithm_for_extension("a.BZ2"), Some(Compression::Bzip2));
        assert_eq!(algorithm_for_extension("a.z"), Some(Compression::Zlib));
        assert_eq!(algorithm_for_extension("a.map"), None);
    }
}
