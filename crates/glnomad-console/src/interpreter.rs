//! Command trait, registry, and dispatch logic.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};

use glnomad_types::config::DEFAULT_HISTORY_SIZE;
use glnomad_types::error::{GlnError, Result};
use glnomad_types::EditorConfig;

use crate::prefs::Preferences;
use crate::tokenizer::TokenizedCommand;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// Tabular data (header row + data rows).
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Command produced no visible output.
    None,
    /// Signal to clear the console output buffer.
    Clear,
    /// Signal to leave the console.
    Quit,
}

/// Shared state passed to every command.
pub struct Environment<'a> {
    pub config: &'a EditorConfig,
    pub prefs: &'a mut Preferences,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "pref \<name\> \[value\]").
    fn usage(&self) -> &str;

    /// Command category for grouping in `help` output.
    fn category(&self) -> &str {
        "general"
    }

    /// Run the command. `args.argv(0)` is the command name as typed.
    fn execute(&self, args: &TokenizedCommand, env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Names handled by the registry itself.
const INTERCEPTED: [(&str, &str); 2] = [("help", "general"), ("history", "general")];

/// Registry of available commands with dispatch and history.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
    history: RefCell<VecDeque<String>>,
    history_size: usize,
}

impl CommandRegistry {
    /// Create an empty registry keeping the default history depth.
    pub fn new() -> Self {
        Self::with_history_size(DEFAULT_HISTORY_SIZE)
    }

    /// Create an empty registry keeping at most `size` history entries.
    pub fn with_history_size(size: usize) -> Self {
        Self {
            commands: HashMap::new(),
            history: RefCell::new(VecDeque::with_capacity(size)),
            history_size: size,
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let key = cmd.name().to_ascii_lowercase();
        if self.commands.insert(key, cmd).is_some() {
            log::debug!("Replaced existing command registration");
        }
    }

    // -- History API --

    /// Command history, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().iter().cloned().collect()
    }

    fn push_history(&self, line: &str) {
        if self.history_size == 0 {
            return;
        }
        let mut hist = self.history.borrow_mut();
        // Don't duplicate the last entry.
        if hist.back().is_none_or(|last| last != line) {
            if hist.len() == self.history_size {
                hist.pop_front();
            }
            hist.push_back(line.to_string());
        }
    }

    /// Tokenize and execute a console line.
    ///
    /// A single leading `/` or `\` is accepted and stripped, so `/preflist`
    /// and `preflist` do the same thing. Command names are case-insensitive.
    pub fn execute(&self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let line = strip_command_prefix(line.trim());
        let cmd = TokenizedCommand::tokenize(line, false);
        if cmd.is_empty() {
            return Ok(CommandOutput::None);
        }

        self.push_history(cmd.raw());

        let name_lower = cmd.argv(0).to_ascii_lowercase();
        match name_lower.as_str() {
            "help" => return self.execute_help(&cmd),
            "history" => return self.execute_history_cmd(&cmd),
            _ => {},
        }

        match self.commands.get(name_lower.as_str()) {
            Some(command) => {
                log::debug!("Executing '{}' with {} args", command.name(), cmd.argc() - 1);
                command.execute(&cmd, env)
            },
            None => Err(GlnError::Command(format!(
                "unknown command: {}",
                cmd.argv(0)
            ))),
        }
    }

    /// Built-in help with access to the registry.
    fn execute_help(&self, args: &TokenizedCommand) -> Result<CommandOutput> {
        if args.argc() > 1 {
            let name = args.argv(1);
            let name_lower = name.to_ascii_lowercase();
            return match self.commands.get(name_lower.as_str()) {
                Some(cmd) => {
                    let mut out = cmd.name().to_string();
                    out.push_str(&format!(" ({})\n", cmd.category()));
                    out.push_str(&format!("  {}\n", cmd.description()));
                    out.push_str(&format!("  Usage: {}", cmd.usage()));
                    Ok(CommandOutput::Text(out))
                },
                None => Err(GlnError::Command(format!("unknown command: {name}"))),
            };
        }

        let mut categories: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::new();
        for (name, category) in INTERCEPTED {
            categories.entry(category).or_default().push((name, ""));
        }
        for cmd in self.commands.values() {
            categories
                .entry(cmd.category())
                .or_default()
                .push((cmd.name(), cmd.description()));
        }

        let total: usize = categories.values().map(Vec::len).sum();
        let mut out = format!("Commands ({total}):\n");
        for (cat, cmds) in &mut categories {
            cmds.sort_by_key(|(name, _)| *name);
            out.push_str(&format!("\n  [{cat}]\n"));
            for (name, desc) in cmds.iter() {
                if desc.is_empty() {
                    out.push_str(&format!("    {name}\n"));
                } else {
                    out.push_str(&format!("    {name:12} {desc}\n"));
                }
            }
        }
        out.push_str("\nType 'help <command>' for details.");
        Ok(CommandOutput::Text(out))
    }

    /// Built-in `history` command.
    fn execute_history_cmd(&self, args: &TokenizedCommand) -> Result<CommandOutput> {
        if args.argv(1).eq_ignore_ascii_case("clear") {
            self.history.borrow_mut().clear();
            return Ok(CommandOutput::Text("History cleared.".to_string()));
        }
        let hist = self.history.borrow();
        let mut out = String::new();
        for (i, entry) in hist.iter().enumerate() {
            out.push_str(&format!("  {:4}  {entry}\n", i + 1));
        }
        Ok(CommandOutput::Text(out.trim_end().to_string()))
    }

    /// Return a sorted list of (name, description) pairs.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        let mut cmds: Vec<(&str, &str)> = self
            .commands
            .values()
            .map(|c| (c.name(), c.description()))
            .collect();
        cmds.sort_by_key(|(name, _)| *name);
        cmds
    }

    /// Return sorted completions for a partial command name.
    pub fn completions(&self, partial: &str) -> Vec<String> {
        let lower = partial.to_ascii_lowercase();
        let mut names: Vec<String> = self
            .commands
            .keys()
            .map(String::as_str)
            .chain(INTERCEPTED.iter().map(|(name, _)| *name))
            .filter(|name| name.starts_with(&lower))
            .map(str::to_string)
            .collect();
        names.sort();
        names
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop the console's optional command prefix.
fn strip_command_prefix(line: &str) -> &str {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some('/'), Some('/' | '*')) => line,
        (Some('/' | '\\'), _) => &line[1..],
        _ => line,
    }
}
