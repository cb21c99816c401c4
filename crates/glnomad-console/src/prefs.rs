//! Editor preferences.
//!
//! A fixed, ordered list of named string values. The set of names never
//! changes at runtime; only values do.

use std::collections::BTreeMap;

use glnomad_strings::{is_number, stricmp};
use glnomad_types::{GlnError, Result};

/// One named preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefEntry {
    pub name: String,
    pub value: String,
    /// Section the preference is listed under.
    pub group: String,
}

impl PrefEntry {
    fn new(name: &str, value: &str, group: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            group: group.to_string(),
        }
    }
}

/// The editor's preference list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    entries: Vec<PrefEntry>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            entries: vec![
                PrefEntry::new("enginePath", "", "config"),
                PrefEntry::new("exePath", "", "config"),
                PrefEntry::new("textureDetail", "2", "config"),
                PrefEntry::new("textureFiltering", "Bilinear", "config"),
                PrefEntry::new("moveSpeed", "1.5f", "camera"),
                PrefEntry::new("rotationSpeed", "1.0f", "camera"),
                PrefEntry::new("zoomSpeed", "1.5f", "camera"),
            ],
        }
    }
}

impl Preferences {
    fn find_mut(&mut self, name: &str) -> Option<&mut PrefEntry> {
        self.entries
            .iter_mut()
            .find(|e| stricmp(&e.name, name).is_eq())
    }

    /// Look up a preference by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&PrefEntry> {
        self.entries.iter().find(|e| stricmp(&e.name, name).is_eq())
    }

    /// The value of `name`, or `""` if there is no such preference.
    pub fn value(&self, name: &str) -> &str {
        self.get(name).map_or("", |e| e.value.as_str())
    }

    /// Change the value of an existing preference. Camera speeds must be
    /// numbers, optionally with a trailing `f`.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match self.find_mut(name) {
            Some(entry) => {
                if entry.group == "camera" && !is_number(value.strip_suffix('f').unwrap_or(value)) {
                    return Err(GlnError::Command(format!(
                        "{} expects a number, got '{value}'",
                        entry.name
                    )));
                }
                log::debug!("Preference {} = {value:?}", entry.name);
                entry.value = value.to_string();
                Ok(())
            },
            None => Err(GlnError::Command(format!("unknown preference: {name}"))),
        }
    }

    /// All preferences in listing order.
    pub fn entries(&self) -> &[PrefEntry] {
        &self.entries
    }

    /// Apply `[preferences]` overrides from the editor config. Unknown names
    /// and invalid values are skipped with a warning. Returns how many were
    /// applied.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) -> usize {
        let mut applied = 0;
        for (name, value) in overrides {
            match self.set(name, value) {
                Ok(()) => applied += 1,
                Err(e) => log::warn!("Ignoring preference '{name}' in config: {e}"),
            }
        }
        applied
    }
}
