use anyhow::{Context, Result};
use jiff::Zoned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// The last-used search term, durable across sessions.
///
/// The storage location is injected at construction; `None` keeps the term
/// in memory only. Writes are fire-and-forget: a failed save is logged and
/// the in-memory value stays authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSearch {
    pub term: String,
    pub saved_at: Zoned,
    #[serde(skip)]
    file_path: Option<PathBuf>,
}

impl SavedSearch {
    pub fn new(initial_term: impl Into<String>, file_path: Option<PathBuf>) -> Self {
        Self {
            term: initial_term.into(),
            saved_at: Zoned::now(),
            file_path,
        }
    }

    /// Load the persisted term from the platform config directory, falling
    /// back to `initial_term` when nothing is stored yet or the file is
    /// unreadable.
    pub fn load_or_create(initial_term: &str) -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("hacker-stories-tui");

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        }

        let file_path = config_dir.join("last_search.json");

        match file_path.exists() {
            true => {
                let content =
                    fs::read_to_string(&file_path).context("Failed to read last search file")?;
                let mut saved: SavedSearch =
                    serde_json::from_str(&content).context("Failed to parse last search file")?;
                saved.file_path = Some(file_path);
                Ok(saved)
            }
            false => Ok(Self::new(initial_term, Some(file_path))),
        }
    }

    /// Update the in-memory term and schedule it to disk. Any string is
    /// accepted verbatim, the empty one included.
    pub fn set(&mut self, term: impl Into<String>) {
        self.term = term.into();
        self.touch();
    }

    pub fn push_char(&mut self, ch: char) {
        self.term.push(ch);
        self.touch();
    }

    pub fn pop_char(&mut self) {
        self.term.pop();
        self.touch();
    }

    fn touch(&mut self) {
        self.saved_at = Zoned::now();
        if let Err(e) = self.save() {
            tracing::error!("Failed to persist search term: {}", e);
        }
    }

    fn save(&self) -> Result<()> {
        if let Some(path) = &self.file_path {
            let content =
                serde_json::to_string_pretty(self).context("Failed to serialize last search")?;
            fs::write(path, content).context("Failed to write last search file")?;
        }
        Ok(())
    }
}
