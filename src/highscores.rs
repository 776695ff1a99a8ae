//! Score ledger
//!
//! Two five-entry lists persisted as plain text, one `name score` record per
//! line: the most recent games (newest first) and the high scores (sorted
//! descending, earlier entries win ties).

use std::borrow::Cow;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::NAME_LEN;
use crate::error::{InvadersError, Result};

/// Maximum entries kept in each list
pub const MAX_ENTRIES: usize = 5;

/// Placeholder written when a game ends without a nickname
const ANONYMOUS: &str = "---";

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
}

impl ScoreEntry {
    pub fn new(name: &str, score: u64) -> Self {
        let name: String = name.trim().chars().take(NAME_LEN).collect();
        let name = if name.is_empty() {
            ANONYMOUS.to_string()
        } else {
            name
        };
        Self { name, score }
    }

    /// Parse a `name score` line. Blank lines yield `None`; a score that does
    /// not parse is read as 0.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (name, score) = match line.rsplit_once(char::is_whitespace) {
            Some((name, raw)) => {
                let score = raw.parse().unwrap_or_else(|_| {
                    log::warn!("Malformed score {:?} in ledger, reading as 0", raw);
                    0
                });
                (name, score)
            }
            None => {
                log::warn!("Ledger line {:?} has no score, reading as 0", line);
                (line, 0)
            }
        };
        Some(Self::new(name, score))
    }

    pub fn to_line(&self) -> String {
        format!("{} {}", self.name, self.score)
    }
}

/// Locations of the two ledger files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerPaths {
    pub recent: PathBuf,
    pub top: PathBuf,
}

impl Default for LedgerPaths {
    fn default() -> Self {
        Self {
            recent: PathBuf::from("recent_scores.txt"),
            top: PathBuf::from("high_scores.txt"),
        }
    }
}

/// Recent-games and high-score lists
#[derive(Debug, Clone, Default)]
pub struct ScoreLedger {
    /// Newest first
    pub recent: Vec<ScoreEntry>,
    /// Sorted descending by score
    pub top: Vec<ScoreEntry>,
    /// Backing files, `None` when running in memory only
    paths: Option<LedgerPaths>,
}

impl ScoreLedger {
    /// Create an empty in-memory ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Load both lists, creating empty files where they are missing
    pub fn load(paths: &LedgerPaths) -> Result<Self> {
        let recent = read_entries(&paths.recent)?;
        let top = read_entries(&paths.top)?;
        log::info!(
            "Loaded ledger: {} recent, {} high scores",
            recent.len(),
            top.len()
        );
        Ok(Self {
            recent,
            top,
            paths: Some(paths.clone()),
        })
    }

    /// Load each list on its own. A file that can't be read starts that list
    /// empty; the ledger stays attached and only a failed write detaches it.
    pub fn open(paths: &LedgerPaths) -> Self {
        let ledger = Self {
            recent: read_or_empty(&paths.recent),
            top: read_or_empty(&paths.top),
            paths: Some(paths.clone()),
        };
        log::info!(
            "Opened ledger: {} recent, {} high scores",
            ledger.recent.len(),
            ledger.top.len()
        );
        ledger
    }

    /// Whether records are written to disk
    pub fn is_persistent(&self) -> bool {
        self.paths.is_some()
    }

    /// Record a finished game in both lists and rewrite the files. A write
    /// failure detaches the ledger from disk for the rest of the run.
    pub fn record(&mut self, name: &str, score: u64) -> Option<usize> {
        let entry = ScoreEntry::new(name, score);
        log::info!("Recording {} {}", entry.name, entry.score);

        self.push_recent(entry.clone());
        let rank = self.insert_top(entry);

        if self.is_persistent() {
            if let Err(e) = self.save() {
                log::warn!("Failed to write score ledger ({}), continuing in memory", e);
                self.paths = None;
            }
        }
        rank
    }

    /// Prepend to the recent list, dropping the oldest past capacity
    pub fn push_recent(&mut self, entry: ScoreEntry) {
        self.recent.insert(0, entry);
        self.recent.truncate(MAX_ENTRIES);
    }

    /// Insert into the high scores. Returns the rank achieved (1-indexed) or
    /// None if the score didn't make the list.
    pub fn insert_top(&mut self, entry: ScoreEntry) -> Option<usize> {
        let rank = self.potential_rank(entry.score)?;
        self.top.insert(rank - 1, entry);
        self.top.truncate(MAX_ENTRIES);
        Some(rank)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't
    /// qualify). Equal scores rank below existing entries.
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        match self.top.iter().position(|e| e.score < score) {
            Some(i) => Some(i + 1),
            None if self.top.len() < MAX_ENTRIES => Some(self.top.len() + 1),
            None => None,
        }
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.top.first().map(|e| e.score)
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty() && self.top.is_empty()
    }

    /// Rewrite both files in full
    pub fn save(&self) -> Result<()> {
        let paths = self.paths.as_ref().ok_or(InvadersError::Detached)?;
        write_entries(&paths.recent, &self.recent)?;
        write_entries(&paths.top, &self.top)?;
        log::debug!("Ledger saved");
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<Vec<ScoreEntry>> {
    if !path.exists() {
        OpenOptions::new().create(true).append(true).open(path)?;
        log::info!("Created empty ledger file {}", path.display());
        return Ok(Vec::new());
    }
    let bytes = fs::read(path)?;
    let contents = String::from_utf8_lossy(&bytes);
    if matches!(contents, Cow::Owned(_)) {
        log::warn!("Ledger file {} is not valid UTF-8, reading lossily", path.display());
    }
    Ok(contents
        .lines()
        .filter_map(ScoreEntry::parse_line)
        .take(MAX_ENTRIES)
        .collect())
}

fn read_or_empty(path: &Path) -> Vec<ScoreEntry> {
    read_entries(path).unwrap_or_else(|e| {
        log::warn!("Can't read {} ({}), starting it empty", path.display(), e);
        Vec::new()
    })
}

fn write_entries(path: &Path, entries: &[ScoreEntry]) -> Result<()> {
    let contents: String = entries
        .iter()
        .map(|e| e.to_line() + "\n")
        .collect();
    fs::write(path, contents)?;
    Ok(())
}
