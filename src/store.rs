//! Best-score persistence adapter.
//!
//! The engine only ever needs one named integer stored durably. The trait
//! keeps the storage medium out of the core's concern; the file-backed
//! implementation writes a tiny JSON document next to wherever the caller
//! points it. Failures here are never allowed to stop gameplay: callers
//! keep the in-memory best score and surface the error as a status line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Get/set of one named integer, durably.
pub trait BestScoreStore {
    /// Load the stored best score, defaulting to 0 when absent or invalid.
    fn load(&self) -> u32;

    /// Persist the best score.
    fn save(&mut self, best: u32) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct BestScoreRecord {
    best_score: u32,
}

/// File-backed store: a JSON document holding the single integer.
#[derive(Debug, Clone)]
pub struct FileBestScoreStore {
    path: PathBuf,
}

impl FileBestScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the user's home directory, falling back to
    /// the current directory when no home is set.
    pub fn default_path() -> PathBuf {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tui-2048.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for FileBestScoreStore {
    fn load(&self) -> u32 {
        // Absent and malformed files both mean "no best score yet".
        let Ok(data) = fs::read_to_string(&self.path) else {
            return 0;
        };
        serde_json::from_str::<BestScoreRecord>(&data)
            .map(|record| record.best_score)
            .unwrap_or(0)
    }

    fn save(&mut self, best: u32) -> Result<()> {
        let record = BestScoreRecord { best_score: best };
        let data = serde_json::to_string(&record)?;
        fs::write(&self.path, data)
            .with_context(|| format!("writing best score to {}", self.path.display()))
    }
}

/// In-memory store for tests and for running without a writable disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryBestScoreStore {
    best: u32,
}

impl MemoryBestScoreStore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }
}

impl BestScoreStore for MemoryBestScoreStore {
    fn load(&self) -> u32 {
        self.best
    }

    fn save(&mut self, best: u32) -> Result<()> {
        self.best = best;
        Ok(())
    }
}
