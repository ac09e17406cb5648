//! High score persistence.
//!
//! The high score is a single integer in a plain text file; a missing or
//! unreadable file simply means no recorded score yet. Writes go through a
//! temp file and rename so a crash mid-write never corrupts the record.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Where a high score is read from and written to.
pub trait ScoreStore {
    /// The recorded high score, or `None` when nothing was recorded yet.
    fn load(&self) -> anyhow::Result<Option<u32>>;

    fn save(&self, score: u32) -> anyhow::Result<()>;
}

/// File-backed store.
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `.shattris_highscore` in the home directory,
    /// falling back to the current directory when `$HOME` is unset.
    pub fn default_path() -> Self {
        let dir = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join(".shattris_highscore"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> anyhow::Result<Option<u32>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading score file {}", self.path.display()))
            }
        };
        let score = text
            .trim()
            .parse::<u32>()
            .with_context(|| format!("parsing score file {}", self.path.display()))?;
        Ok(Some(score))
    }

    fn save(&self, score: u32) -> anyhow::Result<()> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, format!("{score}\n"))
            .with_context(|| format!("writing score file {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing score file {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    score: std::cell::Cell<Option<u32>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> anyhow::Result<Option<u32>> {
        Ok(self.score.get())
    }

    fn save(&self, score: u32) -> anyhow::Result<()> {
        self.score.set(Some(score));
        Ok(())
    }
}
