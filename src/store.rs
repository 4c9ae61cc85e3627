//! Local record store
//!
//! Holds the three persisted record kinds (generic items, cassette memories
//! and retro games) in one JSON document. Writes go to a temp file that is
//! renamed over the real one, so a crash mid-save leaves the old file intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{AtriumError, Result};
use crate::highscores::HighScores;

/// Milliseconds since the Unix epoch
pub fn unix_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Read a JSON file. A missing file is `Ok(None)`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(AtriumError::io(path, e)),
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| AtriumError::json(path, e))
}

/// Write a JSON file atomically (tmp then rename)
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| AtriumError::io(dir, e))?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|e| AtriumError::json(path, e))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| AtriumError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| AtriumError::io(path, e))
}

/// Memory categories (the culture references the journal is organised by)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryCategory {
    Conan,
    WarGames,
    Galaga,
    Yuppie,
    Frazetta,
    Rockwell,
    #[default]
    General,
}

impl MemoryCategory {
    pub const ALL: [MemoryCategory; 7] = [
        MemoryCategory::Conan,
        MemoryCategory::WarGames,
        MemoryCategory::Galaga,
        MemoryCategory::Yuppie,
        MemoryCategory::Frazetta,
        MemoryCategory::Rockwell,
        MemoryCategory::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryCategory::Conan => "conan",
            MemoryCategory::WarGames => "wargames",
            MemoryCategory::Galaga => "galaga",
            MemoryCategory::Yuppie => "yuppie",
            MemoryCategory::Frazetta => "frazetta",
            MemoryCategory::Rockwell => "rockwell",
            MemoryCategory::General => "general",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Which memories to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryFilter {
    #[default]
    All,
    Category(MemoryCategory),
}

impl MemoryFilter {
    pub fn matches(&self, memory: &CassetteMemory) -> bool {
        match self {
            MemoryFilter::All => true,
            MemoryFilter::Category(c) => memory.category == *c,
        }
    }
}

/// Kind of game a `RetroGame` record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Galaga,
    SpaceInvaders,
    Tetris,
    Pacman,
    #[default]
    Arcade,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Galaga => "galaga",
            GameKind::SpaceInvaders => "space_invaders",
            GameKind::Tetris => "tetris",
            GameKind::Pacman => "pacman",
            GameKind::Arcade => "arcade",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "galaga" => Some(GameKind::Galaga),
            "space_invaders" | "invaders" => Some(GameKind::SpaceInvaders),
            "tetris" => Some(GameKind::Tetris),
            "pacman" | "pac-man" => Some(GameKind::Pacman),
            "arcade" => Some(GameKind::Arcade),
            _ => None,
        }
    }
}

/// A generic timestamped note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    /// Unix ms
    pub timestamp: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub details: String,
    #[serde(default = "default_item_category")]
    pub category: String,
}

fn default_item_category() -> String {
    "general".to_string()
}

/// A journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CassetteMemory {
    pub id: u64,
    pub title: String,
    pub content: String,
    /// Unix ms
    pub created_at: u64,
    #[serde(default)]
    pub category: MemoryCategory,
    #[serde(default)]
    pub is_favorite: bool,
}

/// A game and its best score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetroGame {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub high_score: u64,
    /// Unix ms
    pub last_played: u64,
    #[serde(default)]
    pub game_type: GameKind,
}

/// Everything the store persists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Records {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub memories: Vec<CassetteMemory>,
    #[serde(default)]
    pub games: Vec<RetroGame>,
    /// Best arcade runs across all sessions
    #[serde(default)]
    pub arcade_scores: HighScores,
    #[serde(default = "first_id")]
    next_id: u64,
}

fn first_id() -> u64 {
    1
}

impl Records {
    fn allocate_id(&mut self) -> u64 {
        // Guard against hand-edited files whose counter lags the records
        let highest = self
            .items
            .iter()
            .map(|r| r.id)
            .chain(self.memories.iter().map(|r| r.id))
            .chain(self.games.iter().map(|r| r.id))
            .max()
            .unwrap_or(0);
        let id = self.next_id.max(highest + 1);
        self.next_id = id + 1;
        id
    }
}

/// The record store
#[derive(Debug, Clone, Default)]
pub struct Store {
    path: Option<PathBuf>,
    records: Records,
}

impl Store {
    /// A store that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a store file, starting empty if it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = match read_json::<Records>(&path)? {
            Some(records) => {
                log::info!(
                    "Loaded store {} ({} items, {} memories, {} games)",
                    path.display(),
                    records.items.len(),
                    records.memories.len(),
                    records.games.len()
                );
                records
            }
            None => {
                log::info!("No store at {}, starting fresh", path.display());
                Records::default()
            }
        };
        Ok(Self {
            path: Some(path),
            records,
        })
    }

    /// Build a store around existing records (used by import)
    pub fn from_records(path: Option<PathBuf>, records: Records) -> Self {
        Self { path, records }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    /// Persist to disk (no-op for in-memory stores)
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        write_json(path, &self.records)?;
        log::debug!("Store saved to {}", path.display());
        Ok(())
    }

    // === Items ===

    pub fn add_item(&mut self, title: &str, details: &str, category: &str) -> u64 {
        let id = self.records.allocate_id();
        let category = if category.trim().is_empty() {
            default_item_category()
        } else {
            category.trim().to_string()
        };
        self.records.items.push(Item {
            id,
            timestamp: unix_millis(),
            title: title.to_string(),
            details: details.to_string(),
            category,
        });
        id
    }

    pub fn items(&self) -> &[Item] {
        &self.records.items
    }

    pub fn delete_item(&mut self, id: u64) -> Result<Item> {
        let index = self
            .records
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(AtriumError::UnknownRecord { kind: "item", id })?;
        Ok(self.records.items.remove(index))
    }

    // === Memories ===

    /// Add a journal entry. Title and content must both be non-blank.
    pub fn add_memory(&mut self, title: &str, content: &str, category: MemoryCategory) -> Result<u64> {
        if title.trim().is_empty() {
            return Err(AtriumError::InvalidRecord("memory title is empty".into()));
        }
        if content.trim().is_empty() {
            return Err(AtriumError::InvalidRecord("memory content is empty".into()));
        }
        let id = self.records.allocate_id();
        self.records.memories.push(CassetteMemory {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: unix_millis(),
            category,
            is_favorite: false,
        });
        Ok(id)
    }

    /// Memories matching `filter`, in insertion order
    pub fn memories(&self, filter: MemoryFilter) -> Vec<&CassetteMemory> {
        self.records
            .memories
            .iter()
            .filter(|m| filter.matches(m))
            .collect()
    }

    /// Flip a memory's favourite flag, returning the new value
    pub fn toggle_favorite(&mut self, id: u64) -> Result<bool> {
        let memory = self
            .records
            .memories
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(AtriumError::UnknownRecord { kind: "memory", id })?;
        memory.is_favorite = !memory.is_favorite;
        Ok(memory.is_favorite)
    }

    pub fn delete_memory(&mut self, id: u64) -> Result<CassetteMemory> {
        let index = self
            .records
            .memories
            .iter()
            .position(|m| m.id == id)
            .ok_or(AtriumError::UnknownRecord { kind: "memory", id })?;
        Ok(self.records.memories.remove(index))
    }

    // === Games ===

    pub fn add_game(&mut self, name: &str, game_type: GameKind) -> u64 {
        let id = self.records.allocate_id();
        self.records.games.push(RetroGame {
            id,
            name: name.to_string(),
            high_score: 0,
            last_played: unix_millis(),
            game_type,
        });
        id
    }

    /// The "add game" action: a placeholder arcade entry
    pub fn new_game(&mut self) -> u64 {
        self.add_game("New Game", GameKind::Arcade)
    }

    pub fn games(&self) -> &[RetroGame] {
        &self.records.games
    }

    pub fn game(&self, id: u64) -> Option<&RetroGame> {
        self.records.games.iter().find(|g| g.id == id)
    }

    pub fn game_mut(&mut self, id: u64) -> Option<&mut RetroGame> {
        self.records.games.iter_mut().find(|g| g.id == id)
    }

    /// Find a game by name, adding it if missing
    pub fn game_by_name_or_insert(&mut self, name: &str, game_type: GameKind) -> &mut RetroGame {
        let index = match self.records.games.iter().position(|g| g.name == name) {
            Some(index) => index,
            None => {
                self.add_game(name, game_type);
                self.records.games.len() - 1
            }
        };
        &mut self.records.games[index]
    }

    pub fn arcade_scores(&self) -> &HighScores {
        &self.records.arcade_scores
    }

    pub fn arcade_scores_mut(&mut self) -> &mut HighScores {
        &mut self.records.arcade_scores
    }
}
