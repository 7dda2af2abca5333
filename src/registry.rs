use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;

use crate::dataset::{self, DatasetError, PlayerRecord};

const DATA_DIR_ENV: &str = "DEFPROF_DATA_DIR";
const SEASONS_FILE: &str = "seasons.json";

/// Built-in season files, newest first. A `seasons.json` object of
/// {label: filename} in the data directory replaces this mapping.
const DEFAULT_SEASONS: [(&str, &str); 2] = [
    ("2025", "defensive_metrics_25.csv"),
    ("2024", "defensive_metrics_24.csv"),
];

static DATA_DIR: OnceCell<PathBuf> = OnceCell::new();

pub fn data_dir() -> &'static Path {
    DATA_DIR.get_or_init(|| {
        env::var(DATA_DIR_ENV)
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

/// Mapping from season labels to CSV paths. Configuration only; the labels
/// carry no meaning beyond ordering the season selector.
#[derive(Debug, Clone, Default)]
pub struct SeasonRegistry {
    seasons: Vec<(String, PathBuf)>,
}

impl SeasonRegistry {
    /// Registry for the process data directory: `seasons.json` when present
    /// and parseable, the built-in defaults otherwise.
    pub fn discover() -> Self {
        let dir = data_dir();
        if let Some(custom) = load_custom_registry(dir) {
            return custom;
        }
        Self {
            seasons: DEFAULT_SEASONS
                .iter()
                .map(|(label, file)| ((*label).to_string(), dir.join(file)))
                .collect(),
        }
    }

    pub fn with_seasons(seasons: Vec<(String, PathBuf)>) -> Self {
        Self { seasons }
    }

    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    pub fn label(&self, idx: usize) -> Option<&str> {
        self.seasons.get(idx).map(|(label, _)| label.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.seasons.iter().map(|(label, _)| label.as_str())
    }

    pub fn path_for(&self, label: &str) -> Option<&Path> {
        self.seasons
            .iter()
            .find(|(candidate, _)| candidate == label)
            .map(|(_, path)| path.as_path())
    }
}

fn load_custom_registry(dir: &Path) -> Option<SeasonRegistry> {
    let raw = fs::read_to_string(dir.join(SEASONS_FILE)).ok()?;
    let map = serde_json::from_str::<HashMap<String, String>>(&raw).ok()?;
    if map.is_empty() {
        return None;
    }
    let mut seasons: Vec<(String, PathBuf)> = map
        .into_iter()
        .map(|(label, file)| (label, dir.join(file)))
        .collect();
    // Newest label first, matching the built-in ordering.
    seasons.sort_by(|a, b| b.0.cmp(&a.0));
    Some(SeasonRegistry { seasons })
}

/// Per-session table cache: an explicit memo map keyed by season label. A
/// season file is parsed at most once per process; entries are never
/// invalidated while the session runs.
#[derive(Debug, Default)]
pub struct SeasonStore {
    registry: SeasonRegistry,
    cache: HashMap<String, Vec<PlayerRecord>>,
}

impl SeasonStore {
    pub fn new(registry: SeasonRegistry) -> Self {
        Self {
            registry,
            cache: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &SeasonRegistry {
        &self.registry
    }

    pub fn is_cached(&self, label: &str) -> bool {
        self.cache.contains_key(label)
    }

    /// Cached table for a season, if it has been loaded this session.
    pub fn get(&self, label: &str) -> Option<&[PlayerRecord]> {
        self.cache.get(label).map(Vec::as_slice)
    }

    pub fn load(&mut self, label: &str) -> Result<&[PlayerRecord], DatasetError> {
        if self.cache.contains_key(label) {
            return Ok(&self.cache[label]);
        }
        let path = self
            .registry
            .path_for(label)
            .ok_or_else(|| DatasetError::UnknownSeason {
                label: label.to_string(),
            })?;
        let table = dataset::load_table(path)?;
        self.cache.insert(label.to_string(), table);
        Ok(&self.cache[label])
    }
}
