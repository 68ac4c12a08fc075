//! Data store over the entity and detail tables
//!
//! Both tables are read from JSON files once and never mutated afterwards.
//! [`StoreHandle`] owns the single initialization: the first caller performs
//! the load, concurrent callers wait for it, and every later caller shares the
//! same immutable [`DataStore`].

use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::models::{Detail, Entity};
use crate::{Error, Result};

/// Entity table file name inside the data folder
pub const ENTITY_TABLE_FILE: &str = "t_pokemon.json";

/// Detail table file name inside the data folder
pub const DETAIL_TABLE_FILE: &str = "t_pokemon_detail.json";

/// Loaded, immutable tables plus position indexes built at load time
#[derive(Debug, Default)]
pub struct DataStore {
    entities: Vec<Entity>,
    details: Vec<Detail>,
    /// id -> position of the first entity with that id
    id_index: HashMap<i64, usize>,
    /// idx -> position of the first entity in that group
    idx_index: HashMap<i64, usize>,
}

impl DataStore {
    /// Build a store from already-decoded tables, preserving table order
    pub fn new(entities: Vec<Entity>, details: Vec<Detail>) -> Self {
        let mut id_index = HashMap::with_capacity(entities.len());
        let mut idx_index = HashMap::new();

        for (pos, entity) in entities.iter().enumerate() {
            if id_index.contains_key(&entity.id) {
                warn!(
                    "Duplicate entity id {} at position {} (first occurrence wins)",
                    entity.id, pos
                );
            } else {
                id_index.insert(entity.id, pos);
            }
            idx_index.entry(entity.idx).or_insert(pos);
        }

        Self {
            entities,
            details,
            id_index,
            idx_index,
        }
    }

    /// Read both table files from `data_folder`
    pub fn load(data_folder: &Path) -> Result<Self> {
        let entities: Vec<Entity> = read_table(&data_folder.join(ENTITY_TABLE_FILE))?;
        let details: Vec<Detail> = read_table(&data_folder.join(DETAIL_TABLE_FILE))?;

        info!(
            "Loaded {} entity records and {} detail records from {}",
            entities.len(),
            details.len(),
            data_folder.display()
        );

        Ok(Self::new(entities, details))
    }

    /// All entity records in table order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// All detail records in table order
    pub fn details(&self) -> &[Detail] {
        &self.details
    }

    /// Exact match on the unique `id`
    pub fn find_by_id(&self, id: i64) -> Option<&Entity> {
        self.id_index.get(&id).map(|&pos| &self.entities[pos])
    }

    /// First record (table order) of the group `idx`
    pub fn first_in_group(&self, idx: i64) -> Option<&Entity> {
        self.idx_index.get(&idx).map(|&pos| &self.entities[pos])
    }

    /// Every record of the group `idx`, in table order
    pub fn group(&self, idx: i64) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.idx == idx)
    }

    /// Detail record for `entity`: matched by `id` first, then by `idx`
    ///
    /// The `idx` fallback covers multi-form groups that share one detail entry.
    pub fn detail_for(&self, entity: &Entity) -> Option<&Detail> {
        self.details
            .iter()
            .find(|d| d.id == entity.id)
            .or_else(|| self.details.iter().find(|d| d.idx == entity.idx))
    }

    /// Image URL from the joined detail record, if any
    pub fn image_url_for(&self, entity: &Entity) -> Option<&str> {
        self.detail_for(entity)
            .and_then(|d| d.attributes.img_url.as_deref())
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::DataLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| Error::DataLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load-once handle to the shared [`DataStore`]
///
/// Cloning is not supported; share it behind an `Arc`.
#[derive(Debug)]
pub struct StoreHandle {
    data_folder: Option<PathBuf>,
    cell: OnceCell<DataStore>,
}

impl StoreHandle {
    /// Handle that loads from `data_folder` on first access
    pub fn new(data_folder: impl Into<PathBuf>) -> Self {
        Self {
            data_folder: Some(data_folder.into()),
            cell: OnceCell::new(),
        }
    }

    /// Handle around tables that are already in memory
    pub fn from_store(store: DataStore) -> Self {
        Self {
            data_folder: None,
            cell: OnceCell::with_value(store),
        }
    }

    /// Loaded store, performing the load if no caller has yet
    ///
    /// A failed load leaves the handle empty, so a later call retries.
    pub fn get(&self) -> Result<&DataStore> {
        self.cell.get_or_try_init(|| {
            let folder = self
                .data_folder
                .as_deref()
                .ok_or_else(|| Error::Config("No data folder configured".to_string()))?;
            info!("Loading tables from {}", folder.display());
            DataStore::load(folder)
        })
    }

    /// Whether the tables have been loaded
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Folder the tables are read from, if loading from disk
    pub fn data_folder(&self) -> Option<&Path> {
        self.data_folder.as_deref()
    }
}
