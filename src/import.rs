//! Source definition import.
//!
//! Reads the three YAML definition documents (`categories.yaml`,
//! `groups.yaml`, `types.yaml`), flattens the nested, locale-keyed entries
//! into flat rows, and bulk-loads them into the store.
//!
//! The import is all-or-nothing at two levels: all three documents must parse
//! before a single row is touched, and the staged rows land in one
//! transaction with a single commit. What it deliberately does *not* do is
//! validate references between levels — a type whose `groupID` points at a
//! group that does not exist is stored as-is (and simply never reached by the
//! renderer).

use crate::locale;
use crate::store::{Category, Group, Snapshot, Store, StoreError, Type};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed definition document {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("locale bundle encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// A raw locale-keyed text mapping as authored in the source documents.
type Bundle = BTreeMap<String, String>;

#[derive(Debug, Deserialize)]
struct CategoryDef {
    name: Option<Bundle>,
}

#[derive(Debug, Deserialize)]
struct GroupDef {
    #[serde(rename = "categoryID")]
    category_id: Option<i64>,
    name: Option<Bundle>,
}

#[derive(Debug, Deserialize)]
struct TypeDef {
    #[serde(rename = "groupID")]
    group_id: Option<i64>,
    #[serde(rename = "raceID")]
    race_id: Option<i64>,
    #[serde(rename = "factionID")]
    faction_id: Option<i64>,
    name: Option<Bundle>,
    traits: Option<Bundle>,
    description: Option<Bundle>,
}

/// Import the definition documents under `source_dir`, replacing the entire
/// store. Parsing happens up front, so a malformed document aborts the run
/// before any prior data is destroyed.
pub fn import(store: &mut Store, source_dir: &Path) -> Result<(), ImportError> {
    let categories: BTreeMap<i64, CategoryDef> = load(&source_dir.join("categories.yaml"))?;
    let groups: BTreeMap<i64, GroupDef> = load(&source_dir.join("groups.yaml"))?;
    let types: BTreeMap<i64, TypeDef> = load(&source_dir.join("types.yaml"))?;

    let mut snapshot = Snapshot::default();
    for (id, def) in categories {
        snapshot.categories.push(Category {
            id,
            name: serialize(def.name)?,
        });
    }
    for (id, def) in groups {
        snapshot.groups.push(Group {
            id,
            category_id: reference(def.category_id),
            name: serialize(def.name)?,
        });
    }
    for (id, def) in types {
        snapshot.types.push(Type {
            id,
            group_id: reference(def.group_id),
            race_id: reference(def.race_id),
            faction_id: reference(def.faction_id),
            name: serialize(def.name)?,
            traits: serialize(def.traits)?,
            description: serialize(def.description)?,
        });
    }

    store.replace_all(&snapshot)?;
    Ok(())
}

/// Parse one document: a top-level mapping from integer id to entry.
/// Attributes beyond the deserialized set are ignored.
fn load<T: serde::de::DeserializeOwned>(path: &Path) -> Result<BTreeMap<i64, T>, ImportError> {
    let text = fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = serde_yaml::from_str(&text).map_err(|source| ImportError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    println!("Loaded {}", path.display());
    Ok(entries)
}

/// An absent locale field becomes the empty bundle, not a missing row.
fn serialize(bundle: Option<Bundle>) -> Result<String, ImportError> {
    Ok(locale::encode(&bundle.unwrap_or_default())?)
}

/// Reference ids are stored as text; absent means the empty string, a
/// deliberately untyped placeholder rather than a null.
fn reference(id: Option<i64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}
