//! SQLite-backed hierarchy store.
//!
//! Three tables mirror the source hierarchy: categories 1–N groups 1–N types.
//! The store owns the single long-lived [`Connection`] for the process; it is
//! opened once in `main` and passed by reference to the importer and the
//! renderer — no ambient globals.
//!
//! Reference columns (`category_id`, `group_id`, `race_id`, `faction_id`) are
//! stored as text, with the empty string standing in for an absent source
//! field. No foreign-key constraints are declared: a group may point at a
//! category that does not exist, and the row is stored as-is. Children are
//! computed on demand with `ORDER BY id` — ascending id order is what makes
//! rendering deterministic.

use rusqlite::{Connection, params};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("no {table} row with id {id}")]
    NotFound { table: &'static str, id: i64 },
    #[error("multiple {table} rows with id {id}")]
    Ambiguous { table: &'static str, id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    /// Serialized locale bundle.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    /// Decimal id of the owning category, or empty if the source omitted it.
    pub category_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub id: i64,
    pub group_id: String,
    pub race_id: String,
    pub faction_id: String,
    pub name: String,
    pub traits: String,
    pub description: String,
}

/// Everything one import run loads, staged before any row hits the store.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub groups: Vec<Group>,
    pub types: Vec<Type>,
}

const SCHEMA: &str = "
    DROP TABLE IF EXISTS categories;
    DROP TABLE IF EXISTS groups;
    DROP TABLE IF EXISTS types;
    CREATE TABLE categories (
        id   INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    );
    CREATE TABLE groups (
        id          INTEGER PRIMARY KEY,
        category_id TEXT NOT NULL,
        name        TEXT NOT NULL
    );
    CREATE TABLE types (
        id          INTEGER PRIMARY KEY,
        group_id    TEXT NOT NULL,
        race_id     TEXT NOT NULL,
        faction_id  TEXT NOT NULL,
        name        TEXT NOT NULL,
        traits      TEXT NOT NULL,
        description TEXT NOT NULL
    );
";

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if needed) the store at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Store {
            conn: Connection::open(path)?,
        })
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Store {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Drop and recreate all tables. Prior contents are unconditionally
    /// discarded; this is the documented full-replace import behavior.
    pub fn recreate_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Bulk-load a snapshot in a single transaction.
    ///
    /// One commit at the very end — a failure mid-load rolls the transaction
    /// back and leaves the freshly recreated, empty schema observable.
    pub fn replace_all(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.recreate_schema()?;

        let tx = self.conn.transaction()?;
        for category in &snapshot.categories {
            tx.execute(
                "INSERT INTO categories (id, name) VALUES (?1, ?2)",
                params![category.id, category.name],
            )?;
        }
        for group in &snapshot.groups {
            tx.execute(
                "INSERT INTO groups (id, category_id, name) VALUES (?1, ?2, ?3)",
                params![group.id, group.category_id, group.name],
            )?;
        }
        for ty in &snapshot.types {
            tx.execute(
                "INSERT INTO types (id, group_id, race_id, faction_id, name, traits, description)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    ty.id,
                    ty.group_id,
                    ty.race_id,
                    ty.faction_id,
                    ty.name,
                    ty.traits,
                    ty.description
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Fetch one category by id. Exactly one row must match: zero is a
    /// `NotFound`, more than one an `Ambiguous` (the importer guarantees id
    /// uniqueness, so multiplicity means a programming error).
    pub fn category(&self, id: i64) -> Result<Category, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories WHERE id = ?1")?;
        let rows = stmt
            .query_map(params![id], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = rows.into_iter();
        match (rows.next(), rows.next()) {
            (Some(category), None) => Ok(category),
            (None, _) => Err(StoreError::NotFound {
                table: "categories",
                id,
            }),
            (Some(_), Some(_)) => Err(StoreError::Ambiguous {
                table: "categories",
                id,
            }),
        }
    }

    /// Groups owned by `category`, ascending by id.
    pub fn child_groups(&self, category: &Category) -> Result<Vec<Group>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category_id, name FROM groups WHERE category_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![category.id.to_string()], |row| {
                Ok(Group {
                    id: row.get(0)?,
                    category_id: row.get(1)?,
                    name: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Types owned by `group`, ascending by id.
    pub fn child_types(&self, group: &Group) -> Result<Vec<Type>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, group_id, race_id, faction_id, name, traits, description
             FROM types WHERE group_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![group.id.to_string()], |row| {
                Ok(Type {
                    id: row.get(0)?,
                    group_id: row.get(1)?,
                    race_id: row.get(2)?,
                    faction_id: row.get(3)?,
                    name: row.get(4)?,
                    traits: row.get(5)?,
                    description: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
        }
    }

    fn group(id: i64, category_id: &str, name: &str) -> Group {
        Group {
            id,
            category_id: category_id.to_string(),
            name: name.to_string(),
        }
    }

    fn ty(id: i64, group_id: &str, name: &str) -> Type {
        Type {
            id,
            group_id: group_id.to_string(),
            race_id: String::new(),
            faction_id: String::new(),
            name: name.to_string(),
            traits: "{}".to_string(),
            description: "{}".to_string(),
        }
    }

    fn loaded(snapshot: &Snapshot) -> Store {
        let mut store = Store::open_in_memory().unwrap();
        store.replace_all(snapshot).unwrap();
        store
    }

    #[test]
    fn category_lookup_round_trips() {
        let store = loaded(&Snapshot {
            categories: vec![category(6, r#"{"en":"Ship"}"#)],
            ..Default::default()
        });
        let found = store.category(6).unwrap();
        assert_eq!(found.name, r#"{"en":"Ship"}"#);
    }

    #[test]
    fn missing_category_is_not_found() {
        let store = loaded(&Snapshot::default());
        match store.category(99) {
            Err(StoreError::NotFound { table, id }) => {
                assert_eq!(table, "categories");
                assert_eq!(id, 99);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn child_groups_are_ascending_by_id() {
        let store = loaded(&Snapshot {
            categories: vec![category(6, "{}")],
            groups: vec![
                group(5, "6", "{}"),
                group(1, "6", "{}"),
                group(3, "6", "{}"),
                group(2, "7", "{}"), // different parent, not returned
            ],
            ..Default::default()
        });
        let children = store.child_groups(&store.category(6).unwrap()).unwrap();
        let ids: Vec<i64> = children.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn child_types_filter_on_owning_group() {
        let store = loaded(&Snapshot {
            categories: vec![category(6, "{}")],
            groups: vec![group(10, "6", "{}")],
            types: vec![ty(100, "10", "{}"), ty(50, "10", "{}"), ty(7, "11", "{}")],
        });
        let parent = &store.child_groups(&store.category(6).unwrap()).unwrap()[0];
        let ids: Vec<i64> = store
            .child_types(parent)
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![50, 100]);
    }

    #[test]
    fn replace_all_discards_prior_contents() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .replace_all(&Snapshot {
                categories: vec![category(1, "{}"), category(2, "{}")],
                ..Default::default()
            })
            .unwrap();
        store
            .replace_all(&Snapshot {
                categories: vec![category(3, "{}")],
                ..Default::default()
            })
            .unwrap();

        assert!(store.category(1).is_err());
        assert!(store.category(3).is_ok());
    }

    #[test]
    fn group_with_absent_parent_reference_is_stored() {
        // Referential integrity is not the store's job.
        let store = loaded(&Snapshot {
            groups: vec![group(10, "", "{}")],
            ..Default::default()
        });
        let orphans = store
            .child_groups(&category(0, "{}"))
            .map(|groups| groups.len());
        assert_eq!(orphans.unwrap(), 0);
    }
}
