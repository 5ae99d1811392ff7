//! # Lorepedia
//!
//! A static encyclopedia generator for hierarchical, multi-locale game data.
//! Three YAML definition documents (categories → groups → item types) are
//! normalized into a SQLite store, then rendered into a tree of cross-linked,
//! per-locale HTML pages mirroring that hierarchy.
//!
//! # Architecture: Two-Stage Batch Pipeline
//!
//! ```text
//! 1. Import   fsd/*.yaml  →  lorepedia.sqlite   (nested definitions → flat rows)
//! 2. Render   sqlite      →  docs/              (one HTML document per node)
//! ```
//!
//! The stages are independent on purpose: the import is a destructive
//! full-replace (drop, recreate, reload, one commit), so the renderer always
//! sees a single consistent snapshot and can be re-run any number of times
//! against the same store with byte-identical output.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`import`] | Stage 1 — parses the definition documents and bulk-loads the store |
//! | [`store`] | SQLite surface: lookup-by-id and ordered children-of queries |
//! | [`locale`] | Locale bundle codec and single-level fallback resolution |
//! | [`generate`] | Stage 2 — depth-first traversal emitting one document per node |
//! | [`page`] | Page shell wrapping and document persistence |
//!
//! # Design Decisions
//!
//! ## Opaque Locale Payloads
//!
//! Display text is stored as one JSON string per field rather than a column
//! per locale. The store never interprets the payload; only [`locale`]
//! encodes and decodes it. Adding a locale means touching one module.
//!
//! ## Numeric Ids Everywhere
//!
//! Documents are named by the source-assigned numeric id and links are built
//! from the same id. Display names would risk filesystem-unsafe characters
//! and collisions between siblings sharing a name; ids are stable, unique
//! within a table, and ordering by them makes the output deterministic.
//!
//! ## Maud With Verbatim Interpolation
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a compile error and templates are plain Rust expressions. Locale text
//! and titles are spliced through `PreEscaped` — the source data is trusted
//! and passes through to the page exactly as authored.
//!
//! ## No Referential Integrity
//!
//! The importer stores references as-is. A type pointing at a nonexistent
//! group imports fine and is simply never reached by the traversal, which
//! only follows existing parent→child edges.

pub mod generate;
pub mod import;
pub mod locale;
pub mod page;
pub mod store;
