//! HTML site generation.
//!
//! Walks the store depth-first from a fixed list of root category ids and
//! emits one document per visited node plus a single index document.
//!
//! ## Output Structure
//!
//! ```text
//! docs/
//! ├── index.html           # Root category table
//! ├── style.css            # Shared stylesheet (copied by the CLI)
//! ├── category/6.html      # One per rendered category
//! ├── group/25.html        # One per group under a rendered category
//! └── type/587.html        # One per type under a rendered group
//! ```
//!
//! ## Pages
//!
//! - Category and group pages are tables with one row per child: a link on
//!   the child's numeric id, then the child's name resolved for every
//!   supported locale.
//! - Type pages are detail tables: one row per supported locale with the
//!   resolved name and description.
//!
//! Documents are named by numeric id, and links use the same id — the two
//! must never diverge, so both go through [`locales_table`]'s prefix + id
//! convention.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Locale text is interpolated with `PreEscaped`: source data passes through
//! to the page verbatim, unescaped, exactly as stored.

use crate::locale::{self, DecodeError, Locale, Localized};
use crate::page::PageWriter;
use crate::store::{Category, Group, Store, StoreError, Type};
use maud::{Markup, PreEscaped, html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// One child entry in a non-leaf table: the link id plus the child's name
/// resolved for every supported locale.
struct LinkRow {
    id: i64,
    name: Localized,
}

/// Render the whole site: every root category, its descendants, and the
/// index document. Any failure aborts the run; documents already written
/// stay on disk.
pub fn render_site(
    store: &Store,
    writer: &PageWriter,
    roots: &[i64],
    site_title: &str,
) -> Result<(), RenderError> {
    let mut rows = Vec::new();
    for &id in roots {
        let category = store.category(id)?;
        let name = locale::decode(&category.name)?;
        render_category(store, writer, name.primary(), &category)?;
        rows.push(LinkRow { id, name });
    }
    writer.write("index", site_title, locales_table("./category/", &rows))?;
    println!("Generated index.html ({} root categories)", roots.len());
    Ok(())
}

fn render_category(
    store: &Store,
    writer: &PageWriter,
    title: &str,
    category: &Category,
) -> Result<(), RenderError> {
    let mut rows = Vec::new();
    for group in store.child_groups(category)? {
        let name = locale::decode(&group.name)?;
        render_group(store, writer, name.primary(), &group)?;
        rows.push(LinkRow { id: group.id, name });
    }
    writer.write(
        &format!("category/{}", category.id),
        title,
        locales_table("../group/", &rows),
    )?;
    Ok(())
}

fn render_group(
    store: &Store,
    writer: &PageWriter,
    title: &str,
    group: &Group,
) -> Result<(), RenderError> {
    let mut rows = Vec::new();
    for ty in store.child_types(group)? {
        let name = locale::decode(&ty.name)?;
        render_type(writer, name.primary(), &ty)?;
        rows.push(LinkRow { id: ty.id, name });
    }
    writer.write(
        &format!("group/{}", group.id),
        title,
        locales_table("../type/", &rows),
    )?;
    Ok(())
}

/// Leaf document: per-locale name and description, no further recursion.
fn render_type(writer: &PageWriter, title: &str, ty: &Type) -> Result<(), RenderError> {
    let names = locale::decode(&ty.name)?;
    let descriptions = locale::decode(&ty.description)?;

    let table = html! {
        table {
            tr { th {} th { "Name" } th { "Description" } }
            @for l in Locale::ALL {
                tr {
                    td { (l.label()) }
                    td { (PreEscaped(names.get(l))) }
                    td { (PreEscaped(descriptions.get(l))) }
                }
            }
        }
    };
    writer.write(&format!("type/{}", ty.id), title, table)?;
    Ok(())
}

/// Child table for category, group, and index pages. Each row links the
/// child's numeric id to `<prefix><id>.html` and shows the name for every
/// supported locale, in [`Locale::ALL`] column order.
fn locales_table(prefix: &str, rows: &[LinkRow]) -> Markup {
    html! {
        table {
            tr {
                th { "ID" }
                @for l in Locale::ALL { th { (l.label()) } }
            }
            @for row in rows {
                tr {
                    td { a href={ (prefix) (row.id) ".html" } { (row.id) } }
                    @for l in Locale::ALL { td { (PreEscaped(row.name.get(l))) } }
                }
            }
        }
    }
}
