//! Page shell and document persistence.
//!
//! Every generated document shares one minimal shell: doctype, charset,
//! a link to the shared stylesheet, and the title. Titles come from source
//! data and pass through verbatim — the site replicates its inputs exactly,
//! markup-significant characters included.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::PathBuf;

/// Writes rendered documents under a fixed output root.
pub struct PageWriter {
    root: PathBuf,
}

impl PageWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        PageWriter { root: root.into() }
    }

    /// Wrap `body` in the page shell and persist it to `<root>/<name>.html`,
    /// overwriting unconditionally. `name` may contain a subdirectory
    /// (`category/6`); the directory tree is bootstrapped by the caller.
    pub fn write(&self, name: &str, title: &str, body: Markup) -> std::io::Result<()> {
        let page = html! {
            (DOCTYPE)
            html {
                head {
                    title { (PreEscaped(title)) }
                    meta charset="UTF-8";
                    link rel="stylesheet" type="text/css" href="./style.css";
                }
                body { (body) }
            }
        };
        fs::write(self.root.join(format!("{name}.html")), page.into_string())
    }
}
