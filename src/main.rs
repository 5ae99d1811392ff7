use clap::{Parser, Subcommand};
use lorepedia::{generate, import, page, store};
use std::fs;
use std::path::PathBuf;

const STYLESHEET: &str = include_str!("../static/style.css");

/// Category ids that seed the render traversal when none are given.
/// Not every category in the store is necessarily rendered.
const DEFAULT_ROOTS: [i64; 6] = [6, 7, 8, 16, 20, 32];

#[derive(Parser)]
#[command(name = "lorepedia")]
#[command(about = "Static encyclopedia generator for hierarchical game data")]
#[command(long_about = "\
Static encyclopedia generator for hierarchical game data

Two-stage batch pipeline. `import` flattens the YAML definition documents
(categories.yaml, groups.yaml, types.yaml) into a SQLite store, replacing
any prior contents. `render` walks the store from a set of root category
ids and writes one cross-linked HTML document per category, group, and
type, plus an index.

Output structure:

  docs/
  ├── index.html            # Root category table
  ├── style.css             # Shared stylesheet
  ├── category/<id>.html    # One per rendered category
  ├── group/<id>.html       # One per group
  └── type/<id>.html        # One per type")]
#[command(version)]
struct Cli {
    /// SQLite store path
    #[arg(long, default_value = "lorepedia.sqlite", global = true)]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import the YAML definition documents, replacing the entire store
    Import {
        /// Directory containing categories.yaml, groups.yaml, types.yaml
        #[arg(long, default_value = "fsd")]
        source: PathBuf,
    },
    /// Render the HTML documentation tree from the current store contents
    Render {
        /// Output directory
        #[arg(long, default_value = "docs")]
        output: PathBuf,

        /// Root category ids seeding the traversal
        #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_ROOTS)]
        roots: Vec<i64>,

        /// Index page title
        #[arg(long, default_value = "Lorepedia")]
        title: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut store = store::Store::open(&cli.db)?;

    match cli.command {
        Command::Import { source } => {
            println!("==> Importing {}", source.display());
            import::import(&mut store, &source)?;
            println!("==> Store replaced: {}", cli.db.display());
        }
        Command::Render {
            output,
            roots,
            title,
        } => {
            println!("==> Rendering to {}", output.display());
            bootstrap_output(&output)?;
            let writer = page::PageWriter::new(&output);
            generate::render_site(&store, &writer, &roots, &title)?;
            println!("==> Site generated at {}", output.display());
        }
    }

    Ok(())
}

/// Create the output directory tree and place the shared stylesheet in the
/// root and each subdirectory, so every page can link it as `./style.css`.
fn bootstrap_output(output: &std::path::Path) -> std::io::Result<()> {
    for sub in ["", "category", "group", "type"] {
        let dir = output.join(sub);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("style.css"), STYLESHEET)?;
    }
    Ok(())
}
