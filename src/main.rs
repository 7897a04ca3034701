use bookconf::assemble::{self, SystemClock};
use bookconf::config::{self, BookConfig};
use bookconf::storage::FsBackend;
use bookconf::tree::BookStats;
use bookconf::{generate, output};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "bookconf")]
#[command(about = "Generate a book publishing config from a tree of documents")]
#[command(long_about = "\
Generate a book publishing config from a tree of documents

The storage directory is the data source. Sub-directories are collections,
Markdown files are documents, and each document's first table holds its
metadata:

  library/
  ├── bookconf.toml            # Optional config (see 'bookconf gen-config')
  └── Book/                    # Root collection → \"title\": \"Book\"
      ├── Intro.md             # | URL | https://example.com/intro |
      └── Ch1/                 # Branch → { \"name\": \"Ch1\", \"contents\": [...] }
          └── Lesson1.md       # No URL row → \"MISSING! Check the appropriate doc\"

Documents are listed before sub-collections at every level.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Storage directory (overrides storage_root from the config)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Log every collection visited
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the generated config
    Generate {
        /// Root collection id (overrides root_collection from the config)
        root: Option<String>,
        /// Write the config to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also write the config into this document, replacing its content
        #[arg(long, value_name = "DOC_ID")]
        write_to: Option<String>,
    },
    /// Outline the book and report documents with missing URLs
    Check {
        /// Root collection id (overrides root_collection from the config)
        root: Option<String>,
    },
    /// Print a stock bookconf.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet)?;

    match cli.command {
        Command::Generate {
            root,
            output,
            write_to,
        } => {
            let (book_config, backend) = open_storage(&cli.config, &cli.storage)?;
            let root_id = root.unwrap_or_else(|| book_config.root_collection.clone());
            let generated = generate::generate_for(&backend, &root_id, &book_config, &SystemClock)?;
            match output {
                Some(path) => std::fs::write(&path, format!("{}\n", generated.text))?,
                None => println!("{}", generated.text),
            }
            if let Some(doc_id) = write_to {
                generate::publish_to_document(&backend, &generated.text, &doc_id)?;
                eprintln!("==> Wrote config to {}", doc_id);
            }
        }
        Command::Check { root } => {
            let (book_config, backend) = open_storage(&cli.config, &cli.storage)?;
            let root_id = root.unwrap_or_else(|| book_config.root_collection.clone());
            let root = assemble::assemble(&backend, &root_id, &book_config, &SystemClock)?;
            output::print_check_output(&root, &book_config.missing_url);
            let stats = BookStats::of(&root.book_contents, &book_config.missing_url);
            if stats.missing_urls > 0 {
                std::process::exit(1);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. WARN by default so per-document
/// metadata problems are visible next to the generated output.
fn init_logging(verbose: bool, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Load the config and open the storage directory.
///
/// `--storage` wins over `storage_root` from the config.
fn open_storage(
    config_path: &Path,
    cli_storage: &Option<PathBuf>,
) -> Result<(BookConfig, FsBackend), config::ConfigError> {
    let book_config = config::load_config(config_path)?;
    let root = cli_storage
        .clone()
        .unwrap_or_else(|| PathBuf::from(&book_config.storage_root));
    Ok((book_config, FsBackend::new(root)))
}
