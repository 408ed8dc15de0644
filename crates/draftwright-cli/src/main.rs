use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use draftwright_config::Config;
use draftwright_engine::{
    AppendReport, DraftEditor, DraftId, FileStore, ImageSpec, Node, SectionHeader,
    parse_markdown, snippets,
};
use log::{LevelFilter, debug};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Parser)]
#[command(name = "draftwright", version, about = "Write markdown into editor drafts")]
struct Cli {
    /// Config file to use instead of ~/.config/draftwright/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of draft records, overriding the configured store path
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the document tree of a markdown file as JSON
    Convert { file: PathBuf },
    /// List the drafts in the store
    List,
    /// Print a draft's current content as JSON
    Show {
        #[arg(long)]
        draft: String,
    },
    /// Append a markdown file to the end of a draft
    Append {
        #[arg(long)]
        draft: String,
        file: PathBuf,
        /// Heading placed before the appended content
        #[arg(long)]
        section: Option<String>,
        /// Leave the time of day off the section heading
        #[arg(long)]
        no_timestamp: bool,
    },
    /// Replace a draft's content with a markdown file
    Replace {
        #[arg(long)]
        draft: String,
        file: PathBuf,
    },
    /// Append an image to the end of a draft
    AddImage {
        #[arg(long)]
        draft: String,
        url: String,
        #[arg(long)]
        alt: Option<String>,
        #[arg(long)]
        caption: Option<String>,
    },
    /// Append a source file as a code block
    AddCode {
        #[arg(long)]
        draft: String,
        file: PathBuf,
        #[arg(long, default_value = "")]
        language: String,
        /// Shown above the block; defaults to none
        #[arg(long)]
        filename: Option<String>,
        #[arg(long)]
        caption: Option<String>,
    },
    /// Append a ready-made block group
    AddSnippet {
        #[arg(long)]
        draft: String,
        #[command(subcommand)]
        snippet: Snippet,
    },
}

#[derive(Debug, Subcommand)]
enum Snippet {
    /// A rule and a milestone heading
    Milestone {
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// A plain paragraph
    Update { text: String },
    /// A Lightning tip line
    Tip {
        lnurl: String,
        #[arg(long, default_value = snippets::DEFAULT_TIP_MESSAGE)]
        message: String,
    },
    /// A Bitcoin donation line
    Donation {
        address: String,
        #[arg(long, default_value = snippets::DEFAULT_DONATION_MESSAGE)]
        message: String,
    },
    /// A quoted paywall notice with a payment link
    Paywall {
        payment_url: String,
        #[arg(long)]
        price_sats: u64,
    },
}

impl Snippet {
    fn into_nodes(self) -> Vec<Node> {
        match self {
            Snippet::Milestone { title, description } => {
                snippets::milestone(&title, description.as_deref())
            }
            Snippet::Update { text } => snippets::update(&text),
            Snippet::Tip { lnurl, message } => snippets::lightning_tip(&lnurl, &message),
            Snippet::Donation { address, message } => {
                snippets::bitcoin_donation(&address, &message)
            }
            Snippet::Paywall {
                payment_url,
                price_sats,
            } => snippets::paywall_notice(&payment_url, price_sats),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        store: store_override,
        command,
        ..
    } = cli;

    // Config and store are only touched by commands that address a draft
    let open = || -> Result<(Config, FileStore)> {
        let config = load_config(config_path.as_deref())?;
        let store_path = store_override
            .clone()
            .unwrap_or_else(|| config.store_path.clone());
        debug!("Using draft store at {}", store_path.display());
        let store = FileStore::open(&store_path)
            .with_context(|| format!("Failed to open draft store at {}", store_path.display()))?;
        Ok((config, store))
    };

    match command {
        Command::Convert { file } => {
            let markdown = read_input(&file)?;
            let doc = parse_markdown(&markdown);
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Command::List => {
            let (_, store) = open()?;
            for id in store.list_drafts()? {
                println!("{id}");
            }
        }
        Command::Show { draft } => {
            let (config, store) = open()?;
            let editor = DraftEditor::new(store, config.publication_origin());
            let doc = editor.current(&DraftId::from(draft))?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Command::Append {
            draft,
            file,
            section,
            no_timestamp,
        } => {
            let (config, store) = open()?;
            let mut editor = editor_for(store, &config)?;
            let markdown = read_input(&file)?;
            let section = section.map(|title| {
                let header = SectionHeader::new(title).with_level(config.section_heading_level);
                if config.timestamp_sections && !no_timestamp {
                    header.at(Local::now().time())
                } else {
                    header
                }
            });
            let report = editor.append_markdown(&DraftId::from(draft), &markdown, section)?;
            print_report("Appended to", &report);
        }
        Command::Replace { draft, file } => {
            let (config, store) = open()?;
            let mut editor = editor_for(store, &config)?;
            let markdown = read_input(&file)?;
            let report = editor.replace_markdown(&DraftId::from(draft), &markdown)?;
            print_report("Replaced", &report);
        }
        Command::AddImage {
            draft,
            url,
            alt,
            caption,
        } => {
            let (config, store) = open()?;
            let mut editor = editor_for(store, &config)?;
            let mut spec = ImageSpec::new(url);
            spec.alt = alt;
            spec.caption = caption;
            let report = editor.add_image(&DraftId::from(draft), spec)?;
            print_report("Added image to", &report);
        }
        Command::AddCode {
            draft,
            file,
            language,
            filename,
            caption,
        } => {
            let (config, store) = open()?;
            let mut editor = editor_for(store, &config)?;
            let source = read_input(&file)?;
            let report = editor.add_code_snippet(
                &DraftId::from(draft),
                &source,
                &language,
                filename.as_deref(),
                caption.as_deref(),
            )?;
            print_report("Added code to", &report);
        }
        Command::AddSnippet { draft, snippet } => {
            let (config, store) = open()?;
            let mut editor = editor_for(store, &config)?;
            let report = editor.append(&DraftId::from(draft), snippet.into_nodes(), None)?;
            print_report("Added snippet to", &report);
        }
    }

    Ok(())
}

/// Loads the config file (explicit path or default location) and applies
/// environment overrides. A missing file gives an unset publication.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let mut config = loaded.unwrap_or_else(|| Config::new(""));
    config.apply_env_overrides();
    Ok(config)
}

/// Writing commands need a publication for image redirects.
fn editor_for(store: FileStore, config: &Config) -> Result<DraftEditor<FileStore>> {
    if config.publication.trim().is_empty() {
        bail!(
            "No publication configured. Set `publication` in {} or {}",
            Config::config_path().display(),
            draftwright_config::PUBLICATION_ENV
        );
    }
    Ok(DraftEditor::new(store, config.publication_origin()))
}

fn read_input(file: &Path) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn print_report(action: &str, report: &AppendReport) {
    println!(
        "{action} draft {}: {} blocks, {} sections",
        report.draft_id, report.block_count, report.section_count
    );
}
