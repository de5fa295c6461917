//! ModEdit CLI
//!
//! Command-line interface for editing menu command lists and material
//! property lists in a chosen notation.

mod config;
mod store;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use modedit_core::{
    notation, CommandNotation, CommandTranscoder, DocumentHandle, EditableRecord, PropertyEditable,
    PropertyTranscoder, PropertyView, SessionConfig,
};
use tracing_subscriber::filter::Directive;

use crate::config::{EditorConfig, CONFIG_FILE_NAME};
use crate::store::FileStore;

#[derive(Parser)]
#[command(name = "modedit")]
#[command(about = "Menu and material editor for game asset mods")]
#[command(version)]
struct Cli {
    /// Config file (default: modedit.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit the command list of a menu document
    Menu {
        #[command(subcommand)]
        action: MenuCommand,
    },

    /// Edit the property list of a material document
    Mate {
        #[command(subcommand)]
        action: MateCommand,
    },

    /// Write a default modedit.toml
    InitConfig {
        /// Where to write the config (default: modedit.toml)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum MenuCommand {
    /// Print the command list
    Show {
        /// Menu document (.json, .yaml or .yml)
        document: PathBuf,

        /// Notation: indented, inline or json
        #[arg(short, long)]
        notation: Option<CommandNotation>,
    },

    /// Replace the command list with edited text
    Apply {
        /// Menu document (.json, .yaml or .yml)
        document: PathBuf,

        /// File holding the edited commands
        #[arg(short, long)]
        input: PathBuf,

        /// Notation the input is written in
        #[arg(short, long)]
        notation: Option<CommandNotation>,

        /// Save to another document instead of overwriting
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-encode command text from one notation to another
    Convert {
        /// File holding the commands
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long)]
        from: CommandNotation,

        #[arg(long)]
        to: CommandNotation,
    },
}

#[derive(Subcommand)]
enum MateCommand {
    /// Print the property list
    Show {
        /// Material document (.json, .yaml or .yml)
        document: PathBuf,

        /// View: form or json
        #[arg(short, long)]
        view: Option<PropertyView>,
    },

    /// Replace the property list with edited records or JSON
    Apply {
        /// Material document (.json, .yaml or .yml)
        document: PathBuf,

        /// File holding the edited properties
        #[arg(short, long)]
        input: PathBuf,

        /// View the input is written in
        #[arg(short, long)]
        view: Option<PropertyView>,

        /// Save to another document instead of overwriting
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("modedit=info".parse::<Directive>()?),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    match cli.command {
        Commands::Menu { action } => {
            let session = load_session_config(&config_path)?;
            match action {
                MenuCommand::Show { document, notation } => {
                    cmd_menu_show(session, document, notation)?;
                }
                MenuCommand::Apply {
                    document,
                    input,
                    notation,
                    output,
                } => {
                    cmd_menu_apply(session, document, input, notation, output)?;
                }
                MenuCommand::Convert { input, from, to } => {
                    cmd_menu_convert(input, from, to)?;
                }
            }
        }
        Commands::Mate { action } => {
            let session = load_session_config(&config_path)?;
            match action {
                MateCommand::Show { document, view } => {
                    cmd_mate_show(session, document, view)?;
                }
                MateCommand::Apply {
                    document,
                    input,
                    view,
                    output,
                } => {
                    cmd_mate_apply(session, document, input, view, output)?;
                }
            }
        }
        Commands::InitConfig { path } => {
            cmd_init_config(path.unwrap_or(config_path))?;
        }
    }

    Ok(())
}

fn load_session_config(path: &Path) -> Result<SessionConfig> {
    let config = EditorConfig::load_or_default(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    Ok(config.session)
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Print a menu's commands
fn cmd_menu_show(
    mut session: SessionConfig,
    document: PathBuf,
    notation: Option<CommandNotation>,
) -> Result<()> {
    if let Some(notation) = notation {
        session.command_notation = notation;
    }

    let handle = DocumentHandle::from(document.as_path());
    let transcoder = CommandTranscoder::load(&FileStore::new(), &handle, session)
        .with_context(|| format!("Failed to load {}", handle))?;

    println!("{}", transcoder.render()?);
    Ok(())
}

/// Commit edited command text to a menu
fn cmd_menu_apply(
    mut session: SessionConfig,
    document: PathBuf,
    input: PathBuf,
    notation: Option<CommandNotation>,
    output: Option<PathBuf>,
) -> Result<()> {
    if let Some(notation) = notation {
        session.command_notation = notation;
    }

    let store = FileStore::new();
    let source = DocumentHandle::from(document.as_path());
    let mut transcoder = CommandTranscoder::load(&store, &source, session)
        .with_context(|| format!("Failed to load {}", source))?;

    let text = read_input(&input)?;
    let notation = transcoder.notation();
    let count = transcoder
        .commit(&text)
        .with_context(|| format!("Failed to parse {} as {}", input.display(), notation))?
        .len();

    let destination = output.map_or(source, |p| DocumentHandle::from(p.as_path()));
    transcoder
        .save(&store, &destination)
        .with_context(|| format!("Failed to save {}", destination))?;

    tracing::info!("Applied {} commands to {}", count, destination);
    Ok(())
}

/// Re-encode command text
fn cmd_menu_convert(input: PathBuf, from: CommandNotation, to: CommandNotation) -> Result<()> {
    let text = read_input(&input)?;
    let commands = notation::parse(&text, from)
        .with_context(|| format!("Failed to parse {} as {}", input.display(), from))?;

    println!("{}", notation::serialize(&commands, to)?);
    Ok(())
}

/// Print a material's properties
fn cmd_mate_show(
    mut session: SessionConfig,
    document: PathBuf,
    view: Option<PropertyView>,
) -> Result<()> {
    if let Some(view) = view {
        session.property_view = view;
    }

    let handle = DocumentHandle::from(document.as_path());
    let transcoder = PropertyTranscoder::load(&FileStore::new(), &handle, session)
        .with_context(|| format!("Failed to load {}", handle))?;

    match transcoder.render()? {
        PropertyEditable::Form(records) => println!("{}", serde_json::to_string_pretty(&records)?),
        PropertyEditable::Json(text) => println!("{}", text),
    }
    Ok(())
}

/// Commit edited records or property JSON to a material
fn cmd_mate_apply(
    mut session: SessionConfig,
    document: PathBuf,
    input: PathBuf,
    view: Option<PropertyView>,
    output: Option<PathBuf>,
) -> Result<()> {
    if let Some(view) = view {
        session.property_view = view;
    }

    let store = FileStore::new();
    let source = DocumentHandle::from(document.as_path());
    let mut transcoder = PropertyTranscoder::load(&store, &source, session)
        .with_context(|| format!("Failed to load {}", source))?;

    let text = read_input(&input)?;
    let edited = match transcoder.view() {
        PropertyView::Form => {
            let records: Vec<EditableRecord> = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse records in {}", input.display()))?;
            PropertyEditable::Form(records)
        }
        PropertyView::Json => PropertyEditable::Json(text),
    };

    let reconstruction = transcoder
        .commit(edited)
        .with_context(|| format!("Failed to apply {}", input.display()))?;

    for entry in &reconstruction.omitted {
        println!(
            "Warning: omitted entry #{} ({} {}): {}",
            entry.index,
            entry.type_name,
            entry.prop_name.as_deref().unwrap_or("<unnamed>"),
            entry.reason
        );
    }

    let destination = output.map_or(source, |p| DocumentHandle::from(p.as_path()));
    transcoder
        .save(&store, &destination)
        .with_context(|| format!("Failed to save {}", destination))?;

    tracing::info!(
        "Applied {} properties to {} ({} omitted)",
        reconstruction.properties.len(),
        destination,
        reconstruction.omitted.len()
    );
    Ok(())
}

/// Write a default config file
fn cmd_init_config(path: PathBuf) -> Result<()> {
    EditorConfig::default()
        .write_new(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Wrote default config to {}", path.display());
    println!("\nSet the default notation and view under [session]:");
    println!("  command_notation = \"indented\" | \"inline\" | \"json\"");
    println!("  property_view    = \"form\" | \"json\"");
    Ok(())
}
