//! mentor CLI: Command-line interface for the mentor chat client

use clap::{Parser, Subcommand};
use mentor_engine::{Config, HttpTransport, Session, UploadFile};
use std::error::Error;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Chat with your mentor from the terminal
#[derive(Parser)]
#[command(name = "mentor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: .mentor/config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the mentor service, overriding the config file
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat TUI (default when no command specified)
    Tui,

    /// Ask one question and print the reply
    Ask {
        /// Message text; several words are joined with spaces
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Upload a file for the mentor to read
    Upload {
        /// File to upload
        path: PathBuf,
    },

    /// Print the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default config to .mentor/config.json
    Init,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let root = std::env::current_dir()?;

    if let Some(Commands::Init) = cli.command {
        return cmd_init(&root);
    }

    let config = load_config(&cli, &root)?;

    match cli.command {
        None | Some(Commands::Tui) => {
            init_logging(&config, true)?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(mentor_tui::run_tui(&config))
        }
        Some(Commands::Ask { text }) => {
            init_logging(&config, false)?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(cmd_ask(&config, &text.join(" ")))
        }
        Some(Commands::Upload { path }) => {
            init_logging(&config, false)?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(cmd_upload(&config, path))
        }
        Some(Commands::Config { json }) => cmd_config(&config, json),
        Some(Commands::Init) => Ok(()),
    }
}

/// Load the config and apply command-line overrides.
fn load_config(cli: &Cli, root: &Path) -> Result<Config, Box<dyn Error>> {
    let mut config = Config::discover(cli.config.as_deref(), root)?;
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
        config.validate()?;
    }
    Ok(config)
}

/// Install the tracing subscriber. The TUI owns the terminal, so it logs
/// to a file; headless commands log warnings to stderr.
fn init_logging(config: &Config, to_file: bool) -> Result<(), Box<dyn Error>> {
    let default_level = if to_file {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    if to_file {
        let path = config.log_path();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

async fn cmd_ask(config: &Config, text: &str) -> Result<(), Box<dyn Error>> {
    let transport = HttpTransport::new(config)?;
    let mut session = Session::new();

    session.ask(&transport, text).await?;
    if let Some(reply) = session.conversation().last() {
        println!("{}", reply.text);
    }
    Ok(())
}

async fn cmd_upload(config: &Config, path: PathBuf) -> Result<(), Box<dyn Error>> {
    if !path.is_file() {
        return Err(format!("No such file: {}", path.display()).into());
    }

    let transport = HttpTransport::new(config)?;
    let mut session = Session::new();

    let pending = session.begin_upload(UploadFile::new(path))?;
    if let Some(progress) = session.conversation().last() {
        println!("{}", progress.text);
    }
    let reply = pending.run(&transport).await;
    session.finish(reply);
    if let Some(outcome) = session.conversation().last() {
        println!("{}", outcome.text);
    }
    Ok(())
}

fn cmd_config(config: &Config, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("base_url:             {}", config.base_url);
    match config.request_timeout_secs {
        Some(secs) => println!("request_timeout_secs: {secs}"),
        None => println!("request_timeout_secs: none"),
    }
    println!("input_max_lines:      {}", config.input_max_lines);
    println!("log_file:             {}", config.log_path().display());
    Ok(())
}

fn cmd_init(root: &Path) -> Result<(), Box<dyn Error>> {
    let config_path = Config::default_path(root);
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    Config::default().save(&config_path)?;
    info!(path = %config_path.display(), "config created");
    println!("Created {}", config_path.display());
    Ok(())
}
