use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use log::{info, warn, LevelFilter};
use std::fs;
use std::path::{Path, PathBuf};

use libbart::chunker::write_chunks;
use libbart::config::Settings;
use libbart::config_loader;
use libbart::credentials::{Credentials, StdinPrompt};
use libbart::utils::{self, timing};

/// Helper tool for network automation scripts
#[derive(Parser, Debug)]
#[command(name = "bart", author, version, about, long_about = None)]
struct Args {
    /// Path to a settings YAML file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a device configuration into block-aligned chunk files
    Chunk {
        /// Configuration file to split
        file: PathBuf,

        /// Minimum chunk size in lines (overrides settings)
        #[arg(short, long)]
        step: Option<usize>,

        /// Output directory for chunk files (overrides settings)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File name prefix for chunk files (overrides settings)
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Print the reverse-DNS (PTR) name of every IP listed in a file
    Ptr {
        /// File with one IP address per line
        file: PathBuf,
    },

    /// Convert an XML document to JSON
    Xml2json {
        /// XML file to convert
        file: PathBuf,

        /// Spaces per indentation level
        #[arg(short, long, default_value = "2")]
        indent: usize,

        /// Write the JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the length of the longest line in a file
    Longest {
        file: PathBuf,
    },

    /// Print the chain of single-key objects at the top of a JSON document
    ExtractPath {
        file: PathBuf,
    },

    /// Print the JSON found below a path of keys
    Deref {
        file: PathBuf,

        /// Keys to follow, outermost first
        keys: Vec<String>,
    },

    /// Resolve device credentials from the environment or a prompt
    Credentials,
}

fn read_json(file: &Path) -> Result<serde_json::Value> {
    let content = fs::read_to_string(file)
        .wrap_err_with(|| format!("Failed to read '{}'", file.display()))?;
    serde_json::from_str(&content).wrap_err_with(|| format!("Failed to parse JSON in '{}'", file.display()))
}

fn log_level(args: &Args, settings: &Settings) -> LevelFilter {
    if args.debug {
        return LevelFilter::Debug;
    }
    settings
        .general
        .log_level
        .as_deref()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Chunk { file, step, output, prefix } => {
            let mut chunker_settings = settings.clone();
            if let Some(step) = step {
                chunker_settings.chunker.step = step;
            }
            let chunker = chunker_settings.chunker()?;
            let output_dir = output.unwrap_or_else(|| settings.output.directory.clone());
            let prefix = prefix.unwrap_or_else(|| settings.chunker.prefix.clone());

            let text = fs::read_to_string(&file)
                .wrap_err_with(|| format!("Failed to read configuration '{}'", file.display()))?;
            let paths = timing::timer("chunk", || write_chunks(&chunker, &text, &output_dir, &prefix))?;

            for path in paths {
                println!("{}", path.display());
            }
        }
        Command::Ptr { file } => {
            let ips = utils::read_ips_from_file(&file)
                .wrap_err_with(|| format!("Failed to read IP list '{}'", file.display()))?
                .ok_or_else(|| eyre!("IP list '{}' is not a file", file.display()))?;
            if ips.is_empty() {
                warn!("No IP addresses found in {:?}", file);
            }
            for (ip, ptr) in ips.iter().zip(utils::atoptr(&ips)?) {
                println!("{}\t{}", ip, ptr);
            }
        }
        Command::Xml2json { file, indent, output } => {
            let xml = fs::read_to_string(&file)
                .wrap_err_with(|| format!("Failed to read XML '{}'", file.display()))?;
            let json = utils::xml2json(&xml, indent)?;
            match output {
                Some(path) => {
                    utils::save_file(&json, &path)?;
                }
                None => println!("{}", json),
            }
        }
        Command::Longest { file } => {
            let text = fs::read_to_string(&file)
                .wrap_err_with(|| format!("Failed to read '{}'", file.display()))?;
            let lines: Vec<&str> = text.lines().collect();
            match utils::max_length(&lines) {
                Some(length) => println!("{}", length),
                None => warn!("{:?} is empty", file),
            }
        }
        Command::ExtractPath { file } => {
            let data = read_json(&file)?;
            utils::beautify(&utils::extract_path(&data), 2)?;
        }
        Command::Deref { file, keys } => {
            let data = read_json(&file)?;
            let found = timing::debug_call("deref_multi", keys.as_slice(), |keys| utils::deref_multi(&data, keys));
            match found {
                Some(value) => utils::beautify(value, 2)?,
                None => return Err(eyre!("Path {:?} not found in '{}'", keys, file.display())),
            }
        }
        Command::Credentials => {
            let mut prompt = StdinPrompt;
            let credentials = Credentials::resolve(&settings.credentials, &mut prompt)
                .wrap_err("Failed to resolve credentials")?;
            println!("Credentials resolved for user '{}'", credentials.username);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    let settings = config_loader::load_or_default(args.config.as_deref())?;

    timing::init_logging(log_level(&args, &settings));

    info!("Starting bart v{}", env!("CARGO_PKG_VERSION"));
    if let Some(config) = &args.config {
        info!("Settings file: {:?}", config);
    }

    run(args.command, &settings)
}
