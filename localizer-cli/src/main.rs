mod info;
mod lookup;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use localizer::{Domain, Localizer, LocalizerConfig};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding catalogs, `images/` and `fonts/`
    #[arg(long, global = true)]
    resources: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Language to activate instead of the remembered or default one
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Separator for composite values
    #[arg(long, global = true)]
    separator: Option<String>,

    /// Strip `@2x`-style density markers from image names
    #[arg(long, global = true)]
    remove_density_suffix: bool,

    /// Trace catalog loading and key misses on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a string; unknown keys print the key itself.
    Get {
        key: String,
        /// Print a single item of a composite value
        #[arg(long)]
        index: Option<usize>,
    },

    /// Resolve a composite value into its items.
    Array {
        key: String,
        /// Print the items as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Exit with status 0 if the key exists, 1 otherwise.
    Exists { key: String },

    /// Resolve a font entry.
    Font { key: String },

    /// Resolve a localized image name, or a numbered animation sequence.
    Image {
        name: String,
        /// Resolve frames `name1..nameN` instead of a single image
        #[arg(long)]
        frames: Option<usize>,
    },

    /// Show the active language and catalog sizes.
    Info {
        #[arg(long)]
        json: bool,
    },

    /// Write the active catalog of a domain to a file.
    Export {
        /// Domain to export: strings or fonts
        #[arg(long, default_value = "strings")]
        domain: String,
        /// Output file; the extension selects plist, json or strings
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "localizer=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_config(args: &Args) -> Result<LocalizerConfig, String> {
    let mut config = match &args.config {
        Some(path) => LocalizerConfig::from_file(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?,
        None => LocalizerConfig::default(),
    };
    if let Some(dir) = &args.resources {
        config.resource_dir = dir.clone();
    }
    if let Some(separator) = &args.separator {
        config.separator = separator.clone();
    }
    if args.remove_density_suffix {
        config.remove_density_suffix = true;
    }
    if args.verbose {
        config.logging = true;
    }
    Ok(config)
}

fn open_localizer(args: &Args) -> Result<Localizer, String> {
    let mut config = build_config(args)?;
    if args.lang.is_some() {
        // `--lang` applies to this invocation only.
        config.preferences_file = None;
    }
    debug!(resources = %config.resource_dir.display(), "opening resources");

    let mut localizer = Localizer::from_config(config);
    let loaded = match &args.lang {
        Some(code) => localizer.change_language(code),
        None => localizer.bootstrap(),
    };
    loaded.map_err(|e| e.to_string())?;
    Ok(localizer)
}

fn run(args: Args) -> Result<ExitCode, String> {
    let localizer = open_localizer(&args)?;

    match args.commands {
        Commands::Get { key, index } => lookup::print_string(&localizer, &key, index)?,
        Commands::Array { key, json } => lookup::print_array(&localizer, &key, json)?,
        Commands::Exists { key } => {
            let exists = localizer.object_for_key_exists(&key);
            println!("{}", exists);
            if !exists {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Font { key } => lookup::print_font(&localizer, &key)?,
        Commands::Image { name, frames } => lookup::print_image(&localizer, &name, frames)?,
        Commands::Info { json } => info::print_info(&localizer, json)?,
        Commands::Export { domain, output } => {
            let domain = match domain.as_str() {
                "strings" => Domain::Strings,
                "fonts" => Domain::Fonts,
                other => return Err(format!("Unknown domain: {} (expected strings or fonts)", other)),
            };
            info::export_catalog(&localizer, domain, &output)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
