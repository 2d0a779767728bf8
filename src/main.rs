use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use cipherforge::config::Config;
use cipherforge::error::CfResult;
use std::path::PathBuf;
use std::process;
use tracing::{debug, error, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Caesar cipher cracker for Russian and English", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; flags given on the command line take precedence.
    #[arg(global = true, long = "config")]
    config_file: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recover the key and plaintext of a rotation cipher.
    Crack(cmd::crack::CrackArgs),
    /// Encrypt text with a known or random key.
    Encrypt(cmd::encrypt::EncryptArgs),
    /// Report language, bilingual and plaintext status.
    Detect(cmd::detect::DetectArgs),
}

/// File config (if any) with explicit CLI flags merged on top.
fn resolve_config(
    config_file: &Option<PathBuf>,
    cli_config: &Config,
    sub_matches: Option<&ArgMatches>,
) -> CfResult<Config> {
    let config = match (config_file, sub_matches) {
        (Some(path), Some(sub)) => {
            debug!("Loading config from {:?}", path);
            let mut file_config = Config::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, sub);
            file_config
        }
        (Some(path), None) => Config::load_from_file(path)?,
        (None, _) => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli, matches: &ArgMatches) -> CfResult<()> {
    match cli.command {
        Commands::Crack(args) => {
            let config = resolve_config(
                &cli.config_file,
                &args.config,
                matches.subcommand_matches("crack"),
            )?;
            cmd::crack::run(args, &config)
        }
        Commands::Encrypt(args) => cmd::encrypt::run(args),
        Commands::Detect(args) => {
            let config = resolve_config(
                &cli.config_file,
                &args.config,
                matches.subcommand_matches("detect"),
            )?;
            cmd::detect::run(args, &config)
        }
    }
}

fn main() {
    // Raw matches tell user input apart from defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}
