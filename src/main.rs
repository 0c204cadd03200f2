use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use mediagrab_lib::config::{config_path, get_config, save_config, Config};
use mediagrab_lib::extractor::{classify, classify_any, Platform};
use mediagrab_lib::logging::init_logging;

#[derive(Parser)]
#[command(name = "mediagrab", version, about = "Social media link inspector (demo server)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
    /// Classify a URL and print the result as JSON
    Classify {
        url: String,
        #[arg(long)]
        platform: Option<Platform>,
    },
    /// Print the effective configuration
    Config {
        /// Write the defaults to the config file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = get_config()?.with_env();
    init_logging(&config.log_filter);

    match cli.command {
        Command::Serve { bind } => {
            let mut config = config;
            if let Some(bind) = bind {
                config.bind_address = bind;
            }
            mediagrab_lib::serve(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Classify { url, platform } => {
            let result = match platform {
                Some(platform) => classify(&url, platform),
                None => classify_any(&url),
            };
            match result {
                Ok(classification) => {
                    println!("{}", serde_json::to_string_pretty(&classification)?);
                    if let Err(e) = classification.require_identifier() {
                        eprintln!("{}", e);
                        return Ok(ExitCode::FAILURE);
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Config { init } => {
            if init {
                let path = save_config(&Config::default())?;
                println!("wrote {}", path.display());
            } else {
                println!("# {}", config_path().display());
                print!("{}", serde_yaml::to_string(&config)?);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
