//! envconf: configuration inspector CLI
//!
//! Resolves dotted property keys against application property files and
//! environment variables, with typed coercion and defaulting.

mod cli;

use anyhow::Result;
use clap::Parser;
use std::process;

use cli::{Cli, Commands};
use envconf::{coerce, logger, Config, Kind};

fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::init(cli.debug)?;

    let mut builder = Config::builder()
        .base_dir(&cli.dir)
        .env(!cli.no_env);
    for file in &cli.file {
        builder = builder.file(file);
    }

    match cli.command {
        Commands::Get { key, r#type, default } => {
            let config = builder.load()?;
            match config.get(&key, &r#type)? {
                Some(value) => println!("{}", value),
                None => match default {
                    Some(default) => {
                        // The default goes through the same coercion as a
                        // stored value would
                        let kind = Kind::from_name(&r#type)?;
                        println!("{}", coerce(&key, &default, kind)?);
                    }
                    None => {
                        if !cli.quiet {
                            eprintln!("Property '{}' not found.", key);
                        }
                        process::exit(1);
                    }
                },
            }
        }
        Commands::List { prefix } => {
            let config = builder.load()?;
            for (key, values) in config.iter() {
                if let Some(prefix) = &prefix {
                    if !key.starts_with(prefix.as_str()) {
                        continue;
                    }
                }
                match values {
                    [single] => println!("{} = {}", key, single),
                    many => println!("{} = [{}]", key, many.join(", ")),
                }
            }
        }
        Commands::Sources => {
            let config = builder.load()?;
            if config.loaded_files().is_empty() && !cli.quiet {
                eprintln!("No configuration files loaded.");
            }
            for path in config.loaded_files() {
                println!("{}", path.display());
            }
        }
        Commands::Check => {
            builder.load()?;
            if !cli.quiet {
                eprintln!("Configuration is valid.");
            }
        }
        Commands::Version => {
            println!("envconf {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
