mod cli;
mod commands;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Command};
use lingo_core::Lingo;
use settings::{FileConfig, client_config, resolve_jwt};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; RUST_LOG overrides the warn default
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lingo=warn,lingo_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let file_config = FileConfig::resolve(args.config.as_deref())?;
    let jwt = resolve_jwt(args.jwt.as_deref(), &file_config)?;
    let config = client_config(args.api_base.as_deref(), args.timeout, &file_config);

    eprintln!("Logging in...");
    let mut lingo = Lingo::connect(jwt, config).context("Failed to log in")?;

    let json = args.json;
    match args.command {
        Command::User => commands::profile::user(&lingo, json),
        Command::Streak => commands::profile::streak(&lingo, json),
        Command::Languages { abbreviations } => {
            commands::profile::languages(&lingo, abbreviations, json)
        }
        Command::Progress { abbr } => commands::profile::progress(&mut lingo, &abbr, json),
        Command::Topics { abbr, filter } => {
            commands::topics::topics(&mut lingo, &abbr, filter, json)
        }
        Command::Words { abbr } => commands::topics::words(&mut lingo, &abbr, json),
        Command::Skills { abbr } => commands::topics::skills(&mut lingo, &abbr, json),
        Command::Vocabulary { abbr, source } => {
            commands::vocabulary::run(&mut lingo, abbr.as_deref(), source.as_deref(), json)
        }
        Command::Daily => commands::daily::run(&lingo, json),
        Command::Friends => commands::friends::run(&lingo, json),
    }
}
