//! CLI argument definitions for lingo.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lingo_core::TopicFilter;

#[derive(Parser)]
#[command(name = "lingo")]
#[command(about = "Read-only access to your language-learning progress", version)]
pub struct Args {
    /// Session JWT (taken from the `jwt_token` browser cookie)
    #[arg(long, env = "LINGO_JWT", hide_env_values = true)]
    pub jwt: Option<String>,

    /// API base URL
    #[arg(long, env = "LINGO_API_BASE")]
    pub api_base: Option<String>,

    /// Config file (default: <config dir>/lingo/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show profile information
    User,
    /// Show streak information
    Streak,
    /// List languages being learned
    Languages {
        /// Print abbreviations instead of names
        #[arg(long)]
        abbreviations: bool,
    },
    /// Show progress in a language
    Progress {
        /// Language abbreviation (e.g. fr)
        abbr: String,
    },
    /// List topics of a language
    Topics {
        /// Language abbreviation
        abbr: String,
        /// known, unknown, golden or reviewable
        #[arg(long, default_value = "known")]
        filter: TopicFilter,
    },
    /// List words of learned topics
    Words {
        /// Language abbreviation
        abbr: String,
    },
    /// Show skill dependency orders
    Skills {
        /// Language abbreviation
        abbr: String,
    },
    /// Fetch the full learned vocabulary
    Vocabulary {
        /// Language abbreviation (default: current learning language)
        abbr: Option<String>,
        /// Source language abbreviation (default: UI language)
        #[arg(long)]
        source: Option<String>,
    },
    /// Show today's XP
    Daily,
    /// List followed users
    Friends,
}
