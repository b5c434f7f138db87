// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "insight",
    about = "Terminal client for the Insights retrieval Q&A service",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file (overrides auto-discovery)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. "http://localhost:5000"
    #[arg(long, env = "INSIGHT_BASE_URL")]
    pub base_url: Option<String>,

    /// User id attached to queries and feedback
    #[arg(long, short = 'u', env = "INSIGHT_USER")]
    pub user: Option<String>,

    /// Draw with plain ASCII characters instead of unicode glyphs
    #[arg(long)]
    pub ascii: bool,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the effective configuration and exit
    ShowConfig,
}
