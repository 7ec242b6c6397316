//! CLI Adapter
//!
//! Command-line flags for the rugscope server. Flags override the
//! environment.

use std::path::PathBuf;

use clap::Parser;

/// rugscope - token risk inspection API for EVM chains and Solana
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "rugscope",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Token risk inspection API for EVM chains and Solana",
    long_about = "rugscope serves /analyze, /graph and /jeeter over HTTP, combining on-chain \
                  reads with explorer and DEX listings into one risk payload per token."
)]
pub struct CliApp {
    /// Port to listen on (overrides PORT)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Chain registry file (overrides CHAINS_FILE)
    #[arg(long, value_name = "FILE")]
    pub chains: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl CliApp {
    /// Log filter used when RUST_LOG is unset
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "rugscope=debug,tower_http=debug,info"
        } else if self.verbose {
            "rugscope=debug,info"
        } else {
            "info"
        }
    }
}

/// Parse process arguments
pub fn init() -> CliApp {
    CliApp::parse()
}
