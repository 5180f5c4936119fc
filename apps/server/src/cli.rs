use clap::Parser;
use std::path::PathBuf;

/// Command-line overrides applied on top of the layered configuration.
#[derive(Debug, Parser)]
#[command(name = "relay-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "HTTP relay resolving archive gallery downloads")]
pub struct Cli {
    /// Configuration file. Defaults to `relay.toml` in the working directory, if present.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Listening port, overrides `server.port`.
    #[arg(short, long)]
    pub port: Option<u16>,
}
