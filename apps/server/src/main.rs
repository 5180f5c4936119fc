use anyhow::Context;
use clap::Parser;
use relay_domain::config::RelayConfig;
use relay_kernel::config::load_config;
use relay_logger::Logger;
use relay_server::Server;
use relay_server::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let cfg: RelayConfig =
        load_config(args.config.as_deref()).context("Critical: Configuration is malformed")?;

    let _log = Logger::builder(env!("CARGO_PKG_NAME")).apply(&cfg.log).init()?;

    let mut builder = Server::builder().config(cfg);
    if let Some(port) = args.port {
        builder = builder.port(port);
    }

    builder.build()?.run().await
}
