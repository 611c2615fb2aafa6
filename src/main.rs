use std::time::Duration;

use clap::Parser;
use lingoclip_lib::{bootstrap, cli::Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(bootstrap::run::run(cli));
    runtime.shutdown_timeout(Duration::from_millis(500));
    result
}
