//! bundlekit - per-package build driver.

use bundlekit_cli::{cli, logger, ui};
use clap::Parser;

#[tokio::main]
async fn main() {
    let args = cli::Cli::parse();

    logger::init_logger();
    ui::init_colors();

    // Per-directory failures are already reported; exit status stays 0.
    bundlekit_cli::run(args).await;
}
