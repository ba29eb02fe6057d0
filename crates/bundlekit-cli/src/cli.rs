//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// Build JavaScript packages with their build.config
#[derive(Parser, Debug)]
#[command(
    name = "bundlekit",
    version,
    about = "Build each package directory in order",
    long_about = "Builds every given directory that contains a package.json and a\n\
                  build.config.{toml,json,yaml,yml}. Directories without both files are\n\
                  skipped. A failing directory never stops the remaining ones."
)]
pub struct Cli {
    /// Package directories, built in the order given
    #[arg(value_name = "DIR")]
    pub dirs: Vec<PathBuf>,
}
