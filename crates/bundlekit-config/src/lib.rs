//! Configuration layer for bundlekit.
//!
//! Everything needed before a bundler can be invoked for one package:
//! discovering `package.json` + `build.config.*`, loading them, normalizing the
//! config export shape, and snapshotting the environment flags.

pub mod config;
pub mod discovery;
pub mod env;
pub mod error;
pub mod export;
pub mod flags;
pub mod loader;
pub mod package;
pub mod theme;

// Re-export main types
pub use config::*;
pub use discovery::{CONFIG_EXTENSIONS, CONFIG_STEM, DESCRIPTOR_FILE, ProjectDiscovery, ProjectFiles};
pub use env::BuildEnv;
pub use error::*;
pub use export::{ConfigExport, ConfigFactory, DeferredConfigFactory};
pub use flags::{is_false, is_true};
pub use loader::{ConfigFormat, ConfigLoader, FileConfigLoader};
pub use package::PackageDescriptor;
pub use theme::{render_raw, value_by_path};
