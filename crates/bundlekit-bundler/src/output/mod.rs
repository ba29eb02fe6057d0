//! Writing generated bundles to disk.

pub mod writer;

pub use writer::{write_bundle, write_files};
