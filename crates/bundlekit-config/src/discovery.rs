//! Locating the two files that make a directory a buildable package.

use std::path::{Path, PathBuf};

/// Package descriptor file name.
pub const DESCRIPTOR_FILE: &str = "package.json";

/// Build configuration file stem; the extension selects the format.
pub const CONFIG_STEM: &str = "build.config";

/// Config extensions in lookup order.
pub const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "json", "yaml", "yml"];

/// Paths of a discovered package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFiles {
    pub dir: PathBuf,
    pub descriptor: PathBuf,
    pub config: PathBuf,
}

/// Finds the package descriptor and build configuration in one directory.
///
/// # Example
///
/// ```no_run
/// use bundlekit_config::ProjectDiscovery;
///
/// match ProjectDiscovery::new("packages/ui").find() {
///     Some(files) => println!("config at {}", files.config.display()),
///     None => println!("not a package"),
/// }
/// ```
pub struct ProjectDiscovery {
    dir: PathBuf,
}

impl ProjectDiscovery {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Both files must exist; a directory missing either one is not a package.
    pub fn find(&self) -> Option<ProjectFiles> {
        let descriptor = self.dir.join(DESCRIPTOR_FILE);
        if !descriptor.is_file() {
            return None;
        }

        let config = self.find_config()?;

        Some(ProjectFiles {
            dir: self.dir.clone(),
            descriptor,
            config,
        })
    }

    fn find_config(&self) -> Option<PathBuf> {
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{CONFIG_STEM}.{ext}")))
            .find(|path| path.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn none_when_empty() {
        let dir = TempDir::new().unwrap();
        assert!(ProjectDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn none_without_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name":"a"}"#).unwrap();
        assert!(ProjectDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn none_without_descriptor() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("build.config.toml"), "").unwrap();
        assert!(ProjectDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn prefers_toml_over_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name":"a"}"#).unwrap();
        fs::write(dir.path().join("build.config.json"), "{}").unwrap();
        fs::write(dir.path().join("build.config.toml"), "").unwrap();

        let files = ProjectDiscovery::new(dir.path()).find().unwrap();
        assert_eq!(files.config, dir.path().join("build.config.toml"));
        assert_eq!(files.descriptor, dir.path().join("package.json"));
    }

    #[test]
    fn finds_yml_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name":"a"}"#).unwrap();
        fs::write(dir.path().join("build.config.yml"), "minify: true").unwrap();

        let files = ProjectDiscovery::new(dir.path()).find().unwrap();
        assert_eq!(files.config, dir.path().join("build.config.yml"));
    }
}
