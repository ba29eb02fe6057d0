//! Style token plugin configuration

use lightningcss::targets::Browsers;

/// Function name rewritten by default: `token("colors.primary")`.
pub const DEFAULT_TOKEN_FUNCTION: &str = "token";

/// Lowest browser versions reprinted CSS must keep working in.
pub fn baseline_browsers() -> Browsers {
    let version = |major: u32| Some(major << 16);
    Browsers {
        chrome: version(80),
        edge: version(80),
        firefox: version(78),
        safari: version(13),
        ios_saf: version(13),
        ..Browsers::default()
    }
}

/// Configuration options for the style token plugin
#[derive(Debug, Clone)]
pub struct StyleTokenOptions {
    /// Name of the CSS function whose calls are replaced by theme values
    pub function: String,

    /// Minify the stylesheet after rewriting
    pub minify: bool,

    /// Browser targets used when a stylesheet is reprinted
    pub targets: Browsers,
}

impl Default for StyleTokenOptions {
    fn default() -> Self {
        Self {
            function: DEFAULT_TOKEN_FUNCTION.to_string(),
            minify: false,
            targets: baseline_browsers(),
        }
    }
}

impl StyleTokenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_function(mut self, name: impl Into<String>) -> Self {
        self.function = name.into();
        self
    }

    pub fn with_minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    pub fn with_targets(mut self, targets: Browsers) -> Self {
        self.targets = targets;
        self
    }
}
