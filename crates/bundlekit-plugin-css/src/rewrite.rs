//! `token()` call rewriting over a parsed stylesheet.
//!
//! The visitor swaps every matching function node for a placeholder identifier
//! and records the theme value it stands for. Placeholders are substituted
//! after printing, so resolved values land in the output verbatim (a value
//! like `#fff` would otherwise be escaped as an identifier).
//!
//! A stylesheet with no token calls is returned as written unless minification
//! was asked for. Printing is done for the configured browser targets.

use std::convert::Infallible;
use std::path::Path;

use bundlekit_config::theme::{render_raw, value_by_path};
use lightningcss::properties::custom::{Token, TokenList, TokenOrValue};
use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, StyleSheet};
use lightningcss::targets::Targets;
use lightningcss::visit_types;
use lightningcss::visitor::{Visit, VisitTypes, Visitor};
use serde_json::Value;

use crate::config::StyleTokenOptions;

const PLACEHOLDER_PREFIX: &str = "__bundlekit_token_";

/// Parse `source`, resolve token calls against `theme` and print the result.
pub fn rewrite_css(
    path: &Path,
    source: &str,
    theme: Option<&Value>,
    options: &StyleTokenOptions,
) -> anyhow::Result<String> {
    let mut stylesheet = StyleSheet::parse(
        source,
        ParserOptions {
            filename: path.to_string_lossy().to_string(),
            ..Default::default()
        },
    )
    .map_err(|e| anyhow::anyhow!("Failed to parse CSS from {}: {}", path.display(), e))?;

    let mut rewriter = TokenRewriter {
        function: &options.function,
        theme,
        values: Vec::new(),
    };
    match stylesheet.visit(&mut rewriter) {
        Ok(()) => {}
        Err(never) => match never {},
    }

    if rewriter.values.is_empty() && !options.minify {
        return Ok(source.to_string());
    }

    let targets = Targets::from(options.targets);

    if options.minify {
        stylesheet
            .minify(MinifyOptions {
                targets,
                ..Default::default()
            })
            .map_err(|e| {
                anyhow::anyhow!("Failed to minify CSS from {}: {}", path.display(), e)
            })?;
    }

    let printed = stylesheet
        .to_css(PrinterOptions {
            minify: options.minify,
            targets,
            ..Default::default()
        })
        .map_err(|e| anyhow::anyhow!("Failed to print CSS from {}: {}", path.display(), e))?;

    Ok(rewriter.substitute(printed.code))
}

struct TokenRewriter<'a> {
    function: &'a str,
    theme: Option<&'a Value>,
    values: Vec<String>,
}

impl TokenRewriter<'_> {
    fn placeholder(index: usize) -> String {
        format!("{PLACEHOLDER_PREFIX}{index}__")
    }

    fn record(&mut self, path: Option<String>) -> String {
        let value = value_by_path(self.theme, path.as_deref().unwrap_or_default());
        self.values.push(render_raw(&value));
        Self::placeholder(self.values.len() - 1)
    }

    fn substitute(&self, mut code: String) -> String {
        for (index, value) in self.values.iter().enumerate() {
            code = code.replace(&Self::placeholder(index), value);
        }
        code
    }
}

impl<'i> Visitor<'i> for TokenRewriter<'_> {
    type Error = Infallible;

    fn visit_types(&self) -> VisitTypes {
        visit_types!(TOKENS)
    }

    fn visit_token_list(&mut self, tokens: &mut TokenList<'i>) -> Result<(), Self::Error> {
        // Nested calls first, e.g. `calc(token("space.2") * 2)`.
        tokens.visit_children(self)?;

        for token in tokens.0.iter_mut() {
            let TokenOrValue::Function(function) = token else {
                continue;
            };
            if &*function.name.0 != self.function {
                continue;
            }

            let placeholder = self.record(first_string_argument(&function.arguments));
            *token = TokenOrValue::Token(Token::Ident(placeholder.into()));
        }

        Ok(())
    }
}

/// The first argument when it is a quoted string; anything else counts as missing.
fn first_string_argument(arguments: &TokenList<'_>) -> Option<String> {
    let first = arguments
        .0
        .iter()
        .find(|t| !matches!(t, TokenOrValue::Token(Token::WhiteSpace(_))))?;

    match first {
        TokenOrValue::Token(Token::String(s)) => Some(s.to_string()),
        _ => None,
    }
}
