use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Chainable, Result};
use crate::filter::Markdown;
use crate::helper::{Constants, Meta, Slug};
use crate::layout::Layout;

/// Layout settings, usually read from a TOML file:
///
/// ```toml
/// markdown = true
/// minify = false
/// meta = true
/// slug = true
///
/// [constants]
/// SITE = "Example"
/// ```
///
/// Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Render bodies as markdown.
    pub markdown: bool,
    /// Minify the rendered HTML.
    pub minify: bool,
    /// Resolve `{KEY}` from front matter entries.
    pub meta: bool,
    /// Resolve `{SLUG}`.
    pub slug: bool,
    /// Fixed placeholder values.
    pub constants: FxHashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            markdown: true,
            minify: false,
            meta: true,
            slug: true,
            constants: FxHashMap::default(),
        }
    }
}

impl Settings {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let string = fs::read_to_string(path).chain_with(|| error! {
            "failed to read configuration file",
            "file path" => path.display(),
        })?;

        Settings::parse(&string).chain_with(|| error! {
            "invalid configuration file",
            "file path" => path.display(),
        })
    }

    pub fn parse(string: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(string)?;
        for token in settings.constants.keys() {
            let valid = !token.is_empty()
                && token.bytes().all(|b| b.is_ascii_uppercase() || b == b'_');

            if !valid {
                return err! {
                    "constant name is not a placeholder token",
                    "name" => token,
                    "expected" => "one or more of `A-Z` or `_`",
                };
            }
        }

        Ok(settings)
    }

    /// Builds the layout these settings describe. Filters: markdown, then
    /// minify. Helpers: constants, then front matter, then slug.
    pub fn layout(&self) -> Result<Layout> {
        let mut layout = Layout::new();
        if self.markdown {
            layout = layout.filter(Markdown::new());
        }

        if self.minify {
            #[cfg(feature = "minify")] {
                layout = layout.filter(crate::filter::Minify::new());
            }

            #[cfg(not(feature = "minify"))] {
                return err!("minification requested but the `minify` feature is disabled");
            }
        }

        if !self.constants.is_empty() {
            layout = layout.helper(self.constants.iter().collect::<Constants>());
        }

        if self.meta {
            layout = layout.helper(Meta);
        }

        if self.slug {
            layout = layout.helper(Slug);
        }

        Ok(layout)
    }
}
