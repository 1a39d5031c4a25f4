use std::borrow::Cow;

use pulldown_cmark::{html, Options, Parser};

use crate::error::Result;
use crate::filter::Filter;
use crate::page::Page;

/// Renders markdown as HTML.
///
/// Heading attribute syntax (`# Title {#id}`) is not enabled: a placeholder
/// at the end of a heading, as in `# {NAME}`, must reach the helper pass.
#[derive(Debug, Clone, Copy)]
pub struct Markdown {
    options: Options,
}

impl Markdown {
    pub fn new() -> Self {
        Markdown {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

impl Default for Markdown {
    fn default() -> Self {
        Markdown::new()
    }
}

impl Filter for Markdown {
    fn apply<'a>(&self, input: &'a str, _: &Page) -> Result<Cow<'a, str>> {
        let mut html_output = String::with_capacity(input.len() + input.len() / 2);
        html::push_html(&mut html_output, Parser::new_ext(input, self.options));
        Ok(Cow::Owned(html_output))
    }

    fn name(&self) -> &str {
        "markdown"
    }
}
