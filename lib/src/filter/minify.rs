use std::borrow::Cow;

use crate::error::{Chainable, Result};
use crate::filter::Filter;
use crate::page::Page;

/// Minifies HTML, including inline CSS and JavaScript.
#[derive(Debug, Clone, Copy)]
pub struct Minify {
    keep_comments: bool,
}

impl Minify {
    pub fn new() -> Self {
        Minify { keep_comments: false }
    }

    pub fn keep_comments(mut self, keep: bool) -> Self {
        self.keep_comments = keep;
        self
    }

    fn cfg(&self) -> minify_html::Cfg {
        let mut cfg = minify_html::Cfg::new();
        cfg.keep_closing_tags = true;
        cfg.keep_html_and_head_opening_tags = true;
        cfg.keep_comments = self.keep_comments;
        cfg.minify_css = true;
        cfg.minify_js = true;
        cfg.remove_bangs = true;
        cfg.remove_processing_instructions = true;
        cfg
    }
}

impl Default for Minify {
    fn default() -> Self {
        Minify::new()
    }
}

impl Filter for Minify {
    fn apply<'a>(&self, input: &'a str, _: &Page) -> Result<Cow<'a, str>> {
        if input.is_empty() {
            return Ok(Cow::Borrowed(input));
        }

        let minified = minify_html::minify(input.as_bytes(), &self.cfg());
        let string = String::from_utf8(minified)
            .chain(error!("minified HTML is not valid UTF-8"))?;

        Ok(Cow::Owned(string))
    }

    fn name(&self) -> &str {
        "minify"
    }
}
