use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use derive_more::{Deref, From};
use rayon::prelude::*;

use crate::error::Result;
use crate::helper::{self, Helper, Name};
use crate::layout::Layout;
use crate::page::Page;
use crate::source::{FsLoader, Loader};

/// The output of a render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, From)]
pub struct Html(String);

impl Html {
    pub fn html(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl PartialEq<str> for Html {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Html {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Renders pages through a [`Layout`].
///
/// A parser keeps no state between renders; the only thing it holds is the
/// [`Loader`] used to read file-backed pages created with
/// [`Page::deferred()`].
#[derive(Debug, Clone)]
pub struct Parser {
    loader: Arc<dyn Loader>,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Parser::with_loader(FsLoader)
    }

    pub fn with_loader<L: Loader + 'static>(loader: L) -> Self {
        Parser { loader: Arc::new(loader) }
    }

    /// Renders `page` with `layout`, or with an empty layout if `None`.
    ///
    /// In order: loads the page's file if it's file-backed and unread,
    /// extracts its front matter, runs the layout's filters over the body in
    /// order, and finally substitutes `{TOKEN}` placeholders using the
    /// layout's helpers and then [`Name`]. Any error from any step, including
    /// those raised by filters and helpers, is returned as is.
    pub fn parse_page(&self, page: &mut Page, layout: Option<&Layout>) -> Result<Html> {
        let layout = layout.unwrap_or(Layout::empty());

        page.load(&*self.loader)?;
        page.extract_front_matter()?;

        let page: &Page = page;
        let body = self.run_filters(page, layout)?;
        let html = self.substitute(&body, page, layout)?;
        Ok(Html(html.into_owned()))
    }

    /// Renders every page in `pages` in parallel with one shared `layout`.
    /// The result for each page is at the page's index.
    pub fn parse_pages(&self, pages: &mut [Page], layout: Option<&Layout>) -> Vec<Result<Html>> {
        pages.par_iter_mut()
            .map(|page| self.parse_page(page, layout))
            .collect()
    }

    fn run_filters<'p>(&self, page: &'p Page, layout: &Layout) -> Result<Cow<'p, str>> {
        let mut current = Cow::Borrowed(page.body());
        for filter in layout.filters() {
            log::debug!("applying filter `{}` to {}", filter.name(), PageLabel(page));
            current = match current {
                Cow::Borrowed(input) => filter.apply(input, page)?,
                Cow::Owned(input) => {
                    let output = match filter.apply(&input, page)? {
                        Cow::Borrowed(s) if s.as_ptr() == input.as_ptr() && s.len() == input.len() => None,
                        output => Some(output.into_owned()),
                    };

                    Cow::Owned(output.unwrap_or(input))
                }
            };
        }

        Ok(current)
    }

    fn substitute<'b>(&self, body: &'b str, page: &Page, layout: &Layout) -> Result<Cow<'b, str>> {
        helper::substitute(body, |token| {
            for helper in layout.helpers() {
                if let Some(value) = helper.resolve(token, page)? {
                    return Ok(Some(value));
                }
            }

            Name.resolve(token, page)
        })
    }
}

struct PageLabel<'a>(&'a Page);

impl fmt::Display for PageLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0.source().path(), self.0.name()) {
            (Some(path), _) => write!(f, "{}", path.display()),
            (None, Some(name)) => write!(f, "page {name:?}"),
            (None, None) => write!(f, "unnamed page"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;
    use crate::filter::{self, Filter};

    static_assertions::assert_impl_all!(Parser: Send, Sync);

    /// Returns its input untouched.
    struct Identity;

    impl Filter for Identity {
        fn apply<'a>(&self, input: &'a str, _: &Page) -> Result<Cow<'a, str>> {
            Ok(Cow::Borrowed(input))
        }
    }

    #[test]
    fn empty_layout_substitutes_name() {
        let mut page = Page::from("# {NAME}\nThis is a sample page.");
        page.set_name("Hello world!");

        let html = Parser::new().parse_page(&mut page, None).unwrap();
        assert_eq!(html, "# Hello world!\nThis is a sample page.");
    }

    #[test]
    fn no_op_filters() {
        let layout = Layout::new()
            .filter(Identity)
            .filter(filter::from_fn(|s, _| Ok(format!("[{s}]"))))
            .filter(Identity);

        let html = Parser::new().parse_page(&mut Page::from("x"), Some(&layout)).unwrap();
        assert_eq!(html.html(), "[x]");
    }

    #[test]
    fn filters_see_front_matter() {
        let layout = Layout::new().filter(filter::from_fn(|s, page| {
            Ok(format!("{}: {s}", page.meta("layout").unwrap_or("none")))
        }));

        let mut page = Page::from("---\nlayout: post\n---\nBody");
        let html = Parser::new().parse_page(&mut page, Some(&layout)).unwrap();
        assert_eq!(html, "post: Body");
    }

    #[test]
    fn registered_helpers_take_priority_over_name() {
        let layout = Layout::new()
            .helper(helper::from_fn(|t, _| Ok((t == "NAME").then(|| "override".into()))));

        let mut page = Page::from("{NAME}");
        page.set_name("Name");
        let html = Parser::new().parse_page(&mut page, Some(&layout)).unwrap();
        assert_eq!(html, "override");
    }

    #[test]
    fn helpers_are_consulted_in_order() {
        let layout = Layout::new()
            .helper(helper::from_fn(|t, _| Ok((t == "A").then(|| "first".into()))))
            .helper(helper::from_fn(|t, _| Ok(Some(format!("second-{t}")))));

        let html = Parser::new().parse_page(&mut Page::from("{A} {B}"), Some(&layout)).unwrap();
        assert_eq!(html, "first second-B");
    }

    #[test]
    fn filter_errors_propagate_with_their_kind() {
        let layout = Layout::new()
            .filter(filter::from_fn(|_, _| Err(error!("boom").with_kind(Kind::SourceNotFound))));

        let error = Parser::new().parse_page(&mut Page::from("x"), Some(&layout)).unwrap_err();
        assert_eq!(error.kind(), Kind::SourceNotFound);
        assert!(error.to_string().contains("boom"));
    }

    #[test]
    fn helper_errors_propagate() {
        let layout = Layout::new().helper(helper::from_fn(|_, _| err!("helper failed")));
        let error = Parser::new().parse_page(&mut Page::from("{X}"), Some(&layout)).unwrap_err();
        assert!(error.to_string().contains("helper failed"));

        // A body without placeholders never consults helpers.
        let html = Parser::new().parse_page(&mut Page::from("plain"), Some(&layout)).unwrap();
        assert_eq!(html, "plain");
    }

    #[test]
    fn parsing_twice_is_stable() {
        let mut page = Page::from("---\nname: Twice\n---\n{NAME}");
        let parser = Parser::new();
        let first = parser.parse_page(&mut page, None).unwrap();
        let second = parser.parse_page(&mut page, None).unwrap();
        assert_eq!(first, "Twice");
        assert_eq!(first, second);
    }
}
