use pulldown_cmark_escape::escape_html;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::helper::Helper;
use crate::page::Page;
use crate::util::slugify;

/// Resolves `{NAME}` to the page's name, falling back to the `name` entry of
/// its front matter.
///
/// The parser consults `Name` after every helper in the layout, so `{NAME}`
/// resolves even with an empty layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct Name;

impl Name {
    fn of(page: &Page) -> Option<&str> {
        page.name().or_else(|| page.meta("name"))
    }
}

impl Helper for Name {
    fn resolve(&self, token: &str, page: &Page) -> Result<Option<String>> {
        match token {
            "NAME" => Ok(Name::of(page).map(String::from)),
            _ => Ok(None),
        }
    }

    fn name(&self) -> &str {
        "name"
    }
}

/// Resolves tokens from a fixed table.
#[derive(Debug, Default, Clone)]
pub struct Constants {
    values: FxHashMap<String, String>,
}

impl Constants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<K: Into<String>, V: Into<String>>(mut self, token: K, value: V) -> Self {
        self.values.insert(token.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Constants {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().fold(Constants::new(), |c, (k, v)| c.with(k, v))
    }
}

impl Helper for Constants {
    fn resolve(&self, token: &str, _: &Page) -> Result<Option<String>> {
        Ok(self.values.get(token).cloned())
    }

    fn name(&self) -> &str {
        "constants"
    }
}

/// Resolves a token from the page's front matter under the token's lowercase
/// name: `{TITLE}` is the `title` entry.
///
/// `{NAME}` is left to [`Name`], so an explicit page name still wins over a
/// front matter `name` entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct Meta;

impl Helper for Meta {
    fn resolve(&self, token: &str, page: &Page) -> Result<Option<String>> {
        if token == "NAME" || page.front_matter().map_or(true, |fm| fm.is_empty()) {
            return Ok(None);
        }

        Ok(page.meta(&token.to_ascii_lowercase()).map(String::from))
    }

    fn name(&self) -> &str {
        "meta"
    }
}

/// Resolves `{SLUG}` to a URL slug of the page's name, as resolved by
/// [`Name`]. A front matter `slug` entry is used as is.
#[derive(Debug, Default, Clone, Copy)]
pub struct Slug;

impl Helper for Slug {
    fn resolve(&self, token: &str, page: &Page) -> Result<Option<String>> {
        if token != "SLUG" {
            return Ok(None);
        }

        let slug = match page.meta("slug") {
            Some(slug) => Some(slug.to_string()),
            None => Name::of(page).map(slugify),
        };

        Ok(slug)
    }

    fn name(&self) -> &str {
        "slug"
    }
}

/// HTML-escapes the values resolved by the wrapped helper.
///
/// Helpers run after filters, so their values are inserted into the filtered
/// output verbatim. Wrap a helper whose values are plain text when that output
/// is HTML:
///
/// ```rust
/// use folio::{Layout, Page, Parser, helper::{Escaped, Name}};
///
/// let layout = Layout::new().helper(Escaped(Name));
/// let mut page = Page::from("<b>{NAME}</b>");
/// page.set_name("Tom & Jerry");
///
/// let html = Parser::new().parse_page(&mut page, Some(&layout)).unwrap();
/// assert_eq!(html, "<b>Tom &amp; Jerry</b>");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Escaped<H>(pub H);

impl<H: Helper> Helper for Escaped<H> {
    fn resolve(&self, token: &str, page: &Page) -> Result<Option<String>> {
        let Some(value) = self.0.resolve(token, page)? else {
            return Ok(None);
        };

        let mut html = String::with_capacity(value.len());
        escape_html(&mut html, &value).map_err(|_| error! {
            "failed to escape helper value",
            "helper" => self.0.name(),
            "token" => token,
        })?;

        Ok(Some(html))
    }

    fn name(&self) -> &str {
        self.0.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(source: &str) -> Page {
        let mut page = Page::from(source);
        page.extract_front_matter().unwrap();
        page
    }

    #[test]
    fn name_prefers_explicit_name() {
        let mut page = page("---\nname: From front matter\n---\n");
        assert_eq!(Name.resolve("NAME", &page).unwrap().as_deref(), Some("From front matter"));

        page.set_name("Explicit");
        assert_eq!(Name.resolve("NAME", &page).unwrap().as_deref(), Some("Explicit"));
        assert_eq!(Name.resolve("TITLE", &page).unwrap(), None);
    }

    #[test]
    fn name_without_any_name() {
        assert_eq!(Name.resolve("NAME", &page("Body")).unwrap(), None);
    }

    #[test]
    fn constants() {
        let constants: Constants = [("SITE", "Example"), ("YEAR", "2024")].into_iter().collect();
        assert_eq!(constants.len(), 2);

        let page = page("");
        assert_eq!(constants.resolve("SITE", &page).unwrap().as_deref(), Some("Example"));
        assert_eq!(constants.resolve("site", &page).unwrap(), None);
    }

    #[test]
    fn meta() {
        let page = page("---\ntitle: A Title\nauthor_name: Me\n---\n");
        assert_eq!(Meta.resolve("TITLE", &page).unwrap().as_deref(), Some("A Title"));
        assert_eq!(Meta.resolve("AUTHOR_NAME", &page).unwrap().as_deref(), Some("Me"));
        assert_eq!(Meta.resolve("DATE", &page).unwrap(), None);
        assert_eq!(Meta.resolve("TITLE", &Page::from("---\ntitle: x\n---\n")).unwrap(), None);
    }

    #[test]
    fn meta_leaves_name_to_name() {
        let mut page = page("---\nname: Front\n---\n");
        assert_eq!(Meta.resolve("NAME", &page).unwrap(), None);

        page.set_name("Explicit");
        assert_eq!(Name.resolve("NAME", &page).unwrap().as_deref(), Some("Explicit"));
        assert_eq!(Slug.resolve("SLUG", &page).unwrap().as_deref(), Some("explicit"));
    }

    #[test]
    fn escaped() {
        let mut page = page("");
        page.set_name("<Tom & \"Jerry\">");

        let value = Escaped(Name).resolve("NAME", &page).unwrap();
        assert_eq!(value.as_deref(), Some("&lt;Tom &amp; &quot;Jerry&quot;&gt;"));
        assert_eq!(Escaped(Name).resolve("TITLE", &page).unwrap(), None);
        assert_eq!(Escaped(Name).name(), "name");
    }

    #[test]
    fn slug() {
        let mut page = page("Body");
        assert_eq!(Slug.resolve("SLUG", &page).unwrap(), None);

        page.set_name("Hello world!");
        assert_eq!(Slug.resolve("SLUG", &page).unwrap().as_deref(), Some("hello-world"));
        assert_eq!(Slug.resolve("NAME", &page).unwrap(), None);

        let page = self::page("---\nname: Ignored\nslug: custom-slug\n---\n");
        assert_eq!(Slug.resolve("SLUG", &page).unwrap().as_deref(), Some("custom-slug"));
    }
}
