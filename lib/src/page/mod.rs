mod front_matter;

pub use front_matter::{split as split_front_matter, FrontMatter};

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::source::{FsLoader, Loader};

/// How the `input` given to [`Page::new()`] is interpreted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// The input is the page's body.
    String,
    /// The input is a path to a file holding the page's body.
    File,
}

/// Where a page's body came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    String,
    File(PathBuf),
}

impl Source {
    pub fn kind(&self) -> SourceKind {
        match self {
            Source::String => SourceKind::String,
            Source::File(_) => SourceKind::File,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Source::String => None,
            Source::File(path) => Some(path),
        }
    }
}

/// A unit of content: a body of markdown or template text, an optional name,
/// and the front matter read from the head of the body.
///
/// Front matter is not read on construction: [`Parser`](crate::Parser) calls
/// [`Page::extract_front_matter()`] before rendering, so a page can be built
/// and inspected without side effects.
#[derive(Debug, Clone)]
pub struct Page {
    name: Option<String>,
    body: String,
    source: Source,
    loaded: bool,
    front_matter: Option<FrontMatter>,
}

impl Page {
    /// Creates a page from `input` as directed by `kind`.
    ///
    /// With [`SourceKind::File`], `input` is a path that is read immediately;
    /// failure to read it is a [`Kind::SourceNotFound`] error.
    ///
    /// [`Kind::SourceNotFound`]: crate::error::Kind::SourceNotFound
    pub fn new<S: Into<String>>(input: S, kind: SourceKind) -> Result<Self> {
        match kind {
            SourceKind::String => Ok(Page::from(input.into())),
            SourceKind::File => Page::open(input.into()),
        }
    }

    /// Creates a page by reading the file at `path`.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        Page::open_with(path, &FsLoader)
    }

    /// Creates a page by reading the file at `path` with `loader`.
    pub fn open_with<P: Into<PathBuf>, L: Loader>(path: P, loader: &L) -> Result<Self> {
        let mut page = Page::deferred(path);
        page.load(loader)?;
        Ok(page)
    }

    /// Creates a page backed by the file at `path` without reading it. The
    /// file is read when the page is parsed; until then the body is empty.
    pub fn deferred<P: Into<PathBuf>>(path: P) -> Self {
        Page {
            name: None,
            body: String::new(),
            source: Source::File(path.into()),
            loaded: false,
            front_matter: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Replaces the body. The new body has not had its front matter read.
    pub fn set_body<S: Into<String>>(&mut self, body: S) -> &mut Self {
        self.body = body.into();
        self.loaded = true;
        self.front_matter = None;
        self
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Whether the body is present: always for string pages, after a
    /// successful load for file pages.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The page's front matter, or `None` if it has not yet been extracted.
    pub fn front_matter(&self) -> Option<&FrontMatter> {
        self.front_matter.as_ref()
    }

    /// The front matter value for `key`, if extracted and present.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.front_matter.as_ref()?.get(key)
    }

    /// Reads the body of a file-backed page with `loader` if it hasn't been
    /// read yet. A no-op for string pages and loaded pages.
    ///
    /// A freshly read body has not had its front matter read, even if
    /// [`Page::extract_front_matter()`] ran on the empty body before.
    pub fn load<L: Loader + ?Sized>(&mut self, loader: &L) -> Result<()> {
        if self.loaded {
            return Ok(());
        }

        if let Source::File(path) = &self.source {
            self.body = loader.load(path)?;
            self.front_matter = None;
            log::debug!("loaded page source from {}", path.display());
        }

        self.loaded = true;
        Ok(())
    }

    /// Moves a leading front matter block out of the body and into
    /// [`Page::front_matter()`]. Runs at most once per body: later calls
    /// return immediately.
    ///
    /// On error, the page is unchanged.
    pub fn extract_front_matter(&mut self) -> Result<()> {
        if self.front_matter.is_some() {
            return Ok(());
        }

        let (front_matter, body) = front_matter::split(&self.body)?;
        let consumed = self.body.len() - body.len();
        self.body.drain(..consumed);
        self.front_matter = Some(front_matter);
        Ok(())
    }
}

impl From<String> for Page {
    fn from(body: String) -> Self {
        Page {
            name: None,
            body,
            source: Source::String,
            loaded: true,
            front_matter: None,
        }
    }
}

impl From<&str> for Page {
    fn from(body: &str) -> Self {
        Page::from(body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;

    #[test]
    fn string_page_is_inspectable_before_parsing() {
        let page = Page::new("---\nname: x\n---\nBody", SourceKind::String).unwrap();
        assert_eq!(page.body(), "---\nname: x\n---\nBody");
        assert_eq!(page.front_matter(), None);
        assert_eq!(page.name(), None);
        assert_eq!(page.source().kind(), SourceKind::String);
        assert!(page.is_loaded());
    }

    #[test]
    fn string_that_looks_like_a_path() {
        let page = Page::new("tests/fixtures/plates/HelloWorld.md", SourceKind::String).unwrap();
        assert_eq!(page.body(), "tests/fixtures/plates/HelloWorld.md");
        assert_eq!(page.source(), &Source::String);
    }

    #[test]
    fn missing_file_fails_at_construction() {
        let error = Page::new("no/such/page.md", SourceKind::File).unwrap_err();
        assert_eq!(error.kind(), Kind::SourceNotFound);

        let error = Page::open("no/such/page.md").unwrap_err();
        assert_eq!(error.kind(), Kind::SourceNotFound);
    }

    #[test]
    fn deferred_page_fails_on_load() {
        let mut page = Page::deferred("no/such/page.md");
        assert!(!page.is_loaded());
        assert_eq!(page.body(), "");

        let error = page.load(&FsLoader).unwrap_err();
        assert_eq!(error.kind(), Kind::SourceNotFound);
        assert!(!page.is_loaded());
    }

    #[test]
    fn load_discards_extraction_of_empty_body() {
        #[derive(Debug)]
        struct Fixed;

        impl Loader for Fixed {
            fn load(&self, _: &Path) -> Result<String> {
                Ok("---\nname: Later\n---\nBody".into())
            }
        }

        let mut page = Page::deferred("later.md");
        page.extract_front_matter().unwrap();
        assert!(page.front_matter().unwrap().is_empty());

        page.load(&Fixed).unwrap();
        assert_eq!(page.front_matter(), None);

        page.extract_front_matter().unwrap();
        assert_eq!(page.body(), "Body");
        assert_eq!(page.meta("name"), Some("Later"));
    }

    #[test]
    fn extraction_moves_front_matter() {
        let mut page = Page::from("---\nname: Hello\n---\n# {NAME}");
        page.extract_front_matter().unwrap();
        assert_eq!(page.body(), "# {NAME}");
        assert_eq!(page.meta("name"), Some("Hello"));
        assert_eq!(page.name(), None);
    }

    #[test]
    fn extraction_runs_once() {
        // The body left after the first extraction opens with a delimiter too.
        let mut page = Page::from("---\na: 1\n---\n---\nb: 2\n---\nBody");
        page.extract_front_matter().unwrap();
        page.extract_front_matter().unwrap();
        assert_eq!(page.body(), "---\nb: 2\n---\nBody");
        assert_eq!(page.meta("a"), Some("1"));
        assert_eq!(page.meta("b"), None);
    }

    #[test]
    fn extraction_without_front_matter() {
        let mut page = Page::from("Plain body");
        page.extract_front_matter().unwrap();
        assert_eq!(page.body(), "Plain body");
        assert!(page.front_matter().unwrap().is_empty());
    }

    #[test]
    fn failed_extraction_leaves_page_untouched() {
        let source = "---\nname: Hello\nThis is a sample page.";
        let mut page = Page::from(source);
        let error = page.extract_front_matter().unwrap_err();
        assert_eq!(error.kind(), Kind::FrontMatterSyntax);
        assert_eq!(page.body(), source);
        assert_eq!(page.front_matter(), None);
    }

    #[test]
    fn set_body_resets_extraction() {
        let mut page = Page::from("---\na: 1\n---\nOne");
        page.extract_front_matter().unwrap();
        page.set_body("---\nb: 2\n---\nTwo");
        assert_eq!(page.front_matter(), None);

        page.extract_front_matter().unwrap();
        assert_eq!(page.body(), "Two");
        assert_eq!(page.meta("b"), Some("2"));
    }
}
