use std::fmt;

use crate::filter::Filter;
use crate::helper::Helper;

/// The ordered filters and helpers applied when rendering a page.
///
/// A layout is assembled by value and cannot be changed once it is borrowed or
/// shared:
///
/// ```rust
/// use std::sync::Arc;
/// use folio::{Layout, filter::Markdown, helper::Meta};
///
/// let layout = Arc::new(Layout::new().filter(Markdown::new()).helper(Meta));
/// assert_eq!(layout.filters().len(), 1);
/// ```
///
/// Since no method mutates a `&Layout`, any number of renders may read one
/// layout concurrently.
#[derive(Default)]
pub struct Layout {
    filters: Vec<Box<dyn Filter>>,
    helpers: Vec<Box<dyn Helper>>,
}

static EMPTY: Layout = Layout::new();

impl Layout {
    pub const fn new() -> Self {
        Layout { filters: Vec::new(), helpers: Vec::new() }
    }

    /// A layout with no filters and no helpers.
    pub fn empty() -> &'static Layout {
        &EMPTY
    }

    /// Appends `filter`. Filters run in the order they're appended.
    pub fn filter<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Appends `helper`. For each token, helpers are asked in the order
    /// they're appended; the first to accept the token supplies its value.
    pub fn helper<H: Helper + 'static>(mut self, helper: H) -> Self {
        self.helpers.push(Box::new(helper));
        self
    }

    pub fn filters(&self) -> &[Box<dyn Filter>] {
        &self.filters
    }

    pub fn helpers(&self) -> &[Box<dyn Helper>] {
        &self.helpers
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.helpers.is_empty()
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("filters", &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>())
            .field("helpers", &self.helpers.iter().map(|h| h.name()).collect::<Vec<_>>())
            .finish()
    }
}
