//! Text transformations applied to a page's body, in order.

mod markdown;
#[cfg(feature = "minify")]
mod minify;

pub use markdown::Markdown;
#[cfg(feature = "minify")]
pub use minify::Minify;

use std::borrow::Cow;
use std::sync::Arc;

use crate::error::Result;
use crate::page::Page;

/// A transformation of a page's body.
///
/// A filter receives the output of the previous filter in its
/// [`Layout`](crate::Layout) and the page being rendered. It must not depend
/// on anything but its inputs: the same input and page produce the same
/// output. Returning `input` unchanged, as `Cow::Borrowed`, is a valid no-op.
pub trait Filter: Send + Sync {
    fn apply<'a>(&self, input: &'a str, page: &Page) -> Result<Cow<'a, str>>;

    /// A name for this filter used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A [`Filter`] backed by a function or closure. See [`from_fn()`].
#[derive(Clone, Copy)]
pub struct FromFn<F>(F);

/// Creates a [`Filter`] from `f`.
///
/// ```rust
/// use folio::{filter, Layout};
///
/// let layout = Layout::new()
///     .filter(filter::from_fn(|body, _| Ok(body.trim().to_string())));
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
    where F: Fn(&str, &Page) -> Result<String> + Send + Sync
{
    FromFn(f)
}

impl<F> Filter for FromFn<F>
    where F: Fn(&str, &Page) -> Result<String> + Send + Sync
{
    fn apply<'a>(&self, input: &'a str, page: &Page) -> Result<Cow<'a, str>> {
        (self.0)(input, page).map(Cow::Owned)
    }
}

impl<T: Filter + ?Sized> Filter for Box<T> {
    fn apply<'a>(&self, input: &'a str, page: &Page) -> Result<Cow<'a, str>> {
        T::apply(self, input, page)
    }

    fn name(&self) -> &str {
        T::name(self)
    }
}

impl<T: Filter + ?Sized> Filter for Arc<T> {
    fn apply<'a>(&self, input: &'a str, page: &Page) -> Result<Cow<'a, str>> {
        T::apply(self, input, page)
    }

    fn name(&self) -> &str {
        T::name(self)
    }
}
