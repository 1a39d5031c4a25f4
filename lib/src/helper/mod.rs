//! Resolvers for `{TOKEN}` placeholders in rendered text.

mod token;
mod builtin;

pub use token::{substitute, Token, Tokens};
pub use builtin::{Constants, Escaped, Meta, Name, Slug};

use std::sync::Arc;

use crate::error::Result;
use crate::page::Page;

/// A source of replacement text for placeholder tokens.
///
/// `token` is the placeholder's name without braces: `NAME` for `{NAME}`.
/// Returning `Ok(None)` declines the token so that the next helper in the
/// [`Layout`](crate::Layout) is consulted. A token no helper accepts is left
/// in the output as written.
///
/// Values are inserted as is, after every filter has run; they are not
/// escaped for HTML. Wrap a helper in [`Escaped`] to escape its values.
pub trait Helper: Send + Sync {
    fn resolve(&self, token: &str, page: &Page) -> Result<Option<String>>;

    /// A name for this helper used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A [`Helper`] backed by a function or closure. See [`from_fn()`].
#[derive(Clone, Copy)]
pub struct FromFn<F>(F);

/// Creates a [`Helper`] from `f`.
///
/// ```rust
/// use folio::{helper, Layout};
///
/// let layout = Layout::new().helper(helper::from_fn(|token, _| {
///     Ok((token == "YEAR").then(|| "2024".to_string()))
/// }));
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
    where F: Fn(&str, &Page) -> Result<Option<String>> + Send + Sync
{
    FromFn(f)
}

impl<F> Helper for FromFn<F>
    where F: Fn(&str, &Page) -> Result<Option<String>> + Send + Sync
{
    fn resolve(&self, token: &str, page: &Page) -> Result<Option<String>> {
        (self.0)(token, page)
    }
}

impl<T: Helper + ?Sized> Helper for Box<T> {
    fn resolve(&self, token: &str, page: &Page) -> Result<Option<String>> {
        T::resolve(self, token, page)
    }

    fn name(&self) -> &str {
        T::name(self)
    }
}

impl<T: Helper + ?Sized> Helper for Arc<T> {
    fn resolve(&self, token: &str, page: &Page) -> Result<Option<String>> {
        T::resolve(self, token, page)
    }

    fn name(&self) -> &str {
        T::name(self)
    }
}
