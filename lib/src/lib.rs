#![doc = svgbobdoc::transform!(
//! Turn pages of markdown and front matter into HTML.
//!
//! # Overview
//!
//! Folio renders a [`Page`] by running it through a pipeline described by a
//! [`Layout`]:
//!
//! ```svgbob
//!  +------+     +--------------+     +----------+     +---------+     +------+
//!  | Page |---->| front matter |---->| filter 1 |-...->| helpers |---->| Html |
//!  +------+     +--------------+     +----------+     +---------+     +------+
//! ```
//!
//! 1. A file-backed page is read, if it hasn't been already.
//! 2. A leading `---` delimited block of `key: value` lines is moved out of the
//!    body and into the page's [`FrontMatter`].
//! 3. Each [`Filter`] in the layout transforms the body, in registration
//!    order. [`filter::Markdown`] turns markdown into HTML.
//! 4. Every `{TOKEN}` placeholder is replaced by the first [`Helper`] in the
//!    layout that accepts it, then by [`helper::Name`], which resolves
//!    `{NAME}` to the page's name. Placeholders no helper accepts are left
//!    as written.
//!
//! ```rust
//! use folio::{Layout, Page, Parser, filter::Markdown};
//!
//! let layout = Layout::new().filter(Markdown::new());
//!
//! let mut page = Page::from("# {NAME}\nThis is a sample page.");
//! page.set_name("Hello world!");
//!
//! let html = Parser::new().parse_page(&mut page, Some(&layout)).unwrap();
//! assert_eq!(html, "<h1>Hello world!</h1>\n<p>This is a sample page.</p>\n");
//! ```
//!
//! A [`Layout`] can't be modified once it's shared, so one layout can serve
//! any number of concurrent renders; see [`Parser::parse_pages()`].
)]

#[macro_use]
pub mod error;
pub mod util;
pub mod source;
pub mod page;
pub mod filter;
pub mod helper;
pub mod layout;
pub mod parser;
pub mod config;

pub use page::{Page, FrontMatter, Source, SourceKind};
pub use filter::Filter;
pub use helper::Helper;
pub use layout::Layout;
pub use parser::{Html, Parser};
pub use source::{FsLoader, Loader};

pub use rayon;
