use std::borrow::Cow;

use crate::error::Result;

/// A `{TOKEN}` placeholder found in some text.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// The name between the braces.
    pub name: &'a str,
    /// Byte offset of the opening brace.
    pub start: usize,
    /// Byte offset one past the closing brace.
    pub end: usize,
}

/// An iterator over the placeholders in a string, left to right.
///
/// A placeholder is `{`, one or more of `A-Z` or `_`, then `}`. Anything else
/// between braces is ordinary text.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokens { input, pos: 0 }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.input.as_bytes();
        while let Some(i) = memchr::memchr(b'{', &bytes[self.pos..]) {
            let start = self.pos + i;
            let name_len = bytes[(start + 1)..].iter()
                .take_while(|b| b.is_ascii_uppercase() || **b == b'_')
                .count();

            let close = start + 1 + name_len;
            if name_len == 0 || bytes.get(close) != Some(&b'}') {
                self.pos = start + 1;
                continue;
            }

            self.pos = close + 1;
            return Some(Token {
                name: &self.input[(start + 1)..close],
                start,
                end: close + 1,
            });
        }

        self.pos = bytes.len();
        None
    }
}

/// Replaces every placeholder in `input` for which `resolve` returns `Some`.
///
/// Replacements are not scanned again, so a value containing `{TOKEN}` text
/// appears verbatim. Placeholders `resolve` declines are kept as written. If
/// nothing is replaced, `input` is returned as is.
pub fn substitute<'a, F>(input: &'a str, mut resolve: F) -> Result<Cow<'a, str>>
    where F: FnMut(&str) -> Result<Option<String>>
{
    let mut output: Option<String> = None;
    let mut copied = 0;
    for token in Tokens::new(input) {
        let Some(value) = resolve(token.name)? else {
            log::trace!("leaving unresolved placeholder {{{}}}", token.name);
            continue;
        };

        let buf = output.get_or_insert_with(|| String::with_capacity(input.len()));
        buf.push_str(&input[copied..token.start]);
        buf.push_str(&value);
        copied = token.end;
    }

    match output {
        Some(mut buf) => {
            buf.push_str(&input[copied..]);
            Ok(Cow::Owned(buf))
        }
        None => Ok(Cow::Borrowed(input)),
    }
}
