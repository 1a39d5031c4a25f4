use std::collections::BTreeMap;

use crate::error::{Error, Kind, Result};
use crate::util::split_line;

const DELIMITER: &str = "---";

/// Key/value metadata read from the head of a page's source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: BTreeMap<String, String>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FrontMatter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut front_matter = FrontMatter::new();
        for (k, v) in iter {
            front_matter.insert(k, v);
        }

        front_matter
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    ScanningHeader,
    Body,
}

/// Splits `input` into its front matter and the remaining body.
///
/// When `input` does not open with a `---` line the whole input is the body
/// and the front matter is empty. Otherwise every line up to the closing `---`
/// must be blank or a `key: value` pair.
pub fn split(input: &str) -> Result<(FrontMatter, &str)> {
    let mut front_matter = FrontMatter::new();
    let mut state = State::ScanningHeader;
    let mut rest = Some(input);
    let mut line_num = 0;

    while let (State::ScanningHeader, Some(remaining)) = (state, rest) {
        let (line, next) = split_line(remaining);
        line_num += 1;

        if line_num == 1 {
            if line != DELIMITER {
                return Ok((front_matter, input));
            }
        } else if line == DELIMITER {
            state = State::Body;
        } else if !line.trim().is_empty() {
            let (key, value) = parse_pair(line, line_num)?;
            front_matter.insert(key, value);
        }

        rest = next;
    }

    match state {
        State::Body => Ok((front_matter, rest.unwrap_or(""))),
        State::ScanningHeader => Err(error!(
            "unterminated front matter",
            "opened on line" => 1,
            "expected closing delimiter" => DELIMITER,
        ).with_kind(Kind::FrontMatterSyntax)),
    }
}

fn parse_pair(line: &str, line_num: usize) -> Result<(&str, &str)> {
    let malformed = |reason: &str| -> Error {
        let error = error! {
            "malformed front matter line",
            "line" => line_num,
            "content" => line,
            "reason" => reason,
        };

        error.with_kind(Kind::FrontMatterSyntax)
    };

    let (key, value) = line.split_once(':')
        .ok_or_else(|| malformed("expected `key: value`"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(malformed("key is empty"));
    }

    Ok((key, unquote(value.trim())))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..(value.len() - 1)];
        }
    }

    value
}
