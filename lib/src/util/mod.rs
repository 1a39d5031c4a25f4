/// Convert spaces to hyphens. Remove characters that aren't alphanumerics,
/// underscores, or hyphens. Convert to lowercase. Also strip leading and
/// trailing whitespace.
pub fn slugify(string: &str) -> String {
    let mut output = String::with_capacity(string.len());

    let mut need_dash = false;
    for ch in string.chars() {
        let ascii = match deunicode::deunicode_char(ch) {
            Some(s) if !s.is_empty() && !ch.is_whitespace() => s,
            _ => "-",
        };

        for b in ascii.bytes() {
            match b {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' => {
                    if need_dash {
                        output.push('-');
                        need_dash = false;
                    }

                    output.push(b.to_ascii_lowercase() as char);
                }
                _ => need_dash = !output.is_empty(),
            }
        }
    }

    output
}

/// Splits `input` into its first line and the rest. The line excludes its
/// terminator (`\n` or `\r\n`); the rest begins after it. Returns `None` for
/// the rest when `input` has no newline.
pub fn split_line(input: &str) -> (&str, Option<&str>) {
    match memchr::memchr(b'\n', input.as_bytes()) {
        Some(i) => {
            let line = &input[..i];
            (line.strip_suffix('\r').unwrap_or(line), Some(&input[(i + 1)..]))
        }
        None => (input.strip_suffix('\r').unwrap_or(input), None),
    }
}
