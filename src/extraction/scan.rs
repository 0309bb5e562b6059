//! Offset-level scanning helpers: line lookup, delimiter matching and body
//! extent detection. All offsets are byte offsets into the file text; the
//! delimiters scanned for are ASCII, so they never split a UTF-8 sequence.

use crate::languages::CommentSyntax;

/// Maps byte offsets to 1-based line numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }
}

/// Index just past the string literal or comment starting at `i`, or `i`
/// itself when neither starts there.
pub(crate) fn skip_trivia(bytes: &[u8], i: usize, syntax: CommentSyntax) -> usize {
    match (bytes[i], bytes.get(i + 1).copied(), syntax) {
        (b'"' | b'\'' | b'`', _, _) => skip_string(bytes, i),
        (b'/', Some(b'/'), CommentSyntax::CFamily) | (b'#', _, CommentSyntax::Hash) => {
            skip_line(bytes, i)
        }
        (b'/', Some(b'*'), CommentSyntax::CFamily) => find_from(bytes, i + 2, b"*/")
            .map(|end| end + 2)
            .unwrap_or(bytes.len()),
        _ => i,
    }
}

fn skip_line(bytes: &[u8], i: usize) -> usize {
    bytes[i..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|p| i + p)
        .unwrap_or(bytes.len())
}

fn find_from(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| from + p)
}

/// Skip a quoted literal. Backticks (raw/template strings) and C# verbatim
/// strings (`@"..."`) take no backslash escapes; ordinary quotes stop at the
/// end of the line when unterminated.
fn skip_string(bytes: &[u8], i: usize) -> usize {
    let quote = bytes[i];
    let verbatim = quote == b'"' && i > 0 && bytes[i - 1] == b'@';
    let raw = quote == b'`';
    let mut j = i + 1;

    while j < bytes.len() {
        let b = bytes[j];
        if b == b'\\' && !verbatim && !raw {
            j += 2;
            continue;
        }
        if b == quote {
            if verbatim && bytes.get(j + 1) == Some(&b'"') {
                j += 2;
                continue;
            }
            return j + 1;
        }
        if b == b'\n' && !verbatim && !raw {
            return j;
        }
        j += 1;
    }

    bytes.len()
}

/// Offset of the `}` closing the first body opened at or after `start`.
///
/// Returns `None` when a `;` at parenthesis depth zero precedes the first `{`
/// (a declaration without a body) or when the text ends before the body
/// closes. Braces inside parentheses before the body (`interface{}` parameter
/// types, default object arguments) do not open it.
pub fn brace_body_end(text: &str, start: usize, syntax: CommentSyntax) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut parens = 0usize;
    let mut opened = false;
    let mut i = start;

    while i < bytes.len() {
        let next = skip_trivia(bytes, i, syntax);
        if next != i {
            i = next;
            continue;
        }

        match bytes[i] {
            b'(' if !opened => parens += 1,
            b')' if !opened => parens = parens.saturating_sub(1),
            b';' if !opened && parens == 0 => return None,
            b'{' if opened || parens == 0 => {
                depth += 1;
                opened = true;
            }
            b'}' if opened => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Offset of the `)` matching the `(` at `open`.
pub fn matching_paren(text: &str, open: usize, syntax: CommentSyntax) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        let next = skip_trivia(bytes, i, syntax);
        if next != i {
            i = next;
            continue;
        }

        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// End offset (exclusive) of an indentation-delimited block.
///
/// `start` is the beginning of the header line, `header_end` any offset on
/// the last header line. The block runs through the last following line
/// indented deeper than the header; blank and `#` lines neither end nor
/// extend it.
pub fn indented_body_end(text: &str, start: usize, header_end: usize) -> usize {
    let base_indent = indent_width(&text[start..]);
    let line_end_from =
        |from: usize| text[from..].find('\n').map(|p| from + p).unwrap_or(text.len());

    let mut end = line_end_from(header_end.min(text.len()));
    let mut pos = end;

    while pos < text.len() {
        let line_start = pos + 1;
        let line_end = line_end_from(line_start.min(text.len()));
        let line = &text[line_start.min(text.len())..line_end];
        let trimmed = line.trim();

        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            if indent_width(line) <= base_indent {
                break;
            }
            end = line_end;
        }
        pos = line_end;
    }

    end
}
