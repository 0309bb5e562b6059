//! Parsing of the pieces of a matched signature: parameter names, declared
//! return types, class heritage lists and variable type annotations.

use crate::core::TypeAnnotation;
use crate::languages::{is_reserved_word, HeritageStyle, LanguageRules, ParamStyle, ReturnStyle};
use once_cell::sync::Lazy;
use regex::Regex;

static EXTENDS_IMPLEMENTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\bextends\s+(?P<ext>.*?)(?:\bimplements\s+(?P<imp>.*))?$")
        .expect("valid extends pattern")
});
static IMPLEMENTS_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\bimplements\s+(?P<imp>.*)$").expect("valid implements pattern"));

const INFERRED_KEYWORDS: &[&str] = &["var", "let", "auto", "val"];

/// Split on commas that are not nested inside brackets of any kind.
pub fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut prev = '\0';

    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            '>' if prev == '=' || prev == '-' => {}
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        prev = c;
    }
    parts.push(&text[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Drop a default value (`= 3`), ignoring `==` and `=>`.
fn strip_default(param: &str) -> &str {
    let bytes = param.as_bytes();
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b')' | b']' | b'}' | b'>' => depth = depth.saturating_sub(1),
            b'=' if depth == 0 => {
                let next = bytes.get(i + 1).copied();
                let prev = if i > 0 { bytes[i - 1] } else { b' ' };
                if next != Some(b'=') && next != Some(b'>') && !b"=!<>".contains(&prev) {
                    return param[..i].trim();
                }
            }
            _ => {}
        }
    }
    param.trim()
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn identifiers(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_ident_char(c))
        .filter(|token| token.starts_with(|c: char| c.is_alphabetic() || c == '_' || c == '$'))
}

/// Drop trailing `[...]` groups, as in `char buf[256]` or `int m[3][4]`.
fn strip_array_suffix(declaration: &str) -> &str {
    let mut rest = declaration.trim_end();
    while rest.ends_with(']') {
        match rest.rfind('[') {
            Some(open) => rest = rest[..open].trim_end(),
            None => break,
        }
    }
    rest
}

/// Name of one parameter declaration, or `None` for markers such as a bare
/// `*` or `/` in Python.
pub fn parameter_name(raw: &str, style: ParamStyle) -> Option<String> {
    let declaration = strip_default(raw);
    match style {
        ParamStyle::TypeThenName => {
            identifiers(strip_array_suffix(declaration)).last().map(str::to_string)
        }
        ParamStyle::NameThenType => {
            const MODIFIERS: &[&str] = &["public", "private", "protected", "readonly", "override"];
            identifiers(declaration)
                .find(|token| !MODIFIERS.contains(token))
                .map(str::to_string)
        }
    }
}

/// Parameter names from the text between a signature's parentheses.
pub fn parameters(inner: &str, rules: &LanguageRules) -> Vec<String> {
    split_top_level(inner)
        .into_iter()
        .filter_map(|raw| parameter_name(raw, rules.params))
        .filter(|name| !rules.implicit_params.contains(&name.as_str()))
        .collect()
}

/// Declared return type. `prefix` is the type captured before the name;
/// `after_params` is the text following the closing parenthesis.
pub fn return_type(style: ReturnStyle, prefix: Option<&str>, after_params: &str) -> String {
    let after = after_params.trim_start_matches([' ', '\t']);
    let until = |text: &str, stops: &[&str]| -> String {
        let end = stops
            .iter()
            .filter_map(|stop| text.find(stop))
            .min()
            .unwrap_or(text.len());
        text[..end].trim().to_string()
    };

    match style {
        ReturnStyle::Prefix => prefix
            .map(str::trim)
            .filter(|ret| !is_reserved_word(ret))
            .unwrap_or_default()
            .to_string(),
        ReturnStyle::ColonSuffix => after
            .strip_prefix(':')
            .map(|rest| until(rest, &["{", "=>", ";", "\n"]))
            .unwrap_or_default(),
        ReturnStyle::ArrowSuffix => after
            .strip_prefix("->")
            .map(|rest| {
                until(rest, &[":\n", ":\r", ": ", "\n"])
                    .trim_end_matches(':')
                    .trim()
                    .to_string()
            })
            .unwrap_or_default(),
        ReturnStyle::BareSuffix => until(after, &["{", "\n"]),
    }
}

fn clean_type_name(name: &str) -> Option<String> {
    const QUALIFIERS: &[&str] = &["public", "private", "protected", "virtual"];
    let name = name
        .split_whitespace()
        .filter(|token| !QUALIFIERS.contains(token))
        .collect::<Vec<_>>()
        .join(" ");
    (!name.is_empty()).then_some(name)
}

fn looks_like_interface(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('I'), Some(second)) if second.is_ascii_uppercase()
    )
}

fn type_list(text: &str) -> Vec<String> {
    split_top_level(text)
        .into_iter()
        .filter_map(clean_type_name)
        .collect()
}

/// Base types and interfaces from the text following a class name.
pub fn heritage(style: HeritageStyle, text: &str) -> (Vec<String>, Vec<String>) {
    let text = text.trim();
    match style {
        HeritageStyle::Colon => {
            let Some(list) = text.strip_prefix(':') else {
                return (Vec::new(), Vec::new());
            };
            let list = list.split(" where ").next().unwrap_or(list);
            type_list(list)
                .into_iter()
                .partition(|name| !looks_like_interface(name))
        }
        HeritageStyle::ExtendsImplements => {
            if let Some(caps) = EXTENDS_IMPLEMENTS.captures(text) {
                let bases = caps.name("ext").map(|m| type_list(m.as_str()));
                let interfaces = caps.name("imp").map(|m| type_list(m.as_str()));
                (bases.unwrap_or_default(), interfaces.unwrap_or_default())
            } else if let Some(caps) = IMPLEMENTS_ONLY.captures(text) {
                let interfaces = caps.name("imp").map(|m| type_list(m.as_str()));
                (Vec::new(), interfaces.unwrap_or_default())
            } else {
                (Vec::new(), Vec::new())
            }
        }
        HeritageStyle::Parenthesized => {
            let inner = text.trim_start_matches('(').trim_end_matches(')');
            let bases = type_list(inner)
                .into_iter()
                .filter(|base| !base.contains('='))
                .collect();
            (bases, Vec::new())
        }
        HeritageStyle::None => (Vec::new(), Vec::new()),
    }
}

/// Type annotation of a variable declaration.
pub fn type_annotation(captured: Option<&str>, dynamic_typing: bool) -> TypeAnnotation {
    match captured.map(str::trim).filter(|ty| !ty.is_empty()) {
        Some(ty) if INFERRED_KEYWORDS.contains(&ty) => TypeAnnotation::Inferred,
        Some(ty) => TypeAnnotation::Declared(ty.to_string()),
        None if dynamic_typing => TypeAnnotation::Unknown,
        None => TypeAnnotation::Inferred,
    }
}

/// Whether a captured type is really a statement keyword, which means the
/// match was not a declaration at all.
pub fn is_keyword_type(captured: Option<&str>) -> bool {
    captured
        .map(str::trim)
        .is_some_and(|ty| !INFERRED_KEYWORDS.contains(&ty) && is_reserved_word(ty))
}
