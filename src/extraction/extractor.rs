//! Pattern-driven structural extraction.
//!
//! `StructuralExtractor` turns raw file text into a [`ParsedFile`]: line
//! counts plus function, class and variable records found by the signature
//! patterns of the file's language. Extraction never fails; text without
//! matches yields empty collections.
//!
//! # Usage
//!
//! ```rust
//! use qualmap::core::Language;
//! use qualmap::extraction::StructuralExtractor;
//! use std::path::Path;
//!
//! let text = "func Serve(addr string) error {\n\treturn nil\n}\n";
//! let parsed = StructuralExtractor::default().parse(Path::new("main.go"), text, Language::Go);
//!
//! assert_eq!(parsed.functions[0].name, "Serve");
//! assert_eq!(parsed.functions[0].parameters, vec!["addr"]);
//! ```

use super::scan::{brace_body_end, indented_body_end, matching_paren, LineIndex};
use super::signature;
use super::ExtractionOptions;
use crate::core::{ClassRecord, FunctionRecord, Language, ParsedFile, VariableRecord};
use crate::languages::{is_reserved_word, rules_for, BodyStyle, Casing, CommentSyntax, LanguageRules};
use crate::metrics::loc_counter::count_lines;
use regex::Captures;
use std::collections::HashSet;
use std::path::Path;

/// Located body of a function or class.
struct Body {
    text: String,
    end_line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct StructuralExtractor {
    options: ExtractionOptions,
}

impl StructuralExtractor {
    pub fn new(options: ExtractionOptions) -> Self {
        Self { options }
    }

    /// Build the structural inventory of one file.
    pub fn parse(&self, path: &Path, text: &str, language: Language) -> ParsedFile {
        let mut parsed = ParsedFile::new(path.to_path_buf(), language, text.to_string());
        let rules = rules_for(language);

        let counts = count_lines(
            text,
            rules.map(|r| r.comments).unwrap_or(CommentSyntax::CFamily),
        );
        parsed.total_lines = counts.physical_lines;
        parsed.code_lines = counts.code_lines;
        parsed.comment_lines = counts.comment_lines;
        parsed.blank_lines = counts.blank_lines;

        let Some(rules) = rules else {
            return parsed;
        };

        let lines = LineIndex::new(text);
        parsed.functions = self.extract_functions(text, rules, &lines);
        parsed.classes = extract_classes(text, rules, &lines);
        parsed.variables = extract_variables(text, rules, &lines);

        log::trace!(
            "Extracted {} functions, {} classes, {} variables from {}",
            parsed.functions.len(),
            parsed.classes.len(),
            parsed.variables.len(),
            path.display()
        );
        parsed
    }

    fn extract_functions(
        &self,
        text: &str,
        rules: &LanguageRules,
        lines: &LineIndex,
    ) -> Vec<FunctionRecord> {
        let mut found: Vec<(usize, FunctionRecord)> = rules
            .function_patterns
            .iter()
            .flat_map(|pattern| pattern.captures_iter(text))
            .filter_map(|caps| function_record(text, &caps, rules, lines))
            .collect();

        found.sort_by_key(|(offset, _)| *offset);

        if self.options.deduplicate {
            let mut seen = HashSet::new();
            found.retain(|(_, f)| seen.insert((f.name.clone(), f.start_line)));
        }

        found.into_iter().map(|(_, record)| record).collect()
    }
}

/// Function name from the `name` capture: the last `::` segment without a
/// destructor tilde, rejected when it is a keyword.
fn function_name(raw: &str) -> Option<String> {
    let name = raw.rsplit("::").next().unwrap_or(raw).trim_start_matches('~');
    (!name.is_empty() && !is_reserved_word(name)).then(|| name.to_string())
}

fn locate_body(
    text: &str,
    start: usize,
    header_end: Option<usize>,
    rules: &LanguageRules,
    lines: &LineIndex,
) -> Body {
    let start_line = lines.line_of(start);
    let empty = Body {
        text: String::new(),
        end_line: start_line,
    };

    match rules.body {
        BodyStyle::Braces => match brace_body_end(text, start, rules.comments) {
            Some(close) => Body {
                text: text[start..=close].to_string(),
                end_line: lines.line_of(close),
            },
            None => empty,
        },
        BodyStyle::Indentation => match header_end {
            Some(header_end) => {
                let end = indented_body_end(text, start, header_end);
                Body {
                    text: text[start..end].to_string(),
                    end_line: lines.line_of(end.saturating_sub(1).max(start)),
                }
            }
            None => empty,
        },
    }
}

/// Offset of the `(` opening a parameter list after `from`, unless the
/// signature ends first.
fn parameter_list_open(text: &str, from: usize) -> Option<usize> {
    let rest = &text[from..];
    let open = rest.find('(')?;
    let stop = ["{", ";", "=>", "\n\n"]
        .iter()
        .filter_map(|s| rest.find(s))
        .min()
        .unwrap_or(rest.len());
    (open < stop).then_some(from + open)
}

fn function_record(
    text: &str,
    caps: &Captures<'_>,
    rules: &LanguageRules,
    lines: &LineIndex,
) -> Option<(usize, FunctionRecord)> {
    let name_match = caps.name("name")?;
    let name = function_name(name_match.as_str())?;
    let ret_capture = caps.name("ret").map(|m| m.as_str());
    if signature::is_keyword_type(ret_capture) {
        return None;
    }

    let whole = caps.get(0)?;
    let start = whole.start();
    let params_open = parameter_list_open(text, name_match.end());
    let params_close = params_open.and_then(|open| matching_paren(text, open, rules.comments));

    let (parameters, after_params) = match (params_open, params_close) {
        (Some(open), Some(close)) => (
            signature::parameters(&text[open + 1..close], rules),
            &text[close + 1..],
        ),
        _ => (Vec::new(), ""),
    };

    let body = locate_body(text, start, params_close, rules, lines);
    let mut record = FunctionRecord::new(name, body.text, lines.line_of(start), body.end_line);
    record.parameters = parameters;
    record.return_type = signature::return_type(rules.returns, ret_capture, after_params);
    record.access = rules.access.resolve(
        caps.name("access").map(|m| m.as_str()),
        &record.name,
        caps.name("static").is_some(),
    );

    Some((start, record))
}

fn extract_classes(text: &str, rules: &LanguageRules, lines: &LineIndex) -> Vec<ClassRecord> {
    let mut found: Vec<(usize, ClassRecord)> = rules
        .class_patterns
        .iter()
        .flat_map(|pattern| pattern.captures_iter(text))
        .filter_map(|caps| {
            let name = caps.name("name")?.as_str();
            if is_reserved_word(name) {
                return None;
            }
            let whole = caps.get(0)?;
            let start = whole.start();
            let body = locate_body(text, start, Some(whole.end()), rules, lines);

            let mut record =
                ClassRecord::new(name.to_string(), body.text, lines.line_of(start), body.end_line);
            let heritage = caps.name("heritage").map(|m| m.as_str()).unwrap_or_default();
            let (base_types, interfaces) = signature::heritage(rules.heritage, heritage);
            record.base_types = base_types;
            record.interfaces = interfaces;
            record.access = rules.access.resolve(
                caps.name("access").map(|m| m.as_str()),
                name,
                caps.name("static").is_some(),
            );
            Some((start, record))
        })
        .collect();

    found.sort_by_key(|(offset, _)| *offset);
    found.into_iter().map(|(_, record)| record).collect()
}

fn extract_variables(text: &str, rules: &LanguageRules, lines: &LineIndex) -> Vec<VariableRecord> {
    let mut found: Vec<(usize, VariableRecord)> = rules
        .variable_patterns
        .iter()
        .flat_map(|pattern| pattern.captures_iter(text))
        .filter_map(|caps| {
            let name_match = caps.name("name")?;
            let name = name_match.as_str();
            let ty = caps.name("ty").map(|m| m.as_str());
            if is_reserved_word(name) || signature::is_keyword_type(ty) {
                return None;
            }

            let is_static = caps.name("static").is_some();
            let is_const = caps.name("const").is_some()
                || (rules.constant_by_case
                    && name.chars().any(|c| c.is_ascii_alphabetic())
                    && Casing::ScreamingSnake.matches(name));

            Some((
                name_match.start(),
                VariableRecord {
                    name: name.to_string(),
                    declared_type: signature::type_annotation(ty, rules.dynamic_typing),
                    line: lines.line_of(name_match.start()),
                    access: rules.access.resolve(
                        caps.name("access").map(|m| m.as_str()),
                        name,
                        is_static,
                    ),
                    is_const,
                    is_static,
                },
            ))
        })
        .collect();

    found.sort_by_key(|(offset, _)| *offset);
    found.into_iter().map(|(_, record)| record).collect()
}
