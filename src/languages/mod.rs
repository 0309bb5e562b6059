//! Per-language rule sets.
//!
//! Comment syntax, signature patterns, naming conventions, complexity and
//! error-handling markers live here as data keyed by [`Language`]. The table
//! is built once on first use and shared by reference afterwards; nothing in
//! the extractor or the metrics branches on the language directly.

mod tables;

use crate::core::{AccessModifier, Language};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// How a language marks comment lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentSyntax {
    /// `//` line comments and `/* ... */` block comments
    CFamily,
    /// `#` line comments
    Hash,
}

impl CommentSyntax {
    /// Whether a trimmed line starts with a comment marker, ignoring block state.
    pub fn is_comment_prefixed(&self, trimmed: &str) -> bool {
        match self {
            CommentSyntax::CFamily => trimmed.starts_with("//") || trimmed.starts_with("/*"),
            CommentSyntax::Hash => trimmed.starts_with('#'),
        }
    }
}

/// How the extent of a function or class body is located.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyStyle {
    Braces,
    Indentation,
}

/// How visibility is expressed when there is no explicit keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessConvention {
    /// Only an explicit keyword counts; absent means [`AccessModifier::None`].
    Keyword,
    /// Explicit keyword if present, otherwise public.
    KeywordOrPublic,
    /// Exported identifiers start with an uppercase letter.
    Capitalization,
    /// Leading underscores mark non-public names.
    Underscore,
    /// `static` means file-local, everything else is visible.
    Linkage,
}

impl AccessConvention {
    pub fn resolve(&self, keyword: Option<&str>, name: &str, is_static: bool) -> AccessModifier {
        match self {
            AccessConvention::Keyword => keyword
                .map(AccessModifier::from_keyword)
                .unwrap_or(AccessModifier::None),
            AccessConvention::KeywordOrPublic => keyword
                .map(AccessModifier::from_keyword)
                .filter(|access| *access != AccessModifier::None)
                .unwrap_or(AccessModifier::Public),
            AccessConvention::Capitalization => {
                if name.starts_with(|c: char| c.is_ascii_uppercase()) {
                    AccessModifier::Public
                } else {
                    AccessModifier::Private
                }
            }
            AccessConvention::Underscore => {
                if name.starts_with("__") && name.ends_with("__") {
                    AccessModifier::Public
                } else if name.starts_with("__") {
                    AccessModifier::Private
                } else if name.starts_with('_') {
                    AccessModifier::Protected
                } else {
                    AccessModifier::Public
                }
            }
            AccessConvention::Linkage => {
                if is_static {
                    AccessModifier::Private
                } else {
                    AccessModifier::Public
                }
            }
        }
    }
}

/// Syntax of the text following a class name that lists its parents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeritageStyle {
    /// `class A : Base, IThing` (C#) or `class A : public Base` (C++)
    Colon,
    /// `class A extends Base implements Thing`
    ExtendsImplements,
    /// `class A(Base, Mixin):`
    Parenthesized,
    None,
}

/// Where a function's declared return type is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnStyle {
    /// Before the name, captured by the signature pattern (`int Foo(`)
    Prefix,
    /// After the parameter list behind a colon (`foo(): string`)
    ColonSuffix,
    /// After the parameter list behind an arrow (`def foo() -> int:`)
    ArrowSuffix,
    /// Bare result list after the parameters (`func f() (int, error) {`)
    BareSuffix,
}

/// Order of type and name inside one parameter declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamStyle {
    /// `int count`
    TypeThenName,
    /// `count int`, `count: int`, `count`
    NameThenType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Casing {
    Pascal,
    Camel,
    Snake,
    /// Lowercase start, any mix of letters, digits and underscores
    LowerMixed,
    ScreamingSnake,
}

static PASCAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").expect("valid pascal pattern"));
static CAMEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").expect("valid camel pattern"));
static SNAKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid snake pattern"));
static LOWER_MIXED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-zA-Z0-9_]*$").expect("valid lower-mixed pattern"));
static SCREAMING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("valid screaming pattern"));

impl Casing {
    pub fn matches(&self, name: &str) -> bool {
        let pattern: &Regex = match self {
            Casing::Pascal => &*PASCAL,
            Casing::Camel => &*CAMEL,
            Casing::Snake => &*SNAKE,
            Casing::LowerMixed => &*LOWER_MIXED,
            Casing::ScreamingSnake => &*SCREAMING,
        };
        pattern.is_match(name)
    }
}

/// Accepted casings per identifier category.
#[derive(Clone, Debug)]
pub struct NamingRules {
    pub function: &'static [Casing],
    pub class: &'static [Casing],
    pub variable: &'static [Casing],
    pub constant: &'static [Casing],
}

impl NamingRules {
    pub fn is_valid_function(&self, name: &str) -> bool {
        accepts(self.function, name)
    }

    pub fn is_valid_class(&self, name: &str) -> bool {
        accepts(self.class, name)
    }

    pub fn is_valid_variable(&self, name: &str, is_const: bool) -> bool {
        accepts(self.variable, name) || (is_const && accepts(self.constant, name))
    }
}

/// Leading `_`/`$` privacy markers and Python dunder suffixes are not part of
/// the casing check.
fn accepts(casings: &[Casing], name: &str) -> bool {
    let core = name.trim_start_matches(['_', '$']);
    let core = if name.starts_with("__") {
        core.trim_end_matches('_')
    } else {
        core
    };
    if core.is_empty() {
        return false;
    }
    casings.iter().any(|casing| casing.matches(core))
}

/// Complete rule set for one language.
#[derive(Debug)]
pub struct LanguageRules {
    pub language: Language,
    pub comments: CommentSyntax,
    pub body: BodyStyle,
    pub access: AccessConvention,
    pub heritage: HeritageStyle,
    pub returns: ReturnStyle,
    pub params: ParamStyle,
    /// Untyped declarations are `Unknown` rather than `Inferred`.
    pub dynamic_typing: bool,
    /// SCREAMING_CASE assignments are constants even without a keyword.
    pub constant_by_case: bool,
    pub function_patterns: Vec<Regex>,
    pub class_patterns: Vec<Regex>,
    pub variable_patterns: Vec<Regex>,
    pub complexity_patterns: Vec<Regex>,
    pub error_handling_patterns: Vec<Regex>,
    pub naming: NamingRules,
    /// Parameter names that do not count towards the parameter list (`self`).
    pub implicit_params: &'static [&'static str],
}

impl LanguageRules {
    pub fn is_comment_prefixed(&self, trimmed: &str) -> bool {
        self.comments.is_comment_prefixed(trimmed)
    }
}

static RULES: Lazy<HashMap<Language, LanguageRules>> = Lazy::new(|| {
    Language::SUPPORTED
        .iter()
        .filter_map(|lang| tables::build(*lang).map(|rules| (*lang, rules)))
        .collect()
});

/// Rule set for `language`, or `None` for [`Language::Unsupported`].
pub fn rules_for(language: Language) -> Option<&'static LanguageRules> {
    RULES.get(&language)
}

/// Words that signature patterns may pick up in statement position but that
/// never name a function, variable or type.
pub(crate) fn is_reserved_word(word: &str) -> bool {
    const RESERVED: &[&str] = &[
        "if", "else", "elif", "for", "foreach", "while", "do", "switch", "case", "default",
        "return", "new", "delete", "throw", "throws", "try", "catch", "finally", "except",
        "raise", "goto", "break", "continue", "await", "yield", "typeof", "sizeof",
        "instanceof", "in", "is", "as", "using", "import", "from", "package", "namespace",
        "define", "include", "with", "lambda", "func", "go", "defer", "select", "range",
        "not", "and", "or", "class", "struct", "interface", "enum", "record", "type",
        "operator", "template", "typedef", "extends", "implements", "async", "static",
        "public", "private", "protected", "internal", "export", "var", "let", "const",
        "where", "lock", "fixed", "checked", "unchecked", "assert", "pass", "del",
        "global", "nonlocal", "print", "echo", "when", "function", "def", "this", "super",
        "null", "true", "false", "None", "nil",
    ];
    RESERVED.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_supported_language_has_rules() {
        for lang in Language::SUPPORTED {
            let rules = rules_for(lang).expect("rules for supported language");
            assert_eq!(rules.language, lang);
            assert!(!rules.function_patterns.is_empty());
            assert!(!rules.class_patterns.is_empty());
            assert!(!rules.variable_patterns.is_empty());
            assert!(!rules.complexity_patterns.is_empty());
            assert!(!rules.error_handling_patterns.is_empty());
        }
        assert!(rules_for(Language::Unsupported).is_none());
    }

    #[test]
    fn test_casing() {
        assert!(Casing::Pascal.matches("HttpClient"));
        assert!(!Casing::Pascal.matches("httpClient"));
        assert!(Casing::Camel.matches("httpClient"));
        assert!(Casing::Snake.matches("http_client"));
        assert!(!Casing::Snake.matches("httpClient"));
        assert!(Casing::LowerMixed.matches("http_Client2"));
        assert!(Casing::ScreamingSnake.matches("MAX_SIZE"));
    }

    #[test]
    fn test_naming_ignores_privacy_prefixes() {
        let python = &rules_for(Language::Python).unwrap().naming;
        assert!(python.is_valid_function("__init__"));
        assert!(python.is_valid_function("_helper"));
        assert!(!python.is_valid_function("BadName"));
        assert!(python.is_valid_variable("MAX_RETRIES", true));
        assert!(!python.is_valid_variable("MAX_RETRIES", false));
        assert!(!python.is_valid_function("__"));
    }

    #[test]
    fn test_access_conventions() {
        assert_eq!(
            AccessConvention::Capitalization.resolve(None, "Serve", false),
            AccessModifier::Public
        );
        assert_eq!(
            AccessConvention::Capitalization.resolve(None, "serve", false),
            AccessModifier::Private
        );
        assert_eq!(
            AccessConvention::Underscore.resolve(None, "__secret", false),
            AccessModifier::Private
        );
        assert_eq!(
            AccessConvention::Underscore.resolve(None, "__init__", false),
            AccessModifier::Public
        );
        assert_eq!(
            AccessConvention::Keyword.resolve(None, "Run", false),
            AccessModifier::None
        );
        assert_eq!(
            AccessConvention::KeywordOrPublic.resolve(Some("private"), "run", false),
            AccessModifier::Private
        );
        assert_eq!(
            AccessConvention::Linkage.resolve(None, "helper", true),
            AccessModifier::Private
        );
    }

    #[test]
    fn test_comment_prefix() {
        assert!(CommentSyntax::CFamily.is_comment_prefixed("// x"));
        assert!(CommentSyntax::CFamily.is_comment_prefixed("/* x"));
        assert!(!CommentSyntax::CFamily.is_comment_prefixed("# x"));
        assert!(CommentSyntax::Hash.is_comment_prefixed("# x"));
    }
}
