//! Pattern tables for each supported language.
//!
//! Signature patterns use named captures: `name` (required), and optionally
//! `access`, `static`, `const`, `ret`, `ty` and `heritage`. Function patterns
//! end at the opening parenthesis of the parameter list or, for bare method
//! forms, at the opening brace; the extractor locates the parameter list from
//! the end of the `name` capture.

use super::{
    AccessConvention, BodyStyle, Casing, CommentSyntax, HeritageStyle, LanguageRules,
    NamingRules, ParamStyle, ReturnStyle,
};
use crate::core::Language;
use regex::Regex;

/// `else if` matches both its own pattern and the `if` pattern, so it adds
/// two paths.
const C_FAMILY_COMPLEXITY: &[&str] = &[
    r"\bif\s*\(",
    r"\belse\s+if\s*\(",
    r"\bwhile\s*\(",
    r"\bfor\s*\(",
    r"\bforeach\s*\(",
    r"\bswitch\s*\(",
    r"\bcase\s+",
    r"\bdefault\s*:",
    r"\bcatch\s*\(",
    r"&&",
    r"\|\|",
    r"\s\?\s[^\n;]*?:",
];

const SCRIPT_COMPLEXITY: &[&str] = &[
    r"\bif\s*\(",
    r"\belse\s+if\s*\(",
    r"\bwhile\s*\(",
    r"\bfor\s*\(",
    r"\bswitch\s*\(",
    r"\bcase\s+",
    r"\bdefault\s*:",
    r"\bcatch\s*\(",
    r"\bdo\s*\{",
    r"&&",
    r"\|\|",
    r"\s\?\s[^\n;]*?:",
];

const PYTHON_COMPLEXITY: &[&str] = &[
    r"\bif\b",
    r"\belif\b",
    r"\bwhile\b",
    r"\bfor\b",
    r"\btry\s*:",
    r"\bexcept\b",
    r"\belse\s*:",
    r"\bfinally\s*:",
    r"\band\b",
    r"\bor\b",
];

const GO_COMPLEXITY: &[&str] = &[
    r"\bif\s+",
    r"\belse\s+if\s+",
    r"\bfor\b",
    r"\bswitch\b",
    r"\bcase\s+",
    r"\bdefault\s*:",
    r"\bselect\s*\{",
    r"\bgo\s+",
    r"\bdefer\s+",
    r"&&",
    r"\|\|",
];

const EXCEPTION_MARKERS: &[&str] = &[r"\btry\b", r"\bcatch\b", r"\bfinally\b", r"\bthrow\b"];

const PASCAL: &[Casing] = &[Casing::Pascal];
const CAMEL: &[Casing] = &[Casing::Camel];
const SNAKE: &[Casing] = &[Casing::Snake];
const SCREAMING: &[Casing] = &[Casing::ScreamingSnake];
const PASCAL_OR_CAMEL: &[Casing] = &[Casing::Pascal, Casing::Camel];
const PASCAL_OR_SCREAMING: &[Casing] = &[Casing::Pascal, Casing::ScreamingSnake];
const CAMEL_OR_SCREAMING: &[Casing] = &[Casing::Camel, Casing::ScreamingSnake];
const PASCAL_OR_SNAKE: &[Casing] = &[Casing::Pascal, Casing::Snake];
const LOWER_MIXED: &[Casing] = &[Casing::LowerMixed];
const SCREAMING_OR_LOWER_MIXED: &[Casing] = &[Casing::ScreamingSnake, Casing::LowerMixed];

fn compile(language: Language, patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).unwrap_or_else(|e| panic!("invalid {language} pattern {p:?}: {e}"))
        })
        .collect()
}

fn with_extra(base: &[&'static str], extra: &[&'static str]) -> Vec<&'static str> {
    base.iter().chain(extra).copied().collect()
}

/// Build the rule set for one language. `None` for [`Language::Unsupported`].
pub(super) fn build(language: Language) -> Option<LanguageRules> {
    let rules = match language {
        Language::CSharp => csharp(),
        Language::Java => java(),
        Language::JavaScript => script(Language::JavaScript, true),
        Language::TypeScript => script(Language::TypeScript, false),
        Language::Python => python(),
        Language::Cpp => c_like(Language::Cpp),
        Language::C => c_like(Language::C),
        Language::Go => go(),
        Language::Unsupported => return None,
    };
    Some(rules)
}

fn csharp() -> LanguageRules {
    let lang = Language::CSharp;
    LanguageRules {
        language: lang,
        comments: CommentSyntax::CFamily,
        body: BodyStyle::Braces,
        access: AccessConvention::Keyword,
        heritage: HeritageStyle::Colon,
        returns: ReturnStyle::Prefix,
        params: ParamStyle::TypeThenName,
        dynamic_typing: false,
        constant_by_case: false,
        function_patterns: compile(
            lang,
            &[
                r"(?m)^[ \t]*(?:\[[^\]\n]*\][ \t]*)*(?:(?P<access>public|private|protected|internal)[ \t]+)?(?:(?:protected|internal|private)[ \t]+)?(?:(?P<static>static)[ \t]+)?(?:(?:virtual|override|abstract|async|sealed|extern|unsafe|new|partial|readonly)[ \t]+)*(?P<ret>[A-Za-z_][\w<>\[\].?]*(?:,[ \t]*[\w<>\[\].?]+)*)[ \t]+(?P<name>[A-Za-z_]\w*)[ \t]*(?:<[^>\n]*>)?[ \t]*\(",
                r"(?m)^[ \t]*(?P<access>public|private|protected|internal)[ \t]+(?:(?P<static>static)[ \t]+)?(?P<name>[A-Z]\w*)[ \t]*\(",
            ],
        ),
        class_patterns: compile(
            lang,
            &[
                r"\b(?:(?P<access>public|private|protected|internal)[ \t]+)?(?:(?P<static>static)[ \t]+)?(?:(?:abstract|sealed|partial|readonly|unsafe|new)[ \t]+)*(?:class|struct|record)[ \t]+(?P<name>[A-Za-z_]\w*)(?:<[^>\n]*>)?(?P<heritage>[^{;]*)",
            ],
        ),
        variable_patterns: compile(
            lang,
            &[
                r"(?m)^[ \t]*(?:(?P<access>public|private|protected|internal)[ \t]+)?(?:(?P<static>static)[ \t]+)?(?:(?P<const>const|readonly)[ \t]+)?(?:(?:volatile|new)[ \t]+)*(?P<ty>[A-Za-z_][\w<>\[\].?]*)[ \t]+(?P<name>[A-Za-z_]\w*)[ \t]*(?:=[^=>]|;)",
            ],
        ),
        complexity_patterns: compile(lang, C_FAMILY_COMPLEXITY),
        error_handling_patterns: compile(
            lang,
            &with_extra(
                EXCEPTION_MARKERS,
                &[r"[!=]=\s*null\b", r"\?\?", r"\bis\s+(?:not\s+)?null\b"],
            ),
        ),
        naming: NamingRules {
            function: PASCAL,
            class: PASCAL,
            variable: CAMEL,
            constant: PASCAL_OR_SCREAMING,
        },
        implicit_params: &[],
    }
}

fn java() -> LanguageRules {
    let lang = Language::Java;
    LanguageRules {
        language: lang,
        comments: CommentSyntax::CFamily,
        body: BodyStyle::Braces,
        access: AccessConvention::Keyword,
        heritage: HeritageStyle::ExtendsImplements,
        returns: ReturnStyle::Prefix,
        params: ParamStyle::TypeThenName,
        dynamic_typing: false,
        constant_by_case: false,
        function_patterns: compile(
            lang,
            &[
                r"(?m)^[ \t]*(?:@\w+(?:\([^)\n]*\))?[ \t]+)*(?:(?P<access>public|private|protected)[ \t]+)?(?:(?P<static>static)[ \t]+)?(?:(?:final|abstract|synchronized|native|default|strictfp)[ \t]+)*(?:<[^>\n]*>[ \t]+)?(?P<ret>[A-Za-z_][\w<>\[\].?]*(?:,[ \t]*[\w<>\[\].?]+)*)[ \t]+(?P<name>[A-Za-z_]\w*)[ \t]*\(",
                r"(?m)^[ \t]*(?P<access>public|private|protected)[ \t]+(?P<name>[A-Z]\w*)[ \t]*\(",
            ],
        ),
        class_patterns: compile(
            lang,
            &[
                r"\b(?:(?P<access>public|private|protected)[ \t]+)?(?:(?P<static>static)[ \t]+)?(?:(?:abstract|final|sealed|strictfp)[ \t]+)*(?:class|record)[ \t]+(?P<name>[A-Za-z_]\w*)(?:<[^>\n]*>)?(?P<heritage>[^{;]*)",
            ],
        ),
        variable_patterns: compile(
            lang,
            &[
                r"(?m)^[ \t]*(?:(?P<access>public|private|protected)[ \t]+)?(?:(?P<static>static)[ \t]+)?(?:(?P<const>final)[ \t]+)?(?:(?:volatile|transient)[ \t]+)*(?P<ty>[A-Za-z_][\w<>\[\].?]*)[ \t]+(?P<name>[A-Za-z_]\w*)[ \t]*(?:=[^=]|;)",
            ],
        ),
        complexity_patterns: compile(lang, C_FAMILY_COMPLEXITY),
        error_handling_patterns: compile(
            lang,
            &with_extra(
                EXCEPTION_MARKERS,
                &[r"[!=]=\s*null\b", r"\bObjects\.requireNonNull\b", r"\bOptional\b"],
            ),
        ),
        naming: NamingRules {
            function: PASCAL,
            class: PASCAL,
            variable: CAMEL,
            constant: CAMEL_OR_SCREAMING,
        },
        implicit_params: &[],
    }
}

/// JavaScript and TypeScript share one table; only typing differs.
fn script(lang: Language, dynamic_typing: bool) -> LanguageRules {
    LanguageRules {
        language: lang,
        comments: CommentSyntax::CFamily,
        body: BodyStyle::Braces,
        access: AccessConvention::KeywordOrPublic,
        heritage: HeritageStyle::ExtendsImplements,
        returns: ReturnStyle::ColonSuffix,
        params: ParamStyle::NameThenType,
        dynamic_typing,
        constant_by_case: false,
        function_patterns: compile(
            lang,
            &[
                r"\b(?:(?P<access>export)[ \t]+)?(?:default[ \t]+)?(?:async[ \t]+)?function\b[ \t]*\*?[ \t]*(?P<name>[A-Za-z_$][\w$]*)[ \t]*(?:<[^>\n]*>)?[ \t]*\(",
                r"\b(?:(?P<access>export)[ \t]+)?(?:const|let|var)[ \t]+(?P<name>[A-Za-z_$][\w$]*)(?:[ \t]*:[^=\n]+)?[ \t]*=[ \t]*(?:async[ \t]+)?(?:function\b[ \t]*\*?[ \t]*(?:[A-Za-z_$][\w$]*)?[ \t]*\(|(?:<[^>\n]*>)?\([^)]*\)(?:[ \t]*:[ \t]*[^=\n{]+?)?[ \t]*=>|[A-Za-z_$][\w$]*[ \t]*=>)",
                r"(?m)^[ \t]*(?P<name>[A-Za-z_$][\w$]*)[ \t]*:[ \t]*(?:async[ \t]+)?function\b",
                r"(?m)^[ \t]*(?:(?P<access>public|private|protected)[ \t]+)?(?:(?P<static>static)[ \t]+)?(?:(?:async|readonly|abstract|override|get|set)[ \t]+)*\*?(?P<name>[A-Za-z_$#][\w$]*)[ \t]*(?:<[^>\n]*>)?[ \t]*\([^)]*\)(?:[ \t]*:[ \t]*[^{;\n]+?)?[ \t]*\{",
            ],
        ),
        class_patterns: compile(
            lang,
            &[
                r"\b(?:(?P<access>export)[ \t]+)?(?:default[ \t]+)?(?:abstract[ \t]+)?class[ \t]+(?P<name>[A-Za-z_$][\w$]*)(?:<[^>\n]*>)?(?P<heritage>[^{]*)",
            ],
        ),
        variable_patterns: compile(
            lang,
            &[
                r"(?m)\b(?:(?P<access>export)[ \t]+)?(?:var|let|(?P<const>const))[ \t]+(?P<name>[A-Za-z_$][\w$]*)(?:[ \t]*:[ \t]*(?P<ty>[^=;,\n]+?))?[ \t]*(?:=|;|,|$)",
            ],
        ),
        complexity_patterns: compile(lang, SCRIPT_COMPLEXITY),
        error_handling_patterns: compile(
            lang,
            &with_extra(
                EXCEPTION_MARKERS,
                &[
                    r"(?:!==?|===?)\s*(?:null|undefined)\b",
                    r"\?\.",
                    r"\?\?",
                    r"\.catch\s*\(",
                ],
            ),
        ),
        naming: NamingRules {
            function: CAMEL,
            class: PASCAL,
            variable: CAMEL,
            constant: CAMEL_OR_SCREAMING,
        },
        implicit_params: &[],
    }
}

fn python() -> LanguageRules {
    let lang = Language::Python;
    LanguageRules {
        language: lang,
        comments: CommentSyntax::Hash,
        body: BodyStyle::Indentation,
        access: AccessConvention::Underscore,
        heritage: HeritageStyle::Parenthesized,
        returns: ReturnStyle::ArrowSuffix,
        params: ParamStyle::NameThenType,
        dynamic_typing: true,
        constant_by_case: true,
        function_patterns: compile(
            lang,
            &[r"(?m)^[ \t]*(?:async[ \t]+)?def[ \t]+(?P<name>[A-Za-z_]\w*)[ \t]*\("],
        ),
        class_patterns: compile(
            lang,
            &[r"(?m)^[ \t]*class[ \t]+(?P<name>[A-Za-z_]\w*)[ \t]*(?P<heritage>\([^)]*\))?[ \t]*:"],
        ),
        variable_patterns: compile(
            lang,
            &[r"(?m)^[ \t]*(?P<name>[A-Za-z_]\w*)[ \t]*(?::[ \t]*(?P<ty>[^=\n]+?))?[ \t]*=[^=]"],
        ),
        complexity_patterns: compile(lang, PYTHON_COMPLEXITY),
        error_handling_patterns: compile(
            lang,
            &[
                r"\btry\s*:",
                r"\bexcept\b",
                r"\bfinally\s*:",
                r"\braise\b",
                r"\bis\s+(?:not\s+)?None\b",
                r"[!=]=\s*None\b",
            ],
        ),
        naming: NamingRules {
            function: SNAKE,
            class: PASCAL,
            variable: SNAKE,
            constant: SCREAMING,
        },
        implicit_params: &["self", "cls"],
    }
}

/// C and C++ share signature shapes; C++ adds classes and exceptions.
fn c_like(lang: Language) -> LanguageRules {
    let is_cpp = lang == Language::Cpp;
    let class_patterns: &[&str] = if is_cpp {
        &[
            r"(?m)^[ \t]*(?:template[ \t]*<[^>\n]*>[ \t]*)?(?:class|struct)[ \t]+(?P<name>[A-Za-z_]\w*)(?:[ \t]+final)?(?P<heritage>[^{;]*)\{",
        ]
    } else {
        &[r"(?m)^[ \t]*(?:typedef[ \t]+)?struct[ \t]+(?P<name>[A-Za-z_]\w*)[ \t]*\{"]
    };
    let error_handling: Vec<&str> = if is_cpp {
        with_extra(
            EXCEPTION_MARKERS,
            &[r"[!=]=\s*(?:nullptr|NULL)\b", r"\bassert\s*\("],
        )
    } else {
        vec![
            r"[!=]=\s*NULL\b",
            r"\bassert\s*\(",
            r"\berrno\b",
            r"\bif\s*\(\s*!\s*\w+\s*\)",
            r"\breturn\s+-1\s*;",
        ]
    };

    LanguageRules {
        language: lang,
        comments: CommentSyntax::CFamily,
        body: BodyStyle::Braces,
        access: AccessConvention::Linkage,
        heritage: if is_cpp {
            HeritageStyle::Colon
        } else {
            HeritageStyle::None
        },
        returns: ReturnStyle::Prefix,
        params: ParamStyle::TypeThenName,
        dynamic_typing: false,
        constant_by_case: false,
        function_patterns: compile(
            lang,
            &[
                r"(?m)^[ \t]*(?:template[ \t]*<[^>\n]*>[ \t]*)?(?:(?P<static>static)[ \t]+)?(?:(?:inline|extern|virtual|constexpr|const|unsigned|signed|explicit|friend)[ \t]+)*(?P<ret>[A-Za-z_][\w:<>,]*)[ \t*&]+(?P<name>[A-Za-z_]\w*(?:::~?[A-Za-z_]\w*)*)[ \t]*\(",
            ],
        ),
        class_patterns: compile(lang, class_patterns),
        variable_patterns: compile(
            lang,
            &[
                r"(?m)^[ \t]*(?:(?P<static>static)[ \t]+)?(?:(?P<const>const|constexpr)[ \t]+)?(?:(?:unsigned|signed|volatile|extern|inline|mutable)[ \t]+)*(?P<ty>[A-Za-z_][\w:<>]*)[ \t*&]+(?P<name>[A-Za-z_]\w*)[ \t]*(?:\[[^\]\n]*\][ \t]*)?(?:=[^=]|;)",
            ],
        ),
        complexity_patterns: compile(lang, C_FAMILY_COMPLEXITY),
        error_handling_patterns: compile(lang, &error_handling),
        naming: NamingRules {
            function: LOWER_MIXED,
            class: PASCAL_OR_SNAKE,
            variable: LOWER_MIXED,
            constant: SCREAMING_OR_LOWER_MIXED,
        },
        implicit_params: &["void"],
    }
}

fn go() -> LanguageRules {
    let lang = Language::Go;
    LanguageRules {
        language: lang,
        comments: CommentSyntax::CFamily,
        body: BodyStyle::Braces,
        access: AccessConvention::Capitalization,
        heritage: HeritageStyle::None,
        returns: ReturnStyle::BareSuffix,
        params: ParamStyle::NameThenType,
        dynamic_typing: false,
        constant_by_case: false,
        function_patterns: compile(
            lang,
            &[
                r"(?m)^func[ \t]+(?P<name>[A-Za-z_]\w*)[ \t]*(?:\[[^\]\n]*\])?[ \t]*\(",
                r"(?m)^func[ \t]*\([^)\n]*\)[ \t]*(?P<name>[A-Za-z_]\w*)[ \t]*(?:\[[^\]\n]*\])?[ \t]*\(",
            ],
        ),
        class_patterns: compile(
            lang,
            &[r"(?m)^[ \t]*type[ \t]+(?P<name>[A-Za-z_]\w*)(?:\[[^\]\n]*\])?[ \t]+(?:struct|interface)\b"],
        ),
        variable_patterns: compile(
            lang,
            &[
                r"(?m)^[ \t]*var[ \t]+(?P<name>[A-Za-z_]\w*)(?:[ \t]+(?P<ty>[^=\n]+?))?[ \t]*(?:=|$)",
                r"(?m)^[ \t]*(?P<const>const)[ \t]+(?P<name>[A-Za-z_]\w*)(?:[ \t]+(?P<ty>[^=\n]+?))?[ \t]*(?:=|$)",
                r"(?m)^[ \t]*(?P<name>[A-Za-z_]\w*)(?:[ \t]*,[ \t]*[A-Za-z_]\w*)*[ \t]*:=",
            ],
        ),
        complexity_patterns: compile(lang, GO_COMPLEXITY),
        error_handling_patterns: compile(
            lang,
            &[
                r"\berr\s*!=\s*nil\b",
                r"!=\s*nil\b",
                r"==\s*nil\b",
                r"\bdefer\b",
                r"\bpanic\s*\(",
                r"\brecover\s*\(",
            ],
        ),
        naming: NamingRules {
            function: PASCAL_OR_CAMEL,
            class: PASCAL_OR_CAMEL,
            variable: PASCAL_OR_CAMEL,
            constant: PASCAL_OR_CAMEL,
        },
        implicit_params: &[],
    }
}
