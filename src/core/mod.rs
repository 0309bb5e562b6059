pub mod errors;
pub mod outcome;

pub use errors::{Error, Result};
pub use outcome::{FileAnalysis, FileIssue, FileOutcome, MetricOutcome, ProjectOutcome, Severity};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Copy, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    CSharp,
    JavaScript,
    TypeScript,
    Python,
    Java,
    Cpp,
    C,
    Go,
    Unsupported,
}

impl Language {
    /// Every language the extractor has rules for.
    pub const SUPPORTED: [Language; 8] = [
        Language::CSharp,
        Language::JavaScript,
        Language::TypeScript,
        Language::Python,
        Language::Java,
        Language::Cpp,
        Language::C,
        Language::Go,
    ];

    pub fn from_extension(ext: &str) -> Self {
        static EXTENSION_MAP: &[(&[&str], Language)] = &[
            (&["cs", "razor"], Language::CSharp),
            (&["js", "jsx", "mjs", "cjs"], Language::JavaScript),
            (&["ts", "tsx", "mts", "cts"], Language::TypeScript),
            (&["py", "pyi"], Language::Python),
            (&["java"], Language::Java),
            (&["cpp", "cc", "cxx", "hpp", "hh", "hxx"], Language::Cpp),
            (&["c", "h"], Language::C),
            (&["go"], Language::Go),
        ];

        let ext = ext.to_ascii_lowercase();
        EXTENSION_MAP
            .iter()
            .find(|(exts, _)| exts.contains(&ext.as_str()))
            .map(|(_, lang)| *lang)
            .unwrap_or(Language::Unsupported)
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unsupported)
    }

    /// Parse a user-supplied language name such as `csharp`, `c++` or `golang`.
    pub fn from_name(name: &str) -> Option<Self> {
        static NAME_MAP: &[(&[&str], Language)] = &[
            (&["csharp", "c#", "cs"], Language::CSharp),
            (&["javascript", "js"], Language::JavaScript),
            (&["typescript", "ts"], Language::TypeScript),
            (&["python", "py"], Language::Python),
            (&["java"], Language::Java),
            (&["cpp", "c++", "cplusplus", "cxx"], Language::Cpp),
            (&["c"], Language::C),
            (&["go", "golang"], Language::Go),
        ];

        let name = name.trim().to_ascii_lowercase();
        NAME_MAP
            .iter()
            .find(|(names, _)| names.contains(&name.as_str()))
            .map(|(_, lang)| *lang)
    }

    pub fn is_supported(&self) -> bool {
        *self != Language::Unsupported
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(Language, &str)] = &[
            (Language::CSharp, "C#"),
            (Language::JavaScript, "JavaScript"),
            (Language::TypeScript, "TypeScript"),
            (Language::Python, "Python"),
            (Language::Java, "Java"),
            (Language::Cpp, "C++"),
            (Language::C, "C"),
            (Language::Go, "Go"),
            (Language::Unsupported, "Unsupported"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(l, _)| l == self)
            .map(|(_, s)| *s)
            .unwrap_or("Unsupported");

        write!(f, "{display_str}")
    }
}

/// Detect the language of a file from its extension.
pub fn detect_language(path: &Path) -> Language {
    Language::from_path(path)
}

pub fn is_supported_file(path: &Path) -> bool {
    detect_language(path).is_supported()
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Copy, Default)]
pub enum AccessModifier {
    Public,
    Private,
    Protected,
    Internal,
    #[default]
    None,
}

impl AccessModifier {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "public" | "export" => AccessModifier::Public,
            "private" => AccessModifier::Private,
            "protected" => AccessModifier::Protected,
            "internal" => AccessModifier::Internal,
            _ => AccessModifier::None,
        }
    }
}

/// Declared type of a variable as seen at its declaration site.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum TypeAnnotation {
    Declared(String),
    /// The language infers the type (`var`, `let`, `:=`, plain assignment).
    Inferred,
    Unknown,
}

impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeAnnotation::Declared(name) => write!(f, "{name}"),
            TypeAnnotation::Inferred => write!(f, "inferred"),
            TypeAnnotation::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FunctionRecord {
    pub name: String,
    pub body: String,
    pub start_line: usize,
    pub end_line: usize,
    pub parameters: Vec<String>,
    pub return_type: String,
    pub access: AccessModifier,
}

impl FunctionRecord {
    pub fn new(name: String, body: String, start_line: usize, end_line: usize) -> Self {
        Self {
            name,
            body,
            start_line,
            end_line,
            parameters: Vec::new(),
            return_type: String::new(),
            access: AccessModifier::None,
        }
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Physical span of the record in lines.
    pub fn line_span(&self) -> usize {
        self.end_line.saturating_sub(self.start_line)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClassRecord {
    pub name: String,
    pub body: String,
    pub start_line: usize,
    pub end_line: usize,
    pub access: AccessModifier,
    pub base_types: Vec<String>,
    pub interfaces: Vec<String>,
}

impl ClassRecord {
    pub fn new(name: String, body: String, start_line: usize, end_line: usize) -> Self {
        Self {
            name,
            body,
            start_line,
            end_line,
            access: AccessModifier::None,
            base_types: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    pub fn line_span(&self) -> usize {
        self.end_line.saturating_sub(self.start_line)
    }

    pub fn has_heritage(&self) -> bool {
        !self.base_types.is_empty() || !self.interfaces.is_empty()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VariableRecord {
    pub name: String,
    pub declared_type: TypeAnnotation,
    pub line: usize,
    pub access: AccessModifier,
    pub is_const: bool,
    pub is_static: bool,
}

/// Structural inventory of one source file.
///
/// `total_lines == code_lines + comment_lines + blank_lines` always holds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub language: Language,
    #[serde(skip)]
    pub content: String,
    pub total_lines: usize,
    pub code_lines: usize,
    pub comment_lines: usize,
    pub blank_lines: usize,
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
    pub variables: Vec<VariableRecord>,
}

impl ParsedFile {
    pub fn new(path: PathBuf, language: Language, content: String) -> Self {
        Self {
            path,
            language,
            content,
            total_lines: 0,
            code_lines: 0,
            comment_lines: 0,
            blank_lines: 0,
            functions: Vec::new(),
            classes: Vec::new(),
            variables: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension_is_case_insensitive() {
        assert_eq!(Language::from_extension("CS"), Language::CSharp);
        assert_eq!(Language::from_extension("Py"), Language::Python);
        assert_eq!(Language::from_extension("HPP"), Language::Cpp);
    }

    #[test]
    fn test_from_path_maps_every_language() {
        let cases = [
            ("a/b/Program.cs", Language::CSharp),
            ("app.jsx", Language::JavaScript),
            ("types.d.ts", Language::TypeScript),
            ("main.py", Language::Python),
            ("Main.java", Language::Java),
            ("engine.cc", Language::Cpp),
            ("util.h", Language::C),
            ("server.go", Language::Go),
            ("README.md", Language::Unsupported),
            ("Makefile", Language::Unsupported),
        ];

        for (path, expected) in cases {
            assert_eq!(Language::from_path(Path::new(path)), expected, "{path}");
        }
    }

    #[test]
    fn test_is_supported_file() {
        assert!(is_supported_file(Path::new("x/y.go")));
        assert!(!is_supported_file(Path::new("x/y.rs")));
        assert!(!is_supported_file(Path::new("x/noext")));
    }

    #[test]
    fn test_from_name_aliases() {
        assert_eq!(Language::from_name("C++"), Some(Language::Cpp));
        assert_eq!(Language::from_name("golang"), Some(Language::Go));
        assert_eq!(Language::from_name("c#"), Some(Language::CSharp));
        assert_eq!(Language::from_name("rust"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Language::CSharp.to_string(), "C#");
        assert_eq!(Language::Cpp.to_string(), "C++");
        assert_eq!(TypeAnnotation::Inferred.to_string(), "inferred");
        assert_eq!(TypeAnnotation::Declared("int".into()).to_string(), "int");
    }

    #[test]
    fn test_access_from_keyword() {
        assert_eq!(AccessModifier::from_keyword("public"), AccessModifier::Public);
        assert_eq!(AccessModifier::from_keyword("internal"), AccessModifier::Internal);
        assert_eq!(AccessModifier::from_keyword("static"), AccessModifier::None);
    }
}
