use crate::config::{is_excluded, ExcludePattern};
use crate::core::{Error, Language, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Recursive file discovery. Every file under the root is considered,
/// hidden files and ignore files included; selection is by language and
/// exclude patterns only. Patterns see paths relative to the root, so the
/// directories above it never exclude anything.
pub struct FileWalker {
    root: PathBuf,
    languages: Vec<Language>,
    exclude_patterns: Vec<ExcludePattern>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            languages: Language::SUPPORTED.to_vec(),
            exclude_patterns: vec![],
        }
    }

    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<ExcludePattern>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// Matching files in path order.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Err(Error::path_not_found(&self.root));
        }

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // The root itself could not be read.
                Err(e) if e.depth() == Some(0) => return Err(Error::Walk(e.to_string())),
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_some_and(|ft| ft.is_file()) && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        let lang = Language::from_path(path);
        lang.is_supported()
            && self.languages.contains(&lang)
            && !is_excluded(
                &self.exclude_patterns,
                path.strip_prefix(&self.root).unwrap_or(path),
            )
    }
}

pub fn find_project_files(root: &Path, languages: Vec<Language>) -> Result<Vec<PathBuf>> {
    FileWalker::new(root.to_path_buf())
        .with_languages(languages)
        .walk()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x\n").unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_walk_filters_language_and_excludes() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "src/main.go");
        touch(root, "src/util.py");
        touch(root, "README.md");
        touch(root, "node_modules/lib/index.js");
        touch(root, ".hidden/tool.ts");

        let files = FileWalker::new(root.to_path_buf())
            .with_exclude_patterns(vec![ExcludePattern::new("**/node_modules/**")])
            .walk()
            .unwrap();

        assert_eq!(
            relative(root, &files),
            vec![".hidden/tool.ts", "src/main.go", "src/util.py"]
        );
    }

    #[test]
    fn test_excludes_ignore_directories_above_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("build").join("Temp").join("project");
        touch(&root, "src/main.go");
        touch(&root, "build/gen.go");

        let files = FileWalker::new(root.clone())
            .with_exclude_patterns(vec![
                ExcludePattern::new("**/build/**"),
                ExcludePattern::new("**/Temp/**"),
            ])
            .walk()
            .unwrap();

        assert_eq!(relative(&root, &files), vec!["src/main.go"]);
    }

    #[test]
    fn test_language_restriction() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.go");
        touch(temp.path(), "b.py");

        let files = find_project_files(temp.path(), vec![Language::Python]).unwrap();
        assert_eq!(relative(temp.path(), &files), vec!["b.py"]);
    }

    #[test]
    fn test_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(matches!(
            FileWalker::new(missing).walk(),
            Err(Error::PathNotFound { .. })
        ));
    }
}
