//! Line classification shared by the extractor and the comment-ratio metric.
//!
//! # Counting rules
//!
//! - **Physical lines**: `str::lines` count, so a trailing newline adds nothing
//! - **Blank lines**: lines that are empty after trimming
//! - **Comment lines**: lines opening with a comment marker, and every line
//!   from an unclosed `/*` through the line holding its `*/`
//! - **Code lines**: everything else
//!
//! The invariant `physical_lines == code_lines + comment_lines + blank_lines`
//! always holds.
//!
//! ## Limitations
//!
//! - A block comment opened after code on the same line (`x(); /* ...`) is not
//!   tracked; the following lines count as code
//! - Comment markers inside string literals are not detected

use crate::languages::CommentSyntax;

/// Line counts for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocCount {
    pub physical_lines: usize,
    pub code_lines: usize,
    pub comment_lines: usize,
    pub blank_lines: usize,
}

impl LocCount {
    /// `comment / (code + comment)`, or `0` when neither exists.
    pub fn comment_ratio(&self) -> f64 {
        let denominator = self.code_lines + self.comment_lines;
        if denominator == 0 {
            0.0
        } else {
            self.comment_lines as f64 / denominator as f64
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineType {
    Blank,
    Comment,
    Code,
}

/// Block comment state carried across lines.
#[derive(Clone, Debug, Default)]
pub struct CommentState {
    in_block_comment: bool,
}

impl CommentState {
    pub fn in_block_comment(&self) -> bool {
        self.in_block_comment
    }
}

/// Classify one already-trimmed line, updating the block comment state.
pub fn classify_line(trimmed: &str, state: &mut CommentState, syntax: CommentSyntax) -> LineType {
    if trimmed.is_empty() {
        return LineType::Blank;
    }

    match syntax {
        CommentSyntax::Hash => {
            if trimmed.starts_with('#') {
                LineType::Comment
            } else {
                LineType::Code
            }
        }
        CommentSyntax::CFamily => {
            if state.in_block_comment {
                if trimmed.contains("*/") {
                    state.in_block_comment = false;
                }
                return LineType::Comment;
            }

            if let Some(rest) = trimmed.strip_prefix("/*") {
                if !rest.contains("*/") {
                    state.in_block_comment = true;
                }
                return LineType::Comment;
            }

            if trimmed.starts_with("//") {
                LineType::Comment
            } else {
                LineType::Code
            }
        }
    }
}

/// Count line categories of `content`.
pub fn count_lines(content: &str, syntax: CommentSyntax) -> LocCount {
    let mut count = LocCount::default();
    let mut state = CommentState::default();

    for line in content.lines() {
        count.physical_lines += 1;
        match classify_line(line.trim(), &mut state, syntax) {
            LineType::Blank => count.blank_lines += 1,
            LineType::Comment => count.comment_lines += 1,
            LineType::Code => count.code_lines += 1,
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_mixed_comment_styles() {
        let count = count_lines("// a\ncode();\n/* b\n*/", CommentSyntax::CFamily);
        assert_eq!(count.comment_lines, 3);
        assert_eq!(count.code_lines, 1);
        assert_eq!(count.blank_lines, 0);
        assert_eq!(count.physical_lines, 4);
    }

    #[test]
    fn test_block_comment_interior_lines() {
        let code = indoc! {"
            /*
             plain text inside
             more text
            */
            int x = 1;
        "};
        let count = count_lines(code, CommentSyntax::CFamily);
        assert_eq!(count.comment_lines, 4);
        assert_eq!(count.code_lines, 1);
    }

    #[test]
    fn test_single_line_block_comment_does_not_leak() {
        let count = count_lines("/* one */\nrun();\n", CommentSyntax::CFamily);
        assert_eq!(count.comment_lines, 1);
        assert_eq!(count.code_lines, 1);
    }

    #[test]
    fn test_hash_comments() {
        let code = indoc! {"
            # header

            x = 1  # trailing
            // not a comment here
        "};
        let count = count_lines(code, CommentSyntax::Hash);
        assert_eq!(count.comment_lines, 1);
        assert_eq!(count.blank_lines, 1);
        assert_eq!(count.code_lines, 2);
    }

    #[test]
    fn test_trailing_newline_adds_no_line() {
        assert_eq!(count_lines("a\nb\n", CommentSyntax::CFamily).physical_lines, 2);
        assert_eq!(count_lines("", CommentSyntax::CFamily), LocCount::default());
    }

    #[test]
    fn test_comment_ratio() {
        let count = count_lines("// a\n// b\nc();\nd();\n", CommentSyntax::CFamily);
        assert!((count.comment_ratio() - 0.5).abs() < f64::EPSILON);
        assert_eq!(LocCount::default().comment_ratio(), 0.0);
    }
}
