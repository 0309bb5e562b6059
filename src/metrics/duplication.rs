//! Near-duplicate functions and repeated line blocks within one file.

use super::{Assessment, Metric, MetricKind};
use crate::config::DuplicationThresholds;
use crate::core::{FunctionRecord, ParsedFile};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

const BLOCK_PENALTY: f64 = 0.3;

#[derive(Debug, Clone, Default)]
pub struct CodeDuplication {
    thresholds: DuplicationThresholds,
}

/// A window of consecutive lines that appears more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateBlock {
    pub hash: String,
    pub lines: usize,
    /// 1-based first line of every occurrence, ascending.
    pub start_lines: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarPair {
    pub first: String,
    pub second: String,
    pub similarity: f64,
}

impl CodeDuplication {
    pub fn new(thresholds: DuplicationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn similar_pairs(&self, functions: &[FunctionRecord]) -> Vec<SimilarPair> {
        let bodies: Vec<Vec<char>> = functions.iter().map(|f| f.body.chars().collect()).collect();
        let mut pairs = Vec::new();
        for i in 0..functions.len() {
            for j in i + 1..functions.len() {
                if let Some(similarity) =
                    similarity_above(&bodies[i], &bodies[j], self.thresholds.similarity)
                {
                    pairs.push(SimilarPair {
                        first: functions[i].name.clone(),
                        second: functions[j].name.clone(),
                        similarity,
                    });
                }
            }
        }
        pairs
    }

    pub fn duplicate_blocks(&self, content: &str) -> Vec<DuplicateBlock> {
        detect_duplicate_blocks(
            content,
            self.thresholds.min_block_lines,
            self.thresholds.max_block_lines,
        )
    }
}

/// `1 - distance / longer`; 0 when either side is empty.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    normalized_similarity(&a, &b)
}

fn normalized_similarity(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let longer = a.len().max(b.len());
    (longer - levenshtein(a, b)) as f64 / longer as f64
}

/// Similarity of the pair if it is strictly above `threshold`. The distance is
/// at least the length difference, so pairs whose length ratio already rules
/// them out skip the edit-distance table.
fn similarity_above(a: &[char], b: &[char], threshold: f64) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    let (shorter, longer) = (a.len().min(b.len()), a.len().max(b.len()));
    if shorter as f64 / longer as f64 <= threshold {
        return None;
    }
    let similarity = normalized_similarity(a, b);
    (similarity > threshold).then_some(similarity)
}

/// Two-row edit distance.
pub(crate) fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Every distinct window of `min..=max` lines that occurs more than once,
/// compared verbatim. Runs of blank or brace-only lines count like any other.
pub fn detect_duplicate_blocks(content: &str, min: usize, max: usize) -> Vec<DuplicateBlock> {
    let lines: Vec<&str> = content.lines().collect();
    let mut seen: HashMap<(usize, String), Vec<usize>> = HashMap::new();

    for size in min.max(1)..=max {
        for (start_line, chunk) in extract_chunks(&lines, size) {
            seen.entry((size, calculate_hash(&chunk)))
                .or_default()
                .push(start_line);
        }
    }

    let mut blocks: Vec<DuplicateBlock> = seen
        .into_iter()
        .filter(|(_, starts)| starts.len() > 1)
        .map(|((lines, hash), start_lines)| DuplicateBlock {
            hash,
            lines,
            start_lines,
        })
        .collect();
    blocks.sort_by(|a, b| {
        a.start_lines[0]
            .cmp(&b.start_lines[0])
            .then(a.lines.cmp(&b.lines))
    });
    blocks
}

fn extract_chunks(lines: &[&str], chunk_size: usize) -> Vec<(usize, String)> {
    if lines.len() < chunk_size {
        return Vec::new();
    }
    (0..=lines.len() - chunk_size)
        .map(|i| (i + 1, lines[i..i + chunk_size].join("\n")))
        .collect()
}

fn calculate_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl Metric for CodeDuplication {
    fn kind(&self) -> MetricKind {
        MetricKind::CodeDuplication
    }

    fn description(&self) -> &'static str {
        "Near-identical functions and repeated blocks of lines"
    }

    fn assess(&self, parsed: &ParsedFile) -> Assessment {
        let pairs = self.similar_pairs(&parsed.functions);
        let blocks = self.duplicate_blocks(&parsed.content);

        let mut score = if parsed.functions.is_empty() {
            0.0
        } else {
            (2.0 * pairs.len() as f64 / parsed.functions.len() as f64).min(1.0)
        };
        if !blocks.is_empty() {
            score = (score + BLOCK_PENALTY).min(1.0);
        }

        let mut issues: Vec<String> = pairs
            .iter()
            .map(|pair| {
                format!(
                    "Similar functions: {} and {} (similarity: {:.1}%)",
                    pair.first,
                    pair.second,
                    pair.similarity * 100.0
                )
            })
            .collect();
        if !blocks.is_empty() {
            issues.push(format!("Found {} duplicate code blocks", blocks.len()));
        }

        Assessment::new(score, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Language;
    use crate::extraction::parse;
    use indoc::indoc;
    use std::path::Path;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein(&chars("kitten"), &chars("sitting")), 3);
        assert_eq!(levenshtein(&chars(""), &chars("abc")), 3);
        assert_eq!(levenshtein(&chars("same"), &chars("same")), 0);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity("abcd", "abcd"), 1.0);
        assert!((similarity("abcd", "abcx") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_block_detected() {
        let source = indoc! {"
            alpha = 1
            beta = 2
            gamma = 3
            delta = 4
            print('unrelated')
            alpha = 1
            beta = 2
            gamma = 3
            delta = 4
        "};
        let blocks = detect_duplicate_blocks(source, 3, 10);
        // Two 3-line windows and one 4-line window repeat.
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].start_lines, vec![1, 6]);
        assert_eq!(blocks[0].lines, 3);

        let parsed = parse(Path::new("dup.py"), source, Language::Python);
        let assessment = CodeDuplication::default().assess(&parsed);
        assert!(assessment.score > 0.0);
        assert_eq!(assessment.issues, vec!["Found 3 duplicate code blocks".to_string()]);
    }

    #[test]
    fn test_blank_runs_count_as_blocks() {
        let source = "int a = 1;\n\n\n\nint b = 2;\n\n\n\nint c = 3;\n";
        let blocks = detect_duplicate_blocks(source, 3, 10);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start_lines, vec![2, 6]);

        let parsed = parse(Path::new("consts.c"), source, Language::C);
        let assessment = CodeDuplication::default().assess(&parsed);
        assert!((assessment.score - BLOCK_PENALTY).abs() < 1e-9);
        assert_eq!(assessment.issues, vec!["Found 1 duplicate code blocks".to_string()]);
    }

    #[test]
    fn test_similar_functions_flagged() {
        let source = indoc! {"
            function total(items) {
              return items.reduce((a, b) => a + b, 0);
            }

            function totals(items) {
              return items.reduce((a, b) => a + b, 0);
            }
        "};
        let parsed = parse(Path::new("sum.js"), source, Language::JavaScript);
        assert_eq!(parsed.functions.len(), 2);

        let metric = CodeDuplication::default();
        let pairs = metric.similar_pairs(&parsed.functions);
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].similarity > 0.95);

        let assessment = metric.assess(&parsed);
        assert_eq!(assessment.score, 1.0);
        assert!(assessment.issues[0].starts_with("Similar functions: total and totals"));
    }

    #[test]
    fn test_distinct_functions_not_flagged() {
        let functions = vec![
            FunctionRecord::new("a".into(), "fn a() { open(); read(); }".into(), 1, 1),
            FunctionRecord::new("b".into(), "fn b() { let x = compute(y) * 2; }".into(), 2, 2),
        ];
        assert!(CodeDuplication::default().similar_pairs(&functions).is_empty());
    }
}
