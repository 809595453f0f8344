//! Shared normalization, heading-detection, language, and quality
//! heuristics every format-specific parser builds on (spec.md §4.2,
//! "Common contract").

use dealmemo_core::model::QualityScores;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Vocabulary that boosts heading confidence when a candidate title
/// matches it (case-insensitive).
pub static BUSINESS_VOCABULARY: &[&str] = &[
    "executive summary",
    "problem",
    "solution",
    "market",
    "business model",
    "traction",
    "team",
    "financials",
    "funding",
    "competition",
    "appendix",
    "product",
    "go-to-market",
    "roadmap",
];

static NUMBERED_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+[A-Z]").unwrap());

static ENGLISH_STOPWORDS: &[&str] = &[
    "the", "and", "of", "to", "a", "in", "is", "for", "that", "with", "our", "we", "on", "as",
];

/// Normalize line breaks (CRLF/CR -> LF), collapse runs of >=3 blank
/// lines to 2, collapse runs of spaces, and trim each line.
pub fn normalize_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");

    let space_run = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());
    let space_run: &Regex = &space_run;

    let trimmed_lines: Vec<String> = unified
        .split('\n')
        .map(|line| space_run.replace_all(line.trim(), " ").to_string())
        .collect();

    let mut collapsed = Vec::with_capacity(trimmed_lines.len());
    let mut blank_run = 0;
    for line in trimmed_lines {
        if line.is_empty() {
            blank_run += 1;
            if blank_run <= 2 {
                collapsed.push(line);
            }
        } else {
            blank_run = 0;
            collapsed.push(line);
        }
    }

    collapsed.join("\n")
}

/// Whether `line` looks like a section heading under the base heuristic:
/// ALL-CAPS (<=100 chars), a numbered heading (`^\d+\.\s+[A-Z]`), or a
/// short title-case line.
pub fn looks_like_heading(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.chars().count() > 100 {
        return false;
    }
    if NUMBERED_HEADING.is_match(trimmed) {
        return true;
    }
    if trimmed.chars().any(|c| c.is_alphabetic())
        && trimmed
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| c.is_uppercase())
    {
        return true;
    }
    is_title_case(trimmed)
}

fn is_title_case(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() || words.len() > 10 {
        return false;
    }
    words
        .iter()
        .filter(|w| w.chars().next().map(|c| c.is_alphabetic()).unwrap_or(false))
        .all(|w| w.chars().next().unwrap().is_uppercase())
}

/// Confidence for a candidate heading: base 0.5, +0.3 if it matches the
/// business vocabulary, +0.2 if numbered, +0.1 if properly capitalized,
/// capped at 1.0.
pub fn heading_confidence(candidate: &str) -> f64 {
    let lower = candidate.to_lowercase();
    let mut score: f64 = 0.5;

    if BUSINESS_VOCABULARY.iter().any(|term| lower.contains(term)) {
        score += 0.3;
    }
    if NUMBERED_HEADING.is_match(candidate.trim()) {
        score += 0.2;
    }
    if is_title_case(candidate.trim()) {
        score += 0.1;
    }

    score.min(1.0)
}

/// Language heuristic shared by all parsers (spec.md §4.2).
pub fn detect_language(text: &str) -> String {
    let lower = text.to_lowercase();
    let stopword_hits: HashSet<&str> = ENGLISH_STOPWORDS
        .iter()
        .copied()
        .filter(|word| contains_whole_word(&lower, word))
        .collect();
    if stopword_hits.len() >= 3 {
        return "en".to_string();
    }

    let mut chinese = 0usize;
    let mut japanese = 0usize;
    let mut cyrillic = 0usize;
    let mut arabic = 0usize;
    for c in text.chars() {
        let code = c as u32;
        if (0x4E00..=0x9FFF).contains(&code) {
            chinese += 1;
        } else if (0x3040..=0x30FF).contains(&code) {
            japanese += 1;
        } else if (0x0400..=0x04FF).contains(&code) {
            cyrillic += 1;
        } else if (0x0600..=0x06FF).contains(&code) {
            arabic += 1;
        }
    }
    let counts = [("zh", chinese), ("ja", japanese), ("ru", cyrillic), ("ar", arabic)];
    if let Some((code, count)) = counts.iter().max_by_key(|(_, count)| *count) {
        if *count > 0 {
            return code.to_string();
        }
    }
    "unknown".to_string()
}

fn contains_whole_word(haystack: &str, word: &str) -> bool {
    haystack.split(|c: char| !c.is_alphanumeric()).any(|token| token == word)
}

/// Three-axis quality computation (spec.md §3). All axes are in `[0,1]`.
pub fn compute_quality(text: &str, section_count: usize, warnings: &[String]) -> QualityScores {
    let char_count = text.chars().count().max(1);
    let printable = text
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .count();
    let text_clarity = (printable as f64 / char_count as f64).clamp(0.0, 1.0);

    let word_count = text.split_whitespace().count();
    let structure_preservation = if word_count == 0 {
        0.0
    } else {
        // Expect roughly one section per ~150 words of business content;
        // more or fewer than that tapers the score rather than clipping it.
        let expected = (word_count as f64 / 150.0).max(1.0);
        (section_count as f64 / expected).min(1.0)
    };

    let completeness = if word_count == 0 {
        0.0
    } else {
        let penalty = warnings.len() as f64 * 0.1;
        (1.0 - penalty).clamp(0.0, 1.0)
    };

    QualityScores {
        text_clarity,
        structure_preservation,
        completeness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_line_endings_and_blank_runs() {
        let input = "Title\r\n\r\n\r\n\r\nBody   text  here\r";
        let normalized = normalize_text(input);
        assert!(!normalized.contains('\r'));
        assert!(!normalized.contains("\n\n\n"));
        assert!(normalized.contains("Body text here"));
    }

    #[test]
    fn detects_heading_variants() {
        assert!(looks_like_heading("EXECUTIVE SUMMARY"));
        assert!(looks_like_heading("1. Market Opportunity"));
        assert!(looks_like_heading("Our Team"));
        assert!(!looks_like_heading("this is a normal sentence about our product."));
    }

    #[test]
    fn heading_confidence_is_capped_at_one() {
        let score = heading_confidence("1. Executive Summary");
        assert!(score <= 1.0);
        assert!(score > 0.5);
    }

    #[test]
    fn detects_english_with_enough_stopwords() {
        assert_eq!(detect_language("This is the plan for our company and the market"), "en");
    }

    #[test]
    fn detects_unknown_for_sparse_text() {
        assert_eq!(detect_language("Q3 ARR $2M"), "unknown");
    }

    #[test]
    fn detects_chinese_block_coverage() {
        assert_eq!(detect_language("我们的公司正在快速增长"), "zh");
    }
}
