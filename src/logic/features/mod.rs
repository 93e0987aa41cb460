//! Password feature extraction.
//!
//! Turns a raw password into the fixed-size numeric summary the
//! classifiers were trained on. Extraction is pure and holds no state
//! across calls; it is safe to run concurrently.

pub mod layout;

pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT};

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::AnalysisError;

/// Inputs are truncated to this many characters before anything else.
pub const MAX_PASSWORD_LEN: usize = 1000;

/// The fixed special-character set used for the has_special flag.
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Substrings counted by the common_patterns feature. Each pattern counts
/// at most once per password, case-insensitively.
pub const COMMON_PATTERNS: &[&str] = &[
    "123", "abc", "qwe", "asd", "zxc", "!@#", "password", "123456", "admin",
];

/// Immutable per-password feature summary, computed once per analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordFeatures {
    pub length: usize,
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
    pub has_special: bool,
    /// Distinct characters / length, in [0, 1]
    pub char_diversity: f64,
    /// Strictly ascending runs of 3 consecutive code points; overlapping
    /// runs each count ("abcd" -> 2)
    pub sequential_chars: u32,
    /// Adjacent equal character pairs
    pub repeated_chars: u32,
    /// Distinct entries of COMMON_PATTERNS found as substrings
    pub common_patterns: u32,
    /// Shannon entropy of the character frequency distribution, in bits
    pub entropy: f64,
}

/// Truncate to MAX_PASSWORD_LEN characters and strip control characters,
/// keeping newline and tab.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .take(MAX_PASSWORD_LEN)
        .filter(|&c| c as u32 >= 32 || c == '\n' || c == '\t')
        .collect()
}

/// Extract features from a password. The input is sanitized first; an
/// empty result is rejected.
pub fn extract(password: &str) -> Result<PasswordFeatures, AnalysisError> {
    let password = sanitize(password);
    if password.is_empty() {
        return Err(AnalysisError::EmptyPassword);
    }
    Ok(compute_features(&password))
}

fn compute_features(password: &str) -> PasswordFeatures {
    let chars: Vec<char> = password.chars().collect();
    let length = chars.len();

    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;
    let mut has_special = false;
    let mut distinct: HashSet<char> = HashSet::new();
    let mut counts: HashMap<char, u32> = HashMap::new();

    for &c in &chars {
        has_upper |= c.is_ascii_uppercase();
        has_lower |= c.is_ascii_lowercase();
        has_digit |= c.is_ascii_digit();
        has_special |= SPECIAL_CHARS.contains(c);
        distinct.insert(c);
        *counts.entry(c).or_insert(0) += 1;
    }

    let sequential_chars = chars
        .windows(3)
        .filter(|w| {
            w[1] as u32 == w[0] as u32 + 1 && w[2] as u32 == w[1] as u32 + 1
        })
        .count() as u32;

    let repeated_chars = chars.windows(2).filter(|w| w[0] == w[1]).count() as u32;

    let lowered = password.to_lowercase();
    let common_patterns = COMMON_PATTERNS
        .iter()
        .filter(|pattern| lowered.contains(*pattern))
        .count() as u32;

    let entropy = counts
        .values()
        .map(|&count| {
            let p = f64::from(count) / length as f64;
            -p * p.log2()
        })
        .sum::<f64>();

    PasswordFeatures {
        length,
        has_upper,
        has_lower,
        has_digit,
        has_special,
        char_diversity: distinct.len() as f64 / length as f64,
        sequential_chars,
        repeated_chars,
        common_patterns,
        entropy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_control_chars() {
        assert_eq!(sanitize("pa\x07ss\x1b"), "pass");
        assert_eq!(sanitize("a\nb\tc"), "a\nb\tc");
    }

    #[test]
    fn test_sanitize_truncates() {
        let long: String = std::iter::repeat('x').take(2000).collect();
        assert_eq!(sanitize(&long).chars().count(), MAX_PASSWORD_LEN);
    }

    #[test]
    fn test_extract_rejects_empty() {
        assert_eq!(extract(""), Err(AnalysisError::EmptyPassword));
        // control-only input sanitizes to empty
        assert_eq!(extract("\x01\x02"), Err(AnalysisError::EmptyPassword));
    }

    #[test]
    fn test_class_flags() {
        let features = extract("Ab1!").unwrap();
        assert!(features.has_upper);
        assert!(features.has_lower);
        assert!(features.has_digit);
        assert!(features.has_special);

        let features = extract("abcdef").unwrap();
        assert!(!features.has_upper);
        assert!(!features.has_digit);
        assert!(!features.has_special);
    }

    #[test]
    fn test_entropy_zero_for_repeated_char() {
        for len in [1, 4, 32] {
            let password: String = std::iter::repeat('a').take(len).collect();
            let features = extract(&password).unwrap();
            assert_eq!(features.entropy, 0.0, "length {}", len);
        }
    }

    #[test]
    fn test_entropy_two_distinct_chars() {
        // Uniform over two symbols is exactly one bit
        let features = extract("ab").unwrap();
        assert!((features.entropy - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_char_diversity() {
        let features = extract("abcd").unwrap();
        assert_eq!(features.char_diversity, 1.0);

        let features = extract("aaaa").unwrap();
        assert_eq!(features.char_diversity, 0.25);
    }

    #[test]
    fn test_sequential_runs_overlap_independently() {
        assert_eq!(extract("abcabc").unwrap().sequential_chars, 2);
        assert_eq!(extract("abcd").unwrap().sequential_chars, 2);
        assert_eq!(extract("aZx9Ky").unwrap().sequential_chars, 0);
    }

    #[test]
    fn test_repeated_pairs() {
        assert_eq!(extract("aabb").unwrap().repeated_chars, 2);
        assert_eq!(extract("aaa").unwrap().repeated_chars, 2);
        assert_eq!(extract("abab").unwrap().repeated_chars, 0);
    }

    #[test]
    fn test_common_patterns_case_insensitive() {
        let features = extract("Password123").unwrap();
        // matches at least "password" and "123"
        assert!(features.common_patterns >= 2);

        assert_eq!(extract("xkT9zQ2mNv").unwrap().common_patterns, 0);
    }

    #[test]
    fn test_numeric_run_scenario() {
        let features = extract("123456").unwrap();
        assert_eq!(features.length, 6);
        assert!(!features.has_upper);
        assert!(!features.has_lower);
        assert!(features.has_digit);
        assert!(!features.has_special);
        // 123, 234, 345, 456
        assert_eq!(features.sequential_chars, 4);
        // "123" and "123456" both match
        assert!(features.common_patterns >= 1);
    }
}
