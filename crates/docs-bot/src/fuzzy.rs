//! Fuzzy string scoring for section titles.
//!
//! Scores are on a 0-100 scale. [`token_set_ratio`] is order independent and
//! treats a query whose words all appear in a title as a perfect match.

use std::collections::BTreeSet;

/// Normalize a string for comparison.
///
/// Drops non-ASCII characters, replaces everything that is not alphanumeric
/// or `_` with a space, lowercases, and trims.
#[must_use]
pub fn full_process(s: &str) -> String {
    let replaced: String = s
        .chars()
        .filter(char::is_ascii)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();
    replaced.trim().to_string()
}

/// Indel similarity of two strings: `2 * LCS / (len_a + len_b)`, scaled to 0-100.
///
/// Either string empty scores 0.
#[must_use]
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let lcs = longest_common_subsequence(&a, &b);
    let similarity = (2 * lcs) as f64 / (a.len() + b.len()) as f64;
    (similarity * 100.0).round_ties_even() as u8
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Token-set similarity between two strings.
///
/// Both inputs are normalized with [`full_process`] and split into word sets.
/// The score is the best [`ratio`] among the sorted intersection and the
/// intersection extended with each side's remaining words.
#[must_use]
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let processed_a = full_process(a);
    let processed_b = full_process(b);
    if processed_a.is_empty() || processed_b.is_empty() {
        return 0;
    }

    let tokens_a: BTreeSet<&str> = processed_a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = processed_b.split_whitespace().collect();

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let sorted_sect = intersection.join(" ");
    let combined_a = format!("{sorted_sect} {}", only_a.join(" "))
        .trim()
        .to_string();
    let combined_b = format!("{sorted_sect} {}", only_b.join(" "))
        .trim()
        .to_string();

    ratio(&sorted_sect, &combined_a)
        .max(ratio(&sorted_sect, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

/// Title-case a string: the first letter after any non-letter is uppercased,
/// every other letter lowercased.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_process() {
        assert_eq!(full_process("  re.Search "), "re search");
        assert_eq!(full_process("__init__"), "__init__");
        assert_eq!(full_process("caf\u{e9}!"), "caf");
        assert_eq!(full_process("..."), "");
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio("while", "while"), 100);
        assert_eq!(ratio("abc", "xyz"), 0);
        assert_eq!(ratio("", "abc"), 0);
        // LCS("while", "while statement") = 5, 10 / 20
        assert_eq!(ratio("while", "while statement"), 50);
    }

    #[test]
    fn test_ratio_rounds_half_to_even() {
        // 2 * 3 / 8 = 0.75 exactly
        assert_eq!(ratio("abc", "abcde"), 75);
        // 2 * 7 / 16 = 87.5 rounds to 88
        assert_eq!(ratio("abcdefgh", "abcdefgx"), 88);
    }

    #[test]
    fn test_identical_title_scores_100() {
        assert_eq!(
            token_set_ratio("the while statement", "the while statement"),
            100
        );
        assert_eq!(
            token_set_ratio("the while statement", "The While Statement"),
            100
        );
    }

    #[test]
    fn test_subset_scores_100() {
        assert_eq!(token_set_ratio("the while statement", "while"), 100);
        assert_eq!(token_set_ratio("the while statement", "statement while"), 100);
    }

    #[test]
    fn test_disjoint_scores_low() {
        assert!(token_set_ratio("the while statement", "zip") < 50);
        assert!(token_set_ratio("function definitions", "pathlib.Path") <= 85);
    }

    #[test]
    fn test_empty_after_processing_scores_zero() {
        assert_eq!(token_set_ratio("the while statement", ""), 0);
        assert_eq!(token_set_ratio("the while statement", ",,"), 0);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("the while statement"), "The While Statement");
        assert_eq!(title_case("f-strings"), "F-Strings");
        assert_eq!(title_case("LAMBDAS"), "Lambdas");
        assert_eq!(title_case("it's"), "It'S");
    }
}
