//! Integration tests for numeric token recognition.
//!
//! The scanner is checked against an independent regex describing the same
//! token shape, plus property tests for the boundary rules.

use pdf2xlsx::numbers::{extract_numbers, is_number_token, NumberScanner};
use proptest::prelude::*;
use regex::Regex;

fn token_regex() -> Regex {
    Regex::new(r"^[-+]?\$?\d{1,3}(?:,\d{3})*(?:\.\d+)?%?$").unwrap()
}

/// Reference extraction: whitespace runs that fully match the token shape.
fn reference_extract(line: &str) -> Vec<String> {
    let re = token_regex();
    line.split_whitespace()
        .filter(|run| run.is_ascii() && re.is_match(run))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_documented_examples() {
    assert_eq!(
        extract_numbers("Total: $1,234.56 and -15% change"),
        vec!["$1,234.56", "-15%"]
    );
    assert!(extract_numbers("v1.2").is_empty());
    assert!(extract_numbers("Quarterly summary").is_empty());
}

#[test]
fn test_statement_line() {
    let line = "Balance +$12,000.00 due 15 days, rate 4.25% (APR) ref 2024";
    assert_eq!(extract_numbers(line), vec!["+$12,000.00", "15", "4.25%"]);
}

#[test]
fn test_scanner_agrees_with_reference_on_samples() {
    let samples = [
        "1 12 123 1234 1,234 12,345 123,456 1,2345 1,23",
        "$0.99 -$0.99 +0.5% 50% %50 $ - + .5 5.",
        "tab\tseparated\t7\t8,000",
        "1,000,000.000001% 999,999,999",
        "x1 1x 1.1.1 1,,000 --1 +-1",
    ];
    for line in samples {
        assert_eq!(extract_numbers(line), reference_extract(line), "line: {:?}", line);
    }
}

#[test]
fn test_offsets_point_at_tokens() {
    let line = "a 10 b  $2.50 c";
    for m in NumberScanner::new(line) {
        assert_eq!(&line[m.offset..m.offset + m.text.len()], m.text);
    }
}

proptest! {
    #[test]
    fn prop_no_digits_no_tokens(line in "[^0-9]{0,64}") {
        prop_assert!(extract_numbers(&line).is_empty());
    }

    #[test]
    fn prop_matches_reference(line in "[-+$%,. 0-9a-z]{0,48}") {
        prop_assert_eq!(extract_numbers(&line), reference_extract(&line));
    }

    #[test]
    fn prop_tokens_are_substrings(line in "\\PC{0,48}") {
        for token in extract_numbers(&line) {
            prop_assert!(line.contains(&token));
            prop_assert!(!token.chars().any(char::is_whitespace));
        }
    }

    #[test]
    fn prop_grouped_integers_accepted(lead in 1u32..1000, groups in proptest::collection::vec(0u32..1000, 0..4)) {
        let mut token = lead.to_string();
        for g in groups {
            token.push_str(&format!(",{:03}", g));
        }
        prop_assert!(is_number_token(&token));
    }

    #[test]
    fn prop_letter_prefix_rejected(n in 0u32..1_000_000, c in "[a-zA-Z]") {
        let candidate = format!("{}{}", c, n);
        prop_assert!(extract_numbers(&candidate).is_empty());
    }
}
