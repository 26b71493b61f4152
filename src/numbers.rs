//! Numeric token recognition.
//!
//! Finds numbers, currency amounts and percentages in a line of text and
//! returns them verbatim, in left-to-right order.
//!
//! A token is a whitespace-delimited run that fully matches
//!
//! ```text
//! [+|-] [$] D{1,3} (,DDD)* [.D+] [%]
//! ```
//!
//! Matching works in two stages: the line is split on whitespace into
//! candidate runs, then each run is fed through a small deterministic state
//! machine. A run only counts when the machine ends in an accepting state, so
//! a number glued to other characters (`v1.2`, `12kg`, `(42)`) is rejected.
//!
//! Thousands grouping is checked by shape only: every group after a comma
//! must have exactly three digits, the leading group one to three. `1,23`
//! and `1234` are rejected, `1,234,567` is accepted.
//!
//! # Example
//!
//! ```
//! use pdf2xlsx::numbers::extract_numbers;
//!
//! let tokens = extract_numbers("Total: $1,234.56 and -15% change");
//! assert_eq!(tokens, vec!["$1,234.56", "-15%"]);
//! ```

/// A recognized token and its byte offset in the scanned line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberMatch<'a> {
    /// The token exactly as it appears in the input
    pub text: &'a str,
    /// Byte offset of the token in the input
    pub offset: usize,
}

/// Scanner state after consuming a prefix of a candidate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing consumed
    Start,
    /// `+` or `-`
    Signed,
    /// `$`
    Currency,
    /// Digits of the leading group (1-3)
    Leading(u8),
    /// `,` waiting for a group
    GroupSep,
    /// Digits of a thousands group (1-3, only 3 may continue)
    Group(u8),
    /// `.` waiting for the fraction
    Point,
    /// One or more fraction digits
    Fraction,
    /// Trailing `%`
    Percent,
}

impl State {
    fn step(self, byte: u8) -> Option<State> {
        use State::*;

        let digit = byte.is_ascii_digit();
        match (self, byte) {
            (Start, b'+' | b'-') => Some(Signed),
            (Start | Signed, b'$') => Some(Currency),
            (Start | Signed | Currency, _) if digit => Some(Leading(1)),
            (Leading(n), _) if digit && n < 3 => Some(Leading(n + 1)),
            (GroupSep, _) if digit => Some(Group(1)),
            (Group(n), _) if digit && n < 3 => Some(Group(n + 1)),
            (Point | Fraction, _) if digit => Some(Fraction),
            (Leading(_) | Group(3), b',') => Some(GroupSep),
            (Leading(_) | Group(3), b'.') => Some(Point),
            (Leading(_) | Group(3) | Fraction, b'%') => Some(Percent),
            _ => None,
        }
    }

    fn is_accepting(self) -> bool {
        matches!(
            self,
            State::Leading(_) | State::Group(3) | State::Fraction | State::Percent
        )
    }
}

/// Check whether a whole candidate run has the shape of a numeric token.
///
/// The candidate must not contain whitespace; boundaries are the caller's
/// concern (see [`NumberScanner`]).
pub fn is_number_token(candidate: &str) -> bool {
    candidate
        .bytes()
        .try_fold(State::Start, State::step)
        .is_some_and(State::is_accepting)
}

/// Iterator over the numeric tokens of a line, left to right.
#[derive(Debug, Clone)]
pub struct NumberScanner<'a> {
    line: &'a str,
    runs: std::str::SplitWhitespace<'a>,
}

impl<'a> NumberScanner<'a> {
    /// Create a scanner over `line`.
    pub fn new(line: &'a str) -> Self {
        Self {
            line,
            runs: line.split_whitespace(),
        }
    }
}

impl<'a> Iterator for NumberScanner<'a> {
    type Item = NumberMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for run in self.runs.by_ref() {
            if is_number_token(run) {
                // `run` is a subslice of `line`
                let offset = run.as_ptr() as usize - self.line.as_ptr() as usize;
                return Some(NumberMatch { text: run, offset });
            }
        }
        None
    }
}

/// Extract every numeric token from `line` as owned strings.
pub fn extract_numbers(line: &str) -> Vec<String> {
    NumberScanner::new(line)
        .map(|m| m.text.to_string())
        .collect()
}
