//! Content line unfolding.
//!
//! Calendar documents fold long content lines by breaking them and starting
//! each continuation with a single space or tab. [`unfold`] rejoins them and
//! [`Unfolded::lines`] yields the logical lines.

use std::str::Lines;

/// A calendar document with its folded lines rejoined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unfolded {
    text: String,
}

impl Unfolded {
    /// Returns the logical lines, split on LF or CRLF.
    pub fn lines(&self) -> Lines<'_> {
        self.text.lines()
    }

    /// Returns the unfolded text.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Rejoins folded content lines.
///
/// Each line break followed by one space or tab is removed together with
/// that whitespace character, so fragments are appended with nothing
/// inserted between them. A continuation at the very start of the text has
/// nothing to join and is kept as is.
pub fn unfold(text: &str) -> Unfolded {
    Unfolded {
        text: icalendar::parser::unfold(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unfold_to_vec(text: &str) -> Vec<String> {
        unfold(text).lines().map(str::to_string).collect()
    }

    #[test]
    fn plain_lines_pass_through() {
        assert_eq!(
            unfold_to_vec("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR"),
            vec!["BEGIN:VCALENDAR", "VERSION:2.0", "END:VCALENDAR"]
        );
    }

    #[test]
    fn lf_and_crlf_mixed() {
        assert_eq!(unfold_to_vec("A:1\nB:2\r\nC:3\n"), vec!["A:1", "B:2", "C:3"]);
    }

    #[test]
    fn single_fold_strips_one_whitespace_char() {
        assert_eq!(
            unfold_to_vec("SUMMARY:Airbnb (Not\r\n  available)\r\nEND:VEVENT"),
            vec!["SUMMARY:Airbnb (Not available)", "END:VEVENT"]
        );
    }

    #[test]
    fn tab_continuation_and_deep_folds() {
        assert_eq!(
            unfold_to_vec("DESCRIPTION:one\n\ttwo\n three\r\n\tfour\nX:y"),
            vec!["DESCRIPTION:onetwothreefour", "X:y"]
        );
    }

    #[test]
    fn folded_lines_are_not_reemitted() {
        let lines = unfold_to_vec("A:x\n y\n z\nB:w");
        assert_eq!(lines, vec!["A:xyz", "B:w"]);
    }

    #[test]
    fn leading_continuation_stands_alone() {
        assert_eq!(unfold_to_vec(" orphan\nA:1"), vec![" orphan", "A:1"]);
    }

    #[test]
    fn unfolded_text_is_exposed() {
        assert_eq!(unfold("A:1\n 2").as_str(), "A:12");
    }
}
