//! Canned text for common parts of a meeting.

use std::{fmt, str::FromStr};

use crate::error::Error;

/// Standard meeting agenda.
pub const MEETING_AGENDA: &str = "1. Call to Order
2. Roll Call
3. Adoption of Agenda
4. Approval of Minutes
5. Announcements
6. Presentations & Discussions
7. Old Business
8. New Business
9. Roll Call
10. Adjournment

";

/// A stock phrase recorded against a timestamp.
///
/// Blanks to fill in are written as `___`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    CallToOrder,
    Quorum,
    Adopted,
    Motion,
    Carried,
    Failed,
}

impl Phrase {
    pub const ALL: [Self; 6] = [
        Self::CallToOrder,
        Self::Quorum,
        Self::Adopted,
        Self::Motion,
        Self::Carried,
        Self::Failed,
    ];

    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::CallToOrder => "Called to order by ___",
            Self::Quorum => "Quorum present",
            Self::Adopted => "Adopted without objection",
            Self::Motion => "Motion to ___ made by ___, seconded by ___",
            Self::Carried => {
                "The motion carried with ___ for, ___ against, ___ present/not voting, and ___ abstentions"
            }
            Self::Failed => {
                "The motion did not carry with ___ for, ___ against, ___ present/not voting, and ___ abstentions"
            }
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CallToOrder => "call-to-order",
            Self::Quorum => "quorum",
            Self::Adopted => "adopted",
            Self::Motion => "motion",
            Self::Carried => "carried",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Phrase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownPhrase(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("call-to-order", Phrase::CallToOrder)]
    #[case("Quorum", Phrase::Quorum)]
    #[case("carried", Phrase::Carried)]
    fn parses_names(#[case] name: &str, #[case] expected: Phrase) {
        assert_eq!(name.parse::<Phrase>(), Ok(expected));
    }

    #[test]
    fn names_roundtrip() {
        for phrase in Phrase::ALL {
            assert_eq!(phrase.to_string().parse::<Phrase>(), Ok(phrase));
        }
    }

    #[test]
    fn unknown_name_lists_choices() {
        let err = "vote".parse::<Phrase>().unwrap_err();
        assert!(err.to_string().contains("call-to-order, quorum"));
    }

    #[test]
    fn agenda_ends_with_blank_line() {
        assert!(MEETING_AGENDA.starts_with("1. Call to Order\n"));
        assert!(MEETING_AGENDA.ends_with("10. Adjournment\n\n"));
    }
}
