//! Acronym footnotes.
//!
//! Marks the first use of each known acronym with a Markdown footnote
//! reference and appends the matching definitions at the end of the
//! document. Numbers are handed out in table order, not text order: the
//! table is walked key by key and each acronym found in the text takes the
//! next number.

use regex::Regex;
use tracing::info;

use crate::error::{Error, Result};

/// Acronyms defined for every new session, in numbering order.
pub const DEFAULT_FOOTNOTES: &[(&str, &str)] = &[
    (
        "UDAA",
        "Urban Development Action Area - A designation for areas requiring coordinated public action",
    ),
    (
        "UDAAP",
        "Urban Development Action Area Project - A tax exemption program for rehabilitation or new construction of housing on formerly city-owned land",
    ),
    (
        "MIH",
        "Mandatory Inclusionary Housing - Requires a share of new housing in rezoned areas to be permanently affordable",
    ),
    (
        "SHLP",
        "Supportive Housing Loan Program - Loans to developers of permanent supportive housing with on-site social services",
    ),
    (
        "ELLA",
        "Extremely Low and Low-Income Affordability Program - Funds new construction of low-income multi-family rental projects",
    ),
    (
        "AMI",
        "Area Median Income - The midpoint of a region's income distribution",
    ),
    ("HPD", "Department of Housing Preservation and Development"),
    (
        "ULURP",
        "Uniform Land Use Review Procedure - NYC's public review process for land use changes",
    ),
    (
        "FAR",
        "Floor Area Ratio - The ratio of a building's total floor area to the size of the land upon which it is built",
    ),
    (
        "CEQR",
        "City Environmental Quality Review - NYC's environmental review process",
    ),
    ("DCP", "Department of City Planning"),
    ("BSA", "Board of Standards and Appeals"),
    ("CPC", "City Planning Commission"),
    ("SCRIE", "Senior Citizen Rent Increase Exemption"),
    ("DRIE", "Disability Rent Increase Exemption"),
];

/// Insertion-ordered map from acronym to definition.
///
/// Entries can be added or redefined but not removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootnoteTable {
    entries: Vec<(String, String)>,
}

impl Default for FootnoteTable {
    fn default() -> Self {
        DEFAULT_FOOTNOTES.iter().copied().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FootnoteTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::empty();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl FootnoteTable {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Define `acronym`, replacing an existing definition in place.
    pub fn insert(&mut self, acronym: impl Into<String>, definition: impl Into<String>) {
        let acronym = acronym.into();
        let definition = definition.into();
        match self.entries.iter_mut().find(|(key, _)| *key == acronym) {
            Some((_, existing)) => *existing = definition,
            None => self.entries.push((acronym, definition)),
        }
    }

    /// Parse and insert an `ACRONYM|Definition` entry.
    ///
    /// # Errors
    /// Returns [`Error::InvalidFootnoteEntry`] when the entry is malformed.
    pub fn add_entry(&mut self, entry: &str) -> Result<()> {
        let (acronym, definition) = parse_entry(entry)?;
        self.insert(acronym, definition);
        Ok(())
    }

    /// Insert every entry of a definitions file.
    ///
    /// Each non-blank line not starting with `#` must be an
    /// `ACRONYM|Definition` entry.
    ///
    /// # Errors
    /// Returns [`Error::InvalidFootnoteEntry`] for the first malformed line;
    /// earlier lines stay inserted.
    pub fn add_definitions(&mut self, source: &str) -> Result<()> {
        source
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .try_for_each(|l| self.add_entry(l))
    }

    #[must_use]
    pub fn get(&self, acronym: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == acronym)
            .map(|(_, def)| def.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split an `ACRONYM|Definition` entry at its first `|`.
///
/// # Errors
/// Returns [`Error::InvalidFootnoteEntry`] if there is no `|` or either side
/// is blank.
pub fn parse_entry(entry: &str) -> Result<(&str, &str)> {
    let invalid = || Error::InvalidFootnoteEntry(entry.to_string());
    let (acronym, definition) = entry.split_once('|').ok_or_else(invalid)?;
    let (acronym, definition) = (acronym.trim(), definition.trim());
    if acronym.is_empty() || definition.is_empty() {
        return Err(invalid());
    }
    Ok((acronym, definition))
}

/// Byte offset just past the first unmarked, word-bounded `acronym`.
///
/// Word boundaries are ASCII: a non-ASCII letter next to the acronym does
/// not join it to a longer word.
fn first_unmarked(text: &str, acronym: &str) -> Option<usize> {
    let re = Regex::new(&format!(r"(?-u:\b){}(?-u:\b)", regex::escape(acronym))).ok()?;
    re.find_iter(text)
        .map(|m| m.end())
        .find(|&end| !text[end..].starts_with("[^"))
}

/// Footnote the first occurrence of each acronym in `table`.
///
/// Returns `text` unchanged when no acronym occurs.
///
/// # Examples
///
/// ```
/// use mdminutes::{FootnoteTable, annotate};
///
/// let table: FootnoteTable = [("HPD", "Dept...")].into_iter().collect();
/// assert_eq!(
///     annotate("HPD met. Later HPD followed up.", &table),
///     "HPD[^1] met. Later HPD followed up.\n\n[^1]: Dept...\n"
/// );
/// ```
#[must_use]
pub fn annotate(text: &str, table: &FootnoteTable) -> String {
    let mut out = text.to_string();
    let mut definitions = Vec::new();
    for (acronym, definition) in table.iter() {
        if let Some(end) = first_unmarked(&out, acronym) {
            definitions.push(definition);
            out.insert_str(end, &format!("[^{}]", definitions.len()));
        }
    }
    if definitions.is_empty() {
        return out;
    }
    info!(count = definitions.len(), "added footnotes");
    out.push_str("\n\n");
    for (idx, definition) in definitions.iter().enumerate() {
        out.push_str(&format!("[^{}]: {definition}\n", idx + 1));
    }
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn table(entries: &[(&str, &str)]) -> FootnoteTable {
        entries.iter().copied().collect()
    }

    #[test]
    fn marks_first_occurrence_only() {
        let t = table(&[("HPD", "Dept...")]);
        assert_eq!(
            annotate("HPD met. Later HPD followed up.", &t),
            "HPD[^1] met. Later HPD followed up.\n\n[^1]: Dept...\n"
        );
    }

    #[test]
    fn unchanged_without_matches() {
        let t = table(&[("HPD", "Dept...")]);
        assert_eq!(annotate("Nothing here.", &t), "Nothing here.");
    }

    #[test]
    fn numbers_follow_table_order() {
        let t = table(&[("AMI", "Area Median Income"), ("HPD", "Housing")]);
        assert_eq!(
            annotate("HPD set AMI.", &t),
            "HPD[^2] set AMI[^1].\n\n[^1]: Area Median Income\n[^2]: Housing\n"
        );
    }

    #[test]
    fn skips_absent_acronyms_when_numbering() {
        let t = table(&[("DCP", "City Planning"), ("BSA", "Standards")]);
        assert_eq!(annotate("BSA", &t), "BSA[^1]\n\n[^1]: Standards\n");
    }

    #[rstest]
    #[case("UDAAP hearing")]
    #[case("hpd")]
    #[case("XHPD")]
    #[case("HPD_x")]
    fn respects_word_boundaries_and_case(#[case] text: &str) {
        let t = table(&[("HPD", "Housing"), ("UDAA", "Area")]);
        assert_eq!(annotate(text, &t), text);
    }

    #[rstest]
    #[case("éHPD met", "éHPD[^1] met")]
    #[case("HPDé", "HPD[^1]é")]
    fn non_ascii_letters_are_boundaries(#[case] text: &str, #[case] marked: &str) {
        let t = table(&[("HPD", "Housing")]);
        assert_eq!(annotate(text, &t), format!("{marked}\n\n[^1]: Housing\n"));
    }

    #[test]
    fn nested_acronyms_are_distinct() {
        let t = table(&[("UDAA", "Area"), ("UDAAP", "Project")]);
        assert_eq!(
            annotate("UDAAP within a UDAA", &t),
            "UDAAP[^2] within a UDAA[^1]\n\n[^1]: Area\n[^2]: Project\n"
        );
    }

    #[test]
    fn skips_already_marked_occurrence() {
        let t = table(&[("HPD", "Housing")]);
        assert_eq!(
            annotate("HPD[^1] and HPD", &t),
            "HPD[^1] and HPD[^1]\n\n[^1]: Housing\n"
        );
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut t = table(&[("A", "one"), ("B", "two")]);
        t.insert("A", "uno");
        t.insert("C", "three");
        let keys: Vec<_> = t.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["A", "B", "C"]);
        assert_eq!(t.get("A"), Some("uno"));
    }

    #[test]
    fn default_table_has_builtin_acronyms() {
        let t = FootnoteTable::default();
        assert_eq!(t.len(), DEFAULT_FOOTNOTES.len());
        assert_eq!(t.iter().next().map(|(k, _)| k), Some("UDAA"));
        assert_eq!(t.get("CPC"), Some("City Planning Commission"));
    }

    #[rstest]
    #[case("NYC | New York City", ("NYC", "New York City"))]
    #[case("URL|a|b", ("URL", "a|b"))]
    fn parses_entries(#[case] entry: &str, #[case] expected: (&str, &str)) {
        assert_eq!(parse_entry(entry).unwrap(), expected);
    }

    #[rstest]
    #[case("no separator")]
    #[case("|definition")]
    #[case("KEY| ")]
    fn rejects_bad_entries(#[case] entry: &str) {
        assert_eq!(
            parse_entry(entry),
            Err(Error::InvalidFootnoteEntry(entry.to_string()))
        );
    }

    #[test]
    fn reads_definitions_file() {
        let mut t = FootnoteTable::empty();
        t.add_definitions("# local terms\n\nCB|Community Board\nNYC|New York City\n")
            .unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.get("CB"), Some("Community Board"));
    }
}
