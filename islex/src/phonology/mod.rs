//! Phone sequences and the operations the alignment engine builds on.

use std::ops::Add;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::errors::{ErrorReportingMode, PhonologyError};
use crate::tables::{self, DIACRITICS, FILLER, RHOTIC_SYMBOL, VOWEL_SYMBOL};

mod align;
mod entry;
mod matching;
mod syllabification;
mod syllable;

pub use self::entry::Entry;
pub use self::syllabification::Syllabification;
pub use self::syllable::Syllable;

/// An ordered sequence of phone tokens.
///
/// Each phone is an opaque IPA-ish token, possibly multi-character
/// (`"tʃ"`, `"ˈʌ"`), with stress and length diacritics embedded in the
/// token rather than stored separately.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhonemeList {
    phones: Vec<SmolStr>,
}

impl PhonemeList {
    /// Builds a phone list, rejecting empty phone tokens.
    pub fn new<I, S>(phones: I) -> Result<PhonemeList, PhonologyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let phones: Vec<SmolStr> = phones.into_iter().map(Into::into).collect();
        if phones.iter().any(|phone| phone.is_empty()) {
            return Err(PhonologyError::NullPhone);
        }
        Ok(PhonemeList { phones })
    }

    pub(crate) fn from_raw(phones: Vec<SmolStr>) -> PhonemeList {
        PhonemeList { phones }
    }

    /// The phones in order.
    pub fn phones(&self) -> &[SmolStr] {
        &self.phones
    }

    /// Number of phones.
    pub fn len(&self) -> usize {
        self.phones.len()
    }

    /// True if the list holds no phones.
    pub fn is_empty(&self) -> bool {
        self.phones.is_empty()
    }

    /// Number of alignment filler tokens in the list.
    pub fn filler_count(&self) -> usize {
        self.phones
            .iter()
            .filter(|phone| phone.as_str() == FILLER)
            .count()
    }

    /// Returns a copy with all diacritics removed from every phone.
    pub fn strip_diacritics(&self) -> PhonemeList {
        let phones = self
            .phones
            .iter()
            .map(|phone| SmolStr::from(strip_diacritics(phone)))
            .collect();
        PhonemeList { phones }
    }

    /// Collapses every phone to a coarse class symbol.
    ///
    /// Diacritics are stripped and the phone is lowercased; rhotics
    /// collapse to [`RHOTIC_SYMBOL`], vowels to [`VOWEL_SYMBOL`], and
    /// anything else is reduced to its first character. The class
    /// symbols map to themselves, so a second pass is a no-op.
    pub fn simplify(&self) -> Result<PhonemeList, PhonologyError> {
        let mut simplified = Vec::with_capacity(self.phones.len());
        for phone in &self.phones {
            let stripped = strip_diacritics(phone);
            let lowered = stripped.to_lowercase();

            let class = if tables::is_rhotic(&lowered) {
                SmolStr::new(RHOTIC_SYMBOL)
            } else if stripped == VOWEL_SYMBOL || tables::is_vowel(&lowered) {
                SmolStr::new(VOWEL_SYMBOL)
            } else {
                match lowered.chars().next() {
                    Some(c) => SmolStr::from(c.to_string()),
                    None => return Err(PhonologyError::NullPhone),
                }
            };
            simplified.push(class);
        }
        Ok(PhonemeList { phones: simplified })
    }

    /// Partitions the phones into syllables shaped like `target`.
    ///
    /// Each chunk takes as many phones as the corresponding target
    /// syllable holds; chunks left empty by a short phone list are
    /// dropped. A total-size mismatch is a soft error governed by
    /// `on_size_error`; best-effort output is produced either way.
    /// Stress indices of the result are re-derived from the stress
    /// diacritics found in the partitioned phones.
    ///
    /// The chunks skip the single-nucleus check: a reduced or
    /// epenthesized pronunciation can put two vowels in one target
    /// window, and a synthesized possessive always puts the clitic's
    /// `ɪ` next to the stem's last vowel.
    pub fn syllabify(
        &self,
        target: &Syllabification,
        on_size_error: ErrorReportingMode,
    ) -> Result<Syllabification, PhonologyError> {
        let expected: usize = target.syllables().iter().map(|s| s.len()).sum();
        if expected != self.len() {
            on_size_error.report(PhonologyError::ImpossibleSyllabification {
                expected,
                actual: self.len(),
            })?;
        }

        let mut start = 0;
        let mut syllables: Vec<Syllable> = Vec::with_capacity(target.len());
        for syllable in target.syllables() {
            let from = start.min(self.phones.len());
            let to = (start + syllable.len()).min(self.phones.len());
            if from < to {
                syllables.push(Syllable::from_raw(self.phones[from..to].to_vec()));
            }
            start += syllable.len();
        }

        Ok(Syllabification::infer(syllables))
    }
}

impl Add for PhonemeList {
    type Output = PhonemeList;

    fn add(self, other: PhonemeList) -> PhonemeList {
        let mut phones = self.phones;
        phones.extend(other.phones);
        PhonemeList { phones }
    }
}

/// Aligns two pronunciations, exposed for callers that need the raw
/// equal-length sequences rather than a syllabification.
pub fn align_pronunciations(
    a: &PhonemeList,
    b: &PhonemeList,
    simplified_matching: bool,
) -> Result<(PhonemeList, PhonemeList), PhonologyError> {
    a.align(b, simplified_matching)
}

fn strip_diacritics(phone: &str) -> String {
    let mut out = phone.to_string();
    for diacritic in DIACRITICS {
        out = out.replace(diacritic, "");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phones(raw: &[&str]) -> PhonemeList {
        PhonemeList::new(raw.iter().copied()).unwrap()
    }

    #[test]
    fn rejects_empty_phones() {
        assert_eq!(
            Err(PhonologyError::NullPhone),
            PhonemeList::new(["b", "", "d"])
        );
    }

    #[test]
    fn concatenation() {
        let joined = phones(&["b", "i", "r", "d"]) + phones(&["c", "a", "k"]);
        assert_eq!(phones(&["b", "i", "r", "d", "c", "a", "k"]), joined);
    }

    #[test]
    fn strip_diacritics_removes_stress_and_length_marks() {
        assert_eq!(
            phones(&["b", "a", "t"]),
            phones(&["b", "ˈa", "t˺"]).strip_diacritics()
        );
    }

    #[test]
    fn simplify_collapses_classes() {
        assert_eq!(
            phones(&["V", "n", "V", "ð", "r"]),
            phones(&["ə", "n", "ˈʌ", "ð", "ɹ"]).simplify().unwrap()
        );
    }

    #[test]
    fn simplify_unifies_rhotics() {
        assert_eq!(
            phones(&["r", "r", "r"]),
            phones(&["rH", "rr", "r"]).simplify().unwrap()
        );
    }

    #[test]
    fn simplify_is_idempotent() {
        let once = phones(&["ə", "n", "ˈʌ", "ð", "ɚ", "tʃ", "k"])
            .simplify()
            .unwrap();
        assert_eq!(once, once.simplify().unwrap());
    }

    #[test]
    fn syllabify_with_matching_sizes() {
        let target = Syllabification::from_phone_lists(vec![
            vec!["ə".into()],
            vec!["n".into(), "ˈʌ".into()],
        ])
        .unwrap();
        let result = phones(&["ə", "n", "ˈʌ"])
            .syllabify(&target, ErrorReportingMode::Error)
            .unwrap();
        assert_eq!(vec![vec!["ə"], vec!["n", "ˈʌ"]], result.to_lists());
    }

    #[test]
    fn syllabify_drops_fully_elided_syllables() {
        let target = Syllabification::from_phone_lists(vec![
            vec!["ə".into()],
            vec!["n".into(), "ˈʌ".into()],
            vec!["ð".into(), "ɚ".into()],
        ])
        .unwrap();
        let result = phones(&["ə", "n", "ˈʌ"])
            .syllabify(&target, ErrorReportingMode::Silence)
            .unwrap();
        assert_eq!(vec![vec!["ə"], vec!["n", "ˈʌ"]], result.to_lists());
    }

    #[test]
    fn syllabify_allows_two_vowels_in_a_window() {
        // An epenthetic vowel lands in the same window as the real
        // nucleus; the partition still has to come back best-effort.
        let target =
            Syllabification::from_phone_lists(vec![vec!["k".into(), "ˈæ".into(), "l".into(), "t".into()]])
                .unwrap();
        let result = phones(&["k", "æ", "ə", "t"])
            .syllabify(&target, ErrorReportingMode::Error)
            .unwrap();
        assert_eq!(vec![vec!["k", "æ", "ə", "t"]], result.to_lists());
    }

    #[test]
    fn syllabify_size_mismatch_respects_error_mode() {
        let target = Syllabification::from_phone_lists(vec![
            vec!["ə".into()],
            vec!["n".into(), "ˈʌ".into()],
            vec!["ð".into(), "ɚ".into()],
        ])
        .unwrap();
        let err = phones(&["ə", "n", "ˈʌ"])
            .syllabify(&target, ErrorReportingMode::Error)
            .unwrap_err();
        assert_eq!(
            PhonologyError::ImpossibleSyllabification {
                expected: 5,
                actual: 3
            },
            err
        );
    }
}
