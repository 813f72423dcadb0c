//! A contiguous phone group with at most one vowel nucleus.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::errors::PhonologyError;
use crate::tables::{self, PRIMARY_STRESS, SECONDARY_STRESS};

/// One syllable of a pronunciation.
///
/// Holds at most one vowel; consonant-only fragments (sonorant-bearing
/// onset/coda remnants) are allowed and simply have no nucleus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllable {
    phones: Vec<SmolStr>,
}

impl Syllable {
    /// Builds a syllable, enforcing the single-nucleus invariant.
    pub fn new<I, S>(phones: I) -> Result<Syllable, PhonologyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let phones: Vec<SmolStr> = phones.into_iter().map(Into::into).collect();
        if phones.iter().any(|phone| phone.is_empty()) {
            return Err(PhonologyError::NullPhone);
        }

        let cv_shape: String = phones
            .iter()
            .map(|phone| if tables::is_vowel(phone) { 'V' } else { 'C' })
            .collect();
        if cv_shape.chars().filter(|&c| c == 'V').count() > 1 {
            return Err(PhonologyError::TooManyVowelsInSyllable {
                syllable: phones.join(","),
                cv_shape,
            });
        }

        Ok(Syllable { phones })
    }

    /// Builds a syllable without the nucleus check.
    ///
    /// Alignment re-flow can transiently place a displaced vowel in a
    /// neighbouring syllable's window when the match is poor; those
    /// windows still need to round-trip as syllables.
    pub(crate) fn from_raw(phones: Vec<SmolStr>) -> Syllable {
        Syllable { phones }
    }

    /// The phones in order.
    pub fn phones(&self) -> &[SmolStr] {
        &self.phones
    }

    /// Number of phones.
    pub fn len(&self) -> usize {
        self.phones.len()
    }

    /// True if the syllable holds no phones.
    pub fn is_empty(&self) -> bool {
        self.phones.is_empty()
    }

    /// Whether any phone carries the primary stress diacritic.
    pub fn has_stress(&self) -> bool {
        self.phones
            .iter()
            .any(|phone| phone.contains(PRIMARY_STRESS))
    }

    /// Whether any phone carries the secondary stress diacritic.
    pub fn has_secondary_stress(&self) -> bool {
        self.phones
            .iter()
            .any(|phone| phone.contains(SECONDARY_STRESS))
    }

    /// The vowel phone, if this syllable has one.
    pub fn nucleus(&self) -> Option<&SmolStr> {
        self.phones.iter().find(|phone| tables::is_vowel(phone))
    }

    /// Position of the vowel within the syllable, if any.
    pub fn nucleus_index(&self) -> Option<usize> {
        self.phones.iter().position(|phone| tables::is_vowel(phone))
    }
}
