//! A word's phones partitioned into syllables, plus stress locations.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::errors::{ErrorReportingMode, PhonologyError};
use crate::tables::{FILLER, PRIMARY_STRESS, SECONDARY_STRESS};

use super::{PhonemeList, Syllable};

/// An ordered sequence of syllables with stress annotations.
///
/// `stressed_syllable_indices` lists the primary-stressed syllable
/// first, then any secondary-stressed syllables in order;
/// `stressed_vowel_indices` is parallel to it and gives the position of
/// the stressed vowel within its syllable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllabification {
    syllables: Vec<Syllable>,
    stressed_syllable_indices: Vec<usize>,
    stressed_vowel_indices: Vec<usize>,
}

impl Syllabification {
    /// Builds a syllabification with explicit stress indices.
    pub fn new(
        syllables: Vec<Syllable>,
        stressed_syllable_indices: Vec<usize>,
        stressed_vowel_indices: Vec<usize>,
    ) -> Result<Syllabification, PhonologyError> {
        for (&syllable_i, &vowel_i) in stressed_syllable_indices
            .iter()
            .zip(stressed_vowel_indices.iter())
        {
            if syllable_i >= syllables.len() || vowel_i >= syllables[syllable_i].len() {
                return Err(PhonologyError::Unexpected(format!(
                    "stress index ({}, {}) out of range for {} syllables",
                    syllable_i,
                    vowel_i,
                    syllables.len()
                )));
            }
        }

        Ok(Syllabification {
            syllables,
            stressed_syllable_indices,
            stressed_vowel_indices,
        })
    }

    /// Builds a syllabification, deriving stress indices by scanning
    /// the phones for stress diacritics.
    pub fn infer(syllables: Vec<Syllable>) -> Syllabification {
        let mut stressed_syllable_indices = Vec::new();
        let mut stressed_vowel_indices = Vec::new();

        for (syllable_i, syllable) in syllables.iter().enumerate() {
            for (phone_i, phone) in syllable.phones().iter().enumerate() {
                if phone.contains(PRIMARY_STRESS) {
                    stressed_syllable_indices.insert(0, syllable_i);
                    stressed_vowel_indices.insert(0, phone_i);
                    break;
                }
                if phone.contains(SECONDARY_STRESS) {
                    stressed_syllable_indices.push(syllable_i);
                    stressed_vowel_indices.push(phone_i);
                }
            }
        }

        Syllabification {
            syllables,
            stressed_syllable_indices,
            stressed_vowel_indices,
        }
    }

    /// Convenience constructor from raw phone lists, validating each
    /// syllable and inferring stress.
    pub fn from_phone_lists(lists: Vec<Vec<SmolStr>>) -> Result<Syllabification, PhonologyError> {
        let syllables = lists
            .into_iter()
            .map(Syllable::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Syllabification::infer(syllables))
    }

    /// The syllables in order.
    pub fn syllables(&self) -> &[Syllable] {
        &self.syllables
    }

    /// Stressed syllable positions, primary first.
    pub fn stressed_syllable_indices(&self) -> &[usize] {
        &self.stressed_syllable_indices
    }

    /// Stressed vowel positions within their syllables, parallel to
    /// [`stressed_syllable_indices`](Self::stressed_syllable_indices).
    pub fn stressed_vowel_indices(&self) -> &[usize] {
        &self.stressed_vowel_indices
    }

    /// Number of syllables.
    pub fn len(&self) -> usize {
        self.syllables.len()
    }

    /// True if there are no syllables.
    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }

    /// Whether any syllable carries primary stress.
    pub fn has_stress(&self) -> bool {
        self.syllables.iter().any(Syllable::has_stress)
    }

    /// Primary-stressed syllable indices followed by secondary-stressed
    /// ones, read off the phones themselves.
    pub fn stress(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .syllables
            .iter()
            .enumerate()
            .filter(|(_, syllable)| syllable.has_stress())
            .map(|(i, _)| i)
            .collect();
        indices.extend(
            self.syllables
                .iter()
                .enumerate()
                .filter(|(_, syllable)| syllable.has_secondary_stress())
                .map(|(i, _)| i),
        );
        indices
    }

    /// Flattens the syllables back into a single phone list.
    pub fn desyllabify(&self) -> PhonemeList {
        let phones = self
            .syllables
            .iter()
            .flat_map(|syllable| syllable.phones().iter().cloned())
            .collect();
        PhonemeList::from_raw(phones)
    }

    /// The syllables as plain phone lists.
    pub fn to_lists(&self) -> Vec<Vec<SmolStr>> {
        self.syllables
            .iter()
            .map(|syllable| syllable.phones().to_vec())
            .collect()
    }

    /// Total insertions needed on either side to reconcile this
    /// pronunciation with `target` after simplification. Zero means the
    /// two are phonetically identical at class resolution.
    pub fn diff_count(&self, target: &Syllabification) -> Result<usize, PhonologyError> {
        let (aligned_self, aligned_target) = self
            .desyllabify()
            .simplify()?
            .align(&target.desyllabify().simplify()?, false)?;
        Ok(aligned_self.filler_count() + aligned_target.filler_count())
    }

    /// Re-flows this syllabification's boundaries over an alignment
    /// against `target`, keeping the syllable structure but growing
    /// syllables to hold the fillers the alignment inserted.
    ///
    /// The result carries no stress indices; transferring stress is the
    /// caller's responsibility. This is a heuristic reshaping: when the
    /// two pronunciations diverge heavily it degrades to extra fillers
    /// rather than a phonologically meaningful analysis.
    pub fn stretch(&self, target: &PhonemeList) -> Result<Syllabification, PhonologyError> {
        let (aligned_self, _) = self.desyllabify().align(target, true)?;
        self.reflow(&aligned_self)
    }

    /// [`stretch`](Self::stretch) against another syllabification.
    pub fn morph(&self, target: &Syllabification) -> Result<Syllabification, PhonologyError> {
        self.stretch(&target.desyllabify())
    }

    /// Walks the syllables over the aligned phone sequence. Syllable
    /// `k` consumes `len(syllable_k)` positions; every filler inside
    /// the window displaced one real phone, so the window grows until
    /// the newly consumed chunk is filler-free. The last syllable takes
    /// all remaining positions so end-of-word insertions are not
    /// dropped.
    fn reflow(&self, aligned: &PhonemeList) -> Result<Syllabification, PhonologyError> {
        let phones = aligned.phones();
        let take = |from: usize, to: usize| -> Vec<SmolStr> {
            phones[from.min(phones.len())..to.min(phones.len())].to_vec()
        };

        let mut offset = 0;
        let mut syllables = Vec::with_capacity(self.syllables.len());
        for (index, syllable) in self.syllables.iter().enumerate() {
            let mut span = if index + 1 == self.syllables.len() {
                phones.len().saturating_sub(offset)
            } else {
                syllable.len()
            };

            let mut window = take(offset, offset + span);
            let mut chunk = window.clone();
            loop {
                let blanks = chunk
                    .iter()
                    .filter(|phone| phone.as_str() == FILLER)
                    .count();
                if blanks == 0 {
                    break;
                }
                chunk = take(offset + span, offset + span + blanks);
                span += blanks;
                window.extend(chunk.iter().cloned());
            }

            // An insertion right at a syllable boundary attaches to the
            // preceding syllable, not the following one.
            while offset + span < phones.len() && phones[offset + span].as_str() == FILLER {
                window.push(SmolStr::new(FILLER));
                span += 1;
            }

            offset += span;
            syllables.push(Syllable::from_raw(window));
        }

        Syllabification::new(syllables, vec![], vec![])
    }

    /// Adopts the primary stress location of `reference` when it still
    /// fits this syllabification's shape; out-of-range stress is a soft
    /// error.
    pub(crate) fn with_stress_from(
        mut self,
        reference: &Syllabification,
        mode: ErrorReportingMode,
    ) -> Result<Syllabification, PhonologyError> {
        let syllable_i = match reference.stressed_syllable_indices.first() {
            Some(&i) => i,
            None => return Ok(self),
        };
        let vowel_i = match reference.stressed_vowel_indices.first() {
            Some(&i) => i,
            None => return Ok(self),
        };

        if syllable_i < self.syllables.len() && vowel_i < self.syllables[syllable_i].len() {
            self.stressed_syllable_indices = vec![syllable_i];
            self.stressed_vowel_indices = vec![vowel_i];
            Ok(self)
        } else {
            mode.report(PhonologyError::StressMismatch {
                pronunciation: self.desyllabify().phones().join(" "),
            })?;
            Ok(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syllabification(lists: &[&[&str]]) -> Syllabification {
        Syllabification::from_phone_lists(
            lists
                .iter()
                .map(|syllable| syllable.iter().map(|p| SmolStr::new(p)).collect())
                .collect(),
        )
        .unwrap()
    }

    fn as_str_lists(syllabification: &Syllabification) -> Vec<Vec<SmolStr>> {
        syllabification.to_lists()
    }

    #[test]
    fn length() {
        assert_eq!(1, syllabification(&[&["k", "ˈa", "t"]]).len());
        assert_eq!(
            3,
            syllabification(&[&["l", "ˈæ"], &["b", "ɚ"], &["ˌɪ", "n", "ɵ"]]).len()
        );
    }

    #[test]
    fn inferred_stress_indices() {
        let sut = syllabification(&[&["l", "ˈæ"], &["b", "ɚ"], &["ˌɪ", "n", "ɵ"]]);
        assert_eq!(&[0, 2], sut.stressed_syllable_indices());
        assert_eq!(&[1, 0], sut.stressed_vowel_indices());
    }

    #[test]
    fn has_stress() {
        assert!(syllabification(&[&["k", "ˈa", "t"]]).has_stress());
        assert!(!syllabification(&[&["k", "a", "t"]]).has_stress());
    }

    #[test]
    fn stress_lists_primary_then_secondary() {
        assert_eq!(
            vec![0, 2],
            syllabification(&[&["l", "ˈæ"], &["b", "ɚ"], &["ˌɪ", "n", "ɵ"]]).stress()
        );
        assert!(syllabification(&[&["l", "æ"], &["b", "ɚ"], &["ɪ", "n", "ɵ"]])
            .stress()
            .is_empty());
    }

    #[test]
    fn desyllabify_flattens() {
        assert_eq!(
            PhonemeList::new(["l", "ˈæ", "b", "ɚ", "ˌɪ", "n", "ɵ"]).unwrap(),
            syllabification(&[&["l", "ˈæ"], &["b", "ɚ"], &["ˌɪ", "n", "ɵ"]]).desyllabify()
        );
    }

    #[test]
    fn diff_count_of_identical_pronunciations_is_zero() {
        let a = syllabification(&[&["ə"], &["n", "ˈʌ"], &["ð", "ɚ"]]);
        assert_eq!(0, a.diff_count(&a).unwrap());
    }

    #[test]
    fn diff_count_counts_both_sides() {
        let a = syllabification(&[&["ə"], &["n", "ˈʌ"], &["ð", "ɚ"]]);
        let b = syllabification(&[&["ə"], &["n", "ˈʌ"]]);
        assert_eq!(2, a.diff_count(&b).unwrap());
    }

    #[test]
    fn morph_first_syllable_initial_pos() {
        let sut = syllabification(&[&["p", "m"], &["k", "n"]]);
        let target = syllabification(&[&["b", "p", "m"], &["k", "n"]]);
        assert_eq!(
            vec![vec!["''", "p", "m"], vec!["k", "n"]],
            as_str_lists(&sut.morph(&target).unwrap())
        );
    }

    #[test]
    fn morph_first_syllable_medial_pos() {
        let sut = syllabification(&[&["p", "m"], &["k", "n"]]);
        let target = syllabification(&[&["p", "ʌ", "m"], &["k", "n"]]);
        assert_eq!(
            vec![vec!["p", "''", "m"], vec!["k", "n"]],
            as_str_lists(&sut.morph(&target).unwrap())
        );
    }

    #[test]
    fn morph_first_syllable_final_pos() {
        let sut = syllabification(&[&["p", "m"], &["k", "n"]]);
        let target = syllabification(&[&["p", "m", "p"], &["k", "n"]]);
        assert_eq!(
            vec![vec!["p", "m", "''"], vec!["k", "n"]],
            as_str_lists(&sut.morph(&target).unwrap())
        );
    }

    #[test]
    fn morph_boundary_insertion_attaches_to_preceding_syllable() {
        // The flattened target is identical to the final-pos case, so
        // the inserted phone lands with the syllable before the
        // boundary.
        let sut = syllabification(&[&["p", "m"], &["k", "n"]]);
        let target = syllabification(&[&["p", "m"], &["p", "k", "n"]]);
        assert_eq!(
            vec![vec!["p", "m", "''"], vec!["k", "n"]],
            as_str_lists(&sut.morph(&target).unwrap())
        );
    }

    #[test]
    fn morph_non_first_syllable_medial_pos() {
        let sut = syllabification(&[&["p", "m"], &["k", "n"]]);
        let target = syllabification(&[&["p", "m"], &["k", "ɪ", "n"]]);
        assert_eq!(
            vec![vec!["p", "m"], vec!["k", "''", "n"]],
            as_str_lists(&sut.morph(&target).unwrap())
        );
    }

    #[test]
    fn morph_non_first_syllable_final_pos() {
        let sut = syllabification(&[&["p", "m"], &["k", "n"]]);
        let target = syllabification(&[&["p", "m"], &["k", "n", "z"]]);
        assert_eq!(
            vec![vec!["p", "m"], vec!["k", "n", "''"]],
            as_str_lists(&sut.morph(&target).unwrap())
        );
    }

    #[test]
    fn morph_multiple_insertions_on_one_syllable() {
        let sut = syllabification(&[&["p", "m"], &["k", "n"]]);
        let target = syllabification(&[&["t", "b", "p", "m"], &["k", "n"]]);
        assert_eq!(
            vec![vec!["''", "''", "p", "m"], vec!["k", "n"]],
            as_str_lists(&sut.morph(&target).unwrap())
        );
    }

    #[test]
    fn morph_carries_no_stress_indices() {
        let sut = syllabification(&[&["p", "ˈa", "m"], &["k", "n"]]);
        let target = syllabification(&[&["b", "p", "ˈa", "m"], &["k", "n"]]);
        let morphed = sut.morph(&target).unwrap();
        assert!(morphed.stressed_syllable_indices().is_empty());
        assert!(morphed.stressed_vowel_indices().is_empty());
    }
}
