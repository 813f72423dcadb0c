//! Picking the dictionary pronunciation closest to an observed one.

use crate::errors::{ErrorReportingMode, PhonologyError};

use super::{Entry, PhonemeList, Syllabification};

/// Index of the best-scoring candidate.
///
/// The lowest score wins. Among ties a stressed candidate beats an
/// unstressed one; otherwise the earliest candidate wins.
pub(crate) fn choose_most_similar(scores: &[usize], stressed: &[bool]) -> Option<usize> {
    debug_assert_eq!(scores.len(), stressed.len());

    let mut best: Option<usize> = None;
    for (i, &score) in scores.iter().enumerate() {
        best = match best {
            None => Some(i),
            Some(j) if score < scores[j] => Some(i),
            Some(j) if score == scores[j] && stressed[i] && !stressed[j] => Some(i),
            best => best,
        };
    }
    best
}

impl PhonemeList {
    /// Finds the candidate whose pronunciation aligns against these
    /// phones with the fewest insertions on either side.
    ///
    /// Candidates must all be single words; alignment has no notion of
    /// word boundaries, so a compound here would score nonsense.
    pub fn find_closest_entry(&self, candidates: &[Entry]) -> Result<Entry, PhonologyError> {
        if candidates.is_empty() {
            return Err(PhonologyError::NoCandidates);
        }

        let mut scores = Vec::with_capacity(candidates.len());
        let mut stressed = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if candidate.syllabifications().len() != 1 {
                return Err(PhonologyError::MultiWordEntry);
            }

            let (aligned_candidate, aligned_self) = candidate.phones().align(self, true)?;
            scores.push(aligned_candidate.filler_count() + aligned_self.filler_count());
            stressed.push(candidate.has_stress());
        }

        let index = choose_most_similar(&scores, &stressed).ok_or_else(|| {
            PhonologyError::Unexpected("could not choose a closest entry".to_string())
        })?;
        Ok(candidates[index].clone())
    }

    /// Projects the closest candidate's syllable and stress structure
    /// onto these phones.
    ///
    /// The winning candidate's pronunciation is stretched against the
    /// observed phones so that its syllable boundaries land on matching
    /// positions, the observed phones are partitioned by those
    /// boundaries, and the candidate's stress placement is copied over
    /// when the observed phones carry none of their own.
    pub fn find_best_syllabification(
        &self,
        candidates: &[Entry],
        on_error: ErrorReportingMode,
    ) -> Result<Syllabification, PhonologyError> {
        let closest = self.find_closest_entry(candidates)?;
        let reference = &closest.syllabifications()[0];

        let stretched = reference.stretch(self)?;
        let result = self.syllabify(&stretched, on_error)?;

        if !result.has_stress() && reference.has_stress() {
            return result.with_stress_from(reference, on_error);
        }
        Ok(result)
    }
}
