//! One dictionary record: a word, its pronunciation(s), and POS tags.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::errors::PhonologyError;
use crate::tables::{ALVEOLARS, UNVOICED};

use super::matching::choose_most_similar;
use super::{PhonemeList, Syllabification, Syllable};

/// A dictionary entry.
///
/// Multi-word compounds ("weather balloon") carry one syllabification
/// per constituent word. Entries are immutable once constructed;
/// comparisons build morphed copies rather than mutating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    word: SmolStr,
    syllabifications: Vec<Syllabification>,
    pos_tags: Vec<SmolStr>,
}

impl Entry {
    /// Builds an entry from its word, per-constituent-word
    /// syllabifications and part-of-speech tags.
    pub fn new<W, P, T>(word: W, syllabifications: Vec<Syllabification>, pos_tags: P) -> Entry
    where
        W: Into<SmolStr>,
        P: IntoIterator<Item = T>,
        T: Into<SmolStr>,
    {
        Entry {
            word: word.into(),
            syllabifications,
            pos_tags: pos_tags.into_iter().map(Into::into).collect(),
        }
    }

    /// The written form.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// One syllabification per constituent word.
    pub fn syllabifications(&self) -> &[Syllabification] {
        &self.syllabifications
    }

    /// Part-of-speech tags from the dictionary.
    pub fn pos_tags(&self) -> &[SmolStr] {
        &self.pos_tags
    }

    /// Whether any constituent word carries primary stress.
    pub fn has_stress(&self) -> bool {
        self.syllabifications
            .iter()
            .any(Syllabification::has_stress)
    }

    /// All constituent words' phones, flattened in order.
    pub fn phones(&self) -> PhonemeList {
        self.syllabifications
            .iter()
            .map(Syllabification::desyllabify)
            .fold(PhonemeList::default(), |acc, phones| acc + phones)
    }

    /// Picks the candidate entry most like this one.
    ///
    /// Candidates must have the same number of constituent words. The
    /// score per candidate is the summed per-word [`diff_count`]; the
    /// minimum wins, stressed candidates beat unstressed ones among
    /// ties, and the first encountered wins otherwise. Returns the raw
    /// winning candidate together with a constructed entry carrying
    /// this entry's word and POS tags but its syllabifications morphed
    /// toward the winner.
    ///
    /// [`diff_count`]: Syllabification::diff_count
    pub fn find_closest_pronunciation(
        &self,
        candidates: &[Entry],
    ) -> Result<(Entry, Entry), PhonologyError> {
        if candidates.is_empty() {
            return Err(PhonologyError::NoCandidates);
        }

        let mut scores = Vec::with_capacity(candidates.len());
        let mut stressed = Vec::with_capacity(candidates.len());
        let mut morphed_lists = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if candidate.syllabifications.len() != self.syllabifications.len() {
                return Err(PhonologyError::WordCountMismatch {
                    expected: self.syllabifications.len(),
                    actual: candidate.syllabifications.len(),
                });
            }

            let mut score = 0;
            let mut morphed = Vec::with_capacity(self.syllabifications.len());
            for (own, target) in self
                .syllabifications
                .iter()
                .zip(candidate.syllabifications.iter())
            {
                morphed.push(own.morph(target)?);
                score += own.diff_count(target)?;
            }

            scores.push(score);
            stressed.push(candidate.has_stress());
            morphed_lists.push(morphed);
        }

        let index = choose_most_similar(&scores, &stressed).ok_or_else(|| {
            PhonologyError::Unexpected("could not choose a closest pronunciation".to_string())
        })?;

        let constructed = Entry {
            word: self.word.clone(),
            syllabifications: morphed_lists.swap_remove(index),
            pos_tags: self.pos_tags.clone(),
        };
        Ok((candidates[index].clone(), constructed))
    }

    /// Clones the entry with the possessive clitic appended to its last
    /// syllable: `ɪ` first if the stem ends in an alveolar, then `s`
    /// after an unvoiced final sound, `z` otherwise.
    pub(crate) fn with_possessive_clitic(&self) -> Entry {
        let mut syllabifications = self.syllabifications.clone();
        if let Some(last) = syllabifications.pop() {
            let mut lists: Vec<Vec<SmolStr>> = last.to_lists();
            if let Some(final_syllable) = lists.last_mut() {
                if let Some(last_sound) = final_syllable.last().cloned() {
                    if ALVEOLARS.contains(&last_sound.as_str()) {
                        final_syllable.push(SmolStr::new("ɪ"));
                    }
                    if UNVOICED.contains(&last_sound.as_str()) {
                        final_syllable.push(SmolStr::new("s"));
                    } else {
                        final_syllable.push(SmolStr::new("z"));
                    }
                }
            }
            // The synthesized vowel can give the final syllable a
            // second nucleus, so skip the nucleus check here.
            let syllables = lists.into_iter().map(Syllable::from_raw).collect();
            syllabifications.push(Syllabification::infer(syllables));
        }

        Entry {
            word: self.word.clone(),
            syllabifications,
            pos_tags: self.pos_tags.clone(),
        }
    }
}
