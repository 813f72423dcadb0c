//! Error types and the soft-error reporting policy.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// Deterministic, input-driven failures from the phonology layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhonologyError {
    /// A phone token was the empty string.
    #[error("received an empty phone in the pronunciation list")]
    NullPhone,

    /// A checked syllable was built with more than one vowel.
    #[error("syllable '{syllable}' has more than one vowel (CV shape: '{cv_shape}')")]
    TooManyVowelsInSyllable {
        /// The offending syllable, comma-joined.
        syllable: String,
        /// Consonant/vowel shape of the syllable, e.g. `CVVC`.
        cv_shape: String,
    },

    /// A compound entry reached an operation that only handles single
    /// words.
    #[error("multi-word entries cannot be compared against a single phone list yet")]
    MultiWordEntry,

    /// Two entries with different constituent word counts were
    /// compared.
    #[error("entry has {actual} constituent words but {expected} were expected")]
    WordCountMismatch {
        /// Word count of the entry driving the comparison.
        expected: usize,
        /// Word count of the entry that did not match.
        actual: usize,
    },

    /// The phone count does not add up to the target syllable sizes.
    /// Soft: governed by [`ErrorReportingMode`].
    #[error("cannot syllabify {actual} phones into syllables totalling {expected} phones")]
    ImpossibleSyllabification {
        /// Total phones the target syllabification holds.
        expected: usize,
        /// Phones actually provided.
        actual: usize,
    },

    /// The reference stress location does not exist in the receiving
    /// pronunciation. Soft: governed by [`ErrorReportingMode`].
    #[error("could not map the reference stress onto the pronunciation '{pronunciation}'")]
    StressMismatch {
        /// The pronunciation that could not take the stress,
        /// space-joined.
        pronunciation: String,
    },

    /// A selection operation was handed an empty candidate list.
    #[error("no candidate entries were provided")]
    NoCandidates,

    /// Internal invariant violation. Indicates a bug in the aligner, not
    /// bad input; never downgraded by a reporting mode.
    #[error("internal invariant violated: {0}")]
    Unexpected(String),
}

/// Failures from the lexicon surface: lookup misses, file ingestion.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// The written form has no entry, even after normalization.
    #[error("word '{0}' is not in the lexicon")]
    WordNotFound(SmolStr),

    /// A dictionary line did not follow the ISLE format.
    #[error("malformed lexicon entry at line {line}: {reason}")]
    Parse {
        /// One-based line number in the source file.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A phonology failure surfaced through a lexicon operation.
    #[error(transparent)]
    Phonology(#[from] PhonologyError),

    /// Reading the dictionary file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Policy knob for soft error paths (syllabification size mismatches,
/// stress carry-over failures).
///
/// Hard structural violations (empty phones, too many vowels in a
/// syllable, internal invariants) always propagate regardless of mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorReportingMode {
    /// Proceed with best-effort output, emitting nothing.
    Silence,
    /// Proceed with best-effort output, logging a warning.
    Warning,
    /// Raise the error.
    Error,
}

impl Default for ErrorReportingMode {
    fn default() -> Self {
        ErrorReportingMode::Warning
    }
}

impl ErrorReportingMode {
    /// Dispatches a soft error according to the mode.
    pub(crate) fn report(self, err: PhonologyError) -> Result<(), PhonologyError> {
        match self {
            ErrorReportingMode::Silence => Ok(()),
            ErrorReportingMode::Warning => {
                log::warn!("{}", err);
                Ok(())
            }
            ErrorReportingMode::Error => Err(err),
        }
    }
}
