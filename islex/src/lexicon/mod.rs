//! The pronunciation dictionary and word-level operations over it.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use hashbrown::HashMap;
use itertools::Itertools;
use smol_str::SmolStr;

use crate::errors::{ErrorReportingMode, LexiconError, PhonologyError};
use crate::phonology::{Entry, PhonemeList, Syllabification};
use crate::tables::{PRIMARY_STRESS, SECONDARY_STRESS};

mod parse;

pub use self::parse::parse_line;

/// Which pronunciation to pick for a word with several dictionary
/// entries. Shorter pronunciations tend to be casual, longer ones
/// formal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    /// Fewest phones.
    Shortest,
    /// Most phones.
    Longest,
}

/// An in-memory pronunciation dictionary keyed by written form.
///
/// Loaded once and queried read-only after that. Keys are stored as
/// found in the source file; lookups lowercase and trim their input.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    data: HashMap<SmolStr, Vec<Entry>>,
}

impl Lexicon {
    /// An empty lexicon.
    pub fn new() -> Lexicon {
        Lexicon::default()
    }

    /// Builds a lexicon from already-parsed entries.
    pub fn from_entries<I>(entries: I) -> Lexicon
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut lexicon = Lexicon::new();
        for entry in entries {
            lexicon.insert(entry);
        }
        lexicon
    }

    /// Loads an ISLE-format dictionary file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Lexicon, LexiconError> {
        let reader = BufReader::new(File::open(path)?);
        let mut lexicon = Lexicon::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            lexicon.insert(parse_line(index + 1, &line)?);
        }
        Ok(lexicon)
    }

    /// Adds one entry under its written form, after any existing
    /// pronunciations for the same word.
    pub fn insert(&mut self, entry: Entry) {
        self.data
            .entry(SmolStr::new(entry.word()))
            .or_default()
            .push(entry);
    }

    /// Number of distinct written forms.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if no words are recorded.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the word has any entry, after normalization.
    pub fn contains(&self, word: &str) -> bool {
        self.data.contains_key(normalize(word).as_str())
    }

    /// All entries, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.data.values().flatten()
    }

    /// All entries recorded for a written form.
    pub fn lookup(&self, word: &str) -> Result<&[Entry], LexiconError> {
        let word = normalize(word);
        self.data
            .get(word.as_str())
            .map(Vec::as_slice)
            .ok_or_else(|| LexiconError::WordNotFound(SmolStr::new(word)))
    }

    /// Entries for `word`, falling back to synthesizing the possessive
    /// from the stem when `word` itself is missing but ends in `'s`.
    /// Inflected forms are frequently absent from the dictionary even
    /// when their stem is present.
    fn lookup_with_possessive_fallback(&self, word: &str) -> Result<Vec<Entry>, LexiconError> {
        let miss = match self.lookup(word) {
            Ok(entries) => return Ok(entries.to_vec()),
            Err(err) => err,
        };

        let stem = match normalize(word).strip_suffix("'s") {
            Some(stem) if !stem.is_empty() => SmolStr::new(stem),
            _ => return Err(miss),
        };
        match self.lookup(&stem) {
            Ok(entries) => Ok(entries
                .iter()
                .map(Entry::with_possessive_clitic)
                .collect()),
            // Report the word that was actually asked for.
            Err(_) => Err(miss),
        }
    }

    /// Maps the dictionary syllable and stress structure for `word`
    /// onto an observed pronunciation of it.
    pub fn find_best_syllabification(
        &self,
        word: &str,
        phones: &PhonemeList,
        on_error: ErrorReportingMode,
    ) -> Result<Syllabification, LexiconError> {
        let candidates = self.lookup_with_possessive_fallback(word)?;
        Ok(phones.find_best_syllabification(&candidates, on_error)?)
    }

    /// The dictionary entry for `word` closest to an observed
    /// pronunciation, without transferring any structure.
    pub fn find_closest_entry(
        &self,
        word: &str,
        phones: &PhonemeList,
    ) -> Result<Entry, LexiconError> {
        let candidates = self.lookup(word)?;
        Ok(phones.find_closest_entry(candidates)?)
    }

    /// Like [`find_closest_entry`](Self::find_closest_entry) but for an
    /// already-syllabified pronunciation: returns the winning raw entry
    /// together with the probe morphed toward it.
    pub fn find_closest_entry_for_syllabification(
        &self,
        word: &str,
        syllabification: &Syllabification,
    ) -> Result<(Entry, Entry), LexiconError> {
        let candidates = self.lookup(word)?;
        let probe = Entry::new(word, vec![syllabification.clone()], Vec::<SmolStr>::new());
        Ok(probe.find_closest_pronunciation(candidates)?)
    }

    /// A hypothetical pronunciation for a sequence of words.
    ///
    /// Words with several dictionary pronunciations use their first
    /// entry unless a length `preference` is given. Stress marks are
    /// removed from the output; phones are run together within a word
    /// and words are separated by spaces.
    pub fn transcribe(
        &self,
        sentence: &str,
        preference: Option<Preference>,
    ) -> Result<String, LexiconError> {
        let mut transcribed = Vec::new();
        for word in sentence.split_whitespace() {
            let entries = self.lookup(word)?;
            let pronunciations: Vec<PhonemeList> = entries
                .iter()
                .flat_map(|entry| {
                    entry
                        .syllabifications()
                        .iter()
                        .map(Syllabification::desyllabify)
                })
                .collect();

            let mut index = 0;
            match preference {
                Some(Preference::Shortest) => {
                    for (i, pronunciation) in pronunciations.iter().enumerate() {
                        if pronunciation.len() < pronunciations[index].len() {
                            index = i;
                        }
                    }
                }
                Some(Preference::Longest) => {
                    for (i, pronunciation) in pronunciations.iter().enumerate() {
                        if pronunciation.len() > pronunciations[index].len() {
                            index = i;
                        }
                    }
                }
                None => {}
            }

            // Entries built by hand can carry no pronunciation at all.
            let chosen = pronunciations
                .get(index)
                .ok_or(LexiconError::Phonology(PhonologyError::NoCandidates))?;
            let joined: String = chosen
                .phones()
                .iter()
                .map(|phone| {
                    phone
                        .replace(PRIMARY_STRESS, "")
                        .replace(SECONDARY_STRESS, "")
                })
                .collect();
            transcribed.push(joined);
        }

        Ok(transcribed.join(" "))
    }

    /// Syllable and phone counts for `word`, taken over all of its
    /// dictionary pronunciations: the maximum when `use_max` is set,
    /// the mean otherwise.
    pub fn num_phones(&self, word: &str, use_max: bool) -> Result<(f64, f64), LexiconError> {
        let entries = self.lookup(word)?;

        let mut syllable_counts = Vec::with_capacity(entries.len());
        let mut phone_counts = Vec::with_capacity(entries.len());
        for entry in entries {
            let syllables: usize = entry
                .syllabifications()
                .iter()
                .map(Syllabification::len)
                .sum();
            syllable_counts.push(syllables as f64);
            phone_counts.push(entry.phones().len() as f64);
        }

        let reduce = |counts: &[f64]| -> f64 {
            if use_max {
                counts.iter().cloned().fold(0.0, f64::max)
            } else {
                counts.iter().sum::<f64>() / counts.len() as f64
            }
        };
        Ok((reduce(&syllable_counts), reduce(&phone_counts)))
    }
}

/// The words from `words` missing from the dictionary, deduplicated
/// and sorted.
pub fn find_ood_words<'a>(lexicon: &Lexicon, words: &[&'a str]) -> Vec<&'a str> {
    words
        .iter()
        .copied()
        .filter(|word| !lexicon.contains(word))
        .unique()
        .sorted()
        .collect()
}

/// Finds adjacent word pairs that the dictionary knows as compounds
/// (`red ball` matching an entry `red_ball`). Each hit yields the word
/// list with the pair replaced by the compound, plus the pair's start
/// index.
pub fn autopair(lexicon: &Lexicon, words: &[&str]) -> (Vec<Vec<String>>, Vec<usize>) {
    let mut sentences = Vec::new();
    let mut indices = Vec::new();

    for i in 0..words.len().saturating_sub(1) {
        let joined = format!("{}_{}", words[i], words[i + 1]);
        if !lexicon.contains(&joined) {
            continue;
        }

        let mut sentence: Vec<String> = words[..i].iter().map(|w| w.to_string()).collect();
        sentence.push(joined);
        sentence.extend(words[i + 2..].iter().map(|w| w.to_string()));
        sentences.push(sentence);
        indices.push(i);
    }

    (sentences, indices)
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PhonologyError;

    fn lexicon() -> Lexicon {
        let lines = [
            "another(dt,nn,prp) ə . n ˈʌ . ð ɚ",
            "another(dt,nn,prp) ə . n ˈʌ . ð ə ɹ",
            "cat(nn) k ˈæ t",
            "cats(nn) k ˈæ t s",
            "brown(jj) b ɹ ˈaʊ n",
            "rose(nn) ɹ ˈoʊ z",
            "red_ball(nn) # ɹ ˈɛ d # b ˈɔ l #",
        ];
        Lexicon::from_entries(
            lines
                .iter()
                .enumerate()
                .map(|(i, line)| parse_line(i + 1, line).unwrap()),
        )
    }

    fn phones(raw: &[&str]) -> PhonemeList {
        PhonemeList::new(raw.iter().copied()).unwrap()
    }

    #[test]
    fn lookup_normalizes_case_and_whitespace() {
        let sut = lexicon();
        assert_eq!(2, sut.lookup(" Another ").unwrap().len());
        assert!(matches!(
            sut.lookup("dog"),
            Err(LexiconError::WordNotFound(word)) if word == "dog"
        ));
    }

    #[test]
    fn entries_iterates_every_pronunciation() {
        let sut = lexicon();
        // 7 dictionary lines over 6 distinct written forms.
        assert_eq!(6, sut.len());
        assert_eq!(7, sut.entries().count());
        assert_eq!(2, sut.entries().filter(|e| e.word() == "another").count());
    }

    #[test]
    fn best_syllabification_projects_dictionary_structure() {
        let result = lexicon()
            .find_best_syllabification(
                "another",
                &phones(&["ə", "n", "ˈʌ", "d", "ɚ"]),
                ErrorReportingMode::Error,
            )
            .unwrap();
        assert_eq!(
            vec![vec!["ə"], vec!["n", "ˈʌ"], vec!["d", "ɚ"]],
            result.to_lists()
        );
    }

    #[test]
    fn best_syllabification_falls_back_to_possessive_stem() {
        let result = lexicon()
            .find_best_syllabification(
                "cat's",
                &phones(&["k", "æ", "t", "s"]),
                ErrorReportingMode::Silence,
            )
            .unwrap();
        assert_eq!(vec![vec!["k", "æ", "t", "s"]], result.to_lists());
        assert_eq!(&[0], result.stressed_syllable_indices());
        assert_eq!(&[1], result.stressed_vowel_indices());
    }

    #[test]
    fn possessive_fallback_with_epenthetic_clitic_vowel() {
        // An alveolar-final stem takes the "ɪ z" form of the clitic,
        // so the final syllable carries two vowels end to end.
        let result = lexicon()
            .find_best_syllabification(
                "rose's",
                &phones(&["ɹ", "oʊ", "z", "ɪ", "z"]),
                ErrorReportingMode::Silence,
            )
            .unwrap();
        assert_eq!(vec![vec!["ɹ", "oʊ", "z", "ɪ", "z"]], result.to_lists());
        assert_eq!(&[0], result.stressed_syllable_indices());
        assert_eq!(&[1], result.stressed_vowel_indices());
    }

    #[test]
    fn best_syllabification_tolerates_epenthetic_vowels() {
        let result = lexicon()
            .find_best_syllabification(
                "cat",
                &phones(&["k", "æ", "ə", "t"]),
                ErrorReportingMode::Silence,
            )
            .unwrap();
        assert_eq!(vec![vec!["k", "æ", "ə", "t"]], result.to_lists());
    }

    #[test]
    fn possessive_fallback_reports_the_requested_word() {
        let err = lexicon()
            .find_best_syllabification(
                "dog's",
                &phones(&["d", "ɔ", "g", "z"]),
                ErrorReportingMode::Silence,
            )
            .unwrap_err();
        assert!(matches!(err, LexiconError::WordNotFound(word) if word == "dog's"));
    }

    #[test]
    fn closest_entry_prefers_fewest_insertions() {
        let closest = lexicon()
            .find_closest_entry(
                "another",
                &phones(&["ə", "n", "ˈʌ", "ð", "ə", "r", "r", "r", "r"]),
            )
            .unwrap();
        assert_eq!(
            vec![vec!["ə"], vec!["n", "ˈʌ"], vec!["ð", "ə", "ɹ"]],
            closest.syllabifications()[0].to_lists()
        );
    }

    #[test]
    fn closest_entry_for_syllabification_returns_raw_and_morphed() {
        let probe = Syllabification::from_phone_lists(vec![
            vec!["ə".into()],
            vec!["n".into(), "ˈʌ".into()],
            vec!["d".into(), "ɚ".into()],
        ])
        .unwrap();
        let (raw, constructed) = lexicon()
            .find_closest_entry_for_syllabification("another", &probe)
            .unwrap();
        assert_eq!(
            vec![vec!["ə"], vec!["n", "ˈʌ"], vec!["ð", "ɚ"]],
            raw.syllabifications()[0].to_lists()
        );
        assert_eq!("another", constructed.word());
        assert_eq!(
            vec![vec!["ə"], vec!["n", "ˈʌ"], vec!["d", "ɚ"]],
            constructed.syllabifications()[0].to_lists()
        );
    }

    #[test]
    fn closest_entry_rejects_compounds() {
        let err = lexicon()
            .find_closest_entry("red_ball", &phones(&["ɹ", "ɛ", "d"]))
            .unwrap_err();
        assert!(matches!(
            err,
            LexiconError::Phonology(PhonologyError::MultiWordEntry)
        ));
    }

    #[test]
    fn transcribe_takes_the_first_entry_by_default() {
        assert_eq!(
            "ənʌðɚ kæt",
            lexicon().transcribe("Another cat", None).unwrap()
        );
    }

    #[test]
    fn transcribe_length_preferences() {
        let sut = lexicon();
        assert_eq!(
            "ənʌðɚ",
            sut.transcribe("another", Some(Preference::Shortest)).unwrap()
        );
        assert_eq!(
            "ənʌðəɹ",
            sut.transcribe("another", Some(Preference::Longest)).unwrap()
        );
    }

    #[test]
    fn transcribe_rejects_entries_without_pronunciations() {
        let sut = Lexicon::from_entries([Entry::new(
            "ghost",
            vec![],
            Vec::<SmolStr>::new(),
        )]);
        let err = sut.transcribe("ghost", None).unwrap_err();
        assert!(matches!(
            err,
            LexiconError::Phonology(PhonologyError::NoCandidates)
        ));
    }

    #[test]
    fn num_phones_mean_and_max() {
        let sut = lexicon();
        assert_eq!((3.0, 5.5), sut.num_phones("another", false).unwrap());
        assert_eq!((3.0, 6.0), sut.num_phones("another", true).unwrap());
    }

    #[test]
    fn ood_words_are_deduplicated_and_sorted() {
        assert_eq!(
            vec!["ball", "zebra"],
            find_ood_words(&lexicon(), &["zebra", "cat", "ball", "zebra", "brown"])
        );
    }

    #[test]
    fn autopair_replaces_known_compounds() {
        let (sentences, indices) = autopair(&lexicon(), &["the", "red", "ball", "cat"]);
        assert_eq!(vec![vec!["the", "red_ball", "cat"]], sentences);
        assert_eq!(vec![1], indices);
    }

    #[test]
    fn from_path_reads_a_dictionary_file() {
        let path = std::env::temp_dir().join("islex-lexicon-roundtrip.txt");
        std::fs::write(&path, "cat(nn) k ˈæ t\n\nanother(dt) ə . n ˈʌ . ð ɚ\n").unwrap();

        let sut = Lexicon::from_path(&path).unwrap();
        assert_eq!(2, sut.len());
        assert!(sut.contains("cat"));

        std::fs::remove_file(&path).ok();
    }
}
