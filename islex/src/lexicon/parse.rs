//! Flat-file ISLE dictionary format.
//!
//! One entry per line: `word(pos,...)` followed by the pronunciation,
//! where `#` separates constituent words, ` . ` separates syllables
//! and spaces separate phones:
//!
//! ```text
//! another(dt,nn,prp) ə . n ˈʌ . ð ɚ
//! weather_balloon(nn) # w ˈɛ . ð ɚ # b ə . l ˈu n #
//! ```

use smol_str::SmolStr;

use crate::errors::LexiconError;
use crate::phonology::{Entry, Syllabification};

/// Parses one dictionary line into an entry. `line_number` is only
/// used for error context.
pub fn parse_line(line_number: usize, line: &str) -> Result<Entry, LexiconError> {
    let parse_err = |reason: &str| LexiconError::Parse {
        line: line_number,
        reason: reason.to_string(),
    };

    let line = line.trim_end_matches(|c| c == '\r' || c == '\n');
    let (prefix, pronunciation) = line
        .split_once(' ')
        .ok_or_else(|| parse_err("missing pronunciation"))?;
    let (word, pos_info) = prefix
        .split_once('(')
        .ok_or_else(|| parse_err("missing part-of-speech block"))?;
    if word.is_empty() {
        return Err(parse_err("empty word"));
    }

    // Tags carrying morphological markers are dropped, keeping only
    // the plain part-of-speech labels.
    let pos_tags: Vec<SmolStr> = pos_info
        .trim_end_matches(')')
        .split(',')
        .filter(|tag| !tag.is_empty() && !tag.contains(|c| c == '_' || c == '+' || c == ':'))
        .map(SmolStr::new)
        .collect();

    let mut syllabifications = Vec::new();
    for constituent in pronunciation.split('#') {
        if constituent.trim().is_empty() {
            continue;
        }
        let lists: Vec<Vec<SmolStr>> = constituent
            .split(" . ")
            .map(|syllable| syllable.split_whitespace().map(SmolStr::new).collect())
            .filter(|syllable: &Vec<SmolStr>| !syllable.is_empty())
            .collect();
        let syllabification = Syllabification::from_phone_lists(lists)
            .map_err(|err| parse_err(&err.to_string()))?;
        syllabifications.push(syllabification);
    }
    if syllabifications.is_empty() {
        return Err(parse_err("missing pronunciation"));
    }

    Ok(Entry::new(word, syllabifications, pos_tags))
}
