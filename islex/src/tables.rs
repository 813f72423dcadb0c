//! Fixed phonetic inventories for the ISLE phone set.
//!
//! These are closed enumerations: lookup results are only meaningful
//! against a dictionary transcribed with exactly this inventory, so the
//! tables are part of the public contract rather than an implementation
//! detail.

/// Primary stress diacritic.
pub const PRIMARY_STRESS: &str = "ˈ";

/// Secondary stress diacritic.
pub const SECONDARY_STRESS: &str = "ˌ";

/// Placeholder inserted by alignment where one side has no
/// corresponding phone.
pub const FILLER: &str = "''";

/// Class symbol that all vowels collapse to under simplification.
pub const VOWEL_SYMBOL: &str = "V";

/// Class symbol that all rhotics collapse to under simplification.
pub const RHOTIC_SYMBOL: &str = "r";

/// Single-vowel nuclei.
pub const MONOPHTHONGS: &[&str] = &[
    "u", "æ", "ɑ", "ɔ", "ə", "i", "ɛ", "ɪ", "ʊ", "ʌ", "a", "e", "o",
];

/// Two-vowel nuclei transcribed as single phones.
pub const DIPHTHONGS: &[&str] = &["ɑɪ", "aʊ", "ei", "ɔi", "oʊ", "ae"];

/// Consonants that can carry a syllable on their own; treated as vowels
/// for nucleus detection.
pub const SYLLABIC_CONSONANTS: &[&str] = &["l̩", "n̩", "ɚ", "ɝ"];

/// R-like sounds, unified under simplification.
pub const RHOTICS: &[&str] = &["r", "ɹ", "ɾ"];

/// No-release, secondary stress, syllabic, nasalization, primary stress.
pub const DIACRITICS: &[&str] = &["˺", "ˌ", "\u{0329}", "\u{0303}", "ˈ"];

/// Unvoiced consonants; used to pick `s` over `z` for the possessive
/// clitic.
pub const UNVOICED: &[&str] = &["f", "k", "p", "t", "s", "tʃ", "ɵ"];

/// Sibilant-final stems take an epenthetic `ɪ` before the possessive
/// clitic.
pub const ALVEOLARS: &[&str] = &["s", "z", "tʃ", "dʒ"];

/// Does `phone` contain a vowel?
///
/// Containment rather than equality so that diphthongs and phones still
/// carrying diacritics (`"ˈʌ"`, `"ˌɑɪ"`) match.
pub fn is_vowel(phone: &str) -> bool {
    MONOPHTHONGS
        .iter()
        .chain(DIPHTHONGS.iter())
        .chain(SYLLABIC_CONSONANTS.iter())
        .any(|vowel| phone.contains(vowel))
}

/// Does `phone` contain a rhotic marker?
pub fn is_rhotic(phone: &str) -> bool {
    RHOTICS.iter().any(|rhotic| phone.contains(rhotic))
}
