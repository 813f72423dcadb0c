/*! Pronunciation-dictionary lookup and phone-sequence alignment.

Looks words up in an ISLE-format pronunciation dictionary and
reconciles what a speaker actually said with what the dictionary says
they should have: an observed phone sequence is aligned against each
dictionary pronunciation, the closest one is chosen, and its syllable
and stress structure is projected back onto the observed phones.

# Usage example

```
use islex::errors::ErrorReportingMode;
use islex::lexicon::{parse_line, Lexicon};
use islex::phonology::PhonemeList;

let lexicon = Lexicon::from_entries([
    parse_line(1, "another(dt,nn,prp) ə . n ˈʌ . ð ɚ").unwrap(),
]);

// An observed pronunciation with a substituted phone still maps onto
// the dictionary's syllable structure.
let observed = PhonemeList::new(["ə", "n", "ˈʌ", "d", "ɚ"]).unwrap();
let result = lexicon
    .find_best_syllabification("another", &observed, ErrorReportingMode::Warning)
    .unwrap();
assert_eq!(
    vec![vec!["ə"], vec!["n", "ˈʌ"], vec!["d", "ɚ"]],
    result.to_lists()
);
```

*/

#![warn(missing_docs)]

pub mod errors;
pub mod lexicon;
pub mod phonology;
pub mod tables;
