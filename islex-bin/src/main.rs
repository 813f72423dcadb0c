use std::io::{self, Read};
use std::path::PathBuf;

use gumdrop::Options;
use serde::Serialize;

use islex::errors::ErrorReportingMode;
use islex::lexicon::{Lexicon, Preference};
use islex::phonology::{Entry, PhonemeList, Syllabification};

trait OutputWriter {
    fn write_entry(&mut self, word: &str, entry: &Entry);
    fn write_syllabification(&mut self, word: &str, syllabification: &Syllabification);
    fn write_transcription(&mut self, sentence: &str, pronunciation: &str);
    fn finish(&mut self);
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_entry(&mut self, word: &str, entry: &Entry) {
        println!("{}\t{}", word, format_entry(entry));
    }

    fn write_syllabification(&mut self, word: &str, syllabification: &Syllabification) {
        println!("{}\t{}", word, format_syllabification(syllabification));
    }

    fn write_transcription(&mut self, sentence: &str, pronunciation: &str) {
        println!("{}\t{}", sentence, pronunciation);
    }

    fn finish(&mut self) {}
}

#[derive(Serialize)]
struct JsonRecord {
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<Entry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    syllabification: Option<Syllabification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pronunciation: Option<String>,
}

#[derive(Serialize)]
struct JsonWriter {
    results: Vec<JsonRecord>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter { results: vec![] }
    }

    fn record(&mut self, input: &str) -> &mut JsonRecord {
        self.results.push(JsonRecord {
            input: input.to_owned(),
            entry: None,
            syllabification: None,
            pronunciation: None,
        });
        self.results.last_mut().unwrap()
    }
}

impl OutputWriter for JsonWriter {
    fn write_entry(&mut self, word: &str, entry: &Entry) {
        self.record(word).entry = Some(entry.clone());
    }

    fn write_syllabification(&mut self, word: &str, syllabification: &Syllabification) {
        self.record(word).syllabification = Some(syllabification.clone());
    }

    fn write_transcription(&mut self, sentence: &str, pronunciation: &str) {
        self.record(sentence).pronunciation = Some(pronunciation.to_owned());
    }

    fn finish(&mut self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap());
    }
}

fn format_syllabification(syllabification: &Syllabification) -> String {
    syllabification
        .syllables()
        .iter()
        .map(|syllable| syllable.phones().join(" "))
        .collect::<Vec<_>>()
        .join(" . ")
}

fn format_entry(entry: &Entry) -> String {
    entry
        .syllabifications()
        .iter()
        .map(format_syllabification)
        .collect::<Vec<_>>()
        .join(" # ")
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "print the dictionary pronunciations of words")]
    Lookup(LookupArgs),

    #[options(help = "project dictionary syllable structure onto observed phones")]
    Syllabify(SyllabifyArgs),

    #[options(help = "find the dictionary pronunciation closest to observed phones")]
    Closest(ClosestArgs),

    #[options(help = "generate a hypothetical pronunciation for a sentence")]
    Transcribe(TranscribeArgs),
}

#[derive(Debug, Options)]
struct LookupArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "ISLE-format dictionary file", required)]
    lexicon: PathBuf,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "words to look up")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct SyllabifyArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "ISLE-format dictionary file", required)]
    lexicon: PathBuf,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(no_short, long = "strict", help = "fail on syllable count mismatches")]
    strict: bool,

    #[options(free, help = "word followed by its observed phones")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct ClosestArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "ISLE-format dictionary file", required)]
    lexicon: PathBuf,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "word followed by its observed phones")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct TranscribeArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "ISLE-format dictionary file", required)]
    lexicon: PathBuf,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(
        no_short,
        long = "shortest",
        help = "prefer the shortest pronunciation of each word"
    )]
    shortest: bool,

    #[options(
        no_short,
        long = "longest",
        help = "prefer the longest pronunciation of each word"
    )]
    longest: bool,

    #[options(free, help = "words to transcribe")]
    inputs: Vec<String>,
}

fn make_writer(use_json: bool) -> Box<dyn OutputWriter> {
    if use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    }
}

fn inputs_or_stdin(inputs: Vec<String>) -> Vec<String> {
    if !inputs.is_empty() {
        return inputs;
    }
    eprintln!("Reading from stdin...");
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .expect("reading stdin");
    buffer
        .split_whitespace()
        .map(|token| token.to_string())
        .collect()
}

/// Splits the free arguments into the word and its observed phones,
/// reading the phones from stdin when only the word was given.
fn word_and_phones(inputs: Vec<String>) -> anyhow::Result<(String, PhonemeList)> {
    let mut inputs = inputs.into_iter();
    let word = match inputs.next() {
        Some(word) => word,
        None => anyhow::bail!("expected a word followed by its observed phones"),
    };
    let phones: Vec<String> = inputs.collect();
    let phones = if phones.is_empty() {
        inputs_or_stdin(vec![])
    } else {
        phones
    };
    Ok((word, PhonemeList::new(phones)?))
}

fn lookup(args: LookupArgs) -> anyhow::Result<()> {
    let lexicon = Lexicon::from_path(&args.lexicon)?;
    let mut writer = make_writer(args.use_json);

    for word in inputs_or_stdin(args.inputs) {
        for entry in lexicon.lookup(&word)? {
            writer.write_entry(&word, entry);
        }
    }

    writer.finish();
    Ok(())
}

fn syllabify(args: SyllabifyArgs) -> anyhow::Result<()> {
    let lexicon = Lexicon::from_path(&args.lexicon)?;
    let mut writer = make_writer(args.use_json);
    let (word, phones) = word_and_phones(args.inputs)?;

    let mode = if args.strict {
        ErrorReportingMode::Error
    } else {
        ErrorReportingMode::Warning
    };
    let result = lexicon.find_best_syllabification(&word, &phones, mode)?;
    writer.write_syllabification(&word, &result);

    writer.finish();
    Ok(())
}

fn closest(args: ClosestArgs) -> anyhow::Result<()> {
    let lexicon = Lexicon::from_path(&args.lexicon)?;
    let mut writer = make_writer(args.use_json);
    let (word, phones) = word_and_phones(args.inputs)?;

    let entry = lexicon.find_closest_entry(&word, &phones)?;
    writer.write_entry(&word, &entry);

    writer.finish();
    Ok(())
}

fn transcribe(args: TranscribeArgs) -> anyhow::Result<()> {
    if args.shortest && args.longest {
        anyhow::bail!("--shortest and --longest are mutually exclusive");
    }
    let preference = if args.shortest {
        Some(Preference::Shortest)
    } else if args.longest {
        Some(Preference::Longest)
    } else {
        None
    };

    let lexicon = Lexicon::from_path(&args.lexicon)?;
    let mut writer = make_writer(args.use_json);

    let sentence = inputs_or_stdin(args.inputs).join(" ");
    let pronunciation = lexicon.transcribe(&sentence, preference)?;
    writer.write_transcription(&sentence, &pronunciation);

    writer.finish();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        None => Ok(()),
        Some(Command::Lookup(args)) => lookup(args),
        Some(Command::Syllabify(args)) => syllabify(args),
        Some(Command::Closest(args)) => closest(args),
        Some(Command::Transcribe(args)) => transcribe(args),
    }
}
