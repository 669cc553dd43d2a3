use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;
use std::fmt;
use std::path::Path;

static WORDS_DIR: Dir = include_dir!("src/words");

/// A fixed set of target words for a session. Invariant: never empty.
#[derive(Deserialize, Clone, Debug)]
pub struct WordBank {
    pub name: String,
    pub words: Vec<String>,
}

#[derive(Debug)]
pub struct EmptyWordList(pub String);

impl fmt::Display for EmptyWordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "word list '{}' contains no words", self.0)
    }
}

impl Error for EmptyWordList {}

impl WordBank {
    /// The embedded default word set.
    pub fn builtin() -> Self {
        read_bank_from_asset("default.json").expect("embedded word set is valid")
    }

    /// Load a custom word list from a plain-text file, one word per line.
    /// Blank lines and surrounding whitespace are skipped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let words: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("custom")
            .to_string();

        if words.is_empty() {
            return Err(Box::new(EmptyWordList(name)));
        }

        Ok(Self { name, words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Pick a target word uniformly at random. Immediate repeats are allowed.
    pub fn pick(&self) -> String {
        let mut rng = rand::thread_rng();
        self.words
            .choose(&mut rng)
            .cloned()
            .expect("word bank is never empty")
    }
}

fn read_bank_from_asset(file_name: &str) -> Result<WordBank, Box<dyn Error>> {
    let file = WORDS_DIR
        .get_file(file_name)
        .expect("word set file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("unable to interpret word set as a string");

    let bank = from_str(file_as_str)?;

    Ok(bank)
}
