use crate::Result;
use anyhow::Context;
use fst::{Set, SetBuilder};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// The "is this a known word?" capability the classifier depends on.
pub trait WordList: Send + Sync {
    fn is_known_word(&self, word: &str) -> Result<bool>;
}

pub struct Dictionary {
    set: Set<Vec<u8>>,
}

impl Dictionary {
    /// Load the installed dictionary for `language`, compiling the embedded
    /// word list into the data directory when none is installed yet.
    pub fn load(language: &str) -> anyhow::Result<Self> {
        let dict_path = Self::get_dictionary_path(language)?;

        if !dict_path.exists() {
            return Self::create_embedded(language);
        }

        Self::load_from_path(&dict_path)
    }

    /// Load a compiled `.dict` file, or any other file as a plain word list.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        if path.extension().and_then(|e| e.to_str()) != Some("dict") {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read word list: {}", path.display()))?;
            return Self::from_words(content.lines().map(str::trim));
        }

        let bytes = fs::read(path)
            .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;
        let set = Set::new(bytes).context("Failed to parse dictionary")?;

        Ok(Self { set })
    }

    /// Build an in-memory dictionary. Words are lowercased; blanks and `#`
    /// comment lines are skipped.
    pub fn from_words<I, S>(words: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted = normalize_words(words);
        let set = Set::from_iter(sorted.iter()).context("Failed to build dictionary")?;
        Ok(Self { set })
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Exact match, or the lowercase form when `word` is capitalised or
    /// all upper-case.
    pub fn contains(&self, word: &str) -> bool {
        if self.set.contains(word.as_bytes()) {
            return true;
        }

        let mut chars = word.chars();
        let folds = match chars.next() {
            Some(first) if first.is_uppercase() => {
                let rest: Vec<char> = chars.collect();
                rest.iter().all(|c| !c.is_alphabetic() || c.is_lowercase())
                    || rest.iter().all(|c| !c.is_alphabetic() || c.is_uppercase())
            }
            _ => false,
        };

        folds && self.set.contains(word.to_lowercase().as_bytes())
    }

    /// Compile a word list to an FST file.
    pub fn build_from_words(words: &[String], output_path: &Path) -> anyhow::Result<()> {
        let sorted = normalize_words(words);

        let file = File::create(output_path)
            .with_context(|| format!("Failed to create dictionary: {}", output_path.display()))?;

        let writer = BufWriter::new(file);
        let mut builder = SetBuilder::new(writer).context("Failed to create FST builder")?;

        for word in sorted {
            builder
                .insert(word.as_bytes())
                .context("Failed to insert word into dictionary")?;
        }

        builder.finish().context("Failed to finalize dictionary")?;

        Ok(())
    }

    pub fn get_dictionary_path(language: &str) -> anyhow::Result<PathBuf> {
        let data_dir = crate::config::Config::data_dir().context("Failed to get data directory")?;

        fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        Ok(data_dir.join(format!("{}.dict", language)))
    }

    fn create_embedded(language: &str) -> anyhow::Result<Self> {
        log::info!("no dictionary installed for {}, using the embedded word list", language);
        let dict_path = Self::get_dictionary_path(language)?;
        let words: Vec<String> = embedded_wordlist(language)
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self::build_from_words(&words, &dict_path)?;

        Self::load_from_path(&dict_path)
    }
}

impl WordList for Dictionary {
    fn is_known_word(&self, word: &str) -> Result<bool> {
        Ok(self.contains(word))
    }
}

fn normalize_words<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sorted: Vec<String> = words
        .into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty() && !w.starts_with('#'))
        .collect();
    sorted.sort();
    sorted.dedup();
    sorted
}

/// The main dictionary plus the operator's personal words.
pub struct Lexicon {
    dictionary: Dictionary,
    personal_words: HashSet<String>,
}

impl Lexicon {
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            dictionary,
            personal_words: HashSet::new(),
        }
    }

    pub fn with_personal_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.personal_words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty() && !w.starts_with('#')),
        );
        self
    }

    /// Read a personal dictionary file, one word per line.
    pub fn load_personal(self, path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(self);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read personal dictionary: {}", path.display()))?;
        Ok(self.with_personal_words(content.lines()))
    }
}

impl WordList for Lexicon {
    fn is_known_word(&self, word: &str) -> Result<bool> {
        if self.personal_words.contains(&word.to_lowercase()) {
            return Ok(true);
        }
        self.dictionary.is_known_word(word)
    }
}

fn embedded_wordlist(language: &str) -> &'static [&'static str] {
    match language {
        "en_US" | "en_GB" => EMBEDDED_EN,
        _ => &EMBEDDED_EN[..10],
    }
}

// Bootstrap list only; `spellsweep dict download en_US` installs a real one.
const EMBEDDED_EN: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me", "when", "make",
    "can", "like", "time", "no", "just", "him", "know", "take", "people", "into", "year",
    "your", "good", "some", "could", "them", "see", "other", "than", "then", "now", "look",
    "only", "come", "its", "over", "think", "also", "back", "after", "use", "two", "how",
    "our", "work", "first", "well", "way", "even", "new", "want", "because", "any", "these",
    "give", "day", "most", "us", "is", "are", "was", "were", "been", "has", "had", "does",
    "did", "here", "where", "why", "each", "every", "more", "less", "same", "should", "must",
    "may", "might", "need", "set", "read", "write", "line", "file", "files", "word", "words",
    "text", "data", "value", "values", "name", "names", "path", "paths", "start", "end",
    "part", "parts", "more", "note", "see", "check", "list", "item", "items", "number",
    "count", "open", "close", "find", "found", "true", "false", "none", "null", "empty",
    "function", "class", "method", "variable", "string", "integer", "boolean", "array",
    "dictionary", "object", "parameter", "return", "returns", "import", "export", "async",
    "await", "promise", "callback", "error", "errors", "exception", "test", "tests", "debug",
    "compile", "build", "deploy", "version", "configuration", "input", "output", "user",
    "server", "client", "request", "response", "update", "create", "delete", "default",
];

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_build_and_load_dictionary() {
        let dir = tempdir().unwrap();
        let dict_path = dir.path().join("test.dict");

        let words = vec!["hello".to_string(), "world".to_string(), "test".to_string()];

        Dictionary::build_from_words(&words, &dict_path).unwrap();

        let dict = Dictionary::load_from_path(&dict_path).unwrap();
        assert!(dict.contains("hello"));
        assert!(dict.contains("world"));
        assert!(!dict.contains("notfound"));
    }

    #[test]
    fn test_plain_word_list() {
        let dir = tempdir().unwrap();
        let list_path = dir.path().join("words.txt");
        fs::write(&list_path, "# comment\nHello\n\nworld\n").unwrap();

        let dict = Dictionary::load_from_path(&list_path).unwrap();
        assert_eq!(dict.len(), 2);
        assert!(dict.contains("hello"));
    }

    #[test]
    fn test_case_folding() {
        let dict = Dictionary::from_words(["receive", "http"]).unwrap();
        assert!(dict.contains("receive"));
        assert!(dict.contains("Receive"));
        assert!(dict.contains("RECEIVE"));
        assert!(dict.contains("HTTP"));
        assert!(!dict.contains("reCeive"));
        assert!(!dict.contains("recieve"));
    }

    #[test]
    fn test_lexicon_personal_words() {
        let dict = Dictionary::from_words(["the"]).unwrap();
        let lexicon = Lexicon::new(dict).with_personal_words(["Tokio", "# skipped"]);

        assert!(lexicon.is_known_word("TOKIO").unwrap());
        assert!(lexicon.is_known_word("the").unwrap());
        assert!(!lexicon.is_known_word("skipped").unwrap());
    }
}
