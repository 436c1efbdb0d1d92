pub mod dictionary;
pub mod tokenizer;

use crate::{Config, Result};
use anyhow::Context;
use dashmap::DashMap;
use dictionary::{Dictionary, Lexicon, WordList};
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

/// Decides whether a token is a suspected misspelling.
///
/// Shared by every scan worker; verdicts are memoised per token.
pub struct SpellChecker {
    words: Arc<dyn WordList>,
    reserved_words: HashSet<String>,
    ignore_patterns: Vec<Regex>,
    cache: DashMap<String, bool>,
}

impl SpellChecker {
    pub fn new(words: Arc<dyn WordList>, config: &Config) -> Self {
        let mut ignore_patterns = Vec::new();
        for pattern in &config.ignore_patterns {
            match Regex::new(pattern) {
                Ok(re) => ignore_patterns.push(re),
                Err(e) => log::warn!("invalid ignore pattern '{}': {}", pattern, e),
            }
        }

        Self {
            words,
            reserved_words: config.reserved_words.iter().cloned().collect(),
            ignore_patterns,
            cache: DashMap::new(),
        }
    }

    /// Load the configured dictionary and personal words.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let dictionary = match &config.dictionary {
            Some(path) => Dictionary::load_from_path(path)?,
            None => Dictionary::load(&config.language)
                .with_context(|| format!("Failed to load dictionary for {}", config.language))?,
        };
        log::debug!("dictionary loaded with {} words", dictionary.len());

        let mut lexicon = Lexicon::new(dictionary);
        if let Some(path) = &config.personal_dictionary {
            lexicon = lexicon.load_personal(path)?;
        }

        Ok(Self::new(Arc::new(lexicon), config))
    }

    /// A token is suspect when it is non-empty, unknown to the word list
    /// (looked up upper-cased), not a reserved word, not ignored, and not a
    /// concatenation of two known words.
    pub fn is_suspect(&self, token: &str) -> Result<bool> {
        if token.is_empty() {
            return Ok(false);
        }
        if let Some(verdict) = self.cache.get(token) {
            return Ok(*verdict);
        }

        let verdict = self.classify(token)?;
        self.cache.insert(token.to_string(), verdict);
        Ok(verdict)
    }

    fn classify(&self, token: &str) -> Result<bool> {
        if self.reserved_words.contains(token) || self.should_ignore(token) {
            return Ok(false);
        }
        if self.words.is_known_word(&token.to_uppercase())? {
            return Ok(false);
        }
        Ok(!self.is_compound(token)?)
    }

    /// Two-part heuristic: true when some split `word[..i] + word[i..]`
    /// yields two known words. A one-letter side other than "a" never
    /// counts, since dictionaries accept stray letters like "l".
    pub fn is_compound(&self, word: &str) -> Result<bool> {
        if !word.is_ascii() {
            return Ok(false);
        }

        for i in 1..word.len().saturating_sub(1) {
            let (left, right) = word.split_at(i);

            if !self.words.is_known_word(left)? || !self.words.is_known_word(right)? {
                continue;
            }
            if (left.len() == 1 && left != "a") || (right.len() == 1 && right != "a") {
                continue;
            }
            return Ok(true);
        }

        Ok(false)
    }

    fn should_ignore(&self, word: &str) -> bool {
        self.ignore_patterns.iter().any(|p| p.is_match(word))
    }
}
