use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^a-zA-Z0-9]").unwrap();
    // Acronym followed by a capitalised word: HTTPServer -> HTTP Server
    static ref ACRONYM_BOUNDARY: Regex = Regex::new(r"(.)([A-Z][a-z]+)").unwrap();
    // Lowercase or digit followed by uppercase: fooBar -> foo Bar
    static ref CAMEL_BOUNDARY: Regex = Regex::new(r"([a-z0-9])([A-Z])").unwrap();
}

/// Split a raw line into candidate word tokens.
///
/// Duplicates are preserved; grouping happens later.
pub fn split_line(line: &str) -> impl Iterator<Item = String> {
    let stripped = NON_WORD.replace_all(line, " ");
    let split = ACRONYM_BOUNDARY.replace_all(&stripped, "$1 $2");
    let split = CAMEL_BOUNDARY.replace_all(&split, "$1 $2");
    let spaced = split.replace(['-', '_', '='], " ");

    spaced
        .split_whitespace()
        .map(str::to_string)
        .collect::<Vec<_>>()
        .into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<String> {
        split_line(line).collect()
    }

    #[test]
    fn test_separators_and_camel_case() {
        assert_eq!(split("fooBar-baz_qux=1"), vec!["foo", "Bar", "baz", "qux", "1"]);
    }

    #[test]
    fn test_acronym_boundary() {
        assert_eq!(split("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(split("parseHTTPResponse"), vec!["parse", "HTTP", "Response"]);
    }

    #[test]
    fn test_punctuation_becomes_boundary() {
        assert_eq!(
            split("# Recieve the data, (then) parse it!"),
            vec!["Recieve", "the", "data", "then", "parse", "it"]
        );
    }

    #[test]
    fn test_duplicates_preserved() {
        assert_eq!(split("teh teh teh"), vec!["teh", "teh", "teh"]);
    }

    #[test]
    fn test_empty_and_symbol_only_lines() {
        assert!(split("").is_empty());
        assert!(split("  /* ** */ ").is_empty());
    }
}
