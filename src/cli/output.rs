use crate::consolidate::Consolidation;
use crate::{find_word, SpellingErrorGroup};
use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonOccurrence {
    file: String,
    line: usize,
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonGroup {
    word: String,
    count: usize,
    occurrences: Vec<JsonOccurrence>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonOutput {
    files_checked: usize,
    total_suspects: usize,
    dropped_words: usize,
    groups: Vec<JsonGroup>,
}

/// Non-interactive listing of the surviving groups.
pub fn render_report(
    files_checked: usize,
    result: &Consolidation,
    colored_output: bool,
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => render_text_report(result, colored_output),
        OutputFormat::Json => render_json_report(files_checked, result),
    }
}

fn render_text_report(result: &Consolidation, colored_output: bool) -> String {
    let mut out = String::new();

    for group in &result.groups {
        let header = format!("{} ({})", group.word, group.len());
        if colored_output {
            out.push_str(&format!("\n{}\n", header.red().bold()));
        } else {
            out.push_str(&format!("\n{}\n", header));
        }

        for error in &group.errors {
            let location = format!("{}:{}", error.file().display(), error.line_number());
            if colored_output {
                out.push_str(&format!(
                    "  {} {}\n",
                    location.blue().bold(),
                    highlight(error.line().trim(), error.word(), colored_output)
                ));
            } else {
                out.push_str(&format!("  {} {}\n", location, error.line().trim()));
            }
        }
    }

    out
}

fn render_json_report(files_checked: usize, result: &Consolidation) -> String {
    let groups = result
        .groups
        .iter()
        .map(|g| JsonGroup {
            word: g.word.clone(),
            count: g.len(),
            occurrences: g
                .errors
                .iter()
                .map(|e| JsonOccurrence {
                    file: e.file().display().to_string(),
                    line: e.line_number(),
                    text: e.line().to_string(),
                })
                .collect(),
        })
        .collect();

    let output = JsonOutput {
        files_checked,
        total_suspects: result.total_suspects,
        dropped_words: result.dropped_words,
        groups,
    };

    // Plain structs of strings and integers always serialize.
    serde_json::to_string_pretty(&output).unwrap_or_default()
}

/// Marks the first case-insensitive match of `word`, the one a correction
/// would replace.
fn highlight(context: &str, word: &str, colored: bool) -> String {
    match find_word(context, word) {
        Some(span) if colored => format!(
            "{}{}{}",
            &context[..span.start],
            context[span.clone()].red().bold(),
            &context[span.end..]
        ),
        _ => context.to_string(),
    }
}

/// One line per group: `index -- word`, marking the ones already opened.
pub fn format_group_list(
    groups: &[SpellingErrorGroup],
    investigated: &HashSet<usize>,
    colored: bool,
) -> String {
    let mut out = String::new();
    for (index, group) in groups.iter().enumerate() {
        let mut line = format!("{} -- {}", index, group.word);
        if investigated.contains(&index) {
            if colored {
                line.push_str(&format!(" {}", "<-- [investigated]".green()));
            } else {
                line.push_str(" <-- [investigated]");
            }
        }
        out.push('\n');
        out.push_str(&line);
    }
    out
}

/// One line per occurrence: `index -- 'line text'`.
pub fn format_occurrences(group: &SpellingErrorGroup, colored: bool) -> String {
    let mut out = String::new();
    for (index, error) in group.errors.iter().enumerate() {
        out.push_str(&format!(
            "\n{} -- '{}'",
            index,
            highlight(error.line().trim(), error.word(), colored)
        ));
    }
    out
}

pub fn bound_message(len: usize) -> String {
    format!(
        "\nYour input must be an integer between 0 and {}. Try again.",
        len.saturating_sub(1)
    )
}

pub fn consolidation_header(total_suspects: usize) -> String {
    format!(
        "\nFound {} suspicious words. Trying to filter...",
        total_suspects
    )
}

pub fn consolidation_summary(remaining: usize, colored: bool) -> String {
    if remaining == 0 {
        let msg = "No suspicious words remain.";
        if colored {
            format!("\n{}", msg.green().bold())
        } else {
            format!("\n{}", msg)
        }
    } else if colored {
        format!(
            "\nOnly {} suspicious words remain. Help me investigate.",
            remaining.to_string().yellow().bold()
        )
    } else {
        format!(
            "\nOnly {} suspicious words remain. Help me investigate.",
            remaining
        )
    }
}

pub fn fix_summary(total_fixed: usize, colored: bool) -> String {
    if total_fixed == 0 {
        return "\nNo corrections made.".to_string();
    }
    let fix_word = if total_fixed == 1 { "correction" } else { "corrections" };
    if colored {
        format!(
            "\n{} {} {} applied",
            "✓".green().bold(),
            total_fixed.to_string().green().bold(),
            fix_word
        )
    } else {
        format!("\n✓ {} {} applied", total_fixed, fix_word)
    }
}

pub fn print_error(err: &anyhow::Error, colored: bool) {
    let headline = "Something unexpected just happened.";
    if colored {
        eprintln!("\n{} {}", headline.red().bold(), format!("{:#}", err).dimmed());
    } else {
        eprintln!("\n{} {:#}", headline, err);
    }
}

pub fn display_path(path: &Path) -> String {
    format!("'{}'", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consolidate::consolidate;
    use crate::SpellingError;

    fn group() -> SpellingErrorGroup {
        SpellingErrorGroup::new(
            "teh",
            vec![
                SpellingError::new("a.md", "teh", "  teh start", 1),
                SpellingError::new("b.md", "Teh", "Teh end  ", 4),
            ],
        )
    }

    #[test]
    fn test_format_group_list_marks_investigated() {
        let groups = vec![group(), SpellingErrorGroup::new("wrod", Vec::new())];
        let investigated: HashSet<usize> = [1].into_iter().collect();
        assert_eq!(
            format_group_list(&groups, &investigated, false),
            "\n0 -- teh\n1 -- wrod <-- [investigated]"
        );
    }

    #[test]
    fn test_format_occurrences() {
        assert_eq!(
            format_occurrences(&group(), false),
            "\n0 -- 'teh start'\n1 -- 'Teh end'"
        );
    }

    #[test]
    fn test_bound_message() {
        assert_eq!(
            bound_message(10),
            "\nYour input must be an integer between 0 and 9. Try again."
        );
    }

    #[test]
    fn test_json_report() {
        let errors = group().errors;
        let result = consolidate(errors, 2);
        let json = render_report(2, &result, false, OutputFormat::Json);
        let parsed: JsonOutput = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.files_checked, 2);
        assert_eq!(parsed.groups.len(), 1);
        assert_eq!(parsed.groups[0].count, 2);
        assert_eq!(parsed.groups[0].occurrences[1].line, 4);
    }

    #[test]
    fn test_text_report() {
        let result = consolidate(group().errors, 2);
        let text = render_report(2, &result, false, OutputFormat::Text);
        assert!(text.contains("teh (2)"));
        assert!(text.contains("b.md:4 Teh end"));
    }

    #[test]
    fn test_highlight_first_match_ignoring_case() {
        colored::control::set_override(true);
        let marked = highlight("Recieve and recieve", "recieve", true);
        let expected = format!("{} and recieve", "Recieve".red().bold());
        assert_eq!(marked, expected);

        assert_eq!(highlight("Recieve", "recieve", false), "Recieve");
        assert_eq!(highlight("nothing", "recieve", true), "nothing");
    }
}
