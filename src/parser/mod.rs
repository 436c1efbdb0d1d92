pub mod comments;

use std::path::Path;

pub use comments::{CommentSyntax, LineFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    SourceCode(SourceLang),
    PlainText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLang {
    Rust,
    JavaScript,
    TypeScript,
    Python,
    Go,
    Java,
    C,
    Cpp,
    Jsx,
    Tsx,
    Shell,
    Ruby,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "rs" => FileType::SourceCode(SourceLang::Rust),
            "js" | "mjs" | "cjs" => FileType::SourceCode(SourceLang::JavaScript),
            "ts" | "mts" | "cts" => FileType::SourceCode(SourceLang::TypeScript),
            "jsx" => FileType::SourceCode(SourceLang::Jsx),
            "tsx" => FileType::SourceCode(SourceLang::Tsx),
            "py" | "pyw" => FileType::SourceCode(SourceLang::Python),
            "go" => FileType::SourceCode(SourceLang::Go),
            "java" => FileType::SourceCode(SourceLang::Java),
            "c" | "h" => FileType::SourceCode(SourceLang::C),
            "cpp" | "cc" | "cxx" | "hpp" | "hh" => FileType::SourceCode(SourceLang::Cpp),
            "sh" | "bash" | "zsh" => FileType::SourceCode(SourceLang::Shell),
            "rb" => FileType::SourceCode(SourceLang::Ruby),
            // md, markdown, rst, txt and everything else
            _ => FileType::PlainText,
        }
    }

    /// Comment markers used to pick lines; `None` means every line is scanned.
    pub fn comment_syntax(self) -> Option<CommentSyntax> {
        match self {
            FileType::PlainText => None,
            FileType::SourceCode(lang) => Some(lang.comment_syntax()),
        }
    }
}

impl SourceLang {
    pub fn comment_syntax(self) -> CommentSyntax {
        match self {
            SourceLang::Python => CommentSyntax::PYTHON,
            SourceLang::Shell | SourceLang::Ruby => CommentSyntax::HASH,
            SourceLang::Rust
            | SourceLang::JavaScript
            | SourceLang::TypeScript
            | SourceLang::Go
            | SourceLang::Java
            | SourceLang::C
            | SourceLang::Cpp
            | SourceLang::Jsx
            | SourceLang::Tsx => CommentSyntax::C_STYLE,
        }
    }
}
