use super::FileType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    pub line: &'static str,
    pub block: Option<(&'static str, &'static str)>,
}

impl CommentSyntax {
    pub const C_STYLE: CommentSyntax = CommentSyntax {
        line: "//",
        block: Some(("/*", "*/")),
    };

    pub const PYTHON: CommentSyntax = CommentSyntax {
        line: "#",
        block: Some(("\"\"\"", "\"\"\"")),
    };

    pub const HASH: CommentSyntax = CommentSyntax {
        line: "#",
        block: None,
    };
}

/// Per-file line selector: tracks whether we are inside a block comment and
/// says which lines are worth tokenizing.
///
/// This is a substring heuristic, not a lexer. Markers inside string
/// literals count as markers.
#[derive(Debug, Clone)]
pub struct LineFilter {
    syntax: Option<CommentSyntax>,
    within_block_comment: bool,
}

impl LineFilter {
    pub fn new(file_type: FileType) -> Self {
        Self {
            syntax: file_type.comment_syntax(),
            within_block_comment: false,
        }
    }

    pub fn within_block_comment(&self) -> bool {
        self.within_block_comment
    }

    /// Feed the next line; returns whether it should be scanned.
    pub fn should_scan(&mut self, line: &str) -> bool {
        let Some(syntax) = self.syntax else {
            return true;
        };

        if self.within_block_comment {
            if let Some((_, end)) = syntax.block {
                if line.contains(end) {
                    self.within_block_comment = false;
                }
            }
            return true;
        }

        if line.contains(syntax.line) {
            return true;
        }

        match syntax.block {
            Some((start, _)) if line.contains(start) => {
                self.within_block_comment = true;
                true
            }
            _ => false,
        }
    }
}
