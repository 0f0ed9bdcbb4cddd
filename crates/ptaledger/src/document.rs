//! Query blocks embedded in Markdown documents.
//!
//! A query block is a fenced code block whose info string names the query
//! language:
//!
//! ````markdown
//! ```pta
//! balance Assets
//! ```
//! ````
//!
//! Fences are three or more backticks or tildes. A block closes at a line
//! holding only the same fence character, at least as many times as it
//! opened with. An unterminated block runs to the end of the document.

/// One query block found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBlock<'a> {
    /// 1-based line of the opening fence.
    pub line: usize,
    /// The block body, trimmed.
    pub body: &'a str,
}

#[derive(Debug, Clone, Copy)]
struct Fence {
    ch: char,
    len: usize,
}

impl Fence {
    /// Parse an opening fence, returning it with its info string.
    fn open(line: &str) -> Option<(Self, &str)> {
        let line = line.trim_start();
        let ch = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = line.chars().take_while(|c| *c == ch).count();
        if len < 3 {
            return None;
        }
        Some((Self { ch, len }, line[len..].trim()))
    }

    fn closes(self, line: &str) -> bool {
        let line = line.trim();
        line.len() >= self.len && line.chars().all(|c| c == self.ch)
    }
}

/// Every fenced block in `markdown` whose info string is `language`.
///
/// Only the first word of the info string is compared, so `pta title` still
/// counts as a `pta` block.
#[must_use]
pub fn query_blocks<'a>(markdown: &'a str, language: &str) -> Vec<QueryBlock<'a>> {
    let mut blocks = Vec::new();
    // (fence, opening line, body start offset, whether the block is kept)
    let mut open: Option<(Fence, usize, usize, bool)> = None;
    let mut offset = 0;

    for (idx, raw) in markdown.split_inclusive('\n').enumerate() {
        let start = offset;
        offset += raw.len();
        let text = raw.trim_end_matches(['\n', '\r']);

        match open {
            Some((fence, line, body_start, keep)) => {
                if fence.closes(text) {
                    if keep {
                        blocks.push(QueryBlock {
                            line,
                            body: markdown[body_start..start].trim(),
                        });
                    }
                    open = None;
                }
            }
            None => {
                if let Some((fence, info)) = Fence::open(text) {
                    let keep = info.split_whitespace().next() == Some(language);
                    open = Some((fence, idx + 1, offset, keep));
                }
            }
        }
    }

    if let Some((_, line, body_start, true)) = open {
        blocks.push(QueryBlock {
            line,
            body: markdown[body_start..].trim(),
        });
    }

    blocks
}
