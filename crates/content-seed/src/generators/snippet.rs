//! Code listings lifted from the generators' own source.
//!
//! Every post embeds one function taken from the text and date generators,
//! the same way a documentation site would quote library code. The sources
//! are compiled into the binary, so listings always match the running code.

use rand::Rng;
use tracing::debug;

/// Source files a listing can be drawn from.
const EMBEDDED_SOURCES: [&str; 2] = [include_str!("text.rs"), include_str!("date.rs")];

/// A function listing ready to be placed in a highlight block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Function name.
    pub name: String,
    /// Language passed to the highlighter.
    pub language: String,
    /// Dedented source of the function, including its doc comments.
    pub source: String,
}

/// A function found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFunction {
    pub name: String,
    pub source: String,
}

/// Picks random function listings out of a set of source files.
pub struct SnippetGenerator {
    functions: Vec<ExtractedFunction>,
    language: String,
}

impl SnippetGenerator {
    /// Creates a generator over the crate's own text and date generators.
    pub fn new() -> Self {
        Self {
            functions: EMBEDDED_SOURCES
                .iter()
                .flat_map(|source| extract_functions(source))
                .collect(),
            language: "rust".to_string(),
        }
    }

    /// Creates a generator over arbitrary Rust sources.
    ///
    /// Returns `None` when the sources contain no functions with a body.
    pub fn with_sources<'a>(sources: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let functions: Vec<ExtractedFunction> =
            sources.into_iter().flat_map(extract_functions).collect();

        if functions.is_empty() {
            return None;
        }

        Some(Self {
            functions,
            language: "rust".to_string(),
        })
    }

    /// Sets the language name written into the highlight shortcode.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Functions available for listings.
    pub fn functions(&self) -> &[ExtractedFunction] {
        &self.functions
    }

    /// Picks one function uniformly at random.
    pub fn generate(&self, rng: &mut impl Rng) -> Snippet {
        let function = &self.functions[rng.gen_range(0..self.functions.len())];
        debug!(function = %function.name, "Selected code listing");

        Snippet {
            name: function.name.clone(),
            language: self.language.clone(),
            source: function.source.clone(),
        }
    }
}

impl Default for SnippetGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts every function item with a body from `source`.
///
/// Doc comments and attributes directly above a function are kept with it.
/// Scanning stops at the first `#[cfg(test)]` line so test helpers never
/// end up in a post.
pub fn extract_functions(source: &str) -> Vec<ExtractedFunction> {
    let lines: Vec<&str> = source
        .lines()
        .take_while(|line| line.trim() != "#[cfg(test)]")
        .collect();

    let mut functions = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(name) = function_name(lines[i]) else {
            i += 1;
            continue;
        };

        let mut start = i;
        while start > 0 {
            let prev = lines[start - 1].trim_start();
            if prev.starts_with("///") || prev.starts_with("#[") {
                start -= 1;
            } else {
                break;
            }
        }

        let mut scanner = BraceScanner::default();
        let mut end = None;
        for (j, line) in lines.iter().enumerate().skip(i) {
            match scanner.scan_line(line) {
                ScanState::Open => continue,
                ScanState::Closed => {
                    end = Some(j);
                    break;
                }
                ScanState::Declaration => break,
            }
        }

        match end {
            Some(end) => {
                functions.push(ExtractedFunction {
                    name,
                    source: dedent(&lines[start..=end]),
                });
                i = end + 1;
            }
            None => i += 1,
        }
    }

    functions
}

/// Returns the function name if `line` starts a function item.
fn function_name(line: &str) -> Option<String> {
    let mut rest = line.trim_start();
    for prefix in ["pub(crate) ", "pub(super) ", "pub ", "const ", "async ", "unsafe "] {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped;
        }
    }

    let rest = rest.strip_prefix("fn ")?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();

    (!name.is_empty()).then_some(name)
}

/// Removes the common leading indentation of `lines`.
fn dedent(lines: &[&str]) -> String {
    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Open,
    Closed,
    Declaration,
}

/// Tracks brace depth across lines, skipping literals and comments.
#[derive(Debug, Default)]
struct BraceScanner {
    depth: i32,
    /// Open `(` and `[` count, so `[u8; 2]` in a signature is not a terminator.
    nesting: i32,
    /// Block comments nest in Rust.
    comment_depth: usize,
    opened: bool,
    in_string: bool,
    raw_hashes: Option<usize>,
}

impl BraceScanner {
    fn scan_line(&mut self, line: &str) -> ScanState {
        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();

            if self.comment_depth > 0 {
                match (c, next) {
                    ('/', Some('*')) => {
                        self.comment_depth += 1;
                        i += 2;
                    }
                    ('*', Some('/')) => {
                        self.comment_depth -= 1;
                        i += 2;
                    }
                    _ => i += 1,
                }
                continue;
            }

            if self.in_string {
                match self.raw_hashes {
                    Some(hashes) if c == '"' && closes_raw(&chars[i + 1..], hashes) => {
                        self.in_string = false;
                        self.raw_hashes = None;
                        i += 1 + hashes;
                    }
                    Some(_) => i += 1,
                    None if c == '\\' => i += 2,
                    None => {
                        if c == '"' {
                            self.in_string = false;
                        }
                        i += 1;
                    }
                }
                continue;
            }

            match c {
                '/' if next == Some('/') => break,
                '/' if next == Some('*') => {
                    self.comment_depth = 1;
                    i += 2;
                }
                '(' | '[' => {
                    self.nesting += 1;
                    i += 1;
                }
                ')' | ']' => {
                    self.nesting -= 1;
                    i += 1;
                }
                '"' => {
                    self.in_string = true;
                    self.raw_hashes = None;
                    i += 1;
                }
                'r' if !is_ident_char(i.checked_sub(1).map(|p| chars[p])) => {
                    let hashes = chars[i + 1..].iter().take_while(|&&h| h == '#').count();
                    if chars.get(i + 1 + hashes) == Some(&'"') {
                        self.in_string = true;
                        self.raw_hashes = Some(hashes);
                        i += 2 + hashes;
                    } else {
                        i += 1;
                    }
                }
                '\'' => {
                    if chars.get(i + 1) == Some(&'\\') {
                        // Escaped char literal: skip to its closing quote.
                        let close = chars[i + 2..]
                            .iter()
                            .position(|&q| q == '\'')
                            .map(|p| i + 2 + p);
                        i = close.map_or(chars.len(), |p| p + 1);
                    } else if chars.get(i + 2) == Some(&'\'') {
                        i += 3;
                    } else {
                        // Lifetime.
                        i += 1;
                    }
                }
                '{' => {
                    self.depth += 1;
                    self.opened = true;
                    i += 1;
                }
                '}' => {
                    self.depth -= 1;
                    if self.opened && self.depth == 0 {
                        return ScanState::Closed;
                    }
                    i += 1;
                }
                ';' if !self.opened && self.nesting == 0 => return ScanState::Declaration,
                _ => i += 1,
            }
        }

        ScanState::Open
    }
}

fn closes_raw(rest: &[char], hashes: usize) -> bool {
    rest.len() >= hashes && rest[..hashes].iter().all(|&h| h == '#')
}

fn is_ident_char(c: Option<char>) -> bool {
    c.is_some_and(|c| c.is_alphanumeric() || c == '_')
}
