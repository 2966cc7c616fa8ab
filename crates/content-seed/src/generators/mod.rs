//! Generators for synthetic post content.
//!
//! - [`TextGenerator`]: Words, titles and prose paragraphs
//! - [`DateGenerator`]: Historical dates within a window of days
//! - [`SnippetGenerator`]: Function listings taken from this crate's source
//! - [`PostGenerator`]: Complete posts built from the above

pub mod date;
pub mod post;
pub mod snippet;
pub mod text;

pub use date::DateGenerator;
pub use post::{GeneratedPost, PostGenerator};
pub use snippet::{ExtractedFunction, Snippet, SnippetGenerator, extract_functions};
pub use text::{TextGenConfig, TextGenerator};
