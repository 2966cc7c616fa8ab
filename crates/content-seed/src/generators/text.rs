//! Prose generation for titles and post bodies.

use fake::{
    Fake,
    faker::lorem::en::{Sentences, Word},
};
use rand::Rng;

/// Configuration for text generation.
#[derive(Debug, Clone)]
pub struct TextGenConfig {
    /// Words joined into a title.
    pub title_words: usize,
    /// Separator between title words.
    pub title_separator: String,
    /// Sentence count range for a paragraph (exclusive upper bound).
    pub sentences_per_paragraph: (usize, usize),
}

impl Default for TextGenConfig {
    fn default() -> Self {
        Self {
            title_words: 3,
            title_separator: "-".to_string(),
            sentences_per_paragraph: (4, 8),
        }
    }
}

/// Generates words, titles and paragraphs of filler prose.
pub struct TextGenerator {
    config: TextGenConfig,
}

impl TextGenerator {
    /// Creates a new text generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: TextGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: TextGenConfig) -> Self {
        Self { config }
    }

    /// Generates a single lower-case word.
    pub fn word(&self, rng: &mut impl Rng) -> String {
        let word: String = Word().fake_with_rng(rng);
        word.to_lowercase()
    }

    /// Generates a title such as `dolor-sit-amet`.
    pub fn title(&self, rng: &mut impl Rng) -> String {
        let words: Vec<String> = (0..self.config.title_words.max(1))
            .map(|_| self.word(rng))
            .collect();
        words.join(&self.config.title_separator)
    }

    /// Generates one paragraph of sentences on a single line.
    pub fn paragraph(&self, rng: &mut impl Rng) -> String {
        let (min, max) = self.config.sentences_per_paragraph;
        let max = max.max(min + 1);
        let sentences: Vec<String> = Sentences(min..max).fake_with_rng(rng);
        sentences.join(" ")
    }

    /// Generates `count` paragraphs.
    pub fn paragraphs(&self, count: usize, rng: &mut impl Rng) -> Vec<String> {
        (0..count).map(|_| self.paragraph(rng)).collect()
    }
}

impl Default for TextGenerator {
    fn default() -> Self {
        Self::new()
    }
}
