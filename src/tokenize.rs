//! Turn tweet text into normalized terms
//!
//! The counting code only sees the output of a `Tokenizer`, so anything fancier (stemming,
//! language detection) can be swapped in without touching it.
use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// A normalized token. Opaque to everything downstream.
pub type Term = String;

/// Maps one document's text to its ordered terms, duplicates included
pub trait Tokenizer: Sync {
    fn terms(&self, text: &str) -> Vec<Term>;
}

/// Lowercasing word splitter that drops links, mentions, hashtags and stop words
pub struct TweetTokenizer {
    noise: Regex,
    stop_words: HashSet<String>,
}

impl TweetTokenizer {
    pub fn new() -> Self {
        TweetTokenizer {
            // links, @mentions, #hashtags and retweet markers
            noise: Regex::new(r"(?i)https?://\S+|www\.\S+|[@#][\w_]+|\bRT\b")
                .expect("static regex"),
            stop_words: stop_words(),
        }
    }

    /// Add extra words to ignore, compared after lowercasing
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
        where I: IntoIterator<Item=S>, S: AsRef<str> {
        self.stop_words.extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    fn keep(&self, word: &str) -> bool {
        word.chars().count() > 1
            && !word.chars().all(|c| c.is_numeric())
            && !self.stop_words.contains(word)
    }
}

impl Default for TweetTokenizer {
    fn default() -> Self { TweetTokenizer::new() }
}

impl Tokenizer for TweetTokenizer {
    fn terms(&self, text: &str) -> Vec<Term> {
        let cleaned = self.noise.replace_all(text, " ");
        cleaned.unicode_words()
            .map(|word| word.to_lowercase())
            .filter(|word| self.keep(word))
            .collect()
    }
}

/// English function words plus the usual Twitter filler
pub fn stop_words() -> HashSet<String> {
    [
        "the", "a", "an", "this", "that", "these", "those",
        "is", "are", "was", "were", "be", "been", "being", "am",
        "have", "has", "had", "do", "does", "did", "done",
        "will", "would", "shall", "should", "may", "might", "can", "could", "must",
        "to", "of", "in", "for", "on", "with", "at", "by", "from", "into", "about",
        "and", "or", "but", "not", "no", "if", "then", "than", "so", "as",
        "i", "you", "he", "she", "it", "we", "they",
        "me", "him", "her", "us", "them",
        "my", "your", "his", "our", "their", "its",
        "who", "what", "which", "when", "where", "how", "why",
        "very", "also", "just", "too", "more", "most",
        "there", "here", "now", "up", "out", "all", "any", "some",
        "don't", "it's", "i'm", "you're", "can't",
        // twitter filler
        "rt", "via", "amp",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_mentions_hashtags_and_links() {
        let t = TweetTokenizer::new();
        let terms = t.terms("RT @someone: Germany beats France #WorldCup https://t.co/xyz");
        assert_eq!(terms, vec!["germany", "beats", "france"]);
    }

    #[test]
    fn keeps_order_and_duplicates() {
        let t = TweetTokenizer::new();
        assert_eq!(t.terms("goal goal GOAL by Müller"), vec!["goal", "goal", "goal", "müller"]);
    }

    #[test]
    fn drops_stop_words_numbers_and_single_chars() {
        let t = TweetTokenizer::new();
        assert_eq!(t.terms("the score is 2 to 1 x final"), vec!["score", "final"]);
        assert!(t.terms("").is_empty());
    }

    #[test]
    fn extra_stop_words_are_lowercased() {
        let t = TweetTokenizer::new().with_stop_words(vec!["Football"]);
        assert_eq!(t.terms("football match"), vec!["match"]);
    }
}
