use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use index::SearchResult;
use ingest::split_sentences;

use crate::SynthesisError;

pub const NO_INFORMATION: &str = "I don't have enough information to answer that question.";
pub const ADVISOR_REFERRAL: &str =
    "I would recommend consulting with a financial advisor for personalized advice on this topic.";

/// Sentences this short are usually headings or fragments.
const MIN_SENTENCE_CHARS: usize = 30;
/// Sentences appended after the first one.
const MAX_FOLLOW_UPS: usize = 2;

const GENERAL_INTRODUCTIONS: &[&str] = &[
    "Based on my analysis of financial data, ",
    "According to financial best practices, ",
    "When it comes to financial advice, ",
    "Looking at relevant financial information, ",
    "From an investment perspective, ",
];

const CONNECTORS: &[&str] = &[
    "Additionally, ",
    "Furthermore, ",
    "It's also important to note that ",
    "Keep in mind that ",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Portfolio,
    Risk,
    Strategy,
}

impl Topic {
    /// First matching topic wins, in declaration order.
    pub fn detect(query: &str) -> Option<Topic> {
        let query = query.to_lowercase();
        let mentions = |markers: &[&str]| markers.iter().any(|m| query.contains(m));

        if mentions(&["portfolio", "diversification"]) {
            Some(Topic::Portfolio)
        } else if mentions(&["risk"]) {
            Some(Topic::Risk)
        } else if mentions(&["strategy", "approach"]) {
            Some(Topic::Strategy)
        } else {
            None
        }
    }

    fn introductions(self) -> &'static [&'static str] {
        match self {
            Topic::Portfolio => &[
                "For effective portfolio management, ",
                "When constructing a diversified portfolio, ",
            ],
            Topic::Risk => &[
                "To properly manage investment risk, ",
                "When considering risk factors in your investments, ",
            ],
            Topic::Strategy => &[
                "For a sound investment strategy, ",
                "When developing your financial approach, ",
            ],
        }
    }
}

/// General openers plus those of the detected topic.
pub fn introduction_pool(topic: Option<Topic>) -> Vec<&'static str> {
    let mut pool = GENERAL_INTRODUCTIONS.to_vec();
    if let Some(topic) = topic {
        pool.extend_from_slice(topic.introductions());
    }
    pool
}

pub fn choose_phrase<R: Rng + ?Sized>(
    pool: &[&'static str],
    name: &'static str,
    rng: &mut R,
) -> Result<&'static str, SynthesisError> {
    pool.choose(rng)
        .copied()
        .ok_or(SynthesisError::EmptyPhrasePool(name))
}

/// Sentences long enough to carry content, deduplicated case-insensitively in first-seen order.
pub fn candidate_sentences(retrieved: &[SearchResult]) -> Vec<String> {
    let mut seen = HashSet::new();

    retrieved
        .iter()
        .flat_map(|result| split_sentences(&result.content))
        .filter(|sentence| sentence.chars().count() > MIN_SENTENCE_CHARS)
        .filter(|sentence| seen.insert(sentence.to_lowercase()))
        .collect()
}

/// Stitches retrieved sentences into an answer with randomized phrasing.
pub struct ResponseSynthesizer {
    connectors: Vec<&'static str>,
}

impl Default for ResponseSynthesizer {
    fn default() -> Self {
        Self {
            connectors: CONNECTORS.to_vec(),
        }
    }
}

impl ResponseSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        query: &str,
        retrieved: &[SearchResult],
        rng: &mut R,
    ) -> Result<String, SynthesisError> {
        if retrieved.is_empty() {
            return Ok(NO_INFORMATION.to_string());
        }

        let pool = introduction_pool(Topic::detect(query));
        let introduction = choose_phrase(&pool, "introduction", rng)?;

        let sentences = candidate_sentences(retrieved);
        let Some((first, rest)) = sentences.split_first() else {
            return Ok(format!("{introduction}{ADVISOR_REFERRAL}"));
        };

        let mut response = format!("{introduction}{first}");
        for sentence in rest.iter().take(MAX_FOLLOW_UPS) {
            let connector = choose_phrase(&self.connectors, "connector", rng)?;
            response.push(' ');
            response.push_str(connector);
            response.push_str(sentence);
        }

        Ok(response)
    }
}
