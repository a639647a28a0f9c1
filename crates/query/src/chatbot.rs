use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::synthesizer::{NO_INFORMATION, ResponseSynthesizer};
use crate::{AdvisorError, Retriever};

pub const APOLOGY: &str = "I apologize, but I encountered an error processing your question.";
pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Answer(String),
    /// Retrieval found nothing to work from.
    InsufficientInformation,
}

/// One advisory session: retrieval, synthesis and the running transcript.
pub struct FinancialAdvisor<R, G> {
    retriever: R,
    rng: G,
    synthesizer: ResponseSynthesizer,
    top_k: usize,
    transcript: Vec<ConversationTurn>,
}

impl<R: Retriever, G: Rng> FinancialAdvisor<R, G> {
    pub fn new(retriever: R, rng: G) -> Self {
        Self {
            retriever,
            rng,
            synthesizer: ResponseSynthesizer::new(),
            top_k: DEFAULT_TOP_K,
            transcript: Vec::new(),
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn retriever(&self) -> &R {
        &self.retriever
    }

    pub fn transcript(&self) -> &[ConversationTurn] {
        &self.transcript
    }

    /// Answer a query without touching the transcript.
    pub fn answer(&mut self, query: &str) -> Result<Reply, AdvisorError> {
        let retrieved = self.retriever.search(query, self.top_k)?;
        if retrieved.is_empty() {
            return Ok(Reply::InsufficientInformation);
        }

        let response = self
            .synthesizer
            .synthesize(query, &retrieved, &mut self.rng)?;
        Ok(Reply::Answer(response))
    }

    /// Always returns displayable text; errors are logged and replaced by an apology.
    ///
    /// The user turn is always recorded. An assistant turn follows for answers
    /// and apologies but not for the insufficient-information reply.
    pub fn generate_response(&mut self, query: &str) -> String {
        self.transcript.push(ConversationTurn::user(query));

        match self.answer(query) {
            Ok(Reply::Answer(response)) => {
                self.transcript.push(ConversationTurn::assistant(response.clone()));
                response
            }
            Ok(Reply::InsufficientInformation) => NO_INFORMATION.to_string(),
            Err(e) => {
                error!(error = %e, "Error generating response");
                self.transcript.push(ConversationTurn::assistant(APOLOGY));
                APOLOGY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RetrievalError, SearchResult};
    use rand::rngs::mock::StepRng;
    use std::cell::RefCell;

    /// Returns canned results and records every call.
    struct StubRetriever {
        results: Result<Vec<SearchResult>, ()>,
        calls: RefCell<Vec<(String, usize)>>,
    }

    impl StubRetriever {
        fn returning(contents: &[&str]) -> Self {
            let results = contents
                .iter()
                .enumerate()
                .map(|(position, content)| SearchResult {
                    content: content.to_string(),
                    score: 0.9,
                    position,
                })
                .collect();
            Self {
                results: Ok(results),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn unbuilt() -> Self {
            Self {
                results: Err(()),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Retriever for StubRetriever {
        fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>, RetrievalError> {
            self.calls.borrow_mut().push((query.to_string(), k));
            self.results.clone().map_err(|_| RetrievalError::UnbuiltIndex)
        }
    }

    fn advisor(retriever: StubRetriever) -> FinancialAdvisor<StubRetriever, StepRng> {
        FinancialAdvisor::new(retriever, StepRng::new(0, 0))
    }

    #[test]
    fn test_searches_with_default_k() {
        let mut advisor = advisor(StubRetriever::returning(&["Test content"]));
        advisor.generate_response("How should I diversify my portfolio?");

        let calls = advisor.retriever().calls.borrow();
        assert_eq!(
            calls.as_slice(),
            &[("How should I diversify my portfolio?".to_string(), 3)]
        );
    }

    #[test]
    fn test_conversation_history() {
        let mut advisor = advisor(StubRetriever::returning(&["Test content"]));
        let response = advisor.generate_response("Test question");

        let transcript = advisor.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0], ConversationTurn::user("Test question"));
        assert_eq!(transcript[1], ConversationTurn::assistant(response));
    }

    #[test]
    fn test_no_content_appends_only_user_turn() {
        let mut advisor = advisor(StubRetriever::returning(&[]));
        let response = advisor.generate_response("How should I invest in cryptocurrency?");

        assert_eq!(response, NO_INFORMATION);
        assert_eq!(advisor.transcript().len(), 1);
        assert_eq!(advisor.transcript()[0].role, Role::User);
    }

    #[test]
    fn test_unbuilt_index_is_apology() {
        let mut advisor = advisor(StubRetriever::unbuilt());

        assert!(matches!(
            advisor.answer("anything"),
            Err(AdvisorError::Retrieval(RetrievalError::UnbuiltIndex))
        ));

        let response = advisor.generate_response("anything");
        assert_eq!(response, APOLOGY);
        assert_eq!(
            advisor.transcript(),
            &[
                ConversationTurn::user("anything"),
                ConversationTurn::assistant(APOLOGY)
            ]
        );
    }

    #[test]
    fn test_answer_leaves_transcript_alone() {
        let mut advisor = advisor(StubRetriever::returning(&[
            "A well-diversified portfolio requires strategic allocation across multiple asset classes.",
        ]));

        let reply = advisor.answer("portfolio").unwrap();
        assert_eq!(
            reply,
            Reply::Answer(
                "Based on my analysis of financial data, A well-diversified portfolio requires \
                 strategic allocation across multiple asset classes."
                    .to_string()
            )
        );
        assert!(advisor.transcript().is_empty());
    }

    #[test]
    fn test_turns_serialize_with_lowercase_roles() {
        let json = serde_json::to_string(&ConversationTurn::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
