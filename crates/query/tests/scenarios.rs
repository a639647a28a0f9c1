use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

use query::chatbot::APOLOGY;
use query::synthesizer::{ADVISOR_REFERRAL, NO_INFORMATION};
use query::{Corpus, FinancialAdvisor, Role};

const DIVERSIFICATION: &str = "A well-diversified portfolio requires strategic allocation across \
     multiple asset classes. Modern portfolio theory suggests a mix of stocks and bonds.";

fn corpus_from(documents: &[(&str, &str)]) -> (tempfile::TempDir, Corpus) {
    let dir = tempfile::tempdir().unwrap();
    let mut corpus = Corpus::default();
    for (name, text) in documents {
        let path = dir.path().join(name);
        std::fs::write(&path, text).unwrap();
        assert!(corpus.ingest(&path));
    }
    corpus.build();
    (dir, corpus)
}

#[test]
fn diversification_query_answers_from_ingested_text() {
    let (_dir, corpus) = corpus_from(&[("investment_strategies.txt", DIVERSIFICATION)]);
    let mut advisor = FinancialAdvisor::new(corpus, StdRng::from_entropy()).with_top_k(1);

    let response = advisor.generate_response("How should I diversify my portfolio?");

    assert!(!response.is_empty());
    assert_ne!(response, NO_INFORMATION);
    assert!(!response.contains(ADVISOR_REFERRAL));
    assert!(response.contains("A well-diversified portfolio requires strategic allocation"));
    assert_eq!(advisor.transcript().len(), 2);
}

#[test]
fn unbuilt_corpus_degrades_to_apology() {
    let mut advisor = FinancialAdvisor::new(Corpus::default(), StdRng::from_entropy());

    let response = advisor.generate_response("What is a Roth IRA?");

    assert_eq!(response, APOLOGY);
}

// Asymmetry kept on purpose: the no-content branch records only the user turn.
#[test]
fn empty_retrieval_records_only_user_turn() {
    let mut corpus = Corpus::default();
    corpus.build(); // nothing ingested
    let mut advisor = FinancialAdvisor::new(corpus, StdRng::from_entropy());

    let response = advisor.generate_response("How should I invest in cryptocurrency?");

    assert_eq!(response, "I don't have enough information to answer that question.");
    assert_eq!(advisor.transcript().len(), 1);
    assert_eq!(advisor.transcript()[0].role, Role::User);
}

#[test]
fn repeated_queries_vary_in_phrasing() {
    let (_dir, corpus) = corpus_from(&[("investment_strategies.txt", DIVERSIFICATION)]);
    let mut advisor = FinancialAdvisor::new(corpus, StdRng::from_entropy());

    let responses: HashSet<String> = (0..5)
        .map(|_| advisor.generate_response("How should I diversify my portfolio?"))
        .collect();

    assert!(responses.len() > 1, "response generation lacks variation");
    assert_eq!(advisor.transcript().len(), 10);
}

#[test]
fn retrieval_spans_multiple_documents() {
    let (_dir, corpus) = corpus_from(&[
        ("investment_strategies.txt", DIVERSIFICATION),
        (
            "tax_optimization.txt",
            "Tax-loss harvesting involves selling investments that have experienced losses to \
             offset capital gains tax liability.",
        ),
    ]);

    let results = corpus.search_corpus("capital gains tax", 2).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].content.starts_with("Tax-loss harvesting"));
    assert!(results[0].score > results[1].score);
}
