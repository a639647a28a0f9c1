mod config;
mod sample_corpus;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufRead, Write};
use std::path::Path;

use config::AppConfig;
use query::{Corpus, FinancialAdvisor, Retriever};

const CONFIG_FILE: &str = "advisor.json";
const PROMPT: &str = "What would you like to know about financial planning? ";
const EXIT_WORDS: [&str; 3] = ["exit", "quit", "bye"];

fn main() -> Result<()> {
    let config = AppConfig::load_or_default(Path::new(CONFIG_FILE));

    // Logs go to stderr so the conversation on stdout stays readable
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(config.log_level))
        .with_writer(io::stderr)
        .init();

    if config.write_sample_corpus {
        sample_corpus::write_sample_corpus(&config.data_dir)?;
    }

    let mut corpus = Corpus::new(config.chunker.clone(), config.vectorizer.clone());
    let ingested = corpus.ingest_directory(&config.data_dir);
    if ingested == 0 {
        tracing::warn!(dir = %config.data_dir.display(), "no documents ingested");
    }
    corpus.build();
    tracing::info!(stats = ?corpus.stats(), "corpus ready");

    let advisor = FinancialAdvisor::new(corpus, StdRng::from_entropy()).with_top_k(config.top_k);
    run_loop(advisor, io::stdin().lock(), io::stdout().lock())
}

fn is_exit_command(input: &str) -> bool {
    EXIT_WORDS.contains(&input.trim().to_lowercase().as_str())
}

fn run_loop<R, G>(
    mut advisor: FinancialAdvisor<R, G>,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<()>
where
    R: Retriever,
    G: rand::Rng,
{
    writeln!(output, "\n=== Financial Advisory Chatbot ===")?;
    writeln!(output, "Type 'exit' to quit\n")?;

    let mut line = String::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 || is_exit_command(&line) {
            writeln!(output, "Thank you for using the Financial Advisory Chatbot!")?;
            return Ok(());
        }

        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        let response = advisor.generate_response(query);
        writeln!(output, "\nResponse: {}\n", response)?;
    }
}
