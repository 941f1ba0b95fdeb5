use application::cache_service::provision_cache;
use application::chatbot_service::ChatbotService;
use application::faq_matcher::FaqMatcher;
use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use domain::match_policy::MatchPolicy;
use domain::models::MatchResult;
use infrastructure::config::Config;
use infrastructure::corpus::{builtin_corpus, load_corpus, write_corpus};
use infrastructure::embedder::EmbeddingBackend;
use infrastructure::embedding_storage::EmbeddingStorage;
use shared::telemetry::init_tracing;
use shared::types::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "campus_faq")]
#[command(about = "Campus portal FAQ chatbot backed by sentence embeddings")]
pub struct Cli {
    /// Enter interactive chat mode
    #[arg(long)]
    pub chat: bool,

    /// Read `{"message": ..}` lines from stdin and answer with `{"response": ..}` lines
    #[arg(long, conflicts_with = "chat")]
    pub json: bool,

    /// Write the built-in FAQ corpus as JSON and exit
    #[arg(long, value_name = "PATH")]
    pub export_corpus: Option<PathBuf>,

    /// Minimum cosine similarity for an answer (overrides FAQ_MATCH_THRESHOLD)
    #[arg(long, allow_negative_numbers = true)]
    pub threshold: Option<f32>,

    /// FAQ corpus JSON file (overrides FAQ_CORPUS_PATH)
    #[arg(long, value_name = "PATH")]
    pub corpus: Option<PathBuf>,

    /// Ignore any stored embedding snapshot and re-embed the corpus
    #[arg(long)]
    pub rebuild: bool,

    /// Print the similarity score next to each answer
    #[arg(long)]
    pub show_score: bool,

    /// The question to answer
    #[arg(trailing_var_arg = true)]
    pub args: Vec<String>,
}

/// Threshold and no-match answer from the merged configuration.
pub fn match_policy(config: &Config) -> Result<MatchPolicy> {
    let policy = MatchPolicy::new(config.require_threshold()?)?;
    Ok(match &config.fallback_answer {
        Some(answer) => policy.with_fallback_answer(answer.as_str()),
        None => policy,
    })
}

/// Command-line values win over the environment.
pub fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(threshold) = cli.threshold {
        config.threshold = Some(threshold);
    }
    if let Some(corpus) = &cli.corpus {
        config.corpus_path = Some(corpus.clone());
    }
}

pub struct CliApp {
    show_score: bool,
}

impl CliApp {
    pub fn new() -> Self {
        Self { show_score: false }
    }

    pub async fn run(&mut self, cli: Cli) -> Result<()> {
        init_tracing("info");
        self.show_score = cli.show_score;

        if let Some(path) = &cli.export_corpus {
            let corpus = builtin_corpus();
            write_corpus(path, &corpus)?;
            println!(
                "{}",
                format!("Wrote {} FAQ entries to {}", corpus.len(), path.display()).green()
            );
            return Ok(());
        }

        let service = self.start(&cli).await?;
        if cli.json {
            self.handle_json(&service).await
        } else if cli.chat {
            self.handle_chat(&service).await
        } else {
            self.handle_query(&service, &cli.args.join(" ")).await
        }
    }

    /// Load configuration and corpus, then build the cache before any
    /// question is answered.
    async fn start(&self, cli: &Cli) -> Result<ChatbotService<EmbeddingBackend>> {
        let mut config = Config::load()?;
        apply_overrides(&mut config, cli);

        let policy = match_policy(&config)?;
        let corpus = match &config.corpus_path {
            Some(path) => load_corpus(path)?,
            None => builtin_corpus(),
        };
        let backend = EmbeddingBackend::from_config(&config);
        let storage = config
            .db_path
            .as_ref()
            .map(EmbeddingStorage::new)
            .transpose()?;

        eprintln!("Preparing FAQ index for {} questions...", corpus.len());
        let cache = provision_cache(corpus, &backend, storage.as_ref(), cli.rebuild).await?;
        let matcher = FaqMatcher::new(Arc::new(cache), policy, backend);
        Ok(ChatbotService::new(matcher, config.request_timeout))
    }

    async fn handle_query(&self, service: &ChatbotService<EmbeddingBackend>, question: &str) -> Result<()> {
        let question = if question.trim().is_empty() {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt("Question")
                .allow_empty(true)
                .interact_text()?
        } else {
            question.to_string()
        };
        let result = service.answer(&question).await;
        self.print_answer(&result);
        Ok(())
    }

    async fn handle_chat(&self, service: &ChatbotService<EmbeddingBackend>) -> Result<()> {
        println!("Campus FAQ chat. Type 'exit' to quit.");
        loop {
            let input: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("You")
                .allow_empty(true)
                .interact_text()?;
            let input = input.trim();
            if input.is_empty() {
                continue;
            }
            if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
                break;
            }
            let result = service.answer(input).await;
            self.print_answer(&result);
        }
        Ok(())
    }

    async fn handle_json(&self, service: &ChatbotService<EmbeddingBackend>) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let response = service.respond_raw(&line).await;
            println!("{}", serde_json::to_string(&response)?);
        }
        Ok(())
    }

    fn print_answer(&self, result: &MatchResult) {
        let answer = if result.matched {
            result.answer.green()
        } else {
            result.answer.yellow()
        };
        if self.show_score {
            let status = if result.matched { "matched" } else { "no match" };
            println!(
                "{} {}",
                answer,
                format!("(score {:.3}, {status})", result.score).dimmed()
            );
        } else {
            println!("{}", answer);
        }
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
