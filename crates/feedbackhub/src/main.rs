//! `fbhub` - CLI for feedbackhub
//!
//! This binary provides the command-line interface for running the feedback
//! service and interacting with stored feedback.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use feedbackhub::cli::{
    AddCommand, AskCommand, Cli, Command, ConfigCommand, ListCommand, ServeCommand, TopicCommand,
};
use feedbackhub::{init_logging, AppState, Config, FeedbackEntry, FeedbackStore, QaClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    // Execute the command
    match cli.command {
        Command::Serve(cmd) => handle_serve(&config, &cmd).await,
        Command::Add(cmd) => handle_add(&config, &cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Ask(cmd) => handle_ask(&config, &cmd).await,
        Command::Topic(cmd) => handle_topic(&config, &cmd).await,
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

async fn handle_serve(config: &Config, cmd: &ServeCommand) -> anyhow::Result<()> {
    let bind_addr = match &cmd.bind {
        Some(addr) => addr
            .parse()
            .with_context(|| format!("invalid bind address '{addr}'"))?,
        None => config.bind_addr()?,
    };

    let store = FeedbackStore::open(config.csv_path());
    let qa = QaClient::new(&config.qa)?;
    let state = AppState::new(store, qa);

    feedbackhub::http::serve(state, bind_addr).await?;
    Ok(())
}

fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<()> {
    let store = FeedbackStore::open(config.csv_path());
    let entry = FeedbackEntry::new(cmd.category.clone(), cmd.message.clone());
    store.append(&entry)?;

    println!("Stored feedback entry {}", entry.id);
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let store = FeedbackStore::open(config.csv_path());
    let mut entries = store.load()?;
    if let Some(limit) = cmd.limit {
        entries.truncate(limit);
    }

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No feedback has been stored yet.");
    } else {
        for entry in &entries {
            println!(
                "[{}] [{}] {} ({})",
                entry.timestamp, entry.category, entry.message, entry.id
            );
        }
    }
    Ok(())
}

async fn handle_ask(config: &Config, cmd: &AskCommand) -> anyhow::Result<()> {
    let qa = QaClient::new(&config.qa)?;
    let csv_path = config.csv_path();

    match feedbackhub::answer_question_from_csv(&qa, &cmd.question, &csv_path).await {
        Ok(answer) => {
            println!("{answer}");
            Ok(())
        }
        Err(err) if err.is_no_feedback() => {
            println!("No feedback has been stored yet.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

async fn handle_topic(config: &Config, cmd: &TopicCommand) -> anyhow::Result<()> {
    let qa = QaClient::new(&config.qa)?;
    let csv_path = config.csv_path();

    match feedbackhub::estimate_topic_frequency(&qa, &cmd.topic, &csv_path).await {
        Ok(result) => {
            println!("Topic:     {}", result.topic);
            println!("Matches:   {} of {} entries", result.matches, result.total);
            if result.skipped > 0 {
                println!("Skipped:   {}", result.skipped);
            }
            println!("Frequency: {:.1}%", result.frequency * 100.0);
            Ok(())
        }
        Err(err) if err.is_no_feedback() => {
            println!("No feedback has been stored yet.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Feedback file:  {}", config.csv_path().display());
                println!();
                println!("[Server]");
                println!("  Bind address:   {}", config.server.bind_addr);
                println!();
                println!("[QA]");
                println!("  Endpoint:       {}", config.qa.endpoint);
                println!("  Model:          {}", config.qa.model);
                println!(
                    "  API token:      {}",
                    if config.qa.api_token.is_some() {
                        "set"
                    } else {
                        "not set"
                    }
                );
                println!("  Timeout (ms):   {}", config.qa.timeout_ms);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
