//! reagent CLI entry point.
//!
//! Two modes:
//! - interactive chat (default): type messages, `reset` clears history,
//!   `exit` quits
//! - single message: `reagent -m "What is 25 times 16?"`

use clap::Parser;
use reagent_agent::ReactAgent;
use reagent_config::{AgentConfig, Credentials};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(
    name = "reagent",
    about = "A ReAct conversational agent with web search, vector search, and calculator tools",
    version
)]
struct Cli {
    /// Send a single message instead of entering interactive mode
    #[arg(short, long)]
    message: Option<String>,

    /// Model to use (overrides config)
    #[arg(long)]
    model: Option<String>,

    /// Include the calculator tool
    #[arg(short, long)]
    calculator: bool,

    /// Print each reasoning step and enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let mut config = AgentConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    config.include_calculator |= cli.calculator;
    config.verbose |= cli.verbose;

    let credentials = Credentials::from_env();

    // Check for the model key early and give a clear error
    if credentials.openai_api_key.is_none() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set the model provider key:");
        eprintln!("    export OPENAI_API_KEY='sk-...'");
        eprintln!();
        eprintln!("  Optionally, for live web search:");
        eprintln!("    export TAVILY_API_KEY='tvly-...'");
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    if credentials.tavily_api_key.is_none() {
        eprintln!("  Note: TAVILY_API_KEY is not set; web search will return placeholder results.");
    }

    let mut agent = ReactAgent::from_config(&config, &credentials)?;

    if let Some(msg) = cli.message {
        // Single message mode
        let response = agent.process_user_input(&msg).await?;
        println!("{response}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  reagent interactive mode");
    println!("  Model: {}", config.model);
    println!("  Type your message and press Enter.");
    println!("  Type 'reset' to clear the conversation, 'exit' to quit.");
    println!();

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    print_prompt();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            print_prompt();
            continue;
        }

        match line {
            "exit" | "quit" | "q" => break,
            "reset" => {
                agent.reset_conversation();
                println!("  Conversation history has been reset.");
            }
            _ => match agent.process_user_input(line).await {
                Ok(response) => {
                    println!();
                    for out in response.lines() {
                        println!("  Agent > {out}");
                    }
                    println!();
                }
                Err(e) => {
                    eprintln!("  [Error] {e}");
                }
            },
        }

        print_prompt();
    }

    println!();
    println!("  Goodbye!");
    Ok(())
}

fn print_prompt() {
    use std::io::Write;
    print!("  You > ");
    let _ = std::io::stdout().flush();
}
