// src/main.rs
// =============================================================================
// This is the entry point of the gist-search application.
//
// What happens here:
// 1. Set up logging (stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Build the GitHub client and dispatch to the chosen subcommand
// 4. Exit with proper code (0 = matches found / server stopped cleanly,
//    1 = search found nothing, 2 = error)
// =============================================================================

mod cli;           // src/cli.rs - command-line parsing
mod error;         // src/error.rs - API error kinds and their HTTP mapping
mod github;        // src/github/ - GitHub gist API client
mod search;        // src/search/ - matching and pagination
mod server;        // src/server/ - HTTP routes and server loop

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use github::HttpGistClient;
use search::{search_gists, SearchQuery, SearchResult};

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Printed once, on stderr, next to the log lines
            eprintln!("{}", fatal_message(&e));
            2
        }
    };

    std::process::exit(exit_code);
}

// One line with the whole context chain: "Error: outer: inner"
fn fatal_message(error: &anyhow::Error) -> String {
    format!("Error: {:#}", error)
}

// Logs go to stderr so `search --json` output on stdout stays clean
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let client = HttpGistClient::new(cli.github.client_config())?;

    match cli.command {
        Commands::Serve { host, port } => {
            server::serve(&host, port, client).await?;
            Ok(0)
        }
        Commands::Search {
            username,
            pattern,
            page,
            page_size,
            json,
        } => handle_search(&client, username, pattern, page, page_size, json).await,
    }
}

// Handles the 'search' subcommand
//
// Goes through exactly the same validation and pipeline as the HTTP endpoint.
async fn handle_search(
    client: &HttpGistClient,
    username: String,
    pattern: String,
    page: i64,
    page_size: i64,
    json: bool,
) -> Result<i32> {
    let query = SearchQuery::new(Some(username), Some(pattern), Some(page), Some(page_size))?;
    let result = search_gists(client, &query).await?;

    print_results(&result, json)?;

    if result.total_count > 0 {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn print_results(result: &SearchResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print_table(result);
    }
    Ok(())
}

// Prints one row per matching gist on this page, then a summary
fn print_table(result: &SearchResult) {
    println!("{:<34} {:<20} {:<50}", "GIST", "OWNER", "DESCRIPTION");
    println!("{}", "=".repeat(106));

    for gist in &result.matches {
        let owner = gist.owner.as_ref().map(|o| o.login.as_str()).unwrap_or("-");
        println!(
            "{:<34} {:<20} {:<50}",
            gist.id,
            owner,
            truncate(gist.description_text(), 50)
        );
    }

    println!();
    println!("📊 Summary:");
    println!("   🔎 Pattern: {}", result.pattern);
    println!(
        "   📄 Page {} (size {}): {} match(es)",
        result.page, result.page_size, result.count
    );
    println!("   📋 Total: {}", result.total_count);
}

// Shortens text for display without splitting a character
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
