// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - serve:  run the HTTP search service
// - search: run one search from the terminal and print the matches
//
// Flags shared by both (they talk to the same GitHub API) live in
// `GitHubArgs`, and every one of them can also be set through the
// environment, which is how the service is usually configured in containers.
// =============================================================================

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use url::Url;

use crate::github::{ClientConfig, DEFAULT_API_BASE};
use crate::search::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

#[derive(Parser, Debug)]
#[command(
    name = "gist-search",
    version,
    about = "Search a GitHub user's public gists with a regular expression",
    long_about = "gist-search lists a user's public gists and returns the ones whose description, \
                  file names or file contents match a regular expression. It runs as an HTTP \
                  service (`serve`) or as a one-off command (`search`)."
)]
pub struct Cli {
    #[command(flatten)]
    pub github: GitHubArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// How to reach GitHub
#[derive(Args, Debug)]
pub struct GitHubArgs {
    /// Base URL of the GitHub REST API
    #[arg(long, global = true, env = "GIST_SEARCH_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: Url,

    /// Timeout for each request to GitHub, in seconds
    #[arg(long, global = true, env = "GIST_SEARCH_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Token sent as a Bearer credential (raises GitHub's rate limit)
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,
}

impl GitHubArgs {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base: self.api_base.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            token: self.github_token.clone(),
            ..ClientConfig::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    ///
    /// Example: gist-search serve --port 9876
    Serve {
        /// Address to bind
        #[arg(long, env = "GIST_SEARCH_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(long, env = "GIST_SEARCH_PORT", default_value_t = 9876)]
        port: u16,
    },

    /// Search one user's gists and print the matches
    ///
    /// Example: gist-search search justdionysus "import requests" --page-size 10
    Search {
        /// GitHub username whose public gists are searched
        username: String,

        /// Regular expression to look for
        pattern: String,

        /// Page of matches to show (starts at 1)
        #[arg(long, default_value_t = DEFAULT_PAGE, allow_negative_numbers = true)]
        page: i64,

        /// Matches per page (1 to 100)
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, allow_negative_numbers = true)]
        page_size: i64,

        /// Print the JSON result instead of a table
        #[arg(long)]
        json: bool,
    },
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why `global = true` on the GitHub flags?
//    - They can be written before or after the subcommand:
//      `gist-search --api-base X search ...` and `gist-search search ... --api-base X`
//
// 2. Why `env = ...`?
//    - clap reads the variable when the flag is absent, so the service can be
//      configured without a wrapper script
//    - `hide_env_values` keeps the token out of `--help` output
//
// 3. Why i64 for the page flags?
//    - So `--page 0` or `--page -1` reach validation and get the same message
//      as the HTTP API, instead of a parse error
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_defaults() {
        let cli = Cli::try_parse_from(["gist-search", "search", "octocat", "hello"]).unwrap();

        match cli.command {
            Commands::Search { username, pattern, page, page_size, json } => {
                assert_eq!(username, "octocat");
                assert_eq!(pattern, "hello");
                assert_eq!(page, 1);
                assert_eq!(page_size, 5);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_build_client_config() {
        let cli = Cli::try_parse_from([
            "gist-search",
            "search",
            "octocat",
            "x",
            "--api-base",
            "http://localhost:8080/api/v3",
            "--timeout-secs",
            "3",
        ])
        .unwrap();

        let config = cli.github.client_config();
        assert_eq!(config.api_base.as_str(), "http://localhost:8080/api/v3");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_serve_port() {
        let cli = Cli::try_parse_from(["gist-search", "serve", "--port", "8000"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve { port: 8000, .. }));
    }
}
