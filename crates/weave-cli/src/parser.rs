//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with the connection options
//! shared by every subcommand.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for a weave cluster.
///
/// Connection options can also come from the environment (or a `.env` file).
#[derive(Parser)]
#[command(name = "weave")]
#[command(about = "Manage tenants and run hosted GFL and agent workflows")]
#[command(version)]
pub struct Cli {
    /// Cluster URL
    #[arg(long = "url", env = "WEAVIATE_URL", global = true)]
    pub url: Option<String>,

    /// Cluster API key
    #[arg(long = "api-key", env = "WEAVIATE_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// GFL service host
    #[arg(long = "gfl-host", env = "WEAVE_GFL_HOST", global = true)]
    pub gfl_host: Option<String>,

    /// Agents service host
    #[arg(long = "agents-host", env = "WEAVE_AGENTS_HOST", global = true)]
    pub agents_host: Option<String>,

    /// Header forwarded to the cluster and hosted services, as NAME=VALUE
    /// (repeatable), e.g. a vectorizer key
    #[arg(long = "header", value_parser = parse_header, global = true)]
    pub headers: Vec<(String, String)>,

    /// Request timeout in seconds
    #[arg(long = "timeout", global = true)]
    pub timeout_secs: Option<u64>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Parse a `NAME=VALUE` header argument.
pub fn parse_header(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name missing in '{arg}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "weave",
            "--verbose",
            "--url",
            "https://cluster.example",
            "--timeout",
            "5",
            "tenants",
            "--collection",
            "Article",
            "list",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.url.as_deref(), Some("https://cluster.example"));
        assert_eq!(cli.timeout_secs, Some(5));
        assert!(cli.command.is_some());
    }

    #[test]
    fn test_repeated_headers() {
        let cli = Cli::parse_from([
            "weave",
            "--header",
            "X-OpenAI-Api-Key=sk-test",
            "--header",
            "X-Cohere-Api-Key=co=1",
        ]);
        assert_eq!(
            cli.headers,
            [
                ("X-OpenAI-Api-Key".to_string(), "sk-test".to_string()),
                ("X-Cohere-Api-Key".to_string(), "co=1".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_header_rejects_malformed() {
        assert!(parse_header("no-separator").is_err());
        assert!(parse_header("=value").is_err());
        assert_eq!(
            parse_header("X-Key=").unwrap(),
            ("X-Key".to_string(), String::new())
        );
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::parse_from(["weave"]);
        assert!(cli.command.is_none());
    }
}
