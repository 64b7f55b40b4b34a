use crate::commons::{COMMONS_BASE, THUMB_WIDTH};
use crate::error::{LogoError, Result};
use crate::wikidata::WIKIDATA_API;
use clap::Parser;
use reqwest::blocking::Client;
use std::path::PathBuf;
use std::time::Duration;

pub const USER_AGENT: &str = "auto-brand-logos/1.0 (contact: local script)";

/// Fetch brand logos from Wikidata/Commons and store them as 128x128 PNGs.
#[derive(Parser, Debug, Clone)]
#[command(name = "fetch_logos", version)]
pub struct Config {
    /// Newline-delimited list of brand names
    #[arg(long, env = "BRANDS_FILE", default_value = "brands_tr.txt")]
    pub brands_file: PathBuf,

    /// Directory the PNG files are written to
    #[arg(long, env = "OUTPUT_DIR", default_value = "logos")]
    pub output_dir: PathBuf,

    /// Search languages in priority order
    #[arg(long, env = "SEARCH_LANGUAGES", value_delimiter = ',', default_value = "tr,en")]
    pub languages: Vec<String>,

    /// Maximum candidates requested per language
    #[arg(long, env = "CANDIDATE_LIMIT", default_value_t = 15)]
    pub candidate_limit: u32,

    /// User-Agent header sent with every request
    #[arg(long, env = "LOGO_USER_AGENT", default_value = USER_AGENT)]
    pub user_agent: String,

    /// Wikidata action API endpoint
    #[arg(long, env = "WIKIDATA_API_URL", default_value = WIKIDATA_API)]
    pub wikidata_api: String,

    /// Base URL of the media repository
    #[arg(long, env = "COMMONS_BASE_URL", default_value = COMMONS_BASE)]
    pub commons_base: String,

    /// Width requested from the thumbnail endpoint
    #[arg(long, env = "THUMB_WIDTH", default_value_t = THUMB_WIDTH)]
    pub thumb_width: u32,

    /// Timeout for search and claims queries, in seconds
    #[arg(long, env = "QUERY_TIMEOUT_SECS", default_value_t = 20)]
    pub query_timeout_secs: u64,

    /// Timeout for each logo download, in seconds
    #[arg(long, env = "DOWNLOAD_TIMEOUT_SECS", default_value_t = 30)]
    pub download_timeout_secs: u64,
}

impl Config {
    /// Reject settings that would make every lookup pointless.
    pub fn validate(&mut self) -> Result<()> {
        self.languages = self
            .languages
            .iter()
            .map(|lang| lang.trim().to_string())
            .filter(|lang| !lang.is_empty())
            .collect();

        if self.languages.is_empty() {
            return Err(LogoError::Config("at least one search language is required".into()));
        }
        if self.candidate_limit == 0 {
            return Err(LogoError::Config("candidate limit must be greater than zero".into()));
        }
        if self.thumb_width == 0 {
            return Err(LogoError::Config("thumbnail width must be greater than zero".into()));
        }

        Ok(())
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    /// The one HTTP session shared by every request of the run.
    pub fn http_client(&self) -> Result<Client> {
        Ok(Client::builder().user_agent(self.user_agent.as_str()).build()?)
    }

    pub fn print_summary(&self) {
        println!("Configuration:");
        println!("  Brands file: {}", self.brands_file.display());
        println!("  Output directory: {}", self.output_dir.display());
        println!("  Languages: {}", self.languages.join(", "));
        println!("  Candidates per language: {}", self.candidate_limit);
        println!("  Timeouts: query {}s, download {}s", self.query_timeout_secs, self.download_timeout_secs);
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENV_KEYS: [&str; 10] = [
        "BRANDS_FILE",
        "OUTPUT_DIR",
        "SEARCH_LANGUAGES",
        "CANDIDATE_LIMIT",
        "LOGO_USER_AGENT",
        "WIKIDATA_API_URL",
        "COMMONS_BASE_URL",
        "THUMB_WIDTH",
        "QUERY_TIMEOUT_SECS",
        "DOWNLOAD_TIMEOUT_SECS",
    ];

    /// Parse `args` with the environment fallbacks cleared, so only argv and
    /// defaults apply.
    fn parse_args(args: &[&str]) -> Config {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
        Config::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse_args(&["fetch_logos"]);
        assert_eq!(config.languages, vec!["tr", "en"]);
        assert_eq!(config.candidate_limit, 15);
        assert_eq!(config.thumb_width, 1024);
        assert_eq!(config.query_timeout(), Duration::from_secs(20));
        assert_eq!(config.download_timeout(), Duration::from_secs(30));
        assert_eq!(config.user_agent, USER_AGENT);
    }

    #[test]
    fn test_flags_override_defaults() {
        let mut config = parse_args(&[
            "fetch_logos",
            "--brands-file",
            "list.txt",
            "--output-dir",
            "out",
            "--languages",
            "de, en,",
            "--candidate-limit",
            "5",
        ]);
        config.validate().unwrap();

        assert_eq!(config.brands_file, PathBuf::from("list.txt"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.languages, vec!["de", "en"]);
        assert_eq!(config.candidate_limit, 5);
    }

    #[test]
    fn test_validate_rejects_empty_languages_and_zero_limit() {
        let mut config = parse_args(&["fetch_logos", "--languages", " "]);
        assert!(matches!(config.validate(), Err(LogoError::Config(_))));

        let mut config = parse_args(&["fetch_logos", "--candidate-limit", "0"]);
        assert!(matches!(config.validate(), Err(LogoError::Config(_))));
    }

    #[test]
    fn test_http_client_builds() {
        let config = parse_args(&["fetch_logos"]);
        assert!(config.http_client().is_ok());
    }
}
