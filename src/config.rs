//! Server configuration
//!
//! CLI arguments with environment fallbacks. A `.env` file is loaded by the
//! binary before parsing.

use std::convert::Infallible;
use std::net::SocketAddr;

use clap::{Parser, Subcommand};

use crate::contact::ContactConfig;
use crate::content::client::DEFAULT_API_VERSION;
use crate::content::{ContentBackend, Perspective, SanityConfig};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("NEXT_PUBLIC_SANITY_PROJECT_ID is required when NEXT_PUBLIC_USE_SANITY=true")]
    MissingSanityProject,
    #[error("SANITY_API_TOKEN is required for draft previews")]
    PreviewWithoutToken,
    #[error("{name} must be greater than zero")]
    NotPositive { name: &'static str },
}

/// Content API and contact endpoint for the Coin Nations summit site
#[derive(Parser, Debug, Clone)]
#[command(name = "summit-content")]
#[command(about = "Content API and contact form endpoint for the Coin Nations summit site")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// Read content from Sanity instead of the bundled data ("true" to enable)
    #[arg(long, env = "NEXT_PUBLIC_USE_SANITY", value_parser = parse_backend_flag)]
    pub use_sanity: Option<ContentBackend>,

    #[arg(long, env = "NEXT_PUBLIC_SANITY_PROJECT_ID")]
    pub sanity_project_id: Option<String>,

    #[arg(long, env = "NEXT_PUBLIC_SANITY_DATASET", default_value = "production")]
    pub sanity_dataset: String,

    #[arg(long, env = "NEXT_PUBLIC_SANITY_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub sanity_api_version: String,

    /// Token for server-side reads and for storing contact submissions
    #[arg(long, env = "SANITY_API_TOKEN", hide_env_values = true)]
    pub sanity_token: Option<String>,

    /// Read published content through the Sanity CDN (ignored with a token)
    #[arg(long, env = "SANITY_USE_CDN", default_value = "false")]
    pub sanity_use_cdn: bool,

    /// Serve draft content (requires a token)
    #[arg(long, env = "SANITY_PREVIEW", default_value = "false")]
    pub sanity_preview: bool,

    /// Shared secret expected by the revalidate endpoint
    #[arg(long, env = "SANITY_REVALIDATE_SECRET", hide_env_values = true)]
    pub revalidate_secret: Option<String>,

    /// Accepted contact submissions per client IP and window
    #[arg(long, env = "CONTACT_RATE_LIMIT", default_value = "3")]
    pub contact_rate_limit: u32,

    #[arg(long, env = "CONTACT_RATE_WINDOW_SECS", default_value = "3600")]
    pub contact_rate_window_secs: u64,

    /// Submissions sent sooner than this after the form rendered are spam
    #[arg(long, env = "CONTACT_MIN_FILL_MS", default_value = "3000")]
    pub contact_min_fill_ms: i64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print one content resource as JSON
    Show {
        /// settings, home, speakers, team, partners or supporters
        resource: String,
    },
    /// Print per-type document counts of the Sanity dataset
    Counts,
}

fn parse_backend_flag(value: &str) -> Result<ContentBackend, Infallible> {
    Ok(ContentBackend::from_flag(Some(value)))
}

impl Args {
    /// Backend resolved from `NEXT_PUBLIC_USE_SANITY` at parse time
    pub fn backend(&self) -> ContentBackend {
        self.use_sanity.unwrap_or_default()
    }

    /// Sanity connection settings, when a project id is configured
    ///
    /// Reads go to the live API unless `SANITY_USE_CDN` opts in. Server-side
    /// reads carry the token when there is one, which also keeps them off the
    /// CDN.
    pub fn sanity_config(&self) -> Option<SanityConfig> {
        let project_id = self
            .sanity_project_id
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())?;

        let mut config = SanityConfig::new(project_id, self.sanity_dataset.trim())
            .with_api_version(self.sanity_api_version.clone())
            .with_cdn(self.sanity_use_cdn);
        if let Some(token) = self.sanity_token.as_deref().filter(|t| !t.is_empty()) {
            config = config.with_token(token);
        }
        if self.sanity_preview {
            config = config.with_perspective(Perspective::PreviewDrafts);
        }
        Some(config)
    }

    pub fn contact_config(&self) -> ContactConfig {
        ContactConfig::default()
            .with_max_requests(self.contact_rate_limit)
            .with_window_secs(self.contact_rate_window_secs)
            .with_min_fill_ms(self.contact_min_fill_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend() == ContentBackend::Sanity && self.sanity_config().is_none() {
            return Err(ConfigError::MissingSanityProject);
        }

        if self.sanity_preview && self.sanity_token.is_none() {
            return Err(ConfigError::PreviewWithoutToken);
        }

        if self.contact_rate_limit == 0 {
            return Err(ConfigError::NotPositive {
                name: "CONTACT_RATE_LIMIT",
            });
        }

        if self.contact_rate_window_secs == 0 {
            return Err(ConfigError::NotPositive {
                name: "CONTACT_RATE_WINDOW_SECS",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["summit-content"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["--use-sanity", "false"]);
        assert_eq!(args.listen.port(), 3000);
        assert_eq!(args.backend(), ContentBackend::Static);
        assert_eq!(args.contact_config(), ContactConfig::default());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_sanity_requires_project() {
        let args = parse(&["--use-sanity", "true", "--sanity-project-id", " "]);
        assert!(matches!(args.validate(), Err(ConfigError::MissingSanityProject)));

        let args = parse(&["--use-sanity", "TRUE", "--sanity-project-id", "abc123"]);
        assert!(args.validate().is_ok());
        let config = args.sanity_config().unwrap();
        assert_eq!(config.project_id, "abc123");
        assert_eq!(config.dataset, "production");
        assert_eq!(config.api_version, "2024-01-25");
    }

    #[test]
    fn test_cdn_is_opt_in() {
        let args = parse(&["--sanity-project-id", "abc123"]);
        let config = args.sanity_config().unwrap();
        assert!(!config.uses_cdn());
        assert!(config.query_endpoint().starts_with("https://abc123.api.sanity.io/"));

        let args = parse(&["--sanity-project-id", "abc123", "--sanity-use-cdn"]);
        assert!(args.sanity_config().unwrap().uses_cdn());

        let args = parse(&[
            "--sanity-project-id",
            "abc123",
            "--sanity-use-cdn",
            "--sanity-token",
            "sk-test",
        ]);
        assert!(!args.sanity_config().unwrap().uses_cdn());
    }

    #[test]
    fn test_backend_flag_parsed_once() {
        let args = parse(&["--use-sanity", " True ", "--sanity-project-id", "abc123"]);
        assert_eq!(args.use_sanity, Some(ContentBackend::Sanity));
        assert_eq!(args.backend(), ContentBackend::Sanity);

        let args = parse(&["--use-sanity", "yes"]);
        assert_eq!(args.use_sanity, Some(ContentBackend::Static));
    }

    #[test]
    fn test_invalid_limits() {
        let args = parse(&["--use-sanity", "false", "--contact-rate-limit", "0"]);
        assert!(matches!(args.validate(), Err(ConfigError::NotPositive { .. })));
    }

    #[test]
    fn test_subcommands() {
        let args = parse(&["show", "speakers"]);
        assert_eq!(
            args.command,
            Some(Command::Show {
                resource: "speakers".to_string()
            })
        );
        assert_eq!(parse(&[]).command, None);
    }
}
