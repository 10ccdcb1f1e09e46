//! Auth-related CLI arguments: token lifetimes and the frontend origin.

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};

pub const ARG_FRONTEND_URL: &str = "frontend-url";
pub const ARG_ACCESS_TTL: &str = "access-ttl";
pub const ARG_REFRESH_TTL: &str = "refresh-ttl";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_FRONTEND_URL)
                .long("frontend-url")
                .help("Frontend base URL, used for CORS and verification links")
                .env("LUANTO_FRONTEND_URL")
                .default_value("http://localhost:5173"),
        )
        .arg(
            Arg::new(ARG_ACCESS_TTL)
                .long("access-ttl")
                .help("Access token lifetime in seconds")
                .env("LUANTO_ACCESS_TTL")
                .default_value("900")
                .value_parser(clap::value_parser!(i64).range(60..)),
        )
        .arg(
            Arg::new(ARG_REFRESH_TTL)
                .long("refresh-ttl")
                .help("Refresh token lifetime in seconds")
                .env("LUANTO_REFRESH_TTL")
                .default_value("604800")
                .value_parser(clap::value_parser!(i64).range(60..)),
        )
}

#[derive(Debug, Clone)]
pub struct Options {
    pub frontend_base_url: String,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
}

impl Options {
    /// Collect the auth options out of parsed matches.
    ///
    /// # Errors
    /// Returns an error when a defaulted argument is unexpectedly absent.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        Ok(Self {
            frontend_base_url: matches
                .get_one::<String>(ARG_FRONTEND_URL)
                .cloned()
                .context("missing argument: --frontend-url")?,
            access_ttl_seconds: matches
                .get_one::<i64>(ARG_ACCESS_TTL)
                .copied()
                .context("missing argument: --access-ttl")?,
            refresh_ttl_seconds: matches
                .get_one::<i64>(ARG_REFRESH_TTL)
                .copied()
                .context("missing argument: --refresh-ttl")?,
        })
    }
}
