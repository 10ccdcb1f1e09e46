//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action executed by the binary.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::auth;
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let auth_opts = auth::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        frontend_base_url: auth_opts.frontend_base_url,
        access_ttl_seconds: auth_opts.access_ttl_seconds,
        refresh_ttl_seconds: auth_opts.refresh_ttl_seconds,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn dispatch_builds_server_action() {
        temp_env::with_vars(
            [
                ("LUANTO_PORT", None::<&str>),
                ("LUANTO_FRONTEND_URL", None),
                ("LUANTO_ACCESS_TTL", None),
                ("LUANTO_REFRESH_TTL", None),
            ],
            || {
                let matches = commands::new().get_matches_from(vec![
                    "luanto",
                    "--port",
                    "9090",
                    "--frontend-url",
                    "https://app.luanto.dev",
                    "--access-ttl",
                    "600",
                ]);
                let action = handler(&matches).expect("action");
                let Action::Server(args) = action;
                assert_eq!(args.port, 9090);
                assert_eq!(args.frontend_base_url, "https://app.luanto.dev");
                assert_eq!(args.access_ttl_seconds, 600);
                assert_eq!(args.refresh_ttl_seconds, 604_800);
            },
        );
    }
}
