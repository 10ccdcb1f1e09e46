use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub mod auth;
pub mod logging;

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("luanto")
        .about("Multi-tenant accounts and access control")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("LUANTO_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    let command = auth::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "luanto");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Multi-tenant accounts and access control"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("LUANTO_PORT", None::<&str>),
                ("LUANTO_FRONTEND_URL", None),
                ("LUANTO_ACCESS_TTL", None),
                ("LUANTO_REFRESH_TTL", None),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["luanto"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(8080));
                assert_eq!(
                    matches
                        .get_one::<String>(auth::ARG_FRONTEND_URL)
                        .map(String::as_str),
                    Some("http://localhost:5173")
                );
                assert_eq!(
                    matches.get_one::<i64>(auth::ARG_ACCESS_TTL).copied(),
                    Some(900)
                );
                assert_eq!(
                    matches.get_one::<i64>(auth::ARG_REFRESH_TTL).copied(),
                    Some(604_800)
                );
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("LUANTO_PORT", Some("443")),
                ("LUANTO_FRONTEND_URL", Some("https://app.luanto.dev")),
                ("LUANTO_ACCESS_TTL", Some("600")),
                ("LUANTO_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["luanto"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(
                    matches
                        .get_one::<String>(auth::ARG_FRONTEND_URL)
                        .map(String::as_str),
                    Some("https://app.luanto.dev")
                );
                assert_eq!(
                    matches.get_one::<i64>(auth::ARG_ACCESS_TTL).copied(),
                    Some(600)
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("LUANTO_LOG_LEVEL", Some(level))], || {
                let command = new();
                let matches = command.get_matches_from(vec!["luanto"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(index as u8)
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("LUANTO_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["luanto".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();

                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(index as u8)
                );
            });
        }
    }
}
