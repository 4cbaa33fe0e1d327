use crate::{Error, Result};

/// Options for the `run` command; values are `None` when not provided on CLI.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunOptions {
    pub config_path: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

/// Parsed command-line intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(RunOptions),
    ShowHelp,
    ShowVersion,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self> {
        if args.is_empty() {
            return Ok(Command::Run(RunOptions::default()));
        }

        let mut iter = args.iter();
        match iter.next().map(|s| s.as_str()) {
            Some("run") => Ok(Command::Run(parse_run_options(&mut iter)?)),
            Some("--help") | Some("-h") => Ok(Command::ShowHelp),
            Some("--version") | Some("-V") => Ok(Command::ShowVersion),
            Some(flag) if flag.starts_with('-') => {
                // `run` may be omitted: hand the consumed flag and the rest to the run parser.
                let mut flags: Vec<String> = Vec::with_capacity(args.len());
                flags.push(flag.to_string());
                flags.extend(iter.map(|s| s.to_string()));
                let mut iter = flags.iter();
                Ok(Command::Run(parse_run_options(&mut iter)?))
            }
            Some(cmd) => Err(Error::InvalidArgs(format!(
                "unknown command '{cmd}', try --help"
            ))),
            None => Ok(Command::Run(RunOptions::default())),
        }
    }

    pub fn help() -> &'static str {
        concat!(
            "meteoclock - desk clock and weather display\n",
            "\n",
            "USAGE:\n",
            "  meteoclock run [--config <path>] [--latitude <deg>] [--longitude <deg>]\n",
            "                 [--log-level <level>] [--log-file <path>]\n",
            "  meteoclock --help\n",
            "  meteoclock --version\n",
            "\n",
            "OPTIONS:\n",
            "  --config <path>      Config file (default: ~/.meteoclock/config.toml)\n",
            "  --latitude <deg>     Weather location latitude (default: 40.7799)\n",
            "  --longitude <deg>    Weather location longitude (default: -73.8051)\n",
            "  --log-level <level>  error|warn|info|debug|trace (default: info)\n",
            "  --log-file <path>    Also append log lines to this file\n",
            "  -h, --help           Show this help\n",
            "  -V, --version        Show version\n",
        )
    }

    pub fn print_help() {
        println!("{}", Self::help());
    }
}

fn parse_run_options(iter: &mut std::slice::Iter<String>) -> Result<RunOptions> {
    let mut opts = RunOptions::default();

    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--config" => {
                opts.config_path = Some(take_value(flag, iter)?);
            }
            "--latitude" => {
                let raw = take_value(flag, iter)?;
                opts.latitude = Some(
                    raw.parse()
                        .map_err(|_| Error::InvalidArgs("latitude must be a number".to_string()))?,
                );
            }
            "--longitude" => {
                let raw = take_value(flag, iter)?;
                opts.longitude = Some(
                    raw.parse()
                        .map_err(|_| Error::InvalidArgs("longitude must be a number".to_string()))?,
                );
            }
            "--log-level" => {
                opts.log_level = Some(take_value(flag, iter)?);
            }
            "--log-file" => {
                opts.log_file = Some(take_value(flag, iter)?);
            }
            other => {
                return Err(Error::InvalidArgs(format!(
                    "unknown flag '{other}', try --help"
                )));
            }
        }
    }

    Ok(opts)
}

fn take_value(flag: &str, iter: &mut std::slice::Iter<String>) -> Result<String> {
    iter.next()
        .cloned()
        .ok_or_else(|| Error::InvalidArgs(format!("expected a value after {flag}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults_with_no_args() {
        let args: Vec<String> = vec![];
        let cmd = Command::parse(&args).unwrap();
        assert_eq!(cmd, Command::Run(RunOptions::default()));
    }

    #[test]
    fn parse_run_with_overrides() {
        let args = vec![
            "run".into(),
            "--config".into(),
            "/etc/meteoclock.toml".into(),
            "--latitude".into(),
            "47.6062".into(),
            "--longitude".into(),
            "-122.3321".into(),
            "--log-level".into(),
            "debug".into(),
        ];
        let expected = RunOptions {
            config_path: Some("/etc/meteoclock.toml".into()),
            latitude: Some(47.6062),
            longitude: Some(-122.3321),
            log_level: Some("debug".into()),
            log_file: None,
        };
        let cmd = Command::parse(&args).unwrap();
        assert_eq!(cmd, Command::Run(expected));
    }

    #[test]
    fn parse_run_allows_implicit_subcommand() {
        let args = vec!["--log-file".into(), "/tmp/meteoclock.log".into()];
        let expected = RunOptions {
            log_file: Some("/tmp/meteoclock.log".into()),
            ..RunOptions::default()
        };
        let cmd = Command::parse(&args).unwrap();
        assert_eq!(cmd, Command::Run(expected));
    }

    #[test]
    fn parse_help_and_version() {
        assert_eq!(Command::parse(&["--help".into()]).unwrap(), Command::ShowHelp);
        assert_eq!(Command::parse(&["-V".into()]).unwrap(), Command::ShowVersion);
    }

    #[test]
    fn parse_rejects_unknown_flag() {
        let args = vec!["--nope".into()];
        let err = Command::parse(&args).unwrap_err();
        assert!(format!("{err}").contains("unknown flag"));
    }

    #[test]
    fn parse_rejects_missing_value() {
        let args = vec!["run".into(), "--latitude".into()];
        let err = Command::parse(&args).unwrap_err();
        assert!(format!("{err}").contains("expected a value after --latitude"));
    }

    #[test]
    fn parse_rejects_non_numeric_coordinate() {
        let args = vec!["--longitude".into(), "west".into()];
        assert!(Command::parse(&args).is_err());
    }
}
