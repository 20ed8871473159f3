//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a
//! clean interface for the main dispatch logic. It supports the standard
//! help, version, and debug flags while gracefully handling unknown
//! options.

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Suspend the machine to RAM
    Suspend {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Hibernate the machine to disk
    Hibernate {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Power the machine off
    Poweroff {
        debug_enabled: bool,
        config_dir: Option<String>,
    },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    ///
    /// # Returns
    /// ParsedArgs containing the determined action
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut config_dir: Option<String> = None;
        let mut command: Option<String> = None;
        let mut unknown_arg_found = false;

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut idx = 0;
        while idx < args_vec.len() {
            let arg = &args_vec[idx];
            match arg.as_str() {
                "--debug" | "-d" => debug_enabled = true,
                "--help" | "-h" => return ParsedArgs {
                    action: CliAction::ShowHelp,
                },
                "--version" | "-V" => return ParsedArgs {
                    action: CliAction::ShowVersion,
                },
                "--config" | "-c" => {
                    if idx + 1 < args_vec.len() {
                        config_dir = Some(args_vec[idx + 1].clone());
                        idx += 1;
                    } else {
                        log_warning!("--config requires a directory argument");
                        unknown_arg_found = true;
                    }
                }
                other if other.starts_with('-') => {
                    log_warning!("Unknown option: {}", other);
                    unknown_arg_found = true;
                }
                other => {
                    if command.is_some() {
                        log_warning!("Unexpected extra argument: {}", other);
                        unknown_arg_found = true;
                    } else {
                        command = Some(other.to_string());
                    }
                }
            }
            idx += 1;
        }

        if unknown_arg_found {
            return ParsedArgs {
                action: CliAction::ShowHelpDueToError,
            };
        }

        let action = match command.as_deref() {
            Some("suspend") => CliAction::Suspend {
                debug_enabled,
                config_dir,
            },
            Some("hibernate") => CliAction::Hibernate {
                debug_enabled,
                config_dir,
            },
            Some("poweroff") | Some("shutdown") => CliAction::Poweroff {
                debug_enabled,
                config_dir,
            },
            Some(other) => {
                log_warning!("Unknown command: {}", other);
                CliAction::ShowHelpDueToError
            }
            None => CliAction::ShowHelp,
        };

        ParsedArgs { action }
    }
}

/// Display the help message.
pub fn display_help_message() {
    println!("sleepctl v{}", env!("CARGO_PKG_VERSION"));
    println!("Suspend, hibernate, and shutdown mechanics for systemd-logind desktops");
    println!();
    println!("Usage: sleepctl [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  suspend          Suspend the machine to RAM");
    println!("  hibernate        Hibernate the machine to disk");
    println!("  poweroff         Power the machine off");
    println!();
    println!("Options:");
    println!("  -c, --config <DIR>  Use an alternate configuration directory");
    println!("  -d, --debug         Enable detailed debug output");
    println!("  -h, --help          Print this help message");
    println!("  -V, --version       Print version information");
}

/// Display the version message.
pub fn display_version_message() {
    println!("sleepctl v{}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        let mut argv = vec!["sleepctl"];
        argv.extend_from_slice(args);
        ParsedArgs::parse(argv).action
    }

    #[test]
    fn no_arguments_shows_help() {
        assert_eq!(parse(&[]), CliAction::ShowHelp);
    }

    #[test]
    fn suspend_command() {
        assert_eq!(
            parse(&["suspend"]),
            CliAction::Suspend {
                debug_enabled: false,
                config_dir: None,
            }
        );
    }

    #[test]
    fn hibernate_with_debug_flag() {
        assert_eq!(
            parse(&["-d", "hibernate"]),
            CliAction::Hibernate {
                debug_enabled: true,
                config_dir: None,
            }
        );
    }

    #[test]
    fn poweroff_accepts_shutdown_alias() {
        assert_eq!(
            parse(&["shutdown"]),
            CliAction::Poweroff {
                debug_enabled: false,
                config_dir: None,
            }
        );
    }

    #[test]
    fn config_dir_flag_consumes_argument() {
        assert_eq!(
            parse(&["--config", "/tmp/conf", "suspend"]),
            CliAction::Suspend {
                debug_enabled: false,
                config_dir: Some("/tmp/conf".to_string()),
            }
        );
    }

    #[test]
    fn config_flag_without_argument_is_an_error() {
        assert_eq!(parse(&["suspend", "--config"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn help_flag_wins_over_command() {
        assert_eq!(parse(&["suspend", "--help"]), CliAction::ShowHelp);
    }

    #[test]
    fn version_flag() {
        assert_eq!(parse(&["-V"]), CliAction::ShowVersion);
    }

    #[test]
    fn unknown_command_shows_help_with_error() {
        assert_eq!(parse(&["restart"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn unknown_flag_shows_help_with_error() {
        assert_eq!(parse(&["suspend", "--force"]), CliAction::ShowHelpDueToError);
    }
}
