//! CLI dispatch for sleepctl.

use sleepctl::args::{CliAction, ParsedArgs, display_help_message, display_version_message};
use sleepctl::constants::EXIT_FAILURE;
use sleepctl::{Request, Sleepctl};

fn main() {
    let parsed = ParsedArgs::parse(std::env::args());

    let (request, debug_enabled, config_dir) = match parsed.action {
        CliAction::Suspend {
            debug_enabled,
            config_dir,
        } => (Request::Suspend, debug_enabled, config_dir),
        CliAction::Hibernate {
            debug_enabled,
            config_dir,
        } => (Request::Hibernate, debug_enabled, config_dir),
        CliAction::Poweroff {
            debug_enabled,
            config_dir,
        } => (Request::Poweroff, debug_enabled, config_dir),
        CliAction::ShowHelp => {
            display_help_message();
            return;
        }
        CliAction::ShowVersion => {
            display_version_message();
            return;
        }
        CliAction::ShowHelpDueToError => {
            display_help_message();
            std::process::exit(EXIT_FAILURE);
        }
    };

    if Sleepctl::new(debug_enabled, config_dir).run(request).is_err() {
        std::process::exit(EXIT_FAILURE);
    }
}
