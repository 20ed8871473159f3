//! Application coordinator that manages one transition end to end.
//!
//! This module handles resource acquisition and orchestration for a single
//! CLI invocation: configuration loading, adapter wiring, observer
//! registration, and running the requested transition through the
//! controller.

use crate::config::{self, Config};
use crate::control::{Control, ControlError, SleepKind, TransitionObserver};
use crate::dbus::{LogindPower, NetworkManagerAdapter};

/// The transition requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Suspend,
    Hibernate,
    Poweroff,
}

/// Observer that traces sleep/resume notifications in debug mode.
struct DebugObserver;

impl TransitionObserver for DebugObserver {
    fn sleeping(&self, kind: SleepKind) {
        log_indented!("listeners notified: preparing to {}", kind.as_str());
    }

    fn resumed(&self, kind: SleepKind) {
        log_indented!("listeners notified: resumed from {}", kind.as_str());
    }
}

/// Runner for a single sleepctl invocation.
pub struct Sleepctl {
    debug_enabled: bool,
    config_dir: Option<String>,
}

impl Sleepctl {
    pub fn new(debug_enabled: bool, config_dir: Option<String>) -> Self {
        Self {
            debug_enabled,
            config_dir,
        }
    }

    /// Execute the requested transition.
    ///
    /// Returns `Ok(())` when the power action was acknowledged; a hard
    /// failure (unreachable logind, rejected action) comes back as an
    /// error for the caller to turn into an exit code.
    pub fn run(self, request: Request) -> Result<(), ControlError> {
        log_version!();

        if let Err(e) = config::set_config_dir(self.config_dir) {
            log_error_exit!("Failed to set configuration directory: {}", e);
            std::process::exit(crate::constants::EXIT_FAILURE);
        }

        let config = match Config::load() {
            Ok(config) => config,
            Err(e) => {
                log_error_exit!("Configuration failed");
                eprintln!("{e:?}");
                std::process::exit(crate::constants::EXIT_FAILURE);
            }
        };

        if self.debug_enabled {
            config.log_config();
        }

        let mut control = Control::new(
            config,
            Box::new(LogindPower),
            Box::new(credential_store()),
            Box::new(NetworkManagerAdapter),
        );
        if self.debug_enabled {
            control.add_observer(Box::new(DebugObserver));
        }

        let result = match request {
            Request::Suspend => {
                log_block_start!("Suspending...");
                control.suspend()
            }
            Request::Hibernate => {
                log_block_start!("Hibernating...");
                control.hibernate()
            }
            Request::Poweroff => {
                log_block_start!("Powering off...");
                control.shutdown()
            }
        };

        match &result {
            Ok(()) => log_decorated!("Done"),
            Err(e) => {
                log_pipe!();
                log_error!("{}", e);
            }
        }
        log_end!();

        result
    }
}

#[cfg(feature = "secret-service")]
fn credential_store() -> crate::dbus::SecretServiceStore {
    crate::dbus::SecretServiceStore
}

#[cfg(not(feature = "secret-service"))]
fn credential_store() -> crate::dbus::NoopCredentialStore {
    crate::dbus::NoopCredentialStore
}
