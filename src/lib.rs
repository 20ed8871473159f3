//! # sleepctl Library
//!
//! Internal library for the sleepctl binary.
//!
//! sleepctl performs the mechanics of a requested power-state transition
//! (suspend, hibernate, shutdown) on a systemd-logind system. It does not
//! decide *when* to sleep; it coordinates the credential store and the
//! network stack around the actual power action and reports whether the
//! transition ran.
//!
//! ## Architecture
//!
//! - **Core Logic**: `control` holds the transition controller, its
//!   adapter seams, and the sleep/resume observer registry
//! - **Adapters**: `dbus` implements the seams over zbus (systemd-logind,
//!   Secret Service, NetworkManager)
//! - **Configuration**: `config` for TOML-based settings
//! - **Infrastructure**: CLI parsing and logging

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

// Public API modules
pub mod args;
pub mod config;
pub mod constants;
pub mod control;
pub mod dbus;

// Internal modules
mod sleepctl;

// Re-export for binary and integration tests
pub use control::{
    Control, ControlError, CredentialStore, NetworkStack, PowerAction, PowerManager, SleepKind,
    TransitionObserver,
};
pub use sleepctl::{Request, Sleepctl};
