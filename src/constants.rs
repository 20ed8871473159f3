//! Default values and process exit codes.

/// Lock the Secret Service keyring before suspending.
pub const DEFAULT_LOCK_KEYRING_SUSPEND: bool = false;

/// Lock the Secret Service keyring before hibernating.
pub const DEFAULT_LOCK_KEYRING_HIBERNATE: bool = false;

/// Put NetworkManager to sleep around a transition.
pub const DEFAULT_NETWORK_SLEEP: bool = true;

/// Exit code for any failed transition or startup error.
pub const EXIT_FAILURE: i32 = 1;
