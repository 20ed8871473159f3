//! Power-state transition controller.
//!
//! This module owns the mechanics of performing a requested transition:
//! suspend, hibernate, or shutdown. It decides nothing about *when* to
//! sleep; a caller (CLI, session policy layer) triggers one transition and
//! gets back a hard result.
//!
//! The shared suspend/hibernate sequence:
//!
//! 1. Gate on systemd-logind reachability (the single hard precondition;
//!    nothing runs if it fails).
//! 2. Lock the credential store, if configured for this kind. Best-effort.
//! 3. Put the network stack to sleep, if configured. Fire-and-forget.
//! 4. Notify observers that we are about to sleep, synchronously, so lock
//!    screens and state savers finish their preparation first.
//! 5. Issue the Suspend/Hibernate request. Its outcome is the call's result.
//! 6. Notify observers of resume, paired with step 4.
//! 7. Wake the network stack, paired with step 3.
//!
//! Steps 6 and 7 run even when step 5 fails: once best-effort preparation
//! has started, it is always unwound so listeners and the network stack
//! never observe a half transition.
//!
//! Shutdown is just the gate plus a PowerOff request; the process is going
//! away, so no notifications are emitted.

use anyhow::Result;
use thiserror::Error;

use crate::config::Config;

/// Which sleep transition triggered a notification.
///
/// Shutdown has no resume phase and does not appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepKind {
    Suspend,
    Hibernate,
}

impl SleepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SleepKind::Suspend => "suspend",
            SleepKind::Hibernate => "hibernate",
        }
    }
}

/// Action names understood by the init-system power manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    PowerOff,
    Suspend,
    Hibernate,
}

impl PowerAction {
    /// The logind method name for this action.
    pub fn name(&self) -> &'static str {
        match self {
            PowerAction::PowerOff => "PowerOff",
            PowerAction::Suspend => "Suspend",
            PowerAction::Hibernate => "Hibernate",
        }
    }
}

impl From<SleepKind> for PowerAction {
    fn from(kind: SleepKind) -> Self {
        match kind {
            SleepKind::Suspend => PowerAction::Suspend,
            SleepKind::Hibernate => PowerAction::Hibernate,
        }
    }
}

/// Hard failures surfaced to the caller.
///
/// Best-effort sub-steps (keyring lock, network sleep/wake) never appear
/// here; their failures are logged as warnings and swallowed.
#[derive(Debug, Error)]
pub enum ControlError {
    /// systemd-logind was not reachable before any side effect ran.
    #[error("systemd-logind is not running, cannot perform power actions")]
    ManagerUnreachable,

    /// The power manager rejected or could not complete the action request.
    #[error("{action} request failed: {message}")]
    ActionFailed {
        action: &'static str,
        message: String,
    },
}

/// The init-system power manager: the only adapter with real authority.
///
/// `is_running` is a live check performed on every transition call, not a
/// cached flag; availability can change across the controller's lifetime.
#[cfg_attr(test, mockall::automock)]
pub trait PowerManager {
    /// Whether the power manager is reachable right now.
    fn is_running(&self) -> bool;

    /// Issue a power action request with interactive confirmation disabled.
    fn request(&self, action: PowerAction) -> Result<()>;
}

/// The secret/keyring service holding unlocked user secrets.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore {
    /// Lock all unlocked collections, returning how many were locked.
    fn lock_all(&self) -> Result<usize>;
}

/// The network management subsystem.
///
/// Both calls are fire-and-forget from the controller's perspective; a
/// returned error is only logged.
#[cfg_attr(test, mockall::automock)]
pub trait NetworkStack {
    fn sleep(&self) -> Result<()>;
    fn wake(&self) -> Result<()>;
}

/// Listener for sleep/resume notifications.
///
/// Delivery is synchronous and in registration order; a listener completes
/// before the controller proceeds to the next step.
pub trait TransitionObserver {
    fn sleeping(&self, _kind: SleepKind) {}
    fn resumed(&self, _kind: SleepKind) {}
}

/// The transition controller.
///
/// Holds a read-only settings snapshot and the three adapter seams. One
/// transition is expected to be in flight at a time; the surrounding
/// system serializes calls.
pub struct Control {
    config: Config,
    power: Box<dyn PowerManager>,
    secrets: Box<dyn CredentialStore>,
    network: Box<dyn NetworkStack>,
    observers: Vec<Box<dyn TransitionObserver>>,
}

impl Control {
    pub fn new(
        config: Config,
        power: Box<dyn PowerManager>,
        secrets: Box<dyn CredentialStore>,
        network: Box<dyn NetworkStack>,
    ) -> Self {
        Self {
            config,
            power,
            secrets,
            network,
            observers: Vec::new(),
        }
    }

    /// Register a sleep/resume listener. Notified in registration order.
    pub fn add_observer(&mut self, observer: Box<dyn TransitionObserver>) {
        self.observers.push(observer);
    }

    /// Shut down the computer.
    ///
    /// Gate on logind, then issue PowerOff. No notifications are emitted;
    /// the process will terminate with the rest of the system.
    pub fn shutdown(&self) -> Result<(), ControlError> {
        if !self.power.is_running() {
            return Err(ControlError::ManagerUnreachable);
        }

        log_debug!("Requesting systemd to shutdown");
        self.power
            .request(PowerAction::PowerOff)
            .map_err(|e| ControlError::ActionFailed {
                action: PowerAction::PowerOff.name(),
                message: format!("{e:#}"),
            })
    }

    /// Suspend the computer to RAM.
    pub fn suspend(&self) -> Result<(), ControlError> {
        self.sleep_transition(SleepKind::Suspend)
    }

    /// Hibernate the computer to disk.
    pub fn hibernate(&self) -> Result<(), ControlError> {
        self.sleep_transition(SleepKind::Hibernate)
    }

    /// The shared suspend/hibernate sequence. See the module docs for the
    /// step ordering and unwinding guarantees.
    fn sleep_transition(&self, kind: SleepKind) -> Result<(), ControlError> {
        // The single hard precondition. No side effects before this point.
        if !self.power.is_running() {
            return Err(ControlError::ManagerUnreachable);
        }

        if self.lock_keyring_for(kind) {
            match self.secrets.lock_all() {
                Ok(0) => log_warning!("could not lock keyring, no collections locked"),
                Ok(locked) => log_debug!("locked {} keyring collection(s)", locked),
                Err(e) => log_warning!("could not lock keyring: {:#}", e),
            }
        }

        let network_sleep = self.config.network_sleep();
        if network_sleep {
            if let Err(e) = self.network.sleep() {
                log_warning!("failed to put network to sleep: {:#}", e);
            }
        }

        log_debug!("emitting sleep ({})", kind.as_str());
        for observer in &self.observers {
            observer.sleeping(kind);
        }

        // Failure past this point no longer gates the post-steps: the
        // resume notification and network wake must still run so started
        // preparation is unwound.
        let action = PowerAction::from(kind);
        let result = match self.power.request(action) {
            Ok(()) => Ok(()),
            Err(e) => {
                log_error!("{} request failed: {:#}", action.name(), e);
                Err(ControlError::ActionFailed {
                    action: action.name(),
                    message: format!("{e:#}"),
                })
            }
        };

        log_debug!("emitting resume ({})", kind.as_str());
        for observer in &self.observers {
            observer.resumed(kind);
        }

        if network_sleep {
            if let Err(e) = self.network.wake() {
                log_warning!("failed to wake network: {:#}", e);
            }
        }

        result
    }

    /// Whether the credential store should be locked for this kind.
    fn lock_keyring_for(&self, kind: SleepKind) -> bool {
        match kind {
            SleepKind::Suspend => self.config.lock_keyring_suspend(),
            SleepKind::Hibernate => self.config.lock_keyring_hibernate(),
        }
    }
}
