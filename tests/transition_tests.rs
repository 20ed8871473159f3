//! Integration tests driving the transition controller through the public
//! API with recording fake adapters.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use sleepctl::config::Config;
use sleepctl::logger::Log;
use sleepctl::{
    Control, ControlError, CredentialStore, NetworkStack, PowerAction, PowerManager, SleepKind,
    TransitionObserver,
};

type Journal = Arc<Mutex<Vec<String>>>;

struct FakePowerManager {
    journal: Journal,
    running: bool,
    action_ok: bool,
}

impl PowerManager for FakePowerManager {
    fn is_running(&self) -> bool {
        self.running
    }

    fn request(&self, action: PowerAction) -> Result<()> {
        self.journal
            .lock()
            .unwrap()
            .push(format!("action({})", action.name()));
        if self.action_ok {
            Ok(())
        } else {
            Err(anyhow::anyhow!("Sleep verb not supported"))
        }
    }
}

struct FakeCredentialStore {
    journal: Journal,
    locked: usize,
}

impl CredentialStore for FakeCredentialStore {
    fn lock_all(&self) -> Result<usize> {
        self.journal.lock().unwrap().push("keyring-lock".into());
        Ok(self.locked)
    }
}

struct FakeNetworkStack {
    journal: Journal,
}

impl NetworkStack for FakeNetworkStack {
    fn sleep(&self) -> Result<()> {
        self.journal.lock().unwrap().push("network-sleep".into());
        Ok(())
    }

    fn wake(&self) -> Result<()> {
        self.journal.lock().unwrap().push("network-wake".into());
        Ok(())
    }
}

struct RecordingObserver {
    journal: Journal,
}

impl TransitionObserver for RecordingObserver {
    fn sleeping(&self, kind: SleepKind) {
        self.journal
            .lock()
            .unwrap()
            .push(format!("sleep-notify({})", kind.as_str()));
    }

    fn resumed(&self, kind: SleepKind) {
        self.journal
            .lock()
            .unwrap()
            .push(format!("resume-notify({})", kind.as_str()));
    }
}

fn config(lock_suspend: bool, lock_hibernate: bool, network_sleep: bool) -> Config {
    Config {
        lock_keyring_suspend: Some(lock_suspend),
        lock_keyring_hibernate: Some(lock_hibernate),
        network_sleep: Some(network_sleep),
    }
}

fn controller(
    journal: &Journal,
    config: Config,
    running: bool,
    action_ok: bool,
    locked: usize,
) -> Control {
    let mut control = Control::new(
        config,
        Box::new(FakePowerManager {
            journal: journal.clone(),
            running,
            action_ok,
        }),
        Box::new(FakeCredentialStore {
            journal: journal.clone(),
            locked,
        }),
        Box::new(FakeNetworkStack {
            journal: journal.clone(),
        }),
    );
    control.add_observer(Box::new(RecordingObserver {
        journal: journal.clone(),
    }));
    control
}

fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

#[test]
fn unreachable_manager_stops_everything() {
    Log::set_enabled(false);
    let journal: Journal = Default::default();
    let control = controller(&journal, config(true, true, true), false, true, 1);

    assert!(matches!(
        control.suspend(),
        Err(ControlError::ManagerUnreachable)
    ));
    assert!(matches!(
        control.hibernate(),
        Err(ControlError::ManagerUnreachable)
    ));
    assert!(matches!(
        control.shutdown(),
        Err(ControlError::ManagerUnreachable)
    ));
    assert!(entries(&journal).is_empty());
}

#[test]
fn successful_suspend_with_everything_enabled() {
    Log::set_enabled(false);
    let journal: Journal = Default::default();
    let control = controller(&journal, config(true, false, true), true, true, 2);

    assert!(control.suspend().is_ok());
    assert_eq!(
        entries(&journal),
        vec![
            "keyring-lock",
            "network-sleep",
            "sleep-notify(suspend)",
            "action(Suspend)",
            "resume-notify(suspend)",
            "network-wake",
        ]
    );
}

#[test]
fn failed_hibernate_still_pairs_notifications_and_network_calls() {
    Log::set_enabled(false);
    let journal: Journal = Default::default();
    let control = controller(&journal, config(false, false, true), true, false, 0);

    let err = control.hibernate().unwrap_err();
    assert!(err.to_string().contains("Hibernate request failed"));
    assert!(err.to_string().contains("Sleep verb not supported"));

    let log = entries(&journal);
    let sleeps = log.iter().filter(|e| *e == "network-sleep").count();
    let wakes = log.iter().filter(|e| *e == "network-wake").count();
    let sleep_notifies = log.iter().filter(|e| e.starts_with("sleep-notify")).count();
    let resume_notifies = log.iter().filter(|e| e.starts_with("resume-notify")).count();
    assert_eq!(sleeps, wakes);
    assert_eq!(sleep_notifies, resume_notifies);
    assert!(log.contains(&"resume-notify(hibernate)".to_string()));
}

#[test]
fn network_disabled_never_sleeps_or_wakes() {
    Log::set_enabled(false);
    let journal: Journal = Default::default();
    let control = controller(&journal, config(false, false, false), true, false, 0);

    assert!(control.suspend().is_err());
    let log = entries(&journal);
    assert!(!log.iter().any(|e| e.starts_with("network")));
    // Notifications still pair even on failure
    assert_eq!(
        log,
        vec![
            "sleep-notify(suspend)",
            "action(Suspend)",
            "resume-notify(suspend)",
        ]
    );
}

#[test]
fn poweroff_is_gate_plus_request_only() {
    Log::set_enabled(false);
    let journal: Journal = Default::default();
    let control = controller(&journal, config(true, true, true), true, true, 1);

    assert!(control.shutdown().is_ok());
    assert_eq!(entries(&journal), vec!["action(PowerOff)"]);
}
