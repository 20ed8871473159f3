//! D-Bus adapters for the transition controller.
//!
//! Implements the controller's adapter seams over zbus's blocking API:
//! - systemd-logind (`org.freedesktop.login1.Manager`, system bus) for the
//!   actual power actions
//! - the Secret Service (`org.freedesktop.secrets`, session bus) for
//!   keyring locking
//! - NetworkManager (`org.freedesktop.NetworkManager`, system bus) for
//!   sleep/wake, sent as no-reply calls
//!
//! Connections and proxies are created per call rather than held; a
//! transition happens at most a handful of times per session and logind's
//! availability can change while the process is alive.

use anyhow::{Context, Result};
use std::path::Path;
use zbus::blocking::Connection;

use crate::control::{CredentialStore, NetworkStack, PowerAction, PowerManager};

/// Runtime directory that exists only while systemd-logind is running.
const LOGIND_SEATS_DIR: &str = "/run/systemd/seats/";

/// D-Bus proxy trait for the systemd-logind Manager interface.
#[zbus::proxy(
    interface = "org.freedesktop.login1.Manager",
    default_service = "org.freedesktop.login1",
    default_path = "/org/freedesktop/login1"
)]
trait Login1Manager {
    fn power_off(&self, interactive: bool) -> zbus::Result<()>;
    fn suspend(&self, interactive: bool) -> zbus::Result<()>;
    fn hibernate(&self, interactive: bool) -> zbus::Result<()>;
}

/// Power manager adapter backed by systemd-logind.
pub struct LogindPower;

impl PowerManager for LogindPower {
    /// Live reachability check, performed fresh on every transition call.
    /// logind populates `/run/systemd/seats/` while it runs.
    fn is_running(&self) -> bool {
        Path::new(LOGIND_SEATS_DIR).exists()
    }

    fn request(&self, action: PowerAction) -> Result<()> {
        let connection = Connection::system().context("Failed to connect to system D-Bus")?;
        let proxy =
            Login1ManagerProxyBlocking::new(&connection).context("Failed to create logind proxy")?;

        // Interactive confirmation is always off; polkit prompting belongs
        // to the session layer, not this controller.
        match action {
            PowerAction::PowerOff => proxy.power_off(false),
            PowerAction::Suspend => proxy.suspend(false),
            PowerAction::Hibernate => proxy.hibernate(false),
        }
        .with_context(|| format!("logind rejected {}", action.name()))
    }
}

/// D-Bus proxy trait for the Secret Service.
#[cfg(feature = "secret-service")]
#[zbus::proxy(
    interface = "org.freedesktop.Secret.Service",
    default_service = "org.freedesktop.secrets",
    default_path = "/org/freedesktop/secrets"
)]
trait SecretService {
    fn lock(
        &self,
        objects: &[zbus::zvariant::OwnedObjectPath],
    ) -> zbus::Result<(
        Vec<zbus::zvariant::OwnedObjectPath>,
        zbus::zvariant::OwnedObjectPath,
    )>;

    #[zbus(property)]
    fn collections(&self) -> zbus::Result<Vec<zbus::zvariant::OwnedObjectPath>>;
}

/// Credential store adapter backed by the Secret Service.
#[cfg(feature = "secret-service")]
pub struct SecretServiceStore;

#[cfg(feature = "secret-service")]
impl CredentialStore for SecretServiceStore {
    fn lock_all(&self) -> Result<usize> {
        let connection = Connection::session().context("Failed to connect to session D-Bus")?;
        let proxy = SecretServiceProxyBlocking::new(&connection)
            .context("Failed to connect to secret service")?;

        let collections = proxy
            .collections()
            .context("Failed to get secret collections")?;
        if collections.is_empty() {
            return Ok(0);
        }

        let (locked, _prompt) = proxy
            .lock(&collections)
            .context("Failed to lock secret collections")?;
        Ok(locked.len())
    }
}

/// Credential store that locks nothing, for builds without a Secret
/// Service on the session bus.
pub struct NoopCredentialStore;

impl CredentialStore for NoopCredentialStore {
    fn lock_all(&self) -> Result<usize> {
        Ok(0)
    }
}

/// Network stack adapter backed by NetworkManager.
///
/// Both directions use `Sleep(b)` as a no-reply call; the controller never
/// waits for NetworkManager to acknowledge.
pub struct NetworkManagerAdapter;

impl NetworkManagerAdapter {
    fn send_sleep(&self, sleep: bool) -> Result<()> {
        let connection = Connection::system().context("Failed to connect to system D-Bus")?;
        let proxy = zbus::blocking::Proxy::new(
            &connection,
            "org.freedesktop.NetworkManager",
            "/org/freedesktop/NetworkManager",
            "org.freedesktop.NetworkManager",
        )
        .context("Failed to create NetworkManager proxy")?;

        proxy
            .call_noreply("Sleep", &(sleep))
            .context("Failed to send Sleep to NetworkManager")?;
        Ok(())
    }
}

impl NetworkStack for NetworkManagerAdapter {
    fn sleep(&self) -> Result<()> {
        self.send_sleep(true)
    }

    fn wake(&self) -> Result<()> {
        self.send_sleep(false)
    }
}
