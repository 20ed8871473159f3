use super::*;
use serial_test::serial;
use tempfile::tempdir;

#[test]
fn defaults_apply_when_fields_missing() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.lock_keyring_suspend(), DEFAULT_LOCK_KEYRING_SUSPEND);
    assert_eq!(
        config.lock_keyring_hibernate(),
        DEFAULT_LOCK_KEYRING_HIBERNATE
    );
    assert_eq!(config.network_sleep(), DEFAULT_NETWORK_SLEEP);
}

#[test]
fn explicit_values_override_defaults() {
    let config: Config = toml::from_str(
        "lock_keyring_suspend = true\n\
         lock_keyring_hibernate = true\n\
         network_sleep = false\n",
    )
    .unwrap();
    assert!(config.lock_keyring_suspend());
    assert!(config.lock_keyring_hibernate());
    assert!(!config.network_sleep());
}

#[test]
fn unknown_keys_are_rejected() {
    let result: Result<Config, _> = toml::from_str("lock_keyring = true\n");
    assert!(result.is_err());
}

#[test]
#[serial]
fn load_from_path_reads_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("sleepctl.toml");
    std::fs::write(&path, "network_sleep = false\n").unwrap();

    let config = Config::load_from_path(&path).unwrap();
    assert!(!config.network_sleep());
    // Unset fields fall back to defaults
    assert_eq!(config.lock_keyring_suspend(), DEFAULT_LOCK_KEYRING_SUSPEND);
}

#[test]
#[serial]
fn load_from_missing_path_fails() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("does-not-exist.toml");
    assert!(Config::load_from_path(&path).is_err());
}

#[test]
#[serial]
fn default_config_file_round_trips() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("sleepctl").join("sleepctl.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = Config::load_from_path(&path).unwrap();
    assert_eq!(config, Config::default());
}
