use std::env;

use pretty_assertions::assert_eq;
use serial_test::serial;
use sqr_api::Config;

const CONFIG_VARS: [&str; 5] = [
    "DATABASE_URL",
    "HOST",
    "PORT",
    "ENVIRONMENT",
    "CLIENT_BASE_URL",
];

fn snapshot_env() -> Vec<(&'static str, Option<String>)> {
    CONFIG_VARS
        .iter()
        .map(|&key| (key, env::var(key).ok()))
        .collect()
}

fn restore_env(snapshot: Vec<(&'static str, Option<String>)>) {
    for (key, value) in snapshot {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }
}

#[test]
#[serial]
fn defaults_apply_when_env_is_empty() {
    let snapshot = snapshot_env();
    for key in CONFIG_VARS {
        env::remove_var(key);
    }

    let config = Config::from_env_only().unwrap();
    assert_eq!(config.database_url, "sqlite:sqr-square.db");
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.environment, "development");
    assert_eq!(config.client_base_url, "http://localhost:3000");
    assert!(config.is_development());
    assert!(!config.is_production());
    assert_eq!(config.server_address(), "127.0.0.1:8080");

    restore_env(snapshot);
}

#[test]
#[serial]
fn env_values_override_defaults() {
    let snapshot = snapshot_env();

    env::set_var("DATABASE_URL", "sqlite:/tmp/other.db");
    env::set_var("HOST", "0.0.0.0");
    env::set_var("PORT", "9090");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("CLIENT_BASE_URL", "https://console.example.com");

    let config = Config::from_env_only().unwrap();
    assert_eq!(config.database_url, "sqlite:/tmp/other.db");
    assert_eq!(config.server_address(), "0.0.0.0:9090");
    assert!(config.is_production());
    assert_eq!(config.client_base_url, "https://console.example.com");

    restore_env(snapshot);
}

#[test]
#[serial]
fn invalid_port_falls_back_to_default() {
    let snapshot = snapshot_env();

    env::set_var("PORT", "not-a-port");
    let config = Config::from_env_only().unwrap();
    assert_eq!(config.port, 8080);

    restore_env(snapshot);
}
