//! Command-line and environment resolution tests
//!
//! Tests that touch WILDWATCH_* variables are marked #[serial] so they do
//! not race each other.

use std::env;
use std::path::PathBuf;

use clap::Parser;
use serial_test::serial;
use wildwatch_api::cli::Args;
use wildwatch_common::config::{ServiceConfig, TomlConfig};

fn clear_env() {
    for var in [
        "WILDWATCH_PORT",
        "WILDWATCH_HOST",
        "WILDWATCH_ROOT_FOLDER",
        "WILDWATCH_CONFIG",
    ] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_no_arguments_leaves_everything_unset() {
    clear_env();

    let args = Args::try_parse_from(["wildwatch-api"]).unwrap();

    assert!(args.port.is_none());
    assert!(args.host.is_none());
    assert!(args.root_folder.is_none());
    assert!(args.config.is_none());
    assert_eq!(ServiceConfig::resolve(args.overrides(), None).port, 9874);
}

#[test]
#[serial]
fn test_command_line_arguments() {
    clear_env();

    let args = Args::try_parse_from([
        "wildwatch-api",
        "--port",
        "8000",
        "--host",
        "127.0.0.1",
        "--root-folder",
        "/tmp/ww-cli",
        "--config",
        "/tmp/ww-cli/config.toml",
    ])
    .unwrap();

    assert_eq!(args.config_path(), Some(PathBuf::from("/tmp/ww-cli/config.toml")));
    let config = ServiceConfig::resolve(args.overrides(), None);
    assert_eq!(config.bind_address(), "127.0.0.1:8000");
    assert_eq!(config.root_folder, PathBuf::from("/tmp/ww-cli"));
}

#[test]
#[serial]
fn test_environment_variables() {
    clear_env();
    env::set_var("WILDWATCH_PORT", "8500");
    env::set_var("WILDWATCH_ROOT_FOLDER", "/tmp/ww-env");

    let args = Args::try_parse_from(["wildwatch-api"]).unwrap();
    clear_env();

    assert_eq!(args.port, Some(8500));
    assert_eq!(args.root_folder, Some(PathBuf::from("/tmp/ww-env")));
}

#[test]
#[serial]
fn test_command_line_beats_environment_and_file() {
    clear_env();
    env::set_var("WILDWATCH_PORT", "8500");

    let args = Args::try_parse_from(["wildwatch-api", "--port", "8600"]).unwrap();
    clear_env();

    let file = TomlConfig {
        port: Some(8700),
        host: Some("10.0.0.1".to_string()),
        ..Default::default()
    };
    let config = ServiceConfig::resolve(args.overrides(), Some(file));

    assert_eq!(config.port, 8600);
    assert_eq!(config.host, "10.0.0.1");
}

#[test]
#[serial]
fn test_invalid_port_is_rejected() {
    clear_env();

    assert!(Args::try_parse_from(["wildwatch-api", "--port", "not-a-port"]).is_err());
}
