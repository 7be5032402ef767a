//! Configuration loading from the environment.

use std::time::Duration;

use serial_test::serial;
use video_post_player::config::{Config, ConfigError};
use video_post_player::constants;

const VARS: [&str; 9] = [
    "FEED_URL",
    "FETCH_TIMEOUT_SECS",
    "PAGE_URL",
    "PAGE_SLUG",
    "PLACEHOLDER_STREAM_URL",
    "ADAPTIVE_LIBRARY_URL",
    "READY_TIMEOUT_MS",
    "VOLUME_INDICATOR_MS",
    "PREFER_HIGHEST_QUALITY",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_with_only_page_url() {
    clear_env();
    std::env::set_var("PAGE_URL", "https://site.test/post/a.html");

    let config = Config::from_env().unwrap();

    assert_eq!(config.feed_url, constants::DEFAULT_FEED_URL);
    assert_eq!(config.page_url, "https://site.test/post/a.html");
    assert_eq!(config.page_slug, None);
    assert_eq!(config.fetch_timeout, Duration::from_secs(30));
    assert_eq!(config.player.ready_timeout, constants::READY_TIMEOUT);
    assert!(!config.player.prefer_highest_quality);
    assert!(config.validate().is_ok());
    clear_env();
}

#[test]
#[serial]
fn test_missing_page_url() {
    clear_env();

    let err = Config::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::MissingEnvVar(ref name) if name == "PAGE_URL"));
}

#[test]
#[serial]
fn test_overrides() {
    clear_env();
    std::env::set_var("PAGE_URL", "https://site.test/post/a.html");
    std::env::set_var("FEED_URL", "https://site.test/data/posts.json");
    std::env::set_var("PAGE_SLUG", "a");
    std::env::set_var("READY_TIMEOUT_MS", "250");
    std::env::set_var("PREFER_HIGHEST_QUALITY", "yes");

    let config = Config::from_env().unwrap();

    assert_eq!(config.feed_url, "https://site.test/data/posts.json");
    assert_eq!(config.page_slug.as_deref(), Some("a"));
    assert_eq!(config.player.ready_timeout, Duration::from_millis(250));
    assert!(config.player.prefer_highest_quality);
    clear_env();
}

#[test]
#[serial]
fn test_bad_numbers_and_flags_are_errors() {
    clear_env();
    std::env::set_var("PAGE_URL", "https://site.test/post/a.html");

    std::env::set_var("READY_TIMEOUT_MS", "soon");
    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::ParseInt { ref name, .. }) if name == "READY_TIMEOUT_MS"
    ));
    std::env::remove_var("READY_TIMEOUT_MS");

    std::env::set_var("PREFER_HIGHEST_QUALITY", "maybe");
    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::ParseBool { ref value, .. }) if value == "maybe"
    ));
    clear_env();
}

#[test]
#[serial]
fn test_zero_ready_timeout_fails_validation() {
    clear_env();
    std::env::set_var("PAGE_URL", "https://site.test/post/a.html");
    std::env::set_var("READY_TIMEOUT_MS", "0");

    let config = Config::from_env().unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { ref name, .. }) if name == "READY_TIMEOUT_MS"
    ));
    clear_env();
}
