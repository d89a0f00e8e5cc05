use super::*;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::net::IpAddr;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_lodestar_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("LODESTAR_PORT");
        env::remove_var("LODESTAR_BIND_ADDR");
        env::remove_var("LODESTAR_PROVIDER_URL");
        env::remove_var("LODESTAR_PROVIDER_TIMEOUT_SECS");
        env::remove_var("LODESTAR_SAFETY_LEVEL");
        env::remove_var("LODESTAR_MODEL_DIR");
        env::remove_var("LODESTAR_BLOCKLIST_PATH");
        env::remove_var("LODESTAR_FETCH_LIMIT");
        env::remove_var("LODESTAR_EMBED_PREFIX_CHARS");
        env::remove_var("LODESTAR_RESULT_TTL_SECS");
        env::remove_var("LODESTAR_SUGGESTION_TTL_SECS");
        env::remove_var("LODESTAR_CACHE_CAPACITY");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.provider_url, DEFAULT_PROVIDER_URL);
    assert_eq!(config.provider_timeout, Duration::from_secs(10));
    assert_eq!(config.safety_level, SafetyLevel::Moderate);
    assert!(config.model_dir.is_none());
    assert!(config.blocklist_path.is_none());
    assert_eq!(config.fetch_limit, DEFAULT_FETCH_LIMIT);
    assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_lodestar_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert_eq!(config.provider_url, DEFAULT_PROVIDER_URL);
    assert_eq!(config.safety_level, SafetyLevel::Moderate);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_lodestar_env();

    let config = with_env_vars(
        &[
            ("LODESTAR_PORT", "9999"),
            ("LODESTAR_PROVIDER_URL", "http://searx.internal:8080"),
            ("LODESTAR_SAFETY_LEVEL", "strict"),
            ("LODESTAR_FETCH_LIMIT", "15"),
            ("LODESTAR_RESULT_TTL_SECS", "30"),
        ],
        || Config::from_env().expect("should parse overrides"),
    );

    assert_eq!(config.port, 9999);
    assert_eq!(config.provider_url, "http://searx.internal:8080");
    assert_eq!(config.safety_level, SafetyLevel::Strict);
    assert_eq!(config.fetch_limit, 15);
    assert_eq!(config.result_ttl, Duration::from_secs(30));
}

#[test]
#[serial]
fn test_from_env_invalid_port() {
    clear_lodestar_env();

    let result = with_env_vars(&[("LODESTAR_PORT", "not-a-port")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::PortParseError { .. })));

    let result = with_env_vars(&[("LODESTAR_PORT", "0")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
}

#[test]
#[serial]
fn test_from_env_invalid_safety_level() {
    clear_lodestar_env();

    let result = with_env_vars(&[("LODESTAR_SAFETY_LEVEL", "paranoid")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidSafetyLevel { .. })));
}

#[test]
#[serial]
fn test_fetch_limit_clamped_to_hard_cap() {
    clear_lodestar_env();

    let config = with_env_vars(&[("LODESTAR_FETCH_LIMIT", "500")], || {
        Config::from_env().expect("should parse")
    });
    assert_eq!(config.fetch_limit, MAX_FETCH_LIMIT);

    let config = with_env_vars(&[("LODESTAR_FETCH_LIMIT", "0")], || {
        Config::from_env().expect("should parse")
    });
    assert_eq!(config.fetch_limit, 1);
}

#[test]
fn test_validate_rejects_missing_model_dir() {
    let config = Config {
        model_dir: Some("/nonexistent/model/dir".into()),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_rejects_empty_provider_url() {
    let config = Config {
        provider_url: "  ".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidProviderUrl { .. })
    ));
}

#[test]
fn test_load_blocklist_unset_is_empty() {
    let config = Config::default();
    assert!(config.load_blocklist().unwrap().is_empty());
}

#[test]
fn test_load_blocklist_skips_comments_and_blanks() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# comment line").unwrap();
    writeln!(file, "bannedword").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "  spaced  ").unwrap();
    file.flush().unwrap();

    let config = Config {
        blocklist_path: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    let terms = config.load_blocklist().unwrap();
    assert_eq!(terms, vec!["bannedword".to_string(), "spaced".to_string()]);

    assert!(config.validate().is_ok());
}

#[test]
fn test_load_blocklist_missing_file_is_error() {
    let config = Config {
        blocklist_path: Some("/nonexistent/blocklist.txt".into()),
        ..Default::default()
    };
    assert!(matches!(
        config.load_blocklist(),
        Err(ConfigError::BlocklistReadFailed { .. })
    ));
}
