use std::fs;
use std::path::PathBuf;

use things::config::Config;
use things::Things;

#[test]
fn load_or_default_ignores_invalid_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "application = 123").expect("write invalid config");

    let cfg = Config::load_or_default(&path);
    assert_eq!(cfg.application, "Things3");
    assert_eq!(cfg.search.default_limit, 50);
}

#[test]
fn partial_config_keeps_other_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    fs::write(&path, "[search]\ndefault_limit = 5\n")?;

    let cfg = Config::load(&path)?;
    assert_eq!(cfg.search.default_limit, 5);
    assert_eq!(cfg.application, "Things3");
    assert_eq!(cfg.osascript, PathBuf::from("osascript"));
    Ok(())
}

#[test]
fn client_from_config_carries_settings() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    let content = r#"
application = "Things3 Beta"
osascript = "/opt/bin/osascript"

[search]
default_limit = 12
"#;
    fs::write(&path, content.trim())?;

    let cfg = Config::resolve(Some(&path))?;
    let things = Things::from_config(&cfg);
    assert_eq!(things.search_limit(), 12);
    assert_eq!(
        things.executor().program(),
        PathBuf::from("/opt/bin/osascript").as_path()
    );
    Ok(())
}

#[test]
fn explicit_invalid_config_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "osascript = \"\"").expect("write config");

    let err = Config::resolve(Some(&path)).expect_err("invalid config");
    assert_eq!(err.exit_code(), 2);
}
