//! Tests for rule file selection and settings file discovery.

use std::ffi::OsString;
use std::fs;

use ortho_config::OrthoConfig;
use rstest::rstest;
use tempfile::TempDir;

use crate::GongConfig;
use crate::error::PingError;
use crate::ping::RuleSet;

#[rstest]
fn explicit_rules_file_is_loaded() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("rules.toml");
    fs::write(
        &path,
        "[[rules]]\nmatch_name = \"alice\"\ndelay = 60\nenabled = true\n",
    )
    .expect("rules file should be written");
    let config = GongConfig {
        rules_file: Some(path.to_string_lossy().into_owned()),
        ..Default::default()
    };

    let rule_set = config.load_rule_set().expect("rules should load");

    let delays: Vec<i64> = rule_set.rules.iter().map(|rule| rule.delay).collect();
    assert_eq!(delays, vec![60]);
}

#[rstest]
fn missing_explicit_rules_file_is_an_error() {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = GongConfig {
        rules_file: Some(dir.path().join("absent.toml").to_string_lossy().into_owned()),
        ..Default::default()
    };

    let result = config.load_rule_set();

    assert!(
        matches!(result, Err(PingError::Configuration { .. })),
        "expected Configuration error, got {result:?}"
    );
}

const SETTINGS_WITH_RULE: &str = "delay = 777\n\n[[rules]]\nmatch_name = \"alice\"\ndelay = 60\nenabled = true\n";

/// Isolated home, XDG, and settings-path environment for discovery tests.
struct DiscoveryEnv {
    home: TempDir,
    xdg: TempDir,
}

impl DiscoveryEnv {
    fn new() -> Self {
        Self {
            home: TempDir::new().expect("home dir should be created"),
            xdg: TempDir::new().expect("xdg dir should be created"),
        }
    }

    /// Loads settings and rules with `config_path` exported as `GONG_CONFIG_PATH`.
    fn load(&self, config_path: Option<&str>) -> (GongConfig, RuleSet) {
        let home = self.home.path().to_string_lossy().into_owned();
        let xdg = self.xdg.path().to_string_lossy().into_owned();
        let _guard = env_lock::lock_env([
            ("HOME", Some(home.as_str())),
            ("XDG_CONFIG_HOME", Some(xdg.as_str())),
            ("XDG_CONFIG_DIRS", Some(xdg.as_str())),
            ("GONG_CONFIG_PATH", config_path),
            ("GONG_DELAY", None),
            ("GONG_RULES_FILE", None),
        ]);

        let config = GongConfig::load_from_iter([OsString::from("gong")])
            .expect("config should load");
        let rule_set = config.load_rule_set().expect("rules should load");
        (config, rule_set)
    }
}

fn rule_delays(rule_set: &RuleSet) -> Vec<i64> {
    rule_set.rules.iter().map(|rule| rule.delay).collect()
}

#[rstest]
fn home_dotfile_supplies_settings_and_rules() {
    let env = DiscoveryEnv::new();
    fs::write(env.home.path().join(".gong.toml"), SETTINGS_WITH_RULE)
        .expect("settings file should be written");

    let (config, rule_set) = env.load(None);

    assert_eq!(config.delay, 777, "delay should come from the home dotfile");
    assert_eq!(rule_delays(&rule_set), vec![60], "rules should come from the same file");
}

#[rstest]
fn xdg_config_file_supplies_rules() {
    let env = DiscoveryEnv::new();
    let app_dir = env.xdg.path().join("gong");
    fs::create_dir_all(&app_dir).expect("xdg app dir should be created");
    fs::write(app_dir.join("gong.toml"), SETTINGS_WITH_RULE)
        .expect("settings file should be written");

    let (config, rule_set) = env.load(None);

    assert_eq!(config.delay, 777);
    assert_eq!(rule_delays(&rule_set), vec![60]);
}

#[rstest]
fn xdg_file_wins_over_home_dotfile() {
    let env = DiscoveryEnv::new();
    let app_dir = env.xdg.path().join("gong");
    fs::create_dir_all(&app_dir).expect("xdg app dir should be created");
    fs::write(app_dir.join("gong.toml"), SETTINGS_WITH_RULE)
        .expect("xdg settings should be written");
    fs::write(
        env.home.path().join(".gong.toml"),
        "delay = 5\n\n[[rules]]\nmatch_name = \"bob\"\ndelay = 1\n",
    )
    .expect("home settings should be written");

    let (config, rule_set) = env.load(None);

    assert_eq!(config.delay, 777, "settings should come from the xdg file");
    assert_eq!(rule_delays(&rule_set), vec![60], "rules should follow the settings file");
}

#[rstest]
fn config_path_variable_names_the_settings_file() {
    let env = DiscoveryEnv::new();
    let path = env.home.path().join("custom.toml");
    fs::write(&path, SETTINGS_WITH_RULE).expect("settings file should be written");
    let path_text = path.to_string_lossy().into_owned();

    let (config, rule_set) = env.load(Some(path_text.as_str()));

    assert_eq!(config.delay, 777);
    assert_eq!(rule_delays(&rule_set), vec![60]);
}

#[rstest]
fn no_settings_file_yields_empty_rule_set() {
    let env = DiscoveryEnv::new();

    let (config, rule_set) = env.load(None);

    assert_eq!(config.delay, 0);
    assert_eq!(rule_set, RuleSet::default());
}
