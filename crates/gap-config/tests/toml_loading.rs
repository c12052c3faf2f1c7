//! Integration tests for layered configuration loading.
//!
//! Uses figment::Jail for sandboxed env vars and working directory.

use figment::Jail;
use gap_config::GapConfig;

#[test]
fn loads_project_config_file() {
    Jail::expect_with(|jail| {
        std::fs::create_dir(jail.directory().join(".gap")).expect("create .gap");
        jail.create_file(
            ".gap/config.toml",
            r#"
[api]
base_url = "https://grc.example.cloud"
account_id = 9001
strict_audits = true
timeout_secs = 5

[auth]
client_id = "my-client"
client_secret = "my-secret"
"#,
        )?;

        let config = GapConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "https://grc.example.cloud");
        assert_eq!(config.api.account_id, "9001");
        assert!(config.api.strict_audits);
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.auth.client_id, "my-client");
        assert!(config.auth.has_client_credentials());
        assert!(config.is_configured());
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        std::fs::create_dir(jail.directory().join(".gap")).expect("create .gap");
        jail.create_file(
            ".gap/config.toml",
            r#"
[api]
base_url = "https://from-file.example"
account_id = "1"
"#,
        )?;
        jail.set_env("GAP_API__BASE_URL", "https://from-env.example");
        jail.set_env("GAP_API__ACCOUNT_ID", "77");
        jail.set_env("GAP_AUTH__CLIENT_TOKEN", "env-token");

        let config = GapConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "https://from-env.example");
        assert_eq!(config.api.account_id, "77");
        assert_eq!(config.auth.client_token, "env-token");
        assert!(config.auth.uses_token());
        assert!(config.is_configured());
        Ok(())
    });
}

#[test]
fn missing_keys_are_reported_in_order() {
    Jail::expect_with(|jail| {
        jail.set_env("GAP_API__BASE_URL", "https://grc.example.cloud");

        let config = GapConfig::load().expect("config loads");
        assert_eq!(
            config.missing_required(),
            vec!["account_id", "client_id", "client_secret"]
        );
        Ok(())
    });
}

#[test]
fn defaults_survive_partial_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("GAP_API__ACCOUNT_ID", "5");

        let config = GapConfig::load().expect("config loads");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(!config.api.strict_audits);
        assert!(config.api.user_agent.starts_with("gap-client/"));
        Ok(())
    });
}
