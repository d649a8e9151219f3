// ABOUTME: Integration tests for configuration parsing and validation.
// ABOUTME: Tests YAML parsing, env var interpolation, discovery, and network selection.

mod support;

use std::fs;
use std::time::Duration;
use support::fixtures::{DAO_CONFIG, dao_config};
use vendeploy::config::*;
use vendeploy::error::Error;

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let yaml = r#"
project: vendao
components:
  - name: Vendao
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.project, "vendao");
        assert_eq!(config.components.len(), 1);
        assert!(config.networks.is_empty());
        assert!(config.initialize.is_none());
        assert_eq!(config.artifacts, std::path::PathBuf::from("artifacts"));
        assert_eq!(config.confirmation.timeout, Duration::from_secs(300));
    }

    #[test]
    fn parse_full_config() {
        let config = dao_config();
        assert_eq!(config.components.len(), 4);
        assert_eq!(config.networks["testnet"].chain_id, Some(4002));
        assert_eq!(config.named_addresses().len(), 3);

        let init = config.initialize.as_ref().unwrap();
        assert!(init.target.is_none());
        assert_eq!(init.args.len(), 4);
    }

    #[test]
    fn empty_component_list_is_rejected() {
        let yaml = r#"
project: vendao
components: []
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("at least one component"));
    }

    #[test]
    fn invalid_component_name_is_rejected() {
        let yaml = r#"
project: vendao
components:
  - name: "Ven Dao"
"#;
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn argument_forms() {
        let yaml = r#"
project: vendao
components:
  - name: Token
    args:
      - component: Vendao
      - address: admin
      - 42
      - false
      - "text"
"#;
        let config = Config::from_yaml(yaml).unwrap();
        let args = &config.components.first().args;
        assert!(matches!(args[0], ArgEntry::Component { .. }));
        assert!(matches!(args[1], ArgEntry::Address { .. }));
        assert_eq!(args[2], ArgEntry::Number(42));
        assert_eq!(args[3], ArgEntry::Bool(false));
        assert_eq!(args[4], ArgEntry::Text("text".to_string()));
    }

    #[test]
    fn durations_use_humantime() {
        let yaml = r#"
project: vendao
components:
  - name: Vendao
confirmation:
  timeout: 10m
  poll_interval: 500ms
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.confirmation.timeout, Duration::from_secs(600));
        assert_eq!(config.confirmation.poll_interval, Duration::from_millis(500));
    }
}

mod env_values {
    use super::*;

    const ENV_CONFIG: &str = r#"
project: vendao
networks:
  fantom:
    rpc_url: { env: VENDEPLOY_TEST_RPC, default: "http://127.0.0.1:8545" }
    private_key: { env: VENDEPLOY_TEST_KEY }
    explorer:
      api_url: https://api.ftmscan.com/api
      api_key: { env: VENDEPLOY_TEST_API_KEY }
components:
  - name: Vendao
"#;

    #[test]
    fn env_references_resolve() {
        temp_env::with_vars(
            [
                ("VENDEPLOY_TEST_RPC", Some("https://rpc.ftm.tools")),
                ("VENDEPLOY_TEST_KEY", Some("0xabc")),
            ],
            || {
                let config = Config::from_yaml(ENV_CONFIG).unwrap();
                let (name, network) = config.network(None).unwrap();
                let settings = network.resolve(name).unwrap();
                assert_eq!(settings.rpc_url.as_str(), "https://rpc.ftm.tools/");
                assert_eq!(settings.require_private_key().unwrap(), "0xabc");
            },
        );
    }

    #[test]
    fn unset_env_uses_default() {
        temp_env::with_vars(
            [
                ("VENDEPLOY_TEST_RPC", None::<&str>),
                ("VENDEPLOY_TEST_KEY", Some("0xabc")),
            ],
            || {
                let config = Config::from_yaml(ENV_CONFIG).unwrap();
                let settings = config.networks["fantom"].resolve("fantom").unwrap();
                assert_eq!(settings.rpc_url.as_str(), "http://127.0.0.1:8545/");
            },
        );
    }

    #[test]
    fn missing_env_without_default_is_an_error() {
        temp_env::with_var_unset("VENDEPLOY_TEST_KEY", || {
            let config = Config::from_yaml(ENV_CONFIG).unwrap();
            let err = config.networks["fantom"].resolve("fantom").unwrap_err();
            assert!(matches!(err, Error::MissingEnvVar(var) if var == "VENDEPLOY_TEST_KEY"));
        });
    }

    #[test]
    fn missing_explorer_key_is_an_error() {
        temp_env::with_vars(
            [
                ("VENDEPLOY_TEST_KEY", Some("0xabc")),
                ("VENDEPLOY_TEST_API_KEY", None),
            ],
            || {
                let config = Config::from_yaml(ENV_CONFIG).unwrap();
                let settings = config.networks["fantom"].resolve("fantom").unwrap();
                assert!(matches!(
                    settings.require_explorer(),
                    Err(Error::MissingEnvVar(_))
                ));
            },
        );
    }

    #[test]
    fn secrets_are_not_printed() {
        temp_env::with_var("VENDEPLOY_TEST_KEY", Some("0xsecret"), || {
            let config = Config::from_yaml(ENV_CONFIG).unwrap();
            let settings = config.networks["fantom"].resolve("fantom").unwrap();
            assert!(!format!("{settings:?}").contains("0xsecret"));
        });
    }
}

mod networks {
    use super::*;

    fn with_networks(names: &[&str], default: Option<&str>) -> Config {
        let mut yaml = String::from("project: p\ncomponents:\n  - name: Vendao\n");
        if let Some(default) = default {
            yaml.push_str(&format!("default_network: {default}\n"));
        }
        if !names.is_empty() {
            yaml.push_str("networks:\n");
            for name in names {
                yaml.push_str(&format!("  {name}:\n    rpc_url: http://localhost:8545\n"));
            }
        }
        Config::from_yaml(&yaml).unwrap()
    }

    #[test]
    fn explicit_name_wins() {
        let config = with_networks(&["fantom", "forking"], Some("fantom"));
        assert_eq!(config.network(Some("forking")).unwrap().0, "forking");
    }

    #[test]
    fn default_network_is_used() {
        let config = with_networks(&["fantom", "forking"], Some("forking"));
        assert_eq!(config.network(None).unwrap().0, "forking");
    }

    #[test]
    fn single_network_is_implied() {
        let config = with_networks(&["fantom"], None);
        assert_eq!(config.network(None).unwrap().0, "fantom");
    }

    #[test]
    fn several_networks_without_default_are_ambiguous() {
        let config = with_networks(&["fantom", "forking"], None);
        assert!(matches!(
            config.network(None),
            Err(Error::AmbiguousNetwork(names)) if names == vec!["fantom", "forking"]
        ));
    }

    #[test]
    fn unknown_and_missing_networks() {
        let config = with_networks(&["fantom"], None);
        assert!(matches!(
            config.network(Some("mainnet")),
            Err(Error::UnknownNetwork(name)) if name == "mainnet"
        ));

        let config = with_networks(&[], None);
        assert!(matches!(config.network(None), Err(Error::NoNetworks)));
    }

    #[test]
    fn missing_private_key_is_reported_per_network() {
        let config = with_networks(&["fantom"], None);
        let settings = config.networks["fantom"].resolve("fantom").unwrap();
        assert!(matches!(
            settings.require_private_key(),
            Err(Error::MissingSetting { setting: "private_key", .. })
        ));
        assert!(matches!(
            settings.require_explorer(),
            Err(Error::MissingSetting { setting: "explorer", .. })
        ));
    }
}

mod discovery {
    use super::*;

    #[test]
    fn discovers_primary_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), DAO_CONFIG).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.project, "vendao");
        assert_eq!(config.artifacts_dir(), dir.path().join("artifacts"));
        assert_eq!(config.record_dir(), dir.path().join("deployments"));
    }

    #[test]
    fn discovers_dot_directory_relative_to_project_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".vendeploy")).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME_DIR), DAO_CONFIG).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.artifacts_dir(), dir.path().join("artifacts"));
    }

    #[test]
    fn missing_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::discover(dir.path()),
            Err(Error::ConfigNotFound(_))
        ));
    }

    #[test]
    fn init_writes_a_parseable_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_config(dir.path(), false).unwrap();
        assert_eq!(path, dir.path().join(CONFIG_FILENAME));

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.default_network.as_deref(), Some("fantom"));
        assert!(config.initialize.is_some());

        assert!(matches!(
            init_config(dir.path(), false),
            Err(Error::AlreadyExists(_))
        ));
        assert!(init_config(dir.path(), true).is_ok());
    }
}
