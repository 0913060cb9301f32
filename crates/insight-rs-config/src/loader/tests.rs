//! Tests for layered configuration loading.

use super::*;
use crate::{Domain, ModelProvider};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write JSON5 contents to a path, creating parent directories if needed.
fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

/// Options that never touch the real system or home directory.
fn isolated_options(root: &Path, cwd: &Path) -> LayeredConfigOptions {
    let mut options = LayeredConfigOptions::new(cwd);
    options.system_config_path = Some(root.join("system.json5"));
    options.user_config_path = Some(root.join("user.json5"));
    options
}

#[test]
fn parse_minimal_config() {
    let config = InsightConfig::load_from_str("{}").expect("config");
    assert_eq!(config.agent.max_iterations, 15);
    assert_eq!(config.agent.domain, Domain::Climate);
    assert_eq!(config.model.provider, ModelProvider::Openai);
    assert_eq!(config.tools.output_policy.replacement, "[REDACTED]");
    assert_eq!(config.data.seed, 42);
}

#[test]
fn parses_json5_with_comments_and_trailing_commas() {
    let json5 = r#"{
        // banking demo on a custom port
        server: { port: 9000, },
        agent: { domain: "banking", max_iterations: 4, },
        model: { provider: "anthropic", name: "claude-sonnet-4", },
    }"#;
    let config = InsightConfig::load_from_str(json5).expect("config");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.agent.domain, Domain::Banking);
    assert_eq!(config.agent.max_iterations, 4);
    assert_eq!(config.model.provider, ModelProvider::Anthropic);
    assert_eq!(config.model.provider.api_key_env(), "ANTHROPIC_API_KEY");
}

#[test]
fn rejects_unknown_top_level_key() {
    let err = InsightConfig::load_from_str(r#"{ unexpected: true }"#).unwrap_err();
    assert!(format!("{err}").contains("unknown key"));
}

#[test]
fn rejects_invalid_domain() {
    let err = InsightConfig::load_from_str(r#"{ agent: { domain: "weather" } }"#).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("agent.domain"));
    assert!(msg.contains("climate, banking"));
}

#[test]
fn rejects_negative_iteration_cap() {
    let err = InsightConfig::load_from_str(r#"{ agent: { max_iterations: -1 } }"#).unwrap_err();
    assert!(format!("{err}").contains("agent.max_iterations"));
}

#[test]
fn rejects_zero_iteration_cap() {
    let err = InsightConfig::load_from_str(r#"{ agent: { max_iterations: 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("max_iterations")));
}

#[test]
fn rejects_non_string_redact_key() {
    let json5 = r#"{ tools: { output_policy: { redact_keys: ["token", 3] } } }"#;
    let err = InsightConfig::load_from_str(json5).unwrap_err();
    assert!(format!("{err}").contains("tools.output_policy.redact_keys[1]"));
}

#[test]
fn layered_config_prefers_cwd_over_project_and_user() {
    let temp = TempDir::new().expect("tmp");
    let root = temp.path();
    let project_root = root.join("project");
    fs::create_dir_all(project_root.join(".git")).expect("git");
    let cwd = project_root.join("subdir");
    fs::create_dir_all(&cwd).expect("cwd");

    write_json5(&root.join("system.json5"), "{ server: { port: 1000 } }");
    write_json5(
        &root.join("user.json5"),
        "{ server: { port: 2000 }, data: { seed: 7 } }",
    );
    write_json5(
        &project_root.join(CONFIG_FILE_NAME),
        "{ server: { port: 3000 }, agent: { max_iterations: 5 } }",
    );
    write_json5(&cwd.join(CONFIG_FILE_NAME), "{ server: { port: 4000 } }");

    let layered =
        InsightConfig::load_layered_with_options(isolated_options(root, &cwd)).expect("layered");

    assert_eq!(layered.config.server.port, 4000);
    assert_eq!(layered.config.agent.max_iterations, 5);
    assert_eq!(layered.config.data.seed, 7);
    let sources: Vec<_> = layered.layers.iter().map(|layer| layer.source).collect();
    assert_eq!(
        sources,
        vec![
            ConfigLayerSource::System,
            ConfigLayerSource::User,
            ConfigLayerSource::Project,
            ConfigLayerSource::Cwd,
        ]
    );
}

#[test]
fn runtime_layer_overrides_everything() {
    let temp = TempDir::new().expect("tmp");
    let root = temp.path();
    let cwd = root.join("work");
    fs::create_dir_all(&cwd).expect("cwd");

    write_json5(&cwd.join(CONFIG_FILE_NAME), "{ model: { name: \"cwd\" } }");
    let runtime = root.join("override.json5");
    write_json5(&runtime, "{ model: { name: \"runtime\" } }");

    let options = isolated_options(root, &cwd).with_runtime_path(&runtime);
    let layered = InsightConfig::load_layered_with_options(options).expect("layered");

    assert_eq!(layered.config.model.name, "runtime");
    assert_eq!(
        layered.layers.last().map(|layer| layer.source),
        Some(ConfigLayerSource::Runtime)
    );
}

#[test]
fn missing_runtime_layer_is_an_error() {
    let temp = TempDir::new().expect("tmp");
    let root = temp.path();
    let options = isolated_options(root, root).with_runtime_path(root.join("absent.json5"));
    let err = InsightConfig::load_layered_with_options(options).unwrap_err();
    assert!(matches!(err, ConfigError::MissingLayer(path) if path.ends_with("absent.json5")));
}

#[test]
fn invalid_layer_reports_its_origin() {
    let temp = TempDir::new().expect("tmp");
    let root = temp.path();
    write_json5(&root.join("user.json5"), "{ history: { enabled: \"yes\" } }");

    let err = InsightConfig::load_layered_with_options(isolated_options(root, root)).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("user("));
    assert!(msg.contains("history.enabled"));
}
