//! Subcommand tests against files in a temp directory

use meteo_cli::commands;
use meteo_cli::config::CliConfig;
use meteo_cli::error::CliError;
use meteo_sdk::{BinPolicy, DecisionEngine, EngineMode, SdkError, Value};
use std::path::{Path, PathBuf};

const RULE_DOC: &str = r#"{"rule": "s <= 2 ? 'A' : s <= 5 ? 'B' : 'C'"}"#;

const HIGH_RESPONSE: &str = r#"{
    "weather": {"interpreted_data": {"area_summary": {"current_conditions": {
        "wind_speed_mps": 10.0,
        "wind_direction_deg": 90,
        "temperature_celsius": 30.0,
        "precipitation_mm": 6.0,
        "humidity_percent": 70
    }}}}
}"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn config_for(table: PathBuf) -> meteo_sdk::EngineConfig {
    CliConfig::default().engine_config(Some(table), None).unwrap()
}

#[test]
fn test_decide_provider_response() {
    let dir = tempfile::tempdir().unwrap();
    let table = write(dir.path(), "rule.json", RULE_DOC);
    let response = write(dir.path(), "response.json", HIGH_RESPONSE);

    let outcome = commands::decide(config_for(table), &response, false, None).unwrap();
    assert_eq!(outcome.key.as_str(), "2222");
    assert_eq!(outcome.decision, Value::label("C"));
}

#[test]
fn test_decide_normalized_observation_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let table = write(dir.path(), "rule.json", RULE_DOC);
    let obs = write(
        dir.path(),
        "obs.json",
        r#"{"wind_vector": {"speed_mps": 2.0, "direction_deg": 45}, "dry_bulb_temperature": 10.0, "precipitation_mm": 0.0, "relative_humidity_pct": 50.0}"#,
    );
    let exported = dir.path().join("table.yaml");

    let outcome = commands::decide(config_for(table), &obs, true, Some(&exported)).unwrap();
    assert_eq!(outcome.key.as_str(), "0101");
    assert_eq!(outcome.decision, Value::label("A"));

    let reloaded = DecisionEngine::from_file(&exported).unwrap();
    assert_eq!(reloaded.mode(), EngineMode::Table);
    assert_eq!(reloaded.table().map(|t| t.len()), Some(81));
}

#[test]
fn test_decide_missing_observation_file() {
    let dir = tempfile::tempdir().unwrap();
    let table = write(dir.path(), "rule.json", RULE_DOC);

    let result = commands::decide(config_for(table), &dir.path().join("absent.json"), false, None);
    assert!(matches!(result, Err(CliError::EngineError(SdkError::IoError(_)))));
}

#[test]
fn test_export_command() {
    let dir = tempfile::tempdir().unwrap();
    let table = write(dir.path(), "rule.json", RULE_DOC);
    let out = dir.path().join("table.json");

    commands::export(config_for(table), &out).unwrap();

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc["mapping"]["0000"], "A");
    assert_eq!(doc["mapping"]["2222"], "C");
    assert_eq!(doc["bins"]["wind_speed_mps"][2][1], "inf");
}

#[test]
fn test_inspect_compiled_and_direct() {
    let dir = tempfile::tempdir().unwrap();
    let compiled = write(dir.path(), "rule.json", RULE_DOC);
    let direct = write(
        dir.path(),
        "direct.yaml",
        "rule: \"precipitation_mm > 10 ? 'C' : 'A'\"\nevaluation: direct\ndefault: X\n",
    );

    let info = commands::inspect(config_for(compiled)).unwrap();
    assert_eq!(info.mode, EngineMode::Compiled);
    assert_eq!(info.key_space, 81);
    assert_eq!(info.entries, Some(81));
    assert!(info.to_string().contains("mode = compiled"));

    let info = commands::inspect(config_for(direct)).unwrap();
    assert_eq!(info.mode, EngineMode::Direct);
    assert_eq!(info.entries, None);
    assert_eq!(info.default, Value::label("X"));
    assert!(info.to_string().contains("entries = n/a"));
}

#[test]
fn test_bin_policy_flag() {
    let dir = tempfile::tempdir().unwrap();
    let table = write(
        dir.path(),
        "gapped.json",
        r#"{
            "bins": {
                "wind_speed_mps": [[0, 3], [4, "inf"]],
                "dry_bulb_temperature": [["-inf", "inf"]],
                "precipitation_mm": [[0, "inf"]],
                "relative_humidity_pct": [[0, "inf"]]
            },
            "rule": "i1"
        }"#,
    );

    let settings = CliConfig::default();
    let strict = settings.engine_config(Some(table.clone()), None).unwrap();
    assert!(commands::inspect(strict).is_err());

    let lenient = settings
        .engine_config(Some(table), Some(BinPolicy::Lenient))
        .unwrap();
    assert_eq!(commands::inspect(lenient).unwrap().key_space, 2);
}
