use clap::Parser;
use multibody::binding::{load_bindings_from_str, DeclFormat};
use multibody::cli::{execute, inspect_report, probe_report, Cli};
use multibody::runtime_config::{BindConfig, FailurePolicy};
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

const BINDINGS: &str = r#"
handlers:
  multi_basic_type:
    parameters:
      - name: param1
        type: i32
      - name: param2
        type: bool
      - name: param3
        type: f64
  pack_type:
    parameters:
      - name: param
        type: i32
        nullable: true
        key: id
"#;

fn bindings_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(BINDINGS.as_bytes()).unwrap();
    file
}

#[test]
fn test_inspect_report_lists_keys_and_types() {
    let all = load_bindings_from_str(BINDINGS, DeclFormat::Yaml).unwrap();
    let report = inspect_report(&all);
    assert!(report.contains("multi_basic_type\n"));
    assert!(report.contains("  param1 <- \"param1\": i32 required=true fallback=true\n"));
    assert!(report.contains("  param <- \"id\": Option<i32> required=true fallback=true\n"));
}

#[test]
fn test_probe_report_per_parameter() {
    let all = load_bindings_from_str(BINDINGS, DeclFormat::Yaml).unwrap();
    let multi = all.iter().find(|b| b.handler_name == "multi_basic_type").unwrap();
    let report = probe_report(
        multi,
        r#"{"param1": "3", "param2": "maybe"}"#.to_string(),
        BindConfig::default(),
    );
    assert_eq!(report["param1"], json!({ "value": 3 }));
    assert_eq!(report["param2"]["error"]["kind"], "coercion_error");
    assert_eq!(report["param3"]["error"]["kind"], "missing_required");
}

#[test]
fn test_probe_report_lenient() {
    let all = load_bindings_from_str(BINDINGS, DeclFormat::Yaml).unwrap();
    let pack = all.iter().find(|b| b.handler_name == "pack_type").unwrap();
    let config = BindConfig::default().with_failure_policy(FailurePolicy::Lenient);
    let report = probe_report(pack, "{broken".to_string(), config);
    assert_eq!(report, json!({ "param": { "value": null } }));
}

#[test]
fn test_execute_probe_with_body_text() {
    let file = bindings_file();
    let cli = Cli::try_parse_from([
        "multibody",
        "probe",
        "--bindings",
        file.path().to_str().unwrap(),
        "--handler",
        "pack_type",
        "--body-text",
        r#"{"id": "12"}"#,
    ])
    .unwrap();

    let mut out = Vec::new();
    execute(&cli, &mut out, BindConfig::default()).unwrap();
    let report: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report, json!({ "param": { "value": 12 } }));
}

#[test]
fn test_execute_probe_with_body_file() {
    let file = bindings_file();
    let mut body = NamedTempFile::new().unwrap();
    body.write_all(br#"{"param1": 1, "param2": true, "param3": 1.5}"#)
        .unwrap();
    let cli = Cli::try_parse_from([
        "multibody",
        "probe",
        "--bindings",
        file.path().to_str().unwrap(),
        "--handler",
        "multi_basic_type",
        "--body",
        body.path().to_str().unwrap(),
    ])
    .unwrap();

    let mut out = Vec::new();
    execute(&cli, &mut out, BindConfig::default()).unwrap();
    let report: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["param3"], json!({ "value": 1.5 }));
}

#[test]
fn test_execute_unknown_handler_fails() {
    let file = bindings_file();
    let cli = Cli::try_parse_from([
        "multibody",
        "probe",
        "--bindings",
        file.path().to_str().unwrap(),
        "--handler",
        "nope",
        "--body-text",
        "{}",
    ])
    .unwrap();
    let err = execute(&cli, &mut Vec::new(), BindConfig::default()).unwrap_err();
    assert!(err.to_string().contains("handler 'nope' is not declared"));
}

#[test]
fn test_execute_inspect() {
    let file = bindings_file();
    let cli = Cli::try_parse_from([
        "multibody",
        "inspect",
        "--bindings",
        file.path().to_str().unwrap(),
    ])
    .unwrap();
    let mut out = Vec::new();
    execute(&cli, &mut out, BindConfig::default()).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("multi_basic_type\n"));
}
