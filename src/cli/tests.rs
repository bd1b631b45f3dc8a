//! Unit tests for CLI commands

use crate::cli::{Cli, Commands};
use clap::Parser;

#[test]
fn test_inspect_command_parses() {
    let cli = Cli::try_parse_from(["multibody", "inspect", "--bindings", "b.yaml"]).unwrap();

    match cli.command {
        Commands::Inspect { bindings } => {
            assert_eq!(bindings.to_string_lossy(), "b.yaml");
        }
        _ => panic!("Expected Inspect command"),
    }
}

#[test]
fn test_probe_command_with_flags() {
    let cli = Cli::try_parse_from([
        "multibody",
        "probe",
        "--bindings",
        "b.yaml",
        "--handler",
        "basic_type",
        "--body-text",
        "{}",
        "--lenient",
    ])
    .unwrap();

    match cli.command {
        Commands::Probe {
            handler,
            body,
            body_text,
            lenient,
            ..
        } => {
            assert_eq!(handler, "basic_type");
            assert!(body.is_none());
            assert_eq!(body_text.as_deref(), Some("{}"));
            assert!(lenient);
        }
        _ => panic!("Expected Probe command"),
    }
}

#[test]
fn test_probe_requires_exactly_one_body_source() {
    let missing = Cli::try_parse_from([
        "multibody", "probe", "--bindings", "b.yaml", "--handler", "h",
    ]);
    assert!(missing.is_err());

    let both = Cli::try_parse_from([
        "multibody",
        "probe",
        "--bindings",
        "b.yaml",
        "--handler",
        "h",
        "--body",
        "body.json",
        "--body-text",
        "{}",
    ]);
    assert!(both.is_err());
}
