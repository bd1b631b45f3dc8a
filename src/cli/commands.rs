use crate::binding::{load_bindings, HandlerBindings};
use crate::body::RequestContext;
use crate::logging::{init_logging_with_config, LogConfig};
use crate::resolver::{key, Resolver};
use crate::runtime_config::{BindConfig, FailurePolicy};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

/// Command-line interface for multibody
///
/// Inspects binding declarations and probes request bodies against them.
#[derive(Parser)]
#[command(name = "multibody")]
#[command(about = "Bind handler parameters from one JSON request body", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List every handler's body-bound parameters
    Inspect {
        /// Path to the binding declaration file (YAML or JSON)
        #[arg(short, long)]
        bindings: PathBuf,
    },
    /// Resolve one handler's parameters against a request body
    Probe {
        /// Path to the binding declaration file (YAML or JSON)
        #[arg(short, long)]
        bindings: PathBuf,

        /// Handler whose parameters are resolved
        #[arg(long)]
        handler: String,

        /// File holding the request body
        #[arg(long, conflicts_with = "body_text", required_unless_present = "body_text")]
        body: Option<PathBuf>,

        /// Request body given inline
        #[arg(long)]
        body_text: Option<String>,

        /// Report failures as absent values instead of errors
        #[arg(long, default_value_t = false)]
        lenient: bool,
    },
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - Logging cannot be initialized
/// - The declaration file cannot be read or is invalid
/// - The requested handler is not declared
/// - The body file cannot be read
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging_with_config(&LogConfig::from_env())?;
    let stdout = std::io::stdout();
    execute(&cli, &mut stdout.lock(), BindConfig::from_env())
}

/// Run `cli` writing its report to `out`.
pub fn execute<W: Write>(cli: &Cli, out: &mut W, config: BindConfig) -> Result<()> {
    match &cli.command {
        Commands::Inspect { bindings } => {
            let all = load_declarations(bindings)?;
            out.write_all(inspect_report(&all).as_bytes())?;
            Ok(())
        }
        Commands::Probe {
            bindings,
            handler,
            body,
            body_text,
            lenient,
        } => {
            let all = load_declarations(bindings)?;
            let declared = all
                .iter()
                .find(|b| &b.handler_name == handler)
                .with_context(|| format!("handler '{handler}' is not declared"))?;

            let text = match (body, body_text) {
                (Some(path), _) => std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read body file {}", path.display()))?,
                (None, Some(text)) => text.clone(),
                (None, None) => String::new(),
            };

            let config = if *lenient {
                config.with_failure_policy(FailurePolicy::Lenient)
            } else {
                config
            };

            let report = probe_report(declared, text, config);
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn load_declarations(path: &Path) -> Result<Vec<HandlerBindings>> {
    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in bindings path"))?;
    load_bindings(path_str)
}

/// One block per handler, one line per parameter.
pub fn inspect_report(all: &[HandlerBindings]) -> String {
    let mut report = String::new();
    for bindings in all {
        report.push_str(&bindings.handler_name);
        report.push('\n');
        for p in &bindings.parameters {
            report.push_str(&format!(
                "  {} <- \"{}\": {} required={} fallback={}\n",
                p.source_name(),
                key::resolve_key(p),
                p.declared_type(),
                p.is_required(),
                p.allows_whole_object_fallback(),
            ));
        }
    }
    report
}

/// Resolve every parameter of `bindings` against `body`.
///
/// Unlike the dispatcher this does not stop at the first failure: each
/// parameter gets either `{"value": ..}` or `{"error": {"kind", "message"}}`.
pub fn probe_report(bindings: &HandlerBindings, body: String, config: BindConfig) -> Value {
    let resolver = Resolver::new(config);
    let ctx = RequestContext::with_limits(Cursor::new(body.into_bytes()), config.body_limits());

    let mut report = Map::new();
    for p in &bindings.parameters {
        let entry = match resolver.resolve(p, &ctx) {
            Ok(value) => json!({ "value": value.map_or(Value::Null, |v| v.to_json()) }),
            Err(err) => json!({
                "error": { "kind": err.kind().as_str(), "message": err.to_string() }
            }),
        };
        report.insert(p.source_name().to_string(), entry);
    }
    Value::Object(report)
}
