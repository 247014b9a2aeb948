use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use schema_consistency::config::CheckerConfig;
use schema_consistency::{consistency, DocumentFormat, SchemaNode};

/// Exit code for an inconsistent instance or an exceeded depth limit.
const EXIT_INCONSISTENT: u8 = 1;
/// Exit code for configuration, IO and parse failures.
const EXIT_ERROR: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = match CheckerConfig::from_args_and_env(std::env::args().skip(1)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("schema-consistency: configuration error: {e}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match run(&config).await {
        Ok(Outcome::Consistent) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected(reason)) => {
            eprintln!("schema-consistency: {reason}");
            ExitCode::from(EXIT_INCONSISTENT)
        }
        Err(e) => {
            eprintln!("schema-consistency: fatal error: {e}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

enum Outcome {
    Consistent,
    Rejected(String),
}

async fn run(config: &CheckerConfig) -> Result<Outcome, Box<dyn std::error::Error>> {
    let schema_text = tokio::fs::read_to_string(&config.schema_path).await?;
    let instance_text = tokio::fs::read_to_string(&config.instance_path).await?;

    let schema_format = DocumentFormat::from_path(&config.schema_path);
    let instance_format = DocumentFormat::from_path(&config.instance_path);
    let schema = SchemaNode::from_str_as(&schema_text, schema_format)?;
    let instance = instance_format.parse_instance(&instance_text)?;
    tracing::debug!(
        schema = %config.schema_path.display(),
        instance = %config.instance_path.display(),
        "documents loaded"
    );

    if let Some(limit) = config.max_depth {
        let depth = instance.depth();
        if depth > limit {
            return Ok(Outcome::Rejected(format!(
                "instance nesting depth {depth} exceeds limit {limit}"
            )));
        }
    }

    match consistency::validate(&instance, &schema) {
        Ok(()) => {
            tracing::info!("instance is consistent with schema");
            Ok(Outcome::Consistent)
        }
        Err(e) => Ok(Outcome::Rejected(e.to_string())),
    }
}
