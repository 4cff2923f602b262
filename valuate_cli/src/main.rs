use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use homeval_pricing::{
    ArtifactBundle, AttributeDomain, AttributeSchema, AttributeValue, FormSection, InputRecord,
    PriceEstimator, PricingTelemetry,
};
use serde_json::{json, Value};

#[derive(Parser, Debug)]
#[command(
    name = "valuate",
    version,
    about = "House price estimation from structured property attributes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Produces one price estimate from defaults plus optional overrides.
    Predict(PredictArgs),
    /// Prints the form layout: sections, attributes, defaults, options.
    Form {
        /// Schema table JSON; the built-in catalog when omitted.
        #[arg(long)]
        schema: Option<PathBuf>,
    },
    /// Loads an artifact bundle and reports its dimensions.
    Artifacts {
        /// Directory holding columns.json, scaler.json, and regressor.json.
        #[arg(long)]
        artifacts: PathBuf,
    },
}

#[derive(Parser, Debug)]
struct PredictArgs {
    /// Directory holding columns.json, scaler.json, and regressor.json.
    #[arg(long)]
    artifacts: PathBuf,
    /// Schema table JSON; the built-in catalog when omitted.
    #[arg(long)]
    schema: Option<PathBuf>,
    /// JSON object of attribute overrides applied on top of defaults.
    #[arg(long)]
    input: Option<PathBuf>,
    /// JSON Lines sink for request telemetry.
    #[arg(long)]
    log: Option<PathBuf>,
    /// Emits the full valuation as pretty JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Predict(args) => handle_predict(args),
        Commands::Form { schema } => handle_form(schema.as_deref()),
        Commands::Artifacts { artifacts } => handle_artifacts(&artifacts),
    }
}

fn handle_predict(args: PredictArgs) -> Result<()> {
    let schema = load_schema(args.schema.as_deref())?;
    let bundle = ArtifactBundle::load(&args.artifacts)
        .with_context(|| format!("loading artifacts from {:?}", args.artifacts))?;

    let mut estimator = PriceEstimator::new(Arc::clone(&schema), bundle);
    if let Some(path) = &args.log {
        let telemetry = PricingTelemetry::builder("valuate")
            .log_path(path)
            .build()?;
        estimator.set_telemetry(telemetry);
    }

    let mut record = InputRecord::with_defaults(&schema);
    if let Some(path) = &args.input {
        apply_overrides(&mut record, &schema, path)?;
    }

    match estimator.predict(&record) {
        Ok(valuation) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&valuation)?);
            } else {
                for warning in &valuation.warnings {
                    eprintln!("warning: {warning}");
                }
                println!("estimated price: {:.2}", valuation.price);
            }
            Ok(())
        }
        // Internal detail stays in the telemetry log; the submitter only
        // sees that no estimate was produced.
        Err(_) => bail!("could not compute an estimate for this request"),
    }
}

fn handle_form(schema: Option<&Path>) -> Result<()> {
    let schema = load_schema(schema)?;
    for section in FormSection::ALL {
        println!("{}", section.label());
        for spec in schema.section(section) {
            match &spec.domain {
                AttributeDomain::Numeric { default } => {
                    println!(
                        "  {:<14} numeric      default={}",
                        spec.name,
                        AttributeValue::from(*default)
                    );
                }
                AttributeDomain::Categorical { default, options } => {
                    println!(
                        "  {:<14} categorical  default={default} ({} options)",
                        spec.name,
                        options.len()
                    );
                }
            }
        }
        println!();
    }
    Ok(())
}

fn handle_artifacts(dir: &Path) -> Result<()> {
    let bundle =
        ArtifactBundle::load(dir).with_context(|| format!("loading artifacts from {dir:?}"))?;
    let report = json!({
        "artifacts": dir,
        "feature_count": bundle.feature_count(),
        "regressor": bundle.regressor().kind(),
        "columns_head": bundle.layout().names().take(5).collect::<Vec<_>>(),
        "status": "consistent",
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_schema(path: Option<&Path>) -> Result<Arc<AttributeSchema>> {
    let schema = match path {
        Some(path) => AttributeSchema::load(path)
            .with_context(|| format!("loading schema table {path:?}"))?,
        None => AttributeSchema::builtin(),
    };
    Ok(Arc::new(schema))
}

fn apply_overrides(record: &mut InputRecord, schema: &AttributeSchema, path: &Path) -> Result<()> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading overrides {path:?}"))?;
    let overrides: serde_json::Map<String, Value> =
        serde_json::from_str(&contents).context("overrides must be a JSON object")?;
    for (name, value) in overrides {
        let value: AttributeValue = serde_json::from_value(value)
            .with_context(|| format!("attribute {name} must be a number or a string"))?;
        record.set(schema, &name, value)?;
    }
    Ok(())
}
