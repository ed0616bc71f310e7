//! schemalens CLI - analyze schema metadata and plan a PostgreSQL/Prisma migration
//!
//! Usage:
//!   schemalens analyze <schema.json> [--hints <file>] [--impact <file>] [--format <format>]
//!   schemalens types <schema.json>
//!   schemalens order <schema.json>
//!
//! Examples:
//!   schemalens analyze schema.json --format summary
//!   schemalens analyze schema.json --impact impact.json --format prisma --table orders
//!   schemalens order schema.json

use clap::{Args, Parser, Subcommand, ValueEnum};
use schemalens::config::Settings;
use schemalens::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schemalens")]
#[command(about = "schemalens - relation and type inference for schema migrations")]
#[command(version)]
struct Cli {
    /// Config file (defaults to SCHEMALENS_CONFIG, ./schemalens.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Only output the plan of this table (summary and prisma formats)
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Print the type mapping of every column
    Types {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print tables in migration order
    Order {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Path to the schema JSON file
    schema: PathBuf,

    /// Table hints JSON (overrides [inputs] hints)
    #[arg(long)]
    hints: Option<PathBuf>,

    /// Impact map JSON (overrides [inputs] impact_map)
    #[arg(long)]
    impact: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Full report as JSON
    Json,
    /// One block per table with score and notes
    Summary,
    /// Prisma models only
    Prisma,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings);

    match cli.command {
        Commands::Analyze {
            input,
            format,
            table,
        } => cmd_analyze(&settings, &input, format, table.as_deref()),
        Commands::Types { input } => cmd_types(&settings, &input),
        Commands::Order { input } => cmd_order(&settings, &input),
    }
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load schema and external inputs, then run the pipeline.
fn run(settings: &Settings, input: &InputArgs) -> Result<AnalysisReport, String> {
    let schema = Schema::from_file(&input.schema)
        .map_err(|e| format!("Error loading schema '{}': {}", input.schema.display(), e))?;

    let hints = match &input.hints {
        Some(path) => Some(path.clone()),
        None => settings.inputs.resolved_hints().map_err(|e| e.to_string())?,
    };
    let impact = match &input.impact {
        Some(path) => Some(path.clone()),
        None => settings
            .inputs
            .resolved_impact_map()
            .map_err(|e| e.to_string())?,
    };

    let mut inputs = ExternalInputs::new();
    if let Some(path) = hints {
        inputs = inputs
            .with_hints_file(&path)
            .map_err(|e| format!("Error loading hints '{}': {}", path.display(), e))?;
    }
    if let Some(path) = impact {
        inputs = inputs
            .with_impact_file(&path)
            .map_err(|e| format!("Error loading impact map '{}': {}", path.display(), e))?;
    }

    Ok(Analyzer::new(settings.to_analysis_options()).run(&schema, &inputs))
}

fn cmd_analyze(
    settings: &Settings,
    input: &InputArgs,
    format: OutputFormat,
    table: Option<&str>,
) -> ExitCode {
    let report = match run(settings, input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let plans: Vec<&MigrationPlan> = report
        .plans
        .iter()
        .filter(|p| table.map_or(true, |t| p.table == t))
        .collect();
    if let Some(name) = table {
        if plans.is_empty() {
            eprintln!("Table not found: {}", name);
            return ExitCode::FAILURE;
        }
    }

    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                return ExitCode::FAILURE;
            }
        },
        OutputFormat::Prisma => {
            for plan in plans {
                println!("{}\n", plan.orm_model);
            }
        }
        OutputFormat::Summary => {
            for plan in plans {
                print_summary(plan);
            }
            if !report.diagnostics.is_empty() {
                println!("Diagnostics:");
                for diag in &report.diagnostics {
                    println!("  {}", diag);
                }
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_summary(plan: &MigrationPlan) {
    println!(
        "{} ({}) - {} [{}]",
        plan.table, plan.model_name, plan.summary.role, plan.summary.functional_area
    );
    println!(
        "  readiness: {}/100{}",
        plan.readiness_score,
        if plan.ready { " (ready)" } else { "" }
    );
    if !plan.dependencies.is_empty() {
        println!("  depends on: {}", plan.dependencies.join(", "));
    }
    for change in &plan.type_changes {
        println!("  type: {} {} → {}", change.field, change.from, change.to);
    }
    for step in &plan.post_migration_instructions {
        println!("  todo: {}", step);
    }
    println!();
}

fn cmd_types(settings: &Settings, input: &InputArgs) -> ExitCode {
    let report = match run(settings, input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    for (key, entry) in &report.type_mappings {
        print!(
            "{:<40} {:<20} {:<24} {}",
            key,
            entry.source_type,
            entry.target_type,
            entry.orm_declaration()
        );
        match &entry.warning {
            Some(warning) => println!("  ! {}", warning),
            None => println!(),
        }
    }
    ExitCode::SUCCESS
}

fn cmd_order(settings: &Settings, input: &InputArgs) -> ExitCode {
    let report = match run(settings, input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    for (i, table) in report.migration_order.iter().enumerate() {
        println!("{:>3}. {}", i + 1, table);
    }
    ExitCode::SUCCESS
}
