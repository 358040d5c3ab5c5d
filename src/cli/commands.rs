use crate::config::GeneratorSettings;
use crate::dmmf::load_datamodel;
use crate::generator::{classify, RouteIr};
use crate::linter::{fail_if_errors, lint_datamodel, print_lint_issues, LintSeverity};
use crate::logging::{init_logging, LogConfig};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Command-line interface for nextapi-gen
///
/// Without a subcommand the binary speaks the Prisma generator protocol on
/// stdin/stderr, which is how `prisma generate` runs it.
#[derive(Parser)]
#[command(name = "nextapi-gen", version)]
#[command(about = "Next.js CRUD routes and API docs from a Prisma schema", long_about = None)]
pub struct Cli {
    /// The subcommand to execute; none runs the Prisma generator protocol
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate routes and docs from a DMMF file, outside of `prisma generate`
    Generate {
        /// Path to the DMMF document (JSON or YAML)
        #[arg(short, long)]
        dmmf: PathBuf,

        /// Output directory, usually `app/api`
        #[arg(short, long)]
        output: PathBuf,

        /// Generator config file (nextapi.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override a config key (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// List the files that would be written without touching the disk
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Lint a datamodel
    ///
    /// Checks the datamodel for models the generated routes can't serve:
    /// - Missing integer `id`
    /// - Models whose route folders collide
    /// - Misplaced `@upload` annotations
    /// - Form keys shadowed by upload fields
    Lint {
        /// Path to the DMMF document (JSON or YAML)
        #[arg(short, long)]
        dmmf: PathBuf,

        /// Generator config file (nextapi.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
    /// Show how each model's fields are classified
    Inspect {
        /// Path to the DMMF document (JSON or YAML)
        #[arg(short, long)]
        dmmf: PathBuf,

        /// Generator config file (nextapi.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_settings(config: Option<&Path>, overrides: &[String]) -> anyhow::Result<GeneratorSettings> {
    let mut settings = match config {
        Some(path) => GeneratorSettings::from_toml_file(path)?,
        None => GeneratorSettings::default(),
    };
    for pair in overrides {
        settings.set_pair(pair)?;
    }
    Ok(settings)
}

/// Parse the command line, set up logging and run the command
///
/// # Errors
///
/// Returns an error if:
/// - The DMMF document or the config file cannot be read
/// - A config value is invalid
/// - Generation fails
/// - `lint --fail-on-error` finds errors
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_config = match cli.command {
        Some(_) => LogConfig::from_env(),
        None => LogConfig::from_env().for_protocol(),
    };
    init_logging(&log_config)?;
    run(&cli)
}

/// Run an already parsed command line
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        None => crate::protocol::serve_stdio(),
        Some(Commands::Generate {
            dmmf,
            output,
            config,
            set,
            dry_run,
        }) => {
            let settings = load_settings(config.as_deref(), set)?;
            let datamodel = load_datamodel(dmmf)?;
            let report =
                crate::generator::generate(&datamodel, &settings, output.as_path(), *dry_run)?;
            if *dry_run {
                println!("Would write {} file(s):", report.files.len());
                for file in &report.files {
                    println!("   {}", output.join(file).display());
                }
            } else {
                println!(
                    "✅ Generated {} file(s) for {} model(s) in {}",
                    report.files.len(),
                    report.models,
                    output.display()
                );
            }
            Ok(())
        }
        Some(Commands::Lint {
            dmmf,
            config,
            fail_on_error,
            errors_only,
        }) => {
            let settings = load_settings(config.as_deref(), &[])?;
            let mut issues = lint_datamodel(&load_datamodel(dmmf)?, &settings.uploads);
            if *errors_only {
                issues.retain(|i| i.severity == LintSeverity::Error);
            }
            print_lint_issues(&issues);
            if *fail_on_error {
                fail_if_errors(&issues)?;
            }
            Ok(())
        }
        Some(Commands::Inspect { dmmf, config }) => {
            let settings = load_settings(config.as_deref(), &[])?;
            let datamodel = load_datamodel(dmmf)?;
            for model in &datamodel.models {
                let classified = classify(model, &settings.uploads);
                let ir = RouteIr::new(model, &classified, &settings);
                println!("{} → {}/{}", model.name, settings.api_prefix, ir.segment);
                println!("   delegate:  prisma.{}", ir.delegate);
                println!("   relations: {}", list_or_dash(&ir.relation_fields));
                let uploads: Vec<String> = ir
                    .upload_fields
                    .iter()
                    .map(|u| format!("{} → {}/{}/", u.name, settings.public_dir, u.folder))
                    .collect();
                println!("   uploads:   {}", list_or_dash(&uploads));
            }
            Ok(())
        }
    }
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
