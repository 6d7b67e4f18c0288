use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use intake_core::constants::{
    BUSINESS_AREAS, CONFIDENTIALITY_LEVELS, CONTENT_CATEGORIES, DATA_SOURCES, DOCUMENT_TYPES,
    GEOGRAPHIC_SCOPES,
};
use intake_core::form::split_tags;
use intake_core::schema::create_tables_script;
use intake_core::{
    build_volume_client, CoreConfig, IntakeSettings, UploadForm, UploadReceipt, UploadWorkflow,
    UploadedFile, VolumePath, WorkflowError, WorkflowOutcome,
};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Upload documents into Unity Catalog volumes and describe them")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file and print where it was stored
    Upload(UploadArgs),
    /// Check a catalog.schema.volume_name path
    ParsePath {
        /// Dotted three-part volume path
        path: String,
    },
    /// Print the suggested downstream tables for a volume's schema
    Schema {
        /// Dotted three-part volume path
        volume: String,
    },
    /// List the recognised values for the descriptive fields
    Options,
}

/// Required fields are optional here so that every missing one is reported together.
#[derive(Args, Debug)]
struct UploadArgs {
    /// File to upload
    file: PathBuf,
    /// Destination volume (catalog.schema.volume_name)
    #[arg(long = "volume")]
    volume_path: Option<String>,
    #[arg(long)]
    document_type: Option<String>,
    #[arg(long)]
    business_area: Option<String>,
    #[arg(long)]
    geographic_scope: Option<String>,
    #[arg(long)]
    data_source: Option<String>,
    #[arg(long)]
    confidentiality: Option<String>,
    /// Brief description of the document
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    time_period: Option<String>,
    /// Comma-separated tags
    #[arg(long)]
    tags: Option<String>,
    /// Content category (repeatable)
    #[arg(long = "category")]
    content_categories: Vec<String>,
    /// Submitter identity (defaults to INTAKE_UPLOADED_BY)
    #[arg(long)]
    uploaded_by: Option<String>,
    /// Also print the metadata record as JSON
    #[arg(long)]
    json: bool,
    /// Also print the suggested SQL
    #[arg(long)]
    sql: bool,
}

impl UploadArgs {
    fn into_form(self, file: UploadedFile, default_uploaded_by: Option<String>) -> UploadForm {
        UploadForm {
            file: Some(file),
            volume_path: self.volume_path,
            document_type: self.document_type,
            business_area: self.business_area,
            geographic_scope: self.geographic_scope,
            data_source: self.data_source,
            confidentiality: self.confidentiality,
            description: self.description,
            time_period: self.time_period,
            tags: self.tags.as_deref().map(split_tags).unwrap_or_default(),
            content_categories: self.content_categories,
            uploaded_by: self.uploaded_by.or(default_uploaded_by),
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("intake=warn"))
    {
        Ok(filter) => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        Err(e) => eprintln!("Logging disabled: {}", e),
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Some(Commands::Upload(args)) => upload(args),
        Some(Commands::ParsePath { path }) => match VolumePath::parse(&path) {
            Ok(volume) => {
                println!("catalog:   {}", volume.catalog());
                println!("schema:    {}", volume.schema());
                println!("volume:    {}", volume.volume());
                println!("directory: {}", volume.directory());
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("{}", e);
                Ok(ExitCode::FAILURE)
            }
        },
        Some(Commands::Schema { volume }) => {
            let config = CoreConfig::from_env()?;
            let volume = VolumePath::parse(&volume)?;
            print!("{}", create_tables_script(&volume, &config));
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Options) => {
            print!("{}", render_options());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("Use 'intake --help' for commands");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn upload(args: UploadArgs) -> anyhow::Result<ExitCode> {
    let settings = IntakeSettings::from_env().context("invalid configuration")?;

    let file = read_upload(&args.file)?;
    let (json, sql) = (args.json, args.sql);
    let form = args.into_form(file, settings.uploaded_by.clone());

    let client = build_volume_client(&settings.storage)?;
    let workflow = UploadWorkflow::new(client, settings.core);

    match workflow.run(form) {
        WorkflowOutcome::Done(receipt) => {
            print!("{}", render_receipt(&receipt, json, sql)?);
            Ok(ExitCode::SUCCESS)
        }
        WorkflowOutcome::Failed { stage, error } => {
            eprint!("{}", render_failure(&error));
            tracing::debug!(%stage, "submission failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Reads the whole file. The upload limit is enforced by the workflow, after validation.
fn read_upload(path: &Path) -> anyhow::Result<UploadedFile> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    Ok(UploadedFile::new(path.to_string_lossy(), bytes))
}

fn render_receipt(receipt: &UploadReceipt, json: bool, sql: bool) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "File uploaded successfully to {}", receipt.file_path)?;
    writeln!(out)?;

    let fields = receipt.metadata.fields();
    let width = fields.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, value) in fields {
        writeln!(out, "  {:width$}  {}", name, value, width = width)?;
    }

    if json {
        writeln!(out)?;
        writeln!(out, "{}", receipt.metadata.to_json_pretty()?)?;
    }
    if sql {
        writeln!(out)?;
        write!(out, "{}", receipt.sql.to_script())?;
    }
    Ok(out)
}

fn render_failure(error: &WorkflowError) -> String {
    match error.hint() {
        Some(hint) => format!("Upload failed: {}\n{}\n", error, hint),
        None => format!("Upload failed: {}\n", error),
    }
}

fn render_options() -> String {
    let groups: [(&str, &[&str]); 6] = [
        ("Document type", DOCUMENT_TYPES),
        ("Business area", BUSINESS_AREAS),
        ("Geographic scope", GEOGRAPHIC_SCOPES),
        ("Data source", DATA_SOURCES),
        ("Confidentiality level", CONFIDENTIALITY_LEVELS),
        ("Content categories", CONTENT_CATEGORIES),
    ];

    let mut out = String::new();
    for (label, values) in groups {
        out.push_str(label);
        out.push('\n');
        for value in values {
            out.push_str("  ");
            out.push_str(value);
            out.push('\n');
        }
    }
    out
}
