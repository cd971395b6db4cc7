use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use resumy::error::{Error, Result};
use resumy::render::{render_html, Metadata};
use resumy::theme::Theme;
use resumy::{load_document, normalize, pdf, schema, theme, to_canonical, EXAMPLE_CONFIG};

#[derive(Parser)]
#[command(name = "resumy")]
#[command(version, about = "Build styled PDF resumes from YAML descriptions")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Create a starter config file
    Init {
        /// Output config filename
        #[arg(short, long, default_value = "myconfig.yaml")]
        output: PathBuf,
    },
    /// Build a resume PDF
    Build(BuildArgs),
    /// Check that a config file is valid
    Validate {
        /// Either a built-in schema name or a path to a schema file
        #[arg(short, long, default_value = schema::CANONICAL_SCHEMA)]
        schema: String,
        /// Path to a config yaml file
        config_path: PathBuf,
    },
    /// Create a new theme from the built-in one
    Theme {
        /// Output theme directory
        #[arg(short, long, default_value = "mytheme")]
        output: PathBuf,
    },
    /// Convert a legacy config to the JSON Resume format
    Normalize {
        /// Output config filename
        #[arg(short, long, default_value = "myconfig.yaml")]
        output: PathBuf,
        /// Path to a config yaml file
        config_path: PathBuf,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Metadata: document title
    #[arg(long)]
    title: Option<String>,

    /// Metadata: author
    #[arg(long)]
    author: Option<String>,

    /// Metadata: keywords
    #[arg(long = "keyword")]
    keywords: Vec<String>,

    /// Metadata: date of creation (YYYY-MM-DD)
    #[arg(long)]
    created_date: Option<String>,

    /// Metadata: date of modification (YYYY-MM-DD)
    #[arg(long)]
    modified_date: Option<String>,

    /// Auto-fill metadata with proper dates, title and keywords
    #[arg(long)]
    auto_metadata: bool,

    /// Output file name
    #[arg(short, long, default_value = "out.pdf")]
    output: PathBuf,

    /// Either a built-in theme name or a path to a theme directory
    #[arg(short, long, default_value = theme::BUILTIN_THEME)]
    theme: String,

    /// Either a built-in schema name or a path to a schema file
    #[arg(short, long, default_value = schema::CANONICAL_SCHEMA)]
    schema: String,

    /// Skip schema validation, in case you want your own customization
    #[arg(long)]
    disable_validation: bool,

    /// Path to a config yaml file
    config_path: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Cmd::Init { output } => cmd_init(&output),
        Cmd::Build(args) => cmd_build(args),
        Cmd::Validate {
            schema,
            config_path,
        } => cmd_validate(&config_path, &schema),
        Cmd::Theme { output } => theme::scaffold(&output),
        Cmd::Normalize {
            output,
            config_path,
        } => cmd_normalize(&config_path, &output),
    };

    if let Err(err) = result {
        tracing::error!("{err}");
        process::exit(err.exit_code());
    }
}

fn cmd_init(output: &PathBuf) -> Result<()> {
    fs::write(output, EXAMPLE_CONFIG).map_err(|source| Error::WriteFile {
        path: output.clone(),
        source,
    })?;
    tracing::info!("wrote {}", output.display());
    Ok(())
}

fn cmd_build(args: BuildArgs) -> Result<()> {
    let doc = load_document(&args.config_path)?;
    if !args.disable_validation {
        schema::validate(&doc, &build_schema(&args, &doc))?;
    }

    let canonical = to_canonical(&doc)?;
    let theme = Theme::resolve(&args.theme)?;
    let html = render_html(&canonical, &theme)?;

    let mut metadata = Metadata {
        title: args.title,
        author: args.author,
        keywords: args.keywords,
        created: args.created_date,
        modified: args.modified_date,
    };
    if args.auto_metadata {
        metadata.auto_fill(&canonical, &args.output);
    }

    pdf::html_to_pdf(&metadata.inject(&html), &theme.stylesheets, &args.output)
}

/// A legacy document validated with the default schema argument gets the
/// legacy schema instead of the canonical one.
fn build_schema(args: &BuildArgs, doc: &serde_yaml::Value) -> String {
    if normalize::is_legacy(doc) && args.schema == schema::CANONICAL_SCHEMA {
        schema::LEGACY_SCHEMA.to_string()
    } else {
        args.schema.clone()
    }
}

fn cmd_validate(config_path: &PathBuf, schema_name: &str) -> Result<()> {
    let doc = load_document(config_path)?;
    schema::validate(&doc, schema_name)?;
    println!("Your config file is valid ✔");
    Ok(())
}

fn cmd_normalize(config_path: &PathBuf, output: &PathBuf) -> Result<()> {
    let doc = load_document(config_path)?;
    let schema_name = if normalize::is_legacy(&doc) {
        schema::LEGACY_SCHEMA
    } else {
        schema::CANONICAL_SCHEMA
    };
    schema::validate(&doc, schema_name)?;

    // Serialize before touching the output file so errors never leave a
    // partial file behind.
    let canonical = serde_yaml::to_string(&to_canonical(&doc)?)?;
    fs::write(output, canonical).map_err(|source| Error::WriteFile {
        path: output.clone(),
        source,
    })?;
    tracing::info!("wrote {}", output.display());
    Ok(())
}
