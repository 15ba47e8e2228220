use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use envasyllabus::config::Config;
use envasyllabus::core::context::CatalogContext;
use envasyllabus::core::html_parser;
use envasyllabus::core::moodle::MoodleClient;
use envasyllabus::core::page::CatalogPage;
use envasyllabus::error::catalog::CatalogError;
use envasyllabus::utils::input::input_password_trim;
use envasyllabus::utils::notification::display_exception;
use tracing_subscriber::EnvFilter;

/// Syllabus catalog built from a Moodle site's web service.
#[derive(Parser, Debug)]
#[command(name = "envasyllabus", version, about)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the Moodle site URL
    #[arg(long, global = true)]
    site: Option<String>,

    /// Override the catalog anchor element id
    #[arg(long, global = true)]
    anchor: Option<String>,

    /// Log level or filter directive (e.g. debug, envasyllabus=trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the initial page carrying the configured course ids
    Context {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Fetch, group and render the course catalog
    Catalog {
        /// Course ids, instead of the configured ones
        #[arg(long, value_delimiter = ',', conflicts_with = "page")]
        ids: Vec<u64>,

        /// Page whose anchor lists the courses
        #[arg(long)]
        page: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render the categories below a parent category
    Categories {
        #[arg(long, default_value_t = 124)]
        parent: u64,

        #[arg(long)]
        page: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Html,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("✗ {}", err.message);
            return ExitCode::FAILURE;
        }
    };
    init_logging(cli.log_level.as_deref(), &config.logging.level);

    if let Some(site) = &cli.site {
        config.site.url = site.clone();
    }
    if let Some(anchor) = &cli.anchor {
        config.catalog.anchor_id = anchor.clone();
    }

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            display_exception(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(flag: Option<&str>, configured: &str) {
    // flag wins, then RUST_LOG, then the config file, then warn
    let filter = match flag {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(if configured.is_empty() { "warn" } else { configured })
        }),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Command, mut config: Config) -> Result<(), CatalogError> {
    let context = config.catalog_context();

    match command {
        Command::Context { output } => write_output(output.as_deref(), &context.render_page()?),
        Command::Catalog {
            ids,
            page,
            format,
            output,
        } => {
            let document = match (&page, ids.is_empty()) {
                (Some(path), _) => std::fs::read_to_string(path)?,
                (None, true) => context.render_page()?,
                (None, false) => CatalogContext::new(&context.anchor_id, ids).render_page()?,
            };

            let client = connect(&mut config)?;
            let options = config.grouping_options();
            let catalog_page = CatalogPage::new(&client, &options);

            let rendered = match format {
                Format::Html => catalog_page.init(&document, &context.anchor_id).await?,
                Format::Json => {
                    let course_ids = html_parser::extract_course_ids(&document, &context.anchor_id)?;
                    let sorted = catalog_page.load(&course_ids).await?;
                    serde_json::to_string_pretty(&sorted)?
                }
            };
            write_output(output.as_deref(), &rendered)
        }
        Command::Categories {
            parent,
            page,
            output,
        } => {
            let document = match &page {
                Some(path) => std::fs::read_to_string(path)?,
                None => context.render_page()?,
            };

            let client = connect(&mut config)?;
            let options = config.grouping_options();
            let rendered = CatalogPage::new(&client, &options)
                .init_categories(&document, &context.anchor_id, parent)
                .await?;
            write_output(output.as_deref(), &rendered)
        }
    }
}

fn connect(config: &mut Config) -> Result<MoodleClient, CatalogError> {
    if config.site.token.is_empty() && std::io::stdin().is_terminal() {
        config.site.token = input_password_trim("Web service token: ")?;
    }
    if config.site.token.is_empty() {
        log::warn!("no web service token configured");
    }
    log::info!("using site {}", config.site.url);
    MoodleClient::new(&config.site.url, &config.site.token)
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<(), CatalogError> {
    match path {
        Some(path) => {
            std::fs::write(path, contents)?;
            log::info!("wrote {}", path.display());
            println!("✓ {}", path.display());
        }
        None => println!("{}", contents),
    }
    Ok(())
}
