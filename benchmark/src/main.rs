//! @ai:module:intent CLI for resolving ScandEval benchmark plans
//! @ai:module:layer presentation

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use scandeval::{
    catalog::Catalogs,
    config::{BenchmarkConfig, Device, Framework, Settings},
    dataset::{BenchmarkKind, DatasetCatalog, DatasetFactory, DatasetLoader},
    hub::{HfHubClient, ModelConfigResolver, ModelListResolver},
    resolve::{BenchmarkConfigBuilder, SystemDeviceProbe},
    selector::Selector,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "scandeval")]
#[command(about = "Resolve ScandEval benchmark configurations, models and datasets")]
#[command(version)]
struct Cli {
    /// Path to settings file (defaults to scandeval.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Overrides for the [benchmark] section of the settings file
#[derive(clap::Args, Debug, Clone, Default)]
struct ResolveArgs {
    /// Languages for models and datasets (comma-separated, or "all")
    #[arg(short, long)]
    language: Option<Selector>,

    /// Languages for models, replacing --language
    #[arg(long)]
    model_language: Option<Selector>,

    /// Languages for datasets, replacing --language
    #[arg(long)]
    dataset_language: Option<Selector>,

    /// Dataset tasks (comma-separated, or "all")
    #[arg(short = 't', long)]
    dataset_task: Option<Selector>,

    #[arg(long)]
    batch_size: Option<u32>,

    #[arg(long, value_enum)]
    device: Option<Device>,

    #[arg(long, value_enum)]
    framework: Option<Framework>,

    /// Fail on the first unusable model instead of skipping it
    #[arg(long)]
    raise_errors: bool,

    /// Directory of extra dataset definitions (*.toml)
    #[arg(long)]
    datasets_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the benchmark configuration and the datasets it selects
    Plan {
        #[command(flatten)]
        args: ResolveArgs,
    },

    /// Resolve model identifiers (optionally with @revision) against the Hub
    ModelConfig {
        #[arg(required = true)]
        models: Vec<String>,

        #[command(flatten)]
        args: ResolveArgs,
    },

    /// List Hub models for the configured model languages
    ListModels {
        /// Model pipeline tasks to filter on, e.g. fill-mask
        #[arg(long = "task")]
        tasks: Vec<String>,

        /// Only print this bucket
        #[arg(long)]
        bucket: Option<String>,

        #[command(flatten)]
        args: ResolveArgs,
    },

    /// List the datasets selected by the configuration
    Datasets {
        #[command(flatten)]
        args: ResolveArgs,
    },

    /// Initialize default settings file
    Init {
        /// Output path for settings file
        #[arg(short, long, default_value = "scandeval.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "scandeval=debug"
    } else {
        "scandeval=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .init();

    let settings = load_or_default_settings(cli.config.as_deref())?;
    let catalogs = Catalogs::builtin();

    match cli.command {
        Commands::Plan { args } => plan(&settings, &catalogs, &args, cli.format),
        Commands::ModelConfig { models, args } => {
            resolve_models(&settings, &catalogs, &args, &models, cli.format).await
        }
        Commands::ListModels { tasks, bucket, args } => {
            list_models(&settings, &catalogs, &args, &tasks, bucket.as_deref(), cli.format).await
        }
        Commands::Datasets { args } => list_datasets(&settings, &catalogs, &args, cli.format),
        Commands::Init { output } => init_settings(&output),
    }
}

/// @ai:intent Load settings or use defaults
/// @ai:effects fs:read
fn load_or_default_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(p) => Ok(Settings::load(p)?),
        None => {
            let default_path = Path::new("scandeval.toml");

            if default_path.exists() {
                Ok(Settings::load(default_path)?)
            } else {
                Ok(Settings::default())
            }
        }
    }
}

/// @ai:intent Apply CLI overrides and build the run configuration
/// @ai:effects io
fn build_config(settings: &Settings, catalogs: &Catalogs, args: &ResolveArgs) -> Result<BenchmarkConfig> {
    let mut options = settings.benchmark.clone();

    if let Some(language) = &args.language {
        options.language = language.clone();
    }
    if args.model_language.is_some() {
        options.model_language = args.model_language.clone();
    }
    if args.dataset_language.is_some() {
        options.dataset_language = args.dataset_language.clone();
    }
    if args.dataset_task.is_some() {
        options.dataset_task = args.dataset_task.clone();
    }
    if let Some(batch_size) = args.batch_size {
        options.batch_size = batch_size;
    }
    if args.device.is_some() {
        options.device = args.device;
    }
    if args.framework.is_some() {
        options.framework = args.framework;
    }
    options.raise_errors |= args.raise_errors;

    let builder = BenchmarkConfigBuilder::new(&catalogs.languages, &catalogs.dataset_tasks, SystemDeviceProbe);
    Ok(builder.build(options)?)
}

/// @ai:intent Built-in datasets plus any from --datasets-dir
/// @ai:effects fs:read
fn dataset_catalog(catalogs: &Catalogs, args: &ResolveArgs) -> Result<DatasetCatalog> {
    let catalog = DatasetCatalog::builtin();

    match &args.datasets_dir {
        Some(dir) => {
            let extra = DatasetLoader::new(&catalogs.dataset_tasks).load_all(dir)?;
            tracing::info!("Loaded {} dataset definitions from {}", extra.len(), dir.display());
            Ok(catalog.with_configs(extra))
        }
        None => Ok(catalog),
    }
}

#[derive(Serialize)]
struct PlannedDataset {
    name: String,
    kind: BenchmarkKind,
    huggingface_id: String,
    languages: Vec<String>,
}

#[derive(Serialize)]
struct Plan<'a> {
    config: &'a BenchmarkConfig,
    datasets: Vec<PlannedDataset>,
}

/// @ai:intent Executors for every dataset the configuration selects
/// @ai:effects pure
fn planned_datasets(config: &Arc<BenchmarkConfig>, catalog: DatasetCatalog) -> Result<Vec<PlannedDataset>> {
    let selected: Vec<_> = catalog.select(config).into_iter().cloned().collect();
    let factory = DatasetFactory::new(Arc::clone(config), Arc::new(catalog));

    let mut planned = Vec::with_capacity(selected.len());
    for dataset in selected {
        let benchmark = factory.build_dataset(dataset)?;
        tracing::debug!("{}", benchmark.describe());
        let dataset = benchmark.dataset_config();
        planned.push(PlannedDataset {
            name: dataset.name.clone(),
            kind: benchmark.kind(),
            huggingface_id: dataset.huggingface_id.clone(),
            languages: dataset.languages.clone(),
        });
    }

    Ok(planned)
}

/// @ai:intent Print the resolved plan
/// @ai:effects io
fn plan(settings: &Settings, catalogs: &Catalogs, args: &ResolveArgs, format: OutputFormat) -> Result<()> {
    let config = Arc::new(build_config(settings, catalogs, args)?);
    let datasets = planned_datasets(&config, dataset_catalog(catalogs, args)?)?;

    if format == OutputFormat::Json {
        let plan = Plan {
            config: &config,
            datasets,
        };
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!();
    println!("ScandEval Benchmark Plan");
    println!("========================");
    println!();
    println!("{:<20} {}", "Model languages:", join_codes(&config.model_languages));
    println!("{:<20} {}", "Dataset languages:", join_codes(&config.dataset_languages));
    println!(
        "{:<20} {}",
        "Dataset tasks:",
        config
            .dataset_tasks
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("{:<20} {}", "Device:", config.device);
    println!("{:<20} {}", "Batch size:", config.batch_size);
    println!(
        "{:<20} {}",
        "Framework:",
        config.framework.map_or("auto", |f| f.as_str())
    );
    println!();
    print_dataset_table(&datasets);

    Ok(())
}

/// @ai:intent Print the datasets selected by the configuration
/// @ai:effects io
fn list_datasets(settings: &Settings, catalogs: &Catalogs, args: &ResolveArgs, format: OutputFormat) -> Result<()> {
    let config = Arc::new(build_config(settings, catalogs, args)?);
    let datasets = planned_datasets(&config, dataset_catalog(catalogs, args)?)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&datasets)?),
        OutputFormat::Text => print_dataset_table(&datasets),
    }

    Ok(())
}

fn print_dataset_table(datasets: &[PlannedDataset]) {
    println!("Datasets ({}):", datasets.len());
    println!();
    println!("{:<16} {:<22} {:<30} {:<12}", "Name", "Executor", "Hugging Face ID", "Languages");
    println!("{}", "-".repeat(82));

    for dataset in datasets {
        println!(
            "{:<16} {:<22} {:<30} {:<12}",
            dataset.name,
            dataset.kind.as_str(),
            dataset.huggingface_id,
            dataset.languages.join(", ")
        );
    }
}

fn join_codes(languages: &BTreeSet<scandeval::Language>) -> String {
    if languages.is_empty() {
        return "(none)".to_string();
    }
    languages
        .iter()
        .map(|l| l.code.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// @ai:intent Resolve and print model configurations
/// @ai:effects network, io
async fn resolve_models(
    settings: &Settings,
    catalogs: &Catalogs,
    args: &ResolveArgs,
    models: &[String],
    format: OutputFormat,
) -> Result<()> {
    let config = build_config(settings, catalogs, args)?;
    let client = Arc::new(HfHubClient::new(settings.hub.clone())?);
    let resolver = ModelConfigResolver::new(client, Arc::clone(&catalogs.languages));

    let resolved = resolver.resolve_all(models, &config).await?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    println!("{:<40} {:<10} {:<22} {:<10} {}", "Model", "Framework", "Task", "Revision", "Languages");
    println!("{}", "-".repeat(100));
    for model in &resolved {
        println!(
            "{:<40} {:<10} {:<22} {:<10} {}",
            model.model_id,
            model.framework.as_str(),
            model.task,
            model.revision,
            model.languages.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }

    Ok(())
}

/// @ai:intent Fetch and print bucketed model lists
/// @ai:effects network, io
async fn list_models(
    settings: &Settings,
    catalogs: &Catalogs,
    args: &ResolveArgs,
    tasks: &[String],
    bucket: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let config = build_config(settings, catalogs, args)?;
    let client = Arc::new(HfHubClient::new(settings.hub.clone())?);
    let resolver = ModelListResolver::new(
        client,
        Arc::clone(&catalogs.languages),
        settings.curated.clone(),
        settings.hub.max_concurrent_queries,
    );

    let tasks: Option<BTreeSet<String>> = if tasks.is_empty() {
        None
    } else {
        Some(tasks.iter().cloned().collect())
    };

    let lists = resolver
        .resolve(&config.model_languages, tasks.as_ref(), &config.auth_token)
        .await?;

    if let Some(name) = bucket {
        let models = lists
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("No bucket named '{}'", name))?;
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(models)?),
            OutputFormat::Text => models.iter().for_each(|model| println!("{}", model)),
        }
        return Ok(());
    }

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&lists)?);
        return Ok(());
    }

    println!("Curated lists version {}", lists.curated_version());
    println!();
    println!("{:<16} {:>8}", "Bucket", "Models");
    println!("{}", "-".repeat(25));
    for name in lists.bucket_names() {
        let count = lists.get(name).map_or(0, |models| models.len());
        println!("{:<16} {:>8}", name, count);
    }

    Ok(())
}

/// @ai:intent Write default settings file
/// @ai:effects fs:write
fn init_settings(output: &Path) -> Result<()> {
    Settings::default().save(output)?;
    println!("Settings saved to {}", output.display());
    Ok(())
}
