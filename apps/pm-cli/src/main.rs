use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pm_core::{PmError, PmResult};
use pm_data::{
    Component, ComponentKey, DataError, Dataset, find_component_by_token, load_dataset,
};
use pm_mixture::{
    AliasBuilderConfig, BinaryMixtureAliasBuilder, EngineConfig, MixtureMatrixEngine,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pm-cli")]
#[command(about = "PropMix CLI - binary mixture property matrices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DatasetArgs {
    /// Path to the dataset file (YAML or JSON)
    dataset: PathBuf,
    /// Delimiter between the component tokens of mixture labels
    #[arg(long)]
    mixture_delimiter: Option<String>,
    /// Key template per-component records are stored under (e.g. Name-Formula)
    #[arg(long)]
    component_key: Option<ComponentKey>,
}

#[derive(Subcommand)]
enum Commands {
    /// List mixtures, their components in row order and their properties
    Summary {
        #[command(flatten)]
        data: DatasetArgs,
    },
    /// Print a property matrix over an ordered component list
    Mat {
        #[command(flatten)]
        data: DatasetArgs,
        /// Property reference (e.g. a_i_j)
        property: String,
        /// Component names or formulas, in matrix order
        #[arg(required = true)]
        components: Vec<String>,
    },
    /// Print the cells of a property matrix keyed by symbol
    MatDict {
        #[command(flatten)]
        data: DatasetArgs,
        /// Property reference (e.g. a_i_j)
        property: String,
        /// Component names or formulas, in matrix order
        #[arg(required = true)]
        components: Vec<String>,
    },
    /// Print one cell (e.g. a_1_2 or a_methanol_ethanol)
    Ij {
        #[command(flatten)]
        data: DatasetArgs,
        property: String,
        /// Mixture id (e.g. methanol|ethanol)
        mixture_id: String,
    },
    /// Print every cell of the mixture named in the reference (e.g. "a | methanol | ethanol")
    Ijs {
        #[command(flatten)]
        data: DatasetArgs,
        property: String,
    },
    /// Print the matrix row of one component
    Row {
        #[command(flatten)]
        data: DatasetArgs,
        property: String,
        component: String,
        mixture_id: String,
    },
    /// List the alias ids of a component pair and the properties behind them
    Aliases {
        #[command(flatten)]
        data: DatasetArgs,
        component_a: String,
        component_b: String,
    },
}

fn main() -> PmResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { data } => cmd_summary(&data),
        Commands::Mat {
            data,
            property,
            components,
        } => cmd_mat(&data, &property, &components),
        Commands::MatDict {
            data,
            property,
            components,
        } => cmd_mat_dict(&data, &property, &components),
        Commands::Ij {
            data,
            property,
            mixture_id,
        } => cmd_ij(&data, &property, &mixture_id),
        Commands::Ijs { data, property } => cmd_ijs(&data, &property),
        Commands::Row {
            data,
            property,
            component,
            mixture_id,
        } => cmd_row(&data, &property, &component, &mixture_id),
        Commands::Aliases {
            data,
            component_a,
            component_b,
        } => cmd_aliases(&data, &component_a, &component_b),
    }
}

/// Engine settings from the dataset's `engine` block, then command-line overrides.
fn engine_config(data: &DatasetArgs, dataset: &Dataset) -> PmResult<EngineConfig> {
    let mut config = match &dataset.engine {
        Some(block) => serde_yaml::from_value(block.clone()).map_err(DataError::from)?,
        None => EngineConfig::default(),
    };
    if let Some(delimiter) = &data.mixture_delimiter {
        config.mixture_delimiter = delimiter.clone();
    }
    if let Some(key) = &data.component_key {
        config.component_key = key.clone();
    }
    Ok(config)
}

fn load(data: &DatasetArgs) -> PmResult<(Dataset, MixtureMatrixEngine)> {
    let dataset = load_dataset(&data.dataset)?;
    info!(
        path = %data.dataset.display(),
        groups = dataset.groups.len(),
        "loaded dataset"
    );
    let config = engine_config(data, &dataset)?;
    let engine = MixtureMatrixEngine::new(&dataset.groups, config)?;
    Ok((dataset, engine))
}

fn resolve_components(
    engine: &MixtureMatrixEngine,
    tokens: &[String],
) -> PmResult<Vec<Component>> {
    let all = engine.all_components();
    tokens
        .iter()
        .map(|token| {
            find_component_by_token(token, &all, &engine.config().key_candidates)
                .cloned()
                .ok_or_else(|| PmError::NotFound {
                    what: format!("component '{token}'"),
                })
        })
        .collect()
}

fn cmd_summary(data: &DatasetArgs) -> PmResult<()> {
    let (_, engine) = load(data)?;
    if engine.index().is_empty() {
        println!("No mixtures found in dataset");
        return Ok(());
    }
    for entry in engine.mixtures() {
        println!("{} (labelled by {})", entry.label(), entry.mixture_key());
        for (row, component) in entry.components().iter().enumerate() {
            println!("  [{}] {}", row + 1, component);
        }
        for prop in entry.props() {
            let shape = engine
                .property_matrix(&prop.symbol, entry.label())
                .map(|m| format!("{}x{}", m.nrows(), m.ncols()))?;
            println!("  {} [{}] {}", prop.symbol, prop.unit, shape);
        }
    }
    Ok(())
}

fn cmd_mat(data: &DatasetArgs, property: &str, tokens: &[String]) -> PmResult<()> {
    let (_, engine) = load(data)?;
    let components = resolve_components(&engine, tokens)?;
    let m = engine.mat(property, &components)?;
    for (r, component) in components.iter().enumerate() {
        let cells: Vec<String> = m.row(r).iter().map(|v| format!("{v:>12.6}")).collect();
        println!("{:<16}{}", component.name, cells.join(" "));
    }
    Ok(())
}

fn cmd_mat_dict(data: &DatasetArgs, property: &str, tokens: &[String]) -> PmResult<()> {
    let (_, engine) = load(data)?;
    let components = resolve_components(&engine, tokens)?;
    for (symbol, value) in engine.mat_dict(property, &components)? {
        println!("{symbol} = {value}");
    }
    Ok(())
}

fn cmd_ij(data: &DatasetArgs, property: &str, mixture_id: &str) -> PmResult<()> {
    let (_, engine) = load(data)?;
    let cell = engine.ij(property, mixture_id)?;
    println!("{} = {} {}", cell.symbol, cell.value, cell.unit);
    Ok(())
}

fn cmd_ijs(data: &DatasetArgs, property: &str) -> PmResult<()> {
    let (_, engine) = load(data)?;
    for (key, cell) in engine.ijs(property)? {
        println!("{key}: {} {}", cell.value, cell.unit);
    }
    Ok(())
}

fn cmd_row(data: &DatasetArgs, property: &str, token: &str, mixture_id: &str) -> PmResult<()> {
    let (_, engine) = load(data)?;
    let components = resolve_components(&engine, &[token.to_string()])?;
    let row = engine.get_property(property, &components[0], mixture_id)?;
    let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
    println!("{}: [{}]", components[0].name, cells.join(", "));
    Ok(())
}

fn cmd_aliases(data: &DatasetArgs, token_a: &str, token_b: &str) -> PmResult<()> {
    let (dataset, engine) = load(data)?;
    let pair = resolve_components(&engine, &[token_a.to_string(), token_b.to_string()])?;
    let pair = [pair[0].clone(), pair[1].clone()];

    let builder = BinaryMixtureAliasBuilder::new(AliasBuilderConfig {
        engine: engine.config().clone(),
        ..AliasBuilderConfig::default()
    });
    let table = builder.build_pair(&pair, &dataset.groups)?;

    let mut aliases: Vec<&str> = table.aliases().collect();
    aliases.sort_unstable();
    for alias in aliases {
        let props = table.props(alias).unwrap_or_default();
        println!("{alias}: {}", props.join(", "));
    }
    Ok(())
}
