use anyhow::{Context, Result as AnyResult};
use clap::Args;
use essaim::config::{LoggingConfig, RunConfig, RunPlan};
use essaim::runner::RunSummary;
use essaim::utils::init_logging;
use std::path::{Path, PathBuf};

/// Exécution d'un run complet
#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Fichier de configuration (.json, .yaml, .yml)
    #[arg(short, long, env = "ESSAIM_CONFIG")]
    pub config: PathBuf,

    /// Surcharge du nombre maximal d'itérations
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Surcharge du nombre de redémarrages indépendants
    #[arg(short, long)]
    pub restarts: Option<usize>,

    /// Sortie JSON indentée
    #[arg(long)]
    pub pretty: bool,
}

/// Vérification d'une configuration
#[derive(Args, Clone, Debug)]
pub struct ValidateArgs {
    #[arg(short, long, env = "ESSAIM_CONFIG")]
    pub config: PathBuf,
}

fn load(path: &Path) -> AnyResult<RunConfig> {
    RunConfig::from_file(path)
        .with_context(|| format!("Lecture de la configuration {}", path.display()))
}

fn assemble(config: &RunConfig) -> AnyResult<RunPlan> {
    config
        .build()
        .with_context(|| format!("Assemblage de '{}'", config.name))
}

/// Charge, surcharge, assemble et exécute ; renvoie les bilans des runs.
pub fn execute(args: &RunArgs) -> AnyResult<Vec<RunSummary>> {
    let mut config = load(&args.config)?;
    if let Some(max) = args.iterations {
        config.stopping.max_iterations = max;
    }
    if let Some(restarts) = args.restarts {
        config.restarts = restarts;
    }

    init_logging(&config.logging);
    let plan = assemble(&config)?;
    let summaries = plan.execute().context("Échec du run")?;

    tracing::info!(runs = summaries.len(), "runs terminés");
    Ok(summaries)
}

pub fn handle(args: RunArgs) -> AnyResult<()> {
    let summaries = execute(&args)?;
    let output = if args.pretty {
        serde_json::to_string_pretty(&summaries)?
    } else {
        serde_json::to_string(&summaries)?
    };
    println!("{}", output);
    Ok(())
}

pub fn handle_validate(args: ValidateArgs) -> AnyResult<()> {
    init_logging(&LoggingConfig::default());
    let config = load(&args.config)?;
    let plan = assemble(&config)?;

    println!(
        "✅ Configuration '{}' valide : {} sous-population(s), {:?}, {} run(s)",
        config.name,
        plan.algorithm.population_count(),
        plan.stopping,
        plan.restarts
    );
    Ok(())
}
