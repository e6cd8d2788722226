// FICHIER : essaim/src/config/mod.rs

use crate::algorithm::{
    AlgorithmIterator, CooperationStrategy, IterationOrder, MultiPopulationBasedAlgorithm,
    PopulationBasedAlgorithm, StoppingCondition,
};
use crate::data::{DataSource, DataTable, DelimitedTextReader};
use crate::problem::{ContinuousFunction, Evaluator, FunctionOptimisationProblem, Objective};
use crate::pso::{BoundaryConstraint, ControlParameter, PositionUpdate};
use crate::types::Domain;
use crate::utils::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration complète d'un run, résolue avant la première génération.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    #[serde(default = "default_name")]
    pub name: String,

    pub problem: ProblemConfig,

    #[serde(default)]
    pub population: PopulationConfig,

    #[serde(default)]
    pub position_update: PositionUpdateKind,

    // `null` explicite : aucune stratégie de bornes
    #[serde(default = "default_boundary")]
    pub boundary: Option<BoundaryConfig>,

    #[serde(default)]
    pub iterator: IterationOrder,

    #[serde(default)]
    pub strategy: CooperationStrategy,

    #[serde(default)]
    pub stopping: StoppingConfig,

    #[serde(default)]
    pub dataset: Option<DatasetConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default = "default_restarts")]
    pub restarts: usize,
}

// --- SOUS-STRUCTURES DE CONFIGURATION ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProblemConfig {
    pub function: ContinuousFunction,
    /// Texte de domaine, ex: `"R(-5.12, 5.12)^10"`.
    pub domain: String,
    #[serde(default)]
    pub objective: Objective,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopulationConfig {
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default = "default_sub_populations")]
    pub sub_populations: usize,
    #[serde(default = "default_velocity_scale")]
    pub velocity_scale: f64,
    #[serde(default)]
    pub seed: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PositionUpdateKind {
    Standard,
    #[default]
    Bounded,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoundaryConfig {
    Clamping {
        #[serde(default)]
        zero_velocity: bool,
    },
    Deflection {
        #[serde(default)]
        damping: DampingConfig,
    },
    Periodic,
    RandomReinitialisation {
        #[serde(default)]
        seed: u64,
    },
}

/// Source du facteur d'amortissement de la déflexion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DampingConfig {
    Constant { value: f64 },
    Linear { start: f64, end: f64, steps: usize },
    Gaussian { mean: f64, deviation: f64, seed: u64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoppingConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

/// Jeu de données servant à amorcer chaque sous-population.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json_dir: Option<PathBuf>,
}

// --- HELPERS SERDE ---

fn default_name() -> String {
    "essaim".to_string()
}
fn default_boundary() -> Option<BoundaryConfig> {
    Some(BoundaryConfig::Clamping {
        zero_velocity: false,
    })
}
fn default_restarts() -> usize {
    1
}
fn default_size() -> usize {
    20
}
fn default_sub_populations() -> usize {
    1
}
fn default_velocity_scale() -> f64 {
    0.1
}
fn default_max_iterations() -> usize {
    100
}
fn default_level() -> String {
    "info".to_string()
}

// --- IMPLÉMENTATIONS PAR DÉFAUT ---

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            sub_populations: default_sub_populations(),
            velocity_scale: default_velocity_scale(),
            seed: 0,
        }
    }
}

impl Default for DampingConfig {
    fn default() -> Self {
        DampingConfig::Constant { value: -1.0 }
    }
}

impl Default for StoppingConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json_dir: None,
        }
    }
}

impl DampingConfig {
    pub fn to_parameter(&self) -> Result<ControlParameter> {
        match *self {
            DampingConfig::Constant { value } => Ok(ControlParameter::constant(value)),
            DampingConfig::Linear { start, end, steps } => {
                Ok(ControlParameter::linear(start, end, steps))
            }
            DampingConfig::Gaussian {
                mean,
                deviation,
                seed,
            } => ControlParameter::gaussian(mean, deviation, seed),
        }
    }
}

impl BoundaryConfig {
    pub fn to_constraint(&self) -> Result<BoundaryConstraint> {
        Ok(match self {
            BoundaryConfig::Clamping { zero_velocity } => BoundaryConstraint::Clamping {
                zero_velocity: *zero_velocity,
            },
            BoundaryConfig::Deflection { damping } => {
                BoundaryConstraint::deflection_with(damping.to_parameter()?)
            }
            BoundaryConfig::Periodic => BoundaryConstraint::periodic(),
            BoundaryConfig::RandomReinitialisation { seed } => {
                BoundaryConstraint::random_reinitialisation(*seed)
            }
        })
    }
}

/// Résultat de l'assemblage : l'algorithme (non initialisé) et son cadre d'exécution.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub algorithm: MultiPopulationBasedAlgorithm,
    pub stopping: StoppingCondition,
    pub restarts: usize,
    pub seed: u64,
}

// --- IMPLÉMENTATION PRINCIPALE ---

impl RunConfig {
    /// Charge un fichier `.json`, `.yaml` ou `.yml`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let config = match extension.as_deref() {
            Some("json") => Self::from_str_json(&content)?,
            Some("yaml") | Some("yml") => Self::from_str_yaml(&content)?,
            _ => {
                return Err(EngineError::Config(format!(
                    "Format de configuration non reconnu : {}",
                    path.display()
                )))
            }
        };
        debug!(path = %path.display(), name = %config.name, "configuration chargée");
        Ok(config)
    }

    pub fn from_str_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_str_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Contrôles d'assemblage : stratégies manquantes ou incompatibles,
    /// tailles nulles.
    pub fn validate(&self) -> Result<Domain> {
        let domain = Domain::parse(&self.problem.domain)?;

        match (self.position_update, &self.boundary) {
            (PositionUpdateKind::Bounded, None) => {
                return Err(EngineError::Config(
                    "Mise à jour bornée sans stratégie de bornes".to_string(),
                ))
            }
            (PositionUpdateKind::Standard, Some(b)) => {
                return Err(EngineError::Config(format!(
                    "Stratégie de bornes '{}' incompatible avec la mise à jour standard",
                    b.to_constraint()?.name()
                )))
            }
            (PositionUpdateKind::Bounded, Some(b)) => {
                let constraint = b.to_constraint()?;
                if constraint.requires_bounded_domain() && !domain.is_bounded() {
                    return Err(EngineError::Config(format!(
                        "La stratégie '{}' exige un domaine borné (reçu {})",
                        constraint.name(),
                        domain
                    )));
                }
            }
            (PositionUpdateKind::Standard, None) => {}
        }

        if self.dataset.is_none() && self.population.size == 0 {
            return Err(EngineError::Config(
                "La taille de population doit être strictement positive".to_string(),
            ));
        }
        if self.population.sub_populations == 0 {
            return Err(EngineError::Config(
                "Au moins une sous-population est requise".to_string(),
            ));
        }
        if self.stopping.max_iterations == 0 {
            return Err(EngineError::Config(
                "max_iterations doit être strictement positif".to_string(),
            ));
        }
        if self.restarts == 0 {
            return Err(EngineError::Config(
                "Au moins un run est requis (restarts >= 1)".to_string(),
            ));
        }

        match self.strategy {
            CooperationStrategy::Sequential => {}
            CooperationStrategy::Migration { interval, migrants } => {
                if interval == 0 || migrants == 0 {
                    return Err(EngineError::Config(
                        "Migration : interval et migrants doivent être strictement positifs"
                            .to_string(),
                    ));
                }
                self.require_islands("migration")?;
            }
            CooperationStrategy::Competitive { opponents } => {
                if opponents == 0 {
                    return Err(EngineError::Config(
                        "Co-évolution : au moins un adversaire est requis".to_string(),
                    ));
                }
                self.require_islands("co-évolution compétitive")?;
            }
        }

        Ok(domain)
    }

    fn require_islands(&self, strategy: &str) -> Result<()> {
        if self.population.sub_populations < 2 {
            return Err(EngineError::Config(format!(
                "La stratégie '{}' exige au moins deux sous-populations",
                strategy
            )));
        }
        Ok(())
    }

    /// Assemble le graphe d'algorithmes décrit par la configuration.
    pub fn build(&self) -> Result<RunPlan> {
        let domain = self.validate()?;

        let problem: Arc<dyn Evaluator> = Arc::new(FunctionOptimisationProblem::new(
            self.problem.function,
            domain,
            self.problem.objective,
        ));

        let position_update = match &self.boundary {
            Some(b) => PositionUpdate::bounded(b.to_constraint()?),
            None => PositionUpdate::Standard,
        };

        let seed_data = match &self.dataset {
            Some(dataset) => Some(Arc::new(self.load_dataset(dataset)?)),
            None => None,
        };

        let seed = self.population.seed;
        let mut populations = Vec::with_capacity(self.population.sub_populations);
        for i in 0..self.population.sub_populations {
            let mut pba = PopulationBasedAlgorithm::new(
                format!("{}-{}", self.name, i),
                problem.clone(),
                self.population.size,
            )
            .with_position_update(position_update.clone())
            .with_velocity_scale(self.population.velocity_scale)
            .with_seed(seed.wrapping_add(i as u64));

            if let Some(data) = &seed_data {
                pba = pba.with_seed_data(data.clone());
            }
            populations.push(pba);
        }

        let mut algorithm =
            MultiPopulationBasedAlgorithm::new(self.name.clone(), self.strategy).with_seed(seed);
        algorithm.set_algorithm_iterator(AlgorithmIterator::new(self.iterator));
        algorithm.set_populations(populations);

        info!(
            name = %self.name,
            function = %self.problem.function,
            sub_populations = self.population.sub_populations,
            "algorithme assemblé"
        );

        Ok(RunPlan {
            algorithm,
            stopping: StoppingCondition::maximum_iterations(self.stopping.max_iterations),
            restarts: self.restarts,
            seed,
        })
    }

    fn load_dataset(&self, dataset: &DatasetConfig) -> Result<DataTable> {
        let reader = match dataset.delimiter {
            Some(d) => DelimitedTextReader::with_delimiter(d),
            None => DelimitedTextReader::new(),
        };
        let table = reader.read_file(&dataset.path)?;
        if table.is_empty() {
            return Err(EngineError::Config(format!(
                "Jeu de données vide : {}",
                dataset.path.display()
            )));
        }
        Ok(table)
    }
}

// --- TESTS UNITAIRES ---
