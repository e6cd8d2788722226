pub mod functions;
pub mod traits;

pub use functions::ContinuousFunction;
pub use traits::Evaluator;

use crate::entity::Fitness;
use crate::types::{Domain, Vector};
use crate::utils::prelude::*;

/// Sens de l'optimisation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    #[default]
    Minimise,
    Maximise,
}

/// Problème d'optimisation de fonction : une fonction, un domaine, un sens.
///
/// La fitness suit la convention de maximisation : en minimisation, elle
/// vaut l'opposé de la valeur de la fonction.
#[derive(Clone, Debug)]
pub struct FunctionOptimisationProblem {
    pub function: ContinuousFunction,
    pub domain: Domain,
    pub objective: Objective,
}

impl FunctionOptimisationProblem {
    pub fn new(function: ContinuousFunction, domain: Domain, objective: Objective) -> Self {
        Self {
            function,
            domain,
            objective,
        }
    }

    /// Valeur brute de la fonction correspondant à une fitness.
    pub fn objective_value(&self, fitness: &Fitness) -> f64 {
        match self.objective {
            Objective::Minimise => -fitness.value(),
            Objective::Maximise => fitness.value(),
        }
    }
}

impl Evaluator for FunctionOptimisationProblem {
    fn objective_names(&self) -> Vec<String> {
        let direction = match self.objective {
            Objective::Minimise => "Min",
            Objective::Maximise => "Max",
        };
        vec![format!("{} ({})", self.function, direction)]
    }

    fn domain(&self) -> &Domain {
        &self.domain
    }

    fn evaluate(&self, candidate: &Vector) -> Fitness {
        let value = self.function.apply(&candidate.to_reals());
        match self.objective {
            Objective::Minimise => Fitness::scalar(-value),
            Objective::Maximise => Fitness::scalar(value),
        }
    }

    fn is_valid(&self, candidate: &Vector) -> bool {
        candidate.dimension() == self.domain.dimension()
    }
}
