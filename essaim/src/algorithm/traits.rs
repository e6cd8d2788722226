// essaim/src/algorithm/traits.rs

use super::stopping::StoppingCondition;
use crate::entity::Fitness;
use crate::types::Vector;
use crate::utils::prelude::*;

/// Meilleure solution connue d'un algorithme.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub position: Vec<f64>,
    pub fitness: Fitness,
}

impl Solution {
    pub fn new(position: &Vector, fitness: Fitness) -> Self {
        Self {
            position: position.to_reals(),
            fitness,
        }
    }
}

/// Cycle de vie commun : initialisation, itérations, arrêt.
pub trait Algorithm {
    fn name(&self) -> &str;

    /// Peuple l'algorithme ; remet le compteur d'itérations à zéro.
    fn initialise(&mut self) -> Result<()>;

    /// Avance d'une génération.
    fn perform_iteration(&mut self) -> Result<()>;

    fn iterations(&self) -> usize;

    fn best_solution(&self) -> Option<Solution>;

    /// Enchaîne les itérations jusqu'à satisfaction de la condition d'arrêt.
    fn run(&mut self, stop: &StoppingCondition) -> Result<()> {
        while !stop.is_complete(self.iterations()) {
            self.perform_iteration()?;
        }
        info!(
            algorithm = self.name(),
            iterations = self.iterations(),
            "run terminé"
        );
        Ok(())
    }
}
