// FICHIER : essaim/src/runner.rs

use crate::algorithm::{Algorithm, MultiPopulationBasedAlgorithm, Solution, StoppingCondition};
use crate::config::RunPlan;
use crate::utils::prelude::*;
use crate::utils::read_lock;
use rayon::prelude::*;

/// Écart entre les graines de deux runs consécutifs.
const SEED_STRIDE: u64 = 1_000_003;

/// Bilan d'un run indépendant.
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub run: usize,
    pub seed: u64,
    pub iterations: usize,
    pub populations: usize,
    pub particles: usize,
    pub best: Option<Solution>,
}

/// Exécute `runs` redémarrages indépendants d'un algorithme modèle.
///
/// Chaque run travaille sur un clone profond du modèle, réensemencé puis
/// initialisé : aucune particule, aucun itérateur ni générateur n'est
/// partagé entre deux runs. Les bilans sont renvoyés dans l'ordre des runs.
pub fn run_independent(
    template: &MultiPopulationBasedAlgorithm,
    runs: usize,
    base_seed: u64,
    stop: &StoppingCondition,
) -> Result<Vec<RunSummary>> {
    info!(
        algorithm = template.name(),
        runs,
        "lancement des redémarrages indépendants"
    );

    (0..runs)
        .into_par_iter()
        .map(|run| {
            let seed = base_seed.wrapping_add(run as u64 * SEED_STRIDE);
            let mut algorithm = template.clone();
            algorithm.reseed(seed);
            algorithm.initialise()?;
            algorithm.run(stop)?;
            Ok(summarise(&algorithm, run, seed))
        })
        .collect()
}

impl RunPlan {
    /// Lance tous les runs prévus par la configuration.
    pub fn execute(&self) -> Result<Vec<RunSummary>> {
        run_independent(&self.algorithm, self.restarts, self.seed, &self.stopping)
    }
}

fn summarise(algorithm: &MultiPopulationBasedAlgorithm, run: usize, seed: u64) -> RunSummary {
    let particles = algorithm
        .populations()
        .iter()
        .map(|a| read_lock(a).size())
        .sum();
    RunSummary {
        run_id: Uuid::new_v4(),
        run,
        seed,
        iterations: algorithm.iterations(),
        populations: algorithm.population_count(),
        particles,
        best: algorithm.best_solution(),
    }
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{CooperationStrategy, PopulationBasedAlgorithm};
    use crate::problem::{ContinuousFunction, Evaluator, FunctionOptimisationProblem, Objective};
    use crate::types::Domain;

    fn template() -> MultiPopulationBasedAlgorithm {
        let problem: Arc<dyn Evaluator> = Arc::new(FunctionOptimisationProblem::new(
            ContinuousFunction::Sphere,
            Domain::uniform(3, -5.0, 5.0).unwrap(),
            Objective::Minimise,
        ));
        let mut mpba = MultiPopulationBasedAlgorithm::new("modele", CooperationStrategy::Sequential);
        mpba.set_populations(vec![
            PopulationBasedAlgorithm::new("a", problem.clone(), 4).with_velocity_scale(0.1),
            PopulationBasedAlgorithm::new("b", problem, 4).with_velocity_scale(0.1),
        ]);
        mpba
    }

    #[test]
    fn test_runs_are_independent_and_reproducible() {
        let model = template();
        let stop = StoppingCondition::maximum_iterations(5);

        let first = run_independent(&model, 3, 42, &stop).unwrap();
        let second = run_independent(&model, 3, 42, &stop).unwrap();

        assert_eq!(first.len(), 3);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.run, b.run);
            assert_eq!(a.iterations, 5);
            assert_eq!(a.particles, 8);
            assert_eq!(a.best, b.best);
        }
        assert_ne!(first[0].best, first[1].best);

        // Le modèle n'a jamais été initialisé ni avancé
        assert_eq!(model.iterations(), 0);
        assert!(model.populations().iter().all(|a| read_lock(a).is_empty()));
    }
}
