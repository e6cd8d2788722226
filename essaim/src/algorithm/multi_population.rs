use super::fitness_sharing::StandardFitnessSharing;
use super::iterator::{AlgorithmIterator, AlgorithmList, SharedAlgorithm};
use super::population::PopulationBasedAlgorithm;
use super::traits::{Algorithm, Solution};
use crate::entity::{keys, Fitness};
use crate::utils::prelude::*;
use crate::utils::{read_lock, write_lock};
use rand::prelude::*;
use rand::seq::IndexedRandom;
use std::cmp::Ordering;

/// Manière dont les sous-populations interagissent à chaque génération.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CooperationStrategy {
    /// Chaque sous-population avance à son tour, dans l'ordre de l'itérateur.
    #[default]
    Sequential,
    /// Migration en anneau : toutes les `interval` générations, les
    /// `migrants` meilleures particules de chaque île remplacent les moins
    /// bonnes de l'île suivante (l'anneau suit l'ordre de l'itérateur).
    Migration { interval: usize, migrants: usize },
    /// Co-évolution compétitive : chaque particule affronte `opponents`
    /// particules tirées dans les autres sous-populations.
    Competitive { opponents: usize },
}

/// Algorithme multi-population : une liste de sous-populations et un
/// itérateur lié à cette liste exacte.
///
/// Toute modification de la liste passe par ce type, qui relie
/// l'itérateur à chaque fois.
#[derive(Debug)]
pub struct MultiPopulationBasedAlgorithm {
    name: String,
    populations: AlgorithmList,
    iterator: AlgorithmIterator,
    strategy: CooperationStrategy,
    fitness_sharing: StandardFitnessSharing,
    rng: SmallRng,
    iteration: usize,
}

impl MultiPopulationBasedAlgorithm {
    pub fn new(name: impl Into<String>, strategy: CooperationStrategy) -> Self {
        let populations: AlgorithmList = Arc::new(RwLock::new(Vec::new()));
        let mut iterator = AlgorithmIterator::sequential();
        iterator.set_algorithms(&populations);
        Self {
            name: name.into(),
            populations,
            iterator,
            strategy,
            fitness_sharing: StandardFitnessSharing,
            rng: SmallRng::seed_from_u64(0),
            iteration: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Nouvelles graines pour l'algorithme, son itérateur et chacune de ses
    /// sous-populations.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
        self.iterator.reseed(seed.wrapping_sub(1));
        for (i, algorithm) in read_lock(&self.populations).iter().enumerate() {
            write_lock(algorithm).reseed(seed.wrapping_add(1 + i as u64 * 7919));
        }
    }

    pub fn strategy(&self) -> CooperationStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: CooperationStrategy) {
        self.strategy = strategy;
    }

    /// Instantané des sous-populations, dans l'ordre de la liste.
    ///
    /// Seul ce type modifie la liste elle-même ; l'instantané ne donne accès
    /// qu'aux sous-populations.
    pub fn populations(&self) -> Vec<SharedAlgorithm> {
        read_lock(&self.populations).clone()
    }

    /// Vrai si `iterator` parcourt la liste courante de cet algorithme.
    pub fn binds(&self, iterator: &AlgorithmIterator) -> bool {
        iterator.is_bound_to(&self.populations)
    }

    pub fn population_count(&self) -> usize {
        read_lock(&self.populations).len()
    }

    /// Remplace la liste entière ; l'itérateur est relié à la nouvelle liste.
    pub fn set_population_list(&mut self, list: Vec<SharedAlgorithm>) {
        self.populations = Arc::new(RwLock::new(list));
        self.iterator.set_algorithms(&self.populations);
        info!(
            algorithm = %self.name,
            populations = self.population_count(),
            "itérateur relié à une nouvelle liste"
        );
    }

    pub fn set_populations(&mut self, populations: Vec<PopulationBasedAlgorithm>) {
        let list = populations
            .into_iter()
            .map(|p| Arc::new(RwLock::new(p)))
            .collect();
        self.set_population_list(list);
    }

    pub fn add_population(&mut self, population: PopulationBasedAlgorithm) -> SharedAlgorithm {
        let shared = Arc::new(RwLock::new(population));
        write_lock(&self.populations).push(shared.clone());
        self.iterator.set_algorithms(&self.populations);
        shared
    }

    /// Retire une sous-population (comparaison d'identité, pas de valeur).
    pub fn remove_population(&mut self, population: &SharedAlgorithm) -> bool {
        let removed = {
            let mut list = write_lock(&self.populations);
            let before = list.len();
            list.retain(|p| !Arc::ptr_eq(p, population));
            list.len() != before
        };
        if removed {
            self.iterator.set_algorithms(&self.populations);
        }
        removed
    }

    pub fn remove_at(&mut self, index: usize) -> Result<SharedAlgorithm> {
        let removed = {
            let mut list = write_lock(&self.populations);
            if index >= list.len() {
                return Err(EngineError::IndexOutOfRange {
                    index,
                    len: list.len(),
                });
            }
            list.remove(index)
        };
        self.iterator.set_algorithms(&self.populations);
        Ok(removed)
    }

    pub fn get(&self, index: usize) -> Result<SharedAlgorithm> {
        let list = read_lock(&self.populations);
        list.get(index)
            .cloned()
            .ok_or(EngineError::IndexOutOfRange {
                index,
                len: list.len(),
            })
    }

    pub fn algorithm_iterator(&self) -> &AlgorithmIterator {
        &self.iterator
    }

    /// Installe une autre stratégie de parcours, liée à la liste courante.
    pub fn set_algorithm_iterator(&mut self, mut iterator: AlgorithmIterator) {
        iterator.set_algorithms(&self.populations);
        self.iterator = iterator;
    }

    /// Parcours externe (rapports, mesures) : un clone de l'itérateur
    /// interne, sans effet sur le parcours en cours.
    pub fn iter(&self) -> AlgorithmIterator {
        self.iterator.get_clone()
    }

    /// Avance toutes les sous-populations d'une génération selon la stratégie.
    #[instrument(skip(self), fields(algorithm = %self.name, iteration = self.iteration + 1))]
    pub fn algorithm_iteration(&mut self) -> Result<()> {
        let order = self.advance_all()?;

        match self.strategy {
            CooperationStrategy::Sequential => {}
            CooperationStrategy::Migration { interval, migrants } => {
                if interval > 0 && (self.iteration + 1) % interval == 0 {
                    migrate(&order, migrants);
                }
            }
            CooperationStrategy::Competitive { opponents } => {
                self.compete(opponents);
            }
        }

        self.iteration += 1;
        debug!(best = self.best_solution().map(|s| s.fitness.value()), "génération multi-population terminée");
        Ok(())
    }

    /// Avance chaque sous-population dans l'ordre de l'itérateur interne et
    /// renvoie cet ordre.
    fn advance_all(&mut self) -> Result<Vec<SharedAlgorithm>> {
        self.iterator.reset();
        let mut order = Vec::with_capacity(self.population_count());
        while self.iterator.has_next() {
            let algorithm = self.iterator.next_algorithm()?;
            write_lock(&algorithm).perform_iteration()?;
            order.push(algorithm);
        }
        Ok(order)
    }

    fn compete(&mut self, opponents: usize) {
        let list: Vec<SharedAlgorithm> = read_lock(&self.populations).clone();
        let snapshot: Vec<Vec<Option<Fitness>>> = list
            .iter()
            .map(|a| read_lock(a).particles().iter().map(|p| p.fitness().cloned()).collect())
            .collect();

        let populated: Vec<usize> = (0..snapshot.len())
            .filter(|&i| !snapshot[i].is_empty())
            .collect();
        if populated.len() < 2 {
            warn!(algorithm = %self.name, "co-évolution impossible : moins de deux sous-populations peuplées");
            return;
        }

        for (own, algorithm) in list.iter().enumerate() {
            let rivals: Vec<usize> = populated.iter().copied().filter(|&i| i != own).collect();
            let mut guard = write_lock(algorithm);

            for (index, particle) in guard.particles_mut().iter_mut().enumerate() {
                let mine = snapshot[own].get(index).cloned().flatten();
                let board = particle.properties_mut().scoreboard_mut(keys::BOARD);
                *board = Default::default();

                for _ in 0..opponents {
                    let Some(&pop) = rivals.choose(&mut self.rng) else {
                        break;
                    };
                    let Some(theirs) = snapshot[pop].choose(&mut self.rng) else {
                        continue;
                    };
                    match play(mine.as_ref(), theirs.as_ref()) {
                        Ordering::Greater => board.wins += 1,
                        Ordering::Less => board.losses += 1,
                        Ordering::Equal => board.draws += 1,
                    }
                }
                self.fitness_sharing.apply(particle);
            }
        }
    }
}

fn play(mine: Option<&Fitness>, theirs: Option<&Fitness>) -> Ordering {
    match (mine, theirs) {
        (Some(a), Some(b)) => a.compare(b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Migration en anneau : l'île `k` envoie ses meilleures particules à l'île `k + 1`.
fn migrate(ring: &[SharedAlgorithm], migrants: usize) {
    if ring.len() < 2 || migrants == 0 {
        return;
    }
    let emigrants: Vec<_> = ring
        .iter()
        .map(|a| read_lock(a).best_particles(migrants))
        .collect();

    for (k, group) in emigrants.into_iter().enumerate() {
        let target = &ring[(k + 1) % ring.len()];
        let moved = write_lock(target).replace_worst(group);
        trace!(from = k, to = (k + 1) % ring.len(), moved, "migration");
    }
}

impl Clone for MultiPopulationBasedAlgorithm {
    /// Copie profonde : chaque sous-population est clonée, l'itérateur est
    /// cloné puis relié à la nouvelle liste.
    fn clone(&self) -> Self {
        let copies: Vec<SharedAlgorithm> = read_lock(&self.populations)
            .iter()
            .map(|a| Arc::new(RwLock::new(read_lock(a).clone())))
            .collect();
        let populations: AlgorithmList = Arc::new(RwLock::new(copies));

        let mut iterator = self.iterator.get_clone();
        iterator.set_algorithms(&populations);

        info!(algorithm = %self.name, "clone profond");
        Self {
            name: self.name.clone(),
            populations,
            iterator,
            strategy: self.strategy,
            fitness_sharing: self.fitness_sharing,
            rng: self.rng.clone(),
            iteration: self.iteration,
        }
    }
}

impl<'a> IntoIterator for &'a MultiPopulationBasedAlgorithm {
    type Item = Result<SharedAlgorithm>;
    type IntoIter = AlgorithmIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Algorithm for MultiPopulationBasedAlgorithm {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialise(&mut self) -> Result<()> {
        for algorithm in self.iter() {
            let algorithm = algorithm?;
            write_lock(&algorithm).initialise()?;
        }
        self.iteration = 0;
        info!(
            algorithm = %self.name,
            populations = self.population_count(),
            "multi-population initialisée"
        );
        Ok(())
    }

    fn perform_iteration(&mut self) -> Result<()> {
        self.algorithm_iteration()
    }

    fn iterations(&self) -> usize {
        self.iteration
    }

    fn best_solution(&self) -> Option<Solution> {
        read_lock(&self.populations)
            .iter()
            .filter_map(|a| read_lock(a).best_solution())
            .max_by(|a, b| a.fitness.compare(&b.fitness))
    }
}
