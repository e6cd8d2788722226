use super::traits::{Algorithm, Solution};
use crate::data::{DataSource, DataTable};
use crate::entity::{Fitness, Particle};
use crate::problem::Evaluator;
use crate::pso::PositionUpdate;
use crate::types::Vector;
use crate::utils::prelude::*;
use rand::prelude::*;
use std::cmp::Ordering;

/// Algorithme à population unique : un essaim de particules avancé d'une
/// génération par `perform_iteration`.
///
/// Le problème est partagé en lecture seule entre les clones ; tout le reste
/// (particules, stratégie de mise à jour, générateur aléatoire) est possédé.
/// `Clone` produit donc une population totalement indépendante.
#[derive(Clone, Debug)]
pub struct PopulationBasedAlgorithm {
    name: String,
    problem: Arc<dyn Evaluator>,
    position_update: PositionUpdate,
    initial_size: usize,
    velocity_scale: f64,
    rng: SmallRng,
    seed_data: Option<Arc<DataTable>>,
    particles: Vec<Particle>,
    iteration: usize,
}

impl PopulationBasedAlgorithm {
    pub fn new(name: impl Into<String>, problem: Arc<dyn Evaluator>, size: usize) -> Self {
        Self {
            name: name.into(),
            problem,
            position_update: PositionUpdate::default(),
            initial_size: size,
            velocity_scale: 0.0,
            rng: SmallRng::seed_from_u64(0),
            seed_data: None,
            particles: Vec::new(),
            iteration: 0,
        }
    }

    pub fn with_position_update(mut self, update: PositionUpdate) -> Self {
        self.position_update = update;
        self
    }

    /// Amplitude des vitesses initiales, en fraction de la largeur du domaine.
    pub fn with_velocity_scale(mut self, scale: f64) -> Self {
        self.velocity_scale = scale;
        self
    }

    /// Jeu de données utilisé par `initialise` à la place du tirage aléatoire.
    pub fn with_seed_data(mut self, data: Arc<DataTable>) -> Self {
        self.seed_data = Some(data);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.reseed(seed);
        self
    }

    /// Réinitialise tous les générateurs possédés (essaim et stratégie de bornes).
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
        self.position_update.reseed(seed.wrapping_add(1));
    }

    pub fn problem(&self) -> &Arc<dyn Evaluator> {
        &self.problem
    }

    pub fn position_update(&self) -> &PositionUpdate {
        &self.position_update
    }

    pub fn set_position_update(&mut self, update: PositionUpdate) {
        self.position_update = update;
    }

    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    pub fn size(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn get(&self, index: usize) -> Result<&Particle> {
        let len = self.particles.len();
        self.particles
            .get(index)
            .ok_or(EngineError::IndexOutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Particle> {
        let len = self.particles.len();
        self.particles
            .get_mut(index)
            .ok_or(EngineError::IndexOutOfRange { index, len })
    }

    /// Ajoute une particule déjà construite, après contrôle des dimensions.
    pub fn push(&mut self, particle: Particle) -> Result<()> {
        particle.check_dimensions()?;
        let expected = self.problem.domain().dimension();
        if particle.dimension() != expected {
            return Err(EngineError::DimensionMismatch {
                entity: particle.id().to_string(),
                position: particle.dimension(),
                velocity: expected,
            });
        }
        self.particles.push(particle);
        Ok(())
    }

    /// Peuple l'essaim à partir d'une source de données : une particule par
    /// ligne, immobile, position bornée par le domaine du problème.
    pub fn seed_from(&mut self, source: &dyn DataSource) -> Result<()> {
        let domain = self.problem.domain().clone();
        let mut particles = Vec::with_capacity(source.len());

        for index in 0..source.len() {
            let pattern = source.row(index).ok_or(EngineError::IndexOutOfRange {
                index,
                len: source.len(),
            })?;
            let position = domain.build_vector(&pattern.vector.to_reals())?;
            particles.push(Particle::at_rest(position));
        }

        self.particles = particles;
        self.initial_size = self.particles.len();
        self.iteration = 0;
        self.evaluate_all();
        info!(algorithm = %self.name, size = self.size(), "population amorcée depuis les données");
        Ok(())
    }

    /// Les `count` meilleures particules (copies), de la meilleure à la moins bonne.
    pub fn best_particles(&self, count: usize) -> Vec<Particle> {
        let mut ranked: Vec<&Particle> = self.particles.iter().collect();
        ranked.sort_by(|a, b| compare_current(b, a));
        ranked.into_iter().take(count).cloned().collect()
    }

    /// Remplace les particules les moins bonnes par les arrivants.
    ///
    /// Chaque arrivant reçoit une nouvelle identité ; ses vecteurs et
    /// propriétés sont conservés.
    pub fn replace_worst(&mut self, incoming: Vec<Particle>) -> usize {
        let mut order: Vec<usize> = (0..self.particles.len()).collect();
        order.sort_by(|&a, &b| compare_current(&self.particles[a], &self.particles[b]));

        let mut replaced = 0;
        for (slot, migrant) in order.into_iter().zip(incoming) {
            let mut fresh = Particle::new(migrant.position().clone(), migrant.velocity().clone());
            *fresh.properties_mut() = migrant.properties().clone();
            self.particles[slot] = fresh;
            replaced += 1;
        }
        replaced
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    fn evaluate(&self, particle: &Particle) -> Fitness {
        if self.problem.is_valid(particle.position()) {
            self.problem.evaluate_entity(particle)
        } else {
            // Pénalité
            Fitness::new(vec![f64::NEG_INFINITY], f64::INFINITY)
        }
    }

    fn evaluate_all(&mut self) {
        let fitnesses: Vec<Fitness> = self.particles.iter().map(|p| self.evaluate(p)).collect();
        for (particle, fitness) in self.particles.iter_mut().zip(fitnesses) {
            particle.record_evaluation(fitness);
        }
    }

    fn initial_velocity(&mut self, position: &Vector) -> Vector {
        let mut values = Vec::with_capacity(position.dimension());
        for cell in position.iter() {
            let width = if cell.is_bounded() { cell.range() } else { 1.0 };
            let v = if self.velocity_scale > 0.0 {
                self.rng.random_range(-1.0..1.0) * self.velocity_scale * width
            } else {
                0.0
            };
            values.push(v);
        }
        Vector::of(&values)
    }
}

impl Algorithm for PopulationBasedAlgorithm {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialise(&mut self) -> Result<()> {
        if let Some(data) = self.seed_data.clone() {
            return self.seed_from(data.as_ref());
        }

        let domain = self.problem.domain().clone();
        let mut particles = Vec::with_capacity(self.initial_size);

        for _ in 0..self.initial_size {
            let position = domain.random_vector(&mut self.rng)?;
            let velocity = self.initial_velocity(&position);
            particles.push(Particle::new(position, velocity));
        }

        self.particles = particles;
        self.iteration = 0;
        self.evaluate_all();

        if self.particles.is_empty() {
            warn!(algorithm = %self.name, "population vide après initialisation");
        } else {
            info!(
                algorithm = %self.name,
                size = self.size(),
                dimension = domain.dimension(),
                "population initialisée"
            );
        }
        Ok(())
    }

    fn perform_iteration(&mut self) -> Result<()> {
        for index in 0..self.particles.len() {
            self.position_update
                .update_position(&mut self.particles[index])?;
            let fitness = self.evaluate(&self.particles[index]);
            self.particles[index].record_evaluation(fitness);
        }
        self.iteration += 1;

        debug!(
            algorithm = %self.name,
            iteration = self.iteration,
            best = self.best_solution().map(|s| s.fitness.value()),
            "génération terminée"
        );
        Ok(())
    }

    fn iterations(&self) -> usize {
        self.iteration
    }

    fn best_solution(&self) -> Option<Solution> {
        self.particles
            .iter()
            .filter_map(|p| Some((p.best_position()?, p.best_fitness()?)))
            .max_by(|a, b| a.1.compare(b.1))
            .map(|(position, fitness)| Solution::new(position, fitness.clone()))
    }
}

/// Ordre sur la fitness courante ; une particule non évaluée est la moins bonne.
fn compare_current(a: &Particle, b: &Particle) -> Ordering {
    match (a.fitness(), b.fitness()) {
        (Some(fa), Some(fb)) => fa.compare(fb),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
