use crate::entity::{keys, Fitness, Particle};

/// Partage de fitness standard de la co-évolution compétitive : la fitness
/// d'une entité devient son nombre de victoires (à maximiser).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StandardFitnessSharing;

impl StandardFitnessSharing {
    pub fn shared_fitness(&self, particle: &Particle) -> Fitness {
        let wins = particle
            .properties()
            .scoreboard(keys::BOARD)
            .map_or(0, |board| board.win_count());
        Fitness::scalar(f64::from(wins))
    }

    pub fn apply(&self, particle: &mut Particle) {
        let fitness = self.shared_fitness(particle);
        particle.set_fitness(fitness);
    }
}
