use super::fitness::Fitness;
use super::properties::{keys, Properties, PropertyValue};
use crate::types::Vector;
use crate::utils::prelude::*;

/// Entité candidate : une position, une vitesse de même dimension et des
/// propriétés nommées (fitness, meilleur personnel, compteurs...).
///
/// `Clone` produit une copie totalement indépendante : vecteurs et
/// propriétés sont possédés, rien n'est partagé avec l'original.
#[derive(Clone, Debug, Serialize)]
pub struct Particle {
    id: Uuid,
    position: Vector,
    velocity: Vector,
    properties: Properties,
}

impl Particle {
    pub fn new(position: Vector, velocity: Vector) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            velocity,
            properties: Properties::new(),
        }
    }

    /// Particule immobile : vitesse nulle, non bornée.
    pub fn at_rest(position: Vector) -> Self {
        let velocity = Vector::of(&vec![0.0; position.dimension()]);
        Self::new(position, velocity)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn dimension(&self) -> usize {
        self.position.dimension()
    }

    pub fn position(&self) -> &Vector {
        &self.position
    }

    pub fn velocity(&self) -> &Vector {
        &self.velocity
    }

    pub fn position_mut(&mut self) -> &mut Vector {
        &mut self.position
    }

    pub fn velocity_mut(&mut self) -> &mut Vector {
        &mut self.velocity
    }

    /// Emprunts simultanés de la position et de la vitesse.
    pub fn state_mut(&mut self) -> (&mut Vector, &mut Vector) {
        (&mut self.position, &mut self.velocity)
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    pub fn fitness(&self) -> Option<&Fitness> {
        self.properties.fitness(keys::FITNESS)
    }

    pub fn best_fitness(&self) -> Option<&Fitness> {
        self.properties.fitness(keys::BEST_FITNESS)
    }

    pub fn best_position(&self) -> Option<&Vector> {
        self.properties.vector(keys::BEST_POSITION)
    }

    pub fn set_fitness(&mut self, fitness: Fitness) {
        self.properties
            .insert(keys::FITNESS, PropertyValue::Fitness(fitness));
    }

    /// Enregistre une évaluation et met à jour le meilleur personnel.
    pub fn record_evaluation(&mut self, fitness: Fitness) {
        let improved = self
            .best_fitness()
            .map_or(true, |best| fitness.is_better_than(best));

        if improved {
            self.properties.insert(
                keys::BEST_POSITION,
                PropertyValue::Vector(self.position.clone()),
            );
            self.properties
                .insert(keys::BEST_FITNESS, PropertyValue::Fitness(fitness.clone()));
        }
        self.set_fitness(fitness);
    }

    /// Vérifie que position et vitesse ont la même dimension.
    pub fn check_dimensions(&self) -> Result<()> {
        if self.position.dimension() != self.velocity.dimension() {
            return Err(EngineError::DimensionMismatch {
                entity: self.id.to_string(),
                position: self.position.dimension(),
                velocity: self.velocity.dimension(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_is_independent() {
        let mut original = Particle::at_rest(Vector::bounded(&[1.0, 2.0], -5.0, 5.0));
        original.record_evaluation(Fitness::scalar(-5.0));

        let mut copy = original.clone();
        copy.position_mut().set_real(0, 4.0).unwrap();
        copy.record_evaluation(Fitness::scalar(-1.0));

        assert_eq!(copy.id(), original.id());
        assert_eq!(original.position().real(0).unwrap(), 1.0);
        assert_eq!(original.fitness().unwrap().value(), -5.0);
        assert_eq!(copy.best_position().unwrap().real(0).unwrap(), 4.0);
    }

    #[test]
    fn test_personal_best_only_improves() {
        let mut p = Particle::at_rest(Vector::of(&[0.0]));
        p.record_evaluation(Fitness::scalar(-2.0));

        p.position_mut().set_real(0, 9.0).unwrap();
        p.record_evaluation(Fitness::scalar(-10.0));

        assert_eq!(p.fitness().unwrap().value(), -10.0);
        assert_eq!(p.best_fitness().unwrap().value(), -2.0);
        assert_eq!(p.best_position().unwrap().real(0).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch_detected() {
        let p = Particle::new(Vector::of(&[0.0, 1.0]), Vector::of(&[0.0]));
        let err = p.check_dimensions().unwrap_err();

        assert!(matches!(
            err,
            EngineError::DimensionMismatch { position: 2, velocity: 1, .. }
        ));
    }
}
