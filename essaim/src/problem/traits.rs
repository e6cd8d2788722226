// essaim/src/problem/traits.rs

use crate::entity::{Fitness, Particle};
use crate::types::{Domain, Vector};
use std::fmt::Debug;

/// Le trait Evaluator fait le lien avec le problème à optimiser.
///
/// Il est partagé en lecture seule (via `Arc`) par toutes les populations,
/// y compris leurs clones : une implémentation ne doit donc porter aucun
/// état mutable.
pub trait Evaluator: Send + Sync + Debug {
    /// Nom des objectifs (pour l'affichage/debug)
    fn objective_names(&self) -> Vec<String>;

    /// Domaine de recherche des candidats.
    fn domain(&self) -> &Domain;

    /// Calcule la fitness d'un candidat (convention : maximisation).
    fn evaluate(&self, candidate: &Vector) -> Fitness;

    /// Vérification rapide de validité (Hard Constraints structurelles).
    /// Si false, l'appelant assigne une pénalité sans appeler evaluate().
    fn is_valid(&self, _candidate: &Vector) -> bool {
        true
    }

    /// Évaluation d'une entité complète ; par défaut seule la position compte.
    fn evaluate_entity(&self, particle: &Particle) -> Fitness {
        self.evaluate(particle.position())
    }
}
