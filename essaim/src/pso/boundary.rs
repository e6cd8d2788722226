use super::control::ControlParameter;
use crate::types::Numeric;
use crate::utils::prelude::*;
use rand::prelude::*;

/// Politique de correction d'une cellule qui vient de franchir une borne.
///
/// Les deux opérations reçoivent la cellule de position (dont la valeur est
/// déjà hors domaine) et la cellule de vitesse associée, et les corrigent en
/// place. Une seule application par mise à jour : si la valeur corrigée est
/// encore hors domaine, elle reste telle quelle jusqu'au pas suivant.
#[derive(Clone, Debug)]
pub enum BoundaryConstraint {
    /// Ramène la position exactement sur la borne franchie.
    Clamping { zero_velocity: bool },
    /// Réflexion modulo la largeur du domaine, vitesse multipliée par l'amortissement.
    Deflection { damping: ControlParameter },
    /// Enroulement (domaine torique), vitesse inchangée.
    Periodic,
    /// Nouvelle position uniforme dans `[lower, upper)`, vitesse remise à zéro.
    RandomReinitialisation { rng: SmallRng },
}

impl BoundaryConstraint {
    pub fn clamping() -> Self {
        BoundaryConstraint::Clamping {
            zero_velocity: false,
        }
    }

    /// Déflexion élastique : amortissement constant à -1.0.
    pub fn deflection() -> Self {
        Self::deflection_with(ControlParameter::default())
    }

    pub fn deflection_with(damping: ControlParameter) -> Self {
        BoundaryConstraint::Deflection { damping }
    }

    pub fn periodic() -> Self {
        BoundaryConstraint::Periodic
    }

    pub fn random_reinitialisation(seed: u64) -> Self {
        BoundaryConstraint::RandomReinitialisation {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BoundaryConstraint::Clamping { .. } => "clamping",
            BoundaryConstraint::Deflection { .. } => "deflection",
            BoundaryConstraint::Periodic => "periodic",
            BoundaryConstraint::RandomReinitialisation { .. } => "random_reinitialisation",
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        match self {
            BoundaryConstraint::Deflection { damping } => damping.reseed(seed),
            BoundaryConstraint::RandomReinitialisation { rng } => *rng = SmallRng::seed_from_u64(seed),
            BoundaryConstraint::Clamping { .. } | BoundaryConstraint::Periodic => {}
        }
    }

    /// Vrai si la politique a besoin de la largeur du domaine.
    pub fn requires_bounded_domain(&self) -> bool {
        !matches!(self, BoundaryConstraint::Clamping { .. })
    }

    pub fn constrain_lower(&mut self, position: &mut Numeric, velocity: &mut Numeric) -> Result<()> {
        let lower = position.lower_bound();
        match self {
            BoundaryConstraint::Clamping { zero_velocity } => {
                position.set(lower);
                if *zero_velocity {
                    velocity.set(0.0);
                }
            }
            BoundaryConstraint::Deflection { damping } => {
                let range = checked_range(position)?;
                position.set(lower + (lower - position.real()) % range);
                velocity.set(velocity.real() * damping.parameter());
            }
            BoundaryConstraint::Periodic => {
                let range = checked_range(position)?;
                position.set(position.upper_bound() - (lower - position.real()) % range);
            }
            BoundaryConstraint::RandomReinitialisation { rng } => {
                checked_range(position)?;
                position.set(rng.random_range(lower..position.upper_bound()));
                velocity.set(0.0);
            }
        }
        Ok(())
    }

    pub fn constrain_upper(&mut self, position: &mut Numeric, velocity: &mut Numeric) -> Result<()> {
        let upper = position.upper_bound();
        match self {
            BoundaryConstraint::Clamping { zero_velocity } => {
                position.set(upper);
                if *zero_velocity {
                    velocity.set(0.0);
                }
            }
            BoundaryConstraint::Deflection { damping } => {
                let range = checked_range(position)?;
                position.set(upper - (position.real() - upper) % range);
                velocity.set(velocity.real() * damping.parameter());
            }
            BoundaryConstraint::Periodic => {
                let range = checked_range(position)?;
                position.set(position.lower_bound() + (position.real() - upper) % range);
            }
            BoundaryConstraint::RandomReinitialisation { rng } => {
                checked_range(position)?;
                position.set(rng.random_range(position.lower_bound()..upper));
                velocity.set(0.0);
            }
        }
        Ok(())
    }
}

impl Default for BoundaryConstraint {
    fn default() -> Self {
        Self::clamping()
    }
}

// Largeur strictement positive et finie, sinon domaine dégénéré.
// L'entité et la dimension sont renseignées par l'appelant.
fn checked_range(cell: &Numeric) -> Result<f64> {
    let range = cell.range();
    if range > 0.0 && range.is_finite() {
        Ok(range)
    } else {
        Err(EngineError::DegenerateDomain {
            entity: String::new(),
            dimension: 0,
            lower: cell.lower_bound(),
            upper: cell.upper_bound(),
        })
    }
}
