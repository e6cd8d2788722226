use super::boundary::BoundaryConstraint;
use crate::entity::Particle;
use crate::utils::prelude::*;

/// Mise à jour de la position d'une particule à partir de sa vitesse.
#[derive(Clone, Debug)]
pub enum PositionUpdate {
    /// `x[i] += v[i]` sans aucun contrôle de domaine.
    Standard,
    /// Mise à jour dimension par dimension, les franchissements étant
    /// délégués à la stratégie de bornes.
    Bounded(BoundaryConstraint),
}

impl PositionUpdate {
    pub fn bounded(boundary: BoundaryConstraint) -> Self {
        PositionUpdate::Bounded(boundary)
    }

    pub fn boundary_constraint(&self) -> Option<&BoundaryConstraint> {
        match self {
            PositionUpdate::Bounded(b) => Some(b),
            PositionUpdate::Standard => None,
        }
    }

    pub fn set_boundary_constraint(&mut self, boundary: BoundaryConstraint) {
        *self = PositionUpdate::Bounded(boundary);
    }

    pub fn reseed(&mut self, seed: u64) {
        if let PositionUpdate::Bounded(boundary) = self {
            boundary.reseed(seed);
        }
    }

    /// Met à jour la position (et éventuellement la vitesse) en place.
    ///
    /// Pour chaque dimension `i`, `candidate = x[i] + v[i]` :
    /// - `candidate < lower` : la cellule reçoit le candidat puis `constrain_lower` ;
    /// - sinon `candidate >= upper` (borne haute exclusive) : idem avec `constrain_upper` ;
    /// - sinon `x[i] = candidate` et la vitesse reste intacte.
    pub fn update_position(&mut self, particle: &mut Particle) -> Result<()> {
        particle.check_dimensions()?;
        let entity = particle.id().to_string();
        let (position, velocity) = particle.state_mut();

        match self {
            PositionUpdate::Standard => {
                for (x, v) in position.iter_mut().zip(velocity.iter()) {
                    x.set(x.real() + v.real());
                }
            }
            PositionUpdate::Bounded(boundary) => {
                for (i, (x, v)) in position.iter_mut().zip(velocity.iter_mut()).enumerate() {
                    let candidate = x.real() + v.real();

                    if candidate < x.lower_bound() {
                        trace!(entity = %entity, dimension = i, candidate, "franchissement borne basse");
                        x.set(candidate);
                        boundary
                            .constrain_lower(x, v)
                            .map_err(|e| e.locate(&entity, i))?;
                    } else if candidate >= x.upper_bound() {
                        trace!(entity = %entity, dimension = i, candidate, "franchissement borne haute");
                        x.set(candidate);
                        boundary
                            .constrain_upper(x, v)
                            .map_err(|e| e.locate(&entity, i))?;
                    } else {
                        x.set(candidate);
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for PositionUpdate {
    fn default() -> Self {
        PositionUpdate::Bounded(BoundaryConstraint::default())
    }
}
