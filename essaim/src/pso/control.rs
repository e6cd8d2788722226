use crate::utils::prelude::*;
use rand::prelude::*;
use rand_distr::{Distribution, Normal};

/// Source de coefficient scalaire (ex: facteur d'amortissement de la vitesse).
///
/// Chaque appel à [`ControlParameter::parameter`] peut faire évoluer la
/// valeur. L'état (pas courant, générateur) est possédé : un clone
/// repart du même état mais n'est jamais aliasé avec l'original.
#[derive(Clone, Debug)]
pub enum ControlParameter {
    Constant(f64),
    /// Interpolation linéaire de `start` vers `end` en `steps` appels.
    Linear {
        start: f64,
        end: f64,
        steps: usize,
        step: usize,
    },
    /// Tirage gaussien à chaque appel.
    Gaussian {
        distribution: Normal<f64>,
        rng: SmallRng,
    },
}

impl ControlParameter {
    pub fn constant(value: f64) -> Self {
        ControlParameter::Constant(value)
    }

    pub fn linear(start: f64, end: f64, steps: usize) -> Self {
        ControlParameter::Linear {
            start,
            end,
            steps,
            step: 0,
        }
    }

    pub fn gaussian(mean: f64, deviation: f64, seed: u64) -> Result<Self> {
        if !mean.is_finite() || !(deviation >= 0.0 && deviation.is_finite()) {
            return Err(EngineError::Config(format!(
                "Paramètre gaussien invalide (moyenne={}, écart-type={}) : valeurs finies et écart-type positif attendus",
                mean, deviation
            )));
        }
        let distribution = Normal::new(mean, deviation).map_err(|e| {
            EngineError::Config(format!(
                "Paramètre gaussien invalide (moyenne={}, écart-type={}) : {}",
                mean, deviation, e
            ))
        })?;
        Ok(ControlParameter::Gaussian {
            distribution,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Nouvelle graine pour les variantes aléatoires ; sans effet sinon.
    pub fn reseed(&mut self, seed: u64) {
        if let ControlParameter::Gaussian { rng, .. } = self {
            *rng = SmallRng::seed_from_u64(seed);
        }
    }

    /// Valeur courante du paramètre ; fait avancer les variantes adaptatives.
    pub fn parameter(&mut self) -> f64 {
        match self {
            ControlParameter::Constant(v) => *v,
            ControlParameter::Linear {
                start,
                end,
                steps,
                step,
            } => {
                if *steps == 0 {
                    return *end;
                }
                let t = (*step).min(*steps) as f64 / *steps as f64;
                *step += 1;
                *start + (*end - *start) * t
            }
            ControlParameter::Gaussian { distribution, rng } => distribution.sample(rng),
        }
    }
}

impl Default for ControlParameter {
    fn default() -> Self {
        ControlParameter::Constant(-1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_never_moves() {
        let mut p = ControlParameter::default();
        assert_eq!(p.parameter(), -1.0);
        assert_eq!(p.parameter(), -1.0);
    }

    #[test]
    fn test_linear_schedule_reaches_end() {
        let mut p = ControlParameter::linear(-1.0, 0.0, 4);
        let values: Vec<f64> = (0..6).map(|_| p.parameter()).collect();
        assert_eq!(values, vec![-1.0, -0.75, -0.5, -0.25, 0.0, 0.0]);
    }

    #[test]
    fn test_clone_does_not_share_schedule() {
        let mut original = ControlParameter::linear(0.0, 1.0, 2);
        let mut copy = original.clone();

        copy.parameter();
        copy.parameter();

        // L'original n'a pas avancé
        assert_eq!(original.parameter(), 0.0);
    }

    #[test]
    fn test_gaussian_is_reproducible() {
        let mut a = ControlParameter::gaussian(-0.5, 0.1, 42).unwrap();
        let mut b = ControlParameter::gaussian(-0.5, 0.1, 42).unwrap();
        assert_eq!(a.parameter(), b.parameter());

    }

    #[test]
    fn test_gaussian_rejects_invalid_distribution() {
        for (mean, deviation) in [(0.0, -1.0), (0.0, f64::INFINITY), (f64::NAN, 0.1), (0.0, f64::NAN)] {
            let err = ControlParameter::gaussian(mean, deviation, 1).unwrap_err();
            assert!(matches!(err, EngineError::Config(_)));
        }
        assert!(ControlParameter::gaussian(-1.0, 0.0, 1).is_ok());
    }

    #[test]
    fn test_gaussian_clone_draws_independently() {
        let mut original = ControlParameter::gaussian(0.0, 1.0, 9).unwrap();
        let mut copy = original.clone();

        let drawn: Vec<f64> = (0..3).map(|_| copy.parameter()).collect();

        // Même état de départ, curseurs séparés
        let replay: Vec<f64> = (0..3).map(|_| original.parameter()).collect();
        assert_eq!(drawn, replay);
    }
}
