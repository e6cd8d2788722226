//! Fonctions de référence pour l'optimisation continue.

use crate::utils::prelude::*;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Sphere : minimum global f(0, ..., 0) = 0.
#[must_use]
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

/// Elliptique (haute condition) : `Σ (10^6)^(i/(n-1)) x_i²`.
///
/// f(1, 2) = 1 + 10^6 * 4 = 4000001.
#[must_use]
pub fn elliptic(x: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 {
        return sphere(x);
    }
    x.iter()
        .enumerate()
        .map(|(i, xi)| 1.0e6_f64.powf(i as f64 / (n - 1) as f64) * xi * xi)
        .sum()
}

/// Rastrigin : multimodal, minimum global f(0, ..., 0) = 0.
#[must_use]
pub fn rastrigin(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    10.0 * n
        + x.iter()
            .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

/// Rosenbrock : minimum global f(1, ..., 1) = 0.
#[must_use]
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| {
            let a = w[1] - w[0] * w[0];
            let b = 1.0 - w[0];
            100.0 * a * a + b * b
        })
        .sum()
}

/// Fonction objectif sélectionnable par configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuousFunction {
    Sphere,
    Elliptic,
    Rastrigin,
    Rosenbrock,
}

impl ContinuousFunction {
    pub fn apply(&self, x: &[f64]) -> f64 {
        match self {
            ContinuousFunction::Sphere => sphere(x),
            ContinuousFunction::Elliptic => elliptic(x),
            ContinuousFunction::Rastrigin => rastrigin(x),
            ContinuousFunction::Rosenbrock => rosenbrock(x),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ContinuousFunction::Sphere => "sphere",
            ContinuousFunction::Elliptic => "elliptic",
            ContinuousFunction::Rastrigin => "rastrigin",
            ContinuousFunction::Rosenbrock => "rosenbrock",
        }
    }
}

impl fmt::Display for ContinuousFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContinuousFunction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sphere" => Ok(ContinuousFunction::Sphere),
            "elliptic" => Ok(ContinuousFunction::Elliptic),
            "rastrigin" => Ok(ContinuousFunction::Rastrigin),
            "rosenbrock" => Ok(ContinuousFunction::Rosenbrock),
            other => Err(EngineError::Config(format!("Fonction inconnue : '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_elliptic_evaluate() {
        assert!((elliptic(&[0.0, 0.0]) - 0.0).abs() < EPSILON);
        assert!((elliptic(&[1.0, 2.0]) - 4_000_001.0).abs() < EPSILON);
    }

    #[test]
    fn test_optima() {
        assert!(sphere(&[0.0, 0.0, 0.0]).abs() < EPSILON);
        assert!(rastrigin(&[0.0, 0.0]).abs() < EPSILON);
        assert!(rosenbrock(&[1.0, 1.0, 1.0]).abs() < EPSILON);
        assert_eq!(sphere(&[1.0, 2.0]), 5.0);
    }

    #[test]
    fn test_dispatch_and_parsing() {
        let f: ContinuousFunction = "Elliptic".parse().unwrap();
        assert_eq!(f, ContinuousFunction::Elliptic);
        assert_eq!(f.apply(&[1.0, 2.0]), elliptic(&[1.0, 2.0]));
        assert!("griewank".parse::<ContinuousFunction>().is_err());
    }
}
