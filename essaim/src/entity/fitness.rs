use crate::utils::prelude::*;
use std::cmp::Ordering;

/// Structure représentant la performance d'une entité.
/// Conçue pour l'optimisation mono- et multi-objectifs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fitness {
    /// Les valeurs des objectifs.
    /// Convention : On cherche toujours à MAXIMISER ces valeurs.
    /// (Pour minimiser un coût, le problème renvoie la valeur opposée.)
    pub values: Vec<f64>,

    /// Score de violation de contrainte (0.0 = valide, >0.0 = invalide).
    pub constraint_violation: f64,
}

impl Fitness {
    /// Crée une nouvelle fitness brute.
    pub fn new(values: Vec<f64>, constraint_violation: f64) -> Self {
        Self {
            values,
            constraint_violation,
        }
    }

    /// Fitness mono-objectif valide.
    pub fn scalar(value: f64) -> Self {
        Self::new(vec![value], 0.0)
    }

    /// Valeur du premier objectif (NEG_INFINITY si aucun).
    pub fn value(&self) -> f64 {
        self.values.first().copied().unwrap_or(f64::NEG_INFINITY)
    }

    /// Retourne true si self domine other.
    /// A domine B si A est au moins aussi bon que B partout et strictement meilleur sur au moins un critère.
    pub fn dominates(&self, other: &Fitness) -> bool {
        // 1. Priorité absolue à la validité (Constraint Handling)
        if self.constraint_violation < other.constraint_violation {
            return true;
        }
        if self.constraint_violation > other.constraint_violation {
            return false;
        }

        // 2. Si contraintes égales, on compare les objectifs (Pareto)
        let mut at_least_one_better = false;
        for (a, b) in self.values.iter().zip(other.values.iter()) {
            if a < b {
                return false;
            }
            if a > b {
                at_least_one_better = true;
            }
        }
        at_least_one_better
    }

    /// Ordre total : validité d'abord, puis premier objectif (plus grand = meilleur).
    pub fn compare(&self, other: &Fitness) -> Ordering {
        other
            .constraint_violation
            .total_cmp(&self.constraint_violation)
            .then_with(|| self.value().total_cmp(&other.value()))
    }

    pub fn is_better_than(&self, other: &Fitness) -> bool {
        self.compare(other) == Ordering::Greater
    }
}

impl Default for Fitness {
    fn default() -> Self {
        Self {
            values: vec![],
            constraint_violation: 0.0,
        }
    }
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitness_dominance_logic() {
        let sol_a = Fitness::new(vec![10.0, 10.0], 0.0);
        let sol_b = Fitness::new(vec![5.0, 5.0], 0.0);
        let sol_pareto = Fitness::new(vec![12.0, 2.0], 0.0);

        assert!(sol_a.dominates(&sol_b), "A(10,10) doit dominer B(5,5)");
        assert!(!sol_b.dominates(&sol_a), "B ne doit pas dominer A");

        // A et Pareto sont non-dominés l'un par l'autre
        assert!(!sol_a.dominates(&sol_pareto));
        assert!(!sol_pareto.dominates(&sol_a));
    }

    #[test]
    fn test_constraint_handling() {
        let valid = Fitness::new(vec![10.0], 0.0);
        let invalid_slight = Fitness::new(vec![100.0], 1.0);
        let invalid_severe = Fitness::new(vec![100.0], 10.0);

        assert!(valid.dominates(&invalid_slight), "Valide domine toujours invalide");
        assert!(invalid_slight.dominates(&invalid_severe));
        assert!(valid.is_better_than(&invalid_slight));
    }

    #[test]
    fn test_scalar_ordering() {
        let low = Fitness::scalar(-4.0);
        let high = Fitness::scalar(-1.0);

        assert!(high.is_better_than(&low));
        assert!(!low.is_better_than(&high));
        assert_eq!(Fitness::default().value(), f64::NEG_INFINITY);
    }
}
