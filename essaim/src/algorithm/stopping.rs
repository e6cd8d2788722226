use crate::utils::prelude::*;

/// Condition d'arrêt d'un run, évaluée entre deux itérations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoppingCondition {
    MaximumIterations { max: usize },
}

impl StoppingCondition {
    pub fn maximum_iterations(max: usize) -> Self {
        StoppingCondition::MaximumIterations { max }
    }

    pub fn is_complete(&self, iterations: usize) -> bool {
        match self {
            StoppingCondition::MaximumIterations { max } => iterations >= *max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maximum_iterations() {
        let stop = StoppingCondition::maximum_iterations(4);
        assert!(!stop.is_complete(3));
        assert!(stop.is_complete(4));
        assert!(stop.is_complete(9));
    }
}
