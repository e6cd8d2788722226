use serde::Serialize;

/// Cellule numérique bornée : une valeur réelle et son domaine `[lower, upper)`.
///
/// La borne inférieure est inclusive, la borne supérieure exclusive.
/// Une cellule construite sans bornes couvre `(-inf, +inf)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Numeric {
    value: f64,
    lower: f64,
    upper: f64,
}

impl Numeric {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }

    pub fn bounded(value: f64, lower: f64, upper: f64) -> Self {
        Self {
            value,
            lower,
            upper,
        }
    }

    pub fn real(&self) -> f64 {
        self.value
    }

    pub fn set(&mut self, value: f64) {
        self.value = value;
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper
    }

    /// Largeur du domaine, `|upper - lower|`.
    pub fn range(&self) -> f64 {
        (self.upper - self.lower).abs()
    }

    pub fn is_bounded(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }

    pub fn is_within_bounds(&self) -> bool {
        self.value >= self.lower && self.value < self.upper
    }
}

impl Default for Numeric {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_by_default() {
        let n = Numeric::new(3.5);
        assert_eq!(n.real(), 3.5);
        assert!(!n.is_bounded());
        assert!(n.is_within_bounds());
    }

    #[test]
    fn test_half_open_domain() {
        // [lower, upper) : la borne basse appartient au domaine, pas la haute
        let low = Numeric::bounded(-2.0, -2.0, 2.0);
        let high = Numeric::bounded(2.0, -2.0, 2.0);

        assert!(low.is_within_bounds());
        assert!(!high.is_within_bounds());
        assert_eq!(low.range(), 4.0);
    }
}
