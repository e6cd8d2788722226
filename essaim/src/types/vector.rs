use super::numeric::Numeric;
use crate::utils::prelude::*;
use std::ops::{Index, IndexMut};

/// Séquence ordonnée de cellules numériques, de longueur fixe pendant un run.
///
/// Les accès `real`/`set_real`/`numeric` renvoient une erreur de précondition
/// hors limites ; `Index` panique, comme une tranche.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Vector {
    cells: Vec<Numeric>,
}

impl Vector {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Construit un vecteur non borné à partir de réels littéraux.
    pub fn of(values: &[f64]) -> Self {
        values.iter().copied().map(Numeric::new).collect()
    }

    /// Construit un vecteur dont chaque cellule partage les mêmes bornes.
    pub fn bounded(values: &[f64], lower: f64, upper: f64) -> Self {
        values
            .iter()
            .map(|&v| Numeric::bounded(v, lower, upper))
            .collect()
    }

    pub fn from_cells(cells: Vec<Numeric>) -> Self {
        Self { cells }
    }

    pub fn dimension(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn numeric(&self, index: usize) -> Result<&Numeric> {
        let len = self.cells.len();
        self.cells
            .get(index)
            .ok_or(EngineError::IndexOutOfRange { index, len })
    }

    pub fn numeric_mut(&mut self, index: usize) -> Result<&mut Numeric> {
        let len = self.cells.len();
        self.cells
            .get_mut(index)
            .ok_or(EngineError::IndexOutOfRange { index, len })
    }

    pub fn real(&self, index: usize) -> Result<f64> {
        self.numeric(index).map(Numeric::real)
    }

    pub fn set_real(&mut self, index: usize, value: f64) -> Result<()> {
        self.numeric_mut(index)?.set(value);
        Ok(())
    }

    pub fn lower_bound(&self, index: usize) -> Result<f64> {
        self.numeric(index).map(Numeric::lower_bound)
    }

    pub fn upper_bound(&self, index: usize) -> Result<f64> {
        self.numeric(index).map(Numeric::upper_bound)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Numeric> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Numeric> {
        self.cells.iter_mut()
    }

    pub fn to_reals(&self) -> Vec<f64> {
        self.cells.iter().map(Numeric::real).collect()
    }

    /// Inclusion sur les valeurs : chaque cellule de `other` a une cellule
    /// de même valeur dans `self`, à n'importe quelle position.
    pub fn contains_all(&self, other: &Vector) -> bool {
        other
            .iter()
            .all(|wanted| self.iter().any(|c| c.real() == wanted.real()))
    }
}

impl Index<usize> for Vector {
    type Output = Numeric;

    fn index(&self, index: usize) -> &Numeric {
        &self.cells[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut Numeric {
        &mut self.cells[index]
    }
}

impl FromIterator<Numeric> for Vector {
    fn from_iter<I: IntoIterator<Item = Numeric>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a Numeric;
    type IntoIter = std::slice::Iter<'a, Numeric>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_by_index() {
        let mut v = Vector::bounded(&[0.0, 1.0], -2.0, 2.0);
        v.set_real(1, 1.5).unwrap();

        assert_eq!(v.dimension(), 2);
        assert_eq!(v.real(1).unwrap(), 1.5);
        assert_eq!(v.lower_bound(0).unwrap(), -2.0);
        assert_eq!(v.upper_bound(0).unwrap(), 2.0);
    }

    #[test]
    fn test_index_out_of_range_is_precondition() {
        let mut v = Vector::of(&[1.0]);
        let err = v.set_real(3, 0.0).unwrap_err();

        assert!(err.is_precondition());
        assert!(matches!(err, EngineError::IndexOutOfRange { index: 3, len: 1 }));
    }

    #[test]
    fn test_contains_all_ignores_order() {
        let row = Vector::of(&[2.0, 1.0, 1.0, 1.0]);
        assert!(row.contains_all(&Vector::of(&[1.0, 1.0, 1.0, 2.0])));
        assert!(row.contains_all(&Vector::of(&[2.0])));
    }

    #[test]
    fn test_contains_all_ignores_multiplicity() {
        // Un seul 1.0 suffit à couvrir plusieurs 1.0
        let row = Vector::of(&[1.0, 2.0]);
        assert!(row.contains_all(&Vector::of(&[1.0, 1.0])));
        assert!(!row.contains_all(&Vector::of(&[3.0])));
        assert!(!Vector::new().contains_all(&Vector::of(&[1.0])));
    }
}
