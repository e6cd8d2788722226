use crate::types::Vector;
use crate::utils::prelude::*;

/// Accès indexé à une suite finie de motifs étiquetés.
pub trait DataSource {
    fn len(&self) -> usize;

    fn row(&self, index: usize) -> Option<&Pattern>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Un motif : vecteur de caractéristiques et étiquette optionnelle.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Pattern {
    pub vector: Vector,
    pub label: Option<String>,
}

impl Pattern {
    pub fn new(vector: Vector, label: Option<String>) -> Self {
        Self { vector, label }
    }
}

/// Table de motifs en mémoire.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DataTable {
    rows: Vec<Pattern>,
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Pattern>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, pattern: Pattern) {
        self.rows.push(pattern);
    }

    pub fn rows(&self) -> &[Pattern] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.rows.iter()
    }

    /// Copie des lignes `[start, end)`, bornée à la taille de la table.
    pub fn slice(&self, start: usize, end: usize) -> DataTable {
        let end = end.min(self.rows.len());
        let start = start.min(end);
        Self::from_rows(self.rows[start..end].to_vec())
    }
}

impl DataSource for DataTable {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, index: usize) -> Option<&Pattern> {
        self.rows.get(index)
    }
}
