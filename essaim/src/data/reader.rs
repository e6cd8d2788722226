use super::table::{DataTable, Pattern};
use crate::types::Vector;
use crate::utils::prelude::*;
use std::path::Path;

/// Lecteur de fichiers texte délimités (CSV, colonnes séparées par des
/// espaces, section `@data` des fichiers ARFF).
///
/// Les lignes vides et celles commençant par `%`, `@` ou `#` sont ignorées.
/// La dernière colonne devient l'étiquette si elle n'est pas numérique.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DelimitedTextReader {
    /// `None` : virgule si présente sur la ligne, sinon espaces.
    pub delimiter: Option<char>,
}

impl DelimitedTextReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter: Some(delimiter),
        }
    }

    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<DataTable> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let table = self.read_str(&text)?;
        debug!(path = %path.display(), rows = table.rows().len(), "jeu de données chargé");
        Ok(table)
    }

    pub fn read_str(&self, text: &str) -> Result<DataTable> {
        let mut table = DataTable::new();
        let mut width: Option<usize> = None;

        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(['%', '@', '#']) {
                continue;
            }

            let pattern = self.parse_line(line, number + 1)?;
            let dim = pattern.vector.dimension();
            match width {
                Some(w) if w != dim => {
                    return Err(EngineError::Parse(format!(
                        "Ligne {} : {} colonnes numériques, {} attendues",
                        number + 1,
                        dim,
                        w
                    )))
                }
                _ => width = Some(dim),
            }
            table.push(pattern);
        }
        Ok(table)
    }

    fn parse_line(&self, line: &str, number: usize) -> Result<Pattern> {
        let tokens: Vec<&str> = match self.delimiter {
            Some(d) => line.split(d).map(str::trim).collect(),
            None if line.contains(',') => line.split(',').map(str::trim).collect(),
            None => line.split_whitespace().collect(),
        };

        let mut values = Vec::with_capacity(tokens.len());
        let mut label = None;
        let last = tokens.len().saturating_sub(1);

        for (i, token) in tokens.iter().enumerate() {
            match token.parse::<f64>() {
                Ok(v) => values.push(v),
                Err(_) if i == last && !token.is_empty() => label = Some(token.to_string()),
                Err(_) => {
                    return Err(EngineError::Parse(format!(
                        "Ligne {} : valeur non numérique '{}'",
                        number, token
                    )))
                }
            }
        }

        Ok(Pattern::new(Vector::of(&values), label))
    }
}
