use super::numeric::Numeric;
use super::vector::Vector;
use crate::utils::prelude::*;
use rand::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Domaine de recherche réel, une paire de bornes `[lower, upper)` par dimension.
///
/// Représentation textuelle : des blocs `R(lower, upper)^n` séparés par des
/// virgules, par exemple `"R(-2, 2)^2"` ou `"R(0, 1)^2, R(-5:5)"`.
/// Un bloc `R^n` sans parenthèses est non borné.
#[derive(Clone, Debug, PartialEq)]
pub struct Domain {
    bounds: Vec<(f64, f64)>,
}

impl Domain {
    pub fn parse(text: &str) -> Result<Self> {
        let mut bounds = Vec::new();
        for block in split_blocks(text) {
            let (lower, upper, count) = parse_block(block.trim())?;
            bounds.extend(std::iter::repeat((lower, upper)).take(count));
        }
        if bounds.is_empty() {
            return Err(EngineError::Config(format!("Domaine vide : '{}'", text)));
        }
        Ok(Self { bounds })
    }

    pub fn uniform(dimension: usize, lower: f64, upper: f64) -> Result<Self> {
        check_bounds(lower, upper)?;
        Ok(Self {
            bounds: vec![(lower, upper); dimension],
        })
    }

    pub fn dimension(&self) -> usize {
        self.bounds.len()
    }

    pub fn bounds(&self, dimension: usize) -> Option<(f64, f64)> {
        self.bounds.get(dimension).copied()
    }

    pub fn is_bounded(&self) -> bool {
        self.bounds
            .iter()
            .all(|(l, u)| l.is_finite() && u.is_finite())
    }

    /// Construit un vecteur borné par ce domaine à partir de valeurs brutes.
    pub fn build_vector(&self, values: &[f64]) -> Result<Vector> {
        if values.len() != self.dimension() {
            return Err(EngineError::IndexOutOfRange {
                index: values.len(),
                len: self.dimension(),
            });
        }
        Ok(values
            .iter()
            .zip(&self.bounds)
            .map(|(&v, &(l, u))| Numeric::bounded(v, l, u))
            .collect())
    }

    /// Tirage uniforme dans `[lower, upper)` pour chaque dimension.
    pub fn random_vector(&self, rng: &mut SmallRng) -> Result<Vector> {
        if !self.is_bounded() {
            return Err(EngineError::Config(format!(
                "Impossible d'échantillonner le domaine non borné {}",
                self
            )));
        }
        Ok(self
            .bounds
            .iter()
            .map(|&(l, u)| Numeric::bounded(rng.random_range(l..u), l, u))
            .collect())
    }
}

impl FromStr for Domain {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Domain::parse(s)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Regroupe les dimensions consécutives de mêmes bornes
        let mut blocks: Vec<((f64, f64), usize)> = Vec::new();
        for &b in &self.bounds {
            match blocks.last_mut() {
                Some((last, count)) if *last == b => *count += 1,
                _ => blocks.push((b, 1)),
            }
        }
        let rendered: Vec<String> = blocks
            .iter()
            .map(|&((l, u), count)| {
                let head = if l.is_finite() && u.is_finite() {
                    format!("R({}, {})", l, u)
                } else {
                    "R".to_string()
                };
                if count > 1 {
                    format!("{}^{}", head, count)
                } else {
                    head
                }
            })
            .collect();
        write!(f, "{}", rendered.join(", "))
    }
}

fn check_bounds(lower: f64, upper: f64) -> Result<()> {
    if lower.is_nan() || upper.is_nan() || lower >= upper {
        return Err(EngineError::Config(format!(
            "Bornes invalides : [{}, {}) (largeur nulle ou négative)",
            lower, upper
        )));
    }
    if lower.is_finite() && upper.is_finite() && !(upper - lower).is_finite() {
        return Err(EngineError::Config(format!(
            "Bornes invalides : [{}, {}) (largeur non représentable)",
            lower, upper
        )));
    }
    Ok(())
}

// Découpe sur les virgules situées hors parenthèses.
fn split_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                blocks.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    blocks.push(&text[start..]);
    blocks.into_iter().filter(|b| !b.trim().is_empty()).collect()
}

fn parse_block(block: &str) -> Result<(f64, f64, usize)> {
    let invalid = || EngineError::Config(format!("Bloc de domaine invalide : '{}'", block));

    let rest = block.strip_prefix('R').ok_or_else(invalid)?.trim_start();

    let (lower, upper, rest) = if let Some(inner) = rest.strip_prefix('(') {
        let close = inner.find(')').ok_or_else(invalid)?;
        let args = &inner[..close];
        let mut parts = args.split([',', ':']);
        let lower = parse_real(parts.next(), block)?;
        let upper = parse_real(parts.next(), block)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        check_bounds(lower, upper)?;
        (lower, upper, inner[close + 1..].trim())
    } else {
        (f64::NEG_INFINITY, f64::INFINITY, rest.trim())
    };

    let count = if rest.is_empty() {
        1
    } else {
        let exponent = rest.strip_prefix('^').ok_or_else(invalid)?.trim();
        exponent.parse::<usize>().map_err(|_| invalid())?
    };
    if count == 0 {
        return Err(invalid());
    }

    Ok((lower, upper, count))
}

fn parse_real(part: Option<&str>, block: &str) -> Result<f64> {
    part.map(str::trim)
        .and_then(|p| p.parse::<f64>().ok())
        .ok_or_else(|| EngineError::Config(format!("Borne illisible dans '{}'", block)))
}
