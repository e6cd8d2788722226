use std::io;

// --- RE-EXPORTS ANYHOW (Pour la flexibilité du CLI) ---
pub use anyhow::{anyhow, Context};
pub use anyhow::Result as AnyResult;

/// Type de résultat standard du moteur essaim.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Enumération centrale des erreurs du moteur.
///
/// Trois familles : violations de préconditions (fatales pour le run),
/// violations d'état de parcours (itérateur) et erreurs de configuration
/// détectées à l'assemblage. Aucune n'est transitoire : rien n'est rejoué.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    // --- Préconditions ---
    #[error("Dimensions incohérentes pour l'entité {entity} : position={position}, vitesse={velocity}")]
    DimensionMismatch {
        entity: String,
        position: usize,
        velocity: usize,
    },

    #[error("Index hors limites : {index} (dimension {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Domaine dégénéré pour l'entité {entity}, dimension {dimension} : [{lower}, {upper})")]
    DegenerateDomain {
        entity: String,
        dimension: usize,
        lower: f64,
        upper: f64,
    },

    // --- Parcours ---
    #[error("Itérateur non lié à une liste d'algorithmes")]
    IteratorUnbound,

    #[error("Itérateur épuisé : plus aucun algorithme à parcourir")]
    IteratorExhausted,

    #[error("Itérateur périmé : la liste liée n'existe plus")]
    StaleIterator,

    // --- Configuration ---
    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Erreur de lecture : {0}")]
    Parse(String),

    // --- Ambiant ---
    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] io::Error),

    #[error("Erreur de sérialisation : {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Erreur YAML : {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Erreur Système : {0}")]
    System(#[from] anyhow::Error),
}

impl EngineError {
    /// Vrai pour les violations de préconditions (bug de programmation ou données invalides).
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            EngineError::DimensionMismatch { .. }
                | EngineError::IndexOutOfRange { .. }
                | EngineError::DegenerateDomain { .. }
        )
    }

    /// Rattache une erreur de domaine à l'entité et à la dimension fautives.
    pub fn locate(self, entity: &str, at: usize) -> Self {
        match self {
            EngineError::DegenerateDomain { lower, upper, .. } => EngineError::DegenerateDomain {
                entity: entity.to_string(),
                dimension: at,
                lower,
                upper,
            },
            other => other,
        }
    }
}

// Permet de faire : return Err(format!("...").into());
impl From<String> for EngineError {
    fn from(s: String) -> Self {
        EngineError::System(anyhow::anyhow!(s))
    }
}

// Permet de faire : return Err("Mon erreur literal".into());
impl From<&str> for EngineError {
    fn from(s: &str) -> Self {
        EngineError::System(anyhow::anyhow!(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display_formatting() {
        let err = EngineError::Config("stratégie de bornes manquante".to_string());
        assert_eq!(
            err.to_string(),
            "Erreur de configuration : stratégie de bornes manquante"
        );

        let err = EngineError::DimensionMismatch {
            entity: "p-1".into(),
            position: 3,
            velocity: 2,
        };
        assert_eq!(
            err.to_string(),
            "Dimensions incohérentes pour l'entité p-1 : position=3, vitesse=2"
        );
    }

    #[test]
    fn test_precondition_family() {
        assert!(EngineError::IndexOutOfRange { index: 4, len: 2 }.is_precondition());
        assert!(!EngineError::IteratorExhausted.is_precondition());
        assert!(!EngineError::Config("x".into()).is_precondition());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "fichier absent");
        let err: EngineError = io_err.into();

        match err {
            EngineError::Io(e) => assert!(e.to_string().contains("fichier absent")),
            _ => panic!("Devrait être converti en EngineError::Io"),
        }
    }

    #[test]
    fn test_from_string_helpers() {
        let err: EngineError = String::from("Erreur string").into();
        match err {
            EngineError::System(e) => assert_eq!(e.to_string(), "Erreur string"),
            _ => panic!("String devrait devenir EngineError::System"),
        }

        let err: EngineError = "Erreur str".into();
        assert!(matches!(err, EngineError::System(_)));
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{ invalide }").unwrap_err();
        let err: EngineError = serde_err.into();

        match err {
            EngineError::Serialization(e) => assert!(e.is_syntax()),
            _ => panic!("Devrait être converti en EngineError::Serialization"),
        }
    }
}
