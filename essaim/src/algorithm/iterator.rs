use super::population::PopulationBasedAlgorithm;
use crate::utils::prelude::*;
use crate::utils::read_lock;
use rand::prelude::*;
use rand::seq::SliceRandom;

/// Sous-population partagée entre la liste propriétaire et les itérateurs.
pub type SharedAlgorithm = Arc<RwLock<PopulationBasedAlgorithm>>;

/// Liste des sous-populations d'un algorithme multi-population.
pub type AlgorithmList = Arc<RwLock<Vec<SharedAlgorithm>>>;

/// Ordre de parcours d'une liste d'algorithmes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IterationOrder {
    /// Ordre de déclaration.
    #[default]
    Sequential,
    Reverse,
    /// Permutation tirée à chaque liaison ou remise à zéro, reproductible
    /// pour une graine donnée.
    Random { seed: u64 },
}

/// État observable d'un itérateur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IteratorState {
    Unbound,
    Ready,
    InProgress,
    Exhausted,
}

/// Curseur de parcours sur une liste d'algorithmes.
///
/// L'itérateur ne possède pas la liste : il n'en garde qu'une référence
/// faible. Si la liste disparaît, toute lecture échoue avec
/// `EngineError::StaleIterator`.
#[derive(Debug)]
pub struct AlgorithmIterator {
    order: IterationOrder,
    list: Option<Weak<RwLock<Vec<SharedAlgorithm>>>>,
    rng: SmallRng,
    sequence: Vec<usize>,
    cursor: usize,
}

impl AlgorithmIterator {
    pub fn new(order: IterationOrder) -> Self {
        let seed = match order {
            IterationOrder::Random { seed } => seed,
            _ => 0,
        };
        Self {
            order,
            list: None,
            rng: SmallRng::seed_from_u64(seed),
            sequence: Vec::new(),
            cursor: 0,
        }
    }

    pub fn sequential() -> Self {
        Self::new(IterationOrder::Sequential)
    }

    pub fn order(&self) -> IterationOrder {
        self.order
    }

    /// Nouvelle graine pour l'ordre aléatoire ; sans effet sur les autres ordres.
    pub fn reseed(&mut self, seed: u64) {
        if let IterationOrder::Random { .. } = self.order {
            self.order = IterationOrder::Random { seed };
            self.rng = SmallRng::seed_from_u64(seed);
            self.reset();
        }
    }

    /// Lie l'itérateur à une liste et remet le curseur au départ.
    pub fn set_algorithms(&mut self, list: &AlgorithmList) {
        self.list = Some(Arc::downgrade(list));
        self.reset();
    }

    /// Vrai si l'itérateur est lié à exactement cette liste.
    pub fn is_bound_to(&self, list: &AlgorithmList) -> bool {
        self.list
            .as_ref()
            .is_some_and(|weak| std::ptr::eq(weak.as_ptr(), Arc::as_ptr(list)))
    }

    /// Recalcule l'ordre de parcours sur le contenu actuel de la liste.
    pub fn reset(&mut self) {
        self.cursor = 0;
        let len = self.bound_len();

        self.sequence = match self.order {
            IterationOrder::Sequential => (0..len).collect(),
            IterationOrder::Reverse => (0..len).rev().collect(),
            IterationOrder::Random { .. } => {
                let mut s: Vec<usize> = (0..len).collect();
                s.shuffle(&mut self.rng);
                s
            }
        };
    }

    fn bound_len(&self) -> usize {
        let Some(list) = self.list.as_ref().and_then(Weak::upgrade) else {
            return 0;
        };
        let len = read_lock(&list).len();
        len
    }

    pub fn state(&self) -> IteratorState {
        match self.list.as_ref().and_then(Weak::upgrade) {
            None => IteratorState::Unbound,
            Some(_) if self.cursor >= self.sequence.len() => IteratorState::Exhausted,
            Some(_) if self.cursor == 0 => IteratorState::Ready,
            Some(_) => IteratorState::InProgress,
        }
    }

    pub fn has_next(&self) -> bool {
        matches!(self.state(), IteratorState::Ready | IteratorState::InProgress)
    }

    /// Renvoie l'algorithme suivant dans l'ordre de parcours.
    pub fn next_algorithm(&mut self) -> Result<SharedAlgorithm> {
        let weak = self.list.as_ref().ok_or(EngineError::IteratorUnbound)?;
        let list = weak.upgrade().ok_or(EngineError::StaleIterator)?;

        let index = *self
            .sequence
            .get(self.cursor)
            .ok_or(EngineError::IteratorExhausted)?;

        let algorithms = read_lock(&list);
        let algorithm = algorithms
            .get(index)
            .cloned()
            .ok_or(EngineError::IndexOutOfRange {
                index,
                len: algorithms.len(),
            })?;

        self.cursor += 1;
        Ok(algorithm)
    }

    /// Nouvel itérateur sur la même liste, curseur remis au départ.
    ///
    /// Le contenu de la liste n'est jamais copié ; seuls l'ordre de parcours
    /// et la référence à la liste sont repris.
    pub fn get_clone(&self) -> Self {
        let mut copy = Self::new(self.order);
        copy.list = self.list.clone();
        copy.reset();
        copy
    }
}

impl Default for AlgorithmIterator {
    fn default() -> Self {
        Self::sequential()
    }
}

/// Parcours en style itérateur : chaque élément est un `Result`.
///
/// Une erreur (liste disparue, liste raccourcie depuis la liaison) est
/// rendue une fois, puis le parcours s'arrête.
impl Iterator for AlgorithmIterator {
    type Item = Result<SharedAlgorithm>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.list.is_none() || self.cursor >= self.sequence.len() {
            return None;
        }
        let next = self.next_algorithm();
        if let Err(e) = &next {
            error!(error = %e, cursor = self.cursor, "parcours interrompu");
            self.cursor = self.sequence.len();
        }
        Some(next)
    }
}
