// FICHIER : essaim/src/utils/mod.rs

pub mod error;
pub mod logger;

/// **Le Prélude** : À utiliser via `use crate::utils::prelude::*;`
pub mod prelude {
    pub use super::error::{EngineError, Result};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
    pub use tracing::{debug, error, info, instrument, trace, warn};
    pub use uuid::Uuid;
}

pub use error::{EngineError, Result};
pub use logger::init_logging;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// Un verrou empoisonné rend la donnée telle quelle.
pub fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
