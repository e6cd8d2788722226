pub mod algorithm;
pub mod config;
pub mod data;
pub mod entity;
pub mod problem;
pub mod pso;
pub mod runner;
pub mod types;
pub mod utils;

pub use algorithm::{
    Algorithm, AlgorithmIterator, MultiPopulationBasedAlgorithm, PopulationBasedAlgorithm,
};
pub use config::RunConfig;
pub use utils::{EngineError, Result};
