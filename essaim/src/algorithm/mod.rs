pub mod fitness_sharing;
pub mod iterator;
pub mod multi_population;
pub mod population;
pub mod stopping;
pub mod traits;

pub use fitness_sharing::StandardFitnessSharing;
pub use iterator::{
    AlgorithmIterator, AlgorithmList, IterationOrder, IteratorState, SharedAlgorithm,
};
pub use multi_population::{CooperationStrategy, MultiPopulationBasedAlgorithm};
pub use population::PopulationBasedAlgorithm;
pub use stopping::StoppingCondition;
pub use traits::{Algorithm, Solution};
