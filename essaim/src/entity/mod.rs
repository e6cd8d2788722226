pub mod fitness;
pub mod particle;
pub mod properties;

pub use fitness::Fitness;
pub use particle::Particle;
pub use properties::{keys, Properties, PropertyValue, Scoreboard};
