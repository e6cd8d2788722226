pub mod boundary;
pub mod control;
pub mod position_update;

pub use boundary::BoundaryConstraint;
pub use control::ControlParameter;
pub use position_update::PositionUpdate;
