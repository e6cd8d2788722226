pub mod domain;
pub mod numeric;
pub mod vector;

pub use domain::Domain;
pub use numeric::Numeric;
pub use vector::Vector;
