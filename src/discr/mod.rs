//! Continuous function spaces and their finite discretizations.

pub mod discrete_l2;
pub mod domain;
pub mod factory;
pub mod grid;
pub mod l2;

pub use discrete_l2::{DiscreteL2, DiscreteVector};
pub use domain::IntervalProd;
pub use factory::l2_uniform_discretization;
pub use grid::{RegularGrid, uniform_sampling};
pub use l2::L2;
