mod cycle_checker;
mod delaunay;
mod elementary;
mod hnf;
mod integer_system;
mod minkowski;
mod niggli;
mod snf;

pub use delaunay::delaunay_reduce;
pub use hnf::HNF;
pub use integer_system::sylvester3;
pub use minkowski::{is_minkowski_reduced, minkowski_reduce};
pub use niggli::{is_niggli_reduced, niggli_reduce};
pub use snf::SNF;
