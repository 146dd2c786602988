pub mod cell;
pub mod operation;

pub use cell::{free_latsym_cell, LatsymCell};
pub use operation::LatsymOperation;
