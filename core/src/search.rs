mod primitive_cell;
mod primitive_symmetry_search;
mod solve;

pub use primitive_cell::PrimitiveCell;
pub use primitive_symmetry_search::{operations_in_cell, PrimitiveSymmetrySearch};

pub(crate) use primitive_symmetry_search::search_bravais_group;
