#[allow(unused_imports)]
#[macro_use]
extern crate approx;

pub mod base;
pub mod bravais;
pub mod data;
pub mod identify;
pub mod kpoint;
pub mod utils;

mod math;
mod search;

use nalgebra::Vector3;

use crate::base::{project_rotations, AngleTolerance, Cell, Lattice, Error, Operations, Rotation};
use crate::bravais::BravaisLattice;
use crate::data::hall_symbol_entry;
use crate::data::{Number, Setting};
use crate::identify::SpaceGroup;
use crate::kpoint::{GridPoint, IrReduction, Triplet};
use crate::search::{operations_in_cell, PrimitiveCell, PrimitiveSymmetrySearch};

pub use crate::bravais::smallest_lattice as get_smallest_lattice;

/// Default tolerance recommended to callers with no better estimate of the
/// crystal's positional precision.
pub const DEFAULT_SYMPREC: f64 = 1e-5;

fn check_non_degenerate(lattice: &Lattice, symprec: f64) -> Result<(), Error> {
    if lattice.volume() < symprec {
        return Err(Error::DegenerateLatticeError);
    }
    Ok(())
}

/// Full symmetry search pipeline: primitive cell, primitive symmetry operations,
/// and space-group type identification, all against the same input cell.
struct Symmetry {
    prim_cell: PrimitiveCell,
    prim_operations: Operations,
    space_group: SpaceGroup,
}

impl Symmetry {
    fn new(
        cell: &Cell,
        symprec: f64,
        angle_tolerance: AngleTolerance,
        setting: Setting,
    ) -> Result<Self, Error> {
        check_non_degenerate(&cell.lattice, symprec)?;

        let prim_cell = PrimitiveCell::new(cell, symprec)?;
        let symmetry_search =
            PrimitiveSymmetrySearch::new(&prim_cell.cell, symprec, angle_tolerance)?;

        let epsilon = symprec / prim_cell.cell.lattice.volume().powf(1.0 / 3.0);
        let space_group = SpaceGroup::new(&symmetry_search.operations, setting, epsilon)?;

        Ok(Self {
            prim_cell,
            prim_operations: symmetry_search.operations,
            space_group,
        })
    }

    fn operations(&self) -> Operations {
        operations_in_cell(&self.prim_cell, &self.prim_operations)
    }
}

/// Symmetry operations of `cell`, in the basis of `cell` itself (not the primitive cell).
pub fn get_symmetry(
    cell: &Cell,
    symprec: f64,
    angle_tolerance: AngleTolerance,
) -> Result<Operations, Error> {
    let symmetry = Symmetry::new(cell, symprec, angle_tolerance, Setting::Spglib)?;
    Ok(symmetry.operations())
}

/// Exact number of symmetry operations of `cell`.
pub fn get_multiplicity(
    cell: &Cell,
    symprec: f64,
    angle_tolerance: AngleTolerance,
) -> Result<usize, Error> {
    Ok(get_symmetry(cell, symprec, angle_tolerance)?.len())
}

/// Upper bound on the number of symmetry operations of `cell`: the number of
/// pure lattice translations that tile `cell` from its primitive cell, times
/// the largest possible point-group order (48, for Oh).
pub fn get_max_multiplicity(cell: &Cell, symprec: f64) -> Result<usize, Error> {
    check_non_degenerate(&cell.lattice, symprec)?;
    let prim_cell = PrimitiveCell::new(cell, symprec)?;
    Ok(prim_cell.translations.len() * 48)
}

/// Reduce `cell` to its primitive cell. Returns `None` if `cell` is already primitive.
pub fn find_primitive(cell: &Cell, symprec: f64) -> Result<Option<Cell>, Error> {
    check_non_degenerate(&cell.lattice, symprec)?;
    let prim_cell = PrimitiveCell::new(cell, symprec)?;
    if prim_cell.cell.num_atoms() == cell.num_atoms() {
        Ok(None)
    } else {
        Ok(Some(prim_cell.cell))
    }
}

/// International (Hermann-Mauguin) space-group number and short symbol.
pub fn get_international(
    cell: &Cell,
    symprec: f64,
    angle_tolerance: AngleTolerance,
) -> Result<(Number, String), Error> {
    let symmetry = Symmetry::new(cell, symprec, angle_tolerance, Setting::Spglib)?;
    let entry = hall_symbol_entry(symmetry.space_group.hall_number)
        .ok_or(Error::SpaceGroupTypeIdentificationError)?;
    Ok((entry.number, entry.international_short.to_string()))
}

/// Schoenflies space-group number and symbol.
pub fn get_schoenflies(
    cell: &Cell,
    symprec: f64,
    angle_tolerance: AngleTolerance,
) -> Result<(Number, String), Error> {
    let symmetry = Symmetry::new(cell, symprec, angle_tolerance, Setting::Spglib)?;
    let entry = hall_symbol_entry(symmetry.space_group.hall_number)
        .ok_or(Error::SpaceGroupTypeIdentificationError)?;
    Ok((entry.number, entry.schoenflies.to_string()))
}

/// Conventional Bravais-lattice setting of `lattice`. Never fails: falls back
/// to triclinic/P when no higher symmetry is certified at `symprec`.
pub fn get_bravais_lattice(lattice: &Lattice, symprec: f64) -> BravaisLattice {
    BravaisLattice::new(lattice, symprec)
}

/// Irreducible subset of an explicit list of k-points (fractional reciprocal
/// coordinates) under the symmetry of `cell`.
pub fn get_ir_kpoints(
    kpoints: &[Vector3<f64>],
    cell: &Cell,
    symprec: f64,
    angle_tolerance: AngleTolerance,
    time_reversal: bool,
) -> Result<IrReduction, Error> {
    let symmetry = Symmetry::new(cell, symprec, angle_tolerance, Setting::Spglib)?;
    let rotations = project_rotations(&symmetry.operations());
    Ok(kpoint::ir_kpoints(kpoints, &rotations, time_reversal, symprec))
}

/// Irreducible representatives of a uniform reciprocal-space mesh, under the
/// symmetry of `cell`.
pub fn get_ir_reciprocal_mesh(
    mesh: [i32; 3],
    shift: [bool; 3],
    cell: &Cell,
    symprec: f64,
    angle_tolerance: AngleTolerance,
    time_reversal: bool,
) -> Result<(Vec<GridPoint>, IrReduction), Error> {
    let symmetry = Symmetry::new(cell, symprec, angle_tolerance, Setting::Spglib)?;
    let rotations = project_rotations(&symmetry.operations());
    Ok(kpoint::ir_reciprocal_mesh(
        mesh,
        shift,
        time_reversal,
        &rotations,
        symprec,
    ))
}

/// As [`get_ir_reciprocal_mesh`], but reduced only by the little group that
/// fixes every q-point in `qpoints`, for a caller-supplied rotation set
/// (typically one already obtained from [`get_symmetry`]).
///
/// `lattice` is accepted for interface parity with the other reciprocal-space
/// operations; the grid fold itself only depends on the integer rotations.
pub fn get_stabilized_reciprocal_mesh(
    mesh: [i32; 3],
    shift: [bool; 3],
    time_reversal: bool,
    lattice: &Lattice,
    rotations: &[Rotation],
    qpoints: &[Vector3<f64>],
    symprec: f64,
) -> (Vec<GridPoint>, IrReduction) {
    let _ = lattice;
    kpoint::stabilized_reciprocal_mesh(mesh, shift, time_reversal, rotations, qpoints, symprec)
}

/// Irreducible triplets (k1, k2, k3) with k1 + k2 + k3 in the reciprocal
/// lattice, over a zero-shift mesh, for a caller-supplied rotation set.
pub fn get_triplets_reciprocal_mesh(
    mesh: [i32; 3],
    time_reversal: bool,
    lattice: &Lattice,
    rotations: &[Rotation],
    symprec: f64,
) -> (Vec<GridPoint>, Vec<Triplet>) {
    let _ = lattice;
    kpoint::triplets_reciprocal_mesh(mesh, time_reversal, rotations, symprec)
}
