//! C-compatible buffer+size bindings over the `latsym` symmetry pipeline.
//!
//! Every function is a thin, caller-owns-the-buffer wrapper: the caller
//! allocates output arrays, passes their capacity, and gets back either the
//! written count or 0 (with nothing written) if the buffer was too small.
//! There is no allocation that crosses the FFI boundary except through the
//! `LatsymCell`/string helpers, which come with matching `free_*` functions.

pub mod base;

use std::ffi::CString;
use std::os::raw::c_char;

use latsym::base::{AngleTolerance, Cell};

pub use base::{free_latsym_cell, LatsymCell, LatsymOperation};

fn angle_tolerance_from_raw(angle_tolerance: f64) -> AngleTolerance {
    if angle_tolerance < 0.0 {
        AngleTolerance::Default
    } else {
        AngleTolerance::Radian(angle_tolerance)
    }
}

/// Write `src` into a caller-provided C string buffer of `cap` bytes
/// (including the trailing nul). Returns `true` if it fit.
unsafe fn write_c_string(src: &str, out: *mut c_char, cap: i32) -> bool {
    let Ok(cstring) = CString::new(src) else {
        return false;
    };
    let bytes = cstring.as_bytes_with_nul();
    if bytes.len() > cap as usize {
        return false;
    }
    unsafe {
        std::ptr::copy_nonoverlapping(bytes.as_ptr() as *const c_char, out, bytes.len());
    }
    true
}

/// Symmetry operations of the cell. Writes up to `max_out` operations into
/// `out_operations` and returns the exact count, or 0 if `max_out` is smaller
/// than the true count (nothing is written in that case) or on classification
/// failure.
///
/// # Safety
/// `cell` must point to a valid, initialized `LatsymCell`. `out_operations`
/// must be valid for `max_out` writes of `LatsymOperation`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn latsym_get_symmetry(
    cell: *const LatsymCell,
    symprec: f64,
    angle_tolerance: f64,
    max_out: i32,
    out_operations: *mut LatsymOperation,
) -> i32 {
    let cell: Cell = unsafe { &*cell }.into();
    let Ok(operations) =
        latsym::get_symmetry(&cell, symprec, angle_tolerance_from_raw(angle_tolerance))
    else {
        return 0;
    };
    if operations.len() as i32 > max_out {
        return 0;
    }
    unsafe {
        for (i, operation) in operations.iter().enumerate() {
            *out_operations.add(i) = operation.into();
        }
    }
    operations.len() as i32
}

/// Exact symmetry-operation count, or 0 on classification failure.
///
/// # Safety
/// `cell` must point to a valid, initialized `LatsymCell`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn latsym_get_multiplicity(
    cell: *const LatsymCell,
    symprec: f64,
    angle_tolerance: f64,
) -> i32 {
    let cell: Cell = unsafe { &*cell }.into();
    latsym::get_multiplicity(&cell, symprec, angle_tolerance_from_raw(angle_tolerance))
        .map(|m| m as i32)
        .unwrap_or(0)
}

/// Upper bound on the symmetry-operation count (pure-translation count x 48),
/// or 0 on a degenerate lattice.
///
/// # Safety
/// `cell` must point to a valid, initialized `LatsymCell`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn latsym_get_max_multiplicity(cell: *const LatsymCell, symprec: f64) -> i32 {
    let cell: Cell = unsafe { &*cell }.into();
    latsym::get_max_multiplicity(&cell, symprec)
        .map(|m| m as i32)
        .unwrap_or(0)
}

/// Reduce `cell` to its primitive cell, writing positions/numbers into the
/// caller's `out_positions`/`out_numbers` (capacity `cell.num_atoms`, since
/// the primitive cell is never larger). Returns the new atom count, or 0 if
/// `cell` is already primitive or the search failed.
///
/// # Safety
/// `cell` must point to a valid, initialized `LatsymCell`. `out_basis` must
/// be a valid single-element write target; `out_positions`/`out_numbers`
/// must be valid for `cell.num_atoms` writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn latsym_find_primitive(
    cell: *const LatsymCell,
    symprec: f64,
    out_basis: *mut [[f64; 3]; 3],
    out_positions: *mut [f64; 3],
    out_numbers: *mut i32,
) -> i32 {
    let cell: Cell = unsafe { &*cell }.into();
    let Ok(Some(primitive)) = latsym::find_primitive(&cell, symprec) else {
        return 0;
    };
    let ffi_cell = LatsymCell::from(&primitive);
    unsafe {
        *out_basis = ffi_cell.basis;
        std::ptr::copy_nonoverlapping(
            ffi_cell.positions,
            out_positions,
            primitive.num_atoms(),
        );
        std::ptr::copy_nonoverlapping(ffi_cell.numbers, out_numbers, primitive.num_atoms());
    }
    free_latsym_cell(ffi_cell);
    primitive.num_atoms() as i32
}

/// International (Hermann-Mauguin) space-group number, writing the short
/// symbol into `out_symbol` (capacity `symbol_cap` bytes, including nul).
/// Returns 0 and writes nothing on classification failure or symbol overflow.
///
/// # Safety
/// `cell` must point to a valid, initialized `LatsymCell`. `out_symbol` must
/// be valid for `symbol_cap` byte writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn latsym_get_international(
    cell: *const LatsymCell,
    symprec: f64,
    angle_tolerance: f64,
    out_symbol: *mut c_char,
    symbol_cap: i32,
) -> i32 {
    let cell: Cell = unsafe { &*cell }.into();
    let Ok((number, symbol)) = latsym::get_international(
        &cell,
        symprec,
        angle_tolerance_from_raw(angle_tolerance),
    ) else {
        return 0;
    };
    if !unsafe { write_c_string(&symbol, out_symbol, symbol_cap) } {
        return 0;
    }
    number
}

/// Schoenflies space-group number and symbol; same contract as
/// [`latsym_get_international`].
///
/// # Safety
/// Same obligations as [`latsym_get_international`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn latsym_get_schoenflies(
    cell: *const LatsymCell,
    symprec: f64,
    angle_tolerance: f64,
    out_symbol: *mut c_char,
    symbol_cap: i32,
) -> i32 {
    let cell: Cell = unsafe { &*cell }.into();
    let Ok((number, symbol)) = latsym::get_schoenflies(
        &cell,
        symprec,
        angle_tolerance_from_raw(angle_tolerance),
    ) else {
        return 0;
    };
    if !unsafe { write_c_string(&symbol, out_symbol, symbol_cap) } {
        return 0;
    }
    number
}

/// Conventional Bravais-lattice setting of `basis`. Never fails: falls back
/// to triclinic/P internally. Always writes `out_basis` and returns 1.
///
/// # Safety
/// `basis` and `out_basis` must each point to a valid, single 3x3 matrix.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn latsym_get_bravais_lattice(
    basis: *const [[f64; 3]; 3],
    symprec: f64,
    out_basis: *mut [[f64; 3]; 3],
) -> i32 {
    let lattice = latsym::base::Lattice::new(latsym::utils::to_matrix3(&unsafe { *basis }));
    let bravais = latsym::get_bravais_lattice(&lattice, symprec);
    unsafe {
        *out_basis = latsym::utils::to_3x3_slice(&bravais.lattice.basis.transpose());
    }
    1
}

/// Minkowski-reduced basis of `basis`. Returns 0 (leaving `out_basis`
/// untouched) if reduction fails to converge.
///
/// # Safety
/// `basis` and `out_basis` must each point to a valid, single 3x3 matrix.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn latsym_get_smallest_lattice(
    basis: *const [[f64; 3]; 3],
    out_basis: *mut [[f64; 3]; 3],
) -> i32 {
    let lattice = latsym::base::Lattice::new(latsym::utils::to_matrix3(&unsafe { *basis }));
    let Ok(reduced) = latsym::get_smallest_lattice(&lattice) else {
        return 0;
    };
    unsafe {
        *out_basis = latsym::utils::to_3x3_slice(&reduced.basis.transpose());
    }
    1
}

/// Irreducible representatives of a uniform reciprocal-space mesh under the
/// symmetry of `cell`. `out_capacity` must be at least
/// `mesh[0] * mesh[1] * mesh[2]`; `out_grid_points` and `out_map` are written
/// in full (one entry per mesh point, not just per representative). Returns
/// the number of distinct representatives, or 0 on overflow or classification
/// failure.
///
/// # Safety
/// `cell`, `mesh`, and `shift` must each point to a single valid value of
/// their pointee type. `out_grid_points` and `out_map` must be valid for
/// `out_capacity` writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn latsym_get_ir_reciprocal_mesh(
    cell: *const LatsymCell,
    symprec: f64,
    angle_tolerance: f64,
    mesh: *const [i32; 3],
    shift: *const [i32; 3],
    time_reversal: i32,
    out_capacity: i32,
    out_grid_points: *mut [i32; 3],
    out_map: *mut i32,
) -> i32 {
    let mesh = unsafe { *mesh };
    let shift = unsafe { *shift };
    let total = mesh[0] * mesh[1] * mesh[2];
    if out_capacity < total {
        return 0;
    }
    let cell: Cell = unsafe { &*cell }.into();
    let shift = [shift[0] != 0, shift[1] != 0, shift[2] != 0];
    let Ok((grid_points, reduction)) = latsym::get_ir_reciprocal_mesh(
        mesh,
        shift,
        &cell,
        symprec,
        angle_tolerance_from_raw(angle_tolerance),
        time_reversal != 0,
    ) else {
        return 0;
    };
    unsafe {
        for (i, g) in grid_points.iter().enumerate() {
            *out_grid_points.add(i) = *g;
        }
        for (i, &m) in reduction.map.iter().enumerate() {
            *out_map.add(i) = m as i32;
        }
    }
    reduction.count as i32
}

/// Irreducible (k1, k2, k3) triplets with k1 + k2 + k3 in the reciprocal
/// lattice, for a caller-supplied rotation set (typically from
/// [`latsym_get_symmetry`]). Returns the number of distinct triplets written
/// into `out_k1`/`out_k2`/`out_k3`/`out_weight`, or 0 on overflow.
///
/// # Safety
/// `mesh` must point to a single valid value; `rotations` must be valid for
/// `num_rotations` reads; the four `out_*` pointers must each be valid for
/// `max_out` writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn latsym_get_triplets_reciprocal_mesh(
    mesh: *const [i32; 3],
    time_reversal: i32,
    rotations: *const [[i32; 3]; 3],
    num_rotations: i32,
    symprec: f64,
    max_out: i32,
    out_k1: *mut i32,
    out_k2: *mut i32,
    out_k3: *mut i32,
    out_weight: *mut i32,
) -> i32 {
    let mesh = unsafe { *mesh };
    let rotations: Vec<latsym::base::Rotation> = unsafe {
        std::slice::from_raw_parts(rotations, num_rotations as usize)
            .iter()
            .map(latsym::utils::to_matrix3)
            .collect()
    };
    let lattice = latsym::base::Lattice::new(nalgebra::Matrix3::identity());
    let (_, triplets) = latsym::get_triplets_reciprocal_mesh(
        mesh,
        time_reversal != 0,
        &lattice,
        &rotations,
        symprec,
    );
    if triplets.len() as i32 > max_out {
        return 0;
    }
    unsafe {
        for (i, t) in triplets.iter().enumerate() {
            *out_k1.add(i) = t.k1 as i32;
            *out_k2.add(i) = t.k2 as i32;
            *out_k3.add(i) = t.k3 as i32;
            *out_weight.add(i) = t.weight as i32;
        }
    }
    triplets.len() as i32
}

/// Release a C string previously written by one of the symbol-returning
/// functions. No-op: symbol buffers are caller-owned, kept only for ABI
/// symmetry with `free_latsym_cell`.
#[unsafe(no_mangle)]
pub extern "C" fn latsym_free_symbol(_symbol: *mut c_char) {}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{matrix, vector};

    fn cubic_ffi_cell(a: f64) -> LatsymCell {
        let cell = Cell::new(
            latsym::base::Lattice::new(matrix![a, 0.0, 0.0; 0.0, a, 0.0; 0.0, 0.0, a]),
            vec![vector![0.0, 0.0, 0.0]],
            vec![0],
        );
        LatsymCell::from(&cell)
    }

    #[test]
    fn test_get_symmetry_roundtrip() {
        let cell = cubic_ffi_cell(4.0);
        let mut buf = vec![
            LatsymOperation {
                rotation: [[0; 3]; 3],
                translation: [0.0; 3],
            };
            64
        ];
        let count = unsafe { latsym_get_symmetry(&cell, 1e-5, -1.0, 64, buf.as_mut_ptr()) };
        assert_eq!(count, 48);
        free_latsym_cell(cell);
    }

    #[test]
    fn test_get_symmetry_overflow_reports_zero() {
        let cell = cubic_ffi_cell(4.0);
        let mut buf = vec![
            LatsymOperation {
                rotation: [[0; 3]; 3],
                translation: [0.0; 3],
            };
            4
        ];
        let count = unsafe { latsym_get_symmetry(&cell, 1e-5, -1.0, 4, buf.as_mut_ptr()) };
        assert_eq!(count, 0);
        free_latsym_cell(cell);
    }

    #[test]
    fn test_get_international() {
        let cell = cubic_ffi_cell(4.0);
        let mut symbol = vec![0 as c_char; 16];
        let number = unsafe {
            latsym_get_international(&cell, 1e-5, -1.0, symbol.as_mut_ptr(), symbol.len() as i32)
        };
        assert_eq!(number, 221);
        free_latsym_cell(cell);
    }

    #[test]
    fn test_find_primitive_bcc() {
        let cell = Cell::new(
            latsym::base::Lattice::new(matrix![3.0, 0.0, 0.0; 0.0, 3.0, 0.0; 0.0, 0.0, 3.0]),
            vec![vector![0.0, 0.0, 0.0], vector![0.5, 0.5, 0.5]],
            vec![0, 0],
        );
        let ffi_cell = LatsymCell::from(&cell);
        let mut out_basis = [[0.0; 3]; 3];
        let mut out_positions = vec![[0.0; 3]; 2];
        let mut out_numbers = vec![0i32; 2];
        let count = unsafe {
            latsym_find_primitive(
                &ffi_cell,
                1e-5,
                &mut out_basis,
                out_positions.as_mut_ptr(),
                out_numbers.as_mut_ptr(),
            )
        };
        assert_eq!(count, 1);
        free_latsym_cell(ffi_cell);
    }

    #[test]
    fn test_get_ir_reciprocal_mesh() {
        let cell = cubic_ffi_cell(4.0);
        let total = 4 * 4 * 4;
        let mut grid_points = vec![[0i32; 3]; total as usize];
        let mut map = vec![0i32; total as usize];
        let count = unsafe {
            latsym_get_ir_reciprocal_mesh(
                &cell,
                1e-5,
                -1.0,
                &[4, 4, 4],
                &[0, 0, 0],
                1,
                total,
                grid_points.as_mut_ptr(),
                map.as_mut_ptr(),
            )
        };
        assert_eq!(count, 10);
        free_latsym_cell(cell);
    }

    #[test]
    fn test_get_triplets_reciprocal_mesh() {
        // Identity-only rotation set: every grid point is its own orbit, so
        // each k1 contributes exactly one weight-1 triplet per valid k3.
        let identity: [[i32; 3]; 3] = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];
        let mesh = [2, 2, 2];
        let total = mesh[0] * mesh[1] * mesh[2];
        let mut k1 = vec![0i32; (total * total) as usize];
        let mut k2 = vec![0i32; (total * total) as usize];
        let mut k3 = vec![0i32; (total * total) as usize];
        let mut weight = vec![0i32; (total * total) as usize];
        let count = unsafe {
            latsym_get_triplets_reciprocal_mesh(
                &mesh,
                1,
                &identity,
                1,
                1e-5,
                total * total,
                k1.as_mut_ptr(),
                k2.as_mut_ptr(),
                k3.as_mut_ptr(),
                weight.as_mut_ptr(),
            )
        };
        assert!(count > 0);
        let mut weight_by_k1: std::collections::HashMap<i32, i32> = Default::default();
        for i in 0..count as usize {
            *weight_by_k1.entry(k1[i]).or_insert(0) += weight[i];
        }
        for w in weight_by_k1.values() {
            assert_eq!(*w, total);
        }
    }
}
