use latsym::base::{Cell, Lattice};
use latsym::utils::{to_3_slice, to_3x3_slice, to_matrix3, to_vector3};

#[derive(Debug, Clone)]
#[repr(C)]
pub struct LatsymCell {
    /// Row-wise basis vectors: `basis[i]` is the i-th lattice vector.
    pub basis: [[f64; 3]; 3],
    pub positions: *const [f64; 3],
    pub numbers: *const i32,
    pub num_atoms: i32,
}

impl From<&Cell> for LatsymCell {
    fn from(cell: &Cell) -> Self {
        let num_atoms = cell.num_atoms() as i32;
        let basis = to_3x3_slice(&cell.lattice.basis.transpose());
        let positions = cell.positions.iter().map(to_3_slice).collect::<Vec<_>>();
        let numbers = cell.numbers.clone();

        LatsymCell {
            basis,
            positions: positions.leak().as_ptr(),
            numbers: numbers.leak().as_ptr(),
            num_atoms,
        }
    }
}

impl From<&LatsymCell> for Cell {
    fn from(cell: &LatsymCell) -> Self {
        let lattice = Lattice::new(to_matrix3(&cell.basis));
        let positions = unsafe {
            std::slice::from_raw_parts(cell.positions, cell.num_atoms as usize)
                .iter()
                .map(to_vector3)
                .collect()
        };
        let numbers =
            unsafe { std::slice::from_raw_parts(cell.numbers, cell.num_atoms as usize).to_vec() };
        Cell::new(lattice, positions, numbers)
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn free_latsym_cell(cell: LatsymCell) {
    unsafe {
        let _ = Vec::from_raw_parts(
            cell.positions as *mut [f64; 3],
            cell.num_atoms as usize,
            cell.num_atoms as usize,
        );
        let _ = Vec::from_raw_parts(
            cell.numbers as *mut i32,
            cell.num_atoms as usize,
            cell.num_atoms as usize,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use latsym::base::{Cell, Lattice};
    use nalgebra::{matrix, vector};

    #[test]
    fn test_roundtrip_latsym_cell() {
        let original = Cell::new(
            Lattice::new(matrix![
                1.0, 0.0, 0.0;
                1.0, 1.0, 0.0;
                1.0, 0.0, 1.0
            ]),
            vec![vector![0.0, 0.0, 0.0]],
            vec![1],
        );
        let ffi_cell = LatsymCell::from(&original);
        let reconstructed = Cell::from(&ffi_cell);
        assert_eq!(original.num_atoms(), reconstructed.num_atoms());
        assert_relative_eq!(original.lattice.basis, reconstructed.lattice.basis);
        free_latsym_cell(ffi_cell);
    }
}
