use nalgebra::matrix;

use super::arithmetic_crystal_class::{arithmetic_crystal_class_entry, ArithmeticNumber};
use super::centering::Centering;
use super::classification::GeometricCrystalClass;
use crate::base::{Rotation, Rotations};

#[derive(Debug)]
/// Specific crystallographic point group in database
pub struct PointGroupRepresentative {
    pub generators: Rotations,
    pub centering: Centering,
}

impl PointGroupRepresentative {
    fn new(generators: Rotations, centering: Centering) -> Self {
        Self {
            generators,
            centering,
        }
    }

    /// Construct representative point group from geometric crystal class.
    /// Generators are given as integer rotation matrices in a conventional basis,
    /// following the axis conventions of the Hall symbol system (ITA Table A1.4.2.4-6).
    #[allow(dead_code)]
    pub fn from_geometric_crystal_class(geometric_crystal_class: GeometricCrystalClass) -> Self {
        Self::new(
            generators_for_geometric_crystal_class(geometric_crystal_class),
            Centering::P,
        )
    }

    pub fn from_arithmetic_crystal_class(arithmetic_number: ArithmeticNumber) -> Self {
        let entry = arithmetic_crystal_class_entry(arithmetic_number)
            .expect("Invalid arithmetic number");
        let centering = match entry.symbol.chars().last().unwrap() {
            'P' => Centering::P,
            'A' => Centering::A,
            'B' => Centering::B,
            'C' => Centering::C,
            'I' => Centering::I,
            'R' => Centering::R,
            'F' => Centering::F,
            _ => unreachable!(),
        };
        Self::new(
            generators_for_geometric_crystal_class(entry.geometric_crystal_class),
            centering,
        )
    }

    pub fn primitive_generators(&self) -> Rotations {
        let prim_trans_mat_inv = self.centering.linear().map(|e| e as f64);
        let prim_trans_mat = self.centering.inverse();
        self.generators
            .iter()
            .map(|g| {
                let prim_g = prim_trans_mat_inv * g.map(|e| e as f64) * prim_trans_mat;
                prim_g.map(|e| e.round() as i32)
            })
            .collect()
    }
}

/// Generators for each geometric crystal class, given as rotation matrices in the
/// conventional basis (unique axis b for monoclinic, hexagonal axes for trigonal/hexagonal).
fn generators_for_geometric_crystal_class(
    geometric_crystal_class: GeometricCrystalClass,
) -> Rotations {
    let e = Rotations::new();
    let inv = -Rotation::identity();
    match geometric_crystal_class {
        // Triclinic
        GeometricCrystalClass::C1 => e,
        GeometricCrystalClass::Ci => vec![inv],
        // Monoclinic (unique axis b)
        GeometricCrystalClass::C2 => vec![r2y()],
        GeometricCrystalClass::C1h => vec![-r2y()],
        GeometricCrystalClass::C2h => vec![r2y(), inv],
        // Orthorhombic
        GeometricCrystalClass::D2 => vec![r2z(), r2y()],
        GeometricCrystalClass::C2v => vec![r2z(), -r2x()],
        GeometricCrystalClass::D2h => vec![r2z(), r2y(), inv],
        // Tetragonal
        GeometricCrystalClass::C4 => vec![r4z()],
        GeometricCrystalClass::S4 => vec![-r4z()],
        GeometricCrystalClass::C4h => vec![r4z(), inv],
        GeometricCrystalClass::D4 => vec![r4z(), r2x()],
        GeometricCrystalClass::C4v => vec![r4z(), -r2x()],
        GeometricCrystalClass::D2d => vec![-r4z(), r2x()],
        GeometricCrystalClass::D4h => vec![r4z(), r2x(), inv],
        // Trigonal (hexagonal axes)
        GeometricCrystalClass::C3 => vec![r3z()],
        GeometricCrystalClass::C3i => vec![r3z(), inv],
        GeometricCrystalClass::D3 => vec![r3z(), r2_hex()],
        GeometricCrystalClass::C3v => vec![r3z(), -r2_hex()],
        GeometricCrystalClass::D3d => vec![r3z(), r2_hex(), inv],
        // Hexagonal
        GeometricCrystalClass::C6 => vec![r6z()],
        GeometricCrystalClass::C3h => vec![r3z(), -r2z()],
        GeometricCrystalClass::C6h => vec![r6z(), inv],
        GeometricCrystalClass::D6 => vec![r6z(), r2_hex()],
        GeometricCrystalClass::C6v => vec![r6z(), -r2_hex()],
        GeometricCrystalClass::D3h => vec![r3z(), -r2z(), r2_hex()],
        GeometricCrystalClass::D6h => vec![r6z(), r2_hex(), inv],
        // Cubic
        GeometricCrystalClass::T => vec![r2z(), r3diag()],
        GeometricCrystalClass::Th => vec![r2z(), r3diag(), inv],
        GeometricCrystalClass::O => vec![r4z(), r3diag()],
        GeometricCrystalClass::Td => vec![-r4z(), r3diag()],
        GeometricCrystalClass::Oh => vec![r4z(), r3diag(), inv],
    }
}

fn r2x() -> Rotation {
    matrix![
        1, 0, 0;
        0, -1, 0;
        0, 0, -1;
    ]
}

/// Twofold rotation perpendicular to c in the hexagonal axes (along a-b),
/// the default secondary generator Hall symbols use after a threefold or
/// sixfold (e.g. the "2" in "P 3 2" / "P 6 2"). Distinct from `r2x`:
/// trigonal/hexagonal generators live in the non-orthogonal hexagonal basis,
/// where the cubic/tetragonal twofold `diag(1,-1,-1)` does not close to a
/// finite group when combined with `r3z`/`r6z`.
fn r2_hex() -> Rotation {
    matrix![
        0, -1, 0;
        -1, 0, 0;
        0, 0, -1;
    ]
}

fn r2y() -> Rotation {
    matrix![
        -1, 0, 0;
        0, 1, 0;
        0, 0, -1;
    ]
}

fn r2z() -> Rotation {
    matrix![
        -1, 0, 0;
        0, -1, 0;
        0, 0, 1;
    ]
}

fn r4z() -> Rotation {
    matrix![
        0, -1, 0;
        1, 0, 0;
        0, 0, 1;
    ]
}

/// Three-fold rotation along the hexagonal c axis
fn r3z() -> Rotation {
    matrix![
        0, -1, 0;
        1, -1, 0;
        0, 0, 1;
    ]
}

fn r6z() -> Rotation {
    matrix![
        1, -1, 0;
        1, 0, 0;
        0, 0, 1;
    ]
}

/// Three-fold rotation along the cubic [111] axis: cyclic permutation of a, b, c
fn r3diag() -> Rotation {
    matrix![
        0, 0, 1;
        1, 0, 0;
        0, 1, 0;
    ]
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::PointGroupRepresentative;
    use crate::base::traverse;
    use crate::data::classification::GeometricCrystalClass;

    fn order(geometric_crystal_class: GeometricCrystalClass) -> usize {
        match geometric_crystal_class {
            // Triclinic
            GeometricCrystalClass::C1 => 1,
            GeometricCrystalClass::Ci => 2,
            // Monoclinic
            GeometricCrystalClass::C2 => 2,
            GeometricCrystalClass::C1h => 2,
            GeometricCrystalClass::C2h => 4,
            // Orthorhombic
            GeometricCrystalClass::D2 => 4,
            GeometricCrystalClass::C2v => 4,
            GeometricCrystalClass::D2h => 8,
            // Tetragonal
            GeometricCrystalClass::C4 => 4,
            GeometricCrystalClass::S4 => 4,
            GeometricCrystalClass::C4h => 8,
            GeometricCrystalClass::D4 => 8,
            GeometricCrystalClass::C4v => 8,
            GeometricCrystalClass::D2d => 8,
            GeometricCrystalClass::D4h => 16,
            // Trigonal
            GeometricCrystalClass::C3 => 3,
            GeometricCrystalClass::C3i => 6,
            GeometricCrystalClass::D3 => 6,
            GeometricCrystalClass::C3v => 6,
            GeometricCrystalClass::D3d => 12,
            // Hexagonal
            GeometricCrystalClass::C6 => 6,
            GeometricCrystalClass::C3h => 6,
            GeometricCrystalClass::C6h => 12,
            GeometricCrystalClass::D6 => 12,
            GeometricCrystalClass::C6v => 12,
            GeometricCrystalClass::D3h => 12,
            GeometricCrystalClass::D6h => 24,
            // Cubic
            GeometricCrystalClass::T => 12,
            GeometricCrystalClass::Td => 24,
            GeometricCrystalClass::O => 24,
            GeometricCrystalClass::Th => 24,
            GeometricCrystalClass::Oh => 48,
        }
    }

    #[test]
    fn test_point_group_representative() {
        for geometric_crystal_class in GeometricCrystalClass::iter() {
            let point_group =
                PointGroupRepresentative::from_geometric_crystal_class(geometric_crystal_class);
            let rotations = traverse(&point_group.generators);
            assert_eq!(rotations.len(), order(geometric_crystal_class));
        }
    }

    #[test]
    fn test_point_group_representative_from_arithmetic_class() {
        use crate::data::arithmetic_crystal_class::iter_arithmetic_crystal_entry;

        for entry in iter_arithmetic_crystal_entry() {
            let point_group =
                PointGroupRepresentative::from_arithmetic_crystal_class(entry.arithmetic_number);
            let rotations = traverse(&point_group.generators);
            assert_eq!(rotations.len(), order(entry.geometric_crystal_class));
        }
    }
}
