use crate::base::{AngleTolerance, Lattice, Error};
use crate::data::{arithmetic_crystal_class_entry, Centering, LatticeSystem};
use crate::identify::PointGroup;
use crate::search::search_bravais_group;

/// A lattice reduced to conventional setting together with its Bravais type.
#[derive(Debug, Clone)]
pub struct BravaisLattice {
    /// Conventional-cell lattice.
    pub lattice: Lattice,
    pub system: LatticeSystem,
    pub centering: Centering,
}

impl BravaisLattice {
    /// Reduce `lattice` to its conventional Bravais setting.
    ///
    /// Never fails at the interface level: if no higher symmetry can be
    /// certified at the given tolerance, falls back to triclinic/P, matching
    /// the design of spglib's Bravais-lattice search.
    pub fn new(lattice: &Lattice, symprec: f64) -> Self {
        let Ok((reduced_lattice, _)) = lattice.minkowski_reduce() else {
            return Self::triclinic_fallback(lattice);
        };
        let Ok(bravais_rotations) =
            search_bravais_group(&reduced_lattice, symprec, AngleTolerance::Default)
        else {
            return Self::triclinic_fallback(lattice);
        };
        let Ok(point_group) = PointGroup::new(&bravais_rotations) else {
            return Self::triclinic_fallback(lattice);
        };
        let Some(entry) = arithmetic_crystal_class_entry(point_group.arithmetic_number) else {
            return Self::triclinic_fallback(lattice);
        };

        let system = entry.lattice_system();
        let centering = centering_from_symbol(entry.symbol);

        let repr_primitive_lattice = Lattice {
            basis: reduced_lattice.basis * point_group.prim_trans_mat.map(|e| e as f64),
        };
        let conventional_lattice = Lattice {
            basis: repr_primitive_lattice.basis * centering.linear().map(|e| e as f64),
        };

        Self {
            lattice: conventional_lattice,
            system,
            centering,
        }
    }

    fn triclinic_fallback(lattice: &Lattice) -> Self {
        Self {
            lattice: lattice.clone(),
            system: LatticeSystem::Triclinic,
            centering: Centering::P,
        }
    }
}

fn centering_from_symbol(symbol: &str) -> Centering {
    match symbol.chars().last().unwrap() {
        'P' => Centering::P,
        'A' => Centering::A,
        'B' => Centering::B,
        'C' => Centering::C,
        'I' => Centering::I,
        'R' => Centering::R,
        'F' => Centering::F,
        _ => unreachable!(),
    }
}

/// Reduce `lattice` to a shortest, most-orthogonal basis (Minkowski reduction).
/// Exposed in isolation for callers that only need lattice reduction.
pub fn smallest_lattice(lattice: &Lattice) -> Result<Lattice, Error> {
    let (reduced, _) = lattice.minkowski_reduce()?;
    Ok(reduced)
}

#[cfg(test)]
mod tests {
    use nalgebra::matrix;

    use super::BravaisLattice;
    use crate::base::Lattice;
    use crate::data::Centering;

    #[test]
    fn test_bravais_lattice_cubic() {
        let lattice = Lattice::new(matrix![
            4.0, 0.0, 0.0;
            0.0, 4.0, 0.0;
            0.0, 0.0, 4.0;
        ]);
        let bravais = BravaisLattice::new(&lattice, 1e-5);
        assert_eq!(bravais.centering, Centering::P);
        assert_relative_eq!(bravais.lattice.volume(), lattice.volume());
    }

    #[test]
    fn test_bravais_lattice_fcc() {
        // conventional fcc cell -> F centering
        let lattice = Lattice::new(matrix![
            0.0, 4.0, 4.0;
            4.0, 0.0, 4.0;
            4.0, 4.0, 0.0;
        ]);
        let bravais = BravaisLattice::new(&lattice, 1e-5);
        assert_eq!(bravais.centering, Centering::F);
    }
}
