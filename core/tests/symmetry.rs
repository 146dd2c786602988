use nalgebra::{matrix, vector};

use latsym::base::{AngleTolerance, Cell, Lattice};
use latsym::{
    find_primitive, get_international, get_ir_reciprocal_mesh, get_max_multiplicity,
    get_multiplicity, get_triplets_reciprocal_mesh, get_symmetry,
};

const SYMPREC: f64 = 1e-4;

fn cubic_cell(a: f64, positions: Vec<[f64; 3]>, numbers: Vec<i32>) -> Cell {
    Cell::new(
        Lattice::new(matrix![
            a, 0.0, 0.0;
            0.0, a, 0.0;
            0.0, 0.0, a;
        ]),
        positions.into_iter().map(|p| vector![p[0], p[1], p[2]]).collect(),
        numbers,
    )
}

/// S1: primitive cubic, Pm-3m (#221), multiplicity 48.
#[test]
fn test_pm3m_primitive_cubic() {
    let cell = cubic_cell(4.0, vec![[0.0, 0.0, 0.0]], vec![0]);
    let multiplicity = get_multiplicity(&cell, SYMPREC, AngleTolerance::Default).unwrap();
    assert_eq!(multiplicity, 48);

    let (number, symbol) = get_international(&cell, SYMPREC, AngleTolerance::Default).unwrap();
    assert_eq!(number, 221);
    assert_eq!(symbol, "Pm-3m");
}

/// S2: bcc, Im-3m (#229), conventional multiplicity 96 / primitive 48,
/// find_primitive reduces 2 atoms to 1.
#[test]
fn test_im3m_bcc() {
    let cell = cubic_cell(
        3.0,
        vec![[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]],
        vec![0, 0],
    );
    let multiplicity = get_multiplicity(&cell, SYMPREC, AngleTolerance::Default).unwrap();
    assert_eq!(multiplicity, 96);

    let (number, symbol) = get_international(&cell, SYMPREC, AngleTolerance::Default).unwrap();
    assert_eq!(number, 229);
    assert_eq!(symbol, "Im-3m");

    let primitive = find_primitive(&cell, SYMPREC).unwrap().expect("bcc is not primitive");
    assert_eq!(primitive.num_atoms(), 1);
    let prim_multiplicity = get_multiplicity(&primitive, SYMPREC, AngleTolerance::Default).unwrap();
    assert_eq!(prim_multiplicity, 48);
}

/// S3: NaCl rock salt, Fm-3m (#225).
#[test]
fn test_fm3m_nacl() {
    let a = 5.64;
    let cell = Cell::new(
        Lattice::new(matrix![
            a, 0.0, 0.0;
            0.0, a, 0.0;
            0.0, 0.0, a;
        ]),
        vec![
            vector![0.0, 0.0, 0.0],
            vector![0.5, 0.0, 0.0],
            vector![0.0, 0.5, 0.0],
            vector![0.0, 0.0, 0.5],
            vector![0.5, 0.5, 0.0],
            vector![0.5, 0.0, 0.5],
            vector![0.0, 0.5, 0.5],
            vector![0.5, 0.5, 0.5],
        ],
        vec![0, 1, 1, 1, 0, 0, 0, 1],
    );
    let (number, symbol) = get_international(&cell, SYMPREC, AngleTolerance::Default).unwrap();
    assert_eq!(number, 225);
    assert_eq!(symbol, "Fm-3m");
}

/// S4: rutile TiO2, P4_2/mnm (#136).
#[test]
fn test_rutile_tio2() {
    let u = 0.305;
    let cell = Cell::new(
        Lattice::new(matrix![
            4.59, 0.0, 0.0;
            0.0, 4.59, 0.0;
            0.0, 0.0, 2.96;
        ]),
        vec![
            vector![0.0, 0.0, 0.0],
            vector![0.5, 0.5, 0.5],
            vector![u, u, 0.0],
            vector![1.0 - u, 1.0 - u, 0.0],
            vector![0.5 + u, 0.5 - u, 0.5],
            vector![0.5 - u, 0.5 + u, 0.5],
        ],
        vec![0, 0, 1, 1, 1, 1],
    );
    let (number, symbol) = get_international(&cell, SYMPREC, AngleTolerance::Default).unwrap();
    assert_eq!(number, 136);
    assert_eq!(symbol, "P4_2/mnm");
}

/// S5: 4x4x4 mesh, no shift, with time reversal, for a primitive-cubic
/// symmetry cell. Under the full cube symmetry group, grid index 2 along
/// each axis is its own antipode (2 == -2 mod 4) while 1 and 3 pair up,
/// leaving 3 distinct per-axis classes; the irreducible k-points are the
/// sorted multisets of size 3 from those classes: C(3 + 3 - 1, 3) = 10.
#[test]
fn test_ir_reciprocal_mesh_4x4x4() {
    let cell = cubic_cell(4.0, vec![[0.0, 0.0, 0.0]], vec![0]);
    let (_, reduction) = get_ir_reciprocal_mesh(
        [4, 4, 4],
        [false, false, false],
        &cell,
        SYMPREC,
        AngleTolerance::Default,
        true,
    )
    .unwrap();
    assert_eq!(reduction.count, 10);
}

/// S6: 2x2x2 mesh triplets with time reversal. For each irreducible k1, the
/// emitted triplets partition every k2 in the mesh into orbits under k1's
/// stabilizer, so weights restricted to one k1 sum to the mesh size; summed
/// over all irreducible k1 representatives, the total is k1-count * mesh size.
#[test]
fn test_triplets_reciprocal_mesh_2x2x2() {
    let cell = cubic_cell(4.0, vec![[0.0, 0.0, 0.0]], vec![0]);
    let rotations: Vec<_> = get_symmetry(&cell, SYMPREC, AngleTolerance::Default)
        .unwrap()
        .iter()
        .map(|operation| operation.rotation)
        .collect();
    let (grid_points, triplets) =
        get_triplets_reciprocal_mesh([2, 2, 2], true, &cell.lattice, &rotations, SYMPREC);

    let mut weight_by_k1: std::collections::HashMap<usize, usize> = Default::default();
    for t in &triplets {
        *weight_by_k1.entry(t.k1).or_insert(0) += t.weight;
    }
    for weight in weight_by_k1.values() {
        assert_eq!(*weight, grid_points.len());
    }
    let total_weight: usize = triplets.iter().map(|t| t.weight).sum();
    assert_eq!(total_weight, weight_by_k1.len() * grid_points.len());
}

#[test]
fn test_max_multiplicity_bounds_multiplicity() {
    let cell = cubic_cell(
        3.0,
        vec![[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]],
        vec![0, 0],
    );
    let multiplicity = get_multiplicity(&cell, SYMPREC, AngleTolerance::Default).unwrap();
    let max_multiplicity = get_max_multiplicity(&cell, SYMPREC).unwrap();
    assert!(max_multiplicity >= multiplicity);
}
