//! Brillouin-zone grid reduction under a rotation group action.
//!
//! Unlike the rest of the pipeline this has no direct precedent in the
//! codebase this crate grew from: it is implemented straight from the
//! crystallographic definitions (reciprocal rotations are the inverse
//! transpose of the real-space integer rotation matrices) rather than by
//! adapting an existing routine.

use nalgebra::Vector3;
use union_find::{QuickFindUf, UnionByRank, UnionFind};

use crate::base::Rotation;

pub type GridPoint = [i32; 3];

/// Result of reducing an explicit list of k-points or a uniform mesh.
#[derive(Debug, Clone)]
pub struct IrReduction {
    /// `map[i]` is the index of the representative that point `i` folds onto.
    /// Always `map[i] <= i` and `map[map[i]] == map[i]`.
    pub map: Vec<usize>,
    pub count: usize,
}

/// A single irreducible triplet (k1, k2, k3) with k1 + k2 + k3 in the reciprocal lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triplet {
    pub k1: usize,
    pub k2: usize,
    pub k3: usize,
    pub weight: usize,
}

/// Reciprocal-space action of a real-space integer rotation: (R^-1)^T.
/// Exact because R is unimodular, so its inverse is integral too.
fn reciprocal_rotation(rotation: &Rotation) -> Rotation {
    rotation
        .map(|e| e as f64)
        .try_inverse()
        .expect("rotation matrices are always invertible")
        .transpose()
        .map(|e| e.round() as i32)
}

fn reciprocal_rotations(rotations: &[Rotation], time_reversal: bool) -> Vec<Rotation> {
    let mut recip: Vec<Rotation> = rotations.iter().map(reciprocal_rotation).collect();
    if time_reversal {
        let inversions: Vec<Rotation> = recip.iter().map(|r| -r).collect();
        recip.extend(inversions);
    }
    recip.sort_by_key(|r| r.iter().copied().collect::<Vec<_>>());
    recip.dedup();
    recip
}

fn fold_by_smallest_representative(uf: &mut QuickFindUf<UnionByRank>, size: usize) -> IrReduction {
    let mut map = vec![0; size];
    let mut representative_count = 0;
    let mut seen = vec![false; size];
    for i in 0..size {
        let root = uf.find(i);
        if !seen[root] {
            seen[root] = true;
            representative_count += 1;
        }
    }
    // Re-derive using smallest index per root so map[i] <= i always.
    let mut smallest = vec![usize::MAX; size];
    for i in 0..size {
        let root = uf.find(i);
        if smallest[root] == usize::MAX {
            smallest[root] = i;
        }
    }
    for i in 0..size {
        map[i] = smallest[uf.find(i)];
    }
    IrReduction {
        map,
        count: representative_count,
    }
}

/// Reduce an explicit list of k-points (fractional reciprocal coordinates) under
/// the action of `rotations` (and, if `time_reversal`, k -> -k).
pub fn ir_kpoints(
    kpoints: &[Vector3<f64>],
    rotations: &[Rotation],
    time_reversal: bool,
    symprec: f64,
) -> IrReduction {
    let n = kpoints.len();
    let recip_rotations = reciprocal_rotations(rotations, time_reversal);
    let mut uf = QuickFindUf::<UnionByRank>::new(n);

    for i in 0..n {
        for j in 0..i {
            let equivalent = recip_rotations.iter().any(|r| {
                let mapped = r.map(|e| e as f64) * kpoints[i];
                let mut diff = mapped - kpoints[j];
                diff -= diff.map(|e| e.round());
                diff.iter().all(|e| e.abs() < symprec)
            });
            if equivalent {
                uf.union(i, j);
            }
        }
    }

    fold_by_smallest_representative(&mut uf, n)
}

fn mesh_size(mesh: [i32; 3]) -> usize {
    (mesh[0] * mesh[1] * mesh[2]) as usize
}

/// Row-major index over (g2, g1, g0), g0 fastest-varying.
fn point_to_index(g: Vector3<i32>, mesh: [i32; 3]) -> usize {
    let g0 = g[0].rem_euclid(mesh[0]);
    let g1 = g[1].rem_euclid(mesh[1]);
    let g2 = g[2].rem_euclid(mesh[2]);
    (g0 + mesh[0] * (g1 + mesh[1] * g2)) as usize
}

/// Image of grid point `g` under reciprocal rotation `r`, snapped back onto the
/// mesh. `None` when the image does not land on an integer grid point (the
/// rotation is incompatible with the shift).
fn rotate_grid_point(
    g: GridPoint,
    r: &Rotation,
    mesh: [i32; 3],
    shift: [bool; 3],
    symprec: f64,
) -> Option<usize> {
    let k = Vector3::new(
        (g[0] as f64 + if shift[0] { 0.5 } else { 0.0 }) / mesh[0] as f64,
        (g[1] as f64 + if shift[1] { 0.5 } else { 0.0 }) / mesh[1] as f64,
        (g[2] as f64 + if shift[2] { 0.5 } else { 0.0 }) / mesh[2] as f64,
    );
    let k_image = r.map(|e| e as f64) * k;

    let mut g_image = [0; 3];
    for i in 0..3 {
        let value = k_image[i] * mesh[i] as f64 - if shift[i] { 0.5 } else { 0.0 };
        let rounded = value.round();
        if (value - rounded).abs() > symprec * mesh[i] as f64 {
            return None;
        }
        g_image[i] = rounded as i32;
    }
    Some(point_to_index(Vector3::new(g_image[0], g_image[1], g_image[2]), mesh))
}

fn all_grid_points(mesh: [i32; 3]) -> Vec<GridPoint> {
    let mut points = Vec::with_capacity(mesh_size(mesh));
    for g2 in 0..mesh[2] {
        for g1 in 0..mesh[1] {
            for g0 in 0..mesh[0] {
                points.push([g0, g1, g2]);
            }
        }
    }
    points
}

/// Reduce a uniform mesh under `rotations` (the full symmetry set's rotation
/// parts) and an optional half-mesh shift.
pub fn ir_reciprocal_mesh(
    mesh: [i32; 3],
    shift: [bool; 3],
    time_reversal: bool,
    rotations: &[Rotation],
    symprec: f64,
) -> (Vec<GridPoint>, IrReduction) {
    let grid_points = all_grid_points(mesh);
    let m = grid_points.len();
    let recip_rotations = reciprocal_rotations(rotations, time_reversal);
    let mut uf = QuickFindUf::<UnionByRank>::new(m);

    for (n, &g) in grid_points.iter().enumerate() {
        for r in recip_rotations.iter() {
            if let Some(n_image) = rotate_grid_point(g, r, mesh, shift, symprec) {
                if n_image < n {
                    uf.union(n, n_image);
                }
            }
        }
    }

    let reduction = fold_by_smallest_representative(&mut uf, m);
    (grid_points, reduction)
}

/// Subgroup of `rotations` that fixes every q-point in `qpoints` (mod 1).
pub fn little_group(rotations: &[Rotation], qpoints: &[Vector3<f64>], symprec: f64) -> Vec<Rotation> {
    rotations
        .iter()
        .filter(|r| {
            qpoints.iter().all(|q| {
                let mapped = reciprocal_rotation(r).map(|e| e as f64) * q;
                let mut diff = mapped - q;
                diff -= diff.map(|e| e.round());
                diff.iter().all(|e| e.abs() < symprec)
            })
        })
        .copied()
        .collect()
}

/// As [`ir_reciprocal_mesh`] but restricted to the little group stabilizing `qpoints`.
pub fn stabilized_reciprocal_mesh(
    mesh: [i32; 3],
    shift: [bool; 3],
    time_reversal: bool,
    rotations: &[Rotation],
    qpoints: &[Vector3<f64>],
    symprec: f64,
) -> (Vec<GridPoint>, IrReduction) {
    let stabilizer = little_group(rotations, qpoints, symprec);
    ir_reciprocal_mesh(mesh, shift, time_reversal, &stabilizer, symprec)
}

/// Enumerate irreducible triplets (k1, k2, k3) with k1 + k2 + k3 in the
/// reciprocal lattice, over a zero-shift mesh.
pub fn triplets_reciprocal_mesh(
    mesh: [i32; 3],
    time_reversal: bool,
    rotations: &[Rotation],
    symprec: f64,
) -> (Vec<GridPoint>, Vec<Triplet>) {
    let shift = [false, false, false];
    let (grid_points, ir) = ir_reciprocal_mesh(mesh, shift, time_reversal, rotations, symprec);
    let recip_rotations = reciprocal_rotations(rotations, time_reversal);

    let mut triplets = Vec::new();
    for (n1, &map1) in ir.map.iter().enumerate() {
        if map1 != n1 {
            continue; // not a representative
        }
        let g1 = grid_points[n1];
        let stabilizer: Vec<Rotation> = recip_rotations
            .iter()
            .copied()
            .filter(|r| {
                let g1v = Vector3::new(g1[0], g1[1], g1[2]);
                rotate_grid_point(g1, r, mesh, shift, symprec) == Some(point_to_index(g1v, mesh))
            })
            .collect();

        let mut visited = vec![false; grid_points.len()];
        for (n2, &g2) in grid_points.iter().enumerate() {
            if visited[n2] {
                continue;
            }
            let g3 = [-(g1[0] + g2[0]), -(g1[1] + g2[1]), -(g1[2] + g2[2])];
            let n3 = point_to_index(Vector3::new(g3[0], g3[1], g3[2]), mesh);

            // Fold the orbit of k2 under the stabilizer of k1.
            let mut orbit = vec![n2];
            visited[n2] = true;
            for r in stabilizer.iter() {
                if let Some(n2_image) = rotate_grid_point(g2, r, mesh, shift, symprec) {
                    if !visited[n2_image] {
                        visited[n2_image] = true;
                        orbit.push(n2_image);
                    }
                }
            }

            triplets.push(Triplet {
                k1: n1,
                k2: n2,
                k3: n3,
                weight: orbit.len(),
            });
        }
    }

    (grid_points, triplets)
}

#[cfg(test)]
mod tests {
    use nalgebra::matrix;

    use super::*;

    fn cubic_point_group() -> Vec<Rotation> {
        crate::base::traverse(&vec![
            matrix![0, -1, 0; 1, 0, 0; 0, 0, 1],
            matrix![1, 0, 0; 0, 0, 1; 0, -1, 0],
            -Rotation::identity(),
        ])
    }

    #[test]
    fn test_ir_reciprocal_mesh_cubic_4x4x4() {
        // Orbits of a 4x4x4 grid under the full cube symmetry group (all 6
        // axis permutations times all 8 independent sign flips, order 48):
        // per axis, grid index 2 is its own antipode (2 == -2 mod 4) while 1
        // and 3 pair up, leaving 3 distinct per-axis classes {0, {1,3}, 2}.
        // The irreducible k-points are exactly the sorted multisets of size 3
        // drawn from those 3 classes: C(3 + 3 - 1, 3) = 10.
        let rotations = cubic_point_group();
        let (_, reduction) =
            ir_reciprocal_mesh([4, 4, 4], [false, false, false], true, &rotations, 1e-5);
        assert_eq!(reduction.count, 10);
        for i in 0..reduction.map.len() {
            assert!(reduction.map[i] <= i);
            assert_eq!(reduction.map[reduction.map[i]], reduction.map[i]);
        }
    }

    #[test]
    fn test_triplets_reciprocal_mesh_total_weight() {
        // For a fixed irreducible k1, the emitted triplets partition every k2
        // in the mesh into orbits under k1's stabilizer, so their weights sum
        // to the total grid size regardless of which k1 they belong to.
        let rotations = cubic_point_group();
        let mesh = [2, 2, 2];
        let (grid_points, triplets) = triplets_reciprocal_mesh(mesh, true, &rotations, 1e-5);

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
}

