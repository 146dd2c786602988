use crate::base::Rotation;

/// Rotation type of a rotation matrix, classified by its trace and determinant.
/// See Table 1.2.2.1 of International Tables for Crystallography Vol. A.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RotationType {
    RotoInversion6, // -6
    RotoInversion4, // -4
    RotoInversion3, // -3
    RotoInversion2, // -2 (mirror)
    RotoInversion1, // -1 (inversion)
    Rotation1,      // 1
    Rotation2,      // 2
    Rotation3,      // 3
    Rotation4,      // 4
    Rotation6,      // 6
}

/// Classify the given rotation matrix by its trace and determinant.
pub fn identify_rotation_type(rotation: &Rotation) -> RotationType {
    let trace = rotation.trace();
    let det = rotation.map(|e| e as f64).determinant().round() as i32;

    match (det, trace) {
        (1, 3) => RotationType::Rotation1,
        (1, 0) => RotationType::Rotation3,
        (1, -1) => RotationType::Rotation2,
        (1, 1) => RotationType::Rotation4,
        (1, 2) => RotationType::Rotation6,
        (-1, -3) => RotationType::RotoInversion1,
        (-1, 0) => RotationType::RotoInversion3,
        (-1, 1) => RotationType::RotoInversion2,
        (-1, -1) => RotationType::RotoInversion4,
        (-1, -2) => RotationType::RotoInversion6,
        _ => unreachable!("Invalid rotation matrix: det={}, trace={}", det, trace),
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::matrix;

    use super::*;

    #[test]
    fn test_identify_rotation_type() {
        assert_eq!(
            identify_rotation_type(&Rotation::identity()),
            RotationType::Rotation1
        );
        assert_eq!(
            identify_rotation_type(&(-Rotation::identity())),
            RotationType::RotoInversion1
        );
        assert_eq!(
            identify_rotation_type(&matrix![
                0, -1, 0;
                1, -1, 0;
                0, 0, 1;
            ]),
            RotationType::Rotation3
        );
        assert_eq!(
            identify_rotation_type(&matrix![
                -1, 0, 0;
                0, -1, 0;
                0, 0, 1;
            ]),
            RotationType::Rotation2
        );
        assert_eq!(
            identify_rotation_type(&matrix![
                0, -1, 0;
                1, 0, 0;
                0, 0, 1;
            ]),
            RotationType::Rotation4
        );
        assert_eq!(
            identify_rotation_type(&matrix![
                1, -1, 0;
                1, 0, 0;
                0, 0, 1;
            ]),
            RotationType::Rotation6
        );
        assert_eq!(
            identify_rotation_type(&matrix![
                1, 0, 0;
                0, 1, 0;
                0, 0, -1;
            ]),
            RotationType::RotoInversion2
        );
    }
}
