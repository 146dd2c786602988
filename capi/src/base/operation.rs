use latsym::base::Operation;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct LatsymOperation {
    pub rotation: [[i32; 3]; 3],
    pub translation: [f64; 3],
}

impl From<&Operation> for LatsymOperation {
    fn from(operation: &Operation) -> Self {
        let r = operation.rotation;
        let rotation = [
            [r[(0, 0)], r[(0, 1)], r[(0, 2)]],
            [r[(1, 0)], r[(1, 1)], r[(1, 2)]],
            [r[(2, 0)], r[(2, 1)], r[(2, 2)]],
        ];
        let t = operation.translation;
        let translation = [t[0], t[1], t[2]];
        LatsymOperation {
            rotation,
            translation,
        }
    }
}
