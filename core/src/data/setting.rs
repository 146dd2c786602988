use super::hall_symbol_database::{num_hall_symbol_entries, HallNumber};

/// Selects which convention is used to pick a representative Hall symbol
/// for a given arithmetic crystal class during space-group identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    /// Try every Hall symbol known to the database, in database order.
    Spglib,
    /// Same coverage as `Spglib`; kept distinct so callers can record which
    /// convention produced a `SpaceGroup`, once multiple settings per space
    /// group number are added to the database.
    Standard,
    /// Force a specific Hall number instead of searching.
    HallNumber(HallNumber),
}

impl Setting {
    pub fn hall_numbers(&self) -> Vec<HallNumber> {
        match self {
            Setting::Spglib | Setting::Standard => (1..=num_hall_symbol_entries()).collect(),
            Setting::HallNumber(hall_number) => vec![*hall_number],
        }
    }
}
