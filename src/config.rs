use crate::angle::AngleMode;

/// Tunables of a calculator session
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    /// Number of decimal places results are rounded to
    pub precision: u32,
    /// Angle mode the session starts in
    pub angle_mode: AngleMode,
    /// The largest number `!` accepts
    pub max_factorial: u64,
}

pub const DEFAULT_PRECISION: u32 = 10;
pub const DEFAULT_MAX_FACTORIAL: u64 = 10_000;

/// Past 15 places an f64 has no significant digits left to show
pub const MAX_PRECISION: u32 = 15;
/// Keeps a single factorial step in the range of a second or so
pub const MAX_FACTORIAL_LIMIT: u64 = 50_000;

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            precision: DEFAULT_PRECISION,
            angle_mode: AngleMode::Degrees,
            max_factorial: DEFAULT_MAX_FACTORIAL,
        }
    }
}

impl Settings {
    /// Brings precision and the factorial cap into their supported ranges
    pub fn clamped(self) -> Settings {
        Settings {
            precision: self.precision.min(MAX_PRECISION),
            max_factorial: self.max_factorial.min(MAX_FACTORIAL_LIMIT),
            ..self
        }
    }
}
