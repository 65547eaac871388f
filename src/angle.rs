use std::fmt;

/// Unit the trigonometric functions read and produce
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    pub fn toggled(self) -> Self {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Degrees,
        }
    }

    /// Converts a user angle into radians before calling `sin`, `cos` or `tan`
    pub fn to_internal(self, value: f64) -> f64 {
        match self {
            AngleMode::Degrees => value.to_radians(),
            AngleMode::Radians => value,
        }
    }

    /// Converts the radians returned by `asin`, `acos` or `atan` into the user unit
    pub fn from_internal(self, value: f64) -> f64 {
        match self {
            AngleMode::Degrees => value.to_degrees(),
            AngleMode::Radians => value,
        }
    }

    /// The same angle in degrees whatever the mode is
    pub fn as_degrees(self, value: f64) -> f64 {
        match self {
            AngleMode::Degrees => value,
            AngleMode::Radians => value.to_degrees(),
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AngleMode::Degrees => write!(f, "degrees"),
            AngleMode::Radians => write!(f, "radians"),
        }
    }
}
