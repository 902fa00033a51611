use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Represents a chemical element assigned to a particle.
///
/// The dynamics-engine topology schema requires every particle to carry an
/// element, even when the particles are abstract samplers with no chemistry.
/// This enum covers the handful of elements that appear in practice; the
/// conventional placeholder for non-interacting sampling particles is
/// [`Element::Argon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Element {
    /// Hydrogen (H).
    Hydrogen,
    /// Carbon (C).
    Carbon,
    /// Nitrogen (N).
    Nitrogen,
    /// Oxygen (O).
    Oxygen,
    /// Argon (Ar), the inert placeholder for sampling particles.
    #[default]
    Argon,
}

impl Element {
    /// Returns the one- or two-letter element symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::Hydrogen => "H",
            Element::Carbon => "C",
            Element::Nitrogen => "N",
            Element::Oxygen => "O",
            Element::Argon => "Ar",
        }
    }

    /// Returns the standard atomic mass in unified atomic mass units.
    ///
    /// This is bookkeeping only: the mass used for integration comes from
    /// the simulation configuration, not from the element.
    pub fn standard_mass(&self) -> f64 {
        match self {
            Element::Hydrogen => 1.008,
            Element::Carbon => 12.011,
            Element::Nitrogen => 14.007,
            Element::Oxygen => 15.999,
            Element::Argon => 39.948,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown element symbol: {0}")]
pub struct ParseElementError(String);

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h" | "hydrogen" => Ok(Element::Hydrogen),
            "c" | "carbon" => Ok(Element::Carbon),
            "n" | "nitrogen" => Ok(Element::Nitrogen),
            "o" | "oxygen" => Ok(Element::Oxygen),
            "ar" | "argon" => Ok(Element::Argon),
            other => Err(ParseElementError(other.to_string())),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argon_is_the_default_placeholder() {
        assert_eq!(Element::default(), Element::Argon);
        assert_eq!(Element::default().symbol(), "Ar");
    }

    #[test]
    fn parsing_accepts_symbols_and_names_case_insensitively() {
        assert_eq!("Ar".parse::<Element>().unwrap(), Element::Argon);
        assert_eq!("argon".parse::<Element>().unwrap(), Element::Argon);
        assert_eq!("C".parse::<Element>().unwrap(), Element::Carbon);
        assert_eq!("oxygen".parse::<Element>().unwrap(), Element::Oxygen);
    }

    #[test]
    fn parsing_rejects_unknown_symbols() {
        assert!("Xx".parse::<Element>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for element in [
            Element::Hydrogen,
            Element::Carbon,
            Element::Nitrogen,
            Element::Oxygen,
            Element::Argon,
        ] {
            let parsed: Element = element.to_string().parse().unwrap();
            assert_eq!(parsed, element);
        }
    }
}
