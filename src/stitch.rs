// Stitch palette and the current selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stitch {
    Sc,
    Dc,
    Hdc,
}

impl Stitch {
    /// Palette order
    pub const ALL: [Stitch; 3] = [Stitch::Sc, Stitch::Dc, Stitch::Hdc];

    /// Short tag used in patterns
    pub fn tag(&self) -> &'static str {
        match self {
            Stitch::Sc => "sc",
            Stitch::Dc => "dc",
            Stitch::Hdc => "hdc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stitch::Sc => "Single Crochet",
            Stitch::Dc => "Double Crochet",
            Stitch::Hdc => "Half Double Crochet",
        }
    }

    /// Single character used by the text pattern format
    pub fn symbol(&self) -> char {
        match self {
            Stitch::Sc => 's',
            Stitch::Dc => 'd',
            Stitch::Hdc => 'h',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Stitch> {
        match symbol.to_ascii_lowercase() {
            's' => Some(Stitch::Sc),
            'd' => Some(Stitch::Dc),
            'h' => Some(Stitch::Hdc),
            _ => None,
        }
    }
}

impl fmt::Display for Stitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Stitch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sc" => Ok(Stitch::Sc),
            "dc" => Ok(Stitch::Dc),
            "hdc" => Ok(Stitch::Hdc),
            other => Err(format!("unknown stitch '{}'", other)),
        }
    }
}

/// The stitch that gets painted when a cell is clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StitchSelection {
    current: Stitch,
}

impl Default for StitchSelection {
    fn default() -> Self {
        Self {
            current: Stitch::Sc,
        }
    }
}

impl StitchSelection {
    pub fn current(&self) -> Stitch {
        self.current
    }

    pub fn select(&mut self, stitch: Stitch) {
        self.current = stitch;
    }

    pub fn is_selected(&self, stitch: Stitch) -> bool {
        self.current == stitch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!("sc".parse::<Stitch>(), Ok(Stitch::Sc));
        assert_eq!("DC".parse::<Stitch>(), Ok(Stitch::Dc));
        assert_eq!(" hdc ".parse::<Stitch>(), Ok(Stitch::Hdc));
        assert!("tr".parse::<Stitch>().is_err());
    }

    #[test]
    fn test_selection_defaults_to_single_crochet() {
        let mut selection = StitchSelection::default();
        assert_eq!(selection.current(), Stitch::Sc);

        selection.select(Stitch::Hdc);
        assert!(selection.is_selected(Stitch::Hdc));
        assert!(!selection.is_selected(Stitch::Sc));
    }

    #[test]
    fn test_symbols_map_back() {
        for stitch in Stitch::ALL {
            assert_eq!(Stitch::from_symbol(stitch.symbol()), Some(stitch));
        }
        assert_eq!(Stitch::from_symbol('.'), None);
    }
}
