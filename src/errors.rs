use std::fmt;

/// Message shown when the calculator inputs cannot be used
pub const VALIDATION_MESSAGE: &str = "Please enter valid numbers for size and gauge.";

/// Errors raised by the workbench and its components
#[derive(Debug)]
pub enum StitchError {
    /// Size or gauge missing, non-numeric or not positive
    InvalidInput { field: &'static str, value: String },
    /// Cell coordinates outside the pattern grid
    InvalidCoordinates {
        row: usize,
        col: usize,
        max_row: usize,
        max_col: usize,
    },
    /// Cell index outside the pattern grid
    InvalidCellIndex { index: usize, cell_count: usize },
    /// Card index outside the deck
    InvalidCard { index: usize, card_count: usize },
    /// Configuration errors
    ConfigError(String),
    /// Terminal setup or drawing failures
    TerminalError(String),
}

impl fmt::Display for StitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StitchError::InvalidInput { .. } => write!(f, "{}", VALIDATION_MESSAGE),
            StitchError::InvalidCoordinates {
                row,
                col,
                max_row,
                max_col,
            } => {
                write!(
                    f,
                    "Invalid grid coordinates ({}, {}) - grid size is {}x{}",
                    row, col, max_row, max_col
                )
            }
            StitchError::InvalidCellIndex { index, cell_count } => {
                write!(f, "Invalid cell index {} - grid has {} cells", index, cell_count)
            }
            StitchError::InvalidCard { index, card_count } => {
                write!(f, "Invalid card {} - deck has {} cards", index, card_count)
            }
            StitchError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            StitchError::TerminalError(msg) => write!(f, "Terminal error: {}", msg),
        }
    }
}

impl std::error::Error for StitchError {}

impl From<std::io::Error> for StitchError {
    fn from(err: std::io::Error) -> Self {
        StitchError::TerminalError(err.to_string())
    }
}

impl From<serde_json::Error> for StitchError {
    fn from(err: serde_json::Error) -> Self {
        StitchError::ConfigError(err.to_string())
    }
}

/// Result type alias for workbench operations
pub type StitchResult<T> = Result<T, StitchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = StitchError::InvalidCoordinates {
            row: 11,
            col: 3,
            max_row: 10,
            max_col: 10,
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid grid coordinates"));
        assert!(display.contains("(11, 3)"));
        assert!(display.contains("10x10"));
    }

    #[test]
    fn test_invalid_input_shows_validation_message() {
        let error = StitchError::InvalidInput {
            field: "size",
            value: "abc".to_string(),
        };
        assert_eq!(error.to_string(), VALIDATION_MESSAGE);
    }
}
