// Yarn Estimator - approximate yardage from project type, size and gauge

use crate::errors::{StitchError, StitchResult};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

const SCARF_FACTOR: f64 = 0.2;
const HAT_FACTOR: f64 = 0.1;
const BLANKET_FACTOR: f64 = 0.05;

pub const GENERIC_MESSAGE: &str = "Calculation completed.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectType {
    Scarf,
    Hat,
    Blanket,
    Other(String),
}

impl ProjectType {
    pub const KNOWN: [ProjectType; 3] = [ProjectType::Scarf, ProjectType::Hat, ProjectType::Blanket];

    pub fn parse(name: &str) -> ProjectType {
        match name {
            "scarf" => ProjectType::Scarf,
            "hat" => ProjectType::Hat,
            "blanket" => ProjectType::Blanket,
            other => ProjectType::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ProjectType::Scarf => "scarf",
            ProjectType::Hat => "hat",
            ProjectType::Blanket => "blanket",
            ProjectType::Other(name) => name,
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A finished estimate and the message to show for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YarnEstimate {
    pub project: ProjectType,
    pub size: u64,
    pub gauge: u64,
    pub yards: u64,
    pub message: String,
}

/// Estimated yards of yarn, rounded to the nearest whole yard.
/// Unrecognised projects need zero yards.
pub fn yarn_needed(project: &ProjectType, size: u64, gauge: u64) -> u64 {
    let size = size as f64;
    let gauge = gauge as f64;

    let yards = match project {
        ProjectType::Scarf => size * gauge * SCARF_FACTOR,
        ProjectType::Hat => PI * (size / 4.0).powi(2) * gauge * HAT_FACTOR,
        ProjectType::Blanket => size * size * gauge * BLANKET_FACTOR,
        ProjectType::Other(_) => 0.0,
    };

    yards.round() as u64
}

pub fn result_message(project: &ProjectType, yards: u64) -> String {
    match project {
        ProjectType::Scarf => format!(
            "You'll need approximately {} yards of yarn for your scarf.",
            yards
        ),
        ProjectType::Hat => format!("Your hat will require about {} yards of yarn.", yards),
        ProjectType::Blanket => format!(
            "Plan for around {} yards of yarn for your blanket.",
            yards
        ),
        ProjectType::Other(_) => GENERIC_MESSAGE.to_string(),
    }
}

/// Parse a leading integer the way a form field is read: surrounding
/// whitespace and anything after the digits are ignored.
fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Saturate rather than fail on absurdly long inputs
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Read a size or gauge field. Missing, non-numeric and non-positive values are rejected.
pub fn parse_dimension(field: &'static str, text: &str) -> StitchResult<u64> {
    match parse_leading_int(text) {
        Some(value) if value > 0 => Ok(value.unsigned_abs()),
        _ => Err(StitchError::InvalidInput {
            field,
            value: text.to_string(),
        }),
    }
}

/// Validate the raw form inputs and produce an estimate
pub fn calculate_yarn(project: &str, size: &str, gauge: &str) -> StitchResult<YarnEstimate> {
    let parsed = parse_dimension("size", size).and_then(|size| {
        parse_dimension("gauge", gauge).map(|gauge| (size, gauge))
    });

    let (size, gauge) = match parsed {
        Ok(values) => values,
        Err(err) => {
            warn!("⚠️ Rejected yarn calculation input: {:?}", err);
            return Err(err);
        }
    };

    let project = ProjectType::parse(project);
    let yards = yarn_needed(&project, size, gauge);
    let message = result_message(&project, yards);
    debug!(
        "🧮 {} size={} gauge={} -> {} yards",
        project, size, gauge, yards
    );

    Ok(YarnEstimate {
        project,
        size,
        gauge,
        yards,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_int_parsing() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  7 "), Some(7));
        assert_eq!(parse_leading_int("12cm"), Some(12));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+9"), Some(9));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn test_parse_dimension_rejects_non_positive() {
        assert!(parse_dimension("size", "0").is_err());
        assert!(parse_dimension("gauge", "-1").is_err());
        assert_eq!(parse_dimension("size", "15").unwrap(), 15);
        assert_eq!(parse_dimension("size", "5000000000").unwrap(), 5_000_000_000);
    }

    #[test]
    fn test_hat_uses_circle_area() {
        // pi * (8/4)^2 * 4 * 0.1 = 5.0265...
        assert_eq!(yarn_needed(&ProjectType::Hat, 8, 4), 5);
        // pi * 5^2 * 5 * 0.1 = 39.27...
        assert_eq!(yarn_needed(&ProjectType::Hat, 20, 5), 39);
    }

    #[test]
    fn test_project_names_are_case_sensitive() {
        assert_eq!(ProjectType::parse("scarf"), ProjectType::Scarf);
        assert_eq!(
            ProjectType::parse("Scarf"),
            ProjectType::Other("Scarf".to_string())
        );
    }
}
