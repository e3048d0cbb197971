//! Reference component table shown by the data viewer

use crate::error::Result;
use crate::units::{calculate_with_tolerance, parse_quantity, parse_value, ToleranceResult};
use serde::{Deserialize, Serialize};

/// One row of the reference table, kept as display text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub component: String,
    pub value: String,
    pub tolerance: String,
}

impl ReferenceRow {
    fn new(component: &str, value: &str, tolerance: &str) -> Self {
        Self {
            component: component.to_string(),
            value: value.to_string(),
            tolerance: tolerance.to_string(),
        }
    }

    /// Tolerance window of the nominal value, in the row's own unit
    pub fn window(&self) -> Result<(ToleranceResult, &str)> {
        let (value, unit) = parse_quantity(&self.value)?;
        let tolerance = parse_value(self.tolerance.trim_end_matches('%'))?;
        Ok((calculate_with_tolerance(value, tolerance), unit))
    }
}

pub fn reference_table() -> Vec<ReferenceRow> {
    vec![
        ReferenceRow::new("Capacitor", "10uF", "5%"),
        ReferenceRow::new("Resistor", "1kΩ", "1%"),
        ReferenceRow::new("Inductor", "10mH", "10%"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table_rows() {
        let table = reference_table();
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].component, "Capacitor");
        assert_eq!(table[1].value, "1kΩ");
        assert_eq!(table[2].tolerance, "10%");
    }

    #[test]
    fn test_reference_window() {
        let table = reference_table();
        let (window, unit) = table[0].window().unwrap();
        assert_eq!(unit, "uF");
        assert_eq!(window.bounds(), (9.5, 10.5));

        let (window, unit) = table[2].window().unwrap();
        assert_eq!(unit, "mH");
        assert_eq!(window.bounds(), (9.0, 11.0));
    }
}
