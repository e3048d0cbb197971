//! Unit and tolerance engine
//!
//! Each component class has a fixed, ordered set of unit symbols. Every
//! symbol maps to a multiplier relative to the class base unit (F, Ω, H),
//! so a conversion is `value * factor(from) / factor(to)`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Passive component class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComponentClass {
    #[default]
    Capacitor,
    Resistor,
    Inductor,
}

const CAPACITOR_UNITS: &[&str] = &["F", "mF", "µF", "uF", "nF", "pF"];
const RESISTOR_UNITS: &[&str] = &["Ω", "ohm", "mΩ", "kΩ", "MΩ"];
const INDUCTOR_UNITS: &[&str] = &["H", "mH", "µH", "uH", "nH", "kH"];

/// Multiplier of every recognized symbol, relative to its class base unit
const UNIT_FACTORS: &[(&str, f64)] = &[
    ("F", 1.0),
    ("mF", 1e-3),
    ("µF", 1e-6),
    ("uF", 1e-6),
    ("nF", 1e-9),
    ("pF", 1e-12),
    ("Ω", 1.0),
    ("ohm", 1.0),
    ("mΩ", 1e-3),
    ("kΩ", 1e3),
    ("MΩ", 1e6),
    ("H", 1.0),
    ("mH", 1e-3),
    ("µH", 1e-6),
    ("uH", 1e-6),
    ("nH", 1e-9),
    ("kH", 1e3),
];

impl ComponentClass {
    pub const ALL: [ComponentClass; 3] = [
        ComponentClass::Capacitor,
        ComponentClass::Resistor,
        ComponentClass::Inductor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ComponentClass::Capacitor => "Capacitor",
            ComponentClass::Resistor => "Resistor",
            ComponentClass::Inductor => "Inductor",
        }
    }

    /// Unit symbols in display order (not magnitude order)
    pub fn units(&self) -> &'static [&'static str] {
        match self {
            ComponentClass::Capacitor => CAPACITOR_UNITS,
            ComponentClass::Resistor => RESISTOR_UNITS,
            ComponentClass::Inductor => INDUCTOR_UNITS,
        }
    }

    pub fn base_unit(&self) -> &'static str {
        self.units()[0]
    }

    pub fn has_unit(&self, unit: &str) -> bool {
        self.units().contains(&unit)
    }

    /// Class owning a unit symbol, if any
    pub fn of_unit(unit: &str) -> Option<ComponentClass> {
        Self::ALL.into_iter().find(|class| class.has_unit(unit))
    }

    /// `UnknownUnit` unless `unit` is one of this class's symbols
    pub fn check_unit(&self, unit: &str) -> Result<()> {
        if self.has_unit(unit) {
            Ok(())
        } else {
            Err(Error::UnknownUnit(format!(
                "{} (not a {} unit)",
                unit,
                self.name().to_lowercase()
            )))
        }
    }

    /// Convert between two units of this class
    pub fn convert(&self, value: f64, from_unit: &str, to_unit: &str) -> Result<f64> {
        self.check_unit(from_unit)?;
        self.check_unit(to_unit)?;
        convert(value, from_unit, to_unit)
    }
}

impl fmt::Display for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ComponentClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "capacitor" | "cap" | "c" => Ok(ComponentClass::Capacitor),
            "resistor" | "res" | "r" => Ok(ComponentClass::Resistor),
            "inductor" | "ind" | "l" => Ok(ComponentClass::Inductor),
            _ => Err(Error::UnknownComponentClass(s.to_string())),
        }
    }
}

/// Unit symbols for a class, in display order
pub fn units_for(class: ComponentClass) -> &'static [&'static str] {
    class.units()
}

/// Multiplier for a unit symbol
pub fn unit_factor(unit: &str) -> Result<f64> {
    UNIT_FACTORS
        .iter()
        .find(|(symbol, _)| *symbol == unit)
        .map(|(_, factor)| *factor)
        .ok_or_else(|| Error::UnknownUnit(unit.to_string()))
}

/// Convert a value between two unit symbols.
///
/// Symbols from different classes are not rejected here; the caller decides
/// which units are offered for a class.
pub fn convert(value: f64, from_unit: &str, to_unit: &str) -> Result<f64> {
    let from = unit_factor(from_unit)?;
    let to = unit_factor(to_unit)?;
    if from_unit == to_unit {
        return Ok(value);
    }
    Ok(value * from / to)
}

/// Nominal value with its tolerance window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceResult {
    pub value: f64,
    pub tolerance_percent: f64,
    pub min: f64,
    pub max: f64,
}

impl ToleranceResult {
    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Whether a measured value lies inside the window.
    ///
    /// A negative tolerance swaps the bounds, so both orders are accepted.
    pub fn contains(&self, measured: f64) -> bool {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        measured >= lo && measured <= hi
    }
}

/// min = v - v*t/100, max = v + v*t/100
pub fn calculate_with_tolerance(value: f64, tolerance_percent: f64) -> ToleranceResult {
    let delta = value * tolerance_percent / 100.0;
    ToleranceResult {
        value,
        tolerance_percent,
        min: value - delta,
        max: value + delta,
    }
}

/// Scientific notation with a signed, two-digit exponent (`1.00e+04`)
pub fn format_scientific(value: f64, precision: usize) -> String {
    let text = format!("{:.*e}", precision, value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => text,
        },
        None => text,
    }
}

/// Parse a numeric input field
pub fn parse_value(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::InvalidInput(format!(
            "'{}' is not a valid number",
            text
        ))),
    }
}

/// Split a quantity such as `10uF` or `1 kΩ` into value and unit symbol
pub fn parse_quantity(text: &str) -> Result<(f64, &str)> {
    let trimmed = text.trim();
    let split = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '.' | '+' | '-')))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    let (number, unit) = trimmed.split_at(split);
    let value = parse_value(number)?;
    let unit = unit.trim();
    unit_factor(unit)?;
    Ok((value, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        let scale = a.abs().max(b.abs()).max(1e-300);
        ((a - b) / scale).abs() < 1e-9
    }

    #[test]
    fn test_units_for_display_order() {
        assert_eq!(
            units_for(ComponentClass::Capacitor),
            &["F", "mF", "µF", "uF", "nF", "pF"]
        );
        assert_eq!(
            units_for(ComponentClass::Resistor),
            &["Ω", "ohm", "mΩ", "kΩ", "MΩ"]
        );
        assert_eq!(
            units_for(ComponentClass::Inductor),
            &["H", "mH", "µH", "uH", "nH", "kH"]
        );
    }

    #[test]
    fn test_every_listed_unit_has_factor() {
        for class in ComponentClass::ALL {
            for unit in class.units() {
                assert!(unit_factor(unit).is_ok(), "{} has no factor", unit);
            }
        }
    }

    #[test]
    fn test_convert_uf_to_nf() {
        let converted = convert(10.0, "uF", "nF").unwrap();
        assert!(approx_eq(converted, 10000.0));
    }

    #[test]
    fn test_convert_micro_sign_alias() {
        let a = convert(4.7, "µF", "pF").unwrap();
        let b = convert(4.7, "uF", "pF").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_convert_identity() {
        for class in ComponentClass::ALL {
            for unit in class.units() {
                assert_eq!(convert(123.456, unit, unit).unwrap(), 123.456);
            }
        }
    }

    #[test]
    fn test_convert_transitive_within_class() {
        for class in ComponentClass::ALL {
            let units = class.units();
            for u1 in units {
                for u2 in units {
                    for u3 in units {
                        let stepped = convert(convert(2.5, u1, u2).unwrap(), u2, u3).unwrap();
                        let direct = convert(2.5, u1, u3).unwrap();
                        assert!(approx_eq(stepped, direct), "{} -> {} -> {}", u1, u2, u3);
                    }
                }
            }
        }
    }

    #[test]
    fn test_convert_unknown_unit() {
        assert_eq!(
            convert(1.0, "qF", "F"),
            Err(Error::UnknownUnit("qF".to_string()))
        );
        assert_eq!(
            convert(1.0, "F", "Hz"),
            Err(Error::UnknownUnit("Hz".to_string()))
        );
    }

    #[test]
    fn test_convert_across_classes_is_not_rejected() {
        assert!(approx_eq(convert(1.0, "kΩ", "mH").unwrap(), 1e6));
    }

    #[test]
    fn test_tolerance_window() {
        let result = calculate_with_tolerance(10000.0, 5.0);
        assert_eq!(result.bounds(), (9500.0, 10500.0));
        assert!(result.contains(10000.0));
        assert!(!result.contains(10600.0));
    }

    #[test]
    fn test_tolerance_symmetric_around_value() {
        for &(v, t) in &[(1.0, 0.0), (47.0, 10.0), (0.1, 1.0), (-5.0, 20.0), (330.0, 100.0)] {
            let result = calculate_with_tolerance(v, t);
            assert!(approx_eq(result.min + result.max, 2.0 * v));
            if v >= 0.0 {
                assert!(result.min <= v && v <= result.max);
            }
        }
    }

    #[test]
    fn test_negative_tolerance_swaps_bounds() {
        let result = calculate_with_tolerance(100.0, -10.0);
        assert_eq!(result.bounds(), (110.0, 90.0));
        assert!(result.contains(95.0));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(" 10.5 ").unwrap(), 10.5);
        assert_eq!(parse_value("-3").unwrap(), -3.0);
        assert!(matches!(parse_value("abc"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_value(""), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_value("inf"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("10uF").unwrap(), (10.0, "uF"));
        assert_eq!(parse_quantity("1 kΩ").unwrap(), (1.0, "kΩ"));
        assert_eq!(parse_quantity("10mH").unwrap(), (10.0, "mH"));
        assert!(matches!(parse_quantity("10xx"), Err(Error::UnknownUnit(_))));
        assert!(matches!(parse_quantity("uF"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_component_class_from_str() {
        assert_eq!("Capacitor".parse::<ComponentClass>().unwrap(), ComponentClass::Capacitor);
        assert_eq!("res".parse::<ComponentClass>().unwrap(), ComponentClass::Resistor);
        assert_eq!("L".parse::<ComponentClass>().unwrap(), ComponentClass::Inductor);
        assert!("diode".parse::<ComponentClass>().is_err());
    }

    #[test]
    fn test_of_unit() {
        assert_eq!(ComponentClass::of_unit("pF"), Some(ComponentClass::Capacitor));
        assert_eq!(ComponentClass::of_unit("ohm"), Some(ComponentClass::Resistor));
        assert_eq!(ComponentClass::of_unit("kH"), Some(ComponentClass::Inductor));
        assert_eq!(ComponentClass::of_unit("V"), None);
    }

    #[test]
    fn test_class_convert_within_class() {
        let nf = ComponentClass::Capacitor.convert(10.0, "uF", "nF").unwrap();
        assert!(approx_eq(nf, 10000.0));
        let ohms = ComponentClass::Resistor.convert(4.7, "kΩ", "ohm").unwrap();
        assert!(approx_eq(ohms, 4700.0));
    }

    #[test]
    fn test_class_convert_rejects_foreign_units() {
        let result = ComponentClass::Capacitor.convert(1.0, "kΩ", "mH");
        assert!(matches!(result, Err(Error::UnknownUnit(u)) if u.starts_with("kΩ")));

        let result = ComponentClass::Inductor.convert(1.0, "mH", "uF");
        assert!(matches!(result, Err(Error::UnknownUnit(u)) if u.starts_with("uF")));

        assert!(ComponentClass::Resistor.check_unit("MΩ").is_ok());
        assert!(ComponentClass::Resistor.check_unit("bogus").is_err());
    }

    #[test]
    fn test_format_scientific_signed_exponent() {
        assert_eq!(format_scientific(10000.0, 2), "1.00e+04");
        assert_eq!(format_scientific(0.000047, 2), "4.70e-05");
        assert_eq!(format_scientific(1.0, 2), "1.00e+00");
        assert_eq!(format_scientific(-2.5e120, 1), "-2.5e+120");
    }
}
