//! Unit conversion and tolerance windows through the public API

use lcr_pro::lcr_common::{
    calculate_with_tolerance, convert, parse_quantity, reference_table, units_for, ComponentClass,
    Error,
};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn test_convert_then_window() {
    let nf = convert(10.0, "uF", "nF").unwrap();
    assert!(approx_eq(nf, 10000.0));

    let window = calculate_with_tolerance(nf, 5.0);
    assert!(approx_eq(window.min, 9500.0));
    assert!(approx_eq(window.max, 10500.0));
    assert!(window.contains(9800.0));
    assert!(!window.contains(10600.0));
}

#[test]
fn test_parse_quantity_feeds_convert() {
    let (value, unit) = parse_quantity("4.7kΩ").unwrap();
    assert!(approx_eq(convert(value, unit, "Ω").unwrap(), 4700.0));
}

#[test]
fn test_unknown_unit() {
    assert!(matches!(convert(1.0, "uF", "furlong"), Err(Error::UnknownUnit(_))));
}

#[test]
fn test_unit_lists_follow_display_order() {
    assert_eq!(units_for(ComponentClass::Capacitor), &["F", "mF", "µF", "uF", "nF", "pF"]);
    assert_eq!(units_for(ComponentClass::Resistor), &["Ω", "ohm", "mΩ", "kΩ", "MΩ"]);
    assert_eq!(units_for(ComponentClass::Inductor), &["H", "mH", "µH", "uH", "nH", "kH"]);
}

#[test]
fn test_reference_rows_have_windows() {
    for row in reference_table() {
        let (window, _) = row.window().unwrap();
        assert!(window.min <= window.max, "{}", row.component);
    }
}
