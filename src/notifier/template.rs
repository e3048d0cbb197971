//! `{name}` placeholder substitution

use regex::{Captures, Regex};

lazy_static::lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
}

/// Replace every known `{name}` with its value. Unknown placeholders stay as written.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            values
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Placeholder names used in a template, in order of first use
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let name = caps[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_known_placeholders() {
        let out = render(
            "Material: {material} / Line: {line}",
            &[("material", "100-2001"), ("line", "L3")],
        );
        assert_eq!(out, "Material: 100-2001 / Line: L3");
    }

    #[test]
    fn test_render_repeated_and_unknown() {
        let out = render("{a}{a} {unknown} {not closed", &[("a", "x")]);
        assert_eq!(out, "xx {unknown} {not closed");
    }

    #[test]
    fn test_render_value_with_braces_not_reexpanded() {
        let out = render("{a} {b}", &[("a", "{b}"), ("b", "B")]);
        assert_eq!(out, "{b} B");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            placeholders("{material} {line} {material} {x_1}"),
            vec!["material", "line", "x_1"]
        );
        assert!(placeholders("no placeholders").is_empty());
    }
}
