//! Utility-style rule table
//!
//! The design-token utilities of the site, kept as plain immutable data:
//! exact class names mapping to declarations, and pattern rules whose
//! single capture is spliced into a value template. The CSS generator
//! that consumes these lives outside this crate; `resolve` is lookup
//! only.

use lazy_static::lazy_static;
use regex::Regex;

/// An exact class name and its declarations
#[derive(Debug, Clone, Copy)]
pub struct StaticRule {
    pub class: &'static str,
    pub declarations: &'static [(&'static str, &'static str)],
}

/// A class-name pattern; the first capture replaces `{}` in the template
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub pattern: &'static str,
    pub properties: &'static [&'static str],
    pub template: &'static str,
}

/// Exact-name utilities; these take precedence over patterns
pub const STATIC_RULES: &[StaticRule] = &[
    // Text color utilities backed by color tokens
    StaticRule { class: "text-base", declarations: &[("color", "var(--clr-text)")] },
    StaticRule { class: "text-strong", declarations: &[("color", "var(--clr-text-strong)")] },
    StaticRule { class: "text-fade", declarations: &[("color", "var(--clr-text-fade)")] },
    StaticRule { class: "text-disabled", declarations: &[("color", "var(--clr-text-disabled)")] },
    StaticRule { class: "text-accent", declarations: &[("color", "var(--clr-accent)")] },
    StaticRule { class: "text-accent-fade", declarations: &[("color", "var(--clr-accent-fade)")] },
    StaticRule { class: "text-inherit", declarations: &[("color", "inherit")] },
    StaticRule { class: "text-current", declarations: &[("color", "currentColor")] },
    // Border shortcuts for the most common cases
    StaticRule { class: "border", declarations: &[("border", "1px solid var(--clr-border)")] },
    StaticRule { class: "border-none", declarations: &[("border", "none")] },
];

/// Pattern utilities, matched in table order
pub const PATTERN_RULES: &[PatternRule] = &[
    // Font size steps: fs--1, fs-0, fs-2, ...
    PatternRule { pattern: r"^fs-(-?\d+)$", properties: &["font-size"], template: "var(--fs-{})" },
    // Margin utilities backed by spacing tokens
    PatternRule { pattern: r"^m-(.+)$", properties: &["margin"], template: "var(--space-{})" },
    PatternRule { pattern: r"^mx-(.+)$", properties: &["margin-left", "margin-right"], template: "var(--space-{})" },
    PatternRule { pattern: r"^my-(.+)$", properties: &["margin-top", "margin-bottom"], template: "var(--space-{})" },
    PatternRule { pattern: r"^mt-(.+)$", properties: &["margin-top"], template: "var(--space-{})" },
    PatternRule { pattern: r"^mr-(.+)$", properties: &["margin-right"], template: "var(--space-{})" },
    PatternRule { pattern: r"^mb-(.+)$", properties: &["margin-bottom"], template: "var(--space-{})" },
    PatternRule { pattern: r"^ml-(.+)$", properties: &["margin-left"], template: "var(--space-{})" },
    // Padding utilities
    PatternRule { pattern: r"^p-(.+)$", properties: &["padding"], template: "var(--space-{})" },
    PatternRule { pattern: r"^px-(.+)$", properties: &["padding-left", "padding-right"], template: "var(--space-{})" },
    PatternRule { pattern: r"^py-(.+)$", properties: &["padding-top", "padding-bottom"], template: "var(--space-{})" },
    PatternRule { pattern: r"^pt-(.+)$", properties: &["padding-top"], template: "var(--space-{})" },
    PatternRule { pattern: r"^pr-(.+)$", properties: &["padding-right"], template: "var(--space-{})" },
    PatternRule { pattern: r"^pb-(.+)$", properties: &["padding-bottom"], template: "var(--space-{})" },
    PatternRule { pattern: r"^pl-(.+)$", properties: &["padding-left"], template: "var(--space-{})" },
    // Gap and flow rhythm
    PatternRule { pattern: r"^gap-(.+)$", properties: &["gap"], template: "var(--space-{})" },
    PatternRule { pattern: r"^flow-(.+)$", properties: &["--flow-space"], template: "var(--space-{})" },
    // Borders with dynamic color tokens; sides before the catch-all
    PatternRule { pattern: r"^border-top-(.+)$", properties: &["border-top"], template: "1px solid var(--clr-{})" },
    PatternRule { pattern: r"^border-right-(.+)$", properties: &["border-right"], template: "1px solid var(--clr-{})" },
    PatternRule { pattern: r"^border-bottom-(.+)$", properties: &["border-bottom"], template: "1px solid var(--clr-{})" },
    PatternRule { pattern: r"^border-left-(.+)$", properties: &["border-left"], template: "1px solid var(--clr-{})" },
    PatternRule { pattern: r"^border-(.+)$", properties: &["border"], template: "1px solid var(--clr-{})" },
];

lazy_static! {
    static ref COMPILED: Vec<(Regex, &'static PatternRule)> = PATTERN_RULES
        .iter()
        .map(|rule| {
            let regex = Regex::new(rule.pattern).expect("static rule patterns are valid");
            (regex, rule)
        })
        .collect();
}

/// Resolve a class name to its CSS declarations
///
/// Exact classes win over patterns; patterns apply in table order, first
/// match wins. Unknown classes resolve to nothing.
pub fn resolve(class: &str) -> Option<Vec<(String, String)>> {
    if let Some(rule) = STATIC_RULES.iter().find(|r| r.class == class) {
        return Some(
            rule.declarations
                .iter()
                .map(|(prop, value)| (prop.to_string(), value.to_string()))
                .collect(),
        );
    }

    for (regex, rule) in COMPILED.iter() {
        if let Some(captures) = regex.captures(class) {
            let token = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            let value = rule.template.replace("{}", token);
            return Some(
                rule.properties
                    .iter()
                    .map(|prop| (prop.to_string(), value.clone()))
                    .collect(),
            );
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(class: &str) -> Vec<(String, String)> {
        resolve(class).unwrap_or_else(|| panic!("class `{}` did not resolve", class))
    }

    #[test]
    fn test_font_size_steps() {
        assert_eq!(
            decl("fs-2"),
            vec![("font-size".to_string(), "var(--fs-2)".to_string())]
        );
        assert_eq!(
            decl("fs--1"),
            vec![("font-size".to_string(), "var(--fs--1)".to_string())]
        );
        assert!(resolve("fs-big").is_none());
    }

    #[test]
    fn test_text_colors() {
        assert_eq!(
            decl("text-strong"),
            vec![("color".to_string(), "var(--clr-text-strong)".to_string())]
        );
        assert_eq!(
            decl("text-current"),
            vec![("color".to_string(), "currentColor".to_string())]
        );
    }

    #[test]
    fn test_axis_spacing() {
        assert_eq!(
            decl("mx-m"),
            vec![
                ("margin-left".to_string(), "var(--space-m)".to_string()),
                ("margin-right".to_string(), "var(--space-m)".to_string()),
            ]
        );
        assert_eq!(
            decl("py-s"),
            vec![
                ("padding-top".to_string(), "var(--space-s)".to_string()),
                ("padding-bottom".to_string(), "var(--space-s)".to_string()),
            ]
        );
    }

    #[test]
    fn test_border_sides_before_catch_all() {
        assert_eq!(
            decl("border-top-accent"),
            vec![("border-top".to_string(), "1px solid var(--clr-accent)".to_string())]
        );
        assert_eq!(
            decl("border-fade"),
            vec![("border".to_string(), "1px solid var(--clr-fade)".to_string())]
        );
    }

    #[test]
    fn test_border_shortcuts_win_over_pattern() {
        assert_eq!(
            decl("border"),
            vec![("border".to_string(), "1px solid var(--clr-border)".to_string())]
        );
        assert_eq!(
            decl("border-none"),
            vec![("border".to_string(), "none".to_string())]
        );
    }

    #[test]
    fn test_flow_rhythm() {
        assert_eq!(
            decl("flow-l"),
            vec![("--flow-space".to_string(), "var(--space-l)".to_string())]
        );
    }

    #[test]
    fn test_unknown_class() {
        assert!(resolve("btn-primary").is_none());
        assert!(resolve("").is_none());
    }
}
