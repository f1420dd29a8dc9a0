//! Pre-publish validation for pages and themes.
//!
//! Validation is advisory: rendering never requires a valid page (unknown
//! nodes degrade to placeholders), but the builder runs these checks before
//! saving so tenants see problems while editing.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::components::Component;
use crate::error::RenderError;
use crate::page::Page;
use crate::style::StyleMap;
use crate::theme::{Theme, COMPONENT_CATEGORIES, TOKEN_CATEGORIES};

/// Maximum component tree depth accepted by the validator.
pub const MAX_NESTING_DEPTH: usize = 20;

/// CSS named colors accepted as literal color values.
const NAMED_COLORS: &[&str] = &[
    "transparent",
    "currentColor",
    "inherit",
    "black",
    "white",
    "red",
    "green",
    "blue",
    "yellow",
    "orange",
    "purple",
    "pink",
    "gray",
    "grey",
];

static HEX_COLOR: OnceLock<Regex> = OnceLock::new();
static HSL_COLOR: OnceLock<Regex> = OnceLock::new();
static THEME_REF: OnceLock<Regex> = OnceLock::new();

fn hex_color_regex() -> &'static Regex {
    HEX_COLOR.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap())
}

fn hsl_color_regex() -> &'static Regex {
    HSL_COLOR.get_or_init(|| {
        Regex::new(r"^hsla?\(\s*\d+(\.\d+)?\s*,\s*\d+(\.\d+)?%\s*,\s*\d+(\.\d+)?%\s*(,\s*[\d.]+\s*)?\)$")
            .unwrap()
    })
}

fn theme_ref_regex() -> &'static Regex {
    THEME_REF.get_or_init(|| {
        Regex::new(r"^\$theme\.[a-zA-Z][a-zA-Z0-9]*(\.[a-zA-Z0-9_-]+){1,2}$").unwrap()
    })
}

/// Validate a page tree. Returns every problem found, not just the first.
///
/// Unknown component kinds are NOT errors here: the renderer handles them
/// with a placeholder, and failing validation on them would brick pages
/// saved before a component type was retired.
pub fn validate_page(page: &Page) -> Vec<RenderError> {
    let mut errors = Vec::new();

    if page.is_empty() {
        errors.push(RenderError::EmptyPage);
        return errors;
    }

    let mut seen_ids = HashSet::new();
    for node in &page.nodes {
        validate_node(node, 1, &mut seen_ids, &mut errors);
    }
    errors
}

fn validate_node(
    node: &Component,
    depth: usize,
    seen_ids: &mut HashSet<String>,
    errors: &mut Vec<RenderError>,
) {
    if depth > MAX_NESTING_DEPTH {
        errors.push(RenderError::MaxNestingDepthExceeded {
            max_depth: MAX_NESTING_DEPTH,
        });
        return;
    }

    if let Some(id) = node.id() {
        if !seen_ids.insert(id.to_string()) {
            errors.push(RenderError::DuplicateId { id: id.to_string() });
        }
    }

    validate_content(node, errors);

    if let Some(styles) = node.styles() {
        validate_styles(node.kind(), styles, errors);
    }

    if let Some(children) = node.children() {
        for child in children {
            validate_node(child, depth + 1, seen_ids, errors);
        }
    }
}

fn validate_content(node: &Component, errors: &mut Vec<RenderError>) {
    match node {
        Component::Heading(c) => {
            if let Some(level) = c.content.level {
                if !(1..=6).contains(&level) {
                    errors.push(RenderError::ValueOutOfRange {
                        property: "level".to_string(),
                        value: level.to_string(),
                        range: "1-6".to_string(),
                    });
                }
            }
        }
        Component::Image(c) => {
            if c.content.src.trim().is_empty() {
                errors.push(RenderError::MissingProperty {
                    component: "image".to_string(),
                    property: "src".to_string(),
                });
            }
        }
        Component::Bento(c) => {
            if let Some(columns) = c.content.columns {
                if columns == 0 {
                    errors.push(RenderError::ValueOutOfRange {
                        property: "columns".to_string(),
                        value: "0".to_string(),
                        range: "1 or greater".to_string(),
                    });
                }
            }
        }
        Component::ProductGrid(c) => {
            if let Some(columns) = c.content.columns {
                if columns == 0 {
                    errors.push(RenderError::ValueOutOfRange {
                        property: "columns".to_string(),
                        value: "0".to_string(),
                        range: "1 or greater".to_string(),
                    });
                }
            }
        }
        Component::Banner(c) => {
            if let Some(opacity) = c.content.overlay_opacity {
                if !(0.0..=1.0).contains(&opacity) {
                    errors.push(RenderError::ValueOutOfRange {
                        property: "overlayOpacity".to_string(),
                        value: opacity.to_string(),
                        range: "0.0-1.0".to_string(),
                    });
                }
            }
        }
        Component::Spacer(c) => {
            if let Some(size) = c.content.size {
                if size < 0.0 {
                    errors.push(RenderError::ValueOutOfRange {
                        property: "size".to_string(),
                        value: size.to_string(),
                        range: "0 or greater".to_string(),
                    });
                }
            }
        }
        _ => {}
    }
}

/// Check a node's explicit style map: theme references must be well formed
/// and name a known token category, color-bearing properties must hold a
/// recognizable color.
fn validate_styles(kind: &str, styles: &StyleMap, errors: &mut Vec<RenderError>) {
    for (property, value) in styles {
        let raw = value.as_literal();

        if Theme::is_theme_reference(&raw) {
            if !theme_ref_regex().is_match(&raw) {
                errors.push(RenderError::InvalidThemeReference {
                    reference: raw.clone(),
                    reason: "malformed reference, expected $theme.<category>.<key>".to_string(),
                });
                continue;
            }
            let category = raw.split('.').nth(1).unwrap_or("");
            if !TOKEN_CATEGORIES.contains(&category) {
                errors.push(RenderError::InvalidThemeReference {
                    reference: raw.clone(),
                    reason: format!(
                        "unknown category '{}', expected one of: {}",
                        category,
                        TOKEN_CATEGORIES.join(", ")
                    ),
                });
            }
            continue;
        }

        if is_color_property(property) && !is_valid_color(&raw) {
            errors.push(RenderError::InvalidColor {
                value: raw.clone(),
                reason: format!(
                    "on '{}' of '{}': expected #rrggbb, hsl()/hsla(), a named color or a $theme reference",
                    property, kind
                ),
            });
        }
    }
}

fn is_color_property(property: &str) -> bool {
    property == "color" || property.ends_with("-color") || property.ends_with("Color")
}

fn is_valid_color(value: &str) -> bool {
    hex_color_regex().is_match(value)
        || hsl_color_regex().is_match(value)
        || NAMED_COLORS.contains(&value)
}

/// Validate a tenant theme before it is saved.
pub fn validate_theme(theme: &Theme) -> Vec<RenderError> {
    let mut errors = Vec::new();

    if let Some(colors) = &theme.colors {
        for (key, color) in colors {
            if !(0.0..=360.0).contains(&color.h) {
                errors.push(RenderError::ValueOutOfRange {
                    property: format!("colors.{}.h", key),
                    value: color.h.to_string(),
                    range: "0-360".to_string(),
                });
            }
            for (channel, v) in [("s", color.s), ("l", color.l)] {
                if !(0.0..=100.0).contains(&v) {
                    errors.push(RenderError::ValueOutOfRange {
                        property: format!("colors.{}.{}", key, channel),
                        value: v.to_string(),
                        range: "0-100".to_string(),
                    });
                }
            }
        }
    }

    // font values are the only string tokens and may alias another font token
    if let Some(fonts) = &theme.fonts {
        for (key, value) in fonts {
            if Theme::is_theme_reference(value)
                && (!theme_ref_regex().is_match(value)
                    || value.split('.').nth(1) != Some("fonts"))
            {
                errors.push(RenderError::InvalidThemeReference {
                    reference: value.clone(),
                    reason: format!(
                        "font token 'fonts.{}' may only alias another fonts token",
                        key
                    ),
                });
            }
        }
    }

    if let Some(spacing) = &theme.spacing {
        for (key, v) in spacing {
            if *v < 0.0 {
                errors.push(RenderError::ValueOutOfRange {
                    property: format!("spacing.{}", key),
                    value: v.to_string(),
                    range: "0 or greater".to_string(),
                });
            }
        }
    }

    if let Some(radius) = &theme.border_radius {
        for (key, v) in radius {
            if *v < 0.0 {
                errors.push(RenderError::ValueOutOfRange {
                    property: format!("borderRadius.{}", key),
                    value: v.to_string(),
                    range: "0 or greater".to_string(),
                });
            }
        }
    }

    if let Some(headings) = &theme.headings {
        for (key, style) in headings {
            if style.size <= 0.0 {
                errors.push(RenderError::ValueOutOfRange {
                    property: format!("headings.{}.size", key),
                    value: style.size.to_string(),
                    range: "greater than 0".to_string(),
                });
            }
            if !(100..=900).contains(&style.weight) || style.weight % 100 != 0 {
                errors.push(RenderError::ValueOutOfRange {
                    property: format!("headings.{}.weight", key),
                    value: style.weight.to_string(),
                    range: "100-900 in steps of 100".to_string(),
                });
            }
        }
    }

    if let Some(components) = &theme.components {
        for (kind, bundle) in components {
            if !COMPONENT_CATEGORIES.contains(&kind.as_str()) {
                errors.push(RenderError::InvalidComponent {
                    component: kind.clone(),
                    reason: format!(
                        "unknown component category, expected one of: {}",
                        COMPONENT_CATEGORIES.join(", ")
                    ),
                });
                continue;
            }
            validate_styles(kind, bundle, &mut errors);
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::parse_page;
    use crate::style::style_map;
    use crate::theme::{HeadingStyle, HslColor};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_page_passes() {
        let page = parse_page(
            r#"[
                {"id":"h1","type":"header","content":{"logoText":"Acme"}},
                {"id":"b1","type":"banner","content":{"children":[
                    {"id":"t1","type":"bannerTitle","content":{"text":"Hi"}}
                ]}}
            ]"#,
        )
        .unwrap();
        assert_eq!(validate_page(&page), vec![]);
    }

    #[test]
    fn test_empty_page_flagged() {
        let page = parse_page("[]").unwrap();
        let errors = validate_page(&page);
        assert!(matches!(errors[0], RenderError::EmptyPage));
    }

    #[test]
    fn test_duplicate_ids_detected_across_nesting() {
        let page = parse_page(
            r#"[
                {"id":"x","type":"text","content":{"text":"a"}},
                {"type":"bento","content":{"children":[
                    {"id":"x","type":"bentoCard","content":{}}
                ]}}
            ]"#,
        )
        .unwrap();
        let errors = validate_page(&page);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], RenderError::DuplicateId { id } if id == "x"));
    }

    #[test]
    fn test_heading_level_out_of_range() {
        let page = parse_page(r#"[{"type":"heading","content":{"text":"t","level":7}}]"#).unwrap();
        let errors = validate_page(&page);
        assert!(matches!(&errors[0], RenderError::ValueOutOfRange { property, .. } if property == "level"));
    }

    #[test]
    fn test_unknown_kind_is_not_an_error() {
        let page = parse_page(r#"[{"id":"m","type":"megaWidget","content":{}}]"#).unwrap();
        assert_eq!(validate_page(&page), vec![]);
    }

    #[test]
    fn test_nesting_depth_limit() {
        let mut json = String::new();
        for _ in 0..(MAX_NESTING_DEPTH + 1) {
            json.push_str(r#"[{"type":"bento","content":{"children":"#);
        }
        json.push_str("[]");
        for _ in 0..(MAX_NESTING_DEPTH + 1) {
            json.push_str("}}]");
        }
        let page = parse_page(&json).unwrap();
        let errors = validate_page(&page);
        assert!(errors
            .iter()
            .any(|e| matches!(e, RenderError::MaxNestingDepthExceeded { .. })));
    }

    #[test]
    fn test_bad_color_literal_rejected() {
        let page = parse_page(
            r##"[{"type":"text","content":{"text":"t"},"styles":{"color":"#zzz"}}]"##,
        )
        .unwrap();
        let errors = validate_page(&page);
        assert!(matches!(&errors[0], RenderError::InvalidColor { .. }));
    }

    #[test]
    fn test_color_forms_accepted() {
        for value in ["#ff0000", "hsl(220, 90%, 56%)", "hsla(0, 0%, 0%, 0.5)", "white"] {
            let styles = style_map(&[("color", value)]);
            let mut errors = Vec::new();
            validate_styles("text", &styles, &mut errors);
            assert_eq!(errors, vec![], "rejected {}", value);
        }
    }

    #[test]
    fn test_theme_reference_category_checked() {
        let styles = style_map(&[("color", "$theme.palette.primary")]);
        let mut errors = Vec::new();
        validate_styles("text", &styles, &mut errors);
        assert!(matches!(&errors[0], RenderError::InvalidThemeReference { .. }));

        let styles = style_map(&[("color", "$theme.colors.primary")]);
        let mut errors = Vec::new();
        validate_styles("text", &styles, &mut errors);
        assert_eq!(errors, vec![]);
    }

    #[test]
    fn test_theme_hsl_ranges() {
        let theme = Theme {
            colors: Some(
                [("primary".to_string(), HslColor::new(400.0, 50.0, 50.0))]
                    .into_iter()
                    .collect(),
            ),
            ..Theme::new()
        };
        let errors = validate_theme(&theme);
        assert!(matches!(&errors[0], RenderError::ValueOutOfRange { property, .. } if property == "colors.primary.h"));
    }

    #[test]
    fn test_theme_font_alias_forms() {
        // aliasing another fonts token is fine
        let theme = Theme {
            fonts: Some(
                [("heading_font".to_string(), "$theme.fonts.body_font".to_string())]
                    .into_iter()
                    .collect(),
            ),
            ..Theme::new()
        };
        assert_eq!(validate_theme(&theme), vec![]);

        // pointing a font token at a non-font category is not
        let theme = Theme {
            fonts: Some(
                [("heading_font".to_string(), "$theme.colors.primary".to_string())]
                    .into_iter()
                    .collect(),
            ),
            ..Theme::new()
        };
        let errors = validate_theme(&theme);
        assert!(matches!(&errors[0], RenderError::InvalidThemeReference { .. }));
    }

    #[test]
    fn test_theme_weight_steps() {
        let theme = Theme {
            headings: Some(
                [("h1".to_string(), HeadingStyle { size: 40.0, weight: 450 })]
                    .into_iter()
                    .collect(),
            ),
            ..Theme::new()
        };
        let errors = validate_theme(&theme);
        assert!(matches!(&errors[0], RenderError::ValueOutOfRange { property, .. } if property == "headings.h1.weight"));
    }

    #[test]
    fn test_theme_unknown_bundle_kind() {
        let theme = Theme {
            components: Some(
                [("sidebar".to_string(), style_map(&[("padding", "8px")]))]
                    .into_iter()
                    .collect(),
            ),
            ..Theme::new()
        };
        let errors = validate_theme(&theme);
        assert!(matches!(&errors[0], RenderError::InvalidComponent { component, .. } if component == "sidebar"));
    }
}
