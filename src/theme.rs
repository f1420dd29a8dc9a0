use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::style::{style_map, StyleMap};

/// A color token as a hue-saturation-lightness triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HslColor {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl HslColor {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Render as a concrete CSS color value.
    pub fn to_css(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            trim_num(self.h),
            trim_num(self.s),
            trim_num(self.l)
        )
    }
}

/// Per-heading-level typography tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingStyle {
    /// Font size in pixels.
    pub size: f64,
    /// CSS font weight (100-900).
    pub weight: u16,
}

/// Site-wide design tokens a storefront theme provides.
///
/// Every category is optional on the wire: tenants override only what they
/// customized. [`Theme::with_defaults`] merges a partial theme onto the
/// built-in default theme so that every recognized token is populated before
/// rendering starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<HashMap<String, HslColor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonts: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<HashMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "borderRadius")]
    pub border_radius: Option<HashMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headings: Option<HashMap<String, HeadingStyle>>,
    /// Per-component-category default style bundles, keyed by category name
    /// (e.g. `"header"`, `"checkout"`, `"announcement-bar"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<HashMap<String, StyleMap>>,
}

/// Component categories that carry a built-in default style bundle.
pub const COMPONENT_CATEGORIES: &[&str] = &[
    "announcement-bar",
    "header",
    "footer",
    "banner",
    "bento",
    "carousel",
    "product-grid",
    "checkout",
    "auth",
    "contact-form",
];

/// Theme token categories addressable through `$theme.` references.
pub const TOKEN_CATEGORIES: &[&str] = &["colors", "fonts", "spacing", "borderRadius", "headings"];

impl Theme {
    /// Create a new empty theme
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a string is a theme variable reference
    pub fn is_theme_reference(value: &str) -> bool {
        value.starts_with("$theme.")
    }

    /// Resolve a theme variable reference (e.g. `"$theme.colors.primary"`).
    ///
    /// Supports two-segment paths for flat categories and three segments for
    /// heading typography (`"$theme.headings.h2.size"`). Returns `None` for
    /// malformed references or missing tokens; callers fall back from there.
    pub fn resolve(&self, reference: &str) -> Option<String> {
        if !Self::is_theme_reference(reference) {
            return None;
        }

        let parts: Vec<&str> = reference.trim_start_matches("$theme.").split('.').collect();

        match parts.as_slice() {
            ["colors", key] => self
                .colors
                .as_ref()
                .and_then(|c| c.get(*key))
                .map(|v| v.to_css()),
            ["fonts", key] => self.fonts.as_ref().and_then(|f| f.get(*key)).cloned(),
            ["spacing", key] => self
                .spacing
                .as_ref()
                .and_then(|s| s.get(*key))
                .map(|v| format!("{}px", trim_num(*v))),
            ["borderRadius", key] => self
                .border_radius
                .as_ref()
                .and_then(|b| b.get(*key))
                .map(|v| format!("{}px", trim_num(*v))),
            ["headings", level, field] => {
                let h = self.headings.as_ref().and_then(|m| m.get(*level))?;
                match *field {
                    "size" => Some(format!("{}px", trim_num(h.size))),
                    "weight" => Some(h.weight.to_string()),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Merge a possibly-partial theme onto the built-in default theme.
    ///
    /// The result has every recognized token populated; tokens absent from
    /// `overrides` keep their defaults. There is no error case.
    pub fn with_defaults(overrides: &Theme) -> Theme {
        let mut theme = Theme::default_theme();

        if let Some(colors) = &overrides.colors {
            theme
                .colors
                .get_or_insert_with(HashMap::new)
                .extend(colors.iter().map(|(k, v)| (k.clone(), *v)));
        }
        if let Some(fonts) = &overrides.fonts {
            theme
                .fonts
                .get_or_insert_with(HashMap::new)
                .extend(fonts.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        if let Some(spacing) = &overrides.spacing {
            theme
                .spacing
                .get_or_insert_with(HashMap::new)
                .extend(spacing.iter().map(|(k, v)| (k.clone(), *v)));
        }
        if let Some(radius) = &overrides.border_radius {
            theme
                .border_radius
                .get_or_insert_with(HashMap::new)
                .extend(radius.iter().map(|(k, v)| (k.clone(), *v)));
        }
        if let Some(headings) = &overrides.headings {
            theme
                .headings
                .get_or_insert_with(HashMap::new)
                .extend(headings.iter().map(|(k, v)| (k.clone(), *v)));
        }
        if let Some(components) = &overrides.components {
            let bundles = theme.components.get_or_insert_with(HashMap::new);
            for (kind, overrides) in components {
                bundles
                    .entry(kind.clone())
                    .or_default()
                    .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }

        theme
    }

    /// The built-in total theme: every token category fully populated with
    /// concrete literals. Tenant themes are merged on top of this.
    pub fn default_theme() -> Theme {
        let mut colors = HashMap::new();
        colors.insert("primary".to_string(), HslColor::new(222.0, 47.0, 11.0));
        colors.insert("secondary".to_string(), HslColor::new(215.0, 16.0, 47.0));
        colors.insert("accent".to_string(), HslColor::new(38.0, 92.0, 50.0));
        colors.insert("background".to_string(), HslColor::new(0.0, 0.0, 100.0));
        colors.insert("surface".to_string(), HslColor::new(210.0, 40.0, 98.0));
        colors.insert("text".to_string(), HslColor::new(222.0, 47.0, 11.0));
        colors.insert("muted".to_string(), HslColor::new(215.0, 16.0, 47.0));
        colors.insert("border".to_string(), HslColor::new(214.0, 32.0, 91.0));
        colors.insert("danger".to_string(), HslColor::new(0.0, 84.0, 60.0));

        let mut fonts = HashMap::new();
        fonts.insert("heading_font".to_string(), "Inter, sans-serif".to_string());
        fonts.insert("body_font".to_string(), "Inter, sans-serif".to_string());

        let mut spacing = HashMap::new();
        spacing.insert("xs".to_string(), 4.0);
        spacing.insert("sm".to_string(), 8.0);
        spacing.insert("md".to_string(), 16.0);
        spacing.insert("lg".to_string(), 32.0);
        spacing.insert("xl".to_string(), 64.0);

        let mut border_radius = HashMap::new();
        border_radius.insert("none".to_string(), 0.0);
        border_radius.insert("sm".to_string(), 4.0);
        border_radius.insert("md".to_string(), 8.0);
        border_radius.insert("lg".to_string(), 16.0);
        border_radius.insert("pill".to_string(), 999.0);

        let mut headings = HashMap::new();
        headings.insert("h1".to_string(), HeadingStyle { size: 40.0, weight: 700 });
        headings.insert("h2".to_string(), HeadingStyle { size: 32.0, weight: 700 });
        headings.insert("h3".to_string(), HeadingStyle { size: 24.0, weight: 600 });
        headings.insert("h4".to_string(), HeadingStyle { size: 20.0, weight: 600 });
        headings.insert("h5".to_string(), HeadingStyle { size: 16.0, weight: 600 });
        headings.insert("h6".to_string(), HeadingStyle { size: 14.0, weight: 600 });

        let mut components = HashMap::new();
        for kind in COMPONENT_CATEGORIES {
            components.insert(kind.to_string(), default_component_bundle(kind));
        }

        Theme {
            colors: Some(colors),
            fonts: Some(fonts),
            spacing: Some(spacing),
            border_radius: Some(border_radius),
            headings: Some(headings),
            components: Some(components),
        }
    }
}

/// The built-in style bundle for a component category.
///
/// Bundle values reference flat theme tokens (`$theme.colors.*`, ...) so that
/// tenant token overrides flow through without the tenant touching bundles.
/// Unknown categories get an empty bundle.
pub fn default_component_bundle(kind: &str) -> StyleMap {
    match kind {
        "announcement-bar" => style_map(&[
            ("background-color", "$theme.colors.primary"),
            ("color", "hsl(0, 0%, 100%)"),
            ("font-family", "$theme.fonts.body_font"),
            ("font-size", "14px"),
            ("padding", "8px 16px"),
            ("text-align", "center"),
        ]),
        "header" => style_map(&[
            ("background-color", "$theme.colors.background"),
            ("color", "$theme.colors.text"),
            ("font-family", "$theme.fonts.body_font"),
            ("padding", "16px 32px"),
            ("border-bottom-color", "$theme.colors.border"),
            ("border-bottom-style", "solid"),
            ("border-bottom-width", "1px"),
        ]),
        "footer" => style_map(&[
            ("background-color", "$theme.colors.surface"),
            ("color", "$theme.colors.muted"),
            ("font-family", "$theme.fonts.body_font"),
            ("font-size", "14px"),
            ("padding", "32px"),
        ]),
        "banner" => style_map(&[
            ("background-color", "$theme.colors.surface"),
            ("color", "$theme.colors.text"),
            ("padding", "64px 32px"),
            ("text-align", "center"),
            ("border-radius", "$theme.borderRadius.md"),
        ]),
        "bento" => style_map(&[
            ("background-color", "$theme.colors.background"),
            ("gap", "$theme.spacing.md"),
            ("padding", "32px"),
        ]),
        "carousel" => style_map(&[
            ("background-color", "$theme.colors.background"),
            ("gap", "$theme.spacing.md"),
            ("padding", "32px"),
        ]),
        "product-grid" => style_map(&[
            ("background-color", "$theme.colors.background"),
            ("color", "$theme.colors.text"),
            ("gap", "$theme.spacing.md"),
            ("padding", "32px"),
        ]),
        "checkout" => style_map(&[
            ("background-color", "$theme.colors.surface"),
            ("color", "$theme.colors.text"),
            ("font-family", "$theme.fonts.body_font"),
            ("padding", "32px"),
            ("border-radius", "$theme.borderRadius.md"),
        ]),
        "auth" => style_map(&[
            ("background-color", "$theme.colors.surface"),
            ("color", "$theme.colors.text"),
            ("font-family", "$theme.fonts.body_font"),
            ("padding", "32px"),
            ("border-radius", "$theme.borderRadius.md"),
        ]),
        "contact-form" => style_map(&[
            ("background-color", "$theme.colors.surface"),
            ("color", "$theme.colors.text"),
            ("font-family", "$theme.fonts.body_font"),
            ("padding", "32px"),
            ("border-radius", "$theme.borderRadius.md"),
        ]),
        _ => StyleMap::new(),
    }
}

/// Hardcoded last-tier fallback when a reference names a missing token.
pub(crate) fn category_fallback(category: &str) -> &'static str {
    match category {
        "colors" => "hsl(0, 0%, 20%)",
        "fonts" => "Inter, sans-serif",
        "spacing" => "16px",
        "borderRadius" => "8px",
        "headings" => "24px",
        _ => "inherit",
    }
}

/// Format a number without a trailing `.0` (e.g. `16`, `1.5`).
pub(crate) fn trim_num(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_colors() {
        let mut theme = Theme::new();
        let mut colors = HashMap::new();
        colors.insert("primary".to_string(), HslColor::new(222.0, 47.0, 11.0));
        theme.colors = Some(colors);

        assert_eq!(
            theme.resolve("$theme.colors.primary"),
            Some("hsl(222, 47%, 11%)".to_string())
        );
        assert_eq!(theme.resolve("$theme.colors.unknown"), None);
    }

    #[test]
    fn test_resolve_spacing_and_radius_get_px() {
        let theme = Theme::default_theme();
        assert_eq!(theme.resolve("$theme.spacing.md"), Some("16px".to_string()));
        assert_eq!(
            theme.resolve("$theme.borderRadius.sm"),
            Some("4px".to_string())
        );
    }

    #[test]
    fn test_resolve_heading_typography() {
        let theme = Theme::default_theme();
        assert_eq!(
            theme.resolve("$theme.headings.h2.size"),
            Some("32px".to_string())
        );
        assert_eq!(
            theme.resolve("$theme.headings.h2.weight"),
            Some("700".to_string())
        );
        assert_eq!(theme.resolve("$theme.headings.h2.tracking"), None);
    }

    #[test]
    fn test_is_theme_reference() {
        assert!(Theme::is_theme_reference("$theme.colors.primary"));
        assert!(Theme::is_theme_reference("$theme.spacing.md"));
        assert!(!Theme::is_theme_reference("#4a90e2"));
        assert!(!Theme::is_theme_reference("16px"));
    }

    #[test]
    fn test_with_defaults_keeps_unoverridden_tokens() {
        let mut overrides = Theme::new();
        let mut colors = HashMap::new();
        colors.insert("primary".to_string(), HslColor::new(12.0, 80.0, 50.0));
        overrides.colors = Some(colors);

        let theme = Theme::with_defaults(&overrides);
        assert_eq!(
            theme.resolve("$theme.colors.primary"),
            Some("hsl(12, 80%, 50%)".to_string())
        );
        // untouched defaults survive
        assert_eq!(
            theme.resolve("$theme.colors.background"),
            Some("hsl(0, 0%, 100%)".to_string())
        );
        assert_eq!(theme.resolve("$theme.spacing.lg"), Some("32px".to_string()));
    }

    #[test]
    fn test_with_defaults_merges_component_bundles_per_key() {
        let mut overrides = Theme::new();
        let mut components = HashMap::new();
        components.insert(
            "checkout".to_string(),
            style_map(&[("padding", "48px")]),
        );
        overrides.components = Some(components);

        let theme = Theme::with_defaults(&overrides);
        let bundle = theme
            .components
            .as_ref()
            .and_then(|c| c.get("checkout"))
            .expect("checkout bundle");
        assert_eq!(bundle.get("padding").map(|v| v.as_literal()), Some("48px".to_string()));
        // keys not overridden keep the built-in bundle value
        assert!(bundle.contains_key("background-color"));
    }

    #[test]
    fn test_default_theme_is_total() {
        let theme = Theme::default_theme();
        for cat in COMPONENT_CATEGORIES {
            assert!(
                theme.components.as_ref().unwrap().contains_key(*cat),
                "missing bundle for {}",
                cat
            );
        }
        for level in ["h1", "h2", "h3", "h4", "h5", "h6"] {
            assert!(theme.headings.as_ref().unwrap().contains_key(level));
        }
    }

    #[test]
    fn test_trim_num() {
        assert_eq!(trim_num(16.0), "16");
        assert_eq!(trim_num(1.5), "1.5");
        assert_eq!(trim_num(0.0), "0");
    }
}
