use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::theme::{category_fallback, default_component_bundle, trim_num, Theme};

/// A raw style value as authored in a component node: either a literal CSS
/// value or a `$theme.` reference to be resolved before rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    String(String),
}

impl StyleValue {
    /// The value as a plain string, without theme resolution.
    pub fn as_literal(&self) -> String {
        match self {
            StyleValue::Number(n) => trim_num(*n),
            StyleValue::String(s) => s.clone(),
        }
    }

    /// True if this value indirects through the theme.
    pub fn is_reference(&self) -> bool {
        match self {
            StyleValue::Number(_) => false,
            StyleValue::String(s) => Theme::is_theme_reference(s),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::String(s.to_string())
    }
}

/// A flat map of CSS property name to style value. Ordered so rendered
/// output is deterministic.
pub type StyleMap = BTreeMap<String, StyleValue>;

/// Build a [`StyleMap`] from literal pairs.
pub fn style_map(entries: &[(&str, &str)]) -> StyleMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), StyleValue::from(*v)))
        .collect()
}

/// How many token-to-token hops the resolver follows before giving up.
/// String-valued tokens (fonts) may alias another token; anything deeper
/// than this is a cycle.
const MAX_REFERENCE_HOPS: usize = 4;

/// Convert a possibly-indirect style value into a concrete CSS value.
///
/// Literals pass through unchanged, so resolution is idempotent. References
/// resolve against `theme`, following token-to-token aliases up to
/// [`MAX_REFERENCE_HOPS`]; a missing token or a reference cycle bottoms out
/// in a hardcoded per-category fallback. Never errors, never returns an
/// unresolved `$theme.` marker.
pub fn resolve_style_value(value: &StyleValue, theme: &Theme) -> String {
    match value {
        StyleValue::Number(n) => trim_num(*n),
        StyleValue::String(s) => {
            if !Theme::is_theme_reference(s) {
                return s.clone();
            }
            let mut reference = s.clone();
            for _ in 0..MAX_REFERENCE_HOPS {
                match theme.resolve(&reference) {
                    Some(next) if Theme::is_theme_reference(&next) => reference = next,
                    Some(concrete) => return concrete,
                    None => break,
                }
            }
            category_fallback(reference_category(&reference).unwrap_or("")).to_string()
        }
    }
}

/// The token category a `$theme.` reference names, if any.
pub fn reference_category(reference: &str) -> Option<&str> {
    reference
        .strip_prefix("$theme.")
        .and_then(|rest| rest.split('.').next())
        .filter(|c| !c.is_empty())
}

/// The theme's default style bundle for a component category.
///
/// The tenant bundle (if any) is merged over the built-in bundle for the
/// category, so for every known category the result is fully populated:
/// callers treat it as the fallback tier after explicit component styles.
pub fn component_styles(theme: &Theme, kind: &str) -> StyleMap {
    let mut bundle = default_component_bundle(kind);
    if let Some(overrides) = theme.components.as_ref().and_then(|c| c.get(kind)) {
        bundle.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    bundle
}

/// Resolve a font-role name (e.g. `"heading_font"`) to a concrete
/// font-family string through the same reference/fallback chain.
pub fn resolved_font(theme: &Theme, role: &str) -> String {
    resolve_style_value(
        &StyleValue::String(format!("$theme.fonts.{}", role)),
        theme,
    )
}

/// Compose the final concrete styles for one component instance.
///
/// Per property, resolution order is exactly: (1) the explicit per-instance
/// style, (2) the theme's per-category bundle, (3) the theme global token a
/// bundle reference points at, (4) a hardcoded literal. Tiers 3 and 4 are
/// enforced by [`resolve_style_value`]; this function layers tiers 1 and 2.
pub fn composed_styles(
    explicit: Option<&StyleMap>,
    theme: &Theme,
    kind: &str,
) -> BTreeMap<String, String> {
    let mut raw = component_styles(theme, kind);
    if let Some(explicit) = explicit {
        raw.extend(explicit.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    raw.iter()
        .map(|(k, v)| (k.clone(), resolve_style_value(v, theme)))
        .collect()
}

/// Join concrete styles into an inline CSS declaration string.
pub fn inline_css(styles: &BTreeMap<String, String>) -> String {
    let mut css = String::new();
    for (prop, val) in styles {
        css.push_str(prop);
        css.push(':');
        css.push_str(val);
        css.push(';');
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_literal_passes_through_unchanged() {
        let theme = Theme::default_theme();
        let v = StyleValue::from("16px");
        assert_eq!(resolve_style_value(&v, &theme), "16px");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let theme = Theme::default_theme();
        let values = [
            StyleValue::from("$theme.colors.primary"),
            StyleValue::from("$theme.spacing.md"),
            StyleValue::from("$theme.fonts.heading_font"),
            StyleValue::from("$theme.colors.not_a_token"),
            StyleValue::from("16px"),
            StyleValue::Number(1.5),
        ];
        for v in &values {
            let once = resolve_style_value(v, &theme);
            let twice = resolve_style_value(&StyleValue::String(once.clone()), &theme);
            assert_eq!(once, twice, "not idempotent for {:?}", v);
        }
    }

    #[test]
    fn test_font_token_aliasing_another_token_resolves_fully() {
        let mut tenant = Theme::new();
        let mut fonts = std::collections::HashMap::new();
        fonts.insert(
            "heading_font".to_string(),
            "$theme.fonts.body_font".to_string(),
        );
        tenant.fonts = Some(fonts);
        let theme = Theme::with_defaults(&tenant);

        let resolved = resolve_style_value(&StyleValue::from("$theme.fonts.heading_font"), &theme);
        assert_eq!(resolved, "Inter, sans-serif");
        assert!(!resolved.contains("$theme."), "unresolved marker leaked");
    }

    #[test]
    fn test_font_token_reference_cycle_falls_back() {
        let mut tenant = Theme::new();
        let mut fonts = std::collections::HashMap::new();
        fonts.insert(
            "heading_font".to_string(),
            "$theme.fonts.body_font".to_string(),
        );
        fonts.insert(
            "body_font".to_string(),
            "$theme.fonts.heading_font".to_string(),
        );
        tenant.fonts = Some(fonts);
        let theme = Theme::with_defaults(&tenant);

        for role in ["heading_font", "body_font"] {
            let resolved = resolved_font(&theme, role);
            assert_eq!(resolved, "Inter, sans-serif", "cycle leaked for {}", role);
        }
    }

    #[test]
    fn test_missing_token_falls_back_to_literal() {
        let theme = Theme::default_theme();
        let resolved =
            resolve_style_value(&StyleValue::from("$theme.colors.no_such_color"), &theme);
        assert!(!resolved.contains("$theme."), "unresolved marker leaked");
        assert_eq!(resolved, "hsl(0, 0%, 20%)");

        let resolved = resolve_style_value(&StyleValue::from("$theme.bogus.token"), &theme);
        assert_eq!(resolved, "inherit");
    }

    #[test]
    fn test_reference_category() {
        assert_eq!(
            reference_category("$theme.colors.primary"),
            Some("colors")
        );
        assert_eq!(reference_category("$theme."), None);
        assert_eq!(reference_category("16px"), None);
    }

    #[test]
    fn test_component_styles_fully_populated() {
        let theme = Theme::default_theme();
        for kind in crate::theme::COMPONENT_CATEGORIES {
            let bundle = component_styles(&theme, kind);
            assert!(!bundle.is_empty(), "empty bundle for {}", kind);
        }
    }

    #[test]
    fn test_fallback_order_explicit_then_bundle_then_global() {
        // global default for checkout background is the surface token
        let theme = Theme::default_theme();
        let composed = composed_styles(None, &theme, "checkout");
        assert_eq!(
            composed.get("background-color").map(String::as_str),
            Some("hsl(210, 40%, 98%)")
        );

        // a tenant bundle override beats the built-in bundle
        let mut tenant = Theme::new();
        let mut components = std::collections::HashMap::new();
        components.insert(
            "checkout".to_string(),
            style_map(&[("background-color", "$theme.colors.background")]),
        );
        tenant.components = Some(components);
        let theme = Theme::with_defaults(&tenant);
        let composed = composed_styles(None, &theme, "checkout");
        assert_eq!(
            composed.get("background-color").map(String::as_str),
            Some("hsl(0, 0%, 100%)")
        );

        // an explicit per-instance style beats everything
        let explicit = style_map(&[("background-color", "#101014")]);
        let composed = composed_styles(Some(&explicit), &theme, "checkout");
        assert_eq!(
            composed.get("background-color").map(String::as_str),
            Some("#101014")
        );
    }

    #[test]
    fn test_resolved_font() {
        let theme = Theme::default_theme();
        assert_eq!(resolved_font(&theme, "heading_font"), "Inter, sans-serif");
        // unknown role bottoms out in the font fallback, not a marker
        assert_eq!(resolved_font(&theme, "display_font"), "Inter, sans-serif");
    }

    #[test]
    fn test_inline_css_is_deterministic() {
        let theme = Theme::default_theme();
        let styles = composed_styles(None, &theme, "footer");
        let css = inline_css(&styles);
        assert!(css.starts_with("background-color:hsl(210, 40%, 98%);"));
        assert!(css.ends_with("padding:32px;"));
    }
}
