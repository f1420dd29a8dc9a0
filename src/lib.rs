//! storefront-render: server-side rendering for builder-made storefront pages.
//!
//! Pages are JSON arrays of `{id, type, content, styles}` component nodes,
//! produced by a drag-and-drop builder and rendered here to themed HTML for
//! both the builder canvas and the live storefront.
//!
//! ```
//! use storefront_render::{parse_page, render_page, RenderContext, RenderMode, Theme};
//!
//! let page = parse_page(r#"[
//!     {"id": "hero", "type": "banner", "content": {"children": [
//!         {"type": "bannerTitle", "content": {"text": "Summer drop"}},
//!         {"type": "bannerButton", "content": {"label": "Shop now", "url": "/shop"}}
//!     ]}}
//! ]"#).unwrap();
//!
//! let ctx = RenderContext::new(RenderMode::Frontend, &Theme::new());
//! let html = render_page(&page, &ctx).unwrap();
//! assert!(html.contains("Summer drop"));
//! ```
//!
//! Styling is token-driven: style values may be `$theme.` references
//! (`"$theme.colors.primary"`) resolved against the tenant's theme, with
//! built-in defaults backstopping every token so rendering never misses.

pub mod cart;
pub mod components;
pub mod error;
pub mod page;
pub mod preview;
pub mod render;
pub mod style;
pub mod theme;
pub mod validator;

pub use cart::{summarize, CartItem, CartStore, CartSummary, Discount, DiscountKind, GiftCard, MemoryCartStore, TaxLine};
pub use components::Component;
pub use error::{RenderError, RenderResult};
pub use page::{parse_page, Page};
pub use render::{
    render_document, render_page, MenuLink, PaymentMethod, Product, RenderContext, RenderMode,
};
pub use style::{composed_styles, inline_css, resolve_style_value, StyleMap, StyleValue};
pub use theme::{HeadingStyle, HslColor, Theme};
pub use validator::{validate_page, validate_theme};

/// Parse, then render a page JSON string in one call.
pub fn render_json(json: &str, ctx: &RenderContext) -> RenderResult<String> {
    let page = parse_page(json)?;
    render_page(&page, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_json_end_to_end() {
        let ctx = RenderContext::new(RenderMode::Frontend, &Theme::new());
        let html = render_json(
            r#"[{"type":"text","content":{"text":"hello"}}]"#,
            &ctx,
        )
        .unwrap();
        assert!(html.contains("hello"));
    }

    #[test]
    fn test_render_json_rejects_non_array() {
        let ctx = RenderContext::new(RenderMode::Frontend, &Theme::new());
        assert!(render_json(r#"{"type":"text"}"#, &ctx).is_err());
    }
}
