//! Sample data for the builder canvas.
//!
//! The builder renders pages before a tenant has products, menus or carts.
//! Placeholder data is injected through the [`RenderContext`] like real data
//! would be, so the renderers never special-case preview mode.

use crate::cart::CartItem;
use crate::render::{MenuLink, PaymentMethod, Product, RenderContext, RenderMode};
use crate::theme::Theme;

pub fn sample_products() -> Vec<Product> {
    [
        ("Classic Tee", 24.0),
        ("Canvas Tote", 18.5),
        ("Enamel Mug", 14.0),
        ("Wool Beanie", 22.0),
        ("Sticker Pack", 6.0),
        ("Poster Print", 29.0),
        ("Water Bottle", 19.5),
        ("Keychain", 8.0),
    ]
    .iter()
    .enumerate()
    .map(|(i, (name, price))| Product {
        id: format!("sample-{}", i + 1),
        name: name.to_string(),
        price: *price,
        image: Some(format!("/assets/placeholder-{}.jpg", (i % 4) + 1)),
        url: Some("#".to_string()),
    })
    .collect()
}

pub fn sample_menus() -> Vec<MenuLink> {
    ["Home", "Shop", "About", "Contact"]
        .iter()
        .map(|label| MenuLink {
            label: label.to_string(),
            url: "#".to_string(),
        })
        .collect()
}

pub fn sample_cart() -> Vec<CartItem> {
    vec![
        CartItem {
            name: "Classic Tee".to_string(),
            price: 24.0,
            quantity: 2,
            tax_rate: 8.0,
            tax_name: "Tax".to_string(),
        },
        CartItem {
            name: "Enamel Mug".to_string(),
            price: 14.0,
            quantity: 1,
            tax_rate: 8.0,
            tax_name: "Tax".to_string(),
        },
    ]
}

pub fn sample_payment_methods() -> Vec<PaymentMethod> {
    vec![
        PaymentMethod {
            id: "card".to_string(),
            label: "Credit card".to_string(),
        },
        PaymentMethod {
            id: "cod".to_string(),
            label: "Cash on delivery".to_string(),
        },
    ]
}

/// A builder-mode context pre-loaded with sample data, themed with the
/// tenant's (possibly partial) theme.
pub fn preview_context(theme: &Theme) -> RenderContext {
    RenderContext::new(RenderMode::Builder, theme)
        .with_menus(sample_menus())
        .with_products(sample_products())
        .with_cart(sample_cart(), 5.0)
        .with_payment_methods(sample_payment_methods())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::parse_page;
    use crate::render::render_page;

    #[test]
    fn test_preview_context_fills_every_section() {
        let ctx = preview_context(&Theme::new());
        let page = parse_page(
            r#"[
                {"type":"header","content":{"logoText":"Preview"}},
                {"type":"productGrid","content":{"limit":3}},
                {"type":"checkout","content":{}}
            ]"#,
        )
        .unwrap();
        let html = render_page(&page, &ctx).unwrap();
        assert!(html.contains("Classic Tee"));
        assert!(html.contains("Credit card"));
        assert!(!html.contains("data-canvas-empty"));
    }
}
