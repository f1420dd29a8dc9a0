use std::fs;
use std::path::PathBuf;

use storefront_render::{
    parse_page, render_document, render_page, summarize, validate_page, validate_theme, CartItem,
    Discount, DiscountKind, GiftCard, RenderContext, RenderError, RenderMode, StyleValue, Theme,
};

fn get_fixture_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(filename);
    path
}

fn load_fixture(filename: &str) -> String {
    fs::read_to_string(get_fixture_path(filename)).unwrap()
}

fn load_theme(filename: &str) -> Theme {
    serde_json::from_str(&load_fixture(filename)).unwrap()
}

fn sample_cart() -> Vec<CartItem> {
    vec![CartItem {
        name: "Mug".to_string(),
        price: 10.0,
        quantity: 2,
        tax_rate: 8.0,
        tax_name: "VAT".to_string(),
    }]
}

// Fixture pages

#[test]
fn test_landing_page_is_valid() {
    let page = parse_page(&load_fixture("landing-page.json")).unwrap();
    assert_eq!(validate_page(&page), vec![]);
}

#[test]
fn test_checkout_page_is_valid() {
    let page = parse_page(&load_fixture("checkout-page.json")).unwrap();
    assert_eq!(validate_page(&page), vec![]);
}

#[test]
fn test_storefront_theme_is_valid() {
    let theme = load_theme("storefront-theme.json");
    assert_eq!(validate_theme(&theme), vec![]);
}

#[test]
fn test_invalid_page_reports_every_problem() {
    let page = parse_page(&load_fixture("invalid-page.json")).unwrap();
    let errors = validate_page(&page);
    assert!(errors
        .iter()
        .any(|e| matches!(e, RenderError::ValueOutOfRange { property, .. } if property == "level")));
    assert!(errors
        .iter()
        .any(|e| matches!(e, RenderError::DuplicateId { id } if id == "dup")));
    assert!(errors
        .iter()
        .any(|e| matches!(e, RenderError::InvalidColor { value, .. } if value == "reddish")));
    assert!(errors
        .iter()
        .any(|e| matches!(e, RenderError::MissingProperty { property, .. } if property == "src")));
}

// Rendering

#[test]
fn test_landing_page_renders_without_theme_leaks() {
    let page = parse_page(&load_fixture("landing-page.json")).unwrap();
    let ctx = RenderContext::new(RenderMode::Frontend, &Theme::new());
    let html = render_page(&page, &ctx).unwrap();

    assert!(html.contains("Autumn Collection"));
    assert!(html.contains("Staff picks"));
    assert!(html.contains("data-autoplay-ms=\"5000\""));
    // resolved styles never leave reference markers behind
    assert!(!html.contains("$theme."));
}

#[test]
fn test_sticky_chrome_leads_the_document() {
    let page = parse_page(&load_fixture("landing-page.json")).unwrap();
    let ctx = RenderContext::new(RenderMode::Frontend, &Theme::new());
    let html = render_page(&page, &ctx).unwrap();

    let sticky_at = html.find("position:sticky").unwrap();
    assert!(sticky_at < html.find("Free shipping").unwrap());
    assert!(html.find("Free shipping").unwrap() < html.find("Northwind Supply").unwrap());
    assert!(html.find("</div>").unwrap() < html.find("Autumn Collection").unwrap());
}

#[test]
fn test_tenant_theme_overrides_flow_into_output() {
    let theme = load_theme("storefront-theme.json");
    let page = parse_page(&load_fixture("landing-page.json")).unwrap();
    let ctx = RenderContext::new(RenderMode::Frontend, &theme)
        .with_products(storefront_render::preview::sample_products());
    let html = render_page(&page, &ctx).unwrap();

    // tenant primary lands via the announcement-bar bundle override
    assert!(html.contains("hsl(152, 60%, 40%)"));
    assert!(html.contains("font-size:13px;"));
    // tenant spacing token resolves in the product grid's explicit style
    assert!(html.contains("padding:40px;"));
    assert!(html.contains("Fraunces, serif"));
}

#[test]
fn test_builder_and_frontend_modes_differ() {
    let page = parse_page(&load_fixture("landing-page.json")).unwrap();

    let builder = RenderContext::new(RenderMode::Builder, &Theme::new());
    let builder_html = render_page(&page, &builder).unwrap();
    assert!(builder_html.contains("data-canvas-id=\"hero\""));
    assert!(builder_html.contains("data-canvas-type=\"banner\""));
    assert!(builder_html.contains("No products to display."));

    let frontend = RenderContext::new(RenderMode::Frontend, &Theme::new());
    let frontend_html = render_page(&page, &frontend).unwrap();
    assert!(!frontend_html.contains("data-canvas-id"));
    assert!(!frontend_html.contains("No products to display."));
}

#[test]
fn test_unknown_node_renders_placeholder_in_both_modes() {
    let page = parse_page(r#"[{"id":"w1","type":"widgetFromTheFuture","content":{}}]"#).unwrap();
    for mode in [RenderMode::Builder, RenderMode::Frontend] {
        let ctx = RenderContext::new(mode, &Theme::new());
        let html = render_page(&page, &ctx).unwrap();
        assert!(html.contains("widgetFromTheFuture"));
        assert!(html.contains("w1"));
    }
}

#[test]
fn test_checkout_page_full_totals() {
    let page = parse_page(&load_fixture("checkout-page.json")).unwrap();
    let ctx = RenderContext::new(RenderMode::Frontend, &Theme::new())
        .with_cart(sample_cart(), 50.0)
        .with_gift_card(GiftCard {
            code: "GIFT-1".to_string(),
            balance: 25.0,
        });
    let html = render_page(&page, &ctx).unwrap();

    // subtotal 20, VAT 1.60, shipping 50, gift card 25 -> total 46.60
    assert!(html.contains("$20.00"));
    assert!(html.contains("VAT (8%)"));
    assert!(html.contains("-$25.00"));
    assert!(html.contains("$46.60"));
    assert!(html.contains("data-endpoint=\"/checkout/process\""));
    assert!(html.contains("data-validate-endpoint=\"/discounts/validate\""));
    assert!(html.contains("data-validate-endpoint=\"/gift-cards/validate\""));
}

#[test]
fn test_render_document_wraps_theme_fonts() {
    let theme = load_theme("storefront-theme.json");
    let page = parse_page(&load_fixture("landing-page.json")).unwrap();
    let ctx = RenderContext::new(RenderMode::Frontend, &theme);
    let html = render_document(&page, &ctx, "Northwind Supply").unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Northwind Supply</title>"));
    // tenant background token reaches the document shell
    assert!(html.contains("hsl(40, 30%, 96%)"));
}

// Style resolution invariants

#[test]
fn test_resolution_is_idempotent() {
    let theme = Theme::with_defaults(&load_theme("storefront-theme.json"));
    for reference in [
        "$theme.colors.primary",
        "$theme.spacing.lg",
        "$theme.borderRadius.md",
        "$theme.fonts.heading_font",
        "$theme.headings.h2.size",
    ] {
        let once =
            storefront_render::resolve_style_value(&StyleValue::from(reference), &theme);
        let twice =
            storefront_render::resolve_style_value(&StyleValue::from(once.as_str()), &theme);
        assert_eq!(once, twice, "resolving {} twice changed the value", reference);
        assert!(!once.contains("$theme."), "{} left a marker: {}", reference, once);
    }
}

#[test]
fn test_missing_token_falls_back_to_literal() {
    let theme = Theme::new();
    let resolved = storefront_render::resolve_style_value(
        &StyleValue::from("$theme.colors.nonexistent"),
        &theme,
    );
    assert_eq!(resolved, "hsl(0, 0%, 20%)");
}

// Cart math

#[test]
fn test_reference_cart_scenario() {
    let summary = summarize(&sample_cart(), 50.0, None, None);
    assert_eq!(summary.subtotal, 20.0);
    assert_eq!(summary.tax_total, 1.6);
    assert_eq!(summary.order_total, 71.6);
}

#[test]
fn test_discount_and_gift_card_never_go_negative() {
    let discount = Discount {
        code: "HUGE".to_string(),
        kind: DiscountKind::Fixed(500.0),
    };
    let gift_card = GiftCard {
        code: "GC".to_string(),
        balance: 1000.0,
    };
    let summary = summarize(&sample_cart(), 0.0, Some(&discount), Some(&gift_card));
    assert_eq!(summary.discount, 20.0);
    assert!(summary.order_total >= 0.0);
}
