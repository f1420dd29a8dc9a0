//! Renders a page's component tree to safe HTML with inline styles.
//!
//! No script and no inline event handlers are emitted; builder-mode edit
//! hooks and carousel autoplay are declared through `data-*` attributes for
//! the host editor/storefront script to wire up.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::cart::{self, CartItem, Discount, GiftCard};
use crate::components::*;
use crate::error::RenderResult;
use crate::page::Page;
use crate::style::{
    composed_styles, inline_css, resolve_style_value, resolved_font, StyleMap, StyleValue,
};
use crate::theme::Theme;

/// Base document styles (html, body). Everything else is inline.
const BASE_STYLES: &str =
    "html,body{margin:0;min-height:100vh;}*,*::before,*::after{box-sizing:border-box;}\
     img{max-width:100%;display:block;}a{color:inherit;}";

/// Rendering mode: editable builder canvas or the live storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Inside the admin design tool: edit hooks emitted, empty states shown.
    Builder,
    /// The customer-facing storefront: read-only, empty data omitted.
    Frontend,
}

/// A navigation link injected by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuLink {
    pub label: String,
    pub url: String,
}

/// A product injected by the host for grids and carousels.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub url: Option<String>,
}

/// A payment method offered at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethod {
    pub id: String,
    pub label: String,
}

/// Everything a render pass needs, passed once by reference instead of
/// threading a dozen positional parameters through every component.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub mode: RenderMode,
    /// Always a total theme: the constructor runs [`Theme::with_defaults`].
    pub theme: Theme,
    pub tenant_id: String,
    pub currency: String,
    pub menus: Vec<MenuLink>,
    pub products: Vec<Product>,
    pub cart: Vec<CartItem>,
    pub shipping_rate: f64,
    pub discount: Option<Discount>,
    pub gift_card: Option<GiftCard>,
    pub payment_methods: Vec<PaymentMethod>,
}

impl RenderContext {
    pub fn new(mode: RenderMode, theme: &Theme) -> Self {
        Self {
            mode,
            theme: Theme::with_defaults(theme),
            tenant_id: String::new(),
            currency: "$".to_string(),
            menus: Vec::new(),
            products: Vec::new(),
            cart: Vec::new(),
            shipping_rate: 0.0,
            discount: None,
            gift_card: None,
            payment_methods: Vec::new(),
        }
    }

    pub fn is_builder(&self) -> bool {
        self.mode == RenderMode::Builder
    }

    pub fn with_tenant(mut self, tenant_id: &str) -> Self {
        self.tenant_id = tenant_id.to_string();
        self
    }

    pub fn with_menus(mut self, menus: Vec<MenuLink>) -> Self {
        self.menus = menus;
        self
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn with_cart(mut self, cart: Vec<CartItem>, shipping_rate: f64) -> Self {
        self.cart = cart;
        self.shipping_rate = shipping_rate;
        self
    }

    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn with_gift_card(mut self, gift_card: GiftCard) -> Self {
        self.gift_card = Some(gift_card);
        self
    }

    pub fn with_payment_methods(mut self, methods: Vec<PaymentMethod>) -> Self {
        self.payment_methods = methods;
        self
    }
}

/// Render a page to an HTML body fragment.
///
/// Leading sticky chrome (`announcementBar`/`header` nodes with
/// `sticky: true`) is partitioned into a `position:sticky` wrapper ahead of
/// the remaining node list.
pub fn render_page(page: &Page, ctx: &RenderContext) -> RenderResult<String> {
    let mut out = String::new();

    if page.is_empty() {
        empty_state("This page has no sections yet.", ctx, &mut out)?;
        return Ok(out);
    }

    let sticky = page
        .nodes
        .iter()
        .take_while(|n| n.is_sticky_chrome())
        .count();

    if sticky > 0 {
        out.push_str("<div style=\"position:sticky;top:0;z-index:100;\">");
        for node in &page.nodes[..sticky] {
            render_node(node, ctx, &mut out)?;
        }
        out.push_str("</div>");
    }
    for node in &page.nodes[sticky..] {
        render_node(node, ctx, &mut out)?;
    }

    Ok(out)
}

/// Render a page as a complete HTML document.
pub fn render_document(page: &Page, ctx: &RenderContext, title: &str) -> RenderResult<String> {
    let body = render_page(page, ctx)?;
    let body_font = resolved_font(&ctx.theme, "body_font");
    let background = resolve_style_value(&StyleValue::from("$theme.colors.background"), &ctx.theme);
    let text = resolve_style_value(&StyleValue::from("$theme.colors.text"), &ctx.theme);

    let mut html = String::new();
    write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{}body{{font-family:{};background:{};color:{};}}</style>\n\
         </head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        BASE_STYLES,
        body_font,
        background,
        text,
        body
    )?;
    Ok(html)
}

/// Dispatch one node to its renderer. Exhaustive over the component set;
/// the `Unknown` arm is the sole error-handling policy for malformed trees.
pub fn render_node(node: &Component, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    match node {
        Component::AnnouncementBar(c) => render_announcement_bar(c, ctx, out),
        Component::Header(c) => render_header(c, ctx, out),
        Component::Footer(c) => render_footer(c, ctx, out),
        Component::Banner(c) => render_banner(c, ctx, out),
        Component::BannerTitle(c) => render_banner_title(c, ctx, out),
        Component::BannerSubtitle(c) => render_banner_subtitle(c, ctx, out),
        Component::BannerButton(c) => render_banner_button(c, ctx, out),
        Component::Bento(c) => render_bento(c, ctx, out),
        Component::BentoCard(c) => render_bento_card(c, ctx, out),
        Component::Carousel(c) => render_carousel(c, ctx, out),
        Component::CarouselTitle(c) => render_carousel_title(c, ctx, out),
        Component::CarouselCard(c) => render_carousel_card(c, ctx, out),
        Component::ProductGrid(c) => render_product_grid(c, ctx, out),
        Component::Checkout(c) => render_checkout(c, ctx, out),
        Component::AuthForm(c) => render_auth_form(c, ctx, out),
        Component::ContactForm(c) => render_contact_form(c, ctx, out),
        Component::Heading(c) => render_heading(c, ctx, out),
        Component::Text(c) => render_text(c, ctx, out),
        Component::Button(c) => render_button(c, ctx, out),
        Component::Image(c) => render_image(c, ctx, out),
        Component::Divider(c) => render_divider(c, ctx, out),
        Component::Spacer(c) => render_spacer(c, ctx, out),
        Component::Unknown(c) => render_unknown(c, out),
    }
}

// ─── Shared helpers ──────────────────────────────────────────────────────────

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// id plus builder edit hooks.
fn node_attrs(id: Option<&str>, kind: &str, ctx: &RenderContext) -> String {
    let mut attrs = String::new();
    if let Some(id) = id {
        attrs.push_str(&format!(" id=\"{}\"", escape_html(id)));
    }
    if ctx.is_builder() {
        if let Some(id) = id {
            attrs.push_str(&format!(" data-canvas-id=\"{}\"", escape_html(id)));
        }
        attrs.push_str(&format!(" data-canvas-type=\"{}\"", kind));
    }
    attrs
}

/// Inline CSS for a category-backed component: bundle + explicit overrides,
/// everything theme-resolved.
fn category_css(kind: &str, explicit: Option<&StyleMap>, ctx: &RenderContext) -> String {
    inline_css(&composed_styles(explicit, &ctx.theme, kind))
}

/// Inline CSS for a leaf: built-in defaults + explicit overrides.
fn leaf_css(defaults: &[(&str, String)], explicit: Option<&StyleMap>, ctx: &RenderContext) -> String {
    let mut styles: BTreeMap<String, String> = defaults
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    if let Some(explicit) = explicit {
        for (k, v) in explicit {
            styles.insert(k.clone(), resolve_style_value(v, &ctx.theme));
        }
    }
    inline_css(&styles)
}

/// Builder-mode empty-state message; frontend renders nothing.
fn empty_state(message: &str, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    if !ctx.is_builder() {
        return Ok(());
    }
    write!(
        out,
        "<div data-canvas-empty style=\"border:1px dashed hsl(215, 16%, 67%);color:hsl(215, 16%, 47%);\
         padding:24px;text-align:center;font-size:14px;\">{}</div>",
        escape_html(message)
    )?;
    Ok(())
}

fn theme_color(ctx: &RenderContext, token: &str) -> String {
    resolve_style_value(
        &StyleValue::String(format!("$theme.colors.{}", token)),
        &ctx.theme,
    )
}

// ─── Chrome ──────────────────────────────────────────────────────────────────

fn render_announcement_bar(
    c: &AnnouncementBar,
    ctx: &RenderContext,
    out: &mut String,
) -> RenderResult<()> {
    let css = category_css("announcement-bar", c.styles.as_ref(), ctx);
    let attrs = node_attrs(c.id.as_deref(), "announcementBar", ctx);
    write!(
        out,
        "<div{} style=\"{}\">{}</div>",
        attrs,
        css,
        escape_html(&c.content.text)
    )?;
    Ok(())
}

fn render_header(c: &Header, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    let mut css = category_css("header", c.styles.as_ref(), ctx);
    css.push_str("display:flex;align-items:center;justify-content:space-between;gap:24px;");
    let attrs = node_attrs(c.id.as_deref(), "header", ctx);
    write!(out, "<header{} style=\"{}\">", attrs, css)?;

    // logo: image wins over text
    if let Some(src) = &c.content.logo_image {
        write!(
            out,
            "<a href=\"/\"><img src=\"{}\" alt=\"logo\" style=\"height:32px;\"></a>",
            escape_html(src)
        )?;
    } else if let Some(text) = &c.content.logo_text {
        let font = resolved_font(&ctx.theme, "heading_font");
        write!(
            out,
            "<a href=\"/\" style=\"font-family:{};font-weight:700;font-size:20px;text-decoration:none;\">{}</a>",
            font,
            escape_html(text)
        )?;
    }

    if ctx.menus.is_empty() {
        if ctx.is_builder() {
            out.push_str("<nav data-canvas-empty style=\"font-size:14px;opacity:0.6;\">No menu configured</nav>");
        }
    } else {
        out.push_str("<nav style=\"display:flex;gap:16px;\">");
        for link in &ctx.menus {
            write!(
                out,
                "<a href=\"{}\" style=\"text-decoration:none;\">{}</a>",
                escape_html(&link.url),
                escape_html(&link.label)
            )?;
        }
        out.push_str("</nav>");
    }

    if c.content.show_cart.unwrap_or(true) {
        let count: u32 = ctx.cart.iter().map(|i| i.quantity).sum();
        write!(
            out,
            "<a href=\"/cart\" data-cart-count=\"{}\" style=\"text-decoration:none;\">Cart ({})</a>",
            count, count
        )?;
    }

    out.push_str("</header>");
    Ok(())
}

fn render_footer(c: &Footer, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    let css = category_css("footer", c.styles.as_ref(), ctx);
    let attrs = node_attrs(c.id.as_deref(), "footer", ctx);
    write!(out, "<footer{} style=\"{}\">", attrs, css)?;

    if c.content.show_menu.unwrap_or(false) && !ctx.menus.is_empty() {
        out.push_str("<nav style=\"display:flex;gap:16px;margin-bottom:16px;\">");
        for link in &ctx.menus {
            write!(
                out,
                "<a href=\"{}\" style=\"text-decoration:none;\">{}</a>",
                escape_html(&link.url),
                escape_html(&link.label)
            )?;
        }
        out.push_str("</nav>");
    }
    if let Some(text) = &c.content.text {
        write!(out, "<div>{}</div>", escape_html(text))?;
    }

    out.push_str("</footer>");
    Ok(())
}

// ─── Composites ──────────────────────────────────────────────────────────────

fn render_banner(c: &Banner, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    let mut css = category_css("banner", c.styles.as_ref(), ctx);
    if let Some(image) = &c.content.image {
        write!(
            css,
            "background-image:url('{}');background-size:cover;background-position:center;",
            escape_html(image)
        )?;
    }
    css.push_str("position:relative;");
    let attrs = node_attrs(c.id.as_deref(), "banner", ctx);
    write!(out, "<section{} style=\"{}\">", attrs, css)?;

    if let Some(opacity) = c.content.overlay_opacity {
        write!(
            out,
            "<div style=\"position:absolute;inset:0;background:rgba(0,0,0,{});\"></div>",
            opacity.clamp(0.0, 1.0)
        )?;
    }

    out.push_str("<div style=\"position:relative;\">");
    let mut rendered = false;
    if let Some(children) = &c.content.children {
        for child in children {
            // fixed child vocabulary; anything else is ignored
            match child {
                Component::BannerTitle(_)
                | Component::BannerSubtitle(_)
                | Component::BannerButton(_) => {
                    render_node(child, ctx, out)?;
                    rendered = true;
                }
                _ => {}
            }
        }
    }
    if !rendered {
        empty_state("Empty banner: add a title, subtitle or button.", ctx, out)?;
    }
    out.push_str("</div></section>");
    Ok(())
}

fn render_banner_title(c: &BannerTitle, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    let defaults = [
        ("font-family", resolved_font(&ctx.theme, "heading_font")),
        (
            "font-size",
            resolve_style_value(&StyleValue::from("$theme.headings.h1.size"), &ctx.theme),
        ),
        (
            "font-weight",
            resolve_style_value(&StyleValue::from("$theme.headings.h1.weight"), &ctx.theme),
        ),
        ("margin", "0 0 8px".to_string()),
    ];
    let css = leaf_css(&defaults, c.styles.as_ref(), ctx);
    let attrs = node_attrs(c.id.as_deref(), "bannerTitle", ctx);
    write!(
        out,
        "<h1{} style=\"{}\">{}</h1>",
        attrs,
        css,
        escape_html(&c.content.text)
    )?;
    Ok(())
}

fn render_banner_subtitle(
    c: &BannerSubtitle,
    ctx: &RenderContext,
    out: &mut String,
) -> RenderResult<()> {
    let defaults = [
        ("font-family", resolved_font(&ctx.theme, "body_font")),
        ("font-size", "18px".to_string()),
        ("color", theme_color(ctx, "muted")),
        ("margin", "0 0 24px".to_string()),
    ];
    let css = leaf_css(&defaults, c.styles.as_ref(), ctx);
    let attrs = node_attrs(c.id.as_deref(), "bannerSubtitle", ctx);
    write!(
        out,
        "<p{} style=\"{}\">{}</p>",
        attrs,
        css,
        escape_html(&c.content.text)
    )?;
    Ok(())
}

fn render_banner_button(
    c: &BannerButton,
    ctx: &RenderContext,
    out: &mut String,
) -> RenderResult<()> {
    render_button_like(
        c.id.as_deref(),
        "bannerButton",
        &c.content,
        c.styles.as_ref(),
        ctx,
        out,
    )
}

fn render_bento(c: &Bento, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    let columns = c.content.columns.unwrap_or(3).max(1);
    let mut css = category_css("bento", c.styles.as_ref(), ctx);
    write!(
        css,
        "display:grid;grid-template-columns:repeat({}, 1fr);",
        columns
    )?;
    let attrs = node_attrs(c.id.as_deref(), "bento", ctx);
    write!(out, "<section{} style=\"{}\">", attrs, css)?;

    let cards: Vec<&Component> = c
        .content
        .children
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter(|ch| matches!(ch, Component::BentoCard(_)))
        .collect();
    if cards.is_empty() {
        empty_state("Empty bento: add cards.", ctx, out)?;
    }
    for card in cards {
        render_node(card, ctx, out)?;
    }

    out.push_str("</section>");
    Ok(())
}

fn render_bento_card(c: &BentoCard, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    let defaults = [
        ("background-color", theme_color(ctx, "surface")),
        (
            "border-radius",
            resolve_style_value(&StyleValue::from("$theme.borderRadius.md"), &ctx.theme),
        ),
        ("padding", "24px".to_string()),
        ("overflow", "hidden".to_string()),
    ];
    let mut css = leaf_css(&defaults, c.styles.as_ref(), ctx);
    let span = c.content.span.unwrap_or(1).max(1);
    if span > 1 {
        write!(css, "grid-column:span {};", span)?;
    }
    let attrs = node_attrs(c.id.as_deref(), "bentoCard", ctx);
    write!(out, "<div{} style=\"{}\">", attrs, css)?;

    if let Some(image) = &c.content.image {
        write!(
            out,
            "<img src=\"{}\" alt=\"\" style=\"border-radius:4px;margin-bottom:12px;\">",
            escape_html(image)
        )?;
    }
    if let Some(title) = &c.content.title {
        let font = resolved_font(&ctx.theme, "heading_font");
        write!(
            out,
            "<h3 style=\"font-family:{};margin:0 0 8px;\">{}</h3>",
            font,
            escape_html(title)
        )?;
    }
    if let Some(text) = &c.content.text {
        write!(out, "<p style=\"margin:0;\">{}</p>", escape_html(text))?;
    }
    if let Some(children) = &c.content.children {
        for child in children {
            render_node(child, ctx, out)?;
        }
    }

    out.push_str("</div>");
    Ok(())
}

fn render_carousel(c: &Carousel, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    let css = category_css("carousel", c.styles.as_ref(), ctx);
    let mut attrs = node_attrs(c.id.as_deref(), "carousel", ctx);
    if let Some(ms) = c.content.autoplay_ms {
        // scheduling is the host's job; declare the interval only
        attrs.push_str(&format!(" data-autoplay-ms=\"{}\"", ms));
    }
    write!(out, "<section{} style=\"{}\">", attrs, css)?;

    let children = c.content.children.as_deref().unwrap_or_default();
    for child in children {
        if let Component::CarouselTitle(_) = child {
            render_node(child, ctx, out)?;
        }
    }

    let cards: Vec<&Component> = children
        .iter()
        .filter(|ch| matches!(ch, Component::CarouselCard(_)))
        .collect();
    if cards.is_empty() {
        empty_state("Empty carousel: add cards.", ctx, out)?;
    } else {
        out.push_str(
            "<div data-carousel-track style=\"display:flex;gap:16px;overflow-x:auto;scroll-snap-type:x mandatory;\">",
        );
        for card in cards {
            render_node(card, ctx, out)?;
        }
        out.push_str("</div>");
    }

    out.push_str("</section>");
    Ok(())
}

fn render_carousel_title(
    c: &CarouselTitle,
    ctx: &RenderContext,
    out: &mut String,
) -> RenderResult<()> {
    let defaults = [
        ("font-family", resolved_font(&ctx.theme, "heading_font")),
        (
            "font-size",
            resolve_style_value(&StyleValue::from("$theme.headings.h2.size"), &ctx.theme),
        ),
        (
            "font-weight",
            resolve_style_value(&StyleValue::from("$theme.headings.h2.weight"), &ctx.theme),
        ),
        ("margin", "0 0 16px".to_string()),
    ];
    let css = leaf_css(&defaults, c.styles.as_ref(), ctx);
    let attrs = node_attrs(c.id.as_deref(), "carouselTitle", ctx);
    write!(
        out,
        "<h2{} style=\"{}\">{}</h2>",
        attrs,
        css,
        escape_html(&c.content.text)
    )?;
    Ok(())
}

fn render_carousel_card(
    c: &CarouselCard,
    ctx: &RenderContext,
    out: &mut String,
) -> RenderResult<()> {
    let defaults = [
        ("background-color", theme_color(ctx, "surface")),
        (
            "border-radius",
            resolve_style_value(&StyleValue::from("$theme.borderRadius.md"), &ctx.theme),
        ),
        ("padding", "16px".to_string()),
        ("min-width", "220px".to_string()),
        ("scroll-snap-align", "start".to_string()),
    ];
    let css = leaf_css(&defaults, c.styles.as_ref(), ctx);
    let attrs = node_attrs(c.id.as_deref(), "carouselCard", ctx);
    write!(out, "<div{} style=\"{}\">", attrs, css)?;

    if let Some(image) = &c.content.image {
        write!(
            out,
            "<img src=\"{}\" alt=\"\" style=\"border-radius:4px;margin-bottom:8px;\">",
            escape_html(image)
        )?;
    }
    if let Some(title) = &c.content.title {
        match &c.content.url {
            Some(url) => write!(
                out,
                "<a href=\"{}\" style=\"font-weight:600;text-decoration:none;display:block;\">{}</a>",
                escape_html(url),
                escape_html(title)
            )?,
            None => write!(
                out,
                "<div style=\"font-weight:600;\">{}</div>",
                escape_html(title)
            )?,
        }
    }
    if let Some(price) = c.content.price {
        write!(
            out,
            "<div style=\"color:{};margin-top:4px;\">{}{}</div>",
            theme_color(ctx, "muted"),
            escape_html(&ctx.currency),
            format_money(price)
        )?;
    }

    out.push_str("</div>");
    Ok(())
}

// ─── Commerce ────────────────────────────────────────────────────────────────

fn render_product_grid(c: &ProductGrid, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    if ctx.products.is_empty() {
        return empty_state("No products to display.", ctx, out);
    }

    let columns = c.content.columns.unwrap_or(4).max(1);
    let limit = c.content.limit.unwrap_or(usize::MAX);
    let show_price = c.content.show_price.unwrap_or(true);

    let mut css = category_css("product-grid", c.styles.as_ref(), ctx);
    write!(
        css,
        "display:grid;grid-template-columns:repeat({}, 1fr);",
        columns
    )?;
    let attrs = node_attrs(c.id.as_deref(), "productGrid", ctx);
    write!(out, "<section{} style=\"{}\">", attrs, css)?;

    for product in ctx.products.iter().take(limit) {
        write!(
            out,
            "<div data-product-id=\"{}\" style=\"background-color:{};border-radius:8px;padding:16px;\">",
            escape_html(&product.id),
            theme_color(ctx, "surface")
        )?;
        if let Some(image) = &product.image {
            write!(
                out,
                "<img src=\"{}\" alt=\"{}\" style=\"border-radius:4px;margin-bottom:8px;\">",
                escape_html(image),
                escape_html(&product.name)
            )?;
        }
        let name = escape_html(&product.name);
        match &product.url {
            Some(url) => write!(
                out,
                "<a href=\"{}\" style=\"font-weight:600;text-decoration:none;display:block;\">{}</a>",
                escape_html(url),
                name
            )?,
            None => write!(out, "<div style=\"font-weight:600;\">{}</div>", name)?,
        }
        if show_price {
            write!(
                out,
                "<div style=\"color:{};margin-top:4px;\">{}{}</div>",
                theme_color(ctx, "muted"),
                escape_html(&ctx.currency),
                format_money(product.price)
            )?;
        }
        out.push_str("</div>");
    }

    out.push_str("</section>");
    Ok(())
}

fn render_checkout(c: &Checkout, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    if ctx.cart.is_empty() {
        return empty_state("Your cart is empty.", ctx, out);
    }

    let summary = cart::summarize(
        &ctx.cart,
        ctx.shipping_rate,
        ctx.discount.as_ref(),
        ctx.gift_card.as_ref(),
    );
    let cur = escape_html(&ctx.currency);

    let css = category_css("checkout", c.styles.as_ref(), ctx);
    let attrs = node_attrs(c.id.as_deref(), "checkout", ctx);
    write!(out, "<section{} style=\"{}\">", attrs, css)?;

    let heading = c.content.heading.as_deref().unwrap_or("Checkout");
    write!(
        out,
        "<h2 style=\"font-family:{};margin:0 0 16px;\">{}</h2>",
        resolved_font(&ctx.theme, "heading_font"),
        escape_html(heading)
    )?;

    // line items
    out.push_str("<div data-cart-lines>");
    for item in &ctx.cart {
        write!(
            out,
            "<div style=\"display:flex;justify-content:space-between;padding:4px 0;\">\
             <span>{} × {}</span><span>{}{}</span></div>",
            item.quantity,
            escape_html(&item.name),
            cur,
            format_money(item.line_total())
        )?;
    }
    out.push_str("</div>");

    // totals
    let border = theme_color(ctx, "border");
    write!(
        out,
        "<div data-cart-summary style=\"border-top:1px solid {};margin-top:8px;padding-top:8px;\">",
        border
    )?;
    summary_row(out, "Subtotal", &cur, summary.subtotal)?;
    if summary.discount > 0.0 {
        let label = match &ctx.discount {
            Some(d) => format!("Discount ({})", d.code),
            None => "Discount".to_string(),
        };
        summary_row(out, &label, &cur, -summary.discount)?;
    }
    summary_row(out, "Shipping", &cur, summary.shipping)?;
    for line in &summary.tax_lines {
        let label = format!("{} ({}%)", line.name, crate::theme::trim_num(line.rate));
        summary_row(out, &label, &cur, line.amount)?;
    }
    if summary.gift_card_applied > 0.0 {
        summary_row(out, "Gift card", &cur, -summary.gift_card_applied)?;
    }
    write!(
        out,
        "<div style=\"display:flex;justify-content:space-between;font-weight:700;\
         border-top:1px solid {};margin-top:4px;padding-top:4px;\">\
         <span>Total</span><span data-order-total>{}{}</span></div>",
        border,
        cur,
        format_money(summary.order_total)
    )?;
    out.push_str("</div>");

    // discount / gift card entry; validation is delegated to the host
    if c.content.show_discount.unwrap_or(true) {
        out.push_str(
            "<div style=\"display:flex;gap:8px;margin-top:16px;\">\
             <input name=\"discount_code\" placeholder=\"Discount code\" data-validate-endpoint=\"/discounts/validate\" style=\"flex:1;padding:8px;\">\
             <button type=\"button\" data-apply-discount>Apply</button></div>",
        );
    }
    if c.content.show_gift_card.unwrap_or(true) {
        out.push_str(
            "<div style=\"display:flex;gap:8px;margin-top:8px;\">\
             <input name=\"gift_card_code\" placeholder=\"Gift card\" data-validate-endpoint=\"/gift-cards/validate\" style=\"flex:1;padding:8px;\">\
             <button type=\"button\" data-apply-gift-card>Apply</button></div>",
        );
    }

    // the order form posts to the host endpoint; field errors come back as
    // a field -> message map and are rendered by the host script
    out.push_str(
        "<form method=\"post\" action=\"/checkout/process\" data-endpoint=\"/checkout/process\" style=\"margin-top:24px;\">",
    );
    for (name, label) in [
        ("email", "Email"),
        ("shipping_address", "Shipping address"),
    ] {
        write!(
            out,
            "<label style=\"display:block;margin-bottom:8px;\">{}<br>\
             <input name=\"{}\" required style=\"width:100%;padding:8px;\"></label>",
            label, name
        )?;
    }
    if !ctx.payment_methods.is_empty() {
        out.push_str("<fieldset style=\"border:0;padding:0;margin:0 0 8px;\">");
        for method in &ctx.payment_methods {
            write!(
                out,
                "<label style=\"display:block;\"><input type=\"radio\" name=\"payment_method\" value=\"{}\"> {}</label>",
                escape_html(&method.id),
                escape_html(&method.label)
            )?;
        }
        out.push_str("</fieldset>");
    }
    write!(
        out,
        "<button type=\"submit\" style=\"background-color:{};color:hsl(0, 0%, 100%);\
         padding:12px 24px;border:0;border-radius:{};cursor:pointer;\">Place order</button>",
        theme_color(ctx, "primary"),
        resolve_style_value(&StyleValue::from("$theme.borderRadius.sm"), &ctx.theme)
    )?;
    out.push_str("</form></section>");
    Ok(())
}

fn summary_row(out: &mut String, label: &str, currency: &str, amount: f64) -> RenderResult<()> {
    let (sign, value) = if amount < 0.0 {
        ("-", -amount)
    } else {
        ("", amount)
    };
    write!(
        out,
        "<div style=\"display:flex;justify-content:space-between;padding:2px 0;\">\
         <span>{}</span><span>{}{}{}</span></div>",
        escape_html(label),
        sign,
        currency,
        format_money(value)
    )?;
    Ok(())
}

// ─── Forms ───────────────────────────────────────────────────────────────────

fn render_auth_form(c: &AuthForm, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    let (endpoint, default_heading, submit) = match c.content.variant {
        AuthVariant::Login => ("/login", "Sign in", "Sign in"),
        AuthVariant::Register => ("/register", "Create account", "Create account"),
    };

    let css = category_css("auth", c.styles.as_ref(), ctx);
    let attrs = node_attrs(c.id.as_deref(), "authForm", ctx);
    write!(out, "<section{} style=\"{}\">", attrs, css)?;

    let heading = c.content.heading.as_deref().unwrap_or(default_heading);
    write!(
        out,
        "<h2 style=\"font-family:{};margin:0 0 16px;\">{}</h2>",
        resolved_font(&ctx.theme, "heading_font"),
        escape_html(heading)
    )?;

    write!(
        out,
        "<form method=\"post\" action=\"{0}\" data-endpoint=\"{0}\">",
        endpoint
    )?;
    if matches!(c.content.variant, AuthVariant::Register) {
        out.push_str(
            "<label style=\"display:block;margin-bottom:8px;\">Name<br>\
             <input name=\"name\" required style=\"width:100%;padding:8px;\"></label>",
        );
    }
    out.push_str(
        "<label style=\"display:block;margin-bottom:8px;\">Email<br>\
         <input type=\"email\" name=\"email\" required style=\"width:100%;padding:8px;\"></label>\
         <label style=\"display:block;margin-bottom:8px;\">Password<br>\
         <input type=\"password\" name=\"password\" required style=\"width:100%;padding:8px;\"></label>",
    );
    write!(
        out,
        "<button type=\"submit\" style=\"background-color:{};color:hsl(0, 0%, 100%);\
         padding:12px 24px;border:0;border-radius:{};cursor:pointer;\">{}</button>",
        theme_color(ctx, "primary"),
        resolve_style_value(&StyleValue::from("$theme.borderRadius.sm"), &ctx.theme),
        submit
    )?;
    out.push_str("</form></section>");
    Ok(())
}

fn render_contact_form(c: &ContactForm, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    let default_fields = vec![
        FormField {
            name: "name".to_string(),
            label: "Name".to_string(),
            field_type: FieldType::Text,
            required: Some(true),
        },
        FormField {
            name: "email".to_string(),
            label: "Email".to_string(),
            field_type: FieldType::Email,
            required: Some(true),
        },
        FormField {
            name: "message".to_string(),
            label: "Message".to_string(),
            field_type: FieldType::Textarea,
            required: Some(true),
        },
    ];
    let fields = c.content.fields.as_ref().unwrap_or(&default_fields);

    let css = category_css("contact-form", c.styles.as_ref(), ctx);
    let attrs = node_attrs(c.id.as_deref(), "contactForm", ctx);
    write!(out, "<section{} style=\"{}\">", attrs, css)?;

    if let Some(heading) = &c.content.heading {
        write!(
            out,
            "<h2 style=\"font-family:{};margin:0 0 16px;\">{}</h2>",
            resolved_font(&ctx.theme, "heading_font"),
            escape_html(heading)
        )?;
    }

    out.push_str("<form method=\"post\" action=\"/contact\" data-endpoint=\"/contact\">");
    for field in fields {
        let required = if field.required.unwrap_or(false) {
            " required"
        } else {
            ""
        };
        let name = escape_html(&field.name);
        let label = escape_html(&field.label);
        match field.field_type {
            FieldType::Textarea => write!(
                out,
                "<label style=\"display:block;margin-bottom:8px;\">{}<br>\
                 <textarea name=\"{}\" rows=\"4\"{} style=\"width:100%;padding:8px;\"></textarea></label>",
                label, name, required
            )?,
            FieldType::Email => write!(
                out,
                "<label style=\"display:block;margin-bottom:8px;\">{}<br>\
                 <input type=\"email\" name=\"{}\"{} style=\"width:100%;padding:8px;\"></label>",
                label, name, required
            )?,
            FieldType::Text => write!(
                out,
                "<label style=\"display:block;margin-bottom:8px;\">{}<br>\
                 <input name=\"{}\"{} style=\"width:100%;padding:8px;\"></label>",
                label, name, required
            )?,
        }
    }
    write!(
        out,
        "<button type=\"submit\" style=\"background-color:{};color:hsl(0, 0%, 100%);\
         padding:12px 24px;border:0;border-radius:{};cursor:pointer;\">Send</button>",
        theme_color(ctx, "primary"),
        resolve_style_value(&StyleValue::from("$theme.borderRadius.sm"), &ctx.theme)
    )?;
    out.push_str("</form></section>");
    Ok(())
}

// ─── Leaves ──────────────────────────────────────────────────────────────────

fn render_heading(c: &Heading, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    let level = c.content.level.unwrap_or(2).clamp(1, 6);
    let token = format!("h{}", level);
    let defaults = [
        ("font-family", resolved_font(&ctx.theme, "heading_font")),
        (
            "font-size",
            resolve_style_value(
                &StyleValue::String(format!("$theme.headings.{}.size", token)),
                &ctx.theme,
            ),
        ),
        (
            "font-weight",
            resolve_style_value(
                &StyleValue::String(format!("$theme.headings.{}.weight", token)),
                &ctx.theme,
            ),
        ),
    ];
    let css = leaf_css(&defaults, c.styles.as_ref(), ctx);
    let attrs = node_attrs(c.id.as_deref(), "heading", ctx);
    write!(
        out,
        "<h{level}{} style=\"{}\">{}</h{level}>",
        attrs,
        css,
        escape_html(&c.content.text),
        level = level
    )?;
    Ok(())
}

fn render_text(c: &Text, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    let defaults = [("font-family", resolved_font(&ctx.theme, "body_font"))];
    let css = leaf_css(&defaults, c.styles.as_ref(), ctx);
    let attrs = node_attrs(c.id.as_deref(), "text", ctx);
    write!(
        out,
        "<p{} style=\"{}\">{}</p>",
        attrs,
        css,
        escape_html(&c.content.text)
    )?;
    Ok(())
}

fn render_button(c: &Button, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    render_button_like(
        c.id.as_deref(),
        "button",
        &c.content,
        c.styles.as_ref(),
        ctx,
        out,
    )
}

fn render_button_like(
    id: Option<&str>,
    kind: &str,
    content: &ButtonContent,
    styles: Option<&StyleMap>,
    ctx: &RenderContext,
    out: &mut String,
) -> RenderResult<()> {
    let defaults = [
        ("background-color", theme_color(ctx, "primary")),
        ("color", "hsl(0, 0%, 100%)".to_string()),
        ("font-family", resolved_font(&ctx.theme, "body_font")),
        (
            "border-radius",
            resolve_style_value(&StyleValue::from("$theme.borderRadius.sm"), &ctx.theme),
        ),
        ("padding", "12px 24px".to_string()),
        ("display", "inline-block".to_string()),
        ("text-decoration", "none".to_string()),
    ];
    let css = leaf_css(&defaults, styles, ctx);
    let attrs = node_attrs(id, kind, ctx);
    let href = content.url.as_deref().unwrap_or("#");
    write!(
        out,
        "<a{} href=\"{}\" style=\"{}\">{}</a>",
        attrs,
        escape_html(href),
        css,
        escape_html(&content.label)
    )?;
    Ok(())
}

fn render_image(c: &Image, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    let css = leaf_css(&[], c.styles.as_ref(), ctx);
    let attrs = node_attrs(c.id.as_deref(), "image", ctx);
    let alt = c.content.alt.as_deref().unwrap_or("");
    write!(
        out,
        "<img{} src=\"{}\" alt=\"{}\" style=\"{}\">",
        attrs,
        escape_html(&c.content.src),
        escape_html(alt),
        css
    )?;
    Ok(())
}

fn render_divider(c: &Divider, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    let defaults = [
        ("border", "0".to_string()),
        ("border-top", format!("1px solid {}", theme_color(ctx, "border"))),
        ("margin", "24px 0".to_string()),
    ];
    let css = leaf_css(&defaults, c.styles.as_ref(), ctx);
    let attrs = node_attrs(c.id.as_deref(), "divider", ctx);
    write!(out, "<hr{} style=\"{}\">", attrs, css)?;
    Ok(())
}

fn render_spacer(c: &Spacer, ctx: &RenderContext, out: &mut String) -> RenderResult<()> {
    let size = c.content.size.unwrap_or(32.0).max(0.0);
    let attrs = node_attrs(c.id.as_deref(), "spacer", ctx);
    write!(
        out,
        "<div{} style=\"height:{}px;\"></div>",
        attrs,
        crate::theme::trim_num(size)
    )?;
    Ok(())
}

fn render_unknown(c: &UnknownNode, out: &mut String) -> RenderResult<()> {
    let id = c.id.as_deref().unwrap_or("no id");
    write!(
        out,
        "<div data-canvas-unknown style=\"border:1px dashed hsl(0, 84%, 60%);color:hsl(0, 84%, 60%);\
         padding:8px;font-family:monospace;font-size:12px;\">\
         Unknown component type &quot;{}&quot; (id: {})</div>",
        escape_html(&c.kind),
        escape_html(id)
    )?;
    Ok(())
}
