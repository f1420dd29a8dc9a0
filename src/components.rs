use serde::{Deserialize, Serialize};

use crate::style::StyleMap;

/// One renderable node of a storefront page.
///
/// Pages arrive as JSON arrays of `{id, type, content, styles}` records; the
/// `type` tag selects the variant. Unrecognized or malformed nodes degrade to
/// [`Component::Unknown`] during parsing (see [`crate::page::parse_node`])
/// and render as a visible placeholder rather than failing the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Component {
    #[serde(rename = "announcementBar")]
    AnnouncementBar(AnnouncementBar),
    #[serde(rename = "header")]
    Header(Header),
    #[serde(rename = "footer")]
    Footer(Footer),
    #[serde(rename = "banner")]
    Banner(Banner),
    #[serde(rename = "bannerTitle")]
    BannerTitle(BannerTitle),
    #[serde(rename = "bannerSubtitle")]
    BannerSubtitle(BannerSubtitle),
    #[serde(rename = "bannerButton")]
    BannerButton(BannerButton),
    #[serde(rename = "bento")]
    Bento(Bento),
    #[serde(rename = "bentoCard")]
    BentoCard(BentoCard),
    #[serde(rename = "carousel")]
    Carousel(Carousel),
    #[serde(rename = "carouselTitle")]
    CarouselTitle(CarouselTitle),
    #[serde(rename = "carouselCard")]
    CarouselCard(CarouselCard),
    #[serde(rename = "productGrid")]
    ProductGrid(ProductGrid),
    #[serde(rename = "checkout")]
    Checkout(Checkout),
    #[serde(rename = "authForm")]
    AuthForm(AuthForm),
    #[serde(rename = "contactForm")]
    ContactForm(ContactForm),
    #[serde(rename = "heading")]
    Heading(Heading),
    #[serde(rename = "text")]
    Text(Text),
    #[serde(rename = "button")]
    Button(Button),
    #[serde(rename = "image")]
    Image(Image),
    #[serde(rename = "divider")]
    Divider(Divider),
    #[serde(rename = "spacer")]
    Spacer(Spacer),
    /// Produced for nodes whose `type` is unrecognized or whose content
    /// failed to deserialize. Never authored directly.
    #[serde(rename = "unknown")]
    Unknown(UnknownNode),
}

impl Component {
    /// The node's id, if it carries one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Component::AnnouncementBar(c) => c.id.as_deref(),
            Component::Header(c) => c.id.as_deref(),
            Component::Footer(c) => c.id.as_deref(),
            Component::Banner(c) => c.id.as_deref(),
            Component::BannerTitle(c) => c.id.as_deref(),
            Component::BannerSubtitle(c) => c.id.as_deref(),
            Component::BannerButton(c) => c.id.as_deref(),
            Component::Bento(c) => c.id.as_deref(),
            Component::BentoCard(c) => c.id.as_deref(),
            Component::Carousel(c) => c.id.as_deref(),
            Component::CarouselTitle(c) => c.id.as_deref(),
            Component::CarouselCard(c) => c.id.as_deref(),
            Component::ProductGrid(c) => c.id.as_deref(),
            Component::Checkout(c) => c.id.as_deref(),
            Component::AuthForm(c) => c.id.as_deref(),
            Component::ContactForm(c) => c.id.as_deref(),
            Component::Heading(c) => c.id.as_deref(),
            Component::Text(c) => c.id.as_deref(),
            Component::Button(c) => c.id.as_deref(),
            Component::Image(c) => c.id.as_deref(),
            Component::Divider(c) => c.id.as_deref(),
            Component::Spacer(c) => c.id.as_deref(),
            Component::Unknown(c) => c.id.as_deref(),
        }
    }

    /// The wire name of the node's kind.
    pub fn kind(&self) -> &str {
        match self {
            Component::AnnouncementBar(_) => "announcementBar",
            Component::Header(_) => "header",
            Component::Footer(_) => "footer",
            Component::Banner(_) => "banner",
            Component::BannerTitle(_) => "bannerTitle",
            Component::BannerSubtitle(_) => "bannerSubtitle",
            Component::BannerButton(_) => "bannerButton",
            Component::Bento(_) => "bento",
            Component::BentoCard(_) => "bentoCard",
            Component::Carousel(_) => "carousel",
            Component::CarouselTitle(_) => "carouselTitle",
            Component::CarouselCard(_) => "carouselCard",
            Component::ProductGrid(_) => "productGrid",
            Component::Checkout(_) => "checkout",
            Component::AuthForm(_) => "authForm",
            Component::ContactForm(_) => "contactForm",
            Component::Heading(_) => "heading",
            Component::Text(_) => "text",
            Component::Button(_) => "button",
            Component::Image(_) => "image",
            Component::Divider(_) => "divider",
            Component::Spacer(_) => "spacer",
            Component::Unknown(c) => &c.kind,
        }
    }

    /// The node's explicit style map, if any.
    pub fn styles(&self) -> Option<&StyleMap> {
        match self {
            Component::AnnouncementBar(c) => c.styles.as_ref(),
            Component::Header(c) => c.styles.as_ref(),
            Component::Footer(c) => c.styles.as_ref(),
            Component::Banner(c) => c.styles.as_ref(),
            Component::BannerTitle(c) => c.styles.as_ref(),
            Component::BannerSubtitle(c) => c.styles.as_ref(),
            Component::BannerButton(c) => c.styles.as_ref(),
            Component::Bento(c) => c.styles.as_ref(),
            Component::BentoCard(c) => c.styles.as_ref(),
            Component::Carousel(c) => c.styles.as_ref(),
            Component::CarouselTitle(c) => c.styles.as_ref(),
            Component::CarouselCard(c) => c.styles.as_ref(),
            Component::ProductGrid(c) => c.styles.as_ref(),
            Component::Checkout(c) => c.styles.as_ref(),
            Component::AuthForm(c) => c.styles.as_ref(),
            Component::ContactForm(c) => c.styles.as_ref(),
            Component::Heading(c) => c.styles.as_ref(),
            Component::Text(c) => c.styles.as_ref(),
            Component::Button(c) => c.styles.as_ref(),
            Component::Image(c) => c.styles.as_ref(),
            Component::Divider(c) => c.styles.as_ref(),
            Component::Spacer(c) => c.styles.as_ref(),
            Component::Unknown(_) => None,
        }
    }

    /// Declared children, for the kinds that bear them.
    pub fn children(&self) -> Option<&Vec<Component>> {
        match self {
            Component::Banner(c) => c.content.children.as_ref(),
            Component::Bento(c) => c.content.children.as_ref(),
            Component::BentoCard(c) => c.content.children.as_ref(),
            Component::Carousel(c) => c.content.children.as_ref(),
            _ => None,
        }
    }

    /// True if this node belongs to the sticky chrome group when it leads
    /// the page's node list.
    pub fn is_sticky_chrome(&self) -> bool {
        match self {
            Component::AnnouncementBar(c) => c.content.sticky.unwrap_or(false),
            Component::Header(c) => c.content.sticky.unwrap_or(false),
            _ => false,
        }
    }
}

// ─── Chrome ──────────────────────────────────────────────────────────────────

/// Announcement bar: a single line of text pinned above the header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementBar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: AnnouncementBarContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementBarContent {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
}

/// Site header with logo and the tenant's navigation menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: HeaderContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_cart: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: FooterContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_menu: Option<bool>,
}

// ─── Composites ──────────────────────────────────────────────────────────────

/// Hero banner. Consumes only `bannerTitle`, `bannerSubtitle` and
/// `bannerButton` children; other child kinds are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: BannerContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Component>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerTitle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: TextContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerSubtitle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: TextContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerButton {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: ButtonContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

/// Bento section: a CSS grid of cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bento {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: BentoContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BentoContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Component>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BentoCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: BentoCardContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BentoCardContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Grid column span (1-based, defaults to 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Component>>,
}

/// Horizontally scrolling strip. Consumes only `carouselTitle` and
/// `carouselCard` children; other child kinds are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carousel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: CarouselContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselContent {
    /// Autoplay interval in milliseconds; emitted as a data attribute for
    /// the host page's script, never scheduled here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Component>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselTitle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: TextContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: CarouselCardContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarouselCardContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ─── Commerce ────────────────────────────────────────────────────────────────

/// Product grid fed by the injected product list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductGrid {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: ProductGridContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductGridContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_price: Option<bool>,
}

/// Checkout section: cart line items, computed totals and the order form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: CheckoutContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_discount: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_gift_card: Option<bool>,
}

// ─── Forms ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: AuthFormContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthFormContent {
    pub variant: AuthVariant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthVariant {
    Login,
    Register,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: ContactFormContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactFormContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FormField>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(default, rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Textarea,
}

// ─── Leaves ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: HeadingContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingContent {
    pub text: String,
    /// Heading level 1-6 (defaults to 2).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: TextContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: ButtonContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ButtonContent {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: ImageContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spacer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: SpacerContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpacerContent {
    /// Height in pixels (defaults to 32).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

/// Stand-in for a node the parser could not type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnknownNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The original `type` string from the wire.
    #[serde(default)]
    pub kind: String,
}
