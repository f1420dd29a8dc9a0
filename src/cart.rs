//! Checkout display totals and the external cart-store seam.
//!
//! All totals here are pure reductions over the injected item list: discount
//! and gift-card *validation* and order persistence are the host's job.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One cart line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    /// Tax rate in percent (e.g. 8 for 8%).
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default = "default_tax_name")]
    pub tax_name: String,
}

fn default_tax_name() -> String {
    "Tax".to_string()
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A discount already validated by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub code: String,
    pub kind: DiscountKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Percentage of the subtotal (0-100).
    Percent(f64),
    /// Fixed amount off the subtotal.
    Fixed(f64),
}

/// A gift card already validated by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCard {
    pub code: String,
    pub balance: f64,
}

/// Tax accumulated for one `(name, rate)` bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxLine {
    pub name: String,
    pub rate: f64,
    pub amount: f64,
}

/// Computed display totals for a checkout render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub subtotal: f64,
    pub discount: f64,
    pub shipping: f64,
    pub tax_lines: Vec<TaxLine>,
    pub tax_total: f64,
    pub gift_card_applied: f64,
    pub order_total: f64,
}

/// Reduce a cart to display totals.
///
/// Tax is computed per line item and bucketed by `(tax_name, tax_rate)`.
/// The discount is capped at the subtotal; the gift card is capped at
/// `min(balance, total before gift card)` so the order total never drops
/// below zero.
pub fn summarize(
    items: &[CartItem],
    shipping: f64,
    discount: Option<&Discount>,
    gift_card: Option<&GiftCard>,
) -> CartSummary {
    let subtotal: f64 = items.iter().map(CartItem::line_total).sum();

    let mut tax_lines: Vec<TaxLine> = Vec::new();
    for item in items {
        if item.tax_rate <= 0.0 {
            continue;
        }
        let amount = item.line_total() * item.tax_rate / 100.0;
        match tax_lines
            .iter_mut()
            .find(|l| l.name == item.tax_name && l.rate == item.tax_rate)
        {
            Some(line) => line.amount += amount,
            None => tax_lines.push(TaxLine {
                name: item.tax_name.clone(),
                rate: item.tax_rate,
                amount,
            }),
        }
    }
    let tax_total: f64 = tax_lines.iter().map(|l| l.amount).sum();

    let discount_amount = match discount.map(|d| d.kind) {
        Some(DiscountKind::Percent(pct)) => subtotal * pct.clamp(0.0, 100.0) / 100.0,
        Some(DiscountKind::Fixed(amount)) => amount.min(subtotal).max(0.0),
        None => 0.0,
    };

    let before_gift_card = (subtotal - discount_amount + shipping + tax_total).max(0.0);
    let gift_card_applied = gift_card
        .map(|g| g.balance.min(before_gift_card).max(0.0))
        .unwrap_or(0.0);

    CartSummary {
        subtotal,
        discount: discount_amount,
        shipping,
        tax_lines,
        tax_total,
        gift_card_applied,
        order_total: before_gift_card - gift_card_applied,
    }
}

/// The external cart collaborator. Real stores live in the host application;
/// this crate only consumes the interface and ships [`MemoryCartStore`] for
/// builder preview and tests.
pub trait CartStore {
    fn get_cart(&self, tenant_id: &str) -> Vec<CartItem>;
    fn get_cart_summary(
        &self,
        tenant_id: &str,
        shipping: f64,
        gift_card: Option<&GiftCard>,
    ) -> CartSummary;
    /// Apply or clear (`None`) the manually entered discount for a tenant.
    fn apply_manual_discount(&mut self, tenant_id: &str, discount: Option<Discount>);
    fn clear_cart(&mut self, tenant_id: &str);
}

/// In-memory cart store keyed by tenant id.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    carts: HashMap<String, TenantCart>,
}

#[derive(Debug, Clone, Default)]
struct TenantCart {
    items: Vec<CartItem>,
    discount: Option<Discount>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, tenant_id: &str, item: CartItem) {
        self.carts
            .entry(tenant_id.to_string())
            .or_default()
            .items
            .push(item);
    }
}

impl CartStore for MemoryCartStore {
    fn get_cart(&self, tenant_id: &str) -> Vec<CartItem> {
        self.carts
            .get(tenant_id)
            .map(|c| c.items.clone())
            .unwrap_or_default()
    }

    fn get_cart_summary(
        &self,
        tenant_id: &str,
        shipping: f64,
        gift_card: Option<&GiftCard>,
    ) -> CartSummary {
        let cart = self.carts.get(tenant_id);
        let items = cart.map(|c| c.items.as_slice()).unwrap_or_default();
        let discount = cart.and_then(|c| c.discount.as_ref());
        summarize(items, shipping, discount, gift_card)
    }

    fn apply_manual_discount(&mut self, tenant_id: &str, discount: Option<Discount>) {
        self.carts
            .entry(tenant_id.to_string())
            .or_default()
            .discount = discount;
    }

    fn clear_cart(&mut self, tenant_id: &str) {
        self.carts.remove(tenant_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(price: f64, quantity: u32, tax_rate: f64) -> CartItem {
        CartItem {
            name: "Item".to_string(),
            price,
            quantity,
            tax_rate,
            tax_name: "VAT".to_string(),
        }
    }

    #[test]
    fn test_reference_scenario() {
        // [{price:10, qty:2, taxRate:8}], shipping 50, nothing else
        let summary = summarize(&[item(10.0, 2, 8.0)], 50.0, None, None);
        assert_eq!(summary.subtotal, 20.0);
        assert_eq!(summary.tax_total, 1.6);
        assert_eq!(summary.order_total, 71.6);
    }

    #[test]
    fn test_tax_bucketed_by_name_and_rate() {
        let items = vec![
            CartItem {
                name: "A".to_string(),
                price: 100.0,
                quantity: 1,
                tax_rate: 8.0,
                tax_name: "State".to_string(),
            },
            CartItem {
                name: "B".to_string(),
                price: 50.0,
                quantity: 2,
                tax_rate: 8.0,
                tax_name: "State".to_string(),
            },
            CartItem {
                name: "C".to_string(),
                price: 10.0,
                quantity: 1,
                tax_rate: 2.5,
                tax_name: "City".to_string(),
            },
        ];
        let summary = summarize(&items, 0.0, None, None);
        assert_eq!(summary.tax_lines.len(), 2);
        assert_eq!(summary.tax_lines[0].name, "State");
        assert_eq!(summary.tax_lines[0].amount, 16.0);
        assert_eq!(summary.tax_lines[1].name, "City");
        assert_eq!(summary.tax_lines[1].amount, 0.25);
        assert_eq!(summary.tax_total, 16.25);
    }

    #[test]
    fn test_percent_and_fixed_discounts() {
        let items = vec![item(50.0, 2, 0.0)];
        let percent = Discount {
            code: "TEN".to_string(),
            kind: DiscountKind::Percent(10.0),
        };
        let summary = summarize(&items, 0.0, Some(&percent), None);
        assert_eq!(summary.discount, 10.0);
        assert_eq!(summary.order_total, 90.0);

        let fixed = Discount {
            code: "FLAT".to_string(),
            kind: DiscountKind::Fixed(25.0),
        };
        let summary = summarize(&items, 0.0, Some(&fixed), None);
        assert_eq!(summary.discount, 25.0);
        assert_eq!(summary.order_total, 75.0);

        // fixed discount never exceeds the subtotal
        let oversized = Discount {
            code: "BIG".to_string(),
            kind: DiscountKind::Fixed(500.0),
        };
        let summary = summarize(&items, 0.0, Some(&oversized), None);
        assert_eq!(summary.discount, 100.0);
        assert_eq!(summary.order_total, 0.0);
    }

    #[test]
    fn test_gift_card_capped_at_total() {
        let items = vec![item(10.0, 1, 0.0)];
        let card = GiftCard {
            code: "GIFT".to_string(),
            balance: 100.0,
        };
        let summary = summarize(&items, 5.0, None, Some(&card));
        // never more than min(balance, total before gift card)
        assert_eq!(summary.gift_card_applied, 15.0);
        assert_eq!(summary.order_total, 0.0);
    }

    #[test]
    fn test_gift_card_capped_at_balance() {
        let items = vec![item(100.0, 1, 0.0)];
        let card = GiftCard {
            code: "GIFT".to_string(),
            balance: 30.0,
        };
        let summary = summarize(&items, 0.0, None, Some(&card));
        assert_eq!(summary.gift_card_applied, 30.0);
        assert_eq!(summary.order_total, 70.0);
    }

    #[test]
    fn test_empty_cart() {
        let summary = summarize(&[], 0.0, None, None);
        assert_eq!(summary, CartSummary::default());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryCartStore::new();
        store.add_item("acme", item(10.0, 2, 8.0));
        assert_eq!(store.get_cart("acme").len(), 1);
        assert_eq!(store.get_cart("other").len(), 0);

        let summary = store.get_cart_summary("acme", 50.0, None);
        assert_eq!(summary.order_total, 71.6);

        store.apply_manual_discount(
            "acme",
            Some(Discount {
                code: "TEN".to_string(),
                kind: DiscountKind::Percent(50.0),
            }),
        );
        let summary = store.get_cart_summary("acme", 50.0, None);
        assert_eq!(summary.discount, 10.0);

        store.clear_cart("acme");
        assert!(store.get_cart("acme").is_empty());
    }
}
