//! Counter-sale cart with per-line discount and a global tax rate.

use super::resource::EntityId;

pub const DEFAULT_TAX_PERCENT: f64 = 10.0;

/// A product picked from the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CartProduct {
    pub product_id: EntityId,
    pub code: String,
    pub name: String,
    pub category: String,
    pub unit_price: f64,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: CartProduct,
    pub quantity: u32,
    /// 0..=100
    pub discount_percent: f64,
}

impl CartLine {
    pub fn gross(&self) -> f64 {
        self.product.unit_price * self.quantity as f64
    }

    pub fn discount_amount(&self) -> f64 {
        self.gross() * self.discount_percent / 100.0
    }

    pub fn net(&self) -> f64 {
        self.gross() - self.discount_amount()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CartTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub taxable: f64,
    pub tax: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    tax_percent: f64,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(DEFAULT_TAX_PERCENT)
    }
}

impl Cart {
    pub fn new(tax_percent: f64) -> Self {
        Self {
            lines: Vec::new(),
            tax_percent: clamp_percent(tax_percent),
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn tax_percent(&self) -> f64 {
        self.tax_percent
    }

    pub fn set_tax_percent(&mut self, percent: f64) {
        self.tax_percent = clamp_percent(percent);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Adding a product already in the cart increments its quantity
    pub fn add(&mut self, product: CartProduct) {
        match self
            .lines
            .iter_mut()
            .find(|l| l.product.product_id == product.product_id)
        {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                product,
                quantity: 1,
                discount_percent: 0.0,
            }),
        }
    }

    pub fn remove(&mut self, product_id: EntityId) {
        self.lines.retain(|l| l.product.product_id != product_id);
    }

    /// Quantity never drops below 1; use [`Cart::remove`] to drop a line
    pub fn set_quantity(&mut self, product_id: EntityId, quantity: u32) {
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity.max(1);
        }
    }

    pub fn set_discount(&mut self, product_id: EntityId, percent: f64) {
        if let Some(line) = self.line_mut(product_id) {
            line.discount_percent = clamp_percent(percent);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn totals(&self) -> CartTotals {
        let subtotal: f64 = self.lines.iter().map(CartLine::gross).sum();
        let discount: f64 = self.lines.iter().map(CartLine::discount_amount).sum();
        let taxable = subtotal - discount;
        let tax = taxable * self.tax_percent / 100.0;
        CartTotals {
            subtotal,
            discount,
            taxable,
            tax,
            total: taxable + tax,
        }
    }

    /// Lines whose quantity exceeds the stock known at pick time
    pub fn over_stock(&self) -> Vec<&CartLine> {
        self.lines
            .iter()
            .filter(|l| l.quantity > l.product.stock)
            .collect()
    }

    fn line_mut(&mut self, product_id: EntityId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.product.product_id == product_id)
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helmet(id: EntityId, price: f64) -> CartProduct {
        CartProduct {
            product_id: id,
            code: format!("SP{:04}", id),
            name: "Mũ bảo hiểm 3/4".to_string(),
            category: "Mũ 3/4".to_string(),
            unit_price: price,
            stock: 5,
        }
    }

    #[test]
    fn test_totals_with_discount_and_tax() {
        let mut cart = Cart::default();
        cart.add(helmet(1, 1_500_000.0));
        cart.set_discount(1, 5.0);
        let totals = cart.totals();
        assert_eq!(totals.subtotal, 1_500_000.0);
        assert_eq!(totals.discount, 75_000.0);
        assert_eq!(totals.tax, 142_500.0);
        assert_eq!(totals.total, 1_567_500.0);
    }

    #[test]
    fn test_duplicate_add_increments() {
        let mut cart = Cart::default();
        cart.add(helmet(1, 100_000.0));
        cart.add(helmet(1, 100_000.0));
        cart.add(helmet(2, 200_000.0));
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_clamps() {
        let mut cart = Cart::new(150.0);
        assert_eq!(cart.tax_percent(), 100.0);
        cart.add(helmet(1, 100_000.0));
        cart.set_quantity(1, 0);
        assert_eq!(cart.lines()[0].quantity, 1);
        cart.set_discount(1, 120.0);
        assert_eq!(cart.lines()[0].discount_percent, 100.0);
        cart.set_discount(1, -3.0);
        assert_eq!(cart.lines()[0].discount_percent, 0.0);
    }

    #[test]
    fn test_remove_and_over_stock() {
        let mut cart = Cart::default();
        cart.add(helmet(1, 100_000.0));
        cart.set_quantity(1, 6);
        assert_eq!(cart.over_stock().len(), 1);
        cart.remove(1);
        assert!(cart.is_empty());
        assert_eq!(cart.totals(), CartTotals::default());
    }
}
