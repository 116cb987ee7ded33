//! Walk-in sales rung up at the counter. Kept in memory; there is no backend.

use std::cmp::Ordering;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::common::{EntityId, Resource};
use crate::shared::cart::{Cart, CartProduct, DEFAULT_TAX_PERCENT};
use crate::shared::code_gen::next_sale_number;
use crate::shared::local_store::{contains_folded, LocalRecord, LocalStore};
use crate::shared::validation::{rules, ValidationErrors};

pub const STATUS_FILTER: &str = "status";
pub const PAYMENT_STATUS_FILTER: &str = "paymentStatus";
pub const PAYMENT_METHOD_FILTER: &str = "paymentMethod";

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Transfer,
        PaymentMethod::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Tiền mặt",
            PaymentMethod::Card => "Thẻ",
            PaymentMethod::Transfer => "Chuyển khoản",
            PaymentMethod::Other => "Khác",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Partial,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Partial,
        PaymentStatus::Refunded,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Chờ thanh toán",
            PaymentStatus::Paid => "Đã thanh toán",
            PaymentStatus::Partial => "Thanh toán một phần",
            PaymentStatus::Refunded => "Hoàn tiền",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "badge-warning",
            PaymentStatus::Paid => "badge-success",
            PaymentStatus::Partial => "badge-info",
            PaymentStatus::Refunded => "badge-danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    #[default]
    Draft,
    Processing,
    Completed,
    Cancelled,
}

impl SaleStatus {
    pub const ALL: [SaleStatus; 4] = [
        SaleStatus::Draft,
        SaleStatus::Processing,
        SaleStatus::Completed,
        SaleStatus::Cancelled,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            SaleStatus::Draft => "draft",
            SaleStatus::Processing => "processing",
            SaleStatus::Completed => "completed",
            SaleStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SaleStatus::Draft => "Nháp",
            SaleStatus::Processing => "Đang xử lý",
            SaleStatus::Completed => "Hoàn thành",
            SaleStatus::Cancelled => "Hủy",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            SaleStatus::Draft => "badge-secondary",
            SaleStatus::Processing => "badge-primary",
            SaleStatus::Completed => "badge-success",
            SaleStatus::Cancelled => "badge-danger",
        }
    }
}

// ============================================================================
// Sale
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: EntityId,
    pub product_code: String,
    pub product_name: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub discount_percent: f64,
    pub stock_quantity: u32,
}

impl SaleLine {
    pub fn net(&self) -> f64 {
        let gross = self.unit_price * self.quantity as f64;
        gross - gross * self.discount_percent / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterSale {
    pub id: EntityId,
    pub sale_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub staff_name: String,
    pub items: Vec<SaleLine>,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub tax: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: SaleStatus,
    pub notes: String,
    pub created_at: String,
}

impl CounterSale {
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Rebuilds the cart the sale was made from
    pub fn to_cart(&self) -> Cart {
        let mut cart = Cart::new(self.tax);
        for line in &self.items {
            cart.add(CartProduct {
                product_id: line.product_id,
                code: line.product_code.clone(),
                name: line.product_name.clone(),
                category: line.category.clone(),
                unit_price: line.unit_price,
                stock: line.stock_quantity,
            });
            cart.set_quantity(line.product_id, line.quantity);
            cart.set_discount(line.product_id, line.discount_percent);
        }
        cart
    }
}

impl LocalRecord for CounterSale {
    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn matches_keyword(&self, keyword: &str) -> bool {
        contains_folded(&self.sale_number, keyword)
            || contains_folded(&self.customer_name, keyword)
            || self.customer_phone.contains(keyword)
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match key {
            STATUS_FILTER => self.status.code() == value,
            PAYMENT_STATUS_FILTER => self.payment_status.code() == value,
            PAYMENT_METHOD_FILTER => self.payment_method.code() == value,
            _ => true,
        }
    }

    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "saleNumber" => self.sale_number.cmp(&other.sale_number),
            "customerName" => self.customer_name.cmp(&other.customer_name),
            "totalAmount" => self.total_amount.total_cmp(&other.total_amount),
            "createdAt" => self.created_at.cmp(&other.created_at),
            _ => self.id.cmp(&other.id),
        }
    }
}

// ============================================================================
// Form
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CounterSaleForm {
    pub sale_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub staff_name: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: SaleStatus,
    pub notes: String,
    pub cart: Cart,
}

impl Default for CounterSaleForm {
    fn default() -> Self {
        Self {
            sale_number: String::new(),
            customer_name: String::new(),
            customer_phone: String::new(),
            staff_name: String::new(),
            payment_method: PaymentMethod::Cash,
            payment_status: PaymentStatus::Pending,
            status: SaleStatus::Completed,
            notes: String::new(),
            cart: Cart::new(DEFAULT_TAX_PERCENT),
        }
    }
}

/// Blank sale numbered after the existing sales of `today`
pub fn new_sale_form(today: NaiveDate, existing: &[CounterSale]) -> CounterSaleForm {
    CounterSaleForm {
        sale_number: next_sale_number(today, existing.iter().map(|s| s.sale_number.as_str())),
        ..CounterSaleForm::default()
    }
}

pub struct CounterSaleResource;

impl Resource for CounterSaleResource {
    type Dto = CounterSale;
    type Row = CounterSale;
    type Form = CounterSaleForm;
    type Request = CounterSale;

    fn aggregate_index() -> &'static str {
        "a018"
    }

    fn collection_name() -> &'static str {
        "counter_sale"
    }

    fn element_name() -> &'static str {
        "Đơn bán tại quầy"
    }

    fn list_name() -> &'static str {
        "Bán hàng tại quầy"
    }

    /// Client-side only
    fn endpoint() -> &'static str {
        ""
    }

    fn row_id(row: &CounterSale) -> EntityId {
        row.id
    }

    fn to_row(dto: CounterSale) -> CounterSale {
        dto
    }

    fn form_from_row(row: &CounterSale) -> CounterSaleForm {
        CounterSaleForm {
            sale_number: row.sale_number.clone(),
            customer_name: row.customer_name.clone(),
            customer_phone: row.customer_phone.clone(),
            staff_name: row.staff_name.clone(),
            payment_method: row.payment_method,
            payment_status: row.payment_status,
            status: row.status,
            notes: row.notes.clone(),
            cart: row.to_cart(),
        }
    }

    fn validate(form: &CounterSaleForm) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if form.sale_number.trim().is_empty() {
            errors.insert("saleNumber", "Mã đơn không được để trống");
        }
        errors.check(
            "customerName",
            rules::NAME.optional().validate_string(&form.customer_name, "Tên khách hàng"),
        );
        errors.check(
            "customerPhone",
            rules::PHONE.optional().validate_string(&form.customer_phone, "Số điện thoại"),
        );
        errors.check("staffName", rules::NAME.validate_string(&form.staff_name, "Nhân viên"));
        errors.check("notes", rules::DESCRIPTION.validate_string(&form.notes, "Ghi chú"));
        if form.cart.is_empty() {
            errors.insert("items", "Giỏ hàng trống!");
        } else if let Some(line) = form.cart.over_stock().first() {
            errors.insert(
                "items",
                format!(
                    "Số lượng {} vượt quá tồn kho ({})",
                    line.product.name, line.product.stock
                ),
            );
        }
        errors
    }

    /// Totals are frozen from the cart at save time
    fn to_request(form: &CounterSaleForm) -> CounterSale {
        let totals = form.cart.totals();
        CounterSale {
            id: 0,
            sale_number: form.sale_number.trim().to_string(),
            customer_name: form.customer_name.trim().to_string(),
            customer_phone: form.customer_phone.trim().to_string(),
            staff_name: form.staff_name.trim().to_string(),
            items: form
                .cart
                .lines()
                .iter()
                .map(|line| SaleLine {
                    product_id: line.product.product_id,
                    product_code: line.product.code.clone(),
                    product_name: line.product.name.clone(),
                    category: line.product.category.clone(),
                    quantity: line.quantity,
                    unit_price: line.product.unit_price,
                    discount_percent: line.discount_percent,
                    stock_quantity: line.product.stock,
                })
                .collect(),
            subtotal: totals.subtotal,
            discount_amount: totals.discount,
            tax: form.cart.tax_percent(),
            tax_amount: totals.tax,
            total_amount: totals.total,
            payment_method: form.payment_method,
            payment_status: form.payment_status,
            status: form.status,
            notes: form.notes.trim().to_string(),
            created_at: Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

// ============================================================================
// Sample data
// ============================================================================

fn sample_product(id: EntityId, code: &str, name: &str, category: &str, price: f64, stock: u32) -> CartProduct {
    CartProduct {
        product_id: id,
        code: code.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        unit_price: price,
        stock,
    }
}

fn sample_sale(
    id: EntityId,
    number: &str,
    customer: (&str, &str),
    staff: &str,
    item: (CartProduct, f64),
    method: PaymentMethod,
    created_at: &str,
) -> CounterSale {
    let (product, discount) = item;
    let product_id = product.product_id;
    let mut form = CounterSaleForm {
        sale_number: number.to_string(),
        customer_name: customer.0.to_string(),
        customer_phone: customer.1.to_string(),
        staff_name: staff.to_string(),
        payment_method: method,
        payment_status: PaymentStatus::Paid,
        notes: "Bán tại quầy".to_string(),
        ..CounterSaleForm::default()
    };
    form.cart.add(product);
    form.cart.set_discount(product_id, discount);
    CounterSale {
        id,
        created_at: created_at.to_string(),
        ..CounterSaleResource::to_request(&form)
    }
}

/// Store seeded with two completed demo sales
pub fn sample_store() -> LocalStore<CounterSale> {
    LocalStore::new(vec![
        sample_sale(
            1,
            "CS-20240115-001",
            ("Nguyễn Văn An", "0123456789"),
            "Nguyễn Văn A",
            (sample_product(1, "P001", "AGV K1 Helmet", "Mũ bảo hiểm toàn đầu", 1_500_000.0, 50), 5.0),
            PaymentMethod::Cash,
            "2024-01-15T09:30:00",
        ),
        sample_sale(
            2,
            "CS-20240116-001",
            ("Trần Thị Bình", "0987654321"),
            "Trần Thị B",
            (sample_product(2, "P002", "Shoei X14 Helmet", "Mũ bảo hiểm đua xe", 2_500_000.0, 30), 0.0),
            PaymentMethod::Card,
            "2024-01-16T14:10:00",
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::paging::PageQuery;

    fn helmet(id: EntityId, price: f64, stock: u32) -> CartProduct {
        CartProduct {
            product_id: id,
            code: format!("SP{:04}", id),
            name: format!("Mũ {}", id),
            category: "Fullface".to_string(),
            unit_price: price,
            stock,
        }
    }

    #[test]
    fn test_sample_totals_match_cart_formula() {
        let store = sample_store();
        let first = store.get(1).unwrap();
        assert_eq!(first.discount_amount, 75_000.0);
        assert_eq!(first.tax_amount, 142_500.0);
        assert_eq!(first.total_amount, 1_567_500.0);
        assert_eq!(store.get(2).unwrap().total_amount, 2_750_000.0);
    }

    #[test]
    fn test_empty_cart_rejected() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
        let mut form = new_sale_form(today, sample_store().items());
        form.staff_name = "Lê Văn C".into();
        assert_eq!(form.sale_number, "CS-20250308-001");
        assert_eq!(CounterSaleResource::validate(&form).get("items"), Some("Giỏ hàng trống!"));

        form.cart.add(helmet(1, 900_000.0, 2));
        assert!(CounterSaleResource::validate(&form).is_empty());
        form.cart.set_quantity(1, 3);
        assert!(CounterSaleResource::validate(&form).contains("items"));
    }

    #[test]
    fn test_checkout_freezes_totals() {
        let mut store = sample_store();
        let mut form = CounterSaleForm {
            sale_number: "CS-20250308-001".into(),
            staff_name: "Lê Văn C".into(),
            ..CounterSaleForm::default()
        };
        form.cart.add(helmet(7, 1_000_000.0, 10));
        form.cart.add(helmet(7, 1_000_000.0, 10));
        form.cart.set_discount(7, 10.0);

        let sale = store.create(CounterSaleResource::to_request(&form));
        assert_eq!(sale.id, 3);
        assert_eq!(sale.item_count(), 2);
        assert_eq!(sale.subtotal, 2_000_000.0);
        assert_eq!(sale.total_amount, 1_980_000.0);
        assert_eq!(CounterSaleResource::form_from_row(&sale).cart, form.cart);
    }

    #[test]
    fn test_filters_and_search() {
        let store = sample_store();
        let mut query = PageQuery::new(CounterSaleResource::default_sort(), 10);
        query.filters.insert(PAYMENT_METHOD_FILTER.into(), "card".into());
        assert_eq!(store.query(&query).content[0].sale_number, "CS-20240116-001");

        query.filters.clear();
        query.keyword = "0123".into();
        assert_eq!(store.query(&query).total_elements, 1);
        query.keyword = "bình".into();
        assert_eq!(store.query(&query).content[0].id, 2);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(SaleStatus::Cancelled.label(), "Hủy");
        assert_eq!(PaymentStatus::Partial.label(), "Thanh toán một phần");
        assert_eq!(PaymentMethod::Transfer.label(), "Chuyển khoản");
        let json = serde_json::to_value(PaymentStatus::Refunded).unwrap();
        assert_eq!(json, "refunded");
    }
}
