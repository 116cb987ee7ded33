use std::cmp::Ordering;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::domain::common::{EntityId, Resource};
use crate::shared::local_store::{contains_folded, LocalRecord, LocalStore};
use crate::shared::paging::SortSpec;
use crate::shared::validation::{parse_number, rules, ValidationErrors, ValidationRules};

pub const STATUS_FILTER: &str = "status";
pub const LOCATION_FILTER: &str = "location";

const LOCATION: ValidationRules = ValidationRules {
    required: true,
    max_length: Some(100),
    ..ValidationRules::none()
};

const SHORT_TEXT: ValidationRules = ValidationRules {
    max_length: Some(50),
    ..ValidationRules::none()
};

// ============================================================================
// Stock status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryStatus {
    InStock,
    Low,
    Out,
    Overstock,
}

impl InventoryStatus {
    pub const ALL: [InventoryStatus; 4] = [
        InventoryStatus::InStock,
        InventoryStatus::Low,
        InventoryStatus::Out,
        InventoryStatus::Overstock,
    ];

    /// Checked in order: empty, at or under minimum, at or over maximum
    pub fn of(current: u32, min: u32, max: u32) -> Self {
        if current == 0 {
            InventoryStatus::Out
        } else if current <= min {
            InventoryStatus::Low
        } else if current >= max {
            InventoryStatus::Overstock
        } else {
            InventoryStatus::InStock
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            InventoryStatus::InStock => "in-stock",
            InventoryStatus::Low => "low",
            InventoryStatus::Out => "out",
            InventoryStatus::Overstock => "overstock",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InventoryStatus::InStock => "Còn hàng",
            InventoryStatus::Low => "Sắp hết",
            InventoryStatus::Out => "Hết hàng",
            InventoryStatus::Overstock => "Tồn kho cao",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            InventoryStatus::InStock => "status-in-stock",
            InventoryStatus::Low => "status-low-stock",
            InventoryStatus::Out => "status-out-of-stock",
            InventoryStatus::Overstock => "status-overstock",
        }
    }
}

// ============================================================================
// Item
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: EntityId,
    pub product_code: String,
    pub product_name: String,
    pub manufacturer: String,
    pub color: String,
    pub size: String,
    pub current_stock: u32,
    pub min_stock: u32,
    pub max_stock: u32,
    pub unit_price: f64,
    pub location: String,
    pub last_updated: String,
}

impl InventoryItem {
    pub fn status(&self) -> InventoryStatus {
        InventoryStatus::of(self.current_stock, self.min_stock, self.max_stock)
    }

    pub fn total_value(&self) -> f64 {
        self.current_stock as f64 * self.unit_price
    }
}

impl LocalRecord for InventoryItem {
    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn matches_keyword(&self, keyword: &str) -> bool {
        [&self.product_name, &self.product_code, &self.manufacturer, &self.location]
            .into_iter()
            .any(|field| contains_folded(field, keyword))
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match key {
            STATUS_FILTER => self.status().code() == value,
            LOCATION_FILTER => self.location == value,
            _ => true,
        }
    }

    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "productCode" => self.product_code.cmp(&other.product_code),
            "productName" => self.product_name.cmp(&other.product_name),
            "currentStock" => self.current_stock.cmp(&other.current_stock),
            "unitPrice" => self.unit_price.total_cmp(&other.unit_price),
            "totalValue" => self.total_value().total_cmp(&other.total_value()),
            "location" => self.location.cmp(&other.location),
            "lastUpdated" => self.last_updated.cmp(&other.last_updated),
            _ => self.id.cmp(&other.id),
        }
    }
}

/// Counts for the summary cards above the table
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InventoryStats {
    pub in_stock: usize,
    pub low: usize,
    pub out: usize,
    pub overstock: usize,
    pub total_value: f64,
}

impl InventoryStats {
    pub fn of(items: &[InventoryItem]) -> Self {
        items.iter().fold(Self::default(), |mut stats, item| {
            match item.status() {
                InventoryStatus::InStock => stats.in_stock += 1,
                InventoryStatus::Low => stats.low += 1,
                InventoryStatus::Out => stats.out += 1,
                InventoryStatus::Overstock => stats.overstock += 1,
            }
            stats.total_value += item.total_value();
            stats
        })
    }
}

/// Distinct warehouse locations in first-seen order
pub fn locations(items: &[InventoryItem]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if !seen.contains(&item.location) {
            seen.push(item.location.clone());
        }
    }
    seen
}

// ============================================================================
// Form
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryForm {
    pub product_code: String,
    pub product_name: String,
    pub manufacturer: String,
    pub color: String,
    pub size: String,
    pub current_stock: String,
    pub min_stock: String,
    pub max_stock: String,
    pub unit_price: String,
    pub location: String,
}

impl InventoryForm {
    /// Status the item would get if saved now
    pub fn preview_status(&self) -> Option<InventoryStatus> {
        let current = parse_count(&self.current_stock)?;
        let min = parse_count(&self.min_stock)?;
        let max = parse_count(&self.max_stock)?;
        Some(InventoryStatus::of(current, min, max))
    }
}

fn parse_count(raw: &str) -> Option<u32> {
    parse_number(raw)
        .filter(|v| *v >= 0.0 && v.fract() == 0.0)
        .map(|v| v as u32)
}

pub struct Inventory;

impl Resource for Inventory {
    type Dto = InventoryItem;
    type Row = InventoryItem;
    type Form = InventoryForm;
    type Request = InventoryItem;

    fn aggregate_index() -> &'static str {
        "a017"
    }

    fn collection_name() -> &'static str {
        "inventory"
    }

    fn element_name() -> &'static str {
        "Mặt hàng tồn kho"
    }

    fn list_name() -> &'static str {
        "Quản lý tồn kho"
    }

    /// Client-side only
    fn endpoint() -> &'static str {
        ""
    }

    fn default_sort() -> SortSpec {
        SortSpec::asc("productCode")
    }

    fn row_id(row: &InventoryItem) -> EntityId {
        row.id
    }

    fn to_row(dto: InventoryItem) -> InventoryItem {
        dto
    }

    fn form_from_row(row: &InventoryItem) -> InventoryForm {
        InventoryForm {
            product_code: row.product_code.clone(),
            product_name: row.product_name.clone(),
            manufacturer: row.manufacturer.clone(),
            color: row.color.clone(),
            size: row.size.clone(),
            current_stock: row.current_stock.to_string(),
            min_stock: row.min_stock.to_string(),
            max_stock: row.max_stock.to_string(),
            unit_price: row.unit_price.to_string(),
            location: row.location.clone(),
        }
    }

    fn validate(form: &InventoryForm) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check("productCode", rules::CODE.validate_string(&form.product_code, "Mã sản phẩm"));
        errors.check("productName", rules::NAME.validate_string(&form.product_name, "Tên sản phẩm"));
        errors.check("manufacturer", rules::NAME.optional().validate_string(&form.manufacturer, "Hãng sản xuất"));
        errors.check("color", SHORT_TEXT.validate_string(&form.color, "Màu sắc"));
        errors.check("size", SHORT_TEXT.validate_string(&form.size, "Kích cỡ"));
        errors.check(
            "currentStock",
            rules::QUANTITY.validate_number_text(&form.current_stock, "Tồn kho hiện tại"),
        );
        let min = errors
            .check("minStock", rules::QUANTITY.validate_number_text(&form.min_stock, "Tồn kho tối thiểu"))
            .flatten();
        let max = errors
            .check("maxStock", rules::QUANTITY.validate_number_text(&form.max_stock, "Tồn kho tối đa"))
            .flatten();
        if let (Some(min), Some(max)) = (min, max) {
            if max <= min {
                errors.insert("maxStock", "Tồn kho tối đa phải lớn hơn tồn kho tối thiểu");
            }
        }
        errors.check("unitPrice", rules::PRICE.validate_number_text(&form.unit_price, "Đơn giá"));
        errors.check("location", LOCATION.validate_string(&form.location, "Vị trí"));
        errors
    }

    /// Id is assigned by the store
    fn to_request(form: &InventoryForm) -> InventoryItem {
        InventoryItem {
            id: 0,
            product_code: form.product_code.trim().to_string(),
            product_name: form.product_name.trim().to_string(),
            manufacturer: form.manufacturer.trim().to_string(),
            color: form.color.trim().to_string(),
            size: form.size.trim().to_string(),
            current_stock: parse_count(&form.current_stock).unwrap_or_default(),
            min_stock: parse_count(&form.min_stock).unwrap_or_default(),
            max_stock: parse_count(&form.max_stock).unwrap_or_default(),
            unit_price: parse_number(&form.unit_price).unwrap_or_default(),
            location: form.location.trim().to_string(),
            last_updated: Local::now().date_naive().to_string(),
        }
    }
}

// ============================================================================
// Sample data
// ============================================================================

#[allow(clippy::too_many_arguments)]
fn sample(
    id: EntityId,
    code: &str,
    name: &str,
    manufacturer: &str,
    color: &str,
    size: &str,
    stock: (u32, u32, u32),
    unit_price: f64,
    location: &str,
    last_updated: &str,
) -> InventoryItem {
    InventoryItem {
        id,
        product_code: code.to_string(),
        product_name: name.to_string(),
        manufacturer: manufacturer.to_string(),
        color: color.to_string(),
        size: size.to_string(),
        current_stock: stock.0,
        min_stock: stock.1,
        max_stock: stock.2,
        unit_price,
        location: location.to_string(),
        last_updated: last_updated.to_string(),
    }
}

/// Store seeded with the demo warehouse
pub fn sample_store() -> LocalStore<InventoryItem> {
    LocalStore::new(vec![
        sample(1, "P001", "AGV K1 Helmet", "AGV", "Đen mờ", "M", (15, 5, 50), 2_500_000.0, "Kho A - Kệ 1", "2024-01-15"),
        sample(2, "P002", "Shoei X14 Helmet", "Shoei", "Đỏ", "L", (3, 5, 30), 3_500_000.0, "Kho A - Kệ 2", "2024-01-20"),
        sample(3, "P003", "Arai RX7V Helmet", "Arai", "Trắng", "XL", (0, 2, 20), 4_200_000.0, "Kho B - Kệ 3", "2024-01-25"),
        sample(4, "P004", "HJC RPHA 11 Helmet", "HJC", "Xanh dương", "M", (25, 10, 40), 1_800_000.0, "Kho A - Kệ 4", "2024-02-01"),
        sample(5, "P005", "Bell Race Star Helmet", "Bell", "Vàng", "L", (60, 15, 50), 2_800_000.0, "Kho B - Kệ 5", "2024-02-05"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::paging::PageQuery;

    #[test]
    fn test_status_thresholds_in_order() {
        assert_eq!(InventoryStatus::of(0, 0, 0), InventoryStatus::Out);
        assert_eq!(InventoryStatus::of(5, 5, 50), InventoryStatus::Low);
        assert_eq!(InventoryStatus::of(6, 5, 50), InventoryStatus::InStock);
        assert_eq!(InventoryStatus::of(50, 5, 50), InventoryStatus::Overstock);
        // low wins when min and max overlap
        assert_eq!(InventoryStatus::of(4, 10, 3), InventoryStatus::Low);
    }

    #[test]
    fn test_sample_stats() {
        let store = sample_store();
        let stats = InventoryStats::of(store.items());
        assert_eq!((stats.in_stock, stats.low, stats.out, stats.overstock), (2, 1, 1, 1));
        assert_eq!(store.items()[4].total_value(), 168_000_000.0);
        assert_eq!(locations(store.items()).len(), 5);
    }

    #[test]
    fn test_status_filter_and_keyword() {
        let store = sample_store();
        let mut query = PageQuery::new(Inventory::default_sort(), 10);
        query.filters.insert(STATUS_FILTER.into(), "low".into());
        let page = store.query(&query);
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].product_code, "P002");

        query.filters.clear();
        query.keyword = "kho b".into();
        assert_eq!(store.query(&query).total_elements, 2);
    }

    #[test]
    fn test_form_validation_and_preview() {
        let mut form = Inventory::form_from_row(&sample_store().items()[0]);
        assert!(Inventory::validate(&form).is_empty());
        assert_eq!(form.preview_status(), Some(InventoryStatus::InStock));

        form.max_stock = "5".into();
        assert_eq!(
            Inventory::validate(&form).get("maxStock"),
            Some("Tồn kho tối đa phải lớn hơn tồn kho tối thiểu")
        );
        form.current_stock = "-1".into();
        assert!(Inventory::validate(&form).contains("currentStock"));
        assert_eq!(form.preview_status(), None);
    }

    #[test]
    fn test_saved_item_gets_derived_value() {
        let mut store = sample_store();
        let mut form = InventoryForm {
            product_code: "P006".into(),
            product_name: "LS2 Stream".into(),
            current_stock: "4".into(),
            min_stock: "2".into(),
            max_stock: "20".into(),
            unit_price: "1.200.000".into(),
            location: "Kho C".into(),
            ..InventoryForm::default()
        };
        assert!(Inventory::validate(&form).is_empty());
        let created = store.create(Inventory::to_request(&form));
        assert_eq!(created.id, 6);
        assert_eq!(created.total_value(), 4_800_000.0);

        form.current_stock = "0".into();
        let updated = store.update(6, Inventory::to_request(&form)).unwrap();
        assert_eq!(updated.status(), InventoryStatus::Out);
    }
}
