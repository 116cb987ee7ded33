use serde::{Deserialize, Serialize};

use crate::domain::common::lookup::{optional_text, text};
use crate::domain::common::{EntityId, Resource};
use crate::shared::cart::CartProduct;
use crate::shared::code_gen::next_product_code;
use crate::shared::validation::{parse_number, rules, ValidationErrors};

// ============================================================================
// Attributes
// ============================================================================

/// The eight lookups every product references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductAttribute {
    HelmetType,
    Manufacturer,
    Material,
    Weight,
    Origin,
    Style,
    SafetyTech,
    Color,
}

impl ProductAttribute {
    pub const ALL: [ProductAttribute; 8] = [
        ProductAttribute::HelmetType,
        ProductAttribute::Manufacturer,
        ProductAttribute::Material,
        ProductAttribute::Weight,
        ProductAttribute::Origin,
        ProductAttribute::Style,
        ProductAttribute::SafetyTech,
        ProductAttribute::Color,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            ProductAttribute::HelmetType => "Loại mũ",
            ProductAttribute::Manufacturer => "Nhà sản xuất",
            ProductAttribute::Material => "Chất liệu vỏ",
            ProductAttribute::Weight => "Trọng lượng",
            ProductAttribute::Origin => "Xuất xứ",
            ProductAttribute::Style => "Kiểu dáng",
            ProductAttribute::SafetyTech => "Công nghệ an toàn",
            ProductAttribute::Color => "Màu sắc",
        }
    }

    /// Form field key used for errors
    pub fn field(self) -> &'static str {
        match self {
            ProductAttribute::HelmetType => "loaiMuBaoHiemId",
            ProductAttribute::Manufacturer => "nhaSanXuatId",
            ProductAttribute::Material => "chatLieuVoId",
            ProductAttribute::Weight => "trongLuongId",
            ProductAttribute::Origin => "xuatXuId",
            ProductAttribute::Style => "kieuDangMuId",
            ProductAttribute::SafetyTech => "congNgheAnToanId",
            ProductAttribute::Color => "mauSacId",
        }
    }
}

pub type AttributeIds = [Option<EntityId>; 8];

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: EntityId,
    #[serde(rename = "maSanPham", default)]
    pub code: Option<String>,
    #[serde(rename = "tenSanPham")]
    pub name: String,
    #[serde(rename = "moTa", default)]
    pub description: Option<String>,
    #[serde(rename = "giaBan", default)]
    pub price: f64,
    #[serde(rename = "soLuongTon", default)]
    pub stock: Option<i64>,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
    #[serde(rename = "ngayTao", default)]
    pub created_at: Option<String>,

    #[serde(rename = "loaiMuBaoHiem", default)]
    pub helmet_type: Option<String>,
    #[serde(rename = "nhaSanXuat", default)]
    pub manufacturer: Option<String>,
    #[serde(rename = "chatLieuVo", default)]
    pub material: Option<String>,
    #[serde(rename = "trongLuong", default)]
    pub weight: Option<String>,
    #[serde(rename = "xuatXu", default)]
    pub origin: Option<String>,
    #[serde(rename = "kieuDangMu", default)]
    pub style: Option<String>,
    #[serde(rename = "congNgheAnToan", default)]
    pub safety_tech: Option<String>,
    #[serde(rename = "mauSac", default)]
    pub color: Option<String>,

    #[serde(rename = "loaiMuBaoHiemId", default)]
    pub helmet_type_id: Option<EntityId>,
    #[serde(rename = "nhaSanXuatId", default)]
    pub manufacturer_id: Option<EntityId>,
    #[serde(rename = "chatLieuVoId", default)]
    pub material_id: Option<EntityId>,
    #[serde(rename = "trongLuongId", default)]
    pub weight_id: Option<EntityId>,
    #[serde(rename = "xuatXuId", default)]
    pub origin_id: Option<EntityId>,
    #[serde(rename = "kieuDangMuId", default)]
    pub style_id: Option<EntityId>,
    #[serde(rename = "congNgheAnToanId", default)]
    pub safety_tech_id: Option<EntityId>,
    #[serde(rename = "mauSacId", default)]
    pub color_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRequest {
    #[serde(rename = "maSanPham")]
    pub code: String,
    #[serde(rename = "tenSanPham")]
    pub name: String,
    #[serde(rename = "moTa")]
    pub description: Option<String>,
    #[serde(rename = "giaBan")]
    pub price: f64,
    #[serde(rename = "soLuongTon")]
    pub stock: i64,
    #[serde(rename = "trangThai")]
    pub active: bool,
    #[serde(rename = "loaiMuBaoHiemId")]
    pub helmet_type_id: Option<EntityId>,
    #[serde(rename = "nhaSanXuatId")]
    pub manufacturer_id: Option<EntityId>,
    #[serde(rename = "chatLieuVoId")]
    pub material_id: Option<EntityId>,
    #[serde(rename = "trongLuongId")]
    pub weight_id: Option<EntityId>,
    #[serde(rename = "xuatXuId")]
    pub origin_id: Option<EntityId>,
    #[serde(rename = "kieuDangMuId")]
    pub style_id: Option<EntityId>,
    #[serde(rename = "congNgheAnToanId")]
    pub safety_tech_id: Option<EntityId>,
    #[serde(rename = "mauSacId")]
    pub color_id: Option<EntityId>,
}

// ============================================================================
// View models
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub id: EntityId,
    pub code: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub active: bool,
    pub created_at: String,
    /// Display names, indexed by [`ProductAttribute::index`]
    pub attribute_names: [String; 8],
    pub attribute_ids: AttributeIds,
}

impl ProductRow {
    pub fn attribute(&self, attribute: ProductAttribute) -> &str {
        &self.attribute_names[attribute.index()]
    }

    pub fn to_cart_product(&self) -> CartProduct {
        CartProduct {
            product_id: self.id,
            code: self.code.clone(),
            name: self.name.clone(),
            category: self.attribute(ProductAttribute::HelmetType).to_string(),
            unit_price: self.price,
            stock: self.stock.max(0) as u32,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub code: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub active: bool,
    pub attributes: AttributeIds,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            description: String::new(),
            price: String::new(),
            stock: "0".to_string(),
            active: true,
            attributes: [None; 8],
        }
    }
}

impl ProductForm {
    pub fn attribute(&self, attribute: ProductAttribute) -> Option<EntityId> {
        self.attributes[attribute.index()]
    }

    pub fn set_attribute(&mut self, attribute: ProductAttribute, id: Option<EntityId>) {
        self.attributes[attribute.index()] = id;
    }
}

/// Code suggested for a new product given the newest existing one
pub fn suggest_code(latest: Option<&ProductRow>) -> String {
    next_product_code(latest.map(|p| p.code.as_str()))
}

// ============================================================================
// Resource
// ============================================================================

pub struct Product;

impl Resource for Product {
    type Dto = ProductDto;
    type Row = ProductRow;
    type Form = ProductForm;
    type Request = ProductRequest;

    fn aggregate_index() -> &'static str {
        "a009"
    }

    fn collection_name() -> &'static str {
        "product"
    }

    fn element_name() -> &'static str {
        "Sản phẩm"
    }

    fn list_name() -> &'static str {
        "Quản lý sản phẩm"
    }

    fn endpoint() -> &'static str {
        "/san-pham"
    }

    fn row_id(row: &ProductRow) -> EntityId {
        row.id
    }

    fn to_row(dto: ProductDto) -> ProductRow {
        ProductRow {
            id: dto.id,
            code: text(dto.code),
            name: dto.name.trim().to_string(),
            description: text(dto.description),
            price: dto.price,
            stock: dto.stock.unwrap_or(0),
            active: dto.active.unwrap_or(true),
            created_at: text(dto.created_at),
            attribute_names: [
                text(dto.helmet_type),
                text(dto.manufacturer),
                text(dto.material),
                text(dto.weight),
                text(dto.origin),
                text(dto.style),
                text(dto.safety_tech),
                text(dto.color),
            ],
            attribute_ids: [
                dto.helmet_type_id,
                dto.manufacturer_id,
                dto.material_id,
                dto.weight_id,
                dto.origin_id,
                dto.style_id,
                dto.safety_tech_id,
                dto.color_id,
            ],
        }
    }

    fn form_from_row(row: &ProductRow) -> ProductForm {
        ProductForm {
            code: row.code.clone(),
            name: row.name.clone(),
            description: row.description.clone(),
            price: format!("{}", row.price),
            stock: row.stock.to_string(),
            active: row.active,
            attributes: row.attribute_ids,
        }
    }

    fn validate(form: &ProductForm) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check("code", rules::CODE.validate_string(&form.code, "Mã sản phẩm"));
        errors.check("name", rules::NAME.validate_string(&form.name, "Tên sản phẩm"));
        errors.check(
            "description",
            rules::DESCRIPTION.validate_string(&form.description, "Mô tả"),
        );
        errors.check("price", rules::PRICE.validate_number_text(&form.price, "Giá bán"));
        errors.check("stock", rules::QUANTITY.validate_number_text(&form.stock, "Số lượng tồn"));
        for attribute in ProductAttribute::ALL {
            if form.attribute(attribute).is_none() {
                errors.insert(
                    attribute.field(),
                    format!("Vui lòng chọn {}", attribute.label().to_lowercase()),
                );
            }
        }
        errors
    }

    fn to_request(form: &ProductForm) -> ProductRequest {
        let [helmet_type_id, manufacturer_id, material_id, weight_id, origin_id, style_id, safety_tech_id, color_id] =
            form.attributes;
        ProductRequest {
            code: form.code.trim().to_string(),
            name: form.name.trim().to_string(),
            description: optional_text(&form.description),
            price: parse_number(&form.price).unwrap_or_default(),
            stock: parse_number(&form.stock).unwrap_or_default() as i64,
            active: form.active,
            helmet_type_id,
            manufacturer_id,
            material_id,
            weight_id,
            origin_id,
            style_id,
            safety_tech_id,
            color_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 12,
        "maSanPham": "SP0012",
        "tenSanPham": "Royal M139",
        "moTa": "Mũ 3/4 kính âm",
        "giaBan": 450000,
        "soLuongTon": 25,
        "trangThai": true,
        "ngayTao": "2025-01-10T09:00:00",
        "loaiMuBaoHiem": "Mũ 3/4",
        "nhaSanXuat": "Royal",
        "mauSac": "Đen nhám",
        "loaiMuBaoHiemId": 2,
        "nhaSanXuatId": 5,
        "chatLieuVoId": 1,
        "trongLuongId": 3,
        "xuatXuId": 1,
        "kieuDangMuId": 4,
        "congNgheAnToanId": 2,
        "mauSacId": 7
    }"#;

    fn sample_row() -> ProductRow {
        Product::to_row(serde_json::from_str(SAMPLE).unwrap())
    }

    #[test]
    fn test_mapping_keeps_names_and_ids() {
        let row = sample_row();
        assert_eq!(row.attribute(ProductAttribute::Manufacturer), "Royal");
        assert_eq!(row.attribute(ProductAttribute::Origin), "");
        assert_eq!(row.attribute_ids[ProductAttribute::Color.index()], Some(7));
    }

    #[test]
    fn test_edit_form_produces_request() {
        let form = Product::form_from_row(&sample_row());
        assert!(Product::validate(&form).is_empty());
        let json = serde_json::to_value(Product::to_request(&form)).unwrap();
        assert_eq!(json["maSanPham"], "SP0012");
        assert_eq!(json["giaBan"], 450000.0);
        assert_eq!(json["soLuongTon"], 25);
        assert_eq!(json["mauSacId"], 7);
    }

    #[test]
    fn test_missing_attributes_reported_per_field() {
        let mut form = Product::blank_form();
        form.code = "SP0001".into();
        form.name = "Andes 3S".into();
        form.price = "350000".into();
        form.set_attribute(ProductAttribute::HelmetType, Some(1));
        let errors = Product::validate(&form);
        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get("mauSacId"), Some("Vui lòng chọn màu sắc"));
        assert!(!errors.contains("loaiMuBaoHiemId"));
    }

    #[test]
    fn test_suggest_code() {
        assert_eq!(suggest_code(None), "SP0001");
        assert_eq!(suggest_code(Some(&sample_row())), "SP0013");
        let mut odd = sample_row();
        odd.code = "ROYAL-1".into();
        assert_eq!(suggest_code(Some(&odd)), "SP0001");
    }

    #[test]
    fn test_cart_product() {
        let product = sample_row().to_cart_product();
        assert_eq!(product.category, "Mũ 3/4");
        assert_eq!(product.unit_price, 450000.0);
        assert_eq!(product.stock, 25);
    }
}
