//! Tab titles by tab key.
//!
//! List tabs use the resource's `list_name`; detail tabs are built with
//! [`detail_tab_label`].

use contracts::domain::a001_color::aggregate::Color;
use contracts::domain::a002_material::aggregate::Material;
use contracts::domain::a003_manufacturer::aggregate::Manufacturer;
use contracts::domain::a004_origin::aggregate::Origin;
use contracts::domain::a005_weight::aggregate::Weight;
use contracts::domain::a006_helmet_type::aggregate::HelmetType;
use contracts::domain::a007_helmet_style::aggregate::HelmetStyle;
use contracts::domain::a008_safety_tech::aggregate::SafetyTech;
use contracts::domain::a009_product::aggregate::Product;
use contracts::domain::a010_customer::aggregate::Customer;
use contracts::domain::a012_staff::aggregate::Staff;
use contracts::domain::a013_invoice::aggregate::Invoice;
use contracts::domain::a014_promotion::aggregate::Promotion;
use contracts::domain::a015_voucher::aggregate::Voucher;
use contracts::domain::a016_imei::aggregate::Imei;
use contracts::domain::a017_inventory::aggregate::Inventory;
use contracts::domain::a018_counter_sale::aggregate::CounterSaleResource;
use contracts::domain::a019_size::aggregate::Size;
use contracts::domain::common::Resource;

/// Key prefix of the addresses tab of one customer
pub const CUSTOMER_ADDRESSES_PREFIX: &str = "a011_customer_address_";
/// Key prefix of the IMEI tab of one product
pub const PRODUCT_IMEI_PREFIX: &str = "a016_imei_";
/// Key prefix of the detail tab of one invoice
pub const INVOICE_DETAIL_PREFIX: &str = "a013_invoice_detail_";

/// Readable title of a list tab; empty for unknown keys
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "a001_color" => Color::list_name(),
        "a002_material" => Material::list_name(),
        "a003_manufacturer" => Manufacturer::list_name(),
        "a004_origin" => Origin::list_name(),
        "a005_weight" => Weight::list_name(),
        "a006_helmet_type" => HelmetType::list_name(),
        "a007_helmet_style" => HelmetStyle::list_name(),
        "a008_safety_tech" => SafetyTech::list_name(),
        "a009_product" => Product::list_name(),
        "a010_customer" => Customer::list_name(),
        "a012_staff" => Staff::list_name(),
        "a013_invoice" => Invoice::list_name(),
        "a014_promotion" => Promotion::list_name(),
        "a015_voucher" => Voucher::list_name(),
        "a016_imei" => Imei::list_name(),
        "a017_inventory" => Inventory::list_name(),
        "a018_counter_sale" => CounterSaleResource::list_name(),
        "a019_size" => Size::list_name(),
        _ => "",
    }
}

/// «<entity> · <identifier>»
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

/// Id at the end of a detail tab key
pub fn detail_id(key: &str, prefix: &str) -> Option<i64> {
    key.strip_prefix(prefix)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_keys_use_the_resource_list_name() {
        assert_eq!(tab_label_for_key("a001_color"), "Quản lý màu sắc");
        assert_eq!(tab_label_for_key("a013_invoice"), "Quản lý hóa đơn");
        assert_eq!(tab_label_for_key("unknown"), "");
    }

    #[test]
    fn detail_keys_carry_a_numeric_id() {
        assert_eq!(detail_id("a016_imei_42", PRODUCT_IMEI_PREFIX), Some(42));
        assert_eq!(detail_id("a016_imei_x", PRODUCT_IMEI_PREFIX), None);
        assert_eq!(detail_id("a001_color", PRODUCT_IMEI_PREFIX), None);
        assert_eq!(detail_tab_label("Hóa đơn", "HD0001"), "Hóa đơn · HD0001");
    }
}
