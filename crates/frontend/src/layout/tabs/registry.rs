//! Tab key to view. Every key the sidebar or a row action can open is matched here.

use super::tab_labels::{
    detail_id, CUSTOMER_ADDRESSES_PREFIX, INVOICE_DETAIL_PREFIX, PRODUCT_IMEI_PREFIX,
};
use crate::domain::a001_color::ui::ColorList;
use crate::domain::a002_material::ui::MaterialList;
use crate::domain::a003_manufacturer::ui::ManufacturerList;
use crate::domain::a004_origin::ui::OriginList;
use crate::domain::a005_weight::ui::WeightList;
use crate::domain::a006_helmet_type::ui::HelmetTypeList;
use crate::domain::a007_helmet_style::ui::HelmetStyleList;
use crate::domain::a008_safety_tech::ui::SafetyTechList;
use crate::domain::a009_product::ui::ProductList;
use crate::domain::a010_customer::ui::CustomerList;
use crate::domain::a011_customer_address::ui::CustomerAddressList;
use crate::domain::a012_staff::ui::StaffList;
use crate::domain::a013_invoice::ui::{InvoiceDetail, InvoiceList};
use crate::domain::a014_promotion::ui::PromotionList;
use crate::domain::a015_voucher::ui::VoucherList;
use crate::domain::a016_imei::ui::{ImeiList, ProductImeiList};
use crate::domain::a017_inventory::ui::InventoryList;
use crate::domain::a018_counter_sale::ui::CounterSaleList;
use crate::domain::a019_size::ui::SizeList;
use contracts::domain::common::EntityId;
use leptos::logging::log;
use leptos::prelude::*;

/// Screen behind a tab key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TabTarget {
    Color,
    Material,
    Manufacturer,
    Origin,
    Weight,
    HelmetType,
    HelmetStyle,
    SafetyTech,
    Size,
    Product,
    Customer,
    Staff,
    Invoice,
    Promotion,
    Voucher,
    Imei,
    Inventory,
    CounterSale,
    CustomerAddresses(EntityId),
    ProductImei(EntityId),
    InvoiceDetail(EntityId),
}

/// Exact list keys first: `a016_imei` is both a list key and the stem of
/// the per-product IMEI prefix.
fn resolve(key: &str) -> Option<TabTarget> {
    let target = match key {
        "a001_color" => TabTarget::Color,
        "a002_material" => TabTarget::Material,
        "a003_manufacturer" => TabTarget::Manufacturer,
        "a004_origin" => TabTarget::Origin,
        "a005_weight" => TabTarget::Weight,
        "a006_helmet_type" => TabTarget::HelmetType,
        "a007_helmet_style" => TabTarget::HelmetStyle,
        "a008_safety_tech" => TabTarget::SafetyTech,
        "a019_size" => TabTarget::Size,
        "a009_product" => TabTarget::Product,
        "a010_customer" => TabTarget::Customer,
        "a012_staff" => TabTarget::Staff,
        "a013_invoice" => TabTarget::Invoice,
        "a014_promotion" => TabTarget::Promotion,
        "a015_voucher" => TabTarget::Voucher,
        "a016_imei" => TabTarget::Imei,
        "a017_inventory" => TabTarget::Inventory,
        "a018_counter_sale" => TabTarget::CounterSale,
        _ => {
            if let Some(id) = detail_id(key, CUSTOMER_ADDRESSES_PREFIX) {
                TabTarget::CustomerAddresses(id)
            } else if let Some(id) = detail_id(key, PRODUCT_IMEI_PREFIX) {
                TabTarget::ProductImei(id)
            } else if let Some(id) = detail_id(key, INVOICE_DETAIL_PREFIX) {
                TabTarget::InvoiceDetail(id)
            } else {
                return None;
            }
        }
    };
    Some(target)
}

/// Content of the tab with the given key; unknown keys get a placeholder
pub fn render_tab_content(key: &str) -> AnyView {
    let Some(target) = resolve(key) else {
        log!("unknown tab key: {}", key);
        return view! {
            <div class="placeholder">"Không tìm thấy màn hình cho tab này"</div>
        }
        .into_any();
    };

    match target {
        TabTarget::Color => view! { <ColorList /> }.into_any(),
        TabTarget::Material => view! { <MaterialList /> }.into_any(),
        TabTarget::Manufacturer => view! { <ManufacturerList /> }.into_any(),
        TabTarget::Origin => view! { <OriginList /> }.into_any(),
        TabTarget::Weight => view! { <WeightList /> }.into_any(),
        TabTarget::HelmetType => view! { <HelmetTypeList /> }.into_any(),
        TabTarget::HelmetStyle => view! { <HelmetStyleList /> }.into_any(),
        TabTarget::SafetyTech => view! { <SafetyTechList /> }.into_any(),
        TabTarget::Size => view! { <SizeList /> }.into_any(),
        TabTarget::Product => view! { <ProductList /> }.into_any(),
        TabTarget::Customer => view! { <CustomerList /> }.into_any(),
        TabTarget::Staff => view! { <StaffList /> }.into_any(),
        TabTarget::Invoice => view! { <InvoiceList /> }.into_any(),
        TabTarget::Promotion => view! { <PromotionList /> }.into_any(),
        TabTarget::Voucher => view! { <VoucherList /> }.into_any(),
        TabTarget::Imei => view! { <ImeiList /> }.into_any(),
        TabTarget::Inventory => view! { <InventoryList /> }.into_any(),
        TabTarget::CounterSale => view! { <CounterSaleList /> }.into_any(),
        TabTarget::CustomerAddresses(id) => {
            view! { <CustomerAddressList customer_id=id /> }.into_any()
        }
        TabTarget::ProductImei(id) => view! { <ProductImeiList product_id=id /> }.into_any(),
        TabTarget::InvoiceDetail(id) => view! { <InvoiceDetail id=id /> }.into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_keys_win_over_prefixes() {
        assert_eq!(resolve("a016_imei"), Some(TabTarget::Imei));
        assert_eq!(resolve("a016_imei_7"), Some(TabTarget::ProductImei(7)));
        assert_eq!(resolve("a013_invoice"), Some(TabTarget::Invoice));
        assert_eq!(resolve("a019_size"), Some(TabTarget::Size));
        assert_eq!(resolve("a013_invoice_detail_12"), Some(TabTarget::InvoiceDetail(12)));
        assert_eq!(resolve("a011_customer_address_3"), Some(TabTarget::CustomerAddresses(3)));
    }

    #[test]
    fn test_unknown_keys() {
        assert_eq!(resolve("a016_imei_"), None);
        assert_eq!(resolve("a099_nothing"), None);
    }
}
