pub mod common;

pub mod a001_color;
pub mod a002_material;
pub mod a003_manufacturer;
pub mod a004_origin;
pub mod a005_weight;
pub mod a006_helmet_type;
pub mod a007_helmet_style;
pub mod a008_safety_tech;
pub mod a009_product;
pub mod a010_customer;
pub mod a011_customer_address;
pub mod a012_staff;
pub mod a013_invoice;
pub mod a014_promotion;
pub mod a015_voucher;
pub mod a016_imei;
pub mod a017_inventory;
pub mod a018_counter_sale;
pub mod a019_size;

#[cfg(test)]
mod tests {
    use super::common::Resource;
    use super::*;

    #[test]
    fn test_endpoints_per_resource() {
        // Catalogue lookups and products live at the API root; people, orders and
        // discounts sit under `/api`.
        assert_eq!(a001_color::aggregate::Color::endpoint(), "/mau-sac");
        assert_eq!(a002_material::aggregate::Material::endpoint(), "/chat-lieu-vo");
        assert_eq!(a003_manufacturer::aggregate::Manufacturer::endpoint(), "/nha-san-xuat");
        assert_eq!(a004_origin::aggregate::Origin::endpoint(), "/xuat-xu");
        assert_eq!(a005_weight::aggregate::Weight::endpoint(), "/trong-luong");
        assert_eq!(a006_helmet_type::aggregate::HelmetType::endpoint(), "/loai-mu");
        assert_eq!(a007_helmet_style::aggregate::HelmetStyle::endpoint(), "/kieu-dang-mu");
        assert_eq!(a008_safety_tech::aggregate::SafetyTech::endpoint(), "/api/cong-nghe-an-toan");
        assert_eq!(a009_product::aggregate::Product::endpoint(), "/san-pham");
        assert_eq!(a010_customer::aggregate::Customer::endpoint(), "/api/khach-hang");
        assert_eq!(
            a011_customer_address::aggregate::CustomerAddress::endpoint(),
            "/api/dia-chi-khach-hang"
        );
        assert_eq!(a012_staff::aggregate::Staff::endpoint(), "/api/nhan-vien");
        assert_eq!(a013_invoice::aggregate::Invoice::endpoint(), "/api/hoa-don");
        assert_eq!(a014_promotion::aggregate::Promotion::endpoint(), "/api/dot-giam-gia");
        assert_eq!(a015_voucher::aggregate::Voucher::endpoint(), "/api/phieu-giam-gia");
        assert_eq!(a016_imei::aggregate::Imei::endpoint(), "/imei");
        assert_eq!(a019_size::aggregate::Size::endpoint(), "/kich-thuoc");
    }
}
