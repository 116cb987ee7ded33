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
