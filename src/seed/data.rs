use crate::model::{Category, Product};
use crate::store::MemoryStore;

/// Load a small demo catalog into the in-memory store: the natural category
/// forest (two levels, like the production data) and a page of listings that
/// exercises every filter dimension.
pub fn load_seed_data(store: &MemoryStore) {
    for category in seed_categories() {
        store.insert_category(category);
    }
    for product in seed_products() {
        store.insert_product(product);
    }
    log::info!(
        "seeded {} categories and {} products",
        store.category_count(),
        store.product_count()
    );
}

fn seed_categories() -> Vec<Category> {
    let child = |id: &str, name: &str, parent: &str| {
        Category::new(id, name, Some(parent.to_string()))
    };
    vec![
        Category::new("cat-xe-may", "Xe máy", None),
        child("cat-xe-so", "Xe số", "cat-xe-may"),
        child("cat-xe-ga", "Xe tay ga", "cat-xe-may"),
        child("cat-xe-con", "Xe côn tay", "cat-xe-may"),
        Category::new("cat-phu-kien", "Phụ kiện", None),
        child("cat-mu-bao-hiem", "Mũ bảo hiểm", "cat-phu-kien"),
        child("cat-do-bao-ho", "Đồ bảo hộ", "cat-phu-kien"),
        Category::new("cat-phu-tung", "Phụ tùng", None),
        child("cat-loc-gio", "Lọc gió", "cat-phu-tung"),
        child("cat-nhong-sen-dia", "Nhông sên dĩa", "cat-phu-tung"),
    ]
}

fn seed_products() -> Vec<Product> {
    vec![
        Product::new("prod-wave-2021", "Honda", "Wave Alpha", 18_500_000.0)
            .with_color("Đen nhám")
            .with_location("Hà Nội")
            .with_condition("Đã sử dụng")
            .with_engine_capacity(110)
            .with_year(2021)
            .with_mileage(8_000),
        Product::new("prod-vision-2022", "Honda", "Vision", 31_000_000.0)
            .with_color("Trắng ngọc")
            .with_location("Hà Nội")
            .with_condition("Mới")
            .with_engine_capacity(110)
            .with_year(2022)
            .with_mileage(0),
        Product::new("prod-exciter-2019", "Yamaha", "Exciter", 38_000_000.0)
            .with_color("xanh GP")
            .with_location("Hồ Chí Minh")
            .with_condition("Đã sử dụng")
            .with_engine_capacity(150)
            .with_year(2019)
            .with_mileage(21_000),
        Product::new("prod-vespa-2020", "Piaggio", "Vespa Sprint", 62_000_000.0)
            .with_color("do do")
            .with_location("Đà Nẵng")
            .with_condition("Đã sử dụng")
            .with_engine_capacity(125)
            .with_year(2020)
            .with_mileage(9_500),
        Product::new("prod-helmet-hrx", "GIVI", "HRX", 950_000.0)
            .with_accessory_type("Mũ bảo hiểm")
            .with_size("L")
            .with_color("Đen bóng")
            .with_location("Hồ Chí Minh"),
        Product::new("prod-gloves-scoyco", "Scoyco", "MC29", 350_000.0)
            .with_accessory_type("Găng tay")
            .with_size("M")
            .with_color("Đen-Đỏ"),
        Product::new("prod-locgio-winner", "Honda", "Lọc gió Winner X", 320_000.0)
            .with_spare_part_type("Lọc gió")
            .with_vehicle_compatible("Honda Winner X 2020, Honda Winner X 2022"),
        Product::new("prod-sen-exciter", "DID", "Sên vàng 428", 780_000.0)
            .with_spare_part_type("Nhông sên dĩa")
            .with_vehicle_compatible("Yamaha Exciter 150, Yamaha Exciter 155"),
    ]
}
