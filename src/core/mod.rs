pub mod services;
pub mod shop_manager;

pub use shop_manager::ShopManager;
