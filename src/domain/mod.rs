pub mod common;
pub mod company;
pub mod product;
pub mod sale;
pub mod shop;
pub mod user;

pub use common::{format_record_id, Displayable};
pub use company::CompanyProfile;
pub use product::Product;
pub use sale::{PaymentMethod, Sale, SaleItem};
pub use shop::Shop;
pub use user::{Session, User};
