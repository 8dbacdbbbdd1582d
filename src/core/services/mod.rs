pub mod auth_service;
pub mod dashboard_service;
pub mod inventory_service;
pub mod sales_service;
pub mod settings_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use dashboard_service::{DashboardService, DashboardView};
pub use inventory_service::InventoryService;
pub use sales_service::{LineDraft, SaleDraft, SalesService};
pub use settings_service::SettingsService;
pub use user_service::UserService;

use crate::errors::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Invalid(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Username/Password entered is incorrect")]
    AuthFailed,
    #[error("Administrator access required")]
    Forbidden,
}
