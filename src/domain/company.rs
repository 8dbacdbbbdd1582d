use serde::{Deserialize, Serialize};

/// Company profile shown on receipts and the settings screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyProfile {
    pub name: String,
    pub motto: String,
    pub address: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "My Store".into(),
            motto: String::new(),
            address: String::new(),
        }
    }
}
