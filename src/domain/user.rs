use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Displayable;

/// A staff account able to sign in to the application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password_hash: String,
    pub is_admin: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub date_joined: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<NaiveDateTime>,
    #[serde(default)]
    pub total_sales: u32,
}

fn default_active() -> bool {
    true
}

impl User {
    /// Creates a user record; the shop assigns the id when the user is added.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        password_hash: impl Into<String>,
        is_admin: bool,
        date_joined: NaiveDate,
    ) -> Self {
        Self {
            id: 0,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: None,
            password_hash: password_hash.into(),
            is_admin,
            is_active: true,
            date_joined,
            last_login: None,
            total_sales: 0,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Displayable for User {
    fn display_label(&self) -> String {
        format!("{} <{}>", self.full_name(), self.email)
    }
}

/// An authenticated session handed to services that need the current user.
///
/// Replaces the ad-hoc auth blob the desktop screens used to read from
/// global storage; callers pass this value explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: Uuid,
    pub user_id: u64,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
    pub started_at: NaiveDateTime,
}

impl Session {
    pub fn for_user(user: &User, started_at: NaiveDateTime) -> Self {
        Self {
            token: Uuid::new_v4(),
            user_id: user.id,
            email: user.email.clone(),
            name: user.full_name(),
            is_admin: user.is_admin,
            started_at,
        }
    }
}
