//! Settings screen operations: personal info, password, company profile.

use crate::core::services::{AuthService, ServiceError, ServiceResult};
use crate::domain::{CompanyProfile, Session, Shop, User};

pub struct SettingsService;

impl SettingsService {
    /// The signed-in user's own record.
    pub fn profile<'a>(shop: &'a Shop, session: &Session) -> ServiceResult<&'a User> {
        shop.user(session.user_id)
            .ok_or_else(|| ServiceError::NotFound(format!("user {}", session.user_id)))
    }

    /// Updates the signed-in user's personal info.
    pub fn update_personal(
        shop: &mut Shop,
        session: &Session,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> ServiceResult<()> {
        if first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Err(ServiceError::Invalid("Name fields must not be blank".into()));
        }
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ServiceError::Invalid(
                "Email address entered is invalid".into(),
            ));
        }
        if let Some(existing) = shop.user_by_email(email) {
            if existing.id != session.user_id {
                return Err(ServiceError::Invalid(format!(
                    "A user with email `{email}` already exists"
                )));
            }
        }
        let user = shop
            .user_mut(session.user_id)
            .ok_or_else(|| ServiceError::NotFound(format!("user {}", session.user_id)))?;
        user.first_name = first_name.trim().to_string();
        user.last_name = last_name.trim().to_string();
        user.email = email.to_string();
        user.phone = phone.map(|value| value.trim().to_string()).filter(|value| !value.is_empty());
        shop.touch();
        Ok(())
    }

    /// Changes the signed-in user's password.
    pub fn change_password(
        shop: &mut Shop,
        session: &Session,
        old_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> ServiceResult<()> {
        AuthService::change_password(
            shop,
            session.user_id,
            old_password,
            new_password,
            confirm_password,
        )
    }

    pub fn company(shop: &Shop) -> &CompanyProfile {
        &shop.company
    }

    /// Replaces the company profile shown on receipts and the header.
    pub fn update_company(
        shop: &mut Shop,
        name: &str,
        motto: &str,
        address: &str,
    ) -> ServiceResult<()> {
        if name.trim().is_empty() {
            return Err(ServiceError::Invalid("Company name must not be blank".into()));
        }
        shop.company = CompanyProfile {
            name: name.trim().to_string(),
            motto: motto.trim().to_string(),
            address: address.trim().to_string(),
        };
        shop.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session_in(shop: &mut Shop) -> Session {
        let now = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        AuthService::register(shop, "ada@example.com", "Ada", "Obi", "pw", false, now)
            .expect("register");
        AuthService::login(shop, "ada@example.com", "pw", now).expect("login")
    }

    #[test]
    fn personal_update_rewrites_the_user_record() {
        let mut shop = Shop::new("Settings");
        let session = session_in(&mut shop);
        SettingsService::update_personal(
            &mut shop,
            &session,
            "Adaeze",
            "Obi",
            "adaeze@example.com",
            Some("0800-000-0000"),
        )
        .expect("update personal");

        let user = shop.user(session.user_id).unwrap();
        assert_eq!(user.first_name, "Adaeze");
        assert_eq!(user.email, "adaeze@example.com");
        assert_eq!(user.phone.as_deref(), Some("0800-000-0000"));
    }

    #[test]
    fn company_update_requires_a_name() {
        let mut shop = Shop::new("Settings");
        let err = SettingsService::update_company(&mut shop, "  ", "motto", "address")
            .expect_err("blank company name must fail");
        assert!(matches!(err, ServiceError::Invalid(_)));

        SettingsService::update_company(&mut shop, "Western Stores", "We sell", "12 Main St")
            .expect("update company");
        assert_eq!(SettingsService::company(&shop).name, "Western Stores");
    }
}
