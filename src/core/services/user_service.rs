//! Admin-gated staff account management.

use chrono::NaiveDateTime;

use crate::core::services::sales_service::require_admin;
use crate::core::services::{AuthService, ServiceError, ServiceResult};
use crate::domain::{Session, Shop, User};

pub struct UserService;

impl UserService {
    /// Lists all staff accounts. Admin only.
    pub fn list<'a>(shop: &'a Shop, session: &Session) -> ServiceResult<Vec<&'a User>> {
        require_admin(session)?;
        Ok(shop.users.iter().collect())
    }

    /// Creates a staff account with a hashed password. Admin only.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        shop: &mut Shop,
        session: &Session,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
        is_admin: bool,
        now: NaiveDateTime,
    ) -> ServiceResult<u64> {
        require_admin(session)?;
        AuthService::register(shop, email, first_name, last_name, password, is_admin, now)
    }

    /// Grants or revokes administrator access. Admin only; an administrator
    /// cannot revoke their own access.
    pub fn set_admin(
        shop: &mut Shop,
        session: &Session,
        user_id: u64,
        is_admin: bool,
    ) -> ServiceResult<()> {
        require_admin(session)?;
        if user_id == session.user_id && !is_admin {
            return Err(ServiceError::Invalid(
                "You cannot revoke your own administrator access".into(),
            ));
        }
        let user = shop
            .user_mut(user_id)
            .ok_or_else(|| ServiceError::NotFound(format!("user {user_id}")))?;
        user.is_admin = is_admin;
        shop.touch();
        Ok(())
    }

    /// Activates or deactivates an account. Admin only.
    pub fn set_active(
        shop: &mut Shop,
        session: &Session,
        user_id: u64,
        is_active: bool,
    ) -> ServiceResult<()> {
        require_admin(session)?;
        if user_id == session.user_id && !is_active {
            return Err(ServiceError::Invalid(
                "You cannot deactivate your own account".into(),
            ));
        }
        let user = shop
            .user_mut(user_id)
            .ok_or_else(|| ServiceError::NotFound(format!("user {user_id}")))?;
        user.is_active = is_active;
        shop.touch();
        Ok(())
    }

    /// Removes an account. Admin only; self-removal is rejected.
    pub fn remove(shop: &mut Shop, session: &Session, user_id: u64) -> ServiceResult<User> {
        require_admin(session)?;
        if user_id == session.user_id {
            return Err(ServiceError::Invalid(
                "You cannot delete your own account".into(),
            ));
        }
        shop.remove_user(user_id)
            .ok_or_else(|| ServiceError::NotFound(format!("user {user_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn shop_with_admin() -> (Shop, Session) {
        let mut shop = Shop::new("Users");
        AuthService::register(
            &mut shop,
            "admin@example.com",
            "Dede",
            "Okafor",
            "pw",
            true,
            now(),
        )
        .expect("register admin");
        let session =
            AuthService::login(&mut shop, "admin@example.com", "pw", now()).expect("login");
        (shop, session)
    }

    #[test]
    fn non_admins_are_rejected() {
        let (mut shop, admin) = shop_with_admin();
        UserService::create(
            &mut shop,
            &admin,
            "rep@example.com",
            "Rhoda",
            "Eze",
            "pw",
            false,
            now(),
        )
        .expect("create rep");
        let rep = AuthService::login(&mut shop, "rep@example.com", "pw", now()).expect("login");

        assert!(matches!(
            UserService::list(&shop, &rep),
            Err(ServiceError::Forbidden)
        ));
        assert!(matches!(
            UserService::set_active(&mut shop, &rep, admin.user_id, false),
            Err(ServiceError::Forbidden)
        ));
    }

    #[test]
    fn admins_cannot_lock_themselves_out() {
        let (mut shop, admin) = shop_with_admin();
        let own_id = admin.user_id;
        assert!(UserService::set_admin(&mut shop, &admin, own_id, false).is_err());
        assert!(UserService::set_active(&mut shop, &admin, own_id, false).is_err());
        assert!(UserService::remove(&mut shop, &admin, own_id).is_err());
    }

    #[test]
    fn deactivated_accounts_stay_listed() {
        let (mut shop, admin) = shop_with_admin();
        let rep_id = UserService::create(
            &mut shop,
            &admin,
            "rep@example.com",
            "Rhoda",
            "Eze",
            "pw",
            false,
            now(),
        )
        .expect("create rep");
        UserService::set_active(&mut shop, &admin, rep_id, false).expect("deactivate");
        let listed = UserService::list(&shop, &admin).expect("list");
        assert_eq!(listed.len(), 2);
        assert!(!shop.user(rep_id).unwrap().is_active);
    }
}
