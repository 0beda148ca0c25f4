use crate::domain::model::{CarListing, UserId};
use crate::utils::error::{BookingError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Owner,
    Renter,
    Both,
    Admin,
}

/// The signed-in caller, passed explicitly to anything that branches on
/// who is asking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub user_type: UserType,
    #[serde(default)]
    pub is_banned: bool,
}

impl Session {
    pub fn new(user_id: impl Into<UserId>, user_type: UserType) -> Self {
        Self {
            user_id: user_id.into(),
            user_type,
            is_banned: false,
        }
    }

    pub fn owns(&self, listing: &CarListing) -> bool {
        listing.owner_id.as_deref() == Some(self.user_id.as_str())
    }

    /// Owner of the listing or an admin.
    pub fn can_manage(&self, listing: &CarListing) -> bool {
        self.user_type == UserType::Admin || self.owns(listing)
    }

    pub fn ensure_can_book(&self, listing: &CarListing) -> Result<()> {
        if self.is_banned {
            return Err(BookingError::Forbidden {
                reason: "account is banned".to_string(),
            });
        }
        if self.user_type == UserType::Owner {
            return Err(BookingError::Forbidden {
                reason: "owner accounts cannot rent cars".to_string(),
            });
        }
        if self.owns(listing) {
            return Err(BookingError::Forbidden {
                reason: "you own this car".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::City;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn listing(owner: &str) -> CarListing {
        CarListing {
            id: 7,
            name: "Clio".into(),
            brand: "Renault".into(),
            daily_rate: Decimal::from(300),
            city: City::Rabat,
            owner_id: Some(owner.into()),
            location: None,
            featured: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn renter_can_book_someone_elses_car() {
        let session = Session::new("alice", UserType::Renter);
        assert!(session.ensure_can_book(&listing("bob")).is_ok());
        assert!(!session.can_manage(&listing("bob")));
    }

    #[test]
    fn cannot_book_own_car() {
        let session = Session::new("bob", UserType::Both);
        assert!(matches!(
            session.ensure_can_book(&listing("bob")),
            Err(BookingError::Forbidden { .. })
        ));
        assert!(session.can_manage(&listing("bob")));
    }

    #[test]
    fn owner_only_and_banned_accounts_are_rejected() {
        let owner = Session::new("carol", UserType::Owner);
        assert!(owner.ensure_can_book(&listing("bob")).is_err());

        let mut banned = Session::new("dave", UserType::Renter);
        banned.is_banned = true;
        assert!(banned.ensure_can_book(&listing("bob")).is_err());
    }

    #[test]
    fn admin_manages_any_listing() {
        let admin = Session::new("root", UserType::Admin);
        assert!(admin.can_manage(&listing("bob")));
    }
}
