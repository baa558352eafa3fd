//! Diesel models representing user profiles.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::profile::{NewProfile as DomainNewProfile, Profile as DomainProfile, Role};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::profiles)]
/// Diesel model for [`crate::domain::profile::Profile`].
pub struct Profile {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::profiles)]
/// Insertable form of [`Profile`].
pub struct NewProfile<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::profiles)]
/// Data used when refreshing an existing [`Profile`] record.
pub struct UpdateProfile<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub role: &'a str,
}

impl TryFrom<Profile> for DomainProfile {
    type Error = TypeConstraintError;

    fn try_from(profile: Profile) -> Result<Self, Self::Error> {
        Ok(Self {
            id: profile.id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            role: Role::try_from(profile.role.as_str())?,
            created_at: profile.created_at,
        })
    }
}

impl<'a> NewProfile<'a> {
    pub fn from_domain(profile: &'a DomainNewProfile, created_at: NaiveDateTime) -> Self {
        Self {
            first_name: &profile.first_name,
            last_name: &profile.last_name,
            email: &profile.email,
            role: profile.role.as_str(),
            created_at,
        }
    }
}

impl<'a> From<&NewProfile<'a>> for UpdateProfile<'a> {
    fn from(profile: &NewProfile<'a>) -> Self {
        Self {
            first_name: profile.first_name,
            last_name: profile.last_name,
            role: profile.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn profile_into_domain_parses_role() {
        let now = Utc::now().naive_utc();
        let db_profile = Profile {
            id: 1,
            first_name: "Arta".to_string(),
            last_name: "Hoxha".to_string(),
            email: "arta@example.com".to_string(),
            role: "expert".to_string(),
            created_at: now,
        };
        let domain = DomainProfile::try_from(db_profile).unwrap();
        assert_eq!(domain.role, Role::Expert);
        assert_eq!(domain.full_name(), "Arta Hoxha");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let now = Utc::now().naive_utc();
        let db_profile = Profile {
            id: 1,
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@b.c".to_string(),
            role: "superuser".to_string(),
            created_at: now,
        };
        assert!(DomainProfile::try_from(db_profile).is_err());
    }
}
