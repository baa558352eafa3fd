use chrono::Utc;
use diesel::prelude::*;

use crate::domain::profile::{NewProfile, Profile, Role};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProfileReader, ProfileWriter};

impl ProfileReader for DieselRepository {
    fn get_profile_by_id(&self, id: i32) -> RepositoryResult<Option<Profile>> {
        use crate::models::profile::Profile as DbProfile;
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let profile = profiles::table
            .find(id)
            .first::<DbProfile>(&mut conn)
            .optional()?;

        profile
            .map(|row| Profile::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_profile_by_email(&self, email: &str) -> RepositoryResult<Option<Profile>> {
        use crate::models::profile::Profile as DbProfile;
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let profile = profiles::table
            .filter(profiles::email.eq(email))
            .first::<DbProfile>(&mut conn)
            .optional()?;

        profile
            .map(|row| Profile::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_experts(&self) -> RepositoryResult<Vec<Profile>> {
        use crate::models::profile::Profile as DbProfile;
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        profiles::table
            .filter(profiles::role.eq(Role::Expert.as_str()))
            .order((profiles::first_name.asc(), profiles::last_name.asc()))
            .load::<DbProfile>(&mut conn)?
            .into_iter()
            .map(|row| Profile::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl ProfileWriter for DieselRepository {
    fn create_or_update_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile> {
        use crate::models::profile::{
            NewProfile as DbNewProfile, Profile as DbProfile, UpdateProfile,
        };
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let insertable = DbNewProfile::from_domain(new_profile, Utc::now().naive_utc());

        let existing = profiles::table
            .filter(profiles::email.eq(insertable.email))
            .first::<DbProfile>(&mut conn)
            .optional()?;

        let row = match existing {
            Some(profile) => {
                let updates = UpdateProfile::from(&insertable);
                diesel::update(profiles::table.find(profile.id))
                    .set(&updates)
                    .get_result::<DbProfile>(&mut conn)?
            }
            None => diesel::insert_into(profiles::table)
                .values(&insertable)
                .get_result::<DbProfile>(&mut conn)?,
        };

        Ok(Profile::try_from(row)?)
    }
}
