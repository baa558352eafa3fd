use diesel::prelude::*;

use crate::domain::lookup::{Field, Municipality};
use crate::domain::status::Status;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, LookupReader};

impl LookupReader for DieselRepository {
    fn list_statuses(&self) -> RepositoryResult<Vec<Status>> {
        use crate::models::status::Status as DbStatus;
        use crate::schema::statuses;

        let mut conn = self.conn()?;
        let rows = statuses::table
            .order(statuses::label.asc())
            .load::<DbStatus>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn get_status_by_id(&self, id: i32) -> RepositoryResult<Option<Status>> {
        use crate::models::status::Status as DbStatus;
        use crate::schema::statuses;

        let mut conn = self.conn()?;
        let status = statuses::table
            .find(id)
            .first::<DbStatus>(&mut conn)
            .optional()?;

        Ok(status.map(Into::into))
    }

    fn get_status_by_label(&self, label: &str) -> RepositoryResult<Option<Status>> {
        use crate::models::status::Status as DbStatus;
        use crate::schema::statuses;

        let mut conn = self.conn()?;
        let status = statuses::table
            .filter(statuses::label.eq(label))
            .first::<DbStatus>(&mut conn)
            .optional()?;

        Ok(status.map(Into::into))
    }

    fn list_fields(&self) -> RepositoryResult<Vec<Field>> {
        use crate::models::lookup::Field as DbField;
        use crate::schema::fields;

        let mut conn = self.conn()?;
        let rows = fields::table
            .order(fields::label.asc())
            .load::<DbField>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn list_municipalities(&self) -> RepositoryResult<Vec<Municipality>> {
        use crate::models::lookup::Municipality as DbMunicipality;
        use crate::schema::municipalities;

        let mut conn = self.conn()?;
        let rows = municipalities::table
            .order(municipalities::label.asc())
            .load::<DbMunicipality>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
