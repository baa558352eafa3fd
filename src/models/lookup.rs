//! Diesel models for the field and municipality lookup tables.

use diesel::prelude::*;

use crate::domain::lookup::{Field as DomainField, Municipality as DomainMunicipality};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::fields)]
pub struct Field {
    pub id: i32,
    pub label: String,
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::municipalities)]
pub struct Municipality {
    pub id: i32,
    pub label: String,
}

impl From<Field> for DomainField {
    fn from(field: Field) -> Self {
        Self {
            id: field.id,
            label: field.label,
        }
    }
}

impl From<Municipality> for DomainMunicipality {
    fn from(municipality: Municipality) -> Self {
        Self {
            id: municipality.id,
            label: municipality.label,
        }
    }
}
