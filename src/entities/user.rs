use chrono::{DateTime, Utc};
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[sea_orm(string_value = "individual")]
    Individual,
    #[sea_orm(string_value = "professional")]
    Professional,
    #[sea_orm(string_value = "internal")]
    Internal,
    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "validated")]
    Validated,
    #[sea_orm(string_value = "verified")]
    Verified,
    #[sea_orm(string_value = "locked")]
    Locked,
}

/// Contact and display preferences, stored as a JSON document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub phone: Option<String>,
    /// Show the account email on the owner's listings.
    pub show_email: bool,
    /// Show `phone` on the owner's listings.
    pub show_phone: bool,
}

/// Named rights granted to an account on top of its user type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct UserRights(pub BTreeSet<String>);

impl UserRights {
    pub const MANAGE_AMENITIES: &'static str = "manage_amenities";

    #[must_use]
    pub fn grants(&self, right: &str) -> bool {
        self.0.contains(right)
    }
}

impl<S: Into<String>> FromIterator<S> for UserRights {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub display_name: String,
    pub user_type: UserType,
    pub status: UserStatus,
    pub agency_id: Option<Uuid>,
    #[sea_orm(column_type = "Json")]
    pub settings: UserSettings,
    #[sea_orm(column_type = "Json")]
    pub rights: UserRights,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
