//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use super::schema::{assets, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: String,
    pub username: String,
    pub password_digest: String,
    pub signature_path: Option<String>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: NaiveDateTime,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: NaiveDateTime,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub password_digest: &'a str,
    pub signature_path: Option<&'a str>,
}

/// Changeset struct for partial profile updates.
///
/// `None` fields are skipped by Diesel, so only the requested changes reach
/// the row; `updated_at` is always stamped.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileChangeset<'a> {
    pub username: Option<&'a str>,
    pub password_digest: Option<&'a str>,
    pub signature_path: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Row struct for reading from the assets table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct AssetRow {
    pub id: String,
    pub tracking_code: String,
    pub asset_name: String,
    pub asset_code: Option<String>,
    pub serial_number: Option<String>,
    pub branch_name: String,
    pub received_on: NaiveDate,
    pub current_status: String,
    pub dispatched_at: Option<NaiveDateTime>,
    pub received_by: String,
    pub received_signature: String,
    pub dispatched_by: Option<String>,
    pub dispatched_signature: Option<String>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: NaiveDateTime,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: NaiveDateTime,
}

/// Insertable struct for creating new asset records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = assets)]
pub(crate) struct NewAssetRow<'a> {
    pub id: &'a str,
    pub tracking_code: &'a str,
    pub asset_name: &'a str,
    pub asset_code: Option<&'a str>,
    pub serial_number: Option<&'a str>,
    pub branch_name: &'a str,
    pub received_on: NaiveDate,
    pub current_status: &'a str,
    pub received_by: &'a str,
    pub received_signature: &'a str,
}

/// Changeset struct replacing the four editable fields of an active asset.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = assets)]
pub(crate) struct AssetDetailsChangeset<'a> {
    pub asset_name: &'a str,
    pub asset_code: &'a str,
    pub branch_name: &'a str,
    pub serial_number: &'a str,
    pub updated_at: NaiveDateTime,
}

/// Changeset struct stamping the dispatch audit fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = assets)]
pub(crate) struct DispatchChangeset<'a> {
    pub current_status: &'a str,
    pub dispatched_at: NaiveDateTime,
    pub dispatched_by: &'a str,
    pub dispatched_signature: &'a str,
    pub updated_at: NaiveDateTime,
}
