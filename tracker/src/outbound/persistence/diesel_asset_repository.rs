//! SQLite-backed `AssetRepository` implementation using Diesel ORM.
//!
//! This adapter persists asset records and loads them back through validated
//! domain constructors. State-guarded mutations (edit, dispatch) run inside
//! immediate transactions so the check and the write land as one unit even
//! with a second writer on the same database file.

use chrono::{TimeZone, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use tracking_code::TrackingCode;

use crate::domain::asset::{Asset, AssetDraft, AssetPatch, AssetStatus, DispatchRecord};
use crate::domain::ports::{
    AssetRepository, AssetRepositoryError, InsertOutcome, LifecycleUpdate,
};
use crate::domain::search::{AssetSearch, LifecycleScope, SearchField, SearchTerm};
use crate::domain::user::{SignaturePath, UserId};

use super::diesel_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{AssetDetailsChangeset, AssetRow, DispatchChangeset, NewAssetRow};
use super::pool::{DbPool, PoolError};
use super::schema::assets;

/// Diesel-backed implementation of the asset repository port.
#[derive(Clone)]
pub struct DieselAssetRepository {
    pool: DbPool,
}

impl DieselAssetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> AssetRepositoryError {
    map_basic_pool_error(error, AssetRepositoryError::connection)
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> AssetRepositoryError {
    map_basic_diesel_error(
        error,
        AssetRepositoryError::query,
        AssetRepositoryError::connection,
    )
}

fn parse_row_uuid(raw: &str, column: &str) -> Result<Uuid, AssetRepositoryError> {
    Uuid::parse_str(raw)
        .map_err(|_| AssetRepositoryError::query(format!("asset row has a malformed {column}")))
}

fn parse_row_signature(raw: String) -> Result<SignaturePath, AssetRepositoryError> {
    SignaturePath::new(raw).map_err(|err| AssetRepositoryError::query(err.to_string()))
}

/// Convert a database row into a validated domain asset.
fn row_to_asset(row: AssetRow) -> Result<Asset, AssetRepositoryError> {
    let AssetRow {
        id,
        tracking_code,
        asset_name,
        asset_code,
        serial_number,
        branch_name,
        received_on,
        current_status,
        dispatched_at,
        received_by,
        received_signature,
        dispatched_by,
        dispatched_signature,
        created_at: _,
        updated_at: _,
    } = row;

    let id = parse_row_uuid(&id, "id")?;
    let tracking_code = TrackingCode::parse(&tracking_code)
        .map_err(|err| AssetRepositoryError::query(err.to_string()))?;
    let received_by = UserId::from_uuid(parse_row_uuid(&received_by, "received_by")?);
    let received_signature = parse_row_signature(received_signature)?;

    let status = AssetStatus::parse(&current_status)
        .map_err(|err| AssetRepositoryError::query(err.to_string()))?;

    let dispatch = match (dispatched_at, dispatched_by, dispatched_signature) {
        (None, None, None) => None,
        (Some(at), Some(by), Some(signature)) => Some(DispatchRecord {
            dispatched_at: Utc.from_utc_datetime(&at),
            dispatched_by: UserId::from_uuid(parse_row_uuid(&by, "dispatched_by")?),
            signature: parse_row_signature(signature)?,
        }),
        _ => {
            return Err(AssetRepositoryError::query(
                "asset row has a partial dispatch record",
            ));
        }
    };

    if (dispatch.is_some()) != (status == AssetStatus::Dispatched) {
        return Err(AssetRepositoryError::query(
            "asset row status disagrees with its dispatch fields",
        ));
    }

    Asset::new(AssetDraft {
        id,
        tracking_code,
        asset_name,
        asset_code,
        serial_number,
        branch_name,
        received_on,
        received_by,
        received_signature,
        dispatch,
    })
    .map_err(|err| AssetRepositoryError::query(err.to_string()))
}

/// Escape `LIKE` wildcards so a term matches as a literal substring.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn scoped_query(scope: LifecycleScope) -> assets::BoxedQuery<'static, diesel::sqlite::Sqlite> {
    let query = assets::table.into_boxed();
    match scope {
        LifecycleScope::Active => query
            .filter(assets::dispatched_at.is_null())
            .order((assets::received_on.desc(), assets::id.desc())),
        LifecycleScope::Dispatched => query
            .filter(assets::dispatched_at.is_not_null())
            .order((assets::dispatched_at.desc(), assets::id.desc())),
    }
}

impl AssetRepository for DieselAssetRepository {
    fn insert(&self, asset: &Asset) -> Result<InsertOutcome, AssetRepositoryError> {
        if asset.dispatch().is_some() {
            return Err(AssetRepositoryError::query(
                "insert only accepts active records; dispatch through mark_dispatched",
            ));
        }
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        let id = asset.id().to_string();
        let received_by = asset.received_by().to_string();
        let new_row = NewAssetRow {
            id: &id,
            tracking_code: asset.tracking_code().as_str(),
            asset_name: asset.name().as_ref(),
            asset_code: asset.asset_code(),
            serial_number: asset.serial_number(),
            branch_name: asset.branch().as_ref(),
            received_on: asset.received_on(),
            current_status: asset.status().as_str(),
            received_by: &received_by,
            received_signature: asset.received_signature().as_str(),
        };

        match diesel::insert_into(assets::table)
            .values(&new_row)
            .execute(&mut conn)
        {
            Ok(_) => Ok(InsertOutcome::Created),
            Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::CodeTaken),
            Err(err) => Err(map_diesel_error(err)),
        }
    }

    fn code_exists(&self, code: &TrackingCode) -> Result<bool, AssetRepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            assets::table.filter(assets::tracking_code.eq(code.as_str())),
        ))
        .get_result::<bool>(&mut conn)
        .map_err(map_diesel_error)
    }

    fn find_by_code(&self, code: &TrackingCode) -> Result<Option<Asset>, AssetRepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        let row = assets::table
            .filter(assets::tracking_code.eq(code.as_str()))
            .first::<AssetRow>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_asset).transpose()
    }

    fn update_details(
        &self,
        code: &TrackingCode,
        patch: &AssetPatch,
    ) -> Result<LifecycleUpdate, AssetRepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        let changeset = AssetDetailsChangeset {
            asset_name: patch.name().as_ref(),
            asset_code: patch.asset_code(),
            branch_name: patch.branch().as_ref(),
            serial_number: patch.serial_number(),
            updated_at: Utc::now().naive_utc(),
        };

        conn.immediate_transaction::<LifecycleUpdate, diesel::result::Error, _>(|conn| {
            let dispatched = assets::table
                .filter(assets::tracking_code.eq(code.as_str()))
                .select(assets::dispatched_at)
                .first::<Option<chrono::NaiveDateTime>>(conn)
                .optional()?;

            match dispatched {
                None => Ok(LifecycleUpdate::Missing),
                Some(Some(_)) => Ok(LifecycleUpdate::AlreadyDispatched),
                Some(None) => {
                    diesel::update(
                        assets::table.filter(assets::tracking_code.eq(code.as_str())),
                    )
                    .set(&changeset)
                    .execute(conn)?;
                    Ok(LifecycleUpdate::Applied)
                }
            }
        })
        .map_err(map_diesel_error)
    }

    fn mark_dispatched(
        &self,
        code: &TrackingCode,
        record: &DispatchRecord,
    ) -> Result<LifecycleUpdate, AssetRepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        let dispatched_by = record.dispatched_by.to_string();
        let changeset = DispatchChangeset {
            current_status: AssetStatus::Dispatched.as_str(),
            dispatched_at: record.dispatched_at.naive_utc(),
            dispatched_by: &dispatched_by,
            dispatched_signature: record.signature.as_str(),
            updated_at: Utc::now().naive_utc(),
        };

        conn.immediate_transaction::<LifecycleUpdate, diesel::result::Error, _>(|conn| {
            let dispatched = assets::table
                .filter(assets::tracking_code.eq(code.as_str()))
                .select(assets::dispatched_at)
                .first::<Option<chrono::NaiveDateTime>>(conn)
                .optional()?;

            match dispatched {
                None => Ok(LifecycleUpdate::Missing),
                Some(Some(_)) => Ok(LifecycleUpdate::AlreadyDispatched),
                Some(None) => {
                    diesel::update(
                        assets::table.filter(assets::tracking_code.eq(code.as_str())),
                    )
                    .set(&changeset)
                    .execute(conn)?;
                    Ok(LifecycleUpdate::Applied)
                }
            }
        })
        .map_err(map_diesel_error)
    }

    fn delete(&self, code: &TrackingCode) -> Result<bool, AssetRepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        let removed = diesel::delete(
            assets::table.filter(assets::tracking_code.eq(code.as_str())),
        )
        .execute(&mut conn)
        .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }

    fn list(&self, scope: LifecycleScope) -> Result<Vec<Asset>, AssetRepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        let rows = scoped_query(scope)
            .load::<AssetRow>(&mut conn)
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_asset).collect()
    }

    fn search(&self, query: &AssetSearch) -> Result<Vec<Asset>, AssetRepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        let mut statement = scoped_query(query.scope());
        statement = match (query.field(), query.term()) {
            (SearchField::TrackingCode, SearchTerm::Text(term)) => statement
                .filter(assets::tracking_code.like(like_pattern(term)).escape('\\')),
            (SearchField::AssetName, SearchTerm::Text(term)) => {
                statement.filter(assets::asset_name.like(like_pattern(term)).escape('\\'))
            }
            (SearchField::AssetCode, SearchTerm::Text(term)) => {
                statement.filter(assets::asset_code.like(like_pattern(term)).escape('\\'))
            }
            (SearchField::BranchName, SearchTerm::Text(term)) => {
                statement.filter(assets::branch_name.like(like_pattern(term)).escape('\\'))
            }
            (SearchField::DateReceived, SearchTerm::Date(date)) => {
                statement.filter(assets::received_on.eq(*date))
            }
            (SearchField::DateDispatched, SearchTerm::Date(date)) => {
                // Match every dispatch on the named calendar day (UTC).
                let day_start = date.and_time(chrono::NaiveTime::MIN);
                let day_end = day_start + chrono::Duration::days(1);
                statement.filter(
                    assets::dispatched_at
                        .ge(day_start)
                        .and(assets::dispatched_at.lt(day_end)),
                )
            }
            // `AssetSearch::new` types the term to the field, so a text term
            // never reaches a date column and vice versa.
            (_, SearchTerm::Text(_) | SearchTerm::Date(_)) => {
                return Err(AssetRepositoryError::query(
                    "search term type does not match the search field",
                ));
            }
        };

        let rows = statement
            .load::<AssetRow>(&mut conn)
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_asset).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[fixture]
    fn valid_row() -> AssetRow {
        let stamp = date(2026, 8, 1).and_hms_opt(9, 0, 0).expect("valid stamp");
        AssetRow {
            id: Uuid::new_v4().to_string(),
            tracking_code: "PNP-AB12CD".to_owned(),
            asset_name: "Laptop".to_owned(),
            asset_code: Some("IT-204".to_owned()),
            serial_number: Some("SN-9981".to_owned()),
            branch_name: "Nairobi".to_owned(),
            received_on: date(2026, 8, 1),
            current_status: "Received at HQ".to_owned(),
            dispatched_at: None,
            received_by: Uuid::new_v4().to_string(),
            received_signature: "signatures/user_a.png".to_owned(),
            dispatched_by: None,
            dispatched_signature: None,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("timed out");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(repo_err, AssetRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("timed out"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(repo_err, AssetRepositoryError::Query { .. }));
    }

    #[rstest]
    fn valid_active_row_converts(valid_row: AssetRow) {
        let asset = row_to_asset(valid_row).expect("row converts");
        assert_eq!(asset.status(), AssetStatus::Received);
        assert_eq!(asset.tracking_code().as_str(), "PNP-AB12CD");
    }

    #[rstest]
    fn dispatched_row_requires_all_three_fields(mut valid_row: AssetRow) {
        valid_row.dispatched_at = date(2026, 8, 5).and_hms_opt(14, 0, 0);
        // dispatched_by / dispatched_signature left null

        let err = row_to_asset(valid_row).expect_err("partial dispatch record");
        assert!(err.to_string().contains("partial dispatch record"));
    }

    #[rstest]
    fn status_must_agree_with_dispatch_fields(mut valid_row: AssetRow) {
        valid_row.current_status = "Dispatched to Branch".to_owned();

        let err = row_to_asset(valid_row).expect_err("status mismatch");
        assert!(err.to_string().contains("disagrees"));
    }

    #[rstest]
    fn malformed_identifiers_are_query_errors(mut valid_row: AssetRow) {
        valid_row.id = "not-a-uuid".to_owned();

        let err = row_to_asset(valid_row).expect_err("malformed id");
        assert!(matches!(err, AssetRepositoryError::Query { .. }));
    }

    #[rstest]
    #[case("Laptop", "%Laptop%")]
    #[case("100%", "%100\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("back\\slash", "%back\\\\slash%")]
    fn like_patterns_escape_wildcards(#[case] term: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(term), expected);
    }
}
