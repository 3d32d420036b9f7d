//! SQLite-backed `UserRepository` implementation using Diesel ORM.
//!
//! Also implements the narrow `SignatureDirectory` port, so asset services
//! can resolve signature references without depending on full account
//! persistence.

use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::auth::PasswordDigest;
use crate::domain::ports::{
    ProfileChanges, ProfileUpdate, SignUpOutcome, SignatureDirectory, SignatureDirectoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::user::{SignaturePath, User, UserId, Username};

use super::diesel_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserProfileChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain user.
fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let UserRow {
        id,
        username,
        password_digest,
        signature_path,
        created_at: _,
        updated_at: _,
    } = row;

    let id = Uuid::parse_str(&id)
        .map(UserId::from_uuid)
        .map_err(|_| UserRepositoryError::query("user row has a malformed id"))?;
    let username = Username::new(&username)
        .map_err(|err| UserRepositoryError::query(err.to_string()))?;
    let signature = signature_path
        .map(SignaturePath::new)
        .transpose()
        .map_err(|err| UserRepositoryError::query(err.to_string()))?;

    Ok(User::new(
        id,
        username,
        PasswordDigest::from_stored(password_digest),
        signature,
    ))
}

impl UserRepository for DieselUserRepository {
    fn insert(&self, user: &User) -> Result<SignUpOutcome, UserRepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        let id = user.id().to_string();
        let new_row = NewUserRow {
            id: &id,
            username: user.username().as_ref(),
            password_digest: user.password().as_str(),
            signature_path: user.signature().map(SignaturePath::as_str),
        };

        match diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
        {
            Ok(_) => Ok(SignUpOutcome::Created),
            Err(err) if is_unique_violation(&err) => Ok(SignUpOutcome::UsernameTaken),
            Err(err) => Err(map_diesel_error(err)),
        }
    }

    fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        let row = users::table
            .filter(users::username.eq(username.as_ref()))
            .first::<UserRow>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.to_string()))
            .first::<UserRow>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    fn update_profile(
        &self,
        id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<ProfileUpdate, UserRepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        let changeset = UserProfileChangeset {
            username: changes.username.as_ref().map(Username::as_ref),
            password_digest: changes.password.as_ref().map(PasswordDigest::as_str),
            signature_path: changes.signature.as_ref().map(SignaturePath::as_str),
            updated_at: Utc::now().naive_utc(),
        };
        let id_text = id.to_string();

        conn.immediate_transaction::<ProfileUpdate, diesel::result::Error, _>(|conn| {
            let exists = diesel::select(diesel::dsl::exists(
                users::table.filter(users::id.eq(id_text.as_str())),
            ))
            .get_result::<bool>(conn)?;
            if !exists {
                return Ok(ProfileUpdate::Missing);
            }

            let applied = diesel::update(users::table.filter(users::id.eq(id_text.as_str())))
                .set(&changeset)
                .execute(conn);
            match applied {
                Ok(_) => Ok(ProfileUpdate::Applied),
                Err(err) if is_unique_violation(&err) => Ok(ProfileUpdate::UsernameTaken),
                Err(err) => Err(err),
            }
        })
        .map_err(map_diesel_error)
    }
}

impl SignatureDirectory for DieselUserRepository {
    fn signature_path(
        &self,
        user: &UserId,
    ) -> Result<Option<SignaturePath>, SignatureDirectoryError> {
        let found = self.find_by_id(user).map_err(|err| match err {
            UserRepositoryError::Connection { message } => {
                SignatureDirectoryError::connection(message)
            }
            UserRepositoryError::Query { message } => SignatureDirectoryError::query(message),
        })?;

        Ok(found.and_then(|u| u.signature().cloned()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion edge cases.

    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> UserRow {
        let stamp = NaiveDate::from_ymd_opt(2026, 8, 1)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .expect("valid stamp");
        UserRow {
            id: Uuid::new_v4().to_string(),
            username: "frontdesk".to_owned(),
            password_digest: PasswordDigest::from_password("hunter2").as_str().to_owned(),
            signature_path: Some("signatures/user_frontdesk.png".to_owned()),
            created_at: stamp,
            updated_at: stamp,
        }
    }

    #[rstest]
    fn valid_row_converts(valid_row: UserRow) {
        let user = row_to_user(valid_row).expect("row converts");
        assert_eq!(user.username().as_ref(), "frontdesk");
        assert!(user.password().matches("hunter2"));
        assert!(user.signature().is_some());
    }

    #[rstest]
    fn legacy_row_without_signature_converts(mut valid_row: UserRow) {
        valid_row.signature_path = None;
        let user = row_to_user(valid_row).expect("row converts");
        assert!(user.signature().is_none());
    }

    #[rstest]
    fn malformed_id_is_a_query_error(mut valid_row: UserRow) {
        valid_row.id = "not-a-uuid".to_owned();
        let err = row_to_user(valid_row).expect_err("malformed id");
        assert!(matches!(err, UserRepositoryError::Query { .. }));
    }
}
