//! Seed a database through the real services.

use std::sync::Arc;

use chrono::Days;
use mockable::Clock;
use tracing::info;

use ::example_data::{generate_example_assets, generate_example_users};

use crate::domain::{AssetService, DomainError, ReceiveAsset, SignUp, UserId, UserService};
use crate::outbound::persistence::{DbPool, DieselAssetRepository, DieselUserRepository};

/// Counts reported by a completed seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// User accounts created.
    pub users: usize,
    /// Asset records received.
    pub assets: usize,
    /// Of those, how many were also dispatched.
    pub dispatched: usize,
}

/// Populate a migrated database with deterministic example data.
///
/// Every record goes through sign-up, receive, and dispatch on the real
/// services, so seeded data obeys the exact validation and lifecycle rules
/// of production writes. Receipt dates spread backwards from the clock's
/// current date.
///
/// # Errors
///
/// Returns the first [`DomainError`] a service raises; partially seeded
/// databases are left as-is.
pub fn seed_database(
    pool: &DbPool,
    clock: Arc<dyn Clock>,
    seed: u64,
    user_count: usize,
    asset_count: usize,
) -> Result<SeedSummary, DomainError> {
    let users_repo = Arc::new(DieselUserRepository::new(pool.clone()));
    let assets_repo = Arc::new(DieselAssetRepository::new(pool.clone()));
    let user_service = UserService::new(Arc::clone(&users_repo));
    let asset_service = AssetService::new(assets_repo, users_repo, Arc::clone(&clock));

    let user_seeds = generate_example_users(seed, user_count)
        .map_err(|err| DomainError::internal(format!("user generation failed: {err}")))?;
    let mut user_ids: Vec<UserId> = Vec::with_capacity(user_seeds.len());
    for user in user_seeds {
        let id = user_service.sign_up(SignUp {
            username: user.username,
            password: user.password,
            signature_path: user.signature_path,
        })?;
        user_ids.push(id);
    }
    if user_ids.is_empty() {
        return Err(DomainError::validation(
            "seeding needs at least one user account",
        ));
    }

    let today = clock.utc().date_naive();
    let mut receivers = user_ids.iter().cycle();
    let mut dispatchers = user_ids.iter().rev().cycle();

    let asset_seeds = generate_example_assets(seed, asset_count);
    let total_assets = asset_seeds.len();
    let mut dispatched = 0;
    for asset in asset_seeds {
        let received_by = receivers
            .next()
            .copied()
            .ok_or_else(|| DomainError::internal("receiver rotation ran dry"))?;
        let received_on = today
            .checked_sub_days(Days::new(u64::from(asset.received_days_ago)))
            .unwrap_or(today);

        let code = asset_service.receive(ReceiveAsset {
            asset_name: asset.asset_name,
            asset_code: asset.asset_code,
            serial_number: asset.serial_number,
            branch_name: asset.branch_name,
            received_on: Some(received_on),
            received_by,
        })?;

        if asset.dispatched {
            let dispatched_by = dispatchers
                .next()
                .copied()
                .ok_or_else(|| DomainError::internal("dispatcher rotation ran dry"))?;
            asset_service.dispatch(&code, &dispatched_by)?;
            dispatched += 1;
        }
    }

    let summary = SeedSummary {
        users: user_ids.len(),
        assets: total_assets,
        dispatched,
    };
    info!(
        users = summary.users,
        assets = summary.assets,
        dispatched = summary.dispatched,
        "example data seeded"
    );
    Ok(summary)
}
