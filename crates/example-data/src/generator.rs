//! Deterministic generation of example users and assets.
//!
//! The same seed value always produces identical output: every draw flows
//! from one `ChaCha8Rng` initialised with the caller's seed.

use std::collections::HashSet;

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::Rng;
use rand::SeedableRng;
use rand::distr::{Alphanumeric, SampleString};
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;

use crate::catalog::{ASSET_CATALOG, BRANCHES};
use crate::error::GenerationError;
use crate::seed::{ExampleAssetSeed, ExampleUserSeed};

/// Maximum number of attempts to generate an unused username.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Generated usernames are truncated to leave room for a uniqueness suffix
/// below the 32-character limit sign-up enforces.
const USERNAME_TRUNCATE_LEN: usize = 28;

/// Generated password length.
const PASSWORD_LEN: usize = 12;

/// Receipt dates are spread over this many days before the seeding run.
const RECEIPT_WINDOW_DAYS: u32 = 60;

/// Roughly this fraction of generated assets are marked for dispatch.
const DISPATCH_RATIO: (u32, u32) = (2, 5);

/// Generates example user accounts from a seed value.
///
/// Usernames take the `first.last` form, lowercased and restricted to the
/// characters sign-up accepts, with a numeric suffix when the faker repeats
/// itself. Signature references follow the conventional
/// `signatures/user_<name>.png` layout the desktop collaborator uses.
///
/// # Errors
///
/// Returns [`GenerationError::UsernameSpaceExhausted`] if no unused
/// username is found within the attempt budget.
///
/// # Example
///
/// ```
/// use example_data::generate_example_users;
///
/// let users = generate_example_users(7, 2).expect("generation succeeds");
/// assert_eq!(users.len(), 2);
/// assert_ne!(users[0].username, users[1].username);
/// ```
pub fn generate_example_users(
    seed: u64,
    count: usize,
) -> Result<Vec<ExampleUserSeed>, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut taken: HashSet<String> = HashSet::new();
    let mut users = Vec::with_capacity(count);

    for _ in 0..count {
        let username = generate_username(&mut rng, &mut taken)?;
        let password = Alphanumeric.sample_string(&mut rng, PASSWORD_LEN);
        let signature_path = format!("signatures/user_{username}.png");
        users.push(ExampleUserSeed {
            username,
            password,
            signature_path,
        });
    }

    Ok(users)
}

/// Generates example asset receipts from a seed value.
///
/// Asset names and branches come from the built-in catalogues; codes and
/// serials are random but well-formed. Roughly two in five assets are
/// marked for dispatch so seeded stores populate both listing scopes.
pub fn generate_example_assets(seed: u64, count: usize) -> Vec<ExampleAssetSeed> {
    // Offset the seed so users and assets drawn from the same seed value do
    // not share a random stream.
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    let mut assets = Vec::with_capacity(count);

    for _ in 0..count {
        let asset_name = pick(&mut rng, ASSET_CATALOG, "Laptop");
        let branch_name = pick(&mut rng, BRANCHES, "Nairobi");
        let asset_code = format!("IT-{:04}", rng.random_range(0_u32..10_000));
        let serial_number = format!("SN-{:06}", rng.random_range(0_u32..1_000_000));
        let received_days_ago = rng.random_range(0..RECEIPT_WINDOW_DAYS);
        let dispatched = rng.random_ratio(DISPATCH_RATIO.0, DISPATCH_RATIO.1);

        assets.push(ExampleAssetSeed {
            asset_name: asset_name.to_owned(),
            asset_code,
            serial_number,
            branch_name: branch_name.to_owned(),
            received_days_ago,
            dispatched,
        });
    }

    assets
}

fn pick<'a>(rng: &mut ChaCha8Rng, options: &[&'a str], fallback: &'a str) -> &'a str {
    options.choose(rng).copied().unwrap_or(fallback)
}

/// Generates a unique username with the provided RNG.
fn generate_username(
    rng: &mut ChaCha8Rng,
    taken: &mut HashSet<String>,
) -> Result<String, GenerationError> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);

        let mut candidate = sanitize_username(&format!("{first}.{last}"));
        candidate.truncate(USERNAME_TRUNCATE_LEN);
        if candidate.is_empty() {
            continue;
        }
        if attempt > 0 && taken.contains(&candidate) {
            candidate.push_str(&attempt.to_string());
        }

        if taken.insert(candidate.clone()) {
            return Ok(candidate);
        }
    }

    Err(GenerationError::UsernameSpaceExhausted {
        attempts: MAX_NAME_ATTEMPTS,
    })
}

/// Lowercase and drop anything sign-up would reject.
fn sanitize_username(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '.' | '_' | '-'))
        .collect()
}

#[cfg(test)]
mod tests {
    //! Determinism and validity coverage for the generator.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn same_seed_produces_identical_users() -> Result<(), GenerationError> {
        let first = generate_example_users(42, 10)?;
        let second = generate_example_users(42, 10)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[rstest]
    fn different_seeds_diverge() -> Result<(), GenerationError> {
        let first = generate_example_users(42, 10)?;
        let second = generate_example_users(43, 10)?;
        assert_ne!(first, second);
        Ok(())
    }

    #[rstest]
    fn usernames_are_unique_and_well_formed() -> Result<(), GenerationError> {
        let users = generate_example_users(7, 50)?;
        let mut seen = HashSet::new();

        for user in &users {
            assert!(seen.insert(user.username.clone()), "duplicate username");
            assert!(!user.username.is_empty());
            assert!(user.username.chars().all(|ch| {
                ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '.' | '_' | '-')
            }));
            assert_eq!(user.password.chars().count(), PASSWORD_LEN);
            assert_eq!(
                user.signature_path,
                format!("signatures/user_{}.png", user.username)
            );
        }
        Ok(())
    }

    #[rstest]
    fn assets_are_deterministic_and_drawn_from_the_catalogues() {
        let first = generate_example_assets(42, 25);
        let second = generate_example_assets(42, 25);
        assert_eq!(first, second);

        for asset in &first {
            assert!(ASSET_CATALOG.contains(&asset.asset_name.as_str()));
            assert!(BRANCHES.contains(&asset.branch_name.as_str()));
            assert!(asset.asset_code.starts_with("IT-"));
            assert!(asset.serial_number.starts_with("SN-"));
            assert!(asset.received_days_ago < RECEIPT_WINDOW_DAYS);
        }
    }

    #[rstest]
    fn a_seeded_run_dispatches_some_but_not_all_assets() {
        let assets = generate_example_assets(42, 100);
        let dispatched = assets.iter().filter(|asset| asset.dispatched).count();
        assert!(dispatched > 0);
        assert!(dispatched < assets.len());
    }
}
