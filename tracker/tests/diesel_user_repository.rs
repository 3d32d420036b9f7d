//! Behavioural coverage for the Diesel user repository against real SQLite.

use rstest::rstest;

use tracker::domain::ports::{
    ProfileChanges, ProfileUpdate, SignUpOutcome, SignatureDirectory, UserRepository,
};
use tracker::domain::{PasswordDigest, SignaturePath, User, UserId, Username};
use tracker::outbound::persistence::DieselUserRepository;
use tracker::test_support::TestDatabase;

fn username(raw: &str) -> Username {
    Username::new(raw).expect("valid username")
}

fn user(name: &str) -> User {
    User::new(
        UserId::random(),
        username(name),
        PasswordDigest::from_password("hunter2"),
        SignaturePath::new(format!("signatures/user_{name}.png")).ok(),
    )
}

#[rstest]
fn insert_then_find_round_trips_by_both_keys() {
    let db = TestDatabase::new();
    let repo = DieselUserRepository::new(db.pool());
    let stored = user("frontdesk");

    let outcome = repo.insert(&stored).expect("insert");
    assert_eq!(outcome, SignUpOutcome::Created);

    let by_name = repo
        .find_by_username(&username("frontdesk"))
        .expect("find by username")
        .expect("user present");
    assert_eq!(by_name, stored);

    let by_id = repo
        .find_by_id(stored.id())
        .expect("find by id")
        .expect("user present");
    assert_eq!(by_id, stored);
}

#[rstest]
fn duplicate_usernames_are_reported_not_errored() {
    let db = TestDatabase::new();
    let repo = DieselUserRepository::new(db.pool());

    repo.insert(&user("frontdesk")).expect("insert first");
    let outcome = repo.insert(&user("frontdesk")).expect("insert second");
    assert_eq!(outcome, SignUpOutcome::UsernameTaken);
}

#[rstest]
fn profile_updates_apply_only_requested_fields() {
    let db = TestDatabase::new();
    let repo = DieselUserRepository::new(db.pool());
    let stored = user("frontdesk");
    repo.insert(&stored).expect("insert");

    let changes = ProfileChanges {
        password: Some(PasswordDigest::from_password("new secret")),
        ..ProfileChanges::default()
    };
    let outcome = repo.update_profile(stored.id(), &changes).expect("update");
    assert_eq!(outcome, ProfileUpdate::Applied);

    let updated = repo
        .find_by_id(stored.id())
        .expect("find")
        .expect("user present");
    assert!(updated.password().matches("new secret"));
    assert_eq!(updated.username(), stored.username());
    assert_eq!(updated.signature(), stored.signature());
}

#[rstest]
fn profile_updates_report_missing_accounts_and_taken_usernames() {
    let db = TestDatabase::new();
    let repo = DieselUserRepository::new(db.pool());
    let first = user("frontdesk");
    let second = user("stores");
    repo.insert(&first).expect("insert first");
    repo.insert(&second).expect("insert second");

    let changes = ProfileChanges {
        username: Some(username("frontdesk")),
        ..ProfileChanges::default()
    };
    let outcome = repo.update_profile(second.id(), &changes).expect("update");
    assert_eq!(outcome, ProfileUpdate::UsernameTaken);
    // The refused rename leaves the row untouched.
    let unchanged = repo
        .find_by_id(second.id())
        .expect("find")
        .expect("user present");
    assert_eq!(unchanged.username(), second.username());

    let outcome = repo
        .update_profile(&UserId::random(), &changes)
        .expect("update");
    assert_eq!(outcome, ProfileUpdate::Missing);
}

#[rstest]
fn the_repository_doubles_as_a_signature_directory() {
    let db = TestDatabase::new();
    let repo = DieselUserRepository::new(db.pool());
    let signed = user("frontdesk");
    repo.insert(&signed).expect("insert");
    let unsigned = User::new(
        UserId::random(),
        username("legacy"),
        PasswordDigest::from_password("hunter2"),
        None,
    );
    repo.insert(&unsigned).expect("insert");

    let path = repo
        .signature_path(signed.id())
        .expect("lookup")
        .expect("signature present");
    assert_eq!(path.as_str(), "signatures/user_frontdesk.png");

    assert_eq!(repo.signature_path(unsigned.id()).expect("lookup"), None);
    assert_eq!(repo.signature_path(&UserId::random()).expect("lookup"), None);
}
