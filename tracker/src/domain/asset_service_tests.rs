//! Tests for the asset lifecycle and query service.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockAssetRepository, MockSignatureDirectory};
use crate::domain::user::SignaturePath;

/// Clock pinned to a known instant so dispatch stamps are assertable.
#[derive(Debug, Clone, Copy)]
struct FixedClock(DateTime<Utc>);

impl FixedClock {
    fn at_noon() -> Self {
        Self(
            Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0)
                .single()
                .expect("valid fixed instant"),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn signature(raw: &str) -> SignaturePath {
    SignaturePath::new(raw).expect("valid signature path")
}

fn directory_with_signature(path: &str) -> MockSignatureDirectory {
    let path = signature(path);
    let mut directory = MockSignatureDirectory::new();
    directory
        .expect_signature_path()
        .returning(move |_| Ok(Some(path.clone())));
    directory
}

fn directory_without_signature() -> MockSignatureDirectory {
    let mut directory = MockSignatureDirectory::new();
    directory.expect_signature_path().returning(|_| Ok(None));
    directory
}

fn service(
    repo: MockAssetRepository,
    directory: MockSignatureDirectory,
) -> AssetService<MockAssetRepository, MockSignatureDirectory> {
    AssetService::new(
        Arc::new(repo),
        Arc::new(directory),
        Arc::new(FixedClock::at_noon()),
    )
}

fn receive_request(received_by: UserId) -> ReceiveAsset {
    ReceiveAsset {
        asset_name: "Laptop".to_owned(),
        asset_code: "IT-204".to_owned(),
        serial_number: "SN-9981".to_owned(),
        branch_name: "Nairobi".to_owned(),
        received_on: Some(NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date")),
        received_by,
    }
}

fn edit_request() -> EditAsset {
    EditAsset {
        asset_name: "Laptop".to_owned(),
        asset_code: "IT-204".to_owned(),
        branch_name: "Mombasa".to_owned(),
        serial_number: "SN-9981".to_owned(),
    }
}

#[rstest]
fn receive_persists_an_active_record_and_returns_its_code() {
    let mut repo = MockAssetRepository::new();
    repo.expect_code_exists().returning(|_| Ok(false));
    repo.expect_insert()
        .times(1)
        .withf(|asset| {
            asset.status().as_str() == "Received at HQ"
                && asset.branch().as_ref() == "Nairobi"
                && asset.dispatch().is_none()
        })
        .returning(|_| Ok(InsertOutcome::Created));

    let service = service(repo, directory_with_signature("signatures/user_a.png"));
    let code = service
        .receive(receive_request(UserId::random()))
        .expect("receive succeeds");

    assert_eq!(TrackingCode::parse(code.as_str()), Ok(code));
}

#[rstest]
fn receive_with_empty_asset_name_persists_nothing() {
    let mut repo = MockAssetRepository::new();
    repo.expect_code_exists().times(0);
    repo.expect_insert().times(0);
    let mut directory = MockSignatureDirectory::new();
    directory.expect_signature_path().times(0);

    let service = service(repo, directory);
    let mut request = receive_request(UserId::random());
    request.asset_name = "   ".to_owned();

    let err = service.receive(request).expect_err("validation failure");
    assert_eq!(err.code(), ErrorCode::Validation);
}

#[rstest]
fn receive_requires_a_signature_on_file() {
    let mut repo = MockAssetRepository::new();
    repo.expect_insert().times(0);

    let service = service(repo, directory_without_signature());
    let err = service
        .receive(receive_request(UserId::random()))
        .expect_err("signature missing");

    assert_eq!(err.code(), ErrorCode::SignatureMissing);
}

#[rstest]
fn receive_remints_when_the_insert_races_another_code() {
    let mut repo = MockAssetRepository::new();
    repo.expect_code_exists().returning(|_| Ok(false));
    let mut raced = false;
    repo.expect_insert().times(2).returning(move |_| {
        if raced {
            Ok(InsertOutcome::Created)
        } else {
            raced = true;
            Ok(InsertOutcome::CodeTaken)
        }
    });

    let service = service(repo, directory_with_signature("signatures/user_a.png"));
    let code = service
        .receive(receive_request(UserId::random()))
        .expect("receive succeeds after a re-mint");

    assert!(code.as_str().starts_with("PNP-"));
}

#[rstest]
#[case(EditAsset { asset_name: String::new(), ..edit_request() })]
#[case(EditAsset { asset_code: " ".to_owned(), ..edit_request() })]
#[case(EditAsset { branch_name: String::new(), ..edit_request() })]
#[case(EditAsset { serial_number: String::new(), ..edit_request() })]
fn edit_rejects_partial_patches_before_touching_the_store(#[case] request: EditAsset) {
    let mut repo = MockAssetRepository::new();
    repo.expect_update_details().times(0);

    let service = service(repo, MockSignatureDirectory::new());
    let code = TrackingCode::parse("PNP-AB12CD").expect("valid code");

    let err = service.edit(&code, request).expect_err("validation failure");
    assert_eq!(err.code(), ErrorCode::Validation);
}

#[rstest]
#[case(LifecycleUpdate::Missing, ErrorCode::NotFound)]
#[case(LifecycleUpdate::AlreadyDispatched, ErrorCode::InvalidState)]
fn edit_maps_lifecycle_conflicts(
    #[case] outcome: LifecycleUpdate,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockAssetRepository::new();
    repo.expect_update_details()
        .times(1)
        .returning(move |_, _| Ok(outcome));

    let service = service(repo, MockSignatureDirectory::new());
    let code = TrackingCode::parse("PNP-AB12CD").expect("valid code");

    let err = service.edit(&code, edit_request()).expect_err("conflict");
    assert_eq!(err.code(), expected);
}

#[rstest]
fn dispatch_stamps_the_clock_and_dispatcher_signature() {
    let dispatcher = UserId::random();
    let expected_at = FixedClock::at_noon().utc();

    let mut repo = MockAssetRepository::new();
    repo.expect_mark_dispatched()
        .times(1)
        .withf(move |_, record| {
            record.dispatched_at == expected_at
                && record.dispatched_by == dispatcher
                && record.signature.as_str() == "signatures/user_b.png"
        })
        .returning(|_, _| Ok(LifecycleUpdate::Applied));

    let service = service(repo, directory_with_signature("signatures/user_b.png"));
    let code = TrackingCode::parse("PNP-AB12CD").expect("valid code");

    service
        .dispatch(&code, &dispatcher)
        .expect("dispatch succeeds");
}

#[rstest]
fn dispatch_of_a_dispatched_asset_is_an_invalid_state() {
    let mut repo = MockAssetRepository::new();
    repo.expect_mark_dispatched()
        .times(1)
        .returning(|_, _| Ok(LifecycleUpdate::AlreadyDispatched));

    let service = service(repo, directory_with_signature("signatures/user_b.png"));
    let code = TrackingCode::parse("PNP-AB12CD").expect("valid code");

    let err = service
        .dispatch(&code, &UserId::random())
        .expect_err("already dispatched");
    assert_eq!(err.code(), ErrorCode::InvalidState);
}

#[rstest]
fn dispatch_requires_the_dispatcher_signature() {
    let mut repo = MockAssetRepository::new();
    repo.expect_mark_dispatched().times(0);

    let service = service(repo, directory_without_signature());
    let code = TrackingCode::parse("PNP-AB12CD").expect("valid code");

    let err = service
        .dispatch(&code, &UserId::random())
        .expect_err("signature missing");
    assert_eq!(err.code(), ErrorCode::SignatureMissing);
}

#[rstest]
fn delete_of_an_unknown_code_is_a_quiet_success() {
    let mut repo = MockAssetRepository::new();
    repo.expect_delete().times(1).returning(|_| Ok(false));

    let service = service(repo, MockSignatureDirectory::new());
    let code = TrackingCode::parse("PNP-AB12CD").expect("valid code");

    service.delete(&code).expect("no-op delete succeeds");
}

#[rstest]
fn search_rejects_unlisted_fields_before_touching_the_store() {
    let mut repo = MockAssetRepository::new();
    repo.expect_search().times(0);

    let service = service(repo, MockSignatureDirectory::new());
    let err = service
        .search(LifecycleScope::Active, "Not A Real Field", "x")
        .expect_err("invalid field");

    assert_eq!(err.code(), ErrorCode::InvalidField);
}

#[rstest]
fn search_rejects_empty_terms() {
    let mut repo = MockAssetRepository::new();
    repo.expect_search().times(0);

    let service = service(repo, MockSignatureDirectory::new());
    let err = service
        .search(LifecycleScope::Active, "Asset Name", "   ")
        .expect_err("empty term");

    assert_eq!(err.code(), ErrorCode::Validation);
}

#[rstest]
fn connection_failures_surface_as_service_unavailable() {
    let mut repo = MockAssetRepository::new();
    repo.expect_list()
        .times(1)
        .returning(|_| Err(AssetRepositoryError::connection("pool exhausted")));

    let service = service(repo, MockSignatureDirectory::new());
    let err = service.list_active().expect_err("connection failure");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
