//! Tests for asset construction, lifecycle derivation, and patch validation.

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;

fn code(raw: &str) -> TrackingCode {
    TrackingCode::parse(raw).expect("valid tracking code")
}

fn signature(raw: &str) -> SignaturePath {
    SignaturePath::new(raw).expect("valid signature path")
}

#[fixture]
fn draft() -> AssetDraft {
    AssetDraft {
        id: Uuid::new_v4(),
        tracking_code: code("PNP-AB12CD"),
        asset_name: "Laptop".to_owned(),
        asset_code: Some("IT-204".to_owned()),
        serial_number: Some("SN-9981".to_owned()),
        branch_name: "Nairobi".to_owned(),
        received_on: NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date"),
        received_by: UserId::random(),
        received_signature: signature("signatures/user_frontdesk.png"),
        dispatch: None,
    }
}

#[rstest]
fn new_asset_starts_in_received_state(draft: AssetDraft) {
    let asset = Asset::new(draft).expect("valid asset");
    assert_eq!(asset.status(), AssetStatus::Received);
    assert_eq!(asset.status().as_str(), "Received at HQ");
    assert!(asset.dispatch().is_none());
}

#[rstest]
fn asset_with_dispatch_record_is_dispatched(mut draft: AssetDraft) {
    draft.dispatch = Some(DispatchRecord {
        dispatched_at: Utc.with_ymd_and_hms(2026, 8, 5, 14, 30, 0).unwrap(),
        dispatched_by: UserId::random(),
        signature: signature("signatures/user_stores.png"),
    });

    let asset = Asset::new(draft).expect("valid asset");
    assert_eq!(asset.status(), AssetStatus::Dispatched);
    assert_eq!(asset.status().as_str(), "Dispatched to Branch");
}

#[rstest]
fn blank_required_fields_are_rejected(mut draft: AssetDraft) {
    draft.asset_name = "   ".to_owned();
    assert_eq!(
        Asset::new(draft.clone()).err(),
        Some(AssetValidationError::EmptyAssetName)
    );

    draft.asset_name = "Laptop".to_owned();
    draft.branch_name = String::new();
    assert_eq!(
        Asset::new(draft).err(),
        Some(AssetValidationError::EmptyBranchName)
    );
}

#[rstest]
fn blank_optional_fields_normalise_to_none(mut draft: AssetDraft) {
    draft.asset_code = Some("  ".to_owned());
    draft.serial_number = None;

    let asset = Asset::new(draft).expect("valid asset");
    assert_eq!(asset.asset_code(), None);
    assert_eq!(asset.serial_number(), None);
}

#[rstest]
fn status_round_trips_through_stored_form() {
    for status in [AssetStatus::Received, AssetStatus::Dispatched] {
        assert_eq!(AssetStatus::parse(status.as_str()), Ok(status));
    }
    assert!(matches!(
        AssetStatus::parse("In Transit"),
        Err(AssetValidationError::UnknownStatus { .. })
    ));
}

#[rstest]
fn patch_requires_every_field() {
    assert_eq!(
        AssetPatch::try_new("", "IT-204", "Nairobi", "SN-9981").err(),
        Some(AssetValidationError::EmptyAssetName)
    );
    assert_eq!(
        AssetPatch::try_new("Laptop", " ", "Nairobi", "SN-9981").err(),
        Some(AssetValidationError::EmptyAssetCode)
    );
    assert_eq!(
        AssetPatch::try_new("Laptop", "IT-204", "", "SN-9981").err(),
        Some(AssetValidationError::EmptyBranchName)
    );
    assert_eq!(
        AssetPatch::try_new("Laptop", "IT-204", "Nairobi", "").err(),
        Some(AssetValidationError::EmptySerialNumber)
    );
}

#[rstest]
fn patch_trims_accepted_values() {
    let patch = AssetPatch::try_new(" Laptop ", " IT-204 ", " Nairobi ", " SN-9981 ")
        .expect("valid patch");
    assert_eq!(patch.name().as_ref(), "Laptop");
    assert_eq!(patch.asset_code(), "IT-204");
    assert_eq!(patch.branch().as_ref(), "Nairobi");
    assert_eq!(patch.serial_number(), "SN-9981");
}
