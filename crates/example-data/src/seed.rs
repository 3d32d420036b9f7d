//! Seed payload types produced by the generator.

/// A generated user account ready to be fed through sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleUserSeed {
    /// Unique login name in `first.last` form.
    pub username: String,
    /// Plaintext password; the seeding layer digests it via the real
    /// sign-up path.
    pub password: String,
    /// Signature image reference in the conventional location.
    pub signature_path: String,
}

/// A generated asset receipt ready to be fed through the receive operation.
///
/// Dates are expressed as offsets from "today" so the generator stays
/// independent of the seeding clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleAssetSeed {
    /// Asset description drawn from the equipment catalogue.
    pub asset_name: String,
    /// Inventory code in `IT-NNNN` form.
    pub asset_code: String,
    /// Manufacturer serial number in `SN-NNNNNN` form.
    pub serial_number: String,
    /// Destination branch drawn from the branch catalogue.
    pub branch_name: String,
    /// How many days before the seeding run the asset was received.
    pub received_days_ago: u32,
    /// Whether the seeding run should also dispatch this asset.
    pub dispatched: bool,
}
