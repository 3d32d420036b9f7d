//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the embedded migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// User accounts table.
    ///
    /// Stores registered users with their credential digests and signature
    /// references. The `id` column is the primary key (UUID v4 as text).
    users (id) {
        /// Primary key: UUID v4 identifier, stored as text.
        id -> Text,
        /// Unique login name.
        username -> Text,
        /// SHA-256 hex digest of the password.
        password_digest -> Text,
        /// Signature image reference; null only for legacy rows.
        signature_path -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamp,
        /// Last modification timestamp.
        updated_at -> Timestamp,
    }
}

diesel::table! {
    /// Asset records table.
    ///
    /// One row per received asset. The three `dispatched_*` columns are all
    /// null (active) or all non-null (dispatched); a table CHECK constraint
    /// enforces the pairing.
    assets (id) {
        /// Primary key: UUID v4 identifier, stored as text.
        id -> Text,
        /// Unique, immutable tracking code.
        tracking_code -> Text,
        /// Asset description.
        asset_name -> Text,
        /// Optional inventory code.
        asset_code -> Nullable<Text>,
        /// Optional manufacturer serial number.
        serial_number -> Nullable<Text>,
        /// Destination branch.
        branch_name -> Text,
        /// Date the asset arrived at headquarters.
        received_on -> Date,
        /// Stored lifecycle status string.
        current_status -> Text,
        /// Dispatch timestamp (UTC), once dispatched.
        dispatched_at -> Nullable<Timestamp>,
        /// User who recorded the receipt.
        received_by -> Text,
        /// Receiving user's signature reference at receipt time.
        received_signature -> Text,
        /// User who dispatched the asset, once dispatched.
        dispatched_by -> Nullable<Text>,
        /// Dispatcher's signature reference, once dispatched.
        dispatched_signature -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamp,
        /// Last modification timestamp.
        updated_at -> Timestamp,
    }
}

diesel::allow_tables_to_appear_in_same_query!(assets, users);
