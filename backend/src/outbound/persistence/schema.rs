//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Land parcels.
    ///
    /// `id` is the caller-supplied primary key. `created_at` fixes the
    /// natural order used by listings and searches.
    parcels (id) {
        /// Primary key supplied by the client.
        id -> Varchar,
        /// Canton short code.
        canton -> Varchar,
        /// Optional municipality name.
        municipality -> Nullable<Varchar>,
        /// Surface in square metres (`CHECK > 0`).
        area_m2 -> Float8,
        /// Zoning category.
        zoning -> Varchar,
        /// Whether construction is permitted.
        is_buildable -> Bool,
        /// Optional caller-supplied valuation in CHF.
        estimated_value_chf -> Nullable<Float8>,
        /// Insertion timestamp.
        created_at -> Timestamptz,
    }
}
