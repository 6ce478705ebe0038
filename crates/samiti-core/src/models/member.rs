use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// A persisted membership record.
///
/// Created exactly once per successful submission and never mutated by this
/// service. `email` is the only unique field; duplicates surface as a
/// store-level conflict. Enum-tagged columns (`ownership_proof_type`,
/// `payment_method`) are carried as opaque strings here and enforced by the
/// store's column types.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Member {
    pub id: Uuid,

    // Plot info
    pub sector_number: String,
    pub road_number: String,
    pub plot_number: String,
    pub plot_size: String,

    // Ownership proof
    pub ownership_proof_type: String,
    pub ownership_proof_file: Option<String>,

    // Owner info
    pub owner_name_english: String,
    pub owner_name_bangla: String,
    pub contact_number: String,
    pub nid_number: String,
    pub present_address: String,
    pub permanent_address: String,
    pub email: String,
    pub owner_photo: Option<String>,

    /// Salted one-way hash; the raw password never reaches this type.
    #[serde(skip_serializing)]
    pub password: String,

    // Payment
    pub payment_method: String,
    pub bkash_transaction_id: Option<String>,
    pub bkash_account_number: Option<String>,
    pub bank_account_number_from: Option<String>,
    pub payment_receipt: Option<String>,

    pub membership_fee: Decimal,
    pub agree_data_use: bool,

    pub created_at: DateTime<Utc>,
}

/// Input shape for the single create operation.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub sector_number: String,
    pub road_number: String,
    pub plot_number: String,
    pub plot_size: String,

    pub ownership_proof_type: String,
    pub ownership_proof_file: Option<String>,

    pub owner_name_english: String,
    pub owner_name_bangla: String,
    pub contact_number: String,
    pub nid_number: String,
    pub present_address: String,
    pub permanent_address: String,
    pub email: String,
    pub owner_photo: Option<String>,

    pub password_hash: String,

    pub payment_method: String,
    pub bkash_transaction_id: Option<String>,
    pub bkash_account_number: Option<String>,
    pub bank_account_number_from: Option<String>,
    pub payment_receipt: Option<String>,

    pub membership_fee: Decimal,
    pub agree_data_use: bool,
}
