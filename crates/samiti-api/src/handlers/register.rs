//! Membership registration handler.
//!
//! One POST route runs the whole pipeline in order: ingest the multipart body,
//! validate email and password, materialize the three file slots, then submit
//! a single create to the store. Every step's failure is terminal for the
//! request; nothing is retried and files already materialized are not rolled
//! back when a later step fails (an orphaned upload is an accepted side effect
//! of a failed submission).

use crate::error::{ErrorResponse, HttpAppError};
use crate::ingest::{self, IngestedForm};
use crate::state::AppState;
use axum::{
    extract::multipart::MultipartRejection,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use samiti_core::models::NewMember;
use samiti_core::{fields, AppError};
use samiti_storage::materialize;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Success body: the created record's identifier and an acknowledgement flag.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub id: uuid::Uuid,
    pub ok: bool,
}

#[utoipa::path(
    post,
    path = "/api/register",
    tag = "registration",
    responses(
        (status = 201, description = "Member registered", body = RegisterResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let multipart = multipart
        .map_err(|e| AppError::Ingestion(format!("Invalid multipart request: {}", e)))?;

    // Ingestion must fully complete before any downstream step.
    let form = ingest::ingest_form(
        multipart,
        state.config.upload_tmp_dir(),
        state.config.max_upload_size_bytes(),
    )
    .await?;

    let email = fields::normalize_email(form.field("email"));
    if email.is_empty() {
        return Err(AppError::InvalidInput("Email is required".to_string()).into());
    }

    let password_hash = state
        .hasher
        .hash_password(form.field("password").unwrap_or_default())?;

    let ownership_proof_file =
        materialize_slot(&state, &form, "ownershipProofFile", "ownershipProof").await?;
    let owner_photo = materialize_slot(&state, &form, "ownerPhoto", "ownerPhoto").await?;
    let payment_receipt = materialize_slot(&state, &form, "paymentReceipt", "paymentReceipt").await?;

    let normalized = fields::NormalizedFields::normalize(&form.fields);

    let new_member = NewMember {
        sector_number: normalized.text("sectorNumber"),
        road_number: normalized.text("roadNumber"),
        plot_number: normalized.text("plotNumber"),
        plot_size: normalized.text("plotSize"),

        ownership_proof_type: normalized.text("ownershipProofType"),
        ownership_proof_file,

        owner_name_english: normalized.text("ownerNameEnglish"),
        owner_name_bangla: normalized.text("ownerNameBangla"),
        contact_number: normalized.text("contactNumber"),
        nid_number: normalized.text("nidNumber"),
        present_address: normalized.text("presentAddress"),
        permanent_address: normalized.text("permanentAddress"),
        email,
        owner_photo,

        password_hash,

        payment_method: normalized.text("paymentMethod"),
        bkash_transaction_id: normalized.optional_text("bkashTransactionId"),
        bkash_account_number: normalized.optional_text("bkashAccountNumber"),
        bank_account_number_from: normalized.optional_text("bankAccountNumberFrom"),
        payment_receipt,

        membership_fee: normalized.number("membershipFee"),
        agree_data_use: normalized.boolean("agreeDataUse"),
    };

    let member = state.members.create(new_member).await?;

    tracing::info!(member_id = %member.id, email = %member.email, "Membership registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: member.id,
            ok: true,
        }),
    ))
}

/// Materialize one upload slot; `field` is the form field name, `label` the
/// logical slot name embedded in the stored file name.
async fn materialize_slot(
    state: &AppState,
    form: &IngestedForm,
    field: &str,
    label: &str,
) -> Result<Option<String>, HttpAppError> {
    materialize(state.uploads.as_ref(), label, form.files(field))
        .await
        .map_err(HttpAppError::from)
}

/// Fallback for every non-POST method on the registration route.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(ErrorResponse {
            error: "Method Not Allowed".to_string(),
            detail: None,
        }),
    )
}
