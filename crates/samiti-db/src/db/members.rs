use samiti_core::models::{Member, NewMember};
use samiti_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Member repository
///
/// Owns the single create operation of the registration pipeline. Records are
/// never updated or deleted here. The store enforces email uniqueness and the
/// enum column types; a unique violation is surfaced as a distinguishable
/// conflict so the API layer can answer 409 instead of a generic fault.
#[derive(Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, new), fields(db.table = "members", db.operation = "insert", email = %new.email))]
    pub async fn create(&self, new: NewMember) -> Result<Member, AppError> {
        let id = Uuid::new_v4();

        let member: Member = sqlx::query_as::<Postgres, Member>(
            r#"
            INSERT INTO members (
                id,
                sector_number, road_number, plot_number, plot_size,
                ownership_proof_type, ownership_proof_file,
                owner_name_english, owner_name_bangla, contact_number, nid_number,
                present_address, permanent_address, email, owner_photo,
                password,
                payment_method, bkash_transaction_id, bkash_account_number,
                bank_account_number_from, payment_receipt,
                membership_fee, agree_data_use
            )
            VALUES (
                $1, $2, $3, $4, $5,
                $6::ownership_proof_type, $7,
                $8, $9, $10, $11,
                $12, $13, $14, $15,
                $16,
                $17::payment_method, $18, $19,
                $20, $21,
                $22, $23
            )
            RETURNING
                id,
                sector_number, road_number, plot_number, plot_size,
                ownership_proof_type::text AS ownership_proof_type,
                ownership_proof_file,
                owner_name_english, owner_name_bangla, contact_number, nid_number,
                present_address, permanent_address, email, owner_photo,
                password,
                payment_method::text AS payment_method,
                bkash_transaction_id, bkash_account_number,
                bank_account_number_from, payment_receipt,
                membership_fee, agree_data_use, created_at
            "#,
        )
        .bind(id)
        .bind(&new.sector_number)
        .bind(&new.road_number)
        .bind(&new.plot_number)
        .bind(&new.plot_size)
        .bind(&new.ownership_proof_type)
        .bind(&new.ownership_proof_file)
        .bind(&new.owner_name_english)
        .bind(&new.owner_name_bangla)
        .bind(&new.contact_number)
        .bind(&new.nid_number)
        .bind(&new.present_address)
        .bind(&new.permanent_address)
        .bind(&new.email)
        .bind(&new.owner_photo)
        .bind(&new.password_hash)
        .bind(&new.payment_method)
        .bind(&new.bkash_transaction_id)
        .bind(&new.bkash_account_number)
        .bind(&new.bank_account_number_from)
        .bind(&new.payment_receipt)
        .bind(new.membership_fee)
        .bind(new.agree_data_use)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("Email already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

        tracing::info!(member_id = %member.id, "Member record created");

        Ok(member)
    }

    /// Fetch one record by id.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Member>, AppError> {
        let member = sqlx::query_as::<Postgres, Member>(
            r#"
            SELECT
                id,
                sector_number, road_number, plot_number, plot_size,
                ownership_proof_type::text AS ownership_proof_type,
                ownership_proof_file,
                owner_name_english, owner_name_bangla, contact_number, nid_number,
                present_address, permanent_address, email, owner_photo,
                password,
                payment_method::text AS payment_method,
                bkash_transaction_id, bkash_account_number,
                bank_account_number_from, payment_receipt,
                membership_fee, agree_data_use, created_at
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }
}
