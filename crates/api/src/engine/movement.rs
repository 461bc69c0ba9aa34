//! Stock movement engine.
//!
//! Each call to [`MovementEngine::apply`] is a single-shot transition: the
//! request is validated into a [`MovementPlan`], referenced rows are checked,
//! and then every ledger write plus the one movement record happen inside a
//! single transaction. Any failure inside the transaction rolls all of it
//! back, so a transfer is never half-applied.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgConnection, PgPool};
use stockroom_core::error::CoreError;
use stockroom_core::ledger::{default_set_note, set_delta, UpdatedLevel};
use stockroom_core::movement::{MovementPlan, MovementRequest};
use stockroom_core::roles::ROLE_OWNER;
use stockroom_core::settings::{parse_bool, ALLOW_NEGATIVE_STOCK, READ_ONLY_MODE};
use stockroom_core::types::DbId;
use stockroom_db::models::stock_movement::{CreateStockMovement, StockMovementDetail};
use stockroom_db::repositories::{
    InventoryRepo, ItemRepo, LedgerError, SettingsRepo, StockMovementRepo, StorageAreaRepo,
};
use tracing::Instrument;

/// Message returned to non-owners while read-only mode is on.
const READ_ONLY_MESSAGE: &str =
    "System is in read-only mode. Only owner can modify data right now.";

/// The user a movement is recorded against.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: DbId,
    pub role: String,
}

/// Result of a successfully applied movement.
#[derive(Debug, Serialize)]
pub struct MovementOutcome {
    /// The stored record with its display joins.
    pub movement: StockMovementDetail,
    /// Ledger rows changed by the movement, in write order.
    pub updated_levels: Vec<UpdatedLevel>,
}

/// Failure applying a movement.
#[derive(Debug, thiserror::Error)]
pub enum MovementError {
    /// Rejected by validation or a domain rule. Nothing was written.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// A storage failure; any writes in flight were rolled back.
    #[error("Movement transaction failed: {0}")]
    Transaction(#[from] sqlx::Error),
}

impl From<LedgerError> for MovementError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Core(e) => MovementError::Domain(e),
            LedgerError::Database(e) => MovementError::Transaction(e),
        }
    }
}

/// Setting-driven rules, read fresh for every movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementPolicy {
    pub allow_negative_stock: bool,
    pub read_only_mode: bool,
}

impl MovementPolicy {
    /// Read the current policy. Missing settings count as `false`.
    pub async fn load(pool: &PgPool) -> Result<Self, sqlx::Error> {
        let allow_negative = SettingsRepo::get(pool, ALLOW_NEGATIVE_STOCK).await?;
        let read_only = SettingsRepo::get(pool, READ_ONLY_MODE).await?;
        Ok(Self {
            allow_negative_stock: parse_bool(allow_negative.as_deref()),
            read_only_mode: parse_bool(read_only.as_deref()),
        })
    }

    /// Reject writes from anyone but an owner while read-only mode is on.
    pub fn ensure_writable(&self, role: &str) -> Result<(), CoreError> {
        if self.read_only_mode && !role.trim().eq_ignore_ascii_case(ROLE_OWNER) {
            return Err(CoreError::ReadOnly(READ_ONLY_MESSAGE.into()));
        }
        Ok(())
    }
}

/// Applies stock movements against the ledger and the movement log.
///
/// Holds only the pool; construct one per request or share a clone.
#[derive(Clone)]
pub struct MovementEngine {
    pool: PgPool,
}

impl MovementEngine {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Validate and apply one movement on behalf of `actor`.
    pub async fn apply(
        &self,
        req: &MovementRequest,
        actor: &Actor,
    ) -> Result<MovementOutcome, MovementError> {
        let span = tracing::info_span!(
            "movement_apply",
            movement_type = req.movement_type.as_deref().unwrap_or(""),
            item_id = ?req.item_id,
            actor_id = actor.user_id,
        );
        self.apply_inner(req, actor).instrument(span).await
    }

    async fn apply_inner(
        &self,
        req: &MovementRequest,
        actor: &Actor,
    ) -> Result<MovementOutcome, MovementError> {
        let policy = MovementPolicy::load(&self.pool).await?;
        policy.ensure_writable(&actor.role)?;

        let movement_type = req.movement_type()?;
        let item_id = req.item_id()?;
        if ItemRepo::find_active(&self.pool, item_id).await?.is_none() {
            return Err(CoreError::invalid_reference("item_id").into());
        }

        let plan = MovementPlan::from_request(movement_type, req)?;
        for (field, area_id) in plan.area_refs() {
            if StorageAreaRepo::find_active(&self.pool, area_id).await?.is_none() {
                return Err(CoreError::invalid_reference(field).into());
            }
        }

        let mut tx = self.pool.begin().await?;
        let result = execute(&mut *tx, item_id, plan, req, actor, policy).await;
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tx.rollback().await?;
                if let MovementError::Domain(CoreError::InsufficientStock(_)) = &e {
                    tracing::warn!(item_id, %movement_type, "Movement rejected: insufficient stock");
                }
                return Err(e);
            }
        };
        tx.commit().await?;

        tracing::info!(
            movement_id = outcome.movement.id,
            %movement_type,
            item_id,
            actor_id = actor.user_id,
            "Stock movement applied",
        );
        Ok(outcome)
    }
}

/// Run the ledger writes for `plan` and append its record, all on `conn`.
async fn execute(
    conn: &mut PgConnection,
    item_id: DbId,
    plan: MovementPlan,
    req: &MovementRequest,
    actor: &Actor,
    policy: MovementPolicy,
) -> Result<MovementOutcome, MovementError> {
    let allow_negative = policy.allow_negative_stock;
    let level = |storage_area_id: DbId, quantity: Decimal| UpdatedLevel {
        item_id,
        storage_area_id,
        quantity,
    };

    let mut note = req.note.clone().unwrap_or_default();
    let (from, to, quantity, updated_levels) = match plan {
        MovementPlan::Receive { to, quantity } => {
            let stored = InventoryRepo::adjust(conn, item_id, to, quantity, allow_negative).await?;
            (None, Some(to), quantity, vec![level(to, stored)])
        }
        MovementPlan::Issue { from, quantity } => {
            let stored =
                InventoryRepo::adjust(conn, item_id, from, -quantity, allow_negative).await?;
            (Some(from), None, -quantity, vec![level(from, stored)])
        }
        MovementPlan::Adjust { area, delta } => {
            let stored = InventoryRepo::adjust(conn, item_id, area, delta, allow_negative).await?;
            (None, Some(area), delta, vec![level(area, stored)])
        }
        MovementPlan::Transfer { from, to, quantity } => {
            let from_stored =
                InventoryRepo::adjust(&mut *conn, item_id, from, -quantity, allow_negative)
                    .await?;
            let to_stored =
                InventoryRepo::adjust(&mut *conn, item_id, to, quantity, allow_negative).await?;
            (
                Some(from),
                Some(to),
                quantity,
                vec![level(from, from_stored), level(to, to_stored)],
            )
        }
        MovementPlan::Set { area, target } => {
            let current = InventoryRepo::lock_quantity(&mut *conn, item_id, area).await?;
            let delta = set_delta(current, target)?;
            let stored = InventoryRepo::set_absolute(&mut *conn, item_id, area, target).await?;
            if req.note.is_none() {
                note = default_set_note(current, target);
            }
            (None, Some(area), delta, vec![level(area, stored)])
        }
    };

    let movement = StockMovementRepo::append(
        conn,
        &CreateStockMovement {
            movement_type: plan.movement_type(),
            item_id,
            from_storage_area_id: from,
            to_storage_area_id: to,
            quantity,
            note,
            reference: req.reference.clone().unwrap_or_default(),
            created_by: Some(actor.user_id),
        },
    )
    .await?;

    Ok(MovementOutcome {
        movement,
        updated_levels,
    })
}
