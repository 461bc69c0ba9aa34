//! Movement requests and their validation into a typed plan.
//!
//! A [`MovementRequest`] is the loosely-typed payload accepted at the HTTP
//! boundary. [`MovementPlan::from_request`] checks its shape (movement type,
//! quantities, which area fields are present) and yields one of five
//! branches. Existence of the referenced item and areas is checked by the
//! engine against the database.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::quantity::{non_zero_quantity, positive_quantity, target_quantity};
use crate::types::DbId;

/// The five kinds of stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    Receive,
    Issue,
    Adjust,
    Transfer,
    Set,
}

impl MovementType {
    pub const ALL: [MovementType; 5] = [
        MovementType::Receive,
        MovementType::Issue,
        MovementType::Adjust,
        MovementType::Transfer,
        MovementType::Set,
    ];

    /// The value stored in `stock_movements.movement_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            MovementType::Receive => "receive",
            MovementType::Issue => "issue",
            MovementType::Adjust => "adjust",
            MovementType::Transfer => "transfer",
            MovementType::Set => "set",
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementType {
    type Err = CoreError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        MovementType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                CoreError::InvalidRequest(
                    "Invalid movement type. Use receive, issue, adjust, transfer, or set.".into(),
                )
            })
    }
}

/// Raw movement payload as submitted by a caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementRequest {
    pub movement_type: Option<String>,
    pub item_id: Option<DbId>,
    pub quantity: Option<Value>,
    pub target_quantity: Option<Value>,
    pub from_storage_area_id: Option<DbId>,
    pub to_storage_area_id: Option<DbId>,
    pub storage_area_id: Option<DbId>,
    pub note: Option<String>,
    pub reference: Option<String>,
}

impl MovementRequest {
    /// Parse the requested movement type.
    pub fn movement_type(&self) -> Result<MovementType, CoreError> {
        self.movement_type.as_deref().unwrap_or("").parse()
    }

    /// The item id, which must be a positive integer.
    pub fn item_id(&self) -> Result<DbId, CoreError> {
        positive_id(self.item_id, "item_id")
    }

    /// Area for single-area types: `to_storage_area_id` wins over `storage_area_id`.
    fn single_area(&self) -> Option<DbId> {
        self.to_storage_area_id.or(self.storage_area_id)
    }

    /// Target for `set`: `target_quantity` wins over `quantity`.
    fn target(&self) -> Option<&Value> {
        match &self.target_quantity {
            Some(Value::Null) | None => self.quantity.as_ref(),
            Some(v) => Some(v),
        }
    }
}

/// A validated movement, one variant per movement type.
///
/// Quantities are already rounded to three decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementPlan {
    Receive { to: DbId, quantity: Decimal },
    Issue { from: DbId, quantity: Decimal },
    /// `delta` is signed as given by the caller.
    Adjust { area: DbId, delta: Decimal },
    Transfer { from: DbId, to: DbId, quantity: Decimal },
    Set { area: DbId, target: Decimal },
}

impl MovementPlan {
    /// Validate the shape of a request for the given movement type.
    pub fn from_request(
        movement_type: MovementType,
        req: &MovementRequest,
    ) -> Result<Self, CoreError> {
        match movement_type {
            MovementType::Receive => {
                let quantity = positive_quantity(req.quantity.as_ref())?;
                let to = positive_id(req.to_storage_area_id, "to_storage_area_id")?;
                Ok(MovementPlan::Receive { to, quantity })
            }
            MovementType::Issue => {
                let quantity = positive_quantity(req.quantity.as_ref())?;
                let from = positive_id(req.from_storage_area_id, "from_storage_area_id")?;
                Ok(MovementPlan::Issue { from, quantity })
            }
            MovementType::Adjust => {
                let area = required_area(req.single_area(), "adjust")?;
                let delta = non_zero_quantity(req.quantity.as_ref())?;
                Ok(MovementPlan::Adjust { area, delta })
            }
            MovementType::Transfer => {
                let quantity = positive_quantity(req.quantity.as_ref())?;
                let from = positive_id(req.from_storage_area_id, "from_storage_area_id")?;
                let to = positive_id(req.to_storage_area_id, "to_storage_area_id")?;
                if from == to {
                    return Err(CoreError::InvalidRequest(
                        "Transfer source and destination must be different.".into(),
                    ));
                }
                Ok(MovementPlan::Transfer { from, to, quantity })
            }
            MovementType::Set => {
                let area = required_area(req.single_area(), "set")?;
                let target = target_quantity(req.target())?;
                Ok(MovementPlan::Set { area, target })
            }
        }
    }

    pub fn movement_type(&self) -> MovementType {
        match self {
            MovementPlan::Receive { .. } => MovementType::Receive,
            MovementPlan::Issue { .. } => MovementType::Issue,
            MovementPlan::Adjust { .. } => MovementType::Adjust,
            MovementPlan::Transfer { .. } => MovementType::Transfer,
            MovementPlan::Set { .. } => MovementType::Set,
        }
    }

    /// Every storage area the plan touches, paired with the request field it came from.
    pub fn area_refs(&self) -> Vec<(&'static str, DbId)> {
        match *self {
            MovementPlan::Receive { to, .. } => vec![("to_storage_area_id", to)],
            MovementPlan::Issue { from, .. } => vec![("from_storage_area_id", from)],
            MovementPlan::Adjust { area, .. } | MovementPlan::Set { area, .. } => {
                vec![("storage_area_id", area)]
            }
            MovementPlan::Transfer { from, to, .. } => vec![
                ("from_storage_area_id", from),
                ("to_storage_area_id", to),
            ],
        }
    }
}

fn positive_id(id: Option<DbId>, field: &'static str) -> Result<DbId, CoreError> {
    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(CoreError::invalid_reference(field)),
    }
}

fn required_area(id: Option<DbId>, movement: &str) -> Result<DbId, CoreError> {
    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(CoreError::InvalidReference {
            field: "storage_area_id",
            message: format!("storage_area_id is required for {movement}."),
        }),
    }
}
