use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::DomainError;

/// Order status. Moves forward only: PROCESSING → DELIVERING → DELIVERED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Processing,
    Delivering,
    Delivered,
}

impl OrderStatus {
    pub const INITIAL: OrderStatus = OrderStatus::Processing;

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Delivering => "DELIVERING",
            OrderStatus::Delivered => "DELIVERED",
        }
    }

    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Processing => Some(OrderStatus::Delivering),
            OrderStatus::Delivering => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROCESSING" => Ok(OrderStatus::Processing),
            "DELIVERING" => Ok(OrderStatus::Delivering),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            other => Err(DomainError::CorruptRecord(format!("unknown status '{}'", other))),
        }
    }
}

/// Next status for a status as stored.
///
/// A terminal or unrecognized status has no transition.
pub fn next_status(current: &str) -> Result<OrderStatus, DomainError> {
    current
        .parse::<OrderStatus>()
        .ok()
        .and_then(|status| status.next())
        .ok_or_else(|| DomainError::NoTransitionAvailable(current.to_string()))
}
