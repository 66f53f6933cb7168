use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::DomainError;
use super::workflow::OrderStatus;

/// Prefix of every human-facing order code.
pub const ORDER_CODE_PREFIX: &str = "ODR#";

/// Derive the order code from the store-assigned identity, e.g. 42 → `ODR#00042`.
pub fn order_code_for(id: i64) -> String {
    format!("{}{:05}", ORDER_CODE_PREFIX, id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
}

impl Size {
    pub const ALL: [Size; 6] = [Size::Xs, Size::S, Size::M, Size::L, Size::Xl, Size::Xxl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Xs => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
            Size::Xxl => "XXL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = DomainError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Size::ALL
            .into_iter()
            .find(|size| size.as_str() == label)
            .ok_or_else(|| DomainError::InvalidSize(label.to_string()))
    }
}

/// A fully priced order that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: String,
    pub size: Size,
    pub quantity: i32,
    pub total_amount: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: i64,
    pub order_code: String,
    pub customer_id: String,
    pub size: Size,
    pub quantity: i32,
    pub total_amount: BigDecimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}
