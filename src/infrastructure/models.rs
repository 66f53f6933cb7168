use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, Size};
use crate::domain::workflow::OrderStatus;
use crate::schema::orders;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i64,
    pub order_code: String,
    pub customer_id: String,
    pub size: String,
    pub quantity: i32,
    pub total_amount: BigDecimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub order_code: String,
    pub customer_id: String,
    pub size: String,
    pub quantity: i32,
    pub total_amount: BigDecimal,
    pub status: String,
}

impl NewOrderRow {
    /// Row for the first write of an order, before its code is known.
    pub fn placeholder(order: &NewOrder) -> Self {
        Self {
            order_code: String::new(),
            customer_id: order.customer_id.clone(),
            size: order.size.as_str().to_string(),
            quantity: order.quantity,
            total_amount: order.total_amount.clone(),
            status: OrderStatus::INITIAL.as_str().to_string(),
        }
    }
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let size = row.size.parse::<Size>().map_err(|_| {
            DomainError::CorruptRecord(format!("order {} has unknown size '{}'", row.id, row.size))
        })?;
        let status = row.status.parse::<OrderStatus>().map_err(|_| {
            DomainError::CorruptRecord(format!(
                "order {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;

        Ok(Order {
            id: row.id,
            order_code: row.order_code,
            customer_id: row.customer_id,
            size,
            quantity: row.quantity,
            total_amount: row.total_amount,
            status,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(size: &str, status: &str) -> OrderRow {
        OrderRow {
            id: 7,
            order_code: "ODR#00007".to_string(),
            customer_id: "alice@example.com".to_string(),
            size: size.to_string(),
            quantity: 2,
            total_amount: BigDecimal::from(1600),
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn decodes_known_size_and_status() {
        let order = Order::try_from(row("S", "DELIVERING")).expect("valid row");
        assert_eq!(order.size, Size::S);
        assert_eq!(order.status, OrderStatus::Delivering);
        assert_eq!(order.order_code, "ODR#00007");
    }

    #[test]
    fn unknown_size_is_a_corrupt_record() {
        assert!(matches!(
            Order::try_from(row("XXXL", "PROCESSING")),
            Err(DomainError::CorruptRecord(_))
        ));
    }

    #[test]
    fn unknown_status_is_a_corrupt_record() {
        assert!(matches!(
            Order::try_from(row("M", "LOST")),
            Err(DomainError::CorruptRecord(_))
        ));
    }

    #[test]
    fn placeholder_row_has_empty_code_and_initial_status() {
        let new_row = NewOrderRow::placeholder(&NewOrder {
            customer_id: "bob".to_string(),
            size: Size::Xl,
            quantity: 1,
            total_amount: BigDecimal::from(1100),
        });
        assert_eq!(new_row.order_code, "");
        assert_eq!(new_row.size, "XL");
        assert_eq!(new_row.status, "PROCESSING");
    }
}
