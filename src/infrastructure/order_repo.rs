use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::db::Database;
use crate::domain::errors::DomainError;
use crate::domain::order::{order_code_for, NewOrder, Order};
use crate::domain::ports::OrderRepository;
use crate::domain::workflow::OrderStatus;
use crate::schema::orders;

use super::models::{NewOrderRow, OrderRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::StorageUnavailable(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::StorageUnavailable(e.to_string())
    }
}

fn decode_all(rows: Vec<OrderRow>) -> Result<Vec<Order>, DomainError> {
    rows.into_iter().map(Order::try_from).collect()
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    db: Database,
}

impl DieselOrderRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, order: NewOrder) -> Result<Order, DomainError> {
        self.db.unit_of_work(|conn| {
            // 1. Insert with a placeholder code; the store assigns the id.
            diesel::insert_into(orders::table)
                .values(&NewOrderRow::placeholder(&order))
                .execute(conn)?;

            // 2. Read the id back inside the same transaction.
            let id: i64 = diesel::select(sql::<BigInt>("lastval()"))
                .get_result(conn)
                .map_err(|e| DomainError::AllocationFailed(e.to_string()))?;

            // 3. Derive the code and store it on the same row.
            let row = diesel::update(orders::table.find(id))
                .set(orders::order_code.eq(order_code_for(id)))
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            Order::try_from(row)
        })
    }

    fn find_by_customer(&self, customer_id: &str) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.db.connection()?;

        let rows = orders::table
            .filter(orders::customer_id.eq(customer_id))
            .order(orders::id.asc())
            .select(OrderRow::as_select())
            .load(&mut conn)?;

        decode_all(rows)
    }

    fn find_by_code(&self, order_code: &str) -> Result<Option<Order>, DomainError> {
        let mut conn = self.db.connection()?;

        orders::table
            .filter(orders::order_code.eq(order_code))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Order::try_from)
            .transpose()
    }

    fn list_all(&self) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.db.connection()?;

        let rows = orders::table
            .select(OrderRow::as_select())
            .order((orders::created_at.desc(), orders::id.desc()))
            .load(&mut conn)?;

        decode_all(rows)
    }

    fn current_status(&self, order_code: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.db.connection()?;

        Ok(orders::table
            .filter(orders::order_code.eq(order_code))
            .select(orders::status)
            .first::<String>(&mut conn)
            .optional()?)
    }

    fn update_status_if(
        &self,
        order_code: &str,
        expected: &str,
        next: OrderStatus,
    ) -> Result<Option<Order>, DomainError> {
        let mut conn = self.db.connection()?;

        diesel::update(
            orders::table
                .filter(orders::order_code.eq(order_code))
                .filter(orders::status.eq(expected)),
        )
        .set(orders::status.eq(next.as_str()))
        .returning(OrderRow::as_returning())
        .get_result(&mut conn)
        .optional()?
        .map(Order::try_from)
        .transpose()
    }

    fn delete_by_code(&self, order_code: &str) -> Result<usize, DomainError> {
        let mut conn = self.db.connection()?;

        Ok(diesel::delete(orders::table.filter(orders::order_code.eq(order_code)))
            .execute(&mut conn)?)
    }
}
