use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::domain::errors::DomainError;
use crate::domain::order::{order_code_for, NewOrder, Order};
use crate::domain::ports::OrderRepository;
use crate::domain::workflow::OrderStatus;

#[derive(Default)]
struct State {
    last_id: i64,
    orders: Vec<Order>,
}

/// Process-local repository with the same allocation rules as the Postgres one.
///
/// Ids start at 1 and are never reused, so deleted codes stay unallocated.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    state: Mutex<State>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, DomainError> {
        self.state
            .lock()
            .map_err(|_| DomainError::StorageUnavailable("order store lock poisoned".to_string()))
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn create(&self, order: NewOrder) -> Result<Order, DomainError> {
        let mut state = self.lock()?;
        state.last_id += 1;
        let id = state.last_id;

        let stored = Order {
            id,
            order_code: order_code_for(id),
            customer_id: order.customer_id,
            size: order.size,
            quantity: order.quantity,
            total_amount: order.total_amount,
            status: OrderStatus::INITIAL,
            created_at: Utc::now(),
        };
        state.orders.push(stored.clone());
        Ok(stored)
    }

    fn find_by_customer(&self, customer_id: &str) -> Result<Vec<Order>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect())
    }

    fn find_by_code(&self, order_code: &str) -> Result<Option<Order>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .orders
            .iter()
            .find(|o| o.order_code == order_code)
            .cloned())
    }

    fn list_all(&self) -> Result<Vec<Order>, DomainError> {
        let state = self.lock()?;
        Ok(state.orders.iter().rev().cloned().collect())
    }

    fn current_status(&self, order_code: &str) -> Result<Option<String>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .orders
            .iter()
            .find(|o| o.order_code == order_code)
            .map(|o| o.status.as_str().to_string()))
    }

    fn update_status_if(
        &self,
        order_code: &str,
        expected: &str,
        next: OrderStatus,
    ) -> Result<Option<Order>, DomainError> {
        let mut state = self.lock()?;
        let Some(order) = state
            .orders
            .iter_mut()
            .find(|o| o.order_code == order_code && o.status.as_str() == expected)
        else {
            return Ok(None);
        };
        order.status = next;
        Ok(Some(order.clone()))
    }

    fn delete_by_code(&self, order_code: &str) -> Result<usize, DomainError> {
        let mut state = self.lock()?;
        let before = state.orders.len();
        state.orders.retain(|o| o.order_code != order_code);
        Ok(before - state.orders.len())
    }
}
