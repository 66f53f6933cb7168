use super::errors::DomainError;
use super::order::{NewOrder, Order};
use super::workflow::OrderStatus;

pub trait OrderRepository: Send + Sync + 'static {
    /// Store a new order and allocate its order code as one unit of work.
    fn create(&self, order: NewOrder) -> Result<Order, DomainError>;
    /// Orders of one customer, in insertion order.
    fn find_by_customer(&self, customer_id: &str) -> Result<Vec<Order>, DomainError>;
    fn find_by_code(&self, order_code: &str) -> Result<Option<Order>, DomainError>;
    /// All orders, newest first.
    fn list_all(&self) -> Result<Vec<Order>, DomainError>;
    /// Status exactly as stored, without decoding it.
    fn current_status(&self, order_code: &str) -> Result<Option<String>, DomainError>;
    /// Set `next` only if the stored status still equals `expected`.
    ///
    /// `None` means no row matched.
    fn update_status_if(
        &self,
        order_code: &str,
        expected: &str,
        next: OrderStatus,
    ) -> Result<Option<Order>, DomainError>;
    /// Number of rows removed.
    fn delete_by_code(&self, order_code: &str) -> Result<usize, DomainError>;
}

impl<R: OrderRepository + ?Sized> OrderRepository for Box<R> {
    fn create(&self, order: NewOrder) -> Result<Order, DomainError> {
        (**self).create(order)
    }

    fn find_by_customer(&self, customer_id: &str) -> Result<Vec<Order>, DomainError> {
        (**self).find_by_customer(customer_id)
    }

    fn find_by_code(&self, order_code: &str) -> Result<Option<Order>, DomainError> {
        (**self).find_by_code(order_code)
    }

    fn list_all(&self) -> Result<Vec<Order>, DomainError> {
        (**self).list_all()
    }

    fn current_status(&self, order_code: &str) -> Result<Option<String>, DomainError> {
        (**self).current_status(order_code)
    }

    fn update_status_if(
        &self,
        order_code: &str,
        expected: &str,
        next: OrderStatus,
    ) -> Result<Option<Order>, DomainError> {
        (**self).update_status_if(order_code, expected, next)
    }

    fn delete_by_code(&self, order_code: &str) -> Result<usize, DomainError> {
        (**self).delete_by_code(order_code)
    }
}
