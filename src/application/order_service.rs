use bigdecimal::BigDecimal;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, Size};
use crate::domain::ports::OrderRepository;
use crate::domain::{pricing, workflow};

#[derive(Debug, Clone)]
pub struct Report {
    pub orders: Vec<Order>,
    pub total_orders: usize,
    pub total_amount: BigDecimal,
}

impl Report {
    fn from_orders(orders: Vec<Order>) -> Self {
        let total_amount = orders
            .iter()
            .fold(BigDecimal::from(0), |sum, o| sum + &o.total_amount);
        Self {
            total_orders: orders.len(),
            total_amount,
            orders,
        }
    }
}

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Price and store a new order. Nothing is stored when validation fails.
    pub fn place_order(
        &self,
        customer_id: &str,
        size: &str,
        quantity: i32,
    ) -> Result<Order, DomainError> {
        if customer_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("customer contact is required".to_string()));
        }
        let size: Size = size.parse()?;
        let total_amount = pricing::total_for(size, quantity)?;

        let order = self.repo.create(NewOrder {
            customer_id: customer_id.to_string(),
            size,
            quantity,
            total_amount,
        })?;
        log::info!(
            "Placed order {} for {} ({} x {}, total {})",
            order.order_code,
            order.customer_id,
            order.quantity,
            order.size,
            order.total_amount
        );
        Ok(order)
    }

    pub fn find_by_customer(&self, customer_id: &str) -> Result<Vec<Order>, DomainError> {
        self.repo.find_by_customer(customer_id)
    }

    /// Exact lookup. Callers trim the code; a blank code never reaches the store.
    pub fn find_by_code(&self, order_code: &str) -> Result<Order, DomainError> {
        if order_code.trim().is_empty() {
            return Err(DomainError::InvalidInput("order code is required".to_string()));
        }
        self.repo
            .find_by_code(order_code)?
            .ok_or(DomainError::NotFound)
    }

    pub fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.repo.list_all()
    }

    pub fn report(&self) -> Result<Report, DomainError> {
        Ok(Report::from_orders(self.repo.list_all()?))
    }

    /// Move an order one step along its workflow and return the updated order.
    ///
    /// The update only applies if the status is still the one that was read, so
    /// an interleaved advance or delete surfaces as `ConcurrentModification`.
    pub fn advance_status(&self, order_code: &str) -> Result<Order, DomainError> {
        let current = self
            .repo
            .current_status(order_code)?
            .ok_or(DomainError::NotFound)?;
        let next = workflow::next_status(&current)?;

        match self.repo.update_status_if(order_code, &current, next)? {
            Some(order) => {
                log::info!("Order {} moved from {} to {}", order_code, current, next);
                Ok(order)
            }
            None => {
                log::warn!(
                    "Order {} changed while moving from {} to {}",
                    order_code,
                    current,
                    next
                );
                Err(DomainError::ConcurrentModification(order_code.to_string()))
            }
        }
    }

    pub fn delete_order(&self, order_code: &str) -> Result<(), DomainError> {
        match self.repo.delete_by_code(order_code)? {
            0 => Err(DomainError::NotFound),
            _ => {
                log::info!("Deleted order {}", order_code);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workflow::OrderStatus;
    use crate::infrastructure::InMemoryOrderRepository;

    fn service() -> OrderService<InMemoryOrderRepository> {
        OrderService::new(InMemoryOrderRepository::new())
    }

    fn is_order_code(code: &str) -> bool {
        code.strip_prefix("ODR#")
            .map(|digits| digits.len() >= 5 && digits.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or(false)
    }

    #[test]
    fn placing_medium_times_three_costs_2700() {
        let svc = service();
        let order = svc.place_order("alice", "M", 3).expect("place failed");

        assert_eq!(order.total_amount, BigDecimal::from(2700));
        assert_eq!(order.status, OrderStatus::Processing);
        assert!(is_order_code(&order.order_code), "{}", order.order_code);
    }

    #[test]
    fn unknown_size_persists_nothing() {
        let svc = service();
        let err = svc.place_order("alice", "XXXL", 1).unwrap_err();

        assert!(matches!(err, DomainError::InvalidSize(_)));
        assert!(svc.list_orders().expect("list failed").is_empty());
    }

    #[test]
    fn non_positive_quantity_persists_nothing() {
        let svc = service();
        assert!(matches!(
            svc.place_order("alice", "M", 0),
            Err(DomainError::InvalidQuantity(_))
        ));
        assert!(svc.list_orders().expect("list failed").is_empty());
    }

    #[test]
    fn size_is_checked_before_quantity() {
        let svc = service();
        assert!(matches!(
            svc.place_order("alice", "XXXL", 0),
            Err(DomainError::InvalidSize(_))
        ));
        let order = svc.place_order("alice", "XXL", 10_000_000).expect("place failed");
        assert_eq!(order.size, Size::Xxl);
        assert_eq!(order.total_amount, BigDecimal::from(12_000_000_000i64));
    }

    #[test]
    fn blank_customer_is_rejected() {
        let svc = service();
        assert!(matches!(
            svc.place_order("   ", "M", 1),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn advance_twice_then_no_transition() {
        let svc = service();
        let order = svc.place_order("bob", "S", 1).expect("place failed");

        let first = svc.advance_status(&order.order_code).expect("first advance");
        assert_eq!(first.status, OrderStatus::Delivering);
        let second = svc.advance_status(&order.order_code).expect("second advance");
        assert_eq!(second.status, OrderStatus::Delivered);

        let third = svc.advance_status(&order.order_code).unwrap_err();
        assert!(matches!(third, DomainError::NoTransitionAvailable(_)));
        let unchanged = svc.find_by_code(&order.order_code).expect("find failed");
        assert_eq!(unchanged.status, OrderStatus::Delivered);
    }

    #[test]
    fn advance_unknown_code_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.advance_status("ODR#00404"),
            Err(DomainError::NotFound)
        ));
    }

    #[test]
    fn find_by_code_rejects_blank_codes() {
        let svc = service();
        assert!(matches!(svc.find_by_code(""), Err(DomainError::InvalidInput(_))));
        assert!(matches!(svc.find_by_code("  \t"), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn never_allocated_code_is_not_found() {
        let svc = service();
        svc.place_order("carol", "L", 1).expect("place failed");
        assert!(matches!(svc.find_by_code("ODR#00999"), Err(DomainError::NotFound)));
    }

    #[test]
    fn deleted_order_becomes_unfindable() {
        let svc = service();
        let order = svc.place_order("dave", "XL", 2).expect("place failed");

        svc.delete_order(&order.order_code).expect("delete failed");

        assert!(matches!(svc.find_by_code(&order.order_code), Err(DomainError::NotFound)));
        assert!(matches!(svc.delete_order(&order.order_code), Err(DomainError::NotFound)));
    }

    #[test]
    fn find_by_customer_is_exact_and_may_be_empty() {
        let svc = service();
        svc.place_order("erin", "XS", 1).expect("place failed");
        svc.place_order("erin", "XXL", 2).expect("place failed");
        svc.place_order("frank", "M", 1).expect("place failed");

        assert_eq!(svc.find_by_customer("erin").expect("search failed").len(), 2);
        assert!(svc.find_by_customer("eri").expect("search failed").is_empty());
    }

    #[test]
    fn report_counts_and_sums_all_orders() {
        let svc = service();
        svc.place_order("gina", "XS", 1).expect("place failed");
        svc.place_order("gina", "M", 3).expect("place failed");
        let newest = svc.place_order("hank", "XXL", 2).expect("place failed");

        let report = svc.report().expect("report failed");
        assert_eq!(report.total_orders, 3);
        assert_eq!(report.total_amount, BigDecimal::from(600 + 2700 + 2400));
        assert_eq!(report.orders[0].order_code, newest.order_code);
    }

    #[test]
    fn empty_report_sums_to_zero() {
        let report = service().report().expect("report failed");
        assert_eq!(report.total_orders, 0);
        assert_eq!(report.total_amount, BigDecimal::from(0));
    }

    /// Loses every conditional update, as if another request got there first.
    struct RacingRepository(InMemoryOrderRepository);

    impl OrderRepository for RacingRepository {
        fn create(&self, order: NewOrder) -> Result<Order, DomainError> {
            self.0.create(order)
        }

        fn find_by_customer(&self, customer_id: &str) -> Result<Vec<Order>, DomainError> {
            self.0.find_by_customer(customer_id)
        }

        fn find_by_code(&self, order_code: &str) -> Result<Option<Order>, DomainError> {
            self.0.find_by_code(order_code)
        }

        fn list_all(&self) -> Result<Vec<Order>, DomainError> {
            self.0.list_all()
        }

        fn current_status(&self, order_code: &str) -> Result<Option<String>, DomainError> {
            self.0.current_status(order_code)
        }

        fn update_status_if(
            &self,
            _order_code: &str,
            _expected: &str,
            _next: OrderStatus,
        ) -> Result<Option<Order>, DomainError> {
            Ok(None)
        }

        fn delete_by_code(&self, order_code: &str) -> Result<usize, DomainError> {
            self.0.delete_by_code(order_code)
        }
    }

    #[test]
    fn lost_conditional_update_is_concurrent_modification() {
        let svc = OrderService::new(RacingRepository(InMemoryOrderRepository::new()));
        let order = svc.place_order("ivan", "M", 1).expect("place failed");

        assert!(matches!(
            svc.advance_status(&order.order_code),
            Err(DomainError::ConcurrentModification(code)) if code == order.order_code
        ));
        assert_eq!(
            svc.find_by_code(&order.order_code).expect("find failed").status,
            OrderStatus::Processing
        );
    }
}
