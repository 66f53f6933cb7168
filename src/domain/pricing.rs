//! Unit prices per size and order totals.

use bigdecimal::BigDecimal;

use super::errors::DomainError;
use super::order::Size;

pub fn unit_price(size: Size) -> BigDecimal {
    let price: u32 = match size {
        Size::Xs => 600,
        Size::S => 800,
        Size::M => 900,
        Size::L => 1000,
        Size::Xl => 1100,
        Size::Xxl => 1200,
    };
    BigDecimal::from(price)
}

/// Unit price for a size label.
pub fn price(label: &str) -> Result<BigDecimal, DomainError> {
    Ok(unit_price(label.parse()?))
}

/// `price(size) * quantity` for a size label.
///
/// The size is checked before the quantity, so an unknown label is always
/// reported as `InvalidSize`.
pub fn compute_total(label: &str, quantity: i32) -> Result<BigDecimal, DomainError> {
    total_for(label.parse()?, quantity)
}

/// `unit_price(size) * quantity`. Rejects a quantity below one.
pub fn total_for(size: Size, quantity: i32) -> Result<BigDecimal, DomainError> {
    if quantity <= 0 {
        return Err(DomainError::InvalidQuantity(format!(
            "quantity must be a positive integer, got {}",
            quantity
        )));
    }
    Ok(unit_price(size) * BigDecimal::from(quantity))
}

pub fn price_list() -> Vec<(Size, BigDecimal)> {
    Size::ALL
        .into_iter()
        .map(|size| (size, unit_price(size)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_match_table() {
        let expected = [600, 800, 900, 1000, 1100, 1200];
        for (size, amount) in Size::ALL.into_iter().zip(expected) {
            assert_eq!(unit_price(size), BigDecimal::from(amount), "{}", size);
        }
    }

    #[test]
    fn total_is_price_times_quantity() {
        for size in Size::ALL {
            for quantity in [1, 2, 3, 17, 250] {
                let total = compute_total(size.as_str(), quantity).expect("valid order");
                assert_eq!(total, unit_price(size) * BigDecimal::from(quantity));
            }
        }
    }

    #[test]
    fn medium_times_three_is_2700() {
        assert_eq!(compute_total("M", 3).expect("valid"), BigDecimal::from(2700));
    }

    #[test]
    fn unknown_size_wins_over_bad_quantity() {
        for quantity in [-5, 0, 1, 10] {
            assert!(matches!(
                compute_total("XXXL", quantity),
                Err(DomainError::InvalidSize(_))
            ));
        }
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        assert!(matches!(compute_total("S", 0), Err(DomainError::InvalidQuantity(_))));
        assert!(matches!(compute_total("S", -3), Err(DomainError::InvalidQuantity(_))));
    }

    #[test]
    fn total_for_parsed_size_matches_label_total() {
        assert_eq!(total_for(Size::Xxl, 10_000_000).expect("valid"), BigDecimal::from(12_000_000_000i64));
        for size in Size::ALL {
            assert_eq!(
                total_for(size, 7).expect("valid"),
                compute_total(size.as_str(), 7).expect("valid")
            );
        }
        assert!(matches!(total_for(Size::M, 0), Err(DomainError::InvalidQuantity(_))));
    }

    #[test]
    fn price_list_covers_every_size_in_order() {
        let list = price_list();
        assert_eq!(list.len(), 6);
        assert_eq!(list[0], (Size::Xs, BigDecimal::from(600)));
        assert_eq!(list[5], (Size::Xxl, BigDecimal::from(1200)));
    }
}
