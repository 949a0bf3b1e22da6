use rust_decimal::{Decimal, RoundingStrategy};

/// quantity / 1000 × price，四捨五入到小數兩位
pub fn estimate_cost(quantity: u32, price_per_1k: Decimal) -> Decimal {
    (Decimal::from(quantity) / Decimal::from(1000) * price_per_1k)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn format_cost(cost: Option<Decimal>) -> String {
    match cost {
        Some(c) => format!("{:.2}", c),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_order() {
        assert_eq!(estimate_cost(500, Decimal::new(150, 2)), Decimal::new(75, 2));
    }

    #[test]
    fn test_bounds() {
        let price = Decimal::new(150, 2);
        assert_eq!(estimate_cost(10, price), Decimal::new(2, 2)); // 0.015 -> 0.02
        assert_eq!(estimate_cost(10_000, price), Decimal::new(15, 0));
    }

    #[test]
    fn test_rounds_to_two_places() {
        // 333 / 1000 * 0.99 = 0.32967
        assert_eq!(estimate_cost(333, Decimal::new(99, 2)), Decimal::new(33, 2));
        // 125 / 1000 * 0.1 = 0.0125
        assert_eq!(estimate_cost(125, Decimal::new(1, 1)), Decimal::new(1, 2));
    }

    #[test]
    fn test_matches_formula_over_range() {
        let price = Decimal::new(275, 2);
        for q in (10..=10_000u32).step_by(37) {
            let expected = (Decimal::from(q) * price / Decimal::from(1000))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            assert_eq!(estimate_cost(q, price), expected, "quantity {}", q);
            assert!(estimate_cost(q, price).scale() <= 2);
        }
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(Some(Decimal::new(75, 2))), "0.75");
        assert_eq!(format_cost(Some(Decimal::new(15, 0))), "15.00");
        assert_eq!(format_cost(None), "-");
    }
}
