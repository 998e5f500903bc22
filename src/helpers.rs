use bigdecimal::{BigDecimal, RoundingMode, Zero};

/// One day of fee revenue against locked value, annualized:
/// `fees / TVL * 365`, shown as a percentage with exactly two fractional
/// digits, ties rounded to even.
pub fn annual_percentage_rate(
    total_value_locked: &BigDecimal,
    fees: &BigDecimal,
) -> String {
    if total_value_locked.is_zero() || fees.is_zero() {
        return String::from("0%");
    }

    let rate = fees.clone() / total_value_locked.clone()
        * BigDecimal::from(365);
    let percent = rate * BigDecimal::from(100);

    format!("{}%", percent.with_scale_round(2, RoundingMode::HalfEven))
}

/// The pool contract reports its fee in hundredths of a basis point; shown
/// as a percentage with trailing zeros trimmed, so 3000 reads "0.3%".
pub fn fee_percentage(fee: u32) -> String {
    let value = BigDecimal::new(fee.into(), 4);

    format!("{}%", value.normalized())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn apr(total_value_locked: &str, fees: &str) -> String {
        annual_percentage_rate(
            &BigDecimal::from_str(total_value_locked).unwrap(),
            &BigDecimal::from_str(fees).unwrap(),
        )
    }

    #[test]
    fn zero_locked_value_or_fees_is_flat_zero() {
        assert_eq!(apr("0", "3"), "0%");
        assert_eq!(apr("500000", "0"), "0%");
        assert_eq!(apr("0", "0"), "0%");
    }

    #[test]
    fn annualizes_one_day_of_fees() {
        // 1 / 100 * 365, shifted to percent
        assert_eq!(apr("100", "1"), "365.00%");
        // 3 / 500000 * 365, shifted to percent
        assert_eq!(apr("500000", "3"), "0.22%");
    }

    #[test]
    fn ties_round_to_even() {
        // 0.5 / 10000 * 365 * 100 = 1.825, the 2 is even
        assert_eq!(apr("10000", "0.5"), "1.82%");
        // 0.075 exactly, the 7 is odd so the tie rounds up
        assert_eq!(apr("36500", "0.075"), "0.08%");
    }

    #[test]
    fn keeps_two_fractional_digits() {
        assert_eq!(apr("36500", "1"), "1.00%");
        assert_eq!(apr("36500", "365"), "365.00%");
    }

    #[test]
    fn fee_drops_trailing_zeros() {
        assert_eq!(fee_percentage(3000), "0.3%");
        assert_eq!(fee_percentage(500), "0.05%");
        assert_eq!(fee_percentage(100), "0.01%");
        assert_eq!(fee_percentage(10000), "1%");
        assert_eq!(fee_percentage(0), "0%");
    }
}
