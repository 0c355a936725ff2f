//! Integer math for the constant-product pool.
//!
//! Every function is total over its checked domain and returns `None` on
//! overflow or an empty reserve; callers translate `None` into a revert.
//! All division truncates toward zero, which always favors the pool.

use odra::casper_types::U256;

/// Basis points scale (100% = 10000 bps)
pub const BPS_SCALE: u64 = 10_000;

/// Integer square root (floor) using the Babylonian method.
///
/// Exact for perfect squares, floor of the true root otherwise.
pub fn integer_sqrt(n: U256) -> U256 {
    if n <= U256::one() {
        return n;
    }

    let mut z = n;
    let mut x = n / 2 + 1;
    while x < z {
        z = x;
        x = (n / x + x) / 2;
    }
    z
}

/// Constant-product swap quote.
///
/// The fee is skimmed off `amount_in` before the invariant formula:
/// `out = reserve_out * in_kept / (reserve_in + in_kept)`, computed without
/// intermediate truncation:
/// `out = (in * keep_bps * reserve_out) / (reserve_in * BPS + in * keep_bps)`.
pub fn quote_swap(
    amount_in: U256,
    reserve_in: U256,
    reserve_out: U256,
    fee_bps: u32,
) -> Option<U256> {
    if u64::from(fee_bps) >= BPS_SCALE {
        return None;
    }
    if amount_in.is_zero() || reserve_in.is_zero() || reserve_out.is_zero() {
        return None;
    }

    let keep = U256::from(BPS_SCALE - u64::from(fee_bps));
    let in_with_fee = amount_in.checked_mul(keep)?;
    let numerator = in_with_fee.checked_mul(reserve_out)?;
    let denominator = reserve_in
        .checked_mul(U256::from(BPS_SCALE))?
        .checked_add(in_with_fee)?;
    numerator.checked_div(denominator)
}

/// Shares minted for a deposit into a non-empty pool.
///
/// Takes the tighter of the two proportional bounds so rounding never
/// credits the depositor for value the pool did not receive.
pub fn proportional_shares(
    total_shares: U256,
    amount_a: U256,
    reserve_a: U256,
    amount_b: U256,
    reserve_b: U256,
) -> Option<U256> {
    let by_a = total_shares.checked_mul(amount_a)?.checked_div(reserve_a)?;
    let by_b = total_shares.checked_mul(amount_b)?.checked_div(reserve_b)?;
    Some(by_a.min(by_b))
}

/// Reserve amount paid out when burning `shares`, truncated toward zero.
pub fn proportional_amount(reserve: U256, shares: U256, total_shares: U256) -> Option<U256> {
    reserve.checked_mul(shares)?.checked_div(total_shares)
}

/// Whether `(amount_a, amount_b)` matches the `(reserve_a, reserve_b)` price
/// ratio within `tolerance_bps`.
///
/// Compares the cross products `amount_a * reserve_b` and
/// `amount_b * reserve_a`; deviation is measured against the native-side
/// cross product.
pub fn ratio_within_tolerance(
    amount_a: U256,
    amount_b: U256,
    reserve_a: U256,
    reserve_b: U256,
    tolerance_bps: u32,
) -> Option<bool> {
    let lhs = amount_a.checked_mul(reserve_b)?;
    let rhs = amount_b.checked_mul(reserve_a)?;
    if lhs.is_zero() {
        return Some(rhs.is_zero());
    }

    let diff = if lhs > rhs { lhs - rhs } else { rhs - lhs };
    let scaled_diff = diff.checked_mul(U256::from(BPS_SCALE))?;
    let allowance = lhs.checked_mul(U256::from(u64::from(tolerance_bps)))?;
    Some(scaled_diff <= allowance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_of_perfect_squares() {
        assert_eq!(integer_sqrt(U256::zero()), U256::zero());
        assert_eq!(integer_sqrt(U256::one()), U256::one());
        assert_eq!(integer_sqrt(U256::from(4u64)), U256::from(2u64));
        assert_eq!(integer_sqrt(U256::from(10_000u64)), U256::from(100u64));
        assert_eq!(integer_sqrt(U256::from(1_000_000u64)), U256::from(1_000u64));
    }

    #[test]
    fn sqrt_floors_non_perfect_squares() {
        assert_eq!(integer_sqrt(U256::from(2u64)), U256::one());
        assert_eq!(integer_sqrt(U256::from(99u64)), U256::from(9u64));
        assert_eq!(integer_sqrt(U256::from(101u64)), U256::from(10u64));
    }

    #[test]
    fn sqrt_handles_large_inputs() {
        let n = U256::from(u128::MAX);
        let root = integer_sqrt(n);
        assert!(root * root <= n);
        assert!((root + 1) * (root + 1) > n);
    }

    #[test]
    fn quote_swap_matches_cpmm_formula() {
        // 10 in against (100, 100) with a 1% fee: 9900 * 100 / 1_009_900 -> 9
        let out = quote_swap(
            U256::from(10u64),
            U256::from(100u64),
            U256::from(100u64),
            100,
        )
        .unwrap();
        assert_eq!(out, U256::from(9u64));
    }

    #[test]
    fn quote_swap_preserves_product() {
        let reserve_in = U256::from(5_000u64);
        let reserve_out = U256::from(8_000u64);
        let amount_in = U256::from(137u64);

        let out = quote_swap(amount_in, reserve_in, reserve_out, 100).unwrap();
        let k_before = reserve_in * reserve_out;
        let k_after = (reserve_in + amount_in) * (reserve_out - out);
        assert!(k_after >= k_before);
    }

    #[test]
    fn quote_swap_without_fee_still_rounds_down() {
        let out = quote_swap(
            U256::from(10u64),
            U256::from(100u64),
            U256::from(100u64),
            0,
        )
        .unwrap();
        // 10 * 100 / 110 = 9.09.. -> 9
        assert_eq!(out, U256::from(9u64));
    }

    #[test]
    fn quote_swap_rejects_empty_reserves_and_full_fee() {
        assert_eq!(
            quote_swap(U256::from(10u64), U256::zero(), U256::from(100u64), 100),
            None
        );
        assert_eq!(
            quote_swap(U256::from(10u64), U256::from(100u64), U256::from(100u64), 10_000),
            None
        );
    }

    #[test]
    fn proportional_shares_take_the_tighter_bound() {
        // 10% of reserve A but only 5% of reserve B: mint 5%
        let minted = proportional_shares(
            U256::from(1_000u64),
            U256::from(10u64),
            U256::from(100u64),
            U256::from(10u64),
            U256::from(200u64),
        )
        .unwrap();
        assert_eq!(minted, U256::from(50u64));
    }

    #[test]
    fn proportional_round_trip_within_one_unit() {
        let total = U256::from(1_000u64);
        let reserve = U256::from(3_333u64);
        let shares = U256::from(101u64);

        let paid = proportional_amount(reserve, shares, total).unwrap();
        let exact_floor = reserve * shares / total;
        assert_eq!(paid, exact_floor);
        assert!(reserve * shares - paid * total < total);
    }

    #[test]
    fn ratio_tolerance_accepts_exact_and_near_ratios() {
        let within = |a: u64, b: u64| {
            ratio_within_tolerance(
                U256::from(a),
                U256::from(b),
                U256::from(1_000u64),
                U256::from(2_000u64),
                100,
            )
            .unwrap()
        };
        assert!(within(100, 200)); // exact
        assert!(within(100, 201)); // 0.5% off
        assert!(!within(100, 230)); // 15% off
    }
}
