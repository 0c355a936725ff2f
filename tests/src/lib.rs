//! KudiCoin ICO Integration Tests
//!
//! Logic-level tests over the contract types and pool math. End-to-end
//! behavior against the in-memory VM lives next to each contract module.

#[cfg(test)]
mod phase_tests {
    use kudi_ico_contracts::types::*;
    use odra::casper_types::U256;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_phase_ordering() {
        assert!(Phase::Seed < Phase::General);
        assert!(Phase::General < Phase::Open);
    }

    #[test]
    fn test_successor_is_the_only_forward_step() {
        // no skipping: Seed -> Open is not a successor relation
        assert_ne!(Phase::Seed.successor(), Some(Phase::Open));
        assert_eq!(Phase::Seed.successor(), Some(Phase::General));
        assert_eq!(Phase::General.successor(), Some(Phase::Open));
        assert_eq!(Phase::Open.successor(), None);
    }

    #[test]
    fn test_caps_tighten_early() {
        let seed = Phase::Seed.individual_cap().unwrap();
        let general = Phase::General.individual_cap().unwrap();
        assert!(seed > general);
        assert_eq!(Phase::Open.individual_cap(), None);
    }

    #[test]
    fn test_cap_sequence_never_exceeded() {
        // replay a contribution sequence against the headroom rule
        let cap = Phase::Seed.individual_cap();
        let mut contributed = U256::zero();

        for amount in [500u64, 500, 400, 100] {
            let amount = U256::from(amount) * unit();
            let headroom = contribution_headroom(cap, contributed).unwrap();
            assert!(amount <= headroom);
            contributed = contributed + amount;
        }

        // the cap is now exhausted; any further amount exceeds headroom
        let headroom = contribution_headroom(cap, contributed).unwrap();
        assert_eq!(headroom, U256::zero());
        assert!(U256::one() > headroom);
    }

    #[test]
    fn test_entitlement_accrual_per_phase() {
        let amount = U256::from(100u64) * unit();
        let seed = amount * U256::from(Phase::Seed.exchange_rate());
        let open = amount * U256::from(Phase::Open.exchange_rate());
        assert_eq!(seed, U256::from(700u64) * unit());
        assert_eq!(open, U256::from(500u64) * unit());
    }
}

#[cfg(test)]
mod pool_math_tests {
    use kudi_ico_contracts::math::*;
    use odra::casper_types::U256;
    use pretty_assertions::assert_eq;

    const FEE_BPS: u32 = 100;

    #[test]
    fn test_bootstrap_shares_are_geometric_mean() {
        let shares = integer_sqrt(U256::from(100u64) * U256::from(100u64));
        assert_eq!(shares, U256::from(100u64));

        let shares = integer_sqrt(U256::from(1_000u64) * U256::from(5_000u64));
        assert_eq!(shares, U256::from(2_236u64));
    }

    #[test]
    fn test_swap_scenario_from_spec() {
        // deposit (100, 100), swap 10 in with a 1% fee -> 9 out
        let out = quote_swap(
            U256::from(10u64),
            U256::from(100u64),
            U256::from(100u64),
            FEE_BPS,
        )
        .unwrap();
        assert_eq!(out, U256::from(9u64));

        // k never decreases
        let k_before = U256::from(100u64) * U256::from(100u64);
        let k_after = U256::from(110u64) * (U256::from(100u64) - out);
        assert!(k_after >= k_before);
    }

    #[test]
    fn test_swap_product_grows_across_random_sizes() {
        let reserve_in = U256::from(10_000u64);
        let reserve_out = U256::from(25_000u64);

        for amount in [1u64, 17, 250, 9_999, 50_000] {
            let amount_in = U256::from(amount);
            let Some(out) = quote_swap(amount_in, reserve_in, reserve_out, FEE_BPS) else {
                continue;
            };
            let k_before = reserve_in * reserve_out;
            let k_after = (reserve_in + amount_in) * (reserve_out - out);
            assert!(k_after >= k_before, "k shrank for input {amount}");
        }
    }

    #[test]
    fn test_deposit_withdraw_round_trip() {
        // proportional deposit then full withdrawal returns the amounts
        let total = U256::from(1_000u64);
        let reserve_a = U256::from(4_000u64);
        let reserve_b = U256::from(9_000u64);
        let amount_a = U256::from(400u64);
        let amount_b = U256::from(900u64);

        let minted =
            proportional_shares(total, amount_a, reserve_a, amount_b, reserve_b).unwrap();
        assert_eq!(minted, U256::from(100u64));

        let new_total = total + minted;
        let back_a =
            proportional_amount(reserve_a + amount_a, minted, new_total).unwrap();
        let back_b =
            proportional_amount(reserve_b + amount_b, minted, new_total).unwrap();

        // within one unit of rounding
        assert!(amount_a - back_a <= U256::one());
        assert!(amount_b - back_b <= U256::one());
    }

    #[test]
    fn test_rounding_always_favors_the_pool() {
        // lopsided deposit mints by the tighter bound
        let minted = proportional_shares(
            U256::from(1_000u64),
            U256::from(100u64),
            U256::from(1_000u64),
            U256::from(1u64),
            U256::from(1_000u64),
        )
        .unwrap();
        assert_eq!(minted, U256::from(1u64));
    }

    #[test]
    fn test_ratio_tolerance_boundaries() {
        let check = |token: u64| {
            ratio_within_tolerance(
                U256::from(1_000u64),
                U256::from(token),
                U256::from(10_000u64),
                U256::from(20_000u64),
                100,
            )
            .unwrap()
        };
        assert!(check(2_000)); // exact 1:2
        assert!(check(2_019)); // just inside 1%
        assert!(!check(2_030)); // outside
    }
}
