#![cfg(all(test, feature = "fuzz-tests"))]

use crate::amount::TokenAmount;
use crate::distro::TokenDistroHelper;
use crate::errors::DistroError;
use crate::types::TokenDistroInfo;

use num_bigint::BigInt;
use proptest::prelude::*;

const MAX_DIGITS: usize = 90;

/// Decimal strings up to 90 digits, far past 2^256.
fn wide_amount() -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("[1-9][0-9]{{0,{}}}", MAX_DIGITS - 1)).unwrap()
}

fn wide_info(initial: &str, locked: &str, start: i64, cliff: i64, end: i64) -> TokenDistroInfo {
    let total = TokenAmount::parse(initial).unwrap() + TokenAmount::parse(locked).unwrap();
    TokenDistroInfo {
        contract_address: "0xfuzz".to_owned(),
        initial_amount: initial.into(),
        locked_amount: locked.into(),
        total_tokens: total.into(),
        start_time: start.into(),
        cliff_time: cliff.into(),
        end_time: end.into(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1_000))]

    #[test]
    fn fuzz_wide_amounts_release_exactly(
        initial in wide_amount(),
        locked in wide_amount(),
        start in i64::MIN / 4..i64::MAX / 4,
        cliff_offset in 0i64..i64::MAX / 8,
        tail in 1i64..i64::MAX / 8,
        permille in 0u32..=1_000,
    ) {
        let cliff = start + cliff_offset;
        let end = cliff + tail;
        let helper = TokenDistroHelper::new(wide_info(&initial, &locked, start, cliff, end), None).unwrap();

        let span = (end - start) as i128;
        let now = (start as i128 + span * permille as i128 / 1_000) as i64;

        let claimable = helper.globally_claimable_at(now);
        prop_assert!(&claimable >= helper.initial_amount() || now < start);
        prop_assert!(&claimable <= helper.total_tokens());

        if now > cliff && now < end {
            let expected = BigInt::from(now - start) * helper.locked_amount().as_bigint()
                / BigInt::from(end - start)
                + helper.initial_amount().as_bigint();
            prop_assert_eq!(claimable.as_bigint(), &expected);
        }
    }

    #[test]
    fn fuzz_garbage_amount_strings_never_panic(input in "\\PC{0,40}") {
        match TokenAmount::parse(&input) {
            Ok(amount) => prop_assert!(!amount.is_negative()),
            Err(err) => prop_assert!(matches!(err, DistroError::InvalidAmount | DistroError::NegativeAmount)),
        }
    }

    #[test]
    fn fuzz_backwards_schedules_are_rejected(start in any::<i64>(), back in 1i64..i64::MAX) {
        let end = start.saturating_sub(back);
        prop_assume!(end < start);
        let result = TokenDistroHelper::new(wide_info("1", "1", start, start, end), None);
        prop_assert!(matches!(result, Err(DistroError::InvalidSchedule)));
    }
}
