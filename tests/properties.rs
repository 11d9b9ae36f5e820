use proptest::prelude::*;
use rust_decimal::Decimal;
use split_settle::{
    compute_balances, resolve_settlements, split_evenly, Balances, EngineConfig, Expense, Member,
    SettleError,
};

fn members(count: usize) -> Vec<Member> {
    (0..count)
        .map(|idx| Member::new(format!("m{}", idx), format!("Member {}", idx)))
        .collect()
}

/// Build expenses from generated indexes; every third expense uses explicit splits
fn expenses(
    member_count: usize,
    amounts: &[i64],
    payer_indexes: &[usize],
    participant_masks: &[usize],
) -> Vec<Expense> {
    amounts
        .iter()
        .enumerate()
        .map(|(idx, &cents)| {
            let payer = payer_indexes.get(idx).copied().unwrap_or(0) % member_count;
            let mask = participant_masks.get(idx).copied().unwrap_or(1);
            let mut participants: Vec<String> = (0..member_count)
                .filter(|m| mask & (1 << m) != 0)
                .map(|m| format!("m{}", m))
                .collect();
            if participants.is_empty() {
                participants.push(format!("m{}", payer));
            }

            let id = format!("e{}", idx);
            let payer = format!("m{}", payer);
            if idx % 3 == 2 {
                // Participant k pays k times `cents`
                let shares: Vec<Decimal> = (1..=participants.len() as i64)
                    .map(|weight| Decimal::new(weight * cents, 2))
                    .collect();
                let total = shares.iter().copied().sum();
                Expense::even(id, "custom", total, payer, participants).with_split_amounts(shares)
            } else {
                Expense::even(id, "even", Decimal::new(cents, 2), payer, participants)
            }
        })
        .collect()
}

fn apply(balances: &Balances) -> Balances {
    let mut remaining = balances.clone();
    for settlement in resolve_settlements(balances) {
        *remaining.get_mut(&settlement.from).unwrap() += settlement.amount;
        *remaining.get_mut(&settlement.to).unwrap() -= settlement.amount;
    }
    remaining
}

proptest! {
    #[test]
    fn balances_sum_to_zero(
        member_count in 1usize..=8,
        amounts in prop::collection::vec(1i64..=1_000_000, 0..=30),
        payer_indexes in prop::collection::vec(0usize..=7, 0..=30),
        participant_masks in prop::collection::vec(0usize..=255, 0..=30),
    ) {
        let members = members(member_count);
        let expenses = expenses(member_count, &amounts, &payer_indexes, &participant_masks);

        let balances = compute_balances(&members, &expenses, &EngineConfig::default()).unwrap();

        prop_assert_eq!(balances.len(), member_count);
        let total: Decimal = balances.values().copied().sum();
        prop_assert_eq!(total, Decimal::ZERO);
    }
}

proptest! {
    #[test]
    fn settlements_zero_every_balance(
        member_count in 1usize..=8,
        amounts in prop::collection::vec(1i64..=1_000_000, 0..=30),
        payer_indexes in prop::collection::vec(0usize..=7, 0..=30),
        participant_masks in prop::collection::vec(0usize..=255, 0..=30),
    ) {
        let members = members(member_count);
        let expenses = expenses(member_count, &amounts, &payer_indexes, &participant_masks);
        let balances = compute_balances(&members, &expenses, &EngineConfig::default()).unwrap();

        let settlements = resolve_settlements(&balances);

        let non_zero = balances.values().filter(|b| !b.is_zero()).count();
        prop_assert!(settlements.len() <= non_zero.saturating_sub(1));
        prop_assert!(settlements.iter().all(|s| s.amount > Decimal::ZERO && s.from != s.to));
        prop_assert!(apply(&balances).values().all(Decimal::is_zero));
        prop_assert_eq!(settlements, resolve_settlements(&balances.clone()));
    }
}

proptest! {
    #[test]
    fn even_split_is_exact(
        cents in 1i64..=100_000_000,
        participants in 1usize..=50,
        scale in 0u32..=4,
    ) {
        let amount = Decimal::new(cents, 2);

        let shares = split_evenly(amount, participants, scale).unwrap();

        prop_assert_eq!(shares.len(), participants);
        prop_assert_eq!(shares.iter().copied().sum::<Decimal>(), amount);
        let largest = shares.iter().copied().max().unwrap();
        let smallest = shares.iter().copied().min().unwrap();
        let unit = Decimal::new(1, scale.max(amount.normalize().scale()));
        prop_assert!(largest - smallest <= unit);
    }
}

proptest! {
    #[test]
    fn even_split_near_precision_limit_never_loses_units(
        mantissa in (1i128 << 90)..(1i128 << 96),
        amount_scale in 0u32..=3,
        participants in 1usize..=50,
    ) {
        let amount = Decimal::from_i128_with_scale(mantissa, amount_scale);
        let scale = 2u32.max(amount.normalize().scale());

        match split_evenly(amount, participants, 2) {
            Ok(shares) => {
                prop_assert_eq!(shares.len(), participants);
                prop_assert!(shares.iter().all(|share| share.scale() == scale));
                let units: i128 = shares.iter().map(|share| share.mantissa()).sum();
                let normalized = amount.normalize();
                let expected = normalized.mantissa() * 10i128.pow(scale - normalized.scale());
                prop_assert_eq!(units, expected);
            }
            Err(error) => {
                let is_overflow = matches!(error, SettleError::ArithmeticOverflow { .. });
                prop_assert!(is_overflow);
            }
        }
    }
}
