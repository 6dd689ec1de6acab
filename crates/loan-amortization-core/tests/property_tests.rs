use loan_amortization_core::amortization::prepayment::{
    run_prepayment, Occurrence, PrepaymentEvent,
};
use loan_amortization_core::amortization::schedule::build_schedule;
use loan_amortization_core::amortization::{
    AmortizationMethod, LoanInput, RebalanceStrategy, Schedule, BALANCE_EPSILON,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn method_strategy() -> impl Strategy<Value = AmortizationMethod> {
    prop_oneof![
        Just(AmortizationMethod::ConstantPayment),
        Just(AmortizationMethod::ConstantPrincipal),
    ]
}

fn loan_strategy() -> impl Strategy<Value = LoanInput> {
    (
        1_000u32..1_000_000,
        0u32..3_000,
        12u32..=480,
        0u32..100,
        0u32..200,
        0u32..1_500,
    )
        .prop_map(
            |(principal, rate_bp, term, fee, insurance_bp, inflation_bp)| LoanInput {
                principal: Decimal::from(principal),
                annual_rate: Decimal::new(rate_bp as i64, 4),
                term_months: term,
                monthly_fee: Decimal::from(fee),
                annual_insurance_rate: Decimal::new(insurance_bp as i64, 4),
                annual_inflation_rate: Decimal::new(inflation_bp as i64, 4),
            },
        )
}

fn assert_schedule_invariants(schedule: &Schedule, principal: Decimal) {
    let periods = &schedule.periods;
    assert!(!periods.is_empty());
    assert_eq!(periods.last().unwrap().balance, Decimal::ZERO);

    let mut prev_balance = principal;
    for (idx, p) in periods.iter().enumerate() {
        assert_eq!(p.period as usize, idx + 1, "periods must be contiguous");
        assert!(p.balance >= Decimal::ZERO, "negative balance at {}", p.period);
        assert!(p.balance <= prev_balance, "balance rose at {}", p.period);
        prev_balance = p.balance;

        let parts = p.principal + p.interest + p.fee + p.insurance;
        let tolerance = (p.payment.abs() * dec!(0.000001)).max(dec!(0.000001));
        assert!(
            (p.payment - parts).abs() <= tolerance,
            "payment identity broken at {}: {} vs {}",
            p.period,
            p.payment,
            parts
        );
    }

    assert!(
        (schedule.summary.total_principal - principal).abs() <= BALANCE_EPSILON,
        "principal repaid {} vs {}",
        schedule.summary.total_principal,
        principal
    );
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(48))]

    #[test]
    fn prop_plain_schedules_close_at_zero(loan in loan_strategy(), method in method_strategy()) {
        let schedule = build_schedule(&loan, method).unwrap();
        prop_assert_eq!(schedule.len(), loan.term_months as usize);
        assert_schedule_invariants(&schedule, loan.principal);
    }

    #[test]
    fn prop_constant_payment_is_level(loan in loan_strategy()) {
        let schedule = build_schedule(&loan, AmortizationMethod::ConstantPayment).unwrap();
        let periods = &schedule.periods;
        let first = periods[0].principal + periods[0].interest;
        for p in &periods[..periods.len() - 1] {
            prop_assert!((p.principal + p.interest - first).abs() < dec!(0.000001));
        }
    }

    #[test]
    fn prop_constant_principal_is_level(loan in loan_strategy()) {
        let schedule = build_schedule(&loan, AmortizationMethod::ConstantPrincipal).unwrap();
        let expected = loan.principal / Decimal::from(loan.term_months);
        for p in &schedule.periods {
            prop_assert!((p.principal - expected).abs() < dec!(0.000001));
        }
    }

    #[test]
    fn prop_zero_extra_reproduces_plain_schedule(
        loan in loan_strategy(),
        method in method_strategy(),
        recurring in any::<bool>(),
        start in 1u32..48,
    ) {
        let event = PrepaymentEvent {
            method,
            strategy: RebalanceStrategy::ShortenTerm,
            occurrence: if recurring { Occurrence::Recurring } else { Occurrence::Single },
            amount: Decimal::ZERO,
            start_period: start,
        };
        let simulated = run_prepayment(&loan, &event).unwrap();
        let plain = build_schedule(&loan, method).unwrap();
        prop_assert_eq!(simulated, plain);
    }

    #[test]
    fn prop_prepayment_schedules_close_at_zero(
        loan in loan_strategy(),
        method in method_strategy(),
        shorten in any::<bool>(),
        recurring in any::<bool>(),
        amount_pct in 1u32..=60,
        start in 1u32..=480,
    ) {
        let event = PrepaymentEvent {
            method,
            strategy: if shorten { RebalanceStrategy::ShortenTerm } else { RebalanceStrategy::ReducePayment },
            occurrence: if recurring { Occurrence::Recurring } else { Occurrence::Single },
            amount: loan.principal * Decimal::from(amount_pct) / dec!(100),
            start_period: start,
        };
        let schedule = run_prepayment(&loan, &event).unwrap();
        prop_assert!(schedule.len() <= loan.term_months as usize);
        assert_schedule_invariants(&schedule, loan.principal);
    }

    #[test]
    fn prop_reduce_payment_keeps_term(
        loan in loan_strategy(),
        method in method_strategy(),
        amount_pct in 1u32..=25,
        start_frac in 1u32..=50,
    ) {
        let start = (loan.term_months * start_frac / 100).max(1);
        let event = PrepaymentEvent {
            method,
            strategy: RebalanceStrategy::ReducePayment,
            occurrence: Occurrence::Single,
            amount: loan.principal * Decimal::from(amount_pct) / dec!(100),
            start_period: start,
        };
        let schedule = run_prepayment(&loan, &event).unwrap();
        prop_assert_eq!(schedule.len(), loan.term_months as usize);
    }

    #[test]
    fn prop_shorten_term_never_lengthens(
        loan in loan_strategy(),
        method in method_strategy(),
        amount_pct in 1u32..=25,
        start_frac in 1u32..=50,
    ) {
        let start = (loan.term_months * start_frac / 100).max(1);
        let event = PrepaymentEvent {
            method,
            strategy: RebalanceStrategy::ShortenTerm,
            occurrence: Occurrence::Single,
            amount: loan.principal * Decimal::from(amount_pct) / dec!(100),
            start_period: start,
        };
        let schedule = run_prepayment(&loan, &event).unwrap();
        let plain = build_schedule(&loan, method).unwrap();
        prop_assert!(schedule.len() <= plain.len());
        prop_assert!(schedule.summary.total_interest <= plain.summary.total_interest);
    }
}
