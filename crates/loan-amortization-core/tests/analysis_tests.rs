use loan_amortization_core::amortization::prepayment::{Occurrence, PrepaymentEvent};
use loan_amortization_core::amortization::{AmortizationMethod, LoanInput, RebalanceStrategy};
use loan_amortization_core::analysis::opportunity_cost::{
    self, OpportunityCostInput, Recommendation,
};
use loan_amortization_core::goal_seek::extra_payment::{self, GoalSeekInput};
use loan_amortization_core::investment::projection::{self, InvestmentInput};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Investment projection
// ===========================================================================

#[test]
fn test_investment_reference_scenario() {
    // Monthly rate (1.12)^(1/12) - 1 compounds to exactly 12% over a year
    let out = projection::project_investment(&InvestmentInput {
        initial_amount: dec!(10000),
        annual_net_yield: dec!(0.12),
        periods: 12,
    })
    .unwrap();
    let proj = &out.result;

    assert_eq!(proj.periods.len(), 12);
    assert!(
        (proj.final_value - dec!(11200)).abs() < dec!(0.05),
        "Expected ~11200, got {}",
        proj.final_value
    );
    assert_eq!(proj.periods.last().unwrap().accumulated, proj.final_value);
    assert!(out.warnings.is_empty());
}

#[test]
fn test_investment_gain_grows_with_horizon() {
    let gain = |periods| {
        projection::build_projection(&InvestmentInput {
            initial_amount: dec!(10000),
            annual_net_yield: dec!(0.08),
            periods,
        })
        .unwrap()
        .total_gain
    };
    assert!(gain(24) > gain(12));
    assert!(gain(120) > gain(24));
}

// ===========================================================================
// Goal seek
// ===========================================================================

fn goal(method: AmortizationMethod, desired: i64) -> GoalSeekInput {
    GoalSeekInput {
        method,
        principal: dec!(100000),
        annual_rate: dec!(0.10),
        original_term_months: 120,
        desired_term_months: desired,
    }
}

#[test]
fn test_goal_seek_equal_term_returns_zero() {
    for method in [
        AmortizationMethod::ConstantPayment,
        AmortizationMethod::ConstantPrincipal,
    ] {
        let out = extra_payment::solve_extra_payment(&goal(method, 120)).unwrap();
        assert_eq!(out.result.extra_payment, Decimal::ZERO);
    }
}

#[test]
fn test_goal_seek_degenerate_terms_return_zero() {
    for desired in [0, -1] {
        let out =
            extra_payment::solve_extra_payment(&goal(AmortizationMethod::ConstantPrincipal, desired))
                .unwrap();
        assert_eq!(out.result.extra_payment, Decimal::ZERO);
        assert!(!out.result.feasible);
    }
}

#[test]
fn test_goal_seek_shorter_target_costs_more() {
    let halve = extra_payment::solve_extra_payment(&goal(AmortizationMethod::ConstantPayment, 60))
        .unwrap()
        .result
        .extra_payment;
    let trim = extra_payment::solve_extra_payment(&goal(AmortizationMethod::ConstantPayment, 100))
        .unwrap()
        .result
        .extra_payment;
    assert!(halve > trim);
    assert!(trim > Decimal::ZERO);
}

#[test]
fn test_goal_seek_zero_rate_constant_payment() {
    let mut input = goal(AmortizationMethod::ConstantPayment, 60);
    input.annual_rate = Decimal::ZERO;
    let out = extra_payment::solve_extra_payment(&input).unwrap();
    // 100000/60 - 100000/120
    assert!((out.result.extra_payment - dec!(833.33)).abs() < dec!(0.01));
}

// ===========================================================================
// Prepay vs invest
// ===========================================================================

#[test]
fn test_prepay_vs_invest_uses_remaining_original_term() {
    let input = OpportunityCostInput {
        loan: LoanInput::new(dec!(200000), dec!(0.09), 240),
        event: PrepaymentEvent {
            method: AmortizationMethod::ConstantPayment,
            strategy: RebalanceStrategy::ShortenTerm,
            occurrence: Occurrence::Single,
            amount: dec!(20000),
            start_period: 40,
        },
        annual_net_yield: dec!(0.06),
    };
    let out = opportunity_cost::compare_prepay_vs_invest(&input).unwrap();
    let r = &out.result;

    assert_eq!(r.investment_periods, 200);
    assert_eq!(r.projection.periods.len(), 200);
    assert!(r.prepayment_gain > Decimal::ZERO);
    assert!(r.investment_gain > Decimal::ZERO);
    // 9% nominal debt beats a 6% effective yield
    assert_eq!(r.recommendation, Recommendation::Prepay);
}

#[test]
fn test_prepay_vs_invest_prepayment_after_payoff() {
    let input = OpportunityCostInput {
        loan: LoanInput::new(dec!(10000), dec!(0.05), 12),
        event: PrepaymentEvent {
            method: AmortizationMethod::ConstantPayment,
            strategy: RebalanceStrategy::ShortenTerm,
            occurrence: Occurrence::Single,
            amount: dec!(1000),
            start_period: 24,
        },
        annual_net_yield: dec!(0.10),
    };
    let out = opportunity_cost::compare_prepay_vs_invest(&input).unwrap();
    assert_eq!(out.result.investment_periods, 0);
    assert_eq!(out.result.prepayment_gain, Decimal::ZERO);
    assert_eq!(out.result.investment_gain, Decimal::ZERO);
    assert_eq!(out.result.recommendation, Recommendation::Invest);
    assert!(!out.warnings.is_empty());
}
