//! Property tests for the payroll engine.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use moroccan_payroll::calculation::{calculate_family_deduction, compute_payslip};
use moroccan_payroll::config::{BRACKET_CONTINUITY_TOLERANCE, StatutoryConstants};
use moroccan_payroll::models::{
    EmployeePayrollInput, FamilyStatus, PayPeriod, PayrollContext, Payslip,
};

fn context() -> PayrollContext {
    PayrollContext::new(PayPeriod::new(2025, 1))
}

/// Salaries from 1000.00 to 100000.00, in cents.
fn salary() -> impl Strategy<Value = Decimal> {
    (100_000i64..=10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn family_status() -> impl Strategy<Value = FamilyStatus> {
    prop_oneof![
        Just(FamilyStatus::Single),
        Just(FamilyStatus::Married),
        Just(FamilyStatus::Divorced),
        Just(FamilyStatus::Widowed),
    ]
}

fn payslip(
    base_salary: Decimal,
    seniority_months: i64,
    family_status: FamilyStatus,
    children: i64,
) -> Payslip {
    let employee = EmployeePayrollInput {
        seniority_months: Some(seniority_months),
        family_status: Some(family_status),
        number_of_children: children,
        ..EmployeePayrollInput::new("emp_prop", base_salary)
    };
    compute_payslip(&employee, &context(), &StatutoryConstants::morocco()).unwrap()
}

#[test]
fn test_bracket_boundaries_are_continuous() {
    let constants = StatutoryConstants::morocco();
    for pair in constants.income_tax_brackets.windows(2) {
        let boundary = pair[0].max.unwrap();
        let jump = (pair[1].tax_at(boundary) - pair[0].tax_at(boundary)).abs();
        assert!(
            jump <= BRACKET_CONTINUITY_TOLERANCE,
            "tax jumps by {} at {}",
            jump,
            boundary
        );
    }
}

proptest! {
    #[test]
    fn no_seniority_bonus_before_two_years(base in salary(), months in 0i64..24) {
        let payslip = payslip(base, months, FamilyStatus::Single, 0);
        prop_assert_eq!(payslip.seniority_bonus.amount, Decimal::ZERO);
    }

    #[test]
    fn cnss_is_capped_above_ceiling(cents in 600_001i64..=10_000_000i64) {
        let payslip = payslip(Decimal::new(cents, 2), 0, FamilyStatus::Single, 0);
        prop_assert_eq!(payslip.contributions.cnss.base, dec!(6000.00));
        prop_assert_eq!(payslip.contributions.cnss.amount, dec!(268.80));
    }

    #[test]
    fn net_pay_increases_with_salary(
        base in 1_000i64..50_000,
        delta in 1i64..5_000,
        months in 0i64..480,
        status in family_status(),
        children in 0i64..10,
    ) {
        let lower = payslip(Decimal::from(base), months, status, children);
        let higher = payslip(Decimal::from(base + delta), months, status, children);
        prop_assert!(
            higher.net_pay >= lower.net_pay,
            "net pay fell from {} to {} when salary rose from {} to {}",
            lower.net_pay,
            higher.net_pay,
            base,
            base + delta
        );
    }

    #[test]
    fn computation_is_idempotent(
        base in salary(),
        months in 0i64..480,
        status in family_status(),
        children in 0i64..10,
    ) {
        let first = payslip(base, months, status, children);
        let second = payslip(base, months, status, children);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        prop_assert!(first.verify_fingerprint());
    }

    #[test]
    fn single_employees_get_no_family_deduction(children in 0u32..20) {
        let constants = StatutoryConstants::morocco();
        let deduction = calculate_family_deduction(FamilyStatus::Single, children, &constants);
        prop_assert_eq!(deduction.amount, Decimal::ZERO);
    }

    #[test]
    fn large_families_hit_the_ceiling(children in 6u32..50) {
        let constants = StatutoryConstants::morocco();
        let deduction = calculate_family_deduction(FamilyStatus::Married, children, &constants);
        prop_assert_eq!(deduction.amount, dec!(180.00));
    }

    #[test]
    fn tax_stays_within_bounds(
        base in salary(),
        months in 0i64..480,
        status in family_status(),
        children in 0i64..10,
    ) {
        let payslip = payslip(base, months, status, children);
        let tax = &payslip.income_tax;
        prop_assert!(tax.net_tax >= Decimal::ZERO);
        prop_assert!(tax.net_tax <= tax.gross_tax);
        prop_assert!(tax.gross_tax <= payslip.taxable_net * dec!(0.38));
        prop_assert!(payslip.taxable_net <= payslip.gross.taxable_gross);
        prop_assert!(
            payslip.contributions.professional_expenses.amount
                <= payslip.contributions.professional_expenses.monthly_cap
        );
    }
}
