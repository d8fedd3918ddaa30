use serde::{Deserialize, Serialize};

use super::catalog::PaymentPlan;

const BASIS_POINTS: u64 = 10_000;

/// Percentage discount stored in basis points so totals stay exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    basis_points: u16,
}

impl Discount {
    pub const NONE: Discount = Discount { basis_points: 0 };
    /// Ten percent, unlocked by the admissions voucher.
    pub const VOUCHER: Discount = Discount {
        basis_points: 1_000,
    };

    pub const fn basis_points(self) -> u16 {
        self.basis_points
    }

    pub fn fraction(self) -> f64 {
        f64::from(self.basis_points) / BASIS_POINTS as f64
    }

    pub const fn is_applied(self) -> bool {
        self.basis_points > 0
    }

    /// Amount left after the discount, rounded down to a whole unit.
    pub fn apply_to(self, amount: u64) -> u64 {
        let retained = BASIS_POINTS.saturating_sub(u64::from(self.basis_points));
        amount.saturating_mul(retained) / BASIS_POINTS
    }
}

/// Fixed fees charged for every course in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub course_fee: u64,
    pub transaction_fee: u64,
}

impl FeeSchedule {
    pub const fn standard() -> Self {
        Self {
            course_fee: 500_000,
            transaction_fee: 5_000,
        }
    }

    /// Derive the payment figures shown on the summary step.
    pub fn breakdown(&self, discount: Discount, balance_to_pay: u64) -> PaymentBreakdown {
        let amount_to_pay = discount.apply_to(self.course_fee);
        PaymentBreakdown {
            course_fee: self.course_fee,
            amount_to_pay,
            balance_to_pay,
            transaction_fee: self.transaction_fee,
            discount,
            total_amount_due: amount_to_pay.saturating_add(self.transaction_fee),
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentBreakdown {
    pub course_fee: u64,
    pub amount_to_pay: u64,
    pub balance_to_pay: u64,
    pub transaction_fee: u64,
    pub discount: Discount,
    pub total_amount_due: u64,
}

impl PaymentBreakdown {
    pub fn discount_amount(&self) -> u64 {
        self.course_fee.saturating_sub(self.amount_to_pay)
    }

    /// Balance is only surfaced for installment plans.
    pub fn visible_balance(&self, plan: Option<PaymentPlan>) -> Option<u64> {
        match plan {
            Some(PaymentPlan::Installments) => Some(self.balance_to_pay),
            _ => None,
        }
    }
}
