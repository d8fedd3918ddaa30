use serde::Serialize;
use tracing::debug;

use super::draft::ApplicationDraft;
use super::pricing::Discount;

/// The only voucher accepted by admissions. Compared case-insensitively.
pub const VOUCHER_CODE: &str = "FREDMIND2025";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherStatus {
    Applied,
    Rejected,
    Missing,
}

/// Feedback shown next to the voucher input after pressing "Apply".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoucherNotice {
    pub status: VoucherStatus,
    pub message: &'static str,
}

impl VoucherNotice {
    const fn new(status: VoucherStatus) -> Self {
        let message = match status {
            VoucherStatus::Applied => "Voucher applied! You get a 10% discount.",
            VoucherStatus::Rejected => "Invalid voucher code",
            VoucherStatus::Missing => "Please enter a voucher code",
        };
        Self { status, message }
    }
}

pub fn is_valid_voucher(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(VOUCHER_CODE)
}

/// Discount a voucher entitles the applicant to.
pub fn discount_for(code: Option<&str>) -> Discount {
    match code {
        Some(code) if is_valid_voucher(code) => Discount::VOUCHER,
        _ => Discount::NONE,
    }
}

/// Evaluate the draft's voucher once, updating its discount.
///
/// Empty input leaves the current discount untouched.
pub fn apply_voucher(draft: &mut ApplicationDraft) -> VoucherNotice {
    let code = draft.enrollment.voucher.trim();

    let status = if code.is_empty() {
        VoucherStatus::Missing
    } else if is_valid_voucher(code) {
        draft.discount = Discount::VOUCHER;
        draft.applied_voucher = Some(code.to_string());
        VoucherStatus::Applied
    } else {
        draft.discount = Discount::NONE;
        draft.applied_voucher = None;
        VoucherStatus::Rejected
    };

    debug!(?status, "voucher evaluated");
    VoucherNotice::new(status)
}
