use super::common::*;
use crate::workflows::admission::catalog::{Currency, PaymentPlan};
use crate::workflows::admission::draft::{ApplicationDraft, DraftField};
use std::time::Duration;

use crate::workflows::admission::gateway::SubmissionError;
use crate::workflows::admission::payload::{ApiResponse, StudentApplicationRequest};
use crate::workflows::admission::pricing::Discount;
use crate::workflows::admission::voucher::VoucherStatus;
use crate::workflows::admission::wizard::{Redirect, SubmissionState, SubmitError, WizardStep};

#[test]
fn wizard_starts_empty_on_personal_info() {
    let wizard = wizard();
    assert_eq!(wizard.step(), WizardStep::PersonalInfo);
    assert_eq!(wizard.draft(), &ApplicationDraft::default());
    assert_eq!(wizard.submission_state(), &SubmissionState::Idle);
    assert_eq!(wizard.submit_label(), "Submit Application");
}

#[test]
fn next_is_blocked_until_personal_info_is_valid() {
    let mut wizard = wizard();
    *wizard.draft_mut() = draft();
    wizard.draft_mut().identity.phone_number.clear();

    let errors = wizard.next().expect_err("phone number missing");
    assert_eq!(errors.fields(), vec![DraftField::PhoneNumber]);
    assert_eq!(wizard.step(), WizardStep::PersonalInfo);
    assert_eq!(wizard.field_errors().fields(), vec![DraftField::PhoneNumber]);

    wizard.draft_mut().identity.phone_number = "+2348031234567".to_string();
    assert_eq!(wizard.next(), Ok(WizardStep::CourseSelection));
    assert!(wizard.field_errors().is_empty());
}

#[test]
fn policy_checkbox_blocks_course_selection() {
    let mut wizard = wizard().with_draft(draft());
    wizard.next().expect("personal info valid");
    wizard.draft_mut().enrollment.student_policy = false;

    let errors = wizard.next().expect_err("policy unticked");
    assert_eq!(errors.fields(), vec![DraftField::StudentPolicy]);
    assert_eq!(wizard.step(), WizardStep::CourseSelection);
}

#[test]
fn back_is_unconditional_and_stops_at_the_first_step() {
    let mut wizard = wizard_on_summary();
    wizard.draft_mut().identity = Default::default();

    assert_eq!(wizard.back(), WizardStep::CourseSelection);
    assert_eq!(wizard.back(), WizardStep::PersonalInfo);
    assert_eq!(wizard.back(), WizardStep::PersonalInfo);
}

#[test]
fn next_on_summary_stays_put() {
    let mut wizard = wizard_on_summary();
    assert_eq!(wizard.next(), Ok(WizardStep::Summary));
    assert_eq!(wizard.step().position(), 3);
}

#[test]
fn voucher_in_any_case_unlocks_the_discount() {
    for code in ["fredmind2025", "FREDMIND2025", "  FredMind2025 "] {
        let mut wizard = wizard_on_summary();
        wizard.draft_mut().enrollment.voucher = code.to_string();

        let notice = wizard.apply_voucher();
        assert_eq!(notice.status, VoucherStatus::Applied);
        assert_eq!(wizard.draft().discount(), Discount::VOUCHER);
        assert!((wizard.draft().discount().fraction() - 0.10).abs() < f64::EPSILON);
        assert_eq!(wizard.payment().total_amount_due, 455_000);
    }
}

#[test]
fn wrong_voucher_clears_a_previous_discount() {
    let mut wizard = wizard_on_summary();
    wizard.draft_mut().enrollment.voucher = "fredmind2025".to_string();
    wizard.apply_voucher();

    wizard.draft_mut().enrollment.voucher = "SPRING50".to_string();
    let notice = wizard.apply_voucher();

    assert_eq!(notice.status, VoucherStatus::Rejected);
    assert_eq!(notice.message, "Invalid voucher code");
    assert_eq!(wizard.draft().discount(), Discount::NONE);
    assert_eq!(wizard.payment().total_amount_due, 505_000);
}

#[test]
fn empty_voucher_prompts_without_touching_the_discount() {
    let mut wizard = wizard_on_summary();
    wizard.draft_mut().enrollment.voucher = "FREDMIND2025".to_string();
    wizard.apply_voucher();

    wizard.draft_mut().enrollment.voucher = " ".to_string();
    let notice = wizard.apply_voucher();

    assert_eq!(notice.status, VoucherStatus::Missing);
    assert_eq!(notice.message, "Please enter a voucher code");
    assert_eq!(wizard.draft().discount(), Discount::VOUCHER);
    assert_eq!(wizard.voucher_notice(), Some(&notice));
}

#[test]
fn summary_surfaces_balance_only_for_installments() {
    let mut wizard = wizard_on_summary();
    wizard.draft_mut().balance_to_pay = 250_000;

    let summary = wizard.summary();
    assert_eq!(summary.full_name, "Chiamaka Eze");
    assert_eq!(summary.course, Some("Frontend Engineering"));
    assert_eq!(summary.currency_symbol, "₦");
    assert_eq!(summary.payment.total_amount_due, 505_000);
    assert_eq!(summary.balance_to_pay, None);

    wizard.draft_mut().enrollment.payment_plan = Some(PaymentPlan::Installments);
    wizard.draft_mut().enrollment.currency = Some(Currency::Usd);
    let summary = wizard.summary();
    assert_eq!(summary.balance_to_pay, Some(250_000));
    assert_eq!(summary.currency_symbol, "$");
    assert_eq!(summary.payment.total_amount_due, 505_000);
}

#[tokio::test]
async fn submit_requires_the_summary_step() {
    let mut wizard = wizard().with_draft(draft());
    let gateway = StubGateway::accepting(None);

    let error = wizard.submit(&gateway).await.expect_err("not on summary");
    assert_eq!(
        error,
        SubmitError::NotOnSummary {
            step: WizardStep::PersonalInfo
        }
    );
    assert!(gateway.requests().is_empty());
}

#[tokio::test]
async fn submit_rechecks_drafts_edited_after_validation() {
    let mut wizard = wizard_on_summary();
    wizard.draft_mut().identity.email = "broken".to_string();
    let gateway = StubGateway::accepting(None);

    match wizard.submit(&gateway).await {
        Err(SubmitError::Incomplete(errors)) => {
            assert_eq!(errors.fields(), vec![DraftField::Email]);
        }
        other => panic!("expected incomplete draft, got {other:?}"),
    }
    assert!(gateway.requests().is_empty());
    assert_eq!(wizard.submission_state(), &SubmissionState::Idle);
}

#[tokio::test]
async fn successful_submission_redirects_to_success_route_and_discards_draft() {
    let mut wizard = wizard_on_summary();
    let gateway = StubGateway::accepting(None);

    let redirect = wizard.submit(&gateway).await.expect("submission succeeds");

    assert_eq!(redirect, Redirect::SuccessRoute(SUCCESS_ROUTE.to_string()));
    assert_eq!(wizard.submission_state(), &SubmissionState::Succeeded);
    assert_eq!(wizard.draft(), &ApplicationDraft::default());
    assert_eq!(wizard.step(), WizardStep::PersonalInfo);

    let sent = gateway.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].total_amount_due, 505_000);
    assert_eq!(sent[0].amount_to_pay, 500_000);
    assert_eq!(sent[0].voucher, None);
    assert_eq!(sent[0].currency_symbol, "₦");
}

#[tokio::test]
async fn payment_url_takes_priority_over_success_route() {
    let mut wizard = wizard_on_summary();
    let gateway = StubGateway::accepting(Some("https://pay.example/x"));

    let redirect = wizard.submit(&gateway).await.expect("submission succeeds");
    assert_eq!(
        redirect,
        Redirect::PaymentProvider("https://pay.example/x".to_string())
    );
    assert_eq!(redirect.location(), "https://pay.example/x");
}

#[tokio::test]
async fn rejected_submission_stays_on_summary_with_banner() {
    let mut wizard = wizard_on_summary();
    let gateway = StubGateway::rejecting("Email already used");

    let error = wizard.submit(&gateway).await.expect_err("rejected");

    assert_eq!(error.to_string(), "Email already used");
    assert_eq!(wizard.step(), WizardStep::Summary);
    assert_eq!(wizard.banner(), Some("Email already used"));
    assert!(!wizard.is_processing());
    assert_eq!(wizard.draft().identity, identity());

    let retry = StubGateway::with_outcome(Err(SubmissionError::Network));
    wizard.submit(&retry).await.expect_err("network failure");
    assert_eq!(wizard.banner(), Some("Network error occurred"));
}

#[test]
fn applied_code_is_sent_after_the_voucher_field_is_edited() {
    let mut wizard = wizard_on_summary();
    wizard.draft_mut().enrollment.voucher = "fredmind2025".to_string();
    wizard.apply_voucher();

    wizard.draft_mut().enrollment.voucher.clear();
    assert_eq!(wizard.apply_voucher().status, VoucherStatus::Missing);
    let cleared = StudentApplicationRequest::from_draft(wizard.draft(), wizard.fees())
        .expect("draft complete");
    assert_eq!(cleared.voucher.as_deref(), Some("fredmind2025"));
    assert_eq!(cleared.amount_to_pay, 450_000);

    wizard.draft_mut().enrollment.voucher = "FREDMIND2O25".to_string();
    let edited = StudentApplicationRequest::from_draft(wizard.draft(), wizard.fees())
        .expect("draft complete");
    assert_eq!(edited.voucher.as_deref(), Some("fredmind2025"));

    let (service, _) = build_service();
    let record = service.submit(edited).expect("intake honors the discount");
    assert_eq!(record.receipt().total_amount_due, 455_000);
}

#[tokio::test]
async fn applied_voucher_travels_with_the_request() {
    let mut wizard = wizard_on_summary();
    wizard.draft_mut().enrollment.voucher = " fredmind2025 ".to_string();
    wizard.apply_voucher();
    let gateway = StubGateway::accepting(None);

    wizard.submit(&gateway).await.expect("submission succeeds");

    let sent = gateway.requests().remove(0);
    assert_eq!(sent.voucher.as_deref(), Some("fredmind2025"));
    assert_eq!(sent.amount_to_pay, 450_000);
    assert_eq!(sent.total_amount_due, 455_000);
    assert_eq!(sent.course_fee, 500_000);
    assert_eq!(sent.transaction_fee, 5_000);
}

#[test]
fn processing_is_visible_until_the_submission_settles() {
    let mut wizard = wizard_on_summary();
    let request = wizard.begin_submit().expect("draft complete");
    assert_eq!(request.email, "chiamaka.eze@example.com");
    assert!(wizard.is_processing());
    assert_eq!(wizard.submit_label(), "Processing...");
    assert!(matches!(wizard.begin_submit(), Err(SubmitError::InFlight)));

    let redirect = wizard
        .finish_submit(Ok(ApiResponse::default()))
        .expect("accepted");
    assert_eq!(redirect, Redirect::SuccessRoute(SUCCESS_ROUTE.to_string()));
    assert_eq!(wizard.submission_state(), &SubmissionState::Succeeded);
    assert_eq!(wizard.submit_label(), "Submit Application");
}

#[test]
fn finish_without_a_submission_in_flight_is_rejected() {
    let mut wizard = wizard_on_summary();
    assert_eq!(
        wizard.finish_submit(Ok(ApiResponse::default())),
        Err(SubmitError::NotInFlight)
    );
    assert_eq!(wizard.step(), WizardStep::Summary);
    assert_eq!(wizard.draft(), &draft());
}

#[tokio::test]
async fn second_submit_is_rejected_while_one_is_in_flight() {
    let mut wizard = wizard_on_summary();
    wizard.begin_submit().expect("draft complete");

    let gateway = StubGateway::accepting(None);
    let error = wizard.submit(&gateway).await.expect_err("already in flight");
    assert_eq!(error, SubmitError::InFlight);
    assert!(gateway.requests().is_empty());
    assert!(wizard.is_processing());

    wizard.abandon_submit();
    assert_eq!(wizard.submission_state(), &SubmissionState::Idle);
}

#[tokio::test]
async fn dropped_submission_returns_the_wizard_to_idle() {
    let mut wizard = wizard_on_summary();
    let attempt =
        tokio::time::timeout(Duration::from_millis(20), wizard.submit(&HangingGateway)).await;
    assert!(attempt.is_err());

    assert_eq!(wizard.submission_state(), &SubmissionState::Idle);
    assert_eq!(wizard.submit_label(), "Submit Application");
    assert_eq!(wizard.step(), WizardStep::Summary);
    assert_eq!(wizard.draft(), &draft());

    let gateway = StubGateway::accepting(None);
    wizard.submit(&gateway).await.expect("retry accepted");
    assert_eq!(gateway.requests().len(), 1);
}
