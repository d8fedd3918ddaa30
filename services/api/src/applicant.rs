//! Command-line front end for the admission wizard.

use crate::infra::{parse_currency, parse_plan};
use clap::Args;
use fredmind_admissions::config::AppConfig;
use fredmind_admissions::error::AppError;
use fredmind_admissions::workflows::admission::{
    AdmissionWizard, ApplicationDraft, ApplicationSummary, Currency, HttpApplicationGateway,
    PaymentPlan, Redirect, SubmitError, WizardStep,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Voucher code to try against the course fee
    #[arg(long)]
    pub(crate) voucher: Option<String>,
    /// Payment plan: full or installments
    #[arg(long, value_parser = parse_plan, default_value = "full")]
    pub(crate) plan: PaymentPlan,
    /// Currency: ngn, usd or crypto
    #[arg(long, value_parser = parse_currency, default_value = "ngn")]
    pub(crate) currency: Currency,
    /// Outstanding balance to show for installment plans
    #[arg(long, default_value_t = 0)]
    pub(crate) balance: u64,
}

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    /// Path to a JSON draft with `identity`, `enrollment` and optional `balance_to_pay`
    #[arg(long)]
    pub(crate) draft: PathBuf,
    /// Override API_BASE_URL for this submission
    #[arg(long)]
    pub(crate) api_base_url: Option<String>,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let mut wizard = AdmissionWizard::from_config(&config.admissions);

    let draft = wizard.draft_mut();
    draft.enrollment.payment_plan = Some(args.plan);
    draft.enrollment.currency = Some(args.currency);
    draft.balance_to_pay = args.balance;

    if let Some(code) = args.voucher {
        wizard.draft_mut().enrollment.voucher = code;
        let notice = wizard.apply_voucher();
        println!("Voucher: {}", notice.message);
    }

    render_payment(&wizard.summary());
    Ok(())
}

pub(crate) async fn run_apply(args: ApplyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let raw = std::fs::read_to_string(&args.draft)?;
    let draft: ApplicationDraft = serde_json::from_str(&raw)?;
    let has_voucher = draft.enrollment.voucher_code().is_some();

    let mut wizard = AdmissionWizard::from_config(&config.admissions).with_draft(draft);
    while wizard.step() != WizardStep::Summary {
        let step = wizard.step();
        if let Err(errors) = wizard.next() {
            println!("{} needs attention:", step.label());
            for error in errors.iter() {
                println!("  - {}: {}", error.field.label(), error.message);
            }
            return Err(SubmitError::Incomplete(errors).into());
        }
    }

    if has_voucher {
        let notice = wizard.apply_voucher();
        println!("Voucher: {}", notice.message);
    }

    let summary = wizard.summary();
    println!("Application for {} <{}>", summary.full_name, summary.email);
    println!(
        "  {} | {} | {} | {} plan",
        summary.course.unwrap_or("-"),
        summary.cohort.unwrap_or("-"),
        summary.class_format.unwrap_or("-"),
        summary.payment_plan.unwrap_or("-"),
    );
    render_payment(&summary);

    let api_base_url = args
        .api_base_url
        .unwrap_or_else(|| config.admissions.api_base_url.clone());
    let gateway = HttpApplicationGateway::new(&api_base_url);
    println!("\nSubmitting to {}", gateway.endpoint());

    match wizard.submit(&gateway).await {
        Ok(Redirect::PaymentProvider(url)) => {
            println!("Application submitted. Continue to payment: {url}");
            Ok(())
        }
        Ok(Redirect::SuccessRoute(route)) => {
            println!("Application submitted. Redirecting to {route}");
            Ok(())
        }
        Err(err) => {
            if let Some(banner) = wizard.banner() {
                println!("{banner}");
            }
            Err(err.into())
        }
    }
}

fn render_payment(summary: &ApplicationSummary) {
    let symbol = summary.currency_symbol;
    let payment = &summary.payment;
    println!("Payment summary");
    println!("  Course fee:       {}", format_amount(symbol, payment.course_fee));
    if payment.discount.is_applied() {
        println!(
            "  Voucher discount: -{}",
            format_amount(symbol, payment.discount_amount())
        );
    }
    println!("  Amount to pay:    {}", format_amount(symbol, payment.amount_to_pay));
    if let Some(balance) = summary.balance_to_pay {
        println!("  Balance to pay:   {}", format_amount(symbol, balance));
    }
    println!(
        "  Transaction fee:  {}",
        format_amount(symbol, payment.transaction_fee)
    );
    println!(
        "  Total amount due: {}",
        format_amount(symbol, payment.total_amount_due)
    );
}

/// `₦505,000`, or `505,000 USDT` for symbols that read as a unit.
fn format_amount(symbol: &str, amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if symbol.chars().count() > 1 {
        format!("{grouped} {symbol}")
    } else {
        format!("{symbol}{grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_are_grouped_by_thousands() {
        assert_eq!(format_amount("₦", 505_000), "₦505,000");
        assert_eq!(format_amount("$", 4_500_000), "$4,500,000");
        assert_eq!(format_amount("$", 999), "$999");
        assert_eq!(format_amount("USDT", 455_000), "455,000 USDT");
    }
}
