use serde::{Deserialize, Serialize};

/// Courses offered through the admission wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Course {
    #[serde(rename = "Frontend Engineering")]
    FrontendEngineering,
    #[serde(rename = "Backend Engineering")]
    BackendEngineering,
    #[serde(rename = "Digital Marketing")]
    DigitalMarketing,
    #[serde(rename = "Data Analysis")]
    DataAnalysis,
}

impl Course {
    pub const ALL: [Course; 4] = [
        Course::FrontendEngineering,
        Course::BackendEngineering,
        Course::DigitalMarketing,
        Course::DataAnalysis,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Course::FrontendEngineering => "Frontend Engineering",
            Course::BackendEngineering => "Backend Engineering",
            Course::DigitalMarketing => "Digital Marketing",
            Course::DataAnalysis => "Data Analysis",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|course| course.label().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Enrollment intake periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cohort {
    #[serde(rename = "January 2026")]
    January2026,
    #[serde(rename = "April 2026")]
    April2026,
    #[serde(rename = "July 2026")]
    July2026,
    #[serde(rename = "October 2026")]
    October2026,
}

impl Cohort {
    pub const ALL: [Cohort; 4] = [
        Cohort::January2026,
        Cohort::April2026,
        Cohort::July2026,
        Cohort::October2026,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Cohort::January2026 => "January 2026",
            Cohort::April2026 => "April 2026",
            Cohort::July2026 => "July 2026",
            Cohort::October2026 => "October 2026",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|cohort| cohort.label().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassFormat {
    Virtual,
    Physical,
}

impl ClassFormat {
    pub const fn label(self) -> &'static str {
        match self {
            ClassFormat::Virtual => "Virtual",
            ClassFormat::Physical => "Physical",
        }
    }
}

/// Whether the course fee is settled at once or split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentPlan {
    Full,
    Installments,
}

impl PaymentPlan {
    pub const fn label(self) -> &'static str {
        match self {
            PaymentPlan::Full => "Full",
            PaymentPlan::Installments => "Installments",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "full" => Some(PaymentPlan::Full),
            "installments" | "installment" => Some(PaymentPlan::Installments),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "NGN")]
    Ngn,
    #[serde(rename = "USD")]
    Usd,
    Crypto,
}

impl Currency {
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Ngn => "NGN",
            Currency::Usd => "USD",
            Currency::Crypto => "Crypto",
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Ngn => "₦",
            Currency::Usd => "$",
            Currency::Crypto => "USDT",
        }
    }

    pub fn from_code(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ngn" => Some(Currency::Ngn),
            "usd" => Some(Currency::Usd),
            "crypto" => Some(Currency::Crypto),
            _ => None,
        }
    }
}
