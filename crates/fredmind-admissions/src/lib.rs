//! Admissions workflows for the Fredmind digital school: the student admission
//! wizard, its fee calculation and submission gateway, the intake service that
//! receives applications, and tutor onboarding validation.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
