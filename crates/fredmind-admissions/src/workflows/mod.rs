pub mod admission;
pub mod tutor_onboarding;
