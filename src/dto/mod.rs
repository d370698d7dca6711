//! Response shapes returned by the JSON API and the marketing pages.

pub mod auth;
pub mod companies;
pub mod contacts;
pub mod marketing;
pub mod onboarding;
pub mod tools;
