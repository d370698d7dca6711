//! Database models shared across the CRM repository.

pub mod activity;
pub mod company;
#[cfg(feature = "server")]
pub mod config;
pub mod contact;
pub mod deal;
pub mod tenant;
pub mod tool_setting;
pub mod user;
