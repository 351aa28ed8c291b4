//! Domain models for Scholara.

pub mod scholarship;
pub mod user_profile;
