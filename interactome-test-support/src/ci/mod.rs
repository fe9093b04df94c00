//! Helpers that read CI-facing environment configuration.

pub mod property_test_profile;
