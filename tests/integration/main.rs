//! Integration tests for the auditor
//!
//! These tests use wiremock to serve pages and error responses and check
//! the full fetch, analyze and store cycle end-to-end.

mod analyze_tests;
mod store_tests;
