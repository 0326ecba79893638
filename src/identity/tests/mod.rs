//! Unit and service tests for identity management.

mod domain_tests;
