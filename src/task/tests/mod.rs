//! Unit and service tests for task tracking.

mod domain_tests;
