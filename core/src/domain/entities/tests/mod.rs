//! Unit tests for domain entities

mod step_tests;
