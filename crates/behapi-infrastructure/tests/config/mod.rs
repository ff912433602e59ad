//! Configuration integration tests

mod loader_test;
