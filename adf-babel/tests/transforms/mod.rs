//! Rewrite pass tests

mod idempotence;
