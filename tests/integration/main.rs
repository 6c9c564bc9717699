//! Integration tests for strike-edge

mod config_test;
mod engine_test;
