#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod model;
pub mod storage;
pub mod tui;
