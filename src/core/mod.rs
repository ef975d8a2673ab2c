//! Matching engine: policies, checkers, conditions and storage

pub mod checker;
pub mod condition;
pub mod config;
pub mod inquiry;
pub mod pattern;
pub mod policy;
pub mod storage;
