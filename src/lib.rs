//! Recipe Box Library
//!
//! Loads recipes and nutrition records from plain-text files and computes
//! recipe nutrition totals.

pub mod build_info;
pub mod cli;
pub mod config;
pub mod data;
pub mod models;
pub mod nutrition;
pub mod parse;
pub mod tools;
