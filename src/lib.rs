//! Gross-to-net payroll engine for Austrian wages
//!
//! This crate computes a monthly payroll from an employee's compensation
//! facts and a tax year table: social insurance, wage tax, special payments
//! taxed under the annual-sixth rule, and the employer-side levies.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod payslip;
