//! Payroll calculation engine for Moroccan salaries
//!
//! This crate computes a monthly payslip from an employee record and the
//! statutory table: seniority bonus, gross pay, CNSS and AMO contributions,
//! professional expenses, income tax (IR) with the family deduction, net pay
//! and employer charges. The engine is pure and safe to call concurrently;
//! the `api` module exposes it over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
