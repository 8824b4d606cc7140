//! Japanese inheritance tax (相続税) calculation engine.
//!
//! [`core`] holds the input and result types with their validators; [`tax`]
//! holds the calculators and the three validated operations:
//! [`tax::determine_legal_heirs`], [`tax::calculate_statutory_tax`] and
//! [`tax::calculate_division`].

pub mod core;
pub mod tax;
