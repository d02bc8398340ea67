//! Output Validators
//!
//! Checks that hold for every parse result, whatever the input looked like.

pub mod output_validator;
