#![allow(unused_imports)]
//! Shared test utilities for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: Sample class trees and symbol tables
//! - `assertions`: Assertion helpers with descriptive failure messages

pub mod assertions;
pub mod fixtures;

pub use assertions::{assert_err, assert_error_contains, assert_ok};
pub use fixtures::{
    animal_hierarchy, animal_table, identity_class_trait, identity_file_trait, shelter_class,
};
