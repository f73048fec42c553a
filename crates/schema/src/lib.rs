//! Schema tables for manifest data sources and validation of caller
//! configuration against them

pub mod diagnostics;
pub mod types;
pub mod validation;
pub mod validator;

pub use diagnostics::{AttributePath, Diagnostic, Diagnostics, PathStep, Severity};
pub use types::{Attribute, AttributeType, Block, Presence};
pub use validation::{validate, ValidationOptions};
pub use validator::Validator;
