//! Tag-driven record validation.
//!
//! Fields carry rule expressions under one or more schema names:
//!
//! ```rust
//! use tagcheck::{Record, Validator};
//!
//! #[derive(Record)]
//! struct SignUp {
//!     #[check(signup = "required,email")]
//!     email: String,
//!     #[check(signup = "required,min=8")]
//!     password: String,
//!     #[check(signup = "eq=password")]
//!     confirmation: String,
//! }
//!
//! let validator = Validator::new();
//! validator.register_schema("signup");
//!
//! let errors = validator.validate(
//!     "signup",
//!     &SignUp {
//!         email: "someone@example.com".into(),
//!         password: "hunter2".into(),
//!         confirmation: "hunter3".into(),
//!     },
//! );
//! let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
//! assert_eq!(
//!     messages,
//!     vec![
//!         "field password must be at least 8 characters long",
//!         "field confirmation does not match password",
//!     ]
//! );
//! ```
//!
//! Validation under a schema that was never registered is a no-op, as is
//! validating anything that is not a record. Errors come back in field
//! declaration order, then in the order rules are written in the tag.

// Lets `#[derive(Record)]` output (which names `::tagcheck`) compile inside
// this crate's own tests.
extern crate self as tagcheck;

pub mod config;
pub mod engine;
pub mod error;
pub mod expr;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod value;

pub use config::ValidatorConfig;
pub use engine::{Validator, ValidatorBuilder, DEFAULT_SCHEMA};
pub use error::{ConfigError, ValidationError, ValidationErrors};
pub use rule::{RegisteredRule, Rule, RuleContext};
pub use value::{FieldDescriptor, Kind, Record, Reflect, Value};

pub use tagcheck_derive::Record;
