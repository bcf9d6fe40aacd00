//! Record types and helpers shared by the integration test crates.
#![allow(dead_code)]

use tagcheck::{Record, ValidationError, Validator};

pub const SCHEMA: &str = "my_schema";

#[derive(Record, Debug, Clone, Default)]
pub struct RequiredUser {
    #[check(my_schema = "required")]
    pub first_name: String,
}

#[derive(Record, Debug, Clone, Default)]
pub struct NotBlankUser {
    #[check(my_schema = "notblank")]
    pub first_name: String,
}

#[derive(Record, Debug, Clone, Default)]
pub struct MultiRuleUser {
    #[check(my_schema = "required,notblank")]
    pub first_name: String,
}

#[derive(Record, Debug, Clone, Default)]
pub struct SignUp {
    #[check(my_schema = "required,email", profile = "email")]
    pub email: String,
    #[check(my_schema = "required, min=4, max=16")]
    pub password: String,
    #[check(my_schema = "eq=password")]
    pub confirmation: String,
    #[check(my_schema = "min=18,max=130")]
    pub age: u32,
    #[check(my_schema = "date", profile = "required,date")]
    pub birthday: Option<String>,
}

impl SignUp {
    pub fn valid() -> Self {
        SignUp {
            email: "test@gmail.com".into(),
            password: "secret".into(),
            confirmation: "secret".into(),
            age: 30,
            birthday: Some("1994-05-17".into()),
        }
    }
}

/// Validator with the built-ins and [`SCHEMA`] registered.
pub fn validator() -> Validator {
    let v = Validator::new();
    v.register_schema(SCHEMA);
    v
}

pub fn messages(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}
