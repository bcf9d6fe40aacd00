//! Built-in rules seeded into every [`crate::Validator::new`].
//!
//! Apart from `required` and `notempty`, every rule treats a nil pointer as
//! "nothing to check" and unwraps one level of indirection before looking at
//! the value.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::rule::{RegisteredRule, Rule, RuleContext};
use crate::value::Value;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

static DATE_SHAPE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid"));

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Names of the built-in rules in registration order.
pub const BUILTIN_RULE_NAMES: &[&str] = &[
    "required", "notblank", "notempty", "email", "min", "max", "date", "eq",
];

/// Fresh registry entries for all built-in rules, in [`BUILTIN_RULE_NAMES`]
/// order.
pub fn builtin_rules() -> Vec<RegisteredRule> {
    vec![
        RegisteredRule::new("required", Required),
        RegisteredRule::new("notblank", NotBlank),
        RegisteredRule::new("notempty", NotEmpty),
        RegisteredRule::new("email", Email),
        RegisteredRule::new("min", Bound::Min),
        RegisteredRule::new("max", Bound::Max),
        RegisteredRule::new("date", Date),
        RegisteredRule::new("eq", EqField),
    ]
}

/// Fails on the zero value of the field's kind: a nil pointer, an empty
/// string, an empty collection, `0`, `false`. Whitespace-only strings pass;
/// `notblank` is the stricter check.
pub struct Required;

impl Rule for Required {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
        if ctx.value().is_zero() {
            return Err(ctx.violation(format!("field {} is required", ctx.field_name())));
        }
        Ok(())
    }
}

/// Fails when a string is empty after trimming surrounding whitespace.
pub struct NotBlank;

impl Rule for NotBlank {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
        let Some(value) = ctx.value().indirect() else {
            return Ok(());
        };
        match value {
            Value::Str(s) if s.trim().is_empty() => {
                Err(ctx.violation(format!("field {} must not be blank", ctx.field_name())))
            }
            Value::Str(_) => Ok(()),
            other => Err(ctx.unsupported_kind(other.kind())),
        }
    }
}

/// `required` followed by a blank check on the pointee. Unlike the other
/// rules a nil pointer fails here.
///
/// A nil pointer or an empty string reports the `required` message ("field
/// x is required"); "must not be empty" is only reported for whitespace-only
/// strings, with or without an `Option` around them.
pub struct NotEmpty;

impl Rule for NotEmpty {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
        Required.check(ctx)?;
        match ctx.value().indirect() {
            Some(Value::Str(s)) if s.trim().is_empty() => {
                Err(ctx.violation(format!("field {} must not be empty", ctx.field_name())))
            }
            _ => Ok(()),
        }
    }
}

/// Syntactic email check: an allowed local part, `@`, then dot separated
/// host labels of 1 to 63 alphanumerics or hyphens that neither start nor end
/// with a hyphen. A top-level domain is not required.
pub struct Email;

impl Rule for Email {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
        let Some(value) = ctx.value().indirect() else {
            return Ok(());
        };
        let Value::Str(s) = value else {
            return Err(ctx.unsupported_kind(value.kind()));
        };
        if !EMAIL_REGEX.is_match(s) {
            return Err(ctx.violation(format!(
                "field {} is not a valid email",
                ctx.field_name()
            )));
        }
        Ok(())
    }
}

/// `min=N` / `max=N`: inclusive bound on string length (in characters) or
/// integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

impl Bound {
    fn violated(self, actual: i128, limit: i128) -> bool {
        match self {
            Bound::Min => actual < limit,
            Bound::Max => actual > limit,
        }
    }

    fn word(self) -> &'static str {
        match self {
            Bound::Min => "at least",
            Bound::Max => "at most",
        }
    }
}

impl Rule for Bound {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
        let limit: i64 = ctx
            .parameter()
            .parse()
            .map_err(|e| ctx.malformed_parameter(e))?;
        let Some(value) = ctx.value().indirect() else {
            return Ok(());
        };

        let limit = i128::from(limit);
        match value {
            Value::Str(s) => {
                if self.violated(s.chars().count() as i128, limit) {
                    return Err(ctx.violation(format!(
                        "field {} must be {} {} characters long",
                        ctx.field_name(),
                        self.word(),
                        limit
                    )));
                }
                Ok(())
            }
            Value::Int(_) | Value::Uint(_) => {
                let actual = value.as_integer().unwrap_or_default();
                if self.violated(actual, limit) {
                    return Err(ctx.violation(format!(
                        "field {} must be {} {}",
                        ctx.field_name(),
                        self.word(),
                        limit
                    )));
                }
                Ok(())
            }
            other => Err(ctx.unsupported_kind(other.kind())),
        }
    }
}

/// Calendar date in `YYYY-MM-DD` form. Empty strings pass so the rule can be
/// combined with `required` for mandatory dates.
pub struct Date;

impl Rule for Date {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
        let Some(value) = ctx.value().indirect() else {
            return Ok(());
        };
        let Value::Str(s) = value else {
            return Err(ctx.unsupported_kind(value.kind()));
        };
        if s.is_empty() {
            return Ok(());
        }
        if !is_calendar_date(s) {
            return Err(ctx.violation(format!("field {} is not a valid date", ctx.field_name())));
        }
        Ok(())
    }
}

fn is_calendar_date(s: &str) -> bool {
    // chrono alone accepts unpadded months and days.
    DATE_SHAPE_REGEX.is_match(s) && NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok()
}

/// `eq=other`: the field must deeply equal the sibling field `other`.
/// Both sides are compared after unwrapping one level of indirection.
pub struct EqField;

impl Rule for EqField {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
        let target = ctx.parameter();
        if target.is_empty() {
            return Err(ctx.malformed_parameter("expected the name of another field"));
        }
        let other = ctx
            .record()
            .field_by_name(target)
            .ok_or_else(|| ctx.unknown_field(target))?;

        let Some(value) = ctx.value().indirect() else {
            return Ok(());
        };
        if other.indirect() != Some(value) {
            return Err(ctx.violation(format!(
                "field {} does not match {}",
                ctx.field_name(),
                target
            )));
        }
        Ok(())
    }
}
