use std::fmt;
use std::sync::Arc;

use crate::error::ValidationError;
use crate::value::{FieldDescriptor, Kind, Record, Value};

/// Everything a rule gets to look at for one invocation.
///
/// Besides the field value itself the context carries the field's declared
/// metadata, the owning record (for cross-field rules) and the parameter
/// written after `=` in the tag (`""` when absent).
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    value: &'a Value<'a>,
    field: &'a FieldDescriptor,
    record: &'a dyn Record,
    parameter: &'a str,
    rule: &'a str,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        value: &'a Value<'a>,
        field: &'a FieldDescriptor,
        record: &'a dyn Record,
        parameter: &'a str,
        rule: &'a str,
    ) -> Self {
        Self {
            value,
            field,
            record,
            parameter,
            rule,
        }
    }

    pub fn value(&self) -> &'a Value<'a> {
        self.value
    }

    pub fn field(&self) -> &'a FieldDescriptor {
        self.field
    }

    pub fn field_name(&self) -> &'static str {
        self.field.name()
    }

    pub fn record(&self) -> &'a dyn Record {
        self.record
    }

    pub fn parameter(&self) -> &'a str {
        self.parameter
    }

    /// Name the rule was invoked under.
    pub fn rule(&self) -> &'a str {
        self.rule
    }

    pub fn violation(&self, message: impl Into<String>) -> ValidationError {
        ValidationError::Violation {
            field: self.field.name().to_string(),
            rule: self.rule.to_string(),
            message: message.into(),
        }
    }

    pub fn malformed_parameter(&self, reason: impl fmt::Display) -> ValidationError {
        ValidationError::MalformedParameter {
            field: self.field.name().to_string(),
            rule: self.rule.to_string(),
            parameter: self.parameter.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn unknown_field(&self, target: &str) -> ValidationError {
        ValidationError::UnknownField {
            field: self.field.name().to_string(),
            rule: self.rule.to_string(),
            target: target.to_string(),
        }
    }

    pub fn unsupported_kind(&self, kind: Kind) -> ValidationError {
        ValidationError::UnsupportedKind {
            field: self.field.name().to_string(),
            rule: self.rule.to_string(),
            kind,
        }
    }
}

/// A named check applied to one field.
///
/// Implemented by the built-in rules and, through the blanket impl, by any
/// `Fn(&RuleContext) -> Result<(), ValidationError>` closure.
pub trait Rule: Send + Sync {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<(), ValidationError>;
}

impl<F> Rule for F
where
    F: Fn(&RuleContext<'_>) -> Result<(), ValidationError> + Send + Sync,
{
    fn check(&self, ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
        self(ctx)
    }
}

/// A `(name, rule)` pair as stored in the registry.
#[derive(Clone)]
pub struct RegisteredRule {
    name: Arc<str>,
    rule: Arc<dyn Rule>,
}

impl RegisteredRule {
    pub fn new(name: impl Into<Arc<str>>, rule: impl Rule + 'static) -> Self {
        Self {
            name: name.into(),
            rule: Arc::new(rule),
        }
    }

    /// Like [`RegisteredRule::new`], but with the closure signature spelled
    /// out so argument types can be inferred at the call site.
    pub fn from_fn<F>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(&RuleContext<'_>) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Self::new(name, f)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(&self, ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
        self.rule.check(ctx)
    }
}

impl fmt::Debug for RegisteredRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredRule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reflect;

    #[derive(crate::Record)]
    struct Account {
        #[check(s = "custom")]
        owner: String,
    }

    #[test]
    fn closures_are_rules() {
        let rule = RegisteredRule::from_fn("custom", |ctx| {
            if ctx.value().as_str() == Some("John") {
                return Err(ctx.violation("john is not valid"));
            }
            Ok(())
        });

        let account = Account {
            owner: "John".into(),
        };
        let value = account.owner.reflect();
        let field = &account.fields()[0];
        let ctx = RuleContext::new(&value, field, &account, "", rule.name());

        let err = rule.check(&ctx).unwrap_err();
        assert_eq!(err.to_string(), "john is not valid");
        assert_eq!(err.field(), Some("owner"));
        assert_eq!(err.rule(), Some("custom"));
    }

    #[test]
    fn context_error_helpers() {
        let account = Account {
            owner: String::new(),
        };
        let value = account.owner.reflect();
        let ctx = RuleContext::new(&value, &account.fields()[0], &account, "x", "min");

        assert_eq!(ctx.parameter(), "x");
        assert_eq!(ctx.field_name(), "owner");
        assert!(matches!(
            ctx.malformed_parameter("not a number"),
            ValidationError::MalformedParameter { ref parameter, .. } if parameter == "x"
        ));
        assert!(matches!(
            ctx.unknown_field("nope"),
            ValidationError::UnknownField { ref target, .. } if target == "nope"
        ));
    }

    #[test]
    fn registered_rule_debug_shows_name() {
        let rule = RegisteredRule::from_fn("noop", |_| Ok(()));
        assert!(format!("{:?}", rule).contains("noop"));
    }
}
