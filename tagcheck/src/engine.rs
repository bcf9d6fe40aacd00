use std::fmt;

use tracing::{debug, trace, warn};

use crate::config::ValidatorConfig;
use crate::error::{ValidationError, ValidationErrors};
use crate::expr;
use crate::registry::{RuleRegistry, SchemaRegistry};
use crate::rule::{RegisteredRule, Rule, RuleContext};
use crate::rules::builtin_rules;
use crate::value::{Reflect, Value};

/// Schema registered by [`Validator::new`].
pub const DEFAULT_SCHEMA: &str = "tagcheck";

/// The validation engine.
///
/// Owns a rule registry (seeded with the built-ins) and a schema registry.
/// Both may be extended through `&self` while other threads are validating;
/// each [`Validator::validate`] call works on a snapshot taken when it starts.
pub struct Validator {
    rules: RuleRegistry,
    schemas: SchemaRegistry,
}

impl Validator {
    /// Engine with the built-in rules and [`DEFAULT_SCHEMA`] registered.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Engine without any rules or schemas.
    pub fn empty() -> Self {
        Self {
            rules: RuleRegistry::new(),
            schemas: SchemaRegistry::new(),
        }
    }

    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    pub fn from_config(config: &ValidatorConfig) -> Self {
        let mut builder = Self::builder();
        if !config.builtins {
            builder = builder.without_builtins();
        }
        if !config.default_schema {
            builder = builder.without_default_schema();
        }
        config
            .schemas
            .iter()
            .fold(builder, |b, schema| b.schema(schema.as_str()))
            .build()
    }

    /// Add `name` to the recognised schemas.
    pub fn register_schema(&self, name: impl Into<String>) {
        let name = name.into();
        if self.schemas.register(name.clone()) {
            debug!(schema = %name, "registered schema");
        }
    }

    pub fn is_schema_registered(&self, name: &str) -> bool {
        self.schemas.is_recognized(name)
    }

    /// Append a rule under `name`. Rules sharing a name all fire, in the
    /// order they were registered.
    pub fn register_validation<F>(&self, name: impl Into<String>, rule: F)
    where
        F: Fn(&RuleContext<'_>) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.register_rule(name, rule);
    }

    /// Like [`Validator::register_validation`] for types implementing [`Rule`].
    pub fn register_rule(&self, name: impl Into<String>, rule: impl Rule + 'static) {
        let name = name.into();
        debug!(rule = %name, "registered rule");
        self.rules.register(RegisteredRule::new(name, rule));
    }

    /// Names of all registered rules in registration order.
    pub fn rule_names(&self) -> Vec<String> {
        self.rules.snapshot().names().map(str::to_string).collect()
    }

    /// Validate `record` under `schema`, returning every failure in order:
    /// by field declaration, then by token order in the field's tag, then by
    /// registration order among rules sharing a name.
    ///
    /// Returns an empty list when `schema` is not registered or `record` is
    /// not record shaped.
    pub fn validate<T>(&self, schema: &str, record: &T) -> Vec<ValidationError>
    where
        T: Reflect + ?Sized,
    {
        let mut errors = Vec::new();

        if !self.schemas.snapshot().contains(schema) {
            trace!(schema, "schema not registered, skipping validation");
            return errors;
        }
        let rules = self.rules.snapshot();

        let value = record.reflect();
        let Value::Record(record) = value else {
            trace!(schema, kind = %value.kind(), "not a record, skipping validation");
            return errors;
        };

        for (index, field) in record.fields().iter().enumerate() {
            let Some(expression) = field.tag(schema).filter(|e| !e.trim().is_empty()) else {
                continue;
            };
            let Some(field_value) = record.field(index) else {
                continue;
            };

            for invocation in expr::parse(expression) {
                let mut matched = false;
                for rule in rules.matching(invocation.name) {
                    matched = true;
                    trace!(
                        record = record.record_name(),
                        field = field.name(),
                        rule = invocation.name,
                        "running rule"
                    );
                    let ctx = RuleContext::new(
                        &field_value,
                        field,
                        record,
                        invocation.parameter_or_empty(),
                        rule.name(),
                    );
                    if let Err(err) = rule.check(&ctx) {
                        errors.push(err);
                    }
                }
                if !matched {
                    warn!(
                        record = record.record_name(),
                        field = field.name(),
                        rule = invocation.name,
                        "no rule registered under this name"
                    );
                }
            }
        }

        debug!(
            schema,
            record = record.record_name(),
            errors = errors.len(),
            "validated record"
        );
        errors
    }

    /// [`Validator::validate`] shaped for `?`.
    pub fn validate_result<T>(&self, schema: &str, record: &T) -> Result<(), ValidationErrors>
    where
        T: Reflect + ?Sized,
    {
        ValidationErrors::new(self.validate(schema, record)).into_result()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut schemas: Vec<String> = self.schemas.snapshot().iter().cloned().collect();
        schemas.sort();
        f.debug_struct("Validator")
            .field("rules", &self.rule_names())
            .field("schemas", &schemas)
            .finish()
    }
}

/// Step-by-step construction of a [`Validator`].
pub struct ValidatorBuilder {
    builtins: bool,
    default_schema: bool,
    schemas: Vec<String>,
    rules: Vec<RegisteredRule>,
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self {
            builtins: true,
            default_schema: true,
            schemas: Vec::new(),
            rules: Vec::new(),
        }
    }
}

impl ValidatorBuilder {
    /// Do not seed the built-in rules.
    pub fn without_builtins(mut self) -> Self {
        self.builtins = false;
        self
    }

    /// Do not register [`DEFAULT_SCHEMA`].
    pub fn without_default_schema(mut self) -> Self {
        self.default_schema = false;
        self
    }

    pub fn schema(mut self, name: impl Into<String>) -> Self {
        self.schemas.push(name.into());
        self
    }

    /// Append a rule after the built-ins.
    pub fn rule<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&RuleContext<'_>) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        let name: String = name.into();
        self.rules.push(RegisteredRule::from_fn(name, rule));
        self
    }

    pub fn build(self) -> Validator {
        let validator = Validator::empty();
        if self.builtins {
            for rule in builtin_rules() {
                validator.rules.register(rule);
            }
        }
        for rule in self.rules {
            validator.rules.register(rule);
        }
        if self.default_schema {
            validator.register_schema(DEFAULT_SCHEMA);
        }
        for schema in self.schemas {
            validator.register_schema(schema);
        }
        validator
    }
}
