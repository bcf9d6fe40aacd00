//! Parsing of the rule expressions attached to fields, e.g. `"required, min=4"`.

/// One rule token of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInvocation<'a> {
    pub name: &'a str,
    pub parameter: Option<&'a str>,
}

impl<'a> RuleInvocation<'a> {
    /// Parse a single token. Exactly one `=` splits it into name and
    /// parameter; any other count leaves the whole token as the name, which
    /// simply matches no registered rule.
    pub fn from_token(token: &'a str) -> Self {
        let token = token.trim();
        let mut parts = token.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(parameter), None) => Self {
                name: name.trim(),
                parameter: Some(parameter.trim()),
            },
            _ => Self {
                name: token,
                parameter: None,
            },
        }
    }

    /// The parameter, or `""` when the token had none.
    pub fn parameter_or_empty(&self) -> &'a str {
        self.parameter.unwrap_or("")
    }
}

/// Split an expression into its invocations, in written order. Tokens with
/// an empty rule name (`"a,,b"`, `"=5"`) are dropped, so a blank expression
/// yields nothing.
pub fn parse(expression: &str) -> Vec<RuleInvocation<'_>> {
    expression
        .split(',')
        .map(RuleInvocation::from_token)
        .filter(|invocation| !invocation.name.is_empty())
        .collect()
}
