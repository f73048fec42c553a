//! Configuration validation against a schema table

use crate::diagnostics::{AttributePath, Diagnostic, Diagnostics};
use crate::types::{Attribute, AttributeType, Block, Presence};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::debug;

/// Validation options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Stop at the first error
    pub fail_fast: bool,

    /// Report undeclared attributes as warnings instead of errors
    pub allow_unknown_attributes: bool,
}

/// Validate a configuration value against a block
pub fn validate(block: &Block, value: &Value, options: &ValidationOptions) -> Diagnostics {
    let mut checker = Checker {
        options,
        diagnostics: Diagnostics::new(),
    };
    checker.check_block(block, value, &AttributePath::default());
    debug!(
        "Validation finished with {} diagnostic(s)",
        checker.diagnostics.len()
    );
    checker.diagnostics
}

struct Checker<'a> {
    options: &'a ValidationOptions,
    diagnostics: Diagnostics,
}

impl Checker<'_> {
    fn stopped(&self) -> bool {
        self.options.fail_fast && self.diagnostics.has_errors()
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        if !self.stopped() {
            self.diagnostics.push(diagnostic);
        }
    }

    fn child(path: &AttributePath, name: &str) -> AttributePath {
        if path.is_empty() {
            AttributePath::root(name)
        } else {
            path.attribute(name)
        }
    }

    fn check_block(&mut self, block: &Block, value: &Value, path: &AttributePath) {
        let Some(mapping) = value.as_mapping() else {
            self.push(type_mismatch(path, "object"));
            return;
        };

        for key in mapping.keys() {
            match key.as_str() {
                Some(name) if block.get(name).is_some() => {}
                Some(name) => {
                    let detail = format!("An argument named \"{name}\" is not expected here.");
                    let key_path = Self::child(path, name);
                    if self.options.allow_unknown_attributes {
                        self.push(Diagnostic::warning("Unsupported argument", detail).at(&key_path));
                    } else {
                        self.push(Diagnostic::error("Unsupported argument", detail).at(&key_path));
                    }
                }
                None => self.push(
                    Diagnostic::error(
                        "Invalid argument name",
                        format!("Argument names must be strings, got: {key:?}"),
                    )
                    .at(path),
                ),
            }
        }

        for (name, attribute) in &block.attributes {
            if self.stopped() {
                return;
            }
            let attr_path = Self::child(path, name);
            let field = mapping.get(name.as_str()).filter(|v| !v.is_null());

            match (attribute.presence, field) {
                (Presence::Computed, Some(_)) => self.push(
                    Diagnostic::error(
                        "Invalid Configuration for Read-Only Attribute",
                        format!("Cannot set value for attribute {attr_path} as it is computed by the data source."),
                    )
                    .at(&attr_path),
                ),
                (Presence::Required, None) => self.push(
                    Diagnostic::error(
                        "Missing required argument",
                        format!("The argument \"{name}\" is required, but no definition was found."),
                    )
                    .at(&attr_path),
                ),
                (_, None) => {}
                (_, Some(value)) => self.check_attribute(attribute, value, mapping, &attr_path),
            }
        }
    }

    fn check_attribute(
        &mut self,
        attribute: &Attribute,
        value: &Value,
        siblings: &Mapping,
        path: &AttributePath,
    ) {
        if !self.check_type(&attribute.kind, value, path) {
            return;
        }
        for validator in &attribute.validators {
            for diagnostic in validator.check(value, siblings, path) {
                self.push(diagnostic);
            }
        }
    }

    /// Returns false when the value itself has the wrong shape
    fn check_type(&mut self, kind: &AttributeType, value: &Value, path: &AttributePath) -> bool {
        let matches = match kind {
            AttributeType::String => value.is_string(),
            AttributeType::Int64 => value.as_i64().is_some(),
            AttributeType::Bool => value.is_bool(),
            AttributeType::IntOrString => value.as_i64().is_some() || value.is_string(),
            AttributeType::StringOrList => match value {
                Value::String(_) => true,
                Value::Sequence(items) => items.iter().all(Value::is_string),
                _ => false,
            },
            AttributeType::List(elem) => {
                let Some(items) = value.as_sequence() else {
                    self.push(type_mismatch(path, &kind.type_name()));
                    return false;
                };
                for (i, item) in items.iter().enumerate() {
                    self.check_type(elem, item, &path.index(i));
                }
                true
            }
            AttributeType::Map(elem) => {
                let Some(entries) = value.as_mapping() else {
                    self.push(type_mismatch(path, &kind.type_name()));
                    return false;
                };
                for (key, item) in entries {
                    match key.as_str() {
                        Some(key) => {
                            self.check_type(elem, item, &path.key(key));
                        }
                        None => self.push(type_mismatch(path, "map with string keys")),
                    }
                }
                true
            }
            AttributeType::Object(block) => {
                if !value.is_mapping() {
                    self.push(type_mismatch(path, "object"));
                    return false;
                }
                self.check_block(block, value, path);
                true
            }
            AttributeType::ObjectList(block) => {
                let Some(items) = value.as_sequence() else {
                    self.push(type_mismatch(path, &kind.type_name()));
                    return false;
                };
                for (i, item) in items.iter().enumerate() {
                    if self.stopped() {
                        break;
                    }
                    self.check_block(block, item, &path.index(i));
                }
                true
            }
        };

        if !matches {
            self.push(type_mismatch(path, &kind.type_name()));
        }
        matches
    }
}

fn type_mismatch(path: &AttributePath, expected: &str) -> Diagnostic {
    let detail = if path.is_empty() {
        format!("Inappropriate value for configuration: {expected} required.")
    } else {
        format!("Inappropriate value for attribute \"{path}\": {expected} required.")
    };
    Diagnostic::error("Incorrect attribute value type", detail).at(path)
}
