//! Schema table types

use crate::validator::Validator;
use serde::Serialize;
use std::collections::BTreeMap;

/// Presence rule of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Must be set by the caller
    Required,

    /// May be set by the caller
    Optional,

    /// Set by the data source, never by the caller
    Computed,
}

/// Value type of an attribute
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "element", rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int64,
    Bool,

    /// Either an integer or a string (Kubernetes `x-kubernetes-int-or-string`)
    IntOrString,

    /// Either a string or a list of strings
    StringOrList,

    /// Ordered list of values of the element type
    List(Box<AttributeType>),

    /// String-keyed map of values of the element type
    Map(Box<AttributeType>),

    /// Single nested block
    Object(Block),

    /// Ordered list of nested blocks
    ObjectList(Block),
}

impl AttributeType {
    /// Human readable type name used in diagnostics
    pub fn type_name(&self) -> String {
        match self {
            AttributeType::String => "string".to_string(),
            AttributeType::Int64 => "number".to_string(),
            AttributeType::Bool => "bool".to_string(),
            AttributeType::IntOrString => "number or string".to_string(),
            AttributeType::StringOrList => "string or list of string".to_string(),
            AttributeType::List(elem) => format!("list of {}", elem.type_name()),
            AttributeType::Map(elem) => format!("map of {}", elem.type_name()),
            AttributeType::Object(_) => "object".to_string(),
            AttributeType::ObjectList(_) => "list of object".to_string(),
        }
    }

    /// Nested block, if this type carries one
    pub fn block(&self) -> Option<&Block> {
        match self {
            AttributeType::Object(block) | AttributeType::ObjectList(block) => Some(block),
            _ => None,
        }
    }
}

/// A single attribute of a block
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    /// Value type
    #[serde(flatten)]
    pub kind: AttributeType,

    /// Presence rule
    pub presence: Presence,

    /// Description shown to users
    pub description: String,

    /// Whether the value should be hidden in user facing output
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,

    /// Validators applied to a present value
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

impl Attribute {
    /// Create an optional attribute of the given type
    pub fn new(kind: AttributeType, description: impl Into<String>) -> Self {
        Self {
            kind,
            presence: Presence::Optional,
            description: description.into(),
            sensitive: false,
            validators: Vec::new(),
        }
    }

    pub fn string(description: impl Into<String>) -> Self {
        Self::new(AttributeType::String, description)
    }

    pub fn int64(description: impl Into<String>) -> Self {
        Self::new(AttributeType::Int64, description)
    }

    pub fn bool(description: impl Into<String>) -> Self {
        Self::new(AttributeType::Bool, description)
    }

    pub fn int_or_string(description: impl Into<String>) -> Self {
        Self::new(AttributeType::IntOrString, description)
    }

    pub fn string_or_list(description: impl Into<String>) -> Self {
        Self::new(AttributeType::StringOrList, description)
    }

    /// List of strings
    pub fn string_list(description: impl Into<String>) -> Self {
        Self::new(AttributeType::List(Box::new(AttributeType::String)), description)
    }

    /// Map of strings
    pub fn string_map(description: impl Into<String>) -> Self {
        Self::new(AttributeType::Map(Box::new(AttributeType::String)), description)
    }

    /// Map of string lists, as used for HTTP query parameters
    pub fn string_list_map(description: impl Into<String>) -> Self {
        Self::new(
            AttributeType::Map(Box::new(AttributeType::List(Box::new(AttributeType::String)))),
            description,
        )
    }

    /// Single nested block
    pub fn object(block: Block) -> Self {
        let description = block.description.clone();
        Self::new(AttributeType::Object(block), description)
    }

    /// List of nested blocks
    pub fn object_list(block: Block) -> Self {
        let description = block.description.clone();
        Self::new(AttributeType::ObjectList(block), description)
    }

    /// Mark the attribute as required
    pub fn required(mut self) -> Self {
        self.presence = Presence::Required;
        self
    }

    /// Mark the attribute as computed
    pub fn computed(mut self) -> Self {
        self.presence = Presence::Computed;
        self
    }

    /// Mark the attribute as sensitive
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Replace the description
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a validator
    pub fn validate(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    pub fn is_computed(&self) -> bool {
        self.presence == Presence::Computed
    }
}

/// A set of named attributes
#[derive(Debug, Clone, Default, Serialize)]
pub struct Block {
    /// Description shown to users
    pub description: String,

    /// Attributes keyed by name
    pub attributes: BTreeMap<String, Attribute>,
}

impl Block {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute
    pub fn attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Get an attribute by name
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Look up an attribute by a dotted path such as `spec.groups.rules`
    pub fn lookup(&self, path: &str) -> Option<&Attribute> {
        let mut segments = path.split('.');
        let mut attribute = self.get(segments.next()?)?;
        for segment in segments {
            attribute = attribute.kind.block()?.get(segment)?;
        }
        Some(attribute)
    }

    /// Names of required attributes
    pub fn required_attributes(&self) -> Vec<&str> {
        self.attributes
            .iter()
            .filter(|(_, attribute)| attribute.is_required())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Block {
        Block::new("root")
            .attribute("yaml", Attribute::string("Rendered manifest").computed())
            .attribute(
                "spec",
                Attribute::object(
                    Block::new("Spec").attribute(
                        "groups",
                        Attribute::object_list(
                            Block::new("Groups")
                                .attribute("name", Attribute::string("Group name").required()),
                        )
                        .required(),
                    ),
                )
                .required(),
            )
    }

    #[test]
    fn test_lookup_nested_attribute() {
        let block = sample();
        let name = block.lookup("spec.groups.name").unwrap();
        assert!(name.is_required());
        assert!(block.lookup("spec.groups.missing").is_none());
        assert!(block.lookup("yaml.nested").is_none());
    }

    #[test]
    fn test_required_attributes() {
        let block = sample();
        assert_eq!(block.required_attributes(), vec!["spec"]);
        assert!(block.get("yaml").unwrap().is_computed());
    }

    #[test]
    fn test_object_takes_block_description() {
        let attribute = Attribute::object(Block::new("TLS configuration"));
        assert_eq!(attribute.description, "TLS configuration");
        assert_eq!(attribute.kind.type_name(), "object");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Attribute::string_list("x").kind.type_name(), "list of string");
        assert_eq!(
            Attribute::string_list_map("x").kind.type_name(),
            "map of list of string"
        );
    }
}
