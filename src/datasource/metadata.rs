//! Schema of the `metadata` attribute shared by all manifest data sources

use manifest_schema::{Attribute, Block, Validator};

/// Metadata schema; `namespace` is required for namespaced kinds only
pub fn schema(namespaced: bool) -> Attribute {
    let namespace = Attribute::string("Namespace defines the space within which each name must be unique.")
        .validate(Validator::length_at_least(1))
        .validate(Validator::DnsLabelName);
    let namespace = if namespaced {
        namespace.required()
    } else {
        namespace
    };

    Attribute::object(
        Block::new("Data that helps uniquely identify this object.")
            .attribute(
                "name",
                Attribute::string("Unique identification for this resource within its namespace.")
                    .required()
                    .validate(Validator::length_at_least(1))
                    .validate(Validator::DnsSubdomainName),
            )
            .attribute("namespace", namespace)
            .attribute(
                "labels",
                Attribute::string_map(
                    "Map of string keys and values that can be used to organize and categorize (scope and select) objects.",
                )
                .validate(Validator::LabelMap),
            )
            .attribute(
                "annotations",
                Attribute::string_map(
                    "Unstructured key value map stored with a resource that may be set by external tools to store and retrieve arbitrary metadata.",
                )
                .validate(Validator::AnnotationMap),
            ),
    )
    .required()
}
