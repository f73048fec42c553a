//! Attribute validators

use crate::diagnostics::{AttributePath, Diagnostic};
use regex::Regex;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};

const DNS1123_LABEL_MAX_LENGTH: usize = 63;
const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;
const QUALIFIED_NAME_MAX_LENGTH: usize = 63;
const LABEL_VALUE_MAX_LENGTH: usize = 63;
const TOTAL_ANNOTATION_SIZE_LIMIT: usize = 256 * 1024;

static DNS1123_LABEL: OnceLock<Regex> = OnceLock::new();
static QUALIFIED_NAME_PART: OnceLock<Regex> = OnceLock::new();
static PATTERNS: OnceLock<Mutex<HashMap<&'static str, Regex>>> = OnceLock::new();

/// Constraint checked against a present attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    /// String has at least `min` characters
    LengthAtLeast { min: usize },

    /// String has at most `max` characters
    LengthAtMost { max: usize },

    /// String matches a regular expression
    Pattern {
        pattern: &'static str,
        message: &'static str,
    },

    /// String is one of the listed values
    OneOf { values: &'static [&'static str] },

    /// Integer is at least `min`
    AtLeast { min: i64 },

    /// Integer is at most `max`
    AtMost { max: i64 },

    /// List or map has at least `min` elements
    SizeAtLeast { min: usize },

    /// None of the sibling attributes may be set together with this one
    ConflictsWith { attributes: &'static [&'static str] },

    /// All sibling attributes must be set together with this one
    AlsoRequires { attributes: &'static [&'static str] },

    /// RFC 1123 subdomain, as required for object names
    DnsSubdomainName,

    /// RFC 1123 label, as required for namespaces
    DnsLabelName,

    /// Kubernetes label map
    LabelMap,

    /// Kubernetes annotation map
    AnnotationMap,
}

impl Validator {
    pub fn length_at_least(min: usize) -> Self {
        Validator::LengthAtLeast { min }
    }

    pub fn length_at_most(max: usize) -> Self {
        Validator::LengthAtMost { max }
    }

    pub fn pattern(pattern: &'static str, message: &'static str) -> Self {
        Validator::Pattern { pattern, message }
    }

    pub fn one_of(values: &'static [&'static str]) -> Self {
        Validator::OneOf { values }
    }

    pub fn at_least(min: i64) -> Self {
        Validator::AtLeast { min }
    }

    pub fn at_most(max: i64) -> Self {
        Validator::AtMost { max }
    }

    pub fn size_at_least(min: usize) -> Self {
        Validator::SizeAtLeast { min }
    }

    pub fn conflicts_with(attributes: &'static [&'static str]) -> Self {
        Validator::ConflictsWith { attributes }
    }

    pub fn also_requires(attributes: &'static [&'static str]) -> Self {
        Validator::AlsoRequires { attributes }
    }

    /// Check a present value. `siblings` is the mapping the value was found in.
    pub fn check(&self, value: &Value, siblings: &Mapping, path: &AttributePath) -> Vec<Diagnostic> {
        match self {
            Validator::LengthAtLeast { min } => match value.as_str() {
                Some(s) if s.chars().count() < *min => vec![invalid_length(
                    path,
                    format!("string length must be at least {min}, got: {}", s.chars().count()),
                )],
                _ => Vec::new(),
            },
            Validator::LengthAtMost { max } => match value.as_str() {
                Some(s) if s.chars().count() > *max => vec![invalid_length(
                    path,
                    format!("string length must be at most {max}, got: {}", s.chars().count()),
                )],
                _ => Vec::new(),
            },
            Validator::Pattern { pattern, message } => {
                let Some(s) = value.as_str() else {
                    return Vec::new();
                };
                match compiled_pattern(pattern) {
                    Ok(re) if re.is_match(s) => Vec::new(),
                    Ok(_) => vec![invalid_match(path, format!("{message}, got: {s}"))],
                    Err(e) => vec![Diagnostic::error(
                        "Invalid Validator Pattern",
                        format!("Pattern {pattern:?} does not compile: {e}"),
                    )
                    .at(path)],
                }
            }
            Validator::OneOf { values } => match value.as_str() {
                Some(s) if !values.contains(&s) => {
                    let quoted: Vec<String> = values.iter().map(|v| format!("{v:?}")).collect();
                    vec![invalid_match(
                        path,
                        format!("value must be one of: [{}], got: {s:?}", quoted.join(" ")),
                    )]
                }
                _ => Vec::new(),
            },
            Validator::AtLeast { min } => match value.as_i64() {
                Some(n) if n < *min => vec![invalid_value(
                    path,
                    format!("value must be at least {min}, got: {n}"),
                )],
                _ => Vec::new(),
            },
            Validator::AtMost { max } => match value.as_i64() {
                Some(n) if n > *max => vec![invalid_value(
                    path,
                    format!("value must be at most {max}, got: {n}"),
                )],
                _ => Vec::new(),
            },
            Validator::SizeAtLeast { min } => match collection_size(value) {
                Some(n) if n < *min => vec![invalid_value(
                    path,
                    format!("must contain at least {min} elements, got: {n}"),
                )],
                _ => Vec::new(),
            },
            Validator::ConflictsWith { attributes } => attributes
                .iter()
                .filter(|name| is_set(siblings, name))
                .map(|name| {
                    Diagnostic::error(
                        "Invalid Attribute Combination",
                        format!(
                            "Attribute \"{}\" cannot be specified when \"{path}\" is specified",
                            path.sibling(*name)
                        ),
                    )
                    .at(path)
                })
                .collect(),
            Validator::AlsoRequires { attributes } => attributes
                .iter()
                .filter(|name| !is_set(siblings, name))
                .map(|name| {
                    Diagnostic::error(
                        "Invalid Attribute Combination",
                        format!(
                            "Attribute \"{}\" must be specified when \"{path}\" is specified",
                            path.sibling(*name)
                        ),
                    )
                    .at(path)
                })
                .collect(),
            Validator::DnsSubdomainName => value
                .as_str()
                .map(|s| {
                    dns1123_subdomain_errors(s)
                        .into_iter()
                        .map(|msg| invalid_value(path, format!("is not a valid name: {msg}")))
                        .collect()
                })
                .unwrap_or_default(),
            Validator::DnsLabelName => value
                .as_str()
                .map(|s| {
                    dns1123_label_errors(s)
                        .into_iter()
                        .map(|msg| invalid_value(path, format!("is not a valid namespace: {msg}")))
                        .collect()
                })
                .unwrap_or_default(),
            Validator::LabelMap => check_label_map(value, path),
            Validator::AnnotationMap => check_annotation_map(value, path),
        }
    }
}

fn invalid_length(path: &AttributePath, detail: String) -> Diagnostic {
    Diagnostic::error("Invalid Attribute Value Length", format!("Attribute {path} {detail}")).at(path)
}

fn invalid_match(path: &AttributePath, detail: String) -> Diagnostic {
    Diagnostic::error("Invalid Attribute Value Match", format!("Attribute {path} {detail}")).at(path)
}

fn invalid_value(path: &AttributePath, detail: String) -> Diagnostic {
    Diagnostic::error("Invalid Attribute Value", format!("Attribute {path} {detail}")).at(path)
}

fn collection_size(value: &Value) -> Option<usize> {
    match value {
        Value::Sequence(seq) => Some(seq.len()),
        Value::Mapping(map) => Some(map.len()),
        _ => None,
    }
}

fn is_set(siblings: &Mapping, name: &str) -> bool {
    siblings.get(name).is_some_and(|v| !v.is_null())
}

fn check_label_map(value: &Value, path: &AttributePath) -> Vec<Diagnostic> {
    let Some(map) = value.as_mapping() else {
        return Vec::new();
    };

    let mut diagnostics = Vec::new();
    for (key, val) in map {
        let Some(key) = key.as_str() else {
            continue;
        };
        let key_path = path.key(key);
        for msg in qualified_name_errors(key) {
            diagnostics.push(invalid_value(&key_path, format!("is not a valid label key: {msg}")));
        }
        if let Some(val) = val.as_str() {
            for msg in label_value_errors(val) {
                diagnostics.push(invalid_value(&key_path, format!("is not a valid label value: {msg}")));
            }
        }
    }
    diagnostics
}

fn check_annotation_map(value: &Value, path: &AttributePath) -> Vec<Diagnostic> {
    let Some(map) = value.as_mapping() else {
        return Vec::new();
    };

    let mut diagnostics = Vec::new();
    let mut total_size = 0;
    for (key, val) in map {
        let Some(key) = key.as_str() else {
            continue;
        };
        total_size += key.len() + val.as_str().map(str::len).unwrap_or_default();
        for msg in qualified_name_errors(&key.to_lowercase()) {
            diagnostics.push(invalid_value(
                &path.key(key),
                format!("is not a valid annotation key: {msg}"),
            ));
        }
    }
    if total_size > TOTAL_ANNOTATION_SIZE_LIMIT {
        diagnostics.push(invalid_value(
            path,
            format!("may not have more than {TOTAL_ANNOTATION_SIZE_LIMIT} bytes in total, got: {total_size}"),
        ));
    }
    diagnostics
}

/// Compiles each validator pattern once per process
fn compiled_pattern(pattern: &'static str) -> Result<Regex, regex::Error> {
    let cache = PATTERNS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(re) = cache.get(pattern) {
        return Ok(re.clone());
    }
    let re = Regex::new(pattern)?;
    cache.insert(pattern, re.clone());
    Ok(re)
}

fn is_dns1123_label(s: &str) -> bool {
    DNS1123_LABEL
        .get_or_init(|| {
            Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("DNS-1123 label regex is valid")
        })
        .is_match(s)
}

fn dns1123_label_errors(s: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if s.len() > DNS1123_LABEL_MAX_LENGTH {
        errors.push(format!("must be no more than {DNS1123_LABEL_MAX_LENGTH} characters"));
    }
    if !is_dns1123_label(s) {
        errors.push(
            "a lowercase RFC 1123 label must consist of lower case alphanumeric characters or '-', \
             and must start and end with an alphanumeric character"
                .to_string(),
        );
    }
    errors
}

fn dns1123_subdomain_errors(s: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if s.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        errors.push(format!("must be no more than {DNS1123_SUBDOMAIN_MAX_LENGTH} characters"));
    }
    if !s.split('.').all(is_dns1123_label) {
        errors.push(
            "a lowercase RFC 1123 subdomain must consist of lower case alphanumeric characters, \
             '-' or '.', and must start and end with an alphanumeric character"
                .to_string(),
        );
    }
    errors
}

fn is_qualified_name_part(s: &str) -> bool {
    QUALIFIED_NAME_PART
        .get_or_init(|| {
            Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$")
                .expect("qualified name regex is valid")
        })
        .is_match(s)
}

fn qualified_name_errors(s: &str) -> Vec<String> {
    let (prefix, name) = match s.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, s),
    };

    let mut errors = Vec::new();
    if let Some(prefix) = prefix {
        if prefix.is_empty() {
            errors.push("prefix part must be non-empty".to_string());
        } else {
            errors.extend(dns1123_subdomain_errors(prefix).into_iter().map(|e| format!("prefix part {e}")));
        }
    }
    if name.is_empty() {
        errors.push("name part must be non-empty".to_string());
    } else {
        if name.len() > QUALIFIED_NAME_MAX_LENGTH {
            errors.push(format!("name part must be no more than {QUALIFIED_NAME_MAX_LENGTH} characters"));
        }
        if !is_qualified_name_part(name) {
            errors.push(
                "name part must consist of alphanumeric characters, '-', '_' or '.', \
                 and must start and end with an alphanumeric character"
                    .to_string(),
            );
        }
    }
    errors
}

fn label_value_errors(s: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if s.len() > LABEL_VALUE_MAX_LENGTH {
        errors.push(format!("must be no more than {LABEL_VALUE_MAX_LENGTH} characters"));
    }
    if !s.is_empty() && !is_qualified_name_part(s) {
        errors.push(
            "a valid label must be an empty string or consist of alphanumeric characters, \
             '-', '_' or '.', and must start and end with an alphanumeric character"
                .to_string(),
        );
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(validator: Validator, value: Value) -> Vec<Diagnostic> {
        validator.check(&value, &Mapping::new(), &AttributePath::root("field"))
    }

    #[test]
    fn test_length_validators() {
        assert_eq!(check(Validator::length_at_least(1), Value::from("")).len(), 1);
        assert!(check(Validator::length_at_least(1), Value::from("a")).is_empty());
        assert_eq!(check(Validator::length_at_most(2), Value::from("abc")).len(), 1);
    }

    #[test]
    fn test_pattern_validator() {
        let validator = Validator::pattern("^http(s)?://.+$", "must be an HTTP(S) URL");
        assert!(check(validator.clone(), Value::from("https://example.com")).is_empty());

        let diagnostics = check(validator, Value::from("ftp://example.com"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].summary, "Invalid Attribute Value Match");
        assert!(diagnostics[0].detail.contains("must be an HTTP(S) URL"));
    }

    #[test]
    fn test_pattern_is_compiled_once() {
        let validator = Validator::pattern("^[a-z]+-[0-9]+$", "must look like name-N");
        for value in ["web-1", "web-2", "web-3"] {
            assert!(check(validator.clone(), Value::from(value)).is_empty());
        }
        assert_eq!(check(validator, Value::from("web")).len(), 1);

        let cache = PATTERNS.get().unwrap().lock().unwrap();
        assert!(cache.contains_key("^[a-z]+-[0-9]+$"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let diagnostics = check(Validator::pattern("([a-z", "unused"), Value::from("abc"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].summary, "Invalid Validator Pattern");
    }

    #[test]
    fn test_one_of_validator() {
        let validator = Validator::one_of(&["http", "https"]);
        assert!(check(validator.clone(), Value::from("https")).is_empty());

        let diagnostics = check(validator, Value::from("HTTP"));
        assert_eq!(
            diagnostics[0].detail,
            r#"Attribute field value must be one of: ["http" "https"], got: "HTTP""#
        );
    }

    #[test]
    fn test_integer_and_size_validators() {
        assert_eq!(check(Validator::at_least(1), Value::from(0)).len(), 1);
        assert!(check(Validator::at_most(10), Value::from(10)).is_empty());
        assert_eq!(
            check(Validator::size_at_least(1), Value::Sequence(Vec::new())).len(),
            1
        );
    }

    #[test]
    fn test_sibling_validators() {
        let siblings: Mapping = serde_yaml::from_str("record: r\nalert: a\nexpr: up").unwrap();
        let path = AttributePath::root("rules").index(0).attribute("record");

        let conflicts = Validator::conflicts_with(&["alert"]).check(&Value::from("r"), &siblings, &path);
        assert_eq!(conflicts.len(), 1);
        assert!(conflicts[0].detail.contains("rules[0].alert"));

        let requires = Validator::also_requires(&["expr", "for"]).check(&Value::from("r"), &siblings, &path);
        assert_eq!(requires.len(), 1);
        assert!(requires[0].detail.contains("rules[0].for"));
    }

    #[test]
    fn test_kubernetes_names() {
        assert!(check(Validator::DnsSubdomainName, Value::from("my-rule.v1")).is_empty());
        assert!(!check(Validator::DnsSubdomainName, Value::from("My_Rule")).is_empty());
        assert!(!check(Validator::DnsSubdomainName, Value::from("")).is_empty());

        assert!(check(Validator::DnsLabelName, Value::from("monitoring")).is_empty());
        assert!(!check(Validator::DnsLabelName, Value::from("kube.system")).is_empty());
        assert!(!check(Validator::DnsLabelName, Value::from("a".repeat(64))).is_empty());
    }

    #[test]
    fn test_label_map() {
        let labels: Value =
            serde_yaml::from_str("app.kubernetes.io/name: vmagent\nteam: \"\"\n-bad: x\nok: \"-bad\"").unwrap();
        let diagnostics = check(Validator::LabelMap, labels);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().any(|d| d.detail.contains("label key")));
        assert!(diagnostics.iter().any(|d| d.detail.contains("label value")));
    }

    #[test]
    fn test_annotation_map() {
        let annotations: Value =
            serde_yaml::from_str("Example.COM/Owner: anything at all\n/empty-prefix: x").unwrap();
        let diagnostics = check(Validator::AnnotationMap, annotations);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].detail.contains("prefix part must be non-empty"));
    }
}
