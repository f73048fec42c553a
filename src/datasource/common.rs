//! Building blocks shared by the VictoriaMetrics operator kinds
//!
//! Each type carries both its serde mapping (snake_case configuration in,
//! CRD field names out) and the schema table describing it.

use manifest_render::StringOrList;
use manifest_schema::{Attribute, Block, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMES: &[&str] = &["http", "https", "HTTP", "HTTPS"];

pub const RELABEL_ACTIONS: &[&str] = &[
    "replace",
    "Replace",
    "replace_all",
    "keep",
    "Keep",
    "drop",
    "Drop",
    "hashmod",
    "HashMod",
    "labelmap",
    "LabelMap",
    "labelmap_all",
    "labeldrop",
    "LabelDrop",
    "labelkeep",
    "LabelKeep",
    "lowercase",
    "Lowercase",
    "uppercase",
    "Uppercase",
    "keepequal",
    "KeepEqual",
    "dropequal",
    "DropEqual",
    "keep_if_equal",
    "drop_if_equal",
    "keep_if_contains",
    "drop_if_contains",
    "keep_metrics",
    "drop_metrics",
    "graphite",
];

pub const SELECTOR_OPERATORS: &[&str] = &["In", "NotIn", "Exists", "DoesNotExist"];

/// Reference to a key of a Secret in the object's namespace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecretKeySelector {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

impl SecretKeySelector {
    pub fn schema(description: &str) -> Attribute {
        Attribute::object(
            Block::new(description)
                .attribute(
                    "key",
                    Attribute::string("The key of the secret to select from. Must be a valid secret key.")
                        .required(),
                )
                .attribute("name", Attribute::string("Name of the referent."))
                .attribute(
                    "optional",
                    Attribute::bool("Specify whether the Secret or its key must be defined"),
                ),
        )
    }
}

/// Reference to a key of a ConfigMap in the object's namespace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigMapKeySelector {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

impl ConfigMapKeySelector {
    pub fn schema(description: &str) -> Attribute {
        Attribute::object(
            Block::new(description)
                .attribute("key", Attribute::string("The key to select.").required())
                .attribute("name", Attribute::string("Name of the referent."))
                .attribute(
                    "optional",
                    Attribute::bool("Specify whether the ConfigMap or its key must be defined"),
                ),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct SecretOrConfigMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_map: Option<ConfigMapKeySelector>,
}

impl SecretOrConfigMap {
    pub fn schema(description: &str) -> Attribute {
        Attribute::object(
            Block::new(description)
                .attribute(
                    "secret",
                    SecretKeySelector::schema("Secret containing data to use for the targets.")
                        .validate(Validator::conflicts_with(&["config_map"])),
                )
                .attribute(
                    "config_map",
                    ConfigMapKeySelector::schema("ConfigMap containing data to use for the targets."),
                ),
        )
    }
}

/// TLS settings for scraping and service discovery
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct TlsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<SecretOrConfigMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<SecretOrConfigMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure_skip_verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_secret: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
}

impl TlsConfig {
    pub fn schema() -> Attribute {
        Attribute::object(
            Block::new("TLS configuration to use when scraping the endpoint")
                .attribute("ca", SecretOrConfigMap::schema("Struct containing the CA cert to use for the targets."))
                .attribute("ca_file", Attribute::string("Path to the CA cert in the container to use for the targets."))
                .attribute(
                    "cert",
                    SecretOrConfigMap::schema("Struct containing the client cert file for the targets."),
                )
                .attribute(
                    "cert_file",
                    Attribute::string("Path to the client cert file in the container for the targets."),
                )
                .attribute("insecure_skip_verify", Attribute::bool("Disable target certificate validation."))
                .attribute(
                    "key_file",
                    Attribute::string("Path to the client key file in the container for the targets.")
                        .validate(Validator::conflicts_with(&["key_secret"])),
                )
                .attribute(
                    "key_secret",
                    SecretKeySelector::schema("Secret containing the client key file for the targets."),
                )
                .attribute("server_name", Attribute::string("Used to verify the hostname for the targets.")),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicAuth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_file: Option<String>,
}

impl BasicAuth {
    pub fn schema() -> Attribute {
        Attribute::object(
            Block::new("BasicAuth allow an endpoint to authenticate over basic authentication")
                .attribute(
                    "username",
                    SecretKeySelector::schema(
                        "The secret in the service scrape namespace that contains the username for authentication.",
                    ),
                )
                .attribute(
                    "password",
                    SecretKeySelector::schema(
                        "The secret in the service scrape namespace that contains the password for authentication.",
                    )
                    .validate(Validator::conflicts_with(&["password_file"])),
                )
                .attribute(
                    "password_file",
                    Attribute::string("Path to file with password. File must be mounted to the pod."),
                ),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Authorization {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_file: Option<String>,
}

impl Authorization {
    pub fn schema() -> Attribute {
        Attribute::object(
            Block::new("Authorization with http header Authorization")
                .attribute(
                    "type",
                    Attribute::string("Type of authorization, default to bearer"),
                )
                .attribute(
                    "credentials",
                    SecretKeySelector::schema("Reference to the secret with value for authorization")
                        .validate(Validator::conflicts_with(&["credentials_file"])),
                )
                .attribute(
                    "credentials_file",
                    Attribute::string("File with value for authorization"),
                ),
        )
    }
}

/// OAuth2 client credentials flow. Field names are snake_case in the CRD as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OAuth2 {
    pub client_id: SecretOrConfigMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_params: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_config: Option<TlsConfig>,
    pub token_url: String,
}

impl OAuth2 {
    pub fn schema() -> Attribute {
        Attribute::object(
            Block::new("OAuth2 defines auth configuration")
                .attribute(
                    "client_id",
                    SecretOrConfigMap::schema("The secret or configmap containing the OAuth2 client id").required(),
                )
                .attribute(
                    "client_secret",
                    SecretKeySelector::schema("The secret containing the OAuth2 client secret")
                        .validate(Validator::conflicts_with(&["client_secret_file"])),
                )
                .attribute(
                    "client_secret_file",
                    Attribute::string("ClientSecretFile defines path for client secret file."),
                )
                .attribute(
                    "endpoint_params",
                    Attribute::string_map("Parameters to append to the token URL"),
                )
                .attribute(
                    "proxy_url",
                    Attribute::string("The proxy URL for token_url connection ( available from v0.55.0)."),
                )
                .attribute("scopes", Attribute::string_list("OAuth2 scopes used for the token request"))
                .attribute("tls_config", TlsConfig::schema())
                .attribute(
                    "token_url",
                    Attribute::string("The URL to fetch the token from")
                        .required()
                        .validate(Validator::length_at_least(1)),
                ),
        )
    }
}

/// Proxy client settings, snake_case in the CRD
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProxyAuth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicAuth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_config: Option<TlsConfig>,
}

impl ProxyAuth {
    pub fn schema() -> Attribute {
        Attribute::object(
            Block::new("ProxyClientConfig configures proxy auth settings for scraping")
                .attribute("basic_auth", BasicAuth::schema())
                .attribute(
                    "bearer_token",
                    SecretKeySelector::schema("Secret containing the bearer token for the proxy")
                        .validate(Validator::conflicts_with(&["bearer_token_file"])),
                )
                .attribute("bearer_token_file", Attribute::string("Path to the bearer token file"))
                .attribute("tls_config", TlsConfig::schema()),
        )
    }
}

/// VictoriaMetrics specific scrape parameters, snake_case in the CRD
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VmScrapeParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_compression: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_keep_alive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_stale_markers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_client_config: Option<ProxyAuth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrape_align_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrape_offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_parse: Option<bool>,
}

impl VmScrapeParams {
    pub fn schema() -> Attribute {
        Attribute::object(
            Block::new("VMScrapeParams defines VictoriaMetrics specific scrape parameters")
                .attribute("disable_compression", Attribute::bool("DisableCompression"))
                .attribute(
                    "disable_keep_alive",
                    Attribute::bool("disable_keepalive allows disabling HTTP keep-alive when scraping targets."),
                )
                .attribute(
                    "headers",
                    Attribute::string_list(
                        "Headers allows sending custom headers to scrape targets must be in of semicolon separated header with it's value eg: headerName: headerValue",
                    ),
                )
                .attribute("no_stale_markers", Attribute::bool("no_stale_markers"))
                .attribute("proxy_client_config", ProxyAuth::schema())
                .attribute("scrape_align_interval", Attribute::string("scrape_align_interval"))
                .attribute("scrape_offset", Attribute::string("scrape_offset"))
                .attribute("stream_parse", Attribute::bool("stream_parse")),
        )
    }
}

/// Relabeling rule applied to targets or scraped samples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct RelabelConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    pub if_expr: Option<StringOrList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_expr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modulus: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<StringOrList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_label: Option<String>,
}

impl RelabelConfig {
    pub fn schema(description: &str) -> Attribute {
        Attribute::object_list(
            Block::new(description)
                .attribute(
                    "action",
                    Attribute::string("Action to perform based on regex matching. Default is 'replace'")
                        .validate(Validator::one_of(RELABEL_ACTIONS)),
                )
                .attribute(
                    "if",
                    Attribute::string_or_list("If represents metricsQL match expression (or list of expressions)"),
                )
                .attribute("labels", Attribute::string_map("Labels is used together with Match for action: graphite"))
                .attribute(
                    "match",
                    Attribute::string("Match is used together with Labels for action: graphite"),
                )
                .attribute(
                    "modulus",
                    Attribute::int64("Modulus to take of the hash of the source label values.")
                        .validate(Validator::at_least(1)),
                )
                .attribute(
                    "regex",
                    Attribute::string_or_list("Regular expression against which the extracted value is matched."),
                )
                .attribute(
                    "replacement",
                    Attribute::string("Replacement value against which a regex replace is performed if the regular expression matches."),
                )
                .attribute(
                    "separator",
                    Attribute::string("Separator placed between concatenated source label values. default is ';'."),
                )
                .attribute(
                    "source_labels",
                    Attribute::string_list("The source labels select values from existing labels."),
                )
                .attribute(
                    "target_label",
                    Attribute::string("Label to which the resulting value is written in a replace action."),
                ),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelSelectorRequirement {
    pub key: String,
    pub operator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

/// Standard Kubernetes label selector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct LabelSelector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_expressions: Option<Vec<LabelSelectorRequirement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<BTreeMap<String, String>>,
}

impl LabelSelector {
    pub fn schema(description: &str) -> Attribute {
        Attribute::object(
            Block::new(description)
                .attribute(
                    "match_expressions",
                    Attribute::object_list(
                        Block::new("matchExpressions is a list of label selector requirements. The requirements are ANDed.")
                            .attribute(
                                "key",
                                Attribute::string("key is the label key that the selector applies to.").required(),
                            )
                            .attribute(
                                "operator",
                                Attribute::string("operator represents a key's relationship to a set of values.")
                                    .required()
                                    .validate(Validator::one_of(SELECTOR_OPERATORS)),
                            )
                            .attribute("values", Attribute::string_list("values is an array of string values.")),
                    ),
                )
                .attribute(
                    "match_labels",
                    Attribute::string_map("matchLabels is a map of {key,value} pairs.")
                        .validate(Validator::LabelMap),
                ),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct NamespaceSelector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_names: Option<Vec<String>>,
}

impl NamespaceSelector {
    pub fn schema() -> Attribute {
        Attribute::object(
            Block::new("Selector to select which namespaces the Endpoints objects are discovered from.")
                .attribute(
                    "any",
                    Attribute::bool("Boolean describing whether all namespaces are selected in contrast to a list restricting them.")
                        .validate(Validator::conflicts_with(&["match_names"])),
                )
                .attribute("match_names", Attribute::string_list("List of namespace names.")),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<bool>,
}

impl AttachMetadata {
    pub fn schema() -> Attribute {
        Attribute::object(
            Block::new("AttachMetadata configures metadata attaching from service discovery").attribute(
                "node",
                Attribute::bool("Node instructs vmagent to add node specific metadata from service discovery"),
            ),
        )
    }
}

/// Scrape settings shared by every endpoint-like block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct EndpointScrapeParams {
    #[serde(rename(serialize = "follow_redirects"), skip_serializing_if = "Option::is_none")]
    pub follow_redirects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub honor_labels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub honor_timestamps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(rename(serialize = "max_scrape_size"), skip_serializing_if = "Option::is_none")]
    pub max_scrape_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename(serialize = "proxyURL"), skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(rename(serialize = "scrape_interval"), skip_serializing_if = "Option::is_none")]
    pub scrape_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrape_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_limit: Option<i64>,
    #[serde(rename(serialize = "vm_scrape_params"), skip_serializing_if = "Option::is_none")]
    pub vm_scrape_params: Option<VmScrapeParams>,
}

impl EndpointScrapeParams {
    /// Add the shared scrape attributes to a block
    pub fn extend(block: Block) -> Block {
        block
            .attribute("follow_redirects", Attribute::bool("FollowRedirects controls redirects for scraping."))
            .attribute("honor_labels", Attribute::bool("HonorLabels chooses the metric's labels on collisions with target labels."))
            .attribute("honor_timestamps", Attribute::bool("HonorTimestamps controls whether vmagent respects the timestamps present in scraped data."))
            .attribute("interval", Attribute::string("Interval at which metrics should be scraped"))
            .attribute(
                "max_scrape_size",
                Attribute::string("MaxScrapeSize defines a maximum size of scraped data for a job"),
            )
            .attribute("params", Attribute::string_list_map("Optional HTTP URL parameters"))
            .attribute("path", Attribute::string("HTTP path to scrape for metrics."))
            .attribute("proxy_url", Attribute::string("ProxyURL eg http://proxyserver:2195 Directs scrapes to proxy through this endpoint."))
            .attribute(
                "sample_limit",
                Attribute::int64("SampleLimit defines per-scrape limit on number of scraped samples that will be accepted.")
                    .validate(Validator::at_least(0)),
            )
            .attribute(
                "scheme",
                Attribute::string("HTTP scheme to use for scraping.").validate(Validator::one_of(SCHEMES)),
            )
            .attribute(
                "scrape_interval",
                Attribute::string("ScrapeInterval is the same as Interval and has priority over it.")
                    .validate(Validator::conflicts_with(&["interval"])),
            )
            .attribute("scrape_timeout", Attribute::string("Timeout after which the scrape is ended"))
            .attribute(
                "series_limit",
                Attribute::int64("SeriesLimit defines per-scrape limit on number of unique time series a single target can expose during all the scrapes on the time window of 24h.")
                    .validate(Validator::at_least(0)),
            )
            .attribute("vm_scrape_params", VmScrapeParams::schema())
    }
}

/// Authentication settings shared by every endpoint-like block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct EndpointAuth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization: Option<Authorization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicAuth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token_secret: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth2: Option<OAuth2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_config: Option<TlsConfig>,
}

impl EndpointAuth {
    pub fn extend(block: Block) -> Block {
        block
            .attribute("authorization", Authorization::schema())
            .attribute("basic_auth", BasicAuth::schema())
            .attribute(
                "bearer_token_file",
                Attribute::string("File to read bearer token for scraping targets.")
                    .validate(Validator::conflicts_with(&["bearer_token_secret"])),
            )
            .attribute(
                "bearer_token_secret",
                SecretKeySelector::schema("Secret to mount to read bearer token for scraping targets."),
            )
            .attribute("oauth2", OAuth2::schema())
            .attribute("tls_config", TlsConfig::schema())
    }
}

/// Relabeling rules shared by every endpoint-like block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct EndpointRelabelings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_relabel_configs: Option<Vec<RelabelConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relabel_configs: Option<Vec<RelabelConfig>>,
}

impl EndpointRelabelings {
    pub fn extend(block: Block) -> Block {
        block
            .attribute(
                "metric_relabel_configs",
                RelabelConfig::schema("MetricRelabelConfigs to apply to samples after scrapping."),
            )
            .attribute(
                "relabel_configs",
                RelabelConfig::schema("RelabelConfigs to apply to samples during service discovery."),
            )
    }
}

/// Settings shared by service discovery blocks that talk HTTP
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct HttpClientConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization: Option<Authorization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicAuth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_redirects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth2: Option<OAuth2>,
    #[serde(rename(serialize = "proxy_client_config"), skip_serializing_if = "Option::is_none")]
    pub proxy_client_config: Option<ProxyAuth>,
    #[serde(rename(serialize = "proxyURL"), skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_config: Option<TlsConfig>,
}

impl HttpClientConfig {
    pub fn extend(block: Block) -> Block {
        block
            .attribute("authorization", Authorization::schema())
            .attribute("basic_auth", BasicAuth::schema())
            .attribute("follow_redirects", Attribute::bool("Configure whether HTTP requests follow HTTP 3xx redirects."))
            .attribute("oauth2", OAuth2::schema())
            .attribute("proxy_client_config", ProxyAuth::schema())
            .attribute("proxy_url", Attribute::string("ProxyURL eg http://proxyserver:2195 Directs scrapes to proxy through this endpoint."))
            .attribute("tls_config", TlsConfig::schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manifest_schema::{validate, ValidationOptions};

    fn render<T: Serialize>(value: &T) -> String {
        serde_yaml::to_string(value).unwrap()
    }

    #[test]
    fn test_endpoint_params_use_crd_field_names() {
        let params: EndpointScrapeParams = serde_yaml::from_str(
            "follow_redirects: true\nhonor_labels: true\nproxy_url: http://proxy:2195\nscrape_timeout: 10s\nvm_scrape_params: {stream_parse: true}\n",
        )
        .unwrap();
        assert_eq!(
            render(&params),
            "follow_redirects: true\nhonorLabels: true\nproxyURL: http://proxy:2195\nscrapeTimeout: 10s\nvm_scrape_params:\n  stream_parse: true\n"
        );
    }

    #[test]
    fn test_relabel_keywords() {
        let relabel: RelabelConfig = serde_yaml::from_str(
            "action: graphite\nmatch: 'foo.*.bar'\nlabels: {job: $1}\nif: '{job=\"a\"}'\nsource_labels: [a, b]\n",
        )
        .unwrap();
        let output: serde_yaml::Value = serde_yaml::from_str(&render(&relabel)).unwrap();
        assert_eq!(output["match"], "foo.*.bar");
        assert_eq!(output["if"], "{job=\"a\"}");
        assert_eq!(output["sourceLabels"][1], "b");
        assert!(output.get("targetLabel").is_none());
    }

    #[test]
    fn test_oauth2_keeps_snake_case() {
        let oauth2: OAuth2 = serde_yaml::from_str(
            "client_id: {secret: {name: creds, key: id}}\ntoken_url: https://auth/token\n",
        )
        .unwrap();
        assert_eq!(
            render(&oauth2),
            "client_id:\n  secret:\n    key: id\n    name: creds\ntoken_url: https://auth/token\n"
        );
    }

    #[test]
    fn test_tls_schema_conflicts() {
        let block = Block::new("test").attribute("tls_config", TlsConfig::schema());
        let config: serde_yaml::Value =
            serde_yaml::from_str("tls_config: {key_file: /k, key_secret: {key: tls.key}}").unwrap();
        let diagnostics = validate(&block, &config, &ValidationOptions::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next().unwrap().summary,
            "Invalid Attribute Combination"
        );
    }

    #[test]
    fn test_relabel_action_validation() {
        let block = Block::new("test").attribute("relabel_configs", RelabelConfig::schema("test"));
        let config: serde_yaml::Value =
            serde_yaml::from_str("relabel_configs: [{action: keep}, {action: explode}]").unwrap();
        let diagnostics = validate(&block, &config, &ValidationOptions::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next().unwrap().path.as_ref().unwrap().to_string(),
            "relabel_configs[1].action"
        );
    }
}
