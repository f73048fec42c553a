//! VMScrapeConfig: raw scrape configuration with service discovery blocks
//!
//! Every `*_sd_configs` list maps to its CRD field (`fileSDConfigs`,
//! `kubernetesSDConfigs`, ...). HTTP client settings are flattened into the
//! discovery blocks that talk to a remote API.

use super::common::{
    AttachMetadata, Authorization, EndpointAuth, EndpointRelabelings, EndpointScrapeParams,
    HttpClientConfig, OAuth2, ProxyAuth, SecretKeySelector, TlsConfig,
};
use super::ManifestKind;
use manifest_render::{Resource, StringOrList};
use manifest_schema::{Attribute, Block, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const KUBERNETES_ROLES: &[&str] = &["pod", "endpoints", "endpointslice", "service", "node", "ingress"];
pub const DNS_RECORD_TYPES: &[&str] = &["SRV", "A", "AAAA", "MX"];
pub const OPENSTACK_ROLES: &[&str] = &["hypervisor", "instance"];
pub const AZURE_AUTH_METHODS: &[&str] = &["OAuth", "ManagedIdentity"];

pub struct VmScrapeConfig;

impl Resource for VmScrapeConfig {
    const GROUP: &'static str = super::GROUP;
    const VERSION: &'static str = super::VERSION;
    const KIND: &'static str = "VMScrapeConfig";
    type Spec = VmScrapeConfigSpec;
}

impl ManifestKind for VmScrapeConfig {
    const DESCRIPTION: &'static str = "VMScrapeConfig specifies a set of targets and parameters describing how to scrape them.";

    fn spec_schema() -> Attribute {
        let block = Block::new("VMScrapeConfigSpec defines the desired state of VMScrapeConfig")
            .attribute("azure_sd_configs", Attribute::object_list(azure_sd_schema()))
            .attribute("consul_sd_configs", Attribute::object_list(consul_sd_schema()))
            .attribute(
                "digital_ocean_sd_configs",
                Attribute::object_list(digital_ocean_sd_schema()),
            )
            .attribute("dns_sd_configs", Attribute::object_list(dns_sd_schema()))
            .attribute("ec2_sd_configs", Attribute::object_list(ec2_sd_schema()))
            .attribute("file_sd_configs", Attribute::object_list(file_sd_schema()))
            .attribute("gce_sd_configs", Attribute::object_list(gce_sd_schema()))
            .attribute("http_sd_configs", Attribute::object_list(http_sd_schema()))
            .attribute(
                "kubernetes_sd_configs",
                Attribute::object_list(kubernetes_sd_schema()),
            )
            .attribute(
                "openstack_sd_configs",
                Attribute::object_list(openstack_sd_schema()),
            )
            .attribute("static_configs", Attribute::object_list(static_config_schema()));
        let block = EndpointScrapeParams::extend(block);
        let block = EndpointAuth::extend(block);
        Attribute::object(EndpointRelabelings::extend(block))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct VmScrapeConfigSpec {
    #[serde(rename(serialize = "azureSDConfigs"), skip_serializing_if = "Option::is_none")]
    pub azure_sd_configs: Option<Vec<AzureSdConfig>>,
    #[serde(rename(serialize = "consulSDConfigs"), skip_serializing_if = "Option::is_none")]
    pub consul_sd_configs: Option<Vec<ConsulSdConfig>>,
    #[serde(rename(serialize = "digitalOceanSDConfigs"), skip_serializing_if = "Option::is_none")]
    pub digital_ocean_sd_configs: Option<Vec<DigitalOceanSdConfig>>,
    #[serde(rename(serialize = "dnsSDConfigs"), skip_serializing_if = "Option::is_none")]
    pub dns_sd_configs: Option<Vec<DnsSdConfig>>,
    #[serde(rename(serialize = "ec2SDConfigs"), skip_serializing_if = "Option::is_none")]
    pub ec2_sd_configs: Option<Vec<Ec2SdConfig>>,
    #[serde(rename(serialize = "fileSDConfigs"), skip_serializing_if = "Option::is_none")]
    pub file_sd_configs: Option<Vec<FileSdConfig>>,
    #[serde(rename(serialize = "gceSDConfigs"), skip_serializing_if = "Option::is_none")]
    pub gce_sd_configs: Option<Vec<GceSdConfig>>,
    #[serde(rename(serialize = "httpSDConfigs"), skip_serializing_if = "Option::is_none")]
    pub http_sd_configs: Option<Vec<HttpSdConfig>>,
    #[serde(rename(serialize = "kubernetesSDConfigs"), skip_serializing_if = "Option::is_none")]
    pub kubernetes_sd_configs: Option<Vec<KubernetesSdConfig>>,
    #[serde(rename(serialize = "openstackSDConfigs"), skip_serializing_if = "Option::is_none")]
    pub openstack_sd_configs: Option<Vec<OpenStackSdConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_configs: Option<Vec<StaticConfig>>,
    #[serde(flatten)]
    pub scrape: EndpointScrapeParams,
    #[serde(flatten)]
    pub auth: EndpointAuth,
    #[serde(flatten)]
    pub relabelings: EndpointRelabelings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    pub targets: Vec<String>,
}

fn static_config_schema() -> Block {
    Block::new("StaticConfigs defines a list of static targets with a common label set.")
        .attribute(
            "labels",
            Attribute::string_map("Labels assigned to all metrics scraped from the targets.")
                .validate(Validator::LabelMap),
        )
        .attribute(
            "targets",
            Attribute::string_list("List of targets for this static configuration.")
                .required()
                .validate(Validator::size_at_least(1)),
        )
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileSdConfig {
    pub files: Vec<String>,
}

fn file_sd_schema() -> Block {
    Block::new("FileSDConfigs defines a list of file service discovery configurations.").attribute(
        "files",
        Attribute::string_list("List of files to be used for file discovery.")
            .required()
            .validate(Validator::size_at_least(1)),
    )
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct HttpSdConfig {
    pub url: String,
    #[serde(flatten)]
    pub client: HttpClientConfig,
}

fn http_sd_schema() -> Block {
    HttpClientConfig::extend(
        Block::new("HTTPSDConfigs defines a list of HTTP service discovery configurations.").attribute(
            "url",
            Attribute::string("URL from which the targets are fetched.")
                .required()
                .validate(Validator::pattern(
                    "^http(s)?://.+$",
                    "must be an http or https URL",
                )),
        ),
    )
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct KubernetesSdConfig {
    #[serde(rename(serialize = "apiServerURL"), skip_serializing_if = "Option::is_none")]
    pub api_server_url: Option<String>,
    #[serde(rename(serialize = "attach_metadata"), skip_serializing_if = "Option::is_none")]
    pub attach_metadata: Option<AttachMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespaces: Option<NamespaceDiscovery>,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selectors: Option<Vec<K8sSelectorConfig>>,
    #[serde(flatten)]
    pub client: HttpClientConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct NamespaceDiscovery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_namespace: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct K8sSelectorConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub role: String,
}

fn kubernetes_sd_schema() -> Block {
    let block = Block::new("KubernetesSDConfigs defines a list of Kubernetes service discovery configurations.")
        .attribute(
            "api_server_url",
            Attribute::string("The API server address consisting of a hostname or IP address followed by an optional port number."),
        )
        .attribute("attach_metadata", AttachMetadata::schema())
        .attribute(
            "namespaces",
            Attribute::object(
                Block::new("Optional namespace discovery. If omitted, discover targets across all namespaces.")
                    .attribute("names", Attribute::string_list("List of namespaces where to watch for resources."))
                    .attribute(
                        "own_namespace",
                        Attribute::bool("Includes the namespace in which the pod exists to the list of watched namespaces."),
                    ),
            ),
        )
        .attribute(
            "role",
            Attribute::string("Role of the Kubernetes entities that should be discovered.")
                .required()
                .validate(Validator::one_of(KUBERNETES_ROLES)),
        )
        .attribute(
            "selectors",
            Attribute::object_list(
                Block::new("Selector to select objects.")
                    .attribute("field", Attribute::string("Field selector"))
                    .attribute("label", Attribute::string("Label selector"))
                    .attribute(
                        "role",
                        Attribute::string("Role of the Kubernetes entities that should be selected.")
                            .required()
                            .validate(Validator::one_of(KUBERNETES_ROLES)),
                    ),
            ),
        );
    HttpClientConfig::extend(block)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ConsulSdConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_stale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_meta: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    pub server: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_ref: Option<SecretKeySelector>,
    #[serde(flatten)]
    pub client: HttpClientConfig,
}

fn consul_sd_schema() -> Block {
    let block = Block::new("ConsulSDConfigs defines a list of Consul service discovery configurations.")
        .attribute(
            "allow_stale",
            Attribute::bool("Allow stale Consul results. Will reduce load on Consul."),
        )
        .attribute("datacenter", Attribute::string("Consul Datacenter name, if not provided it will use the local Consul Agent Datacenter."))
        .attribute("namespace", Attribute::string("Namespaces are only supported in Consul Enterprise."))
        .attribute(
            "node_meta",
            Attribute::string_map("Node metadata key/value pairs to filter nodes for a given service."),
        )
        .attribute("partition", Attribute::string("Admin Partitions are only supported in Consul Enterprise."))
        .attribute(
            "scheme",
            Attribute::string("HTTP Scheme default 'http'")
                .validate(Validator::one_of(&["HTTP", "HTTPS"])),
        )
        .attribute(
            "server",
            Attribute::string("A valid string consisting of a hostname or IP followed by an optional port number.")
                .required()
                .validate(Validator::length_at_least(1)),
        )
        .attribute(
            "services",
            Attribute::string_list("A list of services for which targets are retrieved. If omitted, all services are scraped."),
        )
        .attribute(
            "tag_separator",
            Attribute::string("The string by which Consul tags are joined into the tag label."),
        )
        .attribute(
            "tags",
            Attribute::string_list("An optional list of tags used to filter nodes for a given service."),
        )
        .attribute(
            "token_ref",
            SecretKeySelector::schema("Consul ACL TokenRef, if not provided it will use the ACL from the local Consul Agent.")
                .sensitive(),
        );
    HttpClientConfig::extend(block)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DnsSdConfig {
    pub names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
}

fn dns_sd_schema() -> Block {
    Block::new("DNSSDConfigs defines a list of DNS service discovery configurations.")
        .attribute(
            "names",
            Attribute::string_list("A list of DNS domain names to be queried.")
                .required()
                .validate(Validator::size_at_least(1)),
        )
        .attribute(
            "port",
            Attribute::int64("The port number used if the query type is not SRV Ignored for SRV records")
                .validate(Validator::at_least(1))
                .validate(Validator::at_most(65535)),
        )
        .attribute(
            "type",
            Attribute::string("Type of DNS query to perform.").validate(Validator::one_of(DNS_RECORD_TYPES)),
        )
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Ec2SdConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<Ec2Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename(serialize = "roleARN"), skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<SecretKeySelector>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ec2Filter {
    pub name: String,
    pub values: Vec<String>,
}

fn ec2_sd_schema() -> Block {
    Block::new("EC2SDConfigs defines a list of EC2 service discovery configurations.")
        .attribute(
            "access_key",
            SecretKeySelector::schema("AccessKey is the AWS API key.").sensitive(),
        )
        .attribute(
            "filters",
            Attribute::object_list(
                Block::new("Filters can be used optionally to filter the instance list by other criteria.")
                    .attribute("name", Attribute::string("Name of the filter").required())
                    .attribute("values", Attribute::string_list("Values of the filter").required()),
            ),
        )
        .attribute(
            "port",
            Attribute::int64("The port to scrape metrics from.")
                .validate(Validator::at_least(1))
                .validate(Validator::at_most(65535)),
        )
        .attribute("region", Attribute::string("The AWS region"))
        .attribute("role_arn", Attribute::string("AWS Role ARN, an alternative to using AWS API keys."))
        .attribute(
            "secret_key",
            SecretKeySelector::schema("SecretKey is the AWS API secret.")
                .sensitive()
                .validate(Validator::also_requires(&["access_key"])),
        )
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct AzureSdConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_method: Option<String>,
    #[serde(rename(serialize = "clientID"), skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(rename(serialize = "subscriptionID"))]
    pub subscription_id: String,
    #[serde(rename(serialize = "tenantID"), skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

fn azure_sd_schema() -> Block {
    Block::new("AzureSDConfigs defines a list of Azure service discovery configurations.")
        .attribute(
            "authentication_method",
            Attribute::string("The authentication method, either OAuth or ManagedIdentity.")
                .validate(Validator::one_of(AZURE_AUTH_METHODS)),
        )
        .attribute(
            "client_id",
            Attribute::string("Optional client ID. Only required with the OAuth authentication method."),
        )
        .attribute(
            "client_secret",
            SecretKeySelector::schema("Optional client secret. Only required with the OAuth authentication method.")
                .sensitive(),
        )
        .attribute("environment", Attribute::string("The Azure environment."))
        .attribute(
            "port",
            Attribute::int64("The port to scrape metrics from.")
                .validate(Validator::at_least(1))
                .validate(Validator::at_most(65535)),
        )
        .attribute(
            "resource_group",
            Attribute::string("Optional resource group name. Limits discovery to this resource group."),
        )
        .attribute(
            "subscription_id",
            Attribute::string("The subscription ID. Always required.")
                .required()
                .validate(Validator::length_at_least(1)),
        )
        .attribute(
            "tenant_id",
            Attribute::string("Optional tenant ID. Only required with the OAuth authentication method."),
        )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct GceSdConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_separator: Option<String>,
    pub zone: StringOrList,
}

fn gce_sd_schema() -> Block {
    Block::new("GCESDConfigs defines a list of GCE service discovery configurations.")
        .attribute(
            "filter",
            Attribute::string("Filter can be used optionally to filter the instance list by other criteria"),
        )
        .attribute(
            "port",
            Attribute::int64("The port to scrape metrics from.")
                .validate(Validator::at_least(1))
                .validate(Validator::at_most(65535)),
        )
        .attribute(
            "project",
            Attribute::string("The Google Cloud Project ID")
                .required()
                .validate(Validator::length_at_least(1)),
        )
        .attribute(
            "tag_separator",
            Attribute::string("The tag separator is used to separate the tags on concatenation"),
        )
        .attribute(
            "zone",
            Attribute::string_or_list("The zone of the scrape targets. If you need multiple zones use multiple GCESDConfigs.")
                .required(),
        )
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct OpenStackSdConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_tenants: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_credential_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_credential_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_credential_secret: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(rename(serialize = "domainID"), skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(rename(serialize = "projectID"), skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    pub region: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_config: Option<TlsConfig>,
    #[serde(rename(serialize = "userid"), skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

fn openstack_sd_schema() -> Block {
    Block::new("OpenStackSDConfigs defines a list of OpenStack service discovery configurations.")
        .attribute(
            "all_tenants",
            Attribute::bool("Whether the service discovery should list all instances for all projects."),
        )
        .attribute("application_credential_id", Attribute::string("ApplicationCredentialID"))
        .attribute(
            "application_credential_name",
            Attribute::string("The ApplicationCredentialID or ApplicationCredentialName fields are required if using an application credential to authenticate."),
        )
        .attribute(
            "application_credential_secret",
            SecretKeySelector::schema("The applicationCredentialSecret field is required if using an application credential to authenticate.")
                .sensitive(),
        )
        .attribute(
            "availability",
            Attribute::string("Availability of the endpoint to connect to.")
                .validate(Validator::one_of(&["Public", "public", "Admin", "admin", "Internal", "internal"])),
        )
        .attribute("domain_id", Attribute::string("DomainID"))
        .attribute("domain_name", Attribute::string("At most one of domainId and domainName must be provided if using username with Identity V3."))
        .attribute("identity_endpoint", Attribute::string("IdentityEndpoint specifies the HTTP endpoint that is required to work with the Identity API of the appropriate version."))
        .attribute(
            "password",
            SecretKeySelector::schema("Password for the Identity V2 and V3 APIs.").sensitive(),
        )
        .attribute(
            "port",
            Attribute::int64("The port to scrape metrics from.")
                .validate(Validator::at_least(1))
                .validate(Validator::at_most(65535)),
        )
        .attribute("project_id", Attribute::string("ProjectID"))
        .attribute("project_name", Attribute::string("The ProjectId and ProjectName fields are optional for the Identity V2 API."))
        .attribute(
            "region",
            Attribute::string("The OpenStack Region.")
                .required()
                .validate(Validator::length_at_least(1)),
        )
        .attribute(
            "role",
            Attribute::string("The OpenStack role of entities that should be discovered.")
                .required()
                .validate(Validator::one_of(OPENSTACK_ROLES)),
        )
        .attribute("tls_config", TlsConfig::schema())
        .attribute("user_id", Attribute::string("UserID"))
        .attribute("username", Attribute::string("Username is required if using Identity V2 API."))
}

/// DigitalOcean discovery carries its own HTTP client fields instead of the shared ones
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct DigitalOceanSdConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization: Option<Authorization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_redirects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth2: Option<OAuth2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(rename(serialize = "proxy_client_config"), skip_serializing_if = "Option::is_none")]
    pub proxy_client_config: Option<ProxyAuth>,
    #[serde(rename(serialize = "proxyURL"), skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_config: Option<TlsConfig>,
}

fn digital_ocean_sd_schema() -> Block {
    Block::new("DigitalOceanSDConfigs defines a list of DigitalOcean service discovery configurations.")
        .attribute("authorization", Authorization::schema())
        .attribute(
            "follow_redirects",
            Attribute::bool("Configure whether HTTP requests follow HTTP 3xx redirects."),
        )
        .attribute(
            "oauth2",
            OAuth2::schema().validate(Validator::conflicts_with(&["authorization"])),
        )
        .attribute(
            "port",
            Attribute::int64("The port to scrape metrics from.")
                .validate(Validator::at_least(1))
                .validate(Validator::at_most(65535)),
        )
        .attribute("proxy_client_config", ProxyAuth::schema())
        .attribute("proxy_url", Attribute::string("ProxyURL eg http://proxyserver:2195 Directs scrapes to proxy through this endpoint."))
        .attribute("tls_config", TlsConfig::schema())
}
