//! Security scheme descriptors and their shape rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of security scheme types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecuritySchemeType {
    UserPassword,
    ApiKey,
    #[serde(rename = "X509")]
    X509,
    SymmetricEncryption,
    AsymmetricEncryption,
    HttpApiKey,
    Http,
    #[serde(rename = "oauth2")]
    OAuth2,
    OpenIdConnect,
    Plain,
    ScramSha256,
    ScramSha512,
    Gssapi,
}

/// An authentication/authorization mechanism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: SecuritySchemeType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter name (`httpApiKey`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Parameter location (`apiKey`, `httpApiKey`).
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// HTTP authorization scheme (`http`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flows: Option<OAuthFlows>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_id_connect_url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
}

/// OAuth2 flow set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlows {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit: Option<OAuthFlow>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<OAuthFlow>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<OAuthFlow>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<OAuthFlow>,
}

/// A single OAuth2 flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,

    #[serde(default)]
    pub available_scopes: BTreeMap<String, String>,
}

impl SecurityScheme {
    /// Create a scheme of the given type with no parameters.
    pub fn new(scheme_type: SecuritySchemeType) -> Self {
        Self {
            scheme_type,
            description: None,
            name: None,
            location: None,
            scheme: None,
            bearer_format: None,
            flows: None,
            open_id_connect_url: None,
            scopes: Vec::new(),
        }
    }

    /// `http` bearer scheme.
    pub fn bearer(format: impl Into<String>) -> Self {
        Self {
            scheme: Some("bearer".to_string()),
            bearer_format: Some(format.into()),
            ..Self::new(SecuritySchemeType::Http)
        }
    }

    /// Check the parameters required by the scheme type.
    ///
    /// Returns one message per problem; an empty list means the scheme is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        match self.scheme_type {
            SecuritySchemeType::ApiKey => {
                check_location(&mut problems, self.location.as_deref(), &["user", "password"]);
            }
            SecuritySchemeType::HttpApiKey => {
                if self.name.as_deref().is_none_or(str::is_empty) {
                    problems.push("httpApiKey requires 'name'".to_string());
                }
                check_location(
                    &mut problems,
                    self.location.as_deref(),
                    &["query", "header", "cookie"],
                );
            }
            SecuritySchemeType::Http => {
                if self.scheme.as_deref().is_none_or(str::is_empty) {
                    problems.push("http requires 'scheme'".to_string());
                }
            }
            SecuritySchemeType::OAuth2 => match &self.flows {
                Some(flows) => validate_flows(&mut problems, flows),
                None => problems.push("oauth2 requires 'flows'".to_string()),
            },
            SecuritySchemeType::OpenIdConnect => {
                if self.open_id_connect_url.as_deref().is_none_or(str::is_empty) {
                    problems.push("openIdConnect requires 'openIdConnectUrl'".to_string());
                }
            }
            _ => {}
        }

        problems
    }
}

fn check_location(problems: &mut Vec<String>, location: Option<&str>, allowed: &[&str]) {
    match location {
        Some(value) if allowed.contains(&value) => {}
        Some(value) => problems.push(format!(
            "'in' must be one of {}, got '{value}'",
            allowed.join(", ")
        )),
        None => problems.push(format!("'in' is required (one of {})", allowed.join(", "))),
    }
}

fn validate_flows(problems: &mut Vec<String>, flows: &OAuthFlows) {
    let declared = [
        ("implicit", &flows.implicit, true, false),
        ("password", &flows.password, false, true),
        ("clientCredentials", &flows.client_credentials, false, true),
        ("authorizationCode", &flows.authorization_code, true, true),
    ];

    if declared.iter().all(|(_, flow, _, _)| flow.is_none()) {
        problems.push("oauth2 'flows' must declare at least one flow".to_string());
        return;
    }

    for (name, flow, needs_authorization, needs_token) in declared {
        let Some(flow) = flow else { continue };
        if needs_authorization && flow.authorization_url.as_deref().is_none_or(str::is_empty) {
            problems.push(format!("{name} flow requires 'authorizationUrl'"));
        }
        if needs_token && flow.token_url.as_deref().is_none_or(str::is_empty) {
            problems.push(format!("{name} flow requires 'tokenUrl'"));
        }
    }
}
