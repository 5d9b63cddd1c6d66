//! Consumer-driven contract for the status interaction.
//!
//! The consumer test suite builds [`status_contract`], runs the client
//! against a mock serving its example response, and writes the file. The
//! producer test suite loads the committed file and replays each
//! interaction against the real routes, checking the live response with
//! [`ContractResponse::verify`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONSUMER_NAME: &str = "status-consumer";
pub const PROVIDER_NAME: &str = "status-producer";
pub const PACT_SPECIFICATION_VERSION: &str = "2.0.0";

/// `currentDateTime`: ISO-8601 local date-time with exactly three fraction digits.
pub const ISO_MILLIS_REGEX: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}$";

/// Committed contract file, relative to the crate root.
pub const CONTRACT_FILE: &str = "contracts/status-consumer-status-producer.json";

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("failed to access contract file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("contract file {path} is not valid: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pacticipant {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub pact_specification: SpecificationVersion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificationVersion {
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub consumer: Pacticipant,
    pub provider: Pacticipant,
    pub interactions: Vec<Interaction>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub description: String,
    pub request: ContractRequest,
    pub response: ContractResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRequest {
    pub method: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractResponse {
    pub status: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Example body; mocks serve it verbatim.
    pub body: Value,
    /// Keyed by JSON path, e.g. `$.body.status`. Keys without a rule are
    /// compared for equality with the example.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub matching_rules: BTreeMap<String, MatchingRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "match", rename_all = "lowercase")]
pub enum MatchingRule {
    Equality,
    Type,
    Regex { regex: String },
}

/// One reason a live response does not satisfy a [`ContractResponse`].
#[derive(Debug, Clone, PartialEq)]
pub enum Mismatch {
    Status { expected: u16, actual: u16 },
    Header { name: String, expected: String, actual: Option<String> },
    BodyNotObject { actual: Value },
    MissingKey(String),
    UnexpectedKey(String),
    Value { key: String, rule: MatchingRule, actual: Value },
    InvalidRule { key: String, reason: String },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Status { expected, actual } => {
                write!(f, "expected status {expected}, got {actual}")
            }
            Mismatch::Header { name, expected, actual } => match actual {
                Some(actual) => write!(f, "expected header {name}: {expected}, got {actual}"),
                None => write!(f, "expected header {name}: {expected}, but it is missing"),
            },
            Mismatch::BodyNotObject { actual } => {
                write!(f, "expected a JSON object body, got {actual}")
            }
            Mismatch::MissingKey(key) => write!(f, "body is missing key `{key}`"),
            Mismatch::UnexpectedKey(key) => write!(f, "body has unexpected key `{key}`"),
            Mismatch::Value { key, rule, actual } => {
                write!(f, "body key `{key}` = {actual} does not satisfy {rule:?}")
            }
            Mismatch::InvalidRule { key, reason } => {
                write!(f, "matching rule for `{key}` is invalid: {reason}")
            }
        }
    }
}

/// The consumer's expectation of `GET /status`.
pub fn status_contract() -> Contract {
    let mut request_headers = BTreeMap::new();
    request_headers.insert("Accept".to_string(), "application/json".to_string());

    let mut response_headers = BTreeMap::new();
    response_headers.insert("Content-Type".to_string(), "application/json".to_string());

    let mut matching_rules = BTreeMap::new();
    matching_rules.insert(
        "$.body.currentDateTime".to_string(),
        MatchingRule::Regex {
            regex: ISO_MILLIS_REGEX.to_string(),
        },
    );

    Contract {
        consumer: Pacticipant {
            name: CONSUMER_NAME.to_string(),
        },
        provider: Pacticipant {
            name: PROVIDER_NAME.to_string(),
        },
        interactions: vec![Interaction {
            description: "a request for the service status".to_string(),
            request: ContractRequest {
                method: "GET".to_string(),
                path: "/status".to_string(),
                headers: request_headers,
            },
            response: ContractResponse {
                status: 200,
                headers: response_headers,
                body: json!({
                    "status": "OK",
                    "currentDateTime": "2017-06-27T13:54:29.214"
                }),
                matching_rules,
            },
        }],
        metadata: Metadata {
            pact_specification: SpecificationVersion {
                version: PACT_SPECIFICATION_VERSION.to_string(),
            },
        },
    }
}

impl Contract {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContractError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ContractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ContractError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes pretty-printed JSON, creating parent directories as needed.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ContractError> {
        let path = path.as_ref();
        let io_err = |source| ContractError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut raw = serde_json::to_string_pretty(self).map_err(|source| ContractError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        raw.push('\n');
        fs::write(path, raw).map_err(io_err)
    }

    /// `<consumer>-<provider>.json`
    pub fn file_name(&self) -> String {
        format!("{}-{}.json", self.consumer.name, self.provider.name)
    }
}

impl ContractResponse {
    /// Checks a live response against this expectation.
    ///
    /// `header` looks up a response header by name; lookups should be
    /// case-insensitive, as HTTP header maps are. All mismatches are
    /// collected rather than stopping at the first.
    pub fn verify<H>(&self, status: u16, header: H, body: &Value) -> Result<(), Vec<Mismatch>>
    where
        H: Fn(&str) -> Option<String>,
    {
        let mut mismatches = Vec::new();

        if status != self.status {
            mismatches.push(Mismatch::Status {
                expected: self.status,
                actual: status,
            });
        }

        for (name, expected) in &self.headers {
            let actual = header(name);
            let matches = match actual.as_deref() {
                Some(actual) if name.eq_ignore_ascii_case("content-type") => {
                    media_type(actual).eq_ignore_ascii_case(media_type(expected))
                }
                Some(actual) => actual == expected,
                None => false,
            };
            if !matches {
                mismatches.push(Mismatch::Header {
                    name: name.clone(),
                    expected: expected.clone(),
                    actual,
                });
            }
        }

        self.verify_body(body, &mut mismatches);

        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(mismatches)
        }
    }

    fn verify_body(&self, body: &Value, mismatches: &mut Vec<Mismatch>) {
        let Some(expected) = self.body.as_object() else {
            if &self.body != body {
                mismatches.push(Mismatch::Value {
                    key: "$".to_string(),
                    rule: MatchingRule::Equality,
                    actual: body.clone(),
                });
            }
            return;
        };
        let Some(actual) = body.as_object() else {
            mismatches.push(Mismatch::BodyNotObject {
                actual: body.clone(),
            });
            return;
        };

        for key in actual.keys().filter(|k| !expected.contains_key(*k)) {
            mismatches.push(Mismatch::UnexpectedKey(key.clone()));
        }

        for (key, example) in expected {
            let Some(value) = actual.get(key) else {
                mismatches.push(Mismatch::MissingKey(key.clone()));
                continue;
            };
            let rule = self
                .matching_rules
                .get(&format!("$.body.{key}"))
                .cloned()
                .unwrap_or(MatchingRule::Equality);

            match rule.matches(example, value) {
                Ok(true) => {}
                Ok(false) => mismatches.push(Mismatch::Value {
                    key: key.clone(),
                    rule,
                    actual: value.clone(),
                }),
                Err(reason) => mismatches.push(Mismatch::InvalidRule {
                    key: key.clone(),
                    reason,
                }),
            }
        }
    }
}

impl MatchingRule {
    fn matches(&self, example: &Value, actual: &Value) -> Result<bool, String> {
        match self {
            MatchingRule::Equality => Ok(example == actual),
            MatchingRule::Type => Ok(same_json_type(example, actual)),
            MatchingRule::Regex { regex } => {
                let regex = Regex::new(regex).map_err(|e| e.to_string())?;
                Ok(actual.as_str().is_some_and(|s| regex.is_match(s)))
            }
        }
    }
}

fn same_json_type(a: &Value, b: &Value) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

fn media_type(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default().trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(content_type: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |name| {
            name.eq_ignore_ascii_case("content-type")
                .then_some(content_type)
                .flatten()
                .map(str::to_owned)
        }
    }

    fn expected() -> ContractResponse {
        status_contract().interactions.remove(0).response
    }

    #[test]
    fn test_status_contract_shape() {
        let contract = status_contract();

        assert_eq!(contract.file_name(), "status-consumer-status-producer.json");
        assert_eq!(contract.interactions.len(), 1);
        let interaction = &contract.interactions[0];
        assert_eq!(interaction.request.method, "GET");
        assert_eq!(interaction.request.path, "/status");
        assert_eq!(interaction.response.status, 200);
        assert_eq!(
            interaction.response.body,
            json!({"status": "OK", "currentDateTime": "2017-06-27T13:54:29.214"})
        );
    }

    #[test]
    fn test_status_contract_uses_only_v2_matchers() {
        let contract = status_contract();
        let rules = &contract.interactions[0].response.matching_rules;

        assert_eq!(contract.metadata.pact_specification.version, "2.0.0");
        assert!(!rules.contains_key("$.body.status"));
        assert!(
            rules
                .values()
                .all(|rule| matches!(rule, MatchingRule::Type | MatchingRule::Regex { .. }))
        );
    }

    #[test]
    fn test_status_without_rule_is_compared_for_equality() {
        let body = json!({"status": "UP", "currentDateTime": "2017-06-27T13:54:29.214"});

        let mismatches = expected()
            .verify(200, headers(Some("application/json")), &body)
            .unwrap_err();

        assert_eq!(
            mismatches,
            vec![Mismatch::Value {
                key: "status".to_string(),
                rule: MatchingRule::Equality,
                actual: json!("UP"),
            }]
        );
    }

    #[test]
    fn test_example_satisfies_its_own_rules() {
        let response = expected();

        assert_eq!(
            response.verify(200, headers(Some("application/json")), &response.body),
            Ok(())
        );
    }

    #[test]
    fn test_regex_rule_accepts_other_timestamps() {
        let body = json!({"status": "OK", "currentDateTime": "2026-10-14T08:00:00.001"});

        assert!(
            expected()
                .verify(200, headers(Some("application/json; charset=utf-8")), &body)
                .is_ok()
        );
    }

    #[test]
    fn test_collects_every_mismatch() {
        let body = json!({"status": "DOWN", "currentDateTime": "2026-10-14T08:00:00Z", "extra": 1});

        let mismatches = expected()
            .verify(500, headers(Some("text/html")), &body)
            .unwrap_err();

        assert!(mismatches.contains(&Mismatch::Status {
            expected: 200,
            actual: 500
        }));
        assert!(mismatches.contains(&Mismatch::UnexpectedKey("extra".to_string())));
        assert!(mismatches.iter().any(|m| matches!(m, Mismatch::Header { .. })));
        assert!(
            mismatches
                .iter()
                .any(|m| matches!(m, Mismatch::Value { key, .. } if key == "status"))
        );
        assert!(
            mismatches
                .iter()
                .any(|m| matches!(m, Mismatch::Value { key, .. } if key == "currentDateTime"))
        );
        assert_eq!(mismatches.len(), 5);
    }

    #[test]
    fn test_missing_key_and_missing_header() {
        let body = json!({"currentDateTime": "2017-06-27T13:54:29.214"});

        let mismatches = expected().verify(200, headers(None), &body).unwrap_err();

        assert_eq!(
            mismatches,
            vec![
                Mismatch::Header {
                    name: "Content-Type".to_string(),
                    expected: "application/json".to_string(),
                    actual: None,
                },
                Mismatch::MissingKey("status".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_object_body() {
        let mismatches = expected()
            .verify(200, headers(Some("application/json")), &json!(["OK"]))
            .unwrap_err();

        assert!(matches!(mismatches[0], Mismatch::BodyNotObject { .. }));
    }

    #[test]
    fn test_type_rule_and_invalid_regex() {
        let mut response = expected();
        response
            .matching_rules
            .insert("$.body.status".to_string(), MatchingRule::Type);
        response.matching_rules.insert(
            "$.body.currentDateTime".to_string(),
            MatchingRule::Regex {
                regex: "(".to_string(),
            },
        );
        let body = json!({"status": "UP", "currentDateTime": "2017-06-27T13:54:29.214"});

        let mismatches = response
            .verify(200, headers(Some("application/json")), &body)
            .unwrap_err();

        assert_eq!(mismatches.len(), 1);
        assert!(matches!(&mismatches[0], Mismatch::InvalidRule { key, .. } if key == "currentDateTime"));
    }

    #[test]
    fn test_matching_rule_wire_format() {
        let rule = MatchingRule::Regex {
            regex: ISO_MILLIS_REGEX.to_string(),
        };

        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({"match": "regex", "regex": ISO_MILLIS_REGEX})
        );
        assert_eq!(
            serde_json::from_value::<MatchingRule>(json!({"match": "type"})).unwrap(),
            MatchingRule::Type
        );
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("contract.json");
        let contract = status_contract();

        contract.write(&path).unwrap();

        assert_eq!(Contract::load(&path).unwrap(), contract);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = Contract::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, ContractError::Io { .. }));

        let garbage = dir.path().join("garbage.json");
        fs::write(&garbage, "{ not json").unwrap();
        assert!(matches!(
            Contract::load(&garbage).unwrap_err(),
            ContractError::Json { .. }
        ));
    }
}
