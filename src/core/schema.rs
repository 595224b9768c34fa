//! Structural validation of the configuration document.
//!
//! Runs on the raw JSON value before it is deserialized, so that every
//! problem in the file is reported at once and nothing is fetched or
//! written for a malformed configuration.
//!
//! Rules:
//! - top level: only `defaults` and `environments`; `environments` required
//! - `environments`: object with at least one non-empty name
//! - environment: `region` (string), `secrets` (array, required)
//! - defaults: `secretNamePrefix`, `ignoreSecretNamePrefix`, `region`, `secrets`
//! - secret: `name` required; either exactly one of `filename`/`envname`
//!   (optional matching `target`) or `keyValues` with none of those
//! - key target: `key` required; exactly one of `filename`/`envname`
//!   (optional matching `target`)

use serde_json::{Map, Value};
use tracing::debug;

use crate::core::constants::{TARGETS, TARGET_ENV, TARGET_FILE};
use crate::error::{SchemaValidationError, Violation};

const TOP_LEVEL_KEYS: &[&str] = &["defaults", "environments"];
const ENVIRONMENT_KEYS: &[&str] = &["region", "secrets"];
const DEFAULTS_KEYS: &[&str] = &[
    "secretNamePrefix",
    "ignoreSecretNamePrefix",
    "region",
    "secrets",
];
const SECRET_KEYS: &[&str] = &["name", "target", "filename", "envname", "keyValues"];
const KEY_TARGET_KEYS: &[&str] = &["key", "target", "filename", "envname"];

/// Validate a parsed configuration document.
///
/// # Errors
///
/// Returns `SchemaValidationError` listing every violation found.
pub fn validate(document: &Value) -> Result<(), SchemaValidationError> {
    let mut validator = Validator::default();
    validator.document(document);

    debug!(violations = validator.violations.len(), "schema validated");

    if validator.violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError {
            violations: validator.violations,
        })
    }
}

#[derive(Default)]
struct Validator {
    violations: Vec<Violation>,
}

/// Whether a declaration (secret or key target) names a single destination
/// or a set of keys.
#[derive(Clone, Copy, PartialEq)]
enum Owner {
    Secret,
    KeyTarget,
}

impl Validator {
    fn fail(&mut self, path: &str, message: impl Into<String>) {
        self.violations.push(Violation {
            path: path.to_string(),
            message: message.into(),
        });
    }

    fn object<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v Map<String, Value>> {
        match value.as_object() {
            Some(map) => Some(map),
            None => {
                self.fail(path, format!("must be an object, found {}", type_name(value)));
                None
            }
        }
    }

    fn unknown_keys(&mut self, map: &Map<String, Value>, allowed: &[&str], path: &str) {
        for key in map.keys() {
            if !allowed.contains(&key.as_str()) {
                self.fail(&child(path, key), "unknown key");
            }
        }
    }

    fn required(&mut self, map: &Map<String, Value>, key: &str, path: &str) -> bool {
        if map.contains_key(key) {
            true
        } else {
            self.fail(path, format!("missing required key `{}`", key));
            false
        }
    }

    /// Type-check an optional string field; returns it when valid.
    fn string<'v>(&mut self, map: &'v Map<String, Value>, key: &str, path: &str) -> Option<&'v str> {
        let value = map.get(key)?;
        match value.as_str() {
            Some(s) => Some(s),
            None => {
                self.fail(
                    &child(path, key),
                    format!("must be a string, found {}", type_name(value)),
                );
                None
            }
        }
    }

    fn array<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v Vec<Value>> {
        match value.as_array() {
            Some(items) => Some(items),
            None => {
                self.fail(path, format!("must be an array, found {}", type_name(value)));
                None
            }
        }
    }

    fn document(&mut self, value: &Value) {
        let Some(map) = self.object(value, "") else {
            return;
        };
        self.unknown_keys(map, TOP_LEVEL_KEYS, "");

        if let Some(defaults) = map.get("defaults") {
            self.defaults(defaults, "/defaults");
        }
        if self.required(map, "environments", "") {
            self.environments(&map["environments"], "/environments");
        }
    }

    fn defaults(&mut self, value: &Value, path: &str) {
        let Some(map) = self.object(value, path) else {
            return;
        };
        self.unknown_keys(map, DEFAULTS_KEYS, path);
        self.string(map, "secretNamePrefix", path);
        self.string(map, "region", path);

        if let Some(ignore) = map.get("ignoreSecretNamePrefix") {
            let ignore_path = child(path, "ignoreSecretNamePrefix");
            if let Some(items) = self.array(ignore, &ignore_path) {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        self.fail(
                            &child(&ignore_path, &i.to_string()),
                            format!("must be a string, found {}", type_name(item)),
                        );
                    }
                }
            }
        }

        if let Some(secrets) = map.get("secrets") {
            self.secrets(secrets, &child(path, "secrets"));
        }
    }

    fn environments(&mut self, value: &Value, path: &str) {
        let Some(map) = self.object(value, path) else {
            return;
        };
        if map.is_empty() {
            self.fail(path, "must declare at least one environment");
        }
        for (name, environment) in map {
            let env_path = child(path, name);
            if name.is_empty() {
                self.fail(&env_path, "environment name must not be empty");
            }
            self.environment(environment, &env_path);
        }
    }

    fn environment(&mut self, value: &Value, path: &str) {
        let Some(map) = self.object(value, path) else {
            return;
        };
        self.unknown_keys(map, ENVIRONMENT_KEYS, path);
        self.string(map, "region", path);
        if self.required(map, "secrets", path) {
            self.secrets(&map["secrets"], &child(path, "secrets"));
        }
    }

    fn secrets(&mut self, value: &Value, path: &str) {
        let Some(items) = self.array(value, path) else {
            return;
        };
        for (i, secret) in items.iter().enumerate() {
            self.secret(secret, &child(path, &i.to_string()));
        }
    }

    fn secret(&mut self, value: &Value, path: &str) {
        let Some(map) = self.object(value, path) else {
            return;
        };
        self.unknown_keys(map, SECRET_KEYS, path);
        if self.required(map, "name", path) {
            self.string(map, "name", path);
        }

        match map.get("keyValues") {
            Some(key_values) => {
                for field in ["target", "filename", "envname"] {
                    if map.contains_key(field) {
                        self.fail(
                            &child(path, field),
                            "must not be combined with `keyValues`",
                        );
                    }
                }
                let kv_path = child(path, "keyValues");
                if let Some(items) = self.array(key_values, &kv_path) {
                    for (i, item) in items.iter().enumerate() {
                        self.key_target(item, &child(&kv_path, &i.to_string()));
                    }
                }
            }
            None => self.target_fields(map, path, Owner::Secret),
        }
    }

    fn key_target(&mut self, value: &Value, path: &str) {
        let Some(map) = self.object(value, path) else {
            return;
        };
        self.unknown_keys(map, KEY_TARGET_KEYS, path);
        if self.required(map, "key", path) {
            self.string(map, "key", path);
        }
        self.target_fields(map, path, Owner::KeyTarget);
    }

    /// `target`, `filename` and `envname` rules shared by secrets and key targets.
    fn target_fields(&mut self, map: &Map<String, Value>, path: &str, owner: Owner) {
        let target = self.string(map, "target", path);
        if let Some(t) = target {
            if !TARGETS.contains(&t) {
                self.fail(
                    &child(path, "target"),
                    format!("must be one of \"{}\", \"{}\"", TARGET_ENV, TARGET_FILE),
                );
            }
        }

        if let Some(filename) = self.string(map, "filename", path) {
            if filename.is_empty() {
                self.fail(&child(path, "filename"), "must not be empty");
            }
        }
        if let Some(envname) = self.string(map, "envname", path) {
            if envname.is_empty() {
                self.fail(&child(path, "envname"), "must not be empty");
            } else if envname.contains('=') || envname.contains('\0') {
                self.fail(
                    &child(path, "envname"),
                    "must not contain '=' or NUL characters",
                );
            }
        }

        let has_filename = map.contains_key("filename");
        let has_envname = map.contains_key("envname");
        match (has_filename, has_envname) {
            (true, true) => self.fail(path, "must not declare both `filename` and `envname`"),
            (false, false) => self.fail(
                path,
                match owner {
                    Owner::Secret => "must declare one of `filename`, `envname` or `keyValues`",
                    Owner::KeyTarget => "must declare one of `filename` or `envname`",
                },
            ),
            _ => {}
        }

        match target {
            Some(TARGET_ENV) if !has_envname => {
                self.fail(path, "target `env` requires `envname`")
            }
            Some(TARGET_FILE) if !has_filename => {
                self.fail(path, "target `file` requires `filename`")
            }
            _ => {}
        }
    }
}

/// Append a JSON pointer segment, escaping `~` and `/`.
fn child(path: &str, segment: &str) -> String {
    format!("{}/{}", path, segment.replace('~', "~0").replace('/', "~1"))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
