#![forbid(unsafe_code)]

use serde::Serialize;
use url::Url;

use crate::common::validate_text;
use crate::{ContractViolation, Validate};

/// A serialized web origin, e.g. `https://reporter.test`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Origin(String);

impl Origin {
    pub fn v1(text: impl Into<String>) -> Result<Self, ContractViolation> {
        let o = Self(text.into());
        o.validate()?;
        Ok(o)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Validate for Origin {
    fn validate(&self) -> Result<(), ContractViolation> {
        validate_text("origin", &self.0, 512)?;
        if !self.0.starts_with("https://") && !self.0.starts_with("http://") {
            return Err(ContractViolation::InvalidValue {
                field: "origin",
                reason: "must be an http(s) origin",
            });
        }
        validate_host("origin", &self.0)?;
        Ok(())
    }
}

/// A serialized site (scheme + host), e.g. `https://b.test`. Ordered so
/// that "lexicographically smallest destination" is expressible.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Site(String);

impl Site {
    pub fn v1(text: impl Into<String>) -> Result<Self, ContractViolation> {
        let s = Self(text.into());
        s.validate()?;
        Ok(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Validate for Site {
    fn validate(&self) -> Result<(), ContractViolation> {
        validate_text("site", &self.0, 512)?;
        if !self.0.starts_with("https://") && !self.0.starts_with("http://") {
            return Err(ContractViolation::InvalidValue {
                field: "site",
                reason: "must be an http(s) site",
            });
        }
        validate_host("site", &self.0)?;
        Ok(())
    }
}

/// Origins and sites must parse as URLs with a host, so that downstream
/// site derivation cannot fail once a value has passed the contract.
fn validate_host(field: &'static str, text: &str) -> Result<(), ContractViolation> {
    match Url::parse(text) {
        Ok(parsed) if parsed.host_str().is_some() => Ok(()),
        _ => Err(ContractViolation::InvalidValue {
            field,
            reason: "must be a parseable url with a host",
        }),
    }
}
