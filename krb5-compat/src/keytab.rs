use std::ffi::{CStr, CString};
use std::fmt;
use std::str::FromStr;

use crate::constants::KeytabPrefixLimit;
use crate::error::Krb5Error;
use crate::strconv::{c_string_to_string, string_to_c_string};
use crate::vendor::Vendor;

/// A keytab name as given to `krb5_kt_resolve`, split into its type and residual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeytabName {
    kt_type: String,
    residual: String,
}

impl KeytabName {
    pub const DEFAULT_TYPE: &'static str = "FILE";

    pub fn parse(name: &str) -> Result<KeytabName, Krb5Error> {
        KeytabName::parse_with_limit(name, KeytabPrefixLimit::current())
    }

    /// No colon, a single-letter prefix (a drive letter) and absolute paths all name a
    /// `FILE` keytab with the whole string as residual.
    pub fn parse_with_limit(name: &str, limit: KeytabPrefixLimit) -> Result<KeytabName, Krb5Error> {
        if name.is_empty() {
            return Err(Krb5Error::EmptyKeytabName);
        }

        let split = match name.split_once(':') {
            None => None,
            Some((prefix, _)) if prefix.len() == 1 && prefix.chars().all(|c| c.is_ascii_alphabetic()) => None,
            Some(_) if name.starts_with('/') => None,
            Some(split) => Some(split),
        };

        let Some((prefix, residual)) = split else {
            return Ok(KeytabName {
                kt_type: KeytabName::DEFAULT_TYPE.to_string(),
                residual: name.to_string(),
            });
        };

        if prefix.is_empty() {
            return Err(Krb5Error::EmptyKeytabType(name.to_string()));
        }

        if let KeytabPrefixLimit::Max(max) = limit {
            if !limit.allows(prefix) {
                return Err(Krb5Error::KeytabNameTooLong {
                    prefix: prefix.to_string(),
                    limit: max,
                });
            }
        }

        Ok(KeytabName {
            kt_type: prefix.to_string(),
            residual: residual.to_string(),
        })
    }

    pub fn from_c_str(name: &CStr) -> Result<KeytabName, Krb5Error> {
        KeytabName::parse(&c_string_to_string(name)?)
    }

    pub fn kt_type(&self) -> &str {
        &self.kt_type
    }

    pub fn residual(&self) -> &str {
        &self.residual
    }

    /// `TYPE:residual`, what Heimdal's `krb5_kt_get_full_name` returns. MIT has no such
    /// function; this is the equivalent.
    pub fn full_name(&self) -> String {
        format!("{}:{}", self.kt_type, self.residual)
    }

    /// What `krb5_kt_get_name` reports for this keytab: MIT includes the type, Heimdal
    /// only the residual.
    pub fn vendor_name(&self, vendor: Vendor) -> String {
        match vendor {
            Vendor::Mit => self.full_name(),
            Vendor::Heimdal => self.residual.clone(),
        }
    }

    pub fn to_c_string(&self) -> Result<CString, Krb5Error> {
        string_to_c_string(&self.full_name())
    }
}

impl fmt::Display for KeytabName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kt_type, self.residual)
    }
}

impl FromStr for KeytabName {
    type Err = Krb5Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        KeytabName::parse(name)
    }
}
