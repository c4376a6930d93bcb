use std::ffi::NulError;
use std::str::Utf8Error;

use krb5_compat_sys::krb5_error_code;
use thiserror::Error;

use crate::constants::KRB5_KT_NAME_TOOLONG;

#[derive(Debug, Error)]
pub enum Krb5Error {
    #[error("keytab type prefix {prefix:?} is too long, the limit is {limit} bytes")]
    KeytabNameTooLong { prefix: String, limit: usize },

    #[error("keytab name is empty")]
    EmptyKeytabName,

    #[error("keytab name {0:?} has an empty type prefix")]
    EmptyKeytabType(String),

    #[error("AD policy info must be {expected} bytes, got {actual}")]
    PolicyInfoLength { expected: usize, actual: usize },

    #[error("AD policy info has signature {0:#06x}, expected 0x0000")]
    PolicyInfoSignature(u16),

    #[error("string contains an interior NUL byte")]
    Nul(#[from] NulError),

    #[error("string is not valid UTF-8")]
    Utf8(#[from] Utf8Error),
}

impl Krb5Error {
    /// The Kerberos error code a vendor library would have returned, if any.
    pub fn code(&self) -> Option<krb5_error_code> {
        match self {
            Krb5Error::KeytabNameTooLong { .. } => Some(KRB5_KT_NAME_TOOLONG),
            _ => None,
        }
    }
}
