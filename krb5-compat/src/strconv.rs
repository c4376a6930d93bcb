use std::ffi::{CStr, CString};

use crate::error::Krb5Error;

pub(crate) fn string_to_c_string(string: &str) -> Result<CString, Krb5Error> {
    Ok(CString::new(string)?)
}

pub(crate) fn c_string_to_string(c_string: &CStr) -> Result<String, Krb5Error> {
    Ok(c_string.to_str()?.to_owned())
}
