use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use crate::catalog::NATIVE_CONSTANTS;
use crate::error::ProbeError;
use crate::vendor::{Vendor, VendorSource};

pub const NATIVE_FILE: &str = "native.rs";

/// Everything the sys crate learns at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeTable {
    pub vendor: Vendor,
    pub vendor_source: VendorSource,
    pub heimdal_xfree: bool,
    pub header_probed: bool,
    /// One entry per [`NATIVE_CONSTANTS`] entry, in the same order.
    pub natives: Vec<Option<i32>>,
    pub declared_apis: BTreeSet<String>,
}

impl NativeTable {
    /// Rust source for `include!`. It expects `Vendor`, `VendorSource`, `c_int`,
    /// `krb5_error_code` and `krb5_flags` to be in scope.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("// @generated by krb5-compat-build, do not edit.\n\n");
        let _ = writeln!(out, "pub const VENDOR: Vendor = Vendor::{};", self.vendor.variant());
        let _ = writeln!(
            out,
            "pub const VENDOR_SOURCE: VendorSource = VendorSource::{};",
            self.vendor_source.variant()
        );
        let _ = writeln!(out, "pub const HEIMDAL_XFREE: bool = {};", self.heimdal_xfree);
        let _ = writeln!(out, "pub const HEADER_PROBED: bool = {};", self.header_probed);
        out.push('\n');

        for (constant, native) in NATIVE_CONSTANTS.iter().zip(&self.natives) {
            let value = match native {
                Some(value) => format!("Some({value})"),
                None => "None".to_string(),
            };
            let _ = writeln!(
                out,
                "pub const {}: Option<{}> = {};",
                constant.macro_name, constant.rust_type, value
            );
        }
        out.push('\n');

        out.push_str("pub const DECLARED_APIS: &[&str] = &[");
        for api in &self.declared_apis {
            let _ = write!(out, "\n    {api:?},");
        }
        if !self.declared_apis.is_empty() {
            out.push('\n');
        }
        out.push_str("];\n");

        out
    }
}

/// Writes `contents` unless the file already holds exactly that, so unchanged probes do not
/// touch the mtime. Returns whether the file was written.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<bool, ProbeError> {
    match fs::read_to_string(path) {
        Ok(existing) if existing == contents => return Ok(false),
        Ok(_) => {},
        Err(error) if error.kind() == io::ErrorKind::NotFound => {},
        Err(error) => return Err(error.into()),
    }

    fs::write(path, contents)?;
    Ok(true)
}
