//! Build-time probing of the installed Kerberos 5 implementation.
//!
//! MIT krb5 and Heimdal disagree on a handful of names and constants. The probe runs
//! `<krb5.h>` through the C preprocessor, records which of those the vendor defines and
//! which optional APIs it declares, and renders the answers as Rust constants for the
//! `krb5-compat-sys` crate to include.

mod args;
pub use args::{split_args, CompilerArgs, LinkArgs};

mod catalog;
pub use catalog::{canaries, NativeConstant, HEIMDAL_XFREE_CANARY, NATIVE_CONSTANTS, OPTIONAL_APIS};

mod codegen;
pub use codegen::{write_if_changed, NativeTable, NATIVE_FILE};

mod config;
pub use config::BuildConfig;

mod error;
pub use error::ProbeError;

mod literal;
pub use literal::{parse_c_int, parse_c_integer};

mod probe;
pub use probe::{probe_source, Probe, ProbeReport, SystemToolchain, Toolchain, PROBE_FILE};

mod scan;
pub use scan::{scan_expanded, HeaderScan, MARKER};

mod vendor;
pub use vendor::{Vendor, VendorEvidence, VendorSource};
