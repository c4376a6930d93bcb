//! Raw vendor types for MIT krb5 and Heimdal, and the constants probed from the vendor
//! header at build time.
//!
//! The build script decides which vendor is installed. When it is Heimdal (whose
//! allocation convention is marked by `krb5_xfree`), the `krb5_heimdal_xfree` cfg is set
//! and [`krb5_compat_ticket_times`] names Heimdal's `krb5_times`; otherwise it names MIT's
//! `krb5_ticket_times`.

#![allow(non_camel_case_types)]

use std::os::raw::c_int;

pub type krb5_int32 = i32;
pub type krb5_error_code = krb5_int32;
pub type krb5_flags = krb5_int32;

/// MIT krb5 layouts.
pub mod mit {
    pub type krb5_timestamp = super::krb5_int32;

    #[repr(C)]
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct krb5_ticket_times {
        pub authtime: krb5_timestamp,
        pub starttime: krb5_timestamp,
        pub endtime: krb5_timestamp,
        pub renew_till: krb5_timestamp,
    }
}

/// Heimdal layouts.
pub mod heimdal {
    pub type krb5_timestamp = libc::time_t;

    #[repr(C)]
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct krb5_times {
        pub authtime: krb5_timestamp,
        pub starttime: krb5_timestamp,
        pub endtime: krb5_timestamp,
        pub renew_till: krb5_timestamp,
    }
}

pub use heimdal::krb5_times;
pub use mit::krb5_ticket_times;

#[cfg(krb5_heimdal_xfree)]
pub type krb5_compat_ticket_times = krb5_times;
#[cfg(not(krb5_heimdal_xfree))]
pub type krb5_compat_ticket_times = krb5_ticket_times;

#[cfg(krb5_heimdal_xfree)]
pub type krb5_timestamp = heimdal::krb5_timestamp;
#[cfg(not(krb5_heimdal_xfree))]
pub type krb5_timestamp = mit::krb5_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Mit,
    Heimdal,
}

/// How the build script settled on [`native::VENDOR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorSource {
    /// `KRB5_VENDOR`
    Environment,
    /// the `mit` or `heimdal` cargo feature
    Feature,
    /// `krb5_xfree` declared (or not) by `<krb5.h>`
    Header,
    /// `krb5-config --vendor`
    Krb5Config,
    PlatformDefault,
}

/// Build-time probe results. A constant is `None` when the vendor header does not define
/// it as a macro, or when the header could not be probed (see `HEADER_PROBED`).
pub mod native {
    #[allow(unused_imports)]
    use super::{c_int, krb5_error_code, krb5_flags, Vendor, VendorSource};

    include!(concat!(env!("OUT_DIR"), "/native.rs"));
}

pub use native::{DECLARED_APIS, HEADER_PROBED, HEIMDAL_XFREE, VENDOR, VENDOR_SOURCE};
