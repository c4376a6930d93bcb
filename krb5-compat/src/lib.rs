//! One krb5 vocabulary over MIT krb5 and Heimdal.
//!
//! Which vendor is installed is decided once, when `krb5-compat-sys` is built. Code using
//! this crate names [`TicketTimes`] and the three constants below without ever branching
//! on the vendor; the constants carry the vendor's own value when it defines one and a
//! documented fallback otherwise.

mod adpi;
pub use adpi::{AdPolicyInfo, AdPolicyProperties, AD_POLICY_INFO_LEN};

pub mod constants;
pub use constants::{
    define_if_absent, ConstantOrigin, KeytabPrefixLimit, RetrieveFlags, KRB5_KT_NAME_TOOLONG, KRB5_KT_PREFIX_MAX_LEN,
    KRB5_TC_SUPPORTED_KTYPES,
};

mod error;
pub use error::Krb5Error;

mod keytab;
pub use keytab::KeytabName;

mod profile;
pub use profile::CompatProfile;

mod strconv;

mod ticket;
pub use ticket::{Krb5TicketTimes, TicketTimes};

mod vendor;
pub use vendor::{Capabilities, Capability, Vendor, VendorSource};

pub use krb5_compat_sys::{krb5_error_code, krb5_flags, krb5_timestamp};

#[cfg(test)]
mod tests;
