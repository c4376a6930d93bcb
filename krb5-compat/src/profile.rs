use lazy_static::lazy_static;
use tracing::{debug, warn};

use crate::constants::{constant_table, ConstantOrigin, KeytabPrefixLimit, KRB5_TC_SUPPORTED_KTYPES};
use crate::vendor::{Capabilities, Capability, Vendor, VendorSource};

lazy_static! {
    static ref PROFILE: CompatProfile = CompatProfile::detect();
}

/// What this build of the shim resolved to. Computed once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatProfile {
    pub vendor: Vendor,
    pub vendor_source: VendorSource,
    pub heimdal_xfree: bool,
    pub header_probed: bool,
    pub capabilities: Capabilities,
    pub constants: [(&'static str, i32, ConstantOrigin); 3],
}

impl CompatProfile {
    pub fn get() -> &'static CompatProfile {
        &PROFILE
    }

    fn detect() -> CompatProfile {
        let profile = CompatProfile {
            vendor: krb5_compat_sys::VENDOR,
            vendor_source: krb5_compat_sys::VENDOR_SOURCE,
            heimdal_xfree: krb5_compat_sys::HEIMDAL_XFREE,
            header_probed: krb5_compat_sys::HEADER_PROBED,
            capabilities: Capabilities::detected(),
            constants: constant_table(),
        };

        debug!(
            vendor = ?profile.vendor,
            source = ?profile.vendor_source,
            heimdal_xfree = profile.heimdal_xfree,
            capabilities = profile.capabilities.len(),
            "resolved krb5 vendor"
        );
        for (name, value, origin) in &profile.constants {
            debug!(constant = *name, value = *value, origin = ?origin, "krb5 constant");
        }
        if !profile.header_probed {
            warn!("krb5 header was not probed at build time, all constants use their fallbacks");
        }

        profile
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn keytab_prefix_limit(&self) -> KeytabPrefixLimit {
        KeytabPrefixLimit::current()
    }

    pub fn supports_ktype_matching(&self) -> bool {
        KRB5_TC_SUPPORTED_KTYPES != 0
    }
}
