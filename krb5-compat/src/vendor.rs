use std::fmt;

pub use krb5_compat_sys::{Vendor, VendorSource};

/// Optional vendor APIs. Which ones exist depends on the vendor and its version; the build
/// probe records the ones `<krb5.h>` declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    CcCacheMatch,
    CcDup,
    CcSupportSwitch,
    EnctypeToName,
    InitCredsOptSetDefaultFlags,
    InitCredsOptSetInCcache,
    InitCredsOptSetOutCcache,
    InitCredsOptSetPacRequest,
    InitSecureContext,
    KtDup,
    KtGetFullName,
    KtHaveContent,
    PrincipalGetRealm,
    /// `krb5_xfree`, Heimdal's allocation convention.
    Xfree,
}

impl Capability {
    pub const ALL: [Capability; 14] = [
        Capability::CcCacheMatch,
        Capability::CcDup,
        Capability::CcSupportSwitch,
        Capability::EnctypeToName,
        Capability::InitCredsOptSetDefaultFlags,
        Capability::InitCredsOptSetInCcache,
        Capability::InitCredsOptSetOutCcache,
        Capability::InitCredsOptSetPacRequest,
        Capability::InitSecureContext,
        Capability::KtDup,
        Capability::KtGetFullName,
        Capability::KtHaveContent,
        Capability::PrincipalGetRealm,
        Capability::Xfree,
    ];

    /// The C function whose declaration signals the capability.
    pub fn symbol(&self) -> &'static str {
        match self {
            Capability::CcCacheMatch => "krb5_cc_cache_match",
            Capability::CcDup => "krb5_cc_dup",
            Capability::CcSupportSwitch => "krb5_cc_support_switch",
            Capability::EnctypeToName => "krb5_enctype_to_name",
            Capability::InitCredsOptSetDefaultFlags => "krb5_get_init_creds_opt_set_default_flags",
            Capability::InitCredsOptSetInCcache => "krb5_get_init_creds_opt_set_in_ccache",
            Capability::InitCredsOptSetOutCcache => "krb5_get_init_creds_opt_set_out_ccache",
            Capability::InitCredsOptSetPacRequest => "krb5_get_init_creds_opt_set_pac_request",
            Capability::InitSecureContext => "krb5_init_secure_context",
            Capability::KtDup => "krb5_kt_dup",
            Capability::KtGetFullName => "krb5_kt_get_full_name",
            Capability::KtHaveContent => "krb5_kt_have_content",
            Capability::PrincipalGetRealm => "krb5_principal_get_realm",
            Capability::Xfree => "krb5_xfree",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Capability> {
        Capability::ALL.into_iter().find(|capability| capability.symbol() == symbol)
    }

    fn bit(&self) -> u32 {
        1 << (*self as u32)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A set of [`Capability`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Capabilities(u32);

impl Capabilities {
    /// What the build probe found. Unknown symbols are ignored.
    pub fn detected() -> Capabilities {
        Capabilities::from_symbols(krb5_compat_sys::DECLARED_APIS.iter().copied())
    }

    pub fn from_symbols<'a>(symbols: impl IntoIterator<Item = &'a str>) -> Capabilities {
        symbols
            .into_iter()
            .filter_map(Capability::from_symbol)
            .fold(Capabilities::default(), |set, capability| set.with(capability))
    }

    pub fn with(self, capability: Capability) -> Capabilities {
        Capabilities(self.0 | capability.bit())
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(move |capability| self.contains(*capability))
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
