use std::os::raw::c_int;

use krb5_compat_sys::{krb5_error_code, krb5_flags, native};

/// Used when the vendor has no `KRB5_KT_NAME_TOOLONG` macro (Heimdal).
pub const FALLBACK_KT_NAME_TOOLONG: krb5_error_code = 1;
/// Used when the vendor has no `KRB5_KT_PREFIX_MAX_LEN` macro (MIT). Means "no limit".
pub const FALLBACK_KT_PREFIX_MAX_LEN: c_int = -1;
/// Used when the vendor has no `KRB5_TC_SUPPORTED_KTYPES` macro (Heimdal). Means the
/// capability is absent.
pub const FALLBACK_TC_SUPPORTED_KTYPES: krb5_flags = 0;

/// The vendor's value if it has one, the fallback otherwise.
pub const fn define_if_absent(native: Option<i32>, fallback: i32) -> i32 {
    match native {
        Some(value) => value,
        None => fallback,
    }
}

/// The three constants as the vendor header defines them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NativeConstants {
    pub kt_name_toolong: Option<krb5_error_code>,
    pub kt_prefix_max_len: Option<c_int>,
    pub tc_supported_ktypes: Option<krb5_flags>,
}

impl NativeConstants {
    pub const fn resolve(&self) -> CompatConstants {
        CompatConstants {
            kt_name_toolong: define_if_absent(self.kt_name_toolong, FALLBACK_KT_NAME_TOOLONG),
            kt_prefix_max_len: define_if_absent(self.kt_prefix_max_len, FALLBACK_KT_PREFIX_MAX_LEN),
            tc_supported_ktypes: define_if_absent(self.tc_supported_ktypes, FALLBACK_TC_SUPPORTED_KTYPES),
        }
    }
}

/// The three constants after fallbacks are applied. Every field is always defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatConstants {
    pub kt_name_toolong: krb5_error_code,
    pub kt_prefix_max_len: c_int,
    pub tc_supported_ktypes: krb5_flags,
}

pub const NATIVE: NativeConstants = NativeConstants {
    kt_name_toolong: native::KRB5_KT_NAME_TOOLONG,
    kt_prefix_max_len: native::KRB5_KT_PREFIX_MAX_LEN,
    tc_supported_ktypes: native::KRB5_TC_SUPPORTED_KTYPES,
};

pub const RESOLVED: CompatConstants = NATIVE.resolve();

/// Error code for a keytab name whose type prefix is too long.
pub const KRB5_KT_NAME_TOOLONG: krb5_error_code = RESOLVED.kt_name_toolong;
/// Longest keytab type prefix, or `-1` when the vendor enforces none. Read it through
/// [`KeytabPrefixLimit`] rather than comparing against it directly.
pub const KRB5_KT_PREFIX_MAX_LEN: c_int = RESOLVED.kt_prefix_max_len;
/// Credential-retrieval flag restricting matches to the context's supported enctypes, or
/// `0` when the vendor cannot do that.
pub const KRB5_TC_SUPPORTED_KTYPES: krb5_flags = RESOLVED.tc_supported_ktypes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantOrigin {
    Vendor,
    Fallback,
}

impl ConstantOrigin {
    pub const fn of(native: Option<i32>) -> ConstantOrigin {
        match native {
            Some(_) => ConstantOrigin::Vendor,
            None => ConstantOrigin::Fallback,
        }
    }
}

/// Name, value and origin of each normalized constant, for diagnostics.
pub fn constant_table() -> [(&'static str, i32, ConstantOrigin); 3] {
    [
        (
            "KRB5_KT_NAME_TOOLONG",
            KRB5_KT_NAME_TOOLONG,
            ConstantOrigin::of(NATIVE.kt_name_toolong),
        ),
        (
            "KRB5_KT_PREFIX_MAX_LEN",
            KRB5_KT_PREFIX_MAX_LEN,
            ConstantOrigin::of(NATIVE.kt_prefix_max_len),
        ),
        (
            "KRB5_TC_SUPPORTED_KTYPES",
            KRB5_TC_SUPPORTED_KTYPES,
            ConstantOrigin::of(NATIVE.tc_supported_ktypes),
        ),
    ]
}

/// [`KRB5_KT_PREFIX_MAX_LEN`] with its sentinel spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeytabPrefixLimit {
    Unlimited,
    /// Prefixes must be strictly shorter than this, leaving room for the terminator in
    /// the vendor's fixed-size buffer.
    Max(usize),
}

impl KeytabPrefixLimit {
    pub fn current() -> KeytabPrefixLimit {
        KeytabPrefixLimit::from_raw(KRB5_KT_PREFIX_MAX_LEN)
    }

    pub fn from_raw(raw: c_int) -> KeytabPrefixLimit {
        match usize::try_from(raw) {
            Ok(limit) => KeytabPrefixLimit::Max(limit),
            Err(_) => KeytabPrefixLimit::Unlimited,
        }
    }

    pub fn allows(&self, prefix: &str) -> bool {
        match self {
            KeytabPrefixLimit::Unlimited => true,
            KeytabPrefixLimit::Max(limit) => prefix.len() < *limit,
        }
    }
}

/// Flags for matching credentials in a cache, as passed to `krb5_cc_retrieve_cred`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RetrieveFlags(krb5_flags);

impl RetrieveFlags {
    pub fn new(bits: krb5_flags) -> RetrieveFlags {
        RetrieveFlags(bits)
    }

    pub fn bits(&self) -> krb5_flags {
        self.0
    }

    /// Restricts matches to supported enctypes. Returns `false`, leaving the flags
    /// unchanged, when the vendor has no such flag.
    pub fn with_supported_ktypes(&mut self) -> bool {
        self.with_flag(KRB5_TC_SUPPORTED_KTYPES)
    }

    pub(crate) fn with_flag(&mut self, flag: krb5_flags) -> bool {
        if flag == 0 {
            return false;
        }
        self.0 |= flag;
        true
    }
}
