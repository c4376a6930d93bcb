//! What the probe looks for in the vendor header.

/// A constant one vendor defines as a macro and the other omits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeConstant {
    /// Marker key. Lowercase so the preprocessor never expands it.
    pub key: &'static str,
    pub macro_name: &'static str,
    pub rust_type: &'static str,
}

pub const NATIVE_CONSTANTS: [NativeConstant; 3] = [
    // Heimdal only has it as an enum member of the error table
    NativeConstant {
        key: "kt_name_toolong",
        macro_name: "KRB5_KT_NAME_TOOLONG",
        rust_type: "krb5_error_code",
    },
    // MIT has no fixed prefix buffer
    NativeConstant {
        key: "kt_prefix_max_len",
        macro_name: "KRB5_KT_PREFIX_MAX_LEN",
        rust_type: "c_int",
    },
    NativeConstant {
        key: "tc_supported_ktypes",
        macro_name: "KRB5_TC_SUPPORTED_KTYPES",
        rust_type: "krb5_flags",
    },
];

/// Declared only by Heimdal; its presence marks Heimdal's allocation convention.
pub const HEIMDAL_XFREE_CANARY: &str = "krb5_xfree";

/// Optional vendor APIs whose declarations gate parts of a binding.
pub const OPTIONAL_APIS: [&str; 13] = [
    "krb5_cc_cache_match",
    "krb5_cc_dup",
    "krb5_cc_support_switch",
    "krb5_enctype_to_name",
    "krb5_get_init_creds_opt_set_default_flags",
    "krb5_get_init_creds_opt_set_in_ccache",
    "krb5_get_init_creds_opt_set_out_ccache",
    "krb5_get_init_creds_opt_set_pac_request",
    "krb5_init_secure_context",
    "krb5_kt_dup",
    "krb5_kt_get_full_name",
    "krb5_kt_have_content",
    "krb5_principal_get_realm",
];

/// Every identifier the header scan records when it is declared as a function.
pub fn canaries() -> impl Iterator<Item = &'static str> {
    std::iter::once(HEIMDAL_XFREE_CANARY).chain(OPTIONAL_APIS)
}
