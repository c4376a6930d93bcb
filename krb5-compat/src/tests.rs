use std::any::TypeId;
use std::ffi::CString;

use krb5_compat_sys::{krb5_ticket_times, krb5_times, native};
use static_assertions::{assert_eq_size, const_assert, const_assert_eq};

use crate::constants::{
    CompatConstants, NativeConstants, FALLBACK_KT_NAME_TOOLONG, FALLBACK_KT_PREFIX_MAX_LEN,
    FALLBACK_TC_SUPPORTED_KTYPES, NATIVE, RESOLVED,
};
use crate::*;

const_assert!(std::mem::size_of::<TicketTimes>() == 4 * std::mem::size_of::<krb5_timestamp>());
assert_eq_size!(krb5_error_code, krb5_flags);
const_assert_eq!(FALLBACK_KT_NAME_TOOLONG, 1);
const_assert_eq!(FALLBACK_KT_PREFIX_MAX_LEN, -1);
const_assert_eq!(FALLBACK_TC_SUPPORTED_KTYPES, 0);
const_assert_eq!(define_if_absent(Some(30), FALLBACK_KT_PREFIX_MAX_LEN), 30);
const_assert_eq!(define_if_absent(None, FALLBACK_KT_PREFIX_MAX_LEN), -1);

const MIT_NATIVES: NativeConstants = NativeConstants {
    kt_name_toolong: Some(-1765328171),
    kt_prefix_max_len: None,
    tc_supported_ktypes: Some(0x0000_0200),
};

const HEIMDAL_NATIVES: NativeConstants = NativeConstants {
    kt_name_toolong: None,
    kt_prefix_max_len: Some(30),
    tc_supported_ktypes: None,
};

#[test]
fn fallback_values() {
    assert_eq!(FALLBACK_KT_NAME_TOOLONG, 1);
    assert_eq!(FALLBACK_KT_PREFIX_MAX_LEN, -1);
    assert_eq!(FALLBACK_TC_SUPPORTED_KTYPES, 0);
}

#[test]
fn define_if_absent_prefers_vendor_value() {
    assert_eq!(define_if_absent(Some(30), -1), 30);
    assert_eq!(define_if_absent(Some(0), 1), 0);
    assert_eq!(define_if_absent(None, -1), -1);
}

#[test]
fn mit_configuration_resolves() {
    assert_eq!(
        MIT_NATIVES.resolve(),
        CompatConstants {
            kt_name_toolong: -1765328171,
            kt_prefix_max_len: -1,
            tc_supported_ktypes: 0x200,
        }
    );
}

#[test]
fn heimdal_configuration_resolves() {
    assert_eq!(
        HEIMDAL_NATIVES.resolve(),
        CompatConstants {
            kt_name_toolong: 1,
            kt_prefix_max_len: 30,
            tc_supported_ktypes: 0,
        }
    );
}

#[test]
fn nothing_native_resolves_to_fallbacks() {
    assert_eq!(
        NativeConstants::default().resolve(),
        CompatConstants {
            kt_name_toolong: 1,
            kt_prefix_max_len: -1,
            tc_supported_ktypes: 0,
        }
    );
}

#[test]
fn resolution_is_idempotent() {
    assert_eq!(NATIVE.resolve(), NATIVE.resolve());
    assert_eq!(NATIVE.resolve(), RESOLVED);
}

#[test]
fn built_constants_never_override_the_vendor() {
    let pairs = [
        (native::KRB5_KT_NAME_TOOLONG, KRB5_KT_NAME_TOOLONG, FALLBACK_KT_NAME_TOOLONG),
        (native::KRB5_KT_PREFIX_MAX_LEN, KRB5_KT_PREFIX_MAX_LEN, FALLBACK_KT_PREFIX_MAX_LEN),
        (native::KRB5_TC_SUPPORTED_KTYPES, KRB5_TC_SUPPORTED_KTYPES, FALLBACK_TC_SUPPORTED_KTYPES),
    ];

    for (native, resolved, fallback) in pairs {
        match native {
            Some(value) => assert_eq!(resolved, value),
            None => assert_eq!(resolved, fallback),
        }
    }
}

#[test]
fn constant_origins_follow_natives() {
    for ((name, value, origin), native) in constants::constant_table().into_iter().zip([
        native::KRB5_KT_NAME_TOOLONG,
        native::KRB5_KT_PREFIX_MAX_LEN,
        native::KRB5_TC_SUPPORTED_KTYPES,
    ]) {
        assert_eq!(origin, ConstantOrigin::of(native), "{name}");
        if let Some(native) = native {
            assert_eq!(value, native, "{name}");
        }
    }
}

#[test]
fn ticket_times_alias_matches_the_build_flag() {
    let alias = TypeId::of::<TicketTimes>();
    if krb5_compat_sys::HEIMDAL_XFREE {
        assert_eq!(alias, TypeId::of::<krb5_times>());
    } else {
        assert_eq!(alias, TypeId::of::<krb5_ticket_times>());
    }
}

#[test]
fn ticket_times_view_round_trip() {
    let raw = TicketTimes {
        authtime: 1_700_000_000,
        starttime: 0,
        endtime: 1_700_036_000,
        renew_till: 1_700_604_800,
    };
    let times = Krb5TicketTimes::from(&raw);

    assert_eq!(times.effective_start(), 1_700_000_000);
    assert_eq!(times.lifetime().as_secs(), 36_000);
    assert!(times.is_renewable());
    assert!(!times.is_expired_at(1_700_000_001));
    assert!(times.is_expired_at(1_700_036_000));
    assert_eq!(times.to_raw(), Some(raw));
}

#[test]
fn ticket_times_lifetime_never_negative() {
    let times = Krb5TicketTimes {
        authtime: 100,
        starttime: 200,
        endtime: 150,
        renew_till: 0,
    };
    assert_eq!(times.lifetime().as_secs(), 0);
    assert!(!times.is_renewable());
}

#[test]
fn ticket_times_out_of_range_for_mit() {
    let times = Krb5TicketTimes {
        authtime: i64::from(i32::MAX) + 1,
        ..Krb5TicketTimes::default()
    };
    if krb5_compat_sys::HEIMDAL_XFREE && std::mem::size_of::<krb5_timestamp>() == 8 {
        assert!(times.to_raw().is_some());
    } else {
        assert!(times.to_raw().is_none());
    }
}

#[test]
fn keytab_prefix_limit_sentinel() {
    assert_eq!(KeytabPrefixLimit::from_raw(-1), KeytabPrefixLimit::Unlimited);
    assert_eq!(KeytabPrefixLimit::from_raw(30), KeytabPrefixLimit::Max(30));
    assert!(KeytabPrefixLimit::Unlimited.allows(&"X".repeat(1000)));
    assert!(KeytabPrefixLimit::Max(30).allows(&"X".repeat(29)));
    assert!(!KeytabPrefixLimit::Max(30).allows(&"X".repeat(30)));
    assert_eq!(KeytabPrefixLimit::current(), KeytabPrefixLimit::from_raw(KRB5_KT_PREFIX_MAX_LEN));
}

#[test]
fn retrieve_flags_only_set_when_supported() {
    let mut flags = RetrieveFlags::new(0x1);
    assert!(!flags.with_flag(0));
    assert_eq!(flags.bits(), 0x1);

    assert!(flags.with_flag(0x200));
    assert_eq!(flags.bits(), 0x201);

    let mut flags = RetrieveFlags::default();
    assert_eq!(flags.with_supported_ktypes(), KRB5_TC_SUPPORTED_KTYPES != 0);
    assert_eq!(flags.bits(), KRB5_TC_SUPPORTED_KTYPES);
}

#[test]
fn keytab_name_with_prefix() {
    let name = KeytabName::parse_with_limit("MEMORY:test", KeytabPrefixLimit::Unlimited).unwrap();
    assert_eq!(name.kt_type(), "MEMORY");
    assert_eq!(name.residual(), "test");
    assert_eq!(name.full_name(), "MEMORY:test");
    assert_eq!(name.to_string(), "MEMORY:test");
}

#[test]
fn keytab_name_defaults_to_file() {
    for raw in ["/etc/krb5.keytab", "/tmp/odd:name", "C:\\krb5.keytab", "relative.keytab"] {
        let name = KeytabName::parse_with_limit(raw, KeytabPrefixLimit::Max(30)).unwrap();
        assert_eq!(name.kt_type(), "FILE", "{raw}");
        assert_eq!(name.residual(), raw);
        assert_eq!(name.full_name(), format!("FILE:{raw}"));
    }
}

#[test]
fn keytab_name_vendor_spelling() {
    let name = KeytabName::parse_with_limit("FILE:/tmp/keytab", KeytabPrefixLimit::Unlimited).unwrap();
    assert_eq!(name.vendor_name(Vendor::Mit), "FILE:/tmp/keytab");
    assert_eq!(name.vendor_name(Vendor::Heimdal), "/tmp/keytab");
}

#[test]
fn keytab_prefix_too_long() {
    let long = format!("{}:residual", "P".repeat(30));
    let error = KeytabName::parse_with_limit(&long, KeytabPrefixLimit::Max(30)).unwrap_err();

    assert!(matches!(error, Krb5Error::KeytabNameTooLong { limit: 30, .. }));
    assert_eq!(error.code(), Some(KRB5_KT_NAME_TOOLONG));

    assert!(KeytabName::parse_with_limit(&long, KeytabPrefixLimit::Unlimited).is_ok());
}

#[test]
fn keytab_name_empty_type() {
    for limit in [KeytabPrefixLimit::Unlimited, KeytabPrefixLimit::Max(30)] {
        let error = KeytabName::parse_with_limit(":foo", limit).unwrap_err();
        assert!(matches!(error, Krb5Error::EmptyKeytabType(ref name) if name == ":foo"));
        assert_eq!(error.code(), None);
    }
}

#[test]
fn keytab_name_empty_and_nul() {
    assert!(matches!(KeytabName::parse(""), Err(Krb5Error::EmptyKeytabName)));

    let name = KeytabName::parse_with_limit("FILE:a\0b", KeytabPrefixLimit::Unlimited).unwrap();
    assert!(matches!(name.to_c_string(), Err(Krb5Error::Nul(_))));
}

#[test]
fn keytab_name_from_c_str() {
    let raw = CString::new("FILE:/var/kt").unwrap();
    let name = KeytabName::from_c_str(&raw).unwrap();
    assert_eq!(name.residual(), "/var/kt");
    assert_eq!(name.to_c_string().unwrap(), raw);
}

#[test]
fn capabilities_from_symbols() {
    let caps = Capabilities::from_symbols(["krb5_kt_dup", "krb5_xfree", "not_a_canary"]);
    assert!(caps.contains(Capability::KtDup));
    assert!(caps.contains(Capability::Xfree));
    assert!(!caps.contains(Capability::CcDup));
    assert_eq!(caps.len(), 2);
    assert_eq!(caps.iter().collect::<Vec<_>>(), vec![Capability::KtDup, Capability::Xfree]);
    assert!(Capabilities::default().is_empty());
}

#[test]
fn capability_symbols_are_distinct() {
    for capability in Capability::ALL {
        assert_eq!(Capability::from_symbol(capability.symbol()), Some(capability));
    }
}

#[test]
fn detected_capabilities_follow_the_probe() {
    let detected = Capabilities::detected();
    for capability in Capability::ALL {
        assert_eq!(
            detected.contains(capability),
            krb5_compat_sys::DECLARED_APIS.contains(&capability.symbol()),
            "{capability}"
        );
    }
}

#[test]
fn profile_is_computed_once() {
    let first = CompatProfile::get();
    let second = CompatProfile::get();
    assert!(std::ptr::eq(first, second));
    assert_eq!(first.vendor, krb5_compat_sys::VENDOR);
    assert_eq!(first.heimdal_xfree, first.vendor == Vendor::Heimdal);
    assert_eq!(first.supports_ktype_matching(), KRB5_TC_SUPPORTED_KTYPES != 0);
    assert_eq!(first.keytab_prefix_limit(), KeytabPrefixLimit::current());
}

#[test]
fn ad_policy_info_decodes() {
    let mut data = vec![0x00, 0x00];
    data.extend_from_slice(&7u32.to_be_bytes());
    data.extend_from_slice(&24u32.to_be_bytes());
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(&(42 * 86_400 * 10_000_000u64).to_be_bytes());
    data.extend_from_slice(&(86_400 * 10_000_000u64).to_be_bytes());

    let info = AdPolicyInfo::from_bytes(&data).unwrap();
    assert_eq!(info.min_length, 7);
    assert_eq!(info.history, 24);
    assert!(info.properties.contains(AdPolicyProperties::COMPLEX));
    assert!(!info.properties.contains(AdPolicyProperties::REFUSE_CHANGE));
    assert_eq!(info.max_age_duration().as_secs(), 42 * 86_400);
    assert_eq!(info.min_age_duration().as_secs(), 86_400);
    assert_eq!(info.to_bytes(), data);
}

#[test]
fn ad_policy_info_rejects_bad_input() {
    assert!(matches!(
        AdPolicyInfo::from_bytes(&[0u8; 29]),
        Err(Krb5Error::PolicyInfoLength { expected: 30, actual: 29 })
    ));

    let mut data = [0u8; AD_POLICY_INFO_LEN];
    data[1] = 0x01;
    assert!(matches!(
        AdPolicyInfo::from_bytes(&data),
        Err(Krb5Error::PolicyInfoSignature(0x0001))
    ));
}

#[test]
fn ad_policy_properties_combine() {
    let props = AdPolicyProperties::COMPLEX | AdPolicyProperties::LOCKOUT_ADMINS;
    assert_eq!(props.bits(), 0x9);
    assert!(props.contains(AdPolicyProperties::LOCKOUT_ADMINS));
    assert!(!props.contains(AdPolicyProperties::COMPLEX | AdPolicyProperties::NO_ANON_CHANGE));
}
