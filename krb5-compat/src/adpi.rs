//! Active Directory password policy, returned as the `server_response` of a failed
//! password change against a Windows KDC.

use std::time::Duration;

use nom::error::ErrorKind;
use nom::number::complete::{be_u16, be_u32, be_u64};
use nom::sequence::tuple;

use crate::error::Krb5Error;

pub const AD_POLICY_INFO_LEN: usize = 30;

const TICKS_PER_SECOND: u64 = 10_000_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AdPolicyProperties(u32);

impl AdPolicyProperties {
    /// Passwords need character variety and must not contain the account name.
    pub const COMPLEX: AdPolicyProperties = AdPolicyProperties(0x0000_0001);
    pub const NO_ANON_CHANGE: AdPolicyProperties = AdPolicyProperties(0x0000_0002);
    pub const NO_CLEAR_CHANGE: AdPolicyProperties = AdPolicyProperties(0x0000_0004);
    pub const LOCKOUT_ADMINS: AdPolicyProperties = AdPolicyProperties(0x0000_0008);
    pub const STORE_CLEARTEXT: AdPolicyProperties = AdPolicyProperties(0x0000_0010);
    pub const REFUSE_CHANGE: AdPolicyProperties = AdPolicyProperties(0x0000_0020);

    pub fn from_bits(bits: u32) -> AdPolicyProperties {
        AdPolicyProperties(bits)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn contains(&self, other: AdPolicyProperties) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for AdPolicyProperties {
    type Output = AdPolicyProperties;

    fn bitor(self, rhs: Self) -> Self::Output {
        AdPolicyProperties(self.0 | rhs.0)
    }
}

/// Ages are in 100ns units, as AD stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdPolicyInfo {
    pub properties: AdPolicyProperties,
    pub min_length: u32,
    pub history: u32,
    pub max_age: u64,
    pub min_age: u64,
}

impl AdPolicyInfo {
    pub fn from_bytes(data: &[u8]) -> Result<AdPolicyInfo, Krb5Error> {
        if data.len() != AD_POLICY_INFO_LEN {
            return Err(Krb5Error::PolicyInfoLength {
                expected: AD_POLICY_INFO_LEN,
                actual: data.len(),
            });
        }

        let mut parse_policy =
            tuple::<&[u8], _, (&[u8], ErrorKind), _>((be_u16, be_u32, be_u32, be_u32, be_u64, be_u64));
        let (_, (signature, min_length, history, properties, max_age, min_age)) =
            parse_policy(data).map_err(|_| Krb5Error::PolicyInfoLength {
                expected: AD_POLICY_INFO_LEN,
                actual: data.len(),
            })?;

        if signature != 0 {
            return Err(Krb5Error::PolicyInfoSignature(signature));
        }

        Ok(AdPolicyInfo {
            properties: AdPolicyProperties::from_bits(properties),
            min_length,
            history,
            max_age,
            min_age,
        })
    }

    /// The wire form, e.g. for handing back to MIT's `krb5_chpw_message`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(AD_POLICY_INFO_LEN);
        bytes.extend_from_slice(&0u16.to_be_bytes());
        bytes.extend_from_slice(&self.min_length.to_be_bytes());
        bytes.extend_from_slice(&self.history.to_be_bytes());
        bytes.extend_from_slice(&self.properties.bits().to_be_bytes());
        bytes.extend_from_slice(&self.max_age.to_be_bytes());
        bytes.extend_from_slice(&self.min_age.to_be_bytes());
        bytes
    }

    pub fn max_age_duration(&self) -> Duration {
        ticks_to_duration(self.max_age)
    }

    pub fn min_age_duration(&self) -> Duration {
        ticks_to_duration(self.min_age)
    }
}

fn ticks_to_duration(ticks: u64) -> Duration {
    Duration::new(ticks / TICKS_PER_SECOND, ((ticks % TICKS_PER_SECOND) * 100) as u32)
}
