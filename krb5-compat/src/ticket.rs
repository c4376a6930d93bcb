use std::time::Duration;

use krb5_compat_sys::{krb5_compat_ticket_times, krb5_timestamp};

/// The vendor's ticket validity structure: Heimdal's `krb5_times` or MIT's
/// `krb5_ticket_times`, whichever the build detected.
pub type TicketTimes = krb5_compat_ticket_times;

/// Vendor-independent copy of a ticket's validity window, in seconds since the epoch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Krb5TicketTimes {
    pub authtime: i64,
    pub starttime: i64,
    pub endtime: i64,
    pub renew_till: i64,
}

impl Krb5TicketTimes {
    pub fn from_raw(raw: &TicketTimes) -> Krb5TicketTimes {
        Krb5TicketTimes {
            authtime: i64::from(raw.authtime),
            starttime: i64::from(raw.starttime),
            endtime: i64::from(raw.endtime),
            renew_till: i64::from(raw.renew_till),
        }
    }

    /// `None` if a timestamp does not fit the vendor's `krb5_timestamp`.
    pub fn to_raw(&self) -> Option<TicketTimes> {
        Some(TicketTimes {
            authtime: krb5_timestamp::try_from(self.authtime).ok()?,
            starttime: krb5_timestamp::try_from(self.starttime).ok()?,
            endtime: krb5_timestamp::try_from(self.endtime).ok()?,
            renew_till: krb5_timestamp::try_from(self.renew_till).ok()?,
        })
    }

    /// A zero start time means the ticket is valid from its authentication time.
    pub fn effective_start(&self) -> i64 {
        if self.starttime == 0 {
            self.authtime
        } else {
            self.starttime
        }
    }

    pub fn lifetime(&self) -> Duration {
        let seconds = self.endtime.saturating_sub(self.effective_start());
        Duration::from_secs(u64::try_from(seconds).unwrap_or(0))
    }

    pub fn is_renewable(&self) -> bool {
        self.renew_till > self.endtime
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.endtime
    }
}

impl From<&TicketTimes> for Krb5TicketTimes {
    fn from(raw: &TicketTimes) -> Self {
        Krb5TicketTimes::from_raw(raw)
    }
}
