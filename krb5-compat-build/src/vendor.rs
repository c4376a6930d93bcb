use std::fmt;

use crate::error::ProbeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Mit,
    Heimdal,
}

impl Vendor {
    /// Parses the value of `KRB5_VENDOR`.
    pub fn from_name(name: &str) -> Result<Vendor, ProbeError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mit" => Ok(Vendor::Mit),
            "heimdal" => Ok(Vendor::Heimdal),
            _ => Err(ProbeError::InvalidVendor(name.to_string())),
        }
    }

    /// Interprets the output of `krb5-config --vendor`.
    pub fn from_krb5_config(output: &str) -> Option<Vendor> {
        let output = output.trim();
        if output.contains("Massachusetts Institute of Technology") || output == "MIT" {
            Some(Vendor::Mit)
        } else if output.to_ascii_lowercase().contains("heimdal") {
            Some(Vendor::Heimdal)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Mit => "mit",
            Vendor::Heimdal => "heimdal",
        }
    }

    pub(crate) fn variant(&self) -> &'static str {
        match self {
            Vendor::Mit => "Mit",
            Vendor::Heimdal => "Heimdal",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the resolved vendor came from, in order of precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorSource {
    Environment,
    Feature,
    Header,
    Krb5Config,
    PlatformDefault,
}

impl VendorSource {
    pub(crate) fn variant(&self) -> &'static str {
        match self {
            VendorSource::Environment => "Environment",
            VendorSource::Feature => "Feature",
            VendorSource::Header => "Header",
            VendorSource::Krb5Config => "Krb5Config",
            VendorSource::PlatformDefault => "PlatformDefault",
        }
    }
}

/// Everything known about the vendor before a decision is made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VendorEvidence {
    pub environment: Option<Vendor>,
    pub feature: Option<Vendor>,
    pub header: Option<Vendor>,
    pub krb5_config: Option<Vendor>,
    pub macos_native: bool,
}

impl VendorEvidence {
    pub fn resolve(&self) -> (Vendor, VendorSource) {
        if let Some(vendor) = self.environment {
            (vendor, VendorSource::Environment)
        } else if let Some(vendor) = self.feature {
            (vendor, VendorSource::Feature)
        } else if let Some(vendor) = self.header {
            (vendor, VendorSource::Header)
        } else if let Some(vendor) = self.krb5_config {
            (vendor, VendorSource::Krb5Config)
        } else if self.macos_native {
            (Vendor::Heimdal, VendorSource::PlatformDefault)
        } else {
            (Vendor::Mit, VendorSource::PlatformDefault)
        }
    }

    /// True when nothing short of `krb5-config --vendor` or the platform default would
    /// decide, so running `krb5-config` is worthwhile.
    pub fn needs_krb5_config(&self) -> bool {
        self.environment.is_none() && self.feature.is_none() && self.header.is_none()
    }
}
