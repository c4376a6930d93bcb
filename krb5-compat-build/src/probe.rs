use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::Command;

use crate::args::{CompilerArgs, LinkArgs};
use crate::catalog::{HEIMDAL_XFREE_CANARY, NATIVE_CONSTANTS, OPTIONAL_APIS};
use crate::codegen::NativeTable;
use crate::config::BuildConfig;
use crate::error::ProbeError;
use crate::scan::{scan_expanded, HeaderScan, MARKER};
use crate::vendor::{Vendor, VendorEvidence};

pub const PROBE_FILE: &str = "krb5compat_probe.c";

/// The effectful half of probing, swappable in tests.
pub trait Toolchain {
    /// Runs `krb5-config` with `args` and returns its trimmed stdout.
    fn krb5_config(&self, program: &Path, args: &[&str]) -> Result<String, ProbeError>;

    /// Preprocesses `source` (written to `out_dir`) and returns the expanded text.
    fn preprocess(&self, source: &str, compiler: &CompilerArgs, out_dir: &Path) -> Result<String, ProbeError>;
}

/// `krb5-config` from the environment and the C compiler `cc` selects for the target.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemToolchain;

impl Toolchain for SystemToolchain {
    fn krb5_config(&self, program: &Path, args: &[&str]) -> Result<String, ProbeError> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| ProbeError::Spawn {
                program: program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::CommandFailed {
                program: program.display().to_string(),
                args: args.join(" "),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn preprocess(&self, source: &str, compiler: &CompilerArgs, out_dir: &Path) -> Result<String, ProbeError> {
        let path = out_dir.join(PROBE_FILE);
        fs::write(&path, source)?;

        let mut build = cc::Build::new();
        build.file(&path).cargo_metadata(false).warnings(false);
        for dir in &compiler.include_dirs {
            build.include(dir);
        }
        for (name, value) in &compiler.defines {
            build.define(name, value.as_deref());
        }
        for flag in &compiler.other {
            build.flag_if_supported(flag);
        }

        let expanded = build.try_expand()?;
        Ok(String::from_utf8_lossy(&expanded).into_owned())
    }
}

/// C source whose preprocessed form answers every question the probe asks.
pub fn probe_source() -> String {
    let mut source = String::from("#include <krb5.h>\n\n");
    for constant in &NATIVE_CONSTANTS {
        source.push_str(&format!(
            "#ifdef {name}\n{MARKER} {key} {name}\n#endif\n",
            name = constant.macro_name,
            key = constant.key,
        ));
    }
    source
}

/// Outcome of a probe run. Failures along the way are collected as warnings, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub table: NativeTable,
    pub link: LinkArgs,
    pub warnings: Vec<String>,
}

pub struct Probe<'a, T> {
    config: &'a BuildConfig,
    toolchain: T,
    feature_vendor: Option<Vendor>,
}

impl<'a> Probe<'a, SystemToolchain> {
    pub fn new(config: &'a BuildConfig) -> Probe<'a, SystemToolchain> {
        Probe::with_toolchain(config, SystemToolchain)
    }
}

impl<'a, T: Toolchain> Probe<'a, T> {
    pub fn with_toolchain(config: &'a BuildConfig, toolchain: T) -> Probe<'a, T> {
        Probe {
            config,
            toolchain,
            feature_vendor: None,
        }
    }

    /// Vendor requested through the `mit` / `heimdal` cargo features.
    pub fn feature_vendor(mut self, vendor: Option<Vendor>) -> Self {
        self.feature_vendor = vendor;
        self
    }

    pub fn run(&self, out_dir: &Path) -> ProbeReport {
        let mut warnings = Vec::new();

        let compiler = CompilerArgs::parse(&self.arguments(
            self.config.compiler_args.as_ref(),
            "--cflags",
            BuildConfig::macos_compiler_args,
            &mut warnings,
        ));
        let link = LinkArgs::parse(&self.arguments(
            self.config.linker_args.as_ref(),
            "--libs",
            BuildConfig::macos_linker_args,
            &mut warnings,
        ));

        let header = match self.toolchain.preprocess(&probe_source(), &compiler, out_dir) {
            Ok(expanded) => match scan_expanded(&expanded) {
                Ok(scan) => Some(scan),
                Err(error) => {
                    warnings.push(format!("could not interpret the preprocessed krb5 header: {error}"));
                    None
                },
            },
            Err(error) => {
                warnings.push(format!("could not preprocess <krb5.h>, vendor constants are unknown: {error}"));
                None
            },
        };

        let mut evidence = VendorEvidence {
            environment: self.config.vendor_override,
            feature: self.feature_vendor,
            header: header.as_ref().map(|scan| {
                if scan.declares(HEIMDAL_XFREE_CANARY) {
                    Vendor::Heimdal
                } else {
                    Vendor::Mit
                }
            }),
            krb5_config: None,
            macos_native: self.config.macos_native,
        };

        if evidence.needs_krb5_config() && !self.config.macos_native {
            match self.toolchain.krb5_config(&self.config.krb5_config, &["--vendor"]) {
                Ok(output) => evidence.krb5_config = Vendor::from_krb5_config(&output),
                Err(error) => warnings.push(format!("could not ask krb5-config for the vendor: {error}")),
            }
        }

        let (vendor, source) = evidence.resolve();

        if let Some(probed) = evidence.header {
            if probed != vendor {
                warnings.push(format!(
                    "vendor forced to {vendor} but the krb5 header looks like {probed}; \
                     the ticket-times layout follows {vendor}"
                ));
            }
        }

        let natives = NATIVE_CONSTANTS
            .iter()
            .map(|constant| header.as_ref().and_then(|scan| scan.native(constant.key)))
            .collect();

        // skipping the module check assumes the optional APIs only, never the allocation
        // convention
        let declared_apis = if self.config.skip_module_check {
            let mut apis: BTreeSet<String> = OPTIONAL_APIS.iter().map(|api| api.to_string()).collect();
            if vendor == Vendor::Heimdal {
                apis.insert(HEIMDAL_XFREE_CANARY.to_string());
            }
            apis
        } else {
            header
                .as_ref()
                .map(|scan: &HeaderScan| scan.declared.clone())
                .unwrap_or_default()
        };

        let table = NativeTable {
            vendor,
            vendor_source: source,
            heimdal_xfree: vendor == Vendor::Heimdal,
            header_probed: header.is_some(),
            natives,
            declared_apis,
        };

        ProbeReport { table, link, warnings }
    }

    fn arguments(
        &self,
        configured: Option<&Vec<String>>,
        flag: &str,
        macos: fn(&BuildConfig) -> Vec<String>,
        warnings: &mut Vec<String>,
    ) -> Vec<String> {
        if let Some(args) = configured {
            return args.clone();
        }
        if self.config.macos_native {
            return macos(self.config);
        }

        let output = self
            .toolchain
            .krb5_config(&self.config.krb5_config, &[flag, "krb5"])
            .and_then(|output| crate::args::split_args(&output));

        match output {
            Ok(args) => args,
            Err(error) => {
                let program = self.config.krb5_config.file_name().unwrap_or(OsStr::new("krb5-config"));
                warnings.push(format!("{} {flag} krb5 failed: {error}", program.to_string_lossy()));
                Vec::new()
            },
        }
    }
}
