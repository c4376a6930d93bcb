use std::env;
use std::path::{Path, PathBuf};

use crate::args::split_args;
use crate::error::ProbeError;
use crate::vendor::Vendor;

pub const KRB5_KRB5CONFIG: &str = "KRB5_KRB5CONFIG";
pub const KRB5_COMPILER_ARGS: &str = "KRB5_COMPILER_ARGS";
pub const KRB5_LINKER_ARGS: &str = "KRB5_LINKER_ARGS";
pub const KRB5_VENDOR: &str = "KRB5_VENDOR";
pub const KRB5_SKIP_MODULE_CHECK: &str = "KRB5_SKIP_MODULE_CHECK";
pub const KRB5_MACOS_HEIMDAL_DIR: &str = "KRB5_MACOS_HEIMDAL_DIR";

const DEFAULT_KRB5_CONFIG: &str = "krb5-config";
const FREEBSD_BASE_KRB5_CONFIG: &str = "/usr/bin/krb5-config";
const FREEBSD_PORTS_KRB5_CONFIG: &str = "/usr/local/bin/krb5-config";
const MACOS_HEIMDAL_FRAMEWORKS: &str = "/System/Library/PrivateFrameworks";

/// Build settings, read once from the build script's environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub krb5_config: PathBuf,
    pub compiler_args: Option<Vec<String>>,
    pub linker_args: Option<Vec<String>>,
    pub vendor_override: Option<Vendor>,
    pub skip_module_check: bool,
    pub macos_native: bool,
    pub macos_heimdal_dir: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            krb5_config: PathBuf::from(DEFAULT_KRB5_CONFIG),
            compiler_args: None,
            linker_args: None,
            vendor_override: None,
            skip_module_check: false,
            macos_native: false,
            macos_heimdal_dir: None,
        }
    }
}

impl BuildConfig {
    /// Variables the build script should rerun on.
    pub const ENV_VARS: [&'static str; 6] = [
        KRB5_KRB5CONFIG,
        KRB5_COMPILER_ARGS,
        KRB5_LINKER_ARGS,
        KRB5_VENDOR,
        KRB5_SKIP_MODULE_CHECK,
        KRB5_MACOS_HEIMDAL_DIR,
    ];

    /// Reads the configuration inside a build script, where `CARGO_CFG_TARGET_OS` names the
    /// target platform. See [`BuildConfig::from_lookup`] for how bad values are handled.
    pub fn from_env() -> (BuildConfig, Vec<ProbeError>) {
        let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_else(|_| env::consts::OS.to_string());
        let on_path: Vec<PathBuf> = env::var_os("PATH")
            .map(|path| {
                env::split_paths(&path)
                    .map(|dir| dir.join(DEFAULT_KRB5_CONFIG))
                    .filter(|candidate| candidate.exists())
                    .collect()
            })
            .unwrap_or_default();

        BuildConfig::from_lookup(|name| env::var(name).ok(), &target_os, &on_path)
    }

    /// `lookup` resolves environment variables, `on_path` lists the `krb5-config`
    /// binaries found on `PATH` in search order.
    ///
    /// A variable that fails to parse keeps its default and is reported as
    /// [`ProbeError::Variable`]; the other variables still apply.
    pub fn from_lookup<F>(lookup: F, target_os: &str, on_path: &[PathBuf]) -> (BuildConfig, Vec<ProbeError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let macos_native = target_os == "macos";

        let krb5_config = match non_empty(KRB5_KRB5CONFIG) {
            Some(path) => PathBuf::from(path),
            None => select_krb5_config(target_os, on_path),
        };

        let compiler_args = variable(KRB5_COMPILER_ARGS, lookup(KRB5_COMPILER_ARGS), &mut errors, |args| {
            split_args(&args)
        });
        let linker_args = variable(KRB5_LINKER_ARGS, lookup(KRB5_LINKER_ARGS), &mut errors, |args| {
            split_args(&args)
        });
        let vendor_override = variable(KRB5_VENDOR, non_empty(KRB5_VENDOR), &mut errors, |name| {
            Vendor::from_name(&name)
        });

        let skip_module_check = lookup(KRB5_SKIP_MODULE_CHECK)
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let config = BuildConfig {
            krb5_config,
            compiler_args,
            linker_args,
            vendor_override,
            skip_module_check,
            macos_native,
            macos_heimdal_dir: non_empty(KRB5_MACOS_HEIMDAL_DIR).map(PathBuf::from),
        };

        (config, errors)
    }

    /// Compiler arguments used when the native macOS Heimdal framework is the target. The
    /// framework ships no headers, so they come from a Heimdal source tree if one is given.
    pub fn macos_compiler_args(&self) -> Vec<String> {
        match &self.macos_heimdal_dir {
            Some(dir) => vec![format!("-I{}", dir.join("include").display())],
            None => Vec::new(),
        }
    }

    pub fn macos_linker_args(&self) -> Vec<String> {
        vec![
            "-framework".to_string(),
            "Heimdal".to_string(),
            "-F".to_string(),
            MACOS_HEIMDAL_FRAMEWORKS.to_string(),
        ]
    }
}

fn variable<T, F>(name: &'static str, value: Option<String>, errors: &mut Vec<ProbeError>, parse: F) -> Option<T>
where
    F: FnOnce(String) -> Result<T, ProbeError>,
{
    match parse(value?) {
        Ok(parsed) => Some(parsed),
        Err(source) => {
            errors.push(ProbeError::Variable {
                name,
                source: Box::new(source),
            });
            None
        },
    }
}

/// FreeBSD lists the ancient base-system Heimdal before the ports installation on `PATH`;
/// the ports one wins when both exist.
fn select_krb5_config(target_os: &str, on_path: &[PathBuf]) -> PathBuf {
    if target_os == "freebsd"
        && on_path.len() > 1
        && on_path[0] == Path::new(FREEBSD_BASE_KRB5_CONFIG)
        && on_path.iter().any(|candidate| candidate == Path::new(FREEBSD_PORTS_KRB5_CONFIG))
    {
        return PathBuf::from(FREEBSD_PORTS_KRB5_CONFIG);
    }

    PathBuf::from(DEFAULT_KRB5_CONFIG)
}
