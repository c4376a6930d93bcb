use std::env;
use std::path::PathBuf;

use krb5_compat_build::{write_if_changed, BuildConfig, Probe, Vendor, NATIVE_FILE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    for var in BuildConfig::ENV_VARS {
        println!("cargo:rerun-if-env-changed={var}");
    }
    println!("cargo:rustc-check-cfg=cfg(krb5_heimdal_xfree)");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    let (config, errors) = BuildConfig::from_env();
    for error in &errors {
        println!("cargo:warning={error}");
    }

    let feature_vendor = match (
        env::var_os("CARGO_FEATURE_MIT").is_some(),
        env::var_os("CARGO_FEATURE_HEIMDAL").is_some(),
    ) {
        (true, false) => Some(Vendor::Mit),
        (false, true) => Some(Vendor::Heimdal),
        (true, true) => {
            println!("cargo:warning=both `mit` and `heimdal` features are enabled, ignoring both");
            None
        },
        (false, false) => None,
    };

    let report = Probe::new(&config).feature_vendor(feature_vendor).run(&out_dir);
    for warning in &report.warnings {
        println!("cargo:warning={warning}");
    }

    let table = &report.table;
    if table.heimdal_xfree {
        println!("cargo:rustc-cfg=krb5_heimdal_xfree");
    }
    // visible to dependent build scripts as DEP_KRB5COMPAT_VENDOR
    println!("cargo:vendor={}", table.vendor);
    println!("cargo:heimdal_xfree={}", table.heimdal_xfree);

    write_if_changed(&out_dir.join(NATIVE_FILE), &table.render())?;

    if env::var_os("CARGO_FEATURE_LINK").is_some() {
        if report.link.main_library().is_none() && report.link.frameworks.is_empty() {
            println!("cargo:warning=`link` is enabled but no krb5 library was reported");
        }
        for directive in report.link.cargo_directives() {
            println!("{directive}");
        }
    }

    Ok(())
}
