//! Compiler and linker arguments as reported by `krb5-config` or overridden through
//! `KRB5_COMPILER_ARGS` / `KRB5_LINKER_ARGS`.

use std::path::PathBuf;

use crate::error::ProbeError;

/// POSIX-style word splitting: whitespace separated, with single quotes, double quotes
/// and backslash escapes.
pub fn split_args(input: &str) -> Result<Vec<String>, ProbeError> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(inner) => word.push(inner),
                        None => return Err(ProbeError::UnbalancedQuote(input.to_string())),
                    }
                }
            },
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped @ ('"' | '\\' | '$' | '`')) => word.push(escaped),
                            Some(other) => {
                                word.push('\\');
                                word.push(other);
                            },
                            None => return Err(ProbeError::UnbalancedQuote(input.to_string())),
                        },
                        Some(inner) => word.push(inner),
                        None => return Err(ProbeError::UnbalancedQuote(input.to_string())),
                    }
                }
            },
            '\\' => {
                in_word = true;
                if let Some(escaped) = chars.next() {
                    word.push(escaped);
                }
            },
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            },
            c => {
                in_word = true;
                word.push(c);
            },
        }
    }

    if in_word {
        words.push(word);
    }

    Ok(words)
}

/// `krb5-config --cflags krb5`, split by what the preprocessor needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerArgs {
    pub include_dirs: Vec<PathBuf>,
    pub defines: Vec<(String, Option<String>)>,
    pub other: Vec<String>,
}

impl CompilerArgs {
    pub fn parse(args: &[String]) -> CompilerArgs {
        let mut parsed = CompilerArgs::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            if arg == "-I" {
                if let Some(dir) = iter.next() {
                    parsed.include_dirs.push(PathBuf::from(dir));
                }
            } else if let Some(dir) = arg.strip_prefix("-I") {
                parsed.include_dirs.push(PathBuf::from(dir));
            } else if let Some(define) = arg.strip_prefix("-D") {
                match define.split_once('=') {
                    Some((name, value)) => parsed.defines.push((name.to_string(), Some(value.to_string()))),
                    None => parsed.defines.push((define.to_string(), None)),
                }
            } else {
                parsed.other.push(arg.clone());
            }
        }

        parsed
    }
}

/// `krb5-config --libs krb5`, split into what cargo can express.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkArgs {
    pub search_dirs: Vec<PathBuf>,
    pub libraries: Vec<String>,
    pub framework_dirs: Vec<PathBuf>,
    pub frameworks: Vec<String>,
    /// Passed through as linker arguments, including stray `-I` flags.
    pub other: Vec<String>,
}

impl LinkArgs {
    pub fn parse(args: &[String]) -> LinkArgs {
        let mut parsed = LinkArgs::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-framework" => {
                    if let Some(name) = iter.next() {
                        parsed.frameworks.push(name.clone());
                    }
                },
                "-F" => {
                    if let Some(dir) = iter.next() {
                        parsed.framework_dirs.push(PathBuf::from(dir));
                    }
                },
                "-L" => {
                    if let Some(dir) = iter.next() {
                        parsed.search_dirs.push(PathBuf::from(dir));
                    }
                },
                _ => {
                    if let Some(dir) = arg.strip_prefix("-L") {
                        parsed.search_dirs.push(PathBuf::from(dir));
                    } else if let Some(lib) = arg.strip_prefix("-l") {
                        parsed.libraries.push(lib.to_string());
                    } else if let Some(dir) = arg.strip_prefix("-F") {
                        parsed.framework_dirs.push(PathBuf::from(dir));
                    } else {
                        parsed.other.push(arg.clone());
                    }
                },
            }
        }

        parsed
    }

    /// The main krb5 library, e.g. `krb5` out of `-lkrb5 -lk5crypto -lcom_err`.
    pub fn main_library(&self) -> Option<&str> {
        self.libraries
            .iter()
            .map(String::as_str)
            .find(|lib| lib.starts_with("krb5"))
    }

    /// Build-script directives linking the vendor library.
    pub fn cargo_directives(&self) -> Vec<String> {
        let mut directives = Vec::new();

        for dir in &self.search_dirs {
            directives.push(format!("cargo:rustc-link-search=native={}", dir.display()));
        }
        for dir in &self.framework_dirs {
            directives.push(format!("cargo:rustc-link-search=framework={}", dir.display()));
        }
        for lib in &self.libraries {
            directives.push(format!("cargo:rustc-link-lib={lib}"));
        }
        for framework in &self.frameworks {
            directives.push(format!("cargo:rustc-link-lib=framework={framework}"));
        }
        for arg in &self.other {
            directives.push(format!("cargo:rustc-link-arg={arg}"));
        }

        directives
    }
}
