use std::io;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program} {args}` exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        args: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("preprocessing the krb5 header failed: {0}")]
    Preprocess(#[from] cc::Error),

    #[error("unterminated quote in argument list: {0:?}")]
    UnbalancedQuote(String),

    #[error("`{0}` is not an integer constant expression")]
    Literal(String),

    #[error("value {value} of {name} does not fit in a C int")]
    OutOfRange { name: String, value: i64 },

    #[error("malformed probe marker line: {0:?}")]
    Marker(String),

    #[error("unknown krb5 vendor {0:?}, expected `mit` or `heimdal`")]
    InvalidVendor(String),

    #[error("ignoring {name}: {source}")]
    Variable {
        name: &'static str,
        #[source]
        source: Box<ProbeError>,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
