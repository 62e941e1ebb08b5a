use std::ffi::OsString;
use std::path::Path;

use clap::Parser;

use crate::commands::Command;

const MULTICALL_NAMES: &[&str] = &["check", "in", "out"];

#[derive(Debug, Parser)]
#[command(name = "http-resource")]
#[command(version, about = "Check, fetch and publish versioned files over HTTP")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Inserts the subcommand when the binary is invoked as `check`, `in` or `out`.
///
/// This lets the executable be symlinked into the classic
/// `/opt/resource/{check,in,out}` layout.
pub fn multicall_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();

    let invoked_as = args
        .first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| MULTICALL_NAMES.contains(name))
        .map(OsString::from);

    if let Some(name) = invoked_as {
        args.insert(1, name);
    }

    args
}
