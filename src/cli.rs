//! Command line arguments
//!
//! Flags keep the names used by existing Telegraf `exec` configurations. Those
//! configurations pass Go-style single-dash long flags (`-apikey KEY`), which
//! [`normalize_args`] rewrites to the double-dash form clap expects.

use clap::{ArgAction, Parser};
use std::ffi::OsString;

/// Default address of the Syncthing GUI/REST listener
pub const DEFAULT_SERVER: &str = "http://localhost:8384";

/// Long flags that are also accepted with a single leading dash
const SINGLE_DASH_FLAGS: &[&str] = &["server", "apikey", "use-full-report"];

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Syncthing API URL
    #[arg(long, env = "SYNCTHING_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Syncthing API key
    #[arg(
        long,
        env = "SYNCTHING_API_KEY",
        default_value = "",
        hide_env_values = true
    )]
    pub apikey: String,

    /// Add extra stats from svc/report. Somewhat slow/heavy.
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub use_full_report: bool,
}

impl Args {
    /// Parse the process arguments, accepting single-dash long flags
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Rewrite `-apikey`, `-server` and `-use-full-report` (with or without
/// `=value`) to their double-dash form.
///
/// The program name and everything after a `--` terminator are left untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut terminated = false;
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(idx, arg)| {
            if idx == 0 || terminated {
                return arg;
            }
            if arg == "--" {
                terminated = true;
                return arg;
            }
            rewrite_single_dash(arg)
        })
        .collect()
}

fn rewrite_single_dash(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };
    let Some(rest) = text.strip_prefix('-') else {
        return arg;
    };
    if rest.starts_with('-') {
        return arg;
    }

    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    if SINGLE_DASH_FLAGS.contains(&name) {
        OsString::from(format!("-{text}"))
    } else {
        arg
    }
}
