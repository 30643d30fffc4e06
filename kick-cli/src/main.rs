//! kick — one-shot git sync.
//!
//! # Usage
//!
//! ```text
//! kick [--debug] [-m MSG] [--[no-]nonce] [--[no-]fetch-all] [--[no-]pull-all]
//!      [--[no-]push-all] [--[no-]sync-tags] [--json]
//! kick --version
//! kick --help
//! ```
//!
//! Single-dash spellings of long flags (`-debug`, `-version`, `-help`, ...)
//! are accepted too. The argument after `-m` is always the message, even when
//! it starts with a dash.

mod commands;
mod logging;

use std::ffi::OsString;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use commands::kick::KickArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "kick",
    version,
    about = "Stage, commit, pull, and push a git repository in one go",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    kick: KickArgs,
}

// ---------------------------------------------------------------------------
// Single-dash long flags
// ---------------------------------------------------------------------------

/// Rewrite `-name` / `-name=value` to `--name...` when `name` is a known long
/// flag. The value following a flag that takes one is passed through as-is,
/// so `-m -debug` commits with the message `-debug`. Everything after a bare
/// `--` is left untouched.
fn normalize_args<I>(args: I, flags: &FlagNames) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    let mut value_pending = false;
    args.into_iter()
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 || passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                value_pending = false;
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            if std::mem::take(&mut value_pending) {
                return arg;
            }
            value_pending = flags.awaits_value(text);
            let Some(rest) = text.strip_prefix('-').filter(|r| !r.starts_with('-')) else {
                return arg;
            };
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if name.len() > 1 && flags.longs.iter().any(|long| long == name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

/// Flag spellings known to the parser.
struct FlagNames {
    longs: Vec<String>,
    /// Short and long names of flags that take a value.
    valued: Vec<String>,
}

impl FlagNames {
    fn from_cli() -> Self {
        let command = Cli::command();
        let mut longs = Vec::new();
        let mut valued = Vec::new();
        for arg in command.get_arguments() {
            let takes_value = arg.get_action().takes_values();
            if let Some(long) = arg.get_long() {
                longs.push(long.to_string());
                if takes_value {
                    valued.push(long.to_string());
                }
            }
            if let Some(short) = arg.get_short() {
                if takes_value {
                    valued.push(short.to_string());
                }
            }
        }
        longs.extend(["help".to_string(), "version".to_string()]);
        Self { longs, valued }
    }

    /// Whether `text` is a value-taking flag whose value comes in the next
    /// argument (`-m`, `--message`, `-message`).
    fn awaits_value(&self, text: &str) -> bool {
        let name = text
            .strip_prefix("--")
            .or_else(|| text.strip_prefix('-'))
            .unwrap_or_default();
        !name.is_empty() && !name.contains('=') && self.valued.iter().any(|v| v == name)
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let args = normalize_args(std::env::args_os(), &FlagNames::from_cli());
    let cli = Cli::parse_from(args);
    cli.kick.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(args: &[&str]) -> Vec<String> {
        normalize_args(args.iter().map(OsString::from), &FlagNames::from_cli())
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test]
    fn go_style_flags_become_long_flags() {
        assert_eq!(
            normalize(&["kick", "-debug", "-version", "-help"]),
            ["kick", "--debug", "--version", "--help"]
        );
    }

    #[test]
    fn valued_single_dash_flag_keeps_value() {
        assert_eq!(
            normalize(&["kick", "-message=wip", "-no-sync-tags"]),
            ["kick", "--message=wip", "--no-sync-tags"]
        );
    }

    #[test]
    fn short_and_unknown_flags_are_untouched() {
        assert_eq!(
            normalize(&["kick", "-m", "msg", "-V", "-bogus", "--json"]),
            ["kick", "-m", "msg", "-V", "-bogus", "--json"]
        );
    }

    #[test]
    fn message_value_is_never_rewritten() {
        assert_eq!(normalize(&["kick", "-m", "-debug"]), ["kick", "-m", "-debug"]);
        assert_eq!(
            normalize(&["kick", "-message", "-json", "-debug"]),
            ["kick", "--message", "-json", "--debug"]
        );
        assert_eq!(
            normalize(&["kick", "--message", "-nonce"]),
            ["kick", "--message", "-nonce"]
        );
    }

    #[test]
    fn attached_message_value_does_not_swallow_next_flag() {
        assert_eq!(
            normalize(&["kick", "-message=wip", "-debug"]),
            ["kick", "--message=wip", "--debug"]
        );
    }

    #[test]
    fn message_starting_with_dash_reaches_the_parser() {
        let args = normalize_args(
            ["kick", "-m", "-debug"].map(OsString::from),
            &FlagNames::from_cli(),
        );
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.kick.message.as_deref(), Some("-debug"));
        assert!(!cli.kick.debug);
    }

    #[test]
    fn arguments_after_double_dash_are_untouched() {
        assert_eq!(
            normalize(&["kick", "-m", "--", "-debug"]),
            ["kick", "-m", "--", "-debug"]
        );
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_switch_pairs_last_wins() {
        let cli = Cli::parse_from(["kick", "--nonce", "--no-nonce", "--json"]);
        assert_eq!(cli.kick.overrides().nonce, Some(false));
        assert!(cli.kick.json);
    }
}
