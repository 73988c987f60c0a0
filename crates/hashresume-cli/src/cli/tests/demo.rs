//! Tests for the default invocation and `demo` overrides.

use std::num::NonZeroUsize;

use clap::Parser;
use hashresume_core::config::HashResumeConfig;

use super::parse;

use crate::cli::{Cli, CliCommand, DemoArgs};

#[test]
fn cli_parse_no_subcommand() {
    assert!(parse(&["hashresume"]).is_none());
}

#[test]
fn cli_parse_demo_defaults() {
    match parse(&["hashresume", "demo"]) {
        Some(CliCommand::Demo(args)) => {
            assert!(args.input.is_none());
            assert!(args.cancel_after_ms.is_none());
            assert!(args.pace_ms.is_none());
            assert!(args.unit_size.is_none());
        }
        _ => panic!("expected Demo"),
    }
}

#[test]
fn cli_parse_demo_overrides() {
    match parse(&[
        "hashresume",
        "demo",
        "--input",
        "abc",
        "--cancel-after-ms",
        "50",
        "--pace-ms",
        "0",
        "--unit-size",
        "8",
    ]) {
        Some(CliCommand::Demo(args)) => {
            assert_eq!(args.input.as_deref(), Some("abc"));
            assert_eq!(args.cancel_after_ms, Some(50));
            assert_eq!(args.pace_ms, Some(0));
            assert_eq!(args.unit_size.map(NonZeroUsize::get), Some(8));
        }
        _ => panic!("expected Demo with overrides"),
    }
}

#[test]
fn demo_args_override_config() {
    let mut cfg = HashResumeConfig::default();
    DemoArgs {
        input: Some("xyz".into()),
        cancel_after_ms: Some(10),
        pace_ms: None,
        unit_size: NonZeroUsize::new(4),
    }
    .apply(&mut cfg);
    assert_eq!(cfg.demo_input(), "xyz");
    assert_eq!(cfg.cancel_after_ms, 10);
    assert_eq!(cfg.pace_ms, 200);
    assert_eq!(cfg.unit_size, 4);
}

#[test]
fn cli_rejects_non_numeric_pace() {
    assert!(Cli::try_parse_from(["hashresume", "demo", "--pace-ms", "fast"]).is_err());
}

#[test]
fn cli_rejects_zero_unit_size() {
    assert!(Cli::try_parse_from(["hashresume", "demo", "--unit-size", "0"]).is_err());
}
