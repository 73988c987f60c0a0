//! Tests for the `digest` subcommand.

use clap::Parser;

use super::parse;

use crate::cli::{Cli, CliCommand};

#[test]
fn cli_parse_digest() {
    match parse(&["hashresume", "digest", "Hello World!"]) {
        Some(CliCommand::Digest { text }) => assert_eq!(text, "Hello World!"),
        _ => panic!("expected Digest"),
    }
}

#[test]
fn cli_parse_digest_requires_text() {
    assert!(Cli::try_parse_from(["hashresume", "digest"]).is_err());
}
