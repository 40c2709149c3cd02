// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builtin functions, alone and composed.

use crate::prelude::*;
use envspec_resolver::{ItemError, ResolutionError};

#[test]
fn functions_compose() {
    env_spec("OTHER=d\nOUT=concat(\"a\", fallback(\"\", \"b\"), exec(\"echo c\"), ref(OTHER))\n")
        .resolves()
        .valid()
        .value_eq("OUT", "abcd");
}

#[test]
fn single_quotes_are_never_expanded() {
    env_spec("FOO=bar\nITEM='$FOO'\nCMD='$(echo hi)'\n")
        .resolves()
        .value_eq("ITEM", "$FOO")
        .value_eq("CMD", "$(echo hi)");
}

#[test]
fn other_quotes_are_expanded() {
    env_spec("FOO=bar\nDOUBLE=\"<$FOO>\"\nBACKTICK=`<${FOO}>`\nBARE=<$FOO>\n")
        .resolves()
        .value_eq("DOUBLE", "<bar>")
        .value_eq("BACKTICK", "<bar>")
        .value_eq("BARE", "<bar>");
}

#[test]
fn replace_and_remap() {
    env_spec(
        "BRANCH=feature/login\nSLUG=replace(ref(BRANCH), \"/\", \"-\")\n\
         NODE_ENV=production\nSTAGE=remap(ref(NODE_ENV), prod=production, dev=development)\n\
         OTHER=remap(test, prod=production)\n",
    )
    .resolves()
    .valid()
    .value_eq("SLUG", "feature-login")
    .value_eq("STAGE", "prod")
    .value_eq("OTHER", "test");
}

#[test]
fn shell_substitution_stops_at_the_first_paren() {
    env_spec("OUT=$(echo a)b$(echo c)\n")
        .resolves()
        .value_eq("OUT", "abc");
}

#[test]
fn failing_commands_mark_only_their_item() {
    env_spec("BROKEN=$(echo nope >&2; exit 7)\nFINE=ok\n")
        .resolves()
        .errors_eq(
            "BROKEN",
            &[ItemError::Resolution(ResolutionError::ExecFailed {
                code: Some(7),
                stderr: "nope".into(),
            })],
        )
        .errors_eq("FINE", &[])
        .value_eq("FINE", "ok");
}

#[test]
fn custom_functions_can_be_aliased() {
    let store = envspec_resolver::FakeSecretStore::new().with_secret("api", "k-1");
    let mut registry = envspec_resolver::Registry::with_builtins();
    registry.register(store.resolver("vault"));
    assert!(registry.alias("secret", "vault"));

    let doc = envspec_parser::parse("A=vault(api)\nB=secret(api)\n").unwrap();
    let resolution = block_on(envspec_resolver::resolve(&doc, &registry, spec_options())).unwrap();
    assert_eq!(resolution.value("A"), resolution.value("B"));
    assert_eq!(store.batches().len(), 1);
}
