// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Items resolve in document order and see only what came before them.

use crate::prelude::*;
use envspec_resolver::{ItemError, ResolutionError, ResolveOptions};

#[test]
fn progressive_redefinition() {
    env_spec("X=first\nX=${X}-second\n")
        .resolves()
        .valid()
        .value_eq("X", "first-second");
}

#[test]
fn redefinition_chains() {
    env_spec("PATH_LIST=/usr/bin\nPATH_LIST=${PATH_LIST}:/opt/bin\nPATH_LIST=${PATH_LIST}:/home/bin\n")
        .resolves()
        .value_eq("PATH_LIST", "/usr/bin:/opt/bin:/home/bin");
}

#[test]
fn earlier_readers_keep_the_old_value() {
    env_spec("X=1\nY=${X}\nX=2\nZ=${X}\n")
        .resolves()
        .env_eq("Y", "1")
        .env_eq("Z", "2")
        .env_eq("X", "2");
}

#[test]
fn forward_references_are_unresolved() {
    env_spec("# @optional\nEARLY=${LATE}\nLATE=late\n")
        .resolves()
        .valid()
        .value_eq("EARLY", envspec_resolver::ResolvedValue::Undefined);
}

#[test]
fn strict_mode_reports_forward_references() {
    let options: ResolveOptions = spec_options().strict_refs(true);
    env_spec("EARLY=${LATE}\nLATE=late\n")
        .options(options)
        .resolves()
        .errors_eq(
            "EARLY",
            &[ItemError::Resolution(ResolutionError::UnknownReference("LATE".into()))],
        );
}

#[test]
fn commands_see_earlier_values_and_overrides() {
    env_spec("USER_NAME=ada\nGREETING=$(echo hi $USER_NAME from $REGION)\n")
        .override_var("REGION", "eu")
        .resolves()
        .value_eq("GREETING", "hi ada from eu");
}
