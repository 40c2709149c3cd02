// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::schema::Schema;
use std::ops::Range;

fn waves(input: &str) -> Vec<Range<usize>> {
    let schema = Schema::compile(&parse(input).unwrap(), &Registry::with_builtins()).unwrap();
    plan_waves(&schema.items)
}

#[yare::parameterized(
    empty            = { "", vec![] },
    independent      = { "A=1\nB=2\nC=3\n", vec![0..3] },
    reference        = { "A=1\nB=${A}\n", vec![0..1, 1..2] },
    forward_ref      = { "A=${B}\nB=1\n", vec![0..2] },
    redefinition     = { "X=1\nX=${X}\n", vec![0..1, 1..2] },
    plain_redefine   = { "X=1\nY=2\nX=3\n", vec![0..2, 2..3] },
    later_reference  = { "A=1\nB=${Z}\nC=${A}\nD=2\n", vec![0..2, 2..4] },
    exec             = { "A=1\nB=$(date)\nC=3\n", vec![0..1, 1..3] },
    leading_exec     = { "A=$(date)\nB=1\n", vec![0..2] },
    for_env          = { "A=1\nB=forEnv(prod)\n", vec![0..1, 1..2] },
    computed_ref     = { "A=1\nB=ref(concat(A, \"\"))\n", vec![0..1, 1..2] },
    nested_reference = { "A=1\nB=concat(x, fallback(ref(A), y))\n", vec![0..1, 1..2] },
)]
fn planned_waves(input: &str, expected: Vec<Range<usize>>) {
    assert_eq!(waves(input), expected);
}

#[test]
fn waves_cover_every_item_in_order() {
    let input = "A=1\nB=${A}\nC=$(true)\nD=${C}\nE=5\nD=${E}\n";
    let planned = waves(input);
    let flattened: Vec<usize> = planned.iter().cloned().flatten().collect();
    assert_eq!(flattened, (0..6).collect::<Vec<_>>());
}
