// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builtin resolver functions.
//!
//! | Name | Result |
//! |------|--------|
//! | `ref(KEY)` | override or earlier value of `KEY` |
//! | `concat(a, b, ...)` | arguments joined as text |
//! | `fallback(a, b, ...)` | first argument that is neither undefined nor empty |
//! | `coalesce(a, b, ...)` | first argument that is not undefined |
//! | `replace(s, search, with)` | `s` with the first `search` replaced |
//! | `remap(v, key=match, ...)` | the key whose match equals `v`, else `v` |
//! | `exec(cmd)` / `eval(cmd)` | trimmed stdout of `cmd` run through the shell |
//! | `forEnv(env, ...)` | whether the `@envFlag` value is one of the arguments |

mod exec;
mod fallback;
mod reference;
mod text;

pub use exec::Exec;
pub use fallback::{Coalesce, Fallback};
pub use reference::{ForEnv, Ref};
pub use text::{Concat, Remap, Replace};

use crate::registry::Registry;

pub(crate) fn register_all(registry: &mut Registry) {
    registry
        .register(Ref)
        .register(ForEnv)
        .register(Concat)
        .register(Replace)
        .register(Remap)
        .register(Fallback)
        .register(Coalesce)
        .register(Exec);
    registry.alias("eval", "exec");
}

#[cfg(test)]
#[path = "../builtins_tests/mod.rs"]
mod tests;
