//! Shared test harness modules for the prefscore CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]
#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

use super::*;

mod helpers;
