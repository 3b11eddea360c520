// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for session timestamps.
//!
//! Sessions store unix-millisecond timestamps so values stay directly
//! comparable with what web clients write.

use chrono::Utc;

/// Current time as unix milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
