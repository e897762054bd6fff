// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Query instrumentation.
//!
//! Every database round trip in the PostgreSQL store goes through [`timed`],
//! which logs the statement before it runs and the elapsed time after. The
//! measurement is handed back to the caller, which records it onto the span
//! of the store operation with [`Timed::record`].

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{Span, debug};

/// Output of a timed database call.
#[derive(Debug)]
pub struct Timed<T> {
    /// Whatever the wrapped future resolved to.
    pub value: T,
    /// Wall time spent awaiting it.
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Record the elapsed milliseconds as `field` on the current span and keep
    /// the value.
    ///
    /// The span must declare `field` (usually as `field::Empty`) for the
    /// measurement to show up; otherwise it is dropped.
    pub fn record(self, field: &'static str) -> T {
        Span::current().record(field, self.elapsed.as_secs_f64() * 1000.0);
        self.value
    }
}

/// Await `call`, logging `query` before and the elapsed time after.
pub async fn timed<T, F>(query: &'static str, call: F) -> Timed<T>
where
    F: Future<Output = T>,
{
    debug!(query = query.trim(), "query start");
    let started = Instant::now();
    let value = call.await;
    let elapsed = started.elapsed();
    debug!(
        query = query.trim(),
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "query finished"
    );
    Timed { value, elapsed }
}
