// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OS termination signals

use lci_core::Signal;
use tokio::signal::unix::{signal, SignalKind};

/// Listeners for SIGINT and SIGTERM
///
/// Registering early means a signal that arrives while the pipeline starts
/// up is still observed.
pub struct ShutdownSignals {
    sigint: tokio::signal::unix::Signal,
    sigterm: tokio::signal::unix::Signal,
}

impl ShutdownSignals {
    pub fn register() -> std::io::Result<Self> {
        Ok(Self {
            sigint: signal(SignalKind::interrupt())?,
            sigterm: signal(SignalKind::terminate())?,
        })
    }

    /// Wait for the first signal. Both listeners are dropped afterwards.
    pub async fn recv(mut self) -> Signal {
        tokio::select! {
            _ = self.sigint.recv() => Signal::Interrupt,
            _ = self.sigterm.recv() => Signal::Terminate,
        }
    }
}
