//! Runtime bridge between UI command queue and backend event intake.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use client_core::RecapTransport;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};

/// Starts the backend worker thread. Each `GenerateRecap` runs as its own
/// task; nothing is cancelled or deduplicated, so completions reach the UI
/// in whatever order the transport resolves them and the reducer sorts out
/// which one still matters.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    transport: Arc<dyn RecapTransport>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                // Dropping `cmd_rx` makes the next dispatch report a disconnect.
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::debug!("backend worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::GenerateRecap {
                        submission,
                        request,
                    } => {
                        tracing::info!(submission, repo = %request.repo, "backend: generate_recap");
                        let transport = Arc::clone(&transport);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let event = match transport.generate_recap(&request).await {
                                Ok(recap) => UiEvent::RecapReady { submission, recap },
                                Err(err) => {
                                    tracing::warn!(submission, "backend: generate_recap failed: {err}");
                                    UiEvent::RecapFailed {
                                        submission,
                                        error: UiError::from_request_error(&err),
                                    }
                                }
                            };
                            if ui_tx.send(event).is_err() {
                                tracing::debug!(submission, "ui gone; dropping recap completion");
                            }
                        });
                    }
                    BackendCommand::Shutdown => {
                        tracing::debug!("backend worker shutting down");
                        break;
                    }
                }
            }
        });
    })
}
