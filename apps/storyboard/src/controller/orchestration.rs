//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{SubmissionId, UiError, UiErrorCategory},
    reducer::StoryboardState,
};

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), UiError> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err(UiError::new(
            UiErrorCategory::Unknown,
            "UI command queue is full; please retry",
        )),
        Err(TrySendError::Disconnected(_)) => Err(UiError::new(
            UiErrorCategory::Transport,
            "Backend worker disconnected (possible startup/runtime failure); restart the app",
        )),
    }
}

/// Runs the submit transition and queues the resulting request. A queue
/// failure lands the state in `Error` like any transport failure would.
pub fn submit_recap(
    state: &mut StoryboardState,
    cmd_tx: &Sender<BackendCommand>,
) -> SubmissionId {
    let submission = state.submit();
    let id = submission.id;
    let cmd = BackendCommand::GenerateRecap {
        submission: submission.id,
        request: submission.request,
    };
    if let Err(error) = dispatch_backend_command(cmd_tx, cmd) {
        tracing::warn!(submission = id, "could not queue recap request: {}", error.message());
        state.fail(error);
    }
    id
}
