//! Backend commands queued from UI to backend worker.

use shared::protocol::RecapRequest;

use crate::controller::events::SubmissionId;

#[derive(Debug)]
pub enum BackendCommand {
    GenerateRecap {
        submission: SubmissionId,
        request: RecapRequest,
    },
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::GenerateRecap { .. } => "generate_recap",
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
