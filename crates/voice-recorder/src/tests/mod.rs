use crate::permissions::PermissionSink;

use std::sync::mpsc;

use voice_recorder_core::PermissionResult;


/// Sink that hands probe results to a test thread.
#[derive(Clone)]
pub(crate) struct ChannelSink(pub(crate) mpsc::Sender<PermissionResult>);

impl PermissionSink for ChannelSink {
    fn deliver(&self, result: PermissionResult) {
        let _ = self.0.send(result);
    }
}
