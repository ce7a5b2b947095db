use crate::theory::PitchClass;
use tokio::sync::broadcast;

/// Receives the musical events produced by the wheel.
///
/// Calls arrive synchronously on the UI thread, so implementations must hand any slow
/// work off elsewhere.
pub trait Owner {
    fn play_chord(&mut self, is_major: bool, root: PitchClass);
    fn end_chord(&mut self);
    fn set_top(&mut self, top: PitchClass);
}

/// Forwards owner events as protocol lines to every connected sync client.
pub struct BridgeOwner {
    tx: broadcast::Sender<String>,
}

impl BridgeOwner {
    pub fn new(tx: broadcast::Sender<String>) -> Self {
        Self { tx }
    }

    fn publish(&self, line: String) {
        log::info!("{}", line);
        // no subscribers is fine, the wheel still works standalone
        let _ = self.tx.send(line);
    }
}

impl Owner for BridgeOwner {
    fn play_chord(&mut self, is_major: bool, root: PitchClass) {
        let quality = if is_major { "major" } else { "minor" };
        self.publish(format!("chord {} {}", quality, root));
    }

    fn end_chord(&mut self) {
        self.publish("end".to_string());
    }

    fn set_top(&mut self, top: PitchClass) {
        self.publish(format!("top {}", top));
    }
}
