use std::sync::atomic::{AtomicBool, Ordering};

/// Single-slot admission control for detection work.
///
/// `try_enter` admits at most one frame at a time; frames arriving while a
/// detection is in flight, or while detection is disabled, are rejected and
/// dropped by the caller, never queued. A slow detector degrades the rate
/// of processed frames, not memory footprint or producer latency.
pub struct DetectionGate {
    enabled: AtomicBool,
    busy: AtomicBool,
}

impl DetectionGate {
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            busy: AtomicBool::new(false),
        }
    }

    /// Attempts to claim the detection slot.
    ///
    /// Returns false without any state change when detection is disabled or
    /// a detection is already in flight.
    pub fn try_enter(&self) -> bool {
        if !self.enabled.load(Ordering::Acquire) {
            return false;
        }
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Releases the detection slot.
    ///
    /// Must run on every path out of a detection, including failures; a
    /// leaked slot blocks all future frames.
    pub fn exit(&self) {
        self.busy.store(false, Ordering::Release);
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Default for DetectionGate {
    fn default() -> Self {
        Self::new()
    }
}
