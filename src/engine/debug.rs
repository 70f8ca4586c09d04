// src/engine/debug.rs

use std::sync::atomic::{AtomicBool, Ordering};

pub struct DebugFlags {
    pub debug_text: AtomicBool,
    /// Log the net magnetic force every physics step (noisy)
    pub force_trace: AtomicBool,
}

impl DebugFlags {
    pub const fn new() -> Self {
        Self {
            debug_text: AtomicBool::new(false),
            force_trace: AtomicBool::new(false),
        }
    }

    pub fn set_debug_text(&self, enabled: bool) {
        self.debug_text.store(enabled, Ordering::Relaxed);
    }

    pub fn set_force_trace(&self, enabled: bool) {
        self.force_trace.store(enabled, Ordering::Relaxed);
    }

    pub fn is_debug_text_enabled(&self) -> bool {
        self.debug_text.load(Ordering::Relaxed)
    }

    pub fn is_force_trace_enabled(&self) -> bool {
        self.force_trace.load(Ordering::Relaxed)
    }
}

impl Default for DebugFlags {
    fn default() -> Self {
        Self::new()
    }
}

static DEBUG_FLAGS: DebugFlags = DebugFlags::new();

pub fn debug_flags() -> &'static DebugFlags {
    &DEBUG_FLAGS
}

#[macro_export]
macro_rules! debug_print {
    ($($arg:tt)*) => {
        if $crate::engine::debug::debug_flags().is_debug_text_enabled() {
            println!("[MagneticBoots {}:{}] {}", file!(), line!(), format!($($arg)*));
        }
    };
}

/// Per-step force logging, only when both debug text and force trace are on
#[macro_export]
macro_rules! force_trace {
    ($($arg:tt)*) => {
        if $crate::engine::debug::debug_flags().is_force_trace_enabled() {
            $crate::debug_print!($($arg)*);
        }
    };
}

/// Toggle debug text
pub fn toggle_debug_text() {
    let current = DEBUG_FLAGS.is_debug_text_enabled();
    DEBUG_FLAGS.set_debug_text(!current);
    println!("Debug text: {}", if !current { "ON" } else { "OFF" });
}

/// Toggle per-step force logging
pub fn toggle_force_trace() {
    let current = DEBUG_FLAGS.is_force_trace_enabled();
    DEBUG_FLAGS.set_force_trace(!current);
    println!("Force trace: {}", if !current { "ON" } else { "OFF" });
}

/// Set debug text flag
pub fn set_debug_text(enabled: bool) {
    DEBUG_FLAGS.set_debug_text(enabled);
}

/// Set force trace flag
pub fn set_force_trace(enabled: bool) {
    DEBUG_FLAGS.set_force_trace(enabled);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_flags_start_off() {
        let flags = DebugFlags::default();
        assert!(!flags.is_debug_text_enabled());
        flags.set_force_trace(true);
        assert!(flags.is_force_trace_enabled());
    }
}
