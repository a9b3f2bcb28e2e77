//! Process-wide native runtime state.
//!
//! The runtime is initialised lazily, exactly once, before the first native
//! allocation. It also keeps count of native buffers so leaks show up in
//! [`RuntimeStats`].
use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::OnceCell;

static RUNTIME: OnceCell<Runtime> = OnceCell::new();

/// Bookkeeping for native allocations made through this crate.
#[derive(Debug, Default)]
pub struct Runtime {
    allocated: AtomicUsize,
    live: AtomicUsize,
    released_explicitly: AtomicUsize,
    released_on_drop: AtomicUsize,
}

/// A snapshot of the [`Runtime`] counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuntimeStats {
    /// Buffers allocated since initialisation.
    pub allocated: usize,
    /// Buffers currently holding an allocation.
    pub live: usize,
    /// Buffers freed through [`NativeBuffer::release`](crate::buffer::NativeBuffer::release).
    pub released_explicitly: usize,
    /// Buffers freed when dropped without an explicit release.
    pub released_on_drop: usize,
}

/// Returns the process-wide runtime, initialising it on first use.
///
/// Concurrent first calls block until a single initialisation has completed.
pub fn runtime() -> &'static Runtime {
    RUNTIME.get_or_init(|| {
        log::info!("initialised native buffer bookkeeping");
        Runtime::default()
    })
}

/// Whether [`runtime`] has been called at least once.
pub fn is_initialized() -> bool {
    RUNTIME.get().is_some()
}

impl Runtime {
    pub fn stats(&self) -> RuntimeStats {
        RuntimeStats {
            allocated: self.allocated.load(Ordering::Relaxed),
            live: self.live.load(Ordering::Relaxed),
            released_explicitly: self.released_explicitly.load(Ordering::Relaxed),
            released_on_drop: self.released_on_drop.load(Ordering::Relaxed),
        }
    }

    /// Number of native buffers currently holding an allocation.
    pub fn live_buffers(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }

    pub(crate) fn note_allocation(&self) {
        self.allocated.fetch_add(1, Ordering::Relaxed);
        self.live.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn note_release(&self, explicit: bool) {
        self.live.fetch_sub(1, Ordering::Relaxed);
        if explicit {
            self.released_explicitly.fetch_add(1, Ordering::Relaxed);
        } else {
            self.released_on_drop.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_is_a_singleton() {
        let a = runtime() as *const Runtime;
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| runtime() as *const Runtime as usize))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), a as usize);
        }
        assert!(is_initialized());
    }

    #[test]
    fn counters_track_allocations() {
        let rt = Runtime::default();
        rt.note_allocation();
        rt.note_allocation();
        rt.note_release(true);
        rt.note_release(false);
        assert_eq!(
            rt.stats(),
            RuntimeStats {
                allocated: 2,
                live: 0,
                released_explicitly: 1,
                released_on_drop: 1,
            }
        );
    }
}
