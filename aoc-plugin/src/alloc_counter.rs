//! Allocation counting for benchmarks
//!
//! A plugin opts in with [`count_allocations!`](crate::count_allocations),
//! which installs [`CountingAllocator`] as its global allocator. The runner
//! reads the counters through the solver declaration before and after a
//! benchmark round.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

static ALLOCATIONS: AtomicU64 = AtomicU64::new(0);
static BYTES: AtomicU64 = AtomicU64::new(0);

/// Cumulative allocation counters
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocStats {
    pub allocations: u64,
    pub bytes: u64,
}

impl AllocStats {
    /// Counters accumulated between `earlier` and `self`
    pub fn since(self, earlier: AllocStats) -> AllocStats {
        AllocStats {
            allocations: self.allocations.saturating_sub(earlier.allocations),
            bytes: self.bytes.saturating_sub(earlier.bytes),
        }
    }
}

/// System allocator wrapper that counts allocations and allocated bytes
pub struct CountingAllocator;

fn record(size: usize) {
    ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    BYTES.fetch_add(size as u64, Ordering::Relaxed);
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        record(layout.size());
        unsafe { System.alloc(layout) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        record(layout.size());
        unsafe { System.alloc_zeroed(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        record(new_size);
        unsafe { System.realloc(ptr, layout, new_size) }
    }
}

/// Current counters of this binary's [`CountingAllocator`]
///
/// Always zero unless the allocator is installed.
pub fn snapshot() -> AllocStats {
    AllocStats {
        allocations: ALLOCATIONS.load(Ordering::Relaxed),
        bytes: BYTES.load(Ordering::Relaxed),
    }
}

/// [`snapshot`] with the C ABI, stored in every solver declaration
pub extern "C" fn snapshot_extern() -> AllocStats {
    snapshot()
}

/// Install [`CountingAllocator`] as the global allocator of the calling crate
#[macro_export]
macro_rules! count_allocations {
    () => {
        #[global_allocator]
        static AOC_PLUGIN_ALLOCATOR: $crate::alloc_counter::CountingAllocator =
            $crate::alloc_counter::CountingAllocator;
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_since_is_saturating() {
        let earlier = AllocStats {
            allocations: 5,
            bytes: 100,
        };
        let later = AllocStats {
            allocations: 7,
            bytes: 164,
        };
        assert_eq!(
            later.since(earlier),
            AllocStats {
                allocations: 2,
                bytes: 64
            }
        );
        assert_eq!(earlier.since(later), AllocStats::default());
    }

    #[test]
    fn test_direct_allocation_is_counted() {
        let layout = Layout::from_size_align(48, 8).unwrap();
        let before = snapshot();
        unsafe {
            let ptr = CountingAllocator.alloc(layout);
            assert!(!ptr.is_null());
            let ptr = CountingAllocator.realloc(ptr, layout, 96);
            assert!(!ptr.is_null());
            CountingAllocator.dealloc(ptr, Layout::from_size_align(96, 8).unwrap());
        }
        let delta = snapshot().since(before);
        assert!(delta.allocations >= 2);
        assert!(delta.bytes >= 48 + 96);
    }
}
