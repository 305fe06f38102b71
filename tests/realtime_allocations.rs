use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use timestretch_kernels::{
    evaluate, seek_best_overlap, ChannelCount, FilterKernel, OverlapSearch,
};

/// Counts heap requests made while `TRACKING` is set.
struct CountingAllocator;

static TRACKING: AtomicBool = AtomicBool::new(false);
static REQUESTS: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL_ALLOCATOR: CountingAllocator = CountingAllocator;

fn record_request() {
    if TRACKING.load(Ordering::Relaxed) {
        REQUESTS.fetch_add(1, Ordering::Relaxed);
    }
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        record_request();
        unsafe { System.alloc(layout) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        record_request();
        unsafe { System.alloc_zeroed(layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        record_request();
        unsafe { System.realloc(ptr, layout, new_size) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

/// Runs `f` and returns how many heap requests it made.
fn count_requests<R>(f: impl FnOnce() -> R) -> (R, usize) {
    REQUESTS.store(0, Ordering::Relaxed);
    TRACKING.store(true, Ordering::SeqCst);
    let out = f();
    TRACKING.store(false, Ordering::SeqCst);
    (out, REQUESTS.load(Ordering::Relaxed))
}

fn test_chunk(frames: usize, channels: usize, sample_rate: f32) -> Vec<f32> {
    let mut out = Vec::with_capacity(frames * channels);
    for n in 0..frames {
        let t = n as f32 / sample_rate;
        for ch in 0..channels {
            let freq = 95.0 + 47.0 * ch as f32;
            out.push((2.0 * std::f32::consts::PI * freq * t).sin());
        }
    }
    out
}

#[test]
fn test_sequential_kernels_do_not_allocate() {
    const SAMPLE_RATE: f32 = 44_100.0;
    const CHUNK_FRAMES: usize = 1024;
    const ITERS: usize = 32;

    let kernel = FilterKernel::new(vec![1.0f32 / 32.0; 32], 1.0, 0).unwrap();
    let search = OverlapSearch::new(ChannelCount::STEREO, 128, 256).unwrap();
    let channel_counts: Vec<ChannelCount> = [1u16, 2, 6]
        .iter()
        .map(|&c| ChannelCount::new(c).unwrap())
        .collect();
    let chunks: Vec<Vec<f32>> = channel_counts
        .iter()
        .map(|c| test_chunk(CHUNK_FRAMES, c.get(), SAMPLE_RATE))
        .collect();
    let mut dest = vec![0.0f32; CHUNK_FRAMES * 6];
    let reference = test_chunk(search.reference_len() / 2, 2, SAMPLE_RATE);
    let compare = reference[64..64 + search.compare_len()].to_vec();

    let (checksum, requests) = count_requests(|| {
        let mut checksum = 0usize;
        for _ in 0..ITERS {
            for (&channels, chunk) in channel_counts.iter().zip(&chunks) {
                checksum += evaluate(&kernel, channels, &mut dest, chunk);
            }
            checksum += search.seek(&compare, &reference).offset;
            checksum += seek_best_overlap(ChannelCount::STEREO, 128, 256, &compare, &reference);
        }
        checksum
    });

    assert!(checksum > 0);
    assert_eq!(requests, 0, "kernels made {} heap requests", requests);
}
