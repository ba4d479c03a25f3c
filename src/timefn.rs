// timefn - portable high-resolution monotonic timer abstraction
// Migrated from timefn.c / timefn.h (lz4 1.10.0)
//
// Rust's std::time::Instant is monotonic and MT-safe on all supported platforms,
// replacing the platform-specific C implementations (QueryPerformanceCounter,
// mach_absolute_time, clock_gettime, timespec_get, clock()).

use std::time::Instant;

/// Nanosecond duration type (equivalent to C `Duration_ns` / `unsigned long long`).
pub type DurationNs = u64;

/// Opaque timestamp container. The absolute value is not meaningful;
/// use it only to compute a duration between two measurements.
/// Equivalent to C `TIME_t`.
#[derive(Clone, Copy)]
pub struct TimeT {
    t: Instant,
}

/// Returns current monotonic timestamp.
/// Equivalent to `TIME_t TIME_getTime(void)`.
pub fn get_time() -> TimeT {
    TimeT { t: Instant::now() }
}

/// Measures nanoseconds elapsed since `clock_start` (captures current time internally).
/// Equivalent to `Duration_ns TIME_clockSpan_ns(TIME_t clockStart)`.
pub fn clock_span_ns(clock_start: TimeT) -> DurationNs {
    clock_start.t.elapsed().as_nanos() as DurationNs
}
