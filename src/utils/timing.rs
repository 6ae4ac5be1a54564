//! Call wrappers for timing and debug tracing, plus debug logging setup.

use env_logger::Env;
use log::{debug, info, LevelFilter};
use std::fmt::Debug;
use std::time::{Duration, Instant};

/// Run `f`, log how long it took, and return its result.
///
/// # Examples
/// ```
/// use libbart::utils::timing::timer;
///
/// let total = timer("sum", || (1..=10).sum::<u32>());
/// assert_eq!(total, 55);
/// ```
pub fn timer<T, F>(name: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let (value, elapsed) = timed(f);
    info!("time required ({}): {:.6}s", name, elapsed.as_secs_f64());
    value
}

/// Run `f` and return its result with the elapsed wall time
pub fn timed<T, F>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let before = Instant::now();
    let value = f();
    (value, before.elapsed())
}

/// Log a call with its arguments and its return value at debug level
pub fn debug_call<A, T, F>(name: &str, args: A, f: F) -> T
where
    A: Debug,
    T: Debug,
    F: FnOnce(A) -> T,
{
    debug!("Calling {}({:?})", name, args);
    let value = f(args);
    debug!("{} returned {:?}", name, value);
    value
}

/// Initialise logging at debug level.
///
/// Has no effect when a logger is already installed.
pub fn enable_debug() {
    init_logging(LevelFilter::Debug);
}

/// Initialise `env_logger` with a default filter, `RUST_LOG` still wins.
///
/// Has no effect when a logger is already installed.
pub fn init_logging(level: LevelFilter) {
    let default = level.to_string().to_lowercase();
    if env_logger::Builder::from_env(Env::default().default_filter_or(default))
        .try_init()
        .is_err()
    {
        debug!("Logger already initialised, keeping existing configuration");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_returns_value() {
        assert_eq!(timer("concat", || format!("{}-{}", "a", "b")), "a-b");
    }

    #[test]
    fn test_timed_measures() {
        let (value, elapsed) = timed(|| {
            std::thread::sleep(Duration::from_millis(5));
            7
        });
        assert_eq!(value, 7);
        assert!(elapsed >= Duration::from_millis(5));
    }

    #[test]
    fn test_debug_call_passes_args() {
        let result = debug_call("add", (2, 3), |(a, b)| a + b);
        assert_eq!(result, 5);
    }

    #[test]
    fn test_enable_debug_is_idempotent() {
        enable_debug();
        enable_debug();
    }
}
