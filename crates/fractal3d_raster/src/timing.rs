//! Caller-owned timing context
//!
//! [`Profiler`] accumulates wall-clock time per named section. It is a plain
//! value owned by the host loop and handed to the engine's frame-boundary
//! calls; there is no process-wide instance.
//!
//! [`FpsCounter`] turns per-frame deltas into a frames-per-second figure that
//! updates once per elapsed second.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Accumulated timings for one named section
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProfileEntry {
    pub iterations: u32,
    pub total: Duration,
    pub max: Duration,
}

impl ProfileEntry {
    /// Mean time per iteration
    pub fn average(&self) -> Duration {
        if self.iterations == 0 {
            Duration::ZERO
        } else {
            self.total / self.iterations
        }
    }

    fn record(&mut self, elapsed: Duration) {
        self.iterations += 1;
        self.total += elapsed;
        self.max = self.max.max(elapsed);
    }
}

/// Named-section profiler
#[derive(Debug, Default)]
pub struct Profiler {
    enabled: bool,
    running: BTreeMap<String, Instant>,
    entries: BTreeMap<String, ProfileEntry>,
}

impl Profiler {
    /// An enabled profiler
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// A profiler that ignores every call
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start (or restart) timing `name`
    pub fn start(&mut self, name: &str) {
        if self.enabled {
            self.running.insert(name.to_string(), Instant::now());
        }
    }

    /// Stop timing `name`. A stop without a matching start is ignored.
    pub fn stop(&mut self, name: &str) {
        if let Some(started) = self.running.remove(name) {
            self.record(name, started.elapsed());
        }
    }

    /// Add one measured iteration directly
    pub fn record(&mut self, name: &str, elapsed: Duration) {
        if self.enabled {
            self.entries.entry(name.to_string()).or_default().record(elapsed);
        }
    }

    /// Run `f` inside a timed section
    pub fn time<T>(&mut self, name: &str, f: impl FnOnce() -> T) -> T {
        self.start(name);
        let out = f();
        self.stop(name);
        out
    }

    pub fn entry(&self, name: &str) -> Option<&ProfileEntry> {
        self.entries.get(name)
    }

    /// Entries sorted by name
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ProfileEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Log a summary table at info level
    pub fn log_report(&self) {
        if self.entries.is_empty() {
            return;
        }
        log::info!(
            "{:<20} | {:>14} | {:>8} | {:>14} | {:>14}",
            "Section", "Avg (ms)", "Iters", "Max (ms)", "Total (ms)"
        );
        for (name, e) in self.entries() {
            log::info!(
                "{:<20} | {:>14.3} | {:>8} | {:>14.3} | {:>14.3}",
                name,
                e.average().as_secs_f64() * 1000.0,
                e.iterations,
                e.max.as_secs_f64() * 1000.0,
                e.total.as_secs_f64() * 1000.0,
            );
        }
    }
}

/// Frames-per-second counter fed with frame deltas
#[derive(Clone, Copy, Debug, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f32,
    fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame that took `dt` seconds. Returns true when a new
    /// per-second value was published.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed >= 1.0 {
            self.fps = self.frames;
            self.frames = 0;
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    /// Frames counted in the last completed second
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
