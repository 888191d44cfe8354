#[cfg(feature = "cli")]
use std::sync::atomic::{AtomicU64, Ordering};
#[cfg(feature = "cli")]
use std::sync::{Arc, Mutex};
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct SessionStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed_time: Duration,
    pub exchanges: u64,
}

/// Per-session resource and exchange tracking for the chat process.
#[cfg(feature = "cli")]
pub struct SessionMonitor {
    system: Arc<Mutex<System>>,
    pid: Pid,
    start_time: Instant,
    peak_memory: Arc<Mutex<u64>>,
    exchanges: AtomicU64,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SessionMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());

        let pid = sysinfo::get_current_pid().expect("Failed to get current PID");

        // 初始刷新
        system.refresh_all();

        Self {
            system: Arc::new(Mutex::new(system)),
            pid,
            start_time: Instant::now(),
            peak_memory: Arc::new(Mutex::new(0)),
            exchanges: AtomicU64::new(0),
            enabled,
        }
    }

    pub fn get_stats(&self) -> Option<SessionStats> {
        if !self.enabled {
            return None;
        }

        let mut system = self.system.lock().ok()?;
        system.refresh_all();

        let process = system.process(self.pid)?;
        let memory_mb = process.memory() / 1024 / 1024;

        let mut peak = self.peak_memory.lock().ok()?;
        if memory_mb > *peak {
            *peak = memory_mb;
        }
        let peak_memory = *peak;

        Some(SessionStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: memory_mb,
            peak_memory_mb: peak_memory,
            elapsed_time: self.start_time.elapsed(),
            exchanges: self.exchanges.load(Ordering::Relaxed),
        })
    }

    /// Record one completed question/answer exchange.
    pub fn observe_exchange(&self, lang: &str, elapsed: Duration) {
        let count = self.exchanges.fetch_add(1, Ordering::Relaxed) + 1;

        if !self.enabled {
            return;
        }

        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 Exchange #{} ({}) - {:?}, CPU: {:.1}%, Memory: {}MB, Peak: {}MB",
                count,
                lang,
                elapsed,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.peak_memory_mb
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 Session complete - {} exchanges, Total Time: {:?}, Peak Memory: {}MB",
                stats.exchanges,
                stats.elapsed_time,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for SessionMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 為非CLI環境提供空實現
#[cfg(not(feature = "cli"))]
pub struct SessionMonitor;

#[cfg(not(feature = "cli"))]
impl SessionMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn observe_exchange(&self, _lang: &str, _elapsed: std::time::Duration) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
