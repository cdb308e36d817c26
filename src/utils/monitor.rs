#[cfg(feature = "cli")]
use sysinfo::{Pid, System};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ProcessStats {
    pub memory_usage_mb: u64,
    pub elapsed_time: Duration,
}

/// Optional resource reporting around a conversion run.
pub struct SystemMonitor {
    #[cfg(feature = "cli")]
    system: Option<(System, Pid)>,
    start_time: Instant,
    enabled: bool,
}

impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        #[cfg(feature = "cli")]
        let system = if enabled {
            sysinfo::get_current_pid().ok().map(|pid| {
                let mut system = System::new();
                system.refresh_all();
                (system, pid)
            })
        } else {
            None
        };

        Self {
            #[cfg(feature = "cli")]
            system,
            start_time: Instant::now(),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[cfg(feature = "cli")]
    pub fn get_stats(&mut self) -> Option<ProcessStats> {
        if !self.enabled {
            return None;
        }
        let elapsed_time = self.start_time.elapsed();
        let (system, pid) = self.system.as_mut()?;
        system.refresh_all();
        let process = system.process(*pid)?;
        Some(ProcessStats {
            memory_usage_mb: process.memory() / 1024 / 1024,
            elapsed_time,
        })
    }

    #[cfg(not(feature = "cli"))]
    pub fn get_stats(&mut self) -> Option<ProcessStats> {
        if !self.enabled {
            return None;
        }
        Some(ProcessStats {
            memory_usage_mb: 0,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&mut self, phase: &str) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 {} - Memory: {}MB, Time: {:?}",
                phase,
                stats.memory_usage_mb,
                stats.elapsed_time
            );
        }
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
