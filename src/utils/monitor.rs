use std::time::{Duration, Instant};

/// 單一階段的耗時紀錄
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub elapsed: Duration,
    pub items: usize,
}

/// 記錄 extract / transform / load 各階段耗時
pub struct PhaseMonitor {
    enabled: bool,
    started: Instant,
    phase_started: Instant,
    phases: Vec<PhaseStats>,
}

impl PhaseMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            started: now,
            phase_started: now,
            phases: Vec::new(),
        }
    }

    pub fn start_phase(&mut self) {
        self.phase_started = Instant::now();
    }

    pub fn end_phase(&mut self, phase: &str, items: usize) {
        if !self.enabled {
            return;
        }

        let stats = PhaseStats {
            phase: phase.to_string(),
            elapsed: self.phase_started.elapsed(),
            items,
        };
        tracing::info!(
            "📊 {} - {} items in {:?}",
            stats.phase,
            stats.items,
            stats.elapsed
        );
        self.phases.push(stats);
    }

    pub fn log_final_stats(&self) {
        if self.enabled {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Phases: {}",
                self.started.elapsed(),
                self.phases.len()
            );
        }
    }

    pub fn phases(&self) -> &[PhaseStats] {
        &self.phases
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for PhaseMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
