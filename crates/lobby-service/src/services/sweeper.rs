//! Idle sweeper
//!
//! Periodically evicts participants whose last heartbeat is older than the
//! idle threshold. Each eviction is paired with a departure event in the
//! same store operation.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use lobby_common::SweeperConfig;
use lobby_core::entities::Participant;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Background task evicting stale participants
#[derive(Debug, Clone)]
pub struct IdleSweeper {
    ctx: Arc<ServiceContext>,
    period: Duration,
    idle_threshold: chrono::Duration,
}

impl IdleSweeper {
    /// Create a sweeper from configuration
    pub fn new(ctx: Arc<ServiceContext>, config: &SweeperConfig) -> Self {
        Self::with_timing(ctx, config.interval(), config.idle_threshold())
    }

    /// Create a sweeper with explicit timing
    pub fn with_timing(ctx: Arc<ServiceContext>, period: Duration, idle_threshold: Duration) -> Self {
        Self {
            ctx,
            // tokio intervals panic on a zero period
            period: period.max(Duration::from_millis(1)),
            idle_threshold: chrono::Duration::from_std(idle_threshold)
                .unwrap_or(chrono::Duration::MAX),
        }
    }

    /// Start the sweep loop on the runtime
    ///
    /// The first cycle runs one period after the call. Aborting the returned
    /// handle stops the loop.
    pub fn spawn(self) -> JoinHandle<()> {
        info!(
            period_secs = self.period.as_secs_f64(),
            idle_threshold_secs = self.idle_threshold.num_seconds(),
            "Idle sweeper started"
        );
        tokio::spawn(async move { self.run().await })
    }

    async fn run(self) {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    /// One cycle at wall-clock time; failures are logged, never propagated
    async fn tick(&self) {
        match self.sweep_at(Utc::now()).await {
            Ok(evicted) if evicted.is_empty() => debug!("Sweep found no idle participants"),
            Ok(evicted) => {
                let names: Vec<&str> = evicted.iter().map(|p| p.name.as_str()).collect();
                info!(count = evicted.len(), names = ?names, "Evicted idle participants");
            }
            Err(e) => error!(error = %e, "Idle sweep failed"),
        }
    }

    /// Run a single cycle as if the current time were `now`
    ///
    /// Evicts everyone with `last_seen <= now - idle_threshold` and appends
    /// one departure event per evicted participant, stamped with `now`.
    #[instrument(skip(self))]
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> ServiceResult<Vec<Participant>> {
        let cutoff = Participant::stale_cutoff(now, self.idle_threshold);
        let evicted = self.ctx.participant_repo().evict_stale(cutoff, now).await?;
        Ok(evicted)
    }
}
