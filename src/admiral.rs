// Admiral module - the continuous control loop
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::client::GameGateway;
use crate::clock::Clock;
use crate::config::{AgentConfig, ConfigManager};
use crate::error::EngineResult;
use crate::operations::*;

/// What one iteration of the loop ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Orders went out; poll again straight away
    Dispatched(DispatchReport),
    /// Nothing to do until `wait` has passed
    Idle { wait: Duration },
}

pub struct Admiral {
    gateway: Arc<dyn GameGateway>,
    clock: Arc<dyn Clock>,
    config: AgentConfig,
    world: WorldSnapshot,
    session: EngineSession,
}

impl Admiral {
    pub fn new(gateway: Arc<dyn GameGateway>, clock: Arc<dyn Clock>, config: AgentConfig) -> Self {
        Self {
            gateway,
            clock,
            config,
            world: WorldSnapshot::new(),
            session: EngineSession::new(),
        }
    }

    pub fn session(&self) -> &EngineSession {
        &self.session
    }

    pub fn world(&self) -> &WorldSnapshot {
        &self.world
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn apply_config(&mut self, config: AgentConfig) {
        info!("admiral picked up new configuration");
        self.config = config;
    }

    /// Refresh, classify, then either dispatch every available fleet or
    /// compute the next sleep. Gateway errors abort the iteration.
    pub async fn run_cycle(&mut self) -> EngineResult<CycleOutcome> {
        let now = self.clock.now();
        self.world
            .refresh_if_stale(self.gateway.as_ref(), now, &self.config)
            .await?;

        let fleets = self.gateway.list_fleets().await?;
        let available = classify_available(&fleets, &self.session, &self.config.fleets);
        let minute = self.clock.minute_of_hour();
        let only_docked_combat = only_docked_combat_past_window(&available, minute, &self.config);

        debug!(
            fleets = fleets.len(),
            available = available.len(),
            only_docked_combat,
            "fleet roster classified"
        );

        if !available.is_empty() && !only_docked_combat {
            let (combat, trade) = split_roles(&available, &self.config.fleets);
            let gateway = self.gateway.as_ref();
            let clock = self.clock.as_ref();

            let mut report = CombatOperations::new(gateway, &self.world, &self.config, clock)
                .dispatch(&combat, &mut self.session)
                .await?;
            report.extend(
                TradingOperations::new(gateway, &self.world, &self.config)
                    .dispatch(&trade, &mut self.session)
                    .await?,
            );
            return Ok(CycleOutcome::Dispatched(report));
        }

        self.session.reset_cycle();
        let wait = next_wake(&fleets, only_docked_combat, now, minute, &self.config.timing);
        Ok(CycleOutcome::Idle { wait })
    }

    /// Runs until a cycle fails. There is no retry here; a fresh process
    /// rebuilds all state.
    pub async fn run_continuous(&mut self, config_manager: &mut ConfigManager) -> EngineResult<()> {
        let mut cycle_count: u64 = 0;

        loop {
            cycle_count += 1;

            if config_manager.check_and_reload() {
                self.apply_config(config_manager.config().clone());
            }

            match self.run_cycle().await? {
                CycleOutcome::Dispatched(report) => {
                    let commands = report.iter().filter(|(_, action)| action.is_command()).count();
                    info!(cycle = cycle_count, fleets = report.len(), commands, "cycle dispatched");
                    if let Some(pause) = pause_after_dispatch(&report, &self.config.timing) {
                        debug!(seconds = pause.as_secs(), "no commands issued, pausing");
                        tokio::time::sleep(pause).await;
                    }
                }
                CycleOutcome::Idle { wait } => {
                    info!(
                        cycle = cycle_count,
                        minutes = (wait.as_secs() as f64 / 60.0).round() as u64,
                        "next fleet ready"
                    );
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}
