//! Battle session: owns the battle, drives AI turns and publishes events.

use std::time::Duration;

use game_core::{
    BattleEngine, BattleEvent, BattleState, GameConfig, GameError, Input, PcgRng, Phase, RngOracle,
    SideId, TransitionError,
};

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::events::{Event, EventBus, EventLog, Topic};

/// How an autoplayed battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionOutcome {
    pub victor: Option<SideId>,
    pub turn: u32,
}

/// A running battle.
///
/// Player input goes through [`confirm`](Self::confirm) and
/// [`cancel`](Self::cancel). Whenever the acting side is AI controlled, the
/// session plays it one unit at a time, sleeping `ai_delay` between units.
/// The resulting events and state match a synchronous
/// [`BattleEngine::end_turn`].
pub struct BattleSession {
    state: BattleState,
    rng: Box<dyn RngOracle>,
    /// Engine settings with automatic turn ending switched off; the session
    /// ends turns itself so AI sides can be paced.
    engine_config: GameConfig,
    auto_end_turn: bool,
    ai_delay: Duration,
    bus: EventBus,
    log: Option<EventLog>,
}

impl BattleSession {
    pub fn new(state: BattleState, config: RuntimeConfig) -> Self {
        Self::with_rng(state, config, Box::new(PcgRng))
    }

    pub fn with_rng(state: BattleState, config: RuntimeConfig, rng: Box<dyn RngOracle>) -> Self {
        let auto_end_turn = config.game_config.auto_end_turn;
        let engine_config = GameConfig {
            auto_end_turn: false,
            ..config.game_config
        };
        Self {
            state,
            rng,
            engine_config,
            auto_end_turn,
            ai_delay: config.ai_delay,
            bus: EventBus::with_capacity(config.event_buffer_size),
            log: None,
        }
    }

    /// Also appends every published event to `log`, in publication order.
    pub fn with_event_log(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Flushes the event log, if any.
    pub fn flush(&mut self) -> Result<()> {
        match self.log.as_mut() {
            Some(log) => log.flush(),
            None => Ok(()),
        }
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn into_state(self) -> BattleState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    fn engine(&mut self) -> BattleEngine<'_> {
        BattleEngine::new(&mut self.state, &*self.rng, &self.engine_config)
    }

    /// Publishes engine events stamped with the current turn and side.
    fn publish(&mut self, events: &[BattleEvent]) -> Result<()> {
        for event in events {
            let event = Event {
                turn: self.state.turn,
                side: self.state.current_side,
                event: event.clone(),
            };
            if let Some(log) = self.log.as_mut() {
                log.append(&event)?;
            }
            self.bus.publish(event);
        }
        Ok(())
    }

    /// Applies a player confirm input.
    ///
    /// When the input finishes the side's last ready unit and automatic turn
    /// ending is on, the turn passes and any AI sides that follow are played.
    pub async fn confirm(&mut self, input: Input) -> Result<Vec<BattleEvent>> {
        let mut events = self.engine().confirm(input).inspect_err(log_rejection)?;
        self.publish(&events)?;

        let idle = self.state.phase.is_idle();
        if idle && self.auto_end_turn && self.engine().side_exhausted() {
            events.extend(self.end_turn().await?);
        }
        Ok(events)
    }

    pub fn cancel(&mut self) -> Result<Vec<BattleEvent>> {
        let events = self.engine().cancel().inspect_err(log_rejection)?;
        self.publish(&events)?;
        Ok(events)
    }

    /// Ends the acting side's turn, then plays the AI sides that follow.
    pub async fn end_turn(&mut self) -> Result<Vec<BattleEvent>> {
        let mut events = self.engine().pass_turn()?;
        self.publish(&events)?;

        for _ in 0..self.state.sides.len() {
            if self.state.phase.is_concluded() || !self.engine().is_ai_turn() {
                break;
            }
            events.extend(self.play_side().await?);
        }
        Ok(events)
    }

    /// Plays every ready unit of the acting side as AI, whoever controls it,
    /// then passes the turn.
    pub async fn play_side(&mut self) -> Result<Vec<BattleEvent>> {
        let side = self.state.current_side;
        tracing::debug!(%side, turn = self.state.turn, "playing side");

        let mut events = Vec::new();
        for unit in self.engine().ai_roster() {
            if self.state.phase.is_concluded() {
                return Ok(events);
            }
            if !self.state.unit(unit).is_some_and(|u| u.is_alive() && u.enabled) {
                continue;
            }

            let acted = self.engine().run_ai_unit(unit)?;
            self.publish(&acted)?;
            events.extend(acted);

            if !self.ai_delay.is_zero() {
                tokio::time::sleep(self.ai_delay).await;
            }
        }

        if !self.state.phase.is_concluded() {
            let passed = self.engine().pass_turn()?;
            self.publish(&passed)?;
            events.extend(passed);
        }
        Ok(events)
    }

    /// Plays every side as AI until a victor emerges or `max_turns` turns
    /// have been played.
    pub async fn autoplay(&mut self, max_turns: u32) -> Result<SessionOutcome> {
        while !self.state.phase.is_concluded() && self.state.turn <= max_turns {
            let before = (self.state.turn, self.state.current_side);
            self.play_side().await?;
            // Nobody left to hand over to.
            if !self.state.phase.is_concluded()
                && before == (self.state.turn, self.state.current_side)
            {
                break;
            }
        }

        let outcome = SessionOutcome {
            victor: match self.state.phase {
                Phase::Concluded { victor } => Some(victor),
                _ => None,
            },
            turn: self.state.turn,
        };
        tracing::info!(victor = ?outcome.victor, turn = outcome.turn, "autoplay finished");
        Ok(outcome)
    }
}

fn log_rejection(err: &TransitionError) {
    let severity = err.severity();
    if severity.is_internal() {
        tracing::warn!(code = err.error_code(), severity = severity.as_str(), "{err}");
    } else {
        tracing::debug!(code = err.error_code(), severity = severity.as_str(), "input rejected: {err}");
    }
}
