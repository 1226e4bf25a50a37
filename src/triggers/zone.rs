//! Trigger zones.

use serde::{Deserialize, Serialize};

use crate::conditions::ConditionRegistry;
use crate::dispatch::{EventRegistry, RaiseOutcome};
use crate::entity::EntityHandle;
use crate::error::TriggerError;
use crate::events::{ChannelId, DetailKey, DetailValue, EventCategory, EventRecord};

/// Which crossing of the zone boundary fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerDirection {
    /// Something entered the zone.
    Enter,
    /// Something left the zone.
    Exit,
}

impl std::fmt::Display for TriggerDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TriggerDirection::Enter => "Enter",
            TriggerDirection::Exit => "Exit",
        };
        write!(f, "{}", name)
    }
}

/// Static configuration for a trigger zone, typically authored in data.
///
/// ## Example
///
/// ```
/// use stagecue::{EventCategory, TriggerZoneConfig};
///
/// let config = TriggerZoneConfig::new("cutscene.bridge", EventCategory::Cutscene)
///     .fire_once()
///     .with_condition("chapter_two_started")
///     .with_detail("CutsceneID", "bridge_collapse");
/// ```
#[derive(Clone, Debug)]
pub struct TriggerZoneConfig {
    /// Channel the zone raises on.
    pub channel: ChannelId,

    /// Category stamped on every record the zone produces.
    pub category: EventCategory,

    /// Latch each direction after its first successful fire.
    pub fire_once: bool,

    /// Names of conditions to attach, resolved against a
    /// `ConditionRegistry` at fire time.
    pub conditions: Vec<String>,

    /// Details seeded into every record's metadata.
    pub details: Vec<(DetailKey, DetailValue)>,

    /// Keys that must be present in the record's metadata before it may be
    /// raised.
    pub required_details: Vec<DetailKey>,
}

impl TriggerZoneConfig {
    /// Create a new config raising on `channel`.
    pub fn new(channel: impl Into<ChannelId>, category: EventCategory) -> Self {
        Self {
            channel: channel.into(),
            category,
            fire_once: false,
            conditions: Vec::new(),
            details: Vec::new(),
            required_details: Vec::new(),
        }
    }

    /// Latch each direction after its first fire (builder pattern).
    #[must_use]
    pub fn fire_once(mut self) -> Self {
        self.fire_once = true;
        self
    }

    /// Attach a named condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, name: impl Into<String>) -> Self {
        self.conditions.push(name.into());
        self
    }

    /// Seed a metadata detail (builder pattern).
    #[must_use]
    pub fn with_detail(
        mut self,
        key: impl Into<DetailKey>,
        value: impl Into<DetailValue>,
    ) -> Self {
        self.details.push((key.into(), value.into()));
        self
    }

    /// Require a metadata key to be present before raising (builder
    /// pattern).
    #[must_use]
    pub fn require_detail(mut self, key: impl Into<DetailKey>) -> Self {
        self.required_details.push(key.into());
        self
    }
}

type PreDispatchFn = dyn Fn(TriggerDirection, &EventRecord);

/// A trigger zone instance.
///
/// The host's collision layer calls [`on_enter`](TriggerZone::on_enter) /
/// [`on_exit`](TriggerZone::on_exit) when something crosses the zone
/// boundary. Each direction has its own monotonic fire-once latch; the
/// latch is checked before any record is built, and only set once the
/// zone's conditions actually pass, so a gated zone can still fire later
/// when its conditions come true.
pub struct TriggerZone {
    config: TriggerZoneConfig,
    fired_enter: bool,
    fired_exit: bool,
    pre_dispatch: Option<Box<PreDispatchFn>>,
}

impl TriggerZone {
    /// Create a zone from its configuration.
    #[must_use]
    pub fn new(config: TriggerZoneConfig) -> Self {
        Self {
            config,
            fired_enter: false,
            fired_exit: false,
            pre_dispatch: None,
        }
    }

    /// Install a callback run after the local gate passes and before the
    /// record is raised (builder pattern). Used for zone-local reactions
    /// like audio stings or camera hints.
    #[must_use]
    pub fn with_pre_dispatch(
        mut self,
        callback: impl Fn(TriggerDirection, &EventRecord) + 'static,
    ) -> Self {
        self.pre_dispatch = Some(Box::new(callback));
        self
    }

    /// The zone's configuration.
    #[must_use]
    pub fn config(&self) -> &TriggerZoneConfig {
        &self.config
    }

    /// Something entered the zone.
    ///
    /// Returns the raise outcome, or `None` if the zone declined to raise
    /// (latched, misconfigured, or gated by its conditions).
    pub fn on_enter(
        &mut self,
        events: &EventRegistry,
        conditions: &ConditionRegistry,
        originator: &EntityHandle,
    ) -> Option<RaiseOutcome> {
        self.fire(TriggerDirection::Enter, events, conditions, originator)
    }

    /// Something left the zone.
    ///
    /// Same contract as [`on_enter`](TriggerZone::on_enter).
    pub fn on_exit(
        &mut self,
        events: &EventRegistry,
        conditions: &ConditionRegistry,
        originator: &EntityHandle,
    ) -> Option<RaiseOutcome> {
        self.fire(TriggerDirection::Exit, events, conditions, originator)
    }

    /// Whether a direction's latch is set.
    #[must_use]
    pub fn has_fired(&self, direction: TriggerDirection) -> bool {
        match direction {
            TriggerDirection::Enter => self.fired_enter,
            TriggerDirection::Exit => self.fired_exit,
        }
    }

    /// Re-arm both latches.
    pub fn reset(&mut self) {
        self.fired_enter = false;
        self.fired_exit = false;
    }

    fn fire(
        &mut self,
        direction: TriggerDirection,
        events: &EventRegistry,
        conditions: &ConditionRegistry,
        originator: &EntityHandle,
    ) -> Option<RaiseOutcome> {
        // Latch check comes before building anything; the registry has no
        // notion of fire-once.
        if self.config.fire_once && self.has_fired(direction) {
            log::debug!(
                "trigger on `{}` already fired for {}",
                self.config.channel,
                direction
            );
            return None;
        }

        let record = match self.build_record(direction, conditions, originator) {
            Ok(record) => record,
            Err(err) => {
                log::error!("trigger on `{}` skipped: {}", self.config.channel, err);
                return None;
            }
        };

        // Local gate first. The registry would gate again, but a zone that
        // doesn't fire must not latch or run its pre-dispatch callback.
        if !record.can_trigger() {
            log::info!(
                "trigger on `{}` gated for {}: conditions not met",
                self.config.channel,
                direction
            );
            return None;
        }

        self.mark_fired(direction);
        if let Some(callback) = &self.pre_dispatch {
            callback(direction, &record);
        }
        Some(events.raise_event(&record))
    }

    fn build_record(
        &self,
        direction: TriggerDirection,
        conditions: &ConditionRegistry,
        originator: &EntityHandle,
    ) -> Result<EventRecord, TriggerError> {
        let mut record = EventRecord::new(
            self.config.channel.clone(),
            self.config.category,
            originator,
        );

        record
            .metadata_mut()
            .add_detail("Direction", direction.to_string());
        for (key, value) in &self.config.details {
            record.metadata_mut().add_detail(key.clone(), value.clone());
        }

        for key in &self.config.required_details {
            if !record.metadata().contains(key.as_str()) {
                return Err(TriggerError::MissingDetail(key.as_str().to_string()));
            }
        }

        for name in &self.config.conditions {
            let condition = conditions
                .build(name)
                .ok_or_else(|| TriggerError::UnknownCondition(name.clone()))?;
            record.add_condition(condition);
        }

        Ok(record)
    }

    fn mark_fired(&mut self, direction: TriggerDirection) {
        match direction {
            TriggerDirection::Enter => self.fired_enter = true,
            TriggerDirection::Exit => self.fired_exit = true,
        }
    }
}

impl std::fmt::Debug for TriggerZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerZone")
            .field("channel", &self.config.channel)
            .field("fired_enter", &self.fired_enter)
            .field("fired_exit", &self.fired_exit)
            .finish()
    }
}
