/// Picker Lifecycle - Stateright Model
/// Formally verifies the open/close, settle-suppression, and bounds-refresh
/// protocol: a spurious settle emitted during a programmatic jump must never
/// mutate the selection, and the refresh timer must be silent while closed.
///
/// Run with: cargo test --release picker_model -- --nocapture

use stateright::*;

/// Events the engine reacts to, including the scheduled disarm tasks
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum PickerAction {
    Open,
    Close,
    /// Programmatic jump (preset tap, mode switch); arms suppression
    Jump,
    /// The wheel capability finished animating the newest jump
    AnimationEnd,
    /// The disarm task for the newest jump fires. The dead-time window is
    /// sized to outlast the animation, so this is only enabled once the
    /// animation has ended.
    DisarmCurrent,
    /// A disarm task from a superseded jump fires late; must be a no-op
    DisarmStale,
    /// The user stops scrolling
    UserSettle,
    /// The capability emits an intermediate settle mid-jump
    SpuriousSettle,
    /// The periodic bounds refresh ticks
    RefreshTick,
}

/// Abstracted engine state: booleans for the lifecycle flags plus bounded
/// counters for the observable outcomes the properties quantify over
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct PickerModel {
    pub open: bool,
    pub dynamic: bool,
    pub suppressed: bool,
    pub jump_in_flight: bool,
    pub opens: u8,
    pub jumps: u8,
    pub ticks: u8,
    pub applied_settles: u8,
    pub dropped_settles: u8,
    pub phantom_settles: u8,
}

/// Configuration for the model checker
#[derive(Clone)]
pub struct LifecycleChecker {
    pub max_opens: u8,
    pub max_jumps: u8,
    pub max_settles: u8,
    pub max_ticks: u8,
}

impl Default for LifecycleChecker {
    fn default() -> Self {
        Self {
            max_opens: 2,
            max_jumps: 3,
            max_settles: 2,
            max_ticks: 2,
        }
    }
}

impl Model for LifecycleChecker {
    type State = PickerModel;
    type Action = PickerAction;

    fn init_states(&self) -> Vec<Self::State> {
        // Explore both a fixed-bounds picker and one with a relative bound
        [false, true]
            .into_iter()
            .map(|dynamic| PickerModel {
                open: false,
                dynamic,
                suppressed: false,
                jump_in_flight: false,
                opens: 0,
                jumps: 0,
                ticks: 0,
                applied_settles: 0,
                dropped_settles: 0,
                phantom_settles: 0,
            })
            .collect()
    }

    fn actions(&self, state: &Self::State, actions: &mut Vec<Self::Action>) {
        if !state.open {
            if state.opens < self.max_opens && state.jumps < self.max_jumps {
                actions.push(PickerAction::Open);
            }
            return;
        }

        actions.push(PickerAction::Close);
        if state.jumps < self.max_jumps {
            actions.push(PickerAction::Jump);
        }
        if state.jump_in_flight {
            actions.push(PickerAction::AnimationEnd);
            actions.push(PickerAction::SpuriousSettle);
        }
        if state.suppressed && !state.jump_in_flight {
            actions.push(PickerAction::DisarmCurrent);
        }
        if state.jumps >= 2 {
            actions.push(PickerAction::DisarmStale);
        }
        if state.applied_settles + state.dropped_settles < self.max_settles {
            actions.push(PickerAction::UserSettle);
        }
        if state.dynamic && state.ticks < self.max_ticks {
            actions.push(PickerAction::RefreshTick);
        }
    }

    fn next_state(&self, state: &Self::State, action: Self::Action) -> Option<Self::State> {
        let mut next = state.clone();

        match action {
            PickerAction::Open => {
                // Opening resolves bounds and issues the initial sync jump
                next.open = true;
                next.opens = state.opens.saturating_add(1);
                next.jumps = state.jumps.saturating_add(1);
                next.suppressed = true;
                next.jump_in_flight = true;
            }

            PickerAction::Close => {
                // Timer cancellation and flag teardown are synchronous
                next.open = false;
                next.suppressed = false;
                next.jump_in_flight = false;
            }

            PickerAction::Jump => {
                // A newer jump re-arms and supersedes any pending disarm
                next.jumps = state.jumps.saturating_add(1);
                next.suppressed = true;
                next.jump_in_flight = true;
            }

            PickerAction::AnimationEnd => {
                next.jump_in_flight = false;
            }

            PickerAction::DisarmCurrent => {
                next.suppressed = false;
            }

            PickerAction::DisarmStale => {
                // Generation mismatch: ignored by the engine
            }

            PickerAction::UserSettle => {
                if state.suppressed {
                    next.dropped_settles = state.dropped_settles.saturating_add(1);
                } else {
                    next.applied_settles = state.applied_settles.saturating_add(1);
                }
            }

            PickerAction::SpuriousSettle => {
                if !state.suppressed {
                    next.phantom_settles = state.phantom_settles.saturating_add(1);
                }
            }

            PickerAction::RefreshTick => {
                next.ticks = state.ticks.saturating_add(1);
            }
        }

        Some(next)
    }

    fn properties(&self) -> Vec<Property<Self>> {
        vec![
            // Safety: a settle emitted by the capability during a jump can
            // never be mistaken for a user-driven change
            Property::always("no_phantom_settles", |_, state: &PickerModel| {
                state.phantom_settles == 0
            }),
            // Safety: suppression outlasts the jump animation
            Property::always("suppression_covers_jump", |_, state: &PickerModel| {
                !state.jump_in_flight || state.suppressed
            }),
            // Safety: closing tears everything down synchronously
            Property::always("closed_is_quiescent", |_, state: &PickerModel| {
                state.open || (!state.suppressed && !state.jump_in_flight)
            }),
            // Safety: fixed bounds never refresh
            Property::always("fixed_bounds_never_tick", |_, state: &PickerModel| {
                state.dynamic || state.ticks == 0
            }),
            // Coverage: a user settle can land once the flag clears
            Property::sometimes("user_settle_lands", |_, state: &PickerModel| {
                state.applied_settles > 0
            }),
            // Coverage: the accepted race really drops a user settle
            Property::sometimes("race_drops_user_settle", |_, state: &PickerModel| {
                state.dropped_settles > 0
            }),
            // Coverage: relative bounds do refresh
            Property::sometimes("bounds_refresh_occurs", |_, state: &PickerModel| {
                state.ticks > 0
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stateright::Checker;

    #[test]
    fn picker_model_check_safety() {
        let checker = LifecycleChecker::default().checker().spawn_bfs().join();

        println!("States explored: {}", checker.unique_state_count());

        checker.assert_properties();
    }

    #[test]
    fn picker_model_explores_both_bound_kinds() {
        let checker = LifecycleChecker::default().checker().spawn_bfs().join();
        assert!(
            checker.unique_state_count() > 20,
            "Expected more than 20 states, got {}",
            checker.unique_state_count()
        );
    }

    #[test]
    fn picker_model_suppression_path() {
        // Verify the canonical sequence: open -> spurious dropped ->
        // animation ends -> disarm -> user settle lands -> close
        let model = LifecycleChecker::default();

        let mut state = model.init_states()[0].clone();
        assert!(!state.open);

        state = model.next_state(&state, PickerAction::Open).unwrap();
        assert!(state.open);
        assert!(state.suppressed);
        assert!(state.jump_in_flight);

        // Capability emits a spurious settle mid-jump: swallowed
        state = model
            .next_state(&state, PickerAction::SpuriousSettle)
            .unwrap();
        assert_eq!(state.phantom_settles, 0);

        state = model
            .next_state(&state, PickerAction::AnimationEnd)
            .unwrap();
        assert!(state.suppressed, "flag is not cleared synchronously");

        state = model
            .next_state(&state, PickerAction::DisarmCurrent)
            .unwrap();
        assert!(!state.suppressed);

        state = model.next_state(&state, PickerAction::UserSettle).unwrap();
        assert_eq!(state.applied_settles, 1);

        state = model.next_state(&state, PickerAction::Close).unwrap();
        assert!(!state.open);
        assert!(!state.suppressed);
        assert!(!state.jump_in_flight);
    }

    #[test]
    fn picker_model_race_path() {
        // A user settle arriving before the disarm is dropped, by design
        let model = LifecycleChecker::default();

        let mut state = model.init_states()[0].clone();
        state = model.next_state(&state, PickerAction::Open).unwrap();
        state = model.next_state(&state, PickerAction::UserSettle).unwrap();
        assert_eq!(state.dropped_settles, 1);
        assert_eq!(state.applied_settles, 0);
    }
}
