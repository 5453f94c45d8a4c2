//! Screen navigation state machine
//!
//! `transition` is a pure function over [`NavigationState`]; the
//! [`NavigationController`] owns one state per session and applies the
//! fallback-to-home policy when context is missing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{KultureError, Result};
use crate::models::{DateRange, Region};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Home,
    Map,
    Detail,
    Guide,
}

impl Screen {
    /// Screens that cannot render without a selected region
    pub fn requires_region(self) -> bool {
        matches!(self, Screen::Map | Screen::Detail)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Home => "home",
            Screen::Map => "map",
            Screen::Detail => "detail",
            Screen::Guide => "guide",
        };
        f.write_str(name)
    }
}

/// User-triggered navigation events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavEvent {
    /// Region picked from the known list plus "show map"
    ShowMap { region: Region },
    ResponsibleTourism,
    Back,
    ExploreDetails,
    BackToMap,
    BackToHome,
    SubmitDates { range: DateRange },
    ClearDates,
}

impl NavEvent {
    pub fn name(&self) -> &'static str {
        match self {
            NavEvent::ShowMap { .. } => "show_map",
            NavEvent::ResponsibleTourism => "responsible_tourism",
            NavEvent::Back => "back",
            NavEvent::ExploreDetails => "explore_details",
            NavEvent::BackToMap => "back_to_map",
            NavEvent::BackToHome => "back_to_home",
            NavEvent::SubmitDates { .. } => "submit_dates",
            NavEvent::ClearDates => "clear_dates",
        }
    }
}

/// Current screen plus the minimal context needed to render it.
///
/// Deserialisable so a session can be resumed; a resumed state may be
/// inconsistent and is checked by [`NavigationController::ensure_context`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    screen: Screen,
    region: Option<Region>,
    date_range: Option<DateRange>,
}

impl NavigationState {
    pub fn home() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    pub fn date_range(&self) -> Option<&DateRange> {
        self.date_range.as_ref()
    }

    /// Region present exactly when the screen needs one
    pub fn is_consistent(&self) -> bool {
        self.screen.requires_region() == self.region.is_some()
    }

    fn go_home(&self) -> Self {
        Self {
            screen: Screen::Home,
            region: None,
            date_range: self.date_range,
        }
    }

    fn require_region(&self, target: Screen) -> Result<Region> {
        self.region
            .clone()
            .ok_or(KultureError::MissingContext { screen: target })
    }
}

/// Apply one event to a state, returning the next state
pub fn transition(state: &NavigationState, event: &NavEvent) -> Result<NavigationState> {
    use Screen::{Detail, Guide, Home, Map};

    let next = match (state.screen, event) {
        (Home, NavEvent::ShowMap { region }) => NavigationState {
            screen: Map,
            region: Some(region.clone()),
            date_range: state.date_range,
        },
        (Home, NavEvent::ResponsibleTourism) => NavigationState {
            screen: Guide,
            region: None,
            date_range: state.date_range,
        },
        (Home, NavEvent::SubmitDates { range }) => NavigationState {
            date_range: Some(*range),
            ..state.go_home()
        },
        (Home, NavEvent::ClearDates) => NavigationState {
            date_range: None,
            ..state.go_home()
        },
        (Map, NavEvent::Back) => state.go_home(),
        (Map, NavEvent::ExploreDetails) => NavigationState {
            screen: Detail,
            region: Some(state.require_region(Detail)?),
            date_range: state.date_range,
        },
        (Detail, NavEvent::BackToMap) => NavigationState {
            screen: Map,
            region: Some(state.require_region(Map)?),
            date_range: state.date_range,
        },
        (Detail, NavEvent::BackToHome) => state.go_home(),
        (Guide, NavEvent::Back) => state.go_home(),
        (from, event) => {
            return Err(KultureError::InvalidTransition {
                from,
                event: event.name(),
            })
        }
    };

    Ok(next)
}

/// Sole mutator of one session's [`NavigationState`]
#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    state: NavigationState,
}

impl NavigationController {
    /// Start a session on the home screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously captured state, which may be inconsistent
    pub fn resume(state: NavigationState) -> Self {
        Self { state }
    }

    pub fn current_screen(&self) -> &NavigationState {
        &self.state
    }

    /// Check that the current screen has the context it needs.
    ///
    /// On failure the state is reset to home and `MissingContext` returned.
    /// A region left on a screen that does not use one is dropped silently.
    pub fn ensure_context(&mut self) -> Result<()> {
        if self.state.is_consistent() {
            return Ok(());
        }

        let screen = self.state.screen;
        if !screen.requires_region() {
            tracing::debug!(screen = %screen, "Dropping region not used by this screen");
            self.state.region = None;
            return Ok(());
        }

        tracing::warn!(screen = %screen, "Navigation state missing context, falling back to home");
        self.state = self.state.go_home();
        Err(KultureError::MissingContext { screen })
    }

    /// Validate and apply a transition.
    ///
    /// `MissingContext` resets to home; any other error leaves the state as it was.
    pub fn request_transition(&mut self, event: NavEvent) -> Result<()> {
        self.ensure_context()?;

        match transition(&self.state, &event) {
            Ok(next) => {
                tracing::debug!(
                    from = %self.state.screen,
                    to = %next.screen,
                    event = event.name(),
                    "Navigation transition"
                );
                self.state = next;
                Ok(())
            }
            Err(e @ KultureError::MissingContext { .. }) => {
                tracing::warn!(event = event.name(), error = %e, "Falling back to home");
                self.state = self.state.go_home();
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Force the home screen, keeping any date range
    pub fn reset_home(&mut self) {
        self.state = self.state.go_home();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegionId;
    use chrono::NaiveDate;

    fn kerala() -> Region {
        Region::new(RegionId::from_name("Kerala"), "Kerala")
    }

    fn show_kerala() -> NavEvent {
        NavEvent::ShowMap { region: kerala() }
    }

    #[test]
    fn test_starts_at_home() {
        let controller = NavigationController::new();
        let state = controller.current_screen();
        assert_eq!(state.screen(), Screen::Home);
        assert!(state.region().is_none());
        assert!(state.date_range().is_none());
    }

    #[test]
    fn test_show_map_then_back() {
        let mut controller = NavigationController::new();

        controller.request_transition(show_kerala()).unwrap();
        assert_eq!(controller.current_screen().screen(), Screen::Map);
        assert_eq!(controller.current_screen().region().unwrap().name, "Kerala");

        controller.request_transition(NavEvent::Back).unwrap();
        assert_eq!(controller.current_screen().screen(), Screen::Home);
        assert!(controller.current_screen().region().is_none());
    }

    #[test]
    fn test_full_detail_round_trip() {
        let mut controller = NavigationController::new();
        controller.request_transition(show_kerala()).unwrap();
        controller.request_transition(NavEvent::ExploreDetails).unwrap();
        assert_eq!(controller.current_screen().screen(), Screen::Detail);

        controller.request_transition(NavEvent::BackToMap).unwrap();
        assert_eq!(controller.current_screen().screen(), Screen::Map);
        assert!(controller.current_screen().region().is_some());

        controller.request_transition(NavEvent::ExploreDetails).unwrap();
        controller.request_transition(NavEvent::BackToHome).unwrap();
        assert_eq!(controller.current_screen(), &NavigationState::home());
    }

    #[test]
    fn test_guide_and_back() {
        let mut controller = NavigationController::new();
        controller.request_transition(NavEvent::ResponsibleTourism).unwrap();
        assert_eq!(controller.current_screen().screen(), Screen::Guide);

        controller.request_transition(NavEvent::Back).unwrap();
        assert_eq!(controller.current_screen().screen(), Screen::Home);
    }

    #[test]
    fn test_invalid_event_leaves_state_unchanged() {
        let mut controller = NavigationController::new();
        controller.request_transition(show_kerala()).unwrap();
        let before = controller.current_screen().clone();

        let err = controller.request_transition(NavEvent::BackToMap).unwrap_err();
        assert!(matches!(
            err,
            KultureError::InvalidTransition { from: Screen::Map, event: "back_to_map" }
        ));
        assert_eq!(controller.current_screen(), &before);
    }

    #[test]
    fn test_resumed_detail_without_region_falls_back_home() {
        let resumed: NavigationState =
            serde_json::from_str(r#"{"screen": "detail", "region": null, "date_range": null}"#)
                .unwrap();
        let mut controller = NavigationController::resume(resumed);

        let err = controller.ensure_context().unwrap_err();
        assert!(matches!(err, KultureError::MissingContext { screen: Screen::Detail }));
        assert_eq!(controller.current_screen().screen(), Screen::Home);
    }

    #[test]
    fn test_stray_region_on_guide_is_dropped() {
        let resumed: NavigationState = serde_json::from_str(
            r#"{"screen": "guide", "region": {"id": "kerala", "name": "Kerala", "anchor": null}, "date_range": null}"#,
        )
        .unwrap();
        let mut controller = NavigationController::resume(resumed);

        controller.ensure_context().unwrap();
        assert_eq!(controller.current_screen().screen(), Screen::Guide);
        assert!(controller.current_screen().region().is_none());

        controller.request_transition(NavEvent::Back).unwrap();
        assert_eq!(controller.current_screen(), &NavigationState::home());
    }

    #[test]
    fn test_explore_details_without_region_is_missing_context() {
        let resumed: NavigationState =
            serde_json::from_str(r#"{"screen": "map", "region": null, "date_range": null}"#)
                .unwrap();
        let mut controller = NavigationController::resume(resumed);

        let err = controller.request_transition(NavEvent::ExploreDetails).unwrap_err();
        assert!(matches!(err, KultureError::MissingContext { .. }));
        assert_eq!(controller.current_screen().screen(), Screen::Home);
    }

    #[test]
    fn test_dates_set_and_cleared_on_home() {
        let start = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let range = DateRange::new(start, end).unwrap();

        let mut controller = NavigationController::new();
        controller.request_transition(NavEvent::SubmitDates { range }).unwrap();
        assert_eq!(controller.current_screen().screen(), Screen::Home);
        assert_eq!(controller.current_screen().date_range(), Some(&range));

        // The range survives a trip to the map and back
        controller.request_transition(show_kerala()).unwrap();
        controller.request_transition(NavEvent::Back).unwrap();
        assert_eq!(controller.current_screen().date_range(), Some(&range));

        controller.request_transition(NavEvent::ClearDates).unwrap();
        assert!(controller.current_screen().date_range().is_none());
    }

    #[test]
    fn test_dates_rejected_off_home() {
        let start = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let range = DateRange::new(start, start).unwrap();

        let mut controller = NavigationController::new();
        controller.request_transition(show_kerala()).unwrap();
        let err = controller.request_transition(NavEvent::SubmitDates { range }).unwrap_err();
        assert!(matches!(err, KultureError::InvalidTransition { .. }));
    }

    #[test]
    fn test_same_event_twice_is_deterministic() {
        let mut state = NavigationState::home();
        state = transition(&state, &show_kerala()).unwrap();

        let first = transition(&state, &NavEvent::ExploreDetails).unwrap();
        let second = transition(&state, &NavEvent::ExploreDetails).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_nav_event_json_shape() {
        let json = serde_json::to_value(NavEvent::ExploreDetails).unwrap();
        assert_eq!(json["event"], "explore_details");
    }
}
