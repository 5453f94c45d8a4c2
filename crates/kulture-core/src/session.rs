//! Per-user session: navigation plus the data each screen needs
//!
//! A [`Session`] is the rendering layer's single entry point. It turns
//! named user actions into validated transitions and builds a
//! [`ScreenView`] for whatever screen is current. Errors never escape
//! [`Session::interact`]; they become [`Notice`]s and a safe fallback.

use chrono::NaiveDate;
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::aggregator::RegionAggregator;
use crate::error::{KultureError, Result};
use crate::guide::{ResponsibleTourismGuide, GUIDE};
use crate::models::{
    markers_to_geojson, CategoryWarning, Coordinate, DateRange, FestivalEvent, FetchedBundle,
    MapMarker, Region, RegionBundle,
};
use crate::navigation::{NavEvent, NavigationController, NavigationState, Screen};

/// Actions as the presentation layer names them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    /// Pick a state by name and open its map
    ShowMap { region: String },
    ResponsibleTourism,
    Back,
    ExploreDetails,
    BackToMap,
    BackToHome,
    SubmitDates { start: NaiveDate, end: NaiveDate },
    ClearDates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// User-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn from_error(err: &KultureError) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: err.user_message(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub regions: Vec<Region>,
    pub date_range: Option<DateRange>,
    pub events: Vec<FestivalEvent>,
    /// Placeholder messages when data could not be loaded
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub region: Region,
    pub center: Coordinate,
    pub markers: Vec<MapMarker>,
    pub warnings: Vec<CategoryWarning>,
}

impl MapView {
    pub fn to_geojson(&self) -> FeatureCollection {
        markers_to_geojson(&self.markers)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    pub region: Region,
    pub bundle: RegionBundle,
    pub warnings: Vec<CategoryWarning>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "lowercase")]
pub enum ScreenView {
    Home(HomeView),
    Map(MapView),
    Detail(DetailView),
    Guide(ResponsibleTourismGuide),
}

impl ScreenView {
    pub fn screen(&self) -> Screen {
        match self {
            ScreenView::Home(_) => Screen::Home,
            ScreenView::Map(_) => Screen::Map,
            ScreenView::Detail(_) => Screen::Detail,
            ScreenView::Guide(_) => Screen::Guide,
        }
    }
}

/// Result of one user interaction, ready to render
#[derive(Debug, Clone, Serialize)]
pub struct Interaction {
    pub state: NavigationState,
    pub view: ScreenView,
    pub notices: Vec<Notice>,
}

pub struct Session {
    controller: NavigationController,
    aggregator: Arc<RegionAggregator>,
    /// Bundle fetched while checking "explore details", consumed by the next detail render
    prefetched: Option<FetchedBundle>,
}

impl Session {
    pub fn new(aggregator: Arc<RegionAggregator>) -> Self {
        Self {
            controller: NavigationController::new(),
            aggregator,
            prefetched: None,
        }
    }

    /// Resume a session from a captured navigation state
    pub fn resume(aggregator: Arc<RegionAggregator>, state: NavigationState) -> Self {
        Self {
            controller: NavigationController::resume(state),
            aggregator,
            prefetched: None,
        }
    }

    pub fn state(&self) -> &NavigationState {
        self.controller.current_screen()
    }

    /// Translate an action into a navigation event and apply it.
    ///
    /// Data preconditions are checked before the transition: the region name
    /// must resolve, and details require a bundle to be fetchable.
    pub async fn dispatch(&mut self, action: UserAction) -> Result<()> {
        self.prefetched = None;

        let event = match action {
            UserAction::ShowMap { region } => match self.aggregator.resolve_region(&region).await {
                Ok(region) => NavEvent::ShowMap { region },
                Err(e @ KultureError::NotFound { .. }) => {
                    self.controller.reset_home();
                    return Err(e);
                }
                Err(e) => return Err(e),
            },
            UserAction::ExploreDetails => return self.explore_details().await,
            UserAction::ResponsibleTourism => NavEvent::ResponsibleTourism,
            UserAction::Back => NavEvent::Back,
            UserAction::BackToMap => NavEvent::BackToMap,
            UserAction::BackToHome => NavEvent::BackToHome,
            UserAction::SubmitDates { start, end } => NavEvent::SubmitDates {
                range: DateRange::new(start, end)?,
            },
            UserAction::ClearDates => NavEvent::ClearDates,
        };

        self.controller.request_transition(event)
    }

    /// Details need a fetchable bundle; the bundle is kept for the render
    /// that follows so the region is only fetched once.
    async fn explore_details(&mut self) -> Result<()> {
        self.controller.ensure_context()?;
        let state = self.controller.current_screen();

        let region = match (state.screen(), state.region()) {
            (Screen::Map, Some(region)) => region.clone(),
            (from, _) => {
                return Err(KultureError::InvalidTransition {
                    from,
                    event: NavEvent::ExploreDetails.name(),
                })
            }
        };

        let fetched = self.aggregator.fetch_bundle(&region).await?;
        self.controller.request_transition(NavEvent::ExploreDetails)?;
        self.prefetched = Some(fetched);
        Ok(())
    }

    /// Build the view for the current screen.
    ///
    /// Only reads navigation state, except that a state missing its region
    /// is reset to home before `MissingContext` is returned. A detail render
    /// uses the bundle prefetched by "explore details" when there is one.
    pub async fn render(&mut self) -> Result<ScreenView> {
        self.controller.ensure_context()?;
        let state = self.controller.current_screen().clone();

        match state.screen() {
            Screen::Home => Ok(ScreenView::Home(self.render_home(&state).await)),
            Screen::Map => {
                let region = required_region(&state)?;
                let map = self.aggregator.fetch_map(region).await?;
                Ok(ScreenView::Map(MapView {
                    region: region.clone(),
                    center: map.center,
                    markers: map.markers,
                    warnings: map.warnings,
                }))
            }
            Screen::Detail => {
                let region = required_region(&state)?;
                let fetched = match self.prefetched.take() {
                    Some(fetched) if fetched.bundle.region().id == region.id => fetched,
                    _ => self.aggregator.fetch_bundle(region).await?,
                };
                Ok(ScreenView::Detail(DetailView {
                    region: region.clone(),
                    bundle: fetched.bundle,
                    warnings: fetched.warnings,
                }))
            }
            Screen::Guide => Ok(ScreenView::Guide(GUIDE)),
        }
    }

    /// Dispatch an action and render the resulting screen, mapping every
    /// error to a notice and falling back to home when a screen cannot render.
    pub async fn interact(&mut self, action: UserAction) -> Interaction {
        let mut notices = Vec::new();

        if let Err(e) = self.dispatch(action).await {
            tracing::info!(error = %e, "Action rejected");
            notices.push(Notice::from_error(&e));
        }

        self.finish(notices).await
    }

    /// Render the current screen without an action
    pub async fn current_view(&mut self) -> Interaction {
        self.finish(Vec::new()).await
    }

    async fn finish(&mut self, mut notices: Vec<Notice>) -> Interaction {
        let view = match self.render().await {
            Ok(view) => view,
            Err(e) => {
                tracing::warn!(error = %e, screen = %self.state().screen(), "Render failed, showing home");
                notices.push(Notice::from_error(&e));
                self.controller.reset_home();
                let state = self.controller.current_screen().clone();
                ScreenView::Home(self.render_home(&state).await)
            }
        };

        Interaction {
            state: self.state().clone(),
            view,
            notices,
        }
    }

    async fn render_home(&self, state: &NavigationState) -> HomeView {
        let mut notices = Vec::new();

        let regions = match self.aggregator.list_regions().await {
            Ok(regions) => regions,
            Err(e) => {
                tracing::warn!(error = %e, "Could not load regions");
                notices.push(Notice::from_error(&e));
                Vec::new()
            }
        };

        let date_range = state.date_range().copied();
        let events = match date_range {
            Some(range) => match self.aggregator.list_events(&range).await {
                Ok(events) => events,
                Err(e) => {
                    tracing::warn!(error = %e, range = %range, "Could not load events");
                    notices.push(Notice::warning("Events could not be loaded for these dates."));
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        HomeView {
            regions,
            date_range,
            events,
            notices,
        }
    }
}

fn required_region(state: &NavigationState) -> Result<&Region> {
    state.region().ok_or(KultureError::MissingContext {
        screen: state.screen(),
    })
}
