//! Kulture Core - Domain models, navigation, and region data aggregation
//!
//! This crate contains the navigation state machine, the region data
//! aggregator and the storage port that backends implement.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod guide;
pub mod models;
pub mod navigation;
pub mod ports;
pub mod session;

pub use aggregator::RegionAggregator;
pub use error::{KultureError, Result};
pub use navigation::{NavEvent, NavigationController, NavigationState, Screen};
pub use session::{ScreenView, Session, UserAction};
