//! Core types for the aura ecosystem.
//!
//! - `event`: the `Event` record and status derivation
//! - `store`: the event collection and its persisted snapshot
//! - `storage`: the key-value port the store writes through
//! - `view`: the adapter between user actions and the store
//! - `weather`, `location`, `forecast`: collaborators that feed event data
//!   and the assistant's weather context

pub mod clock;
pub mod error;
pub mod event;
pub mod forecast;
pub mod location;
pub mod storage;
pub mod store;
pub mod view;
pub mod weather;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AuraError, AuraResult, ValidationError};
pub use event::{Coordinates, Event, EventLocation, EventStatus, EventUpdate};
pub use store::{EventStore, EventsCount, Persisted};
pub use weather::WeatherSnapshot;
