// Core library for the citizen/department services portal: bungalow
// reservation booking state, the availability calendar, and the department
// console data layer.

pub mod api;
pub mod availability;
pub mod calendar;
pub mod reservation;
pub mod rooms;
pub mod state;

// Re-export key types for convenience
pub use api::{
    ApiError, ApiResponse, Branch, InMemoryPortalApi, Page, PortalApi, ResponseStatus, Submission,
    SubmissionFilter, SubmissionStatus,
};
pub use availability::{
    AvailabilityError, AvailabilitySource, CacheConfig, CacheStatsReport, CachedAvailability,
    FixtureAvailabilitySource, UnavailableDates,
};
pub use calendar::{Calendar, DateSelectionHandler, DayCell, DayState, MonthCursor};
pub use reservation::{DateSelection, FlowStep, Quote, ReservationError, ReservationFlow};
pub use rooms::{AgeGroup, GuestCategory, GuestCounts, Room, RoomError, RoomSelection};
pub use state::{PortalState, Preferences, StateError, Theme};
