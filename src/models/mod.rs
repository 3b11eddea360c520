// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod category;
pub mod location;
pub mod participant;
pub mod session;
pub mod venue;

pub use category::CategoryGroup;
pub use location::Location;
pub use participant::Participant;
pub use session::{Session, SessionParticipant};
pub use venue::{RankedVenue, TravelMetric, VenueCandidate};
