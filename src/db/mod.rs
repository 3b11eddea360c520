//! Database layer (Firebase Realtime Database or in-memory).

pub mod sessions;

pub use sessions::SessionDb;
