//! Command implementations and terminal presentation

pub mod convert;
pub mod currencies;
pub mod favorite;
pub mod live;
pub mod setup;
pub mod ui;
