//! Departure planner server.
//!
//! A web application that answers: "when is the latest I can leave to
//! arrive by this time, and is there a noticeably faster time to go?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod planner;
pub mod providers;
pub mod web;
