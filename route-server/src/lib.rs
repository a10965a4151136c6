//! Transit route server.
//!
//! Resolves free-text stop names against a fixed stop catalog, searches a
//! list of bus routes by journey or keyword, and synthesizes stop sequences
//! for newly authored routes.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod matching;
pub mod planner;
pub mod store;
pub mod web;
