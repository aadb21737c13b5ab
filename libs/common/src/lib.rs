//! Common library for the Answerboard services
//!
//! This crate provides the functionality shared by the dashboard services:
//! database, cache, and local-store connectivity, the project and member
//! data model, and the role resolution core used to gate every mutation.

pub mod access;
pub mod auth;
pub mod cache;
pub mod database;
pub mod error;
pub mod localstore;
pub mod models;
pub mod roles;
