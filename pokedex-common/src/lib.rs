//! # Pokédex Common Library
//!
//! Framework-independent core of the Pokédex query service:
//! - Record types for the entity and detail tables
//! - Load-once data store over the two JSON tables
//! - Name/id resolution with form disambiguation
//! - List filtering and enumeration over the entity table
//! - Configuration loading and data folder resolution

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod numeric;
pub mod resolver;
pub mod store;

pub use error::{Error, Result};
pub use models::{Detail, DetailAttributes, Entity, FormSummary};
pub use resolver::{resolve, EntityProfile, Lookup};
pub use store::{DataStore, StoreHandle};
