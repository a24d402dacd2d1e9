//! # Projector Core Library
//!
//! Occurrence management with calendar-based recurrence chaining.
//!
//! An occurrence is a single unit of work with an optional due date. When an
//! occurrence is configured to repeat, completing it asks the recurrence
//! engine for the next due date and, when the chain is not exhausted, inserts
//! a successor that points back at its predecessor.
//!
//! ## Core Modules
//!
//! - [`pattern`]: Weekly pattern parsing (`"mon,wed,fri"` to weekday indices)
//! - [`recurrence`]: Next due date calculation for every interval kind
//! - [`chain`]: Preconditions and termination rules for successor creation
//! - [`completion`]: The `pending -> done` transition with best-effort chaining
//! - [`validation`]: Date and input validation shared by the store and the CLI
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`repository`]: Data access layer with Repository pattern
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use projector_core::{
//!     completion::complete_occurrence, db,
//!     models::{NewOccurrenceData, RepeatInterval},
//!     repository::{OccurrenceRepository, RepositoryConfig, SqliteRepository},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("projector.db").await?;
//!     let repo = SqliteRepository::new(pool, RepositoryConfig::default());
//!
//!     let standup = repo
//!         .add_occurrence(NewOccurrenceData {
//!             name: "Standup".to_string(),
//!             due_date: chrono::NaiveDate::from_ymd_opt(2030, 1, 7),
//!             repeat_count: 10,
//!             repeat_interval: Some(RepeatInterval::Week),
//!             repeat_pattern: Some("mon,wed,fri".to_string()),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     let result = complete_occurrence(&repo, standup.id).await?;
//!     println!("{:?}", result.chain);
//!     Ok(())
//! }
//! ```

pub mod chain;
pub mod completion;
pub mod db;
pub mod error;
pub mod models;
pub mod pattern;
pub mod recurrence;
pub mod repository;
pub mod validation;
