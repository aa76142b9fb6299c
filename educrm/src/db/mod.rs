//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//! It follows the Repository pattern to provide clean abstractions over database operations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - business logic & queries)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! # Transactions
//!
//! Repositories wrap a `&mut PgConnection`, so they compose with SQLx
//! transactions. Multi-step operations (e.g. the application → student
//! promotion) acquire a transaction in the API handler and run every
//! repository call on it:
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! let mut repo = Applications::new(tx.acquire().await?);
//! // ... operations ...
//! tx.commit().await?;
//! ```
//!
//! # Migrations
//!
//! Database migrations are managed by SQLx and located in the `migrations/`
//! directory. The [`crate::migrator`] function provides access to the migrator.

pub mod errors;
pub mod handlers;
pub mod models;
