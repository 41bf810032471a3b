//! # lobby-db
//!
//! Storage layer implementing the `lobby-core` repository traits.
//!
//! ## Overview
//!
//! - PostgreSQL via SQLx: connection pool, schema bootstrap, `FromRow` models,
//!   entity <-> model mappers, and the `Pg*Repository` implementations
//! - An in-memory store backing both traits behind one lock, for tests and
//!   single-process development runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lobby_common::DatabaseConfig;
//! use lobby_db::{bootstrap_schema, create_pool, PgParticipantRepository, PoolConfig};
//!
//! async fn example(config: &DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from(config)).await?;
//!     bootstrap_schema(&pool).await?;
//!     let participants = PgParticipantRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{bootstrap_schema, create_pool, PgPool, PoolConfig};
pub use repositories::{PgMessageRepository, PgParticipantRepository};
