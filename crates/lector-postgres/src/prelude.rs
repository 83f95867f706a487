//! Commonly used types and traits in one import.
//!
//! ```rust,no_run
//! use lector_postgres::prelude::*;
//!
//! # async fn example() -> PgResult<()> {
//! let client = PgConfig::new("postgresql://localhost/lector").build()?;
//! let mut conn = client.get_connection().await?;
//! let exists = conn.email_exists("ada@example.com").await?;
//! # Ok(())
//! # }
//! ```

pub use diesel::prelude::*;
pub use diesel_async::RunQueryDsl;

pub use crate::client::{
    ConnectionPool, MigrationResult, MigrationStatus, PgClient, PgClientMigrationExt, PgConfig,
    PgConn, PgPoolStatus,
};
pub use crate::model::{
    Account, Document, DocumentInteraction, NewAccount, NewDocument, NewDocumentInteraction,
};
pub use crate::query::{
    AccountRepository, DocumentInteractionRepository, DocumentRepository, Pagination,
};
pub use crate::types::DocumentStatus;
pub use crate::{PgConnection, PgError, PgResult};
