//! Limits shared between the database schema and the API layer.

/// Document upload limits.
pub mod document {
    /// Largest accepted upload, in bytes (5 MiB).
    pub const MAX_FILE_SIZE: i64 = 5 * 1024 * 1024;

    /// Longest stored file name, in characters.
    pub const MAX_FILE_NAME_LENGTH: usize = 255;

    /// File name used when the upload does not carry one.
    pub const DEFAULT_FILE_NAME: &str = "document";

    /// Content types accepted for upload.
    pub const SUPPORTED_CONTENT_TYPES: &[&str] = &["application/pdf", "image/jpeg", "image/png"];

    /// Failure reason recorded for documents left processing by a previous run.
    pub const INTERRUPTED_REASON: &str = "Processing was interrupted by a server restart.";
}

/// Interaction limits.
pub mod interaction {
    /// Longest accepted prompt, in characters.
    pub const MAX_PROMPT_LENGTH: usize = 4000;
}

/// Account limits.
pub mod account {
    /// Longest accepted email address, in characters.
    pub const MAX_EMAIL_LENGTH: u64 = 254;
}

/// Pagination limits.
pub mod pagination {
    /// Page size used when the request does not specify one.
    pub const DEFAULT_LIMIT: i64 = 50;

    /// Largest accepted page size.
    pub const MAX_LIMIT: i64 = 100;
}

#[cfg(test)]
mod tests {
    use super::document::{MAX_FILE_SIZE, SUPPORTED_CONTENT_TYPES};

    const SCHEMA: &str = include_str!("../../migrations/2025-06-01-000000_initial_schema/up.sql");

    #[test]
    fn schema_checks_match_the_limits() {
        let supported = SUPPORTED_CONTENT_TYPES
            .iter()
            .map(|content_type| format!("'{content_type}'"))
            .collect::<Vec<_>>()
            .join(", ");

        assert!(SCHEMA.contains(&format!("content_type IN ({supported})")));
        assert!(SCHEMA.contains(&format!("file_size <= {MAX_FILE_SIZE}")));
    }
}
