//! Base repository trait for database operations.

use crate::db::errors::Result;

/// Base repository trait providing common database operations.
///
/// A repository is a data access layer for one postgres table. It provides
/// methods for creating, reading, updating, and deleting entities, as well
/// as listing them with simple filters. Entities with a full-replace update
/// surface (PUT) reuse their create request as the update request type.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest;

    /// The request type for updating entities
    type UpdateRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// Create a new entity
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List entities with filtering and pagination
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Delete an entity by ID
    async fn delete(&mut self, id: Self::Id) -> Result<bool>;

    /// Update an entity by ID
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response>;
}

/// Plain skip/limit pagination filter shared by most repositories.
#[derive(Debug, Clone, Copy)]
pub struct PageFilter {
    pub skip: i64,
    pub limit: i64,
}

impl PageFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }
}

impl Default for PageFilter {
    fn default() -> Self {
        Self { skip: 0, limit: 100 }
    }
}
