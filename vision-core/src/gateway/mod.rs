//! Gateway Layer
//!
//! Traits for the hosted backend and the Supabase-compatible HTTP client.

mod traits;
mod supabase;

#[cfg(test)]
pub(crate) mod memory;

pub use traits::{BlobStore, Gateway, IdentityService, TaskRepository, VisionRepository};
pub use supabase::{SupabaseClient, SESSION_EXPIRED};
