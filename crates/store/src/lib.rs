//! In-memory document store and repositories for Mizan.
//!
//! The store keeps every collection behind one `RwLock`; a repository takes
//! the write guard once per operation, resolves the touched aggregates,
//! calls the core planning functions, and commits the whole plan before
//! releasing the guard. That single guard is the atomic boundary every
//! multi-aggregate mutation relies on: either the entire plan lands, or a
//! pre-flight error surfaces and nothing changed.

pub mod reconcile;
pub mod repositories;
pub mod scope;
pub mod state;
pub mod store;

pub use reconcile::{reconcile, Drift};
pub use scope::Scope;
pub use state::State;
pub use store::MemoryStore;
