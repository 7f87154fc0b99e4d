//! Local record store for the three cached collections
//!
//! Backed by SQLite. Each collection is replaced wholesale by a refresh:
//! `clear_*` followed by `insert_*`. The two phases take the connection lock
//! separately, so a reader may observe an empty collection in between.
//!
//! - `schema`: connection and table management
//! - `queries`: per-collection reads and writes

pub mod queries;
pub mod schema;


pub use schema::Store;
