//! Query cache layer — the single source of truth for remote reads.
//!
//! Views (or any other consumer) declare a [`QueryKey`] plus a fetch closure
//! and get back a [`QuerySubscription`]; the cache coalesces concurrent
//! identical requests into one fetch, keeps the last good result visible
//! while revalidating, and polls on an interval while subscribers remain.

mod cache;
mod key;

pub use cache::{
    FetchFn, FetchFuture, QueryCache, QueryOptions, QuerySnapshot, QuerySubscription,
};
pub use key::QueryKey;
