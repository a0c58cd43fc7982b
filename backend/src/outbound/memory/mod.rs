//! Process-local adapters for development and tests.
//!
//! Each store keeps its table behind a `std::sync::Mutex`. Locks are taken
//! and released inside synchronous sections only, and every mutation
//! completes under a single acquisition, mirroring the atomicity of the SQL
//! statements the Diesel adapters issue.

mod in_memory_post_repository;
mod in_memory_user_repository;

pub use in_memory_post_repository::InMemoryPostRepository;
pub use in_memory_user_repository::InMemoryUserRepository;

use std::sync::{Mutex, MutexGuard};

/// Lock `mutex`, reporting poisoning through the caller's error type.
fn lock<'a, T, E>(
    mutex: &'a Mutex<T>,
    poisoned: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    mutex
        .lock()
        .map_err(|_| poisoned("in-memory store lock poisoned".to_owned()))
}
