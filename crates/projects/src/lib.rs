//! Project session store for monster.
//!
//! A project is a novel held by the remote API. The session keeps the list
//! of novels fetched from the server plus the one the user is working on,
//! and remembers that choice in durable storage so a restart can pick it up
//! again without asking.

pub mod api;
pub mod error;
pub mod session;
pub mod storage;
pub mod types;

pub use {
    api::{HttpNovelApi, NovelApi},
    error::{Error, Result},
    session::ProjectSession,
    storage::{DurableStorage, FileStorage, MemoryStorage},
    types::{CreateNovel, Novel, NovelId},
};
