//! Routes and the navigation guard that keeps project-scoped views behind
//! an active project.
//!
//! Guard evaluation per navigation:
//! 1. Restore (project-scoped target, empty list, persisted id present)
//! 2. Check (target requires a project and none is active → redirect)
//! 3. Resolve (proceed or redirect to the selection route)

pub mod error;
pub mod guard;
pub mod route;

pub use {
    error::{Error, Result},
    guard::{GuardState, Navigation, NavigationGuard},
    route::{Route, RouteTable},
};
