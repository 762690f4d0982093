//! Navigation guard.
//!
//! Runs before every route change. Each navigation starts from scratch; the
//! only thing carried between navigations is what the session holds.

use std::sync::Arc;

use {monster_projects::ProjectSession, tracing::debug};

use crate::{
    Result,
    route::{Route, RouteTable},
};

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed(Route),
    /// Sent to the selection route instead of the requested one.
    Redirect(Route),
}

impl Navigation {
    pub fn route(&self) -> &Route {
        match self {
            Self::Proceed(route) | Self::Redirect(route) => route,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Cold start on a project-scoped route: load before deciding.
    NeedsRestore,
    Checking,
    Resolved(Navigation),
}

pub struct NavigationGuard {
    session: Arc<ProjectSession>,
    routes: RouteTable,
}

impl NavigationGuard {
    pub fn new(session: Arc<ProjectSession>, routes: RouteTable) -> Self {
        Self { session, routes }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn session(&self) -> &Arc<ProjectSession> {
        &self.session
    }

    /// Restoration only pays off when the target needs a project, nothing is
    /// loaded yet and storage remembers a selection.
    pub fn initial_state(&self, to: &Route) -> GuardState {
        if to.requires_project
            && !self.session.has_projects()
            && self.session.persisted_project_id().is_some()
        {
            GuardState::NeedsRestore
        } else {
            GuardState::Checking
        }
    }

    /// Decide whether navigation to `to` may proceed.
    ///
    /// A failed restore load is not an error: the guard simply finds no
    /// active project and redirects.
    pub async fn before_each(&self, to: &Route) -> Navigation {
        let mut state = self.initial_state(to);
        loop {
            state = match state {
                GuardState::NeedsRestore => {
                    debug!(route = to.name, "restoring session before navigation");
                    self.session.load_projects().await;
                    GuardState::Checking
                },
                GuardState::Checking => GuardState::Resolved(self.check(to)),
                GuardState::Resolved(outcome) => return outcome,
            };
        }
    }

    /// Resolve `path` against the route table, then guard it.
    pub async fn navigate(&self, path: &str) -> Result<Navigation> {
        let route = self.routes.resolve(path)?.clone();
        Ok(self.before_each(&route).await)
    }

    fn check(&self, to: &Route) -> Navigation {
        if to.requires_project && self.session.current_project().is_none() {
            debug!(
                route = to.name,
                redirect = self.routes.home().path,
                "no active project, redirecting"
            );
            Navigation::Redirect(self.routes.home().clone())
        } else {
            Navigation::Proceed(to.clone())
        }
    }
}
