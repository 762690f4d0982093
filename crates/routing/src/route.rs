use crate::{Error, Result};

/// A named view. `requires_project` is read only by the navigation guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub path: &'static str,
    pub requires_project: bool,
}

impl Route {
    pub const fn open(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            path,
            requires_project: false,
        }
    }

    pub const fn project_scoped(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            path,
            requires_project: true,
        }
    }
}

/// Known routes plus the selection route redirects land on.
#[derive(Debug, Clone)]
pub struct RouteTable {
    home: Route,
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(home: Route, routes: Vec<Route>) -> Self {
        Self { home, routes }
    }

    /// Project selection at `/`, then overview, workbench and library, all
    /// of which need an active project.
    pub fn standard() -> Self {
        Self::new(Route::open("home", "/"), vec![
            Route::project_scoped("overview", "/overview"),
            Route::project_scoped("workbench", "/workbench"),
            Route::project_scoped("library", "/library"),
        ])
    }

    pub fn home(&self) -> &Route {
        &self.home
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        std::iter::once(&self.home).chain(self.routes.iter())
    }

    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.iter().find(|r| r.name == name)
    }

    /// Match a path, ignoring query, fragment and trailing slashes.
    pub fn resolve(&self, path: &str) -> Result<&Route> {
        let normalized = normalize(path);
        self.iter()
            .find(|r| r.path == normalized)
            .ok_or_else(|| Error::UnknownRoute {
                path: path.to_string(),
            })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
