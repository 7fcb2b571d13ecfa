//! Navigation history and the access check for protected routes.

use log::debug;
use std::fmt;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
        }
    }

    pub fn is_protected(self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// `replace` drops the current history entry instead of pushing a new one.
    Redirect { to: Route, replace: bool },
}

/// Decides whether `route` may be shown for the current session. Evaluated on
/// every navigation, never cached.
pub fn authorize(route: Route, session: &Session) -> Access {
    match route {
        Route::Root => Access::Redirect {
            to: Route::Login,
            replace: false,
        },
        r if r.is_protected() && !session.is_authenticated() => Access::Redirect {
            to: Route::Login,
            replace: true,
        },
        _ => Access::Granted,
    }
}

#[derive(Debug)]
pub struct Router {
    session: Session,
    history: Vec<Route>,
}

impl Router {
    pub fn new(session: Session, initial: Route) -> Self {
        let mut router = Self {
            session,
            history: vec![initial],
        };
        router.resolve();
        router
    }

    pub fn current(&self) -> Route {
        // history is never empty
        self.history.last().copied().unwrap_or(Route::Login)
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    pub fn push(&mut self, route: Route) -> Route {
        self.history.push(route);
        self.resolve()
    }

    pub fn replace(&mut self, route: Route) -> Route {
        self.history.pop();
        self.history.push(route);
        self.resolve()
    }

    pub fn back(&mut self) -> Route {
        if self.history.len() > 1 {
            self.history.pop();
        }
        self.resolve()
    }

    fn resolve(&mut self) -> Route {
        // Redirects only ever lead to Login, which is always granted.
        for _ in 0..4 {
            let route = self.current();
            match authorize(route, &self.session) {
                Access::Granted => return route,
                Access::Redirect { to, replace } => {
                    debug!("Redirecting {} -> {} (replace: {})", route, to, replace);
                    if replace {
                        self.history.pop();
                    }
                    self.history.push(to);
                }
            }
        }
        self.current()
    }
}
