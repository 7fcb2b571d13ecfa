//! Application shell: owns the router, session, views and toasts, and is the
//! only place where views are mounted or navigation happens.

use log::{debug, info};
use crate::api::DashboardApi;
use crate::notify::Toasts;
use crate::router::{Route, Router};
use crate::session::Session;
use crate::views::{DashboardView, LoginOutcome, LoginView};

/// Work that may touch the network. Key handling produces these; the UI loop
/// runs them one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SubmitLogin,
    /// Refetch stats, revenue and trades with the current filters.
    FetchDashboard,
    SaveTrade,
    ConfirmDelete(bool),
    Logout,
    Back,
}

pub struct App<A: DashboardApi> {
    api: A,
    session: Session,
    router: Router,
    pub login: LoginView,
    /// Present only while the dashboard route is mounted.
    pub dashboard: Option<DashboardView>,
    pub toasts: Toasts,
    pub should_quit: bool,
}

impl<A: DashboardApi> App<A> {
    /// Starts on the dashboard when the session already holds a user,
    /// otherwise at `/`, which redirects to the login page.
    pub fn new(api: A, session: Session) -> Self {
        let initial = if session.is_authenticated() {
            Route::Dashboard
        } else {
            Route::Root
        };
        let router = Router::new(session.clone(), initial);
        Self {
            api,
            session,
            router,
            login: LoginView::new(),
            dashboard: None,
            toasts: Toasts::new(),
            should_quit: false,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn route(&self) -> Route {
        self.router.current()
    }

    /// Mounts the view for the current route. Returns the command the
    /// freshly mounted view needs, if any.
    pub fn start(&mut self) -> Option<Command> {
        self.sync_view(self.router.current())
    }

    pub fn navigate(&mut self, route: Route) -> Option<Command> {
        let resolved = self.router.push(route);
        self.sync_view(resolved)
    }

    fn sync_view(&mut self, route: Route) -> Option<Command> {
        match route {
            Route::Dashboard => {
                if self.dashboard.is_some() {
                    return None;
                }
                debug!("Mounting dashboard");
                self.dashboard = Some(DashboardView::new());
                Some(Command::FetchDashboard)
            }
            Route::Login | Route::Root => {
                if self.dashboard.take().is_some() {
                    debug!("Unmounting dashboard");
                }
                None
            }
        }
    }

    /// Synchronous part of a command, run before the UI redraws so busy and
    /// loading states are visible while the request is in flight.
    pub fn begin(&mut self, command: Command) {
        match command {
            Command::SubmitLogin => self.login.begin_submit(),
            Command::FetchDashboard => {
                if let Some(view) = self.dashboard.as_mut() {
                    view.begin_loading();
                }
            }
            _ => {}
        }
    }

    /// Runs one command. Returns a follow-up command, e.g. the initial fetch
    /// after login mounts the dashboard.
    pub async fn run(&mut self, command: Command) -> Option<Command> {
        match command {
            Command::SubmitLogin => {
                let outcome = self
                    .login
                    .submit(&self.api, &self.session, &mut self.toasts)
                    .await;
                match outcome {
                    LoginOutcome::LoggedIn(_) => self.navigate(Route::Dashboard),
                    LoginOutcome::Rejected(_) | LoginOutcome::Invalid(_) => None,
                }
            }
            Command::FetchDashboard => {
                if let Some(view) = self.dashboard.as_mut() {
                    // Failures are logged and bannered by the view.
                    let _ = view.fetch_all(&self.api).await;
                }
                None
            }
            Command::SaveTrade => {
                if let Some(view) = self.dashboard.as_mut() {
                    match view.save_trade(&self.api).await {
                        Ok(()) => self.toasts.success("Trade saved"),
                        Err(e) => self.toasts.error(e.user_message()),
                    }
                }
                None
            }
            Command::ConfirmDelete(accepted) => {
                if let Some(view) = self.dashboard.as_mut() {
                    match view.confirm_delete(&self.api, accepted).await {
                        Ok(()) if accepted => self.toasts.success("Trade deleted"),
                        Ok(()) => self.toasts.info("Delete cancelled"),
                        Err(e) => self.toasts.error(e.user_message()),
                    }
                }
                None
            }
            Command::Logout => {
                self.session.logout();
                info!("Logged out");
                self.navigate(Route::Login)
            }
            Command::Back => {
                let resolved = self.router.back();
                self.sync_view(resolved)
            }
        }
    }

    /// Runs `command` and every follow-up it produces.
    pub async fn dispatch(&mut self, command: Command) {
        let mut next = Some(command);
        while let Some(command) = next {
            self.begin(command);
            next = self.run(command).await;
        }
    }
}
