pub mod dashboard;
pub mod form;
pub mod login;

pub use dashboard::{DashboardView, LoadState};
pub use form::{FormField, TradeForm};
pub use login::{LoginField, LoginOutcome, LoginView};
