//! Trades dashboard: stats cards, revenue trend, filterable trade table and
//! the add/edit modal.
//!
//! Every write is followed by a full [`DashboardView::fetch_all`]; nothing is
//! patched into local state ahead of the server. The three reads in
//! `fetch_all` are joined and applied together, so if any one fails the
//! previous data stays in place untouched.

use log::{debug, error, info};
use crate::api::DashboardApi;
use crate::error::{Error, Result};
use crate::models::{RevenuePoint, Stats, Trade, TradeQuery, TradeStatus, TrendIndicator};
use super::form::TradeForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
}

#[derive(Debug)]
pub struct DashboardView {
    pub load_state: LoadState,
    pub stats: Option<Stats>,
    pub revenue: Vec<RevenuePoint>,
    pub trades: Vec<Trade>,
    pub search: String,
    /// Search box has keyboard focus.
    pub editing_search: bool,
    pub status_filter: Option<TradeStatus>,
    /// Open add/edit modal, if any.
    pub modal: Option<TradeForm>,
    /// Trade awaiting delete confirmation.
    pub pending_delete: Option<String>,
    pub selected: usize,
    /// Last dashboard error, shown as a banner until the next successful fetch.
    pub last_error: Option<String>,
    fetches: u64,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            load_state: LoadState::Loading,
            stats: None,
            revenue: Vec::new(),
            trades: Vec::new(),
            search: String::new(),
            editing_search: false,
            status_filter: None,
            modal: None,
            pending_delete: None,
            selected: 0,
            last_error: None,
            fetches: 0,
        }
    }

    /// Number of `fetch_all` cycles started since the view was created.
    pub fn fetch_count(&self) -> u64 {
        self.fetches
    }

    pub fn query(&self) -> TradeQuery {
        TradeQuery {
            search: self.search.clone(),
            status: self.status_filter.clone(),
        }
    }

    pub fn begin_loading(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Reloads stats, revenue trend and trades concurrently. All three
    /// results are applied together or not at all.
    pub async fn fetch_all<A>(&mut self, api: &A) -> Result<()>
    where
        A: DashboardApi + ?Sized,
    {
        self.fetches += 1;
        self.load_state = LoadState::Loading;
        let query = self.query();
        debug!("Fetching dashboard (search: {:?}, status: {:?})", query.search, query.status);

        let result = tokio::try_join!(
            api.stats(),
            api.revenue_trend(),
            api.list_trades(&query)
        );
        self.load_state = LoadState::Ready;

        match result {
            Ok((stats, revenue, trades)) => {
                info!("Dashboard loaded: {} trades, {} revenue points", trades.len(), revenue.len());
                self.stats = Some(stats);
                self.revenue = revenue;
                self.trades = trades;
                self.clamp_selection();
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load dashboard: {}", e);
                self.last_error = Some(format!("Failed to load dashboard: {}", e.user_message()));
                Err(e)
            }
        }
    }

    // Errors are already logged and bannered by fetch_all.
    async fn refresh<A>(&mut self, api: &A)
    where
        A: DashboardApi + ?Sized,
    {
        if self.fetch_all(api).await.is_err() {
            debug!("Refresh after write failed; showing previous data");
        }
    }

    pub fn revenue_indicators(&self) -> Vec<TrendIndicator> {
        TrendIndicator::for_series(&self.revenue)
    }

    // --- filters ---

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_status_filter(&mut self, status: Option<TradeStatus>) {
        self.status_filter = status;
    }

    /// All → Completed → Pending → Cancelled → All.
    pub fn cycle_status_filter(&mut self) {
        self.status_filter = match &self.status_filter {
            None => Some(TradeStatus::Completed),
            Some(TradeStatus::Cancelled) | Some(TradeStatus::Other(_)) => None,
            Some(status) => Some(status.cycle()),
        };
    }

    // --- selection ---

    pub fn selected_trade(&self) -> Option<&Trade> {
        self.trades.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.trades.is_empty() {
            self.selected = (self.selected + 1).min(self.trades.len() - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.trades.len().saturating_sub(1));
    }

    // --- modal ---

    pub fn open_create(&mut self) {
        self.modal = Some(TradeForm::default());
    }

    pub fn open_edit(&mut self) {
        if let Some(form) = self.selected_trade().map(TradeForm::from) {
            self.modal = Some(form);
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Creates or updates the trade in the open modal, then refetches
    /// everything. On failure the modal stays open with the unsaved input.
    pub async fn save_trade<A>(&mut self, api: &A) -> Result<()>
    where
        A: DashboardApi + ?Sized,
    {
        let form = self
            .modal
            .as_ref()
            .ok_or_else(|| Error::ValidationError("No trade form open".into()))?;
        // Rejected locally; the caller shows the notice and the banner is left alone.
        let draft = form.to_draft()?;

        let result = match &form.id {
            Some(id) => {
                let trade = draft.with_id(id.clone());
                api.update_trade(&trade).await.map(|saved| ("updated", saved))
            }
            None => api.create_trade(&draft).await.map(|saved| ("created", saved)),
        };

        match result {
            Ok((action, saved)) => {
                info!("Trade {} {} ({})", saved.id, action, saved.pair);
                self.modal = None;
                self.refresh(api).await;
                Ok(())
            }
            Err(e) => {
                error!("Failed to save trade: {}", e);
                self.last_error = Some(format!("Failed to save trade: {}", e.user_message()));
                Err(e)
            }
        }
    }

    // --- delete ---

    /// Arms the confirmation step for `id`. Nothing is sent yet.
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn request_delete_selected(&mut self) {
        if let Some(id) = self.selected_trade().map(|t| t.id.clone()) {
            self.request_delete(id);
        }
    }

    /// Resolves the pending confirmation. The delete request is only issued
    /// when `accepted` is true.
    pub async fn confirm_delete<A>(&mut self, api: &A, accepted: bool) -> Result<()>
    where
        A: DashboardApi + ?Sized,
    {
        let Some(id) = self.pending_delete.take() else {
            return Ok(());
        };
        if !accepted {
            debug!("Delete of trade {} cancelled", id);
            return Ok(());
        }

        match api.delete_trade(&id).await {
            Ok(()) => {
                info!("Trade {} deleted", id);
                self.refresh(api).await;
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete trade {}: {}", id, e);
                self.last_error = Some(format!("Failed to delete trade: {}", e.user_message()));
                Err(e)
            }
        }
    }
}
