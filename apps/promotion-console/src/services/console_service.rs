use crate::api_client::{ApiError, PromotionApi};
use crate::console::{Console, Ticket, flash};
use promotion_shared::{FormState, QueryFilter, parse_int};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Create,
    Update,
    Retrieve,
    Delete,
    Activate,
    Deactivate,
    Search,
    Clear,
    ClearResults,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Retrieve => "retrieve",
            Action::Delete => "delete",
            Action::Activate => "activate",
            Action::Deactivate => "deactivate",
            Action::Search => "search",
            Action::Clear => "clear",
            Action::ClearResults => "clear-results",
        };
        f.write_str(name)
    }
}

/// What happened to an action's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request was issued before this one's response arrived.
    Superseded,
}

/// Runs console actions against the service for one console.
///
/// The console lock is only held while taking the posted form and while
/// applying a response, never across the request itself.
#[derive(Clone)]
pub struct ConsoleService {
    api: Arc<dyn PromotionApi>,
    console: Arc<Mutex<Console>>,
}

impl ConsoleService {
    pub fn new(api: Arc<dyn PromotionApi>) -> Self {
        Self {
            api,
            console: Arc::new(Mutex::new(Console::default())),
        }
    }

    pub async fn snapshot(&self) -> Console {
        self.console.lock().await.clone()
    }

    /// Runs `action` against the values the user posted with it.
    pub async fn run(&self, action: Action, form: FormState) -> Completion {
        debug!(%action, "running console action");
        match action {
            Action::Create => self.create(form).await,
            Action::Update => self.update(form).await,
            Action::Retrieve => self.retrieve(form).await,
            Action::Delete => self.delete(form).await,
            Action::Activate => self.activate(form).await,
            Action::Deactivate => self.deactivate(form).await,
            Action::Search => self.search(form).await,
            Action::Clear => {
                self.console.lock().await.clear();
                Completion::Applied
            }
            Action::ClearResults => {
                let mut console = self.console.lock().await;
                console.form = form;
                console.clear_results();
                Completion::Applied
            }
        }
    }

    // Form, flash reset and ticket change under one lock.
    async fn begin(&self, form: FormState) -> (Ticket, FormState) {
        let mut console = self.console.lock().await;
        console.form = form;
        console.clear_flash();
        (console.issue(), console.form.clone())
    }

    async fn finish(
        &self,
        action: Action,
        ticket: Ticket,
        apply: impl FnOnce(&mut Console),
    ) -> Completion {
        let mut console = self.console.lock().await;
        if !console.is_current(ticket) {
            info!(%action, ?ticket, "discarding superseded response");
            return Completion::Superseded;
        }
        apply(&mut *console);
        Completion::Applied
    }

    async fn create(&self, form: FormState) -> Completion {
        let (ticket, form) = self.begin(form).await;
        let result = self.api.create(&form.to_payload()).await;
        log_result(Action::Create, &result);
        self.finish(Action::Create, ticket, |console| match result {
            Ok(promotion) => {
                console.form.populate(&promotion);
                console.set_flash(flash::SUCCESS);
            }
            Err(err) => console.set_flash(failure_message(&err)),
        })
        .await
    }

    async fn update(&self, form: FormState) -> Completion {
        let (ticket, form) = self.begin(form).await;
        let id = parse_int(&form.id).to_string();
        let result = self.api.update(&id, &form.to_payload()).await;
        log_result(Action::Update, &result);
        self.finish(Action::Update, ticket, |console| match result {
            Ok(promotion) => {
                console.form.populate(&promotion);
                console.set_flash(flash::SUCCESS);
            }
            Err(err) => console.set_flash(failure_message(&err)),
        })
        .await
    }

    async fn retrieve(&self, form: FormState) -> Completion {
        let (ticket, form) = self.begin(form).await;
        let result = self.api.retrieve(&form.id).await;
        log_result(Action::Retrieve, &result);
        self.finish(Action::Retrieve, ticket, |console| match result {
            Ok(promotion) => {
                console.form.populate(&promotion);
                console.set_flash(flash::SUCCESS);
            }
            Err(err) => {
                console.form.clear();
                console.set_flash(failure_message(&err));
            }
        })
        .await
    }

    async fn delete(&self, form: FormState) -> Completion {
        let (ticket, form) = self.begin(form).await;
        let result = self.api.delete(&form.id).await;
        log_result(Action::Delete, &result);
        self.finish(Action::Delete, ticket, |console| {
            apply_state_change(console, result, flash::DELETED)
        })
        .await
    }

    async fn activate(&self, form: FormState) -> Completion {
        let (ticket, form) = self.begin(form).await;
        let result = self.api.activate(&form.id).await;
        log_result(Action::Activate, &result);
        self.finish(Action::Activate, ticket, |console| {
            apply_state_change(console, result, flash::ACTIVATED)
        })
        .await
    }

    async fn deactivate(&self, form: FormState) -> Completion {
        let (ticket, form) = self.begin(form).await;
        let result = self.api.deactivate(&form.id).await;
        log_result(Action::Deactivate, &result);
        self.finish(Action::Deactivate, ticket, |console| {
            apply_state_change(console, result, flash::DEACTIVATED)
        })
        .await
    }

    async fn search(&self, form: FormState) -> Completion {
        let (ticket, form) = self.begin(form).await;
        let filter = QueryFilter::from_form(&form);
        debug!(query = %filter, "searching promotions");
        let result = self.api.search(&filter).await;
        log_result(Action::Search, &result);
        self.finish(Action::Search, ticket, |console| match result {
            Ok(promotions) => {
                console.show_results(promotions);
                console.set_flash(flash::SUCCESS);
            }
            Err(err) => console.set_flash(failure_message(&err)),
        })
        .await
    }
}

// Delete, activate and deactivate report a fixed text either way.
fn apply_state_change(console: &mut Console, result: Result<(), ApiError>, done: &str) {
    match result {
        Ok(()) => {
            console.form.clear();
            console.set_flash(done);
        }
        Err(_) => console.set_flash(flash::SERVER_ERROR),
    }
}

fn failure_message(err: &ApiError) -> String {
    err.server_message()
        .unwrap_or(flash::SERVER_ERROR)
        .to_string()
}

fn log_result<T>(action: Action, result: &Result<T, ApiError>) {
    match result {
        Ok(_) => info!(%action, "promotion service request succeeded"),
        Err(err) => warn!(
            %action,
            error = %err,
            server_message = err.server_message().unwrap_or_default(),
            "promotion service request failed"
        ),
    }
}
