use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::menu::Menu;
use crate::domain::order::{FieldUpdate, OrderLineInput};
use crate::domain::ports::{MenuSource, OrderGateway};
use crate::domain::summary::{summarize, OrderSummary};

use super::form_registry::{FormRegistry, FormSession};
use super::menu_provider::MenuProvider;
use super::submission::{SubmissionHandler, SubmissionResult};

/// Entry point for every form operation exposed over HTTP.
pub struct OrderFormService {
    forms: Arc<FormRegistry>,
    menu: MenuProvider,
    submissions: SubmissionHandler,
}

impl OrderFormService {
    pub fn new(menu_source: Arc<dyn MenuSource>, order_gateway: Arc<dyn OrderGateway>) -> Self {
        Self {
            forms: Arc::new(FormRegistry::new()),
            menu: MenuProvider::new(menu_source),
            submissions: SubmissionHandler::new(order_gateway),
        }
    }

    /// Replaces the idle-form TTL. Call before any form is created.
    pub fn with_form_ttl(mut self, ttl: Duration) -> Self {
        self.forms = Arc::new(FormRegistry::with_ttl(ttl));
        self
    }

    pub async fn load_menu(&self) -> Menu {
        self.menu.fetch_menu().await
    }

    pub async fn create_form(&self) -> (Uuid, FormSession) {
        let menu = self.menu.fetch_menu().await;
        let (id, session) = self.forms.create(menu);
        log::info!("Created form {} ({} menu items)", id, session.menu.len());
        (id, session)
    }

    pub fn get_form(&self, id: Uuid) -> Result<FormSession, DomainError> {
        self.forms.get(id)
    }

    pub fn remove_form(&self, id: Uuid) -> Result<(), DomainError> {
        self.forms.remove(id)
    }

    pub fn add_line(&self, id: Uuid) -> Result<FormSession, DomainError> {
        self.forms.update(id, |form| {
            form.add_line();
            Ok(())
        })
    }

    pub fn remove_line(&self, id: Uuid, index: usize) -> Result<FormSession, DomainError> {
        self.forms
            .update(id, |form| form.remove_line(index).map(|_: OrderLineInput| ()))
    }

    pub fn set_field(&self, id: Uuid, update: FieldUpdate) -> Result<FormSession, DomainError> {
        self.forms.update(id, |form| form.set_field(update))
    }

    pub fn reset(&self, id: Uuid) -> Result<FormSession, DomainError> {
        self.forms.update(id, |form| {
            form.reset();
            Ok(())
        })
    }

    pub async fn refresh_menu(&self, id: Uuid) -> Result<FormSession, DomainError> {
        // Fail fast before spending a request on a form that does not exist.
        self.forms.get(id)?;
        let menu = self.menu.fetch_menu().await;
        self.forms.refresh_menu(id, menu)
    }

    pub fn summary(&self, id: Uuid) -> Result<OrderSummary, DomainError> {
        let session = self.forms.get(id)?;
        Ok(summarize(&session.form.draft().items, &session.menu))
    }

    /// Submits the form's current draft. The form is reset only when the order
    /// service accepted it; otherwise it is left as it was.
    ///
    /// The request runs on its own task, so a caller that goes away (a client
    /// disconnect drops the handler future) neither aborts the upstream call
    /// nor leaves the form locked.
    pub async fn submit(&self, id: Uuid) -> Result<SubmissionResult, DomainError> {
        let draft = self.forms.begin_submission(id)?;
        let forms = Arc::clone(&self.forms);
        let submissions = self.submissions.clone();

        let task = tokio::spawn(async move {
            let outcome = submissions.submit(&draft).await;
            let succeeded = matches!(&outcome, Ok(result) if result.success);
            forms.finish_submission(id, succeeded);
            outcome
        });

        match task.await {
            Ok(outcome) => Ok(outcome?),
            Err(e) => {
                log::error!("Submission task for form {} failed: {}", id, e);
                self.forms.finish_submission(id, false);
                Err(DomainError::SubmissionAborted(e.to_string()))
            }
        }
    }
}
