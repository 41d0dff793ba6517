use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::form::OrderForm;
use crate::domain::menu::Menu;
use crate::domain::order::DraftOrder;

/// One independent form instance.
#[derive(Debug, Clone)]
pub struct FormSession {
    pub form: OrderForm,
    pub menu: Menu,
    pub submitting: bool,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl FormSession {
    fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        !self.submitting && now - self.last_active >= ttl
    }
}

pub const DEFAULT_FORM_TTL_MINUTES: i64 = 60;

/// In-memory form instances keyed by id. The lock is only held for
/// synchronous state changes, never across a network call.
///
/// Forms left untouched for longer than the TTL are dropped the next time a
/// form is created. A form with a submission in flight is never dropped.
pub struct FormRegistry {
    forms: Mutex<HashMap<Uuid, FormSession>>,
    ttl: Duration,
}

impl Default for FormRegistry {
    fn default() -> Self {
        Self::with_ttl(Duration::minutes(DEFAULT_FORM_TTL_MINUTES))
    }
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            forms: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn create(&self, menu: Menu) -> (Uuid, FormSession) {
        self.evict_expired(Utc::now());

        let id = Uuid::new_v4();
        let now = Utc::now();
        let session = FormSession {
            form: OrderForm::new(),
            menu,
            submitting: false,
            created_at: now,
            last_active: now,
        };
        self.lock().insert(id, session.clone());
        (id, session)
    }

    pub fn get(&self, id: Uuid) -> Result<FormSession, DomainError> {
        let mut forms = self.lock();
        let session = forms.get_mut(&id).ok_or(DomainError::FormNotFound)?;
        session.touch();
        Ok(session.clone())
    }

    /// Drops every form idle for at least the TTL as of `now`. Returns how
    /// many were dropped.
    pub fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let mut forms = self.lock();
        let before = forms.len();
        forms.retain(|_, session| !session.is_expired(now, self.ttl));
        let evicted = before - forms.len();
        if evicted > 0 {
            log::info!("Evicted {} idle form(s), {} remaining", evicted, forms.len());
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applies `f` to the form and returns the resulting session.
    pub fn update<F>(&self, id: Uuid, f: F) -> Result<FormSession, DomainError>
    where
        F: FnOnce(&mut OrderForm) -> Result<(), DomainError>,
    {
        let mut forms = self.lock();
        let session = forms.get_mut(&id).ok_or(DomainError::FormNotFound)?;
        f(&mut session.form)?;
        session.touch();
        Ok(session.clone())
    }

    pub fn refresh_menu(&self, id: Uuid, menu: Menu) -> Result<FormSession, DomainError> {
        let mut forms = self.lock();
        let session = forms.get_mut(&id).ok_or(DomainError::FormNotFound)?;
        session.menu = menu;
        session.touch();
        Ok(session.clone())
    }

    /// Marks the form as submitting and returns a snapshot of its draft.
    pub fn begin_submission(&self, id: Uuid) -> Result<DraftOrder, DomainError> {
        let mut forms = self.lock();
        let session = forms.get_mut(&id).ok_or(DomainError::FormNotFound)?;
        if session.submitting {
            return Err(DomainError::SubmissionInProgress);
        }
        session.submitting = true;
        session.touch();
        Ok(session.form.draft().clone())
    }

    /// Clears the in-flight flag, resetting the draft after a success. A form
    /// removed meanwhile is ignored.
    pub fn finish_submission(&self, id: Uuid, succeeded: bool) {
        if let Some(session) = self.lock().get_mut(&id) {
            session.submitting = false;
            session.touch();
            if succeeded {
                session.form.reset();
            }
        }
    }

    pub fn remove(&self, id: Uuid) -> Result<(), DomainError> {
        self.lock()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::FormNotFound)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, FormSession>> {
        // Every mutation completes before the guard drops, so a poisoned map is
        // still consistent.
        self.forms.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
