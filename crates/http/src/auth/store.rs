//! Session persistence slot owned by the auth provider

use super::{AuthError, Session};
use std::cell::RefCell;
use std::rc::Rc;

/// Where the provider keeps the current session between page loads
pub trait SessionStore {
    fn load(&self) -> Result<Option<Session>, AuthError>;
    fn save(&self, session: &Session) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

impl<S: SessionStore + ?Sized> SessionStore for Rc<S> {
    fn load(&self) -> Result<Option<Session>, AuthError> {
        (**self).load()
    }

    fn save(&self, session: &Session) -> Result<(), AuthError> {
        (**self).save(session)
    }

    fn clear(&self) -> Result<(), AuthError> {
        (**self).clear()
    }
}

/// In-process store, used by tests and non-browser hosts
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: RefCell<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            slot: RefCell::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, session: &Session) -> Result<(), AuthError> {
        *self.slot.borrow_mut() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}
