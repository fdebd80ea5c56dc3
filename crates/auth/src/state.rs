//! Application state for auth.

use axum::extract::FromRef;

use crate::AuthFlow;

/// Shared state for auth handlers and the [`CurrentUser`](crate::CurrentUser) extractor.
#[derive(Clone)]
pub struct AuthState {
    pub flow: AuthFlow,
}

impl AuthState {
    pub fn new(flow: AuthFlow) -> Self {
        Self { flow }
    }
}

/// Allows AuthState to be extracted from a parent state.
impl<S> FromRef<S> for AuthState
where
    S: AsRef<AuthState>,
{
    fn from_ref(state: &S) -> Self {
        state.as_ref().clone()
    }
}
