use lostfound_contract::FinderIdentity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub phone_number: Option<String>,
}

/// Read-only view of whoever is signed in.
pub trait SessionProvider: Send + Sync {
    fn current_user(&self) -> Option<SessionUser>;

    fn finder_identity(&self) -> FinderIdentity {
        match self.current_user() {
            Some(user) => FinderIdentity::new(user.id, user.phone_number.unwrap_or_default()),
            None => FinderIdentity::anonymous(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    user: Option<SessionUser>,
}

impl StaticSession {
    pub fn signed_in(id: impl Into<String>, phone_number: Option<String>) -> Self {
        Self {
            user: Some(SessionUser {
                id: id.into(),
                phone_number,
            }),
        }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }
}

impl SessionProvider for StaticSession {
    fn current_user(&self) -> Option<SessionUser> {
        self.user.clone()
    }
}
