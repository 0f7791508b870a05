/// The caller as reported by the external identity provider.
#[rustfmt::skip]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Identity {
    pub is_authenticated : bool,
    pub is_admin         : bool,
    pub email            : Option<String>,
    pub name             : Option<String>,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            is_admin: false,
            email: Some(email.into()),
            name: Some(name.into()),
        }
    }

    pub fn admin(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            is_admin: true,
            ..Self::user(email, name)
        }
    }

    /// The verified e-mail address, only if authenticated.
    pub fn verified_email(&self) -> Option<&str> {
        if self.is_authenticated {
            self.email.as_deref()
        } else {
            None
        }
    }

    /// Admin rights only count for authenticated callers.
    pub fn is_verified_admin(&self) -> bool {
        self.is_authenticated && self.is_admin
    }
}
