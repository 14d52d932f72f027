/// Transient write model carrying validated, normalized credentials from the
/// aggregate to the sign-in collaborator. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLogin {
    email: String,
    password: String,
}

impl UserLogin {
    /// Normalizes the email (trimmed, lowercased) and trims the password.
    /// Callers validate non-emptiness before constructing.
    pub(crate) fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password: password.trim().to_owned(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}
