//! Request bodies posted back to the provider. Built from form values at
//! submit time and never persisted.

use serde::Serialize;

/// Method tag for password-based credentials. Both pages submit exclusively
/// with this method.
pub const METHOD_PASSWORD: &str = "password";

/// Body of a flow submission.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum SubmissionPayload {
    Login(LoginSubmission),
    Registration(RegistrationSubmission),
}

impl SubmissionPayload {
    pub fn login(csrf_token: String, identifier: String, password: String) -> Self {
        Self::Login(LoginSubmission {
            method: METHOD_PASSWORD,
            csrf_token,
            identifier,
            password,
        })
    }

    pub fn registration(csrf_token: String, email: String, password: String) -> Self {
        Self::Registration(RegistrationSubmission {
            method: METHOD_PASSWORD,
            csrf_token,
            traits: RegistrationTraits { email },
            password,
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginSubmission {
    pub method: &'static str,
    pub csrf_token: String,
    pub identifier: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RegistrationSubmission {
    pub method: &'static str,
    pub csrf_token: String,
    pub traits: RegistrationTraits,
    pub password: String,
}

/// Identity traits collected at registration.
#[derive(Clone, Debug, Serialize)]
pub struct RegistrationTraits {
    pub email: String,
}
