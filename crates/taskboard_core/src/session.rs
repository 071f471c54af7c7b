/// Credentials supplied by the external auth collaborator.
///
/// A session only exists when both the user identity and the bearer
/// credential are present; "either absent" is modeled by handing the
/// store `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub token: String,
}

impl Session {
    pub fn new<U: Into<String>, T: Into<String>>(user_id: U, token: T) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
        }
    }
}
