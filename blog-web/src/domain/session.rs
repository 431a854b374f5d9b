/// Who the client claims to be, after the session cookie has been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Session {
    #[default]
    Anonymous,
    Authenticated {
        user_id: i64,
    },
}

impl Session {
    pub(crate) fn user_id(&self) -> Option<i64> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated { user_id } => Some(*user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Session;

    #[test]
    fn anonymous_by_default() {
        let session = Session::default();
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn authenticated_exposes_user_id() {
        let session = Session::Authenticated { user_id: 7 };
        assert_eq!(session.user_id(), Some(7));
    }
}
