//! Authorization clause rendering shared by the load and unload renderers.
//!
//! Exactly one authorization style is rendered per statement: an IAM role
//! when one is supplied, otherwise a static access-key/secret pair (with the
//! session token appended when present). Having neither is a configuration
//! error raised before any statement text exists.

use crate::redstage::config::AwsCredentials;
use crate::redstage::error::{TransferError, TransferResult};
use crate::redstage::sql::clause::ClauseList;

/// Append the authorization clauses for a load or unload statement.
pub fn push_auth_clauses(
    clauses: &mut ClauseList,
    credentials: &AwsCredentials,
    iam_role: Option<&str>,
) -> TransferResult<()> {
    if let Some(role) = iam_role {
        clauses.quoted("iam_role", Some(role));
        return Ok(());
    }
    if !credentials.has_key_pair() {
        return Err(TransferError::configuration(
            "must provide at least one of [iam_role, access_key_id/secret_access_key]",
        ));
    }
    clauses.quoted("access_key_id", credentials.access_key_id.as_deref());
    clauses.quoted(
        "secret_access_key",
        credentials.secret_access_key.as_deref(),
    );
    clauses.quoted("session_token", credentials.session_token.as_deref());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_pair() -> AwsCredentials {
        AwsCredentials {
            access_key_id: Some("AKIA123".to_string()),
            secret_access_key: Some("sekrit".to_string()),
            session_token: None,
        }
    }

    #[test]
    fn test_iam_role_wins_over_key_pair() {
        let mut clauses = ClauseList::new();
        push_auth_clauses(&mut clauses, &key_pair(), Some("arn:aws:iam::1:role/r")).unwrap();
        let rendered = clauses.render();
        assert!(rendered.contains("iam_role 'arn:aws:iam::1:role/r'"));
        assert!(!rendered.contains("access_key_id"));
    }

    #[test]
    fn test_key_pair_renders_both_halves() {
        let mut clauses = ClauseList::new();
        push_auth_clauses(&mut clauses, &key_pair(), None).unwrap();
        let rendered = clauses.render();
        assert!(rendered.contains("access_key_id 'AKIA123'"));
        assert!(rendered.contains("secret_access_key 'sekrit'"));
        assert!(!rendered.contains("session_token"));
    }

    #[test]
    fn test_session_token_appended_to_key_pair() {
        let mut creds = key_pair();
        creds.session_token = Some("tok".to_string());
        let mut clauses = ClauseList::new();
        push_auth_clauses(&mut clauses, &creds, None).unwrap();
        assert!(clauses.render().contains("session_token 'tok'"));
    }

    #[test]
    fn test_no_credentials_is_a_configuration_error() {
        let mut clauses = ClauseList::new();
        let err =
            push_auth_clauses(&mut clauses, &AwsCredentials::default(), None).unwrap_err();
        assert!(matches!(err, TransferError::Configuration { .. }));
        assert_eq!(clauses.render(), "");
    }

    #[test]
    fn test_half_a_key_pair_is_not_enough() {
        let creds = AwsCredentials {
            access_key_id: Some("AKIA123".to_string()),
            secret_access_key: None,
            session_token: None,
        };
        let mut clauses = ClauseList::new();
        assert!(push_auth_clauses(&mut clauses, &creds, None).is_err());
    }
}
