//! Account constraint violations.

use lector_postgres::types::AccountConstraints;

use crate::handler::{Error, ErrorKind};

impl From<AccountConstraints> for Error<'static> {
    fn from(c: AccountConstraints) -> Self {
        let error = match c {
            AccountConstraints::EmailFormat => {
                ErrorKind::BadRequest.with_message("Invalid email format")
            }
            AccountConstraints::EmailLengthMax => {
                ErrorKind::BadRequest.with_message("Email address is too long")
            }
            AccountConstraints::PasswordHashNotEmpty => ErrorKind::InternalServerError.into_error(),
            AccountConstraints::UpdatedAfterCreated => ErrorKind::InternalServerError.into_error(),
            AccountConstraints::EmailAddressUnique => ErrorKind::Conflict
                .with_message("An account with this email address already exists"),
        };

        error.with_resource("account")
    }
}

#[cfg(test)]
mod tests {
    use lector_postgres::types::ConstraintViolation;

    use super::*;

    #[test]
    fn duplicate_email_is_conflict() {
        let violation = ConstraintViolation::new("accounts_email_address_unique_idx");
        let error: Error = violation.map(Into::into).unwrap_or_default();

        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.resource(), Some("account"));
    }

    #[test]
    fn invalid_email_is_bad_request() {
        let error: Error = AccountConstraints::EmailFormat.into();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }
}
