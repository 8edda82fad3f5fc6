use falcon::ApiError;

/// Every way a lookup can fail. All variants are meant to be shown to the operator.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// A required input was empty. Detected before any network call.
    #[error("All fields are required")]
    Validation,
    /// The API answered with a non `200` status
    #[error("Falcon API answered with status {status}: {}", join_messages(.errors))]
    Remote { status: u16, errors: Vec<ApiError> },
    /// The device query succeeded but matched nothing
    #[error("No matching host for `{hostname}`")]
    EmptyResult { hostname: String },
    /// Network failures and malformed responses
    #[error("{0}")]
    Transport(String),
}

impl LookupError {
    /// One display line per error; remote errors are reported verbatim
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Remote { errors, .. } if !errors.is_empty() => {
                errors.iter().map(|err| err.message.clone()).collect()
            }
            other => vec![other.to_string()],
        }
    }
}

impl From<falcon::Error> for LookupError {
    fn from(err: falcon::Error) -> Self {
        match err {
            falcon::Error::TokenRequest { status, errors } => Self::Remote { status, errors },
            other => Self::Transport(other.to_string()),
        }
    }
}

fn join_messages(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(|err| err.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn remote_messages_are_verbatim() {
        let err = LookupError::Remote {
            status: 403,
            errors: vec![
                ApiError {
                    code: Some(403),
                    message: "access denied".to_owned(),
                },
                ApiError::new("missing scope"),
            ],
        };
        assert_eq!(err.messages(), vec!["access denied", "missing scope"]);
        assert_eq!(
            err.to_string(),
            "Falcon API answered with status 403: access denied; missing scope"
        );
    }

    #[test]
    fn other_kinds_have_a_single_message() {
        assert_eq!(
            LookupError::Validation.messages(),
            vec!["All fields are required"]
        );
        assert_eq!(
            LookupError::EmptyResult {
                hostname: "web".to_owned()
            }
            .messages(),
            vec!["No matching host for `web`"]
        );
        assert_eq!(
            LookupError::Remote {
                status: 500,
                errors: Vec::new()
            }
            .messages()
            .len(),
            1
        );
    }

    #[test]
    fn token_endpoint_failure_is_remote() {
        let err = LookupError::from(falcon::Error::TokenRequest {
            status: 401,
            errors: vec![ApiError::new("invalid client")],
        });
        assert_eq!(err.messages(), vec!["invalid client"]);
    }
}
