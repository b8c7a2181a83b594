use std::error::Error as StdError;
use std::fmt::Debug;

use aws_sdk_bedrock::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use bedrock_domain::ProviderError;

/// Maps an SDK failure onto the provider error model: modeled service
/// errors keep their code, everything else (dispatch, timeout, response
/// parsing) becomes a transport error carrying the full error chain.
pub(crate) fn into_provider_error<E, R>(error: SdkError<E, R>) -> ProviderError
where
    E: ProvideErrorMetadata + StdError + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    match error.code() {
        Some(code) => {
            let message = error
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| DisplayErrorContext(&error).to_string());
            ProviderError::service(code, message)
        }
        None => ProviderError::transport(DisplayErrorContext(&error).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_bedrock::operation::get_foundation_model::GetFoundationModelError;
    use aws_sdk_bedrock::types::error::{AccessDeniedException, ResourceNotFoundException};
    use pretty_assertions::assert_eq;

    use super::*;

    fn service_error(error: GetFoundationModelError) -> SdkError<GetFoundationModelError, ()> {
        SdkError::service_error(error, ())
    }

    #[test]
    fn test_service_error_keeps_code_and_message() {
        let fixture = service_error(GetFoundationModelError::AccessDeniedException(
            AccessDeniedException::builder()
                .message("You don't have access to the model")
                .meta(
                    aws_sdk_bedrock::error::ErrorMetadata::builder()
                        .code("AccessDeniedException")
                        .message("You don't have access to the model")
                        .build(),
                )
                .build(),
        ));

        let actual = into_provider_error(fixture);

        let expected =
            ProviderError::service("AccessDeniedException", "You don't have access to the model");
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_service_error_without_message() {
        let fixture = service_error(GetFoundationModelError::ResourceNotFoundException(
            ResourceNotFoundException::builder()
                .meta(
                    aws_sdk_bedrock::error::ErrorMetadata::builder()
                        .code("ResourceNotFoundException")
                        .build(),
                )
                .build(),
        ));

        let actual = into_provider_error(fixture);

        assert_eq!(actual.code(), Some("ResourceNotFoundException"));
    }

    #[test]
    fn test_timeout_is_transport() {
        let fixture: SdkError<GetFoundationModelError, ()> =
            SdkError::timeout_error("operation timed out");

        let actual = into_provider_error(fixture);

        assert_eq!(actual.code(), None);
        assert!(actual.to_string().contains("operation timed out"));
    }
}
