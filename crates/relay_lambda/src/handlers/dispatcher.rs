use thiserror::Error;
use tracing::{error, info, warn};

use crate::adapters::invoke::FunctionInvoker;
use crate::runtime::config::{ConfigError, DispatcherConfig};
use crate::runtime::contract::{ApiGatewayResponse, DispatchAck, InvocationRequest};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid dispatcher configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to invoke {target}: {message}")]
    Invoke { target: String, message: String },
}

/// Invokes the routed target once. A failed invocation is returned as an
/// error so the runtime reports the dispatcher itself as failed; the target's
/// own business outcome never changes the acknowledgment.
pub fn handle_dispatch(
    config: &DispatcherConfig,
    invoker: &dyn FunctionInvoker,
) -> Result<ApiGatewayResponse, DispatchError> {
    let request = InvocationRequest::new(config.target_function());

    let outcome = invoker
        .invoke(&request, config.invocation_type)
        .map_err(|message| {
            error!(
                target_function = %request.function_name,
                error = %message,
                "invocation failed"
            );
            DispatchError::Invoke {
                target: request.function_name.clone(),
                message,
            }
        })?;

    info!(
        target_function = %request.function_name,
        invocation_type = %config.invocation_type,
        status_code = outcome.status_code,
        executed_version = outcome.executed_version.as_deref().unwrap_or(""),
        payload = outcome.payload.as_deref().unwrap_or(""),
        "Success!"
    );
    if let Some(function_error) = outcome.function_error.as_deref() {
        warn!(
            target_function = %request.function_name,
            function_error,
            "target reported a function error"
        );
    }

    Ok(ApiGatewayResponse::json(
        config.ack_status_code,
        &DispatchAck::for_target(request.function_name),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::runtime::contract::{InvocationKind, InvocationOutcome};
    use crate::runtime::routing::TargetRoutes;

    struct CapturingInvoker {
        requests: Mutex<Vec<(InvocationRequest, InvocationKind)>>,
        outcome: Result<InvocationOutcome, String>,
    }

    impl CapturingInvoker {
        fn returning(outcome: Result<InvocationOutcome, String>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                outcome,
            }
        }

        fn requests(&self) -> Vec<(InvocationRequest, InvocationKind)> {
            self.requests.lock().expect("poisoned mutex").clone()
        }
    }

    impl FunctionInvoker for CapturingInvoker {
        fn invoke(
            &self,
            request: &InvocationRequest,
            invocation_type: InvocationKind,
        ) -> Result<InvocationOutcome, String> {
            self.requests
                .lock()
                .expect("poisoned mutex")
                .push((request.clone(), invocation_type));
            self.outcome.clone()
        }
    }

    fn ok_outcome() -> InvocationOutcome {
        InvocationOutcome {
            status_code: 200,
            executed_version: Some("$LATEST".to_string()),
            ..InvocationOutcome::default()
        }
    }

    fn config_for(function_name: Option<&str>) -> DispatcherConfig {
        DispatcherConfig {
            function_name: function_name.map(str::to_string),
            ..DispatcherConfig::default()
        }
    }

    #[test]
    fn invokes_dev_writer_from_dev_dispatcher() {
        let invoker = CapturingInvoker::returning(Ok(ok_outcome()));
        let response =
            handle_dispatch(&config_for(Some("dev-call-lambda")), &invoker).expect("dispatch");

        let requests = invoker.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0.function_name, "dev-make-file-lambda");
        assert_eq!(requests[0].1, InvocationKind::RequestResponse);

        assert_eq!(response.status_code, 200);
        let body = response.body_json().expect("body should parse");
        assert_eq!(body["target"], "dev-make-file-lambda");
    }

    #[test]
    fn invokes_prd_writer_by_default() {
        let invoker = CapturingInvoker::returning(Ok(ok_outcome()));
        handle_dispatch(&config_for(None), &invoker).expect("dispatch");

        assert_eq!(invoker.requests()[0].0.function_name, "prd-make-file-lambda");
    }

    #[test]
    fn rejected_invocation_propagates() {
        let invoker = CapturingInvoker::returning(Err("AccessDeniedException".to_string()));
        let error = handle_dispatch(&config_for(None), &invoker).expect_err("should fail");

        match error {
            DispatchError::Invoke { target, message } => {
                assert_eq!(target, "prd-make-file-lambda");
                assert_eq!(message, "AccessDeniedException");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(invoker.requests().len(), 1);
    }

    #[test]
    fn target_function_error_still_acknowledges() {
        let invoker = CapturingInvoker::returning(Ok(InvocationOutcome {
            function_error: Some("Unhandled".to_string()),
            payload: Some("{\"errorMessage\":\"boom\"}".to_string()),
            ..ok_outcome()
        }));

        let response = handle_dispatch(&config_for(None), &invoker).expect("dispatch");
        assert_eq!(response.status_code, 200);
    }

    #[test]
    fn honours_configured_ack_status_and_invocation_type() {
        let config = DispatcherConfig {
            routes: TargetRoutes::fixed("makeFileLambda"),
            invocation_type: InvocationKind::Event,
            ack_status_code: 500,
            ..DispatcherConfig::default()
        };
        let invoker = CapturingInvoker::returning(Ok(ok_outcome()));

        let response = handle_dispatch(&config, &invoker).expect("dispatch");

        assert_eq!(response.status_code, 500);
        assert_eq!(
            invoker.requests(),
            vec![(
                InvocationRequest::new("makeFileLambda"),
                InvocationKind::Event
            )]
        );
    }
}
