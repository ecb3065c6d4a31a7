use aws_sdk_lambda::types::InvocationType;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use relay_lambda::adapters::invoke::FunctionInvoker;
use relay_lambda::handlers::dispatcher::{handle_dispatch, DispatchError};
use relay_lambda::logging::init_tracing;
use relay_lambda::runtime::config::DispatcherConfig;
use relay_lambda::runtime::contract::{
    ApiGatewayResponse, InvocationKind, InvocationOutcome, InvocationRequest,
};
use serde_json::Value;
use tracing::info;

struct AwsLambdaInvoker {
    lambda_client: aws_sdk_lambda::Client,
}

impl FunctionInvoker for AwsLambdaInvoker {
    fn invoke(
        &self,
        request: &InvocationRequest,
        invocation_type: InvocationKind,
    ) -> Result<InvocationOutcome, String> {
        let client = self.lambda_client.clone();
        let function_name = request.function_name.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .invoke()
                    .function_name(function_name)
                    .invocation_type(sdk_invocation_type(invocation_type))
                    .send()
                    .await
                    .map(|output| InvocationOutcome {
                        status_code: output.status_code(),
                        function_error: output.function_error().map(str::to_string),
                        executed_version: output.executed_version().map(str::to_string),
                        payload: output
                            .payload()
                            .map(|blob| String::from_utf8_lossy(blob.as_ref()).into_owned()),
                    })
                    .map_err(|error| format!("failed to invoke lambda: {error}"))
            })
        })
    }
}

fn sdk_invocation_type(kind: InvocationKind) -> InvocationType {
    match kind {
        InvocationKind::RequestResponse => InvocationType::RequestResponse,
        InvocationKind::Event => InvocationType::Event,
        InvocationKind::DryRun => InvocationType::DryRun,
    }
}

async fn handle_request(
    event: LambdaEvent<Value>,
    invoker: &AwsLambdaInvoker,
) -> Result<ApiGatewayResponse, Error> {
    info!(request_id = %event.context.request_id, "dispatch requested");

    let config = DispatcherConfig::from_env().map_err(DispatchError::from)?;
    let response = handle_dispatch(&config, invoker)?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let invoker = AwsLambdaInvoker {
        lambda_client: aws_sdk_lambda::Client::new(&aws_config),
    };
    let invoker_ref = &invoker;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, invoker_ref).await
    }))
    .await
}
