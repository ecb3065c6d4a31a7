use aws_sdk_s3::primitives::ByteStream;
use chrono::Utc;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use relay_lambda::adapters::object_store::ObjectStore;
use relay_lambda::handlers::writer::handle_write;
use relay_lambda::logging::init_tracing;
use relay_lambda::runtime::config::WriterConfig;
use relay_lambda::runtime::contract::ApiGatewayResponse;
use serde_json::Value;
use tracing::info;

struct S3ObjectStore {
    bucket: String,
    s3_client: aws_sdk_s3::Client,
}

impl ObjectStore for S3ObjectStore {
    fn write_object(&self, key: &str, body: &[u8]) -> Result<(), String> {
        let bucket = self.bucket.clone();
        let object_key = key.to_string();
        let body_bytes = body.to_vec();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(object_key)
                    .body(ByteStream::from(body_bytes))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to write object to s3: {error}"))
            })
        })
    }
}

async fn handle_request(
    event: LambdaEvent<Value>,
    config: &WriterConfig,
    store: &S3ObjectStore,
) -> Result<ApiGatewayResponse, Error> {
    info!(request_id = %event.context.request_id, bucket = %config.bucket, "write requested");
    Ok(handle_write(config, Utc::now(), store))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = WriterConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = S3ObjectStore {
        bucket: config.bucket.clone(),
        s3_client: aws_sdk_s3::Client::new(&aws_config),
    };
    let (config_ref, store_ref) = (&config, &store);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, config_ref, store_ref).await
    }))
    .await
}
