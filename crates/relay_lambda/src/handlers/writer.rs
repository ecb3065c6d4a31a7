use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::adapters::object_store::ObjectStore;
use crate::runtime::config::WriterConfig;
use crate::runtime::contract::{ApiGatewayResponse, UploadBody, FILE_CONTENT};
use crate::runtime::object_keys::{object_key, object_url};

/// Uploads the greeting file named after `now`. Never fails: storage errors
/// are logged and folded into a 500 response without the URL.
pub fn handle_write(
    config: &WriterConfig,
    now: DateTime<Utc>,
    store: &impl ObjectStore,
) -> ApiGatewayResponse {
    let key = object_key(&config.key_prefix, now);

    match store.write_object(&key, FILE_CONTENT.as_bytes()) {
        Ok(()) => {
            let s3_url = object_url(&config.bucket, &key);
            info!(%s3_url, "File uploaded to S3");
            ApiGatewayResponse::json(200, &UploadBody::uploaded(s3_url))
        }
        Err(message) => {
            error!(bucket = %config.bucket, %key, error = %message, "upload failed");
            ApiGatewayResponse::json(500, &UploadBody::failed())
        }
    }
}
