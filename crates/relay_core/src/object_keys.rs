use chrono::{DateTime, Utc};

pub const DEFAULT_KEY_PREFIX: &str = "hello-world-";
pub const FILE_EXTENSION: &str = "txt";

/// Second-resolution ISO-8601 timestamp with `:` replaced by `-`, e.g.
/// `2026-02-14T09-05-07`.
pub fn file_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H-%M-%S").to_string()
}

pub fn object_key(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{prefix}{}.{FILE_EXTENSION}", file_timestamp(now))
}

pub fn object_url(bucket: &str, key: &str) -> String {
    format!("https://{bucket}.s3.amazonaws.com/{key}")
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn sample_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 14, 9, 5, 7).unwrap() + Duration::milliseconds(431)
    }

    #[test]
    fn timestamp_drops_colons_and_fraction() {
        assert_eq!(file_timestamp(sample_time()), "2026-02-14T09-05-07");
    }

    #[test]
    fn builds_key_with_prefix_and_extension() {
        let key = object_key(DEFAULT_KEY_PREFIX, sample_time());
        assert_eq!(key, "hello-world-2026-02-14T09-05-07.txt");
        assert!(!key.contains(':'));
    }

    #[test]
    fn keys_differ_across_seconds_and_match_within_one() {
        let now = sample_time();
        let same_second = now + Duration::milliseconds(500);
        let next_second = now + Duration::seconds(1);

        assert_eq!(
            object_key(DEFAULT_KEY_PREFIX, now),
            object_key(DEFAULT_KEY_PREFIX, same_second)
        );
        assert_ne!(
            object_key(DEFAULT_KEY_PREFIX, now),
            object_key(DEFAULT_KEY_PREFIX, next_second)
        );
    }

    #[test]
    fn builds_virtual_hosted_url() {
        assert_eq!(
            object_url("my-bucket", "hello-world-2026-02-14T09-05-07.txt"),
            "https://my-bucket.s3.amazonaws.com/hello-world-2026-02-14T09-05-07.txt"
        );
    }
}
