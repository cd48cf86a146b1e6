use crate::core::config::StorageConfig;

/// Derives the public URL of a stored key.
///
/// AWS buckets use virtual-hosted style:
/// `https://{bucket}.s3.{region}.amazonaws.com/{key}`.
/// S3-compatible endpoints use path style: `{public_endpoint}/{bucket}/{key}`.
/// Keys are inserted verbatim.
#[derive(Debug, Clone)]
pub struct PublicUrlBuilder {
    bucket: String,
    region: String,
    public_endpoint: Option<String>,
}

impl PublicUrlBuilder {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            public_endpoint: config.public_endpoint.clone(),
        }
    }

    pub fn object_url(&self, key: &str) -> String {
        match &self.public_endpoint {
            Some(endpoint) => format!(
                "{}/{}/{}",
                endpoint.trim_end_matches('/'),
                self.bucket,
                key
            ),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_storage_config;

    #[test]
    fn test_aws_url() {
        let urls = PublicUrlBuilder::new(&test_storage_config());
        assert_eq!(
            urls.object_url("0123_report.pdf"),
            "https://mybucket.s3.us-east-1.amazonaws.com/0123_report.pdf"
        );
    }

    #[test]
    fn test_key_is_inserted_verbatim() {
        let urls = PublicUrlBuilder::new(&test_storage_config());
        assert_eq!(
            urls.object_url("0123_a#b?c.txt"),
            "https://mybucket.s3.us-east-1.amazonaws.com/0123_a#b?c.txt"
        );
    }

    #[test]
    fn test_custom_endpoint_url() {
        let mut config = test_storage_config();
        config.public_endpoint = Some("http://localhost:9000/".to_string());
        let urls = PublicUrlBuilder::new(&config);
        assert_eq!(
            urls.object_url("a.txt"),
            "http://localhost:9000/mybucket/a.txt"
        );
    }
}
