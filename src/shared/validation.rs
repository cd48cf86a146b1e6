use lazy_static::lazy_static;
use regex::Regex;

use crate::shared::constants::KEY_TOKEN_HEX_LEN;

lazy_static! {
    /// Shape of keys produced by the upload flow: `<32 lowercase hex>_<filename>`
    /// - Valid: "0f1e2d3c4b5a69788796a5b4c3d2e1f0_report.pdf"
    /// - Invalid: "report.pdf", "0F1E..._x" (uppercase), "abc_report.pdf" (short token)
    pub static ref GENERATED_KEY_REGEX: Regex =
        Regex::new(&format!(r"^(?s)[0-9a-f]{{{}}}_(.*)$", KEY_TOKEN_HEX_LEN)).unwrap();

    /// Shape of an AWS region name: `<partition>-<area>-<n>`
    /// - Valid: "us-east-1", "mx-central-1", "ap-southeast-5", "us-gov-west-1"
    /// - Invalid: "US-EAST-1", "useast1", "us-east", "s3.amazonaws.com"
    pub static ref AWS_REGION_REGEX: Regex =
        Regex::new(r"^[a-z]{2}(-[a-z]+)+-[0-9]+$").unwrap();
}

/// Filename embedded in a generated key, or `None` for keys of another shape
pub fn original_filename(key: &str) -> Option<&str> {
    GENERATED_KEY_REGEX
        .captures(key)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
