use uuid::Uuid;

use crate::shared::validation::original_filename;

/// An object written to the configured container.
///
/// Keys are never checked against existing objects; uniqueness rests on the
/// random token alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub container: String,
}

impl StoredObject {
    /// Name a new object for an upload of `filename` into `container`
    pub fn for_upload(container: &str, filename: &str) -> Self {
        Self {
            key: generate_key(filename),
            container: container.to_string(),
        }
    }

    /// Filename the object was uploaded under, or the raw key for objects
    /// that were not named by this service
    pub fn display_name(&self) -> &str {
        original_filename(&self.key).unwrap_or(&self.key)
    }
}

/// Build `<32 hex chars>_<filename>`.
///
/// The filename is kept verbatim, path separators and all.
pub fn generate_key(filename: &str) -> String {
    format!("{}_{}", Uuid::new_v4().simple(), filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::KEY_TOKEN_HEX_LEN;
    use std::collections::HashSet;

    #[test]
    fn test_key_shape() {
        for filename in ["report.pdf", "a b.txt", "../etc/passwd", "x_y_z", ""] {
            let key = generate_key(filename);
            let (token, rest) = key.split_at(KEY_TOKEN_HEX_LEN);
            assert!(token
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
            assert_eq!(rest, format!("_{}", filename));
            assert!(key.ends_with(filename));
        }
    }

    #[test]
    fn test_repeated_uploads_get_distinct_keys() {
        let keys: HashSet<String> = (0..1000).map(|_| generate_key("report.pdf")).collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_display_name() {
        let object = StoredObject::for_upload("mybucket", "report.pdf");
        assert_eq!(object.container, "mybucket");
        assert_eq!(object.display_name(), "report.pdf");

        let foreign = StoredObject {
            key: "a.txt".to_string(),
            container: "mybucket".to_string(),
        };
        assert_eq!(foreign.display_name(), "a.txt");
    }
}
