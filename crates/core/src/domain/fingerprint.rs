// Content fingerprint for queue listings

use sha2::{Digest, Sha256};

const SEPARATOR: &str = ",";

/// SHA-256 of the names joined with `,`, as lowercase hex
///
/// Names are not escaped: `["a,b"]` and `["a", "b"]` share a fingerprint.
pub fn fingerprint<S: AsRef<str>>(names: &[S]) -> String {
    let mut hasher = Sha256::new();
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            hasher.update(SEPARATOR.as_bytes());
        }
        hasher.update(name.as_ref().as_bytes());
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_hashes_empty_string() {
        let empty: [&str; 0] = [];
        assert_eq!(
            fingerprint(&empty),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_matches_joined_digest() {
        let joined = hex::encode(Sha256::digest(b"alpha,beta"));
        assert_eq!(fingerprint(&["alpha", "beta"]), joined);
        assert_eq!(joined.len(), 64);
        assert!(joined.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_order_and_membership_change_fingerprint() {
        let base = fingerprint(&["alpha", "beta"]);
        assert_ne!(base, fingerprint(&["beta", "alpha"]));
        assert_ne!(base, fingerprint(&["alpha"]));
        assert_ne!(base, fingerprint(&["alpha", "beta", "gamma"]));
    }

    #[test]
    fn test_comma_in_name_is_ambiguous() {
        assert_eq!(fingerprint(&["a,b"]), fingerprint(&["a", "b"]));
    }
}
