//! Checksum sidecars published next to every artifact (MD5, SHA-1).

use nexup_util::hash::{md5_hex, sha1_hex};

/// Hex digests of one artifact file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksums {
    pub md5: String,
    pub sha1: String,
}

impl Checksums {
    pub fn compute(data: &[u8]) -> Self {
        Self {
            md5: md5_hex(data),
            sha1: sha1_hex(data),
        }
    }
}

/// URL of the MD5 sidecar for `file_url`.
pub fn md5_url(file_url: &str) -> String {
    format!("{file_url}.md5")
}

/// URL of the SHA-1 sidecar for `file_url`.
pub fn sha1_url(file_url: &str) -> String {
    format!("{file_url}.sha1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_both_digests() {
        let sums = Checksums::compute(b"hello world");
        assert_eq!(sums.md5, "5eb63bbbe01eeed093cb22bb8f5acdc3");
        assert_eq!(sums.sha1, "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
    }

    #[test]
    fn sidecar_urls() {
        assert_eq!(md5_url("http://h/a-1.0.pom"), "http://h/a-1.0.pom.md5");
        assert_eq!(sha1_url("http://h/a-1.0.pom"), "http://h/a-1.0.pom.sha1");
    }
}
