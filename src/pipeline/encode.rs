//! Payload encoding: PDF bytes → base64 raw-document request body.
//!
//! Document AI's online `:process` method takes the document inline as a
//! base64 string in the JSON body (`rawDocument.content`). Inline upload
//! avoids a Cloud Storage round-trip and suits the single-shot batch shape
//! of this client; the method's 20 MB request cap is far above any form a
//! form processor handles well.

use crate::document::{ProcessRequest, RawDocument};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

/// Wrap raw PDF bytes as a ready-to-send process request.
pub fn encode_request(bytes: &[u8], mime_type: &str) -> ProcessRequest {
    let content = STANDARD.encode(bytes);
    debug!("Encoded document → {} bytes base64", content.len());

    ProcessRequest {
        raw_document: RawDocument {
            content,
            mime_type: mime_type.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_bytes_as_base64() {
        let req = encode_request(b"%PDF-1.7", "application/pdf");
        assert_eq!(req.raw_document.mime_type, "application/pdf");
        let decoded = STANDARD.decode(&req.raw_document.content).unwrap();
        assert_eq!(decoded, b"%PDF-1.7");
    }

    #[test]
    fn empty_input_encodes_to_empty_content() {
        let req = encode_request(b"", "application/pdf");
        assert!(req.raw_document.content.is_empty());
    }
}
