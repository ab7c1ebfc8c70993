use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use lol_html::{element, HtmlRewriter, Settings};
use tracing::info;

use docmill_common::DocmillError;

/// Tags removed (with their entire subtrees) from cleaned files.
const STRIPPED_TAGS: &[&str] = &["head", "style", "script", "meta"];

/// Guess the character encoding of raw bytes.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Decode bytes with the detected encoding. Malformed sequences are
/// replaced with U+FFFD, so the output is deterministic for a given input.
pub fn decode_detected(bytes: &[u8]) -> String {
    let (decoded, _, _) = detect_encoding(bytes).decode(bytes);
    decoded.into_owned()
}

/// Remove every head/style/script/meta element and its content, leaving the
/// rest of the markup untouched.
pub fn strip_excluded_tags(html: &str) -> Result<String, DocmillError> {
    let mut output = Vec::new();
    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: STRIPPED_TAGS
                .iter()
                .map(|tag| {
                    element!(tag, |el| {
                        el.remove();
                        Ok(())
                    })
                })
                .collect(),
            ..Settings::default()
        },
        |chunk: &[u8]| output.extend_from_slice(chunk),
    );

    rewriter
        .write(html.as_bytes())
        .map_err(|e| DocmillError::Transform(e.to_string()))?;
    rewriter
        .end()
        .map_err(|e| DocmillError::Transform(e.to_string()))?;

    String::from_utf8(output).map_err(|e| DocmillError::Transform(e.to_string()))
}

/// Decode, strip, and rewrite one file in place as UTF-8.
pub fn clean_html_file(path: &Path) -> Result<(), DocmillError> {
    let raw = fs::read(path)?;
    let cleaned = strip_excluded_tags(&decode_detected(&raw))?;
    fs::write(path, cleaned)?;
    Ok(())
}

/// Clean every `.html` file directly inside `dir` (no recursion). The first
/// failure aborts the batch. Returns the number of files cleaned.
pub fn clean_folder(dir: &Path) -> Result<usize, DocmillError> {
    let mut cleaned = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("html") {
            continue;
        }
        info!(file = %path.display(), "Cleaning");
        clean_html_file(&path)?;
        cleaned += 1;
    }
    Ok(cleaned)
}
