//! Fenced-JSON extraction for the grounded outline path.
//!
//! Grounded replies are free text; the outline travels inside the first
//! fenced ```json block. This is deliberately isolated from the plain-JSON
//! path, which parses the whole response body.

const OPEN_FENCE: &str = "```json";
const CLOSE_FENCE: &str = "```";

/// Locate the first fenced ```json block and return its inner text,
/// trimmed. Returns `None` when no complete block exists.
#[must_use]
pub fn fenced_json(text: &str) -> Option<&str> {
    let start = text.find(OPEN_FENCE)? + OPEN_FENCE.len();
    let rest = &text[start..];
    let end = rest.find(CLOSE_FENCE)?;
    Some(rest[..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_block() {
        let text = "Here is the outline:\n```json\n{\"a\": 1}\n```\nand more text";
        assert_eq!(fenced_json(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn first_of_multiple_blocks_wins() {
        let text = "```json\n{\"first\": true}\n```\n```json\n{\"second\": true}\n```";
        assert_eq!(fenced_json(text), Some("{\"first\": true}"));
    }

    #[test]
    fn missing_block_is_none() {
        assert_eq!(fenced_json("plain prose, no json here"), None);
    }

    #[test]
    fn unterminated_block_is_none() {
        assert_eq!(fenced_json("```json\n{\"a\": 1}"), None);
    }

    #[test]
    fn plain_fence_without_json_tag_is_none() {
        assert_eq!(fenced_json("```\n{\"a\": 1}\n```"), None);
    }

    #[test]
    fn empty_block_yields_empty_str() {
        assert_eq!(fenced_json("```json\n\n```"), Some(""));
    }
}
