//! JSON wire format for actions and state snapshots

use thiserror::Error;

use crate::action::BlockDirectoryAction;
use crate::state::BlockDirectoryState;

/// Errors from decoding actions or encoding state
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, CodecError>;

/// Decode a single action object
pub fn decode_action(input: &str) -> Result<BlockDirectoryAction> {
    Ok(serde_json::from_str(input)?)
}

/// Decode a JSON-lines action log
///
/// Blank lines and lines starting with `#` are skipped. Errors carry the
/// 1-based line number.
pub fn decode_action_log(input: &str) -> Result<Vec<BlockDirectoryAction>> {
    input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, text)| {
            serde_json::from_str(text).map_err(|source| CodecError::Line { line, source })
        })
        .collect()
}

/// Encode an action log as JSON lines
pub fn encode_action_log(actions: &[BlockDirectoryAction]) -> Result<String> {
    let mut out = String::new();
    for action in actions {
        out.push_str(&serde_json::to_string(action)?);
        out.push('\n');
    }
    Ok(out)
}

/// Pretty-printed state snapshot
pub fn encode_state(state: &BlockDirectoryState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Decode a state snapshot, e.g. to seed a store
pub fn decode_state(input: &str) -> Result<BlockDirectoryState> {
    Ok(serde_json::from_str(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ErrorNotice;

    #[test]
    fn test_decode_action() {
        let action =
            decode_action(r#"{ "type": "FETCH_DOWNLOADABLE_BLOCKS", "filterValue": "Awesome Block" }"#)
                .unwrap();
        assert_eq!(
            action,
            BlockDirectoryAction::fetch_downloadable_blocks("Awesome Block")
        );

        let action = decode_action(
            r#"{ "type": "SET_ERROR_NOTICE", "blockId": "block/no-error", "notice": false }"#,
        )
        .unwrap();
        assert_eq!(
            action,
            BlockDirectoryAction::set_error_notice("block/no-error", ErrorNotice::Cleared)
        );
    }

    #[test]
    fn test_decode_foreign_type_is_unrecognized() {
        let action = decode_action(r#"{ "type": "NOOP_TYPE" }"#).unwrap();
        assert_eq!(action, BlockDirectoryAction::Unrecognized);
    }

    #[test]
    fn test_decode_missing_type_fails() {
        let err = decode_action(r#"{ "blockId": "b1" }"#).unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn test_decode_notice_true_fails() {
        assert!(decode_action(
            r#"{ "type": "SET_ERROR_NOTICE", "blockId": "b1", "notice": true }"#
        )
        .is_err());
    }

    #[test]
    fn test_decode_log_skips_comments_and_reports_lines() {
        let log = "# session\n\
                   {\"type\":\"SET_INSTALL_BLOCKS_PERMISSION\",\"hasPermission\":true}\n\
                   \n\
                   {\"type\":\"CLEAR_ERROR_NOTICE\",\"blockId\":\"b1\"}\n";
        let actions = decode_action_log(log).unwrap();
        assert_eq!(
            actions,
            vec![
                BlockDirectoryAction::set_install_blocks_permission(true),
                BlockDirectoryAction::clear_error_notice("b1"),
            ]
        );

        let broken = "{\"type\":\"CLEAR_ERROR_NOTICE\",\"blockId\":\"b1\"}\n\n{\"type\":";
        match decode_action_log(broken).unwrap_err() {
            CodecError::Line { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_action_log_survives_encoding() {
        let actions = crate::fixtures::sample_session();
        let encoded = encode_action_log(&actions).unwrap();
        assert_eq!(encoded.lines().count(), actions.len());
        assert_eq!(decode_action_log(&encoded).unwrap(), actions);
    }

    #[test]
    fn test_state_snapshot_uses_wire_shape() {
        let mut state = BlockDirectoryState::default();
        state
            .error_notices
            .insert("b1".into(), ErrorNotice::Cleared);

        let encoded = encode_state(&state).unwrap();
        assert!(encoded.contains("\"errorNotices\""));
        assert!(encoded.contains("\"b1\": false"));
        assert_eq!(decode_state(&encoded).unwrap(), state);
    }
}
