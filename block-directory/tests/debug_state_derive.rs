//! Tests for #[derive(DebugState)] macro

#![allow(dead_code)]

use std::collections::BTreeMap;

use block_directory::debug::DebugState;
use block_directory::fixtures::sample_session;
use block_directory::{DebugState, ErrorNotice};

#[derive(Debug)]
enum InstallPhase {
    Downloading,
}

fn count_results(results: &[String]) -> String {
    format!("{} results", results.len())
}

fn pending_ids(installing: &BTreeMap<String, bool>) -> String {
    installing
        .iter()
        .filter(|(_, busy)| **busy)
        .map(|(id, _)| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[test]
fn test_fields_default_to_struct_section() {
    #[derive(DebugState)]
    struct PermissionState {
        has_permission: bool,
        checked_blocks: usize,
    }

    let state = PermissionState {
        has_permission: true,
        checked_blocks: 3,
    };

    assert_eq!(
        state.debug_text(),
        "[PermissionState]\n  has_permission: true\n  checked_blocks: 3\n"
    );
}

#[test]
fn test_attributes_shape_entries() {
    #[derive(DebugState)]
    struct InstallState {
        #[debug(section = "Install", label = "block id")]
        block_id: String,
        #[debug(section = "Install", debug_fmt)]
        phase: InstallPhase,
        #[debug(section = "Errors")]
        notice: ErrorNotice,
        #[debug(skip)]
        assets: Vec<String>,
    }

    let state = InstallState {
        block_id: "boxer-block".into(),
        phase: InstallPhase::Downloading,
        notice: ErrorNotice::Cleared,
        assets: vec!["index.js".into()],
    };

    let sections = state.debug_sections();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title, "Install");
    assert_eq!(sections[0].entries[0].key, "block id");
    assert_eq!(sections[0].entries[0].value, "boxer-block");
    assert_eq!(sections[0].entries[1].value, "Downloading");
    // Display of a cleared notice is its wire form
    assert_eq!(sections[1].entries[0].value, "false");
    assert_eq!(sections[1].entries.len(), 1);
}

#[test]
fn test_with_renderer() {
    #[derive(DebugState)]
    struct SearchState {
        #[debug(section = "Search", label = "results", with = "count_results")]
        results: Vec<String>,
        #[debug(section = "Installed", label = "installing", with = "pending_ids")]
        installing: BTreeMap<String, bool>,
    }

    let state = SearchState {
        results: vec!["boxer/boxer".into(), "slider/slider".into()],
        installing: [("a".to_string(), true), ("b".to_string(), false)]
            .into_iter()
            .collect(),
    };

    let sections = state.debug_sections();
    assert_eq!(sections[0].entries[0].value, "2 results");
    assert_eq!(sections[1].entries[0].value, "a");
}

#[test]
fn test_sections_keep_first_use_order() {
    #[derive(DebugState)]
    struct Interleaved {
        #[debug(section = "Search")]
        query: &'static str,
        #[debug(section = "Errors")]
        notices: usize,
        #[debug(section = "Search")]
        requesting: bool,
    }

    let state = Interleaved {
        query: "boxer",
        notices: 0,
        requesting: false,
    };

    assert_eq!(
        state.debug_text(),
        "[Search]\n  query: boxer\n  requesting: false\n[Errors]\n  notices: 0\n"
    );
}

#[test]
fn test_block_directory_state_sections() {
    let mut store = block_directory::store();
    store.dispatch_all(sample_session());

    let sections = store.state().debug_sections();

    let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Search", "Installed", "Permissions", "Errors"]);
    let keys: Vec<_> = sections.iter().map(|s| s.entries[0].key.as_str()).collect();
    assert_eq!(keys, vec!["queries", "block types", "install blocks", "notices"]);
}
