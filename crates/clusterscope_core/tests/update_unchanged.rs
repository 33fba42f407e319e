use clusterscope_core::{update, AppState, Msg};

#[test]
fn gestures_without_a_target_leave_state_untouched() {
    let mut state = AppState::new();
    state.consume_dirty();

    let gestures = vec![
        Msg::FilesSelected(Vec::new()),
        Msg::DragLeft,
        Msg::TextChanged(String::new()),
        Msg::EntryRemoved { entry_id: 99 },
        Msg::DownloadClusterClicked {
            cluster_id: "0".to_string(),
        },
        Msg::DownloadAllClicked,
    ];
    for msg in gestures {
        let (mut next, effects) = update(state.clone(), msg.clone());
        assert_eq!(state, next, "{msg:?}");
        assert!(effects.is_empty(), "{msg:?}");
        assert!(!next.consume_dirty(), "{msg:?}");
    }
}
