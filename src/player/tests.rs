use super::*;
use crate::annotations::RawAnnotation;
use crate::clock::PlaybackClock;
use crate::error::NavigationError;
use crate::runtime::VirtualRuntime;
use crate::simulation::SimulatedReplay;
use serde_json::json;

fn raw(id: &str, timestamp_ms: u64) -> RawAnnotation {
    RawAnnotation {
        id: Some(id.to_string()),
        timestamp_ms: Some(json!(timestamp_ms)),
        ..RawAnnotation::default()
    }
}

fn recording(raw: Vec<RawAnnotation>, duration_ms: u64) -> Recording {
    Recording {
        store: AnnotationStore::load(raw).expect("valid annotations"),
        duration_ms,
    }
}

fn notebook() -> Recording {
    recording(
        vec![
            raw("a1", 0),
            RawAnnotation {
                title: Some("Notebook Area".into()),
                autopause: true,
                target_selector: Some("#notebook".into()),
                overlay_content: Some("Cells you run show up here.".into()),
                ..raw("a2", 8_000)
            },
            RawAnnotation {
                target_selector: Some("#share".into()),
                ..raw("a3", 15_000)
            },
        ],
        20_000,
    )
}

fn mount(recording: Recording, replay: SimulatedReplay) -> VirtualRuntime<SimulatedReplay> {
    let mut runtime = VirtualRuntime::new(Player::new(recording, AppConfig::default()), replay);
    runtime.take_events();
    runtime
}

fn notebook_runtime() -> VirtualRuntime<SimulatedReplay> {
    let recording = notebook();
    let replay = SimulatedReplay::from_recording(&recording);
    mount(recording, replay)
}

fn shown_overlays(events: &[UiEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            UiEvent::OverlayStateChanged {
                state: OverlayView::Shown { annotation_id, .. },
            } => Some(annotation_id.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn mount_announces_annotations_and_markers() {
    let mut player = Player::new(notebook(), AppConfig::default());
    let commands = player.drain();
    let Some(Command::Notify(UiEvent::AnnotationsLoaded {
        annotations,
        markers,
    })) = commands.first()
    else {
        panic!("expected AnnotationsLoaded, got {commands:?}");
    };
    let ids: Vec<_> = annotations.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2", "a3"]);
    assert_eq!(markers[1].position_pct, 40.0);
    assert!(markers[1].autopause);
}

#[test]
fn autopause_at_notebook_area_then_space_only_dismisses() {
    let mut runtime = notebook_runtime();
    runtime.dispatch(Message::Play);
    runtime.run_for(10_000);

    assert_eq!(runtime.engine().current_time_ms(), 8_000);
    assert!(!runtime.engine().is_playing());
    assert_eq!(runtime.player().state().active_annotation_id(), Some("a2"));
    assert_eq!(
        runtime.player().state().overlay(),
        Some(OverlayRef {
            annotation_id: "a2",
            visible: true
        })
    );
    let events = runtime.take_events();
    assert_eq!(shown_overlays(&events), vec!["a2".to_string()]);
    let title = events.iter().find_map(|event| match event {
        UiEvent::OverlayStateChanged {
            state: OverlayView::Shown { title, .. },
        } => Some(title.clone()),
        _ => None,
    });
    assert_eq!(title.as_deref(), Some("Notebook Area"));

    assert_eq!(runtime.press(" "), Some(Message::DismissOverlay));
    assert_eq!(runtime.player().state().overlay(), None);
    assert!(!runtime.engine().is_playing());
    runtime.run_for(1_000);
    assert_eq!(runtime.engine().current_time_ms(), 8_000);

    assert_eq!(runtime.press(" "), Some(Message::TogglePlayPause));
    assert!(runtime.engine().is_playing());
}

#[test]
fn left_arrow_on_notebook_area_goes_to_start() {
    let mut runtime = notebook_runtime();
    runtime.dispatch(Message::Play);
    runtime.run_for(10_000);
    runtime.press(" ");

    assert_eq!(runtime.press("ArrowLeft"), Some(Message::PreviousBookmark));
    assert_eq!(runtime.player().state().active_annotation_id(), Some("a1"));
    assert_eq!(runtime.engine().current_time_ms(), 0);
    assert_eq!(runtime.engine().seek_log().last(), Some(&0));
}

#[test]
fn previous_steps_over_active_bookmark_just_passed() {
    let mut runtime = notebook_runtime();
    runtime.dispatch(Message::GotoAnnotation { id: "a2".into() });
    runtime.dispatch(Message::Play);
    runtime.run_for(100);
    assert_eq!(runtime.engine().current_time_ms(), 8_100);

    runtime.dispatch(Message::PreviousBookmark);
    assert_eq!(runtime.player().state().active_annotation_id(), Some("a1"));
    assert_eq!(runtime.engine().current_time_ms(), 0);
    assert!(!runtime.engine().is_playing());
}

#[test]
fn goto_unknown_keeps_active_annotation() {
    let recording = notebook();
    let mut replay = SimulatedReplay::from_recording(&recording);
    let mut player = Player::new(recording, AppConfig::default());
    player.goto_id("a3", &mut replay).expect("known id");
    player.drain();

    let err = player.goto_id("unknown", &mut replay).expect_err("unknown id");
    assert_eq!(
        err,
        NavigationError::UnknownAnnotationId {
            id: "unknown".into()
        }
    );
    assert_eq!(player.state().active_annotation_id(), Some("a3"));
    assert_eq!(replay.current_time_ms(), 15_000);
    assert!(player.drain().is_empty());
}

#[test]
fn next_then_previous_returns_to_origin() {
    let recording = notebook();
    let mut replay = SimulatedReplay::from_recording(&recording);
    let mut player = Player::new(recording, AppConfig::default());

    assert_eq!(player.goto_id("a1", &mut replay), Ok("a1".to_string()));
    assert_eq!(player.next(&mut replay), Ok("a2".to_string()));
    assert_eq!(replay.current_time_ms(), 8_000);
    assert_eq!(player.previous(&mut replay), Ok("a1".to_string()));
    assert_eq!(replay.current_time_ms(), 0);
    assert_eq!(player.state().active_annotation_id(), Some("a1"));
}

#[test]
fn no_more_bookmarks_leaves_time_and_active_alone() {
    let recording = notebook();
    let mut replay = SimulatedReplay::from_recording(&recording);
    let mut player = Player::new(recording, AppConfig::default());
    player.goto_id("a3", &mut replay).expect("known id");
    player.drain();
    let seeks = replay.seek_log().len();

    let err = player.next(&mut replay).expect_err("past the end");
    assert!(err.is_boundary());
    assert_eq!(replay.current_time_ms(), 15_000);
    assert_eq!(replay.seek_log().len(), seeks);
    assert_eq!(player.state().active_annotation_id(), Some("a3"));
    assert_eq!(
        player.drain(),
        vec![Command::Notify(UiEvent::NoMoreBookmarks {
            direction: Direction::Forward
        })]
    );

    player.goto_id("a1", &mut replay).expect("known id");
    assert_eq!(
        player.previous(&mut replay),
        Err(NavigationError::NoMoreBookmarks {
            direction: Direction::Backward
        })
    );
    assert_eq!(replay.current_time_ms(), 0);
}

#[test]
fn rapid_next_presses_chain_from_pending_target() {
    let recording = notebook();
    let replay = SimulatedReplay::from_recording(&recording).with_seek_latency(100);
    let mut runtime = mount(recording, replay);

    runtime.press("ArrowRight");
    assert!(matches!(
        runtime.player().state().phase(),
        NavPhase::Seeking { target_ms: 8_000, .. }
    ));
    runtime.press("ArrowRight");
    assert_eq!(runtime.engine().seek_log(), &[8_000, 15_000]);
    assert_eq!(runtime.player().state().active_annotation_id(), Some("a3"));

    runtime.run_for(200);
    assert_eq!(
        runtime.player().state().phase(),
        &NavPhase::AtBookmark {
            annotation_id: "a3".into()
        }
    );
}

#[test]
fn autopause_fires_once_per_crossing_and_again_after_rewind() {
    let mut runtime = notebook_runtime();
    runtime.dispatch(Message::Play);
    runtime.run_for(10_000);
    runtime.press("Escape");
    runtime.dispatch(Message::Play);
    runtime.run_for(1_000);
    assert_eq!(runtime.engine().current_time_ms(), 9_000);
    assert!(runtime.engine().is_playing());
    assert_eq!(shown_overlays(&runtime.take_events()), vec!["a2".to_string()]);

    runtime.scrub_to(2_000);
    runtime.run_for(7_000);
    assert_eq!(runtime.engine().current_time_ms(), 8_000);
    assert!(!runtime.engine().is_playing());
    assert_eq!(runtime.player().state().awaiting_autopause_ack(), Some("a2"));
    assert_eq!(shown_overlays(&runtime.take_events()), vec!["a2".to_string()]);
}

#[test]
fn overshoot_seeks_back_to_autopause_instant() {
    let recording = notebook();
    let replay = SimulatedReplay::from_recording(&recording);
    let mut runtime = mount(recording, replay);
    runtime.scrub_to(7_980);
    runtime.dispatch(Message::Play);
    runtime.run_for(50);

    assert_eq!(runtime.engine().seek_log().last(), Some(&8_000));
    assert_eq!(runtime.engine().current_time_ms(), 8_000);
    assert!(!runtime.engine().is_playing());
}

#[test]
fn same_instant_autopauses_each_pause_once() {
    let pause = |id: &str| RawAnnotation {
        autopause: true,
        overlay_content: Some(format!("{id} content")),
        ..raw(id, 1_000)
    };
    let recording = recording(vec![pause("p1"), pause("p2")], 5_000);
    let replay = SimulatedReplay::from_recording(&recording);
    let mut runtime = mount(recording, replay);

    runtime.dispatch(Message::Play);
    runtime.run_for(2_000);
    assert_eq!(runtime.player().state().active_annotation_id(), Some("p1"));
    assert_eq!(runtime.engine().current_time_ms(), 1_000);
    assert!(!runtime.engine().is_playing());
    runtime.take_events();

    runtime.press("Escape");
    runtime.dispatch(Message::Play);
    runtime.run_for(2_000);
    assert_eq!(runtime.player().state().active_annotation_id(), Some("p2"));
    assert_eq!(runtime.engine().current_time_ms(), 1_000);
    assert!(!runtime.engine().is_playing());
    assert_eq!(shown_overlays(&runtime.take_events()), vec!["p2".to_string()]);

    runtime.press("Escape");
    runtime.dispatch(Message::Play);
    runtime.run_for(2_000);
    assert!(runtime.engine().is_playing());
    assert_eq!(runtime.engine().current_time_ms(), 3_000);
    assert!(shown_overlays(&runtime.take_events()).is_empty());
}

#[test]
fn pending_overlay_ignores_dismiss_and_lets_space_toggle_playback() {
    let recording = notebook();
    let replay = SimulatedReplay::from_recording(&recording).with_seek_latency(120);
    let mut runtime = mount(recording, replay);

    runtime.dispatch(Message::GotoAnnotation { id: "a2".into() });
    let pending = runtime.player().state().overlay_phase().clone();
    assert!(matches!(
        &pending,
        OverlayPhase::PendingAnchor { annotation_id, .. } if annotation_id == "a2"
    ));

    assert!(!runtime.player_mut().dismiss_overlay());
    assert_eq!(runtime.player().state().overlay_phase(), &pending);
    assert!(runtime.player_mut().drain().is_empty());

    assert_eq!(runtime.press(" "), Some(Message::TogglePlayPause));
    assert!(runtime.engine().is_playing());
    assert_eq!(runtime.player().state().overlay(), None);

    runtime.run_for(500);
    assert_eq!(runtime.player().state().overlay(), None);
    assert_eq!(runtime.pending_timers(), 0);
}

#[test]
fn external_seek_clears_overlay_and_acknowledges() {
    let mut runtime = notebook_runtime();
    runtime.dispatch(Message::Play);
    runtime.run_for(10_000);
    assert!(runtime.player().state().overlay().is_some());

    runtime.scrub_to(3_000);
    assert_eq!(runtime.player().state().overlay(), None);
    assert_eq!(runtime.player().state().awaiting_autopause_ack(), None);
    assert_eq!(runtime.player().state().active_annotation_id(), Some("a2"));
}

#[test]
fn at_most_one_overlay_is_shown() {
    let recording = recording(
        vec![
            RawAnnotation {
                overlay_content: Some("first".into()),
                ..raw("b1", 1_000)
            },
            RawAnnotation {
                overlay_content: Some("second".into()),
                ..raw("b2", 2_000)
            },
        ],
        5_000,
    );
    let replay = SimulatedReplay::from_recording(&recording);
    let mut runtime = mount(recording, replay);

    runtime.dispatch(Message::GotoAnnotation { id: "b1".into() });
    runtime.dispatch(Message::GotoAnnotation { id: "b2".into() });

    let states: Vec<OverlayView> = runtime
        .take_events()
        .into_iter()
        .filter_map(|event| match event {
            UiEvent::OverlayStateChanged { state } => Some(state),
            _ => None,
        })
        .collect();
    let mut visible = 0;
    for state in &states {
        visible = if state.is_shown() { visible + 1 } else { 0 };
        assert!(visible <= 1, "two overlays shown at once: {states:?}");
    }
    assert_eq!(
        states.last(),
        Some(&OverlayView::Shown {
            annotation_id: "b2".into(),
            title: "b2".into(),
            content: Some("second".into()),
            anchor: None,
        })
    );
}

#[test]
fn superseded_anchor_retry_is_dropped() {
    let recording = recording(
        vec![
            RawAnnotation {
                target_selector: Some("#editor".into()),
                overlay_content: Some("editor".into()),
                ..raw("c1", 1_000)
            },
            RawAnnotation {
                target_selector: Some("#console".into()),
                overlay_content: Some("console".into()),
                ..raw("c2", 3_000)
            },
        ],
        10_000,
    );
    let replay = SimulatedReplay::from_recording(&recording).with_seek_latency(120);
    let mut runtime = mount(recording, replay);

    runtime.dispatch(Message::GotoAnnotation { id: "c1".into() });
    assert!(matches!(
        runtime.player().state().overlay_phase(),
        OverlayPhase::PendingAnchor { attempt: 1, .. }
    ));
    runtime.dispatch(Message::GotoAnnotation { id: "c2".into() });
    assert_eq!(runtime.pending_timers(), 2);

    runtime.run_for(400);
    assert_eq!(shown_overlays(&runtime.take_events()), vec!["c2".to_string()]);
    assert_eq!(
        runtime.player().state().overlay_phase(),
        &OverlayPhase::Shown {
            annotation_id: "c2".into(),
            anchor: Some(crate::document::ElementHandle("#console".into())),
        }
    );
    assert_eq!(runtime.pending_timers(), 0);
}

#[test]
fn missing_anchor_gives_up_after_bounded_attempts() {
    let recording = recording(
        vec![RawAnnotation {
            target_selector: Some("#gone".into()),
            overlay_content: Some("never rendered".into()),
            ..raw("d1", 500)
        }],
        5_000,
    );
    let replay = SimulatedReplay::from_recording(&recording);
    let mut runtime = mount(recording, replay);
    runtime.engine_mut().remove_element("#gone");

    runtime.dispatch(Message::GotoAnnotation { id: "d1".into() });
    runtime.run_for(1_700);
    assert!(matches!(
        runtime.player().state().overlay_phase(),
        OverlayPhase::PendingAnchor { attempt: 9, .. }
    ));

    runtime.run_for(300);
    let events = runtime.take_events();
    assert!(events.contains(&UiEvent::AnchorNotFound { id: "d1".into() }));
    assert_eq!(runtime.player().state().overlay(), None);
    assert_eq!(runtime.pending_timers(), 0);
    assert_eq!(runtime.player().state().active_annotation_id(), Some("d1"));
}

#[test]
fn play_clears_overlay_and_acknowledges_autopause() {
    let mut runtime = notebook_runtime();
    runtime.dispatch(Message::Play);
    runtime.run_for(10_000);
    runtime.take_events();

    runtime.dispatch(Message::Play);
    assert!(runtime.engine().is_playing());
    assert_eq!(runtime.player().state().overlay(), None);
    assert_eq!(runtime.player().state().awaiting_autopause_ack(), None);
    assert_eq!(
        runtime.take_events(),
        vec![
            UiEvent::OverlayStateChanged {
                state: OverlayView::Hidden
            },
            UiEvent::PlaybackToggled { playing: true },
        ]
    );
}

#[test]
fn toc_toggle_and_selection() {
    let mut runtime = notebook_runtime();
    assert_eq!(runtime.press("t"), Some(Message::ToggleToc));
    assert!(runtime.player().state().toc_open());
    assert_eq!(runtime.take_events(), vec![UiEvent::TocToggled { open: true }]);

    runtime.dispatch(Message::SelectTocItem { id: "a3".into() });
    assert!(runtime.player().state().toc_open());
    assert_eq!(runtime.engine().current_time_ms(), 15_000);
    let active: Vec<_> = runtime
        .player()
        .toc_items()
        .into_iter()
        .filter(|item| item.active)
        .map(|item| item.id)
        .collect();
    assert_eq!(active, vec!["a3".to_string()]);

    assert!(!runtime.player_mut().toggle_toc());
}

#[test]
fn snapshot_reflects_session() {
    let mut runtime = notebook_runtime();
    runtime.dispatch(Message::Play);
    runtime.run_for(10_000);

    let snapshot = runtime.player().snapshot(runtime.engine());
    assert_eq!(snapshot.current_time_ms, Some(8_000));
    assert_eq!(snapshot.duration_ms, 20_000);
    assert!(!snapshot.playing);
    assert_eq!(snapshot.active_annotation_id.as_deref(), Some("a2"));
    assert!(snapshot.overlay.is_shown());
    assert_eq!(snapshot.toc.len(), 3);
}

#[test]
fn ticks_stop_when_paused_and_settled() {
    let recording = notebook();
    let mut replay = SimulatedReplay::from_recording(&recording).with_seek_latency(50);
    let mut player = Player::new(recording, AppConfig::default());
    assert!(!player.wants_ticks(&replay));

    player.goto_id("a3", &mut replay).expect("known id");
    assert!(player.wants_ticks(&replay));
    replay.elapse(50);
    player.update(Message::Tick, &mut replay);
    assert!(!player.wants_ticks(&replay));
}
