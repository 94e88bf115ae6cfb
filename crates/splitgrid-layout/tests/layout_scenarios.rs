//! End-to-end scenarios through the layout facade.

use std::collections::BTreeMap;

use splitgrid_layout::{
    ChangeScope, ContentFactory, ContentKind, DragEffect, DragState, EdgePosition, LayoutError,
    LayoutErrorKind, LayoutEvent, OperationFailure, Orientation, PaneId, PanelAction,
    PanelDescriptor, Point, Rect, SplitterLayout,
};

#[derive(Default)]
struct CountingFactory {
    created: u32,
}

impl ContentFactory<String> for CountingFactory {
    fn supported_kinds(&self) -> Vec<ContentKind> {
        vec![
            ContentKind::new("Chart", "chart"),
            ContentKind::new("Grid", "grid"),
        ]
    }

    fn create_content(&mut self, kind: &str) -> Option<String> {
        if kind != "chart" && kind != "grid" {
            return None;
        }
        self.created += 1;
        Some(format!("{kind}-{}", self.created))
    }
}

fn editing_layout() -> SplitterLayout<String> {
    let mut layout = SplitterLayout::new();
    layout.set_edit_mode(true);
    layout.set_content_factory(CountingFactory::default());
    let _ = layout.drain_events();
    layout
}

fn bounds_for(layout: &SplitterLayout<String>) -> BTreeMap<PaneId, Rect> {
    layout
        .solve_layout(Rect::new(0.0, 0.0, 200.0, 100.0))
        .leaf_bounds()
        .clone()
}

#[test]
fn split_assign_save_load_keeps_contents() {
    let mut layout = SplitterLayout::<String>::new();
    let root = layout.tree().root_id();
    let split = layout.split(root, Orientation::Vertical).expect("split root");

    let branch = layout.tree().branch(layout.tree().root_id()).expect("root branch");
    assert_eq!(branch.orientation(), Orientation::Vertical);
    assert_eq!(branch.proportions().first(), 0.5);
    assert_eq!(branch.proportions().second(), 0.5);
    assert!(layout.tree().leaves().iter().all(|leaf| leaf.is_empty()));

    layout.set_content(root, Some("A".into())).expect("assign A");
    layout
        .set_content(split.created, Some("B".into()))
        .expect("assign B");

    let saved = layout.save();
    layout.clear();
    layout.load(saved).expect("load");

    let contents: Vec<Option<&String>> = layout
        .tree()
        .leaves()
        .into_iter()
        .map(|leaf| leaf.content())
        .collect();
    assert_eq!(contents, vec![Some(&"A".to_string()), Some(&"B".to_string())]);
}

#[test]
fn add_edge_left_follows_literal_table() {
    let mut layout = SplitterLayout::<String>::new();
    let old_root = layout.tree().root_id();
    let outcome = layout.add_edge(EdgePosition::Left).expect("dock left");

    let root = layout.tree().branch(layout.tree().root_id()).expect("root branch");
    assert_eq!(root.orientation(), Orientation::Vertical);
    assert_eq!(root.first().id(), outcome.created);
    assert_eq!(root.second().id(), old_root);
    assert_eq!(root.proportions().first(), 0.7);
    assert_eq!(root.proportions().second(), 0.3);
}

#[test]
fn drag_swap_exchanges_contents_only() {
    let mut layout = editing_layout();
    let a = layout.tree().root_id();
    let split = layout.split(a, Orientation::Vertical).expect("split");
    let b = split.created;
    layout.set_content(a, Some("A".into())).expect("assign A");
    layout.set_content(b, Some("B".into())).expect("assign B");
    layout.set_proportion(split.branch, 0.4).expect("resize");
    let before = layout.save();
    let bounds = bounds_for(&layout);
    let _ = layout.drain_events();

    layout.begin_drag(a).expect("begin");
    let inside_b = bounds[&b].center();
    layout.update_drag(inside_b, &bounds);
    let ended = layout.end_drag().expect("end");
    assert_eq!(ended.effect, DragEffect::Swapped { source: a, target: b });

    assert_eq!(layout.tree().content(a), Some(&"B".to_string()));
    assert_eq!(layout.tree().content(b), Some(&"A".to_string()));
    let after = layout.save();
    assert_eq!(after.orientation, before.orientation);
    assert_eq!(after.first_proportion, before.first_proportion);
    assert_eq!(after.second_proportion, before.second_proportion);
    assert_eq!(layout.drag_state(), DragState::Idle);

    assert_eq!(
        layout.drain_events(),
        vec![
            LayoutEvent::LeafHighlightChanged { leaf: b, active: true },
            LayoutEvent::LeafHighlightChanged { leaf: b, active: false },
            LayoutEvent::ContentAssignmentChanged {
                leaf: a,
                content: Some("B".into())
            },
            LayoutEvent::ContentAssignmentChanged {
                leaf: b,
                content: Some("A".into())
            },
        ]
    );
}

#[test]
fn highlight_moves_between_leaves() {
    let mut layout = editing_layout();
    let a = layout.tree().root_id();
    let first = layout.split(a, Orientation::Vertical).expect("split");
    let second = layout
        .split(first.created, Orientation::Horizontal)
        .expect("split right");
    let b = first.created;
    let c = second.created;
    let bounds = bounds_for(&layout);
    let _ = layout.drain_events();

    layout.begin_drag(a).expect("begin");
    layout.update_drag(bounds[&b].center(), &bounds);
    layout.update_drag(bounds[&c].center(), &bounds);
    layout.update_drag(bounds[&a].center(), &bounds);
    assert_eq!(
        layout.drain_events(),
        vec![
            LayoutEvent::LeafHighlightChanged { leaf: b, active: true },
            LayoutEvent::LeafHighlightChanged { leaf: b, active: false },
            LayoutEvent::LeafHighlightChanged { leaf: c, active: true },
            LayoutEvent::LeafHighlightChanged { leaf: c, active: false },
        ]
    );
    let ended = layout.end_drag().expect("end");
    assert_eq!(ended.effect, DragEffect::Released { source: a });
}

#[test]
fn capture_loss_cancels_without_swap() {
    let mut layout = editing_layout();
    let a = layout.tree().root_id();
    let split = layout.split(a, Orientation::Horizontal).expect("split");
    layout.set_content(a, Some("A".into())).expect("assign");
    let bounds = bounds_for(&layout);

    layout.begin_drag(a).expect("begin");
    layout.update_drag(bounds[&split.created].center(), &bounds);
    let _ = layout.drain_events();
    let canceled = layout.cancel_drag().expect("active drag");
    assert!(matches!(canceled.effect, DragEffect::Canceled { .. }));
    assert_eq!(
        layout.drain_events(),
        vec![LayoutEvent::LeafHighlightChanged {
            leaf: split.created,
            active: false
        }]
    );
    assert_eq!(layout.tree().content(a), Some(&"A".to_string()));

    // A fresh drag starts from a clean state.
    layout.begin_drag(a).expect("second drag");
    assert_eq!(
        layout.drag_state(),
        DragState::Dragging {
            source: a,
            drop_target: None
        }
    );
}

#[test]
fn sole_root_leaf_cannot_be_removed_or_dragged() {
    let mut layout = editing_layout();
    let root = layout.tree().root_id();

    let err = layout.remove_panel(root).expect_err("sole leaf");
    assert_eq!(err.kind(), LayoutErrorKind::InvalidOperation);
    let err = layout.begin_drag(root).expect_err("sole leaf drag");
    assert_eq!(
        err,
        LayoutError::InvalidOperation(OperationFailure::CannotDragSoleLeaf { node_id: root })
    );
    assert!(!layout.panel_actions(root).contains(&PanelAction::Remove));
}

#[test]
fn panel_menu_drives_structure() {
    let mut layout = editing_layout();
    let root = layout.tree().root_id();

    let actions = layout.panel_actions(root);
    let set_chart = actions
        .iter()
        .find(|action| matches!(action, PanelAction::SetContent(kind) if kind.kind == "chart"))
        .expect("chart action")
        .clone();
    layout.apply_panel_action(root, &set_chart).expect("set chart");
    assert_eq!(layout.tree().content(root), Some(&"chart-1".to_string()));

    layout
        .apply_panel_action(root, &PanelAction::AddEdge(EdgePosition::Bottom))
        .expect("dock bottom");
    layout
        .apply_panel_action(root, &PanelAction::Split(Orientation::Vertical))
        .expect("split");
    assert_eq!(layout.tree().leaf_count(), 3);

    layout
        .apply_panel_action(root, &PanelAction::Remove)
        .expect("remove");
    assert_eq!(layout.tree().leaf_count(), 2);
    assert!(layout.tree().validate().is_ok());
}

#[test]
fn malformed_descriptor_is_reported_and_ignored() {
    let mut layout = editing_layout();
    let root = layout.tree().root_id();
    layout.set_content(root, Some("keep".into())).expect("assign");
    let _ = layout.drain_events();

    let json = r#"{
        "orientation": "vertical",
        "first_proportion": 0.6,
        "second_proportion": 0.6,
        "first": { "content": "x" },
        "second": { "content": "y" }
    }"#;
    let descriptor: PanelDescriptor<String> = serde_json::from_str(json).expect("parse json");
    let err = layout.load(descriptor).expect_err("sum mismatch");
    assert_eq!(err.kind(), LayoutErrorKind::MalformedDescriptor);
    assert_eq!(layout.tree().content(root), Some(&"keep".to_string()));
    assert!(layout.drain_events().is_empty());
}

#[test]
fn load_emits_full_change_and_cancels_drag() {
    let mut layout = editing_layout();
    let a = layout.tree().root_id();
    layout.split(a, Orientation::Vertical).expect("split");
    layout.begin_drag(a).expect("begin");
    let _ = layout.drain_events();

    layout
        .load(PanelDescriptor::leaf(Some("solo".to_string())))
        .expect("load");
    assert_eq!(layout.drag_state(), DragState::Idle);
    assert_eq!(
        layout.drain_events(),
        vec![LayoutEvent::TreeChanged {
            scope: ChangeScope::Full
        }]
    );
}

#[test]
fn thickness_changes_solved_geometry_only() {
    let mut layout = SplitterLayout::<String>::new();
    let root = layout.tree().root_id();
    let split = layout.split(root, Orientation::Horizontal).expect("split");
    let area = Rect::new(0.0, 0.0, 100.0, 110.0);

    layout.set_thickness(10.0).expect("thickness");
    let solved = layout.solve_layout(area);
    assert_eq!(solved.rect(root).map(|r| r.height), Some(50.0));
    assert_eq!(solved.rect(split.created).map(|r| r.y), Some(60.0));

    let share = solved
        .share_at(split.branch, Point::new(50.0, 25.0))
        .expect("share");
    layout.set_proportion(split.branch, share).expect("resize");
    assert_eq!(layout.tree().leaf_count(), 2);
}
