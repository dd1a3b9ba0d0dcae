use trellis_geometry::{Alignment, Size};
use trellis_render::{
    AlignBox, BoxKind, ChildOverflowBox, ConstrainedBox, LayoutConfig, LayoutError, LeafBox, NodeId,
    PipelineOwner,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct Scene {
    owner: PipelineOwner,
    root: NodeId,
    overflow: NodeId,
    button: NodeId,
    label: NodeId,
}

/// root(Align) -> overflow -> button(fab regular) -> label
fn build_scene() -> Scene {
    let mut owner = PipelineOwner::new(LayoutConfig::new(Size::new(400.0, 300.0), false));
    let tree = owner.tree_mut();
    let root = tree.create(BoxKind::Align(AlignBox::new(Alignment::BOTTOM_RIGHT)));
    let overflow = tree.create(BoxKind::ChildOverflow(ChildOverflowBox::new()));
    let button = tree.create(BoxKind::Constrained(ConstrainedBox::fab_regular()));
    let label = tree.create(BoxKind::Leaf(LeafBox::preferred(Size::new(24.0, 24.0))));
    tree.append_child(root, overflow).unwrap();
    tree.append_child(overflow, button).unwrap();
    tree.append_child(button, label).unwrap();
    tree.set_root(root).unwrap();
    Scene {
        owner,
        root,
        overflow,
        button,
        label,
    }
}

fn layout_counts(scene: &Scene) -> [u64; 4] {
    let tree = scene.owner.tree();
    [scene.root, scene.overflow, scene.button, scene.label]
        .map(|node| tree.node(node).unwrap().layout_count())
}

#[test]
fn first_flush_lays_out_everything() {
    init_logging();
    let mut scene = build_scene();
    let size = scene.owner.flush_layout().unwrap();

    assert_eq!(size, Size::new(400.0, 300.0));
    assert_eq!(layout_counts(&scene), [1, 1, 1, 1]);
    let tree = scene.owner.tree();
    assert_eq!(tree.size(scene.button).unwrap(), Size::new(56.0, 56.0));
    assert_eq!(tree.size(scene.label).unwrap(), Size::new(56.0, 56.0));
    assert!(!tree.node(scene.overflow).unwrap().is_relayout_boundary());
    assert!(tree.node(scene.label).unwrap().is_relayout_boundary());
}

#[test]
fn dirty_mark_stops_at_the_nearest_boundary() {
    init_logging();
    let mut scene = build_scene();
    scene.owner.flush_layout().unwrap();

    scene.owner.tree_mut().mark_needs_layout(scene.label).unwrap();
    let tree = scene.owner.tree();
    assert!(tree.node(scene.label).unwrap().needs_layout());
    assert!(!tree.node(scene.button).unwrap().needs_layout());
    assert!(!tree.node(scene.root).unwrap().needs_layout());

    scene.owner.flush_layout().unwrap();
    assert_eq!(layout_counts(&scene), [1, 1, 1, 2]);
    assert_eq!(scene.owner.last_stats().dirty_roots, 1);
    assert_eq!(scene.owner.last_stats().laid_out, 1);
}

#[test]
fn dirty_mark_bubbles_through_size_dependent_parents() {
    init_logging();
    let mut scene = build_scene();
    scene.owner.flush_layout().unwrap();

    // The button's size feeds the overflow box, whose size feeds the root.
    scene.owner.tree_mut().mark_needs_layout(scene.button).unwrap();
    let tree = scene.owner.tree();
    assert!(tree.node(scene.button).unwrap().needs_layout());
    assert!(tree.node(scene.overflow).unwrap().needs_layout());
    assert!(tree.node(scene.root).unwrap().needs_layout());

    scene.owner.flush_layout().unwrap();
    // The label is reached under unchanged constraints and short-circuits.
    assert_eq!(layout_counts(&scene), [2, 2, 2, 1]);
    assert!(!scene.owner.tree().node(scene.root).unwrap().needs_layout());
}

#[test]
fn clean_flush_does_no_work() {
    init_logging();
    let mut scene = build_scene();
    scene.owner.flush_layout().unwrap();
    scene.owner.flush_layout().unwrap();

    assert_eq!(layout_counts(&scene), [1, 1, 1, 1]);
    assert_eq!(scene.owner.last_stats().laid_out, 0);
}

#[test]
fn paint_marks_do_not_trigger_layout() {
    init_logging();
    let mut scene = build_scene();
    scene.owner.flush_layout().unwrap();
    let painted = scene.owner.take_paint_dirty();
    assert_eq!(painted.len(), 4);

    scene.owner.tree_mut().mark_needs_paint(scene.button).unwrap();
    assert!(!scene.owner.tree().node(scene.button).unwrap().needs_layout());
    scene.owner.flush_layout().unwrap();
    assert_eq!(layout_counts(&scene), [1, 1, 1, 1]);
    assert_eq!(scene.owner.take_paint_dirty(), vec![scene.button]);
}

#[test]
fn swapping_the_preset_resizes_the_button() {
    init_logging();
    let mut scene = build_scene();
    scene.owner.flush_layout().unwrap();

    scene
        .owner
        .tree_mut()
        .set_kind(scene.button, BoxKind::Constrained(ConstrainedBox::fab_extended()))
        .unwrap();
    scene.owner.flush_layout().unwrap();

    let tree = scene.owner.tree();
    assert_eq!(tree.size(scene.button).unwrap(), Size::new(24.0, 48.0));
    assert_eq!(tree.size(scene.overflow).unwrap(), Size::new(24.0, 48.0));
    // Bottom-right inside the 400x300 root.
    assert_eq!(
        tree.offset(scene.overflow).unwrap(),
        trellis_geometry::Offset::new(376.0, 252.0)
    );
}

#[test]
fn removing_a_subtree_relays_out_the_parent() {
    init_logging();
    let mut scene = build_scene();
    scene.owner.flush_layout().unwrap();

    scene.owner.tree_mut().remove(scene.button).unwrap();
    scene.owner.flush_layout().unwrap();

    let tree = scene.owner.tree();
    assert!(!tree.contains(scene.label));
    // Childless overflow takes the biggest size the loosened root allows.
    assert_eq!(tree.size(scene.overflow).unwrap(), Size::new(400.0, 300.0));
    assert_eq!(
        tree.size(scene.label),
        Err(LayoutError::UnknownNode { node: scene.label })
    );
}

#[test]
fn reading_size_before_layout_fails() {
    init_logging();
    let scene = build_scene();
    let tree = scene.owner.tree();
    assert_eq!(
        tree.size(scene.button),
        Err(LayoutError::SizeUnavailable { node: scene.button })
    );
    assert_eq!(
        tree.offset(scene.label),
        Err(LayoutError::SizeUnavailable { node: scene.label })
    );
}

#[test]
fn detached_subtree_is_not_flushed() {
    init_logging();
    let mut scene = build_scene();
    scene.owner.flush_layout().unwrap();

    let tree = scene.owner.tree_mut();
    tree.detach(scene.button).unwrap();
    tree.mark_needs_layout(scene.label).unwrap();
    scene.owner.flush_layout().unwrap();

    assert_eq!(scene.owner.tree().node(scene.label).unwrap().layout_count(), 1);
    assert!(scene.owner.tree().node(scene.label).unwrap().needs_layout());

    // The button comes back under unchanged constraints and short-circuits,
    // so the label must be reached from the dirty queue.
    scene
        .owner
        .tree_mut()
        .append_child(scene.overflow, scene.button)
        .unwrap();
    scene.owner.flush_layout().unwrap();

    let label = scene.owner.tree().node(scene.label).unwrap();
    assert_eq!(label.layout_count(), 2);
    assert!(!label.needs_layout());
    assert_eq!(scene.owner.tree().node(scene.button).unwrap().layout_count(), 1);
}

#[test]
fn boundary_marked_while_detached_stays_markable() {
    init_logging();
    let mut scene = build_scene();
    scene.owner.flush_layout().unwrap();

    let tree = scene.owner.tree_mut();
    tree.detach(scene.button).unwrap();
    tree.mark_needs_layout(scene.label).unwrap();
    scene.owner.flush_layout().unwrap();
    scene
        .owner
        .tree_mut()
        .append_child(scene.overflow, scene.button)
        .unwrap();
    scene.owner.flush_layout().unwrap();

    scene.owner.tree_mut().mark_needs_layout(scene.label).unwrap();
    scene.owner.flush_layout().unwrap();
    let label = scene.owner.tree().node(scene.label).unwrap();
    assert_eq!(label.layout_count(), 3);
    assert!(!label.needs_layout());
}
