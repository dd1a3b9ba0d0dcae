use core::fmt;

use indextree::NodeId;

use crate::RenderTree;

fn write_indent(formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        formatter.write_str("  ")?;
    }
    Ok(())
}

fn fmt_node(tree: &RenderTree, node: NodeId, formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    let Ok(entry) = tree.node(node) else {
        return Ok(());
    };
    write_indent(formatter, depth)?;
    write!(formatter, "{}", entry.kind())?;
    match entry.size() {
        Some(size) => write!(formatter, " {size} at {}", entry.parent_data().offset)?,
        None => formatter.write_str(" <not laid out>")?,
    }
    if let Some(constraints) = entry.constraints() {
        write!(formatter, " {constraints}")?;
    }
    if entry.needs_layout() {
        formatter.write_str(" [needs layout]")?;
    }
    if entry.needs_paint() {
        formatter.write_str(" [needs paint]")?;
    }
    if entry.is_relayout_boundary() {
        formatter.write_str(" [boundary]")?;
    }
    writeln!(formatter)?;
    for child in node.children(&tree.arena) {
        fmt_node(tree, child, formatter, depth + 1)?;
    }
    Ok(())
}

impl fmt::Debug for RenderTree {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "RENDER TREE")?;
        match self.root() {
            Some(root) => fmt_node(self, root, formatter, 0),
            None => writeln!(formatter, "<empty>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use trellis_geometry::{Constraints, Size};

    use crate::boxes::{BoxKind, ConstrainedBox, LeafBox};
    use crate::RenderTree;

    #[test]
    fn dump_shows_layout_state() {
        let mut tree = RenderTree::new();
        let button = tree.create(BoxKind::Constrained(ConstrainedBox::fab_mini()));
        let icon = tree.create(BoxKind::Leaf(LeafBox::fill()));
        tree.append_child(button, icon).unwrap();
        tree.set_root(button).unwrap();
        tree.layout(button, Constraints::loose(Size::new(100.0, 100.0)), false)
            .unwrap();

        let dump = format!("{tree:?}");
        assert_eq!(
            dump,
            "RENDER TREE\n\
             Constrained(Constraints(w=40.0, h=40.0)) Size(40.0, 40.0) at Offset(0.0, 0.0) \
             Constraints(0.0<=w<=100.0, 0.0<=h<=100.0) [needs paint] [boundary]\n  \
             Leaf(fill) Size(40.0, 40.0) at Offset(0.0, 0.0) Constraints(w=40.0, h=40.0) [needs paint] [boundary]\n"
        );
    }

    #[test]
    fn empty_tree_dump() {
        assert_eq!(format!("{:?}", RenderTree::new()), "RENDER TREE\n<empty>\n");
    }
}
