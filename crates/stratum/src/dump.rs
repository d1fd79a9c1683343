use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{
    error::{Error, Result},
    geom::Rect,
    node::{NodeKey, Phase},
    tree::Tree,
};

/// Traverses the tree and returns a string showing identity, name,
/// lifecycle status, ordering and rectangles for each node. This is a debug
/// function.
pub fn dump(tree: &Tree, color: bool) -> Result<String> {
    let mut buffer = if color {
        Buffer::ansi()
    } else {
        Buffer::no_color()
    };
    dump_node(&mut buffer, tree, tree.root(), 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Format a rectangle as corners.
fn fmt_rect(r: &Rect) -> String {
    format!("[{}, {}, {}, {}]", r.min_x, r.min_y, r.max_x, r.max_y)
}

/// Helper to write an indented, colored label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")?;
    Ok(())
}

/// Walk a node subtree and emit formatted debug output.
fn dump_node(buffer: &mut Buffer, tree: &Tree, key: NodeKey, level: usize) -> Result<()> {
    let node = tree
        .node(key)
        .ok_or_else(|| Error::Internal("missing node".into()))?;
    let info = node.info(tree.parent_identity(key));
    let indent = "    ".repeat(level);

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{}", node.name())?;
    buffer.reset()?;
    write!(buffer, " {}", info.identity)?;

    let status = match info.phase {
        Phase::Alive => ("alive", Color::Green),
        Phase::Dying => ("dying", Color::Yellow),
    };
    write!(buffer, " ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(status.1)))?;
    write!(buffer, "{}", status.0)?;
    buffer.reset()?;
    if info.always_on_top {
        write!(buffer, ", ")?;
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(buffer, "on top")?;
        buffer.reset()?;
    }
    writeln!(buffer)?;

    let rects = &node.instance().rects;
    write_field(
        buffer,
        &indent,
        "order:",
        &format!(
            "chrono {}, global {}, sibling {}",
            info.chronological_position, info.computed_global_order, info.sibling_index
        ),
    )?;
    write_field(buffer, &indent, "local:", &fmt_rect(&rects.local))?;
    write_field(buffer, &indent, "global:", &fmt_rect(&rects.computed_global))?;
    write_field(buffer, &indent, "bounds:", &fmt_rect(&rects.computed_draw_bounds))?;
    if let Some(s) = rects.computed_scroll_bounds {
        let scroll = node.instance().inner_scroll;
        write_field(
            buffer,
            &indent,
            "scroll:",
            &format!("({}, {}) in {}", scroll.x, scroll.y, fmt_rect(&s)),
        )?;
    }

    for child in tree.children(key) {
        dump_node(buffer, tree, *child, level + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{controls::RootContainer, id::Identity};

    #[test]
    fn plain_dump() -> Result<()> {
        let mut t = Tree::new(Box::new(RootContainer), Rect::new(0.0, 0.0, 100.0, 50.0));
        let root = t.root();
        t.insert(
            Identity::from_raw(7),
            root,
            Box::new(RootContainer),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            0.1,
        )?;
        let out = dump(&t, false)?;
        let expected = "\
root_container #0 alive
  order: chrono 0, global 0, sibling 0
  local: [0, 0, 100, 50]
  global: [0, 0, 0, 0]
  bounds: [0, 0, 0, 0]
    root_container #7 alive
      order: chrono 0, global 0, sibling 0
      local: [0, 0, 10, 10]
      global: [0, 0, 0, 0]
      bounds: [0, 0, 0, 0]
";
        assert_eq!(out, expected);
        Ok(())
    }
}
