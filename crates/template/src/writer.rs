//! Template writer
//!
//! Streams a `PageLayout` out as indented template XML. Uniform margins
//! and spacing are written as single attributes; non-uniform values get
//! their own sub-elements.

use std::fs;
use std::io::Write;
use std::path::Path;

use kontura_geom::format_value;
use kontura_layout::{AreaId, AreaKind, AreaTree, LayoutError, PageLayout};
use log::info;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::TemplateResult;
use crate::factory;

/// Write a layout to a template file
pub fn save_template(page: &PageLayout, path: &Path) -> TemplateResult<()> {
    let xml = write_template(page)?;
    fs::write(path, xml)?;
    info!("saved template {}", path.display());
    Ok(())
}

/// Serialize a layout to template XML
pub fn write_template(page: &PageLayout) -> TemplateResult<String> {
    let mut buf = Vec::new();
    let mut writer = Writer::new_with_indent(&mut buf, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut el = BytesStart::new("page");
    el.push_attribute(("width", format_value(page.width()).as_str()));
    el.push_attribute(("height", format_value(page.height()).as_str()));
    el.push_attribute(("unit", page.unit().to_string().as_str()));
    writer.write_event(Event::Start(el))?;

    if let Some(description) = page.description() {
        writer.write_event(Event::Start(BytesStart::new("description")))?;
        writer.write_event(Event::Text(BytesText::new(description)))?;
        writer.write_event(Event::End(BytesEnd::new("description")))?;
    }

    write_area(&mut writer, page.tree(), page.root_id())?;

    writer.write_event(Event::End(BytesEnd::new("page")))?;
    drop(writer);
    Ok(String::from_utf8(buf)?)
}

fn write_area<W: Write>(
    writer: &mut Writer<W>,
    tree: &AreaTree,
    id: AreaId,
) -> TemplateResult<()> {
    let node = tree
        .get(id)
        .ok_or(LayoutError::AreaNotFound(id.as_u32()))?;
    let name = factory::element_name(&node.kind);

    let mut el = BytesStart::new(name);
    match &node.kind {
        AreaKind::Image { .. } => {}
        AreaKind::Grid { rows, columns } => {
            el.push_attribute(("rows", rows.to_string().as_str()));
            el.push_attribute(("columns", columns.to_string().as_str()));
        }
        AreaKind::Split {
            orientation,
            percent,
            ..
        } => {
            el.push_attribute(("orientation", orientation.as_str()));
            el.push_attribute(("splitPercent", percent.to_string().as_str()));
        }
    }

    let uniform_margins = node.margins.is_uniform();
    let uniform_spacing = node.spacing.is_uniform();
    if uniform_margins {
        el.push_attribute(("margin", format_value(node.margins.left).as_str()));
    }
    if uniform_spacing {
        el.push_attribute(("spacing", format_value(node.spacing.width).as_str()));
    }

    if uniform_margins && uniform_spacing && node.children.is_empty() {
        writer.write_event(Event::Empty(el))?;
        return Ok(());
    }

    writer.write_event(Event::Start(el))?;

    if !uniform_margins {
        let mut m = BytesStart::new("margins");
        m.push_attribute(("left", format_value(node.margins.left).as_str()));
        m.push_attribute(("right", format_value(node.margins.right).as_str()));
        m.push_attribute(("top", format_value(node.margins.top).as_str()));
        m.push_attribute(("bottom", format_value(node.margins.bottom).as_str()));
        writer.write_event(Event::Empty(m))?;
    }
    if !uniform_spacing {
        let mut s = BytesStart::new("spacing");
        s.push_attribute(("width", format_value(node.spacing.width).as_str()));
        s.push_attribute(("height", format_value(node.spacing.height).as_str()));
        writer.write_event(Event::Empty(s))?;
    }

    for &child in &node.children {
        write_area(writer, tree, child)?;
    }

    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse_template;
    use kontura_geom::{EdgeInsets, PageUnit, Spacing};
    use kontura_layout::SplitOrientation;

    #[test]
    fn test_default_page_serialization() {
        let page = PageLayout::new(PageUnit::Inch);
        let xml = write_template(&page).unwrap();
        assert!(xml.contains(r#"<page width="8.5" height="11" unit="in">"#));
        assert!(xml.contains(r#"<imageLayout margin="0.5" spacing="0.25"/>"#));
    }

    #[test]
    fn test_description_serialized() {
        let mut page = PageLayout::new(PageUnit::Inch);
        page.set_description(Some("holiday prints".to_string()));
        let xml = write_template(&page).unwrap();
        assert!(xml.contains("<description>holiday prints</description>"));
    }

    #[test]
    fn test_round_trip_grid() {
        let mut page = PageLayout::new(PageUnit::Cm);
        let root = page.root_id();
        let grid = page
            .convert_area(root, AreaKind::Grid { rows: 3, columns: 2 })
            .unwrap();
        page.set_margins(grid, EdgeInsets::new(100, 200, 300, 400))
            .unwrap();

        let xml = write_template(&page).unwrap();
        let reloaded = parse_template(&xml).unwrap();

        assert_eq!(reloaded.width(), page.width());
        assert_eq!(reloaded.height(), page.height());
        assert_eq!(reloaded.unit(), PageUnit::Cm);

        let new_root = reloaded.tree().get(reloaded.root_id()).unwrap();
        match new_root.kind {
            AreaKind::Grid { rows, columns } => {
                assert_eq!((rows, columns), (3, 2));
            }
            _ => panic!("expected a grid root"),
        }
        assert_eq!(new_root.margins, EdgeInsets::new(100, 200, 300, 400));
        assert_eq!(new_root.children.len(), 6);
    }

    #[test]
    fn test_round_trip_nested_split() {
        let mut page = PageLayout::new(PageUnit::Inch);
        let root = page.root_id();
        let split = page
            .split_area(root, SplitOrientation::Horizontal)
            .unwrap();
        page.tree_mut().set_split_percent(split, 70).unwrap();
        let second = page.tree().get(split).unwrap().children[1];
        page.convert_area(second, AreaKind::Grid { rows: 2, columns: 2 })
            .unwrap();

        let xml = write_template(&page).unwrap();
        let reloaded = parse_template(&xml).unwrap();

        let new_root = reloaded.tree().get(reloaded.root_id()).unwrap();
        match new_root.kind {
            AreaKind::Split {
                orientation,
                percent,
                ..
            } => {
                assert_eq!(orientation, SplitOrientation::Horizontal);
                assert_eq!(percent, 70);
            }
            _ => panic!("expected a split root"),
        }
        let grid = reloaded.tree().get(new_root.children[1]).unwrap();
        assert!(grid.is_grid());
        assert_eq!(grid.children.len(), 4);
    }

    #[test]
    fn test_round_trip_non_uniform_spacing() {
        let mut page = PageLayout::new(PageUnit::Inch);
        let root = page.root_id();
        page.set_spacing(root, Spacing::new(250, 500)).unwrap();

        let xml = write_template(&page).unwrap();
        assert!(xml.contains(r#"<spacing width="0.25" height="0.5"/>"#));

        let reloaded = parse_template(&xml).unwrap();
        let new_root = reloaded.tree().get(reloaded.root_id()).unwrap();
        assert_eq!(new_root.spacing, Spacing::new(250, 500));
    }
}
