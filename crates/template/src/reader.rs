//! Template reader
//!
//! Event-driven parser building a fresh `PageLayout` from template XML.
//! Any malformed input fails the whole load; the caller's current layout
//! is never touched until parsing has fully succeeded.

use std::fs;
use std::path::Path;

use kontura_geom::{parse_value, EdgeInsets, PageUnit, Spacing};
use kontura_layout::{
    AreaId, AreaKind, AreaTree, PageLayout, SplitOrientation, DEFAULT_SPLIT_PERCENT,
};
use log::{debug, info};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{TemplateError, TemplateResult};
use crate::factory;

/// Load a template file into a new `PageLayout`
pub fn load_template(path: &Path) -> TemplateResult<PageLayout> {
    info!("loading template {}", path.display());
    let input = fs::read_to_string(path)?;
    parse_template(&input)
}

/// Parse template XML into a new `PageLayout`
pub fn parse_template(input: &str) -> TemplateResult<PageLayout> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let (width, height, unit) = read_page_start(&mut reader)?;

    let mut tree = AreaTree::new();
    let mut description: Option<String> = None;
    let mut root_area: Option<AreaId> = None;
    // Areas whose end tag has not been seen yet, with children so far
    let mut stack: Vec<(AreaId, Vec<AreaId>)> = Vec::new();
    let mut in_description = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"description" => {
                    in_description = true;
                }
                b"margins" => apply_margins(&mut tree, &stack, &e)?,
                b"spacing" => apply_spacing(&mut tree, &stack, &e)?,
                name if factory::is_area_element(&decode_name(name)) => {
                    let id = start_area(&mut tree, &e)?;
                    stack.push((id, Vec::new()));
                }
                name => return Err(TemplateError::UnknownAreaType(decode_name(name))),
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"description" => {}
                b"margins" => apply_margins(&mut tree, &stack, &e)?,
                b"spacing" => apply_spacing(&mut tree, &stack, &e)?,
                name if factory::is_area_element(&decode_name(name)) => {
                    let id = start_area(&mut tree, &e)?;
                    tree.attach_children(id, Vec::new())?;
                    place_area(id, &mut stack, &mut root_area)?;
                }
                name => return Err(TemplateError::UnknownAreaType(decode_name(name))),
            },
            Event::End(e) => match e.name().as_ref() {
                b"page" => break,
                b"description" => {
                    in_description = false;
                }
                b"margins" | b"spacing" => {}
                _ => {
                    let (id, children) = stack.pop().ok_or(TemplateError::UnexpectedEof)?;
                    tree.attach_children(id, children)?;
                    place_area(id, &mut stack, &mut root_area)?;
                }
            },
            Event::Text(t) => {
                if in_description {
                    description = Some(t.xml_content()?.into_owned());
                }
            }
            Event::Eof => return Err(TemplateError::UnexpectedEof),
            _ => {}
        }
    }

    let root = root_area.ok_or(TemplateError::MissingRootArea)?;
    tree.set_root(root)?;

    let page = PageLayout::from_parts(width, height, unit, description, tree)?;
    debug!(
        "parsed template: {}x{} {} with {} areas",
        page.width(),
        page.height(),
        page.unit(),
        page.tree().len()
    );
    Ok(page)
}

/// Skip the prolog and consume the `<page>` start tag
fn read_page_start(reader: &mut Reader<&[u8]>) -> TemplateResult<(i32, i32, PageUnit)> {
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"page" => {
                return page_attrs(&e);
            }
            Event::Empty(e) if e.name().as_ref() == b"page" => {
                // Bad attributes are reported before the missing body
                page_attrs(&e)?;
                return Err(TemplateError::MissingRootArea);
            }
            Event::Start(e) | Event::Empty(e) => {
                return Err(TemplateError::UnexpectedElement(decode_name(
                    e.name().as_ref(),
                )));
            }
            Event::Eof => return Err(TemplateError::UnexpectedEof),
            _ => {}
        }
    }
}

fn page_attrs(e: &BytesStart) -> TemplateResult<(i32, i32, PageUnit)> {
    let width = parse_value(&required_attr(e, "width")?)?;
    let height = parse_value(&required_attr(e, "height")?)?;
    let unit_str = required_attr(e, "unit")?;
    let unit = PageUnit::parse(&unit_str).ok_or(TemplateError::UnknownUnit(unit_str))?;
    Ok((width, height, unit))
}

/// Create the area for an area element and apply its box attributes
fn start_area(tree: &mut AreaTree, e: &BytesStart) -> TemplateResult<AreaId> {
    let kind = parse_area_kind(e)?;
    let id = tree.create_area(kind)?;

    if let Some(margin) = optional_attr(e, "margin")? {
        tree.set_margins(id, EdgeInsets::parse(&margin)?)?;
    }
    if let Some(spacing) = optional_attr(e, "spacing")? {
        tree.set_spacing(id, Spacing::parse(&spacing)?)?;
    }
    Ok(id)
}

fn parse_area_kind(e: &BytesStart) -> TemplateResult<AreaKind> {
    match e.name().as_ref() {
        b"imageLayout" => Ok(AreaKind::Image { image: None }),
        b"gridLayout" => {
            let rows = int_attr(e, "rows", &required_attr(e, "rows")?)?;
            let columns = int_attr(e, "columns", &required_attr(e, "columns")?)?;
            Ok(AreaKind::Grid { rows, columns })
        }
        b"splitLayout" => {
            let orientation = match optional_attr(e, "orientation")? {
                Some(s) => SplitOrientation::parse(&s)
                    .ok_or(TemplateError::UnknownOrientation(s))?,
                None => SplitOrientation::Vertical,
            };
            let percent = match optional_attr(e, "splitPercent")? {
                Some(s) => int_attr(e, "splitPercent", &s)?,
                None => DEFAULT_SPLIT_PERCENT,
            };
            Ok(AreaKind::Split {
                orientation,
                percent,
                valid: false,
            })
        }
        name => Err(TemplateError::UnknownAreaType(decode_name(name))),
    }
}

/// Record a completed area as a child of the enclosing area, or as the
/// template's root area
fn place_area(
    id: AreaId,
    stack: &mut [(AreaId, Vec<AreaId>)],
    root_area: &mut Option<AreaId>,
) -> TemplateResult<()> {
    match stack.last_mut() {
        Some((_, children)) => {
            children.push(id);
            Ok(())
        }
        None => {
            if root_area.is_some() {
                return Err(TemplateError::MultipleRootAreas);
            }
            *root_area = Some(id);
            Ok(())
        }
    }
}

fn apply_margins(
    tree: &mut AreaTree,
    stack: &[(AreaId, Vec<AreaId>)],
    e: &BytesStart,
) -> TemplateResult<()> {
    let (id, _) = stack
        .last()
        .ok_or_else(|| TemplateError::UnexpectedElement("margins".to_string()))?;
    let margins = EdgeInsets::new(
        side_attr(e, "left")?,
        side_attr(e, "right")?,
        side_attr(e, "top")?,
        side_attr(e, "bottom")?,
    );
    tree.set_margins(*id, margins)?;
    Ok(())
}

fn apply_spacing(
    tree: &mut AreaTree,
    stack: &[(AreaId, Vec<AreaId>)],
    e: &BytesStart,
) -> TemplateResult<()> {
    let (id, _) = stack
        .last()
        .ok_or_else(|| TemplateError::UnexpectedElement("spacing".to_string()))?;
    let spacing = Spacing::new(side_attr(e, "width")?, side_attr(e, "height")?);
    tree.set_spacing(*id, spacing)?;
    Ok(())
}

/// Numeric sub-element attribute, defaulting to 0 when absent
fn side_attr(e: &BytesStart, name: &str) -> TemplateResult<i32> {
    match optional_attr(e, name)? {
        Some(s) => Ok(parse_value(&s)?),
        None => Ok(0),
    }
}

fn int_attr(e: &BytesStart, name: &str, value: &str) -> TemplateResult<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| TemplateError::InvalidAttribute {
            element: decode_name(e.name().as_ref()),
            attribute: name.to_string(),
            value: value.to_string(),
        })
}

fn optional_attr(e: &BytesStart, name: &str) -> TemplateResult<Option<String>> {
    match e.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn required_attr(e: &BytesStart, name: &str) -> TemplateResult<String> {
    optional_attr(e, name)?.ok_or_else(|| TemplateError::MissingAttribute {
        element: decode_name(e.name().as_ref()),
        attribute: name.to_string(),
    })
}

fn decode_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kontura_geom::Rect;

    #[test]
    fn test_parse_minimal_page() {
        let page = parse_template(
            r#"<page width="8.5" height="11" unit="in"><imageLayout margin="0.5" spacing="0.25"/></page>"#,
        )
        .unwrap();
        assert_eq!(page.width(), 8_500);
        assert_eq!(page.height(), 11_000);
        assert_eq!(page.unit(), PageUnit::Inch);

        let root = page.tree().get(page.root_id()).unwrap();
        assert!(root.is_image());
        assert_eq!(root.margins, EdgeInsets::uniform(500));
        assert_eq!(root.spacing, Spacing::uniform(250));
        assert_eq!(root.bounds, Rect::new(0, 0, 8_500, 11_000));
    }

    #[test]
    fn test_parse_grid_with_description() {
        let page = parse_template(
            r#"<page width="21" height="29.7" unit="cm">
                 <description>contact sheet</description>
                 <gridLayout rows="2" columns="2" margin="1" spacing="0.5">
                   <imageLayout/><imageLayout/><imageLayout/><imageLayout/>
                 </gridLayout>
               </page>"#,
        )
        .unwrap();
        assert_eq!(page.unit(), PageUnit::Cm);
        assert_eq!(page.description(), Some("contact sheet"));

        let root = page.tree().get(page.root_id()).unwrap();
        assert!(root.is_grid());
        assert_eq!(root.children.len(), 4);
        // Geometry is derived during load
        let first = page.tree().get(root.children[0]).unwrap();
        assert!(!first.bounds.is_degenerate());
        assert_eq!(first.location, "a");
    }

    #[test]
    fn test_parse_nested_split() {
        let page = parse_template(
            r#"<page width="8.5" height="11" unit="in">
                 <splitLayout orientation="H" splitPercent="30" margin="0.5" spacing="0.25">
                   <imageLayout/>
                   <gridLayout rows="1" columns="2">
                     <imageLayout/><imageLayout/>
                   </gridLayout>
                 </splitLayout>
               </page>"#,
        )
        .unwrap();

        let root = page.tree().get(page.root_id()).unwrap();
        match root.kind {
            AreaKind::Split {
                orientation,
                percent,
                ..
            } => {
                assert_eq!(orientation, SplitOrientation::Horizontal);
                assert_eq!(percent, 30);
            }
            _ => panic!("expected a split root"),
        }
        let grid = page.tree().get(root.children[1]).unwrap();
        assert!(grid.is_grid());
        assert_eq!(grid.location, "b");
        assert_eq!(grid.depth, 1);
    }

    #[test]
    fn test_parse_non_uniform_margins() {
        let page = parse_template(
            r#"<page width="8.5" height="11" unit="in">
                 <imageLayout>
                   <margins left="0.1" right="0.2" top="0.3"/>
                   <spacing width="0.5"/>
                 </imageLayout>
               </page>"#,
        )
        .unwrap();
        let root = page.tree().get(page.root_id()).unwrap();
        // Absent sub-attributes default to 0
        assert_eq!(root.margins, EdgeInsets::new(100, 200, 300, 0));
        assert_eq!(root.spacing, Spacing::new(500, 0));
    }

    #[test]
    fn test_description_entities_unescaped() {
        let page = parse_template(
            r#"<page width="8.5" height="11" unit="in">
                 <description>cats &amp; dogs</description>
                 <imageLayout/>
               </page>"#,
        )
        .unwrap();
        assert_eq!(page.description(), Some("cats & dogs"));
    }

    #[test]
    fn test_unknown_element_rejected() {
        let err = parse_template(
            r#"<page width="8.5" height="11" unit="in"><bogusLayout/></page>"#,
        )
        .unwrap_err();
        assert!(matches!(err, TemplateError::UnknownAreaType(name) if name == "bogusLayout"));
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let err = parse_template(
            r#"<page width="8.5" height="11" unit="furlong"><imageLayout/></page>"#,
        )
        .unwrap_err();
        assert!(matches!(err, TemplateError::UnknownUnit(_)));
    }

    #[test]
    fn test_unknown_unit_rejected_on_empty_page() {
        let err =
            parse_template(r#"<page width="8.5" height="11" unit="furlong"/>"#).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownUnit(_)));
    }

    #[test]
    fn test_empty_page_missing_root_area() {
        let err = parse_template(r#"<page width="8.5" height="11" unit="in"/>"#).unwrap_err();
        assert!(matches!(err, TemplateError::MissingRootArea));
    }

    #[test]
    fn test_missing_page_attribute_rejected() {
        let err = parse_template(r#"<page width="8.5" unit="in"><imageLayout/></page>"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TemplateError::MissingAttribute { ref attribute, .. } if attribute == "height"
        ));
    }

    #[test]
    fn test_grid_child_count_mismatch_rejected() {
        let err = parse_template(
            r#"<page width="8.5" height="11" unit="in">
                 <gridLayout rows="2" columns="2">
                   <imageLayout/><imageLayout/>
                 </gridLayout>
               </page>"#,
        )
        .unwrap_err();
        assert!(matches!(err, TemplateError::Layout(_)));
    }

    #[test]
    fn test_missing_root_area_rejected() {
        let err = parse_template(r#"<page width="8.5" height="11" unit="in"></page>"#)
            .unwrap_err();
        assert!(matches!(err, TemplateError::MissingRootArea));
    }

    #[test]
    fn test_truncated_template_rejected() {
        let err = parse_template(r#"<page width="8.5" height="11" unit="in"><imageLayout/>"#)
            .unwrap_err();
        assert!(matches!(err, TemplateError::UnexpectedEof));
    }

    #[test]
    fn test_split_defaults() {
        let page = parse_template(
            r#"<page width="8.5" height="11" unit="in">
                 <splitLayout><imageLayout/><imageLayout/></splitLayout>
               </page>"#,
        )
        .unwrap();
        match page.tree().get(page.root_id()).unwrap().kind {
            AreaKind::Split {
                orientation,
                percent,
                ..
            } => {
                assert_eq!(orientation, SplitOrientation::Vertical);
                assert_eq!(percent, DEFAULT_SPLIT_PERCENT);
            }
            _ => panic!("expected a split root"),
        }
    }
}
