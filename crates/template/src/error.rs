//! Template format error types

use thiserror::Error;

/// Errors that can occur while reading or writing templates
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("XML encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    #[error("template is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("layout error: {0}")]
    Layout(#[from] kontura_layout::LayoutError),

    #[error("value error: {0}")]
    Value(#[from] kontura_geom::GeomError),

    #[error("unknown area type <{0}>")]
    UnknownAreaType(String),

    #[error("unknown page unit \"{0}\"")]
    UnknownUnit(String),

    #[error("unknown split orientation \"{0}\"")]
    UnknownOrientation(String),

    #[error("missing required attribute \"{attribute}\" on <{element}>")]
    MissingAttribute {
        element: String,
        attribute: String,
    },

    #[error("invalid value \"{value}\" for attribute \"{attribute}\" on <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    #[error("unexpected element <{0}> outside <page>")]
    UnexpectedElement(String),

    #[error("template has no root area element")]
    MissingRootArea,

    #[error("template has more than one root area element")]
    MultipleRootAreas,

    #[error("unexpected end of template")]
    UnexpectedEof,
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;
