//! Rails XML codec.
//!
//! Bridges Rails XML documents and [`serde_json::Value`] trees, which the
//! serializer facade then maps onto typed resources. Decoding runs element
//! text through the [`ConverterRegistry`], so the nil stage and `type`
//! hints apply to every scalar; encoding emits the matching `type`
//! attributes and `nil="true"` markers for absent values.
//!
//! Wire conventions:
//!
//! - root element is the singular, dasherized type name
//! - field elements carry dasherized names (translated back to local names
//!   via the [`FieldMap`])
//! - `<field nil="true"/>` decodes to `Null` even when a `type` attribute
//!   is present
//! - `type="array"` elements decode to arrays of their children; on encode,
//!   array items are named by singularizing the field's wire name

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::Value;

use crate::error::ResourceError;
use crate::inflector::singularize;
use crate::naming::FieldMap;
use crate::serializer::converters::ConverterRegistry;

fn xml_err<E: Into<quick_xml::Error>>(source: E) -> ResourceError {
    ResourceError::Xml(source.into())
}

struct ElementAttrs {
    nil: bool,
    type_hint: Option<String>,
}

fn read_attrs(start: &BytesStart<'_>) -> Result<ElementAttrs, ResourceError> {
    let mut nil = false;
    let mut type_hint = None;
    for attr in start.attributes() {
        let attr = attr.map_err(xml_err)?;
        match attr.key.as_ref() {
            b"nil" => nil = attr.value.as_ref() == b"true",
            b"type" => type_hint = Some(String::from_utf8_lossy(&attr.value).into_owned()),
            _ => {}
        }
    }
    Ok(ElementAttrs { nil, type_hint })
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

/// Value of an element with no children and no text.
///
/// `nil="true"` still wins; `type="array"` means a collection with zero
/// members, not a scalar, so it never reaches the converters.
fn empty_element_value(
    attrs: &ElementAttrs,
    registry: &ConverterRegistry,
) -> Result<Value, ResourceError> {
    if !attrs.nil && attrs.type_hint.as_deref() == Some("array") {
        return Ok(Value::Array(Vec::new()));
    }
    registry.decode("", attrs.type_hint.as_deref(), attrs.nil)
}

/// Decodes a whole XML document into its root element name and value.
///
/// Single-resource documents decode to an object keyed by local field
/// names; `type="array"` roots decode to an array of member objects.
///
/// # Errors
///
/// Returns [`ResourceError::Xml`] for malformed input,
/// [`ResourceError::NoConverter`] for unhandled `type` hints, and
/// [`ResourceError::InvalidValue`] for uncoercible scalars.
pub fn decode_document(
    xml: &str,
    map: &FieldMap,
    registry: &ConverterRegistry,
) -> Result<(String, Value), ResourceError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let name = element_name(&start);
                let attrs = read_attrs(&start)?;
                let value = parse_element(&mut reader, attrs, map, registry)?;
                return Ok((name, value));
            }
            Event::Empty(start) => {
                let name = element_name(&start);
                let attrs = read_attrs(&start)?;
                let value = empty_element_value(&attrs, registry)?;
                return Ok((name, value));
            }
            Event::Eof => {
                return Err(xml_err(quick_xml::Error::UnexpectedEof(
                    "no root element".to_string(),
                )));
            }
            // declarations, comments, processing instructions
            _ => {}
        }
    }
}

/// Consumes events up to the element's end tag and builds its value.
fn parse_element(
    reader: &mut Reader<&[u8]>,
    attrs: ElementAttrs,
    map: &FieldMap,
    registry: &ConverterRegistry,
) -> Result<Value, ResourceError> {
    let mut text = String::new();
    let mut children: Vec<(String, Value)> = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let name = element_name(&start);
                let child_attrs = read_attrs(&start)?;
                let value = parse_element(reader, child_attrs, map, registry)?;
                children.push((name, value));
            }
            Event::Empty(start) => {
                let name = element_name(&start);
                let child_attrs = read_attrs(&start)?;
                let value = empty_element_value(&child_attrs, registry)?;
                children.push((name, value));
            }
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(t) => text.push_str(&String::from_utf8_lossy(&t)),
            Event::End(_) => break,
            Event::Eof => {
                return Err(xml_err(quick_xml::Error::UnexpectedEof(
                    "unclosed element".to_string(),
                )));
            }
            _ => {}
        }
    }

    // The nil marker wins over everything, including nested content.
    if attrs.nil {
        return Ok(Value::Null);
    }
    // An array container stays an array even with zero members.
    if attrs.type_hint.as_deref() == Some("array") {
        return Ok(Value::Array(children.into_iter().map(|(_, v)| v).collect()));
    }
    if children.is_empty() {
        return registry.decode(&text, attrs.type_hint.as_deref(), false);
    }
    let mut object = serde_json::Map::new();
    for (wire, value) in children {
        object.insert(map.local_name(&wire), value);
    }
    Ok(Value::Object(object))
}

/// Encodes a value tree as a Rails XML document rooted at `root`.
///
/// Object keys are local field names and are translated to wire names via
/// the map; `Null` fields emit `nil="true"` markers.
///
/// # Errors
///
/// Returns [`ResourceError::Xml`] if the writer fails, which for an
/// in-memory sink does not normally occur.
pub fn encode_document(
    root: &str,
    value: &Value,
    map: &FieldMap,
) -> Result<String, ResourceError> {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, root, value, map)?;
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &Value,
    map: &FieldMap,
) -> Result<(), ResourceError> {
    match value {
        Value::Null => {
            let mut start = BytesStart::new(name);
            start.push_attribute(("nil", "true"));
            writer.write_event(Event::Empty(start)).map_err(xml_err)?;
        }
        Value::Bool(b) => {
            write_scalar(writer, name, Some("boolean"), if *b { "true" } else { "false" })?;
        }
        Value::Number(n) => {
            let hint = if n.is_f64() { "float" } else { "integer" };
            write_scalar(writer, name, Some(hint), &n.to_string())?;
        }
        Value::String(s) => write_scalar(writer, name, None, s)?,
        Value::Array(items) => {
            let mut start = BytesStart::new(name);
            start.push_attribute(("type", "array"));
            writer.write_event(Event::Start(start)).map_err(xml_err)?;
            let item_name = singularize(name);
            for item in items {
                write_element(writer, &item_name, item, map)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(xml_err)?;
        }
        Value::Object(fields) => {
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(xml_err)?;
            for (local, field_value) in fields {
                write_element(writer, &map.wire_name(local), field_value, map)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(xml_err)?;
        }
    }
    Ok(())
}

fn write_scalar(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    type_hint: Option<&str>,
    text: &str,
) -> Result<(), ResourceError> {
    let mut start = BytesStart::new(name);
    if let Some(hint) = type_hint {
        start.push_attribute(("type", hint));
    }
    writer.write_event(Event::Start(start)).map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)?;
    Ok(())
}
