//! Tuning XML
//!
//! A tuning file has a single root element, `<I>` for instance tuning or
//! `<M>` for module tuning, carrying the identifying attributes:
//!
//! ```xml
//! <I c="Trait" i="trait" m="traits.traits" n="my_trait" s="12345">
//!   ...
//! </I>
//! ```

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::Event;

use super::{collect_attributes, decode_utf8};
use crate::error::{Error, Result};

/// The root of a parsed tuning file
#[derive(Debug, Clone)]
pub struct TuningDocument {
    /// Root element tag (`I` or `M`)
    pub root_tag: String,
    /// Root element attributes in document order
    pub attributes: IndexMap<String, String>,
    /// Declared instance id (`s` attribute)
    pub instance: u64,
    source: Vec<u8>,
}

impl TuningDocument {
    /// Declared tuning name (`n` attribute)
    #[must_use]
    pub fn name(&self) -> &str {
        self.attributes.get("n").map_or("", String::as_str)
    }

    /// Tuning class attribute (`i`), absent for module tuning
    #[must_use]
    pub fn type_attr(&self) -> Option<&str> {
        self.attributes.get("i").map(String::as_str)
    }

    /// Python class (`c`)
    #[must_use]
    pub fn class_attr(&self) -> Option<&str> {
        self.attributes.get("c").map(String::as_str)
    }

    /// Serialized resource bytes, identical to the parsed source
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.source
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.source
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidTuning {
        message: message.into(),
    }
}

/// Parse the root element of a tuning file
///
/// # Errors
/// Returns an error if the XML is malformed, the root is not `I`/`M`, or the
/// `n` / `s` attributes are missing or invalid.
pub fn parse_tuning_xml(bytes: &[u8]) -> Result<TuningDocument> {
    let content = decode_utf8(bytes).ok_or_else(|| invalid("file is not valid UTF-8"))?;

    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let root = loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => break e,
            Event::Eof => return Err(invalid("document has no root element")),
            _ => {}
        }
    };

    let root_tag = String::from_utf8_lossy(root.name().as_ref()).into_owned();
    if root_tag != "I" && root_tag != "M" {
        return Err(invalid(format!("unexpected root element <{root_tag}>")));
    }

    let attributes = collect_attributes(&root)?;

    match attributes.get("n") {
        Some(name) if !name.is_empty() => {}
        _ => return Err(invalid("root element is missing the 'n' attribute")),
    }

    let instance = attributes
        .get("s")
        .ok_or_else(|| invalid("root element is missing the 's' attribute"))?
        .trim()
        .parse::<u64>()
        .map_err(|_| {
            invalid(format!(
                "'s' attribute is not a 64-bit instance: {:?}",
                attributes["s"]
            ))
        })?;

    // Read through to the end so malformed content after the root is rejected
    loop {
        if let Event::Eof = reader.read_event()? {
            break;
        }
    }

    Ok(TuningDocument {
        root_tag,
        attributes,
        instance,
        source: bytes.to_vec(),
    })
}
