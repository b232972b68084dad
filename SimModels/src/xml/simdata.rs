//! SimData XML
//!
//! The XML form of a SimData resource holds one instance tied to a tuning
//! entity by name:
//!
//! ```xml
//! <SimData version="0x00000101" u="0x00000000">
//!   <Instances>
//!     <I name="my_trait" schema="Trait" type="Object">...</I>
//!   </Instances>
//!   <Schemas>...</Schemas>
//! </SimData>
//! ```

use quick_xml::Reader;
use quick_xml::events::Event;

use super::{collect_attributes, decode_utf8};
use crate::error::{Error, Result};

/// A parsed SimData document
#[derive(Debug, Clone)]
pub struct SimDataDocument {
    /// Name of the single instance, matching its tuning's `n` attribute
    pub instance_name: String,
    /// Schema name of the instance, if declared
    pub schema: Option<String>,
    source: Vec<u8>,
}

impl SimDataDocument {
    /// Serialized resource bytes (the XML form of the SimData)
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
    Error::InvalidSimData {
        message: message.into(),
    }
}

/// Parse a SimData XML document
///
/// # Errors
/// Returns an error if the XML is malformed, the root is not `<SimData>`, or
/// `<Instances>` does not hold exactly one named `<I>`.
pub fn parse_simdata_xml(bytes: &[u8]) -> Result<SimDataDocument> {
    let content = decode_utf8(bytes).ok_or_else(|| invalid("file is not valid UTF-8"))?;

    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    // Element names from the root down to the current element
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut instances: Vec<(String, Option<String>)> = Vec::new();

    loop {
        let (element, is_empty) = match reader.read_event()? {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::End(_) => {
                path.pop();
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };

        let name = element.name().as_ref().to_vec();

        if path.is_empty() && name != b"SimData" {
            return Err(invalid(format!(
                "unexpected root element <{}>",
                String::from_utf8_lossy(&name)
            )));
        }

        let in_instances = path.len() == 2 && path[0] == b"SimData" && path[1] == b"Instances";
        if in_instances && name == b"I" {
            let mut attributes = collect_attributes(&element)?;
            let instance_name = attributes
                .shift_remove("name")
                .filter(|n| !n.is_empty())
                .ok_or_else(|| invalid("instance is missing the 'name' attribute"))?;
            instances.push((instance_name, attributes.shift_remove("schema")));
        }

        if !is_empty {
            path.push(name);
        }
    }

    match instances.len() {
        1 => {
            let (instance_name, schema) = instances.remove(0);
            Ok(SimDataDocument {
                instance_name,
                schema,
                source: bytes.to_vec(),
            })
        }
        0 => Err(invalid("document has no instances")),
        n => Err(invalid(format!("expected exactly one instance, found {n}"))),
    }
}
