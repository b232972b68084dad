//! XML resource parsing (tuning and SimData dialects)

mod simdata;
mod tuning;

pub use simdata::{SimDataDocument, parse_simdata_xml};
pub use tuning::{TuningDocument, parse_tuning_xml};

use indexmap::IndexMap;
use quick_xml::events::BytesStart;

use crate::error::Result;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode XML source bytes as UTF-8, ignoring a leading byte order mark.
/// Returns `None` for invalid UTF-8.
fn decode_utf8(bytes: &[u8]) -> Option<&str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(bytes).ok()
}

/// Collect an element's attributes in document order
fn collect_attributes(element: &BytesStart<'_>) -> Result<IndexMap<String, String>> {
    let mut attributes = IndexMap::new();
    for attr in element.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.insert(key, value);
    }
    Ok(attributes)
}
