use tierconf_sdk::{Document, FieldDescriptor, FieldValue, SourceError};

use crate::coerce::decode;

/// Decodes every document entry that names a resolvable field.
///
/// The result is all-or-nothing: one undecodable entry rejects the whole
/// document so the record is never left half-populated by the file stage.
/// Unknown keys, null values and embedded fields are skipped.
pub(crate) fn field_values<'a>(
    descriptors: &'a [FieldDescriptor],
    document: &Document,
) -> Result<Vec<(&'a FieldDescriptor, FieldValue)>, SourceError> {
    let mut values = Vec::new();
    for field in descriptors.iter().filter(|field| !field.is_embedded()) {
        let Some(raw) = document.get(field.name) else {
            continue;
        };
        if raw.is_null() {
            continue;
        }
        let value =
            decode(field.kind, raw).map_err(|message| SourceError::field(field.name, message))?;
        values.push((field, value));
    }
    Ok(values)
}
