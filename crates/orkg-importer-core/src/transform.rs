//! Record → template argument transformation

use crate::graph::{Record, TemplateArgs};
use crate::mapping::MappingDescriptor;

/// Build the keyword arguments for the template function from one record.
///
/// Walks the mapping's field table in order and copies each present source
/// field verbatim under its target parameter. Absent fields are left out,
/// unknown record fields are ignored and the contributor roles parameter is
/// never emitted. Values are not coerced or checked against the template.
pub fn build_template_args(record: &Record, mapping: &MappingDescriptor) -> TemplateArgs {
    let mut args = TemplateArgs::new();
    for field in mapping.template_fields() {
        if let Some(value) = record.get(&field.source) {
            args.insert(field.target.clone(), value.clone());
        }
    }
    args
}
