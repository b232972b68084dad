//! Hex formatting helpers for key components

use crate::key::ResourceKey;

/// Format a resource type as 8 upper-case hex digits
#[must_use]
pub fn format_resource_type(resource_type: u32) -> String {
    format!("{resource_type:08X}")
}

/// Format a resource group as 8 upper-case hex digits
#[must_use]
pub fn format_resource_group(group: u32) -> String {
    format!("{group:08X}")
}

/// Format an instance id as 16 upper-case hex digits
#[must_use]
pub fn format_resource_instance(instance: u64) -> String {
    format!("{instance:016X}")
}

/// Format a full key as `TTTTTTTT:GGGGGGGG:IIIIIIIIIIIIIIII`
#[must_use]
pub fn format_resource_key(key: &ResourceKey) -> String {
    format!(
        "{}:{}:{}",
        format_resource_type(key.resource_type),
        format_resource_group(key.group),
        format_resource_instance(key.instance)
    )
}
