//! Resource type enumerations

mod binary;
mod simdata_group;
mod tuning;

pub use binary::BinaryResourceType;
pub use simdata_group::SimDataGroup;
pub use tuning::TuningResourceType;

/// Human-readable name for any resource type id
#[must_use]
pub fn resource_type_name(resource_type: u32) -> Option<&'static str> {
    TuningResourceType::from_u32(resource_type)
        .map(TuningResourceType::name)
        .or_else(|| BinaryResourceType::from_u32(resource_type).map(BinaryResourceType::name))
}

/// Whether the type id belongs to the tuning enumeration (the generic
/// `Tuning` type included)
#[must_use]
pub fn is_tuning_type(resource_type: u32) -> bool {
    TuningResourceType::from_u32(resource_type).is_some()
}
