//! Non-tuning resource types commonly found in packages

/// Binary resource types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BinaryResourceType {
    SimData = 0x545AC67A,
    StringTable = 0x220557DA,
    CombinedTuning = 0x62E94D38,
    ObjectDefinition = 0xC0DB5AE7,
    ObjectCatalog = 0x319E4F1D,
    CasPart = 0x034AEECB,
    DdsImage = 0x00B2D882,
    PngImage = 0x2F7D0004,
}

impl BinaryResourceType {
    const ALL: &'static [BinaryResourceType] = &[
        BinaryResourceType::SimData,
        BinaryResourceType::StringTable,
        BinaryResourceType::CombinedTuning,
        BinaryResourceType::ObjectDefinition,
        BinaryResourceType::ObjectCatalog,
        BinaryResourceType::CasPart,
        BinaryResourceType::DdsImage,
        BinaryResourceType::PngImage,
    ];

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    #[must_use]
    pub fn from_u32(resource_type: u32) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_u32() == resource_type)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SimData => "SimData",
            Self::StringTable => "StringTable",
            Self::CombinedTuning => "CombinedTuning",
            Self::ObjectDefinition => "ObjectDefinition",
            Self::ObjectCatalog => "ObjectCatalog",
            Self::CasPart => "CasPart",
            Self::DdsImage => "DdsImage",
            Self::PngImage => "PngImage",
        }
    }
}
