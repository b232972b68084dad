//! Resource keys
//!
//! Every entry in a package is addressed by a `(type, group, instance)`
//! triple. Keys display in the conventional `TTTTTTTT:GGGGGGGG:IIIIIIIIIIIIIIII`
//! hex form used by modding tools.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::formatting::format_resource_key;

/// Identifies a single resource inside a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey {
    /// Resource type id
    pub resource_type: u32,
    /// Resource group
    pub group: u32,
    /// 64-bit instance id
    pub instance: u64,
}

impl ResourceKey {
    #[must_use]
    pub const fn new(resource_type: u32, group: u32, instance: u64) -> Self {
        Self {
            resource_type,
            group,
            instance,
        }
    }

    /// High 32 bits of the instance, as stored in the package index
    #[must_use]
    pub const fn instance_high(&self) -> u32 {
        (self.instance >> 32) as u32
    }

    /// Low 32 bits of the instance, as stored in the package index
    #[must_use]
    pub const fn instance_low(&self) -> u32 {
        (self.instance & 0xFFFF_FFFF) as u32
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_resource_key(self))
    }
}

/// Parse one component of a key string. `0x` prefixed values are hex,
/// anything else is decimal.
fn parse_component<T: TryFrom<u64>>(text: &str, original: &str) -> Result<T, Error> {
    let text = text.trim();
    let value = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse::<u64>(),
    }
    .map_err(|_| Error::InvalidResourceKey(original.to_string()))?;

    T::try_from(value).map_err(|_| Error::InvalidResourceKey(original.to_string()))
}

impl FromStr for ResourceKey {
    type Err = Error;

    /// Accepts `TTTTTTTT:GGGGGGGG:IIIIIIIIIIIIIIII` (bare hex) or
    /// `type_group_instance` (decimal, or hex with a `0x` prefix).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let [t, g, i] = s.split(':').collect::<Vec<_>>()[..] {
            let hex = |part: &str| u64::from_str_radix(part.trim(), 16);
            let (Ok(t), Ok(g), Ok(i)) = (hex(t), hex(g), hex(i)) else {
                return Err(Error::InvalidResourceKey(s.to_string()));
            };
            let t = u32::try_from(t).map_err(|_| Error::InvalidResourceKey(s.to_string()))?;
            let g = u32::try_from(g).map_err(|_| Error::InvalidResourceKey(s.to_string()))?;
            return Ok(Self::new(t, g, i));
        }

        match s.split('_').collect::<Vec<_>>()[..] {
            [t, g, i] => Ok(Self::new(
                parse_component(t, s)?,
                parse_component(g, s)?,
                parse_component(i, s)?,
            )),
            _ => Err(Error::InvalidResourceKey(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_zero_padded_hex() {
        let key = ResourceKey::new(0xCB5FDDC7, 0, 12345);
        assert_eq!(key.to_string(), "CB5FDDC7:00000000:0000000000003039");
    }

    #[test]
    fn test_parse_display_form() {
        let key: ResourceKey = "545AC67A:005FDD0C:0000000000003039".parse().unwrap();
        assert_eq!(key, ResourceKey::new(0x545AC67A, 0x005FDD0C, 12345));
    }

    #[test]
    fn test_parse_underscore_form() {
        let key: ResourceKey = "3412057543_0_18446744073709551615".parse().unwrap();
        assert_eq!(key.resource_type, 0xCB5FDDC7);
        assert_eq!(key.instance, u64::MAX);

        let key: ResourceKey = "0xCB5FDDC7_0x1_42".parse().unwrap();
        assert_eq!(key, ResourceKey::new(0xCB5FDDC7, 1, 42));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("nope".parse::<ResourceKey>().is_err());
        assert!("1_2".parse::<ResourceKey>().is_err());
        assert!("4294967296_0_0".parse::<ResourceKey>().is_err());
    }

    #[test]
    fn test_instance_halves() {
        let key = ResourceKey::new(0, 0, 0x1234_5678_9ABC_DEF0);
        assert_eq!(key.instance_high(), 0x1234_5678);
        assert_eq!(key.instance_low(), 0x9ABC_DEF0);
    }
}
