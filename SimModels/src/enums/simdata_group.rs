//! SimData groups
//!
//! A SimData resource shares its instance with the tuning it belongs to, and
//! lives in a group determined by that tuning's type. Types without an entry
//! here have no SimData counterpart.

use super::TuningResourceType;

/// Fixed tuning type → SimData group table
const SIMDATA_GROUPS: &[(TuningResourceType, u32)] = &[
    (TuningResourceType::Achievement, 0x0055E9E8),
    (TuningResourceType::AchievementCategory, 0x0051C101),
    (TuningResourceType::AchievementCollection, 0x00D2B465),
    (TuningResourceType::Aspiration, 0x00B64675),
    (TuningResourceType::AspirationCategory, 0x0050DBD8),
    (TuningResourceType::AspirationTrack, 0x0020FCAD),
    (TuningResourceType::Breed, 0x001D3013),
    (TuningResourceType::Broadcaster, 0x00EBAFB7),
    (TuningResourceType::Buff, 0x0017E8F6),
    (TuningResourceType::Career, 0x00996BEB),
    (TuningResourceType::CareerLevel, 0x0070ADF8),
    (TuningResourceType::CareerTrack, 0x00C75CE3),
    (TuningResourceType::ClubSeed, 0x0059B437),
    (TuningResourceType::HolidayDefinition, 0x00316F6D),
    (TuningResourceType::HolidayTradition, 0x00CF9E79),
    (TuningResourceType::HouseholdMilestone, 0x0072E6F3),
    (TuningResourceType::LotTrait, 0x00ABFF3C),
    (TuningResourceType::Mood, 0x007B60B8),
    (TuningResourceType::Object, 0x001DE6B4),
    (TuningResourceType::Region, 0x00E7A18D),
    (TuningResourceType::Reward, 0x00A49828),
    (TuningResourceType::Season, 0x008DD45E),
    (TuningResourceType::Spell, 0x003413D9),
    (TuningResourceType::Statistic, 0x009BC5BD),
    (TuningResourceType::Street, 0x00E4CB00),
    (TuningResourceType::Trait, 0x005FDD0C),
    (TuningResourceType::Venue, 0x00BBD73D),
    (TuningResourceType::ZoneModifier, 0x001D8799),
];

/// SimData group lookup
pub struct SimDataGroup;

impl SimDataGroup {
    /// The SimData group for a tuning type, if that type has SimData
    #[must_use]
    pub fn for_tuning(tuning_type: TuningResourceType) -> Option<u32> {
        SIMDATA_GROUPS
            .iter()
            .find(|(t, _)| *t == tuning_type)
            .map(|&(_, group)| group)
    }

    /// Same as [`SimDataGroup::for_tuning`], keyed by the raw resource type
    #[must_use]
    pub fn for_resource_type(resource_type: u32) -> Option<u32> {
        TuningResourceType::from_u32(resource_type).and_then(Self::for_tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_group() {
        assert_eq!(SimDataGroup::for_tuning(TuningResourceType::Trait), Some(0x005FDD0C));
        assert_eq!(SimDataGroup::for_resource_type(0xCB5FDDC7), Some(0x005FDD0C));
    }

    #[test]
    fn test_milestone_and_season_groups() {
        assert_eq!(
            SimDataGroup::for_tuning(TuningResourceType::HouseholdMilestone),
            Some(0x0072E6F3)
        );
        assert_eq!(SimDataGroup::for_resource_type(0xC98DD45E), Some(0x008DD45E));
    }

    #[test]
    fn test_every_mapped_type_is_listed_once() {
        for (tuning_type, group) in SIMDATA_GROUPS {
            assert!(!tuning_type.is_generic());
            assert_eq!(SimDataGroup::for_tuning(*tuning_type), Some(*group));
        }
    }

    #[test]
    fn test_unmapped_types() {
        assert_eq!(SimDataGroup::for_tuning(TuningResourceType::Interaction), None);
        assert_eq!(SimDataGroup::for_tuning(TuningResourceType::Tuning), None);
        assert_eq!(SimDataGroup::for_tuning(TuningResourceType::ZoneDirector), None);
        assert_eq!(SimDataGroup::for_resource_type(0x545AC67A), None);
    }
}
