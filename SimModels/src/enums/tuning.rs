//! Tuning resource types
//!
//! The `i` attribute on a tuning root element (`<I i="trait" ...>`) names the
//! tuning class; each class is stored under its own resource type.

macro_rules! tuning_types {
    ($( $variant:ident = $id:literal => $attr:literal, )*) => {
        /// Resource types used by XML tuning
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum TuningResourceType {
            $( $variant = $id, )*
        }

        impl TuningResourceType {
            /// Every known tuning type
            pub const ALL: &'static [TuningResourceType] =
                &[ $( TuningResourceType::$variant, )* ];

            /// The value of the root `i` attribute for this type
            #[must_use]
            pub fn attr(self) -> &'static str {
                match self {
                    $( TuningResourceType::$variant => $attr, )*
                }
            }

            /// Type name for display
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $( TuningResourceType::$variant => stringify!($variant), )*
                }
            }
        }
    };
}

tuning_types! {
    Tuning = 0x03B33DDF => "tuning",
    Achievement = 0x78559E9E => "achievement",
    AchievementCategory = 0x2451C101 => "achievement_category",
    AchievementCollection = 0x04D2B465 => "achievement_collection",
    Action = 0x0C772E27 => "action",
    Animation = 0xEE17C6AD => "animation",
    Aspiration = 0x28B64675 => "aspiration",
    AspirationCategory = 0xE350DBD8 => "aspiration_category",
    AspirationTrack = 0xC020FCAD => "aspiration_track",
    AwayAction = 0xAFADAC48 => "away_action",
    Balloon = 0xEC6A8FC6 => "balloon",
    Breed = 0x341D3013 => "breed",
    Broadcaster = 0xDEBAFB73 => "broadcaster",
    Buff = 0x6017E896 => "buff",
    Business = 0x75D807F3 => "business",
    CallToAction = 0xF537B2B6 => "call_to_action",
    Career = 0x73996BEB => "career",
    CareerLevel = 0x2C70ADF8 => "career_level",
    CareerTrack = 0x48C75CE3 => "career_track",
    ClubInteractionGroup = 0xFA0FFA34 => "club_interaction_group",
    ClubSeed = 0x2F59B437 => "club_seed",
    DramaNode = 0x2553F435 => "drama_node",
    Ensemble = 0xB9881120 => "ensemble",
    HolidayDefinition = 0x0E316F6D => "holiday_definition",
    HolidayTradition = 0x3FCF9E79 => "holiday_tradition",
    HouseholdMilestone = 0x3972E6F3 => "household_milestone",
    Interaction = 0xE882D22F => "interaction",
    LotDecoration = 0xFE2DB3D9 => "lot_decoration",
    LotDecorationPreset = 0xDE1EF8FB => "lot_decoration_preset",
    LotTrait = 0xF3ABFF3C => "lot_trait",
    LotTuning = 0xD8800D66 => "lot_tuning",
    Mood = 0xBA7B60B8 => "mood",
    Narrative = 0x3E753C39 => "narrative",
    Object = 0xB61DE6B4 => "object",
    ObjectPart = 0x7147A350 => "object_part",
    ObjectState = 0x5B02819E => "object_state",
    Objective = 0x0069453E => "objective",
    OpenStreetDirector = 0x4B6FDD2C => "open_street_director",
    PieMenuCategory = 0x03E9D964 => "pie_menu_category",
    Posture = 0xAD6FDF1F => "posture",
    RabbitHole = 0xB16AB6E0 => "rabbit_hole",
    Recipe = 0xEB97F823 => "recipe",
    Region = 0x51E7A18D => "region",
    RelationshipBit = 0x0904DF10 => "relbit",
    RelationshipLock = 0xAE34E673 => "relationship_lock",
    Reward = 0x6FA49828 => "reward",
    RoleState = 0x0E4D15FB => "role_state",
    Season = 0xC98DD45E => "season",
    ServiceNpc = 0x9CC21262 => "service_npc",
    Sickness = 0xC3FBD8DE => "sickness",
    SimFilter = 0x6E0DDA9F => "sim_filter",
    SimTemplate = 0x0CA4C78B => "sim_template",
    Situation = 0xFBC3AEEB => "situation",
    SituationGoal = 0x598F28E7 => "situation_goal",
    SituationGoalSet = 0x9DF2F1F2 => "situation_goal_set",
    SituationJob = 0x9C07855F => "situation_job",
    Slot = 0x69A5DAA4 => "slot",
    SlotTypeSet = 0x3F163505 => "slot_type_set",
    Snippet = 0x7DF2169C => "snippet",
    SocialGroup = 0x2E47A104 => "social_group",
    Spell = 0x1F3413D9 => "spell",
    Statistic = 0x339BC5BD => "statistic",
    Street = 0xF6E4CB00 => "street",
    Subroot = 0xB7FF8F95 => "subroot",
    TagSet = 0x49395302 => "tag_set",
    TemplateChooser = 0x48C2D5ED => "template_chooser",
    TestBasedScore = 0x4F739CEE => "test_based_score",
    Topic = 0x738E6C56 => "topic",
    Trait = 0xCB5FDDC7 => "trait",
    Tutorial = 0xE04A24A3 => "tutorial",
    TutorialTip = 0x8FB3E0B1 => "tutorial_tip",
    UserInterfaceInfo = 0xB8BF1A63 => "user_interface_info",
    Venue = 0xE6BBD73D => "venue",
    WalkBy = 0x3FCD2486 => "walk_by",
    WeatherEvent = 0x5806F5BA => "weather_event",
    WeatherForecast = 0x497F3271 => "weather_forecast",
    ZoneDirector = 0xF958A092 => "zone_director",
    ZoneModifier = 0x3C1D8799 => "zone_modifier",
}

impl TuningResourceType {
    /// Parse the root `i` attribute of a tuning file (case-insensitive)
    #[must_use]
    pub fn parse_attr(attr: &str) -> Option<Self> {
        let attr = attr.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.attr().eq_ignore_ascii_case(attr))
    }

    /// Look up a tuning type by its numeric resource type
    #[must_use]
    pub fn from_u32(resource_type: u32) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_u32() == resource_type)
    }

    /// Numeric resource type
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Whether this is the generic `Tuning` placeholder type rather than a
    /// concrete tuning class
    #[must_use]
    pub fn is_generic(self) -> bool {
        self == TuningResourceType::Tuning
    }
}
