use serde::Serialize;
use uuid::Uuid;

use super::{Catalog, CatalogError, CatalogKind, FeatureRow, lookup, table_names};

/// A descriptive trait owned by exactly one species.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Trait {
    pub id: Uuid,
    /// Owning species.
    #[serde(skip)]
    pub species_id: Uuid,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub id: Uuid,
    pub name: String,
    pub traits: Vec<Trait>,
}

impl Catalog for Species {
    const KIND: CatalogKind = CatalogKind::Species;

    fn names() -> Vec<&'static str> {
        table_names(SPECIES_TRAITS)
    }

    fn instantiate(name: &str) -> Result<Self, CatalogError> {
        let rows = lookup(SPECIES_TRAITS, Self::KIND, name)?;
        let id = Uuid::new_v4();
        let traits = rows
            .iter()
            .map(|(title, description)| Trait {
                id: Uuid::new_v4(),
                species_id: id,
                title: (*title).to_string(),
                description: (*description).to_string(),
            })
            .collect();

        Ok(Self {
            id,
            name: name.to_string(),
            traits,
        })
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn child_count(&self) -> usize {
        self.traits.len()
    }
}

const SPECIES_TRAITS: &[(&str, &[FeatureRow])] = &[
    (
        "Aasimar",
        &[
            (
                "Ability Score Increase.",
                "When determining your character's ability scores, increase one score by 2 and increase a different score by 1, or increase three different scores by 1. You can't raise any of your scores above 20.",
            ),
            (
                "Creature Type.",
                "You are a Humanoid.",
            ),
            (
                "Size.",
                "You are Medium or Small. You choose the size when you select this race.",
            ),
            (
                "Speed.",
                "Your walking speed is 30 feet.",
            ),
            (
                "Darkvision.",
                "You can see in dim light within 60 feet of you as if it were bright light and in darkness as if it were dim light. You discern colors in that darkness only as shades of gray.",
            ),
            (
                "Celestial Resistance.",
                "You have resistance to necrotic damage and radiant damage.",
            ),
            (
                "Healing Hands.",
                "As an action, you can touch a creature and roll a number of d4s equal to your proficiency bonus. The creature regains a number of hit points equal to the total rolled. Once you use this trait, you can't use it again until you finish a long rest.",
            ),
            (
                "Light Bearer.",
                "You know the Light cantrip. Charisma is your spellcasting ability for it.",
            ),
            (
                "Celestial Revelation.",
                "When you reach 3rd level, choose one of the revelation options below. Thereafter, you can use a bonus action to unleash the celestial energy within yourself, gaining the benefits of that revelation. Your transformation lasts for 1 minute or until you end it as a bonus action. Once you transform using your revelation below, you can't use it again until you finish a long rest. Necrotic Shroud. Your eyes briefly become pools of darkness, and ghostly, flightless wings sprout from your back temporarily. Creatures other than your allies within 10 feet of you that can see you must succeed on a Charisma saving throw (DC 8 + your proficiency bonus + your Charisma modifier) or become frightened of you until the end of your next turn. Until the transformation ends, once on each of your turns, you can deal extra necrotic damage to one target when you deal damage to it with an attack or a spell. The extra damage equals your proficiency bonus. Radiant Consumption. Searing light temporarily radiates from your eyes and mouth. For the duration, you shed bright light in a 10-foot radius and dim light for an additional 10 feet, and at the end of each of your turns, each creature within 10 feet of you takes radiant damage equal to your proficiency bonus. Until the transformation ends, once on each of your turns, you can deal extra radiant damage to one target when you deal damage to it with an attack or a spell. The extra damage equals your proficiency bonus. Radiant Soul. Two luminous, spectral wings sprout from your back temporarily. Until the transformation ends, you have a flying speed equal to your walking speed, and once on each of your turns, you can deal extra radiant damage to one target when you deal damage to it with an attack or a spell. The extra damage equals your proficiency bonus.",
            ),
            (
                "Languages.",
                "Your character can speak, read, and write Common and one other language that you and your DM agree is appropriate for the character. The Player's Handbook offers a list of languages to choose from. The DM is free to modify that list for a campaign.",
            ),
        ],
    ),
    (
        "Dragonborn",
        &[
            (
                "Ability Score Increase.",
                "When determining your character's ability scores, increase one score by 2 and increase a different score by 1, or increase three different scores by 1. You can't raise any of your scores above 20.",
            ),
            (
                "Creature Type.",
                "You are a Humanoid.",
            ),
            (
                "Size.",
                "Medium (about 5–7 feet tall)",
            ),
            (
                "Speed.",
                "Your walking speed is 30 feet.",
            ),
            (
                "Dragon Ancestry.",
                "Your lineage stems from a dragon progenitor. Choose the kind of dragon from the Draconic Ancestors table. Your choice affects your Breath Weapon and Damage Resistance traits as well as your appearance.",
            ),
            (
                "Breath Weapon.",
                "When you take the Attack action on your turn, you can replace one of your attacks with an exhalation of magical energy in either a 15-foot Cone or a 30-foot Line that is 5 feet wide (choose the shape each time). Each creature in that area must make a Dexterity saving throw (DC 8 plus your Constitution modifier and Proficiency Bonus). On a failed save, a creature takes 1d10 damage of the type determined by your Draconic Ancestry trait. On a successful save, a creature takes half as much damage. This damage increases by 1d10 when you reach character levels 5 (2d10), 11 (3d10), and 17 (4d10). You can use this Breath Weapon a number of times equal to your Proficiency Bonus, and you regain all expended uses when you finish a Long Rest.",
            ),
            (
                "Damage Resistance.",
                "You have resistance to the type of damage associated with your Draconic Ancestry trait.",
            ),
            (
                "Darkvision.",
                "You have Darkvision with a range of 60 feet.",
            ),
            (
                "Draconic Flight.",
                "When you reach character level 5, you can channel draconic magic to give yourself temporary flight. As a Bonus Action, you sprout spectral wings on your back that last for 10 minutes or until you retract the wings (no action required) or have the Incapacitated condition. During that time, you have a Fly Speed equal to your Speed. Your wings appear to be made of the same energy as your Breath Weapon. Once you use this trait, you can't use it again until you finish a Long Rest.",
            ),
            (
                "Languages.",
                "Your character can speak, read, and write Common and one other language that you and your DM agree is appropriate for the character. The Player's Handbook offers a list of languages to choose from. The DM is free to modify that list for a campaign.",
            ),
        ],
    ),
    (
        "Dwarf",
        &[
            (
                "Creature Type.",
                "Humanoid.",
            ),
            (
                "Size.",
                "Medium (about 4–5 feet tall).",
            ),
            (
                "Speed.",
                "30 feet.",
            ),
            (
                "Darkvision.",
                "You have Darkvision with a range of 120 feet.",
            ),
            (
                "Dwarven Resilience.",
                "You have Resistance to Poison damage. You also have Advantage on saving throws you make to avoid or end the Poisoned condition.",
            ),
            (
                "Dwarven Toughness.",
                "Your Hit Point maximum increases by 1, and it increases by 1 again whenever you gain a level.",
            ),
            (
                "Stonecunning",
                "As a Bonus Action, you gain Tremorsense with a range of 60 feet for 10 minutes. You must be on a stone surface or touching a stone surface to use this Tremorsense. The stone can be natural or worked. You can use this Bonus Action a number of times equal to your Proficiency Bonus, and you regain all expended uses when you finish a Long Rest.",
            ),
        ],
    ),
    (
        "Halfling",
        &[
            (
                "Creature Type.",
                "Humanoid.",
            ),
            (
                "Size.",
                "Small (about 2–3 feet tall).",
            ),
            (
                "Speed.",
                "30 feet.",
            ),
            (
                "Brave.",
                "You have Advantage on saving throws you make to avoid or end the Frightened condition.",
            ),
            (
                "Halfling Nimbleness.",
                "You can move through the space of any creature that is a size larger than you, but you can't stop in the same space.",
            ),
            (
                "Luck.",
                "When you roll a 1 on the d20 of a D20 Test, you can reroll the die, and you must use the new roll.",
            ),
            (
                "Naturally Stealthy.",
                "You can take the Hide action even when you are obscured only by a creature that is at least one size larger than you.",
            ),
        ],
    ),
    (
        "Human",
        &[
            (
                "Creature Type.",
                "Humanoid.",
            ),
            (
                "Size.",
                "Medium (about 4–7 feet tall) or Small (about 2–4 feet tall), chosen when you select this species.",
            ),
            (
                "Speed.",
                "30 feet.",
            ),
            (
                "Resourceful",
                "You gain Heroic Inspiration whenever you finish a Long Rest.",
            ),
            (
                "Skillful",
                "You gain proficiency in one skill of your choice.",
            ),
            (
                "Versatile",
                "You gain an Origin feat of your choice.",
            ),
        ],
    ),
];
