//! Candidate-list sampling from a built-in lexical taxonomy.
//!
//! Instances are sampled deterministically from a fixed
//! category/subcategory table. Each difficulty level uses a different
//! mixing strategy over the taxonomy:
//!
//! - Level 1: two words from each subcategory of two categories
//!   (closely related lists)
//! - Level 2: four words from one subcategory of each of two categories
//! - Level 3: one word from every subcategory of four categories
//!   (maximally spread lists)
//!
//! The target is drawn uniformly from the sampled list.

use crate::core::{GameInstance, GameRng, Level};

/// Words per candidate list.
pub const INSTANCE_SIZE: usize = 8;

/// A leaf group of closely related words.
#[derive(Clone, Copy, Debug)]
pub struct Subcategory {
    pub name: &'static str,
    pub members: &'static [&'static str],
}

/// A broad category with two distinguishing subcategories.
#[derive(Clone, Copy, Debug)]
pub struct Category {
    pub name: &'static str,
    pub subcategories: [Subcategory; 2],
}

/// The built-in taxonomy. Members are distinct across all subcategories.
pub const TAXONOMY: &[Category] = &[
    Category {
        name: "mammal",
        subcategories: [
            Subcategory {
                name: "feline",
                members: &["cat", "lion", "tiger", "leopard", "cheetah", "lynx"],
            },
            Subcategory {
                name: "canine",
                members: &["dog", "wolf", "fox", "jackal", "coyote", "dingo"],
            },
        ],
    },
    Category {
        name: "vehicle",
        subcategories: [
            Subcategory {
                name: "wheeled_vehicle",
                members: &["car", "bicycle", "truck", "wagon", "tricycle", "van"],
            },
            Subcategory {
                name: "aircraft",
                members: &["airplane", "helicopter", "glider", "balloon", "jet", "drone"],
            },
        ],
    },
    Category {
        name: "device",
        subcategories: [
            Subcategory {
                name: "electronic_device",
                members: &["computer", "telephone", "radio", "television", "camera", "calculator"],
            },
            Subcategory {
                name: "musical_instrument",
                members: &["guitar", "piano", "violin", "drum", "flute", "trumpet"],
            },
        ],
    },
    Category {
        name: "reproductive_structure",
        subcategories: [
            Subcategory {
                name: "flower",
                members: &["rose", "tulip", "daisy", "orchid", "lily", "sunflower"],
            },
            Subcategory {
                name: "edible_fruit",
                members: &["apple", "banana", "cherry", "mango", "peach", "grape"],
            },
        ],
    },
    Category {
        name: "bird",
        subcategories: [
            Subcategory {
                name: "waterbird",
                members: &["penguin", "flamingo", "stork", "heron", "pelican", "swan"],
            },
            Subcategory {
                name: "passerine",
                members: &["sparrow", "finch", "robin", "swallow", "wren", "warbler"],
            },
        ],
    },
    Category {
        name: "food",
        subcategories: [
            Subcategory {
                name: "vegetable",
                members: &["carrot", "potato", "onion", "spinach", "cabbage", "pumpkin"],
            },
            Subcategory {
                name: "solid_food",
                members: &["bread", "cheese", "pasta", "rice", "cake", "pancake"],
            },
        ],
    },
    Category {
        name: "clothing",
        subcategories: [
            Subcategory {
                name: "garment",
                members: &["shirt", "jacket", "sweater", "dress", "scarf", "coat"],
            },
            Subcategory {
                name: "footwear",
                members: &["boot", "sandal", "slipper", "sneaker", "moccasin", "clog"],
            },
        ],
    },
    Category {
        name: "structure",
        subcategories: [
            Subcategory {
                name: "building",
                members: &["church", "castle", "tower", "barn", "library", "stadium"],
            },
            Subcategory {
                name: "housing",
                members: &["apartment", "cottage", "cabin", "bungalow", "villa", "houseboat"],
            },
        ],
    },
];

/// Deterministic instance sampler.
pub struct InstanceGenerator {
    rng: GameRng,
}

impl InstanceGenerator {
    /// Create a generator from a seed. Same seed, same instances.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Sample one instance for a level with the given turn budget.
    #[must_use]
    pub fn generate(&mut self, level: Level, max_turns: u32) -> GameInstance {
        let mut items: Vec<String> = Vec::with_capacity(INSTANCE_SIZE);

        match level {
            Level::One => {
                // Two related categories, both subcategories, two words each.
                for category in self.rng.sample(TAXONOMY, 2) {
                    for sub in &category.subcategories {
                        for word in self.rng.sample(sub.members, 2) {
                            items.push((*word).to_string());
                        }
                    }
                }
            }
            Level::Two => {
                // Two categories, one subcategory each, four words each.
                for category in self.rng.sample(TAXONOMY, 2) {
                    let sub = self
                        .rng
                        .choose(&category.subcategories)
                        .expect("category has subcategories");
                    for word in self.rng.sample(sub.members, 4) {
                        items.push((*word).to_string());
                    }
                }
            }
            Level::Three => {
                // Four categories, both subcategories, one word each.
                for category in self.rng.sample(TAXONOMY, 4) {
                    for sub in &category.subcategories {
                        let word = self.rng.choose(sub.members).expect("subcategory has members");
                        items.push((*word).to_string());
                    }
                }
            }
        }

        let target = self
            .rng
            .choose(&items)
            .expect("candidate list is non-empty")
            .clone();

        GameInstance {
            target_word: target,
            candidate_list: items,
            max_turns,
        }
    }
}
