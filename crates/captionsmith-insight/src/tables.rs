//! Ordered lookup tables. Order matters: tags are reported in table order and
//! the first matching mood wins.

/// A category tag and the keywords that select it.
pub type Category = (&'static str, &'static [&'static str]);

pub const SUBJECT_CATEGORIES: &[Category] = &[
    ("person", &[
        "person", "man", "woman", "people", "child", "boy", "girl", "player", "lady", "kid",
    ]),
    ("animal", &[
        "dog", "cat", "bird", "horse", "cow", "sheep", "elephant", "bear", "zebra", "giraffe",
        "animal",
    ]),
    ("vehicle", &[
        "car", "truck", "bus", "bicycle", "bike", "motorcycle", "train", "boat", "airplane",
        "vehicle",
    ]),
    ("nature", &[
        "tree", "flower", "mountain", "forest", "sky", "ocean", "beach", "river", "lake", "grass",
    ]),
    ("object", &[
        "table", "chair", "phone", "laptop", "book", "cup", "bottle", "bag", "umbrella",
    ]),
];

pub const SETTING_CATEGORIES: &[Category] = &[
    ("outdoor", &[
        "outdoor", "outside", "street", "park", "beach", "field", "garden", "sky", "road", "yard",
    ]),
    ("indoor", &[
        "indoor", "inside", "room", "kitchen", "office", "house", "bedroom", "restaurant",
    ]),
    ("urban", &[
        "city", "street", "building", "urban", "downtown", "traffic", "sidewalk",
    ]),
    ("nature", &[
        "forest", "mountain", "beach", "ocean", "tree", "lake", "river", "nature", "grass",
        "field",
    ]),
];

pub const MOOD_CATEGORIES: &[Category] = &[
    ("peaceful", &[
        "calm", "peaceful", "quiet", "serene", "sunset", "relaxing", "resting", "sitting",
        "lying",
    ]),
    ("energetic", &[
        "running", "runs", "jumping", "playing", "sports", "dancing", "riding", "racing",
    ]),
    ("professional", &[
        "office", "business", "suit", "meeting", "working", "computer", "laptop",
    ]),
    ("casual", &[
        "casual", "friends", "eating", "drinking", "home", "picnic",
    ]),
    ("adventurous", &[
        "mountain", "hiking", "climbing", "adventure", "surfing", "skiing", "camping",
    ]),
];

/// Concrete nouns reported as objects, in reporting order.
pub const OBJECTS: &[&str] = &[
    "backpack", "bike", "bicycle", "car", "dog", "cat", "tree", "mountain", "building", "bench",
    "umbrella", "phone", "laptop", "book", "cup", "bottle", "chair", "table", "ball", "hat",
    "bag", "boat",
];

pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "this", "that", "there", "these", "those", "from", "near",
    "some", "into", "onto", "while", "their", "they", "its", "has", "have", "being",
];
