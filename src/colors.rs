//! Fixed label palette. Each known disease label owns one RGB color so a
//! box and its text render identically across requests; anything outside
//! the table falls back to neutral gray.

pub const FALLBACK_COLOR: [u8; 3] = [128, 128, 128];

const PALETTE: [(&str, [u8; 3]); 29] = [
    ("Cherry leaf", [57, 12, 140]),
    ("Peach leaf", [125, 114, 71]),
    ("Corn leaf blight", [52, 44, 216]),
    ("Apple rust leaf", [16, 15, 47]),
    ("Potato leaf late blight", [111, 119, 13]),
    ("Strawberry leaf", [101, 214, 112]),
    ("Corn rust leaf", [229, 142, 3]),
    ("Tomato leaf late blight", [81, 216, 174]),
    ("Tomato mold leaf", [142, 79, 110]),
    ("Potato leaf early blight", [172, 52, 47]),
    ("Apple leaf", [194, 49, 183]),
    ("Tomato leaf yellow virus", [176, 135, 22]),
    ("Blueberry leaf", [235, 63, 193]),
    ("Tomato leaf mosaic virus", [40, 150, 185]),
    ("Raspberry leaf", [98, 35, 23]),
    ("Tomato leaf bacterial spot", [116, 148, 40]),
    ("Squash Powdery mildew leaf", [119, 51, 194]),
    ("grape leaf", [142, 232, 186]),
    ("Corn Gray leaf spot", [83, 189, 181]),
    ("Tomato Early blight leaf", [107, 136, 36]),
    ("Apple Scab Leaf", [87, 125, 83]),
    ("Tomato Septoria leaf spot", [236, 194, 138]),
    ("Tomato leaf", [112, 166, 28]),
    ("Soyabean leaf", [117, 16, 161]),
    ("Bell_pepper leaf spot", [205, 137, 33]),
    ("Bell_pepper leaf", [108, 161, 108]),
    ("grape leaf black rot", [255, 202, 234]),
    ("Potato leaf", [73, 135, 71]),
    ("Tomato two spotted spider mites leaf", [126, 134, 219]),
];

pub fn color_of(label: &str) -> [u8; 3] {
    PALETTE
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_have_fixed_colors() {
        assert_eq!(color_of("Apple leaf"), [194, 49, 183]);
        assert_eq!(color_of("grape leaf"), [142, 232, 186]);
        assert_eq!(color_of("Tomato two spotted spider mites leaf"), [126, 134, 219]);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(color_of("apple leaf"), FALLBACK_COLOR);
    }

    #[test]
    fn unknown_labels_fall_back_to_gray() {
        assert_eq!(color_of("Dragonfruit leaf"), FALLBACK_COLOR);
        assert_eq!(color_of(""), FALLBACK_COLOR);
    }
}
