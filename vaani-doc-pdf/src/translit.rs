//! Best-effort transliteration of known non-Latin strings.
//!
//! The export draws with the PDF base-14 fonts, which cannot shape Indic
//! scripts. Known place names and common words are swapped for their
//! Latin spellings before drawing; anything not in the table passes
//! through unchanged. This is a lookup, not a transliteration engine.

/// Known strings, multi-word entries before their parts so "नई दिल्ली"
/// wins over "दिल्ली".
const TABLE: &[(&str, &str)] = &[
    ("उत्तर प्रदेश", "Uttar Pradesh"),
    ("मध्य प्रदेश", "Madhya Pradesh"),
    ("पश्चिम बंगाल", "West Bengal"),
    ("नई दिल्ली", "New Delhi"),
    ("महाराष्ट्र", "Maharashtra"),
    ("राजस्थान", "Rajasthan"),
    ("दिल्ली", "Delhi"),
    ("मुंबई", "Mumbai"),
    ("कोलकाता", "Kolkata"),
    ("चेन्नई", "Chennai"),
    ("बेंगलुरु", "Bengaluru"),
    ("जयपुर", "Jaipur"),
    ("लखनऊ", "Lucknow"),
    ("पुणे", "Pune"),
    ("पटना", "Patna"),
    ("भारत", "India"),
    ("गांव", "Village"),
    ("जिला", "District"),
];

/// Replace every known non-Latin string with its Latin spelling.
/// Unrecognized text passes through unchanged.
pub fn to_latin(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }
    let mut out = text.to_string();
    for (from, to) in TABLE {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    out
}
