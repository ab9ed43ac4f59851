//! Canned legal guidance for when the chat backend is unreachable.
//!
//! Matching is whole-word so "first" does not trigger the FIR entry and
//! "company" does not trigger the PAN one.

/// Keyword groups and the guidance each one selects. First match wins.
const FALLBACKS: &[(&[&str], &str)] = &[
    (
        &["fir", "police", "theft", "crime"],
        "You can file an FIR at the police station nearest to where the incident \
         took place. Describe the incident and carry an identity proof; the officer \
         must register it and give you a copy of the FIR free of cost.",
    ),
    (
        &["rti", "information"],
        "To request information from a public authority, send an RTI application \
         to its Public Information Officer with the application fee of Rs. 10. \
         The authority must reply within 30 days.",
    ),
    (
        &["consumer", "refund", "defective", "overcharged"],
        "For a defective product or deficient service, file a complaint with the \
         District Consumer Disputes Redressal Commission. Keep your bills, warranty \
         cards and any correspondence as evidence.",
    ),
    (
        &["voter", "election", "epic"],
        "To enrol as a voter or update your details, submit Form 6 to your \
         Electoral Registration Officer or apply online on the voters' service \
         portal with proof of age and residence.",
    ),
    (
        &["pan", "49a"],
        "Apply for a new PAN card or correct an existing one using Form 49A with \
         identity and address proof. The acknowledgement number lets you track \
         the application.",
    ),
];

const DEFAULT: &str =
    "I could not reach the assistant service. I can still share basic guidance on \
     FIRs, RTI applications, consumer complaints, Voter ID enrolment and PAN \
     forms; please ask about one of those.";

/// Answer a question from the canned table.
pub fn answer(question: &str) -> &'static str {
    let lowered = question.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    for (keywords, reply) in FALLBACKS.iter().copied() {
        if keywords.iter().any(|keyword| words.contains(keyword)) {
            return reply;
        }
    }
    DEFAULT
}
