//! Hotel topic table — ordered keyword scan with canonical answers
//!
//! Resolution is a first-match linear scan: topics are tried in declaration
//! order, keywords within a topic in declared order, and the first keyword
//! found as a substring of the lowercased question wins. The order below is
//! load-bearing. A question mentioning both parking and breakfast resolves
//! to parking because parking is declared first.

use tracing::debug;

/// One row of the topic table. Keywords must be lowercase; each topic
/// carries exactly one canonical answer.
struct Topic {
    id: &'static str,
    /// Human-readable phrase used when enumerating topics in the fallback.
    label: &'static str,
    keywords: &'static [&'static str],
    answer: &'static str,
}

static TOPICS: &[Topic] = &[
    Topic {
        id: "check-in",
        label: "check-in",
        keywords: &[
            "check-in",
            "checkin",
            "check in",
            "arrival",
            "arriving",
            "when can i check in",
            "check in time",
            "checkin time",
        ],
        answer: "Our check-in time is 3:00 PM. Early check-in may be available upon request \
                 and subject to availability.",
    },
    Topic {
        id: "check-out",
        label: "check-out",
        keywords: &[
            "check-out",
            "checkout",
            "check out",
            "departure",
            "leaving",
            "when do i check out",
            "check out time",
            "checkout time",
        ],
        answer: "Check-out time is 11:00 AM. Late check-out can be arranged for an additional \
                 fee, subject to availability.",
    },
    Topic {
        id: "parking",
        label: "parking",
        keywords: &[
            "parking",
            "park",
            "car",
            "vehicle",
            "garage",
            "valet",
            "parking lot",
            "parking space",
        ],
        answer: "We offer complimentary self-parking for all guests. Valet parking is \
                 available for $15 per night.",
    },
    Topic {
        id: "breakfast",
        label: "breakfast",
        keywords: &[
            "breakfast",
            "morning meal",
            "continental breakfast",
            "buffet",
            "dining",
            "restaurant",
            "food",
        ],
        answer: "We serve a complimentary continental breakfast from 6:30 AM to 10:00 AM \
                 daily in our main dining area.",
    },
    Topic {
        id: "wifi",
        label: "WiFi",
        keywords: &["wifi", "wi-fi", "internet", "wireless", "connection", "password"],
        answer: "Free high-speed WiFi is available throughout the hotel. The network name is \
                 \"HotelGuest\" and no password is required.",
    },
    Topic {
        id: "room-service",
        label: "room service",
        keywords: &[
            "room service",
            "room-service",
            "delivery",
            "order food",
            "in-room dining",
        ],
        answer: "Room service is available 24/7. You can call extension 100 from your room or \
                 use our mobile app to place orders.",
    },
    Topic {
        id: "amenities",
        label: "amenities",
        keywords: &[
            "amenities",
            "facilities",
            "services",
            "pool",
            "gym",
            "spa",
            "fitness",
            "laundry",
        ],
        answer: "Our amenities include a fitness center, outdoor pool, business center, \
                 concierge services, and same-day laundry service.",
    },
    Topic {
        id: "cancellation",
        label: "cancellation policies",
        keywords: &[
            "cancel",
            "cancellation",
            "refund",
            "policy",
            "booking",
            "reservation",
        ],
        answer: "Free cancellation up to 24 hours before your arrival date. Cancellations \
                 within 24 hours are subject to a one-night charge.",
    },
];

/// Resolve a free-text hotel question to a canonical answer.
///
/// Matching is strictly substring-based with no phrase boundaries, so a
/// keyword can match inside an unrelated word ("car" inside "scarf"). That
/// over-matching is accepted behavior, not a defect. Never fails: questions
/// that match nothing (including the empty string) get the fallback.
pub fn resolve_hotel_answer(question: &str) -> String {
    let lower = question.to_lowercase();

    for topic in TOPICS {
        if topic.keywords.iter().any(|k| lower.contains(k)) {
            debug!("hotel question matched topic '{}'", topic.id);
            return topic.answer.to_string();
        }
    }

    debug!("hotel question matched no topic, falling back");
    fallback_answer(question)
}

/// Fallback for questions no topic matched. Echoes the original question
/// verbatim and enumerates the supported topics from the table itself, so
/// the list cannot drift when topics change.
fn fallback_answer(question: &str) -> String {
    format!(
        "Thank you for your question about \"{}\". I'm the Hotel Q&A Bot and I can help you \
         with information about {}. Please feel free to ask about any of these topics!",
        question,
        supported_topics()
    )
}

fn supported_topics() -> String {
    let labels: Vec<&str> = TOPICS.iter().map(|t| t.label).collect();
    match labels.split_last() {
        Some((last, rest)) if !rest.is_empty() => {
            format!("{}, and {}", rest.join(", "), last)
        }
        Some((last, _)) => (*last).to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_in_questions() {
        let answer = resolve_hotel_answer("What time is check-in?");
        assert!(answer.contains("check-in time is 3:00 PM"));
        assert!(answer.contains("Early check-in may be available"));
    }

    #[test]
    fn test_check_out_questions() {
        let answer = resolve_hotel_answer("When do I have to check out?");
        assert!(answer.contains("Check-out time is 11:00 AM"));
    }

    #[test]
    fn test_parking_questions() {
        let answer = resolve_hotel_answer("Is there parking available?");
        assert!(answer.contains("complimentary self-parking"));
        assert!(answer.contains("Valet parking is available"));
    }

    #[test]
    fn test_breakfast_questions() {
        let answer = resolve_hotel_answer("Do you serve breakfast?");
        assert!(answer.contains("continental breakfast"));
        assert!(answer.contains("6:30 AM to 10:00 AM"));
    }

    #[test]
    fn test_wifi_questions() {
        let answer = resolve_hotel_answer("Is there WiFi?");
        assert!(answer.contains("Free high-speed WiFi"));
        assert!(answer.contains("HotelGuest"));
    }

    #[test]
    fn test_room_service_questions() {
        let answer = resolve_hotel_answer("Can I order room service?");
        assert!(answer.contains("Room service is available 24/7"));
    }

    #[test]
    fn test_amenities_questions() {
        let answer = resolve_hotel_answer("Do you have a GYM?");
        assert!(answer.contains("fitness center"));
    }

    #[test]
    fn test_cancellation_questions() {
        let answer = resolve_hotel_answer("What is your refund policy?");
        assert!(answer.contains("Free cancellation up to 24 hours"));
    }

    #[test]
    fn test_multi_word_keyword() {
        let answer = resolve_hotel_answer("when can i check in today?");
        assert!(answer.contains("check-in time is 3:00 PM"));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let upper = resolve_hotel_answer("CHECK-IN TIME?");
        let lower = resolve_hotel_answer("check-in time?");
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        // Parking is declared before breakfast, so a question mentioning
        // both resolves to parking every time.
        let answer = resolve_hotel_answer("Can I get parking while I eat breakfast?");
        assert!(answer.contains("self-parking"));
        assert!(!answer.contains("continental breakfast"));

        // Same rule one row down: breakfast beats wifi.
        let answer = resolve_hotel_answer("Is there wifi in the breakfast area?");
        assert!(answer.contains("continental breakfast"));
    }

    #[test]
    fn test_substring_over_matching_is_expected() {
        // "car" matches inside "scarf"; documented over-matching behavior.
        let answer = resolve_hotel_answer("I lost my scarf");
        assert!(answer.contains("self-parking"));
    }

    #[test]
    fn test_empty_question_falls_back() {
        let answer = resolve_hotel_answer("");
        assert!(answer.contains("Thank you for your question"));
    }

    #[test]
    fn test_fallback_echoes_question_verbatim() {
        let answer = resolve_hotel_answer("What Is The Meaning Of Life?");
        assert!(answer.contains("\"What Is The Meaning Of Life?\""));
        assert!(answer.contains("Hotel Q&A Bot"));
    }

    #[test]
    fn test_fallback_enumerates_topics_from_table() {
        let answer = resolve_hotel_answer("zzz");
        assert!(answer.contains(
            "check-in, check-out, parking, breakfast, WiFi, room service, amenities, \
             and cancellation policies"
        ));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let q = "Is there parking available?";
        assert_eq!(resolve_hotel_answer(q), resolve_hotel_answer(q));
        let q = "something entirely unrelated";
        assert_eq!(resolve_hotel_answer(q), resolve_hotel_answer(q));
    }

    #[test]
    fn test_table_invariants() {
        assert!(!TOPICS.is_empty());
        for topic in TOPICS {
            assert!(!topic.keywords.is_empty(), "topic '{}' has no keywords", topic.id);
            assert!(!topic.answer.is_empty(), "topic '{}' has no answer", topic.id);
            for keyword in topic.keywords {
                assert_eq!(
                    *keyword,
                    keyword.to_lowercase(),
                    "keyword '{}' in topic '{}' must be lowercase",
                    keyword,
                    topic.id
                );
            }
        }
    }
}
