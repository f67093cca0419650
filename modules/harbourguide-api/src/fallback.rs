//! Canned itinerary used whenever the text-generation provider fails.
//!
//! Keyword triggers and wording are fixed: existing clients match on them.

struct Topic {
    keywords: &'static [&'static str],
    lines: &'static [&'static str],
}

const TOPICS: &[Topic] = &[
    Topic {
        keywords: &["park", "outdoor"],
        lines: &[
            "• **Victoria Park** - Large urban park with sports facilities and walking paths",
            "• **Hong Kong Park** - Beautiful green space with aviary and tai chi garden",
            "• **Kowloon Park** - Great for leisurely walks and bird watching",
        ],
    },
    Topic {
        keywords: &["museum", "cultural"],
        lines: &[
            "• **Hong Kong Museum of History** - Learn about Hong Kong's rich heritage",
            "• **Hong Kong Science Museum** - Interactive exhibits for all ages",
            "• **Hong Kong Art Museum** - Featuring local and international artists",
        ],
    },
    Topic {
        keywords: &["shop", "mall"],
        lines: &[
            "• **Causeway Bay** - Department stores and trendy boutiques",
            "• **Mong Kok** - Vibrant street markets and local shops",
            "• **Tsim Sha Tsui** - Luxury brands and harborfront shopping",
        ],
    },
    Topic {
        keywords: &["restaurant", "food", "eat"],
        lines: &[
            "• **Temple Street Night Market** - Authentic local street food",
            "• **Central District** - International cuisine and fine dining",
            "• **Yau Ma Tei** - Traditional Cantonese restaurants",
        ],
    },
    Topic {
        keywords: &["fitness", "exercise", "workout"],
        lines: &[
            "• **Bowen Road Fitness Trail** - Scenic outdoor exercise stations",
            "• **Victoria Peak Circuit** - Beautiful walking trail with city views",
            "• **Dragon's Back Hike** - Popular hiking trail with coastal views",
        ],
    },
];

const GENERAL_LINES: &[&str] = &[
    "• **Victoria Peak** - Stunning panoramic views of Hong Kong",
    "• **Star Ferry** - Iconic harbor crossing experience",
    "• **Ngong Ping 360** - Cable car ride and cultural village",
    "• **Ocean Park** - Marine life and amusement rides",
    "• **Temple Street Night Market** - Local food and shopping experience",
];

const HEADER: &str = "As your Hong Kong travel assistant, here are my recommendations:\n\n";
const FOOTER: &str = "For specific details about opening hours, locations, and current events, please check the official websites of these attractions.";

/// Build the canned reply for `prompt`: one section per topic whose keyword
/// appears in the lower-cased prompt, or the general list when none do.
pub fn fallback_itinerary(prompt: &str) -> String {
    let lower = prompt.to_lowercase();
    let mut response = String::from(HEADER);

    let mut matched = false;
    for topic in TOPICS {
        if topic.keywords.iter().any(|k| lower.contains(k)) {
            matched = true;
            push_section(&mut response, topic.lines);
        }
    }
    if !matched {
        push_section(&mut response, GENERAL_LINES);
    }

    response.push_str(FOOTER);
    response
}

fn push_section(response: &mut String, lines: &[&str]) {
    for line in lines {
        response.push_str(line);
        response.push('\n');
    }
    response.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keywords_gives_general_list() {
        let reply = fallback_itinerary("Hello there");
        assert_eq!(
            reply,
            "As your Hong Kong travel assistant, here are my recommendations:\n\n\
• **Victoria Peak** - Stunning panoramic views of Hong Kong\n\
• **Star Ferry** - Iconic harbor crossing experience\n\
• **Ngong Ping 360** - Cable car ride and cultural village\n\
• **Ocean Park** - Marine life and amusement rides\n\
• **Temple Street Night Market** - Local food and shopping experience\n\n\
For specific details about opening hours, locations, and current events, please check the official websites of these attractions."
        );
    }

    #[test]
    fn sections_follow_fixed_topic_order() {
        let reply = fallback_itinerary("Any WORKOUT spots or a MUSEUM?");
        let museum = reply.find("Hong Kong Museum of History").unwrap();
        let fitness = reply.find("Bowen Road Fitness Trail").unwrap();
        assert!(museum < fitness);
        assert!(!reply.contains("Victoria Peak** - Stunning"));
        assert!(!reply.contains("Victoria Park"));
    }

    #[test]
    fn substring_triggers() {
        // "weather" contains "eat"; "shopping" contains "shop".
        let reply = fallback_itinerary("weather for shopping");
        assert!(reply.contains("Temple Street Night Market** - Authentic local street food"));
        assert!(reply.contains("Causeway Bay"));
        assert!(!reply.contains("Kowloon Park"));
    }

    #[test]
    fn each_topic_has_three_lines_and_blank_separator() {
        let reply = fallback_itinerary("park");
        assert_eq!(
            reply,
            format!(
                "{HEADER}\
• **Victoria Park** - Large urban park with sports facilities and walking paths\n\
• **Hong Kong Park** - Beautiful green space with aviary and tai chi garden\n\
• **Kowloon Park** - Great for leisurely walks and bird watching\n\n\
{FOOTER}"
            )
        );
    }
}
