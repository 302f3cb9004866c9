//! Category response tables — per-category keyword replies and defaults
//!
//! Each of the three agent categories gets a desk: a greeting, an ordered
//! keyword-to-reply mapping, and a default reply for questions nothing
//! matched. Resolution scans replies in declared order and returns the first
//! whose keyword appears in the lowercased question. Unrecognized category
//! strings never error; they get an identity-only fallback.

use tracing::debug;

use crate::agent::AgentCategory;

/// Response table for one agent category.
struct CategoryDesk {
    category: AgentCategory,
    /// Role phrase woven into the default reply ("Sales Assistant").
    role: &'static str,
    /// What this desk can help with, enumerated in the default reply.
    offerings: &'static str,
    /// Closing prompt appended to the default reply.
    follow_up: &'static str,
    greeting: &'static str,
    /// Ordered (keyword, reply) pairs. Keywords must be lowercase.
    replies: &'static [(&'static str, &'static str)],
}

static DESKS: &[CategoryDesk] = &[
    CategoryDesk {
        category: AgentCategory::Sales,
        role: "Sales Assistant",
        offerings: "product information, pricing, and purchasing options",
        follow_up: "What would you like to know more about?",
        greeting: "Hello! I'm your Sales Assistant. How can I help you find the right \
                   product today?",
        replies: &[
            (
                "price",
                "Our pricing is flexible and depends on your specific needs. I'd be happy \
                 to connect you with a sales representative for a detailed quote.",
            ),
            (
                "cost",
                "Costs vary by plan and volume. Share a few details about your use case \
                 and we can put together an estimate.",
            ),
            (
                "discount",
                "We offer discounts for annual commitments and volume purchases. Ask our \
                 sales team about current promotions.",
            ),
            (
                "buy",
                "You can purchase directly through our website, or I can arrange a call \
                 with a sales representative to walk you through the options.",
            ),
            (
                "demo",
                "Absolutely, we can set up a product demo. Let me know a time that works \
                 for you and we'll get it scheduled.",
            ),
        ],
    },
    CategoryDesk {
        category: AgentCategory::Support,
        role: "Support Specialist",
        offerings: "troubleshooting, account issues, and technical questions",
        follow_up: "Could you tell me a bit more about the problem?",
        greeting: "Hello! I'm your Support Specialist. What can I help you troubleshoot \
                   today?",
        replies: &[
            (
                "password",
                "You can reset your password from the login page using the \"Forgot \
                 password\" link. If you're still locked out, I can escalate to our \
                 support team.",
            ),
            (
                "error",
                "Sorry you're running into an error. Please share the exact message you \
                 see and I'll help you troubleshoot.",
            ),
            (
                "bug",
                "Thanks for the report. Please describe the steps to reproduce the issue \
                 and we'll file it with our engineering team.",
            ),
            (
                "install",
                "Installation guides for every platform are available in our \
                 documentation. Let me know your operating system and I'll point you to \
                 the right one.",
            ),
            (
                "refund",
                "Refund requests are handled by our billing team. Please include your \
                 order number and we'll process it within 3-5 business days.",
            ),
        ],
    },
    CategoryDesk {
        category: AgentCategory::Marketing,
        role: "Marketing Assistant",
        offerings: "campaigns, content, and brand questions",
        follow_up: "What are you working on?",
        greeting: "Hello! I'm your Marketing Assistant. What campaign or content can I \
                   help with today?",
        replies: &[
            (
                "campaign",
                "We're always planning new campaigns. Tell me about your goals and I can \
                 share what's worked well for similar audiences.",
            ),
            (
                "social",
                "You can find us on all major social platforms. Follow along for product \
                 updates, tips, and community highlights.",
            ),
            (
                "newsletter",
                "Our newsletter goes out monthly with product news and best practices. \
                 You can subscribe from the footer of our website.",
            ),
            (
                "event",
                "We host webinars and meetups throughout the year. Check the events page \
                 for upcoming dates and registration.",
            ),
            (
                "brand",
                "Brand assets and usage guidelines are available in our press kit. Let me \
                 know if you need a format we don't list.",
            ),
        ],
    },
];

/// Resolve a question addressed to a non-hotel agent.
///
/// The category is taken as a raw string so records with drifted or unknown
/// category values still get an answer instead of an error: anything that is
/// not exactly one of the three recognized categories falls back to a
/// generic reply that only references the agent's display name. Within a
/// recognized category, the first keyword found in the lowercased question
/// wins; otherwise the category default embeds the original question text
/// and the display name. Greetings are table data for callers that want
/// them; resolution never consults them.
pub fn resolve_category_answer(category: &str, name: &str, question: &str) -> String {
    let Some(desk) = desk_for(category) else {
        debug!("unrecognized agent category '{}', using identity fallback", category);
        return format!("Hello! I'm {name}. How can I help you today?");
    };

    let lower = question.to_lowercase();
    for (keyword, reply) in desk.replies {
        if lower.contains(keyword) {
            debug!("question matched {} keyword '{}'", category, keyword);
            return reply.to_string();
        }
    }

    format!(
        "Thank you for your question: \"{}\". I'm {}, your {}. I can help with {}. {}",
        question, name, desk.role, desk.offerings, desk.follow_up
    )
}

/// Greeting line for a recognized category, if any.
pub fn category_greeting(category: &str) -> Option<&'static str> {
    desk_for(category).map(|desk| desk.greeting)
}

fn desk_for(category: &str) -> Option<&'static CategoryDesk> {
    DESKS.iter().find(|desk| desk.category.as_str() == category)
}
