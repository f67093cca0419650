//! Prompt assembly for the text-generation collaborator.

use harbourguide_common::PlaceView;

/// One line per retrieved place: `- name | type | distance km | address | website`.
/// Empty when nothing was retrieved.
pub fn build_context(retrieved: &[PlaceView]) -> String {
    if retrieved.is_empty() {
        return String::new();
    }

    let mut context = String::from("Here are some relevant places from our database:\n");
    for place in retrieved {
        let category = place.category.as_deref().unwrap_or("unknown");
        let distance = place
            .distance_km
            .map(|d| d.to_string())
            .unwrap_or_else(|| "?".to_string());
        let website = place
            .website
            .as_deref()
            .filter(|w| !w.is_empty())
            .unwrap_or("-");
        context.push_str(&format!(
            "- {} | {} | {} km | {} | {}\n",
            place.name, category, distance, place.address, website
        ));
    }
    context.push('\n');
    context
}

/// Full prompt sent to the model: instructions, retrieved context, the user's question.
pub fn build_prompt(context: &str, message: &str) -> String {
    let context = if context.is_empty() {
        "No specific locations found in database"
    } else {
        context
    };

    format!(
        "You are a friendly and knowledgeable Hong Kong travel assistant. \n\
\n\
INSTRUCTIONS:\n\
1. Use your general knowledge about Hong Kong tourism, weather patterns, crowd levels, and seasonal trends to answer questions\n\
2. When the user asks about specific places in our database (listed above), incorporate that information\n\
3. For general questions (weather, crowds, best times to visit, etc.), use your own expertise\n\
4. Provide practical, helpful advice for tourists\n\
5. If you mention specific attractions from our database, include their practical details\n\
6. Be conversational but informative\n\
\n\
Current context: {context}\n\
\n\
User question: {message}\n\
\n\
Please provide a helpful response that combines your Hong Kong knowledge with any relevant location data above."
    )
}
