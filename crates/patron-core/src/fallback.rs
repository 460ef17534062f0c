//! Fallback - canned responses when the model integration is unavailable
//!
//! Pure keyword matching over the lower-cased message. Used when no model
//! credential is configured or the gateway itself is down; deterministic,
//! stateless, no I/O.

/// Produce a canned response for a customer message.
#[must_use]
pub fn fallback_response(message: &str) -> String {
    let lower = message.to_lowercase();

    if lower.contains("points") || lower.contains("balance") {
        return "📊 To check your points, please provide your phone number or use the form above \
to look up your balance. \n\n💡 Tip: Set up your Gemini API key for more intelligent responses!"
            .to_string();
    }

    if lower.contains("recommend") || lower.contains("suggest") {
        return "💡 For personalized recommendations, please first check your points using your \
phone number. \n\n🤖 Note: Enable Gemini AI for smarter recommendations!"
            .to_string();
    }

    if lower.contains("referral") || lower.contains("refer") {
        return "👥 **Referral Program:** \n1. Ask friends to mention your phone number when they \
first shop\n2. You both earn bonus points!\n3. No limit on referrals\n\n🎁 Start referring \
friends today!"
            .to_string();
    }

    if lower.contains("help") || lower.contains("what can you do") {
        return "🤖 **I can help you with:**\n• Check points balance\n• View transaction history\n\
• Get recommendations\n• Learn about referrals\n• General loyalty program info\n\n💡 For smarter \
AI responses, configure your Gemini API key!"
            .to_string();
    }

    "🤖 Hello! I can help you with loyalty points, recommendations, and referrals. \n\n⚙️ For \
enhanced AI responses, please configure your Gemini API key in the .env file."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_question_mentions_phone_number() {
        let response = fallback_response("How many points do I have?");
        assert!(response.contains("phone number"));
    }

    #[test]
    fn test_balance_keyword_also_matches() {
        let response = fallback_response("what's my BALANCE?");
        assert!(response.contains("phone number"));
    }

    #[test]
    fn test_recommendation_keyword() {
        let response = fallback_response("Can you suggest something?");
        assert!(response.contains("recommendations"));
    }

    #[test]
    fn test_referral_keyword() {
        let response = fallback_response("how do I refer a friend");
        assert!(response.contains("Referral Program"));
    }

    #[test]
    fn test_help_keyword() {
        let response = fallback_response("help");
        assert!(response.contains("I can help you with"));
    }

    #[test]
    fn test_generic_greeting_for_everything_else() {
        let response = fallback_response("good morning");
        assert!(response.contains("loyalty points"));
    }
}
