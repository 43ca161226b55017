use anyhow::Result;
use std::time::Duration;

/// Pause before answering so the reply does not appear instantly.
const REPLY_DELAY: Duration = Duration::from_millis(900);

const FINE_MOTOR_REPLY: &str = "Fine motor skills grow through everyday practice, so you rarely need special equipment.\n\nTry activities that use the thumb and fingers together: transferring dry beans between bowls with a spoon, threading large beads, peeling stickers, or tearing paper for a collage. Keep sessions short and let your child repeat the same activity as often as they like. Repetition is how the hand learns.\n\nAround the house, involve them in real work such as pouring water from a small jug, buttoning their own coat, or helping to squeeze a sponge. These build the same muscles and feel purposeful to the child.";

const BITING_REPLY: &str = "Biting is very common in toddlers and is almost never aggression. It usually comes from teething discomfort, big feelings without words yet, or simple cause-and-effect curiosity.\n\nWhen it happens, stay calm and keep your words short: \"I won't let you bite. Biting hurts.\" Turn your attention to the child who was bitten first, so biting does not become a reliable way to get attention.\n\nWatch for the moments it tends to happen, such as crowding, tiredness, or frustration over a toy, and step in a little earlier. Offering a teether and naming feelings (\"You wanted the truck. That made you angry.\") gives the child something to do instead. Most children grow out of biting quickly once they have more language.";

const ENVIRONMENT_REPLY: &str = "A prepared environment does a lot of the teaching for you.\n\nKeep materials on low, open shelves so your child can choose work and put it back without help. Fewer choices out at once is better; rotate toys every week or two instead of displaying everything. Each activity should have a clear place, ideally on its own tray or basket.\n\nChild-sized furniture matters more than people expect. A small table and chair, a low hook for their coat, and a step stool at the sink all say \"you can do this yourself.\" For project work, a defined space with washable surfaces lets you say yes to messy activities more often.";

const DEFAULT_REPLY: &str = "Thanks for your question! I can help with topics like toddler development, practical life activities, and setting up your home for independent play.\n\nCould you tell me a little more about your child's age and what you are noticing? The more specific the situation, the more specific I can be.";

/// Keyword-matched replies with a fixed artificial delay. Used when the
/// config selects the offline responder or the API is not wanted.
#[derive(Clone)]
pub struct OfflineResponder {
    delay: Duration,
}

impl OfflineResponder {
    pub fn new() -> Self {
        Self { delay: REPLY_DELAY }
    }

    #[cfg(test)]
    pub(crate) fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn reply(&self, message: &str) -> Result<String> {
        tokio::time::sleep(self.delay).await;
        Ok(lookup(message).to_string())
    }
}

impl Default for OfflineResponder {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks the canned paragraph for a message. First match in priority
/// order wins; matching is case-insensitive.
fn lookup(message: &str) -> &'static str {
    let message = message.to_lowercase();

    if message.contains("fine motor") || message.contains("motor skill") {
        FINE_MOTOR_REPLY
    } else if message.contains("biting") || message.contains("bite") {
        BITING_REPLY
    } else if message.contains("environment") || message.contains("project") {
        ENVIRONMENT_REPLY
    } else {
        DEFAULT_REPLY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fine_motor_keywords() {
        assert_eq!(lookup("How do I build fine motor skills?"), FINE_MOTOR_REPLY);
        assert_eq!(lookup("ideas for motor skill practice"), FINE_MOTOR_REPLY);
    }

    #[test]
    fn test_biting_keywords() {
        assert_eq!(lookup("What about biting?"), BITING_REPLY);
        assert_eq!(lookup("my son tried to bite me"), BITING_REPLY);
    }

    #[test]
    fn test_environment_keywords() {
        assert_eq!(lookup("setting up our environment"), ENVIRONMENT_REPLY);
        assert_eq!(lookup("a good art project for a rainy day"), ENVIRONMENT_REPLY);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(lookup("What about BITING?"), BITING_REPLY);
        assert_eq!(lookup("Fine Motor ideas please"), FINE_MOTOR_REPLY);
    }

    #[test]
    fn test_priority_order_on_multiple_matches() {
        // Fine motor outranks biting, biting outranks environment.
        assert_eq!(lookup("biting during fine motor work"), FINE_MOTOR_REPLY);
        assert_eq!(lookup("he bites during our art project"), BITING_REPLY);
    }

    #[test]
    fn test_unmatched_input_gets_default() {
        assert_eq!(lookup("hello there"), DEFAULT_REPLY);
        assert_eq!(lookup(""), DEFAULT_REPLY);
    }

    #[tokio::test]
    async fn test_reply_returns_exact_canned_text() {
        let responder = OfflineResponder::with_delay(Duration::ZERO);
        let reply = responder.reply("What about biting?").await.unwrap();
        assert_eq!(reply, BITING_REPLY);
    }
}
