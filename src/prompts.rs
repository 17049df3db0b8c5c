//! Sample sentences offered to Create Mode users, from clear-cut to tricky.

pub const SAMPLE_PROMPTS: [&str; 16] = [
    // clear emotions
    "I can't believe I won the lottery!",
    "My best friend is moving to another country and I'm heartbroken.",
    "That huge spider in my room absolutely terrified me!",
    "I'm so frustrated that someone ate my lunch again!",
    "I love spending cozy evenings with my family.",
    // subtle emotions
    "The test results come out tomorrow...",
    "My birthday party is next week!!!",
    "What? You're telling me school is canceled?",
    "I'm not worried about the presentation anymore.",
    "The thunder is so loud outside right now.",
    // complex scenarios
    "I failed my driving test but I'll try again next month.",
    "Wow, I never expected to see you here!",
    "I'm not afraid of the dark like I used to be.",
    "This homework is absolutely impossible to finish.",
    "My dog has been missing for three days now.",
    "Seriously? They cancelled the trip again?",
];

/// The first `n` prompts (all of them when `n` is larger).
pub fn sample_prompts(n: usize) -> &'static [&'static str] {
    &SAMPLE_PROMPTS[..n.min(SAMPLE_PROMPTS.len())]
}
