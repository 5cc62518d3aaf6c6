//! Prompt building functions for LLM requests
//!
//! Every prompt the pipeline sends is assembled here, so the exact
//! wording of rubrics, prohibitions and JSON contracts lives in one
//! place.

use crate::domain::value_objects::{ScenePlan, StoryCategory, StoryConfig, StoryOutline};

/// Build the single-word moral safety classification prompt
///
/// The model is instructed to answer with exactly SAFE or UNSAFE; the
/// caller treats anything that does not begin with SAFE as unsafe.
pub fn build_moral_classifier_prompt(moral: &str, age: u8) -> String {
    let mut prompt = String::new();

    prompt.push_str("You are a safety and ethics classifier for children's bedtime story morals.\n\n");
    prompt.push_str(&format!(
        "A parent has requested the following moral/lesson for a story intended for a child \
         who is {} years old (between 5 and 10):\n\n",
        age
    ));
    prompt.push_str(&format!("MORAL:\n\"\"\"{}\"\"\"\n\n", moral));
    prompt.push_str(
        "Your task:\n\
         - Decide if this moral is SAFE and AGE-APPROPRIATE for a 5-10 year old child.\n\
         - A safe moral emphasizes positive traits such as kindness, empathy, cooperation, \
         honesty, curiosity, patience, courage, self-acceptance, responsibility, or gentle \
         resilience.\n\
         - A moral is UNSAFE if it encourages harm, hatred, exclusion, bullying, cruelty, \
         risky or illegal behavior, unhealthy relationships, self-blame, extreme \
         self-sacrifice, or anything that could be psychologically harmful or confusing to \
         a young child.\n\n",
    );
    prompt.push_str("Return EXACTLY ONE WORD (no explanation):\nSAFE\nor\nUNSAFE\n");

    prompt
}

/// System prompt for the outline planning call
pub fn build_outline_system_prompt() -> String {
    "You are an expert planner of bedtime stories for young children. \
     You always answer with a single strict JSON object and nothing else: \
     no prose, no markdown, no explanation."
        .to_string()
}

/// Build the outline planning prompt
///
/// Asks for a JSON object conforming exactly to the `StoryOutline`
/// shape, mapping the fixed six-act structure across `target_scenes`
/// scenes.
pub fn build_outline_prompt(
    config: &StoryConfig,
    category: StoryCategory,
    moral: &str,
    target_scenes: u32,
    target_words: u32,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "Plan a bedtime story for a child who is {} years old (ages 5-10).\n\n",
        config.age
    ));
    prompt.push_str(&format!("STORY REQUEST:\n\"\"\"{}\"\"\"\n\n", config.themes));
    prompt.push_str(&format!("CATEGORY: {}\n\n", category.label()));
    prompt.push_str(&format!("DESIRED MORAL / LESSON:\n\"\"\"{}\"\"\"\n", moral));
    prompt.push_str(
        "The story should embody this moral through the actions, choices, and growth of the \
         main character. Do not lecture; the main character learns the moral themselves \
         through the challenge.\n\n",
    );

    prompt.push_str("LENGTH:\n");
    prompt.push_str(&format!(
        "- The full story should take about {} minutes to read aloud (~{} words total).\n",
        config.length_minutes, target_words
    ));
    prompt.push_str(&format!(
        "- Split it into exactly {} scenes and divide the word budget between them.\n\n",
        target_scenes
    ));

    prompt.push_str("STRUCTURE:\n");
    prompt.push_str(
        "Map this six-act structure across the scenes, in order:\n\
          1. Setup: introduce the main character, the setting, and what they want.\n\
         2. Inciting incident: something small and unexpected sparks curiosity.\n\
         3. Rising action: the character learns something new, meets someone helpful, faces a gentle challenge.\n\
         4. Turning point: the moment of insight, connection, or emotional discovery.\n\
         5. Resolution: the challenge resolves and the moral lands through the character's growth.\n\
         6. Denouement: a sleepy landing where the world grows quiet, cozy, and calm.\n",
    );
    prompt.push_str(
        "The FINAL scene must be a calming, sleep-priming ending that settles the child \
         toward sleep.\n\n",
    );

    prompt.push_str("OUTPUT FORMAT:\n");
    prompt.push_str(
        "Return ONLY a JSON object with this exact shape:\n\
         {\n\
         \x20 \"title\": \"...\",\n\
         \x20 \"setting\": \"...\",\n\
         \x20 \"main_characters\": [{\"name\": \"...\", \"description\": \"...\"}],\n\
         \x20 \"scenes\": [{\"id\": 1, \"summary\": \"...\", \"goal\": \"...\", \"target_word_count\": 200}]\n\
         }\n",
    );
    prompt.push_str(&format!(
        "Scene ids are 1 through {} in narrative order.\n",
        target_scenes
    ));

    prompt
}

/// System prompt for the scene prose call
pub fn build_scene_system_prompt() -> String {
    "You are an expert fiction writer for young children. You write warm, sensory-rich, \
     gentle prose with simple sentence structures. You write the scene text only: no \
     headings, no scene numbers, no notes."
        .to_string()
}

/// Build the prose prompt for one planned scene
///
/// `is_retry` adds the gentler-rendering instruction used after a
/// failed safety check.
pub fn build_scene_prompt(
    outline: &StoryOutline,
    scene: &ScenePlan,
    config: &StoryConfig,
    is_retry: bool,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "Write one scene of a bedtime story for a child who is {} years old (ages 5-10).\n\n",
        config.age
    ));
    prompt.push_str(&format!("STORY TITLE: {}\n", outline.title));
    prompt.push_str(&format!("SETTING: {}\n", outline.setting));

    if !outline.main_characters.is_empty() {
        prompt.push_str("CHARACTERS:\n");
        for character in &outline.main_characters {
            prompt.push_str(&format!("- {}: {}\n", character.name, character.description));
        }
    }
    prompt.push('\n');

    prompt.push_str(&format!("SCENE {} OF {}\n", scene.id, outline.scenes.len()));
    prompt.push_str(&format!("WHAT HAPPENS: {}\n", scene.summary));
    prompt.push_str(&format!("NARRATIVE GOAL: {}\n", scene.goal));
    prompt.push_str(&format!(
        "LENGTH: about {} words.\n\n",
        scene.target_word_count
    ));

    prompt.push_str(
        "Connect naturally to the previous scene and leave a gentle opening for the next.\n\n",
    );

    prompt.push_str("SAFETY REQUIREMENTS:\n");
    prompt.push_str(
        "- No violence, no gore, no abuse, no self-harm, no sexual content, no graphic \
         medical detail.\n\
         - No scary imagery and no anxiety-inducing tension.\n\
         - Keep the emotional atmosphere calm, gentle, and reassuring.\n",
    );

    if is_retry {
        prompt.push_str(
            "\nIMPORTANT: a previous rendering of this scene was flagged as not \
             age-appropriate. Rewrite it noticeably GENTLER and more comforting: soften any \
             conflict, slow the pacing, and favor warm, soothing imagery.\n",
        );
    }

    prompt.push_str("\nWrite the scene now:\n");

    prompt
}

/// Build the scene safety classification prompt
///
/// The model must answer with a strict JSON object matching the
/// `SafetyReport` shape.
pub fn build_safety_prompt(text: &str, age: u8) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are a strict, detail-oriented safety classifier for children's bedtime \
         stories.\n",
    );
    prompt.push_str(&format!(
        "Evaluate whether the following scene is safe and appropriate for a child who is {} \
         years old (between 5 and 10).\n\n",
        age
    ));
    prompt.push_str(&format!("SCENE TEXT:\n\"\"\"{}\"\"\"\n\n", text));

    prompt.push_str("Classify the scene along these axes:\n");
    prompt.push_str(
        "- violence: one of \"none\", \"mild\", \"moderate\", \"severe\"\n\
         - fear_level: one of \"calm\", \"slightly_spooky\", \"scary\"\n\
         - medical_misinformation: one of \"none\", \"possible\", \"present\"\n\
         - sexual_content: one of \"none\", \"present\"\n\
         - overall_safe_for_age: true or false\n\
         - reasons: a list of short strings explaining the verdict\n\n",
    );

    prompt.push_str(
        "Return ONLY a JSON object with exactly those six fields and the listed values. No \
         prose, no markdown.\n",
    );

    prompt
}
