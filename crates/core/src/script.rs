//! The fixed coaching script every session walks through.

use crate::memory::Memory;
use crate::persona::{INVESTOR_QA, ITERATION_COACH, MESSAGING_EXPERT, Persona, STRUCTURE_COACH};

/// One scripted interaction: a persona and the instructions it is given.
#[derive(Debug)]
pub struct Step {
    pub persona: &'static Persona,
    pub template: &'static str,
}

impl Step {
    /// Builds the full prompt for this step from the conversation so far.
    ///
    /// The entire memory is embedded verbatim ahead of the step's own
    /// instructions; nothing is summarised or dropped.
    pub fn render_prompt(&self, memory: &Memory) -> String {
        format!(
            "Conversation so far:\n{}\n\n{}",
            memory.render(),
            self.template
        )
    }
}

pub static COACHING_SCRIPT: [Step; 6] = [
    Step {
        persona: &STRUCTURE_COACH,
        template: "You are the Pitch Structure Coach.\n\n\
                   Ask the founder ONE question:\n\
                   - What is the core problem?\n\
                   Be supportive and warm.\n\
                   Wait for their reply.",
    },
    Step {
        persona: &STRUCTURE_COACH,
        template: "Great. Now ask ONE question:\n\
                   - What is your AI solution and why is it unique?\n\
                   Wait for reply.",
    },
    Step {
        persona: &MESSAGING_EXPERT,
        template: "Analyze the founder's pitch so far.\n\n\
                   1. Give 2 actionable improvements on clarity + persuasiveness.\n\
                   2. Rewrite their pitch in a stronger investor-friendly way.\n\
                   Then ask: \"Does this feel accurate?\"",
    },
    Step {
        persona: &INVESTOR_QA,
        template: "Simulate ONE tough investor question based on the startup idea.\n\
                   Make it realistic and challenging.\n\
                   Wait for founder response.",
    },
    Step {
        persona: &INVESTOR_QA,
        template: "Give feedback on the founder's answer:\n\
                   - confidence\n\
                   - conciseness\n\
                   - strength\n\n\
                   Then ask ONE follow-up investor objection.\n\
                   Wait for reply.",
    },
    Step {
        persona: &ITERATION_COACH,
        template: "Encourage iteration.\n\n\
                   1. Highlight what improved.\n\
                   2. Suggest the next pitch refinement.\n\
                   Ask the founder to resubmit their updated pitch in one sentence.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Turn;

    #[test]
    fn test_script_persona_order() {
        let roles: Vec<&str> = COACHING_SCRIPT.iter().map(|s| s.persona.role).collect();
        assert_eq!(
            roles,
            vec![
                "Pitch Structure Coach",
                "Pitch Structure Coach",
                "Pitch Messaging Expert",
                "Investor Q&A Simulator",
                "Investor Q&A Simulator",
                "Pitch Iteration Coach",
            ]
        );
    }

    #[test]
    fn test_render_prompt_embeds_memory_before_template() {
        let mut memory = Memory::default();
        memory.push(Turn::founder("We sell shovels"));
        memory.push(Turn::coach("Pitch Structure Coach", "Why shovels?"));

        let prompt = COACHING_SCRIPT[1].render_prompt(&memory);

        let history_at = prompt.find("We sell shovels").unwrap();
        let question_at = prompt.find("Why shovels?").unwrap();
        let template_at = prompt.find(COACHING_SCRIPT[1].template).unwrap();
        assert!(prompt.starts_with("Conversation so far:\n"));
        assert!(history_at < question_at);
        assert!(question_at < template_at);
    }
}
