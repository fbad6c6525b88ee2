//! Coaching Personas
//!
//! Each persona is an immutable record describing one coaching role: how it
//! presents itself, what it is trying to achieve, and the sampling parameters
//! used when the backend speaks as it. Personas are process-wide statics and
//! are only ever handed out by reference.

/// An immutable description of a coaching role.
#[derive(Debug, PartialEq)]
pub struct Persona {
    /// Display identity, also used as the speaker tag in session memory.
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
    pub temperature: f32,
}

impl Persona {
    /// Renders the system message sent ahead of every prompt for this persona.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are the {}.\nYour goal: {}\n{}",
            self.role, self.goal, self.backstory
        )
    }
}

const DEFAULT_TEMPERATURE: f32 = 0.4;

pub static STRUCTURE_COACH: Persona = Persona {
    role: "Pitch Structure Coach",
    goal: "Help founders define problem, solution, and UVP step by step",
    backstory: "A warm startup mentor helping founders craft investor-ready pitch structure.",
    temperature: DEFAULT_TEMPERATURE,
};

pub static MESSAGING_EXPERT: Persona = Persona {
    role: "Pitch Messaging Expert",
    goal: "Improve clarity, persuasiveness, and simplify AI concepts",
    backstory: "Expert at translating complex AI ideas into simple investor language.",
    temperature: DEFAULT_TEMPERATURE,
};

pub static INVESTOR_QA: Persona = Persona {
    role: "Investor Q&A Simulator",
    goal: "Simulate tough investor questions and objections",
    backstory: "Former VC partner who challenges founders with realistic questions.",
    temperature: DEFAULT_TEMPERATURE,
};

pub static ITERATION_COACH: Persona = Persona {
    role: "Pitch Iteration Coach",
    goal: "Encourage resubmission and track improvement across revisions",
    backstory: "Supportive pitch coach helping founders iterate confidently.",
    temperature: DEFAULT_TEMPERATURE,
};

/// Persona behind the one-shot polishing operation.
pub static PITCH_IMPROVER: Persona = Persona {
    role: "Pitch Improvement Coach",
    goal: "Rewrite user startup messages into clear, professional, investor-ready pitch \
           language without changing the original meaning.",
    backstory: "You are an expert startup pitch editor. Founders often speak in messy, \
                unstructured ways when recording voice notes. Your job is to polish their \
                exact message into something concise, confident, and professional while \
                keeping the same idea and intent.",
    temperature: DEFAULT_TEMPERATURE,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_mentions_role_and_goal() {
        let prompt = INVESTOR_QA.system_prompt();
        assert!(prompt.starts_with("You are the Investor Q&A Simulator."));
        assert!(prompt.contains(INVESTOR_QA.goal));
        assert!(prompt.contains(INVESTOR_QA.backstory));
    }

    #[test]
    fn test_roles_are_distinct() {
        let roles = [
            STRUCTURE_COACH.role,
            MESSAGING_EXPERT.role,
            INVESTOR_QA.role,
            ITERATION_COACH.role,
            PITCH_IMPROVER.role,
        ];
        for (i, a) in roles.iter().enumerate() {
            for b in &roles[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
