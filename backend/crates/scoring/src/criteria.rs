//! Static CARE rubric reference data. Documentation only; the scorer does
//! not read it.

use serde::Serialize;

use crate::pillar::Pillar;

#[derive(Debug, Clone, Serialize)]
pub struct PillarCriteria {
    pub pillar: Pillar,
    pub description: &'static str,
    pub excellent: &'static [&'static str],
    pub good: &'static [&'static str],
    pub needs_improvement: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct CareCriteria {
    pub connection: PillarCriteria,
    pub analysis: PillarCriteria,
    pub resolution: PillarCriteria,
    pub engagement: PillarCriteria,
}

impl CareCriteria {
    pub fn for_pillar(&self, pillar: Pillar) -> &PillarCriteria {
        match pillar {
            Pillar::Connection => &self.connection,
            Pillar::Analysis => &self.analysis,
            Pillar::Resolution => &self.resolution,
            Pillar::Engagement => &self.engagement,
        }
    }
}

pub fn care_criteria() -> CareCriteria {
    CareCriteria {
        connection: PillarCriteria {
            pillar: Pillar::Connection,
            description: "Ability to build rapport, create a comfortable atmosphere and \
                          understand the lead's starting situation",
            excellent: &[
                "Warm, personalised greeting",
                "Shows genuine interest in the person",
                "Asks open questions about well-being",
                "Listens actively and shows empathy",
                "Creates a relaxed atmosphere",
            ],
            good: &[
                "Cordial greeting",
                "Shows basic interest",
                "Asks a few personal questions",
                "Listens adequately",
            ],
            needs_improvement: &[
                "Overly formal greeting",
                "Goes straight to business without rapport",
                "Shows no personal interest",
                "Does not listen actively",
            ],
        },
        analysis: PillarCriteria {
            pillar: Pillar::Analysis,
            description: "Depth of the investigation into the lead's pain points, needs, \
                          frustrations and goals",
            excellent: &[
                "Identifies specific pain points and frustrations",
                "Uncovers clear goals and motivations",
                "Explores physical-activity history",
                "Understands limitations and preferences",
                "Identifies decision factors",
            ],
            good: &[
                "Asks about goals",
                "Explores some basic pain points",
                "Asks about previous experience",
                "Identifies some preferences",
            ],
            needs_improvement: &[
                "Superficial questions",
                "Does not explore real pain points",
                "Assumes needs without investigating",
                "Does not uncover deeper motivations",
            ],
        },
        resolution: PillarCriteria {
            pillar: Pillar::Resolution,
            description: "Ability to present Gobatti Gym as the ideal solution to the \
                          problems identified",
            excellent: &[
                "Links benefits to specific pain points",
                "Presents personalised solutions",
                "Uses relevant success stories",
                "Shows what makes Gobatti unique",
                "Handles objections proactively",
            ],
            good: &[
                "Presents general benefits",
                "Links some solutions to needs",
                "Mentions the gym's differentiators",
                "Answers objections adequately",
            ],
            needs_improvement: &[
                "Generic presentation",
                "Does not connect to the lead's problems",
                "Focuses only on price and class types",
                "Does not address objections",
            ],
        },
        engagement: PillarCriteria {
            pillar: Pillar::Engagement,
            description: "Effectiveness in steering the lead to a clear, concrete next step",
            excellent: &[
                "Proposes a specific next step",
                "Books a concrete action (trial class)",
                "Creates appropriate urgency",
                "Confirms the lead's commitment",
                "Sets clear expectations",
            ],
            good: &[
                "Suggests next steps",
                "Tries to book an activity",
                "Creates some urgency",
                "Seeks confirmation",
            ],
            needs_improvement: &[
                "Proposes no next steps",
                "Leaves things undefined",
                "Creates no urgency",
                "Does not confirm commitment",
            ],
        },
    }
}
