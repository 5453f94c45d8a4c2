//! Responsible-tourism guide content

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GuideTip {
    pub heading: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GuideSection {
    pub title: &'static str,
    pub tips: &'static [GuideTip],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResponsibleTourismGuide {
    pub title: &'static str,
    pub introduction: &'static str,
    pub sections: &'static [GuideSection],
    pub closing_note: &'static str,
}

const SECTIONS: &[GuideSection] = &[
    GuideSection {
        title: "Respect Local Culture & Traditions",
        tips: &[
            GuideTip {
                heading: "Dress Appropriately",
                text: "Especially when visiting religious sites.",
            },
            GuideTip {
                heading: "Ask for Permission",
                text: "Before taking photos of people.",
            },
            GuideTip {
                heading: "Learn Basic Phrases",
                text: "A few words in the local language can go a long way.",
            },
            GuideTip {
                heading: "Support Local Artisans",
                text: "Buy directly from craftspeople to ensure fair wages.",
            },
        ],
    },
    GuideSection {
        title: "Support Local Economies",
        tips: &[
            GuideTip {
                heading: "Choose Local Businesses",
                text: "Stay in locally-owned guesthouses, eat at local restaurants.",
            },
            GuideTip {
                heading: "Hire Local Guides",
                text: "They provide authentic insights and direct income to the community.",
            },
            GuideTip {
                heading: "Buy Local Products",
                text: "Look for locally sourced goods and handicrafts.",
            },
        ],
    },
    GuideSection {
        title: "Minimize Environmental Impact",
        tips: &[
            GuideTip {
                heading: "Reduce, Reuse, Recycle",
                text: "Carry a reusable water bottle and avoid single-use plastics.",
            },
            GuideTip {
                heading: "Dispose of Waste Properly",
                text: "Don't litter, especially in natural areas.",
            },
            GuideTip {
                heading: "Conserve Resources",
                text: "Be mindful of water and energy usage.",
            },
            GuideTip {
                heading: "Stick to Marked Trails",
                text: "When hiking or exploring natural areas.",
            },
        ],
    },
    GuideSection {
        title: "Be Mindful of Wildlife",
        tips: &[
            GuideTip {
                heading: "Observe from a Distance",
                text: "Do not disturb animals in their natural habitat.",
            },
            GuideTip {
                heading: "Avoid Animal Exploitation",
                text: "Say no to elephant rides, snake charmers, or other activities that might harm animals.",
            },
        ],
    },
];

pub const GUIDE: ResponsibleTourismGuide = ResponsibleTourismGuide {
    title: "Responsible Tourism Guide",
    introduction: "Welcome to our guide on how to travel responsibly in India!",
    sections: SECTIONS,
    closing_note: "Your journey can make a positive impact! Travel thoughtfully.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guide_has_four_sections() {
        assert_eq!(GUIDE.sections.len(), 4);
        assert!(GUIDE.sections.iter().all(|s| !s.tips.is_empty()));
    }
}
