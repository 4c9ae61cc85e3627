//! Static 1980s culture reference content

/// One reference card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CultureEntry {
    pub title: &'static str,
    pub description: &'static str,
}

/// A tab of reference cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CultureSection {
    Yuppies,
    Art,
    Tech,
    Lifestyle,
}

impl CultureSection {
    pub const ALL: [CultureSection; 4] = [
        CultureSection::Yuppies,
        CultureSection::Art,
        CultureSection::Tech,
        CultureSection::Lifestyle,
    ];

    /// Short tab label
    pub fn label(self) -> &'static str {
        match self {
            CultureSection::Yuppies => "YUPPIES",
            CultureSection::Art => "ART",
            CultureSection::Tech => "TECH",
            CultureSection::Lifestyle => "LIFESTYLE",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            CultureSection::Yuppies => "THE YUPPIE PHENOMENON",
            CultureSection::Art => "ARTISTIC INFLUENCES",
            CultureSection::Tech => "TECHNOLOGY REVOLUTION",
            CultureSection::Lifestyle => "LIFESTYLE & CULTURE",
        }
    }

    pub fn entries(self) -> &'static [CultureEntry] {
        match self {
            CultureSection::Yuppies => YUPPIES,
            CultureSection::Art => ART,
            CultureSection::Tech => TECH,
            CultureSection::Lifestyle => LIFESTYLE,
        }
    }

    /// Look a section up by its label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|section| section.label().eq_ignore_ascii_case(s))
    }
}

const fn entry(title: &'static str, description: &'static str) -> CultureEntry {
    CultureEntry { title, description }
}

const YUPPIES: &[CultureEntry] = &[
    entry(
        "Young Urban Professional",
        "The Yuppie (Young Urban Professional) was a cultural archetype of the 1980s, characterized by materialism, career ambition, and conspicuous consumption.",
    ),
    entry(
        "Material Success",
        "Yuppies were known for their expensive cars, designer clothes, and luxury apartments. They represented the American Dream of upward mobility.",
    ),
    entry(
        "Career Focus",
        "Work became central to identity, with long hours and high stress seen as badges of honor. The 'work hard, play hard' ethic emerged.",
    ),
    entry(
        "Cultural Impact",
        "Yuppies influenced fashion, music, and lifestyle trends. They were both celebrated and satirized in popular culture.",
    ),
];

const ART: &[CultureEntry] = &[
    entry(
        "Frank Frazetta",
        "Master of fantasy and science fiction art. His Conan the Barbarian covers defined sword and sorcery aesthetics for generations.",
    ),
    entry(
        "Norman Rockwell",
        "American illustrator whose work captured the essence of American life and values. His Saturday Evening Post covers became cultural touchstones.",
    ),
    entry(
        "Pop Art Movement",
        "Art that drew inspiration from commercial culture and mass media. Andy Warhol and others blurred the line between high and low art.",
    ),
    entry(
        "Digital Art Emergence",
        "The 1980s saw the rise of computer-generated art and digital design, marking the beginning of the digital art revolution.",
    ),
];

const TECH: &[CultureEntry] = &[
    entry(
        "Personal Computers",
        "The rise of home computers like the Apple II, Commodore 64, and IBM PC brought computing power to everyday people.",
    ),
    entry(
        "Arcade Gaming",
        "Arcades were social hubs where games like Galaga, Pac-Man, and Space Invaders created a new form of entertainment.",
    ),
    entry(
        "Cellular Phones",
        "The first mobile phones appeared, though they were large and expensive. They symbolized the future of communication.",
    ),
    entry(
        "VHS and Home Video",
        "The VCR revolutionized home entertainment, allowing people to watch movies at home and record television shows.",
    ),
];

const LIFESTYLE: &[CultureEntry] = &[
    entry(
        "Fitness Craze",
        "Aerobics, jogging, and health clubs became popular. Jane Fonda's workout videos were cultural phenomena.",
    ),
    entry(
        "Shopping Malls",
        "Malls became the new town squares, offering shopping, entertainment, and social gathering spaces.",
    ),
    entry(
        "Fast Food Culture",
        "McDonald's, Burger King, and other chains expanded rapidly, changing American eating habits.",
    ),
    entry(
        "Television Dominance",
        "MTV launched in 1981, revolutionizing music and youth culture. Cable TV expanded entertainment options.",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_has_four_entries() {
        for section in CultureSection::ALL {
            assert_eq!(section.entries().len(), 4, "{}", section.label());
        }
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(CultureSection::parse("tech"), Some(CultureSection::Tech));
        assert_eq!(CultureSection::parse("Lifestyle "), Some(CultureSection::Lifestyle));
        assert_eq!(CultureSection::parse("music"), None);
    }
}
