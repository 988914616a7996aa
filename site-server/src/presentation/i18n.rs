use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Lang {
    #[default]
    En,
    Ne,
}

impl Lang {
    /// Anything other than `ne` is English.
    pub(crate) fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("ne") => Lang::Ne,
            _ => Lang::En,
        }
    }

    pub(crate) fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ne => "ne",
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Ne => "नेपाली",
        }
    }

    pub(crate) fn copy(self) -> &'static SiteCopy {
        match self {
            Lang::En => &EN,
            Lang::Ne => &NE,
        }
    }

    pub(crate) const ALL: [Lang; 2] = [Lang::En, Lang::Ne];
}

/// `?lang=` query parameter shared by every page.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LangQuery {
    pub(crate) lang: Option<String>,
}

impl LangQuery {
    pub(crate) fn lang(&self) -> Lang {
        Lang::parse(self.lang.as_deref())
    }
}

pub(crate) struct Nav {
    pub(crate) home: &'static str,
    pub(crate) about: &'static str,
    pub(crate) blog: &'static str,
    pub(crate) contact: &'static str,
    pub(crate) admin: &'static str,
}

pub(crate) struct Cta {
    pub(crate) donate: &'static str,
    pub(crate) volunteer: &'static str,
}

pub(crate) struct Hero {
    pub(crate) title: &'static str,
    pub(crate) subtitle: &'static str,
    pub(crate) impact: &'static str,
}

pub(crate) struct Stats {
    pub(crate) confidence: &'static str,
    pub(crate) belonging: &'static str,
    pub(crate) continuation: &'static str,
    pub(crate) girls: &'static str,
}

pub(crate) struct Section {
    pub(crate) title: &'static str,
    pub(crate) body: &'static str,
}

pub(crate) struct ImpactTier {
    pub(crate) amount: &'static str,
    pub(crate) text: &'static str,
}

pub(crate) struct ImpactTiers {
    pub(crate) label: &'static str,
    pub(crate) items: [ImpactTier; 4],
}

pub(crate) struct Contact {
    pub(crate) title: &'static str,
    pub(crate) body: &'static str,
    pub(crate) email: &'static str,
}

pub(crate) struct SiteCopy {
    pub(crate) nav: Nav,
    pub(crate) cta: Cta,
    pub(crate) hero: Hero,
    pub(crate) stats: Stats,
    pub(crate) mission: Section,
    pub(crate) approach: Section,
    pub(crate) impact_tiers: ImpactTiers,
    pub(crate) contact: Contact,
    pub(crate) admin: Section,
    pub(crate) blog: Section,
}

static EN: SiteCopy = SiteCopy {
    nav: Nav {
        home: "Home",
        about: "About",
        blog: "Blog",
        contact: "Contact",
        admin: "Admin",
    },
    cta: Cta {
        donate: "Donate",
        volunteer: "Volunteer",
    },
    hero: Hero {
        title: "Creating safe, joyful spaces for children in Nepal",
        subtitle: "Inspired by Sujan and Ambika Karki, Bhanana builds places where every child can play, heal, and thrive through community, sport, and holistic care.",
        impact: "81% of children in our pilot reported higher self-confidence.",
    },
    stats: Stats {
        confidence: "81% gained self-confidence",
        belonging: "91% felt team belonging",
        continuation: "96% want to continue",
        girls: "77% participants are girls",
    },
    mission: Section {
        title: "Mission",
        body: "We partner with communities to create vibrant, inclusive environments that nurture each child's physical, mental, and emotional well-being, ensuring they feel seen, heard, and valued.",
    },
    approach: Section {
        title: "Our approach",
        body: "Play (including football), social-emotional and creative workshops, mindfulness, and mentorship with local leaders, tailored for every child and built to last.",
    },
    impact_tiers: ImpactTiers {
        label: "Your donation’s impact",
        items: [
            ImpactTier {
                amount: "$50",
                text: "Creative workshops that let children process feelings through art and play.",
            },
            ImpactTier {
                amount: "$100",
                text: "Sports equipment to build teamwork, movement, and confidence.",
            },
            ImpactTier {
                amount: "$500",
                text: "Training community members to provide ongoing mental health support.",
            },
            ImpactTier {
                amount: "$1000",
                text: "Safe zones for children affected by trauma: spaces for healing and growth.",
            },
        ],
    },
    contact: Contact {
        title: "Get in touch",
        body: "Want to collaborate, donate, or bring Bhanana to your community? Reach out.",
        email: "hello@bhanana.org",
    },
    admin: Section {
        title: "Admin",
        body: "Private area for managing content, programs, and impact updates. (Coming soon.)",
    },
    blog: Section {
        title: "Stories & updates",
        body: "We’ll share program learnings, community spotlights, and ways to get involved.",
    },
};

static NE: SiteCopy = SiteCopy {
    nav: Nav {
        home: "गृहपृष्ठ",
        about: "हाम्रो बारे",
        blog: "ब्लग",
        contact: "सम्पर्क",
        admin: "प्रशासन",
    },
    cta: Cta {
        donate: "दान गर्नुहोस्",
        volunteer: "स्वयंसेवक बनौं",
    },
    hero: Hero {
        title: "बालबालिकाका लागि सुरक्षित र खुसीको स्थानहरू",
        subtitle: "सुझन र अम्बिका कार्कीको सम्झनामा, भननाले समुदायसँग मिलेर खेलकुद, भावना, र सहायताबाट बच्चाहरूलाई खेल्न, निको हुन र फस्टाउन मद्दत गर्छ।",
        impact: "हाम्रो पाइलटमा ८१% बालबालिकाले आत्मविश्वास बढेको बताए।",
    },
    stats: Stats {
        confidence: "८१% ले आत्मविश्वास पाए",
        belonging: "९१% ले टोलीमा अपनत्व महसुस गरे",
        continuation: "९६% ले निरन्तरता चाहन्छन्",
        girls: "७७% सहभागी बालिका",
    },
    mission: Section {
        title: "हाम्रो मिशन",
        body: "हामी समुदायसँग साझेदारी गरेर बालबालिकाको शारीरिक, मानसिक र भावनात्मक कल्याणलाई समेट्ने र उनीहरूलाई देखिएको, सुनेको र मूल्यवान् महसुस हुने वातावरण बनाउँछौं।",
    },
    approach: Section {
        title: "हाम्रो विधि",
        body: "फुटबलसहित खेलकुद, सामाजिक-भावनात्मक र सिर्जनात्मक कार्यशाला, माइन्डफुलनेस, र स्थानीय नेतृत्वसँगको मार्गदर्शन, प्रत्येक बालबालिकाका लागि अनुरूप र दिगो।",
    },
    impact_tiers: ImpactTiers {
        label: "तपाईंको समर्थनको प्रभाव",
        items: [
            ImpactTier {
                amount: "$५०",
                text: "सिर्जनात्मक कार्यशाला जसले कला र खेलमार्फत भावना व्यक्त गर्न सुरक्षित स्थान दिन्छ।",
            },
            ImpactTier {
                amount: "$१००",
                text: "खेलकुद सामग्री, टोली भावना र आत्मविश्वासका लागि।",
            },
            ImpactTier {
                amount: "$५००",
                text: "समुदायका सदस्यहरूलाई मानसिक स्वास्थ्य सहयोग दिन तालिम।",
            },
            ImpactTier {
                amount: "$१०००",
                text: "आघातबाट प्रभावित बालबालिकाका लागि सुरक्षित क्षेत्र, उपचार र विकासका लागि।",
            },
        ],
    },
    contact: Contact {
        title: "सम्पर्क",
        body: "सहयोग, दान, वा आफ्नो समुदायमा भनना ल्याउन चाहनुहुन्छ? हामीलाई लेख्नुहोस्।",
        email: "hello@bhanana.org",
    },
    admin: Section {
        title: "प्रशासन",
        body: "समग्री, कार्यक्रम, र प्रभाव अद्यावधिक व्यवस्थापन गर्ने निजी क्षेत्र। (चाँडै आउँदैछ।)",
    },
    blog: Section {
        title: "कथा र अद्यावधिक",
        body: "हामी कार्यक्रमका सिकाइ, समुदायको प्रकाश, र सहभागी हुने तरिकाहरू साझा गर्नेछौं।",
    },
};
