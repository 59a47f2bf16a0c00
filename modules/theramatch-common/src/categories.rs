//! Static filter-id → label table for the attributes the assistant can apply.

use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryGroup {
    Common,
    Gender,
    SessionType,
    Specialty,
    Insurance,
    TherapyType,
    Age,
    Ethnicity,
    Sexuality,
    Language,
    Faith,
}

impl std::fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryGroup::Common => write!(f, "Common Filters"),
            CategoryGroup::Gender => write!(f, "Gender"),
            CategoryGroup::SessionType => write!(f, "Session Type"),
            CategoryGroup::Specialty => write!(f, "Specialties"),
            CategoryGroup::Insurance => write!(f, "Insurance"),
            CategoryGroup::TherapyType => write!(f, "Types of Therapy"),
            CategoryGroup::Age => write!(f, "Age"),
            CategoryGroup::Ethnicity => write!(f, "Ethnicity"),
            CategoryGroup::Sexuality => write!(f, "Sexuality"),
            CategoryGroup::Language => write!(f, "Language"),
            CategoryGroup::Faith => write!(f, "Faith"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCategory {
    pub id: u32,
    pub label: &'static str,
    pub group: CategoryGroup,
}

const fn cat(id: u32, label: &'static str, group: CategoryGroup) -> FilterCategory {
    FilterCategory { id, label, group }
}

const CATEGORIES: &[FilterCategory] = &[
    // Common Filters
    cat(6, "ADHD", CategoryGroup::Common),
    cat(3, "Anxiety", CategoryGroup::Common),
    cat(1201, "Couples Counselling", CategoryGroup::Common),
    cat(2, "Depression", CategoryGroup::Common),
    cat(301, "EMDR", CategoryGroup::Common),
    cat(1200, "Marriage Counselling", CategoryGroup::Common),
    cat(326, "Teen", CategoryGroup::Common),
    cat(19, "Trauma and PTSD", CategoryGroup::Common),
    // Gender
    cat(1001, "Female", CategoryGroup::Gender),
    cat(1002, "Male", CategoryGroup::Gender),
    cat(1712, "Non-Binary", CategoryGroup::Gender),
    // Session Type
    cat(1995, "In Person (Session Type)", CategoryGroup::SessionType),
    cat(595, "Online (Session Type)", CategoryGroup::SessionType),
    cat(1996, "Available (Session Type)", CategoryGroup::SessionType),
    // Specialties
    cat(4, "Addiction", CategoryGroup::Specialty),
    cat(180, "Adoption", CategoryGroup::Specialty),
    cat(248, "Alcohol Use", CategoryGroup::Specialty),
    cat(166, "Anger Management", CategoryGroup::Specialty),
    cat(167, "Autism", CategoryGroup::Specialty),
    cat(195, "Behavioural Issues", CategoryGroup::Specialty),
    cat(168, "Bipolar Disorder", CategoryGroup::Specialty),
    cat(1703, "Body Positivity", CategoryGroup::Specialty),
    cat(196, "Borderline Personality (BPD)", CategoryGroup::Specialty),
    cat(267, "Cancer", CategoryGroup::Specialty),
    cat(183, "Career Guidance", CategoryGroup::Specialty),
    cat(5, "Child", CategoryGroup::Specialty),
    cat(636, "Chronic Illness", CategoryGroup::Specialty),
    cat(7, "Chronic Pain", CategoryGroup::Specialty),
    cat(503, "Codependency", CategoryGroup::Specialty),
    cat(193, "Dementia", CategoryGroup::Specialty),
    cat(20, "Dissociative Disorders (DID)", CategoryGroup::Specialty),
    cat(26, "Divorce", CategoryGroup::Specialty),
    cat(8, "Domestic Abuse", CategoryGroup::Specialty),
    cat(253, "Drug Abuse", CategoryGroup::Specialty),
    cat(263, "Dual Diagnosis", CategoryGroup::Specialty),
    cat(9, "Eating Disorders", CategoryGroup::Specialty),
    cat(184, "Education and Learning Disabilities", CategoryGroup::Specialty),
    cat(1997, "First Responders", CategoryGroup::Specialty),
    cat(254, "Gambling", CategoryGroup::Specialty),
    cat(10, "Geriatric and Seniors", CategoryGroup::Specialty),
    cat(14, "Grief", CategoryGroup::Specialty),
    cat(646, "Hoarding", CategoryGroup::Specialty),
    cat(12, "Infertility", CategoryGroup::Specialty),
    cat(551, "Infidelity", CategoryGroup::Specialty),
    cat(264, "Intellectual Disability", CategoryGroup::Specialty),
    cat(202, "Internet Addiction", CategoryGroup::Specialty),
    cat(13, "Life Coaching", CategoryGroup::Specialty),
    cat(259, "Medical Detox", CategoryGroup::Specialty),
    cat(258, "Medication Management", CategoryGroup::Specialty),
    cat(576, "Men's Issues", CategoryGroup::Specialty),
    cat(203, "Narcissistic Personality (NPD)", CategoryGroup::Specialty),
    cat(255, "Obesity", CategoryGroup::Specialty),
    cat(15, "Obsessive-Compulsive (OCD)", CategoryGroup::Specialty),
    cat(1704, "Open Relationships Non-Monogamy", CategoryGroup::Specialty),
    cat(204, "Oppositional Defiance (ODD)", CategoryGroup::Specialty),
    cat(16, "Parenting", CategoryGroup::Specialty),
    cat(22, "Personality Disorders", CategoryGroup::Specialty),
    cat(578, "Pregnancy, Prenatal, Postpartum", CategoryGroup::Specialty),
    cat(23, "Psychosis", CategoryGroup::Specialty),
    cat(584, "Racial Identity", CategoryGroup::Specialty),
    cat(1, "Relationship Issues", CategoryGroup::Specialty),
    cat(260, "Self Esteem", CategoryGroup::Specialty),
    cat(283, "Self-Harming", CategoryGroup::Specialty),
    cat(17, "Sex Therapy", CategoryGroup::Specialty),
    cat(1705, "Sex-Positive, Kink Allied", CategoryGroup::Specialty),
    cat(256, "Sexual Abuse", CategoryGroup::Specialty),
    cat(257, "Sexual Addiction", CategoryGroup::Specialty),
    cat(190, "Sleep or Insomnia", CategoryGroup::Specialty),
    cat(18, "Spirituality", CategoryGroup::Specialty),
    cat(597, "Sports Performance", CategoryGroup::Specialty),
    cat(632, "Stress", CategoryGroup::Specialty),
    cat(182, "Substance Use", CategoryGroup::Specialty),
    cat(205, "Suicidal Ideation", CategoryGroup::Specialty),
    cat(177, "Testing and Evaluation", CategoryGroup::Specialty),
    cat(187, "Transgender", CategoryGroup::Specialty),
    cat(206, "Traumatic Brain Injury (TBI)", CategoryGroup::Specialty),
    cat(510, "Veterans", CategoryGroup::Specialty),
    cat(207, "Video Game Addiction", CategoryGroup::Specialty),
    cat(262, "Weight Loss", CategoryGroup::Specialty),
    cat(575, "Women's Issues", CategoryGroup::Specialty),
    // Insurance
    cat(415, "Aetna", CategoryGroup::Insurance),
    cat(1934, "Alberta Blue Cross", CategoryGroup::Insurance),
    cat(416, "Alliance", CategoryGroup::Insurance),
    cat(1939, "Arete", CategoryGroup::Insurance),
    cat(1947, "ASEBP | Alberta School Employee", CategoryGroup::Insurance),
    cat(590, "Blue Cross", CategoryGroup::Insurance),
    cat(592, "Blue Shield", CategoryGroup::Insurance),
    cat(423, "BlueCross BlueShield", CategoryGroup::Insurance),
    cat(1937, "Canada Life | Great-West Life", CategoryGroup::Insurance),
    cat(1988, "Chambers of Commerce", CategoryGroup::Insurance),
    cat(1989, "CINUP", CategoryGroup::Insurance),
    cat(431, "ComPsych", CategoryGroup::Insurance),
    cat(1940, "Crime Victim (CVAP/VQRP/IVAC)", CategoryGroup::Insurance),
    cat(1935, "Desjardins", CategoryGroup::Insurance),
    cat(513, "Empire Blue Cross Blue Shield", CategoryGroup::Insurance),
    cat(1933, "Equitable Life of Canada", CategoryGroup::Insurance),
    cat(1946, "First Canadian Health", CategoryGroup::Insurance),
    cat(434, "First Choice Health | FCH", CategoryGroup::Insurance),
    cat(437, "Great-West Life", CategoryGroup::Insurance),
    cat(561, "Green Shield Canada", CategoryGroup::Insurance),
    cat(438, "Guardian", CategoryGroup::Insurance),
    cat(440, "Health Net", CategoryGroup::Insurance),
    cat(1824, "Homewood Health", CategoryGroup::Insurance),
    cat(445, "Humana", CategoryGroup::Insurance),
    cat(1949, "iA Financial | Industrial Alliance", CategoryGroup::Insurance),
    cat(1823, "Insurance Corporation of British Columbia", CategoryGroup::Insurance),
    cat(1991, "Johnson Health Plan", CategoryGroup::Insurance),
    cat(1987, "Johnston Group", CategoryGroup::Insurance),
    cat(449, "LifeWise", CategoryGroup::Insurance),
    cat(642, "Manulife", CategoryGroup::Insurance),
    cat(1990, "Maximum Benefit", CategoryGroup::Insurance),
    cat(1826, "Medavie Blue Cross", CategoryGroup::Insurance),
    cat(456, "Medicare", CategoryGroup::Insurance),
    cat(549, "Meridian", CategoryGroup::Insurance),
    cat(526, "Military OneSource", CategoryGroup::Insurance),
    cat(458, "MultiPlan", CategoryGroup::Insurance),
    cat(1932, "Non-Insured Health | First Nations", CategoryGroup::Insurance),
    cat(638, "Pacific Blue Cross", CategoryGroup::Insurance),
    cat(1950, "RCMP | Royal Canadian Mounted Police", CategoryGroup::Insurance),
    cat(543, "Sentara Health Plans", CategoryGroup::Insurance),
    cat(640, "SunLife", CategoryGroup::Insurance),
    cat(1822, "TELUS Health", CategoryGroup::Insurance),
    cat(1943, "The Co-operators", CategoryGroup::Insurance),
    cat(473, "UHC UnitedHealthcare | UBH United Behavioral Health", CategoryGroup::Insurance),
    cat(1948, "Veterans Affairs Canada (VAC)", CategoryGroup::Insurance),
    cat(1938, "WSIB | Workplace Safety Insurance Board", CategoryGroup::Insurance),
    // Types of Therapy
    cat(293, "Cognitive Behavioural (CBT)", CategoryGroup::TherapyType),
    cat(495, "Trauma Focused", CategoryGroup::TherapyType),
    cat(1203, "Family Therapy", CategoryGroup::TherapyType),
    cat(630, "Strength-Based", CategoryGroup::TherapyType),
    cat(628, "Person-Centered", CategoryGroup::TherapyType),
    // Age
    cat(329, "Toddler", CategoryGroup::Age),
    cat(325, "Children (6 to 10)", CategoryGroup::Age),
    cat(330, "Preteen", CategoryGroup::Age),
    cat(327, "Adults", CategoryGroup::Age),
    cat(328, "Elders (65+)", CategoryGroup::Age),
    // Ethnicity
    cat(335, "Asian", CategoryGroup::Ethnicity),
    cat(334, "Black", CategoryGroup::Ethnicity),
    cat(337, "Indigenous Peoples", CategoryGroup::Ethnicity),
    cat(336, "Hispanic and Latino", CategoryGroup::Ethnicity),
    cat(338, "Pacific Islander", CategoryGroup::Ethnicity),
    // Sexuality
    cat(185, "Bisexual", CategoryGroup::Sexuality),
    cat(186, "Lesbian", CategoryGroup::Sexuality),
    cat(172, "LGBTQ+", CategoryGroup::Sexuality),
    // Language
    cat(341, "Arabic", CategoryGroup::Language),
    cat(364, "Armenian", CategoryGroup::Language),
    cat(359, "Bosnian", CategoryGroup::Language),
    cat(342, "Cantonese", CategoryGroup::Language),
    cat(360, "Croatian", CategoryGroup::Language),
    cat(366, "Farsi", CategoryGroup::Language),
    cat(354, "Filipino", CategoryGroup::Language),
    cat(344, "French", CategoryGroup::Language),
    cat(345, "German", CategoryGroup::Language),
    cat(355, "Greek", CategoryGroup::Language),
    cat(365, "Gujarati", CategoryGroup::Language),
    cat(1848, "Haitian Creole", CategoryGroup::Language),
    cat(346, "Hebrew", CategoryGroup::Language),
    cat(347, "Hindi", CategoryGroup::Language),
    cat(579, "Hungarian", CategoryGroup::Language),
    cat(348, "Italian", CategoryGroup::Language),
    cat(356, "Japanese", CategoryGroup::Language),
    cat(357, "Korean", CategoryGroup::Language),
    cat(343, "Mandarin", CategoryGroup::Language),
    cat(367, "Polish", CategoryGroup::Language),
    cat(349, "Portuguese", CategoryGroup::Language),
    cat(350, "Punjabi", CategoryGroup::Language),
    cat(369, "Romanian", CategoryGroup::Language),
    cat(351, "Russian", CategoryGroup::Language),
    cat(361, "Serbian", CategoryGroup::Language),
    cat(340, "Sign Language (ASL)", CategoryGroup::Language),
    cat(352, "Sinhalese", CategoryGroup::Language),
    cat(353, "Spanish", CategoryGroup::Language),
    cat(1733, "Tamil", CategoryGroup::Language),
    cat(372, "Turkish", CategoryGroup::Language),
    cat(368, "Ukrainian", CategoryGroup::Language),
    cat(370, "Urdu", CategoryGroup::Language),
    cat(363, "Vietnamese", CategoryGroup::Language),
    // Faith
    cat(404, "Buddhist", CategoryGroup::Faith),
    cat(405, "Christian", CategoryGroup::Faith),
    cat(598, "Hindu", CategoryGroup::Faith),
    cat(407, "Jewish", CategoryGroup::Faith),
    cat(406, "Muslim", CategoryGroup::Faith),
    cat(1970, "Secular and Non-Religious", CategoryGroup::Faith),
    cat(1876, "Sikh", CategoryGroup::Faith),
    cat(408, "The Church of Jesus Christ of Latter-day Saints", CategoryGroup::Faith),
];

/// Read-only lookup over the filter categories.
#[derive(Debug)]
pub struct FilterCategoryTable {
    by_id: HashMap<u32, &'static FilterCategory>,
}

impl FilterCategoryTable {
    /// The table shipped with the assistant's tool definition.
    pub fn standard() -> &'static FilterCategoryTable {
        static TABLE: OnceLock<FilterCategoryTable> = OnceLock::new();
        TABLE.get_or_init(|| Self::from_entries(CATEGORIES))
    }

    pub fn from_entries(entries: &'static [FilterCategory]) -> Self {
        Self {
            by_id: entries.iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn get(&self, id: u32) -> Option<&'static FilterCategory> {
        self.by_id.get(&id).copied()
    }

    pub fn label(&self, id: u32) -> Option<&'static str> {
        self.get(id).map(|c| c.label)
    }

    /// Labels for the ids that resolve, in input order. Unknown ids are skipped.
    pub fn labels(&self, ids: &[u32]) -> Vec<&'static str> {
        ids.iter().filter_map(|id| self.label(*id)).collect()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
