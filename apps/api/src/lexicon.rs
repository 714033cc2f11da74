//! Hand-authored lexicons used by skill matching, scoring, and the answer
//! heuristics. Terms are stored lowercase; matching code lowercases input
//! before comparing.

/// Category → recognized terms. Multi-word terms match by substring
/// containment, single-word terms by word boundary.
pub const SKILL_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Programming",
        &[
            "python", "java", "c++", "c#", "javascript", "typescript", "rust", "scala",
        ],
    ),
    (
        "Data/ML",
        &[
            "tensorflow",
            "pytorch",
            "keras",
            "sklearn",
            "pandas",
            "numpy",
            "machine learning",
            "deep learning",
            "nlp",
            "computer vision",
        ],
    ),
    (
        "BI/Analytics",
        &["power bi", "tableau", "looker", "excel", "matplotlib", "seaborn"],
    ),
    (
        "Cloud",
        &["aws", "gcp", "azure", "lambda", "s3", "ec2", "cloud functions"],
    ),
    (
        "Databases",
        &["sql", "postgres", "mysql", "mongodb", "redis", "elasticsearch"],
    ),
    (
        "DevOps",
        &["docker", "kubernetes", "terraform", "jenkins", "ci/cd", "git", "linux"],
    ),
    (
        "Web",
        &["react", "node", "flask", "fastapi", "django", "rest api", "graphql"],
    ),
];

/// Flat vocabulary for the precision pass of skill-chip extraction,
/// independent of category.
pub const COMMON_SKILLS: &[&str] = &[
    "python",
    "sql",
    "tensorflow",
    "pytorch",
    "keras",
    "sklearn",
    "aws",
    "gcp",
    "azure",
    "docker",
    "kubernetes",
    "spark",
    "pandas",
    "numpy",
    "matplotlib",
    "seaborn",
    "flask",
    "fastapi",
    "git",
    "linux",
    "api",
    "nlp",
    "java",
    "c++",
    "javascript",
    "react",
    "node",
    "postgres",
    "mysql",
    "mongodb",
    "tableau",
    "power bi",
    "excel",
];

/// Action verbs that signal experience strength in bullets.
pub const ACTION_VERBS: &[&str] = &[
    "built",
    "led",
    "designed",
    "developed",
    "launched",
    "shipped",
    "deployed",
    "implemented",
    "created",
    "optimized",
    "automated",
    "migrated",
    "architected",
    "delivered",
    "reduced",
    "increased",
    "improved",
    "managed",
    "owned",
    "mentored",
];

/// Company-suffix words stripped from paraphrased lines so answers stay
/// generic.
pub const COMPANY_SUFFIXES: &[&str] = &[
    "private", "limited", "ltd", "inc", "llc", "pvt", "company", "co",
];

/// Decorative glyphs that trip ATS table/layout parsers.
pub const DECORATIVE_GLYPHS: &[char] = &['★', '◆', '●', '■', '▪', '♦', '➤', '✓'];
