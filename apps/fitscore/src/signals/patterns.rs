//! Static keyword and regex sets used by the analyzers.
//!
//! Every list is plain data so tests can pin the exact vocabulary. Bump
//! `PATTERN_LIBRARY_VERSION` whenever a list changes, since scores computed
//! under different versions are not comparable.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::RoleLevel;

pub const PATTERN_LIBRARY_VERSION: &str = "1.2.0";

/// General technical vocabulary, used for technical-density consistency.
pub const TECHNICAL_TERMS: &[&str] = &[
    "algorithm", "api", "apis", "backend", "bug", "cache", "caching", "class", "cloud",
    "code", "compiler", "database", "debug", "debugging", "deploy", "deployment", "design",
    "docker", "endpoint", "framework", "frontend", "function", "git", "implement",
    "implemented", "infrastructure", "java", "javascript", "kubernetes", "latency",
    "library", "linux", "memory", "model", "performance", "pipeline", "python", "query",
    "refactor", "refactored", "rust", "schema", "server", "service", "sql", "system",
    "test", "testing", "thread", "typescript",
];

/// Advanced vocabulary that signals architectural thinking.
pub const ADVANCED_TECHNICAL_TERMS: &[&str] = &[
    "architecture", "scalability", "scalable", "distributed", "microservices", "microservice",
    "concurrency", "asynchronous", "throughput", "latency", "fault tolerance",
    "fault-tolerant", "load balancing", "load balancer", "sharding", "replication",
    "consistency", "eventual consistency", "idempotent", "observability", "orchestration",
    "containerization", "event-driven", "message queue", "caching strategy", "optimization",
    "profiling", "indexing", "partitioning", "high availability", "design pattern",
    "design patterns", "abstraction", "encapsulation", "trade-off", "tradeoff",
    "ci/cd", "kubernetes", "terraform", "big-o", "complexity",
];

/// Discourse connectives and problem/solution markers.
pub const STRUCTURAL_MARKERS: &[&str] = &[
    "first", "second", "third", "then", "next", "finally", "because", "therefore",
    "however", "as a result", "consequently", "so that", "problem", "solution",
    "approach", "trade-off", "result", "outcome", "learned", "instead",
];

/// Numeric-claim patterns: percentages, multipliers, counts of users or
/// requests, durations, years and months, data sizes.
pub const QUANTIFICATION_PATTERNS: &[&str] = &[
    r"\d+(?:\.\d+)?\s*(?:%|percent\b)",
    r"\b\d+(?:\.\d+)?x\b",
    r"\b\d+(?:[.,]\d+)*\s*(?:k|m|thousand|million|billion)?\+?\s*(?:users|requests|customers|clients|transactions|queries|records|events|rps|qps)\b",
    r"\b\d+(?:\.\d+)?\s*(?:ms|milliseconds?|seconds?|secs?|minutes?|mins?|hours?|hrs?)\b",
    r"\b\d+\+?\s*(?:years?|months?)\b",
    r"\b\d+(?:\.\d+)?\s*(?:kb|mb|gb|tb|pb)\b",
];

pub const PASSION_TERMS: &[&str] = &[
    "passionate", "passion", "love", "excited", "exciting", "enjoy", "fascinated",
    "inspired", "inspiring", "thrilled", "eager", "motivated", "curious", "drawn to",
];

pub const SPECIFICITY_TERMS: &[&str] = &[
    "specifically", "particularly", "for example", "for instance", "such as",
    "in particular", "product", "project", "mission", "platform", "customers",
];

pub const FUTURE_TERMS: &[&str] = &[
    "future", "career", "goal", "goals", "grow", "growth", "learn", "develop",
    "long-term", "long term", "aspire", "next step", "ambition", "become",
];

pub const COMPANY_TERMS: &[&str] = &[
    "your company", "your team", "your product", "your products", "your mission",
    "your culture", "your values", "company", "organization", "brand",
];

pub const ROLE_TERMS: &[&str] = &[
    "role", "position", "responsibilities", "this job", "opportunity", "contribute",
    "day-to-day", "team",
];

pub const RESEARCH_TERMS: &[&str] = &[
    "i read", "i noticed", "i researched", "i saw", "i learned that", "recently announced",
    "your blog", "your website", "i follow", "i have been following", "case study",
    "press release", "annual report", "your recent",
];

pub const PERSONAL_PASSION_TERMS: &[&str] = &[
    "passionate", "passion", "love", "enjoy", "hobby", "side project", "side projects",
    "since i was", "fascinated", "curious", "driven", "dedicated", "open source",
    "tinkering",
];

/// Admission shapes that mark a trap answer as flagging the term itself as
/// unfamiliar or fabricated. Regex fragments matched against lowercased text
/// with straight apostrophes. Bare hedges ("not sure", "not aware") and
/// incidental words ("fake") do not qualify.
pub const UNFAMILIARITY_ADMISSIONS: &[&str] = &[
    r"(?:not|un)familiar with",
    r"(?:never|haven't|have not|hadn't|had not)(?: ever)? (?:heard|come across)",
    r"(?:don't|do not|didn't|did not)(?: really)? know (?:what|that|it|this|about|anything about|much about)",
    r"(?:not sure|no idea) what (?:that|it|this)(?: one)? is",
    r"(?:is|does) (?:it|that|this)(?: one)?(?: even| really| actually)? (?:exist|a real)",
    r"(?:it|that|this)(?: one)? (?:doesn't|does not|may not|might not)(?: seem to| appear to)? exist(?:\s*$|\s*[.,;!?]| in | to my knowledge)",
    r"(?:don't|do not) think (?:it|that|this)(?: one)? (?:exists|is real)",
    r"(?:sounds|seems|looks|is|must be|might be)(?: like)?(?: it's)? (?:made up|fabricated|fictional|fictitious|fake|invented)",
    r"not (?:a real|an actual|a known) (?:technology|tool|library|framework|database|product|thing|term)",
    r"(?:can't|cannot|couldn't|could not) find (?:anything|any information|any docs|any documentation)",
    r"no(?: prior)? experience (?:with|using) (?:it|that|this)",
    r"not something i(?:'ve| have) (?:used|heard of|worked with|come across)",
];

pub const VALUES_TERMS: &[&str] = &[
    "collaboration", "collaborate", "collaborative", "team", "teamwork", "together",
    "growth", "learn", "learning", "mentor", "mentoring", "ownership", "accountable",
    "accountability", "responsibility", "impact", "meaningful", "mission", "quality",
    "excellence", "integrity", "transparency", "honest", "honesty", "respect", "trust",
    "diversity", "inclusion", "feedback",
];

pub const CAREER_PLANNING_TERMS: &[&str] = &[
    "career", "long-term", "long term", "grow with", "years from now", "five years",
    "career path", "stability", "commitment", "settle down",
];

const JUNIOR_TERMS: &[&str] = &[
    "junior", "intern", "internship", "entry level", "entry-level", "graduate",
    "trainee", "beginner", "bootcamp", "student", "apprentice",
];

const MID_LEVEL_TERMS: &[&str] = &[
    "mid-level", "intermediate", "proficient", "independently", "implemented",
    "contributed", "maintained",
];

const SENIOR_TERMS: &[&str] = &[
    "senior", "lead", "led", "principal", "staff", "architect", "architected", "mentor",
    "mentored", "expert", "owned", "spearheaded",
];

const MANAGEMENT_TERMS: &[&str] = &[
    "manager", "management", "managed", "director", "head of", "vp", "vice president",
    "hired", "budget", "stakeholders", "cto", "team of",
];

/// Résumé vocabulary per seniority band, used by the experience classifier.
pub fn level_terms(level: RoleLevel) -> &'static [&'static str] {
    match level {
        RoleLevel::Junior => JUNIOR_TERMS,
        RoleLevel::MidLevel => MID_LEVEL_TERMS,
        RoleLevel::Senior => SENIOR_TERMS,
        RoleLevel::Management => MANAGEMENT_TERMS,
    }
}

/// Job-posting vocabulary for role-level derivation, checked in this order.
pub const JOB_SENIOR_TERMS: &[&str] = &["senior", "lead", "principal", "staff", "architect"];
pub const JOB_JUNIOR_TERMS: &[&str] = &["junior", "entry", "associate", "trainee"];
pub const JOB_MANAGEMENT_TERMS: &[&str] = &["manager", "director", "head", "vp"];

/// A technical focus area with the posting keywords that detect it and the
/// candidate skills that count toward it.
#[derive(Debug)]
pub struct FocusArea {
    pub tag: &'static str,
    pub keywords: &'static [&'static str],
    pub skills: &'static [&'static str],
}

pub const FOCUS_AREAS: &[FocusArea] = &[
    FocusArea {
        tag: "Machine Learning",
        keywords: &["ml", "machine learning", "ai", "artificial intelligence", "deep learning"],
        skills: &[
            "python", "tensorflow", "pytorch", "scikit-learn", "keras", "pandas", "numpy",
            "machine learning", "deep learning", "nlp",
        ],
    },
    FocusArea {
        tag: "Web Development",
        keywords: &["web", "frontend", "backend", "full-stack", "ui/ux"],
        skills: &[
            "javascript", "typescript", "react", "angular", "vue", "html", "css", "nodejs",
            "express", "django", "flask",
        ],
    },
    FocusArea {
        tag: "Data Science",
        keywords: &["data science", "analytics", "big data", "data analysis"],
        skills: &[
            "python", "r", "sql", "pandas", "numpy", "spark", "tableau", "statistics",
            "jupyter",
        ],
    },
    FocusArea {
        tag: "Devops",
        keywords: &["devops", "infrastructure", "deployment", "ci/cd", "cloud"],
        skills: &[
            "docker", "kubernetes", "terraform", "ansible", "jenkins", "aws", "azure", "gcp",
            "ci/cd", "linux",
        ],
    },
    FocusArea {
        tag: "Mobile",
        keywords: &["mobile", "ios", "android", "react native", "flutter"],
        skills: &["swift", "kotlin", "java", "react native", "flutter", "ios", "android", "dart"],
    },
    FocusArea {
        tag: "Security",
        keywords: &["security", "cybersecurity", "encryption", "penetration testing"],
        skills: &[
            "security", "cryptography", "penetration testing", "owasp", "siem", "networking",
            "linux",
        ],
    },
    FocusArea {
        tag: "Database",
        keywords: &["database", "sql", "nosql", "data modeling"],
        skills: &[
            "sql", "postgresql", "mysql", "mongodb", "redis", "elasticsearch", "cassandra",
            "oracle",
        ],
    },
];

/// Finds a focus area by tag. Case-insensitive; underscores read as spaces,
/// so `machine_learning` and `Machine Learning` resolve to the same area.
pub fn focus_area(tag: &str) -> Option<&'static FocusArea> {
    let wanted = tag.trim().replace('_', " ").to_lowercase();
    FOCUS_AREAS.iter().find(|area| area.tag.to_lowercase() == wanted)
}

/// Skills recognized in free résumé text.
pub const RESUME_SKILLS: &[&str] = &[
    "python", "java", "javascript", "typescript", "c++", "c#", "go", "rust", "swift",
    "kotlin", "react", "angular", "vue", "html", "css", "nodejs", "express", "django",
    "flask", "spring", "sql", "mysql", "postgresql", "mongodb", "redis", "elasticsearch",
    "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "ansible", "git",
    "jenkins", "jira", "figma", "pandas", "numpy", "tensorflow", "pytorch",
    "scikit-learn", "ci/cd",
];

lazy_static! {
    pub static ref RE_TECHNICAL: Regex = term_regex(TECHNICAL_TERMS);
    pub static ref RE_ADVANCED_TECHNICAL: Regex = term_regex(ADVANCED_TECHNICAL_TERMS);
    pub static ref RE_STRUCTURAL: Regex = term_regex(STRUCTURAL_MARKERS);
    pub static ref RE_QUANTIFICATION: Regex = Regex::new(&format!(
        "(?i)(?:{})",
        QUANTIFICATION_PATTERNS.join("|")
    ))
    .expect("quantification patterns compile");

    pub static ref RE_PASSION: Regex = term_regex(PASSION_TERMS);
    pub static ref RE_SPECIFICITY: Regex = term_regex(SPECIFICITY_TERMS);
    pub static ref RE_FUTURE: Regex = term_regex(FUTURE_TERMS);
    pub static ref RE_COMPANY: Regex = term_regex(COMPANY_TERMS);
    pub static ref RE_ROLE: Regex = term_regex(ROLE_TERMS);
    pub static ref RE_RESEARCH: Regex = term_regex(RESEARCH_TERMS);
    pub static ref RE_PERSONAL_PASSION: Regex = term_regex(PERSONAL_PASSION_TERMS);
    pub static ref RE_VALUES: Regex = term_regex(VALUES_TERMS);
    pub static ref RE_UNFAMILIARITY: Regex = Regex::new(&format!(
        r"(?i)\b(?:{})",
        UNFAMILIARITY_ADMISSIONS.join("|")
    ))
    .expect("admission patterns compile");
    pub static ref RE_CAREER_PLANNING: Regex = term_regex(CAREER_PLANNING_TERMS);

    /// One regex per band, in `RoleLevel::ALL` order.
    pub static ref RE_LEVELS: [Regex; 4] = RoleLevel::ALL.map(|level| term_regex(level_terms(level)));

    // Years of experience: "5+ years of experience", "over 10 years", "3-5 years exp".
    pub static ref RE_YEARS_EXPERIENCE: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\+?\s*years?\s*(?:of\s*)?(?:experience|exp)\b"
    ).expect("years regex compiles");
    pub static ref RE_YEARS_OVER: Regex = Regex::new(
        r"(?i)\b(?:over|more than)\s*(\d{1,2})\s*years?\b"
    ).expect("years regex compiles");
    pub static ref RE_YEARS_RANGE: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\s*-\s*(\d{1,2})\s*years?\s*(?:of\s*)?(?:experience|exp)\b"
    ).expect("years regex compiles");

    /// Parenthesized tenure on an employer line, e.g. "Acme (8 months)".
    pub static ref RE_TENURE_MONTHS: Regex = Regex::new(
        r"(?i)\(\s*(\d{1,2})\s*(?:months?|mos?)\.?\s*\)"
    ).expect("tenure regex compiles");
    /// Employment date range, e.g. "Mar 2021 - Nov 2021".
    pub static ref RE_TENURE_NAMED_RANGE: Regex = Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{4})\s*(?:-|\x{2013}|to)\s*(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{4})\b"
    ).expect("tenure regex compiles");
    /// Employment date range in numeric form, e.g. "03/2021 - 11/2021".
    pub static ref RE_TENURE_NUMERIC_RANGE: Regex = Regex::new(
        r"\b(\d{1,2})/(\d{4})\s*(?:-|\x{2013}|to)\s*(\d{1,2})/(\d{4})\b"
    ).expect("tenure regex compiles");
}

/// Builds a case-insensitive whole-word alternation. Longer terms come first
/// so multi-word phrases win over their prefixes.
fn term_regex(terms: &[&str]) -> Regex {
    let mut sorted: Vec<&str> = terms.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let alternation = sorted
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("term list compiles")
}
