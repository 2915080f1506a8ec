//! Rule-based attribute extraction from job descriptions and résumés.

use crate::domain::model::{AttributeSet, CandidateProfile, JobProfile};
use crate::domain::ports::AttributeExtractor;
use regex::Regex;
use std::collections::BTreeSet;

const SKILLS_WINDOW: usize = 200;

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "have", "in", "including",
    "is", "it", "of", "on", "or", "our", "required", "requires", "should", "skill", "skills",
    "strong", "such", "the", "to", "we", "with", "you", "your",
];

const EDUCATION_HINTS: &[&str] = &["bachelor", "master", "phd", "degree"];

/// 技術關鍵字與其正規化寫法
const TECH_KEYWORDS: &[&str] = &[
    "Java",
    "Python",
    "SQL",
    "MySQL",
    "Kafka",
    "Spring Boot",
    "Azure DevOps",
    "AWS",
    "C++",
    "Power BI",
    "TensorFlow",
    "React",
    "Node",
    "Docker",
];

pub struct RuleBasedExtractor {
    word: Regex,
    skill_word: Regex,
    degree: Regex,
    email: Regex,
    experience: Regex,
    tech: Regex,
    skills_heading: Regex,
}

impl RuleBasedExtractor {
    pub fn new() -> Self {
        // "C++" 結尾不是單字字元，不能再接 `\b`
        let alternatives: Vec<String> = TECH_KEYWORDS
            .iter()
            .map(|k| {
                if k.ends_with(|c: char| c.is_ascii_alphanumeric()) {
                    format!(r"{}\b", regex::escape(k))
                } else {
                    regex::escape(k)
                }
            })
            .collect();
        let tech = format!(r"(?i)\b({})", alternatives.join("|"));

        Self {
            word: Regex::new(r"[A-Za-z+#.]+").expect("valid word pattern"),
            skill_word: Regex::new(r"[A-Za-z+#.]{2,}").expect("valid skill pattern"),
            degree: Regex::new(r"(?i)(bachelor|master|diploma|phd)[^.,\n]+")
                .expect("valid degree pattern"),
            email: Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+")
                .expect("valid email pattern"),
            experience: Regex::new(r"(\d+)\+?\s+years").expect("valid experience pattern"),
            tech: Regex::new(&tech).expect("valid tech pattern"),
            skills_heading: Regex::new(r"(?i)skills").expect("valid heading pattern"),
        }
    }

    fn sentences(text: &str) -> impl Iterator<Item = &str> {
        text.split(['.', '!', '?', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn clean_token(token: &str) -> Option<String> {
        let token = token.trim_matches('.').to_lowercase();
        if token.len() < 2 || STOP_WORDS.contains(&token.as_str()) {
            None
        } else {
            Some(token)
        }
    }

    pub fn tech_stack(&self, text: &str) -> AttributeSet {
        let found = self.tech.captures_iter(text).filter_map(|caps| {
            let matched = caps.get(1)?.as_str();
            TECH_KEYWORDS
                .iter()
                .find(|keyword| keyword.eq_ignore_ascii_case(matched))
                .map(|keyword| keyword.to_lowercase())
        });
        AttributeSet::from_tokens(found)
    }

    /// 學位關鍵字，正規化、去重、排序後以 ", " 串接
    pub fn education(&self, text: &str) -> String {
        let degrees: BTreeSet<&'static str> = self
            .degree
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| match m.as_str().to_lowercase().as_str() {
                "bachelor" => "Bachelor",
                "master" => "Master",
                "diploma" => "Diploma",
                _ => "PhD",
            })
            .collect();
        degrees.into_iter().collect::<Vec<_>>().join(", ")
    }

    pub fn email(&self, text: &str) -> String {
        self.email
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn experience_years(&self, text: &str) -> u32 {
        self.experience
            .captures_iter(text)
            .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
            .max()
            .unwrap_or(0)
    }

    /// 第一行由 2–4 個英文字組成、且不含數字或 '@' 的文字視為姓名
    pub fn name(&self, text: &str) -> String {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .find(|line| {
                let words: Vec<&str> = line.split_whitespace().collect();
                (2..=4).contains(&words.len())
                    && words.iter().all(|w| {
                        w.chars().all(|c| c.is_alphabetic() || c == '-' || c == '\'')
                            && w.chars().next().is_some_and(char::is_uppercase)
                    })
            })
            .map(str::to_string)
            .unwrap_or_default()
    }

    pub fn declared_skills(&self, text: &str) -> AttributeSet {
        let mut tokens = BTreeSet::new();
        for heading in self.skills_heading.find_iter(text) {
            let window: String = text[heading.end()..].chars().take(SKILLS_WINDOW).collect();
            tokens.extend(
                self.skill_word
                    .find_iter(&window)
                    .filter_map(|m| Self::clean_token(m.as_str())),
            );
        }
        AttributeSet::from_tokens(tokens)
    }

    pub fn certifications(&self, text: &str) -> Vec<String> {
        let mut seen = BTreeSet::new();
        Self::sentences(text)
            .filter(|sentence| sentence.to_lowercase().contains("certified"))
            .filter(|sentence| seen.insert(sentence.to_string()))
            .map(str::to_string)
            .collect()
    }
}

impl Default for RuleBasedExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeExtractor for RuleBasedExtractor {
    fn extract_job(&self, id: u64, title: &str, text: &str) -> JobProfile {
        let mut skill_sentences = Vec::new();
        let mut education_sentences = Vec::new();
        for sentence in Self::sentences(text) {
            let lowered = sentence.to_lowercase();
            if lowered.contains("skill") {
                skill_sentences.push(sentence);
            }
            if EDUCATION_HINTS.iter().any(|hint| lowered.contains(hint)) {
                education_sentences.push(sentence);
            }
        }

        let words = skill_sentences
            .iter()
            .flat_map(|sentence| self.word.find_iter(sentence))
            .filter_map(|m| Self::clean_token(m.as_str()));
        let skills = AttributeSet::from_tokens(words).union(&self.tech_stack(text));

        JobProfile {
            id,
            title: title.trim().to_string(),
            skills,
            education_requirement: self.education(&education_sentences.join("\n")),
        }
    }

    fn extract_candidate(&self, id: u64, text: &str) -> CandidateProfile {
        CandidateProfile {
            id,
            name: self.name(text),
            email: self.email(text),
            education: self.education(text),
            experience_years: self.experience_years(text),
            skills: self.declared_skills(text),
            tech_stack: self.tech_stack(text),
            certifications: self.certifications(text),
        }
    }
}
