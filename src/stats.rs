// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Question type, CEFR level and verification distributions

use crate::coverage::percentage;
use crate::questions::QuestionRecord;
use crate::tags::OrderedCounts;

pub const CEFR_LEVELS: [(&str, &str); 6] = [
    ("A1", "Beginner"),
    ("A2", "Elementary"),
    ("B1", "Intermediate"),
    ("B2", "Upper-Intermediate"),
    ("C1", "Advanced"),
    ("C2", "Proficiency"),
];

pub fn type_description(question_type: &str) -> &'static str {
    match question_type {
        "comprehension" => "English comprehension",
        "listening" => "French listening",
        "fill-in-the-blank" => "Missing word completion",
        _ => "Other",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub name: String,
    pub description: &'static str,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionStats {
    pub total: usize,
    /// Most common first
    pub types: Vec<Share>,
    /// A1..C2 always present, then non-standard levels alphabetically
    pub levels: Vec<Share>,
    pub verified: usize,
}

impl QuestionStats {
    pub fn collect(questions: &[QuestionRecord]) -> Self {
        let total = questions.len();
        let mut types = OrderedCounts::default();
        let mut levels = OrderedCounts::default();
        for q in questions {
            if let Some(t) = q.question_type.as_deref().filter(|t| !t.is_empty()) {
                types.add(t.to_string());
            }
            if let Some(d) = q.difficulty.as_deref().filter(|d| !d.is_empty()) {
                levels.add(d.to_string());
            }
        }

        let types: Vec<Share> = types
            .most_common(types.len())
            .into_iter()
            .map(|(name, count)| Share {
                name: name.clone(),
                description: type_description(name),
                count,
                percentage: percentage(count, total),
            })
            .collect();

        let mut level_shares: Vec<Share> = CEFR_LEVELS
            .iter()
            .map(|(level, description)| {
                let count = levels.get(&level.to_string());
                Share {
                    name: level.to_string(),
                    description: *description,
                    count,
                    percentage: percentage(count, total),
                }
            })
            .collect();
        let mut others: Vec<_> = levels
            .iter()
            .filter(|(level, _)| !CEFR_LEVELS.iter().any(|(l, _)| *l == level.as_str()))
            .collect();
        others.sort_by(|a, b| a.0.cmp(b.0));
        level_shares.extend(others.into_iter().map(|(level, count)| Share {
            name: level.clone(),
            description: "Other",
            count,
            percentage: percentage(count, total),
        }));

        QuestionStats {
            total,
            types,
            levels: level_shares,
            verified: questions.iter().filter(|q| q.is_verified()).count(),
        }
    }

    pub fn not_verified(&self) -> usize {
        self.total - self.verified
    }

    pub fn verified_percentage(&self) -> f64 {
        percentage(self.verified, self.total)
    }

    pub fn not_verified_percentage(&self) -> f64 {
        percentage(self.not_verified(), self.total)
    }
}
