// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Tag frequency and co-occurrence
//!
//! Counts keep first-seen order so equal counts list in the order tags were
//! met in the bank. The co-occurrence graph is written as JSON with `nodes`
//! and `links` for the network visualizer.

use crate::coverage::percentage;
use crate::questions::QuestionRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Counts in first-seen order
#[derive(Debug, Clone, Default)]
pub struct OrderedCounts<K> {
    entries: Vec<(K, usize)>,
    index: HashMap<K, usize>,
}

impl<K: Clone + Eq + std::hash::Hash> OrderedCounts<K> {
    pub fn add(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn get(&self, key: &K) -> usize {
        self.index.get(key).map(|&i| self.entries[i].1).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(k, n)| (k, *n))
    }

    /// Highest counts first, at most `n`
    pub fn most_common(&self, n: usize) -> Vec<(&K, usize)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}

pub type TagCounts = OrderedCounts<String>;
pub type PairCounts = OrderedCounts<(String, String)>;

/// Occurrences of each tag over all questions
pub fn count_tags(questions: &[QuestionRecord]) -> TagCounts {
    let mut counts = TagCounts::default();
    for tag in questions.iter().flat_map(|q| q.tag_list()) {
        counts.add(tag.clone());
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagUsage {
    pub tag: String,
    pub count: usize,
    /// Share of all questions carrying the tag
    pub percentage: f64,
}

/// Best and least represented tags
#[derive(Debug, Clone, Default)]
pub struct TagSummary {
    pub total_questions: usize,
    pub top: Vec<TagUsage>,
    /// Least used tags among those seen more than once
    pub bottom: Vec<TagUsage>,
}

pub fn summarize_tags(questions: &[QuestionRecord], limit: usize) -> TagSummary {
    let counts = count_tags(questions);
    let total = questions.len();
    let usage = |(tag, count): (&String, usize)| TagUsage {
        tag: tag.clone(),
        count,
        percentage: percentage(count, total),
    };

    let top = counts.most_common(limit).into_iter().map(usage).collect();
    let mut repeated: Vec<_> = counts.iter().filter(|(_, n)| *n > 1).collect();
    repeated.sort_by_key(|(_, n)| *n);
    let bottom = repeated.into_iter().take(limit).map(usage).collect();

    TagSummary {
        total_questions: total,
        top,
        bottom,
    }
}

/// Tag and tag-pair counts for the network report
#[derive(Debug, Clone, Default)]
pub struct Cooccurrence {
    pub tags: TagCounts,
    /// Unordered pairs stored with the smaller tag first
    pub pairs: PairCounts,
    /// Questions with at least one tag
    pub tagged_questions: usize,
}

impl Cooccurrence {
    pub fn build(questions: &[QuestionRecord]) -> Self {
        let mut result = Cooccurrence::default();
        for question in questions {
            let tags = question.tag_list();
            if tags.is_empty() {
                continue;
            }
            result.tagged_questions += 1;
            for tag in tags {
                result.tags.add(tag.clone());
            }
            let distinct: Vec<&String> = tags.iter().collect::<BTreeSet<_>>().into_iter().collect();
            for (i, a) in distinct.iter().enumerate() {
                for b in &distinct[i + 1..] {
                    result.pairs.add(((*a).clone(), (*b).clone()));
                }
            }
        }
        result
    }

    /// Tags seen in exactly one question, alphabetical
    pub fn isolated(&self) -> Vec<&str> {
        let mut isolated: Vec<&str> = self
            .tags
            .iter()
            .filter(|(_, n)| *n == 1)
            .map(|(t, _)| t.as_str())
            .collect();
        isolated.sort_unstable();
        isolated
    }

    /// Total tag occurrences per category, largest first
    pub fn category_distribution(&self) -> Vec<(&'static str, usize)> {
        let mut totals: Vec<(&'static str, usize)> = Vec::new();
        for (tag, count) in self.tags.iter() {
            let category = categorize(tag);
            match totals.iter_mut().find(|(c, _)| *c == category) {
                Some((_, total)) => *total += count,
                None => totals.push((category, count)),
            }
        }
        totals.sort_by(|a, b| b.1.cmp(&a.1));
        totals
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagNode {
    pub id: String,
    pub size: usize,
    #[serde(alias = "group")]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagLink {
    pub source: String,
    pub target: String,
    pub weight: usize,
}

/// Weighted undirected tag graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagNetwork {
    pub nodes: Vec<TagNode>,
    pub links: Vec<TagLink>,
}

impl TagNetwork {
    /// Nodes are tags seen at least `min_tag` times; links join two such
    /// tags that co-occur at least `min_pair` times
    pub fn build(cooccurrence: &Cooccurrence, min_tag: usize, min_pair: usize) -> Self {
        let frequent: BTreeSet<&String> = cooccurrence
            .tags
            .iter()
            .filter(|(_, n)| *n >= min_tag)
            .map(|(t, _)| t)
            .collect();

        let mut nodes: Vec<TagNode> = frequent
            .iter()
            .map(|tag| TagNode {
                id: (*tag).clone(),
                size: cooccurrence.tags.get(tag),
                category: categorize(tag).to_string(),
            })
            .collect();
        nodes.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.id.cmp(&b.id)));

        let mut links: Vec<TagLink> = cooccurrence
            .pairs
            .iter()
            .filter(|((a, b), n)| *n >= min_pair && frequent.contains(a) && frequent.contains(b))
            .map(|((a, b), n)| TagLink {
                source: a.clone(),
                target: b.clone(),
                weight: n,
            })
            .collect();
        links.sort_by(|a, b| {
            b.weight
                .cmp(&a.weight)
                .then_with(|| a.source.cmp(&b.source))
                .then_with(|| a.target.cmp(&b.target))
        });

        TagNetwork { nodes, links }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub const OTHER_CATEGORY: &str = "other";

/// Topical category of a tag, for coloring the network.
///
/// Categories are tried in order. A tag matches a category when it equals
/// one of its keywords, contains a keyword longer than three characters, or
/// (when longer than three characters) is contained in a keyword. Failing
/// that, each hyphen-separated part longer than two characters is looked up
/// as an exact keyword.
pub fn categorize(tag: &str) -> &'static str {
    let tag = tag.to_lowercase();
    for (category, keywords) in CATEGORIES {
        if keywords.contains(&tag.as_str()) {
            return category;
        }
        for keyword in keywords.iter() {
            if keyword.chars().count() > 3 && tag.contains(keyword) {
                return category;
            }
            if tag.chars().count() > 3 && keyword.contains(tag.as_str()) {
                return category;
            }
        }
    }

    if tag.contains('-') {
        for part in tag.split('-').filter(|p| p.chars().count() > 2) {
            for (category, keywords) in CATEGORIES {
                if keywords.contains(&part) {
                    return category;
                }
            }
        }
    }

    OTHER_CATEGORY
}

const CATEGORIES: &[(&str, &[&str])] = &[
    ("daily-life", &[
        "daily-life", "family", "food", "shopping", "home", "routine", "household", "morning", "evening",
        "breakfast", "lunch", "dinner", "cooking", "kitchen", "bedroom", "living", "bathroom", "cleaning",
        "neighborhood", "neighbors", "pets", "animals", "garden", "plants", "furniture", "appliances",
        "bread", "meat", "vegetables", "fruits", "drinks", "coffee", "tea", "wine", "restaurant",
        "cafe", "grocery", "supermarket", "market", "eating", "meal", "recipe", "ingredient",
        "mother", "father", "parent", "child", "son", "daughter", "brother", "sister", "grandparent",
        "uncle", "aunt", "cousin", "family-gathering", "birthday", "celebration", "gifts", "presents",
    ]),
    ("work-business", &[
        "work", "professional", "business", "career", "office", "job", "employment", "workplace",
        "meeting", "presentation", "project", "deadline", "manager", "employee", "colleague",
        "company", "corporation", "industry", "finance", "banking", "accounting", "marketing",
        "sales", "customer", "client", "service", "commerce", "trade", "economy", "economic",
        "money", "salary", "budget", "investment", "profit", "business-strategy", "corporate",
        "entrepreneur", "startup", "competition", "market", "commercial", "professional-development",
    ]),
    ("politics-government", &[
        "politics", "government", "policy", "elections", "democracy", "political", "minister",
        "president", "parliament", "congress", "senate", "deputy", "mayor", "candidate",
        "voting", "campaign", "referendum", "law", "legislation", "constitution", "reform",
        "administration", "bureaucracy", "public", "state", "federal", "local", "municipal",
        "taxation", "regulation", "governance", "diplomatic", "foreign-policy", "domestic-policy",
        "elysee", "vatican", "pope", "censure", "coalition", "coup", "debate", "budget",
        "departments", "dismissal", "disagreement", "leadership", "legal-action", "premier",
        "president", "public-enterprise", "public-figures", "socialist-party", "proposals",
        "parliament", "crisis", "scandal", "political-statement", "austerity", "rule-of-law",
    ]),
    ("education-learning", &[
        "education", "school", "learning", "academic", "university", "student", "teacher", "professor",
        "class", "classroom", "course", "lesson", "lecture", "exam", "test", "homework", "assignment",
        "grade", "degree", "diploma", "graduation", "study", "research", "thesis", "dissertation",
        "library", "textbook", "curriculum", "pedagogy", "knowledge", "skill", "training",
        "language-learning", "french-class", "language", "linguistics", "grammar", "vocabulary",
    ]),
    ("health-medical", &[
        "healthcare", "medical", "health", "doctor", "hospital", "symptoms", "illness", "disease",
        "medicine", "treatment", "therapy", "surgery", "patient", "nurse", "physician", "clinic",
        "pharmacy", "medication", "drug", "prescription", "diagnosis", "recovery", "wellness",
        "fitness", "exercise", "nutrition", "diet", "mental-health", "psychology", "stress",
        "pain", "injury", "accident", "emergency", "first-aid", "preventive", "rehabilitation",
    ]),
    ("leisure-entertainment", &[
        "travel", "vacation", "sports", "music", "art", "entertainment", "leisure", "hobby",
        "tourism", "holiday", "trip", "journey", "adventure", "recreation", "fun", "relaxation",
        "game", "play", "cinema", "film", "movie", "theater", "concert", "festival", "event",
        "party", "celebration", "dancing", "singing", "reading", "book", "literature", "novel",
        "museum", "gallery", "exhibition", "culture", "cultural", "tradition", "heritage",
        "football", "tennis", "basketball", "swimming", "running", "cycling", "hiking", "camping",
        "games", "guitar", "music-theory", "musicology", "bach", "stradivarius", "violin",
        "harmonic-analysis", "music-history", "song", "collecting", "philately", "stamps",
        "team-sports", "fitness", "gym", "gardens", "park", "movies", "festival", "culinary-arts",
        "gastronomy", "gourmet-cooking", "romantic", "romance", "wedding", "birthday",
    ]),
    ("technology-digital", &[
        "technology", "computer", "digital", "internet", "software", "artificial-intelligence",
        "online", "website", "app", "mobile", "smartphone", "tablet", "laptop", "device",
        "programming", "coding", "data", "algorithm", "database", "network", "cyber",
        "virtual", "electronic", "automation", "innovation", "tech", "communication",
        "social-media", "platform", "digital-transformation", "cybersecurity", "cloud",
    ]),
    ("science-research", &[
        "science", "research", "astronomy", "space", "laboratory", "physics", "chemistry",
        "biology", "mathematics", "scientific", "experiment", "theory", "hypothesis",
        "discovery", "innovation", "technology", "engineering", "medicine", "environment",
        "climate", "ecology", "nature", "analysis", "study", "investigation", "data",
        "statistics", "methodology", "academic-research", "scholarly", "space-exploration",
        "space-missions", "biodiversity", "clean-energy", "algorithms", "data-protection",
        "psychoanalysis", "aesthetic-theory", "literary-theory", "poststructuralism",
        "postmodernism", "postcolonialism", "orientalism", "intellectual-discourse",
        "evaluation", "examination", "archives", "academic-freedom", "academia",
    ]),
    ("transportation-travel", &[
        "transportation", "transport", "travel", "car", "bus", "train", "plane", "airplane",
        "metro", "subway", "bicycle", "bike", "walking", "driving", "traffic", "road",
        "highway", "street", "station", "airport", "port", "journey", "trip", "commute",
        "vehicle", "motorcycle", "taxi", "uber", "public-transport", "private-transport",
    ]),
    ("social-relationships", &[
        "friendship", "friends", "social", "relationship", "dating", "romance", "love",
        "marriage", "wedding", "couple", "partner", "spouse", "community", "society",
        "social-bonds", "interpersonal", "communication", "conversation", "meeting",
        "gathering", "networking", "collaboration", "teamwork", "cooperation",
        "helping-others", "kindness", "respect", "shared-activities", "sharing",
        "siblings", "neighbors", "social-movements", "social-policy", "social-business",
        "social-controversy", "social-tensions", "intergenerational",
    ]),
    ("emotions-psychology", &[
        "emotions", "feelings", "happiness", "sadness", "anger", "love", "fear", "joy",
        "depression", "anxiety", "stress", "mood", "emotional", "psychology", "mental",
        "behavior", "personality", "character", "attitude", "motivation", "confidence",
        "self-esteem", "empathy", "compassion", "kindness", "patience", "understanding",
    ]),
    ("geography-places", &[
        "geography", "location", "place", "city", "town", "village", "country", "region",
        "continent", "mountain", "river", "ocean", "sea", "lake", "forest", "desert",
        "climate", "weather", "temperature", "rain", "snow", "sun", "wind", "storm",
        "france", "paris", "europe", "america", "asia", "africa", "directions", "map",
        "eure", "marseille", "normandy", "provence", "balkans", "geneva", "italy",
        "scandinavia", "tokyo", "myanmar", "middle-east", "moon", "space", "sky",
        "regions", "street", "highway", "landscape", "monuments", "parks", "desert",
    ]),
    ("time-calendar", &[
        "time", "calendar", "schedule", "appointment", "date", "day", "week", "month",
        "year", "season", "summer", "winter", "spring", "autumn", "morning", "afternoon",
        "evening", "night", "today", "tomorrow", "yesterday", "future", "past", "present",
        "deadline", "duration", "period", "moment", "instant", "timing", "punctuality",
        "19th-century", "imperial-period", "historic", "napoleon", "french-revolution",
        "millennium", "near-future", "past-activities", "past-knowledge", "weekend",
    ]),
    ("legal-crime", &[
        "crime", "criminal", "legal", "law", "court", "tribunal", "prison", "jail",
        "murder", "fraud", "theft", "violence", "accident", "accidents", "injuries",
        "emergency", "legal-action", "criminal-responsibility", "investigation", "scandal",
        "judicial", "lawsuit", "compliance", "regulation", "legal-system", "justice",
    ]),
    ("culture-arts", &[
        "culture", "cultural", "art", "arts", "heritage", "tradition", "traditions",
        "museum", "gallery", "exhibition", "literature", "authors", "writers", "poetry",
        "artisanal", "traditional-crafts", "cultural-analysis", "cultural-hegemony",
        "french-heritage", "french-values", "spiritual-heritage", "monuments",
        "historic-towns", "beauty", "contemplative", "monasticism", "beatification",
    ]),
];
