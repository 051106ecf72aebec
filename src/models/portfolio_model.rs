use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::period::parse_period_end;

/// A listing record that can be ordered newest first.
pub trait Dated {
    fn period_text(&self) -> &str;

    fn end_date(&self) -> Option<NaiveDate> {
        parse_period_end(self.period_text())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub period: String,
    pub summary: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub credential: Option<String>,
    pub badge: String,
}

impl Dated for Experience {
    fn period_text(&self) -> &str {
        &self.period
    }
}

impl Dated for Project {
    fn period_text(&self) -> &str {
        &self.period
    }
}

impl Dated for Certification {
    fn period_text(&self) -> &str {
        &self.date
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioData {
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
}
