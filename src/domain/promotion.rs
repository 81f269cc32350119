use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

///
/// Bulk class reassignment: apply one target class to a set of students.
/// The same request type serves promotion and demotion.
///
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRequest {
    pub student_ids: Vec<String>,
    pub target_class: String
}

impl PromotionRequest {
    /// Convenience function that takes &str literals
    pub fn new(student_ids: &[&str], target_class: &str) -> PromotionRequest {
        PromotionRequest {
            student_ids: student_ids.iter().map(|id| String::from(*id)).collect(),
            target_class: String::from(target_class)
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
pub enum RejectReason {
    UnknownStudent
}

///
/// Outcome of a promotion request. Every requested student ends up in
/// exactly one of the two sets; an empty <code>updated</code> together with
/// rejections means nothing was committed.
///
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromotionResult {
    pub updated: Vec<String>,
    pub rejected: BTreeMap<String, RejectReason>
}
