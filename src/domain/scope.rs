use serde::{Serialize, Deserialize};
use crate::domain::role::Role;

///
/// Role-dependent key of an attendance record. On the wire the scope is a
/// flat object whose fields select the variant, for example
/// <code>{"classId":"3","section":"B","subjectId":"MATH"}</code> for a
/// student scope or <code>{"department":"Admin"}</code> for a staff scope.
///
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
#[serde(untagged)]
pub enum Scope {
    #[serde(rename_all = "camelCase")]
    Class {
        class_id: String,
        section: String,
        subject_id: String
    },
    #[serde(rename_all = "camelCase")]
    Subject {
        subject_id: String
    },
    Department {
        department: String
    }
}

impl Scope {
    pub fn class(class_id: &str, section: &str, subject_id: &str) -> Scope {
        Scope::Class {
            class_id: String::from(class_id),
            section: String::from(section),
            subject_id: String::from(subject_id)
        }
    }

    pub fn subject(subject_id: &str) -> Scope {
        Scope::Subject { subject_id: String::from(subject_id) }
    }

    pub fn department(department: &str) -> Scope {
        Scope::Department { department: String::from(department) }
    }

    /// The role this scope shape belongs to. A draft whose declared role
    /// differs is rejected with
    /// [InvalidScope](crate::error::LedgerError::InvalidScope) before any write.
    pub fn role(&self) -> Role {
        match self {
            Scope::Class { .. } => Role::Student,
            Scope::Subject { .. } => Role::Teacher,
            Scope::Department { .. } => Role::Staff
        }
    }

    /// Canonical key used by the storage uniqueness constraint on
    /// (date, role, scopeKey). Components are opaque strings, so the
    /// separator is escaped to keep the mapping injective.
    pub fn key(&self) -> String {
        match self {
            Scope::Class { class_id, section, subject_id } =>
                format!("class/{}/{}/{}", Self::escape(class_id), Self::escape(section), Self::escape(subject_id)),
            Scope::Subject { subject_id } =>
                format!("subject/{}", Self::escape(subject_id)),
            Scope::Department { department } =>
                format!("department/{}", Self::escape(department))
        }
    }

    fn escape(component: &str) -> String {
        component.replace('\\', "\\\\").replace('/', "\\/")
    }

    pub fn class_id(&self) -> Option<&str> {
        match self {
            Scope::Class { class_id, .. } => Some(class_id.as_str()),
            _ => None
        }
    }

    pub fn department_name(&self) -> Option<&str> {
        match self {
            Scope::Department { department } => Some(department.as_str()),
            _ => None
        }
    }
}
