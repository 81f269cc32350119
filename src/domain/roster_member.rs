use serde::{Serialize, Deserialize};
use crate::domain::role::Role;

///
/// One person in the institution's roster. Which of the optional fields are
/// set depends on the role: students carry class/section, teachers a subject,
/// staff a department. The surrounding application owns roster maintenance;
/// the ledger only reads it, and the promotion engine updates
/// <code>class_id</code> for students.
///
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RosterMember {
    pub person_id: String,
    pub role: Role,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    pub enrolled: bool
}

impl RosterMember {
    pub fn student(person_id: &str, class_id: &str, section: &str) -> RosterMember {
        RosterMember {
            person_id: String::from(person_id),
            role: Role::Student,
            class_id: Some(String::from(class_id)),
            section: Some(String::from(section)),
            subject_id: None,
            department: None,
            enrolled: true
        }
    }

    pub fn teacher(person_id: &str, subject_id: &str) -> RosterMember {
        RosterMember {
            person_id: String::from(person_id),
            role: Role::Teacher,
            class_id: None,
            section: None,
            subject_id: Some(String::from(subject_id)),
            department: None,
            enrolled: true
        }
    }

    pub fn staff(person_id: &str, department: &str) -> RosterMember {
        RosterMember {
            person_id: String::from(person_id),
            role: Role::Staff,
            class_id: None,
            section: None,
            subject_id: None,
            department: Some(String::from(department)),
            enrolled: true
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::roster_member::RosterMember;
    use crate::util::serde_and_verify::tests::serde_and_verify;

    #[test]
    pub fn test_serde_student() {
        let member_ref = RosterMember::student("S1", "6", "A");
        let json_ref = r#"{"personId":"S1","role":"Student","classId":"6","section":"A","enrolled":true}"#;
        serde_and_verify(&member_ref, json_ref);
    }

    #[test]
    pub fn test_serde_staff() {
        let member_ref = RosterMember::staff("W1", "Admin");
        let json_ref = r#"{"personId":"W1","role":"Staff","department":"Admin","enrolled":true}"#;
        serde_and_verify(&member_ref, json_ref);
    }
}
