//! Role based ability map.
//!
//! An `Ability` answers "may this viewer perform `Action` on `Subject`?" for a signed-in
//! user or an anonymous visitor. Rules grant a set of actions per subject and role;
//! a granted `Manage` implies every other action.

use entity::user::UserRole;

use crate::server::model::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Manage,
    Create,
    Read,
    Update,
    Delete,
}

/// Resource an action is checked against, carrying the attributes rules depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    User,
    Category,
    Course {
        instructor_id: i32,
        published: bool,
    },
    CourseContent {
        instructor_id: i32,
        /// The viewer holds a completed purchase of the course.
        purchased: bool,
        preview: bool,
    },
    Purchase {
        buyer_id: i32,
    },
    PaymentEvent,
}

/// Permissions of a single viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ability {
    user_id: Option<i32>,
    role: Option<UserRole>,
}

impl Ability {
    /// Builds the ability of an optional signed-in user.
    pub fn for_user(user: Option<&User>) -> Self {
        Self {
            user_id: user.map(|u| u.id),
            role: user.map(|u| u.role),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            role: None,
        }
    }

    /// Id of the signed-in viewer, `None` for anonymous visitors.
    pub fn user_id(&self) -> Option<i32> {
        self.user_id
    }

    pub fn is_signed_in(&self) -> bool {
        self.user_id.is_some()
    }

    /// Checks whether the viewer may perform `action` on `subject`.
    ///
    /// # Arguments
    /// - `action` - Requested action
    /// - `subject` - Resource with the attributes the rules depend on
    ///
    /// # Returns
    /// - `true` - A rule grants `action` or `Manage` on the subject
    /// - `false` - No rule applies
    pub fn can(&self, action: Action, subject: &Subject) -> bool {
        let granted = self.granted(subject);
        granted.contains(&Action::Manage) || granted.contains(&action)
    }

    fn granted(&self, subject: &Subject) -> Vec<Action> {
        let (Some(user_id), Some(role)) = (self.user_id, self.role) else {
            return Self::anonymous_rules(subject);
        };

        match role {
            UserRole::Admin => vec![Action::Manage],
            UserRole::Instructor => Self::instructor_rules(user_id, subject),
            UserRole::Student => Self::student_rules(user_id, subject),
        }
    }

    fn anonymous_rules(subject: &Subject) -> Vec<Action> {
        match *subject {
            Subject::Category => vec![Action::Read],
            Subject::Course {
                published: true, ..
            } => vec![Action::Read],
            Subject::CourseContent { preview: true, .. } => vec![Action::Read],
            _ => vec![],
        }
    }

    fn student_rules(user_id: i32, subject: &Subject) -> Vec<Action> {
        match *subject {
            Subject::Category => vec![Action::Read],
            Subject::Course {
                published: true, ..
            } => vec![Action::Read],
            Subject::CourseContent {
                purchased, preview, ..
            } if purchased || preview => vec![Action::Read],
            Subject::Purchase { buyer_id } if buyer_id == user_id => {
                vec![Action::Create, Action::Read]
            }
            _ => vec![],
        }
    }

    fn instructor_rules(user_id: i32, subject: &Subject) -> Vec<Action> {
        match *subject {
            Subject::Course { instructor_id, .. } if instructor_id == user_id => {
                vec![Action::Manage]
            }
            Subject::CourseContent { instructor_id, .. } if instructor_id == user_id => {
                vec![Action::Manage]
            }
            _ => Self::student_rules(user_id, subject),
        }
    }
}
