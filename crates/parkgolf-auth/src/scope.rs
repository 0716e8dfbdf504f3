//! Scope resolution.
//!
//! Answers which companies and courses an admin may touch. Results are
//! expressed as [`Accessible`] so "everything" and "nothing" can never be
//! confused: PLATFORM admins get [`Accessible::All`] companies, PLATFORM and
//! COMPANY admins get [`Accessible::All`] courses (company filtering of
//! courses is the caller's job), and absent or inactive admins get an empty
//! [`Accessible::Only`].

use parkgolf_models::{Admin, CompanyId, CourseId, Scope};
use std::collections::BTreeSet;

use crate::active;

/// Set of ids an admin may access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessible<T: Ord> {
    /// Unrestricted.
    All,
    /// Restricted to the listed ids. Empty means no access.
    Only(BTreeSet<T>),
}

impl<T: Ord + Copy> Accessible<T> {
    pub fn none() -> Self {
        Accessible::Only(BTreeSet::new())
    }

    pub fn contains(&self, id: T) -> bool {
        match self {
            Accessible::All => true,
            Accessible::Only(ids) => ids.contains(&id),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Accessible::All)
    }

    /// True when nothing at all is accessible.
    pub fn is_empty(&self) -> bool {
        matches!(self, Accessible::Only(ids) if ids.is_empty())
    }

    /// Projects onto the dashboard's list convention, where an empty list
    /// means "all".
    ///
    /// Returns `None` when nothing is accessible, since that case has no
    /// representation in the list convention.
    pub fn as_sentinel_ids(&self) -> Option<Vec<T>> {
        match self {
            Accessible::All => Some(Vec::new()),
            Accessible::Only(ids) if ids.is_empty() => None,
            Accessible::Only(ids) => Some(ids.iter().copied().collect()),
        }
    }
}

/// Companies the admin may access.
pub fn accessible_companies<'a>(admin: impl Into<Option<&'a Admin>>) -> Accessible<CompanyId> {
    let Some(admin) = active(admin) else {
        return Accessible::none();
    };

    match admin.scope() {
        Scope::Platform => Accessible::All,
        Scope::Company | Scope::Course => {
            Accessible::Only(admin.company_id().into_iter().collect())
        }
    }
}

/// Courses the admin may access.
pub fn accessible_courses<'a>(admin: impl Into<Option<&'a Admin>>) -> Accessible<CourseId> {
    let Some(admin) = active(admin) else {
        return Accessible::none();
    };

    match admin.scope() {
        Scope::Platform | Scope::Company => Accessible::All,
        Scope::Course => Accessible::Only(admin.course_ids().clone()),
    }
}

/// True iff the admin is PLATFORM scoped or belongs to `company_id`.
pub fn can_access_company<'a>(admin: impl Into<Option<&'a Admin>>, company_id: CompanyId) -> bool {
    match active(admin) {
        Some(admin) => {
            admin.scope() == Scope::Platform || admin.company_id() == Some(company_id)
        }
        None => false,
    }
}

/// True iff the admin may access `course_id`.
///
/// COMPANY scoped admins are trusted here; callers are expected to have
/// already filtered courses to the admin's company.
pub fn can_access_course<'a>(admin: impl Into<Option<&'a Admin>>, course_id: CourseId) -> bool {
    match active(admin) {
        Some(admin) => match admin.scope() {
            Scope::Platform | Scope::Company => true,
            Scope::Course => admin.course_ids().contains(&course_id),
        },
        None => false,
    }
}
