//! Role registry.
//!
//! Every [`Role`] maps to exactly one [`RoleDefinition`]: the tier it belongs
//! to, the [`Scope`] of resources it entitles, its rank within the tier
//! (lower is more senior), and its default permission set. This is the only
//! place authorization policy is written down; everything else reads it.
//!
//! ```text
//! Platform tier                Company tier
//! ─────────────                ────────────
//! 0 PLATFORM_OWNER             0 COMPANY_OWNER     (COMPANY scope)
//! 1 PLATFORM_ADMIN             1 COMPANY_MANAGER   (COMPANY scope)
//! 2 PLATFORM_SUPPORT           2 COURSE_MANAGER    (COURSE scope)
//! 3 PLATFORM_ANALYST           3 STAFF             (COURSE scope)
//!   (all PLATFORM scope)       4 READONLY_STAFF    (COURSE scope)
//! ```

use parkgolf_core::permissions::{Permission, PermissionSet};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Resource universe a role entitles access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scope {
    Platform,
    Company,
    Course,
}

impl Scope {
    /// Breadth of the scope. PLATFORM contains COMPANY contains COURSE.
    pub const fn breadth(self) -> u8 {
        match self {
            Scope::Platform => 2,
            Scope::Company => 1,
            Scope::Course => 0,
        }
    }

    /// True when `self` strictly contains `other`.
    pub const fn contains(self, other: Scope) -> bool {
        self.breadth() > other.breadth()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Scope::Platform => "PLATFORM",
            Scope::Company => "COMPANY",
            Scope::Course => "COURSE",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role tier. Ranks are only comparable within a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Platform,
    Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    PlatformOwner,
    PlatformAdmin,
    PlatformSupport,
    PlatformAnalyst,
    CompanyOwner,
    CompanyManager,
    CourseManager,
    Staff,
    ReadonlyStaff,
}

/// Static policy attached to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDefinition {
    pub role: Role,
    pub tier: Tier,
    pub scope: Scope,
    /// Position within the tier; 0 is the most senior.
    pub rank: u8,
    pub label: &'static str,
    pub defaults: PermissionSet,
}

use Permission::*;

const PLATFORM_OWNER_DEFAULTS: PermissionSet = PermissionSet::from_slice(&[
    PlatformAll,
    PlatformCompanyManage,
    PlatformUserManage,
    PlatformSystemConfig,
    PlatformAnalytics,
    PlatformSupport,
    ManageCompanies,
    ManageCourses,
    ManageTimeslots,
    ManageBookings,
    ManageUsers,
    ManageAdmins,
    ViewDashboard,
    ViewAnalytics,
    CompanyAll,
    CompanyAdminManage,
    CompanyCourseManage,
    CompanyBookingManage,
    CompanyUserManage,
    CompanyAnalytics,
    CourseTimeslotManage,
    CourseBookingManage,
    CourseCustomerView,
    CourseAnalyticsView,
]);

const PLATFORM_ADMIN_DEFAULTS: PermissionSet = PermissionSet::from_slice(&[
    PlatformCompanyManage,
    PlatformUserManage,
    PlatformAnalytics,
    PlatformSupport,
    ManageCompanies,
    ManageCourses,
    ManageTimeslots,
    ManageBookings,
    ManageUsers,
    ManageAdmins,
    ViewDashboard,
    ViewAnalytics,
    CompanyAll,
    CompanyAdminManage,
    CompanyCourseManage,
    CompanyBookingManage,
    CompanyUserManage,
    CompanyAnalytics,
]);

const PLATFORM_SUPPORT_DEFAULTS: PermissionSet = PermissionSet::from_slice(&[
    PlatformSupport,
    CompanyUserManage,
    CompanyBookingManage,
    CourseBookingManage,
    CourseCustomerView,
    CustomerSupport,
    BookingReception,
]);

const PLATFORM_ANALYST_DEFAULTS: PermissionSet = PermissionSet::from_slice(&[
    PlatformAnalytics,
    CompanyAnalytics,
    CourseAnalyticsView,
    ReadOnly,
]);

const COMPANY_OWNER_DEFAULTS: PermissionSet = PermissionSet::from_slice(&[
    CompanyAll,
    ManageAdmins,
    ManageTimeslots,
    ManageCourses,
    ManageBookings,
    ManageUsers,
    ViewAnalytics,
    CompanyAdminManage,
    CompanyCourseManage,
    CompanyBookingManage,
    CompanyUserManage,
    CompanyAnalytics,
    CourseTimeslotManage,
    CourseBookingManage,
    CourseCustomerView,
    CourseAnalyticsView,
]);

const COMPANY_MANAGER_DEFAULTS: PermissionSet = PermissionSet::from_slice(&[
    ManageAdmins,
    ManageTimeslots,
    ManageCourses,
    ManageBookings,
    ManageUsers,
    ViewAnalytics,
    CompanyCourseManage,
    CompanyBookingManage,
    CompanyUserManage,
    CompanyAnalytics,
    CourseTimeslotManage,
    CourseBookingManage,
    CourseCustomerView,
    CourseAnalyticsView,
]);

const COURSE_MANAGER_DEFAULTS: PermissionSet = PermissionSet::from_slice(&[
    CourseTimeslotManage,
    CourseBookingManage,
    CourseCustomerView,
    CourseAnalyticsView,
    BookingReception,
    CustomerSupport,
]);

const STAFF_DEFAULTS: PermissionSet = PermissionSet::from_slice(&[
    CourseBookingManage,
    CourseCustomerView,
    BookingReception,
    CustomerSupport,
]);

const READONLY_STAFF_DEFAULTS: PermissionSet =
    PermissionSet::from_slice(&[CourseCustomerView, CourseAnalyticsView, ReadOnly]);

/// The registry, indexed by `Role as usize`.
static REGISTRY: [RoleDefinition; 9] = [
    RoleDefinition {
        role: Role::PlatformOwner,
        tier: Tier::Platform,
        scope: Scope::Platform,
        rank: 0,
        label: "Platform Owner",
        defaults: PLATFORM_OWNER_DEFAULTS,
    },
    RoleDefinition {
        role: Role::PlatformAdmin,
        tier: Tier::Platform,
        scope: Scope::Platform,
        rank: 1,
        label: "Platform Administrator",
        defaults: PLATFORM_ADMIN_DEFAULTS,
    },
    RoleDefinition {
        role: Role::PlatformSupport,
        tier: Tier::Platform,
        scope: Scope::Platform,
        rank: 2,
        label: "Platform Support",
        defaults: PLATFORM_SUPPORT_DEFAULTS,
    },
    RoleDefinition {
        role: Role::PlatformAnalyst,
        tier: Tier::Platform,
        scope: Scope::Platform,
        rank: 3,
        label: "Platform Analyst",
        defaults: PLATFORM_ANALYST_DEFAULTS,
    },
    RoleDefinition {
        role: Role::CompanyOwner,
        tier: Tier::Company,
        scope: Scope::Company,
        rank: 0,
        label: "Company Owner",
        defaults: COMPANY_OWNER_DEFAULTS,
    },
    RoleDefinition {
        role: Role::CompanyManager,
        tier: Tier::Company,
        scope: Scope::Company,
        rank: 1,
        label: "Company Manager",
        defaults: COMPANY_MANAGER_DEFAULTS,
    },
    RoleDefinition {
        role: Role::CourseManager,
        tier: Tier::Company,
        scope: Scope::Course,
        rank: 2,
        label: "Course Manager",
        defaults: COURSE_MANAGER_DEFAULTS,
    },
    RoleDefinition {
        role: Role::Staff,
        tier: Tier::Company,
        scope: Scope::Course,
        rank: 3,
        label: "Staff",
        defaults: STAFF_DEFAULTS,
    },
    RoleDefinition {
        role: Role::ReadonlyStaff,
        tier: Tier::Company,
        scope: Scope::Course,
        rank: 4,
        label: "Read-only Staff",
        defaults: READONLY_STAFF_DEFAULTS,
    },
];

impl Role {
    pub const ALL: [Role; 9] = [
        Role::PlatformOwner,
        Role::PlatformAdmin,
        Role::PlatformSupport,
        Role::PlatformAnalyst,
        Role::CompanyOwner,
        Role::CompanyManager,
        Role::CourseManager,
        Role::Staff,
        Role::ReadonlyStaff,
    ];

    /// Registry entry for this role. Never fails.
    #[inline]
    pub fn definition(self) -> &'static RoleDefinition {
        &REGISTRY[self as usize]
    }

    pub fn scope(self) -> Scope {
        self.definition().scope
    }

    pub fn tier(self) -> Tier {
        self.definition().tier
    }

    pub fn rank(self) -> u8 {
        self.definition().rank
    }

    pub fn label(self) -> &'static str {
        self.definition().label
    }

    pub fn default_permissions(self) -> PermissionSet {
        self.definition().defaults
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::PlatformOwner => "PLATFORM_OWNER",
            Role::PlatformAdmin => "PLATFORM_ADMIN",
            Role::PlatformSupport => "PLATFORM_SUPPORT",
            Role::PlatformAnalyst => "PLATFORM_ANALYST",
            Role::CompanyOwner => "COMPANY_OWNER",
            Role::CompanyManager => "COMPANY_MANAGER",
            Role::CourseManager => "COURSE_MANAGER",
            Role::Staff => "STAFF",
            Role::ReadonlyStaff => "READONLY_STAFF",
        }
    }

    /// Compares seniority. `Greater` means `self` is more senior.
    ///
    /// Across tiers the broader scope wins; within a tier the lower rank wins.
    pub fn seniority_cmp(self, other: Role) -> Ordering {
        let (a, b) = (self.definition(), other.definition());
        a.scope
            .breadth()
            .cmp(&b.scope.breadth())
            .then_with(|| match (a.tier, b.tier) {
                (Tier::Platform, Tier::Company) => Ordering::Greater,
                (Tier::Company, Tier::Platform) => Ordering::Less,
                _ => b.rank.cmp(&a.rank),
            })
    }

    /// Strictly more senior than `other` within the same tier.
    pub fn outranks_in_tier(self, other: Role) -> bool {
        self.tier() == other.tier() && self.rank() < other.rank()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a wire string names no known role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
