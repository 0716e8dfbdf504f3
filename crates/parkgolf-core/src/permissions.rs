//! Permission catalog for the Park Golf admin platform.
//!
//! This module is the single closed enumeration of permission kinds. Every
//! permission belongs to exactly one [`PermissionGroup`] which mirrors the
//! subject it governs (the whole platform, one company, one course, or a
//! generic dashboard capability).
//!
//! Permissions are serialized with their wire names (`"MANAGE_ADMINS"`,
//! `"COURSE_CUSTOMER_VIEW"`, ...) so stored admin records and decoded token
//! claims can be read directly.
//!
//! # Example
//!
//! ```ignore
//! use parkgolf_core::permissions::{Permission, PermissionSet};
//!
//! let set: PermissionSet = [Permission::CompanyAll, Permission::ReadOnly]
//!     .into_iter()
//!     .collect();
//!
//! assert!(set.contains(Permission::ReadOnly));
//! assert_eq!(set.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subject a permission governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionGroup {
    Platform,
    Company,
    Course,
    Generic,
}

/// A single permission kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Permission {
    // =========================================================================
    // Platform-wide permissions
    // =========================================================================
    /// Umbrella grant: implies every other permission
    PlatformAll,
    PlatformCompanyManage,
    PlatformUserManage,
    PlatformSystemConfig,
    PlatformAnalytics,
    PlatformSupport,

    // =========================================================================
    // Company-wide permissions
    // =========================================================================
    /// Umbrella grant: implies every company-group permission
    CompanyAll,
    CompanyAdminManage,
    CompanyCourseManage,
    CompanyBookingManage,
    CompanyUserManage,
    CompanyAnalytics,

    // =========================================================================
    // Course-wide permissions
    // =========================================================================
    CourseTimeslotManage,
    CourseBookingManage,
    CourseCustomerView,
    CourseAnalyticsView,

    // =========================================================================
    // Generic dashboard permissions
    // =========================================================================
    ManageCompanies,
    ManageCourses,
    ManageTimeslots,
    ManageBookings,
    ManageUsers,
    ManageAdmins,
    ViewDashboard,
    ViewAnalytics,
    ReadOnly,
    BookingReception,
    CustomerSupport,
}

impl Permission {
    /// Every permission, in declaration order.
    pub const ALL: [Permission; 27] = [
        Permission::PlatformAll,
        Permission::PlatformCompanyManage,
        Permission::PlatformUserManage,
        Permission::PlatformSystemConfig,
        Permission::PlatformAnalytics,
        Permission::PlatformSupport,
        Permission::CompanyAll,
        Permission::CompanyAdminManage,
        Permission::CompanyCourseManage,
        Permission::CompanyBookingManage,
        Permission::CompanyUserManage,
        Permission::CompanyAnalytics,
        Permission::CourseTimeslotManage,
        Permission::CourseBookingManage,
        Permission::CourseCustomerView,
        Permission::CourseAnalyticsView,
        Permission::ManageCompanies,
        Permission::ManageCourses,
        Permission::ManageTimeslots,
        Permission::ManageBookings,
        Permission::ManageUsers,
        Permission::ManageAdmins,
        Permission::ViewDashboard,
        Permission::ViewAnalytics,
        Permission::ReadOnly,
        Permission::BookingReception,
        Permission::CustomerSupport,
    ];

    /// Wire name of the permission.
    pub const fn as_str(self) -> &'static str {
        match self {
            Permission::PlatformAll => "PLATFORM_ALL",
            Permission::PlatformCompanyManage => "PLATFORM_COMPANY_MANAGE",
            Permission::PlatformUserManage => "PLATFORM_USER_MANAGE",
            Permission::PlatformSystemConfig => "PLATFORM_SYSTEM_CONFIG",
            Permission::PlatformAnalytics => "PLATFORM_ANALYTICS",
            Permission::PlatformSupport => "PLATFORM_SUPPORT",
            Permission::CompanyAll => "COMPANY_ALL",
            Permission::CompanyAdminManage => "COMPANY_ADMIN_MANAGE",
            Permission::CompanyCourseManage => "COMPANY_COURSE_MANAGE",
            Permission::CompanyBookingManage => "COMPANY_BOOKING_MANAGE",
            Permission::CompanyUserManage => "COMPANY_USER_MANAGE",
            Permission::CompanyAnalytics => "COMPANY_ANALYTICS",
            Permission::CourseTimeslotManage => "COURSE_TIMESLOT_MANAGE",
            Permission::CourseBookingManage => "COURSE_BOOKING_MANAGE",
            Permission::CourseCustomerView => "COURSE_CUSTOMER_VIEW",
            Permission::CourseAnalyticsView => "COURSE_ANALYTICS_VIEW",
            Permission::ManageCompanies => "MANAGE_COMPANIES",
            Permission::ManageCourses => "MANAGE_COURSES",
            Permission::ManageTimeslots => "MANAGE_TIMESLOTS",
            Permission::ManageBookings => "MANAGE_BOOKINGS",
            Permission::ManageUsers => "MANAGE_USERS",
            Permission::ManageAdmins => "MANAGE_ADMINS",
            Permission::ViewDashboard => "VIEW_DASHBOARD",
            Permission::ViewAnalytics => "VIEW_ANALYTICS",
            Permission::ReadOnly => "READ_ONLY",
            Permission::BookingReception => "BOOKING_RECEPTION",
            Permission::CustomerSupport => "CUSTOMER_SUPPORT",
        }
    }

    /// Subject group of the permission.
    pub const fn group(self) -> PermissionGroup {
        match self {
            Permission::PlatformAll
            | Permission::PlatformCompanyManage
            | Permission::PlatformUserManage
            | Permission::PlatformSystemConfig
            | Permission::PlatformAnalytics
            | Permission::PlatformSupport => PermissionGroup::Platform,
            Permission::CompanyAll
            | Permission::CompanyAdminManage
            | Permission::CompanyCourseManage
            | Permission::CompanyBookingManage
            | Permission::CompanyUserManage
            | Permission::CompanyAnalytics => PermissionGroup::Company,
            Permission::CourseTimeslotManage
            | Permission::CourseBookingManage
            | Permission::CourseCustomerView
            | Permission::CourseAnalyticsView => PermissionGroup::Course,
            _ => PermissionGroup::Generic,
        }
    }

    /// Human-readable label shown in the dashboard.
    pub const fn label(self) -> &'static str {
        match self {
            Permission::PlatformAll => "Full platform access",
            Permission::PlatformCompanyManage => "Company management",
            Permission::PlatformUserManage => "Platform-wide user management",
            Permission::PlatformSystemConfig => "System configuration",
            Permission::PlatformAnalytics => "Platform analytics",
            Permission::PlatformSupport => "Customer support",
            Permission::CompanyAll => "Full company access",
            Permission::CompanyAdminManage => "Company admin management",
            Permission::CompanyCourseManage => "Company course management",
            Permission::CompanyBookingManage => "Company booking management",
            Permission::CompanyUserManage => "Company customer management",
            Permission::CompanyAnalytics => "Company analytics",
            Permission::CourseTimeslotManage => "Timeslot management",
            Permission::CourseBookingManage => "Booking management",
            Permission::CourseCustomerView => "Customer lookup",
            Permission::CourseAnalyticsView => "Course analytics",
            Permission::ManageCompanies => "Manage companies",
            Permission::ManageCourses => "Manage courses",
            Permission::ManageTimeslots => "Manage timeslots",
            Permission::ManageBookings => "Manage bookings",
            Permission::ManageUsers => "Manage users",
            Permission::ManageAdmins => "Manage admins",
            Permission::ViewDashboard => "View dashboard",
            Permission::ViewAnalytics => "View analytics",
            Permission::ReadOnly => "Read only",
            Permission::BookingReception => "Booking reception",
            Permission::CustomerSupport => "Customer service",
        }
    }

    const fn bit(self) -> u32 {
        1 << (self as u8)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a wire string names no known permission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown permission: {0}")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

/// Compact set of permissions backed by a bitmask.
///
/// Serializes as a list of wire names in catalog order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Permission>", into = "Vec<Permission>")]
pub struct PermissionSet(u32);

impl PermissionSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Set containing every permission in the catalog.
    pub fn all() -> Self {
        Permission::ALL.into_iter().collect()
    }

    /// Set containing every permission of one group.
    pub fn of_group(group: PermissionGroup) -> Self {
        Permission::ALL
            .into_iter()
            .filter(|p| p.group() == group)
            .collect()
    }

    pub const fn from_slice(permissions: &[Permission]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < permissions.len() {
            bits |= permissions[i].bit();
            i += 1;
        }
        Self(bits)
    }

    pub fn insert(&mut self, permission: Permission) {
        self.0 |= permission.bit();
    }

    pub fn remove(&mut self, permission: Permission) {
        self.0 &= !permission.bit();
    }

    #[inline]
    pub const fn contains(&self, permission: Permission) -> bool {
        self.0 & permission.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn is_subset(&self, other: &Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Iterates permissions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        Permission::ALL.into_iter().filter(|p| self.contains(*p))
    }
}

impl fmt::Debug for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut set = Self::empty();
        for permission in iter {
            set.insert(permission);
        }
        set
    }
}

impl Extend<Permission> for PermissionSet {
    fn extend<I: IntoIterator<Item = Permission>>(&mut self, iter: I) {
        for permission in iter {
            self.insert(permission);
        }
    }
}

impl From<Vec<Permission>> for PermissionSet {
    fn from(permissions: Vec<Permission>) -> Self {
        permissions.into_iter().collect()
    }
}

impl From<PermissionSet> for Vec<Permission> {
    fn from(set: PermissionSet) -> Self {
        set.iter().collect()
    }
}
