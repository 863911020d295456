//! Display labels for raw backend keys.
//!
//! Report payloads and enums arrive as upper-snake keys (`"MALE"`,
//! `"IN_STOCK"`) or bucket names (`"0-2"`). Keys missing from the table are
//! shown as-is.

use std::borrow::Cow;

/// Fixed display label for a known key
pub fn label_for(key: &str) -> Option<&'static str> {
    let label = match key {
        // gender
        "MALE" => "Male",
        "FEMALE" => "Female",
        "OTHER" => "Other",
        "UNSPECIFIED" => "Not specified",

        // age buckets
        "0-2" => "0-2 years",
        "3-5" => "3-5 years",
        "6-12" => "6-12 years",
        "13-17" => "13-17 years",
        "18+" => "18+ years",

        // stock
        "IN_STOCK" => "In Stock",
        "LOW_STOCK" => "Low Stock",
        "OUT_OF_STOCK" => "Out of Stock",

        // inventory categories
        "FOOD" => "Food",
        "CLOTHING" => "Clothing",
        "MEDICAL" => "Medical Supplies",
        "EDUCATION" => "Education",
        "EDUCATIONAL" => "Educational Materials",
        "HYGIENE" => "Hygiene",
        "FURNITURE" => "Furniture",
        "BEDDING" => "Bedding",
        "TOYS" => "Toys",

        // education levels
        "NONE" => "None",
        "KINDERGARTEN" => "Kindergarten",
        "PRIMARY" => "Primary School",
        "SECONDARY" => "Secondary School",
        "HIGHER" => "Higher Education",
        "VOCATIONAL" => "Vocational Training",

        // statuses
        "ACTIVE" => "Active",
        "INACTIVE" => "Inactive",
        "SUSPENDED" => "Suspended",
        "PENDING" => "Pending",
        "COMPLETED" => "Completed",
        "CANCELLED" => "Cancelled",
        "ADOPTED" => "Adopted",
        "ADMITTED" => "Admitted",

        // roles
        "SUPERUSER" => "System Superuser",
        "ORPHANAGE_ADMIN" => "Orphanage Admin",
        "SUPERVISOR" => "Branch Supervisor",
        "CAREGIVER" => "Caregiver",
        "SOCIAL_WORKER" => "Social Worker",
        "ACCOUNTANT" => "Accountant",
        "VOLUNTEER" => "Volunteer",

        // notification kinds
        "INVENTORY" => "Inventory",
        "FUNDRAISING" => "Fundraising",
        "STAFF" => "Staff",
        "BRANCH" => "Branch",
        "REPORT" => "Report",
        "SYSTEM" => "System",

        // volunteer skills
        "TEACHING" => "Teaching",
        "HEALTHCARE" => "Healthcare",
        "COUNSELING" => "Counseling",
        "COOKING" => "Cooking",
        "MAINTENANCE" => "Maintenance",

        // months
        "JANUARY" => "Jan",
        "FEBRUARY" => "Feb",
        "MARCH" => "Mar",
        "APRIL" => "Apr",
        "MAY" => "May",
        "JUNE" => "Jun",
        "JULY" => "Jul",
        "AUGUST" => "Aug",
        "SEPTEMBER" => "Sep",
        "OCTOBER" => "Oct",
        "NOVEMBER" => "Nov",
        "DECEMBER" => "Dec",

        _ => return None,
    };
    Some(label)
}

/// Translate a raw key, passing unknown keys through unchanged
pub fn translate(key: &str) -> Cow<'_, str> {
    match label_for(key) {
        Some(label) => Cow::Borrowed(label),
        None => Cow::Borrowed(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys() {
        assert_eq!(translate("MALE"), "Male");
        assert_eq!(translate("0-2"), "0-2 years");
        assert_eq!(translate("IN_STOCK"), "In Stock");
        assert_eq!(translate("ORPHANAGE_ADMIN"), "Orphanage Admin");
    }

    #[test]
    fn test_unknown_key_passes_through() {
        assert_eq!(translate("SPACESHIPS"), "SPACESHIPS");
        assert_eq!(translate(""), "");
        assert!(label_for("male").is_none());
    }
}
