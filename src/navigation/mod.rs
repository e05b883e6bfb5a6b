//! Click-through navigation contract
//!
//! Maps a selected service entry to the view a UI should open. The broker
//! entry is the exception and navigates nowhere. This module only computes
//! the target; the caller owns the actual router and filter storage.

/// Path of the per-service health detail view
pub const SERVICES_PATH: &str = "/systems/services";

/// Filter namespace touched before navigating
pub const FILTER_NAMESPACE: &str = "services";

/// Where a selected entry should take the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpTarget {
    /// View path to open
    pub path: &'static str,
    /// Filter assignment applied before navigating: (namespace, key, value)
    pub filter: (&'static str, &'static str, &'static str),
}

/// Resolve the navigation target for a selected entry.
///
/// Every entry jumps to the services view with the actions filter enabled,
/// except the entry named `excluded` (the broker check, which has no
/// per-service detail view).
pub fn jump_target(entry_name: &str, excluded: &str) -> Option<JumpTarget> {
    if entry_name == excluded {
        return None;
    }
    Some(JumpTarget {
        path: SERVICES_PATH,
        filter: (FILTER_NAMESPACE, "actions", "true"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_entry_jumps_to_services_view() {
        let target = jump_target("composer", "ActiveMQ").expect("target resolved");
        assert_eq!(target.path, SERVICES_PATH);
        assert_eq!(target.filter, ("services", "actions", "true"));
    }

    #[test]
    fn test_broker_entry_does_not_navigate() {
        assert_eq!(jump_target("ActiveMQ", "ActiveMQ"), None);
    }

    #[test]
    fn test_exclusion_is_exact_match() {
        assert!(jump_target("ActiveMQ2", "ActiveMQ").is_some());
        assert!(jump_target("activemq", "ActiveMQ").is_some());
    }
}
