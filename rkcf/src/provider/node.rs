use std::collections::HashMap;

use chrono::{DateTime, Utc};
use common::{DaemonEndpoint, NodeAddress, NodeCondition, NodeDaemonEndpoints};

pub const OPERATING_SYSTEM_LINUX: &str = "Linux";

// Cloud Foundry does not report usable quota back, so the node advertises a
// fixed size.
pub fn capacity() -> HashMap<String, String> {
    HashMap::from([
        ("cpu".to_string(), "20".to_string()),
        ("memory".to_string(), "100Gi".to_string()),
        ("pods".to_string(), "20".to_string()),
    ])
}

fn condition(
    condition_type: &str,
    status: &str,
    reason: &str,
    message: &str,
    now: DateTime<Utc>,
) -> NodeCondition {
    NodeCondition {
        condition_type: condition_type.to_string(),
        status: status.to_string(),
        last_heartbeat_time: Some(now),
        last_transition_time: Some(now),
        reason: reason.to_string(),
        message: message.to_string(),
    }
}

pub fn node_conditions(now: DateTime<Utc>) -> Vec<NodeCondition> {
    vec![
        condition("Ready", "True", "KubeletReady", "kubelet is ready.", now),
        condition(
            "OutOfDisk",
            "False",
            "KubeletHasSufficientDisk",
            "kubelet has sufficient disk space available",
            now,
        ),
        condition(
            "MemoryPressure",
            "False",
            "KubeletHasSufficientMemory",
            "kubelet has sufficient memory available",
            now,
        ),
        condition(
            "DiskPressure",
            "False",
            "KubeletHasNoDiskPressure",
            "kubelet has no disk pressure",
            now,
        ),
        condition(
            "NetworkUnavailable",
            "False",
            "RouteCreated",
            "RouteController created a route",
            now,
        ),
    ]
}

pub fn node_addresses(internal_ip: &str) -> Vec<NodeAddress> {
    vec![NodeAddress {
        address_type: "InternalIP".to_string(),
        address: internal_ip.to_string(),
    }]
}

pub fn daemon_endpoints(port: i32) -> NodeDaemonEndpoints {
    NodeDaemonEndpoints {
        kubelet_endpoint: DaemonEndpoint { port },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ready_is_true() {
        let conditions = node_conditions(Utc::now());
        assert_eq!(conditions.len(), 5);
        for c in &conditions {
            let expected = if c.condition_type == "Ready" { "True" } else { "False" };
            assert_eq!(c.status, expected, "condition {}", c.condition_type);
            assert!(c.last_heartbeat_time.is_some());
        }
    }

    #[test]
    fn test_static_capacity() {
        let cap = capacity();
        assert_eq!(cap["cpu"], "20");
        assert_eq!(cap["memory"], "100Gi");
        assert_eq!(cap["pods"], "20");
    }
}
