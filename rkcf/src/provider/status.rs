use chrono::{DateTime, Utc};
use common::{
    ContainerState, ContainerStateRunning, ContainerStatus, PodCondition, PodPhase, PodStatus,
    PodTask,
};

pub const PLACEHOLDER_HOST_IP: &str = "1.2.3.4";
pub const PLACEHOLDER_POD_IP: &str = "5.6.7.8";

/// Status reported for every pod the provider knows about. It is built from
/// the stored spec only; the remote application is never queried.
pub fn running_status(pod: &PodTask, now: DateTime<Utc>) -> PodStatus {
    let conditions = ["Initialized", "Ready", "PodScheduled"]
        .into_iter()
        .map(|t| PodCondition {
            condition_type: t.to_string(),
            status: "True".to_string(),
        })
        .collect();

    let container_statuses = pod
        .spec
        .containers
        .iter()
        .map(|c| ContainerStatus {
            name: c.name.clone(),
            image: c.image.clone(),
            ready: true,
            restart_count: 0,
            state: ContainerState {
                running: Some(ContainerStateRunning { started_at: now }),
            },
        })
        .collect();

    PodStatus {
        phase: PodPhase::Running,
        host_ip: PLACEHOLDER_HOST_IP.to_string(),
        pod_ip: PLACEHOLDER_POD_IP.to_string(),
        start_time: Some(now),
        conditions,
        container_statuses,
    }
}
