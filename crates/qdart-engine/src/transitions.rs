use qdart_core::{AssetStatus, EngineError, EngineResult, ErrorCode, TeamStatus};
use std::str::FromStr;

/// Any named status is reachable from any other, so validation is purely
/// membership of the target in the state machine's alphabet.
pub fn parse_team_status(value: &str) -> EngineResult<TeamStatus> {
    TeamStatus::from_str(value).map_err(|_| {
        EngineError::new(
            ErrorCode::InvalidStatus,
            format!("'{value}' is not a team status"),
        )
    })
}

pub fn parse_asset_status(value: &str) -> EngineResult<AssetStatus> {
    AssetStatus::from_str(value).map_err(|_| {
        EngineError::new(
            ErrorCode::InvalidStatus,
            format!("'{value}' is not an asset status"),
        )
    })
}

/// Resolves the `current_task` value a transition commits alongside the
/// status. A team is Deployed iff it carries a task: deploying without one is
/// rejected, and leaving Deployed drops the task even when one was supplied.
pub fn resolve_task(status: TeamStatus, task: Option<String>) -> EngineResult<Option<String>> {
    match status {
        TeamStatus::Deployed => {
            let task = task
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty());
            match task {
                Some(task) => Ok(Some(task)),
                None => Err(EngineError::new(
                    ErrorCode::InvalidInput,
                    "a task is required when deploying a team",
                )),
            }
        }
        TeamStatus::Idle | TeamStatus::Resting => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_rejected() {
        let err = parse_team_status("Bogus").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatus);
        let err = parse_asset_status("Lost").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatus);
    }

    #[test]
    fn every_named_status_parses() {
        for value in ["Idle", "Deployed", "Resting"] {
            parse_team_status(value).unwrap();
        }
        for value in ["Available", "Deployed", "Maintenance"] {
            parse_asset_status(value).unwrap();
        }
    }

    #[test]
    fn deploying_requires_a_task() {
        let task = resolve_task(
            TeamStatus::Deployed,
            Some("Patrol sector 7".to_string()),
        )
        .unwrap();
        assert_eq!(task.as_deref(), Some("Patrol sector 7"));

        assert!(resolve_task(TeamStatus::Deployed, None).is_err());
        assert!(resolve_task(TeamStatus::Deployed, Some("   ".to_string())).is_err());
    }

    #[test]
    fn leaving_deployed_clears_the_task() {
        let task = resolve_task(TeamStatus::Idle, Some("stale task".to_string())).unwrap();
        assert_eq!(task, None);
        let task = resolve_task(TeamStatus::Resting, None).unwrap();
        assert_eq!(task, None);
    }
}
